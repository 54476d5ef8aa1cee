//! Shared utilities for TUI views

/// Truncates to `max_len` characters, ending in an ellipsis when cut
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len == 0 {
        return String::new();
    }

    let mut truncated: String = s.chars().take(max_len - 1).collect();
    truncated.push('…');
    truncated
}
