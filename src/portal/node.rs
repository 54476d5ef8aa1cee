//! Shared overlay container

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

type Paint = Box<dyn FnOnce(Rect, &mut Buffer)>;

struct Layer {
    z_index: i32,
    paint: Paint,
}

/// The physical target overlay content is painted into.
///
/// Clones are handles to the same node. Layers queued during a frame are
/// painted and dropped by [`PortalNode::flush`].
#[derive(Clone)]
pub struct PortalNode {
    id: u64,
    layers: Rc<RefCell<Vec<Layer>>>,
}

impl fmt::Debug for PortalNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortalNode")
            .field("id", &self.id)
            .field("pending", &self.pending())
            .finish()
    }
}

impl PortalNode {
    pub(crate) fn new() -> Self {
        Self {
            id: NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed),
            layers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn same_node(&self, other: &PortalNode) -> bool {
        Rc::ptr_eq(&self.layers, &other.layers)
    }

    /// Queues a layer for the next flush
    pub fn push(&self, z_index: i32, paint: impl FnOnce(Rect, &mut Buffer) + 'static) {
        self.layers.borrow_mut().push(Layer {
            z_index,
            paint: Box::new(paint),
        });
    }

    /// Layers queued and not yet painted
    pub fn pending(&self) -> usize {
        self.layers.borrow().len()
    }

    /// Paints queued layers over `area`, lowest z-index first, in queue order
    /// among equals. Returns how many layers were painted.
    pub fn flush(&self, area: Rect, buf: &mut Buffer) -> usize {
        let mut layers = std::mem::take(&mut *self.layers.borrow_mut());
        layers.sort_by_key(|layer| layer.z_index);

        let count = layers.len();
        for layer in layers {
            (layer.paint)(area, buf);
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Style;

    #[test]
    fn flush_orders_by_z_index() {
        let node = PortalNode::new();
        let area = Rect::new(0, 0, 3, 1);
        let mut buf = Buffer::empty(area);

        node.push(20, |_, buf: &mut Buffer| {
            buf.set_string(0, 0, "top", Style::default());
        });
        node.push(10, |_, buf: &mut Buffer| {
            buf.set_string(0, 0, "low", Style::default());
        });

        assert_eq!(node.flush(area, &mut buf), 2);
        assert_eq!(buf[(0, 0)].symbol(), "t");
        assert_eq!(node.pending(), 0);
    }

    #[test]
    fn equal_z_index_keeps_queue_order() {
        let node = PortalNode::new();
        let area = Rect::new(0, 0, 1, 1);
        let mut buf = Buffer::empty(area);

        node.push(5, |_, buf: &mut Buffer| {
            buf.set_string(0, 0, "a", Style::default());
        });
        node.push(5, |_, buf: &mut Buffer| {
            buf.set_string(0, 0, "b", Style::default());
        });

        node.flush(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), "b");
    }

    #[test]
    fn distinct_nodes() {
        let a = PortalNode::new();
        let b = PortalNode::new();

        assert_ne!(a.id(), b.id());
        assert!(!a.same_node(&b));
        assert!(a.same_node(&a.clone()));
    }
}
