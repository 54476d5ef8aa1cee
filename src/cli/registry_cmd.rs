//! Registry listing commands: fields, screens, forms, plugins

use anyhow::{bail, Result};
use serde::Serialize;

use super::output::Output;
use crate::cms::Cms;
use crate::plugin::{ExtensionPlugin, PluginKind};

/// One collection in `tina plugins` output
#[derive(Debug, Serialize)]
struct CollectionSummary {
    #[serde(rename = "type")]
    plugin_type: String,
    names: Vec<String>,
}

pub fn fields(cms: &Cms, output: &Output) {
    let fields = cms.fields().all();

    if output.is_json() {
        let items: Vec<_> = fields.iter().map(|f| f.as_ref()).collect();
        output.data(&items);
        return;
    }

    for field in &fields {
        let default = if field.default_value.is_null() {
            String::new()
        } else {
            field.default_value.to_string()
        };
        output.row(&[field.name.as_str(), field.label.as_str(), default.as_str()]);
    }
}

pub fn screens(cms: &Cms, output: &Output) {
    let screens = cms.screens().all();

    if output.is_json() {
        let items: Vec<_> = screens.iter().map(|s| s.as_ref()).collect();
        output.data(&items);
        return;
    }

    if screens.is_empty() {
        output.success("No screens registered");
        return;
    }

    for screen in &screens {
        output.row(&[
            screen.name.as_str(),
            screen.layout.as_str(),
            screen.description.as_str(),
        ]);
    }
}

pub fn forms(cms: &Cms, output: &Output) {
    let forms = cms.forms().all();

    if output.is_json() {
        let items: Vec<_> = forms.iter().map(|f| f.as_ref()).collect();
        output.data(&items);
        return;
    }

    if forms.is_empty() {
        output.success("No forms registered");
        return;
    }

    for form in &forms {
        let count = form.fields.len().to_string();
        output.row(&[form.id.as_str(), form.label.as_str(), count.as_str()]);
    }
}

pub fn plugins(cms: &Cms, output: &Output, plugin_type: Option<&str>) -> Result<()> {
    let kinds = match plugin_type {
        Some(tag) => {
            let kind = PluginKind::parse(tag)?;
            if !cms.plugins().contains_kind(&kind) {
                bail!("No plugins of type '{}'", kind);
            }
            vec![kind]
        }
        None => cms.plugins().kinds(),
    };

    let mut summaries = Vec::with_capacity(kinds.len());
    for kind in kinds {
        summaries.push(CollectionSummary {
            names: collection_names(cms, &kind)?,
            plugin_type: kind.to_string(),
        });
    }

    if output.is_json() {
        output.data(&summaries);
        return Ok(());
    }

    for (index, summary) in summaries.iter().enumerate() {
        if index > 0 {
            output.blank();
        }
        let heading = format!("{} ({})", summary.plugin_type, summary.names.len());
        output.row(&[heading.as_str()]);
        for name in &summary.names {
            output.row(&["", name.as_str()]);
        }
    }

    Ok(())
}

fn collection_names(cms: &Cms, kind: &PluginKind) -> Result<Vec<String>> {
    let names = match kind {
        PluginKind::Field => cms.fields().names(),
        PluginKind::Screen => cms.screens().names(),
        PluginKind::Form => cms.forms().names(),
        PluginKind::Other(_) => cms
            .plugins()
            .find_or_create_map::<ExtensionPlugin>(kind.clone())?
            .names(),
    };
    Ok(names)
}
