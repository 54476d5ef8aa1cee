//! `tina config`: effective shell configuration

use serde::Serialize;

use super::output::Output;
use crate::cms::Cms;
use crate::state::{SidebarButtons, SidebarPosition};
use crate::storage::Config;

#[derive(Debug, Serialize)]
struct EffectiveConfig<'a> {
    project_root: Option<String>,
    sidebar: SidebarView<'a>,
    media: MediaView<'a>,
    plugins: usize,
}

#[derive(Debug, Serialize)]
struct SidebarView<'a> {
    hidden: bool,
    position: SidebarPosition,
    buttons: &'a SidebarButtons,
}

#[derive(Debug, Serialize)]
struct MediaView<'a> {
    configured: bool,
    store: Option<&'a str>,
    accept: &'a str,
}

pub fn show(config: &Config, cms: &Cms, output: &Output) {
    let sidebar = cms.sidebar();
    let effective = EffectiveConfig {
        project_root: config
            .project_root
            .as_ref()
            .map(|root| root.display().to_string()),
        sidebar: SidebarView {
            hidden: sidebar.hidden(),
            position: sidebar.position(),
            buttons: sidebar.buttons(),
        },
        media: MediaView {
            configured: cms.media_configured(),
            store: config.project.media.store.as_deref(),
            accept: cms.media().accept(),
        },
        plugins: config.project.plugins.len(),
    };

    if output.is_json() {
        output.data(&effective);
        return;
    }

    let root = effective.project_root.as_deref().unwrap_or("(none)");
    let hidden = effective.sidebar.hidden.to_string();
    let store = effective.media.store.unwrap_or("(not configured)");
    let plugins = effective.plugins.to_string();

    output.row(&["project", root]);
    output.row(&["sidebar.position", effective.sidebar.position.as_str()]);
    output.row(&["sidebar.hidden", hidden.as_str()]);
    output.row(&["sidebar.buttons.save", effective.sidebar.buttons.save.as_str()]);
    output.row(&["sidebar.buttons.reset", effective.sidebar.buttons.reset.as_str()]);
    output.row(&["media.store", store]);
    output.row(&["media.accept", effective.media.accept]);
    output.row(&["plugins", plugins.as_str()]);
}
