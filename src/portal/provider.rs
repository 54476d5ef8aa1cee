//! Owner of the shared overlay container

use std::cell::RefCell;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use super::context::{Context, ModalContainer};
use super::node::PortalNode;

/// Result of [`ModalProvider::render`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rendered<R> {
    pub output: R,

    /// The container mounted during this frame; draw again so modals appear
    pub needs_redraw: bool,
}

/// Creates the overlay container and publishes it to its subtree.
///
/// The container goes from unmounted to mounted exactly once and never back.
#[derive(Debug, Default)]
pub struct ModalProvider {
    container: RefCell<Option<PortalNode>>,
}

impl ModalProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn portal_node(&self) -> Option<PortalNode> {
        self.container.borrow().clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.container.borrow().is_some()
    }

    /// Mount callback for the container.
    ///
    /// `None` and any call after the first mount are ignored. Returns whether
    /// this call mounted the container.
    pub fn attach(&self, node: Option<PortalNode>) -> bool {
        let Some(node) = node else {
            return false;
        };

        let mut container = self.container.borrow_mut();
        if container.is_some() {
            return false;
        }

        tracing::debug!(node = node.id(), "modal container mounted");
        *container = Some(node);
        true
    }

    /// Context for this provider's subtree
    pub fn context(&self, parent: &Context) -> Context {
        parent.with_modal_container(ModalContainer {
            portal_node: self.portal_node(),
        })
    }

    /// Renders `children` with this provider's context, then the container.
    ///
    /// On the first frame the container mounts after the children have run;
    /// overlay layers queued on later frames are painted over `area`.
    pub fn render<R>(
        &self,
        parent: &Context,
        area: Rect,
        buf: &mut Buffer,
        children: impl FnOnce(&Context, Rect, &mut Buffer) -> R,
    ) -> Rendered<R> {
        let ctx = self.context(parent);
        let output = children(&ctx, area, buf);

        let needs_redraw = match self.portal_node() {
            Some(node) => {
                node.flush(area, buf);
                false
            }
            None => self.attach(Some(PortalNode::new())),
        };

        Rendered {
            output,
            needs_redraw,
        }
    }
}
