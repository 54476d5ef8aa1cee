//! Scoped environment carrying the modal container

use thiserror::Error;

use super::node::PortalNode;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortalError {
    #[error("No Modal Container context provided")]
    MissingContext,
}

/// What a [`ModalProvider`](super::ModalProvider) publishes to its subtree
#[derive(Debug, Clone, Default)]
pub struct ModalContainer {
    /// `None` until the provider's container has mounted
    pub portal_node: Option<PortalNode>,
}

/// Environment handed down the view tree.
///
/// Scopes are values: a provider derives a child context for its subtree and
/// leaves the parent untouched.
#[derive(Debug, Clone, Default)]
pub struct Context {
    modal_container: Option<ModalContainer>,
}

impl Context {
    /// Root context with no providers
    pub fn new() -> Self {
        Self::default()
    }

    /// Child scope publishing `container`
    pub fn with_modal_container(&self, container: ModalContainer) -> Self {
        Self {
            modal_container: Some(container),
        }
    }

    pub fn modal_container(&self) -> Option<&ModalContainer> {
        self.modal_container.as_ref()
    }
}

/// Reads the nearest modal container, failing outside any provider
pub fn use_modal_container(ctx: &Context) -> Result<&ModalContainer, PortalError> {
    ctx.modal_container().ok_or(PortalError::MissingContext)
}
