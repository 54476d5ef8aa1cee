//! # Portal / Modal Layer
//!
//! Overlay content (modals) can be declared anywhere in the view tree but is
//! painted into one shared overlay layer owned by a [`ModalProvider`].
//!
//! ## Rendering
//!
//! ```text
//! ModalProvider::render
//!  ├── children(&ctx, area, buf)        Modal::render(ctx) queues a layer
//!  │                                      on ctx's PortalNode
//!  └── PortalNode::flush(area, buf)     queued layers painted above the
//!                                         children, lowest z-index first
//! ```
//!
//! The provider mounts its node after its first frame, so that frame carries
//! no target and modals render nothing; [`Rendered::needs_redraw`] tells the
//! caller to draw again.
//!
//! ## Context
//!
//! [`Context`] is the explicit environment passed down the view tree.
//! [`use_modal_container`] fails with [`PortalError::MissingContext`] when no
//! provider is above the caller.

mod context;
mod modal;
mod node;
mod provider;

pub use context::{use_modal_container, Context, ModalContainer, PortalError};
pub use modal::{Modal, ModalActions, ModalBody, ModalButton, ModalHeader, ModalOverlay};
pub use node::PortalNode;
pub use provider::{ModalProvider, Rendered};

/// Stacking index reserved for the overlay layer; above any host content
pub const Z_INDEX: i32 = 2_147_000_000;

/// Stacking index of the modal backdrop
pub const OVERLAY_Z_INDEX: i32 = Z_INDEX + 100;
