//! # Reactive State
//!
//! Change-notification primitive shared by every piece of UI-facing state in
//! the shell.
//!
//! - [`Subscribable`]: a set of zero-argument callbacks that an owning state
//!   object notifies synchronously after each mutation.
//! - [`Unsubscribe`]: handle returned by [`Subscribable::subscribe`] that
//!   removes exactly the callback it was created for.
//!
//! ## Invariants
//!
//! 1. A callback (compared by `Rc` identity) is stored at most once.
//! 2. Subscribers are notified in registration order.
//! 3. A callback removed before or during a notification cycle is not invoked
//!    for the remainder of that cycle or any later one.
//! 4. A panicking subscriber does not prevent delivery to the others.
//!
//! State objects embed a `Subscribable` as a private field and expose
//! `subscribe`/`unsubscribe` pass-throughs, keeping `notify_subscribers` for
//! their own setters.

mod subscribable;

pub use subscribable::{Callback, Subscribable, Unsubscribe};
