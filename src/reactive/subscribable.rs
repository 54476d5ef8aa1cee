//! Subscriber set with synchronous, per-subscriber isolated notification.

use std::cell::RefCell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};

/// A subscriber callback. Identity is the `Rc` allocation.
pub type Callback = Rc<dyn Fn()>;

/// Registered callbacks, each tagged with the sequence id of its registration.
#[derive(Default)]
struct SubscriberList {
    next_id: u64,
    entries: Vec<(u64, Callback)>,
}

impl SubscriberList {
    fn contains(&self, callback: &Callback) -> bool {
        self.entries.iter().any(|(_, s)| Rc::ptr_eq(s, callback))
    }

    fn contains_id(&self, id: u64) -> bool {
        self.entries.iter().any(|(entry, _)| *entry == id)
    }
}

/// Holds the subscribers of one piece of reactive state.
///
/// Storage is `Rc<RefCell<..>>`: the type is single-threaded, and no borrow is
/// held while callbacks run, so callbacks may subscribe, unsubscribe, or read
/// the owning state freely.
#[derive(Default)]
pub struct Subscribable {
    subscribers: Rc<RefCell<SubscriberList>>,
}

impl fmt::Debug for Subscribable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribable")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

impl Subscribable {
    /// Creates an empty subscriber set
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback`. Registering the same `Rc` again is a no-op.
    ///
    /// The returned handle removes exactly this callback when invoked.
    pub fn subscribe(&self, callback: Callback) -> Unsubscribe {
        {
            let mut subscribers = self.subscribers.borrow_mut();
            if !subscribers.contains(&callback) {
                let id = subscribers.next_id;
                subscribers.next_id += 1;
                subscribers.entries.push((id, Rc::clone(&callback)));
            }
        }

        Unsubscribe {
            subscribers: Rc::downgrade(&self.subscribers),
            callback,
        }
    }

    /// Removes `callback` if present. Returns whether anything was removed.
    pub fn unsubscribe(&self, callback: &Callback) -> bool {
        remove(&self.subscribers, callback)
    }

    /// Returns true if `callback` is currently registered
    pub fn is_subscribed(&self, callback: &Callback) -> bool {
        self.subscribers.borrow().contains(callback)
    }

    /// Number of registered callbacks
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().entries.len()
    }

    /// Invokes every registered callback once, in registration order.
    ///
    /// Meant for the owning state object, called after each mutation. Returns
    /// the number of callbacks that completed without panicking.
    ///
    /// Only registrations present when the cycle starts are delivered. A
    /// callback removed and registered again mid-cycle is a new registration
    /// and waits for the next cycle.
    pub fn notify_subscribers(&self) -> usize {
        let snapshot = self.subscribers.borrow().entries.clone();
        let mut delivered = 0;

        for (id, callback) in snapshot {
            // Removed by an earlier callback in this cycle.
            if !self.subscribers.borrow().contains_id(id) {
                continue;
            }

            match panic::catch_unwind(AssertUnwindSafe(|| callback())) {
                Ok(()) => delivered += 1,
                Err(payload) => {
                    tracing::error!(
                        panic = %panic_message(payload.as_ref()),
                        "subscriber panicked during notification"
                    );
                }
            }
        }

        delivered
    }
}

/// Capability that removes one callback from the [`Subscribable`] it came from.
///
/// Dropping the handle does not unsubscribe. The handle only holds a weak
/// reference, so it outliving its owner is harmless.
pub struct Unsubscribe {
    subscribers: Weak<RefCell<SubscriberList>>,
    callback: Callback,
}

impl fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unsubscribe")
            .field("owner_alive", &(self.subscribers.strong_count() > 0))
            .finish_non_exhaustive()
    }
}

impl Unsubscribe {
    /// Removes the callback. Returns whether it was still registered.
    pub fn unsubscribe(&self) -> bool {
        match self.subscribers.upgrade() {
            Some(subscribers) => remove(&subscribers, &self.callback),
            None => false,
        }
    }

    /// The callback this handle controls
    pub fn callback(&self) -> &Callback {
        &self.callback
    }
}

fn remove(subscribers: &RefCell<SubscriberList>, callback: &Callback) -> bool {
    let mut subscribers = subscribers.borrow_mut();
    let before = subscribers.entries.len();
    subscribers.entries.retain(|(_, s)| !Rc::ptr_eq(s, callback));
    subscribers.entries.len() != before
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
