//! Single-threaded observable value with ordered, synchronous notification.
//!
//! # Design
//! - Subscribers are invoked in registration order before the outermost
//!   [`Observable::set`] returns.
//! - Handlers never run while the registry is borrowed, so they may read,
//!   write, subscribe, or unsubscribe re-entrantly.
//! - A write issued from inside a handler stores the value at once; its
//!   delivery is queued behind the in-flight round so every subscriber observes
//!   values in write order. Its audience is fixed when the write happens, so
//!   a subscriber added afterwards only sees it through its immediate delivery.
//! - Writing a value equal to the current one is a no-op.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt::{self, Debug, Formatter};
use std::rc::{Rc, Weak};

use tracing::trace;

type SubscriberId = u64;
type Handler<T> = Rc<dyn Fn(&T)>;

/// Name reported in logs for cells built with [`Observable::new`].
const UNNAMED: &str = "observable";

struct Registry<T> {
    name: &'static str,
    value: T,
    next_id: SubscriberId,
    subscribers: Vec<(SubscriberId, Handler<T>)>,
    /// Queued writes, each paired with the `next_id` at write time; only
    /// subscribers registered before the write receive it.
    pending: VecDeque<(T, SubscriberId)>,
    notifying: bool,
}

impl<T> Registry<T> {
    fn round(&self, watermark: SubscriberId) -> Vec<(SubscriberId, Handler<T>)> {
        self.subscribers
            .iter()
            .filter(|(id, _)| *id < watermark)
            .map(|(id, handler)| (*id, Rc::clone(handler)))
            .collect()
    }
}

/// Type-erased view of a registry used by [`Subscription`].
trait Detach {
    fn detach(&mut self, id: SubscriberId) -> bool;
    fn is_attached(&self, id: SubscriberId) -> bool;
}

impl<T> Detach for Registry<T> {
    fn detach(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    fn is_attached(&self, id: SubscriberId) -> bool {
        self.subscribers.iter().any(|(existing, _)| *existing == id)
    }
}

/// Mutable value that notifies subscribers when it changes.
///
/// Clones share the same underlying cell.
pub struct Observable<T> {
    inner: Rc<RefCell<Registry<T>>>,
}

impl<T> Observable<T> {
    /// Create a cell holding `initial`.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self::with_name(UNNAMED, initial)
    }

    /// Create a cell whose log events carry `name`.
    #[must_use]
    pub fn with_name(name: &'static str, initial: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry {
                name,
                value: initial,
                next_id: 0,
                subscribers: Vec::new(),
                pending: VecDeque::new(),
                notifying: false,
            })),
        }
    }

    /// Name attached to this cell.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.inner.borrow().name
    }

    /// Borrow the current value for the duration of `f`.
    ///
    /// # Panics
    ///
    /// Panics if `f` writes to this cell.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Number of currently registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

impl<T: Clone> Observable<T> {
    /// Current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }
}

impl<T: Clone + 'static> Observable<T> {
    /// Register `handler`, invoking it immediately with the current value and
    /// again after every change.
    ///
    /// The returned [`Subscription`] is a capability: dropping it leaves the
    /// handler registered; call [`Subscription::unsubscribe`] to stop
    /// notifications.
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&T) + 'static,
    {
        let handler: Handler<T> = Rc::new(handler);
        let (id, current) = {
            let mut registry = self.inner.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.subscribers.push((id, Rc::clone(&handler)));
            trace!(
                cell = registry.name,
                subscriber = id,
                subscribers = registry.subscribers.len(),
                "subscriber registered"
            );
            (id, registry.value.clone())
        };
        handler(&current);

        let registry: Rc<RefCell<dyn Detach>> = self.inner.clone();
        Subscription {
            id,
            registry: Rc::downgrade(&registry),
        }
    }
}

impl<T: Clone + PartialEq> Observable<T> {
    /// Replace the value and notify every subscriber in registration order.
    ///
    /// Writing a value equal to the current one does nothing. When called from
    /// inside a handler, the value is stored immediately and delivered after
    /// the in-flight notification round completes.
    ///
    /// Returns whether the value changed.
    pub fn set(&self, value: T) -> bool {
        {
            let mut registry = self.inner.borrow_mut();
            if registry.value == value {
                return false;
            }
            registry.value = value.clone();
            let watermark = registry.next_id;
            registry.pending.push_back((value, watermark));
            if registry.notifying {
                trace!(cell = registry.name, "nested write queued");
                return true;
            }
            registry.notifying = true;
        }
        self.drain();
        true
    }

    /// Replace the value with `f(current)`, returning whether it changed.
    pub fn update(&self, f: impl FnOnce(&T) -> T) -> bool {
        let current = self.get();
        self.set(f(&current))
    }

    fn drain(&self) {
        let _guard = NotifyGuard { cell: &self.inner };
        loop {
            let (value, round) = {
                let mut registry = self.inner.borrow_mut();
                let Some((value, watermark)) = registry.pending.pop_front() else {
                    return;
                };
                trace!(
                    cell = registry.name,
                    subscribers = registry.subscribers.len(),
                    "notifying subscribers"
                );
                (value, registry.round(watermark))
            };
            for (id, handler) in round {
                if self.inner.borrow().is_attached(id) {
                    handler(&value);
                }
            }
        }
    }
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Debug> Debug for Observable<T> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let registry = self.inner.borrow();
        formatter
            .debug_struct("Observable")
            .field("name", &registry.name)
            .field("value", &registry.value)
            .field("subscribers", &registry.subscribers.len())
            .finish_non_exhaustive()
    }
}

/// Clears the notification flag even if a handler unwinds, so the cell stays
/// usable afterwards.
struct NotifyGuard<'a, T> {
    cell: &'a RefCell<Registry<T>>,
}

impl<T> Drop for NotifyGuard<'_, T> {
    fn drop(&mut self) {
        if let Ok(mut registry) = self.cell.try_borrow_mut() {
            registry.notifying = false;
            registry.pending.clear();
        }
    }
}

/// Capability to deregister a handler added with [`Observable::subscribe`].
pub struct Subscription {
    id: SubscriberId,
    registry: Weak<RefCell<dyn Detach>>,
}

impl Subscription {
    /// Stop delivering notifications to the handler.
    ///
    /// Returns `true` if the handler was still registered. Safe to call from
    /// inside a handler and after the cell has been dropped.
    pub fn unsubscribe(self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.borrow_mut().detach(self.id))
    }

    /// Whether the handler is still registered with a live cell.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.borrow().is_attached(self.id))
    }
}

impl Debug for Subscription {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, impl Fn(&T) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |value: &T| sink.borrow_mut().push(value.clone()))
    }

    #[test]
    fn subscribe_delivers_current_value_immediately() {
        let cell = Observable::new(7_u8);
        let (seen, handler) = recorder();
        let _sub = cell.subscribe(handler);
        assert_eq!(*seen.borrow(), vec![7]);
    }

    #[test]
    fn set_notifies_in_registration_order() {
        let cell = Observable::new(0_u8);
        let order = Rc::new(RefCell::new(Vec::new()));
        for tag in ["a", "b", "c"] {
            let order = Rc::clone(&order);
            let _sub = cell.subscribe(move |value: &u8| order.borrow_mut().push((tag, *value)));
        }
        order.borrow_mut().clear();

        cell.set(5);
        assert_eq!(*order.borrow(), vec![("a", 5), ("b", 5), ("c", 5)]);
    }

    #[test]
    fn equal_write_is_silent() {
        let cell = Observable::new(true);
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let _sub = cell.subscribe(move |_| counter.set(counter.get() + 1));

        assert!(!cell.set(true));
        assert_eq!(calls.get(), 1);
        assert!(cell.set(false));
        assert_eq!(calls.get(), 2);
        assert!(!cell.update(|dark| *dark));
    }

    #[test]
    fn unsubscribe_stops_delivery_and_is_idempotent_on_drop_of_cell() {
        let cell = Observable::new(1_i32);
        let (seen, handler) = recorder();
        let sub = cell.subscribe(handler);
        assert!(sub.is_active());
        assert_eq!(cell.subscriber_count(), 1);

        assert!(sub.unsubscribe());
        cell.set(2);
        assert_eq!(*seen.borrow(), vec![1]);
        assert_eq!(cell.subscriber_count(), 0);

        let orphan = Observable::new(0_i32).subscribe(|_| {});
        assert!(!orphan.is_active());
        assert!(!orphan.unsubscribe());
    }

    #[test]
    fn dropping_subscription_keeps_handler() {
        let cell = Observable::new(0_u8);
        let (seen, handler) = recorder();
        drop(cell.subscribe(handler));
        cell.set(3);
        assert_eq!(*seen.borrow(), vec![0, 3]);
    }

    #[test]
    fn nested_write_is_delivered_after_current_round() {
        let cell = Observable::new(0_u8);
        let writer = cell.clone();
        let first = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&first);
        let _a = cell.subscribe(move |value: &u8| {
            sink.borrow_mut().push(*value);
            if *value == 1 {
                writer.set(2);
            }
        });
        let (second, handler) = recorder();
        let _b = cell.subscribe(handler);

        cell.set(1);
        assert_eq!(*first.borrow(), vec![0, 1, 2]);
        assert_eq!(*second.borrow(), vec![0, 1, 2]);
        assert_eq!(cell.get(), 2);
    }

    #[test]
    fn subscriber_added_after_queued_write_sees_it_once() {
        let cell = Observable::new(0_u8);
        let writer = cell.clone();
        let (late, late_handler) = recorder::<u8>();
        let late_handler = Rc::new(RefCell::new(Some(late_handler)));
        let (early, early_handler) = recorder::<u8>();
        let _a = cell.subscribe(move |value: &u8| {
            if *value == 1 {
                writer.set(2);
                if let Some(handler) = late_handler.borrow_mut().take() {
                    let _late = writer.subscribe(handler);
                }
            }
        });
        let _b = cell.subscribe(early_handler);

        cell.set(1);
        assert_eq!(*late.borrow(), vec![2]);
        assert_eq!(*early.borrow(), vec![0, 1, 2]);
        assert_eq!(cell.subscriber_count(), 3);
    }

    #[test]
    fn subscriber_added_mid_round_is_not_part_of_it() {
        let cell = Observable::new(0_u8);
        let subscriber = cell.clone();
        let (late, late_handler) = recorder::<u8>();
        let late_handler = Rc::new(RefCell::new(Some(late_handler)));
        let _a = cell.subscribe(move |value: &u8| {
            if *value == 1
                && let Some(handler) = late_handler.borrow_mut().take()
            {
                let _late = subscriber.subscribe(handler);
            }
        });

        cell.set(1);
        assert_eq!(*late.borrow(), vec![1]);
        cell.set(3);
        assert_eq!(*late.borrow(), vec![1, 3]);
    }

    #[test]
    fn handler_unsubscribed_mid_round_is_skipped() {
        let cell = Observable::new(0_u8);
        let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let slot = Rc::clone(&victim);
        let _killer = cell.subscribe(move |value: &u8| {
            if *value == 1
                && let Some(sub) = slot.borrow_mut().take()
            {
                sub.unsubscribe();
            }
        });
        let (seen, handler) = recorder();
        *victim.borrow_mut() = Some(cell.subscribe(handler));

        cell.set(1);
        assert_eq!(*seen.borrow(), vec![0]);
    }

    #[test]
    fn update_applies_function_to_current_value() {
        let cell = Observable::new(false);
        cell.update(|dark| !dark);
        assert!(cell.get());
        assert!(cell.with(|value| *value));
    }

    #[test]
    fn clones_share_state_and_debug_reports_name() {
        let cell = Observable::with_name("dark_theme", false);
        let alias = cell.clone();
        alias.set(true);
        assert!(cell.get());
        assert_eq!(cell.name(), "dark_theme");
        let rendered = format!("{cell:?}");
        assert!(rendered.contains("dark_theme"));
        assert!(rendered.contains("true"));
    }
}
