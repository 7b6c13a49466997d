//! Handlers that capture what subscribers were sent.

use std::cell::RefCell;
use std::rc::Rc;

/// Captures every value delivered to the handlers it hands out.
#[derive(Debug)]
pub struct Recorder<T> {
    seen: Rc<RefCell<Vec<T>>>,
}

impl<T: Clone + 'static> Recorder<T> {
    /// Empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            seen: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Handler taking values by copy, as the preference store delivers them.
    #[must_use]
    pub fn handler(&self) -> impl Fn(T) + use<T> {
        let seen = Rc::clone(&self.seen);
        move |value| seen.borrow_mut().push(value)
    }

    /// Handler taking values by reference, as raw observables deliver them.
    #[must_use]
    pub fn ref_handler(&self) -> impl Fn(&T) + use<T> {
        let seen = Rc::clone(&self.seen);
        move |value: &T| seen.borrow_mut().push(value.clone())
    }

    /// Everything delivered so far, oldest first.
    #[must_use]
    pub fn values(&self) -> Vec<T> {
        self.seen.borrow().clone()
    }

    /// Most recent delivery.
    #[must_use]
    pub fn last(&self) -> Option<T> {
        self.seen.borrow().last().cloned()
    }

    /// Number of deliveries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.borrow().len()
    }

    /// Whether nothing has been delivered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.borrow().is_empty()
    }

    /// Forget recorded deliveries, typically the immediate one from subscribing.
    pub fn clear(&self) {
        self.seen.borrow_mut().clear();
    }
}

impl<T: Clone + 'static> Default for Recorder<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared log of deliveries to several labelled subscribers, in call order.
#[derive(Debug)]
pub struct Journal<T> {
    entries: Rc<RefCell<Vec<(&'static str, T)>>>,
}

impl<T: Clone + 'static> Journal<T> {
    /// Empty journal.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Handler that appends `(label, value)` for each delivery.
    #[must_use]
    pub fn handler(&self, label: &'static str) -> impl Fn(T) + use<T> {
        let entries = Rc::clone(&self.entries);
        move |value| entries.borrow_mut().push((label, value))
    }

    /// Entries recorded so far, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, T)> {
        self.entries.borrow().clone()
    }

    /// Forget recorded entries.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl<T: Clone + 'static> Default for Journal<T> {
    fn default() -> Self {
        Self::new()
    }
}
