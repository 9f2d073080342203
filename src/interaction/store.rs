//! Selector-based observable state container.
//!
//! `Store::set` always replaces the state with the updater's result and then
//! notifies each subscriber whose selected value changed. Selected values are
//! compared with `PartialEq`, so selectors should return small identity-like
//! values (ids, flags) rather than deep copies.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Listener<S> = Rc<dyn Fn(&S, &S)>;

struct StoreInner<S> {
    state: RefCell<S>,
    listeners: RefCell<Vec<(u64, Listener<S>)>>,
    next_id: Cell<u64>,
}

/// Shared handle to a store; clones observe and mutate the same state.
pub struct Store<S> {
    inner: Rc<StoreInner<S>>,
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.inner.state.borrow())
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish()
    }
}

impl<S: Clone + 'static> Store<S> {
    #[must_use]
    pub fn new(initial: S) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                state: RefCell::new(initial),
                listeners: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn get(&self) -> S {
        self.inner.state.borrow().clone()
    }

    /// Reads the current state without cloning it.
    pub fn read<T>(&self, reader: impl FnOnce(&S) -> T) -> T {
        reader(&self.inner.state.borrow())
    }

    /// Replaces the state with `updater(previous)` and notifies subscribers.
    ///
    /// Listeners run after the state is stored, so they may read or update the
    /// store themselves.
    pub fn set(&self, updater: impl FnOnce(&S) -> S) {
        let next = updater(&self.inner.state.borrow());
        let previous = self.inner.state.replace(next.clone());

        let listeners: Vec<Listener<S>> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&next, &previous);
        }
    }

    /// Calls `listener(next, previous)` whenever `selector` yields a different value.
    pub fn subscribe<T, F, L>(&self, selector: F, listener: L) -> Subscription<S>
    where
        T: PartialEq,
        F: Fn(&S) -> T + 'static,
        L: Fn(&S, &S) + 'static,
    {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);

        let entry: Listener<S> = Rc::new(move |next: &S, previous: &S| {
            if selector(previous) != selector(next) {
                listener(next, previous);
            }
        });
        self.inner.listeners.borrow_mut().push((id, entry));

        Subscription {
            store: Rc::downgrade(&self.inner),
            id,
        }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Whether both handles point at the same store instance.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Registration returned by `Store::subscribe`.
#[must_use = "dropping the handle keeps the listener registered; call `unsubscribe` to remove it"]
pub struct Subscription<S> {
    store: Weak<StoreInner<S>>,
    id: u64,
}

impl<S> Subscription<S> {
    /// Removes the listener. A no-op when the store is already gone.
    pub fn unsubscribe(self) {
        if let Some(store) = self.store.upgrade() {
            store
                .listeners
                .borrow_mut()
                .retain(|(id, _)| *id != self.id);
        }
    }
}

impl<S> fmt::Debug for Subscription<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

/// Locally cached selection kept in sync with a store.
///
/// `rebind` switches to another store and recomputes the value at once, so
/// readers never observe a value selected from a replaced store.
pub struct SyncedSelector<S: Clone + 'static, T: Clone + PartialEq + 'static> {
    store: Store<S>,
    selector: Rc<dyn Fn(&S) -> T>,
    value: Rc<RefCell<T>>,
    subscription: Option<Subscription<S>>,
}

impl<S: Clone + 'static, T: Clone + PartialEq + 'static> SyncedSelector<S, T> {
    pub fn new(store: &Store<S>, selector: impl Fn(&S) -> T + 'static) -> Self {
        let selector: Rc<dyn Fn(&S) -> T> = Rc::new(selector);
        let value = Rc::new(RefCell::new(store.read(|state| selector(state))));
        let subscription = Self::listen(store, &selector, &value);
        Self {
            store: store.clone(),
            selector,
            value,
            subscription: Some(subscription),
        }
    }

    fn listen(
        store: &Store<S>,
        selector: &Rc<dyn Fn(&S) -> T>,
        value: &Rc<RefCell<T>>,
    ) -> Subscription<S> {
        let watched = Rc::clone(selector);
        let apply = Rc::clone(selector);
        let value = Rc::clone(value);
        store.subscribe(
            move |state: &S| watched(state),
            move |next: &S, _previous: &S| {
                *value.borrow_mut() = apply(next);
            },
        )
    }

    #[must_use]
    pub fn value(&self) -> T {
        self.value.borrow().clone()
    }

    /// Follows `store` instead of the current one; no-op for the same store.
    pub fn rebind(&mut self, store: &Store<S>) {
        if self.store.ptr_eq(store) {
            return;
        }
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        *self.value.borrow_mut() = store.read(|state| (self.selector)(state));
        self.subscription = Some(Self::listen(store, &self.selector, &self.value));
        self.store = store.clone();
    }
}

impl<S: Clone + 'static, T: Clone + PartialEq + 'static> Drop for SyncedSelector<S, T> {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}
