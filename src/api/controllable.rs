use std::fmt;

type ChangeHandler<T> = Box<dyn FnMut(&T)>;

/// State the host may own ("controlled") or leave to the model.
///
/// `set` always reports the requested value to the change handler; it is
/// stored only when uncontrolled. Controlled values change through
/// `set_controlled`.
pub struct ControllableState<T> {
    value: T,
    controlled: bool,
    on_change: Option<ChangeHandler<T>>,
}

impl<T: Clone + PartialEq> ControllableState<T> {
    #[must_use]
    pub fn uncontrolled(initial: T) -> Self {
        Self {
            value: initial,
            controlled: false,
            on_change: None,
        }
    }

    #[must_use]
    pub fn controlled(value: T) -> Self {
        Self {
            value,
            controlled: true,
            on_change: None,
        }
    }

    #[must_use]
    pub fn with_on_change(mut self, handler: impl FnMut(&T) + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    #[must_use]
    pub fn value(&self) -> &T {
        &self.value
    }

    #[must_use]
    pub fn is_controlled(&self) -> bool {
        self.controlled
    }

    pub fn set(&mut self, next: T) {
        if next == self.value {
            return;
        }
        if let Some(handler) = self.on_change.as_mut() {
            handler(&next);
        }
        if !self.controlled {
            self.value = next;
        }
    }

    /// Applies a value pushed by the owning host.
    pub fn set_controlled(&mut self, value: T) {
        self.controlled = true;
        self.value = value;
    }
}

impl<T: fmt::Debug> fmt::Debug for ControllableState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllableState")
            .field("value", &self.value)
            .field("controlled", &self.controlled)
            .finish()
    }
}
