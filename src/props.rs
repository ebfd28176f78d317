//! Reactive props.
//!
//! The embedding page owns the form state; the scene only reads it. A prop
//! can be a plain value, a `spark_signals::Signal` the page keeps writing,
//! or a getter closure over whatever state the page already has.
//!
//! # Example
//!
//! ```
//! use login_monsters::props::PropValue;
//! use login_monsters::types::ReactiveFlags;
//! use spark_signals::signal;
//!
//! let flags = signal(ReactiveFlags::empty());
//! let prop: PropValue<ReactiveFlags> = flags.clone().into();
//!
//! flags.set(ReactiveFlags::FORM_FOCUSED);
//! assert!(prop.get().form_focused());
//! ```

use std::rc::Rc;

use spark_signals::Signal;

/// A value that may be static, reactive, or computed on read.
#[derive(Clone)]
pub enum PropValue<T: Clone + PartialEq + 'static> {
    /// Static value (not reactive).
    Static(T),
    /// Reactive signal (changes propagate automatically).
    Signal(Signal<T>),
    /// Getter function (called each time value is needed).
    Getter(Rc<dyn Fn() -> T>),
}

impl<T: Clone + PartialEq + 'static> PropValue<T> {
    /// Get the current value.
    pub fn get(&self) -> T {
        match self {
            PropValue::Static(v) => v.clone(),
            PropValue::Signal(s) => s.get(),
            PropValue::Getter(f) => f(),
        }
    }

    /// Wrap a getter closure.
    pub fn getter<F>(f: F) -> Self
    where
        F: Fn() -> T + 'static,
    {
        PropValue::Getter(Rc::new(f))
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for PropValue<T> {
    fn default() -> Self {
        PropValue::Static(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> From<T> for PropValue<T> {
    fn from(value: T) -> Self {
        PropValue::Static(value)
    }
}

impl<T: Clone + PartialEq + 'static> From<Signal<T>> for PropValue<T> {
    fn from(signal: Signal<T>) -> Self {
        PropValue::Signal(signal)
    }
}
