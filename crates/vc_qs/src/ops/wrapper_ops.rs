use crate::Reflect;

/// The nullable wrapper.
pub trait Optional: Reflect {
    /// The wrapped value, `None` when null.
    fn value(&self) -> Option<&dyn Reflect>;

    fn value_mut(&mut self) -> Option<&mut dyn Reflect>;

    /// Sets the wrapper to null.
    fn clear(&mut self);
}

/// The deferred wrapper.
pub trait LazyValue: Reflect {
    /// Computes the value on first access and returns it.
    fn force(&self) -> &dyn Reflect;
}
