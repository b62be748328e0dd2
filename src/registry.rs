//! Caller-supplied callbacks, registered by name.
//!
//! Configurations reference callbacks by name; the registry maps those names
//! to the actual closures. Construction-time validation checks every name the
//! configuration uses against the registry, and the engine resolves names
//! again at fire time (lookups are never cached).

use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// A lifecycle callback: zero arguments, no return value, side effects only.
///
/// Callbacks are invoked synchronously. The engine does not catch panics; a
/// panicking callback unwinds out of `handle_event`.
pub type Callback = Arc<dyn Fn() + Send + Sync>;

/// Named callbacks available to a machine.
///
/// # Example
///
/// ```rust
/// use gearshift::CallbackRegistry;
///
/// let registry = CallbackRegistry::new()
///     .register("beep", || println!("beep"))
///     .register("boop", || println!("boop"));
///
/// assert!(registry.contains("beep"));
/// assert!(!registry.contains("buzz"));
/// assert_eq!(registry.len(), 2);
/// ```
#[derive(Clone, Default)]
pub struct CallbackRegistry {
    callbacks: IndexMap<String, Callback>,
}

impl CallbackRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback under a name, replacing any previous one.
    pub fn register(mut self, name: impl Into<String>, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.callbacks.insert(name.into(), Arc::new(callback));
        self
    }

    /// Whether a callback is registered under this name.
    pub fn contains(&self, name: &str) -> bool {
        self.callbacks.contains_key(name)
    }

    /// Look up a callback by name.
    pub fn get(&self, name: &str) -> Option<&Callback> {
        self.callbacks.get(name)
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("names", &self.callbacks.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn registered_callbacks_are_invocable() {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = Arc::clone(&count);

        let registry =
            CallbackRegistry::new().register("bump", move || {
                count_clone.fetch_add(1, Ordering::SeqCst);
            });

        let callback = registry.get("bump").unwrap();
        callback();
        callback();

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn missing_names_are_absent() {
        let registry = CallbackRegistry::new().register("present", || {});

        assert!(registry.contains("present"));
        assert!(!registry.contains("absent"));
        assert!(registry.get("absent").is_none());
    }

    #[test]
    fn reregistering_replaces_the_callback() {
        let hits = Arc::new(AtomicUsize::new(0));
        let first = Arc::clone(&hits);
        let second = Arc::clone(&hits);

        let registry = CallbackRegistry::new()
            .register("cb", move || {
                first.fetch_add(1, Ordering::SeqCst);
            })
            .register("cb", move || {
                second.fetch_add(10, Ordering::SeqCst);
            });

        assert_eq!(registry.len(), 1);
        registry.get("cb").unwrap()();
        assert_eq!(hits.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn debug_lists_names_only() {
        let registry = CallbackRegistry::new().register("alpha", || {});
        let rendered = format!("{registry:?}");
        assert!(rendered.contains("alpha"));
    }

    #[test]
    fn empty_registry_reports_empty() {
        let registry = CallbackRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }
}
