//! Key/value sources consulted while binding

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Something that can resolve an environment variable name to a value.
///
/// An empty value is treated the same as an absent one by the binder.
pub trait Lookup {
    /// Value stored under `key`, if any
    fn lookup(&self, key: &str) -> Option<String>;
}

/// The process environment.
///
/// Variables whose value is not valid Unicode are reported as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct Environment;

impl Lookup for Environment {
    fn lookup(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl<S: BuildHasher> Lookup for HashMap<String, String, S> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl Lookup for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<T: Lookup + ?Sized> Lookup for &T {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

/// Lookup backed by a closure, see [`from_fn`]
#[derive(Debug, Clone, Copy)]
pub struct FromFn<F>(F);

impl<F> Lookup for FromFn<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn lookup(&self, key: &str) -> Option<String> {
        (self.0)(key)
    }
}

/// Wrap a closure as a [`Lookup`].
///
/// ```
/// use envstruct::source::{from_fn, Lookup};
///
/// let source = from_fn(|key| (key == "PORT").then(|| "8080".to_string()));
/// assert_eq!(source.lookup("PORT").as_deref(), Some("8080"));
/// assert_eq!(source.lookup("HOST"), None);
/// ```
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: Fn(&str) -> Option<String>,
{
    FromFn(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[test]
    #[serial]
    fn test_environment_lookup() {
        env::set_var("ENVSTRUCT_SOURCE_TEST", "value");
        assert_eq!(
            Environment.lookup("ENVSTRUCT_SOURCE_TEST").as_deref(),
            Some("value")
        );
        env::remove_var("ENVSTRUCT_SOURCE_TEST");
        assert_eq!(Environment.lookup("ENVSTRUCT_SOURCE_TEST"), None);
    }

    #[test]
    fn test_map_lookup() {
        let map: HashMap<String, String> = [("A".to_string(), "1".to_string())].into();
        assert_eq!(map.lookup("A").as_deref(), Some("1"));
        assert_eq!((&map).lookup("B"), None);

        let map: BTreeMap<String, String> = [("B".to_string(), "2".to_string())].into();
        assert_eq!(map.lookup("B").as_deref(), Some("2"));
    }
}
