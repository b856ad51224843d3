//! Bind entry point and options

use crate::error::Error;
use crate::source::{Environment, Lookup};
use crate::value::EnvValue;
use crate::walker::{Context, Walker};

/// Caller-level binding policy.
///
/// ```
/// use envstruct::Options;
///
/// let options = Options::new()
///     .with_prefix("MYAPP")
///     .with_leave_nil(true);
/// assert_eq!(options.prefix, "MYAPP");
/// assert!(!options.all_optional);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Prepended to every derived key, joined with `_`.
    ///
    /// A trailing `_` is ignored, so `MYAPP` and `MYAPP_` are equivalent.
    /// Custom key names are never prefixed.
    pub prefix: String,
    /// Treat every field as if it were tagged `optional`.
    pub all_optional: bool,
    /// Reset pointers allocated during the bind when nothing below them was set.
    pub leave_nil: bool,
    /// Skip private fields instead of failing.
    pub allow_unexported: bool,
}

impl Options {
    /// Options with every policy off and no prefix
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the key prefix
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set whether every field is optional
    #[must_use]
    pub fn with_all_optional(mut self, all_optional: bool) -> Self {
        self.all_optional = all_optional;
        self
    }

    /// Set whether unused pointers are reset
    #[must_use]
    pub fn with_leave_nil(mut self, leave_nil: bool) -> Self {
        self.leave_nil = leave_nil;
        self
    }

    /// Set whether private fields are skipped
    #[must_use]
    pub fn with_allow_unexported(mut self, allow_unexported: bool) -> Self {
        self.allow_unexported = allow_unexported;
        self
    }
}

/// Binds configuration structs against a [`Lookup`] source.
///
/// ```
/// use envstruct::{Binder, EnvStruct, Options};
/// use std::collections::HashMap;
///
/// #[derive(Debug, Default, EnvStruct)]
/// struct Config {
///     pub name: String,
/// }
///
/// let source = HashMap::from([("FOO_NAME".to_string(), "foobar".to_string())]);
/// let mut conf = Config::default();
/// Binder::new(Options::new().with_prefix("FOO"))
///     .source(source)
///     .bind(&mut conf)
///     .unwrap();
/// assert_eq!(conf.name, "foobar");
/// ```
#[derive(Debug, Clone)]
pub struct Binder<S = Environment> {
    options: Options,
    source: S,
}

impl Binder {
    /// Binder reading from the process environment
    pub fn new(options: Options) -> Self {
        Self {
            options,
            source: Environment,
        }
    }
}

impl Default for Binder {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl<S: Lookup> Binder<S> {
    /// Replace the value source
    pub fn source<T: Lookup>(self, source: T) -> Binder<T> {
        Binder {
            options: self.options,
            source,
        }
    }

    /// Options in effect
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Populate `target` in place.
    ///
    /// `target` must be a struct, or an `Option`/`Box` holding one. A `None`
    /// target is allocated first.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidValueKind`] if `target` is not struct-shaped
    /// - any error raised while binding a field; the first one aborts the bind
    pub fn bind<T: EnvValue>(&self, target: &mut T) -> Result<(), Error> {
        self.bind_value(target)
    }

    fn bind_value(&self, target: &mut dyn EnvValue) -> Result<(), Error> {
        tracing::debug!(prefix = %self.options.prefix, "binding configuration");

        let walker = Walker::new(&self.source, &self.options);
        let root = Context::root(&self.options);

        if let Some(pointer) = target.as_pointer() {
            let allocated = pointer.is_nil();
            if allocated {
                pointer.allocate();
            }

            let result = match pointer.pointee().and_then(|pointee| pointee.as_record()) {
                Some(record) => walker.walk_record(record, &root).map(|_| ()),
                None => Err(Error::InvalidValueKind),
            };

            if allocated && matches!(result, Err(Error::InvalidValueKind)) {
                pointer.clear();
            }
            return result;
        }

        match target.as_record() {
            Some(record) => walker.walk_record(record, &root).map(|_| ()),
            None => Err(Error::InvalidValueKind),
        }
    }
}
