//! Recursive descent over a configuration struct

use crate::binder::Options;
use crate::error::Error;
use crate::keys::{combine_name, derive_keys};
use crate::source::Lookup;
use crate::tag::Tag;
use crate::tokenizer::{DEFAULT_SEPARATOR, ELEMENT_SEPARATOR};
use crate::value::{Coercion, EnvValue, Kind, Pointer, Record};

/// Traversal state for one field or struct.
#[derive(Debug, Clone, Default)]
pub(crate) struct Context {
    /// Dotted path from the root, prefix included.
    pub name: String,
    /// Set when this field or any ancestor is optional.
    pub optional: bool,
    /// The field's own tag.
    pub tag: Tag,
}

impl Context {
    pub fn root(options: &Options) -> Self {
        Self {
            name: options
                .prefix
                .trim_end_matches(['_', '.'])
                .to_string(),
            optional: options.all_optional,
            tag: Tag::default(),
        }
    }

    fn child(&self, name: &str, tag: Tag) -> Self {
        Self {
            name: combine_name(&self.name, name),
            optional: self.optional || tag.optional,
            tag,
        }
    }
}

/// A value found for a field.
#[derive(Debug)]
struct Resolved {
    raw: String,
    uses_default: bool,
}

pub(crate) struct Walker<'a> {
    source: &'a dyn Lookup,
    options: &'a Options,
}

impl<'a> Walker<'a> {
    pub fn new(source: &'a dyn Lookup, options: &'a Options) -> Self {
        Self { source, options }
    }

    /// Bind every field of `record`.
    ///
    /// Returns whether any field below this struct received a value.
    pub fn walk_record(&self, record: &mut dyn Record, ctx: &Context) -> Result<bool, Error> {
        let mut was_set = false;

        for field in record.fields() {
            let tag = Tag::parse(field.tag);
            if tag.skip {
                continue;
            }

            let child = ctx.child(field.name, tag);
            if !field.exported {
                if self.options.allow_unexported {
                    continue;
                }
                return Err(Error::UnexportedField { name: child.name });
            }

            was_set |= self.walk_field(field.value, &child)?;
        }

        Ok(was_set)
    }

    fn walk_field(&self, value: &mut dyn EnvValue, ctx: &Context) -> Result<bool, Error> {
        match value.kind() {
            Kind::Pointer => {
                if let Some(pointer) = value.as_pointer() {
                    return self.walk_pointer(pointer, ctx);
                }
            }
            Kind::Record => {
                if let Some(record) = value.as_record() {
                    return self.walk_record(record, ctx);
                }
            }
            _ => {}
        }
        self.bind_leaf(value, ctx)
    }

    /// Allocate a missing pointee and descend into it.
    ///
    /// With `leave_nil`, a pointer allocated here is cleared again when
    /// nothing below it was set.
    fn walk_pointer(&self, pointer: &mut dyn Pointer, ctx: &Context) -> Result<bool, Error> {
        let allocated = pointer.is_nil();
        if allocated {
            pointer.allocate();
        }

        let was_set = match pointer.pointee() {
            Some(pointee) => self.walk_field(pointee, ctx)?,
            None => false,
        };

        if allocated && !was_set && self.options.leave_nil {
            tracing::debug!(path = %ctx.name, "nothing set below pointer, leaving it empty");
            pointer.clear();
        }

        Ok(was_set)
    }

    fn bind_leaf(&self, value: &mut dyn EnvValue, ctx: &Context) -> Result<bool, Error> {
        let keys = derive_keys(&ctx.name, ctx.tag.custom_name());
        let Some(resolved) = self.read_value(&keys, ctx)? else {
            return Ok(false);
        };

        let coercion = Coercion {
            separator: if resolved.uses_default {
                DEFAULT_SEPARATOR
            } else {
                ELEMENT_SEPARATOR
            },
            allow_unexported: self.options.allow_unexported,
        };

        value
            .coerce(&resolved.raw, &coercion)
            .map_err(|e| e.into_error(&ctx.name, &resolved.raw, &keys))?;

        Ok(true)
    }

    /// Probe `keys` in order; the first non-empty value wins.
    ///
    /// Falls back to the tag default, then to nothing for optional fields.
    fn read_value(&self, keys: &[String], ctx: &Context) -> Result<Option<Resolved>, Error> {
        for key in keys {
            if let Some(raw) = self.source.lookup(key).filter(|v| !v.is_empty()) {
                tracing::trace!(path = %ctx.name, key = %key, "resolved key");
                return Ok(Some(Resolved {
                    raw,
                    uses_default: false,
                }));
            }
        }

        if let Some(default) = ctx.tag.default_value() {
            tracing::debug!(path = %ctx.name, default, "no key set, using default value");
            return Ok(Some(Resolved {
                raw: default.to_string(),
                uses_default: true,
            }));
        }

        if ctx.optional {
            return Ok(None);
        }

        Err(Error::KeyNotFound {
            keys: keys.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FieldRef;
    use std::collections::HashMap;

    #[derive(Debug, Default)]
    struct Database {
        user: String,
        port: Option<u16>,
    }

    impl Record for Database {
        fn fields(&mut self) -> Vec<FieldRef<'_>> {
            vec![
                FieldRef {
                    name: "User",
                    tag: "optional",
                    exported: true,
                    value: &mut self.user,
                },
                FieldRef {
                    name: "Port",
                    tag: "optional",
                    exported: true,
                    value: &mut self.port,
                },
            ]
        }
    }

    impl EnvValue for Database {
        fn kind(&self) -> Kind {
            Kind::Record
        }

        fn coerce(&mut self, raw: &str, coercion: &Coercion) -> Result<(), crate::CoerceError> {
            crate::coerce::record(self, raw, coercion)
        }

        fn as_record(&mut self) -> Option<&mut dyn Record> {
            Some(self)
        }
    }

    #[derive(Debug, Default)]
    struct Root {
        name: String,
        database: Option<Database>,
        secret: String,
        ignored: i32,
    }

    impl Record for Root {
        fn fields(&mut self) -> Vec<FieldRef<'_>> {
            vec![
                FieldRef {
                    name: "Name",
                    tag: "default=app",
                    exported: true,
                    value: &mut self.name,
                },
                FieldRef {
                    name: "Database",
                    tag: "",
                    exported: true,
                    value: &mut self.database,
                },
                FieldRef {
                    name: "secret",
                    tag: "",
                    exported: false,
                    value: &mut self.secret,
                },
                FieldRef {
                    name: "Ignored",
                    tag: "-",
                    exported: true,
                    value: &mut self.ignored,
                },
            ]
        }
    }

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn walk(root: &mut Root, source: &HashMap<String, String>, options: &Options) -> Result<bool, Error> {
        let walker = Walker::new(source, options);
        walker.walk_record(root, &Context::root(options))
    }

    #[test]
    fn test_unexported_field_is_fatal() {
        let mut root = Root::default();
        let err = walk(&mut root, &env(&[]), &Options::new()).unwrap_err();
        assert!(matches!(err, Error::UnexportedField { name } if name == "secret"));
    }

    #[test]
    fn test_skipped_private_field_is_not_reported() {
        #[derive(Debug, Default)]
        struct Cache {
            url: String,
            handle: u64,
        }

        impl Record for Cache {
            fn fields(&mut self) -> Vec<FieldRef<'_>> {
                vec![
                    FieldRef {
                        name: "Url",
                        tag: "",
                        exported: true,
                        value: &mut self.url,
                    },
                    FieldRef {
                        name: "handle",
                        tag: "-",
                        exported: false,
                        value: &mut self.handle,
                    },
                ]
            }
        }

        let mut cache = Cache::default();
        let source = env(&[("URL", "redis://localhost"), ("HANDLE", "7")]);
        let options = Options::new();
        let walker = Walker::new(&source, &options);
        let was_set = walker.walk_record(&mut cache, &Context::root(&options)).unwrap();

        assert!(was_set);
        assert_eq!(cache.url, "redis://localhost");
        assert_eq!(cache.handle, 0);
    }

    #[test]
    fn test_unexported_field_skipped_when_allowed() {
        let mut root = Root::default();
        let source = env(&[("SECRET", "x"), ("IGNORED", "5")]);
        let options = Options::new().with_allow_unexported(true);
        let was_set = walk(&mut root, &source, &options).unwrap();

        assert!(was_set);
        assert_eq!(root.name, "app");
        assert_eq!(root.secret, "");
        assert_eq!(root.ignored, 0);
    }

    #[test]
    fn test_leave_nil_rolls_back_unused_pointer() {
        let mut root = Root::default();
        let options = Options::new()
            .with_allow_unexported(true)
            .with_leave_nil(true);
        walk(&mut root, &env(&[]), &options).unwrap();
        assert!(root.database.is_none());
    }

    #[test]
    fn test_pointer_kept_without_leave_nil() {
        let mut root = Root::default();
        let options = Options::new().with_allow_unexported(true);
        walk(&mut root, &env(&[]), &options).unwrap();

        let database = root.database.unwrap();
        assert_eq!(database.user, "");
        assert_eq!(database.port, Some(0));
    }

    #[test]
    fn test_leave_nil_keeps_pointer_with_set_descendant() {
        let mut root = Root::default();
        let options = Options::new()
            .with_allow_unexported(true)
            .with_leave_nil(true);
        walk(&mut root, &env(&[("DATABASE_USER", "root")]), &options).unwrap();

        let database = root.database.unwrap();
        assert_eq!(database.user, "root");
        assert_eq!(database.port, None);
    }

    #[test]
    fn test_existing_pointer_is_never_cleared() {
        let mut root = Root {
            database: Some(Database::default()),
            ..Root::default()
        };
        let options = Options::new()
            .with_allow_unexported(true)
            .with_leave_nil(true);
        walk(&mut root, &env(&[]), &options).unwrap();
        assert!(root.database.is_some());
    }

    #[test]
    fn test_prefix_applies_to_every_key() {
        let mut root = Root::default();
        let source = env(&[("DATABASE_USER", "plain"), ("APP_DATABASE_USER", "prefixed")]);
        let options = Options::new()
            .with_prefix("APP_")
            .with_allow_unexported(true);
        walk(&mut root, &source, &options).unwrap();
        assert_eq!(root.database.unwrap().user, "prefixed");
    }

    #[test]
    fn test_empty_value_counts_as_absent() {
        let mut root = Root::default();
        let options = Options::new().with_allow_unexported(true);
        walk(&mut root, &env(&[("NAME", "")]), &options).unwrap();
        assert_eq!(root.name, "app");
    }

    #[test]
    fn test_parse_error_lists_probed_keys() {
        let mut root = Root::default();
        let options = Options::new().with_allow_unexported(true);
        let err = walk(&mut root, &env(&[("database_port", "http")]), &options).unwrap_err();
        match err {
            Error::Parse { raw, keys, .. } => {
                assert_eq!(raw, "http");
                assert_eq!(keys, ["DATABASE_PORT", "database_port"]);
            }
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_context_child_inherits_optional() {
        let root = Context {
            optional: true,
            ..Context::default()
        };
        let child = root.child("Host", Tag::default());
        assert!(child.optional);
        assert_eq!(child.name, "Host");

        let nested = child.child("Port", Tag::parse("optional"));
        assert_eq!(nested.name, "Host.Port");
    }
}
