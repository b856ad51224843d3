//! Type classification for bindable fields
//!
//! Every field type a configuration struct may hold implements [`EnvValue`].
//! The walker asks a value for its [`Kind`] to decide whether to descend into
//! it (structs, pointers) or to look up a key and hand the raw string to
//! [`EnvValue::coerce`] (everything else).

use crate::binder::{Binder, Options};
use crate::coerce;
use crate::error::{BoxError, CoerceError, Error};
use std::any::{Any, TypeId};
use std::path::PathBuf;
use std::time::Duration;

/// Capability class of a field type.
///
/// A type belongs to exactly one class. `Custom` wins over structure: a
/// struct that implements [`Unmarshal`] is a leaf, not a nested record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `true`/`false` and their short spellings.
    Bool,
    /// Signed integer of any width.
    Int,
    /// Unsigned integer of any width.
    Uint,
    /// Floating point number.
    Float,
    /// Text, stored verbatim.
    String,
    /// Elapsed time such as `120s` or `1h 30m`.
    Duration,
    /// Byte sequence, base64 encoded.
    Bytes,
    /// Separated list of elements.
    Collection,
    /// Struct whose fields are walked, or a `{...}` token inside a list.
    Record,
    /// Nullable indirection allocated on demand.
    Pointer,
    /// Leaf parsed by an [`Unmarshal`] implementation.
    Custom,
}

/// Per-value parsing context handed down by the walker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coercion {
    /// Separator between collection elements and struct token fields.
    pub separator: char,
    /// Skip private fields of `{...}` struct tokens instead of failing.
    pub allow_unexported: bool,
}

impl Default for Coercion {
    fn default() -> Self {
        Self {
            separator: crate::tokenizer::ELEMENT_SEPARATOR,
            allow_unexported: false,
        }
    }
}

/// A type that can be populated from the environment.
///
/// Implemented for primitives, [`String`], [`PathBuf`], [`Duration`],
/// [`Vec`], [`Option`] and [`Box`]. Structs get it from
/// `#[derive(EnvStruct)]`.
pub trait EnvValue {
    /// Capability class of this value
    fn kind(&self) -> Kind;

    /// Overwrite `self` with the value encoded in `raw`
    fn coerce(&mut self, raw: &str, coercion: &Coercion) -> Result<(), CoerceError>;

    /// Field view, for struct types
    fn as_record(&mut self) -> Option<&mut dyn Record> {
        None
    }

    /// Indirection view, for nullable types
    fn as_pointer(&mut self) -> Option<&mut dyn Pointer> {
        None
    }
}

/// One field of a struct, as seen by the walker.
pub struct FieldRef<'a> {
    /// Field identifier as written in the struct.
    pub name: &'static str,
    /// Raw tag string, see [`Tag`](crate::Tag).
    pub tag: &'static str,
    /// Whether the field is `pub`. Private fields are unexported.
    pub exported: bool,
    /// Exclusive view of the field's value.
    pub value: &'a mut dyn EnvValue,
}

impl std::fmt::Debug for FieldRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldRef")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .field("exported", &self.exported)
            .field("kind", &self.value.kind())
            .finish()
    }
}

/// A struct whose fields are bound one by one.
pub trait Record {
    /// Fields in declaration order
    fn fields(&mut self) -> Vec<FieldRef<'_>>;

    /// Prefix declared with `#[envstruct(prefix = "...")]`
    fn prefix(&self) -> Option<&'static str> {
        None
    }

    /// Build a default value and bind it from the process environment.
    ///
    /// Uses the struct-level prefix, if any.
    ///
    /// # Errors
    ///
    /// Any [`Error`] raised while binding.
    fn from_env() -> Result<Self, Error>
    where
        Self: Sized + Default + EnvValue,
    {
        let conf = Self::default();
        let options = Options::new().with_prefix(conf.prefix().unwrap_or_default());
        Self::from_env_with_options(options)
    }

    /// Build a default value and bind it with explicit options.
    ///
    /// # Errors
    ///
    /// Any [`Error`] raised while binding.
    fn from_env_with_options(options: Options) -> Result<Self, Error>
    where
        Self: Sized + Default + EnvValue,
    {
        let mut conf = Self::default();
        Binder::new(options).bind(&mut conf)?;
        Ok(conf)
    }
}

/// A nullable indirection that the walker may allocate and roll back.
pub trait Pointer {
    /// Whether no pointee exists
    fn is_nil(&self) -> bool;

    /// Install a default pointee
    fn allocate(&mut self);

    /// Drop the pointee
    fn clear(&mut self);

    /// The pointee, if allocated
    fn pointee(&mut self) -> Option<&mut dyn EnvValue>;
}

/// Custom parsing hook for field types.
///
/// Types that implement this and are marked `#[envstruct(unmarshal)]` are
/// always treated as leaves: the raw string is handed to [`unmarshal`] as is.
///
/// [`unmarshal`]: Unmarshal::unmarshal
pub trait Unmarshal {
    /// Parse `raw` into `self`
    ///
    /// # Errors
    ///
    /// Any error describing why `raw` is not acceptable.
    fn unmarshal(&mut self, raw: &str) -> Result<(), BoxError>;
}

impl EnvValue for bool {
    fn kind(&self) -> Kind {
        Kind::Bool
    }

    fn coerce(&mut self, raw: &str, _: &Coercion) -> Result<(), CoerceError> {
        *self = coerce::parse_bool(raw)?;
        Ok(())
    }
}

macro_rules! impl_number {
    ($kind:ident => $($ty:ty),+ $(,)?) => {
        $(
            impl EnvValue for $ty {
                fn kind(&self) -> Kind {
                    Kind::$kind
                }

                fn coerce(&mut self, raw: &str, _: &Coercion) -> Result<(), CoerceError> {
                    *self = coerce::parse_number::<$ty>(raw)?;
                    Ok(())
                }
            }
        )+
    };
}

impl_number!(Int => i8, i16, i32, i64, i128, isize);
impl_number!(Uint => u8, u16, u32, u64, u128, usize);
impl_number!(Float => f32, f64);

impl EnvValue for String {
    fn kind(&self) -> Kind {
        Kind::String
    }

    fn coerce(&mut self, raw: &str, _: &Coercion) -> Result<(), CoerceError> {
        raw.clone_into(self);
        Ok(())
    }
}

impl EnvValue for PathBuf {
    fn kind(&self) -> Kind {
        Kind::String
    }

    fn coerce(&mut self, raw: &str, _: &Coercion) -> Result<(), CoerceError> {
        *self = PathBuf::from(raw);
        Ok(())
    }
}

impl EnvValue for Duration {
    fn kind(&self) -> Kind {
        Kind::Duration
    }

    fn coerce(&mut self, raw: &str, _: &Coercion) -> Result<(), CoerceError> {
        *self = coerce::parse_duration(raw)?;
        Ok(())
    }
}

impl<T> EnvValue for Vec<T>
where
    T: EnvValue + Default + 'static,
{
    fn kind(&self) -> Kind {
        if TypeId::of::<T>() == TypeId::of::<u8>() {
            Kind::Bytes
        } else {
            Kind::Collection
        }
    }

    fn coerce(&mut self, raw: &str, coercion: &Coercion) -> Result<(), CoerceError> {
        // Byte sequences are base64, never comma separated
        if let Some(bytes) = (&mut *self as &mut dyn Any).downcast_mut::<Vec<u8>>() {
            *bytes = coerce::parse_bytes(raw)?;
            return Ok(());
        }
        coerce::collection(self, raw, coercion)
    }
}

impl<T> Pointer for Option<T>
where
    T: EnvValue + Default,
{
    fn is_nil(&self) -> bool {
        self.is_none()
    }

    fn allocate(&mut self) {
        *self = Some(T::default());
    }

    fn clear(&mut self) {
        *self = None;
    }

    fn pointee(&mut self) -> Option<&mut dyn EnvValue> {
        self.as_mut().map(|value| value as &mut dyn EnvValue)
    }
}

impl<T> EnvValue for Option<T>
where
    T: EnvValue + Default,
{
    fn kind(&self) -> Kind {
        Kind::Pointer
    }

    fn coerce(&mut self, raw: &str, coercion: &Coercion) -> Result<(), CoerceError> {
        self.get_or_insert_with(T::default).coerce(raw, coercion)
    }

    fn as_pointer(&mut self) -> Option<&mut dyn Pointer> {
        Some(self)
    }
}

// Box is never null, so it is transparent to classification.
impl<T> EnvValue for Box<T>
where
    T: EnvValue + ?Sized,
{
    fn kind(&self) -> Kind {
        (**self).kind()
    }

    fn coerce(&mut self, raw: &str, coercion: &Coercion) -> Result<(), CoerceError> {
        (**self).coerce(raw, coercion)
    }

    fn as_record(&mut self) -> Option<&mut dyn Record> {
        (**self).as_record()
    }

    fn as_pointer(&mut self) -> Option<&mut dyn Pointer> {
        (**self).as_pointer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(true.kind(), Kind::Bool);
        assert_eq!(0i16.kind(), Kind::Int);
        assert_eq!(0u64.kind(), Kind::Uint);
        assert_eq!(0f32.kind(), Kind::Float);
        assert_eq!(String::new().kind(), Kind::String);
        assert_eq!(Duration::ZERO.kind(), Kind::Duration);
        assert_eq!(Vec::<u8>::new().kind(), Kind::Bytes);
        assert_eq!(Vec::<u16>::new().kind(), Kind::Collection);
        assert_eq!(None::<i32>.kind(), Kind::Pointer);
        assert_eq!(Box::new(1u8).kind(), Kind::Uint);
    }

    #[test]
    fn test_option_coerce_allocates() {
        let mut value: Option<u16> = None;
        value.coerce("8080", &Coercion::default()).unwrap();
        assert_eq!(value, Some(8080));
    }

    #[test]
    fn test_pointer_allocate_and_clear() {
        let mut value: Option<String> = None;
        let pointer = value.as_pointer().unwrap();
        assert!(pointer.is_nil());
        pointer.allocate();
        assert!(!pointer.is_nil());
        pointer
            .pointee()
            .unwrap()
            .coerce("hello", &Coercion::default())
            .unwrap();
        assert_eq!(value.as_deref(), Some("hello"));

        value.as_pointer().unwrap().clear();
        assert_eq!(value, None);
    }

    #[test]
    fn test_bytes_are_base64() {
        let mut value: Vec<u8> = Vec::new();
        value.coerce("Rk9PQkFS", &Coercion::default()).unwrap();
        assert_eq!(value, b"FOOBAR");
    }

    #[test]
    fn test_collection_replaces_previous_content() {
        let mut value = vec![1i32, 2, 3];
        value.coerce("4,5", &Coercion::default()).unwrap();
        assert_eq!(value, [4, 5]);
    }

    #[test]
    fn test_nested_pointer_collection() {
        let mut value: Vec<Option<u8>> = Vec::new();
        value.coerce("1,2", &Coercion::default()).unwrap();
        assert_eq!(value, [Some(1), Some(2)]);
    }

    #[test]
    fn test_path_buf() {
        let mut value = PathBuf::new();
        value.coerce("/var/log/x.log", &Coercion::default()).unwrap();
        assert_eq!(value, PathBuf::from("/var/log/x.log"));
    }
}
