//! Error types for binding configuration structs to environment variables

/// Boxed error returned by [`Unmarshal`](crate::Unmarshal) implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while binding a configuration struct.
///
/// Every error is terminal: the bind stops at the first failing field (in
/// declaration order, depth first). Fields visited before the failure keep
/// whatever value was written to them.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The bind target is neither a struct nor a pointer to a struct.
    #[error("envstruct: invalid value kind, only works on structs")]
    InvalidValueKind,

    /// A private field was encountered and `allow_unexported` is off.
    #[error("envstruct: unexported field '{name}'")]
    UnexportedField {
        /// Dotted path of the offending field
        name: String,
    },

    /// None of the candidate keys resolved and the field is required.
    #[error("envstruct: keys {} not found", keys.join(", "))]
    KeyNotFound {
        /// Every key that was probed, in probe order
        keys: Vec<String>,
    },

    /// A value was found but could not be converted into the field's type.
    #[error("envstruct: unable to parse '{raw}' from keys [{}] as {type_name}: {message}", keys.join(", "))]
    Parse {
        /// The raw string that failed to parse
        raw: String,
        /// Keys that were probed for this field
        keys: Vec<String>,
        /// Type the value was parsed into
        type_name: &'static str,
        /// Message from the underlying parser
        message: String,
    },

    /// A `{...}` struct token does not have one value per struct field.
    #[error(
        "envstruct: struct token '{raw}' from keys [{}] has {actual} fields but struct has {expected}",
        keys.join(", ")
    )]
    ShapeMismatch {
        /// The raw string that was being decoded
        raw: String,
        /// Keys that were probed for this field
        keys: Vec<String>,
        /// Number of fields declared by the struct
        expected: usize,
        /// Number of values found in the token
        actual: usize,
    },

    /// A composite value could not be split into tokens.
    #[error("envstruct: malformed list '{raw}' from keys [{}]: {message}", keys.join(", "))]
    Tokenize {
        /// The raw string that was being split
        raw: String,
        /// Keys that were probed for this field
        keys: Vec<String>,
        /// Description of the problem
        message: String,
    },

    /// A custom [`Unmarshal`](crate::Unmarshal) implementation rejected the value.
    #[error("envstruct: unable to unmarshal '{raw}' from keys [{}]: {source}", keys.join(", "))]
    Unmarshal {
        /// The raw string handed to the unmarshaler
        raw: String,
        /// Keys that were probed for this field
        keys: Vec<String>,
        /// Error returned by the unmarshaler
        source: BoxError,
    },
}

/// Failure while coercing a single raw string, before key context is known.
///
/// The walker attaches the raw value and the probed keys when turning this
/// into an [`Error`].
#[derive(Debug, thiserror::Error)]
pub enum CoerceError {
    /// Textual parse failure for a primitive, duration or byte sequence.
    #[error("invalid {type_name}: {message}")]
    Invalid {
        /// Type the value was parsed into
        type_name: &'static str,
        /// Message from the underlying parser
        message: String,
    },

    /// Struct token arity does not match the struct.
    #[error("struct token has {actual} fields but struct has {expected}")]
    ShapeMismatch {
        /// Number of fields declared by the struct
        expected: usize,
        /// Number of values found in the token
        actual: usize,
    },

    /// The tokenizer gave up on the value.
    #[error("{0}")]
    Tokenize(#[from] crate::tokenizer::TokenizeError),

    /// A struct field inside a `{...}` token is private.
    #[error("unexported field '{0}'")]
    Unexported(&'static str),

    /// A custom unmarshaler returned an error.
    #[error(transparent)]
    Unmarshal(BoxError),
}

impl CoerceError {
    /// Create an invalid-value error for type `T`
    pub fn invalid<T: ?Sized>(message: impl std::fmt::Display) -> Self {
        Self::Invalid {
            type_name: std::any::type_name::<T>(),
            message: message.to_string(),
        }
    }

    /// Attach the raw value and probed keys of the field being bound.
    pub(crate) fn into_error(self, path: &str, raw: &str, keys: &[String]) -> Error {
        let raw = raw.to_string();
        let keys = keys.to_vec();
        match self {
            Self::Invalid { type_name, message } => Error::Parse {
                raw,
                keys,
                type_name,
                message,
            },
            Self::ShapeMismatch { expected, actual } => Error::ShapeMismatch {
                raw,
                keys,
                expected,
                actual,
            },
            Self::Tokenize(e) => Error::Tokenize {
                raw,
                keys,
                message: e.to_string(),
            },
            Self::Unexported(field) => Error::UnexportedField {
                name: format!("{path}.{field}"),
            },
            Self::Unmarshal(source) => Error::Unmarshal { raw, keys, source },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_not_found_lists_every_key() {
        let err = Error::KeyNotFound {
            keys: vec!["FOO_NAME".to_string(), "foo_name".to_string()],
        };
        assert_eq!(err.to_string(), "envstruct: keys FOO_NAME, foo_name not found");
    }

    #[test]
    fn test_invalid_carries_type_name() {
        let err = CoerceError::invalid::<u32>("invalid digit found in string");
        let err = err.into_error("port", "abc", &["PORT".to_string()]);
        match err {
            Error::Parse {
                raw,
                type_name,
                keys,
                ..
            } => {
                assert_eq!(raw, "abc");
                assert_eq!(type_name, "u32");
                assert_eq!(keys, vec!["PORT".to_string()]);
            }
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_unexported_names_full_path() {
        let err = CoerceError::Unexported("secret").into_error("shards", "{a}", &[]);
        assert!(matches!(err, Error::UnexportedField { name } if name == "shards.secret"));
    }
}
