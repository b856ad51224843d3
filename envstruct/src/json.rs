//! JSON-encoded field values

use crate::error::{BoxError, CoerceError};
use crate::value::{Coercion, EnvValue, Kind, Unmarshal};
use serde::de::DeserializeOwned;
use std::ops::{Deref, DerefMut};

/// A field whose environment value is a JSON document.
///
/// Useful for shapes the `{a,b}` struct framing cannot express, such as maps
/// or nested lists.
///
/// ```
/// use envstruct::{Binder, EnvStruct, Json, Options};
/// use std::collections::HashMap;
///
/// #[derive(Debug, Default, EnvStruct)]
/// struct Config {
///     pub labels: Json<HashMap<String, String>>,
/// }
///
/// let source = HashMap::from([("LABELS".to_string(), r#"{"tier":"web"}"#.to_string())]);
/// let mut conf = Config::default();
/// Binder::new(Options::new()).source(source).bind(&mut conf).unwrap();
/// assert_eq!(conf.labels["tier"], "web");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    /// Unwrap the decoded value
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for Json<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T: DeserializeOwned> Unmarshal for Json<T> {
    fn unmarshal(&mut self, raw: &str) -> Result<(), BoxError> {
        self.0 = serde_json::from_str(raw)?;
        Ok(())
    }
}

impl<T: DeserializeOwned> EnvValue for Json<T> {
    fn kind(&self) -> Kind {
        Kind::Custom
    }

    fn coerce(&mut self, raw: &str, _: &Coercion) -> Result<(), CoerceError> {
        self.unmarshal(raw).map_err(CoerceError::Unmarshal)
    }
}
