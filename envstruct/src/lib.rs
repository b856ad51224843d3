//! Bind nested configuration structs to environment variables
//!
//! `envstruct` walks a configuration struct field by field, derives the
//! environment variable names each field may be read from, and converts the
//! values it finds into the field types. A program declares its configuration
//! shape once and gets back a fully populated, type-checked value, or the
//! first error that made the configuration unusable.
//!
//! # Example
//!
//! ```rust
//! use envstruct::EnvStruct;
//! use std::time::Duration;
//!
//! #[derive(Debug, Default, EnvStruct)]
//! struct Config {
//!     pub mysql: MySql,
//!     pub log: Log,
//!     pub nb_workers: u32,
//!     pub timeout: Duration,
//! }
//!
//! #[derive(Debug, Default, EnvStruct)]
//! struct MySql {
//!     pub host: String,
//!     pub port: u16,
//! }
//!
//! #[derive(Debug, Default, EnvStruct)]
//! struct Log {
//!     #[envstruct(default = "/var/log/mylog.log")]
//!     pub path: String,
//!     #[envstruct(name = "logRotate", optional)]
//!     pub rotate: bool,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! #     std::env::set_var("MYSQL_HOST", "localhost");
//! #     std::env::set_var("MYSQL_PORT", "3306");
//! #     std::env::set_var("NB_WORKERS", "10");
//! #     std::env::set_var("TIMEOUT", "120s");
//! let mut conf = Config::default();
//! envstruct::init(&mut conf)?;
//!
//! assert_eq!(conf.mysql.host, "localhost");
//! assert_eq!(conf.log.path, "/var/log/mylog.log");
//! assert_eq!(conf.timeout, Duration::from_secs(120));
//! #     Ok(())
//! # }
//! ```
//!
//! # Naming of the keys
//!
//! A field's key is its dotted path from the root (`Mysql.Host`) with `.`
//! replaced by `_`. The derive turns each snake_case field name into an
//! UpperCamel segment, so `nb_workers` contributes `NbWorkers`. Each key is
//! tried upper case and lower case, both with and without an extra `_` at
//! word boundaries: `NB_WORKERS`, `NBWORKERS`, `nb_workers` and `nbworkers`
//! all reach `nb_workers`, and a field path `Cassandra.SslCert` is read from
//! `CASSANDRA_SSLCERT`,
//! `CASSANDRA_SSL_CERT`, `cassandra_ssl_cert` or `cassandra_sslcert`. The first
//! key holding a non-empty value wins. An empty value counts as unset.
//!
//! # Field options
//!
//! Options can be written as a raw tag string or as separate keys:
//!
//! | Raw tag            | Structured                  | Effect                              |
//! |--------------------|-----------------------------|-------------------------------------|
//! | `"-"`              | `skip`                      | field is never touched              |
//! | `"optional"`       | `optional`                  | a missing value is not an error     |
//! | `"default=1m"`     | `default = "1m"`            | fallback when no key is set         |
//! | `"myTimeout"`      | `name = "myTimeout"`        | read exactly this key, no variants  |
//!
//! ```rust
//! # use envstruct::EnvStruct;
//! # use std::time::Duration;
//! #[derive(Default, EnvStruct)]
//! struct Config {
//!     #[envstruct("default=1m,myTimeout")]
//!     pub timeout: Duration,
//!
//!     #[envstruct(name = "myRetries", default = 3)]
//!     pub retries: u8,
//! }
//! ```
//!
//! Being optional is inherited: every field below an optional struct field is
//! optional too.
//!
//! # Content of the variables
//!
//! - simple types: the textual value (`true`/`1`, `42`, `1.5`, `120s`)
//! - `Vec<u8>`: standard base64 (`Rk9PQkFS` decodes to `FOOBAR`)
//! - other `Vec`s: comma separated elements (`foo,bar,baz`)
//! - structs inside a `Vec`: one `{...}` token per element, with the field
//!   values in declaration order (`{foobar,10,120s},{barbaz,20,50s}`)
//!
//! Default values are written inside the tag, where `,` already separates
//! options, so their elements are separated by `;` instead:
//! `default={foobar;10;120s};{barbaz;20;50s}`.
//!
//! # Pointers
//!
//! `Option<T>` fields are allocated when the bind reaches them. With
//! [`Options::leave_nil`], an `Option` that was `None` before the bind is reset
//! to `None` when nothing below it received a value.
//!
//! # Custom types
//!
//! Implement [`Unmarshal`] and mark the type `#[envstruct(unmarshal)]`:
//!
//! ```rust
//! use envstruct::{BoxError, EnvStruct, Unmarshal};
//!
//! #[derive(Debug, Default, PartialEq, EnvStruct)]
//! #[envstruct(unmarshal)]
//! enum Connection {
//!     #[default]
//!     Tls,
//!     Insecure,
//! }
//!
//! impl Unmarshal for Connection {
//!     fn unmarshal(&mut self, raw: &str) -> Result<(), BoxError> {
//!         *self = match raw {
//!             "tls" => Connection::Tls,
//!             "insecure" => Connection::Insecure,
//!             other => return Err(format!("unknown connection type {other}").into()),
//!         };
//!         Ok(())
//!     }
//! }
//! ```

pub mod binder;
#[doc(hidden)]
pub mod coerce;
mod error;
#[cfg(feature = "json")]
mod json;
pub mod keys;
pub mod source;
pub mod tag;
pub mod tokenizer;
mod value;
mod walker;

pub use binder::{Binder, Options};
pub use envstruct_derive::EnvStruct;
pub use error::{BoxError, CoerceError, Error};
#[cfg(feature = "json")]
pub use json::Json;
pub use source::{Environment, Lookup};
pub use tag::Tag;
pub use value::{Coercion, EnvValue, FieldRef, Kind, Pointer, Record, Unmarshal};

/// Bind `conf` from the process environment with default options.
///
/// # Errors
///
/// See [`Binder::bind`].
pub fn init<T: EnvValue>(conf: &mut T) -> Result<(), Error> {
    init_with_options(conf, Options::default())
}

/// Bind `conf` from the process environment, prefixing every key.
///
/// # Errors
///
/// See [`Binder::bind`].
pub fn init_with_prefix<T: EnvValue>(conf: &mut T, prefix: impl Into<String>) -> Result<(), Error> {
    init_with_options(conf, Options::new().with_prefix(prefix))
}

/// Bind `conf` from the process environment with explicit options.
///
/// # Errors
///
/// See [`Binder::bind`].
pub fn init_with_options<T: EnvValue>(conf: &mut T, options: Options) -> Result<(), Error> {
    Binder::new(options).bind(conf)
}
