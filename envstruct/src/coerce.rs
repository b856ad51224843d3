//! String to value conversions used by [`EnvValue`] implementations

use crate::error::CoerceError;
use crate::tokenizer::Tokenizer;
use crate::value::{Coercion, EnvValue, Record};
use base64::Engine as _;
use std::str::FromStr;
use std::time::Duration;

/// Parse a boolean.
///
/// Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` and their false
/// counterparts `0`, `f`, `F`, `FALSE`, `false`, `False`.
pub fn parse_bool(raw: &str) -> Result<bool, CoerceError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(CoerceError::invalid::<bool>("expected one of 1, t, true, 0, f, false")),
    }
}

/// Parse a base-10 integer or a float with the standard grammar
pub fn parse_number<T>(raw: &str) -> Result<T, CoerceError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(CoerceError::invalid::<T>)
}

/// Parse an elapsed time such as `120s`, `2m0s` or `1h 30m`
pub fn parse_duration(raw: &str) -> Result<Duration, CoerceError> {
    humantime::parse_duration(raw).map_err(CoerceError::invalid::<Duration>)
}

/// Decode standard-alphabet base64
pub fn parse_bytes(raw: &str) -> Result<Vec<u8>, CoerceError> {
    base64::engine::general_purpose::STANDARD
        .decode(raw)
        .map_err(CoerceError::invalid::<Vec<u8>>)
}

/// Replace `target` with the elements encoded in `raw`.
///
/// Each token is coerced into a fresh default element. `target` is only
/// overwritten once every element parsed; its capacity is kept as a hint.
pub fn collection<T>(target: &mut Vec<T>, raw: &str, coercion: &Coercion) -> Result<(), CoerceError>
where
    T: EnvValue + Default,
{
    let mut items = Vec::with_capacity(target.capacity());
    let mut tokens = Tokenizer::new(raw, coercion.separator);

    while tokens.scan() {
        let mut item = T::default();
        item.coerce(tokens.text(), coercion)?;
        items.push(item);
    }

    if let Some(err) = tokens.err() {
        return Err(err.clone().into());
    }

    *target = items;
    Ok(())
}

/// Fill a struct from a `{v1,v2,...}` token.
///
/// Values are matched to fields by position, in declaration order, and there
/// must be exactly one value per field.
pub fn record<R>(target: &mut R, raw: &str, coercion: &Coercion) -> Result<(), CoerceError>
where
    R: Record + ?Sized,
{
    let inner = raw
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .ok_or_else(|| CoerceError::invalid::<R>("struct values must be wrapped in '{' and '}'"))?;

    let values: Vec<&str> = inner.split(coercion.separator).collect();
    let mut fields = target.fields();
    if values.len() != fields.len() {
        return Err(CoerceError::ShapeMismatch {
            expected: fields.len(),
            actual: values.len(),
        });
    }

    for (field, value) in fields.iter_mut().zip(values) {
        if !field.exported {
            if coercion.allow_unexported {
                continue;
            }
            return Err(CoerceError::Unexported(field.name));
        }
        field.value.coerce(value, coercion)?;
    }

    Ok(())
}
