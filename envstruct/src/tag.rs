//! Parsing of per-field `#[envstruct("...")]` tag strings

/// Options attached to a single field.
///
/// The raw form is a comma separated list of tokens:
///
/// - `-` skips the field entirely
/// - `optional` makes a missing value not an error
/// - `default=<value>` supplies a fallback when no key is set
/// - anything else is a custom environment variable name
///
/// Tokens are not validated against each other: a later token of the same
/// kind overwrites an earlier one, so with two bare tokens the last one is
/// the custom name. An empty token counts as a bare token and clears a custom
/// name given before it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
    /// Exclude the field from binding.
    pub skip: bool,
    /// Absence of a value leaves the field untouched.
    pub optional: bool,
    /// Fallback value, used only when no candidate key is set.
    pub default_value: Option<String>,
    /// Literal key replacing the derived ones.
    pub custom_name: Option<String>,
}

impl Tag {
    /// Parse a raw tag string. An empty string yields the no-op tag.
    pub fn parse(raw: &str) -> Self {
        let mut tag = Self::default();
        if raw.is_empty() {
            return tag;
        }

        for token in raw.split(',') {
            match token {
                "-" => tag.skip = true,
                "optional" => tag.optional = true,
                _ => {
                    if let Some(value) = token.strip_prefix("default=") {
                        tag.default_value = Some(value.to_string());
                    } else {
                        tag.custom_name = Some(token.to_string());
                    }
                }
            }
        }

        tag
    }

    /// Default value, if one was given and is non-empty
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref().filter(|v| !v.is_empty())
    }

    /// Custom key name, if one was given and is non-empty
    pub fn custom_name(&self) -> Option<&str> {
        self.custom_name.as_deref().filter(|name| !name.is_empty())
    }
}
