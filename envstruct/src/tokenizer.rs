//! Splitting of composite values into element tokens

/// Separator between slice elements in a value read from the environment.
pub const ELEMENT_SEPARATOR: char = ',';

/// Separator between slice elements in a `default=` tag value.
///
/// Tag options are themselves separated by `,`, so defaults use `;`.
pub const DEFAULT_SEPARATOR: char = ';';

/// Error surfaced by [`Tokenizer::err`] once scanning stops.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenizeError {
    /// A `{` was opened and never closed.
    #[error("unclosed '{{' at byte {0}")]
    UnclosedBrace(usize),
    /// A `}` appeared without a matching `{`.
    #[error("unexpected '}}' at byte {0}")]
    UnexpectedBrace(usize),
}

/// Splits a composite value on a single-character separator.
///
/// A balanced `{...}` span is kept as a single token, braces included, so
/// struct-in-slice encodings such as `{a,1},{b,2}` yield two tokens. Braces do
/// not nest.
///
/// The interface follows the scan/text/err pattern:
///
/// ```
/// use envstruct::tokenizer::Tokenizer;
///
/// let mut tokens = Tokenizer::new("{a,1},{b,2}", ',');
/// let mut out = Vec::new();
/// while tokens.scan() {
///     out.push(tokens.text().to_string());
/// }
/// assert!(tokens.err().is_none());
/// assert_eq!(out, ["{a,1}", "{b,2}"]);
/// ```
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    separator: char,
    pos: usize,
    current: &'a str,
    err: Option<TokenizeError>,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer over `input`
    pub fn new(input: &'a str, separator: char) -> Self {
        Self {
            input,
            separator,
            pos: 0,
            current: "",
            err: None,
        }
    }

    /// Advance to the next token.
    ///
    /// Returns `false` once the input is exhausted or an error occurred. A
    /// trailing separator does not produce an empty final token, but empty
    /// tokens between two separators are returned.
    pub fn scan(&mut self) -> bool {
        if self.err.is_some() || self.pos >= self.input.len() {
            self.current = "";
            return false;
        }

        let start = self.pos;
        let mut open: Option<usize> = None;
        for (offset, ch) in self.input[start..].char_indices() {
            let at = start + offset;
            match ch {
                '{' if open.is_none() => open = Some(at),
                '}' if open.is_some() => open = None,
                '}' => {
                    self.err = Some(TokenizeError::UnexpectedBrace(at));
                    self.current = "";
                    return false;
                }
                c if c == self.separator && open.is_none() => {
                    self.current = &self.input[start..at];
                    self.pos = at + c.len_utf8();
                    return true;
                }
                _ => {}
            }
        }

        if let Some(at) = open {
            self.err = Some(TokenizeError::UnclosedBrace(at));
            self.current = "";
            return false;
        }

        self.current = &self.input[start..];
        self.pos = self.input.len();
        true
    }

    /// Token produced by the last successful [`scan`](Self::scan)
    pub fn text(&self) -> &'a str {
        self.current
    }

    /// Terminal error, if scanning stopped on malformed input
    pub fn err(&self) -> Option<&TokenizeError> {
        self.err.as_ref()
    }

    /// Rewind to the beginning of the input and clear any error
    pub fn reset(&mut self) {
        self.pos = 0;
        self.current = "";
        self.err = None;
    }
}
