use crate::error::SettingsError;
use crate::value::Value;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BoolArgument {
    value: Option<bool>,
}

impl BoolArgument {
    pub const fn current(&self) -> Option<bool> {
        self.value
    }

    /// Accepts `true`/`false` in any letter case.
    pub(crate) fn parse(raw: &str) -> Result<bool, SettingsError> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if trimmed.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(SettingsError::invalid_format(format!("'{raw}' is not true or false")))
        }
    }

    pub(crate) fn check(value: &Value) -> Result<bool, SettingsError> {
        match value {
            Value::Bool(b) => Ok(*b),
            other => Err(SettingsError::wrong_shape(format!(
                "expected bool, found {}",
                other.type_name()
            ))),
        }
    }

    pub(crate) const fn store(&mut self, value: bool) {
        self.value = Some(value);
    }
}

/// Free text whose length, in characters, is bounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StringArgument {
    min_length: usize,
    max_length: usize,
    value: Option<String>,
}

impl StringArgument {
    #[must_use]
    pub const fn new(min_length: usize, max_length: usize) -> Self {
        Self { min_length, max_length, value: None }
    }

    pub const fn min_length(&self) -> usize {
        self.min_length
    }

    pub const fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn current(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub(crate) fn check_text(&self, text: &str) -> Result<(), SettingsError> {
        let length = text.chars().count();
        if (self.min_length..=self.max_length).contains(&length) {
            Ok(())
        } else {
            Err(SettingsError::out_of_range(format!(
                "text of {length} characters, expected {}..={}",
                self.min_length, self.max_length
            )))
        }
    }

    pub(crate) fn check(&self, value: &Value) -> Result<String, SettingsError> {
        let Value::Text(text) = value else {
            return Err(SettingsError::wrong_shape(format!(
                "expected text, found {}",
                value.type_name()
            )));
        };
        self.check_text(text)?;
        Ok(text.clone())
    }

    pub(crate) fn store(&mut self, text: String) {
        self.value = Some(text);
    }
}

/// Read-only display text; always set, never writable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlainText {
    text: String,
}

impl PlainText {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn refuse() -> SettingsError {
        SettingsError::wrong_shape("plain text arguments are read-only")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_parsing_ignores_case() {
        assert_eq!(BoolArgument::parse("TRUE"), Ok(true));
        assert_eq!(BoolArgument::parse(" False "), Ok(false));
        assert!(matches!(BoolArgument::parse("yes"), Err(SettingsError::InvalidFormat { .. })));
    }

    #[test]
    fn string_length_counts_characters() {
        let name = StringArgument::new(1, 4);
        assert!(name.check_text("žluť").is_ok());
        assert!(matches!(name.check_text(""), Err(SettingsError::OutOfRange { .. })));
        assert!(matches!(name.check_text("cosmic"), Err(SettingsError::OutOfRange { .. })));
    }
}
