//! Validation rules for request fields

use serde::{Deserialize, Serialize};

/// Ошибка валидации конкретного поля запроса
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Имя поля в формате запроса (camelCase)
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation rules for a field
/// Copy trait for efficient passing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationRules {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min_items: Option<usize>,
}

impl ValidationRules {
    /// Create empty validation rules (all optional, no constraints)
    pub const fn none() -> Self {
        Self {
            required: false,
            min_length: None,
            max_length: None,
            min_items: None,
        }
    }

    /// Create validation rules for required field
    pub const fn required() -> Self {
        Self {
            required: true,
            min_length: None,
            max_length: None,
            min_items: None,
        }
    }

    pub const fn with_min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub const fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub const fn with_min_items(mut self, min: usize) -> Self {
        self.min_items = Some(min);
        self
    }

    /// Validate a string value against the rules.
    /// Length is counted in characters of the trimmed value.
    pub fn validate_string(&self, value: &str, field: &str) -> Result<(), FieldError> {
        let trimmed = value.trim();
        if self.required && trimmed.is_empty() {
            return Err(FieldError::new(field, "must not be empty"));
        }

        let len = trimmed.chars().count();
        if let Some(min) = self.min_length {
            if len < min {
                return Err(FieldError::new(
                    field,
                    format!("must be at least {} characters long", min),
                ));
            }
        }

        if let Some(max) = self.max_length {
            if len > max {
                return Err(FieldError::new(
                    field,
                    format!("must be at most {} characters long", max),
                ));
            }
        }

        Ok(())
    }

    /// Validate a list of string references: item count and no blank items
    pub fn validate_list(&self, values: &[String], field: &str) -> Result<(), FieldError> {
        if let Some(min) = self.min_items {
            if values.len() < min {
                return Err(FieldError::new(
                    field,
                    format!("must contain at least {} item(s)", min),
                ));
            }
        }

        if let Some(pos) = values.iter().position(|v| v.trim().is_empty()) {
            return Err(FieldError::new(
                format!("{}[{}]", field, pos),
                "must not be empty",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_whitespace() {
        let rules = ValidationRules::required();
        let err = rules.validate_string("   ", "title").unwrap_err();
        assert_eq!(err.field, "title");
    }

    #[test]
    fn test_min_length_counts_characters_not_bytes() {
        let rules = ValidationRules::required().with_min_length(10);
        // 10 кириллических символов = 20 байт
        assert!(rules.validate_string("повреждено", "description").is_ok());
        assert!(rules.validate_string("bad", "description").is_err());
    }

    #[test]
    fn test_list_rules() {
        let rules = ValidationRules::none().with_min_items(1);
        assert!(rules.validate_list(&[], "evidencePhotos").is_err());

        let err = rules
            .validate_list(&["a.jpg".into(), " ".into()], "evidencePhotos")
            .unwrap_err();
        assert_eq!(err.field, "evidencePhotos[1]");

        assert!(rules.validate_list(&["a.jpg".into()], "evidencePhotos").is_ok());
    }
}
