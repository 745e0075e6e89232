//! Per-field error text for integer binders.

use crate::PrimitiveError;
use serde::{Deserialize, Serialize};

/// Error text declared alongside an integer field.
///
/// `name_at_start_of_sentence` is spliced into the generated messages, so it
/// should be capitalised the way it reads at the start of a sentence (for
/// example `"Number of children"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ErrorMessageConfigDto")]
pub struct ErrorMessageConfig {
    error_message_if_missing: Box<str>,
    name_at_start_of_sentence: Box<str>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ErrorMessageConfigDto {
    error_message_if_missing: String,
    name_at_start_of_sentence: String,
}

impl TryFrom<ErrorMessageConfigDto> for ErrorMessageConfig {
    type Error = PrimitiveError;

    fn try_from(dto: ErrorMessageConfigDto) -> Result<Self, Self::Error> {
        Self::new(dto.error_message_if_missing, dto.name_at_start_of_sentence)
    }
}

impl ErrorMessageConfig {
    /// Build error text, rejecting blank entries. Text is stored as written.
    pub fn new(
        error_message_if_missing: impl AsRef<str>,
        name_at_start_of_sentence: impl AsRef<str>,
    ) -> Result<Self, PrimitiveError> {
        let missing = error_message_if_missing.as_ref();
        if missing.trim().is_empty() {
            return Err(PrimitiveError::EmptyErrorText {
                property: "errorMessageIfMissing",
            });
        }
        let name = name_at_start_of_sentence.as_ref();
        if name.trim().is_empty() {
            return Err(PrimitiveError::EmptyErrorText {
                property: "nameAtStartOfSentence",
            });
        }
        Ok(Self {
            error_message_if_missing: missing.into(),
            name_at_start_of_sentence: name.into(),
        })
    }

    /// Message shown when no value (or an empty value) was submitted.
    #[must_use]
    pub fn error_message_if_missing(&self) -> &str {
        &self.error_message_if_missing
    }

    /// Field name as it reads at the start of a sentence.
    #[must_use]
    pub fn name_at_start_of_sentence(&self) -> &str {
        &self.name_at_start_of_sentence
    }

    /// Message shown when the value does not parse as a number.
    #[must_use]
    pub fn must_be_a_number(&self) -> String {
        format!("{} must be a number", self.name_at_start_of_sentence)
    }

    /// Message shown when the value is numeric but not a whole `i32`.
    #[must_use]
    pub fn must_be_a_whole_number(&self) -> String {
        format!("{} must be a whole number", self.name_at_start_of_sentence)
    }
}
