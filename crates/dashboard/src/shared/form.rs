//! Общие элементы форм модальных окон

use crate::shared::modal_host::Notifier;
use crate::shared::record_store::StoreError;
use contracts::shared::modal::ModalParams;
use thiserror::Error;

/// Message shown under an empty text field
pub const FIELD_REQUIRED: &str = "Field cannot be empty";

pub const CHANGES_SAVED: &str = "Your changes were saved.";
pub const SAVE_FAILED: &str = "Failed to save changes";

/// Ошибки формы
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    /// Inline message, shown before any store call
    #[error("{0}")]
    Validation(String),

    #[error("missing modal parameter `{0}`")]
    MissingParam(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl FormError {
    pub fn validation(message: &str) -> Self {
        FormError::Validation(message.to_string())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, FormError::Validation(_))
    }
}

/// Required (percent-decoded) modal parameter
pub fn required_param(params: &ModalParams, key: &'static str) -> Result<String, FormError> {
    params
        .decoded(key)
        .filter(|v| !v.is_empty())
        .ok_or(FormError::MissingParam(key))
}

/// Toast for a finished modal command. Validation errors are shown inline
/// under the form and produce no toast.
pub fn report<T>(
    notifier: &dyn Notifier,
    result: &Result<T, FormError>,
    success: &str,
    failure: &str,
) {
    match result {
        Ok(_) => notifier.success(success),
        Err(e) if e.is_validation() => {}
        Err(_) => notifier.error(failure),
    }
}

/// Plain text is blank when only whitespace remains
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::testing::RecordingNotifier;

    #[test]
    fn test_required_param() {
        let params = ModalParams::new().encoded("id", "a b").with("empty", "");
        assert_eq!(required_param(&params, "id").unwrap(), "a b");
        assert_eq!(
            required_param(&params, "empty"),
            Err(FormError::MissingParam("empty"))
        );
        assert_eq!(
            required_param(&params, "other"),
            Err(FormError::MissingParam("other"))
        );
    }

    #[test]
    fn test_report_skips_validation_errors() {
        let notifier = RecordingNotifier::default();

        report(&notifier, &Ok::<_, FormError>(()), CHANGES_SAVED, SAVE_FAILED);
        report::<()>(&notifier, &Err(FormError::validation(FIELD_REQUIRED)), CHANGES_SAVED, SAVE_FAILED);
        report::<()>(&notifier, &Err(FormError::MissingParam("id")), CHANGES_SAVED, SAVE_FAILED);

        assert_eq!(notifier.successes(), vec![CHANGES_SAVED.to_string()]);
        assert_eq!(notifier.errors(), vec![SAVE_FAILED.to_string()]);
    }

    #[test]
    fn test_blank_checks() {
        assert!(is_blank("  \n"));
        assert!(!is_blank(" a "));
    }
}
