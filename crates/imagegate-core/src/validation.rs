//! Structural validation of incoming upload requests.
//!
//! These checks are pure and run before any I/O: the content type must be an
//! image type and the content-disposition must carry the filename. Nothing
//! here touches the registry or storage.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::constants::IMAGE_CONTENT_TYPE_PREFIX;

/// Rejection reasons for a malformed upload request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing content-type header")]
    MissingContentType,

    #[error("Unsupported content type '{0}', only image/* is accepted")]
    UnsupportedMediaType(String),

    #[error("Missing content-disposition header")]
    MissingContentDisposition,

    #[error("Invalid content-disposition, expected attachment; filename=\"<name>\"")]
    InvalidContentDisposition,
}

/// Header values that survived validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUpload {
    /// Filename extracted verbatim from the content-disposition quotes.
    pub filename: String,
    /// Content type the object will be stored with.
    pub content_type: String,
}

// Grammar: the literal token `attachment;`, one or more spaces, then
// `filename="<name>"` with <name> taken verbatim between the quotes. No
// escape handling; greedy capture keeps embedded quotes intact.
static CONTENT_DISPOSITION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^attachment;\s+filename="(?P<filename>.*)"$"#)
        .expect("content-disposition pattern must compile")
});

/// Validate the upload headers and extract the filename.
///
/// Deterministic given the same headers; performs no I/O and no mutation.
pub fn validate_upload_headers(
    content_type: Option<&str>,
    content_disposition: Option<&str>,
) -> Result<ValidatedUpload, ValidationError> {
    let content_type = content_type.ok_or(ValidationError::MissingContentType)?;
    if !content_type.starts_with(IMAGE_CONTENT_TYPE_PREFIX) {
        return Err(ValidationError::UnsupportedMediaType(
            content_type.to_string(),
        ));
    }

    let content_disposition =
        content_disposition.ok_or(ValidationError::MissingContentDisposition)?;
    let filename = CONTENT_DISPOSITION_PATTERN
        .captures(content_disposition)
        .and_then(|captures| captures.name("filename"))
        .map(|m| m.as_str())
        .ok_or(ValidationError::InvalidContentDisposition)?;

    if filename.is_empty() {
        return Err(ValidationError::InvalidContentDisposition);
    }

    Ok(ValidatedUpload {
        filename: filename.to_string(),
        content_type: content_type.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(
        content_type: Option<&str>,
        content_disposition: Option<&str>,
    ) -> Result<ValidatedUpload, ValidationError> {
        validate_upload_headers(content_type, content_disposition)
    }

    #[test]
    fn test_accepts_image_upload() {
        let validated = validate(Some("image/png"), Some(r#"attachment; filename="a.png""#))
            .expect("valid upload headers");
        assert_eq!(validated.filename, "a.png");
        assert_eq!(validated.content_type, "image/png");
    }

    #[test]
    fn test_missing_content_type() {
        assert_eq!(
            validate(None, Some(r#"attachment; filename="a.png""#)),
            Err(ValidationError::MissingContentType)
        );
    }

    #[test]
    fn test_non_image_content_type() {
        assert_eq!(
            validate(Some("text/plain"), Some(r#"attachment; filename="a.png""#)),
            Err(ValidationError::UnsupportedMediaType("text/plain".to_string()))
        );
    }

    #[test]
    fn test_content_type_prefix_is_case_sensitive() {
        assert!(matches!(
            validate(Some("Image/png"), Some(r#"attachment; filename="a.png""#)),
            Err(ValidationError::UnsupportedMediaType(_))
        ));
    }

    #[test]
    fn test_missing_content_disposition() {
        assert_eq!(
            validate(Some("image/jpeg"), None),
            Err(ValidationError::MissingContentDisposition)
        );
    }

    #[test]
    fn test_rejects_inline_disposition() {
        assert_eq!(
            validate(Some("image/png"), Some(r#"inline; filename="a.png""#)),
            Err(ValidationError::InvalidContentDisposition)
        );
    }

    #[test]
    fn test_rejects_unquoted_filename() {
        assert_eq!(
            validate(Some("image/png"), Some("attachment; filename=a.png")),
            Err(ValidationError::InvalidContentDisposition)
        );
    }

    #[test]
    fn test_rejects_missing_space_after_token() {
        assert_eq!(
            validate(Some("image/png"), Some(r#"attachment;filename="a.png""#)),
            Err(ValidationError::InvalidContentDisposition)
        );
    }

    #[test]
    fn test_rejects_trailing_parameters() {
        assert_eq!(
            validate(
                Some("image/png"),
                Some(r#"attachment; filename="a.png"; size=42"#)
            ),
            Err(ValidationError::InvalidContentDisposition)
        );
    }

    #[test]
    fn test_rejects_empty_filename() {
        assert_eq!(
            validate(Some("image/png"), Some(r#"attachment; filename="""#)),
            Err(ValidationError::InvalidContentDisposition)
        );
    }

    #[test]
    fn test_filename_extracted_verbatim() {
        let validated = validate(
            Some("image/gif"),
            Some(r#"attachment; filename="weird name (1) +&%.gif""#),
        )
        .expect("valid upload headers");
        assert_eq!(validated.filename, "weird name (1) +&%.gif");
    }

    #[test]
    fn test_embedded_quotes_kept_by_greedy_capture() {
        let validated = validate(
            Some("image/png"),
            Some(r#"attachment; filename="a"b".png""#),
        )
        .expect("valid upload headers");
        assert_eq!(validated.filename, r#"a"b".png"#);
    }

    #[test]
    fn test_multiple_spaces_accepted() {
        let validated = validate(
            Some("image/png"),
            Some(r#"attachment;   filename="a.png""#),
        )
        .expect("valid upload headers");
        assert_eq!(validated.filename, "a.png");
    }
}
