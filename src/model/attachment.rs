//! A decoded attachment, owned by its parent message.

/// The content type that qualifies an attachment for archiving.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// One decoded attachment of a fax message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// MIME content type as reported by the parser (e.g. `"application/pdf"`,
    /// `"image/tiff"`). The parser normalizes it to lowercase.
    pub content_type: String,

    /// Decoded payload bytes.
    pub content: Vec<u8>,
}

impl Attachment {
    /// `true` if the content type is exactly `application/pdf`.
    pub fn is_pdf(&self) -> bool {
        self.content_type == PDF_CONTENT_TYPE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attachment(content_type: &str) -> Attachment {
        Attachment {
            content_type: content_type.to_string(),
            content: b"%PDF-1.4".to_vec(),
        }
    }

    #[test]
    fn test_exact_match_is_pdf() {
        assert!(attachment("application/pdf").is_pdf());
    }

    #[test]
    fn test_match_is_case_sensitive() {
        // The parser lowercases content types; anything else arriving here
        // verbatim is not a match.
        assert!(!attachment("application/PDF").is_pdf());
        assert!(!attachment("Application/Pdf").is_pdf());
    }

    #[test]
    fn test_other_types_do_not_match() {
        assert!(!attachment("image/tiff").is_pdf());
        assert!(!attachment("application/pdf+xml").is_pdf());
        assert!(!attachment("application/octet-stream").is_pdf());
    }
}
