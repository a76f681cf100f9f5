//! MIME parsing of a fetched message into the fields this tool consumes.

use chrono::{DateTime, Utc};
use mail_parser::{MessageParser, MimeHeaders};

use crate::error::{FaxError, Result};

use super::Attachment;

/// A parsed mailbox message: send date and decoded attachments.
#[derive(Debug, Clone, Default)]
pub struct FaxMessage {
    /// Send date in UTC. `None` when the Date header is missing or invalid;
    /// the naming policy renders such messages with a sentinel name.
    pub date: Option<DateTime<Utc>>,

    /// All decoded attachments, PDF or not.
    pub attachments: Vec<Attachment>,
}

impl FaxMessage {
    /// Parse a raw RFC 822 message.
    ///
    /// Date headers are untrusted input: an unparseable date becomes
    /// `date: None`, never an error. Only a body that fails MIME parsing
    /// entirely is rejected.
    pub fn parse(raw: &[u8]) -> Result<Self> {
        let parsed = MessageParser::default()
            .parse(raw)
            .ok_or_else(|| FaxError::Parse("not a parseable MIME message".to_string()))?;

        let date = parsed
            .date()
            .and_then(|d| DateTime::from_timestamp(d.to_timestamp(), 0));

        let attachments = parsed
            .attachments()
            .map(|part| Attachment {
                content_type: part
                    .content_type()
                    .map(|ct| match ct.subtype() {
                        Some(sub) => format!("{}/{}", ct.ctype(), sub),
                        None => ct.ctype().to_string(),
                    })
                    .unwrap_or_else(|| "application/octet-stream".to_string()),
                content: part.contents().to_vec(),
            })
            .collect();

        Ok(Self { date, attachments })
    }

    /// The subset of attachments eligible for archiving.
    pub fn pdf_attachments(&self) -> impl Iterator<Item = &Attachment> {
        self.attachments.iter().filter(|a| a.is_pdf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn raw_message(date_header: &str) -> Vec<u8> {
        format!(
            "From: Fax Gateway <fax@example.com>\r\n\
             To: archive@example.com\r\n\
             Subject: Fax received\r\n\
             Date: {date_header}\r\n\
             MIME-Version: 1.0\r\n\
             Content-Type: multipart/mixed; boundary=\"fax-boundary\"\r\n\
             \r\n\
             --fax-boundary\r\n\
             Content-Type: text/plain\r\n\
             \r\n\
             You received a fax.\r\n\
             --fax-boundary\r\n\
             Content-Type: application/pdf; name=\"fax.pdf\"\r\n\
             Content-Disposition: attachment; filename=\"fax.pdf\"\r\n\
             Content-Transfer-Encoding: base64\r\n\
             \r\n\
             JVBERi0xLjQuLi4=\r\n\
             --fax-boundary--\r\n"
        )
        .into_bytes()
    }

    #[test]
    fn test_parse_extracts_date_and_pdf() {
        let msg = FaxMessage::parse(&raw_message("Tue, 5 Mar 2024 14:22:01 +0000")).unwrap();
        assert_eq!(
            msg.date,
            Some(Utc.with_ymd_and_hms(2024, 3, 5, 14, 22, 1).unwrap())
        );

        let pdfs: Vec<_> = msg.pdf_attachments().collect();
        assert_eq!(pdfs.len(), 1);
        assert_eq!(pdfs[0].content, b"%PDF-1.4...");
    }

    #[test]
    fn test_offset_dates_convert_to_utc() {
        let msg = FaxMessage::parse(&raw_message("Tue, 5 Mar 2024 16:22:01 +0200")).unwrap();
        assert_eq!(
            msg.date,
            Some(Utc.with_ymd_and_hms(2024, 3, 5, 14, 22, 1).unwrap())
        );
    }

    #[test]
    fn test_garbage_date_becomes_none() {
        let msg = FaxMessage::parse(&raw_message("not a date at all")).unwrap();
        assert!(msg.date.is_none());
        // The attachment is still there — a bad date never drops content.
        assert_eq!(msg.pdf_attachments().count(), 1);
    }

    #[test]
    fn test_inline_text_is_not_an_attachment() {
        let raw = b"From: a@example.com\r\n\
                    Date: Tue, 5 Mar 2024 14:22:01 +0000\r\n\
                    Content-Type: text/plain\r\n\
                    \r\n\
                    Just a body, no attachments.\r\n";
        let msg = FaxMessage::parse(raw).unwrap();
        assert!(msg.attachments.is_empty());
        assert_eq!(msg.pdf_attachments().count(), 0);
    }
}
