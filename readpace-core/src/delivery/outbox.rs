//! Pickup-directory delivery
//!
//! Writes each daily reading as an RFC 5322 message (`.eml`, HTML body) into
//! an outbox directory. A local MTA or mail client sends from there.

use super::render::{render_html, render_subject};
use super::{DailyReading, Delivery, DeliveryReceipt};
use crate::error::DeliveryError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

/// Queues messages as files in a pickup directory
#[derive(Debug, Clone)]
pub struct OutboxDelivery {
    outbox: PathBuf,
    sender: String,
    recipient: String,
}

impl OutboxDelivery {
    pub fn new(
        outbox: impl Into<PathBuf>,
        sender: impl Into<String>,
        recipient: impl Into<String>,
    ) -> Self {
        Self {
            outbox: outbox.into(),
            sender: sender.into(),
            recipient: recipient.into(),
        }
    }

    pub fn outbox(&self) -> &Path {
        &self.outbox
    }

    fn check_addresses(&self) -> Result<(), DeliveryError> {
        for (role, address) in [("recipient", &self.recipient), ("sender", &self.sender)] {
            let address = address.trim();
            if address.is_empty() {
                return Err(DeliveryError::NotConfigured(format!("{} address is empty", role)));
            }
            if !address.contains('@') {
                return Err(DeliveryError::NotConfigured(format!(
                    "{} address '{}' is not an email address",
                    role, address
                )));
            }
        }
        Ok(())
    }

    fn message(&self, reading: &DailyReading<'_>, now: DateTime<Local>) -> String {
        let subject = render_subject(reading.book_title, reading.day);
        let body = render_html(reading, now);

        let headers = [
            format!("From: {}", self.sender.trim()),
            format!("To: {}", self.recipient.trim()),
            format!("Subject: {}", encode_header(&subject)),
            format!("Date: {}", now.to_rfc2822()),
            "MIME-Version: 1.0".to_string(),
            "Content-Type: text/html; charset=utf-8".to_string(),
            "Content-Transfer-Encoding: base64".to_string(),
        ];

        let mut message = headers.join("\r\n");
        message.push_str("\r\n\r\n");
        message.push_str(&encode_body(&body.replace('\n', "\r\n")));
        message
    }

    fn write_atomically(&self, path: &Path, contents: &str) -> Result<(), DeliveryError> {
        let temp = path.with_extension("eml.tmp");
        fs::write(&temp, contents).map_err(|e| DeliveryError::Transport(e.to_string()))?;
        fs::rename(&temp, path).map_err(|e| {
            let _ = fs::remove_file(&temp);
            DeliveryError::Transport(e.to_string())
        })
    }
}

impl Delivery for OutboxDelivery {
    fn deliver(&self, reading: &DailyReading<'_>) -> Result<DeliveryReceipt, DeliveryError> {
        self.check_addresses()?;
        fs::create_dir_all(&self.outbox).map_err(|e| DeliveryError::Transport(e.to_string()))?;

        let now = Local::now();
        let file_name = format!(
            "{}-{}-day-{}.eml",
            now.format("%Y%m%d-%H%M%S"),
            slug(reading.book_title),
            reading.day
        );
        let path = self.outbox.join(file_name);

        self.write_atomically(&path, &self.message(reading, now))?;
        tracing::info!(path = %path.display(), recipient = %self.recipient, "queued daily reading");

        Ok(DeliveryReceipt {
            recipient: self.recipient.trim().to_string(),
            location: Some(path),
        })
    }

    fn verify(&self) -> Result<(), DeliveryError> {
        self.check_addresses()?;
        fs::create_dir_all(&self.outbox).map_err(|e| DeliveryError::Transport(e.to_string()))?;

        let probe = self.outbox.join(".readpace-probe");
        fs::write(&probe, b"probe").map_err(|e| {
            DeliveryError::Transport(format!("outbox {} is not writable: {}", self.outbox.display(), e))
        })?;
        fs::remove_file(&probe).map_err(|e| DeliveryError::Transport(e.to_string()))?;
        Ok(())
    }

    fn name(&self) -> &str {
        "outbox"
    }
}

/// Base64 body lines are at most this many characters
const BODY_LINE_WIDTH: usize = 76;

/// Source bytes per encoded-word; 45 bytes encode to 60 characters, which
/// keeps `=?utf-8?B?...?=` within the 75 character limit
const ENCODED_WORD_BYTES: usize = 45;

/// Base64 body split into CRLF-terminated lines
fn encode_body(body: &str) -> String {
    let encoded = STANDARD.encode(body);
    let mut out = String::with_capacity(encoded.len() + encoded.len() / BODY_LINE_WIDTH * 2 + 2);
    for line in encoded.as_bytes().chunks(BODY_LINE_WIDTH) {
        out.push_str(&String::from_utf8_lossy(line));
        out.push_str("\r\n");
    }
    out
}

/// RFC 2047 encoded-words for non-ASCII header values, folded onto
/// continuation lines
fn encode_header(value: &str) -> String {
    if value.is_ascii() {
        return value.to_string();
    }

    let mut words = Vec::new();
    let mut piece = String::new();
    for c in value.chars() {
        if piece.len() + c.len_utf8() > ENCODED_WORD_BYTES {
            words.push(format!("=?utf-8?B?{}?=", STANDARD.encode(&piece)));
            piece.clear();
        }
        piece.push(c);
    }
    if !piece.is_empty() {
        words.push(format!("=?utf-8?B?{}?=", STANDARD.encode(&piece)));
    }
    words.join("\r\n ")
}

fn slug(title: &str) -> String {
    let slug: String = title
        .chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    let slug = slug
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        "book".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReadingUnit;

    fn decoded_body(message: &str) -> String {
        let (_, body) = message.split_once("\r\n\r\n").unwrap();
        let joined: String = body.split("\r\n").collect();
        String::from_utf8(STANDARD.decode(joined).unwrap()).unwrap()
    }

    fn reading(unit: &ReadingUnit) -> DailyReading<'_> {
        DailyReading {
            book_title: "War and Peace",
            unit,
            day: 2,
            position: 2,
            total_units: 10,
        }
    }

    #[test]
    fn test_deliver_writes_message() {
        let dir = tempfile::tempdir().unwrap();
        let delivery = OutboxDelivery::new(dir.path().join("outbox"), "me@example.com", "you@example.com");
        let unit = ReadingUnit::new(1, "Well, Prince.".into(), 2, 0.01);

        let receipt = delivery.deliver(&reading(&unit)).unwrap();
        let path = receipt.location.unwrap();
        assert!(path.file_name().unwrap().to_str().unwrap().ends_with("-war-and-peace-day-2.eml"));

        let message = fs::read_to_string(&path).unwrap();
        assert!(message.starts_with("From: me@example.com\r\nTo: you@example.com\r\n"));
        assert!(message.contains("Subject: Daily Reading: War and Peace - Day 2\r\n"));
        assert!(message.contains("Content-Transfer-Encoding: base64\r\n"));
        assert!(decoded_body(&message).contains("Well, Prince.</p>"));
        assert_eq!(receipt.recipient, "you@example.com");
    }

    #[test]
    fn test_long_paragraph_respects_line_limit() {
        let dir = tempfile::tempdir().unwrap();
        let delivery = OutboxDelivery::new(dir.path(), "me@example.com", "you@example.com");
        let paragraph = vec!["Pierre\u{e9}"; 300].join(" ");
        let unit = ReadingUnit::new(0, paragraph.clone(), 300, 1.5);

        let path = delivery.deliver(&reading(&unit)).unwrap().location.unwrap();
        let message = fs::read_to_string(&path).unwrap();

        for line in message.split("\r\n") {
            assert!(line.len() <= 998, "line of {} octets", line.len());
        }
        assert!(message
            .split("\r\n\r\n")
            .nth(1)
            .unwrap()
            .split("\r\n")
            .all(|line| line.len() <= BODY_LINE_WIDTH));
        assert!(decoded_body(&message).contains(&paragraph));
    }

    #[test]
    fn test_missing_recipient_is_not_configured() {
        let dir = tempfile::tempdir().unwrap();
        let delivery = OutboxDelivery::new(dir.path(), "me@example.com", "");
        assert!(matches!(delivery.verify(), Err(DeliveryError::NotConfigured(_))));

        let unit = ReadingUnit::new(0, "x".into(), 1, 0.0);
        assert!(delivery.deliver(&reading(&unit)).is_err());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_verify_probes_outbox() {
        let dir = tempfile::tempdir().unwrap();
        let delivery = OutboxDelivery::new(dir.path().join("out"), "a@b.c", "d@e.f");
        delivery.verify().unwrap();
        assert_eq!(fs::read_dir(delivery.outbox()).unwrap().count(), 0);
    }

    #[test]
    fn test_helpers() {
        assert_eq!(slug("  The Brothers Karamazov! "), "the-brothers-karamazov");
        assert_eq!(slug("!!!"), "book");
        assert_eq!(encode_header("plain"), "plain");
        assert!(encode_header("caf\u{e9}").starts_with("=?utf-8?B?"));
    }

    #[test]
    fn test_long_subject_splits_into_encoded_words() {
        let title = "\u{412}\u{43e}\u{439}\u{43d}\u{430} \u{438} \u{43c}\u{438}\u{440} ".repeat(6);
        let subject = render_subject(title.trim(), 12);
        let encoded = encode_header(&subject);

        let words: Vec<&str> = encoded.split("\r\n ").collect();
        assert!(words.len() > 1);

        let mut decoded = Vec::new();
        for word in &words {
            assert!(word.len() <= 75, "encoded-word of {} characters", word.len());
            let payload = word
                .strip_prefix("=?utf-8?B?")
                .and_then(|w| w.strip_suffix("?="))
                .unwrap();
            let bytes = STANDARD.decode(payload).unwrap();
            // Every word decodes on its own, so none splits a character
            assert!(std::str::from_utf8(&bytes).is_ok());
            decoded.extend(bytes);
        }
        assert_eq!(String::from_utf8(decoded).unwrap(), subject);
    }
}
