//! Wire types shared across resources.
//!
//! # Design
//! These mirror the JSON the server emits. `Status` covers every value the
//! API can produce for content, including `trash` and `future`, so reading a
//! trashed or scheduled entity can never fail to decode. The enums double as
//! query values through `as_str`.

use serde::{Deserialize, Serialize};

/// Content the server post-processes before output. `protected` marks
/// password-protected content; when the password is missing `rendered` comes
/// back empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rendered {
    #[serde(default)]
    pub rendered: String,
    #[serde(default)]
    pub protected: bool,
}

/// Publication status of a post or page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Publish,
    Future,
    Draft,
    Pending,
    Private,
    Trash,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Publish => "publish",
            Status::Future => "future",
            Status::Draft => "draft",
            Status::Pending => "pending",
            Status::Private => "private",
            Status::Trash => "trash",
        }
    }
}

/// Two-state toggle used for comment and ping acceptance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenClosed {
    Open,
    Closed,
}

impl OpenClosed {
    pub fn as_str(self) -> &'static str {
        match self {
            OpenClosed::Open => "open",
            OpenClosed::Closed => "closed",
        }
    }
}

/// Theme-facing post format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Standard,
    Aside,
    Chat,
    Gallery,
    Link,
    Image,
    Quote,
    Status,
    Video,
    Audio,
}

impl Format {
    pub fn as_str(self) -> &'static str {
        match self {
            Format::Standard => "standard",
            Format::Aside => "aside",
            Format::Chat => "chat",
            Format::Gallery => "gallery",
            Format::Link => "link",
            Format::Image => "image",
            Format::Quote => "quote",
            Format::Status => "status",
            Format::Video => "video",
            Format::Audio => "audio",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendered_defaults_missing_fields() {
        let r: Rendered = serde_json::from_str(r#"{"rendered":"<p>Hi</p>"}"#).unwrap();
        assert_eq!(r.rendered, "<p>Hi</p>");
        assert!(!r.protected);
    }

    #[test]
    fn rendered_reads_protected_flag() {
        let r: Rendered = serde_json::from_str(r#"{"rendered":"","protected":true}"#).unwrap();
        assert!(r.rendered.is_empty());
        assert!(r.protected);
    }

    #[test]
    fn status_decodes_every_server_value() {
        for (text, status) in [
            ("publish", Status::Publish),
            ("future", Status::Future),
            ("draft", Status::Draft),
            ("pending", Status::Pending),
            ("private", Status::Private),
            ("trash", Status::Trash),
        ] {
            let parsed: Status = serde_json::from_str(&format!("\"{text}\"")).unwrap();
            assert_eq!(parsed, status);
            assert_eq!(parsed.as_str(), text);
        }
    }

    #[test]
    fn status_rejects_unknown_value() {
        let result: Result<Status, _> = serde_json::from_str("\"published\"");
        assert!(result.is_err());
    }

    #[test]
    fn open_closed_roundtrips() {
        let json = serde_json::to_string(&OpenClosed::Closed).unwrap();
        assert_eq!(json, "\"closed\"");
        let back: OpenClosed = serde_json::from_str(&json).unwrap();
        assert_eq!(back, OpenClosed::Closed);
    }

    #[test]
    fn format_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Format::Standard).unwrap(),
            "\"standard\""
        );
        let parsed: Format = serde_json::from_str("\"quote\"").unwrap();
        assert_eq!(parsed, Format::Quote);
        assert_eq!(Format::Status.as_str(), "status");
    }
}
