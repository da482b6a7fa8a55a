//! Content submissions
//!
//! A submission is one unit of user-provided content: free text, a URL, or a
//! reference to an uploaded image. The enum shape makes "payload present iff
//! kind" a property of the type; the loose wire shape is converted through
//! [`ContentSubmission::from_parts`].

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminates which rule branch applies to a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Text,
    Url,
    Image,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Text => "text",
            ContentKind::Url => "url",
            ContentKind::Image => "image",
        }
    }

    /// Parse the wire name ("text", "url", "image")
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(ContentKind::Text),
            "url" => Ok(ContentKind::Url),
            "image" => Ok(ContentKind::Image),
            other => Err(Error::InvalidSubmission(format!(
                "Invalid content type '{}'. Must be one of: text, url, image",
                other
            ))),
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to an uploaded image
///
/// Only the file name is carried. Pixel data never reaches the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    pub file_name: String,
}

impl ImageRef {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }
}

/// One submission to be evaluated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSubmission {
    Text { text: String },
    Url { url: String },
    Image { image: ImageRef },
}

impl ContentSubmission {
    pub fn text(text: impl Into<String>) -> Self {
        ContentSubmission::Text { text: text.into() }
    }

    pub fn url(url: impl Into<String>) -> Self {
        ContentSubmission::Url { url: url.into() }
    }

    pub fn image(file_name: impl Into<String>) -> Self {
        ContentSubmission::Image {
            image: ImageRef::new(file_name),
        }
    }

    /// Build a submission from loose parts
    ///
    /// `data` carries the text or URL; `file_name` carries the image name.
    /// For images, `data` is accepted as the file name when `file_name` is
    /// absent. Any payload that does not match `kind` is rejected.
    pub fn from_parts(
        kind: ContentKind,
        data: Option<String>,
        file_name: Option<String>,
    ) -> Result<Self> {
        match (kind, data, file_name) {
            (ContentKind::Text, Some(text), None) => Ok(ContentSubmission::Text { text }),
            (ContentKind::Url, Some(url), None) => Ok(ContentSubmission::Url { url }),
            (ContentKind::Image, None, Some(name)) | (ContentKind::Image, Some(name), None) => {
                Ok(ContentSubmission::image(name))
            }
            (kind, None, None) => Err(Error::InvalidSubmission(format!(
                "{} submission has no payload",
                kind
            ))),
            (kind, _, _) => Err(Error::InvalidSubmission(format!(
                "{} submission carries a payload for another kind",
                kind
            ))),
        }
    }

    pub fn kind(&self) -> ContentKind {
        match self {
            ContentSubmission::Text { .. } => ContentKind::Text,
            ContentSubmission::Url { .. } => ContentKind::Url,
            ContentSubmission::Image { .. } => ContentKind::Image,
        }
    }

    /// The string the rules look at (text, URL, or image file name)
    pub fn payload(&self) -> &str {
        match self {
            ContentSubmission::Text { text } => text,
            ContentSubmission::Url { url } => url,
            ContentSubmission::Image { image } => &image.file_name,
        }
    }

    /// True when the payload is empty or whitespace only
    pub fn is_blank(&self) -> bool {
        self.payload().trim().is_empty()
    }

    /// Payload truncated for log output
    pub fn log_preview(&self) -> String {
        let payload = self.payload();
        match payload.char_indices().nth(100) {
            Some((idx, _)) => format!("{}...", &payload[..idx]),
            None => payload.to_string(),
        }
    }
}

/// Wire shape of an analysis request
///
/// `{"type": "text", "data": "..."}`, `{"type": "url", "data": "https://..."}`
/// or `{"type": "image", "fileName": "photo.jpg"}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
}

impl TryFrom<SubmissionRequest> for ContentSubmission {
    type Error = Error;

    fn try_from(request: SubmissionRequest) -> Result<Self> {
        let kind = request
            .kind
            .as_deref()
            .ok_or_else(|| Error::InvalidSubmission("'type' field is required".to_string()))
            .and_then(ContentKind::parse)?;
        ContentSubmission::from_parts(kind, request.data, request.file_name)
    }
}
