use std::path::PathBuf;

use crate::error::{Error, Result};

/// Where a message is delivered: a room, or a person addressed by email
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Room(String),
    Email(String),
}

impl Destination {
    /// Resolve the destination from the room id and recipient flags.
    /// Exactly one of them must be set; empty strings count as unset.
    pub fn from_parts(room_id: Option<String>, email: Option<String>) -> Result<Self> {
        match (non_empty(room_id), non_empty(email)) {
            (Some(id), None) => Ok(Self::Room(id)),
            (None, Some(email)) => Ok(Self::Email(email)),
            (Some(_), Some(_)) => Err(Error::ConflictingDestination),
            (None, None) => Err(Error::MissingDestination),
        }
    }

    /// API field name carrying this destination
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Room(_) => "roomId",
            Self::Email(_) => "toPersonEmail",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Room(id) => id,
            Self::Email(email) => email,
        }
    }
}

/// Something sent along with the message body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attachment {
    /// File on disk, uploaded as multipart form data
    LocalFile(PathBuf),
    /// Publicly reachable file the server fetches itself
    RemoteUrl(String),
    /// Path to an adaptive card JSON document
    AdaptiveCard(PathBuf),
}

impl Attachment {
    /// Pick the attachment out of the file, file URL and card flags.
    /// At most one may be set.
    pub fn from_parts(
        file: Option<PathBuf>,
        file_url: Option<String>,
        card: Option<PathBuf>,
    ) -> Result<Option<Self>> {
        let file = file.filter(|p| !p.as_os_str().is_empty());
        let file_url = non_empty(file_url);
        let card = card.filter(|p| !p.as_os_str().is_empty());

        match (file, file_url, card) {
            (None, None, None) => Ok(None),
            (Some(path), None, None) => Ok(Some(Self::LocalFile(path))),
            (None, Some(url), None) => Ok(Some(Self::RemoteUrl(url))),
            (None, None, Some(path)) => Ok(Some(Self::AdaptiveCard(path))),
            _ => Err(Error::ConflictingAttachment),
        }
    }
}

/// A message ready to be turned into a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub destination: Destination,
    pub text: Option<String>,
    pub markdown: Option<String>,
    pub attachment: Option<Attachment>,
}

impl OutboundMessage {
    pub fn new(destination: Destination) -> Self {
        Self {
            destination,
            text: None,
            markdown: None,
            attachment: None,
        }
    }

    pub fn with_text(mut self, text: Option<String>) -> Self {
        self.text = non_empty(text);
        self
    }

    pub fn with_markdown(mut self, markdown: Option<String>) -> Self {
        self.markdown = non_empty(markdown);
        self
    }

    pub fn with_attachment(mut self, attachment: Option<Attachment>) -> Self {
        self.attachment = attachment;
        self
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
