//! Builds the body of a `POST /messages` call.
//!
//! A message goes out in one of three encodings: multipart form data when a
//! local file is uploaded, JSON when an adaptive card is attached, and a plain
//! URL-encoded form otherwise. [`build_request`] picks the encoding once and
//! returns it as a [`MessageRequest`], which the client sends without looking
//! at the message again.

use std::io::ErrorKind;
use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::value::RawValue;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::debug;

use super::{ADAPTIVE_CARD_CONTENT_TYPE, MAX_FILE_SIZE};
use crate::error::{Error, Result};
use crate::types::{Attachment, Destination, OutboundMessage};

/// Form field used for both uploaded files and remote file URLs
pub const FILES_FIELD: &str = "files";

const OCTET_STREAM: &str = "application/octet-stream";

/// Rules a local attachment has to satisfy before it is read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentPolicy {
    /// Largest accepted file, in bytes
    pub max_file_size: u64,
    /// Lower-case extensions without the dot. `None` accepts any file.
    pub allowed_extensions: Option<Vec<String>>,
}

impl Default for AttachmentPolicy {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
            allowed_extensions: None,
        }
    }
}

impl AttachmentPolicy {
    /// Policy that only accepts the given extensions
    pub fn restricted(extensions: &[&str]) -> Self {
        Self {
            allowed_extensions: Some(
                extensions
                    .iter()
                    .map(|ext| ext.to_ascii_lowercase())
                    .collect(),
            ),
            ..Self::default()
        }
    }

    fn check_extension(&self, path: &Path) -> Result<()> {
        let Some(allowed) = &self.allowed_extensions else {
            return Ok(());
        };

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension {
            Some(ext) if allowed.contains(&ext) => Ok(()),
            _ => Err(Error::UnsupportedExtension {
                path: path.to_path_buf(),
                allowed: allowed.join(", "),
            }),
        }
    }
}

/// File carried in the `files` part of a multipart upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartBody {
    pub file: FilePart,
    pub fields: Vec<(&'static str, String)>,
}

impl MultipartBody {
    /// Convert into a reqwest form, file part first
    pub fn into_form(self) -> Result<Form> {
        let part = Part::bytes(self.file.bytes)
            .file_name(self.file.file_name)
            .mime_str(&self.file.mime_type)?;

        let mut form = Form::new().part(FILES_FIELD, part);
        for (name, value) in self.fields {
            form = form.text(name, value);
        }
        Ok(form)
    }
}

/// Body of a `POST /messages` request
#[derive(Debug, Clone, PartialEq)]
pub enum MessageRequest {
    /// `multipart/form-data` with an uploaded file
    Multipart(MultipartBody),
    /// `application/json` carrying an adaptive card, already serialized
    Json(String),
    /// `application/x-www-form-urlencoded`
    Form(Vec<(&'static str, String)>),
}

impl MessageRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Multipart(_) => "multipart",
            Self::Json(_) => "json",
            Self::Form(_) => "form",
        }
    }
}

/// Encode form fields as an `application/x-www-form-urlencoded` body
pub fn encode_form(fields: &[(&'static str, String)]) -> Result<String> {
    Ok(serde_urlencoded::to_string(fields)?)
}

/// Build the request body for `message`.
///
/// Local files and cards are validated and read here, so every filesystem
/// error surfaces before a connection is opened.
pub async fn build_request(
    message: &OutboundMessage,
    policy: &AttachmentPolicy,
) -> Result<MessageRequest> {
    let request = match &message.attachment {
        Some(Attachment::LocalFile(path)) => {
            let file = read_file_part(path, policy).await?;
            MessageRequest::Multipart(MultipartBody {
                file,
                fields: message_fields(message, None),
            })
        }
        Some(Attachment::AdaptiveCard(path)) => {
            MessageRequest::Json(card_body(message, path).await?)
        }
        Some(Attachment::RemoteUrl(url)) => {
            MessageRequest::Form(message_fields(message, Some(url)))
        }
        None => MessageRequest::Form(message_fields(message, None)),
    };

    debug!("Built {} message request", request.kind());
    Ok(request)
}

/// Destination, text, markdown and file URL, skipping the unset ones
fn message_fields(
    message: &OutboundMessage,
    file_url: Option<&str>,
) -> Vec<(&'static str, String)> {
    let destination = &message.destination;
    let mut fields = vec![(destination.field_name(), destination.value().to_string())];

    if let Some(text) = &message.text {
        fields.push(("text", text.clone()));
    }
    if let Some(markdown) = &message.markdown {
        fields.push(("markdown", markdown.clone()));
    }
    if let Some(url) = file_url.filter(|url| !url.is_empty()) {
        fields.push((FILES_FIELD, url.to_string()));
    }

    fields
}

async fn read_file_part(path: &Path, policy: &AttachmentPolicy) -> Result<FilePart> {
    policy.check_extension(path)?;

    let file = tokio::fs::File::open(path)
        .await
        .map_err(|e| file_error(path, e))?;
    let metadata = file.metadata().await.map_err(|e| file_error(path, e))?;
    if !metadata.is_file() {
        return Err(Error::FileRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(ErrorKind::InvalidInput, "not a regular file"),
        });
    }
    if metadata.len() > policy.max_file_size {
        return Err(Error::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit: policy.max_file_size,
        });
    }

    // The reported length can be stale or zero (procfs), so cap the read too
    let bytes = read_capped(file, policy.max_file_size)
        .await
        .map_err(|e| file_error(path, e))?;
    if bytes.len() as u64 > policy.max_file_size {
        return Err(Error::FileTooLarge {
            path: path.to_path_buf(),
            size: bytes.len() as u64,
            limit: policy.max_file_size,
        });
    }

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mime_type = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(OCTET_STREAM)
        .to_string();

    debug!("Attaching {} ({}, {} bytes)", file_name, mime_type, bytes.len());

    Ok(FilePart {
        file_name,
        mime_type,
        bytes,
    })
}

/// Read at most `limit + 1` bytes, enough to tell an oversized stream apart
async fn read_capped<R: AsyncRead + Unpin>(reader: R, limit: u64) -> std::io::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    reader
        .take(limit.saturating_add(1))
        .read_to_end(&mut bytes)
        .await?;
    Ok(bytes)
}

#[derive(Serialize)]
struct CardMessage<'a> {
    #[serde(rename = "roomId", skip_serializing_if = "Option::is_none")]
    room_id: Option<&'a str>,
    #[serde(rename = "toPersonEmail", skip_serializing_if = "Option::is_none")]
    to_person_email: Option<&'a str>,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    markdown: Option<&'a str>,
    attachments: [CardAttachment<'a>; 1],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CardAttachment<'a> {
    content_type: &'static str,
    content: &'a RawValue,
}

/// Serialize the card message. The card itself is embedded byte-for-byte.
async fn card_body(message: &OutboundMessage, path: &Path) -> Result<String> {
    let data = tokio::fs::read(path).await.map_err(|e| file_error(path, e))?;
    let card: Box<RawValue> =
        serde_json::from_slice(&data).map_err(|source| Error::InvalidCard {
            path: path.to_path_buf(),
            source,
        })?;

    let (room_id, to_person_email) = match &message.destination {
        Destination::Room(id) => (Some(id.as_str()), None),
        Destination::Email(email) => (None, Some(email.as_str())),
    };
    let body = CardMessage {
        room_id,
        to_person_email,
        text: message.text.as_deref().unwrap_or_default(),
        markdown: message.markdown.as_deref(),
        attachments: [CardAttachment {
            content_type: ADAPTIVE_CARD_CONTENT_TYPE,
            content: &card,
        }],
    };

    Ok(serde_json::to_string(&body)?)
}

fn file_error(path: &Path, err: std::io::Error) -> Error {
    if err.kind() == ErrorKind::NotFound {
        Error::FileNotFound(path.to_path_buf())
    } else {
        Error::FileRead {
            path: path.to_path_buf(),
            source: err,
        }
    }
}
