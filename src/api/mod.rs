// Shared with the library crate; not every item is used by the binary
#![allow(dead_code)]

pub mod client;
pub mod request;

pub use client::*;
pub use request::*;

/// Public Webex REST API
pub const DEFAULT_BASE_URL: &str = "https://webexapis.com/v1";

pub const MESSAGES_PATH: &str = "messages";
pub const ROOMS_PATH: &str = "rooms";

/// `contentType` tag of an adaptive card attachment
pub const ADAPTIVE_CARD_CONTENT_TYPE: &str = "application/vnd.microsoft.card.adaptive";

/// Largest local file accepted by default (100 MiB)
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;
