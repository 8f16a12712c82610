//! webex-notify - post messages, files and adaptive cards to Webex
//!
//! The library exposes the request builder and the REST client used by the
//! `webex-notify` binary.

pub mod api;
pub mod config;
pub mod error;
pub mod types;

pub use api::client::WebexClient;
pub use api::request::{build_request, AttachmentPolicy, MessageRequest};
pub use config::Config;
pub use error::{Error, Result};
