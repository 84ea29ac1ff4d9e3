//! Typed Rust client for the Pushover notification API.
//!
//! The crate has three layers: a domain layer of validated value types, a
//! transport layer for wire-format details, and a small client layer that
//! issues one HTTP request per operation.
//!
//! ```rust,no_run
//! use pushover::{Credentials, Message, MessageText, PushoverClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), pushover::PushoverError> {
//!     let client = PushoverClient::new(Credentials::new("user-key", "app-token")?);
//!     let message = Message::text(MessageText::new("backup finished")?);
//!     let response = client.send(message).await?;
//!     println!("{:?}", response.into_result()?.request);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{Credentials, PushoverClient, PushoverClientBuilder, PushoverError};
pub use domain::{
    ApiResponse, ApiToken, AppLimits, Attachment, DeviceName, Envelope, ExpireSeconds, Glance,
    GlanceOptions, GlanceText, ImageType, LimitsResponse, Message, MessageOptions, MessageText,
    Notification, Percent, Priority, Receipt, ReceiptResponse, RetrySeconds, SendResponse, Sound,
    Status, SupplementaryUrl, TextFormat, Title, UnixTimestamp, UrlTitle, UserKey,
    ValidationError, VerifyResponse,
};
