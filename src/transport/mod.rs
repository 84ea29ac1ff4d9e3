//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod apps;
mod common;
mod messages;
mod receipts;
mod users;

pub use apps::decode_limits_json_response;
pub use common::TransportError;
pub use messages::{decode_send_json_response, encode_glance_form, encode_message_form};
pub use receipts::{decode_receipt_json_response, receipt_path};
pub use users::{decode_verify_json_response, encode_verify_form};
