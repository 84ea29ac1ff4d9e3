use serde::Deserialize;

use super::common::{TransportError, TransportInt, non_blank};
use crate::domain::{Receipt, ReceiptResponse};

#[derive(Debug, Clone, Deserialize)]
struct ReceiptJsonResponse {
    status: TransportInt,
    #[serde(default)]
    request: Option<String>,
    #[serde(default)]
    errors: Vec<String>,
    #[serde(default)]
    acknowledged: Option<TransportInt>,
    #[serde(default)]
    acknowledged_at: Option<TransportInt>,
    #[serde(default)]
    acknowledged_by: Option<String>,
    #[serde(default)]
    acknowledged_by_device: Option<String>,
    #[serde(default)]
    last_delivered_at: Option<TransportInt>,
    #[serde(default)]
    expired: Option<TransportInt>,
    #[serde(default)]
    expires_at: Option<TransportInt>,
    #[serde(default)]
    called_back: Option<TransportInt>,
    #[serde(default)]
    called_back_at: Option<TransportInt>,
}

/// Path of a receipt relative to the API base URL.
pub fn receipt_path(receipt: &Receipt) -> String {
    format!("receipts/{}.json", receipt.as_str())
}

pub fn decode_receipt_json_response(json: &str) -> Result<ReceiptResponse, TransportError> {
    let parsed: ReceiptJsonResponse = serde_json::from_str(json)?;
    let flag = |value: Option<TransportInt>| value.is_some_and(TransportInt::into_flag);
    let at = |value: Option<TransportInt>| value.and_then(TransportInt::into_timestamp);

    Ok(ReceiptResponse {
        status: parsed.status.into_status(),
        request: parsed.request,
        errors: parsed.errors,
        acknowledged: flag(parsed.acknowledged),
        acknowledged_at: at(parsed.acknowledged_at),
        acknowledged_by: non_blank(parsed.acknowledged_by),
        acknowledged_by_device: non_blank(parsed.acknowledged_by_device),
        last_delivered_at: at(parsed.last_delivered_at),
        expired: flag(parsed.expired),
        expires_at: at(parsed.expires_at),
        called_back: flag(parsed.called_back),
        called_back_at: at(parsed.called_back_at),
    })
}
