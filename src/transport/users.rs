use serde::Deserialize;

use super::common::{TransportError, TransportInt};
use crate::domain::{DeviceName, VerifyResponse};

#[derive(Debug, Clone, Deserialize)]
struct VerifyJsonResponse {
    status: TransportInt,
    #[serde(default)]
    request: Option<String>,
    #[serde(default)]
    errors: Vec<String>,
    #[serde(default)]
    group: Option<TransportInt>,
    #[serde(default)]
    devices: Vec<String>,
    #[serde(default)]
    licenses: Vec<String>,
}

pub fn encode_verify_form(device: Option<&DeviceName>) -> Vec<(String, String)> {
    device
        .map(|device| (DeviceName::FIELD.to_owned(), device.as_str().to_owned()))
        .into_iter()
        .collect()
}

pub fn decode_verify_json_response(json: &str) -> Result<VerifyResponse, TransportError> {
    let parsed: VerifyJsonResponse = serde_json::from_str(json)?;
    Ok(VerifyResponse {
        status: parsed.status.into_status(),
        request: parsed.request,
        errors: parsed.errors,
        group: parsed.group.is_some_and(TransportInt::into_flag),
        devices: parsed.devices,
        licenses: parsed.licenses,
    })
}
