use serde::Deserialize;

use super::common::{TransportError, TransportInt};
use crate::domain::{
    AppLimits, DeviceName, ExpireSeconds, Glance, Message, MessageText, Percent, Priority,
    Receipt, RetrySeconds, SendResponse, Sound, SupplementaryUrl, TextFormat, Title,
    UnixTimestamp, UrlTitle,
};

const APP_LIMIT_HEADER: &str = "x-limit-app-limit";
const APP_REMAINING_HEADER: &str = "x-limit-app-remaining";
const APP_RESET_HEADER: &str = "x-limit-app-reset";

#[derive(Debug, Clone, Deserialize)]
struct SendJsonResponse {
    status: TransportInt,
    #[serde(default)]
    request: Option<String>,
    #[serde(default)]
    errors: Vec<String>,
    #[serde(default)]
    receipt: Option<String>,
}

pub fn encode_message_form(message: &Message) -> Vec<(String, String)> {
    let options = message.options();
    let mut params = vec![(
        MessageText::FIELD.to_owned(),
        message.message().as_str().to_owned(),
    )];

    if let Some(title) = options.title.as_ref().filter(|it| !it.as_str().is_empty()) {
        params.push((Title::FIELD.to_owned(), title.as_str().to_owned()));
    }
    if let Some(device) = options.device.as_ref() {
        params.push((DeviceName::FIELD.to_owned(), device.as_str().to_owned()));
    }
    if let Some(url) = options.url.as_ref() {
        params.push((SupplementaryUrl::FIELD.to_owned(), url.as_str().to_owned()));
    }
    if let Some(url_title) = options
        .url_title
        .as_ref()
        .filter(|it| !it.as_str().is_empty())
    {
        params.push((UrlTitle::FIELD.to_owned(), url_title.as_str().to_owned()));
    }
    params.push((
        Priority::FIELD.to_owned(),
        options.priority.as_i8().to_string(),
    ));
    params.push((Sound::FIELD.to_owned(), options.sound.as_str().to_owned()));
    params.push((
        UnixTimestamp::FIELD.to_owned(),
        message.timestamp().value().to_string(),
    ));
    params.push((
        RetrySeconds::FIELD.to_owned(),
        options.retry.value().to_string(),
    ));
    params.push((
        ExpireSeconds::FIELD.to_owned(),
        options.expire.value().to_string(),
    ));
    match options.format {
        TextFormat::Plain => {}
        TextFormat::Html => params.push(("html".to_owned(), "1".to_owned())),
        TextFormat::Monospace => params.push(("monospace".to_owned(), "1".to_owned())),
    }

    params
}

pub fn encode_glance_form(glance: &Glance) -> Vec<(String, String)> {
    let options = glance.options();
    let mut params = Vec::<(String, String)>::new();

    for (field, line) in glance.lines() {
        params.push((field.to_owned(), line.as_str().to_owned()));
    }
    if let Some(count) = options.count {
        params.push((Glance::COUNT_FIELD.to_owned(), count.to_string()));
    }
    if let Some(percent) = options.percent {
        params.push((Percent::FIELD.to_owned(), percent.value().to_string()));
    }
    if let Some(device) = options.device.as_ref() {
        params.push((DeviceName::FIELD.to_owned(), device.as_str().to_owned()));
    }

    params
}

pub fn decode_send_json_response(
    json: &str,
    headers: &[(String, String)],
) -> Result<SendResponse, TransportError> {
    let parsed: SendJsonResponse = serde_json::from_str(json)?;
    let receipt = parsed
        .receipt
        .filter(|it| !it.trim().is_empty())
        .map(|value| {
            Receipt::new(value.clone()).map_err(|_| TransportError::InvalidReceipt { value })
        })
        .transpose()?;

    Ok(SendResponse {
        status: parsed.status.into_status(),
        request: parsed.request,
        errors: parsed.errors,
        receipt,
        app_limits: decode_app_limits_headers(headers),
    })
}

/// Read the `X-Limit-App-*` headers Pushover attaches to message responses.
pub fn decode_app_limits_headers(headers: &[(String, String)]) -> Option<AppLimits> {
    let lookup = |name: &str| {
        headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .and_then(|(_, value)| value.trim().parse::<u64>().ok())
    };

    Some(AppLimits {
        limit: lookup(APP_LIMIT_HEADER)?,
        remaining: lookup(APP_REMAINING_HEADER)?,
        reset: UnixTimestamp::new(lookup(APP_RESET_HEADER)?),
    })
}
