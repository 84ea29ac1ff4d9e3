//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::domain::{
    ApiResponse, ApiToken, Attachment, DeviceName, Envelope, LimitsResponse, Notification,
    Receipt, ReceiptResponse, SendResponse, UserKey, ValidationError, VerifyResponse,
};
use crate::transport::TransportError;

const DEFAULT_BASE_URL: &str = "https://api.pushover.net/1/";
const MESSAGES_PATH: &str = "messages.json";
const GLANCES_PATH: &str = "glances.json";
const VERIFY_PATH: &str = "users/validate.json";
const LIMITS_PATH: &str = "apps/limits.json";

const USER_KEY_ENV: &str = "PUSHOVER_USER_KEY";
const API_TOKEN_ENV: &str = "PUSHOVER_API_TOKEN";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
        attachment: Option<Attachment>,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>>;

    fn get<'a>(
        &'a self,
        url: &'a str,
        query: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    async fn read(response: reqwest::Response) -> Result<HttpResponse, BoxError> {
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter(|(name, _)| name.as_str().starts_with("x-limit-"))
            .filter_map(|(name, value)| {
                let value = value.to_str().ok()?;
                Some((name.as_str().to_owned(), value.to_owned()))
            })
            .collect();
        let body = response.text().await?;
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

impl HttpTransport for ReqwestTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
        attachment: Option<Attachment>,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let request = self.client.post(url);
            let request = match attachment {
                None => request.form(&params),
                Some(attachment) => {
                    let mut form = reqwest::multipart::Form::new();
                    for (key, value) in params {
                        form = form.text(key, value);
                    }
                    let file_name = attachment.file_name().to_owned();
                    let mime_type = attachment.image_type().mime_type();
                    let part = reqwest::multipart::Part::bytes(attachment.into_bytes())
                        .file_name(file_name)
                        .mime_str(mime_type)?;
                    request.multipart(form.part(Attachment::FIELD, part))
                }
            };
            let response = request.send().await?;
            Self::read(response).await
        })
    }

    fn get<'a>(
        &'a self,
        url: &'a str,
        query: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let response = self.client.get(url).query(&query).send().await?;
            Self::read(response).await
        })
    }
}

#[derive(Clone)]
/// The two static credentials every Pushover call carries.
pub struct Credentials {
    user: UserKey,
    token: ApiToken,
}

impl Credentials {
    /// Validate a user (or group) key and an application token.
    pub fn new(
        user: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            user: UserKey::new(user)?,
            token: ApiToken::new(token)?,
        })
    }

    /// Read `PUSHOVER_USER_KEY` and `PUSHOVER_API_TOKEN` from the environment.
    pub fn from_env() -> Result<Self, PushoverError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PushoverError> {
        let user = lookup(USER_KEY_ENV).ok_or(PushoverError::MissingEnv { name: USER_KEY_ENV })?;
        let token = lookup(API_TOKEN_ENV).ok_or(PushoverError::MissingEnv {
            name: API_TOKEN_ENV,
        })?;
        Ok(Self::new(user, token)?)
    }

    pub fn user(&self) -> &UserKey {
        &self.user
    }

    pub fn token(&self) -> &ApiToken {
        &self.token
    }

    fn push_form_params(&self, params: &mut Vec<(String, String)>) {
        params.push((ApiToken::FIELD.to_owned(), self.token.as_str().to_owned()));
        params.push((UserKey::FIELD.to_owned(), self.user.as_str().to_owned()));
    }

    fn token_query(&self) -> Vec<(String, String)> {
        vec![(ApiToken::FIELD.to_owned(), self.token.as_str().to_owned())]
    }
}

impl fmt::Debug for Credentials {
    /// Shows only the first characters of the user key.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let user_prefix: String = self.user.as_str().chars().take(4).collect();
        f.debug_struct("Credentials")
            .field("user", &format!("{user_prefix}..."))
            .field("token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`PushoverClient`].
///
/// A request Pushover rejects with a well-formed JSON answer is not an error by
/// itself; see [`ApiResponse::into_result`].
pub enum PushoverError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// Non-successful HTTP status with a body that is not a Pushover response.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Pushover answered with `status != 1`.
    #[error("API error (HTTP {http_status}): {errors:?}")]
    Api {
        http_status: u16,
        request: Option<String>,
        errors: Vec<String>,
    },

    /// Successful HTTP status but the body could not be decoded.
    #[error("parse error: {0}")]
    Parse(#[source] BoxError),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// No emergency message with a receipt has been sent through this client.
    #[error("no receipt available; send an emergency-priority message first")]
    NoReceipt,

    /// A required environment variable is not set.
    #[error("environment variable {name} is not set")]
    MissingEnv { name: &'static str },
}

impl<T: Envelope> ApiResponse<T> {
    /// Whether Pushover reported `status: 1`.
    pub fn is_success(&self) -> bool {
        self.data.status().is_success()
    }

    /// Unwrap the payload, mapping `status != 1` to [`PushoverError::Api`].
    pub fn into_result(self) -> Result<T, PushoverError> {
        if self.is_success() {
            return Ok(self.data);
        }
        Err(PushoverError::Api {
            http_status: self.http_status,
            request: self.data.request().map(str::to_owned),
            errors: self.data.errors().to_vec(),
        })
    }
}

#[derive(Debug, Clone)]
/// Builder for [`PushoverClient`].
///
/// Use this when you need to customize the base URL, timeout, or user-agent.
pub struct PushoverClientBuilder {
    credentials: Credentials,
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl PushoverClientBuilder {
    /// Create a builder with the default base URL and no timeout/user-agent override.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the API base URL (`https://api.pushover.net/1/`).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`PushoverClient`].
    pub fn build(self) -> Result<PushoverClient, PushoverError> {
        let base_url = normalize_base_url(&self.base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| PushoverError::Transport(Box::new(err)))?;

        Ok(PushoverClient::with_transport(
            self.credentials,
            base_url,
            Arc::new(ReqwestTransport { client }),
        ))
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    let invalid = || ValidationError::InvalidUrl {
        input: raw.to_owned(),
    };
    let parsed = url::Url::parse(trimmed).map_err(|_| invalid())?;
    if parsed.cannot_be_a_base() {
        return Err(invalid());
    }
    if trimmed.ends_with('/') {
        Ok(trimmed.to_owned())
    } else {
        Ok(format!("{trimmed}/"))
    }
}

#[derive(Clone)]
/// High-level Pushover client.
///
/// Every operation issues exactly one HTTP request against
/// `https://api.pushover.net/1/` (or the builder's base URL) and returns the
/// decoded response alongside the raw HTTP status and body.
///
/// Clones share the remembered receipt of the last emergency message.
pub struct PushoverClient {
    credentials: Credentials,
    base_url: String,
    http: Arc<dyn HttpTransport>,
    last_receipt: Arc<Mutex<Option<Receipt>>>,
}

impl fmt::Debug for PushoverClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PushoverClient")
            .field("credentials", &self.credentials)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl PushoverClient {
    /// Create a client using the default base URL.
    ///
    /// For more customization, use [`PushoverClient::builder`].
    pub fn new(credentials: Credentials) -> Self {
        Self::with_transport(
            credentials,
            DEFAULT_BASE_URL.to_owned(),
            Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        )
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> PushoverClientBuilder {
        PushoverClientBuilder::new(credentials)
    }

    fn with_transport(
        credentials: Credentials,
        base_url: String,
        http: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            credentials,
            base_url,
            http,
            last_receipt: Arc::new(Mutex::new(None)),
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Deliver a [`crate::Message`] (`messages.json`) or [`crate::Glance`] (`glances.json`).
    ///
    /// Messages with an attachment go out as `multipart/form-data`. When Pushover
    /// returns a receipt it becomes this client's [`PushoverClient::last_receipt`].
    pub async fn send(
        &self,
        notification: impl Into<Notification>,
    ) -> Result<ApiResponse<SendResponse>, PushoverError> {
        let notification = notification.into();
        let kind = notification.kind();

        let mut params = Vec::<(String, String)>::new();
        self.credentials.push_form_params(&mut params);
        let (path, attachment) = match notification {
            Notification::Message(mut message) => {
                params.extend(crate::transport::encode_message_form(&message));
                (MESSAGES_PATH, message.take_attachment())
            }
            Notification::Glance(glance) => {
                params.extend(crate::transport::encode_glance_form(&glance));
                (GLANCES_PATH, None)
            }
        };

        let url = self.endpoint(path);
        tracing::debug!(
            kind,
            url = %url,
            attachment = attachment.is_some(),
            "sending pushover notification"
        );

        let response = self
            .http
            .post_form(&url, params, attachment)
            .await
            .map_err(PushoverError::Transport)?;
        let response = decode_response(response, crate::transport::decode_send_json_response)?;

        if let Some(receipt) = response.data.receipt.as_ref() {
            *self
                .last_receipt
                .lock()
                .unwrap_or_else(PoisonError::into_inner) = Some(receipt.clone());
        }

        Ok(response)
    }

    /// Check that the user key and application token are valid.
    pub async fn verify_user(&self) -> Result<ApiResponse<VerifyResponse>, PushoverError> {
        self.verify(None).await
    }

    /// Like [`PushoverClient::verify_user`], restricted to one of the user's devices.
    pub async fn verify_device(
        &self,
        device: &DeviceName,
    ) -> Result<ApiResponse<VerifyResponse>, PushoverError> {
        self.verify(Some(device)).await
    }

    async fn verify(
        &self,
        device: Option<&DeviceName>,
    ) -> Result<ApiResponse<VerifyResponse>, PushoverError> {
        let mut params = Vec::<(String, String)>::new();
        self.credentials.push_form_params(&mut params);
        params.extend(crate::transport::encode_verify_form(device));

        let url = self.endpoint(VERIFY_PATH);
        tracing::debug!(url = %url, "verifying pushover user");

        let response = self
            .http
            .post_form(&url, params, None)
            .await
            .map_err(PushoverError::Transport)?;
        let response = decode_response(response, |body, _| {
            crate::transport::decode_verify_json_response(body)
        })?;

        tracing::info!(
            verified = response.is_success(),
            devices = response.data.devices.len(),
            "pushover user verification finished"
        );
        Ok(response)
    }

    /// Fetch the application's monthly message quota.
    pub async fn get_limits(&self) -> Result<ApiResponse<LimitsResponse>, PushoverError> {
        let url = self.endpoint(LIMITS_PATH);
        tracing::debug!(url = %url, "fetching pushover app limits");

        let response = self
            .http
            .get(&url, self.credentials.token_query())
            .await
            .map_err(PushoverError::Transport)?;
        decode_response(response, |body, _| {
            crate::transport::decode_limits_json_response(body)
        })
    }

    /// Look up acknowledgement status of an emergency message.
    pub async fn get_receipt(
        &self,
        receipt: &Receipt,
    ) -> Result<ApiResponse<ReceiptResponse>, PushoverError> {
        let url = self.endpoint(&crate::transport::receipt_path(receipt));
        tracing::debug!(receipt = %receipt, "fetching pushover receipt");

        let response = self
            .http
            .get(&url, self.credentials.token_query())
            .await
            .map_err(PushoverError::Transport)?;
        let response = decode_response(response, |body, _| {
            crate::transport::decode_receipt_json_response(body)
        })?;

        tracing::info!(
            receipt = %receipt,
            acknowledged = response.data.acknowledged,
            expired = response.data.expired,
            "pushover receipt fetched"
        );
        Ok(response)
    }

    /// [`PushoverClient::get_receipt`] for the last receipt this client received.
    ///
    /// Errors:
    /// - Returns [`PushoverError::NoReceipt`] when no emergency message has been sent yet.
    pub async fn get_last_receipt(&self) -> Result<ApiResponse<ReceiptResponse>, PushoverError> {
        let receipt = self.last_receipt().ok_or(PushoverError::NoReceipt)?;
        self.get_receipt(&receipt).await
    }

    /// Receipt of the most recent emergency message sent through this client.
    pub fn last_receipt(&self) -> Option<Receipt> {
        self.last_receipt
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

fn decode_response<T, F>(response: HttpResponse, decode: F) -> Result<ApiResponse<T>, PushoverError>
where
    T: Envelope,
    F: FnOnce(&str, &[(String, String)]) -> Result<T, TransportError>,
{
    let decoded = decode(&response.body, &response.headers);
    match decoded {
        Ok(data) => {
            if !data.status().is_success() {
                tracing::warn!(
                    http_status = response.status,
                    request = data.request(),
                    errors = ?data.errors(),
                    "pushover rejected request"
                );
            }
            Ok(ApiResponse {
                http_status: response.status,
                body: response.body,
                data,
            })
        }
        Err(err) if (200..=299).contains(&response.status) => {
            Err(PushoverError::Parse(Box::new(err)))
        }
        Err(_) => {
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            Err(PushoverError::HttpStatus {
                status: response.status,
                body,
            })
        }
    }
}
