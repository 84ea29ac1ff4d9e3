use crate::domain::value::{Receipt, UnixTimestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Top-level `status` of a Pushover response (`1` on success).
pub enum Status {
    Success,
    Failure,
}

impl Status {
    pub fn from_code(code: i64) -> Self {
        if code == 1 {
            Self::Success
        } else {
            Self::Failure
        }
    }

    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Decoded payload together with the HTTP status and body it came from.
///
/// The body is kept byte-for-byte as returned by Pushover.
pub struct ApiResponse<T> {
    pub http_status: u16,
    pub body: String,
    pub data: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Application message quota, from the `X-Limit-App-*` headers.
pub struct AppLimits {
    pub limit: u64,
    pub remaining: u64,
    pub reset: UnixTimestamp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Response of `messages.json` and `glances.json`.
pub struct SendResponse {
    pub status: Status,
    pub request: Option<String>,
    pub errors: Vec<String>,
    /// Present for emergency-priority messages.
    pub receipt: Option<Receipt>,
    pub app_limits: Option<AppLimits>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Response of `users/validate.json`.
pub struct VerifyResponse {
    pub status: Status,
    pub request: Option<String>,
    pub errors: Vec<String>,
    /// The key belongs to a delivery group rather than a single user.
    pub group: bool,
    pub devices: Vec<String>,
    pub licenses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Response of `apps/limits.json`.
pub struct LimitsResponse {
    pub status: Status,
    pub request: Option<String>,
    pub errors: Vec<String>,
    pub limit: Option<u64>,
    pub remaining: Option<u64>,
    pub reset: Option<UnixTimestamp>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Response of `receipts/{receipt}.json`.
///
/// Timestamps Pushover reports as `0` ("not yet") are `None`.
pub struct ReceiptResponse {
    pub status: Status,
    pub request: Option<String>,
    pub errors: Vec<String>,
    pub acknowledged: bool,
    pub acknowledged_at: Option<UnixTimestamp>,
    pub acknowledged_by: Option<String>,
    pub acknowledged_by_device: Option<String>,
    pub last_delivered_at: Option<UnixTimestamp>,
    pub expired: bool,
    pub expires_at: Option<UnixTimestamp>,
    pub called_back: bool,
    pub called_back_at: Option<UnixTimestamp>,
}

/// Common envelope fields shared by every response payload.
pub trait Envelope {
    fn status(&self) -> Status;
    fn request(&self) -> Option<&str>;
    fn errors(&self) -> &[String];
}

macro_rules! impl_envelope {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Envelope for $ty {
                fn status(&self) -> Status {
                    self.status
                }

                fn request(&self) -> Option<&str> {
                    self.request.as_deref()
                }

                fn errors(&self) -> &[String] {
                    &self.errors
                }
            }
        )*
    };
}

impl_envelope!(SendResponse, VerifyResponse, LimitsResponse, ReceiptResponse);
