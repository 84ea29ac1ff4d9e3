use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Pushover user (or group) key.
///
/// Invariant: non-empty after trimming.
pub struct UserKey(String);

impl UserKey {
    /// Form field name used by Pushover (`user`).
    pub const FIELD: &'static str = "user";

    /// Create a validated [`UserKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(non_empty_trimmed(Self::FIELD, value.into())?))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Pushover application API token.
///
/// Invariant: non-empty after trimming.
pub struct ApiToken(String);

impl ApiToken {
    /// Form field name used by Pushover (`token`).
    pub const FIELD: &'static str = "token";

    /// Create a validated [`ApiToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(non_empty_trimmed(Self::FIELD, value.into())?))
    }

    /// Borrow the validated token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Target device name(s) (`device`).
///
/// Pushover accepts several device names separated by commas.
pub struct DeviceName(String);

impl DeviceName {
    /// Form field name used by Pushover (`device`).
    pub const FIELD: &'static str = "device";

    /// Create a validated [`DeviceName`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(non_empty_trimmed(Self::FIELD, value.into())?))
    }

    /// Target several devices at once.
    pub fn many<I, S>(names: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names
            .into_iter()
            .map(|name| non_empty_trimmed(Self::FIELD, name.into()))
            .collect::<Result<Vec<_>, _>>()?;
        if names.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(names.join(",")))
    }

    /// Borrow the device list as sent.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Notification body (`message`).
///
/// Invariant: non-empty after trimming, at most [`MessageText::MAX_CHARS`] characters.
/// The original value (including whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    /// Form field name used by Pushover (`message`).
    pub const FIELD: &'static str = "message";
    /// Maximum length in characters.
    pub const MAX_CHARS: usize = 4096;

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(bounded(Self::FIELD, Self::MAX_CHARS, value)?))
    }

    /// Create message text, clipping anything past [`MessageText::MAX_CHARS`].
    pub fn truncated(value: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(clip(value.into(), Self::MAX_CHARS))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Message title (`title`), at most [`Title::MAX_CHARS`] characters.
pub struct Title(String);

impl Title {
    /// Form field name used by Pushover (`title`).
    pub const FIELD: &'static str = "title";
    /// Maximum length in characters.
    pub const MAX_CHARS: usize = 250;

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(bounded(Self::FIELD, Self::MAX_CHARS, value.into())?))
    }

    pub fn truncated(value: impl Into<String>) -> Self {
        Self(clip(value.into(), Self::MAX_CHARS))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Supplementary URL shown under the message (`url`).
///
/// Invariant: parses as an absolute URL and is at most [`SupplementaryUrl::MAX_CHARS`]
/// characters. The trimmed input is sent as-is, not the normalized form.
pub struct SupplementaryUrl(String);

impl SupplementaryUrl {
    /// Form field name used by Pushover (`url`).
    pub const FIELD: &'static str = "url";
    /// Maximum length in characters.
    pub const MAX_CHARS: usize = 512;

    /// Create a validated [`SupplementaryUrl`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = non_empty_trimmed(Self::FIELD, value.into())?;
        let value = bounded(Self::FIELD, Self::MAX_CHARS, value)?;
        url::Url::parse(&value).map_err(|_| ValidationError::InvalidUrl {
            input: value.clone(),
        })?;
        Ok(Self(value))
    }

    /// Borrow the URL as sent.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Title for the supplementary URL (`url_title`), at most [`UrlTitle::MAX_CHARS`] characters.
pub struct UrlTitle(String);

impl UrlTitle {
    /// Form field name used by Pushover (`url_title`).
    pub const FIELD: &'static str = "url_title";
    /// Maximum length in characters.
    pub const MAX_CHARS: usize = 100;

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(bounded(Self::FIELD, Self::MAX_CHARS, value.into())?))
    }

    pub fn truncated(value: impl Into<String>) -> Self {
        Self(clip(value.into(), Self::MAX_CHARS))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// One line of glance text (`title`, `text` or `subtext`).
///
/// Invariant: at most [`GlanceText::MAX_CHARS`] characters.
pub struct GlanceText(String);

impl GlanceText {
    /// Maximum length in characters.
    pub const MAX_CHARS: usize = 100;

    const FIELD: &'static str = "glance text";

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(bounded(Self::FIELD, Self::MAX_CHARS, value.into())?))
    }

    pub fn truncated(value: impl Into<String>) -> Self {
        Self(clip(value.into(), Self::MAX_CHARS))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
/// Message priority (`priority`).
pub enum Priority {
    /// `-2`: no notification or alert.
    Lowest,
    /// `-1`: quiet notification.
    Low,
    /// `0`: default.
    #[default]
    Normal,
    /// `1`: bypasses quiet hours.
    High,
    /// `2`: repeats until acknowledged, governed by `retry` and `expire`.
    Emergency,
}

impl Priority {
    /// Form field name used by Pushover (`priority`).
    pub const FIELD: &'static str = "priority";

    /// Integer representation sent on the wire.
    pub fn as_i8(self) -> i8 {
        match self {
            Self::Lowest => -2,
            Self::Low => -1,
            Self::Normal => 0,
            Self::High => 1,
            Self::Emergency => 2,
        }
    }
}

impl TryFrom<i8> for Priority {
    type Error = ValidationError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        Ok(match value {
            -2 => Self::Lowest,
            -1 => Self::Low,
            0 => Self::Normal,
            1 => Self::High,
            2 => Self::Emergency,
            other => {
                return Err(ValidationError::OutOfRange {
                    field: Self::FIELD,
                    min: -2,
                    max: 2,
                    actual: i64::from(other),
                });
            }
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
/// Built-in notification sounds (`sound`).
pub enum Sound {
    #[default]
    Pushover,
    Bike,
    Bugle,
    CashRegister,
    Classical,
    Cosmic,
    Falling,
    Gamelan,
    Incoming,
    Intermission,
    Magic,
    Mechanical,
    PianoBar,
    Siren,
    SpaceAlarm,
    Tugboat,
    Alien,
    Climb,
    Persistent,
    Echo,
    UpDown,
    Vibrate,
    None,
}

impl Sound {
    /// Form field name used by Pushover (`sound`).
    pub const FIELD: &'static str = "sound";

    /// Every built-in sound, in Pushover's listing order.
    pub const ALL: [Sound; 23] = [
        Self::Pushover,
        Self::Bike,
        Self::Bugle,
        Self::CashRegister,
        Self::Classical,
        Self::Cosmic,
        Self::Falling,
        Self::Gamelan,
        Self::Incoming,
        Self::Intermission,
        Self::Magic,
        Self::Mechanical,
        Self::PianoBar,
        Self::Siren,
        Self::SpaceAlarm,
        Self::Tugboat,
        Self::Alien,
        Self::Climb,
        Self::Persistent,
        Self::Echo,
        Self::UpDown,
        Self::Vibrate,
        Self::None,
    ];

    /// Wire name of the sound.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pushover => "pushover",
            Self::Bike => "bike",
            Self::Bugle => "bugle",
            Self::CashRegister => "cashregister",
            Self::Classical => "classical",
            Self::Cosmic => "cosmic",
            Self::Falling => "falling",
            Self::Gamelan => "gamelan",
            Self::Incoming => "incoming",
            Self::Intermission => "intermission",
            Self::Magic => "magic",
            Self::Mechanical => "mechanical",
            Self::PianoBar => "pianobar",
            Self::Siren => "siren",
            Self::SpaceAlarm => "spacealarm",
            Self::Tugboat => "tugboat",
            Self::Alien => "alien",
            Self::Climb => "climb",
            Self::Persistent => "persistent",
            Self::Echo => "echo",
            Self::UpDown => "updown",
            Self::Vibrate => "vibrate",
            Self::None => "none",
        }
    }
}

impl FromStr for Sound {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        // Older clients spell it "mechanic".
        if wanted.eq_ignore_ascii_case("mechanic") {
            return Ok(Self::Mechanical);
        }
        Self::ALL
            .into_iter()
            .find(|sound| sound.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::UnknownSound {
                input: s.to_owned(),
            })
    }
}

impl fmt::Display for Sound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Unix timestamp in seconds (`timestamp`).
pub struct UnixTimestamp(u64);

impl UnixTimestamp {
    /// Form field name used by Pushover (`timestamp`).
    pub const FIELD: &'static str = "timestamp";

    /// Create a timestamp value (no range validation is performed).
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Current wall-clock time. A clock set before the epoch yields `0`.
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        Self(secs)
    }

    /// Get the underlying timestamp in seconds.
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// How often (in seconds) an emergency message is re-sent (`retry`).
///
/// Invariant: at least [`RetrySeconds::MIN`].
pub struct RetrySeconds(u32);

impl RetrySeconds {
    /// Form field name used by Pushover (`retry`).
    pub const FIELD: &'static str = "retry";
    /// Minimum allowed retry interval.
    pub const MIN: u32 = 30;

    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if value < Self::MIN {
            return Err(ValidationError::OutOfRange {
                field: Self::FIELD,
                min: i64::from(Self::MIN),
                max: i64::from(u32::MAX),
                actual: i64::from(value),
            });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for RetrySeconds {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// How long (in seconds) an emergency message keeps retrying (`expire`).
///
/// Invariant: `1..=10800`.
pub struct ExpireSeconds(u32);

impl ExpireSeconds {
    /// Form field name used by Pushover (`expire`).
    pub const FIELD: &'static str = "expire";
    /// Minimum allowed value.
    pub const MIN: u32 = 1;
    /// Maximum allowed value (three hours).
    pub const MAX: u32 = 10_800;

    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::OutOfRange {
                field: Self::FIELD,
                min: i64::from(Self::MIN),
                max: i64::from(Self::MAX),
                actual: i64::from(value),
            });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for ExpireSeconds {
    fn default() -> Self {
        Self(Self::MAX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Glance progress value (`percent`).
///
/// Invariant: `0..=100`.
pub struct Percent(u8);

impl Percent {
    /// Form field name used by Pushover (`percent`).
    pub const FIELD: &'static str = "percent";
    /// Maximum allowed value.
    pub const MAX: u8 = 100;

    pub fn new(value: i64) -> Result<Self, ValidationError> {
        match u8::try_from(value) {
            Ok(percent) if percent <= Self::MAX => Ok(Self(percent)),
            _ => Err(ValidationError::OutOfRange {
                field: Self::FIELD,
                min: 0,
                max: i64::from(Self::MAX),
                actual: value,
            }),
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Receipt returned for emergency-priority messages.
///
/// Invariant: non-empty ASCII alphanumeric. It is interpolated into a URL path.
pub struct Receipt(String);

impl Receipt {
    /// Field name used by Pushover (`receipt`).
    pub const FIELD: &'static str = "receipt";

    /// Create a validated [`Receipt`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = non_empty_trimmed(Self::FIELD, value.into())?;
        if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ValidationError::InvalidReceipt { input: value });
        }
        Ok(Self(value))
    }

    /// Borrow the receipt id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn non_empty_trimmed(field: &'static str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(trimmed.to_owned())
}

fn bounded(field: &'static str, max: usize, value: String) -> Result<String, ValidationError> {
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong { field, max, actual });
    }
    Ok(value)
}

fn clip(value: String, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((cut, _)) => value[..cut].to_owned(),
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_newtypes_trim_and_reject_blank() {
        let user = UserKey::new("  uQiRzpo4DXghDmr9QzzfQu27cmVRsG ").unwrap();
        assert_eq!(user.as_str(), "uQiRzpo4DXghDmr9QzzfQu27cmVRsG");
        assert!(UserKey::new("   ").is_err());

        let token = ApiToken::new(" azGDORePK8gMaC0QOYAMyEEuzJnyUi ").unwrap();
        assert_eq!(token.as_str(), "azGDORePK8gMaC0QOYAMyEEuzJnyUi");
        assert!(matches!(
            ApiToken::new(""),
            Err(ValidationError::Empty {
                field: ApiToken::FIELD
            })
        ));
    }

    #[test]
    fn device_name_joins_many() {
        let devices = DeviceName::many([" iphone", "nexus7 "]).unwrap();
        assert_eq!(devices.as_str(), "iphone,nexus7");
        assert!(DeviceName::many(Vec::<String>::new()).is_err());
        assert!(DeviceName::many(["iphone", " "]).is_err());
    }

    #[test]
    fn message_text_enforces_length_and_blankness() {
        let msg = MessageText::new(" hi ").unwrap();
        assert_eq!(msg.as_str(), " hi ");
        assert!(MessageText::new("  ").is_err());

        let exact = "a".repeat(MessageText::MAX_CHARS);
        assert!(MessageText::new(exact).is_ok());

        let long = "a".repeat(MessageText::MAX_CHARS + 1);
        assert!(matches!(
            MessageText::new(long.clone()),
            Err(ValidationError::TooLong {
                field: "message",
                max: 4096,
                actual: 4097
            })
        ));
        let clipped = MessageText::truncated(long).unwrap();
        assert_eq!(clipped.as_str().len(), MessageText::MAX_CHARS);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let title = Title::truncated("é".repeat(Title::MAX_CHARS + 10));
        assert_eq!(title.as_str().chars().count(), Title::MAX_CHARS);

        let glance = GlanceText::truncated("ü".repeat(150));
        assert_eq!(glance.as_str().chars().count(), GlanceText::MAX_CHARS);
        assert!(GlanceText::new("ü".repeat(100)).is_ok());
    }

    #[test]
    fn short_text_limits_are_inclusive() {
        assert!(Title::new("t".repeat(Title::MAX_CHARS)).is_ok());
        assert!(matches!(
            Title::new("t".repeat(Title::MAX_CHARS + 1)),
            Err(ValidationError::TooLong { field: "title", .. })
        ));

        assert!(UrlTitle::new("u".repeat(UrlTitle::MAX_CHARS)).is_ok());
        assert!(matches!(
            UrlTitle::new("u".repeat(UrlTitle::MAX_CHARS + 1)),
            Err(ValidationError::TooLong { field: "url_title", .. })
        ));

        assert!(matches!(
            GlanceText::new("g".repeat(GlanceText::MAX_CHARS + 1)),
            Err(ValidationError::TooLong { field: "glance text", .. })
        ));
        assert!(GlanceText::new(" \t").unwrap().is_blank());
    }

    #[test]
    fn supplementary_url_must_parse() {
        let url = SupplementaryUrl::new(" https://example.com/build/42 ").unwrap();
        assert_eq!(url.as_str(), "https://example.com/build/42");
        assert!(matches!(
            SupplementaryUrl::new("not a url"),
            Err(ValidationError::InvalidUrl { .. })
        ));
        let long = format!("https://example.com/{}", "a".repeat(600));
        assert!(matches!(
            SupplementaryUrl::new(long),
            Err(ValidationError::TooLong { field: "url", .. })
        ));
    }

    #[test]
    fn priority_round_trips_through_i8() {
        for value in -2..=2 {
            assert_eq!(Priority::try_from(value).unwrap().as_i8(), value);
        }
        assert!(Priority::try_from(3).is_err());
        assert!(Priority::try_from(-3).is_err());
        assert_eq!(Priority::default(), Priority::Normal);
    }

    #[test]
    fn sound_parses_known_names_only() {
        assert_eq!("siren".parse::<Sound>().unwrap(), Sound::Siren);
        assert_eq!(" CashRegister ".parse::<Sound>().unwrap(), Sound::CashRegister);
        assert_eq!("none".parse::<Sound>().unwrap(), Sound::None);
        assert_eq!("mechanical".parse::<Sound>().unwrap(), Sound::Mechanical);
        assert_eq!("Mechanic".parse::<Sound>().unwrap(), Sound::Mechanical);
        assert!(matches!(
            "kazoo".parse::<Sound>(),
            Err(ValidationError::UnknownSound { .. })
        ));
        assert_eq!(Sound::default().as_str(), "pushover");
    }

    #[test]
    fn retry_and_expire_bounds() {
        assert!(RetrySeconds::new(29).is_err());
        assert_eq!(RetrySeconds::new(30).unwrap().value(), 30);
        assert_eq!(RetrySeconds::default().value(), 30);

        assert!(ExpireSeconds::new(0).is_err());
        assert!(ExpireSeconds::new(10_801).is_err());
        assert_eq!(ExpireSeconds::new(10_800).unwrap().value(), 10_800);
        assert_eq!(ExpireSeconds::default().value(), 10_800);
    }

    #[test]
    fn percent_bounds() {
        assert_eq!(Percent::new(0).unwrap().value(), 0);
        assert_eq!(Percent::new(100).unwrap().value(), 100);
        assert!(Percent::new(101).is_err());
        assert!(Percent::new(-1).is_err());
    }

    #[test]
    fn receipt_rejects_path_characters() {
        let receipt = Receipt::new(" rLqVuqTRh62UzxtmqiaLzQmVcPgiCy ").unwrap();
        assert_eq!(receipt.as_str(), "rLqVuqTRh62UzxtmqiaLzQmVcPgiCy");
        assert!(Receipt::new("").is_err());
        assert!(matches!(
            Receipt::new("../apps/limits"),
            Err(ValidationError::InvalidReceipt { .. })
        ));
    }

    #[test]
    fn timestamp_now_is_after_2020() {
        assert!(UnixTimestamp::now().value() > 1_577_836_800);
    }
}
