//! Domain layer: strong types with validation and invariants (no network I/O).

mod attachment;
mod request;
mod response;
mod validation;
mod value;

pub use attachment::{Attachment, ImageType};
pub use request::{Glance, GlanceOptions, Message, MessageOptions, Notification, TextFormat};
pub use response::{
    ApiResponse, AppLimits, Envelope, LimitsResponse, ReceiptResponse, SendResponse, Status,
    VerifyResponse,
};
pub use validation::ValidationError;
pub use value::{
    ApiToken, DeviceName, ExpireSeconds, GlanceText, MessageText, Percent, Priority, Receipt,
    RetrySeconds, Sound, SupplementaryUrl, Title, UnixTimestamp, UrlTitle, UserKey,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_defaults_match_pushover_defaults() {
        let message = Message::text(MessageText::new("backup finished").unwrap());
        let options = message.options();
        assert_eq!(options.priority, Priority::Normal);
        assert_eq!(options.sound, Sound::Pushover);
        assert_eq!(options.retry.value(), 30);
        assert_eq!(options.expire.value(), 10_800);
        assert_eq!(options.format, TextFormat::Plain);
        assert!(message.attachment().is_none());
        assert!(message.timestamp().value() > 0);
    }

    #[test]
    fn message_keeps_explicit_timestamp() {
        let message = Message::new(
            MessageText::new("hi").unwrap(),
            MessageOptions {
                timestamp: Some(UnixTimestamp::new(1_700_000_000)),
                ..Default::default()
            },
        );
        assert_eq!(message.timestamp(), UnixTimestamp::new(1_700_000_000));
    }

    #[test]
    fn glance_requires_some_content() {
        assert!(matches!(
            Glance::new(GlanceOptions::default()),
            Err(ValidationError::EmptyGlance)
        ));

        let device_only = GlanceOptions {
            device: Some(DeviceName::new("watch").unwrap()),
            ..Default::default()
        };
        assert!(Glance::new(device_only).is_err());

        let blank_lines_only = GlanceOptions {
            title: Some(GlanceText::new("").unwrap()),
            text: Some(GlanceText::new("  ").unwrap()),
            ..Default::default()
        };
        assert!(matches!(
            Glance::new(blank_lines_only),
            Err(ValidationError::EmptyGlance)
        ));

        let count_only = GlanceOptions {
            count: Some(-3),
            ..Default::default()
        };
        assert_eq!(Glance::new(count_only).unwrap().options().count, Some(-3));
    }

    #[test]
    fn notification_wraps_both_kinds() {
        let message: Notification = Message::text(MessageText::new("hi").unwrap()).into();
        assert_eq!(message.kind(), "message");

        let glance: Notification = Glance::new(GlanceOptions {
            percent: Some(Percent::new(50).unwrap()),
            ..Default::default()
        })
        .unwrap()
        .into();
        assert_eq!(glance.kind(), "glance");
    }

    #[test]
    fn status_maps_only_one_to_success() {
        assert!(Status::from_code(1).is_success());
        assert!(!Status::from_code(0).is_success());
        assert!(!Status::from_code(2).is_success());
    }
}
