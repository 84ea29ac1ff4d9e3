use crate::domain::attachment::Attachment;
use crate::domain::validation::ValidationError;
use crate::domain::value::{
    DeviceName, ExpireSeconds, GlanceText, MessageText, Percent, Priority, RetrySeconds, Sound,
    SupplementaryUrl, Title, UnixTimestamp, UrlTitle,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// How Pushover renders the message body.
pub enum TextFormat {
    #[default]
    Plain,
    /// Send `html=1`.
    Html,
    /// Send `monospace=1`.
    Monospace,
}

#[derive(Debug, Clone, Default)]
pub struct MessageOptions {
    pub title: Option<Title>,
    pub attachment: Option<Attachment>,
    pub device: Option<DeviceName>,
    pub url: Option<SupplementaryUrl>,
    pub url_title: Option<UrlTitle>,
    pub priority: Priority,
    pub sound: Sound,
    /// Defaults to the time the [`Message`] is built.
    pub timestamp: Option<UnixTimestamp>,
    pub retry: RetrySeconds,
    pub expire: ExpireSeconds,
    pub format: TextFormat,
}

#[derive(Debug, Clone)]
/// A push notification for `messages.json`.
pub struct Message {
    text: MessageText,
    timestamp: UnixTimestamp,
    options: MessageOptions,
}

impl Message {
    pub fn new(text: MessageText, options: MessageOptions) -> Self {
        let timestamp = options.timestamp.unwrap_or_else(UnixTimestamp::now);
        Self {
            text,
            timestamp,
            options,
        }
    }

    /// Message with default options.
    pub fn text(text: MessageText) -> Self {
        Self::new(text, MessageOptions::default())
    }

    pub fn message(&self) -> &MessageText {
        &self.text
    }

    pub fn timestamp(&self) -> UnixTimestamp {
        self.timestamp
    }

    pub fn options(&self) -> &MessageOptions {
        &self.options
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.options.attachment.as_ref()
    }

    pub(crate) fn take_attachment(&mut self) -> Option<Attachment> {
        self.options.attachment.take()
    }
}

#[derive(Debug, Clone, Default)]
pub struct GlanceOptions {
    pub title: Option<GlanceText>,
    pub text: Option<GlanceText>,
    pub subtext: Option<GlanceText>,
    pub count: Option<i64>,
    pub percent: Option<Percent>,
    pub device: Option<DeviceName>,
}

#[derive(Debug, Clone)]
/// A glance-widget update for `glances.json`.
///
/// Invariant: at least one of title, text, subtext, count, percent is set.
pub struct Glance {
    options: GlanceOptions,
}

impl Glance {
    /// Form field name of the glance title (`title`).
    pub const TITLE_FIELD: &'static str = "title";
    /// Form field name of the first text line (`text`).
    pub const TEXT_FIELD: &'static str = "text";
    /// Form field name of the second text line (`subtext`).
    pub const SUBTEXT_FIELD: &'static str = "subtext";
    /// Form field name of the widget counter (`count`).
    pub const COUNT_FIELD: &'static str = "count";

    /// Blank text lines count as unset.
    pub fn new(options: GlanceOptions) -> Result<Self, ValidationError> {
        let has_content = [&options.title, &options.text, &options.subtext]
            .into_iter()
            .any(|line| line.as_ref().is_some_and(|it| !it.is_blank()))
            || options.count.is_some()
            || options.percent.is_some();
        if !has_content {
            return Err(ValidationError::EmptyGlance);
        }
        Ok(Self { options })
    }

    pub fn options(&self) -> &GlanceOptions {
        &self.options
    }

    /// Title, text and subtext with their field names, blank lines skipped.
    pub fn lines(&self) -> impl Iterator<Item = (&'static str, &GlanceText)> {
        [
            (Self::TITLE_FIELD, self.options.title.as_ref()),
            (Self::TEXT_FIELD, self.options.text.as_ref()),
            (Self::SUBTEXT_FIELD, self.options.subtext.as_ref()),
        ]
        .into_iter()
        .filter_map(|(field, line)| Some((field, line?)))
        .filter(|(_, line)| !line.is_blank())
    }
}

#[derive(Debug, Clone)]
/// Anything [`crate::PushoverClient::send`] can deliver.
pub enum Notification {
    Message(Message),
    Glance(Glance),
}

impl Notification {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Message(_) => "message",
            Self::Glance(_) => "glance",
        }
    }
}

impl From<Message> for Notification {
    fn from(value: Message) -> Self {
        Self::Message(value)
    }
}

impl From<Glance> for Notification {
    fn from(value: Glance) -> Self {
        Self::Glance(value)
    }
}
