use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty {
        field: &'static str,
    },
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        actual: i64,
    },
    UnknownSound {
        input: String,
    },
    InvalidUrl {
        input: String,
    },
    InvalidReceipt {
        input: String,
    },
    UnsupportedAttachmentType {
        file_name: String,
    },
    AttachmentTooLarge {
        max: usize,
        actual: usize,
    },
    AttachmentUnreadable {
        path: String,
        reason: String,
    },
    EmptyGlance,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::TooLong { field, max, actual } => {
                write!(f, "{field} is too long: {actual} characters (max {max})")
            }
            Self::OutOfRange {
                field,
                min,
                max,
                actual,
            } => {
                write!(
                    f,
                    "{field} out of range: {actual} (expected {min}..={max})"
                )
            }
            Self::UnknownSound { input } => write!(f, "unknown sound: {input}"),
            Self::InvalidUrl { input } => write!(f, "invalid url: {input}"),
            Self::InvalidReceipt { input } => write!(f, "invalid receipt: {input}"),
            Self::UnsupportedAttachmentType { file_name } => {
                write!(f, "attachment must be a JPEG or PNG image: {file_name}")
            }
            Self::AttachmentTooLarge { max, actual } => {
                write!(f, "attachment too large: {actual} bytes (max {max})")
            }
            Self::AttachmentUnreadable { path, reason } => {
                write!(f, "cannot read attachment {path}: {reason}")
            }
            Self::EmptyGlance => write!(f, "glance must set at least one field"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "message" };
        assert_eq!(err.to_string(), "message must not be empty");

        let err = ValidationError::TooLong {
            field: "title",
            max: 250,
            actual: 251,
        };
        assert_eq!(
            err.to_string(),
            "title is too long: 251 characters (max 250)"
        );

        let err = ValidationError::OutOfRange {
            field: "percent",
            min: 0,
            max: 100,
            actual: 101,
        };
        assert_eq!(
            err.to_string(),
            "percent out of range: 101 (expected 0..=100)"
        );

        let err = ValidationError::UnknownSound {
            input: "kazoo".to_owned(),
        };
        assert_eq!(err.to_string(), "unknown sound: kazoo");

        let err = ValidationError::AttachmentTooLarge { max: 10, actual: 11 };
        assert_eq!(err.to_string(), "attachment too large: 11 bytes (max 10)");

        assert_eq!(
            ValidationError::EmptyGlance.to_string(),
            "glance must set at least one field"
        );
    }
}
