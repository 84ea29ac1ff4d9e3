use std::fmt;
use std::path::Path;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Image formats Pushover accepts as attachments.
pub enum ImageType {
    Jpeg,
    Png,
}

impl ImageType {
    /// MIME type sent with the multipart part.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    /// Guess the image type from a file name extension.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let extension = Path::new(file_name).extension()?.to_str()?;
        match extension.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" | "jpe" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
/// Image attached to a message (`attachment`).
///
/// Invariant: JPEG or PNG by file extension, at most [`Attachment::MAX_BYTES`] bytes.
pub struct Attachment {
    file_name: String,
    image_type: ImageType,
    bytes: Vec<u8>,
}

impl Attachment {
    /// Multipart part name used by Pushover (`attachment`).
    pub const FIELD: &'static str = "attachment";
    /// Largest attachment Pushover accepts (2.5 MiB).
    pub const MAX_BYTES: usize = 2_621_440;

    /// Read an image from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ValidationError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_owned();
        if ImageType::from_file_name(&file_name).is_none() {
            return Err(ValidationError::UnsupportedAttachmentType {
                file_name: path.display().to_string(),
            });
        }

        let unreadable = |err: std::io::Error| ValidationError::AttachmentUnreadable {
            path: path.display().to_string(),
            reason: err.to_string(),
        };
        let len = std::fs::metadata(path).map_err(unreadable)?.len();
        if len > Self::MAX_BYTES as u64 {
            return Err(ValidationError::AttachmentTooLarge {
                max: Self::MAX_BYTES,
                actual: usize::try_from(len).unwrap_or(usize::MAX),
            });
        }

        let bytes = std::fs::read(path).map_err(unreadable)?;
        Self::from_bytes(file_name, bytes)
    }

    /// Wrap in-memory image data. The type is taken from `file_name`'s extension.
    pub fn from_bytes(
        file_name: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Result<Self, ValidationError> {
        let file_name = file_name.into();
        let Some(image_type) = ImageType::from_file_name(&file_name) else {
            return Err(ValidationError::UnsupportedAttachmentType { file_name });
        };
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        if bytes.len() > Self::MAX_BYTES {
            return Err(ValidationError::AttachmentTooLarge {
                max: Self::MAX_BYTES,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            file_name,
            image_type,
            bytes,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn image_type(&self) -> ImageType {
        self.image_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("image_type", &self.image_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn image_type_is_guessed_from_extension() {
        assert_eq!(ImageType::from_file_name("a.jpg"), Some(ImageType::Jpeg));
        assert_eq!(ImageType::from_file_name("a.JPEG"), Some(ImageType::Jpeg));
        assert_eq!(ImageType::from_file_name("dir/a.png"), Some(ImageType::Png));
        assert_eq!(ImageType::from_file_name("a.gif"), None);
        assert_eq!(ImageType::from_file_name("png"), None);
        assert_eq!(ImageType::Png.mime_type(), "image/png");
    }

    #[test]
    fn from_bytes_validates_type_and_size() {
        let attachment = Attachment::from_bytes("cat.png", vec![1, 2, 3]).unwrap();
        assert_eq!(attachment.file_name(), "cat.png");
        assert_eq!(attachment.image_type(), ImageType::Png);
        assert_eq!(attachment.bytes(), &[1, 2, 3]);

        assert!(matches!(
            Attachment::from_bytes("notes.txt", vec![1]),
            Err(ValidationError::UnsupportedAttachmentType { .. })
        ));
        assert!(matches!(
            Attachment::from_bytes("cat.png", Vec::new()),
            Err(ValidationError::Empty { field: "attachment" })
        ));
        assert!(matches!(
            Attachment::from_bytes("cat.jpg", vec![0; Attachment::MAX_BYTES + 1]),
            Err(ValidationError::AttachmentTooLarge { .. })
        ));
        let largest = Attachment::from_bytes("cat.jpg", vec![0; Attachment::MAX_BYTES]).unwrap();
        assert_eq!(largest.bytes().len(), Attachment::MAX_BYTES);
    }

    #[test]
    fn from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.jpg");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&[0xFF, 0xD8, 0xFF]).unwrap();
        drop(file);

        let attachment = Attachment::from_path(&path).unwrap();
        assert_eq!(attachment.file_name(), "graph.jpg");
        assert_eq!(attachment.image_type(), ImageType::Jpeg);
        assert_eq!(attachment.into_bytes(), vec![0xFF, 0xD8, 0xFF]);
    }

    #[test]
    fn from_path_rejects_oversized_file_before_reading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.png");
        let file = std::fs::File::create(&path).unwrap();
        file.set_len(Attachment::MAX_BYTES as u64 + 1).unwrap();
        drop(file);

        let err = Attachment::from_path(&path).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::AttachmentTooLarge { max: Attachment::MAX_BYTES, actual }
                if actual == Attachment::MAX_BYTES + 1
        ));
    }

    #[test]
    fn from_path_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Attachment::from_path(dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, ValidationError::AttachmentUnreadable { .. }));

        let err = Attachment::from_path(dir.path().join("missing.bmp")).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::UnsupportedAttachmentType { .. }
        ));
    }
}
