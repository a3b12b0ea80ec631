//! Accepted upload formats for question images

use super::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Image formats accepted for question transcription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    /// Detect the format from a filename's extension (`png`, `jpg`, `jpeg`, case-insensitive)
    ///
    /// A filename without a `.` has no extension and is rejected.
    pub fn from_filename(filename: &str) -> Result<Self, DomainError> {
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .ok_or_else(|| DomainError::UnsupportedFormat(filename.to_string()))?;

        match extension.as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
            _ => Err(DomainError::UnsupportedFormat(filename.to_string())),
        }
    }

    /// MIME type sent alongside the image bytes
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageFormat::Png => write!(f, "png"),
            ImageFormat::Jpeg => write!(f, "jpeg"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_extensions() {
        assert_eq!(ImageFormat::from_filename("q.png"), Ok(ImageFormat::Png));
        assert_eq!(ImageFormat::from_filename("q.JPG"), Ok(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_filename("scan.page1.jpeg"), Ok(ImageFormat::Jpeg));
    }

    #[test]
    fn test_rejected_extensions() {
        assert_eq!(
            ImageFormat::from_filename("diagram.gif"),
            Err(DomainError::UnsupportedFormat("diagram.gif".to_string()))
        );
        assert!(ImageFormat::from_filename("png").is_err());
        assert!(ImageFormat::from_filename("photo.png.exe").is_err());
    }

    #[test]
    fn test_mime_type() {
        assert_eq!(ImageFormat::Png.mime_type(), "image/png");
        assert_eq!(ImageFormat::Jpeg.mime_type(), "image/jpeg");
    }
}
