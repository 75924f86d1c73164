//! Image search result types.

use serde::{Deserialize, Serialize};

/// A single parsed image match.
///
/// Deserialized directly from the endpoint's JSON record shape; the field
/// renames track the wire names (`image`, `thumbnail`, `url`). Records are
/// immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageResult {
    /// Image title.
    #[serde(default)]
    pub title: String,
    /// URL of the full-size image.
    #[serde(rename = "image")]
    pub image_url: String,
    /// URL of the thumbnail.
    #[serde(rename = "thumbnail", default)]
    pub thumbnail_url: String,
    /// URL of the page the image was found on.
    #[serde(rename = "url", default)]
    pub source_url: String,
    /// Image width in pixels, when the endpoint reports it.
    #[serde(default)]
    pub width: Option<u32>,
    /// Image height in pixels, when the endpoint reports it.
    #[serde(default)]
    pub height: Option<u32>,
}

impl ImageResult {
    /// Total pixel count, when both dimensions are known.
    pub fn pixels(&self) -> Option<u64> {
        match (self.width, self.height) {
            (Some(w), Some(h)) => Some(u64::from(w) * u64::from(h)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{
            "title": "Red Panda",
            "image": "https://example.com/panda.jpg",
            "thumbnail": "https://example.com/panda_t.jpg",
            "url": "https://example.com/panda.html",
            "width": 1920,
            "height": 1080
        }"#;
        let result: ImageResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.title, "Red Panda");
        assert_eq!(result.image_url, "https://example.com/panda.jpg");
        assert_eq!(result.thumbnail_url, "https://example.com/panda_t.jpg");
        assert_eq!(result.source_url, "https://example.com/panda.html");
        assert_eq!(result.width, Some(1920));
        assert_eq!(result.height, Some(1080));
    }

    #[test]
    fn test_deserialize_missing_dimensions() {
        let json = r#"{
            "title": "No dims",
            "image": "https://example.com/a.jpg",
            "thumbnail": "https://example.com/a_t.jpg",
            "url": "https://example.com/a.html"
        }"#;
        let result: ImageResult = serde_json::from_str(json).unwrap();
        assert!(result.width.is_none());
        assert!(result.height.is_none());
        assert!(result.pixels().is_none());
    }

    #[test]
    fn test_deserialize_missing_image_fails() {
        let json = r#"{"title": "No image url"}"#;
        let result: Result<ImageResult, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_pixels() {
        let json = r#"{"image": "https://example.com/a.jpg", "width": 100, "height": 50}"#;
        let result: ImageResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.pixels(), Some(5000));
    }

    #[test]
    fn test_pixels_overflow_safe() {
        let json =
            r#"{"image": "https://example.com/a.jpg", "width": 4294967295, "height": 4294967295}"#;
        let result: ImageResult = serde_json::from_str(json).unwrap();
        // u32::MAX squared fits in u64
        assert!(result.pixels().is_some());
    }

    #[test]
    fn test_serialization_uses_wire_names() {
        let json = r#"{"image": "https://example.com/a.jpg"}"#;
        let result: ImageResult = serde_json::from_str(json).unwrap();
        let out = serde_json::to_string(&result).unwrap();
        assert!(out.contains("\"image\":\"https://example.com/a.jpg\""));
        assert!(out.contains("\"thumbnail\":"));
    }
}
