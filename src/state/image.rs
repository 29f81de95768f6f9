//! Image attachments and the async decode pipeline
//!
//! Every intake channel (path prompt, pasted file path, clipboard image)
//! funnels into [`ImageSource`]; the size/count gate runs synchronously at
//! intake, the binary-to-text decode runs as a tokio task and its completion
//! is appended by the event loop.

use super::FormError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::io::Cursor;
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// Upper bound on attached images per card
pub const MAX_IMAGES: usize = 3;

/// Per-image size cap in bytes (5MB)
pub const MAX_IMAGE_BYTES: u64 = 5_242_880;

/// One attached figure. The id is a random token, stable and unique within
/// the set, used only to address removals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttachment {
    #[serde(default = "fresh_id", deserialize_with = "id_from_legacy")]
    pub id: String,
    #[serde(rename = "src")]
    pub data_uri: String,
    #[serde(default)]
    pub name: String,
}

pub fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

/// Old snapshots carry numeric Date-derived ids; accept both shapes.
fn id_from_legacy<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LegacyId {
        Text(String),
        Number(u64),
    }

    Ok(match LegacyId::deserialize(deserializer)? {
        LegacyId::Text(id) => id,
        LegacyId::Number(id) => id.to_string(),
    })
}

/// Ordered collection of up to three attachments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageSet(Vec<ImageAttachment>);

impl ImageSet {
    /// Rebuild from restored values, capped at the limit.
    pub fn from_vec(mut images: Vec<ImageAttachment>) -> Self {
        images.truncate(MAX_IMAGES);
        Self(images)
    }

    /// Gate an intake before any decoding starts. Size is checked first,
    /// then the count, matching the order notices are shown in.
    pub fn check_intake(&self, size_bytes: u64) -> Result<(), FormError> {
        if size_bytes > MAX_IMAGE_BYTES {
            return Err(FormError::ImageTooLarge);
        }
        if self.0.len() >= MAX_IMAGES {
            return Err(FormError::ImageSetFull);
        }
        Ok(())
    }

    /// Append a finished decode. A decode in flight always completes and
    /// appends; the gate ran at intake.
    pub fn push(&mut self, attachment: ImageAttachment) {
        self.0.push(attachment);
    }

    /// Remove the attachment with the matching id. Absent ids are a no-op.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.0.iter().position(|img| img.id == id) {
            Some(idx) => {
                self.0.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageAttachment> {
        self.0.iter()
    }

    pub fn get(&self, index: usize) -> Option<&ImageAttachment> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// An intake source headed for the decode task
#[derive(Debug)]
pub enum ImageSource {
    /// A file on disk, from the path prompt or a pasted path
    Path(PathBuf),
    /// Already-encoded PNG bytes, from the clipboard
    Png { bytes: Vec<u8>, name: String },
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{name} is not a recognized image format")]
    Format { name: String },
    #[error("clipboard image could not be encoded")]
    Clipboard,
}

pub type DecodeResult = Result<ImageAttachment, DecodeError>;

/// Decode an intake source into an attachment.
///
/// The file read suspends; everything after it is a pure transformation.
/// There is no cancellation path, a spawned decode always reports back.
pub async fn decode(source: ImageSource) -> DecodeResult {
    match source {
        ImageSource::Path(path) => {
            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|source| DecodeError::Read {
                    path: path.clone(),
                    source,
                })?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let format = image::guess_format(&bytes)
                .map_err(|_| DecodeError::Format { name: name.clone() })?;
            Ok(ImageAttachment {
                id: fresh_id(),
                data_uri: to_data_uri(format.to_mime_type(), &bytes),
                name,
            })
        }
        ImageSource::Png { bytes, name } => Ok(ImageAttachment {
            id: fresh_id(),
            data_uri: to_data_uri("image/png", &bytes),
            name,
        }),
    }
}

fn to_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}

/// Encode raw clipboard RGBA data as PNG bytes for the shared intake path.
pub fn encode_clipboard_png(width: usize, height: usize, rgba: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let buffer = image::RgbaImage::from_raw(width as u32, height as u32, rgba.to_vec())
        .ok_or(DecodeError::Clipboard)?;
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(buffer)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|_| DecodeError::Clipboard)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn attachment(id: &str) -> ImageAttachment {
        ImageAttachment {
            id: id.to_string(),
            data_uri: "data:image/png;base64,AAAA".to_string(),
            name: format!("{id}.png"),
        }
    }

    #[test]
    fn test_intake_rejects_oversize_first() {
        let set = ImageSet::default();
        assert_eq!(
            set.check_intake(MAX_IMAGE_BYTES + 1),
            Err(FormError::ImageTooLarge)
        );
        assert_eq!(set.check_intake(MAX_IMAGE_BYTES), Ok(()));
    }

    #[test]
    fn test_intake_rejects_fourth_image() {
        let mut set = ImageSet::default();
        for i in 0..MAX_IMAGES {
            set.push(attachment(&i.to_string()));
        }
        assert_eq!(set.check_intake(1024), Err(FormError::ImageSetFull));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_remove_by_id() {
        let mut set = ImageSet::default();
        set.push(attachment("a"));
        set.push(attachment("b"));
        assert!(set.remove("a"));
        assert!(!set.remove("a"));
        assert_eq!(set.iter().map(|i| i.id.as_str()).collect::<Vec<_>>(), ["b"]);
    }

    #[test]
    fn test_from_vec_caps_at_limit() {
        let set = ImageSet::from_vec((0..5).map(|i| attachment(&i.to_string())).collect());
        assert_eq!(set.len(), MAX_IMAGES);
    }

    #[test]
    fn test_legacy_numeric_id_restamps_to_string() {
        let json = r#"{"id": 1706000000000, "src": "data:image/png;base64,AA", "name": "fig.png"}"#;
        let img: ImageAttachment = serde_json::from_str(json).unwrap();
        assert_eq!(img.id, "1706000000000");
        assert_eq!(img.data_uri, "data:image/png;base64,AA");
    }

    #[test]
    fn test_missing_id_gets_fresh_token() {
        let json = r#"{"src": "data:image/png;base64,AA"}"#;
        let img: ImageAttachment = serde_json::from_str(json).unwrap();
        assert!(!img.id.is_empty());
        assert!(img.name.is_empty());
    }

    #[test]
    fn test_serialized_shape_uses_src() {
        let json = serde_json::to_string(&attachment("x")).unwrap();
        assert!(json.contains("\"src\""));
        assert!(!json.contains("data_uri"));
    }

    #[test]
    fn test_decode_path_produces_data_uri() {
        let path = std::env::temp_dir().join(format!("papercard-{}.png", fresh_id()));
        let pixel = image::RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 255]));
        image::DynamicImage::ImageRgba8(pixel)
            .save_with_format(&path, image::ImageFormat::Png)
            .unwrap();

        let decoded = tokio_test::block_on(decode(ImageSource::Path(path.clone()))).unwrap();
        let _ = std::fs::remove_file(&path);

        assert!(decoded.data_uri.starts_with("data:image/png;base64,"));
        assert_eq!(decoded.name, path.file_name().unwrap().to_string_lossy());
        assert!(!decoded.id.is_empty());
    }

    #[test]
    fn test_decode_rejects_non_image_bytes() {
        let path = std::env::temp_dir().join(format!("papercard-{}.txt", fresh_id()));
        std::fs::write(&path, b"plain text, not pixels").unwrap();

        let result = tokio_test::block_on(decode(ImageSource::Path(path.clone())));
        let _ = std::fs::remove_file(&path);

        assert!(matches!(result, Err(DecodeError::Format { .. })));
    }

    #[test]
    fn test_clipboard_png_round_trip() {
        let rgba = vec![255u8; 2 * 2 * 4];
        let bytes = encode_clipboard_png(2, 2, &rgba).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Png);
    }

    #[test]
    fn test_fresh_ids_are_unique() {
        let ids: std::collections::HashSet<_> = (0..64).map(|_| fresh_id()).collect();
        assert_eq!(ids.len(), 64);
    }
}
