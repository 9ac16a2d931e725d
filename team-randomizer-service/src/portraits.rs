//! Hero portrait lookup.
//!
//! Portraits are optional `Icon-<key>.webp` files. They are decoded,
//! resized to a square thumbnail, and re-encoded as PNG. Any failure along
//! the way is logged and treated as "no portrait".

use dashmap::DashMap;
use image::codecs::png::PngEncoder;
use image::{ImageEncoder, RgbaImage};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::PortraitError;

/// Normalize a hero name into its asset key.
///
/// `"Soldier: 76"` becomes `"Soldier76"` and `"Wrecking Ball"` becomes
/// `"Wrecking_Ball"`.
pub fn asset_key(character: &str) -> String {
    character.replace(": ", "").replace(':', "").replace(' ', "_")
}

/// File name of the portrait for an asset key
pub fn asset_file_name(key: &str) -> String {
    format!("Icon-{}.webp", key)
}

/// Reject keys that could escape the portrait directory
fn is_safe_key(key: &str) -> bool {
    !key.is_empty() && !key.contains(['/', '\\']) && !key.contains("..")
}

/// Loads and caches resized portraits from a directory.
pub struct PortraitStore {
    dir: PathBuf,
    size: u32,
    cache: DashMap<String, Arc<Vec<u8>>>,
}

impl PortraitStore {
    pub fn new(dir: impl Into<PathBuf>, size: u32) -> Self {
        Self {
            dir: dir.into(),
            size: size.max(1),
            cache: DashMap::new(),
        }
    }

    /// Portrait PNG for a key, or `None` if there is no usable asset.
    pub fn load(&self, key: &str) -> Option<Arc<Vec<u8>>> {
        if !is_safe_key(key) {
            debug!(key, "Rejected portrait key");
            return None;
        }

        if let Some(cached) = self.cache.get(key) {
            return Some(cached.clone());
        }

        let path = self.dir.join(asset_file_name(key));
        if !path.exists() {
            debug!(path = %path.display(), "No portrait asset");
            return None;
        }

        match self.render(&path) {
            Ok(png) => {
                let png = Arc::new(png);
                self.cache.insert(key.to_string(), png.clone());
                Some(png)
            }
            Err(e) => {
                warn!(error = ?e, "Portrait unavailable");
                None
            }
        }
    }

    fn render(&self, path: &Path) -> Result<Vec<u8>, PortraitError> {
        let bytes = std::fs::read(path).map_err(|source| PortraitError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let img = image::load_from_memory(&bytes)
            .map_err(|source| PortraitError::Decode {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();

        encode_png(&resize(&img, self.size))
    }
}

fn resize(img: &RgbaImage, size: u32) -> RgbaImage {
    if img.width() == size && img.height() == size {
        return img.clone();
    }
    image::imageops::resize(img, size, size, image::imageops::FilterType::Lanczos3)
}

fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, PortraitError> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(PortraitError::Encode)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::webp::WebPEncoder;
    use tempfile::TempDir;

    fn write_webp(dir: &Path, key: &str, width: u32, height: u32) {
        let img = RgbaImage::from_pixel(width, height, image::Rgba([200, 40, 40, 255]));
        let file = std::fs::File::create(dir.join(asset_file_name(key))).unwrap();
        WebPEncoder::new_lossless(file)
            .write_image(
                img.as_raw(),
                img.width(),
                img.height(),
                image::ExtendedColorType::Rgba8,
            )
            .unwrap();
    }

    #[test]
    fn test_asset_key() {
        assert_eq!(asset_key("Soldier: 76"), "Soldier76");
        assert_eq!(asset_key("Junker Queen"), "Junker_Queen");
        assert_eq!(asset_key("D.Va"), "D.Va");
        assert_eq!(asset_key("Lúcio"), "Lúcio");
        assert_eq!(asset_file_name("Wrecking_Ball"), "Icon-Wrecking_Ball.webp");
    }

    #[test]
    fn test_unsafe_keys_rejected() {
        assert!(!is_safe_key(""));
        assert!(!is_safe_key("../secret"));
        assert!(!is_safe_key("a/b"));
        assert!(is_safe_key("Soldier76"));
    }

    #[test]
    fn test_missing_asset_is_none() {
        let dir = TempDir::new().unwrap();
        let store = PortraitStore::new(dir.path(), 50);
        assert!(store.load("Mei").is_none());
    }

    #[test]
    fn test_corrupt_asset_is_none() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(asset_file_name("Mei")), b"not an image").unwrap();
        let store = PortraitStore::new(dir.path(), 50);
        assert!(store.load("Mei").is_none());
    }

    #[test]
    fn test_portrait_resized_to_png() {
        let dir = TempDir::new().unwrap();
        write_webp(dir.path(), "Soldier76", 120, 80);
        let store = PortraitStore::new(dir.path(), 50);

        let png = store.load(&asset_key("Soldier: 76")).unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.width(), 50);
        assert_eq!(decoded.height(), 50);

        // Served from cache after the file disappears
        std::fs::remove_file(dir.path().join(asset_file_name("Soldier76"))).unwrap();
        assert!(store.load("Soldier76").is_some());
    }
}
