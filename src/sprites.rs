//! Sprite frames, sheets, and the typed sprite-sheet manifest
//!
//! The simulation core never loads textures itself. The host hands it a
//! [`SpriteProvider`] that resolves frame names to regions of an already
//! loaded sheet; a missing frame is fatal at startup. Sheet metadata is
//! decoded from the texture packer's JSON through an explicit schema, not
//! dynamic lookup.

use std::collections::HashMap;
use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::rect::Rect;

/// Errors surfaced while resolving assets at startup
#[derive(Debug)]
pub enum AssetError {
    /// A named frame is absent from the provider
    MissingFrame(String),
    /// The sheet manifest failed to decode
    Manifest(serde_json::Error),
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::MissingFrame(name) => write!(f, "sprite frame not found: {name}"),
            AssetError::Manifest(err) => write!(f, "sprite sheet manifest invalid: {err}"),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetError::Manifest(err) => Some(err),
            AssetError::MissingFrame(_) => None,
        }
    }
}

/// A named region of a sprite sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteFrame {
    pub name: String,
    /// Pixel region within the sheet texture
    pub region: Rect,
    /// Source size in pixels, before any render scale
    pub size: Vec2,
}

impl SpriteFrame {
    pub fn new(name: impl Into<String>, region: Rect, size: Vec2) -> Self {
        Self {
            name: name.into(),
            region,
            size,
        }
    }

    /// Center of the unscaled sprite, used as rotation origin
    #[inline]
    pub fn middle(&self) -> Vec2 {
        self.size / 2.0
    }
}

/// Resolves frame names for the simulation at load time
pub trait SpriteProvider {
    fn frame(&self, name: &str) -> Option<&SpriteFrame>;

    /// Resolve a frame or fail with a fatal [`AssetError`]
    fn require(&self, name: &str) -> Result<SpriteFrame, AssetError> {
        self.frame(name)
            .cloned()
            .ok_or_else(|| AssetError::MissingFrame(name.to_string()))
    }
}

/// A loaded sheet of named frames
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpriteSheet {
    frames: HashMap<String, SpriteFrame>,
}

impl SpriteSheet {
    pub fn add(&mut self, frame: SpriteFrame) {
        self.frames.insert(frame.name.clone(), frame);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Decode a texture packer manifest into a sheet.
    ///
    /// Frame names are the manifest filenames with their extension
    /// stripped, so `"Rocket.png"` resolves as `"Rocket"`.
    pub fn from_manifest(json: &str) -> Result<Self, AssetError> {
        let manifest: SheetManifest = serde_json::from_str(json).map_err(AssetError::Manifest)?;

        let mut sheet = SpriteSheet::default();
        for entry in manifest.frames {
            let name = match entry.filename.rsplit_once('.') {
                Some((stem, _)) => stem.to_owned(),
                None => entry.filename.clone(),
            };
            let region = Rect::new(entry.frame.x, entry.frame.y, entry.frame.w, entry.frame.h);
            let size = Vec2::new(entry.source_size.w, entry.source_size.h);
            sheet.add(SpriteFrame::new(name, region, size));
        }
        log::info!("sprite sheet loaded with {} frames", sheet.len());
        Ok(sheet)
    }
}

impl SpriteProvider for SpriteSheet {
    fn frame(&self, name: &str) -> Option<&SpriteFrame> {
        self.frames.get(name)
    }
}

/// Texture packer manifest schema
#[derive(Debug, Deserialize)]
struct SheetManifest {
    frames: Vec<ManifestFrame>,
}

#[derive(Debug, Deserialize)]
struct ManifestFrame {
    filename: String,
    frame: ManifestRect,
    #[serde(rename = "sourceSize")]
    source_size: ManifestSize,
}

#[derive(Debug, Deserialize)]
struct ManifestRect {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
}

#[derive(Debug, Deserialize)]
struct ManifestSize {
    w: f32,
    h: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"{
        "frames": [
            {
                "filename": "Rocket.png",
                "frame": { "x": 0, "y": 0, "w": 24, "h": 124 },
                "sourceSize": { "w": 24, "h": 124 }
            },
            {
                "filename": "Smoke.png",
                "frame": { "x": 24, "y": 0, "w": 32, "h": 32 },
                "sourceSize": { "w": 32, "h": 32 }
            }
        ]
    }"#;

    #[test]
    fn test_manifest_decode() {
        let sheet = SpriteSheet::from_manifest(MANIFEST).unwrap();
        assert_eq!(sheet.len(), 2);

        let rocket = sheet.frame("Rocket").unwrap();
        assert_eq!(rocket.size, Vec2::new(24.0, 124.0));
        assert_eq!(rocket.region, Rect::new(0.0, 0.0, 24.0, 124.0));
        assert_eq!(rocket.middle(), Vec2::new(12.0, 62.0));

        let smoke = sheet.frame("Smoke").unwrap();
        assert_eq!(smoke.region.x, 24.0);
    }

    #[test]
    fn test_manifest_rejects_bad_json() {
        let err = SpriteSheet::from_manifest("{ not json").unwrap_err();
        assert!(matches!(err, AssetError::Manifest(_)));
    }

    #[test]
    fn test_require_missing_frame_is_fatal() {
        let sheet = SpriteSheet::from_manifest(MANIFEST).unwrap();
        let err = sheet.require("Explosion").unwrap_err();
        assert!(matches!(err, AssetError::MissingFrame(name) if name == "Explosion"));
    }

    #[test]
    fn test_filename_without_extension_kept_verbatim() {
        let mut sheet = SpriteSheet::default();
        sheet.add(SpriteFrame::new(
            "Bare",
            Rect::new(0.0, 0.0, 8.0, 8.0),
            Vec2::splat(8.0),
        ));
        assert!(sheet.frame("Bare").is_some());
    }
}
