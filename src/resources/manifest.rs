//! Sprite-sheet manifest loading.
//!
//! A manifest sits next to its sprite sheet and describes how the sheet is
//! cut into clips:
//!
//! ```json
//! {
//!   "frames": [
//!     [[0, 0, 32, 32], [32, 0, 64, 32], [64, 0, 96, 32]],
//!     [[0, 32, 32, 64], [32, 32, 64, 64]]
//!   ],
//!   "speed": 0.25
//! }
//! ```
//!
//! Each outer entry is one clip, each inner `[x0, y0, x1, y1]` one frame, and
//! `speed` is shared by every clip. Keys match regardless of case (`Frames`,
//! `SPEED`, ...) and a rectangle may carry extra trailing values, which are
//! ignored. A rectangle with fewer than four values makes the whole document
//! malformed. Loading is tolerant: a missing or broken manifest yields an
//! empty one and a warning, never an error.

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;

use crate::components::frame::Frame;

/// Extension token of sprite-sheet images.
pub const IMAGE_EXTENSION: &str = "png";
/// Extension token of manifests.
pub const MANIFEST_EXTENSION: &str = "json";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationManifest {
    /// One entry per clip, each an ordered list of `[x0, y0, x1, y1]`.
    pub frames: Vec<Vec<[i32; 4]>>,
    /// Timer units consumed per tick, shared by every clip.
    pub speed: f64,
}

/// First four values of a manifest rectangle.
fn rect_corners(values: &[i32]) -> Result<[i32; 4], String> {
    match values {
        [x0, y0, x1, y1, ..] => Ok([*x0, *y0, *x1, *y1]),
        _ => Err(format!(
            "frame rectangle needs 4 values, got {}",
            values.len()
        )),
    }
}

struct ManifestVisitor;

impl<'de> Visitor<'de> for ManifestVisitor {
    type Value = AnimationManifest;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a manifest object with frames and speed")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<AnimationManifest, A::Error> {
        let mut manifest = AnimationManifest::default();
        // Later duplicates (in any case) overwrite earlier ones.
        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case("frames") {
                // null leaves the field as it was
                let Some(clips) = map.next_value::<Option<Vec<Vec<Vec<i32>>>>>()? else {
                    continue;
                };
                let frames: Result<Vec<Vec<[i32; 4]>>, String> = clips
                    .iter()
                    .map(|clip| clip.iter().map(|r| rect_corners(r)).collect::<Result<Vec<_>, _>>())
                    .collect();
                manifest.frames = frames.map_err(<A::Error as de::Error>::custom)?;
            } else if key.eq_ignore_ascii_case("speed") {
                if let Some(speed) = map.next_value::<Option<f64>>()? {
                    manifest.speed = speed;
                }
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(manifest)
    }
}

impl<'de> Deserialize<'de> for AnimationManifest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ManifestVisitor)
    }
}

impl AnimationManifest {
    /// Strict parse of a manifest document.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Read and parse `path`, degrading to an empty manifest on any failure.
    pub fn load(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                warn!("Manifest {:?} not readable ({}); using zero clips", path, e);
                return Self::default();
            }
        };
        match Self::parse(&text) {
            Ok(manifest) => {
                debug!(
                    "Parsed manifest {:?}: {} clips, speed {}",
                    path,
                    manifest.clip_count(),
                    manifest.speed
                );
                manifest
            }
            Err(e) => {
                warn!("Manifest {:?} malformed ({}); using zero clips", path, e);
                Self::default()
            }
        }
    }

    pub fn clip_count(&self) -> usize {
        self.frames.len()
    }

    /// Frame rectangles of clip `clip`, canonicalised.
    pub fn clip_frames(&self, clip: usize) -> impl Iterator<Item = Frame> + '_ {
        self.frames
            .get(clip)
            .into_iter()
            .flatten()
            .map(|c| Frame::from_corners(*c))
    }
}

/// How the manifest path is derived from a sprite-sheet path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ManifestPathStrategy {
    /// Replace every `png` substring in the whole path with `json`.
    ///
    /// Matches how existing asset packs were laid out, including the known
    /// defect that a `png` elsewhere in the path (for example a `png/`
    /// directory) is rewritten too.
    #[default]
    LiteralSubstring,
    /// Replace only the file extension.
    ExtensionSwap,
}

impl ManifestPathStrategy {
    pub fn manifest_path(&self, image_path: &Path) -> PathBuf {
        match self {
            ManifestPathStrategy::LiteralSubstring => {
                let text: Cow<'_, str> = image_path.to_string_lossy();
                PathBuf::from(text.replace(IMAGE_EXTENSION, MANIFEST_EXTENSION))
            }
            ManifestPathStrategy::ExtensionSwap => image_path.with_extension(MANIFEST_EXTENSION),
        }
    }

    /// Parse the `[assets] manifest_path` config value.
    pub fn from_config_value(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "literal" | "substring" => Some(ManifestPathStrategy::LiteralSubstring),
            "extension" | "extension_swap" => Some(ManifestPathStrategy::ExtensionSwap),
            _ => None,
        }
    }

    pub fn config_value(&self) -> &'static str {
        match self {
            ManifestPathStrategy::LiteralSubstring => "literal",
            ManifestPathStrategy::ExtensionSwap => "extension",
        }
    }
}
