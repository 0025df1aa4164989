//! Shared fixtures: sprite sheets and manifests written to a temp directory.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};

/// Fresh directory for one test, removed by [`TempAssets::drop`].
pub struct TempAssets {
    pub dir: PathBuf,
}

impl TempAssets {
    pub fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!(
            "aberredtextures_{}_{}",
            name,
            std::process::id()
        ));
        std::fs::remove_dir_all(&dir).ok();
        std::fs::create_dir_all(&dir).unwrap();
        Self { dir }
    }

    pub fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    /// Write a `width` x `height` PNG whose pixel `(x, y)` is `(x, y, 0, 255)`,
    /// so any slice can be identified by its top-left pixel.
    pub fn write_sheet(&self, file: &str, width: u32, height: u32) -> PathBuf {
        let path = self.path(file);
        write_sheet(&path, width, height);
        path
    }

    pub fn write_manifest(&self, file: &str, json: &str) -> PathBuf {
        let path = self.path(file);
        std::fs::write(&path, json).unwrap();
        path
    }
}

impl Drop for TempAssets {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.dir).ok();
    }
}

pub fn write_sheet(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 0, 255]));
    img.save(path).unwrap();
}

/// Two clips: three 16x16 frames on row 0, two on row 1, speed 0.5.
pub const TWO_CLIP_MANIFEST: &str = r#"{
    "frames": [
        [[0, 0, 16, 16], [16, 0, 32, 16], [32, 0, 48, 16]],
        [[0, 16, 16, 32], [16, 16, 32, 32]]
    ],
    "speed": 0.5
}"#;

pub const EPSILON: f64 = 1e-9;

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}
