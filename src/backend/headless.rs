//! Window-less backend.
//!
//! Images are really decoded (via the `image` crate) so sizes and frame
//! slicing behave as they would on the GPU path, but nothing is rasterized:
//! [`RecordingTarget`] keeps a log of every draw instead. Shaders are only
//! checked for an entry point since there is no GLSL compiler here.
//!
//! Used by the `--inspect` CLI mode and by the test suite.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::{Rgba, RgbaImage};
use log::debug;
use smallvec::SmallVec;

use crate::backend::{DrawTarget, ImageHandle, TextureBackend};
use crate::components::frame::Frame;
use crate::components::transform::Transform2D;
use crate::components::uniforms::Uniforms;
use crate::error::{Result, TextureError};

/// Rectangle view into a decoded pixel buffer shared with the sheet it came from.
#[derive(Debug, Clone)]
pub struct HeadlessImage {
    pub source: Arc<Path>,
    pixels: Arc<RgbaImage>,
    /// Region of `pixels` this handle covers, in buffer coordinates.
    pub region: Frame,
}

impl HeadlessImage {
    /// Pixel at `(x, y)` relative to this view's top-left corner.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        if x >= self.region.width() || y >= self.region.height() {
            return None;
        }
        let bx = self.region.x0 as u32 + x;
        let by = self.region.y0 as u32 + y;
        Some(*self.pixels.get_pixel(bx, by))
    }

    /// True when both views share one decoded buffer.
    pub fn same_buffer(&self, other: &HeadlessImage) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}

impl ImageHandle for HeadlessImage {
    fn width(&self) -> u32 {
        self.region.width()
    }

    fn height(&self) -> u32 {
        self.region.height()
    }
}

#[derive(Debug, Clone)]
pub struct HeadlessShader {
    pub source: Arc<str>,
}

/// Asset loader for the headless path.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    /// Number of image files decoded so far.
    pub decoded: usize,
    /// Number of shaders accepted so far.
    pub compiled: usize,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextureBackend for HeadlessBackend {
    type Image = HeadlessImage;
    type Shader = HeadlessShader;

    fn decode_image(&mut self, path: &Path) -> Result<HeadlessImage> {
        let pixels = image::open(path)
            .map_err(|e| TextureError::Decode {
                path: PathBuf::from(path),
                reason: e.to_string(),
            })?
            .to_rgba8();
        let region = Frame::full(pixels.width(), pixels.height());
        self.decoded += 1;
        debug!("Decoded {:?} ({}x{})", path, region.width(), region.height());
        Ok(HeadlessImage {
            source: Arc::from(path),
            pixels: Arc::new(pixels),
            region,
        })
    }

    fn sub_image(&mut self, sheet: &HeadlessImage, frame: Frame) -> Result<HeadlessImage> {
        let region = frame.offset_by(&sheet.region).intersect(&sheet.region);
        Ok(HeadlessImage {
            source: Arc::clone(&sheet.source),
            pixels: Arc::clone(&sheet.pixels),
            region,
        })
    }

    fn compile_shader(&mut self, source: &str) -> Result<HeadlessShader> {
        if !source.contains("main") {
            return Err(TextureError::ShaderCompile(
                "no entry point `main` in shader source".to_string(),
            ));
        }
        let opened = source.matches('{').count();
        let closed = source.matches('}').count();
        if opened != closed {
            return Err(TextureError::ShaderCompile(format!(
                "unbalanced braces ({} opening, {} closing)",
                opened, closed
            )));
        }
        self.compiled += 1;
        Ok(HeadlessShader {
            source: Arc::from(source),
        })
    }
}

/// One recorded `draw_shaded_rect` call.
#[derive(Debug, Clone)]
pub struct DrawCall {
    pub width: u32,
    pub height: u32,
    pub shader: Arc<str>,
    /// Buffer regions of the bound images, in binding order.
    pub regions: SmallVec<[Frame; 2]>,
    pub uniforms: Uniforms,
    pub transform: Transform2D,
}

/// Draw target that records calls instead of rasterizing them.
#[derive(Debug, Default)]
pub struct RecordingTarget {
    pub calls: Vec<DrawCall>,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&DrawCall> {
        self.calls.last()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl DrawTarget<HeadlessBackend> for RecordingTarget {
    fn draw_shaded_rect(
        &mut self,
        width: u32,
        height: u32,
        shader: &HeadlessShader,
        images: &[&HeadlessImage],
        uniforms: &Uniforms,
        transform: &Transform2D,
    ) {
        self.calls.push(DrawCall {
            width,
            height,
            shader: Arc::clone(&shader.source),
            regions: images.iter().map(|i| i.region).collect(),
            uniforms: uniforms.clone(),
            transform: *transform,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::DEFAULT_SHADER;

    #[test]
    fn test_default_shader_compiles() {
        let mut backend = HeadlessBackend::new();
        let shader = backend.compile_shader(DEFAULT_SHADER).unwrap();
        assert_eq!(&*shader.source, DEFAULT_SHADER);
        assert_eq!(backend.compiled, 1);
    }

    #[test]
    fn test_shader_without_main_is_rejected() {
        let mut backend = HeadlessBackend::new();
        let err = backend.compile_shader("uniform float uTime;").unwrap_err();
        assert!(matches!(err, TextureError::ShaderCompile(_)));
        assert_eq!(backend.compiled, 0);
    }

    #[test]
    fn test_shader_with_unbalanced_braces_is_rejected() {
        let mut backend = HeadlessBackend::new();
        assert!(backend.compile_shader("void main() {").is_err());
    }

    #[test]
    fn test_decode_missing_file_fails() {
        let mut backend = HeadlessBackend::new();
        let err = backend
            .decode_image(Path::new("/definitely/not/here/sheet.png"))
            .unwrap_err();
        assert!(matches!(err, TextureError::Decode { .. }));
    }
}
