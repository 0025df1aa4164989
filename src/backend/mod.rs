//! Graphics backend seam.
//!
//! Textures never talk to a graphics library directly. Loading goes through a
//! [`TextureBackend`] (decode, slice, compile) and drawing through a
//! [`DrawTarget`] (one shaded-rectangle primitive). Two implementations ship:
//!
//! - [`headless`] – decodes with the `image` crate, records draw calls
//! - `raylib_backend` – uploads to GPU textures and draws with raylib (feature `raylib`)

use std::path::Path;

use crate::components::frame::Frame;
use crate::components::transform::Transform2D;
use crate::components::uniforms::Uniforms;
use crate::error::Result;

pub mod headless;
#[cfg(feature = "raylib")]
pub mod raylib_backend;

/// Identity fragment shader: samples `texture0` and writes the colour unchanged.
pub const DEFAULT_SHADER: &str = r#"#version 330

in vec2 fragTexCoord;
in vec4 fragColor;

uniform sampler2D texture0;

out vec4 finalColor;

void main()
{
    finalColor = texture(texture0, fragTexCoord);
}
"#;

/// Pick the shader source to compile: the caller's, or [`DEFAULT_SHADER`]
/// when none (or only whitespace) was given.
pub fn shader_source_or_default(source: Option<&str>) -> &str {
    match source {
        Some(s) if !s.trim().is_empty() => s,
        _ => DEFAULT_SHADER,
    }
}

/// Size query shared by every backend image handle.
pub trait ImageHandle {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
}

/// Asset side of a graphics backend.
pub trait TextureBackend: 'static {
    type Image: ImageHandle + 'static;
    type Shader: 'static;

    /// Decode the image file at `path`.
    fn decode_image(&mut self, path: &Path) -> Result<Self::Image>;

    /// Produce an independent handle for `frame` inside `sheet`.
    ///
    /// The rectangle is clipped to the sheet bounds; a rectangle outside the
    /// sheet yields an empty image.
    fn sub_image(&mut self, sheet: &Self::Image, frame: Frame) -> Result<Self::Image>;

    /// Compile a fragment shader.
    fn compile_shader(&mut self, source: &str) -> Result<Self::Shader>;
}

/// Drawing side of a graphics backend.
pub trait DrawTarget<B: TextureBackend + ?Sized> {
    /// Draw a `width` x `height` rectangle sampling `images` through `shader`.
    fn draw_shaded_rect(
        &mut self,
        width: u32,
        height: u32,
        shader: &B::Shader,
        images: &[&B::Image],
        uniforms: &Uniforms,
        transform: &Transform2D,
    );
}
