//! Single-image texture.
//!
//! Draws the whole decoded image in one call; ticking does nothing.

use std::path::{Path, PathBuf};

use log::info;

use crate::backend::{DrawTarget, ImageHandle, TextureBackend, shader_source_or_default};
use crate::components::transform::Transform2D;
use crate::components::uniforms::Uniforms;
use crate::error::Result;
use crate::textures::Renderable;

/// A single image drawn through a shader.
pub struct StaticTexture<B: TextureBackend> {
    path: PathBuf,
    image: B::Image,
    shader: B::Shader,
    uniforms: Uniforms,
}

impl<B: TextureBackend> StaticTexture<B> {
    /// Decode `path` and compile `shader_source` (the identity shader when `None`).
    pub fn load(backend: &mut B, path: impl AsRef<Path>, shader_source: Option<&str>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let image = backend.decode_image(&path)?;
        let shader = backend.compile_shader(shader_source_or_default(shader_source))?;
        info!(
            "Loaded static texture {:?} ({}x{})",
            path,
            image.width(),
            image.height()
        );
        Ok(Self {
            path,
            image,
            shader,
            uniforms: Uniforms::default(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn image(&self) -> &B::Image {
        &self.image
    }

    pub fn uniforms(&self) -> &Uniforms {
        &self.uniforms
    }
}

impl<B: TextureBackend> Renderable<B> for StaticTexture<B> {
    fn draw(&self, target: &mut dyn DrawTarget<B>, transform: &Transform2D) {
        target.draw_shaded_rect(
            self.image.width(),
            self.image.height(),
            &self.shader,
            &[&self.image],
            &self.uniforms,
            transform,
        );
    }

    fn tick(&mut self) {}

    fn current_frame(&self) -> Option<&B::Image> {
        Some(&self.image)
    }

    fn reload(&mut self, backend: &mut B) -> Result<()> {
        self.image = backend.decode_image(&self.path)?;
        info!("Reloaded static texture {:?}", self.path);
        Ok(())
    }

    fn set_uniforms(&mut self, uniforms: Uniforms) {
        self.uniforms = uniforms;
    }
}
