//! Drawable texture assets.
//!
//! Both asset kinds implement [`Renderable`], so a scene can hold them side by
//! side and drive them without knowing which is which:
//!
//! - [`statictexture::StaticTexture`] – one image, never changes on tick
//! - [`animatedtexture::AnimatedTexture`] – sprite sheet cut into clips by a JSON manifest
//!
//! # Frame loop
//!
//! 1. `tick()` once per simulation step
//! 2. `draw(target, transform)` once per render step
//!
//! Uniforms set with `set_uniforms` replace the previous map entirely and are
//! used from the next `draw` on.

use crate::backend::{DrawTarget, TextureBackend};
use crate::components::transform::Transform2D;
use crate::components::uniforms::Uniforms;
use crate::error::Result;

pub mod animatedtexture;
pub mod statictexture;

/// Shared drawing and update contract of every texture asset.
pub trait Renderable<B: TextureBackend> {
    /// Issue the draw for the current image, if there is one.
    fn draw(&self, target: &mut dyn DrawTarget<B>, transform: &Transform2D);

    /// Advance time-varying state by one simulation step.
    fn tick(&mut self);

    /// Image that the next `draw` would show.
    fn current_frame(&self) -> Option<&B::Image>;

    /// Re-read the asset from disk. Errors are the fatal tier: the caller is
    /// expected to stop, the texture itself keeps its previous data.
    fn reload(&mut self, backend: &mut B) -> Result<()>;

    /// Replace the whole uniform map.
    fn set_uniforms(&mut self, uniforms: Uniforms);
}
