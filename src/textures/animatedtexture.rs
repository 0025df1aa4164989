//! Sprite-sheet texture with manifest-driven clips.
//!
//! On load the sheet is decoded once and every `[x0, y0, x1, y1]` entry of the
//! manifest becomes a sub-image handle of that sheet. `tick` advances only the
//! active clip; other clips keep their cursor where they left it.

use std::cell::Cell;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::backend::{DrawTarget, ImageHandle, TextureBackend, shader_source_or_default};
use crate::components::animation::AnimationClip;
use crate::components::transform::Transform2D;
use crate::components::uniforms::Uniforms;
use crate::error::{Result, TextureError};
use crate::resources::manifest::{AnimationManifest, ManifestPathStrategy};
use crate::textures::Renderable;

pub struct AnimatedTexture<B: TextureBackend> {
    path: PathBuf,
    manifest_path: PathBuf,
    sheet: B::Image,
    clips: Vec<AnimationClip<B::Image>>,
    active_clip: usize,
    shader: B::Shader,
    uniforms: Uniforms,
    /// Set after the first "nothing to draw" warning so it is not repeated every frame.
    warned_empty: Cell<bool>,
}

/// Slice `sheet` into one clip per manifest entry, all starting at frame 0.
fn build_clips<B: TextureBackend>(
    backend: &mut B,
    sheet: &B::Image,
    manifest: &AnimationManifest,
) -> Result<Vec<AnimationClip<B::Image>>> {
    let mut clips = Vec::with_capacity(manifest.clip_count());
    for index in 0..manifest.clip_count() {
        let mut clip = AnimationClip::new(manifest.speed);
        for rect in manifest.clip_frames(index) {
            let image = backend.sub_image(sheet, rect)?;
            clip.push_frame(rect, image);
        }
        debug!("Clip {}: {} frames, speed {}", index, clip.len(), clip.speed);
        clips.push(clip);
    }
    Ok(clips)
}

impl<B: TextureBackend> AnimatedTexture<B> {
    /// Load with the default (literal substring) manifest path derivation.
    pub fn load(backend: &mut B, path: impl AsRef<Path>, shader_source: Option<&str>) -> Result<Self> {
        Self::load_with_strategy(backend, path, shader_source, ManifestPathStrategy::default())
    }

    /// Decode the sheet, read its manifest and compile the shader.
    ///
    /// A missing or malformed manifest is not an error: the texture simply has
    /// no clips and draws nothing.
    pub fn load_with_strategy(
        backend: &mut B,
        path: impl AsRef<Path>,
        shader_source: Option<&str>,
        strategy: ManifestPathStrategy,
    ) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let sheet = backend.decode_image(&path)?;
        let manifest_path = strategy.manifest_path(&path);
        let manifest = AnimationManifest::load(&manifest_path);
        let clips = build_clips(backend, &sheet, &manifest)?;
        let shader = backend.compile_shader(shader_source_or_default(shader_source))?;
        info!(
            "Loaded animated texture {:?} ({}x{}, {} clips from {:?})",
            path,
            sheet.width(),
            sheet.height(),
            clips.len(),
            manifest_path
        );
        Ok(Self {
            path,
            manifest_path,
            sheet,
            clips,
            active_clip: 0,
            shader,
            uniforms: Uniforms::default(),
            warned_empty: Cell::new(false),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// The whole decoded sprite sheet.
    pub fn sheet(&self) -> &B::Image {
        &self.sheet
    }

    pub fn clip_count(&self) -> usize {
        self.clips.len()
    }

    pub fn clip(&self, index: usize) -> Option<&AnimationClip<B::Image>> {
        self.clips.get(index)
    }

    pub fn clip_mut(&mut self, index: usize) -> Option<&mut AnimationClip<B::Image>> {
        self.clips.get_mut(index)
    }

    pub fn clips(&self) -> &[AnimationClip<B::Image>] {
        &self.clips
    }

    pub fn active_clip_index(&self) -> usize {
        self.active_clip
    }

    pub fn active_clip(&self) -> Option<&AnimationClip<B::Image>> {
        self.clips.get(self.active_clip)
    }

    /// Select the clip that `tick` and `draw` operate on.
    ///
    /// The selected clip resumes from its own cursor; nothing is rewound.
    pub fn set_active_clip(&mut self, index: usize) -> Result<()> {
        if index >= self.clips.len() {
            return Err(TextureError::ClipOutOfRange {
                index,
                count: self.clips.len(),
            });
        }
        self.active_clip = index;
        Ok(())
    }

    pub fn uniforms(&self) -> &Uniforms {
        &self.uniforms
    }

    fn warn_nothing_to_draw(&self) {
        if !self.warned_empty.replace(true) {
            warn!(
                "Animated texture {:?} has no frame to draw (clip {} of {})",
                self.path,
                self.active_clip,
                self.clips.len()
            );
        }
    }
}

impl<B: TextureBackend> Renderable<B> for AnimatedTexture<B> {
    fn draw(&self, target: &mut dyn DrawTarget<B>, transform: &Transform2D) {
        let Some(frame) = self.current_frame() else {
            self.warn_nothing_to_draw();
            return;
        };
        target.draw_shaded_rect(
            frame.width(),
            frame.height(),
            &self.shader,
            &[frame],
            &self.uniforms,
            transform,
        );
    }

    fn tick(&mut self) {
        if let Some(clip) = self.clips.get_mut(self.active_clip) {
            clip.tick();
        }
    }

    fn current_frame(&self) -> Option<&B::Image> {
        self.active_clip()
            .and_then(|clip| clip.current())
            .map(|frame| &frame.image)
    }

    /// Rebuild sheet and clips from disk, keeping each clip's playback position.
    ///
    /// Clips are paired with the previous ones by index. A clip with no
    /// predecessor starts fresh; a carried frame index that no longer fits
    /// wraps to 0. The active clip is clamped into the new clip range.
    fn reload(&mut self, backend: &mut B) -> Result<()> {
        let sheet = backend.decode_image(&self.path)?;
        let manifest = AnimationManifest::load(&self.manifest_path);
        let mut clips = build_clips(backend, &sheet, &manifest)?;
        for (fresh, old) in clips.iter_mut().zip(self.clips.iter()) {
            fresh.restore(old.playback());
        }
        if clips.len() != self.clips.len() {
            warn!(
                "Reload of {:?} changed clip count {} -> {}",
                self.path,
                self.clips.len(),
                clips.len()
            );
        }
        self.sheet = sheet;
        self.clips = clips;
        self.active_clip = self.active_clip.min(self.clips.len().saturating_sub(1));
        self.warned_empty.set(false);
        info!("Reloaded animated texture {:?}", self.path);
        Ok(())
    }

    fn set_uniforms(&mut self, uniforms: Uniforms) {
        self.uniforms = uniforms;
    }
}
