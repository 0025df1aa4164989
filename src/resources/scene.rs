//! Scene of renderable textures.
//!
//! Holds every texture the game loop drives, keyed by string IDs in insertion
//! order (which is also the draw order). Entries are boxed [`Renderable`]
//! values so static and animated textures sit in the same list.
//!
//! This is a `NonSend` resource: textures own backend handles (GPU textures,
//! shaders) that must stay on the thread that created them.

use log::{error, info};

use crate::backend::{DrawTarget, TextureBackend};
use crate::components::transform::Transform2D;
use crate::components::uniforms::Uniforms;
use crate::error::Result;
use crate::textures::Renderable;

/// A texture together with where it is drawn.
pub struct SceneEntry<B: TextureBackend> {
    pub key: String,
    pub texture: Box<dyn Renderable<B>>,
    pub transform: Transform2D,
}

pub struct Scene<B: TextureBackend> {
    entries: Vec<SceneEntry<B>>,
}

impl<B: TextureBackend> Scene<B> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds a texture under `key`.
    ///
    /// If an entry with the same key already exists, it will be replaced in place.
    pub fn add(
        &mut self,
        key: &str,
        texture: impl Renderable<B> + 'static,
        transform: Transform2D,
    ) {
        self.add_boxed(key, Box::new(texture), transform);
    }

    pub fn add_boxed(&mut self, key: &str, texture: Box<dyn Renderable<B>>, transform: Transform2D) {
        let entry = SceneEntry {
            key: key.to_string(),
            texture,
            transform,
        };
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, key: &str) -> Option<&SceneEntry<B>> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut SceneEntry<B>> {
        self.entries.iter_mut().find(|e| e.key == key)
    }

    pub fn remove(&mut self, key: &str) -> Option<SceneEntry<B>> {
        let index = self.entries.iter().position(|e| e.key == key)?;
        Some(self.entries.remove(index))
    }

    /// Replace the uniforms of one entry. Returns `false` if the key is unknown.
    pub fn set_uniforms(&mut self, key: &str, uniforms: Uniforms) -> bool {
        match self.get_mut(key) {
            Some(entry) => {
                entry.texture.set_uniforms(uniforms);
                true
            }
            None => false,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One simulation step for every entry.
    pub fn tick_all(&mut self) {
        for entry in self.entries.iter_mut() {
            entry.texture.tick();
        }
    }

    /// Draw every entry in insertion order.
    pub fn draw_all(&self, target: &mut dyn DrawTarget<B>) {
        for entry in self.entries.iter() {
            entry.texture.draw(target, &entry.transform);
        }
    }

    /// Reload every entry from disk, stopping at the first failure.
    pub fn reload_all(&mut self, backend: &mut B) -> Result<()> {
        for entry in self.entries.iter_mut() {
            if let Err(e) = entry.texture.reload(backend) {
                error!("Reload of '{}' failed: {}", entry.key, e);
                return Err(e);
            }
        }
        info!("Reloaded {} scene entries", self.entries.len());
        Ok(())
    }
}

impl<B: TextureBackend> Default for Scene<B> {
    fn default() -> Self {
        Self::new()
    }
}
