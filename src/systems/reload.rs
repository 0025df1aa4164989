//! Explicit scene reload.
//!
//! Nothing calls this on its own; the owner decides when assets should be
//! re-read from disk.

use bevy_ecs::prelude::*;

use crate::backend::TextureBackend;
use crate::error::Result;
use crate::resources::scene::Scene;

/// Reload every texture of the scene, keeping animation progress.
///
/// Returns the first fatal error. A world without a scene is a no-op.
pub fn reload_scene<B: TextureBackend>(world: &mut World, backend: &mut B) -> Result<()> {
    match world.get_non_send_resource_mut::<Scene<B>>() {
        Some(mut scene) => scene.reload_all(backend),
        None => Ok(()),
    }
}
