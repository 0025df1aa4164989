use bevy_ecs::prelude::*;

use crate::backend::{DrawTarget, TextureBackend};
use crate::resources::scene::Scene;

/// We render inside the backend's drawing scope and read the scene from the
/// ECS World. Entries are drawn in insertion order with their own transform.
pub fn render_scene<B: TextureBackend>(world: &mut World, target: &mut dyn DrawTarget<B>) {
    if let Some(scene) = world.get_non_send_resource::<Scene<B>>() {
        scene.draw_all(target);
    }
}
