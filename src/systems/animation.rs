//! Animation tick system.
//!
//! [`tick_scene`] runs once per fixed simulation step and advances every
//! texture in the [`Scene`](crate::resources::scene::Scene). Static textures
//! ignore the tick; animated textures step their active clip.
//!
//! # Related
//!
//! - [`crate::components::animation::AnimationClip`] – per-clip cursor
//! - [`crate::textures::animatedtexture::AnimatedTexture`] – owner of the clips

use bevy_ecs::prelude::*;

use crate::backend::TextureBackend;
use crate::resources::scene::Scene;
use crate::resources::worldtime::WorldTime;

/// Advance every scene texture by one step and count the step.
///
/// Contract
/// - Must be scheduled once per fixed step, never per rendered frame.
/// - Mutates the non-send [`Scene`] and bumps [`WorldTime::ticks`].
pub fn tick_scene<B: TextureBackend>(mut scene: NonSendMut<Scene<B>>, mut time: ResMut<WorldTime>) {
    scene.tick_all();
    time.ticks += 1;
}
