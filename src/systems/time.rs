//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame, applying `time_scale` to the provided delta, and
//! turns the scaled delta into fixed simulation steps.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::{FixedStep, WorldTime};

/// Update elapsed and delta seconds on the `WorldTime` resource.
///
/// `dt` is expected to be the unscaled frame delta in seconds. The function
/// applies the current `time_scale`, writes both `elapsed` and `delta`, and
/// returns the number of fixed steps the caller should run this frame (0 when
/// no [`FixedStep`] resource is present).
pub fn update_world_time(world: &mut World, dt: f32) -> u32 {
    let scaled_dt = {
        let mut wt = world.resource_mut::<WorldTime>();
        let scaled_dt = dt * wt.time_scale;
        wt.elapsed += scaled_dt;
        wt.delta = scaled_dt;
        scaled_dt
    };
    match world.get_resource_mut::<FixedStep>() {
        Some(mut fixed) => fixed.advance(scaled_dt),
        None => 0,
    }
}
