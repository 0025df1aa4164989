//! Engine systems.
//!
//! This module groups the ECS systems and passes that advance simulation and
//! draw the scene.
//!
//! Submodules overview
//! - [`animation`] – advance every scene texture once per fixed step
//! - [`reload`] – re-read scene textures from disk on request
//! - [`render`] – draw the scene through a backend draw target
//! - [`time`] – update simulation time and compute due fixed steps

pub mod animation;
pub mod reload;
pub mod render;
pub mod time;
