//! Plain data types shared by textures, backends and systems.
//!
//! Submodules overview:
//! - [`animation`] – clip frame list and the fixed-step playback cursor
//! - [`frame`] – integer sub-rectangle of a sprite sheet
//! - [`transform`] – position, pivot, rotation and scale used at draw time
//! - [`uniforms`] – shader uniform values and the swap-on-write uniform map

pub mod animation;
pub mod frame;
pub mod transform;
pub mod uniforms;
