//! Aberred textures library.
//!
//! Static and sprite-sheet animated textures behind one [`textures::Renderable`]
//! contract, a graphics backend seam with raylib and headless implementations,
//! and the ECS resources and systems that tick and draw them.

pub mod backend;
pub mod components;
pub mod error;
pub mod resources;
pub mod systems;
pub mod textures;
