//! ECS resources made available to systems.
//!
//! Overview
//! - `gameconfig` – viewer settings loaded from `config.ini`
//! - `manifest` – sprite-sheet manifest parsing and manifest path derivation
//! - `scene` – ordered collection of renderable textures (non-send)
//! - `worldtime` – simulation time, tick count and the fixed-step accumulator
pub mod gameconfig;
pub mod manifest;
pub mod scene;
pub mod worldtime;
