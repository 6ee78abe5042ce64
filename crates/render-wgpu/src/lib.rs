//! wgpu render backend for the battlefield.
//!
//! Draws the submitted scene with two instanced meshes: a unit cube for land,
//! water and plateaus, and an upright two-sided quad for characters.
//!
//! # Invariants
//! - The renderer never mutates battle state.
//! - Everything drawn comes through [`skirmish_render::submit_scene`].

mod gpu;
mod mesh;
mod shaders;

pub use gpu::{InstanceBatch, WgpuRenderer};
pub use mesh::{CHARACTER_HEIGHT, CHARACTER_WIDTH, mesh_color};
