//! Rendering adapter: renderer-agnostic scene submission.
//!
//! # Invariants
//! - Renderers never mutate battle state.
//! - Everything drawn derives from the battle and the view parameters.
//!
//! Backends implement [`DrawSink`] (per-object) or [`Renderer`] (per-frame);
//! [`DebugTextRenderer`] is the headless one.

mod renderer;
mod scene;
mod view;

pub use renderer::{DebugTextRenderer, Renderer};
pub use scene::{
    CHARACTER_SCALE, DrawSink, MeshKind, character_transform, facing_angle, land_transform,
    submit_scene, water_transform,
};
pub use view::{FIELD_OF_VIEW, Projection, ViewParams};
