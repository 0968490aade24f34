//! Keyframe animation, scene-graph transforms and linear blend skinning.
//!
//! A [`Scene`] is stepped once per frame: [`Scene::tick`] advances the clock,
//! writes every animated node's local transform, propagates world matrices
//! and refreshes skin bone matrices, in that order. [`Scene::render`] then
//! hands one [`render::DrawCall`] per renderable to a [`render::RenderSink`].

pub mod animation;
pub mod config;
pub mod controls;
pub mod debug;
pub mod error;
pub mod mesh;
pub mod procedural;
pub mod render;
pub mod renderable;
pub mod scene;
pub mod skin;
pub mod transforms;

pub use scene::Scene;
