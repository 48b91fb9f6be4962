//! glb2stl Core - Geometry primitives shared by the converter stages
//!
//! This crate provides the foundational types used throughout the converter:
//! - Vertex positions (re-exported from glam)
//! - Triangles as index triples into a vertex array
//! - Per-face normal computation
//! - Axis-aligned bounds for diagnostics

pub mod normal;
pub mod types;

pub use glam::Vec3;
pub use normal::face_normal;
pub use types::{Bounds, Triangle, Vertex};
