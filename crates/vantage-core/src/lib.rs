//! Vantage Core - Core types and utilities for the Vantage camera
//!
//! This crate provides the foundational types shared by the camera and its collaborators:
//! - Mathematical primitives (re-exported from glam)
//! - Transform and screen-space rectangle types
//! - The geometry query capability the camera consumes
//! - Clamped-lerp smoothing helpers

pub mod query;
pub mod smoothing;
pub mod types;

pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
pub use query::{EmptyGeometry, GeometryQuery, HitBuffer, QueryHit, MAX_QUERY_HITS};
pub use types::{EntityId, ScreenRect, Transform};
