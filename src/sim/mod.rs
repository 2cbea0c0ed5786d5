//! Deterministic simulation module
//!
//! All motion logic lives here. This module must be pure and deterministic:
//! - Integer pixel coordinates only
//! - Stable iteration order (layer stack order is z-order)
//! - No display I/O or platform dependencies

pub mod scene;
pub mod shape;
pub mod tick;

pub use scene::{Layer, MotionBinding, Scene};
pub use shape::{Region, Shape};
pub use tick::{advance, paddle_velocity, tick};
