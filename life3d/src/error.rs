//! Error types.

use glam::IVec3;
use thiserror::Error;

/// Errors building a grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// The box has `max < min` along an axis.
    #[error("inverted bounds on {axis} axis: min {min} > max {max}")]
    InvertedBounds { axis: char, min: i32, max: i32 },

    /// The box holds more cells than can be addressed.
    #[error("bounds too large to allocate a scratch buffer")]
    TooLarge,

    /// The box touches the edge of `i32` coordinates along an axis, leaving no
    /// room for the neighbors just outside it.
    #[error("no room for a one-cell margin on {axis} axis")]
    NoMargin { axis: char },
}

/// Errors from [`VoxelWorld`](crate::VoxelWorld) accesses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("position {0} is outside the world")]
    OutOfBounds(IVec3),
}
