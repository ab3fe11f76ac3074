use glam::{IVec3, UVec3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::GridError;

/// Inclusive axis-aligned box of world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    pub min: IVec3,
    pub max: IVec3,
}

impl Bounds {
    /// Build from per-axis ranges, in `x_min, x_max, y_min, y_max, z_min, z_max` order.
    pub const fn new(x_min: i32, x_max: i32, y_min: i32, y_max: i32, z_min: i32, z_max: i32) -> Self {
        Self {
            min: IVec3::new(x_min, y_min, z_min),
            max: IVec3::new(x_max, y_max, z_max),
        }
    }

    /// Number of cells along each axis.
    ///
    /// Fails if `max < min` on any axis, or if an axis is longer than
    /// `i32::MAX` cells.
    pub fn size(&self) -> Result<UVec3, GridError> {
        for axis in 0..3 {
            if self.max[axis] < self.min[axis] {
                return Err(GridError::InvertedBounds {
                    axis: ['x', 'y', 'z'][axis],
                    min: self.min[axis],
                    max: self.max[axis],
                });
            }
        }
        // Computed in i64 so boxes spanning the whole i32 range don't overflow.
        let len = |axis: usize| self.max[axis] as i64 - self.min[axis] as i64 + 1;
        let size = [len(0), len(1), len(2)];
        // Box-local coordinates are i32.
        if size.iter().any(|&l| l > i32::MAX as i64)
            || size.iter().try_fold(1usize, |acc, &l| acc.checked_mul(l as usize)).is_none()
        {
            return Err(GridError::TooLarge);
        }
        Ok(UVec3::new(size[0] as u32, size[1] as u32, size[2] as u32))
    }

    /// Grow by `margin` cells on every side.
    ///
    /// Fails if the grown box does not fit in `i32` coordinates.
    pub fn expand(&self, margin: i32) -> Result<Self, GridError> {
        let mut out = *self;
        for axis in 0..3 {
            let min = self.min[axis].checked_sub(margin);
            let max = self.max[axis].checked_add(margin);
            match (min, max) {
                (Some(min), Some(max)) => {
                    out.min[axis] = min;
                    out.max[axis] = max;
                }
                _ => return Err(GridError::NoMargin { axis: ['x', 'y', 'z'][axis] }),
            }
        }
        Ok(out)
    }

    #[inline]
    pub fn contains(&self, pos: IVec3) -> bool {
        pos.cmpge(self.min).all() && pos.cmple(self.max).all()
    }

    /// Translate a box-local position into world coordinates.
    #[inline]
    pub fn to_world(&self, local: IVec3) -> IVec3 {
        self.min + local
    }
}
