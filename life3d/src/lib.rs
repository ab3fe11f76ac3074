//! 3D life-like cellular automaton over an external cell store.
//!
//! An [`AutomatonGrid`] evaluates a box of cells with 26-neighbor
//! connectivity. Cells are read and written through a [`CellStore`], and
//! classified as live, dead or inert by a [`Classifier`]. Inert cells are not
//! part of the game and are never written.
//!
//! ```
//! use life3d::*;
//!
//! let bounds = Bounds::new(0, 2, 0, 2, 0, 2);
//! let mut world = VoxelWorld::enclosing(bounds, Voxel::Empty, Voxel::Solid(0)).unwrap();
//! *world.cell_mut(IVec3::ONE).unwrap() = Voxel::Alive;
//!
//! let rules = RuleSet::new(3, 999, 999, 0, 100);
//! let mut grid = AutomatonGrid::new(&mut world, Voxel::classifier(), bounds, rules).unwrap();
//! grid.step().unwrap();
//! assert_eq!(grid.population().unwrap(), 0);
//! ```

pub use glam::{IVec3, UVec3};

mod bounds;
mod cell;
mod config;
mod error;
mod grid;
mod rules;
mod store;
mod world;

pub use bounds::Bounds;
pub use cell::{CellState, Classifier, MarkerClassifier, Voxel};
pub use config::GridConfig;
pub use error::{GridError, WorldError};
pub use grid::{AutomatonGrid, Boundary, Generation, Neighborhood};
pub use rules::{ParseRuleError, RuleSet};
pub use store::CellStore;
pub use world::VoxelWorld;
