#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{AutomatonGrid, Boundary, Bounds, CellStore, Classifier, GridError, Neighborhood, RuleSet};

/// Everything needed to set up a grid, apart from the store and classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridConfig {
    pub bounds: Bounds,
    pub rules: RuleSet,
    #[cfg_attr(feature = "serde", serde(default))]
    pub neighborhood: Neighborhood,
    #[cfg_attr(feature = "serde", serde(default))]
    pub boundary: Boundary,
}

impl GridConfig {
    pub fn new(bounds: Bounds, rules: RuleSet) -> Self {
        Self {
            bounds,
            rules,
            neighborhood: Neighborhood::default(),
            boundary: Boundary::default(),
        }
    }

    pub fn build<S, C>(&self, store: S, classifier: C) -> Result<AutomatonGrid<S, C>, GridError>
    where
        S: CellStore,
        C: Classifier<S::Value>,
    {
        Ok(AutomatonGrid::new(store, classifier, self.bounds, self.rules)?
            .with_neighborhood(self.neighborhood)
            .with_boundary(self.boundary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Voxel, VoxelWorld};

    #[test]
    fn build() {
        let mut config = GridConfig::new(Bounds::new(0, 3, 0, 2, 0, 1), RuleSet::classic());
        config.boundary = Boundary::Clipped;
        config.neighborhood = Neighborhood::AdjacentDims;

        let world = VoxelWorld::new(config.bounds, Voxel::Empty).unwrap();
        let grid = config.build(world, Voxel::classifier()).unwrap();
        assert_eq!(grid.size(), glam::UVec3::new(4, 3, 2));
        assert_eq!(grid.boundary(), Boundary::Clipped);
        assert_eq!(grid.neighborhood(), Neighborhood::AdjacentDims);
        assert_eq!(*grid.rules(), RuleSet::classic());
    }

    #[test]
    fn build_inverted() {
        let config = GridConfig::new(Bounds::new(0, 0, 0, 0, 1, 0), RuleSet::classic());
        let world = VoxelWorld::new(Bounds::new(0, 0, 0, 0, 0, 0), Voxel::Empty).unwrap();
        assert!(config.build(world, Voxel::classifier()).is_err());
    }
}
