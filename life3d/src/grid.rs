use glam::{IVec3, UVec3};
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Bounds, CellState, CellStore, Classifier, GridError, RuleSet};

/// Which of the 26 surrounding cells count as neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Neighborhood {
    /// All 26 cells of the 3x3x3 block around the cell. `max_adjacent_dims` is
    /// ignored.
    #[default]
    Moore,
    /// Cells offset along at most `max_adjacent_dims` axes: 1 gives the 6 face
    /// neighbors, 2 adds the 12 edge neighbors, 3 adds the 8 corners.
    AdjacentDims,
}

/// How neighbors outside the grid box are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Boundary {
    /// Read them from the store like any other cell. The box only limits which
    /// cells are evaluated.
    #[default]
    Unclipped,
    /// Treat them as dead without reading the store.
    Clipped,
}

/// Summary of one [`AutomatonGrid::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Generation {
    /// Number of steps completed, including this one.
    pub index: u64,
    /// Dead cells that became live.
    pub births: usize,
    /// Live cells that died.
    pub deaths: usize,
}

impl Generation {
    /// Number of cells that changed state.
    pub fn changes(&self) -> usize {
        self.births + self.deaths
    }
}

/// A 3D life-like automaton running over a box of an external [`CellStore`].
///
/// Positions taken by the methods here are local to the box: `(0, 0, 0)` is
/// the minimum corner. Neighbor lookups may go one cell outside it.
pub struct AutomatonGrid<S: CellStore, C> {
    store: S,
    classifier: C,
    bounds: Bounds,
    size: UVec3,
    rules: RuleSet,
    neighborhood: Neighborhood,
    boundary: Boundary,
    /// Next state of every cell, x fastest. Reused across steps.
    next: Vec<S::Value>,
    generation: u64,
}

impl<S: CellStore, C: Classifier<S::Value>> AutomatonGrid<S, C> {
    /// Create a grid over `bounds`.
    ///
    /// Fails if `bounds` is inverted on any axis, or sits against the `i32`
    /// coordinate limits so that its neighbors one cell out can't be addressed.
    pub fn new(store: S, classifier: C, bounds: Bounds, rules: RuleSet) -> Result<Self, GridError> {
        let size = bounds.size()?;
        bounds.expand(1)?;
        let capacity = size.x as usize * size.y as usize * size.z as usize;
        Ok(Self {
            store,
            classifier,
            bounds,
            size,
            rules,
            neighborhood: Neighborhood::default(),
            boundary: Boundary::default(),
            next: Vec::with_capacity(capacity),
            generation: 0,
        })
    }

    pub fn with_neighborhood(mut self, neighborhood: Neighborhood) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn rules_mut(&mut self) -> &mut RuleSet {
        &mut self.rules
    }

    /// Replace the rules. Applies from the next step.
    pub fn set_rules(&mut self, rules: RuleSet) {
        self.rules = rules;
    }

    pub fn neighborhood(&self) -> Neighborhood {
        self.neighborhood
    }

    pub fn set_neighborhood(&mut self, neighborhood: Neighborhood) {
        self.neighborhood = neighborhood;
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    pub fn set_boundary(&mut self, boundary: Boundary) {
        self.boundary = boundary;
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn size(&self) -> UVec3 {
        self.size
    }

    /// Number of steps completed so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    #[inline]
    fn in_box(&self, local: IVec3) -> bool {
        local.cmpge(IVec3::ZERO).all() && local.cmplt(self.size.as_ivec3()).all()
    }

    /// Current value at a box-local position.
    #[inline]
    pub fn value(&self, local: IVec3) -> Result<S::Value, S::Error> {
        self.store.read(self.bounds.to_world(local))
    }

    #[inline]
    pub fn state(&self, local: IVec3) -> Result<CellState, S::Error> {
        Ok(self.classifier.classify(&self.value(local)?))
    }

    #[inline]
    pub fn is_live(&self, local: IVec3) -> Result<bool, S::Error> {
        Ok(self.classifier.is_live(&self.value(local)?))
    }

    #[inline]
    pub fn is_dead(&self, local: IVec3) -> Result<bool, S::Error> {
        Ok(self.classifier.is_dead(&self.value(local)?))
    }

    /// Count live neighbors of a cell, as seen by the current neighborhood and
    /// boundary settings.
    pub fn count_neighbors(&self, local: IVec3) -> Result<i32, S::Error> {
        let max_dims = match self.neighborhood {
            Neighborhood::Moore => 3,
            Neighborhood::AdjacentDims => self.rules.max_adjacent_dims,
        };
        let clip = self.boundary == Boundary::Clipped;

        let mut count = 0;
        let mut offset = IVec3::ZERO;
        for dz in -1..=1 {
            offset.z = dz;
            for dy in -1..=1 {
                offset.y = dy;
                for dx in -1..=1 {
                    offset.x = dx;
                    if offset == IVec3::ZERO {
                        continue;
                    }
                    // Number of axes along which the neighbor is offset
                    if offset.abs().element_sum() > max_dims {
                        continue;
                    }
                    let pos = local + offset;
                    if clip && !self.in_box(pos) {
                        continue;
                    }
                    if self.is_live(pos)? {
                        count += 1;
                    }
                }
            }
        }
        Ok(count)
    }

    /// Advance the automaton by one generation.
    ///
    /// Every next state is computed from the store as it was before the call,
    /// then written back, touching only cells whose value changes. Inert cells
    /// are never written.
    ///
    /// A store error aborts the step. If it happens while computing, nothing
    /// has been written yet; if it happens while writing back, the store is
    /// left partially updated and the generation counter is not advanced.
    pub fn step(&mut self) -> Result<Generation, S::Error> {
        #[cfg(feature = "trace")]
        let _span = tracing::info_span!("step", generation = self.generation).entered();

        let mut births = 0;
        let mut deaths = 0;

        // Compute next state from the current one, without touching the store
        self.next.clear();
        for k in 0..self.size.z as i32 {
            for j in 0..self.size.y as i32 {
                for i in 0..self.size.x as i32 {
                    let local = IVec3::new(i, j, k);
                    let value = self.value(local)?;
                    let next = match self.classifier.classify(&value) {
                        // Not part of the game
                        CellState::Inert => value,
                        CellState::Live => {
                            let c = self.count_neighbors(local)?;
                            if self.rules.dies(c) {
                                deaths += 1;
                                self.classifier.dead()
                            } else {
                                value
                            }
                        }
                        CellState::Dead => {
                            let c = self.count_neighbors(local)?;
                            if self.rules.is_born(c) {
                                births += 1;
                                self.classifier.live()
                            } else {
                                value
                            }
                        }
                    };
                    self.next.push(next);
                }
            }
        }

        // Commit
        let mut index = 0;
        for k in 0..self.size.z as i32 {
            for j in 0..self.size.y as i32 {
                for i in 0..self.size.x as i32 {
                    let pos = self.bounds.to_world(IVec3::new(i, j, k));
                    let soon = &self.next[index];
                    index += 1;
                    if self.store.read(pos)? != *soon {
                        self.store.write(pos, soon.clone())?;
                    }
                }
            }
        }

        self.generation += 1;
        let generation = Generation {
            index: self.generation,
            births,
            deaths,
        };

        #[cfg(feature = "trace")]
        tracing::debug!(
            generation = generation.index,
            births = generation.births,
            deaths = generation.deaths,
            "step"
        );

        Ok(generation)
    }

    /// Randomize the box. Each non-inert cell becomes live with probability
    /// `density`, dead otherwise.
    ///
    /// `density <= 0` kills every cell and `density >= 1` makes every cell
    /// live. A cell is written only if its stored value differs from the drawn
    /// one, so a dead cell held in another vacuum encoding is rewritten to
    /// [`Classifier::dead`]. Returns the number of cells written.
    ///
    /// A store error stops the fill; cells visited before it keep their new
    /// values.
    pub fn shuffle(&mut self, density: f64, mut prng: impl Rng) -> Result<usize, S::Error> {
        #[cfg(feature = "trace")]
        let _span = tracing::info_span!("shuffle", density).entered();

        let mut writes = 0;
        for k in 0..self.size.z as i32 {
            for j in 0..self.size.y as i32 {
                for i in 0..self.size.x as i32 {
                    let pos = self.bounds.to_world(IVec3::new(i, j, k));
                    let value = self.store.read(pos)?;
                    if self.classifier.classify(&value) == CellState::Inert {
                        continue;
                    }
                    let p: f64 = prng.gen_range(0.0..1.0);
                    let target = if p < density {
                        self.classifier.live()
                    } else {
                        self.classifier.dead()
                    };
                    if value != target {
                        self.store.write(pos, target)?;
                        writes += 1;
                    }
                }
            }
        }

        #[cfg(feature = "trace")]
        tracing::debug!(writes, "shuffle");

        Ok(writes)
    }

    /// Number of live cells in the box.
    pub fn population(&self) -> Result<usize, S::Error> {
        let mut count = 0;
        for k in 0..self.size.z as i32 {
            for j in 0..self.size.y as i32 {
                for i in 0..self.size.x as i32 {
                    if self.is_live(IVec3::new(i, j, k))? {
                        count += 1;
                    }
                }
            }
        }
        Ok(count)
    }
}
