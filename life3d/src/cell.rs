//! Cell classification.
//!
//! The engine never stores its own cell enum. A cell's state is derived from
//! whatever value the backing store holds, through a [`Classifier`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// State of a cell as seen by the automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    /// Alive, counted as a neighbor.
    Live,
    /// Part of the game but currently empty. Can be born into [`CellState::Live`].
    Dead,
    /// Outside the game. Never written by the engine.
    Inert,
}

/// Maps stored values to [`CellState`], and provides the values the engine
/// writes when a cell is born or dies.
///
/// `is_live` and `is_dead` must never both return `true` for the same value.
pub trait Classifier<V> {
    fn is_live(&self, value: &V) -> bool;

    fn is_dead(&self, value: &V) -> bool;

    /// Value written when a cell becomes live.
    fn live(&self) -> V;

    /// Value written when a cell dies.
    fn dead(&self) -> V;

    #[inline]
    fn classify(&self, value: &V) -> CellState {
        if self.is_live(value) {
            CellState::Live
        } else if self.is_dead(value) {
            CellState::Dead
        } else {
            CellState::Inert
        }
    }
}

/// Classifier comparing against fixed marker values.
///
/// Any value equal to `live` is live, any value equal to one of `vacuum` is
/// dead, everything else is inert. The first vacuum marker is the one written
/// when a cell dies.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerClassifier<V> {
    live: V,
    vacuum: Vec<V>,
}

impl<V: Clone + PartialEq> MarkerClassifier<V> {
    /// Create a classifier with a single vacuum marker.
    pub fn new(live: V, dead: V) -> Self {
        Self {
            live,
            vacuum: vec![dead],
        }
    }

    /// Create a classifier recognizing several vacuum encodings.
    ///
    /// Returns `None` if `vacuum` is empty, or if it contains the live marker.
    pub fn with_vacuum(live: V, vacuum: impl IntoIterator<Item = V>) -> Option<Self> {
        let vacuum: Vec<V> = vacuum.into_iter().collect();
        if vacuum.is_empty() || vacuum.contains(&live) {
            return None;
        }
        Some(Self { live, vacuum })
    }

    pub fn vacuum(&self) -> &[V] {
        &self.vacuum
    }
}

impl<V: Clone + PartialEq> Classifier<V> for MarkerClassifier<V> {
    #[inline]
    fn is_live(&self, value: &V) -> bool {
        *value == self.live
    }

    #[inline]
    fn is_dead(&self, value: &V) -> bool {
        self.vacuum.contains(value)
    }

    fn live(&self) -> V {
        self.live.clone()
    }

    fn dead(&self) -> V {
        self.vacuum[0].clone()
    }
}

/// Ready-made cell encoding for in-memory worlds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Voxel {
    /// Ordinary empty space.
    #[default]
    Empty,
    /// Empty space of a different kind (e.g. cave interior). Dead like `Empty`.
    Void,
    Alive,
    /// Solid material, identified by an arbitrary id.
    Solid(u16),
}

impl Voxel {
    /// Classifier with `Alive` as the live marker and both `Empty` and `Void`
    /// as vacuum.
    pub fn classifier() -> MarkerClassifier<Voxel> {
        MarkerClassifier {
            live: Voxel::Alive,
            vacuum: vec![Voxel::Empty, Voxel::Void],
        }
    }
}
