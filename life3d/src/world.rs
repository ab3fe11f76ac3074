use glam::{IVec3, UVec3};

use crate::{Bounds, CellStore, GridError, WorldError};

/// Dense in-memory store of cell values over a box.
///
/// Stands in for an external world: tests and the command line run the
/// automaton on it directly.
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelWorld<V> {
    bounds: Bounds,
    size: UVec3,
    data: Vec<V>,
    writes: u64,
}

impl<V: Clone> VoxelWorld<V> {
    /// Create a world covering `bounds`, every cell set to `fill`.
    pub fn new(bounds: Bounds, fill: V) -> Result<Self, GridError> {
        let size = bounds.size()?;
        let capacity = size.x as usize * size.y as usize * size.z as usize;
        Ok(Self {
            bounds,
            size,
            data: vec![fill; capacity],
            writes: 0,
        })
    }

    /// Create a world one cell larger than `bounds` on every side.
    ///
    /// Cells inside `bounds` are set to `fill`, the one-cell margin around
    /// them to `border`. An automaton over `bounds` can then read all its
    /// neighbors without leaving the world.
    pub fn enclosing(bounds: Bounds, fill: V, border: V) -> Result<Self, GridError> {
        bounds.size()?;
        let mut world = Self::new(bounds.expand(1)?, border)?;
        for (pos, value) in world.iter_mut() {
            if bounds.contains(pos) {
                *value = fill.clone();
            }
        }
        Ok(world)
    }
}

impl<V> VoxelWorld<V> {
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn size(&self) -> UVec3 {
        self.size
    }

    #[inline]
    fn index(&self, pos: IVec3) -> Option<usize> {
        if !self.bounds.contains(pos) {
            return None;
        }
        let rel = (pos - self.bounds.min).as_uvec3();
        Some(
            rel.z as usize * self.size.y as usize * self.size.x as usize
                + rel.y as usize * self.size.x as usize
                + rel.x as usize,
        )
    }

    #[inline]
    fn position(&self, index: usize) -> IVec3 {
        let sx = self.size.x as usize;
        let sy = self.size.y as usize;
        let rel = IVec3::new(
            (index % sx) as i32,
            (index / sx % sy) as i32,
            (index / (sx * sy)) as i32,
        );
        self.bounds.min + rel
    }

    #[inline]
    pub fn cell(&self, pos: IVec3) -> Option<&V> {
        self.index(pos).map(|i| &self.data[i])
    }

    /// Mutable access to a cell. Does not count as a store write.
    #[inline]
    pub fn cell_mut(&mut self, pos: IVec3) -> Option<&mut V> {
        self.index(pos).map(|i| &mut self.data[i])
    }

    /// All cells with their world position, x fastest then y then z.
    pub fn iter(&self) -> impl Iterator<Item = (IVec3, &V)> {
        self.data
            .iter()
            .enumerate()
            .map(move |(i, v)| (self.position(i), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (IVec3, &mut V)> {
        let bounds = self.bounds;
        let sx = self.size.x as usize;
        let sy = self.size.y as usize;
        self.data.iter_mut().enumerate().map(move |(i, v)| {
            let rel = IVec3::new((i % sx) as i32, (i / sx % sy) as i32, (i / (sx * sy)) as i32);
            (bounds.min + rel, v)
        })
    }

    /// Number of calls to [`CellStore::write`] since creation or the last
    /// [`reset_writes`](Self::reset_writes).
    pub fn writes(&self) -> u64 {
        self.writes
    }

    pub fn reset_writes(&mut self) {
        self.writes = 0;
    }
}

impl<V: Clone + PartialEq> CellStore for VoxelWorld<V> {
    type Value = V;
    type Error = WorldError;

    #[inline]
    fn read(&self, pos: IVec3) -> Result<V, WorldError> {
        self.cell(pos).cloned().ok_or(WorldError::OutOfBounds(pos))
    }

    fn write(&mut self, pos: IVec3, value: V) -> Result<(), WorldError> {
        let cell = self.cell_mut(pos).ok_or(WorldError::OutOfBounds(pos))?;
        *cell = value;
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Voxel;

    #[test]
    fn enclosing_border() {
        let inner = Bounds::new(0, 2, 0, 2, 0, 2);
        let world = VoxelWorld::enclosing(inner, Voxel::Empty, Voxel::Solid(1)).unwrap();
        assert_eq!(world.size(), UVec3::splat(5));
        assert_eq!(world.bounds(), Bounds::new(-1, 3, -1, 3, -1, 3));
        for (pos, v) in world.iter() {
            if inner.contains(pos) {
                assert_eq!(*v, Voxel::Empty, "{pos}");
            } else {
                assert_eq!(*v, Voxel::Solid(1), "{pos}");
            }
        }
        assert_eq!(world.iter().filter(|(_, v)| **v == Voxel::Empty).count(), 27);
    }

    #[test]
    fn enclosing_needs_margin() {
        let edge = Bounds::new(0, 0, i32::MAX, i32::MAX, 0, 0);
        assert_eq!(
            VoxelWorld::enclosing(edge, 0u8, 1u8),
            Err(GridError::NoMargin { axis: 'y' })
        );
    }

    #[test]
    fn read_write() {
        let mut world = VoxelWorld::new(Bounds::new(-2, 1, 3, 5, 0, 0), 0u8).unwrap();
        let pos = IVec3::new(-2, 4, 0);
        world.write(pos, 7).unwrap();
        assert_eq!(world.read(pos), Ok(7));
        assert_eq!(world.writes(), 1);

        *world.cell_mut(IVec3::new(1, 5, 0)).unwrap() = 3;
        assert_eq!(world.read(IVec3::new(1, 5, 0)), Ok(3));
        assert_eq!(world.writes(), 1);

        let out = IVec3::new(2, 4, 0);
        assert_eq!(world.read(out), Err(WorldError::OutOfBounds(out)));
        assert_eq!(world.write(out, 1), Err(WorldError::OutOfBounds(out)));
        assert_eq!(world.writes(), 1);

        world.reset_writes();
        assert_eq!(world.writes(), 0);
    }

    #[test]
    fn iter_positions_match_index() {
        let world = VoxelWorld::new(Bounds::new(1, 3, -1, 0, 5, 6), 0u8).unwrap();
        for (pos, _) in world.iter() {
            assert!(world.cell(pos).is_some());
        }
        let last = world.iter().last().unwrap().0;
        assert_eq!(last, IVec3::new(3, 0, 6));
        let second_row = world.iter().nth(3).unwrap().0;
        assert_eq!(second_row, IVec3::new(1, 0, 5));
    }
}
