use glam::IVec3;

/// Read/write access to cells at absolute world coordinates.
///
/// This is the only thing the engine needs from the world it runs in. The
/// engine reads one cell beyond the grid box when counting neighbors of
/// boundary cells (unless clipping), so `read` must be defined there too.
/// `write` is only called inside the box, and only with a value different
/// from the current one.
pub trait CellStore {
    type Value: Clone + PartialEq;
    type Error: std::error::Error;

    fn read(&self, pos: IVec3) -> Result<Self::Value, Self::Error>;

    fn write(&mut self, pos: IVec3, value: Self::Value) -> Result<(), Self::Error>;
}

impl<S: CellStore + ?Sized> CellStore for &mut S {
    type Value = S::Value;
    type Error = S::Error;

    #[inline]
    fn read(&self, pos: IVec3) -> Result<Self::Value, Self::Error> {
        (**self).read(pos)
    }

    #[inline]
    fn write(&mut self, pos: IVec3, value: Self::Value) -> Result<(), Self::Error> {
        (**self).write(pos, value)
    }
}
