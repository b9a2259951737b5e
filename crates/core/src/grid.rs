//! Square spatial grid with a single source of truth for index arithmetic.
//!
//! A `SpatialGrid<T>` stores `side_length²` values in row-major order. Cells
//! are addressed either by a flat index or by an `(x, y)` coordinate through
//! [`CellRef`]; both resolve through [`coordinate_to_index`] /
//! [`index_to_coordinate`], so the two forms always agree. Addressing is
//! strict: anything outside the grid is an error, never wrapped or clamped.

use crate::error::EngineError;
use glam::{DVec2, IVec2};

/// Converts a flat index into an `(x, y)` coordinate for a grid with `side`
/// cells per row.
///
/// Returns `EngineError::IndexOutOfRange` if `index < 0` or `index >= side²`.
pub fn index_to_coordinate(side: usize, index: isize) -> Result<(usize, usize), EngineError> {
    let i = checked_index(side, index as i128)?;
    Ok((i % side, i / side))
}

/// Converts an `(x, y)` coordinate into a flat index, `x + side * y`.
///
/// Returns `EngineError::CoordinateOutOfRange` if either axis is outside
/// `[0, side)`.
pub fn coordinate_to_index(side: usize, x: isize, y: isize) -> Result<usize, EngineError> {
    checked_coordinate(side, x as i128, y as i128)
}

fn checked_index(side: usize, index: i128) -> Result<usize, EngineError> {
    let len = side.checked_mul(side).unwrap_or(usize::MAX);
    match usize::try_from(index) {
        Ok(i) if i < len => Ok(i),
        _ => Err(EngineError::IndexOutOfRange { index, len }),
    }
}

fn checked_coordinate(side: usize, x: i128, y: i128) -> Result<usize, EngineError> {
    let flat = match (usize::try_from(x), usize::try_from(y)) {
        (Ok(cx), Ok(cy)) if cx < side && cy < side => {
            side.checked_mul(cy).and_then(|row| row.checked_add(cx))
        }
        _ => None,
    };
    flat.ok_or(EngineError::CoordinateOutOfRange { x, y, side })
}

/// Address of a single cell: either a flat index or a 2D coordinate.
///
/// Components are `i128` so any `isize` or `usize` the caller passes is kept
/// exactly and reported unchanged when it is out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRef {
    Index(i128),
    Coord { x: i128, y: i128 },
}

impl From<isize> for CellRef {
    fn from(index: isize) -> Self {
        CellRef::Index(index as i128)
    }
}

impl From<usize> for CellRef {
    fn from(index: usize) -> Self {
        CellRef::Index(index as i128)
    }
}

impl From<(isize, isize)> for CellRef {
    fn from((x, y): (isize, isize)) -> Self {
        CellRef::Coord {
            x: x as i128,
            y: y as i128,
        }
    }
}

impl From<(usize, usize)> for CellRef {
    fn from((x, y): (usize, usize)) -> Self {
        CellRef::Coord {
            x: x as i128,
            y: y as i128,
        }
    }
}

impl From<IVec2> for CellRef {
    fn from(v: IVec2) -> Self {
        CellRef::Coord {
            x: i128::from(v.x),
            y: i128::from(v.y),
        }
    }
}

/// A square grid of `side_length × side_length` cells holding arbitrary values.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialGrid<T> {
    side_length: usize,
    cell_size: f64,
    cells: Vec<T>,
}

impl<T> SpatialGrid<T> {
    /// Creates a grid covering a square of `extent` units per side, calling
    /// `init(index, x, y, filled_so_far)` once per cell in index order.
    ///
    /// Returns `EngineError::InvalidArgument` if `side_length` is zero, if
    /// `side_length²` overflows, or if `extent` is not a positive finite number.
    pub fn new<F>(side_length: usize, extent: f64, mut init: F) -> Result<Self, EngineError>
    where
        F: FnMut(usize, usize, usize, &[T]) -> T,
    {
        if side_length == 0 {
            return Err(EngineError::InvalidArgument(
                "grid side length must be greater than zero".into(),
            ));
        }
        if !extent.is_finite() || extent <= 0.0 {
            return Err(EngineError::InvalidArgument(format!(
                "grid extent must be positive and finite, got {extent}"
            )));
        }
        let len = side_length.checked_mul(side_length).ok_or_else(|| {
            EngineError::InvalidArgument(format!("grid side length {side_length} overflows"))
        })?;

        let mut cells = Vec::with_capacity(len);
        for i in 0..len {
            let value = init(i, i % side_length, i / side_length, &cells);
            cells.push(value);
        }
        Ok(Self {
            side_length,
            cell_size: extent / side_length as f64,
            cells,
        })
    }

    /// Number of cells per row and per column.
    pub fn side_length(&self) -> usize {
        self.side_length
    }

    /// Width and height of one cell in domain units.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Total number of cells (`side_length²`).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: a grid has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Read-only access to the row-major storage.
    pub fn data(&self) -> &[T] {
        &self.cells
    }

    /// True iff both coordinates lie in `[0, side_length)`.
    pub fn is_in_bounds(&self, x: isize, y: isize) -> bool {
        checked_coordinate(self.side_length, x as i128, y as i128).is_ok()
    }

    /// Resolves a cell reference to a validated flat index.
    pub fn resolve(&self, cell: impl Into<CellRef>) -> Result<usize, EngineError> {
        match cell.into() {
            CellRef::Index(i) => checked_index(self.side_length, i),
            CellRef::Coord { x, y } => checked_coordinate(self.side_length, x, y),
        }
    }

    /// The cell containing a continuous position, `floor(position / cell_size)`.
    ///
    /// The result may lie outside the grid; accessors then report it. A
    /// non-finite position maps to `(-1, -1)`, which no grid contains.
    pub fn cell_of(&self, position: DVec2) -> CellRef {
        if !position.is_finite() {
            return CellRef::Coord { x: -1, y: -1 };
        }
        let c = (position / self.cell_size).floor();
        CellRef::Coord {
            x: c.x as i128,
            y: c.y as i128,
        }
    }

    /// Shared reference to the value at `cell`.
    pub fn get(&self, cell: impl Into<CellRef>) -> Result<&T, EngineError> {
        let i = self.resolve(cell)?;
        Ok(&self.cells[i])
    }

    /// Mutable reference to the value at `cell`.
    pub fn get_mut(&mut self, cell: impl Into<CellRef>) -> Result<&mut T, EngineError> {
        let i = self.resolve(cell)?;
        Ok(&mut self.cells[i])
    }

    /// Overwrites the value stored at `cell`.
    pub fn set(&mut self, cell: impl Into<CellRef>, value: T) -> Result<(), EngineError> {
        let i = self.resolve(cell)?;
        self.cells[i] = value;
        Ok(())
    }

    /// Calls `f(value, x, y, index)` for every cell in index order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&T, usize, usize, usize),
    {
        self.iter().for_each(|(v, x, y, i)| f(v, x, y, i));
    }

    /// Iterates over all cells yielding `(value, x, y, index)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, usize, usize, usize)> + '_ {
        let side = self.side_length;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, v)| (v, i % side, i / side, i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indexed(side: usize) -> SpatialGrid<usize> {
        SpatialGrid::new(side, 100.0, |i, _, _, _| i).unwrap()
    }

    // -- Static conversions --

    #[test]
    fn index_to_coordinate_is_row_major() {
        assert_eq!(index_to_coordinate(5, 0).unwrap(), (0, 0));
        assert_eq!(index_to_coordinate(5, 4).unwrap(), (4, 0));
        assert_eq!(index_to_coordinate(5, 5).unwrap(), (0, 1));
        assert_eq!(index_to_coordinate(5, 24).unwrap(), (4, 4));
    }

    #[test]
    fn index_to_coordinate_rejects_out_of_range() {
        assert!(matches!(
            index_to_coordinate(5, 25),
            Err(EngineError::IndexOutOfRange { index: 25, len: 25 })
        ));
        assert!(index_to_coordinate(5, -1).unwrap_err().is_out_of_range());
    }

    #[test]
    fn coordinate_to_index_rejects_out_of_range() {
        assert!(coordinate_to_index(5, 5, 0).unwrap_err().is_out_of_range());
        assert!(coordinate_to_index(5, 0, 5).unwrap_err().is_out_of_range());
        assert!(coordinate_to_index(5, -1, 0).unwrap_err().is_out_of_range());
        assert_eq!(coordinate_to_index(5, 3, 2).unwrap(), 13);
    }

    #[test]
    fn zero_side_has_no_valid_cells() {
        assert!(index_to_coordinate(0, 0).is_err());
        assert!(coordinate_to_index(0, 0, 0).is_err());
    }

    // -- Construction --

    #[test]
    fn new_populates_every_cell_with_initializer_value() {
        let grid = SpatialGrid::new(4, 40.0, |i, x, y, _| (i, x, y)).unwrap();
        assert_eq!(grid.len(), 16);
        for i in 0..16_usize {
            let (x, y) = index_to_coordinate(4, i as isize).unwrap();
            assert_eq!(*grid.get(i).unwrap(), (i, x, y));
        }
    }

    #[test]
    fn initializer_sees_previously_filled_cells() {
        // Running sum: each cell stores the count of cells filled before it.
        let grid = SpatialGrid::new(3, 3.0, |_, _, _, prev: &[usize]| prev.len()).unwrap();
        assert_eq!(grid.data(), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn cell_size_is_extent_over_side() {
        let grid = indexed(20);
        assert!((grid.cell_size() - 5.0).abs() < f64::EPSILON);
        assert_eq!(grid.side_length(), 20);
    }

    #[test]
    fn new_rejects_zero_side() {
        let result = SpatialGrid::new(0, 10.0, |_, _, _, _| 0u8);
        assert!(matches!(result, Err(EngineError::InvalidArgument(_))));
    }

    #[test]
    fn new_rejects_bad_extent() {
        assert!(SpatialGrid::new(4, 0.0, |_, _, _, _| 0u8).is_err());
        assert!(SpatialGrid::new(4, -3.0, |_, _, _, _| 0u8).is_err());
        assert!(SpatialGrid::new(4, f64::NAN, |_, _, _, _| 0u8).is_err());
    }

    #[test]
    fn new_rejects_overflowing_side() {
        let result = SpatialGrid::new(usize::MAX, 1.0, |_, _, _, _| 0u8);
        assert!(matches!(result, Err(EngineError::InvalidArgument(_))));
    }

    // -- Accessors --

    #[test]
    fn get_rejects_out_of_range_cells() {
        let grid = indexed(5);
        assert!(grid.get((5_isize, 0_isize)).unwrap_err().is_out_of_range());
        assert!(grid.get((-1_isize, 0_isize)).unwrap_err().is_out_of_range());
        assert!(grid.get(25_usize).unwrap_err().is_out_of_range());
        assert!(grid.get(-1_isize).unwrap_err().is_out_of_range());
    }

    #[test]
    fn index_and_coordinate_forms_agree() {
        let grid = indexed(6);
        for y in 0..6_isize {
            for x in 0..6_isize {
                let i = coordinate_to_index(6, x, y).unwrap();
                assert_eq!(grid.get((x, y)).unwrap(), grid.get(i).unwrap());
            }
        }
    }

    #[test]
    fn set_by_coordinate_is_visible_by_index() {
        let mut grid = indexed(4);
        grid.set(IVec2::new(2, 3), 99).unwrap();
        assert_eq!(*grid.get(14_usize).unwrap(), 99);
    }

    #[test]
    fn set_out_of_range_leaves_grid_unchanged() {
        let mut grid = indexed(3);
        let before = grid.clone();
        assert!(grid.set((3_isize, 1_isize), 7).is_err());
        assert!(grid.set(9_usize, 7).is_err());
        assert_eq!(grid, before);
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut grid = indexed(3);
        *grid.get_mut((1_usize, 1_usize)).unwrap() += 100;
        assert_eq!(*grid.get(4_usize).unwrap(), 104);
    }

    #[test]
    fn is_in_bounds_checks_both_axes() {
        let grid = indexed(5);
        assert!(grid.is_in_bounds(0, 0));
        assert!(grid.is_in_bounds(4, 4));
        assert!(!grid.is_in_bounds(5, 0));
        assert!(!grid.is_in_bounds(0, -1));
    }

    #[test]
    fn cell_of_floors_position_by_cell_size() {
        let grid = indexed(10); // cell size 10
        assert_eq!(grid.cell_of(DVec2::new(0.0, 0.0)), CellRef::Coord { x: 0, y: 0 });
        assert_eq!(grid.cell_of(DVec2::new(19.9, 35.0)), CellRef::Coord { x: 1, y: 3 });
        assert_eq!(grid.cell_of(DVec2::new(-0.5, 5.0)), CellRef::Coord { x: -1, y: 0 });
        assert!(grid.get(grid.cell_of(DVec2::new(100.0, 5.0))).is_err());
    }

    #[test]
    fn cell_of_non_finite_position_is_outside_every_grid() {
        let grid = indexed(10);
        for pos in [
            DVec2::new(f64::NAN, 5.0),
            DVec2::new(5.0, f64::NAN),
            DVec2::new(f64::INFINITY, 0.0),
        ] {
            let cell = grid.cell_of(pos);
            assert_eq!(cell, CellRef::Coord { x: -1, y: -1 });
            assert!(grid.get(cell).unwrap_err().is_out_of_range());
        }
    }

    #[test]
    fn huge_unsigned_refs_are_reported_unchanged() {
        let grid = indexed(3);
        assert!(matches!(
            grid.get(usize::MAX),
            Err(EngineError::IndexOutOfRange { index, len: 9 }) if index == usize::MAX as i128
        ));
        assert!(matches!(
            grid.get((usize::MAX, 0_usize)),
            Err(EngineError::CoordinateOutOfRange { x, y: 0, side: 3 }) if x == usize::MAX as i128
        ));
    }

    // -- Iteration --

    #[test]
    fn iter_yields_row_major_tuples() {
        let grid = SpatialGrid::new(2, 2.0, |i, _, _, _| i * 10).unwrap();
        let cells: Vec<_> = grid.iter().map(|(v, x, y, i)| (*v, x, y, i)).collect();
        assert_eq!(
            cells,
            vec![(0, 0, 0, 0), (10, 1, 0, 1), (20, 0, 1, 2), (30, 1, 1, 3)]
        );
    }

    #[test]
    fn iter_is_restartable() {
        let grid = indexed(3);
        let first: Vec<_> = grid.iter().map(|(v, ..)| *v).collect();
        let second: Vec<_> = grid.iter().map(|(v, ..)| *v).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 9);
    }

    #[test]
    fn for_each_visits_every_cell_once() {
        let grid = indexed(4);
        let mut visited = Vec::new();
        grid.for_each(|v, x, y, i| {
            assert_eq!(*v, i);
            assert_eq!(coordinate_to_index(4, x as isize, y as isize).unwrap(), i);
            visited.push(i);
        });
        assert_eq!(visited, (0..16).collect::<Vec<_>>());
    }

    // -- Property-based tests --

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn index_round_trips_through_coordinate(side in 1_usize..=64, seed in any::<usize>()) {
                let index = (seed % (side * side)) as isize;
                let (x, y) = index_to_coordinate(side, index).unwrap();
                prop_assert_eq!(coordinate_to_index(side, x as isize, y as isize).unwrap() as isize, index);
            }

            #[test]
            fn coordinate_round_trips_through_index(side in 1_usize..=64, a in any::<usize>(), b in any::<usize>()) {
                let x = a % side;
                let y = b % side;
                let i = coordinate_to_index(side, x as isize, y as isize).unwrap();
                prop_assert_eq!(index_to_coordinate(side, i as isize).unwrap(), (x, y));
            }

            #[test]
            fn outside_coordinates_always_fail(side in 1_usize..=32, x in -100_isize..100, y in -100_isize..100) {
                let inside = x >= 0 && y >= 0 && (x as usize) < side && (y as usize) < side;
                let grid = SpatialGrid::new(side, 1.0, |_, _, _, _| ()).unwrap();
                prop_assert_eq!(grid.get((x, y)).is_ok(), inside);
                prop_assert_eq!(grid.is_in_bounds(x, y), inside);
            }
        }
    }
}
