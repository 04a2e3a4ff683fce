//! Coordinate spaces and the exact mappings between them.
//!
//! Three layouts address the same 81 cells:
//!
//! - **Nested** `(x, y, i, j)`: `(x, y)` selects the area, `(i, j)` the cell
//!   inside it. This is how `BoardState` stores cells.
//! - **Flat** `(m, n)`: a 9×9 grid, row-major. This is the board wire format
//!   consumed by the predictor: cell `(x, y, i, j)` sits at `(3x + i, 3y + j)`.
//! - **Action** `k`: a single integer in `0..81`,
//!   `k = 9 * (3x + y) + (3i + j)`. Policies are indexed this way.
//!
//! Every other module goes through these functions instead of redoing the
//! arithmetic. All of them are total over their declared domains; out-of-range
//! input is a caller bug and panics. Decoding is the exception: serialized
//! coordinates are range-checked and rejected with [`OutOfRange`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Side length of an area and of the macro grid.
pub const AREA_SIZE: usize = 3;

/// Side length of the flat board.
pub const BOARD_SIZE: usize = 9;

/// Number of cells, and so the size of the action space.
pub const ACTION_SIZE: usize = 81;

/// A 3×3 grid, indexed `[row][col]`.
pub type Grid3<T> = [[T; AREA_SIZE]; AREA_SIZE];

/// Values in nested layout, indexed `[x][y][i][j]`.
pub type Nested<T> = [[[[T; AREA_SIZE]; AREA_SIZE]; AREA_SIZE]; AREA_SIZE];

/// Values in flat layout, indexed `[m][n]`.
pub type Flat<T> = [[T; BOARD_SIZE]; BOARD_SIZE];

/// The flat board wire format: `+1`, `-1` for marks, `0` for empty.
pub type FlatBoard = Flat<i8>;

/// A decoded coordinate component outside its range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("coordinate {value} out of range 0..{bound}")]
pub struct OutOfRange {
    pub value: usize,
    pub bound: usize,
}

fn check_component(value: usize, bound: usize) -> Result<usize, OutOfRange> {
    if value < bound {
        Ok(value)
    } else {
        Err(OutOfRange { value, bound })
    }
}

/// One of the nine areas, or a cell position inside an area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawArea")]
pub struct Area {
    pub(crate) x: usize,
    pub(crate) y: usize,
}

#[derive(Deserialize)]
struct RawArea {
    x: usize,
    y: usize,
}

impl TryFrom<RawArea> for Area {
    type Error = OutOfRange;

    fn try_from(raw: RawArea) -> Result<Self, OutOfRange> {
        Ok(Self {
            x: check_component(raw.x, AREA_SIZE)?,
            y: check_component(raw.y, AREA_SIZE)?,
        })
    }
}

impl Area {
    /// Create an area coordinate. Panics unless both components are in `0..3`.
    #[must_use]
    pub fn new(x: usize, y: usize) -> Self {
        assert!(
            x < AREA_SIZE && y < AREA_SIZE,
            "area ({x}, {y}) out of range"
        );
        Self { x, y }
    }

    /// Row of the area in the macro grid.
    #[must_use]
    pub const fn x(self) -> usize {
        self.x
    }

    /// Column of the area in the macro grid.
    #[must_use]
    pub const fn y(self) -> usize {
        self.y
    }

    /// All nine areas in row-major order.
    pub fn all() -> impl Iterator<Item = Area> {
        (0..AREA_SIZE).flat_map(|x| (0..AREA_SIZE).map(move |y| Area { x, y }))
    }
}

impl std::fmt::Display for Area {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// 4-D address of a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawCellAddr")]
pub struct CellAddr {
    pub(crate) x: usize,
    pub(crate) y: usize,
    pub(crate) i: usize,
    pub(crate) j: usize,
}

#[derive(Deserialize)]
struct RawCellAddr {
    x: usize,
    y: usize,
    i: usize,
    j: usize,
}

impl TryFrom<RawCellAddr> for CellAddr {
    type Error = OutOfRange;

    fn try_from(raw: RawCellAddr) -> Result<Self, OutOfRange> {
        Ok(Self {
            x: check_component(raw.x, AREA_SIZE)?,
            y: check_component(raw.y, AREA_SIZE)?,
            i: check_component(raw.i, AREA_SIZE)?,
            j: check_component(raw.j, AREA_SIZE)?,
        })
    }
}

impl CellAddr {
    /// Create a cell address. Panics unless every component is in `0..3`.
    #[must_use]
    pub fn new(x: usize, y: usize, i: usize, j: usize) -> Self {
        assert!(
            x < AREA_SIZE && y < AREA_SIZE && i < AREA_SIZE && j < AREA_SIZE,
            "cell ({x}, {y}, {i}, {j}) out of range"
        );
        Self { x, y, i, j }
    }

    /// Components as `(x, y, i, j)`.
    #[must_use]
    pub const fn components(self) -> (usize, usize, usize, usize) {
        (self.x, self.y, self.i, self.j)
    }

    /// The area containing this cell.
    #[must_use]
    pub const fn area(self) -> Area {
        Area { x: self.x, y: self.y }
    }

    /// The position inside the area, read as an area coordinate.
    ///
    /// This is the area the opponent is sent to after this cell is played.
    #[must_use]
    pub const fn target(self) -> Area {
        Area { x: self.i, y: self.j }
    }

    /// Convert to the flat 9×9 position.
    #[must_use]
    pub fn to_flat(self) -> FlatPos {
        to_flat(self)
    }

    /// Convert to the action index.
    #[must_use]
    pub fn to_action(self) -> usize {
        to_action(self)
    }

    /// Convert from an action index.
    #[must_use]
    pub fn from_action(k: usize) -> Self {
        from_action(k)
    }

    /// All 81 cells in action order.
    pub fn all() -> impl Iterator<Item = CellAddr> {
        (0..ACTION_SIZE).map(from_action)
    }

    /// Read this cell from a nested grid.
    #[inline]
    #[must_use]
    pub fn get<T: Copy>(self, grid: &Nested<T>) -> T {
        grid[self.x][self.y][self.i][self.j]
    }

    /// Write this cell in a nested grid.
    #[inline]
    pub fn set<T>(self, grid: &mut Nested<T>, value: T) {
        grid[self.x][self.y][self.i][self.j] = value;
    }
}

impl std::fmt::Display for CellAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.i, self.j)
    }
}

/// 2-D position on the flat 9×9 board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawFlatPos")]
pub struct FlatPos {
    pub(crate) m: usize,
    pub(crate) n: usize,
}

#[derive(Deserialize)]
struct RawFlatPos {
    m: usize,
    n: usize,
}

impl TryFrom<RawFlatPos> for FlatPos {
    type Error = OutOfRange;

    fn try_from(raw: RawFlatPos) -> Result<Self, OutOfRange> {
        Ok(Self {
            m: check_component(raw.m, BOARD_SIZE)?,
            n: check_component(raw.n, BOARD_SIZE)?,
        })
    }
}

impl FlatPos {
    /// Create a flat position. Panics unless both components are in `0..9`.
    #[must_use]
    pub fn new(m: usize, n: usize) -> Self {
        assert!(
            m < BOARD_SIZE && n < BOARD_SIZE,
            "flat position ({m}, {n}) out of range"
        );
        Self { m, n }
    }

    /// Flat row.
    #[must_use]
    pub const fn m(self) -> usize {
        self.m
    }

    /// Flat column.
    #[must_use]
    pub const fn n(self) -> usize {
        self.n
    }

    /// Convert to the nested address.
    #[must_use]
    pub fn to_nested(self) -> CellAddr {
        to_nested(self)
    }
}

impl std::fmt::Display for FlatPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.m, self.n)
    }
}

// === Pointwise mappings ===

/// `(x, y, i, j) -> (3x + i, 3y + j)`.
#[must_use]
pub fn to_flat(addr: CellAddr) -> FlatPos {
    let CellAddr { x, y, i, j } = CellAddr::new(addr.x, addr.y, addr.i, addr.j);
    FlatPos {
        m: AREA_SIZE * x + i,
        n: AREA_SIZE * y + j,
    }
}

/// `(m, n) -> (m / 3, n / 3, m % 3, n % 3)`.
#[must_use]
pub fn to_nested(pos: FlatPos) -> CellAddr {
    let FlatPos { m, n } = FlatPos::new(pos.m, pos.n);
    CellAddr {
        x: m / AREA_SIZE,
        y: n / AREA_SIZE,
        i: m % AREA_SIZE,
        j: n % AREA_SIZE,
    }
}

/// `(x, y, i, j) -> 9 * (3x + y) + (3i + j)`.
#[must_use]
pub fn to_action(addr: CellAddr) -> usize {
    let CellAddr { x, y, i, j } = CellAddr::new(addr.x, addr.y, addr.i, addr.j);
    let area_number = AREA_SIZE * x + y;
    let index_in_area = AREA_SIZE * i + j;
    BOARD_SIZE * area_number + index_in_area
}

/// Inverse of [`to_action`]. Panics unless `k < 81`.
#[must_use]
pub fn from_action(k: usize) -> CellAddr {
    assert!(k < ACTION_SIZE, "action {k} out of range");
    let area_number = k / BOARD_SIZE;
    let index_in_area = k % BOARD_SIZE;
    CellAddr {
        x: area_number / AREA_SIZE,
        y: area_number % AREA_SIZE,
        i: index_in_area / AREA_SIZE,
        j: index_in_area % AREA_SIZE,
    }
}

// === Whole-grid conversions ===

/// Lay a nested grid out as a flat 9×9 grid.
#[must_use]
pub fn nested_to_flat<T: Copy>(grid: &Nested<T>) -> Flat<T> {
    std::array::from_fn(|m| std::array::from_fn(|n| to_nested(FlatPos { m, n }).get(grid)))
}

/// Inverse of [`nested_to_flat`].
#[must_use]
pub fn flat_to_nested<T: Copy>(grid: &Flat<T>) -> Nested<T> {
    std::array::from_fn(|x| {
        std::array::from_fn(|y| {
            std::array::from_fn(|i| {
                std::array::from_fn(|j| {
                    let pos = to_flat(CellAddr { x, y, i, j });
                    grid[pos.m][pos.n]
                })
            })
        })
    })
}

/// Lay a nested grid out in action order.
#[must_use]
pub fn nested_to_actions<T: Copy>(grid: &Nested<T>) -> [T; ACTION_SIZE] {
    std::array::from_fn(|k| from_action(k).get(grid))
}

/// Inverse of [`nested_to_actions`]. Panics unless `values` has 81 entries.
#[must_use]
pub fn actions_to_nested<T: Copy>(values: &[T]) -> Nested<T> {
    assert_eq!(
        values.len(),
        ACTION_SIZE,
        "expected {ACTION_SIZE} action values"
    );
    std::array::from_fn(|x| {
        std::array::from_fn(|y| {
            std::array::from_fn(|i| std::array::from_fn(|j| values[to_action(CellAddr { x, y, i, j })]))
        })
    })
}

/// Reshape action-ordered values to the flat 9×9 layout.
#[must_use]
pub fn actions_to_flat<T: Copy>(values: &[T]) -> Flat<T> {
    nested_to_flat(&actions_to_nested(values))
}

/// Reshape a flat 9×9 grid to action order.
#[must_use]
pub fn flat_to_actions<T: Copy>(grid: &Flat<T>) -> [T; ACTION_SIZE] {
    nested_to_actions(&flat_to_nested(grid))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered() -> Nested<usize> {
        std::array::from_fn(|x| {
            std::array::from_fn(|y| {
                std::array::from_fn(|i| std::array::from_fn(|j| 27 * x + 9 * y + 3 * i + j))
            })
        })
    }

    #[test]
    fn test_action_roundtrip() {
        for k in 0..ACTION_SIZE {
            assert_eq!(to_action(from_action(k)), k);
        }
    }

    #[test]
    fn test_flat_roundtrip() {
        for m in 0..BOARD_SIZE {
            for n in 0..BOARD_SIZE {
                let pos = FlatPos::new(m, n);
                assert_eq!(to_flat(to_nested(pos)), pos);
            }
        }
    }

    #[test]
    fn test_known_addresses() {
        let addr = CellAddr::new(1, 2, 0, 1);
        assert_eq!(addr.to_flat(), FlatPos::new(3, 7));
        assert_eq!(addr.to_action(), 9 * 5 + 1);
        assert_eq!(CellAddr::from_action(80), CellAddr::new(2, 2, 2, 2));
        assert_eq!(CellAddr::from_action(21), CellAddr::new(0, 2, 1, 0));
    }

    #[test]
    fn test_nested_to_flat_layout() {
        // First flat row walks the top row of cells across areas (0,0), (0,1), (0,2).
        let flat = nested_to_flat(&numbered());
        assert_eq!(flat[0], [0, 1, 2, 9, 10, 11, 18, 19, 20]);
        assert_eq!(flat[1], [3, 4, 5, 12, 13, 14, 21, 22, 23]);
        assert_eq!(flat[8], [60, 61, 62, 69, 70, 71, 78, 79, 80]);
    }

    #[test]
    fn test_action_order_matches_numbering() {
        // The numbering above is exactly the action index.
        let actions = nested_to_actions(&numbered());
        for (k, value) in actions.iter().enumerate() {
            assert_eq!(*value, k);
        }
    }

    #[test]
    fn test_grid_roundtrips() {
        let grid = numbered();
        assert_eq!(flat_to_nested(&nested_to_flat(&grid)), grid);
        assert_eq!(actions_to_nested(&nested_to_actions(&grid)), grid);

        let flat = nested_to_flat(&grid);
        assert_eq!(actions_to_flat(&flat_to_actions(&flat)), flat);
    }

    #[test]
    fn test_cell_target() {
        let addr = CellAddr::new(0, 0, 1, 2);
        assert_eq!(addr.area(), Area::new(0, 0));
        assert_eq!(addr.target(), Area::new(1, 2));
    }

    #[test]
    fn test_all_iterators() {
        assert_eq!(Area::all().count(), 9);
        let cells: Vec<_> = CellAddr::all().collect();
        assert_eq!(cells.len(), ACTION_SIZE);
        assert_eq!(cells[0], CellAddr::new(0, 0, 0, 0));
        assert_eq!(cells[9], CellAddr::new(0, 1, 0, 0));
    }

    #[test]
    fn test_decoding_checks_range() {
        let addr: CellAddr = serde_json::from_str(r#"{"x":2,"y":1,"i":0,"j":2}"#).unwrap();
        assert_eq!(addr.components(), (2, 1, 0, 2));

        let err = serde_json::from_str::<Area>(r#"{"x":7,"y":0}"#).unwrap_err();
        assert!(err.to_string().contains("coordinate 7 out of range 0..3"));
        assert!(serde_json::from_str::<CellAddr>(r#"{"x":0,"y":0,"i":3,"j":0}"#).is_err());
        assert!(serde_json::from_str::<FlatPos>(r#"{"m":8,"n":9}"#).is_err());

        let pos = FlatPos::new(8, 4);
        let back: FlatPos = serde_json::from_str(&serde_json::to_string(&pos).unwrap()).unwrap();
        assert_eq!((back.m(), back.n()), (8, 4));
    }

    #[test]
    #[should_panic(expected = "action 81 out of range")]
    fn test_action_out_of_range() {
        let _ = from_action(81);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_flat_out_of_range() {
        let _ = to_nested(FlatPos { m: 9, n: 0 });
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_cell_out_of_range() {
        let _ = to_action(CellAddr { x: 0, y: 3, i: 0, j: 0 });
    }

    #[test]
    #[should_panic(expected = "expected 81 action values")]
    fn test_actions_wrong_length() {
        let _ = actions_to_nested(&[0u8; 80]);
    }
}
