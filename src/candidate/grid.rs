use geo::{Coord, Intersects, Line, Rect, coord};
use rustc_hash::FxHashSet;
use std::hash::Hash;

/// The most cells a single grid may hold.
pub const MAX_GRID_CELLS: usize = 1 << 22;

/// A uniform grid over a bounding box, indexing items by
/// the line segments which represent them.
///
/// ```text
///   +----+----+----+
///   |    |  / |    |
///   +----+-/--+----+    A segment is indexed
///   |    |/   |    |    in every cell it crosses.
///   +----/----+----+
/// ```
#[derive(Clone, Debug)]
pub struct GridRangeQuery<T> {
    bounds: Rect,
    cell_width: f64,
    cell_height: f64,
    columns: usize,
    rows: usize,
    cells: Vec<Vec<T>>,
}

impl<T> GridRangeQuery<T>
where
    T: Copy + Eq + Hash,
{
    /// An empty grid over `bounds`.
    ///
    /// `None` unless both cell dimensions are finite and positive,
    /// and the grid holds at most [`MAX_GRID_CELLS`] cells.
    pub fn new(bounds: Rect, cell_width: f64, cell_height: f64) -> Option<Self> {
        let columns = cell_count(bounds.width(), cell_width)?;
        let rows = cell_count(bounds.height(), cell_height)?;

        let cells = columns.checked_mul(rows).filter(|cells| *cells <= MAX_GRID_CELLS)?;

        Some(Self {
            bounds,
            cell_width,
            cell_height,
            columns,
            rows,
            cells: (0..cells).map(|_| Vec::new()).collect(),
        })
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The cell (column, row) containing the coordinate, clamped into the grid.
    fn cell_of(&self, coord: Coord) -> (usize, usize) {
        let column = ((coord.x - self.bounds.min().x) / self.cell_width).floor();
        let row = ((coord.y - self.bounds.min().y) / self.cell_height).floor();

        let column = (column.max(0.0) as usize).min(self.columns - 1);
        let row = (row.max(0.0) as usize).min(self.rows - 1);
        (column, row)
    }

    fn cell_bounds(&self, column: usize, row: usize) -> Rect {
        let min = coord! {
            x: self.bounds.min().x + column as f64 * self.cell_width,
            y: self.bounds.min().y + row as f64 * self.cell_height,
        };

        Rect::new(min, coord! { x: min.x + self.cell_width, y: min.y + self.cell_height })
    }

    /// Indexes `item` within every cell the segment intersects.
    ///
    /// Portions of the segment outside the bounds are ignored.
    pub fn add_line_segment(&mut self, item: T, segment: Line) {
        if !segment.intersects(&self.bounds) {
            return;
        }

        let (c0, r0) = self.cell_of(segment.start);
        let (c1, r1) = self.cell_of(segment.end);

        for row in r0.min(r1)..=r0.max(r1) {
            for column in c0.min(c1)..=c0.max(c1) {
                if segment.intersects(&self.cell_bounds(column, row)) {
                    let cell = &mut self.cells[row * self.columns + column];
                    if cell.last() != Some(&item) {
                        cell.push(item);
                    }
                }
            }
        }
    }

    /// The items indexed in every cell intersecting `range`.
    pub fn query(&self, range: &Rect) -> FxHashSet<T> {
        let mut items = FxHashSet::default();
        if !range.intersects(&self.bounds) {
            return items;
        }

        let (c0, r0) = self.cell_of(range.min());
        let (c1, r1) = self.cell_of(range.max());

        for row in r0..=r1 {
            for column in c0..=c1 {
                items.extend(self.cells[row * self.columns + column].iter().copied());
            }
        }

        items
    }
}

/// The number of cells of `size` spanning `extent`, at least one.
pub(crate) fn cell_count(extent: f64, size: f64) -> Option<usize> {
    if !size.is_finite() || size <= 0.0 || !extent.is_finite() {
        return None;
    }

    let count = (extent / size).ceil().max(1.0);
    (count <= MAX_GRID_CELLS as f64).then_some(count as usize)
}
