//! Uniform bucket grid over the viewport.
//!
//! Placed patterns are indexed by every cell their bounding box overlaps (a
//! shape spanning N×M cells appears N×M times), so a collision query only has
//! to visit the candidates near its center instead of the whole pool. Cells
//! store arena indices into the engine's pattern pool, never references.
//!
//! The grid is a per-step cache: it is fully rebuilt by [`Grid::reset`] at the
//! start of every engine step, so a viewport resize never leaves stale cells
//! behind.

use {
  crate::{
    pattern::{Pattern, WorldSpace},
    plotter::Line
  },
  euclid::{Point2D, Size2D},
  itertools::iproduct,
  num_traits::clamp
};


/// Index into the engine's pattern arena.
pub type ItemId = usize;

/// Cell coordinate basis.
#[derive(Debug, Copy, Clone)]
pub struct CellSpace;

pub const MIN_CELL_SIZE: f32 = 10.0;
pub const MAX_CELL_SIZE: f32 = 500.0;

pub struct Grid {
  cells: Vec<Vec<ItemId>>,
  grid_size: Size2D<i32, CellSpace>,
  cell_size: f32,
  top_left: Point2D<f32, WorldSpace>,
  /// Total registrations, counting duplicates.
  registered_count: usize,
}

impl Default for Grid {
  fn default() -> Self {
    let mut grid = Grid {
      cells: vec![],
      grid_size: Size2D::zero(),
      cell_size: 0.0,
      top_left: Point2D::origin(),
      registered_count: 0,
    };
    grid.reset(Size2D::new(1.0, 1.0), 100.0, &[], &[]);
    grid
  }
}

impl Grid {
  pub fn new() -> Self {
    Self::default()
  }

  /// Reallocates the cell layout for `domain` and re-registers every placed
  /// item. `cell_size` is clamped to `[MIN_CELL_SIZE, MAX_CELL_SIZE]`.
  /// Returns whether the cell layout changed since the previous reset, so
  /// callers know the grid overlay needs a redraw.
  pub fn reset(
    &mut self,
    domain: Size2D<f32, WorldSpace>,
    cell_size: f32,
    items: &[Pattern],
    placed: &[ItemId]
  ) -> bool {
    let cell_size = clamp(cell_size, MIN_CELL_SIZE, MAX_CELL_SIZE);
    let grid_size = Size2D::new(
      (domain.width / cell_size).ceil() as i32,
      (domain.height / cell_size).ceil() as i32
    ).max(Size2D::new(1, 1));

    let changed = self.cell_size != cell_size || self.grid_size != grid_size;

    self.cell_size = cell_size;
    self.grid_size = grid_size;
    self.top_left = Point2D::new(-0.5 * domain.width, -0.5 * domain.height);
    self.registered_count = 0;

    let cell_count = (grid_size.width * grid_size.height) as usize;
    self.cells.truncate(cell_count);
    self.cells.iter_mut().for_each(Vec::clear);
    self.cells.resize_with(cell_count, Vec::new);

    for &id in placed {
      self.register_item(id, &items[id]);
    }

    changed
  }

  /// Appends the item to every cell its bounding box overlaps.
  pub fn register_item(&mut self, id: ItemId, item: &Pattern) {
    let bbox = item.bounding_box();
    let min_cell = self.cell_id(bbox.min);
    let max_cell = self.cell_id(bbox.max);

    for (cell_y, cell_x) in iproduct!(min_cell.y..=max_cell.y, min_cell.x..=max_cell.x) {
      let index = self.cell_index(cell_x, cell_y);
      self.cells[index].push(id);
      self.registered_count += 1;
    }
  }

  /// Maps a world point to cell coordinates, clamped to the grid bounds.
  pub fn cell_id(&self, position: Point2D<f32, WorldSpace>) -> Point2D<i32, CellSpace> {
    let local = position - self.top_left;
    Point2D::new(
      clamp((local.x / self.cell_size).floor() as i32, 0, self.grid_size.width - 1),
      clamp((local.y / self.cell_size).floor() as i32, 0, self.grid_size.height - 1)
    )
  }

  /// Minimum distance from `position` to any edge of its containing cell.
  /// When a query's best size so far reaches this distance, the exact-cell
  /// result is inconclusive and neighboring cells must be visited too.
  pub fn distance_to_closest_border(&self, position: Point2D<f32, WorldSpace>) -> f32 {
    let local = position - self.top_left;
    let local_x = local.x.rem_euclid(self.cell_size);
    let local_y = local.y.rem_euclid(self.cell_size);

    let min_distance_x = local_x.min(self.cell_size - local_x);
    let min_distance_y = local_y.min(self.cell_size - local_y);
    min_distance_x.min(min_distance_y)
  }

  /// Items overlapping one cell; empty for out-of-bounds coordinates.
  pub fn items_from_cell(&self, cell_x: i32, cell_y: i32) -> &[ItemId] {
    if cell_x >= 0 && cell_x < self.grid_size.width
      && cell_y >= 0 && cell_y < self.grid_size.height {
      &self.cells[self.cell_index(cell_x, cell_y)]
    } else {
      &[]
    }
  }

  /// Items overlapping a rectangular range of cells, duplicates included.
  pub fn items_from_cells_group(
    &self,
    min_cell: Point2D<i32, CellSpace>,
    max_cell: Point2D<i32, CellSpace>
  ) -> impl Iterator<Item = ItemId> + '_ {
    iproduct!(min_cell.y..=max_cell.y, min_cell.x..=max_cell.x)
      .flat_map(move |(cell_y, cell_x)| self.items_from_cell(cell_x, cell_y))
      .copied()
  }

  /// Mean registration count per cell, the signal for adaptive cell sizing.
  pub fn items_per_cell(&self) -> f32 {
    if self.cells.is_empty() {
      0.0
    } else {
      self.registered_count as f32 / self.cells.len() as f32
    }
  }

  pub fn cell_size(&self) -> f32 {
    self.cell_size
  }

  pub fn grid_size(&self) -> Size2D<i32, CellSpace> {
    self.grid_size
  }

  /// Debug overlay geometry: one line per cell row and column.
  pub fn overlay_lines(&self) -> Vec<Line> {
    let min = self.top_left;
    let max = min + euclid::Vector2D::new(
      self.grid_size.width as f32 * self.cell_size,
      self.grid_size.height as f32 * self.cell_size
    );

    let vertical = (0..self.grid_size.width).map(|i| {
      let x = min.x + i as f32 * self.cell_size;
      Line {
        from: Point2D::new(x, min.y),
        to: Point2D::new(x, max.y),
      }
    });
    let horizontal = (0..self.grid_size.height).map(|i| {
      let y = min.y + i as f32 * self.cell_size;
      Line {
        from: Point2D::new(min.x, y),
        to: Point2D::new(max.x, y),
      }
    });
    vertical.chain(horizontal).collect()
  }

  fn cell_index(&self, cell_x: i32, cell_y: i32) -> usize {
    (cell_x + cell_y * self.grid_size.width) as usize
  }
}
