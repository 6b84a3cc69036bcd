//! The packing engine.
//!
//! One [`Engine`] owns a fixed-capacity pool of patterns split into a placed
//! and an unplaced list, both indexing into a single arena. Every
//! [`Engine::update`] step zooms the placed shapes about the focus, recycles
//! the ones that left the viewport or outgrew the safety ceiling, rebuilds the
//! bucket grid and spends a bounded try budget on packing recycled shapes back
//! in. All randomness flows from one seeded PCG, so runs are reproducible.

use {
  crate::{
    color::{different_from, display_color, Color, ColorMode},
    grid::{CellSpace, Grid, ItemId, MAX_CELL_SIZE, MIN_CELL_SIZE},
    pattern::{Pattern, Primitive, Visibility, WorldSpace},
    plotter::Plotter
  },
  euclid::{Point2D, Size2D, Vector2D as V2},
  num_traits::clamp,
  rand::{Rng, SeedableRng},
  rand_pcg::Lcg128Xsl64
};


/// Per-step knobs, threaded by reference into [`Engine::update`] and
/// [`Engine::draw`]. The engine never stores a copy, so a caller may change
/// any field between steps.
#[derive(Debug, Copy, Clone)]
pub struct Config {
  pub primitive: Primitive,
  /// Fraction of the maximal size removed to leave visible gaps, `[0, 1)`.
  pub spacing: f32,
  /// Placements below this size are rejected.
  pub min_size: f32,
  /// Relative growth per second; zero disables zooming.
  pub zoom_speed: f32,
  /// Shared placement-attempt budget of one update step.
  pub max_tries_per_frame: u32,
  pub cell_size: f32,
  /// Nudge the cell size each step towards `target_items_per_cell`.
  pub adaptive_cell_size: bool,
  pub target_items_per_cell: f32,
  /// Permit placements inside already-placed shapes, forming nested chains.
  pub allow_overlapping: bool,
  /// Color children from the fixed palette, avoiding the parent's color.
  pub use_palette: bool,
  pub black_background: bool,
  pub high_contrast: bool,
  /// Fade freshly placed shapes in instead of popping them.
  pub blending: bool,
  pub show_grid: bool,
  /// Restrict drawing to the contents of one grid cell.
  pub debug_cell: Option<Point2D<i32, CellSpace>>,
}

impl Default for Config {
  fn default() -> Self {
    Config {
      primitive: Primitive::Circle,
      spacing: 0.25,
      min_size: 6.0,
      zoom_speed: 0.0,
      max_tries_per_frame: 200,
      cell_size: 100.0,
      adaptive_cell_size: true,
      target_items_per_cell: 10.0,
      allow_overlapping: false,
      use_palette: false,
      black_background: true,
      high_contrast: false,
      blending: true,
      show_grid: false,
      debug_cell: None,
    }
  }
}

impl Config {
  pub fn color_mode(&self) -> ColorMode {
    ColorMode {
      dark_background: self.black_background,
      high_contrast: self.high_contrast,
    }
  }

  pub fn is_zooming(&self) -> bool {
    self.zoom_speed.abs() > 1e-3
  }
}

/// Background inherited from a shape that grew to cover the whole viewport.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Background {
  pub color: Color,
  pub nesting_level: u32,
}

/// Counters of the most recent update step.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct UpdateStats {
  pub tries_used: u32,
  pub placed: u32,
  pub evicted: u32,
}

pub struct Engine {
  items: Vec<Pattern>,
  placed: Vec<ItemId>,
  unplaced: Vec<ItemId>,
  grid: Grid,
  background: Option<Background>,
  primitive: Primitive,
  rng: Lcg128Xsl64,
  /// Generation counter per arena slot; a slot whose entry equals
  /// `current_test` was already tested during the running query, which
  /// deduplicates items registered in several cells.
  last_tested: Vec<u64>,
  current_test: u64,
  clock: f32,
  zoom_focus: Point2D<f32, WorldSpace>,
  stats: UpdateStats,
}

impl Engine {
  pub fn new(seed: u64) -> Self {
    Engine {
      items: vec![],
      placed: vec![],
      unplaced: vec![],
      grid: Grid::new(),
      background: None,
      primitive: Primitive::Circle,
      rng: Lcg128Xsl64::seed_from_u64(seed),
      last_tested: vec![],
      current_test: 0,
      clock: 0.0,
      zoom_focus: Point2D::origin(),
      stats: UpdateStats::default(),
    }
  }

  /// Discards every placement and regenerates the pool for the configured
  /// primitive. The pool capacity is kept.
  pub fn reset(&mut self, config: &Config) {
    let count = self.items.len();
    self.primitive = config.primitive;
    self.items.clear();
    self.placed.clear();
    self.unplaced.clear();
    self.last_tested.clear();
    self.current_test = 0;
    self.background = None;
    self.clock = 0.0;
    self.zoom_focus = Point2D::origin();
    self.stats = UpdateStats::default();
    self.set_items_count(count);
  }

  /// Grows or shrinks the pool. Shrinking consumes unplaced slots first and
  /// compacts the arena, keeping every remaining placement.
  pub fn set_items_count(&mut self, count: usize) {
    if count < self.items.len() {
      let mut drop = self.items.len() - count;
      let from_unplaced = drop.min(self.unplaced.len());
      self.unplaced.truncate(self.unplaced.len() - from_unplaced);
      drop -= from_unplaced;
      self.placed.truncate(self.placed.len() - drop);

      let survivors: Vec<Pattern> = self.placed.iter()
        .chain(self.unplaced.iter())
        .map(|&id| self.items[id].clone())
        .collect();
      self.items = survivors;
      self.placed = (0..self.placed.len()).collect();
      self.unplaced = (self.placed.len()..self.items.len()).collect();
      self.last_tested.clear();
      self.last_tested.resize(self.items.len(), 0);
      self.current_test = 0;
    }
    while self.items.len() < count {
      self.unplaced.push(self.items.len());
      self.items.push(Pattern::new(self.primitive, &mut self.rng));
      self.last_tested.push(0);
    }
  }

  pub fn items_count(&self) -> usize {
    self.items.len()
  }

  pub fn placed_count(&self) -> usize {
    self.placed.len()
  }

  pub fn unplaced_count(&self) -> usize {
    self.unplaced.len()
  }

  pub fn placed_items(&self) -> impl Iterator<Item = &Pattern> {
    self.placed.iter().map(move |&id| &self.items[id])
  }

  pub fn background(&self) -> Option<Background> {
    self.background
  }

  pub fn last_update_stats(&self) -> UpdateStats {
    self.stats
  }

  pub fn clock(&self) -> f32 {
    self.clock
  }

  /// Advances the simulation by `dt` seconds. `pointer`, when present, moves
  /// the zoom focus (clamped to the viewport); otherwise the previous focus
  /// is kept. Returns whether anything visible changed.
  pub fn update(
    &mut self,
    dt: f32,
    domain: Size2D<f32, WorldSpace>,
    pointer: Option<Point2D<f32, WorldSpace>>,
    config: &Config
  ) -> bool {
    self.clock += dt;
    self.stats = UpdateStats::default();
    let mut changed = false;

    let cell_size = self.adapted_cell_size(config);
    let layout_changed = self.grid.reset(domain, cell_size, &self.items, &self.placed);
    changed |= layout_changed && config.show_grid;

    changed |= self.fill(domain, config);

    // zoom last, so placements from this very step move with the scene;
    // the grid catches up at the start of the next step
    if config.is_zooming() && !self.placed.is_empty() {
      changed |= self.zoom_step(dt, domain, pointer, config);
    }
    changed
  }

  /// Renders the current placements. Returns whether the frame is settled:
  /// the plotter was ready and no shape is still fading in.
  pub fn draw(&self, plotter: &mut dyn Plotter, config: &Config) -> bool {
    if !plotter.is_ready() {
      return false;
    }
    let blend_time = if config.blending {
      0.5 / (1.0 + config.zoom_speed.abs())
    } else {
      0.0
    };

    plotter.initialize(self.background_color(config));
    plotter.set_blending(self.clock, blend_time);

    let ids: Vec<ItemId> = match config.debug_cell {
      Some(cell) => self.grid.items_from_cell(cell.x, cell.y).iter()
        .copied()
        .filter(|&id| id < self.items.len())
        .collect(),
      None => self.placed.clone(),
    };
    let items: Vec<&Pattern> = ids.iter().map(|&id| &self.items[id]).collect();

    match self.primitive {
      Primitive::Square => plotter.draw_squares(&items),
      Primitive::Circle => plotter.draw_circles(&items),
      Primitive::Rectangle => plotter.draw_rectangles(&items),
      Primitive::Triangle => plotter.draw_triangles(&items),
      Primitive::Heart => plotter.draw_hearts(&items),
    }
    if config.show_grid {
      plotter.draw_lines(&self.grid.overlay_lines(), Color::GREEN);
    }
    plotter.finalize();

    blend_time <= 0.0
      || items.iter().all(|item| item.opacity(self.clock, blend_time) >= 1.0)
  }

  /// Resolved background: the covering shape's display color, or the plain
  /// configured one.
  pub fn background_color(&self, config: &Config) -> Color {
    match self.background {
      Some(bg) => display_color(bg.color, bg.nesting_level, config.color_mode()),
      None if config.black_background => Color::BLACK,
      None => Color::WHITE,
    }
  }

  /// Rescales every placed shape about the focus and recycles the ones that
  /// left the viewport, outgrew the ceiling, or became the background.
  fn zoom_step(
    &mut self,
    dt: f32,
    domain: Size2D<f32, WorldSpace>,
    pointer: Option<Point2D<f32, WorldSpace>>,
    config: &Config
  ) -> bool {
    if let Some(pointer) = pointer {
      self.zoom_focus = Point2D::new(
        clamp(pointer.x, -0.5 * domain.width, 0.5 * domain.width),
        clamp(pointer.y, -0.5 * domain.height, 0.5 * domain.height)
      );
    }
    let factor = 1.0 + dt * config.zoom_speed;
    let focus = self.zoom_focus;

    let mut placed = Vec::with_capacity(self.placed.len());
    for &id in &self.placed {
      let item = &mut self.items[id];
      item.zoom(focus, factor);
      let visibility = item.visibility(domain);
      let size = item.size;
      let raw_color = item.raw_color;
      let nesting_level = item.nesting_level;

      match visibility {
        Visibility::CoversView => {
          self.background = Some(Background {
            color: raw_color,
            nesting_level: nesting_level % 100_000,
          });
          self.unplaced.push(id);
          self.stats.evicted += 1;
        }
        Visibility::OutOfView => {
          self.unplaced.push(id);
          self.stats.evicted += 1;
        }
        Visibility::Visible if size > Pattern::MAX_SIZE => {
          self.unplaced.push(id);
          self.stats.evicted += 1;
        }
        Visibility::Visible => placed.push(id),
      }
    }
    self.placed = placed;
    true
  }

  /// One step of the cell-size feedback loop, one unit at a time.
  fn adapted_cell_size(&self, config: &Config) -> f32 {
    if !config.adaptive_cell_size {
      return config.cell_size;
    }
    let density = self.grid.items_per_cell();
    let current = self.grid.cell_size();
    if density < config.target_items_per_cell {
      (current + 1.0).min(MAX_CELL_SIZE)
    } else {
      (current - 1.0).max(MIN_CELL_SIZE)
    }
  }

  /// Packs unplaced shapes back into the viewport until the try budget runs
  /// out or the pool is exhausted.
  fn fill(&mut self, domain: Size2D<f32, WorldSpace>, config: &Config) -> bool {
    let mut tries_left = config.max_tries_per_frame;
    let mut changed = false;

    while tries_left > 0 {
      let id = match self.unplaced.last() {
        Some(&id) => id,
        None => break
      };
      if !self.try_place(id, domain, config, &mut tries_left) {
        break;
      }
      self.unplaced.pop();
      self.placed.push(id);
      self.grid.register_item(id, &self.items[id]);
      self.stats.placed += 1;
      changed = true;
    }

    self.stats.tries_used = config.max_tries_per_frame - tries_left;
    changed
  }

  /// Samples random centers until one admits a placement or the shared
  /// budget is exhausted. On success the arena slot is overwritten with the
  /// placed pattern.
  fn try_place(
    &mut self,
    id: ItemId,
    domain: Size2D<f32, WorldSpace>,
    config: &Config,
    tries_left: &mut u32
  ) -> bool {
    while *tries_left > 0 {
      *tries_left -= 1;

      let mut candidate = self.items[id].clone();
      candidate.center = Point2D::new(
        (domain.width * (self.rng.gen::<f32>() - 0.5)).round(),
        (domain.height * (self.rng.gen::<f32>() - 0.5)).round()
      );
      candidate.size = 0.0;

      // the origin stays uncovered so the zoom always has a gap to dive into
      let origin_bound = candidate.size_to_avoid_point(Point2D::origin());
      let (bound, parent) = self.biggest_size_possible(&candidate, origin_bound, config);

      let shrunk = bound * (1.0 - config.spacing);
      // even integer sizes halve cleanly into integer radii
      let size = 2.0 * (0.5 * shrunk).floor();
      if size < config.min_size || size > Pattern::MAX_SIZE {
        continue;
      }
      candidate.size = size;
      candidate.init_time = self.clock;

      // one level below the containing parent, or below the background
      // itself (level 0) for top-level shapes
      let (nesting_level, avoid_color) = match parent {
        Some(parent_id) => {
          let parent = &self.items[parent_id];
          (parent.nesting_level + 1, parent.raw_color)
        }
        None => match self.background {
          Some(bg) => (bg.nesting_level + 1, bg.color),
          None if config.black_background => (1, Color::BLACK),
          None => (1, Color::WHITE),
        }
      };
      candidate.nesting_level = nesting_level;
      candidate.raw_color = if config.use_palette {
        different_from(&mut self.rng, avoid_color)
      } else {
        Color::random(&mut self.rng)
      };

      self.items[id] = candidate;
      return true;
    }
    false
  }

  /// Largest size admissible at the candidate's center, bounded from above
  /// by `bound`, plus the deepest placed shape containing the center.
  ///
  /// Runs in two phases: the candidate's exact cell first, and the full cell
  /// group under the tentative extent only when the first answer reaches
  /// past the cell border and is therefore inconclusive.
  fn biggest_size_possible(
    &mut self,
    candidate: &Pattern,
    bound: f32,
    config: &Config
  ) -> (f32, Option<ItemId>) {
    self.current_test += 1;

    let cell = self.grid.cell_id(candidate.center);
    let (mut best, mut parent) = avoid_items(
      &self.items,
      &mut self.last_tested,
      self.current_test,
      candidate,
      self.grid.items_from_cell(cell.x, cell.y).iter().copied(),
      bound,
      config.allow_overlapping
    );

    if best >= self.grid.distance_to_closest_border(candidate.center) {
      let radius = V2::splat(0.5 * best);
      let min_cell = self.grid.cell_id(candidate.center - radius);
      let max_cell = self.grid.cell_id(candidate.center + radius);
      let (group_best, group_parent) = avoid_items(
        &self.items,
        &mut self.last_tested,
        self.current_test,
        candidate,
        self.grid.items_from_cells_group(min_cell, max_cell),
        best,
        config.allow_overlapping
      );
      best = group_best;
      parent = deepest(&self.items, parent, group_parent);
    }

    (best, parent)
  }
}

/// Folds avoidance queries over `ids`, skipping slots already tested in the
/// running generation. Free function so the grid, the arena and the
/// generation table can be borrowed independently.
fn avoid_items(
  items: &[Pattern],
  last_tested: &mut [u64],
  generation: u64,
  candidate: &Pattern,
  ids: impl Iterator<Item = ItemId>,
  bound: f32,
  allow_overlap: bool
) -> (f32, Option<ItemId>) {
  let mut best = bound;
  let mut parent = None;

  for id in ids {
    if last_tested[id] == generation {
      continue;
    }
    last_tested[id] = generation;

    let avoidance = candidate.size_to_avoid_item(&items[id], allow_overlap);
    if avoidance.is_inside {
      parent = deepest(items, parent, Some(id));
    }
    best = best.min(avoidance.size);
  }
  (best, parent)
}

/// Of two containing shapes, the one deeper in the nesting chain.
fn deepest(items: &[Pattern], a: Option<ItemId>, b: Option<ItemId>) -> Option<ItemId> {
  match (a, b) {
    (Some(a), Some(b)) => {
      if items[b].nesting_level > items[a].nesting_level { Some(b) } else { Some(a) }
    }
    (a, b) => a.or(b)
  }
}
