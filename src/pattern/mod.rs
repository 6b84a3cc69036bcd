//! Shape primitives.
//!
//! One variant per geometric family, dispatched through a closed enum so the
//! grid and the engine stay family-agnostic. Every family answers the same two
//! geometric questions: how large may I grow before touching a fixed point,
//! and how large before conflicting with an already-placed instance of my
//! family. Sizes are characteristic lengths (side for squares and triangles,
//! diameter for circles); the convention throughout is that half the returned
//! size is the radius of safety.

use {
  crate::color::Color,
  euclid::{Box2D, Point2D, Size2D, Vector2D as V2},
  anyhow::bail,
  rand::Rng
};

pub mod square;
pub mod circle;
pub mod rectangle;
pub mod triangle;
pub mod heart;
#[cfg(test)] mod tests;

/// Centered viewport coordinate basis, one unit per pixel.
/// The viewport covers `[-w/2, w/2] × [-h/2, h/2]`.
#[derive(Debug, Copy, Clone)]
pub struct WorldSpace;

/// Shape family selector.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Primitive {
  Square,
  Circle,
  Rectangle,
  Triangle,
  Heart,
}

impl Primitive {
  /// The only fatal configuration error in the crate: an unknown family name.
  pub fn from_name(name: &str) -> anyhow::Result<Self> {
    Ok(match name {
      "square" => Primitive::Square,
      "circle" => Primitive::Circle,
      "rectangle" => Primitive::Rectangle,
      "triangle" => Primitive::Triangle,
      "heart" => Primitive::Heart,
      _ => bail!("invalid primitive {:?}", name)
    })
  }
}

/// Per-family immutable parameters, fixed at creation.
#[derive(Debug, Copy, Clone)]
pub enum Shape {
  Square,
  Circle,
  /// `base` is the unit-size extent, in `(0, 1]` per axis; the displayed
  /// width/height are `size * base`.
  Rectangle { base: Size2D<f32, WorldSpace> },
  /// Vertices and edges of the unit triangle, pre-rotated by `angle`.
  Triangle {
    angle: f32,
    vertices: [V2<f32, WorldSpace>; 3],
    edges: [V2<f32, WorldSpace>; 3],
  },
  Heart,
}

impl Shape {
  pub fn generate(primitive: Primitive, rng: &mut impl Rng) -> Self {
    match primitive {
      Primitive::Square => Shape::Square,
      Primitive::Circle => Shape::Circle,
      Primitive::Rectangle => Shape::Rectangle { base: rectangle::random_base(rng) },
      Primitive::Triangle => {
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let (vertices, edges) = triangle::rotated_vertices(angle);
        Shape::Triangle { angle, vertices, edges }
      }
      Primitive::Heart => Shape::Heart,
    }
  }
}

/// Result of a shape-vs-shape avoidance query.
///
/// `size` is the largest size the querying shape could take; `is_inside`
/// reports whether the query center already lies within the obstacle. When
/// the center is inside and overlap is disallowed, `size` is zero.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Avoidance {
  pub size: f32,
  pub is_inside: bool,
}

/// Classification of a shape against the viewport.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Visibility {
  Visible,
  OutOfView,
  /// Large enough to enclose the entire viewport.
  CoversView,
}

/// One shape instance of the pool.
#[derive(Debug, Clone)]
pub struct Pattern {
  pub shape: Shape,
  pub center: Point2D<f32, WorldSpace>,
  pub size: f32,
  /// Depth of the containment chain, background = 0.
  pub nesting_level: u32,
  pub raw_color: Color,
  /// Engine-clock timestamp of the last successful placement, for fade-in.
  pub init_time: f32,
}

impl Pattern {
  /// Safety ceiling: sizes beyond this feed degenerate floats into rendering,
  /// so the engine evicts the shape instead.
  pub const MAX_SIZE: f32 = 1_000_000.0;
  const MAX_SIZE_LOWER: f32 = 0.75 * Pattern::MAX_SIZE;

  /// A fresh, unplaced pattern: zero size, origin center, random raw color.
  pub fn new(primitive: Primitive, rng: &mut impl Rng) -> Self {
    Pattern {
      shape: Shape::generate(primitive, rng),
      center: Point2D::origin(),
      size: 0.0,
      nesting_level: 0,
      raw_color: Color::random(rng),
      init_time: 0.0,
    }
  }

  pub fn primitive(&self) -> Primitive {
    match self.shape {
      Shape::Square => Primitive::Square,
      Shape::Circle => Primitive::Circle,
      Shape::Rectangle { .. } => Primitive::Rectangle,
      Shape::Triangle { .. } => Primitive::Triangle,
      Shape::Heart => Primitive::Heart,
    }
  }

  /// Largest size this shape could have, centered where it is, without
  /// covering `point`. Exact and closed-form for every family.
  pub fn size_to_avoid_point(&self, point: Point2D<f32, WorldSpace>) -> f32 {
    match self.shape {
      Shape::Square => square::size_to_avoid_point(self.center, point),
      Shape::Circle => circle::size_to_avoid_point(self.center, point),
      Shape::Rectangle { base } => rectangle::size_to_avoid_point(self.center, base, point),
      Shape::Triangle { vertices, edges, .. } =>
        triangle::size_to_avoid_point(self.center, &vertices, &edges, point),
      Shape::Heart => heart::size_to_avoid_point(self.center, point),
    }
  }

  /// Largest size this shape could have without conflicting with `other`,
  /// which is already placed and keeps its size.
  ///
  /// Both shapes belong to the same family; the pool is homogeneous by
  /// construction.
  pub fn size_to_avoid_item(&self, other: &Pattern, allow_overlap: bool) -> Avoidance {
    match (&self.shape, &other.shape) {
      (Shape::Square, Shape::Square) =>
        square::size_to_avoid_item(self.center, other.center, other.size, allow_overlap),
      (Shape::Circle, Shape::Circle) =>
        circle::size_to_avoid_item(self.center, other.center, other.size, allow_overlap),
      (Shape::Rectangle { base }, Shape::Rectangle { base: other_base }) =>
        rectangle::size_to_avoid_item(
          self.center, *base,
          other.center, other.size, *other_base,
          allow_overlap
        ),
      (Shape::Triangle { .. }, Shape::Triangle { .. }) =>
        triangle::size_to_avoid_item(self.center, other.center, other.size, allow_overlap),
      (Shape::Heart, Shape::Heart) =>
        heart::size_to_avoid_item(self.center, other.center, other.size, allow_overlap),
      _ => unreachable!("mixed shape families in one pool")
    }
  }

  pub fn contains_point(&self, point: Point2D<f32, WorldSpace>) -> bool {
    match self.shape {
      Shape::Square => square::contains(self.center, self.size, point),
      Shape::Circle => circle::contains(self.center, self.size, point),
      Shape::Rectangle { base } => rectangle::contains(self.center, self.size, base, point),
      Shape::Triangle { vertices, edges, .. } =>
        triangle::contains(self.center, self.size, &vertices, &edges, point),
      Shape::Heart => heart::contains(self.center, self.size, point),
    }
  }

  pub fn visibility(&self, domain: Size2D<f32, WorldSpace>) -> Visibility {
    match self.shape {
      Shape::Square => square::visibility(self.center, self.size, domain),
      Shape::Circle => circle::visibility(self.center, self.size, domain),
      Shape::Rectangle { base } => rectangle::visibility(self.center, self.size, base, domain),
      // the triangle is inscribed in its bounding square
      Shape::Triangle { .. } => square::visibility(self.center, self.size, domain),
      Shape::Heart => heart::visibility(self.center, self.size, domain),
    }
  }

  /// Moves the center away from `focus` by `factor` and scales the size
  /// accordingly. The only post-placement mutation besides recycling.
  pub fn zoom(&mut self, focus: Point2D<f32, WorldSpace>, factor: f32) {
    self.center = ((self.center - focus) * factor + focus.to_vector()).to_point();
    self.size *= factor;
  }

  /// Axis-aligned box of side `size`; a conservative bound for every family.
  pub fn bounding_box(&self) -> Box2D<f32, WorldSpace> {
    let half = V2::splat(0.5 * self.size);
    Box2D::new(
      self.center - half,
      self.center + half
    )
  }

  /// Display opacity: fades in over `blend_time` after placement, and fades
  /// out as the size approaches the safety ceiling.
  pub fn opacity(&self, now: f32, blend_time: f32) -> f32 {
    if self.size > Pattern::MAX_SIZE_LOWER {
      let r = (self.size - Pattern::MAX_SIZE_LOWER)
        / (Pattern::MAX_SIZE - Pattern::MAX_SIZE_LOWER);
      return (1.0 - r).max(0.0);
    }
    if blend_time <= 0.0 {
      return 1.0;
    }
    let lifetime = now - self.init_time;
    if lifetime >= blend_time {
      1.0
    } else {
      (lifetime / blend_time).max(0.0)
    }
  }
}
