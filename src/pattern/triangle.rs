//! Equilateral triangle with a per-instance rotation, fixed at creation.
//!
//! Point avoidance is exact (ray/edge intersection); triangle-vs-triangle
//! avoidance approximates each obstacle by its bounding square, like the
//! square family does.

use {
  super::{square, Avoidance, WorldSpace},
  euclid::{Point2D, Vector2D as V2}
};

// unit triangle, pointing up, centered on the origin
const BASE_ANGLE: f32 = std::f32::consts::PI * 7.0 / 6.0;

fn base_vertices() -> [V2<f32, WorldSpace>; 3] {
  let (sin, cos) = BASE_ANGLE.sin_cos();
  [
    V2::new(0.0, -0.5),
    V2::new(0.5 * cos, -0.5 * sin),
    V2::new(-0.5 * cos, -0.5 * sin),
  ]
}

pub fn rotated_vertices(angle: f32) -> ([V2<f32, WorldSpace>; 3], [V2<f32, WorldSpace>; 3]) {
  let (sin, cos) = angle.sin_cos();
  let rotate = |p: V2<f32, WorldSpace>| V2::new(
    p.x * cos - p.y * sin,
    p.x * sin + p.y * cos
  );

  let [p1, p2, p3] = base_vertices().map(rotate);
  (
    [p1, p2, p3],
    [p2 - p1, p3 - p2, p1 - p3]
  )
}

/// Segments are `from + t * delta` for `0 <= t <= 1`.
/// Returns the parameter of the intersection along the second segment, or a
/// negative value if the segments do not cross.
fn segments_intersection(
  from1: V2<f32, WorldSpace>, delta1: V2<f32, WorldSpace>,
  from2: V2<f32, WorldSpace>, delta2: V2<f32, WorldSpace>
) -> f32 {
  let denom = delta2.y * delta1.x - delta1.y * delta2.x;
  if denom != 0.0 {
    let inv_denom = 1.0 / denom;
    let delta_from = from2 - from1;

    let t1 = (delta2.y * delta_from.x - delta2.x * delta_from.y) * inv_denom;
    if (0.0..=1.0).contains(&t1) {
      return (delta1.y * delta_from.x - delta1.x * delta_from.y) * inv_denom;
    }
  }
  -1.0
}

pub fn size_to_avoid_point(
  center: Point2D<f32, WorldSpace>,
  vertices: &[V2<f32, WorldSpace>; 3],
  edges: &[V2<f32, WorldSpace>; 3],
  point: Point2D<f32, WorldSpace>
) -> f32 {
  let to_point = point - center;
  if to_point.x == 0.0 && to_point.y == 0.0 {
    return 0.0;
  }

  // where does the ray center -> point cross the unit boundary?
  let mut intersection = segments_intersection(vertices[0], edges[0], V2::zero(), to_point);
  if intersection < 0.0 {
    intersection = segments_intersection(vertices[1], edges[1], V2::zero(), to_point);
    if intersection < 0.0 {
      intersection = segments_intersection(vertices[2], edges[2], V2::zero(), to_point);
    }
  }

  if intersection > 0.0 {
    1.0 / intersection
  } else {
    0.0
  }
}

pub fn size_to_avoid_item(
  center: Point2D<f32, WorldSpace>,
  other_center: Point2D<f32, WorldSpace>,
  other_size: f32,
  allow_overlap: bool
) -> Avoidance {
  // bounding-square approximation of the obstacle
  square::size_to_avoid_item(center, other_center, other_size, allow_overlap)
}

pub fn contains(
  center: Point2D<f32, WorldSpace>,
  size: f32,
  vertices: &[V2<f32, WorldSpace>; 3],
  edges: &[V2<f32, WorldSpace>; 3],
  point: Point2D<f32, WorldSpace>
) -> bool {
  size_to_avoid_point(center, vertices, edges, point) <= size
}
