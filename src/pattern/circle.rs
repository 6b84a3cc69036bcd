//! Circle, `size` is the diameter.

use {
  super::{Avoidance, Visibility, WorldSpace},
  euclid::{Point2D, Size2D}
};

/// Returns the distance to the point itself: accepted sizes keep a radius of
/// half that distance, which leaves a gap of the same width again.
pub fn size_to_avoid_point(
  center: Point2D<f32, WorldSpace>,
  point: Point2D<f32, WorldSpace>
) -> f32 {
  (point - center).length()
}

pub fn size_to_avoid_item(
  center: Point2D<f32, WorldSpace>,
  other_center: Point2D<f32, WorldSpace>,
  other_size: f32,
  allow_overlap: bool
) -> Avoidance {
  let distance = (center - other_center).length();
  let other_radius = 0.5 * other_size;

  if distance <= other_radius {
    Avoidance {
      size: if allow_overlap { 2.0 * (other_radius - distance) } else { 0.0 },
      is_inside: true,
    }
  } else {
    Avoidance {
      size: 2.0 * (distance - other_radius),
      is_inside: false,
    }
  }
}

pub fn contains(
  center: Point2D<f32, WorldSpace>,
  size: f32,
  point: Point2D<f32, WorldSpace>
) -> bool {
  (point - center).length() <= 0.5 * size
}

pub fn visibility(
  center: Point2D<f32, WorldSpace>,
  size: f32,
  domain: Size2D<f32, WorldSpace>
) -> Visibility {
  let half_domain = domain * 0.5;
  let abs = center.to_vector().abs();
  let radius = 0.5 * size;

  // distance to the farthest viewport corner
  let dx = abs.x + half_domain.width;
  let dy = abs.y + half_domain.height;
  if radius * radius > dx * dx + dy * dy {
    Visibility::CoversView
  } else if abs.x - radius < half_domain.width && abs.y - radius < half_domain.height {
    Visibility::Visible
  } else {
    Visibility::OutOfView
  }
}
