//! Axis-aligned square, `size` is the side length.

use {
  super::{Avoidance, Visibility, WorldSpace},
  euclid::{Point2D, Size2D}
};

pub fn size_to_avoid_point(
  center: Point2D<f32, WorldSpace>,
  point: Point2D<f32, WorldSpace>
) -> f32 {
  let to_point = point - center;
  2.0 * to_point.x.abs().max(to_point.y.abs())
}

pub fn size_to_avoid_item(
  center: Point2D<f32, WorldSpace>,
  other_center: Point2D<f32, WorldSpace>,
  other_size: f32,
  allow_overlap: bool
) -> Avoidance {
  let delta = (center - other_center).abs();
  let half_side = 0.5 * other_size;

  if delta.x < half_side && delta.y < half_side {
    // center inside the obstacle; room left is towards the nearest edge
    Avoidance {
      size: if allow_overlap {
        2.0 * (half_side - delta.x).min(half_side - delta.y)
      } else {
        0.0
      },
      is_inside: true,
    }
  } else {
    let size = if delta.x < half_side {
      2.0 * (delta.y - half_side)
    } else if delta.y < half_side {
      2.0 * (delta.x - half_side)
    } else {
      2.0 * (delta.x - half_side).max(delta.y - half_side)
    };
    Avoidance { size, is_inside: false }
  }
}

pub fn contains(
  center: Point2D<f32, WorldSpace>,
  size: f32,
  point: Point2D<f32, WorldSpace>
) -> bool {
  let delta = (point - center).abs();
  let half = 0.5 * size;
  delta.x <= half && delta.y <= half
}

pub fn visibility(
  center: Point2D<f32, WorldSpace>,
  size: f32,
  domain: Size2D<f32, WorldSpace>
) -> Visibility {
  let half_domain = domain * 0.5;
  let abs = center.to_vector().abs();
  let half_size = 0.5 * size;

  if abs.x + half_domain.width < half_size && abs.y + half_domain.height < half_size {
    Visibility::CoversView
  } else if abs.x - half_size < half_domain.width && abs.y - half_size < half_domain.height {
    Visibility::Visible
  } else {
    Visibility::OutOfView
  }
}
