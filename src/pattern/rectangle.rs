//! Axis-aligned rectangle with a per-instance aspect ratio.
//!
//! The aspect ratio is drawn once at creation and folded into a unit-size
//! `base` extent (the longer side is 1); displayed width/height are
//! `size * base.width` and `size * base.height`.

use {
  super::{Avoidance, Visibility, WorldSpace},
  euclid::{Point2D, Size2D},
  rand::Rng
};

/// Spread of the aspect ratio around 1, must be in `[0, 1]`.
const ASPECT_RATIO_VARIATION: f32 = 0.5;

pub fn random_base(rng: &mut impl Rng) -> Size2D<f32, WorldSpace> {
  let aspect_ratio = 1.0 + ASPECT_RATIO_VARIATION * rng.gen_range(-1.0..1.0f32);
  if aspect_ratio >= 1.0 {
    Size2D::new(1.0, 1.0 / aspect_ratio)
  } else {
    Size2D::new(aspect_ratio, 1.0)
  }
}

pub fn size_to_avoid_point(
  center: Point2D<f32, WorldSpace>,
  base: Size2D<f32, WorldSpace>,
  point: Point2D<f32, WorldSpace>
) -> f32 {
  let to_point = point - center;
  let max_size_x = to_point.x.abs() / base.width;
  let max_size_y = to_point.y.abs() / base.height;
  2.0 * max_size_x.max(max_size_y)
}

pub fn size_to_avoid_item(
  center: Point2D<f32, WorldSpace>,
  base: Size2D<f32, WorldSpace>,
  other_center: Point2D<f32, WorldSpace>,
  other_size: f32,
  other_base: Size2D<f32, WorldSpace>,
  allow_overlap: bool
) -> Avoidance {
  let delta = (center - other_center).abs();
  let half_width = 0.5 * other_size * other_base.width;
  let half_height = 0.5 * other_size * other_base.height;

  if delta.x < half_width && delta.y < half_height {
    Avoidance {
      size: if allow_overlap {
        2.0 * ((half_width - delta.x) / base.width)
          .min((half_height - delta.y) / base.height)
      } else {
        0.0
      },
      is_inside: true,
    }
  } else {
    let size = if delta.x < half_width {
      2.0 * (delta.y - half_height) / base.height
    } else if delta.y < half_height {
      2.0 * (delta.x - half_width) / base.width
    } else {
      2.0 * ((delta.x - half_width) / base.width)
        .max((delta.y - half_height) / base.height)
    };
    Avoidance { size, is_inside: false }
  }
}

pub fn contains(
  center: Point2D<f32, WorldSpace>,
  size: f32,
  base: Size2D<f32, WorldSpace>,
  point: Point2D<f32, WorldSpace>
) -> bool {
  let delta = (point - center).abs();
  delta.x <= 0.5 * size * base.width && delta.y <= 0.5 * size * base.height
}

pub fn visibility(
  center: Point2D<f32, WorldSpace>,
  size: f32,
  base: Size2D<f32, WorldSpace>,
  domain: Size2D<f32, WorldSpace>
) -> Visibility {
  let half_domain = domain * 0.5;
  let abs = center.to_vector().abs();
  let half_width = 0.5 * size * base.width;
  let half_height = 0.5 * size * base.height;

  if abs.x + half_domain.width < half_width && abs.y + half_domain.height < half_height {
    Visibility::CoversView
  } else if abs.x - half_width < half_domain.width && abs.y - half_height < half_domain.height {
    Visibility::Visible
  } else {
    Visibility::OutOfView
  }
}
