//! Heart curve: a square rotated 45° with two half-circle lobes on its upper
//! edges. `size` is the height of the curve.
//!
//! Point avoidance is closed-form in polar coordinates. Heart-vs-heart
//! avoidance is exact in the zones where one of the cusps or the rotated
//! square dominates, and falls back to an iterative angular refinement along
//! the obstacle's lobe arc everywhere else. The fallback is a bounded
//! heuristic, accurate enough for display purposes, not an exact solution.

use {
  super::{Avoidance, Visibility, WorldSpace},
  euclid::{Point2D, Size2D},
  std::f32::consts::FRAC_PI_4
};

const A: f32 = 0.5 * 0.828_427_12; // 2 / (1 + sqrt(2)), cusp offset
const B: f32 = 0.5 * 1.171_572_88; // sqrt(2) * 2A, half-diagonal of the core square
const C: f32 = 0.5 * 0.585_786_44; // 2 - sqrt(2), lobe radius
const INV_SQRT_2: f32 = std::f32::consts::FRAC_1_SQRT_2;

// avoids dividing by zero in the polar form
const EPSILON: f32 = 1e-8;

pub fn size_to_avoid_point(
  center: Point2D<f32, WorldSpace>,
  point: Point2D<f32, WorldSpace>
) -> f32 {
  let to_x = (point.x - center.x).abs(); // the curve is x-symmetric
  let to_y = point.y - center.y;

  let distance = (to_x * to_x + to_y * to_y).sqrt();
  if distance < EPSILON {
    return 0.0;
  }

  // radius of the unit curve in the point's direction
  let r = if to_y >= 0.0 {
    distance * A / (to_x + to_y + EPSILON)
  } else {
    A * (to_x - to_y) / (distance + EPSILON)
  };
  distance / r
}

pub fn contains(
  center: Point2D<f32, WorldSpace>,
  size: f32,
  point: Point2D<f32, WorldSpace>
) -> bool {
  size_to_avoid_point(center, point) <= size
}

pub fn size_to_avoid_item(
  center: Point2D<f32, WorldSpace>,
  other_center: Point2D<f32, WorldSpace>,
  other_size: f32,
  allow_overlap: bool
) -> Avoidance {
  let is_inside = contains(other_center, other_size, center);
  if is_inside && !allow_overlap {
    return Avoidance { size: 0.0, is_inside };
  }

  let delta_x = (center.x - other_center.x).abs(); // symmetry
  let delta_y = center.y - other_center.y;
  // coordinates aligned with the obstacle's core square
  let rotated_x = INV_SQRT_2 * (delta_x - delta_y);
  let rotated_y = INV_SQRT_2 * (delta_y + delta_x);

  let other_half_b = 0.5 * other_size * B;
  let mut size = 0.0;

  if rotated_x >= -other_half_b && rotated_x <= other_half_b {
    if rotated_y >= other_half_b {
      // below the obstacle
      size = (rotated_y - other_half_b) / B;
    } else if rotated_y >= 0.0 {
      if rotated_x.abs() <= rotated_y {
        // inside the core square; room towards its lower corner
        size = 2.0 * (other_half_b - rotated_y) / B;
      }
    } else {
      // above the waist; the top cusp is the binding constraint
      let top_cusp = Point2D::new(
        other_center.x,
        other_center.y - other_size * A
      );
      size = size_to_avoid_point(center, top_cusp);
    }
  } else if rotated_x <= -other_half_b {
    // past the lower cusp
    let bottom_cusp = Point2D::new(
      other_center.x,
      other_center.y + other_size * A
    );
    size = size_to_avoid_point(center, bottom_cusp);
  }

  if size <= 0.0 {
    // facing a lobe: no easy closed form here, approximate by refining the
    // binding angle along the obstacle's lobe arc
    size = lobe_arc_min(center, other_center, other_size);
  }

  Avoidance { size, is_inside }
}

/// Minimum of `size_to_avoid_point` over the obstacle's near-side lobe arc,
/// refined by repeated re-sampling around the current best angle.
fn lobe_arc_min(
  center: Point2D<f32, WorldSpace>,
  other_center: Point2D<f32, WorldSpace>,
  other_size: f32
) -> f32 {
  const PASSES: usize = 12;
  const SAMPLES: usize = 5;
  const ARC_LO: f32 = -FRAC_PI_4;
  const ARC_HI: f32 = 3.0 * FRAC_PI_4;

  let side = if center.x >= other_center.x { 1.0 } else { -1.0 };
  let half_a = 0.5 * other_size * A;
  let lobe_radius = other_size * C;
  let boundary = |angle: f32| Point2D::new(
    other_center.x + side * (half_a + lobe_radius * angle.cos()),
    other_center.y - (half_a + lobe_radius * angle.sin())
  );

  let (mut lo, mut hi) = (ARC_LO, ARC_HI);
  let mut best_size = f32::MAX;
  for _ in 0..PASSES {
    let step = (hi - lo) / (SAMPLES - 1) as f32;
    let mut pass_best = (f32::MAX, lo);
    for i in 0..SAMPLES {
      let angle = lo + step * i as f32;
      let size = size_to_avoid_point(center, boundary(angle));
      if size < pass_best.0 {
        pass_best = (size, angle);
      }
    }
    best_size = best_size.min(pass_best.0);
    lo = (pass_best.1 - step).max(ARC_LO);
    hi = (pass_best.1 + step).min(ARC_HI);
  }
  best_size
}

pub fn visibility(
  center: Point2D<f32, WorldSpace>,
  size: f32,
  domain: Size2D<f32, WorldSpace>
) -> Visibility {
  let half_w = 0.5 * domain.width;
  let half_h = 0.5 * domain.height;

  let corners = [
    Point2D::new(-half_w, -half_h),
    Point2D::new(half_w, -half_h),
    Point2D::new(half_w, half_h),
    Point2D::new(-half_w, half_h),
  ];
  let inside = corners.map(|corner| contains(center, size, corner));

  if inside.iter().all(|&x| x)
    && contains(center, size, Point2D::new(center.x, -half_h)) {
    // all corners plus the notch above the center
    return Visibility::CoversView;
  }
  if inside.iter().any(|&x| x) {
    return Visibility::Visible;
  }
  if center.x.abs() - 0.5 * size < half_w && center.y.abs() - 0.5 * size < half_h {
    return Visibility::Visible;
  }
  Visibility::OutOfView
}
