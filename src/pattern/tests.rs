use {
  super::*,
  euclid::{Point2D, Size2D},
  rand::SeedableRng,
  rand_pcg::Lcg128Xsl64
};

fn pt(x: f32, y: f32) -> Point2D<f32, WorldSpace> {
  Point2D::new(x, y)
}

fn domain(w: f32, h: f32) -> Size2D<f32, WorldSpace> {
  Size2D::new(w, h)
}

fn pattern(primitive: Primitive, center: Point2D<f32, WorldSpace>, size: f32) -> Pattern {
  let mut rng = Lcg128Xsl64::seed_from_u64(0);
  let mut item = Pattern::new(primitive, &mut rng);
  item.center = center;
  item.size = size;
  item
}

#[test] fn fresh_pattern_is_unplaced() {
  let mut rng = Lcg128Xsl64::seed_from_u64(0);
  let item = Pattern::new(Primitive::Heart, &mut rng);
  assert_eq!(item.size, 0.0);
  assert_eq!(item.center, Point2D::origin());
  assert_eq!(item.nesting_level, 0);
}

#[test] fn primitive_from_name() {
  assert_eq!(Primitive::from_name("heart").unwrap(), Primitive::Heart);
  assert_eq!(Primitive::from_name("square").unwrap(), Primitive::Square);
  assert!(Primitive::from_name("hexagon").is_err());
}

#[test] fn square_avoid_point_is_chebyshev() {
  assert_eq!(square::size_to_avoid_point(pt(0.0, 0.0), pt(10.0, 4.0)), 20.0);
  assert_eq!(square::size_to_avoid_point(pt(0.0, 0.0), pt(-3.0, -7.0)), 14.0);
  // coincident point leaves no room
  assert_eq!(square::size_to_avoid_point(pt(5.0, 5.0), pt(5.0, 5.0)), 0.0);
}

#[test] fn square_avoid_item_touches_exactly() {
  let avoidance = square::size_to_avoid_item(pt(0.0, 0.0), pt(30.0, 0.0), 20.0, false);
  assert_eq!(avoidance.size, 40.0); // spans [-20, 20], obstacle starts at 20
  assert!(!avoidance.is_inside);
}

#[test] fn square_avoid_item_inside() {
  let blocked = square::size_to_avoid_item(pt(2.0, 3.0), pt(0.0, 0.0), 20.0, false);
  assert_eq!(blocked.size, 0.0);
  assert!(blocked.is_inside);

  let nested = square::size_to_avoid_item(pt(2.0, 3.0), pt(0.0, 0.0), 20.0, true);
  assert_eq!(nested.size, 14.0); // 2 * min(10 - 2, 10 - 3)
  assert!(nested.is_inside);
}

#[test] fn square_visibility() {
  let view = domain(100.0, 100.0);
  assert_eq!(square::visibility(pt(0.0, 0.0), 300.0, view), Visibility::CoversView);
  assert_eq!(square::visibility(pt(60.0, 0.0), 40.0, view), Visibility::Visible);
  assert_eq!(square::visibility(pt(80.0, 0.0), 40.0, view), Visibility::OutOfView);
}

#[test] fn circle_avoid_point_is_distance() {
  assert_eq!(circle::size_to_avoid_point(pt(0.0, 0.0), pt(3.0, 4.0)), 5.0);
}

#[test] fn circle_avoid_item() {
  let free = circle::size_to_avoid_item(pt(0.0, 0.0), pt(10.0, 0.0), 10.0, false);
  assert_eq!(free.size, 10.0);
  assert!(!free.is_inside);

  let blocked = circle::size_to_avoid_item(pt(1.0, 0.0), pt(0.0, 0.0), 10.0, false);
  assert_eq!(blocked.size, 0.0);
  assert!(blocked.is_inside);

  let nested = circle::size_to_avoid_item(pt(1.0, 0.0), pt(0.0, 0.0), 10.0, true);
  assert_eq!(nested.size, 8.0); // 2 * (5 - 1)
  assert!(nested.is_inside);
}

#[test] fn circle_visibility_covers_past_farthest_corner() {
  let view = domain(100.0, 100.0);
  // farthest corner is at distance 50 * sqrt(2) ~ 70.7
  assert_eq!(circle::visibility(pt(0.0, 0.0), 142.0, view), Visibility::CoversView);
  assert_eq!(circle::visibility(pt(0.0, 0.0), 140.0, view), Visibility::Visible);
  assert_eq!(circle::visibility(pt(120.0, 0.0), 100.0, view), Visibility::OutOfView);
}

#[test] fn rectangle_base_is_normalized() {
  let mut rng = Lcg128Xsl64::seed_from_u64(7);
  for _ in 0..64 {
    let base = rectangle::random_base(&mut rng);
    assert!(base.width > 0.0 && base.width <= 1.0);
    assert!(base.height > 0.0 && base.height <= 1.0);
    assert_eq!(base.width.max(base.height), 1.0);
  }
}

#[test] fn rectangle_avoid_point_scales_by_base() {
  let base = Size2D::new(1.0, 0.5);
  assert_eq!(rectangle::size_to_avoid_point(pt(0.0, 0.0), base, pt(4.0, 4.0)), 16.0);
}

#[test] fn rectangle_avoid_item() {
  let square_base = Size2D::new(1.0, 1.0);
  let flat_base = Size2D::new(1.0, 0.5);
  let avoidance = rectangle::size_to_avoid_item(
    pt(20.0, 0.0), square_base,
    pt(0.0, 0.0), 10.0, flat_base,
    false
  );
  assert_eq!(avoidance.size, 30.0); // 2 * (20 - 5)
  assert!(!avoidance.is_inside);
}

#[test] fn triangle_avoid_point_hits_edges_and_vertices() {
  let (vertices, edges) = triangle::rotated_vertices(0.0);
  // downward ray crosses the horizontal edge at y = 0.25
  let below = triangle::size_to_avoid_point(pt(0.0, 0.0), &vertices, &edges, pt(0.0, 1.0));
  assert!((below - 4.0).abs() < 1e-4);
  // upward ray exits through the apex at y = -0.5
  let above = triangle::size_to_avoid_point(pt(0.0, 0.0), &vertices, &edges, pt(0.0, -1.0));
  assert!((above - 2.0).abs() < 1e-4);
  // coincident point leaves no room
  assert_eq!(triangle::size_to_avoid_point(pt(0.0, 0.0), &vertices, &edges, pt(0.0, 0.0)), 0.0);
}

#[test] fn triangle_containment_follows_avoid_point() {
  let (vertices, edges) = triangle::rotated_vertices(0.0);
  assert!(triangle::contains(pt(0.0, 0.0), 4.0, &vertices, &edges, pt(0.0, 1.0)));
  assert!(!triangle::contains(pt(0.0, 0.0), 3.9, &vertices, &edges, pt(0.0, 1.0)));
}

#[test] fn heart_avoid_point_on_cusps() {
  // the unit heart has its bottom cusp at (0, A) and top cusp at (0, -A)
  let bottom = heart::size_to_avoid_point(pt(0.0, 0.0), pt(0.0, 0.414_213_56));
  assert!((bottom - 1.0).abs() < 1e-3, "bottom cusp: {}", bottom);
  let top = heart::size_to_avoid_point(pt(0.0, 0.0), pt(0.0, -0.414_213_56));
  assert!((top - 1.0).abs() < 1e-3, "top cusp: {}", top);
  // widest point of the right lobe
  let lobe = heart::size_to_avoid_point(pt(0.0, 0.0), pt(0.5, -0.207_106_78));
  assert!((lobe - 1.0).abs() < 1e-2, "lobe: {}", lobe);
}

#[test] fn heart_containment() {
  assert!(heart::contains(pt(0.0, 0.0), 1.0, pt(0.0, 0.4)));
  assert!(!heart::contains(pt(0.0, 0.0), 1.0, pt(0.0, 0.42)));
  assert!(heart::contains(pt(0.0, 0.0), 1.0, pt(0.0, 0.0)));
}

#[test] fn heart_avoid_item_stacked_vertically() {
  // a heart directly below another touches its top cusp with the
  // obstacle's bottom cusp: size * A = 10 - A
  let avoidance = heart::size_to_avoid_item(pt(0.0, 10.0), pt(0.0, 0.0), 1.0, false);
  let expected = (10.0 - 0.414_213_56) / 0.414_213_56;
  assert!((avoidance.size - expected).abs() < 0.1, "got {}", avoidance.size);
  assert!(!avoidance.is_inside);
}

#[test] fn heart_avoid_item_lobe_fallback_is_bounded() {
  // side by side, the binding constraint is the obstacle's lobe; the
  // refinement must not exceed the avoidance of the widest lobe point
  let avoidance = heart::size_to_avoid_item(pt(10.0, 0.0), pt(0.0, 0.0), 1.0, false);
  let widest = heart::size_to_avoid_point(pt(10.0, 0.0), pt(0.5, -0.207_106_78));
  assert!(avoidance.size > 0.0);
  assert!(avoidance.size <= widest + 1e-3);
}

#[test] fn heart_avoid_item_inside() {
  let blocked = heart::size_to_avoid_item(pt(0.0, 0.1), pt(0.0, 0.0), 1.0, false);
  assert_eq!(blocked.size, 0.0);
  assert!(blocked.is_inside);

  let nested = heart::size_to_avoid_item(pt(0.0, 0.1), pt(0.0, 0.0), 1.0, true);
  assert!(nested.is_inside);
  assert!(nested.size > 0.0);
}

#[test] fn zoom_rescales_about_focus() {
  let mut item = pattern(Primitive::Circle, pt(10.0, 0.0), 4.0);
  item.zoom(pt(5.0, 0.0), 2.0);
  assert_eq!(item.center, pt(15.0, 0.0));
  assert_eq!(item.size, 8.0);

  // the focus itself is a fixed point
  let mut item = pattern(Primitive::Circle, pt(5.0, 5.0), 4.0);
  item.zoom(pt(5.0, 5.0), 3.0);
  assert_eq!(item.center, pt(5.0, 5.0));
  assert_eq!(item.size, 12.0);
}

#[test] fn bounding_box_is_centered() {
  let item = pattern(Primitive::Square, pt(10.0, -10.0), 6.0);
  let bbox = item.bounding_box();
  assert_eq!(bbox.min, pt(7.0, -13.0));
  assert_eq!(bbox.max, pt(13.0, -7.0));
}

#[test] fn opacity_fades_in_and_caps_out() {
  let mut item = pattern(Primitive::Circle, pt(0.0, 0.0), 10.0);
  item.init_time = 1.0;
  assert_eq!(item.opacity(1.0, 0.5), 0.0);
  assert_eq!(item.opacity(1.25, 0.5), 0.5);
  assert_eq!(item.opacity(2.0, 0.5), 1.0);
  // no blending configured
  assert_eq!(item.opacity(1.0, 0.0), 1.0);

  // fade-out ramp near the safety ceiling
  item.size = Pattern::MAX_SIZE;
  assert_eq!(item.opacity(100.0, 0.5), 0.0);
  item.size = 0.75 * Pattern::MAX_SIZE + 0.125 * Pattern::MAX_SIZE;
  assert!((item.opacity(100.0, 0.5) - 0.5).abs() < 1e-3);
}

#[test] fn visibility_dispatch_uses_bounding_square_for_triangles() {
  let item = pattern(Primitive::Triangle, pt(0.0, 0.0), 300.0);
  assert_eq!(item.visibility(domain(100.0, 100.0)), Visibility::CoversView);
}
