use {
  super::*,
  crate::pattern::Primitive,
  euclid::{Point2D, Size2D},
  rand::SeedableRng,
  rand_pcg::Lcg128Xsl64
};

fn circle_at(x: f32, y: f32, size: f32) -> Pattern {
  let mut rng = Lcg128Xsl64::seed_from_u64(0);
  let mut item = Pattern::new(Primitive::Circle, &mut rng);
  item.center = Point2D::new(x, y);
  item.size = size;
  item.raw_color = Color::WHITE;
  item
}

fn plotter() -> ImagePlotter {
  ImagePlotter::new(
    Size2D::new(64, 64),
    Size2D::new(64.0, 64.0),
    ColorMode::default()
  )
}

#[test] fn fills_covered_pixels_only() {
  let item = circle_at(0.0, 0.0, 20.0);
  let mut plotter = plotter();
  plotter.initialize(Color::BLACK);
  plotter.draw_circles(&[&item]);
  plotter.finalize();

  let image = plotter.into_image();
  assert_eq!(*image.get_pixel(32, 32), Rgba([255, 255, 255, 255]));
  assert_eq!(*image.get_pixel(1, 1), Rgba([0, 0, 0, 255]));
  // just outside the radius on the horizontal axis
  assert_eq!(*image.get_pixel(32 + 11, 32), Rgba([0, 0, 0, 255]));
}

#[test] fn clips_shapes_leaving_the_frame() {
  // centered past the left edge, half of it is visible
  let item = circle_at(-32.0, 0.0, 24.0);
  let mut plotter = plotter();
  plotter.initialize(Color::BLACK);
  plotter.draw_circles(&[&item]);

  let image = plotter.into_image();
  assert_eq!(*image.get_pixel(2, 32), Rgba([255, 255, 255, 255]));
  assert_eq!(*image.get_pixel(32, 32), Rgba([0, 0, 0, 255]));
}

#[test] fn blends_by_opacity_while_fading_in() {
  let mut item = circle_at(0.0, 0.0, 20.0);
  item.init_time = 0.0;

  let mut plotter = plotter();
  plotter.initialize(Color::BLACK);
  // halfway through a 0.5 second fade
  plotter.set_blending(0.25, 0.5);
  plotter.draw_circles(&[&item]);

  let image = plotter.into_image();
  let pixel = image.get_pixel(32, 32);
  assert!(pixel[0] > 100 && pixel[0] < 150, "got {:?}", pixel);
}

#[test] fn parallel_draw_matches_sequential() {
  // disjoint shapes write disjoint pixels, so both paths must agree
  let items = [
    circle_at(-16.0, -16.0, 16.0),
    circle_at(16.0, 16.0, 16.0),
  ];
  let refs: Vec<&Pattern> = items.iter().collect();

  let mut sequential = plotter();
  sequential.initialize(Color::BLACK);
  sequential.draw_circles(&refs);

  let mut parallel = plotter().parallel();
  parallel.initialize(Color::BLACK);
  parallel.draw_circles(&refs);

  assert_eq!(sequential.into_image().as_raw(), parallel.into_image().as_raw());
}

#[test] fn grid_lines_are_axis_aligned_pixel_runs() {
  let lines = [Line {
    from: Point2D::new(-32.0, 0.0),
    to: Point2D::new(32.0, 0.0),
  }];
  let mut plotter = plotter();
  plotter.initialize(Color::BLACK);
  plotter.draw_lines(&lines, Color::GREEN);

  let image = plotter.into_image();
  for x in [0, 20, 40, 63] {
    assert_eq!(*image.get_pixel(x, 32), Rgba([0, 255, 0, 255]));
  }
  assert_eq!(*image.get_pixel(32, 10), Rgba([0, 0, 0, 255]));
}
