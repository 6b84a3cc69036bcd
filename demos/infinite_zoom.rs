//! Packs the viewport with one shape family, zooms into it for ten simulated
//! seconds and writes the final frame to `out.png`.
//!
//! `cargo run --example infinite_zoom --features drawing -- heart`

use {
  anyhow::Result,
  euclid::Size2D,
  shape_packing::{
    drawing::ImagePlotter,
    engine::{Config, Engine},
    pattern::Primitive
  }
};

fn main() -> Result<()> {
  let primitive = Primitive::from_name(
    &std::env::args().nth(1).unwrap_or_else(|| "heart".to_string())
  )?;
  let config = Config {
    primitive,
    zoom_speed: 0.3,
    use_palette: true,
    ..Config::default()
  };
  let domain = Size2D::new(1024.0, 1024.0);

  let mut engine = Engine::new(0);
  engine.reset(&config);
  engine.set_items_count(2000);

  for _ in 0..600 {
    engine.update(1.0 / 60.0, domain, None, &config);
  }

  let mut plotter = ImagePlotter::new(
    Size2D::new(1024, 1024),
    domain,
    config.color_mode()
  ).parallel();
  engine.draw(&mut plotter, &config);
  plotter.into_image().save("out.png")?;

  println!("placed {} shapes -> out.png", engine.placed_count());
  Ok(())
}
