//! Raster backend, behind the `drawing` feature.
//!
//! [`ImagePlotter`] rasterizes the shape list into an [`image::RgbaImage`]:
//! per shape, the bounding box is mapped to pixel space, clipped against the
//! frame, and every covered pixel is alpha-blended with the shape's display
//! color. An opt-in rayon path draws shapes from the thread pool, writing
//! into one shared framebuffer through an aliased pointer. Shapes of a
//! non-overlapping scene touch disjoint pixels, which is what makes the
//! aliasing tolerable; never enable it together with overlapping placement.

use {
  crate::{
    color::{display_color, Color, ColorMode},
    pattern::{Pattern, WorldSpace},
    plotter::{Line, Plotter}
  },
  euclid::{Point2D, Size2D},
  image::{Pixel, Rgba, RgbaImage},
  itertools::iproduct,
  rayon::prelude::*
};

#[cfg(test)] mod tests;

/// Image coordinate basis, origin at the top-left corner.
#[derive(Debug, Copy, Clone)]
pub struct PixelSpace;

pub struct ImagePlotter {
  image: RgbaImage,
  domain: Size2D<f32, WorldSpace>,
  scale: f32,
  mode: ColorMode,
  now: f32,
  blend_time: f32,
  parallel: bool,
}

impl ImagePlotter {
  /// World units are scaled uniformly so the domain fits the resolution.
  pub fn new(
    resolution: Size2D<u32, PixelSpace>,
    domain: Size2D<f32, WorldSpace>,
    mode: ColorMode
  ) -> Self {
    let scale = (resolution.width as f32 / domain.width)
      .min(resolution.height as f32 / domain.height);
    ImagePlotter {
      image: RgbaImage::new(resolution.width, resolution.height),
      domain,
      scale,
      mode,
      now: 0.0,
      blend_time: 0.0,
      parallel: false,
    }
  }

  /// Rasterize from the rayon pool.
  pub fn parallel(mut self) -> Self {
    self.parallel = true;
    self
  }

  pub fn into_image(self) -> RgbaImage {
    self.image
  }

  fn draw_items(&mut self, items: &[&Pattern]) {
    let (domain, scale) = (self.domain, self.scale);
    if self.parallel {
      let (mode, now, blend_time) = (self.mode, self.now, self.blend_time);
      let image = &self.image;
      items.par_iter().for_each(|item| {
        #[allow(invalid_reference_casting)]
        let aliased = unsafe { &mut *(image as *const RgbaImage as *mut RgbaImage) };
        rasterize(aliased, item, domain, scale, shade(item, mode, now, blend_time));
      });
    } else {
      for item in items {
        let color = shade(item, self.mode, self.now, self.blend_time);
        rasterize(&mut self.image, item, domain, scale, color);
      }
    }
  }
}

fn shade(item: &Pattern, mode: ColorMode, now: f32, blend_time: f32) -> Rgba<u8> {
  let color = display_color(item.raw_color, item.nesting_level, mode);
  let alpha = (item.opacity(now, blend_time) * 255.0) as u8;
  Rgba([color.r, color.g, color.b, alpha])
}

/// Blends `color` over every frame pixel the shape covers.
fn rasterize(
  image: &mut RgbaImage,
  item: &Pattern,
  domain: Size2D<f32, WorldSpace>,
  scale: f32,
  color: Rgba<u8>
) {
  if color[3] == 0 {
    return;
  }
  let (width, height) = image.dimensions();
  let bbox = item.bounding_box();
  let half = domain.to_vector() * 0.5;

  // clip the pixel-space bounding box against the frame
  let min = (bbox.min + half) * scale;
  let max = (bbox.max + half) * scale;
  let x_min = min.x.floor().max(0.0) as u32;
  let y_min = min.y.floor().max(0.0) as u32;
  let x_max = (max.x.ceil().max(0.0) as u32).min(width);
  let y_max = (max.y.ceil().max(0.0) as u32).min(height);

  for (y, x) in iproduct!(y_min..y_max, x_min..x_max) {
    let world = Point2D::new(
      (x as f32 + 0.5) / scale - 0.5 * domain.width,
      (y as f32 + 0.5) / scale - 0.5 * domain.height
    );
    if item.contains_point(world) {
      image.get_pixel_mut(x, y).blend(&color);
    }
  }
}

impl Plotter for ImagePlotter {
  fn initialize(&mut self, background: Color) {
    let fill = Rgba([background.r, background.g, background.b, 255]);
    for pixel in self.image.pixels_mut() {
      *pixel = fill;
    }
  }

  fn finalize(&mut self) {}

  fn set_blending(&mut self, now: f32, blend_time: f32) {
    self.now = now;
    self.blend_time = blend_time;
  }

  fn draw_squares(&mut self, items: &[&Pattern]) {
    self.draw_items(items);
  }

  fn draw_circles(&mut self, items: &[&Pattern]) {
    self.draw_items(items);
  }

  fn draw_rectangles(&mut self, items: &[&Pattern]) {
    self.draw_items(items);
  }

  fn draw_triangles(&mut self, items: &[&Pattern]) {
    self.draw_items(items);
  }

  fn draw_hearts(&mut self, items: &[&Pattern]) {
    self.draw_items(items);
  }

  fn draw_lines(&mut self, lines: &[Line], color: Color) {
    let rgba = Rgba([color.r, color.g, color.b, 255]);
    let (width, height) = self.image.dimensions();
    let (domain, scale) = (self.domain, self.scale);
    let half = domain.to_vector() * 0.5;

    for line in lines {
      let from = (line.from + half) * scale;
      let to = (line.to + half) * scale;
      let delta = to - from;
      let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.0) as i32;
      for i in 0..=steps {
        let p = from + delta * (i as f32 / steps as f32);
        if p.x >= 0.0 && p.y >= 0.0 && (p.x as u32) < width && (p.y as u32) < height {
          self.image.put_pixel(p.x as u32, p.y as u32, rgba);
        }
      }
    }
  }
}
