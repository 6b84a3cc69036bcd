//! Renderer boundary.
//!
//! The engine never rasterizes anything itself: it hands the placed list to a
//! [`Plotter`] in per-family bulk calls, plus a line primitive for the grid
//! overlay. [`SvgPlotter`] is the built-in pure-serialization backend; a
//! raster backend lives in [`crate::drawing`] behind the `drawing` feature.

use {
  crate::{
    color::{display_color, Color, ColorMode},
    pattern::{Pattern, Shape, WorldSpace}
  },
  euclid::{Point2D, Size2D}
};


/// One overlay line segment, 1 pixel thick.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Line {
  pub from: Point2D<f32, WorldSpace>,
  pub to: Point2D<f32, WorldSpace>,
}

pub trait Plotter {
  /// Whether the backend finished whatever asynchronous preparation it
  /// needs; the engine reports it back from `draw`.
  fn is_ready(&self) -> bool {
    true
  }

  fn initialize(&mut self, background: Color);
  fn finalize(&mut self);

  /// Engine clock and fade-in duration for backends that blend; pure
  /// serialization backends ignore it.
  fn set_blending(&mut self, _now: f32, _blend_time: f32) {}

  fn draw_squares(&mut self, items: &[&Pattern]);
  fn draw_circles(&mut self, items: &[&Pattern]);
  fn draw_rectangles(&mut self, items: &[&Pattern]);
  fn draw_triangles(&mut self, items: &[&Pattern]);
  fn draw_hearts(&mut self, items: &[&Pattern]);

  fn draw_lines(&mut self, lines: &[Line], color: Color);
}

/// Serializes the shape list to standalone SVG text. Coordinates are shifted
/// from the centered world basis to the SVG top-left basis; sizes and centers
/// are printed with `f32`'s shortest round-trip formatting, so re-reading the
/// document reproduces them exactly.
pub struct SvgPlotter {
  parts: Vec<String>,
  size: Size2D<f32, WorldSpace>,
  mode: ColorMode,
}

// heart outline constants, see the pattern::heart module
const HEART_A: f32 = 0.5 * 0.828_427_12;
const HEART_C: f32 = 0.5 * 0.585_786_44;

impl SvgPlotter {
  pub fn new(size: Size2D<f32, WorldSpace>, mode: ColorMode) -> Self {
    SvgPlotter {
      parts: vec![],
      size,
      mode,
    }
  }

  pub fn into_svg(self) -> String {
    self.parts.concat()
  }

  fn color_of(&self, item: &Pattern) -> Color {
    display_color(item.raw_color, item.nesting_level, self.mode)
  }

  fn to_svg_space(&self, point: Point2D<f32, WorldSpace>) -> Point2D<f32, WorldSpace> {
    point + self.size.to_vector() * 0.5
  }
}

impl Plotter for SvgPlotter {
  fn initialize(&mut self, background: Color) {
    self.parts.clear();
    self.parts.push("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n".to_string());
    self.parts.push(format!(
      "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" viewBox=\"0 0 {} {}\">\n",
      self.size.width, self.size.height
    ));
    self.parts.push(format!(
      "\t<rect fill=\"{}\" stroke=\"none\" x=\"0\" y=\"0\" width=\"{}\" height=\"{}\"/>\n",
      background, self.size.width, self.size.height
    ));
  }

  fn finalize(&mut self) {
    self.parts.push("</svg>\n".to_string());
  }

  fn draw_squares(&mut self, items: &[&Pattern]) {
    self.parts.push("\t<g stroke=\"none\">\n".to_string());
    for item in items {
      let center = self.to_svg_space(item.center);
      let half = 0.5 * item.size;
      self.parts.push(format!(
        "\t\t<rect fill=\"{}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"/>\n",
        self.color_of(item), center.x - half, center.y - half, item.size, item.size
      ));
    }
    self.parts.push("\t</g>\n".to_string());
  }

  fn draw_circles(&mut self, items: &[&Pattern]) {
    self.parts.push("\t<g stroke=\"none\">\n".to_string());
    for item in items {
      let center = self.to_svg_space(item.center);
      self.parts.push(format!(
        "\t\t<circle fill=\"{}\" cx=\"{}\" cy=\"{}\" r=\"{}\"/>\n",
        self.color_of(item), center.x, center.y, 0.5 * item.size
      ));
    }
    self.parts.push("\t</g>\n".to_string());
  }

  fn draw_rectangles(&mut self, items: &[&Pattern]) {
    self.parts.push("\t<g stroke=\"none\">\n".to_string());
    for item in items {
      let base = match item.shape {
        Shape::Rectangle { base } => base,
        _ => continue
      };
      let center = self.to_svg_space(item.center);
      let width = item.size * base.width;
      let height = item.size * base.height;
      self.parts.push(format!(
        "\t\t<rect fill=\"{}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"/>\n",
        self.color_of(item), center.x - 0.5 * width, center.y - 0.5 * height, width, height
      ));
    }
    self.parts.push("\t</g>\n".to_string());
  }

  fn draw_triangles(&mut self, items: &[&Pattern]) {
    self.parts.push("\t<g stroke=\"none\">\n".to_string());
    for item in items {
      let vertices = match item.shape {
        Shape::Triangle { vertices, .. } => vertices,
        _ => continue
      };
      let center = self.to_svg_space(item.center);
      let points = vertices
        .map(|v| format!("{},{}", center.x + v.x * item.size, center.y + v.y * item.size))
        .join(" ");
      self.parts.push(format!(
        "\t\t<polygon fill=\"{}\" points=\"{}\"/>\n",
        self.color_of(item), points
      ));
    }
    self.parts.push("\t</g>\n".to_string());
  }

  fn draw_hearts(&mut self, items: &[&Pattern]) {
    self.parts.push("\t<g stroke=\"none\">\n".to_string());
    for item in items {
      let center = self.to_svg_space(item.center);
      let a = HEART_A * item.size;
      let r = HEART_C * item.size;
      // bottom cusp, straight edge to the right corner, right lobe arc to
      // the top cusp, left lobe arc, straight edge back
      self.parts.push(format!(
        "\t\t<path fill=\"{}\" d=\"M{},{} L{},{} A{},{} 0 0 0 {},{} A{},{} 0 0 0 {},{} Z\"/>\n",
        self.color_of(item),
        center.x, center.y + a,
        center.x + a, center.y,
        r, r, center.x, center.y - a,
        r, r, center.x - a, center.y,
      ));
    }
    self.parts.push("\t</g>\n".to_string());
  }

  fn draw_lines(&mut self, lines: &[Line], color: Color) {
    let path = lines.iter()
      .map(|line| {
        let from = self.to_svg_space(line.from);
        let to = self.to_svg_space(line.to);
        format!("M{},{}L{},{}", from.x, from.y, to.x, to.y)
      })
      .collect::<Vec<_>>()
      .join("");
    self.parts.push(format!(
      "\t<path fill=\"none\" stroke-width=\"1\" stroke=\"{}\" d=\"{}\"/>\n",
      color, path
    ));
  }
}
