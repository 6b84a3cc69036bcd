//! Flat RGB colors and the display-color policy.
//!
//! Every pattern carries a `raw` color chosen at creation; what actually
//! reaches the plotter depends on [`ColorMode`], which is threaded through as
//! a plain value instead of living in process-wide state.

use {
  std::fmt,
  rand::Rng
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Color {
  pub r: u8,
  pub g: u8,
  pub b: u8,
}

impl Color {
  pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
  pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };
  pub const GREEN: Color = Color { r: 0, g: 255, b: 0 };

  pub fn random(rng: &mut impl Rng) -> Self {
    Color {
      r: rng.gen(),
      g: rng.gen(),
      b: rng.gen(),
    }
  }
}

impl fmt::Display for Color {
  /// CSS/SVG syntax, `rgb(r,g,b)`.
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "rgb({},{},{})", self.r, self.g, self.b)
  }
}

/// Display-time color policy, passed by value to the plotters.
#[derive(Debug, Copy, Clone, Default)]
pub struct ColorMode {
  pub dark_background: bool,
  /// Alternate pure black/white by nesting parity, ignoring raw colors.
  pub high_contrast: bool,
}

/// Resolves the color a pattern is displayed with.
pub fn display_color(raw: Color, nesting_level: u32, mode: ColorMode) -> Color {
  if mode.high_contrast {
    if nesting_level % 2 == mode.dark_background as u32 {
      Color::WHITE
    } else {
      Color::BLACK
    }
  } else {
    raw
  }
}

/// Fixed palette used when nested children must contrast with their parent.
pub const PALETTE: [Color; 8] = [
  Color { r: 231, g: 76, b: 60 },
  Color { r: 241, g: 196, b: 15 },
  Color { r: 46, g: 204, b: 113 },
  Color { r: 26, g: 188, b: 156 },
  Color { r: 52, g: 152, b: 219 },
  Color { r: 155, g: 89, b: 182 },
  Color { r: 230, g: 126, b: 34 },
  Color { r: 236, g: 240, b: 241 },
];

/// Picks a palette color distinct from `avoid`.
pub fn different_from(rng: &mut impl Rng, avoid: Color) -> Color {
  let offset = rng.gen_range(0..PALETTE.len());
  for i in 0..PALETTE.len() {
    let candidate = PALETTE[(offset + i) % PALETTE.len()];
    if candidate != avoid {
      return candidate;
    }
  }
  PALETTE[offset]
}
