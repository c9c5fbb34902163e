use std::path::Path;

use raylib::prelude::*;
use tracing::{debug, warn};

use crate::constants::FONT_LOAD_SIZE;
use crate::slogans;

/// Font every screen draws its copy with. Holds a TTF loaded from the assets
/// with the glyphs the copy needs, or falls back to raylib's built-in font,
/// which has no `™`.
#[derive(Default)]
pub struct Typeface {
    font: Option<Font>,
}

impl Typeface {
    pub fn load(rl: &mut RaylibHandle, thread: &RaylibThread, path: &Path) -> Self {
        let Some(file) = path.to_str() else {
            warn!(path = %path.display(), "font path is not valid UTF-8, using the default font");
            return Self::default();
        };

        let glyphs = slogans::glyph_set();
        match rl.load_font_ex(thread, file, FONT_LOAD_SIZE, Some(&glyphs)) {
            Ok(font) => {
                debug!(path = %path.display(), glyphs = glyphs.chars().count(), "loaded font");
                Self { font: Some(font) }
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "font unavailable, using the default font");
                Self::default()
            }
        }
    }

    pub fn is_custom(&self) -> bool {
        self.font.is_some()
    }

    /// Pixel width of `text` at `font_size`.
    pub fn measure(&self, text: &str, font_size: i32) -> i32 {
        match &self.font {
            Some(font) => measure_text_ex(font, text, font_size as f32, spacing(font_size)).x.round() as i32,
            None => measure_text(text, font_size),
        }
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle, text: &str, x: i32, y: i32, font_size: i32, color: Color) {
        match &self.font {
            Some(font) => d.draw_text_ex(
                font,
                text,
                Vector2::new(x as f32, y as f32),
                font_size as f32,
                spacing(font_size),
                color,
            ),
            None => d.draw_text(text, x, y, font_size, color),
        }
    }
}

// Same letter spacing raylib's draw_text uses for the built-in font
fn spacing(font_size: i32) -> f32 {
    (font_size / 10).max(1) as f32
}
