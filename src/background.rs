use std::fs;
use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use exif::{In, Reader, Tag, Value};
use raylib::prelude::*;
use tracing::{debug, warn};

use crate::constants::*;

/// Backdrop colour shown while (or instead of) the image.
pub const FALLBACK_COLOR: Color = Color::new(17, 17, 20, 255);

/// Loads the backdrop image, or `None` when it cannot be used. The caller
/// draws `FALLBACK_COLOR` in that case.
pub fn load_background(rl: &mut RaylibHandle, thread: &RaylibThread, path: &Path) -> Option<Texture2D> {
    match load_texture_with_exif_rotation(rl, thread, path) {
        Ok(texture) => {
            debug!(path = %path.display(), width = texture.width(), height = texture.height(), "loaded backdrop");
            Some(texture)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %format!("{e:#}"), "backdrop unavailable, using solid fallback");
            None
        }
    }
}

// --- Load Image, Apply EXIF Rotation, Create Texture ---
fn load_texture_with_exif_rotation(rl: &mut RaylibHandle, thread: &RaylibThread, image_path: &Path) -> Result<Texture2D> {
    let file_bytes = fs::read(image_path)
        .with_context(|| format!("failed to read {}", image_path.display()))?;

    let extension = image_path.extension().and_then(|s| s.to_str()).unwrap_or("").to_lowercase();
    let orientation = if extension == "jpg" || extension == "jpeg" {
        exif_orientation(&file_bytes)
    } else {
        1
    };

    let mut image = Image::load_image_from_mem(&format!(".{extension}"), &file_bytes)
        .map_err(|e| anyhow::anyhow!("failed to decode {}: {e}", image_path.display()))?;

    // 3 = 180 deg, 6 = 90 deg CW, 8 = 90 deg CCW; flipped variants are ignored
    match orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }

    let texture = rl.load_texture_from_image(thread, &image)
        .map_err(|e| anyhow::anyhow!("failed to upload {}: {e}", image_path.display()))?;
    Ok(texture)
}

/// EXIF orientation tag of a JPEG, 1 (upright) when absent or unreadable.
pub fn exif_orientation(file_bytes: &[u8]) -> u16 {
    match Reader::new().read_from_container(&mut Cursor::new(file_bytes)) {
        Ok(exif) => match exif.get_field(Tag::Orientation, In::PRIMARY).map(|f| &f.value) {
            Some(Value::Short(values)) => values.first().copied().unwrap_or(1),
            _ => 1,
        },
        Err(e) => {
            debug!(error = %e, "no EXIF data");
            1
        }
    }
}

/// Source rectangle that crops a `tex_w` x `tex_h` texture to fill the render
/// target while keeping its aspect ratio, centred.
pub fn cover_source(tex_w: f32, tex_h: f32) -> Rectangle {
    let target_ratio = RENDER_WIDTH as f32 / RENDER_HEIGHT as f32;
    let tex_ratio = tex_w / tex_h;
    if tex_ratio > target_ratio {
        let width = tex_h * target_ratio;
        Rectangle::new((tex_w - width) * 0.5, 0.0, width, tex_h)
    } else {
        let height = tex_w / target_ratio;
        Rectangle::new(0.0, (tex_h - height) * 0.5, tex_w, height)
    }
}

/// Draws the backdrop like a CSS `cover` background, or the fallback colour.
pub fn draw_background(d: &mut RaylibDrawHandle, texture: Option<&Texture2D>) {
    d.clear_background(FALLBACK_COLOR);
    if let Some(texture) = texture {
        d.draw_texture_pro(
            texture,
            cover_source(texture.width() as f32, texture.height() as f32),
            Rectangle::new(0.0, 0.0, RENDER_WIDTH as f32, RENDER_HEIGHT as f32),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
    }
}
