use raylib::prelude::*;

use crate::typeface::Typeface;

/// Greedy word wrap. `width` measures a candidate line; a single word wider
/// than `max_width` gets a line of its own.
pub fn wrap_words(text: &str, max_width: i32, width: impl Fn(&str) -> i32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }
        let candidate = format!("{line} {word}");
        if width(&candidate) <= max_width {
            line = candidate;
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Left x that centres a line of `line_width` inside `area_width`.
pub fn centered_x(area_width: i32, line_width: i32) -> i32 {
    (area_width - line_width) / 2
}

/// Draws `lines` centred horizontally, as a block centred on `center_y`.
pub fn draw_centered_lines(
    d: &mut RaylibDrawHandle,
    typeface: &Typeface,
    lines: &[String],
    font_size: i32,
    center_y: i32,
    area_width: i32,
    color: Color,
) {
    let line_height = font_size + font_size / 4;
    let block_height = line_height * lines.len() as i32;
    let mut y = center_y - block_height / 2;
    for line in lines {
        let x = centered_x(area_width, typeface.measure(line, font_size));
        typeface.draw(d, line, x, y, font_size, color);
        y += line_height;
    }
}

/// Largest rectangle with the render target's aspect ratio that fits a
/// `screen_w` x `screen_h` window, centred (letterboxed).
pub fn fit_to_window(screen_w: f32, screen_h: f32, render_w: f32, render_h: f32) -> Rectangle {
    let scale = (screen_w / render_w).min(screen_h / render_h);
    let width = render_w * scale;
    let height = render_h * scale;
    Rectangle::new((screen_w - width) * 0.5, (screen_h - height) * 0.5, width, height)
}

/// Maps a window point (the mouse) back into render target coordinates through
/// the letterbox of `fit_to_window`. Points on the bars map to `None`.
pub fn window_to_render(point: Vector2, screen_w: f32, screen_h: f32, render_w: f32, render_h: f32) -> Option<Vector2> {
    let view = fit_to_window(screen_w, screen_h, render_w, render_h);
    if view.width <= 0.0 || view.height <= 0.0 {
        return None;
    }
    let x = (point.x - view.x) * render_w / view.width;
    let y = (point.y - view.y) * render_h / view.height;
    if (0.0..render_w).contains(&x) && (0.0..render_h).contains(&y) {
        Some(Vector2::new(x, y))
    } else {
        None
    }
}
