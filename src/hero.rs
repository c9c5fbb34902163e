use std::time::Duration;

use raylib::prelude::*;
use tracing::{debug, info, warn};

use crate::constants::*;
use crate::error::Result;
use crate::layout::{centered_x, draw_centered_lines, window_to_render};
use crate::schedule::Policy;
use crate::screen::{Route, Screen};
use crate::sequencer::{Sequencer, SequencerEvent};
use crate::transition::{Pose, SlideTransition};
use crate::typeface::Typeface;
use crate::video::VideoDecoder;

const HEADING: &str = "ARCHE FORGE";
const SUMMARY: [&str; 3] = [
    "Today's AI interactions lack soul.",
    "Ditch the robotic scripts that break the connection. Our goal is to mirror",
    "your identity, making AI feel less like a tool and more like you.",
];

const HEADING_Y: i32 = 300;
const BAND_Y: i32 = 450;
const BAND_HEIGHT: i32 = 96;
const SUMMARY_CENTER_Y: i32 = 680;
const CTA_LABEL: &str = "Visit our Linkedin";
const CTA_TOP: f32 = 800.0;
const CTA_WIDTH: f32 = 400.0;
const CTA_HEIGHT: f32 = 72.0;
const VIDEO_FADE_SECONDS: f32 = 1.0;

const GRADIENT_TOP: Color = Color::new(17, 24, 39, 255);
const GRADIENT_BOTTOM: Color = Color::new(0, 0, 0, 255);
const CTA_COLOR: Color = Color::new(0, 119, 181, 255);
const CTA_HOVER_COLOR: Color = Color::new(0, 77, 122, 255);

/// The forge page: a rotating title band over a looping background video.
pub struct HeroScreen {
    sequencer: Sequencer,
    slide: SlideTransition,
    video: Option<VideoDecoder>,
    video_texture: Option<Texture2D>,
    video_alpha: f32,
    typeface: Typeface,
    cta_url: String,
    cta_hovered: bool,
}

impl HeroScreen {
    /// Mounts the page and starts rotating right away.
    pub fn new(
        titles: Vec<String>,
        policy: Policy,
        transition: Duration,
        video: Option<VideoDecoder>,
        typeface: Typeface,
        cta_url: String,
    ) -> Result<Self> {
        let mut sequencer = Sequencer::new(titles, policy)?;
        sequencer.start();
        let slide = SlideTransition::new(sequencer.cursor(), transition);
        Ok(Self {
            sequencer,
            slide,
            video,
            video_texture: None,
            video_alpha: 0.0,
            typeface,
            cta_url,
            cta_hovered: false,
        })
    }

    /// Back to the first title, rotating again from a full interval.
    fn rewind(&mut self) {
        self.sequencer.restart();
        self.sequencer.start();
        self.slide.reset(self.sequencer.cursor());
        debug!("hero rotator rewound");
    }

    fn update_video(&mut self, dt: f32, rl: &mut RaylibHandle, thread: &RaylibThread) {
        let Some(decoder) = self.video.as_mut() else {
            return;
        };
        let Some(frame) = decoder.latest_frame() else {
            if decoder.is_finished() && self.video_texture.is_none() {
                self.video = None;
            }
            return;
        };

        if self.video_texture.is_none() {
            let (width, height) = decoder.size();
            let blank = Image::gen_image_color(width, height, Color::BLACK);
            match rl.load_texture_from_image(thread, &blank) {
                Ok(texture) => self.video_texture = Some(texture),
                Err(e) => {
                    warn!(error = %e, "could not allocate video texture, keeping the fallback");
                    self.video = None;
                    return;
                }
            }
        }

        if let Some(texture) = self.video_texture.as_mut() {
            if let Err(e) = texture.update_texture(&frame) {
                debug!(error = %e, "dropped a video frame");
                return;
            }
            self.video_alpha = (self.video_alpha + dt / VIDEO_FADE_SECONDS).min(1.0);
        }
    }

    fn draw_backdrop(&self, d: &mut RaylibDrawHandle) {
        d.draw_rectangle_gradient_v(0, 0, RENDER_WIDTH, RENDER_HEIGHT, GRADIENT_TOP, GRADIENT_BOTTOM);

        if let Some(texture) = &self.video_texture {
            d.draw_texture_pro(
                texture,
                Rectangle::new(0.0, 0.0, texture.width() as f32, texture.height() as f32),
                Rectangle::new(0.0, 0.0, RENDER_WIDTH as f32, RENDER_HEIGHT as f32),
                Vector2::new(0.0, 0.0),
                0.0,
                with_alpha(Color::WHITE, self.video_alpha),
            );
        }

        // Readability overlays
        d.draw_rectangle(0, 0, RENDER_WIDTH, RENDER_HEIGHT, Color::new(0, 0, 0, 128));
        d.draw_rectangle_gradient_v(
            0,
            RENDER_HEIGHT / 2,
            RENDER_WIDTH,
            RENDER_HEIGHT / 2,
            Color::new(0, 0, 0, 0),
            Color::new(0, 0, 0, 178),
        );
    }

    fn draw_title(&self, d: &mut RaylibDrawHandle, index: usize, pose: Pose) {
        let title = &self.sequencer.items()[index];
        let width = self.typeface.measure(title, HERO_TITLE_SIZE);
        let y = BAND_Y + (pose.offset * BAND_HEIGHT as f32) as i32;
        self.typeface.draw(
            d,
            title,
            centered_x(RENDER_WIDTH, width),
            y,
            HERO_TITLE_SIZE,
            with_alpha(Color::WHITE, pose.opacity),
        );
    }

    fn draw_cta(&self, d: &mut RaylibDrawHandle) {
        let button = cta_rect();
        let fill = if self.cta_hovered { CTA_HOVER_COLOR } else { CTA_COLOR };
        d.draw_rectangle_rounded(button, 0.2, 8, fill);

        let label_width = self.typeface.measure(CTA_LABEL, HERO_CTA_SIZE);
        let x = button.x as i32 + centered_x(button.width as i32, label_width);
        let y = button.y as i32 + (button.height as i32 - HERO_CTA_SIZE) / 2;
        self.typeface.draw(d, CTA_LABEL, x, y, HERO_CTA_SIZE, Color::WHITE);
    }

    fn update_cta(&mut self, rl: &mut RaylibHandle) {
        let hovered = cta_contains(
            rl.get_mouse_position(),
            rl.get_screen_width() as f32,
            rl.get_screen_height() as f32,
        );
        if hovered != self.cta_hovered {
            self.cta_hovered = hovered;
            let cursor = if hovered {
                MouseCursor::MOUSE_CURSOR_POINTING_HAND
            } else {
                MouseCursor::MOUSE_CURSOR_DEFAULT
            };
            rl.set_mouse_cursor(cursor);
        }
        if hovered && rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            info!(url = %self.cta_url, "opening call to action");
            rl.open_url(&self.cta_url);
        }
    }
}

/// The call-to-action button, centred under the summary, in render target
/// coordinates.
fn cta_rect() -> Rectangle {
    Rectangle::new((RENDER_WIDTH as f32 - CTA_WIDTH) / 2.0, CTA_TOP, CTA_WIDTH, CTA_HEIGHT)
}

/// Whether a window point lands on the button once the letterboxed
/// framebuffer is mapped back to render coordinates.
fn cta_contains(mouse: Vector2, screen_w: f32, screen_h: f32) -> bool {
    window_to_render(mouse, screen_w, screen_h, RENDER_WIDTH as f32, RENDER_HEIGHT as f32)
        .is_some_and(|point| cta_rect().check_collision_point_rec(point))
}

impl Screen for HeroScreen {
    fn update(&mut self, dt: f32, rl: &mut RaylibHandle, thread: &RaylibThread) -> Option<Route> {
        if rl.is_key_pressed(KeyboardKey::KEY_I) {
            return Some(Route::Intro);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_R) {
            self.rewind();
        }

        let dt_duration = Duration::from_secs_f32(dt);
        for event in self.sequencer.update(dt_duration) {
            if let SequencerEvent::Advanced { from, to } = event {
                self.slide.begin(from, to);
            }
        }
        self.slide.update(dt_duration);
        self.update_video(dt, rl, thread);
        self.update_cta(rl);
        None
    }

    fn draw(&self, d: &mut RaylibDrawHandle) {
        self.draw_backdrop(d);

        let heading_x = centered_x(RENDER_WIDTH, self.typeface.measure(HEADING, HERO_HEADING_SIZE));
        self.typeface.draw(d, HEADING, heading_x, HEADING_Y, HERO_HEADING_SIZE, Color::WHITE);

        for (index, pose) in self.slide.visible() {
            self.draw_title(d, index, pose);
        }

        let summary: Vec<String> = SUMMARY.iter().map(|s| s.to_string()).collect();
        draw_centered_lines(d, &self.typeface, &summary, HERO_BODY_SIZE, SUMMARY_CENTER_Y, RENDER_WIDTH, Color::RAYWHITE);
        self.draw_cta(d);
    }
}

impl Drop for HeroScreen {
    fn drop(&mut self) {
        self.sequencer.cancel();
    }
}

fn with_alpha(color: Color, alpha: f32) -> Color {
    Color::new(color.r, color.g, color.b, (alpha.clamp(0.0, 1.0) * color.a as f32) as u8)
}
