use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use raylib::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod audio;
mod background;
mod config;
mod constants;
mod error;
mod hero;
mod intro;
mod layout;
mod schedule;
mod screen;
mod sequencer;
mod slogans;
mod state;
mod transition;
mod typeface;
mod video;

use crate::audio::SoundCue;
use crate::background::load_background;
use crate::config::Settings;
use crate::constants::*;
use crate::hero::HeroScreen;
use crate::intro::IntroScreen;
use crate::layout::fit_to_window;
use crate::screen::{Route, Screen};
use crate::typeface::Typeface;
use crate::video::VideoDecoder;

/// Forge landing page: slogan intro followed by the rotating hero.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// TOML settings file
    #[arg(long, default_value = "landing.toml")]
    config: PathBuf,

    /// Directory holding the sound, image, font and video assets
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Open straight on the hero page
    #[arg(long)]
    skip_intro: bool,

    /// Initial window size relative to the 1920x1080 render target
    #[arg(long, default_value_t = 0.5)]
    window_scale: f32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut settings = Settings::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(assets) = cli.assets {
        settings.assets_dir = assets;
    }

    // Bad timings are fatal, catch them before a window opens
    settings.intro_policy().context("intro timing")?;
    settings.hero_policy().context("hero timing")?;

    let window_width = (RENDER_WIDTH as f32 * cli.window_scale).round().max(1.0) as i32;
    let window_height = (RENDER_HEIGHT as f32 * cli.window_scale).round().max(1.0) as i32;
    info!(assets = %settings.assets_dir.display(), window_width, window_height, "starting landing page");

    let (mut rl, thread) = raylib::init()
        .size(window_width, window_height)
        .title("Arche Forge")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let audio = match RaylibAudio::init_audio_device() {
        Ok(audio) => Some(audio),
        Err(e) => {
            warn!(error = ?e, "no audio device, cues will be silent");
            None
        }
    };

    let mut framebuffer = rl
        .load_render_texture(&thread, RENDER_WIDTH as u32, RENDER_HEIGHT as u32)
        .map_err(|e| anyhow::anyhow!("failed to create render texture: {e}"))?;

    let first = if cli.skip_intro { Route::Forge } else { Route::Intro };
    let mut screen = mount(first, &settings, &mut rl, &thread, audio.as_ref())?;

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();

        if let Some(route) = screen.update(dt, &mut rl, &thread) {
            info!(?route, "navigating");
            // Old screen is dropped here, cancelling its timers and releasing its assets
            screen = mount(route, &settings, &mut rl, &thread, audio.as_ref())?;
        }

        // --- Render the screen into the fixed size framebuffer ---
        rl.draw_texture_mode(&thread, &mut framebuffer, |mut tmd| {
            let mut d = tmd.begin_drawing(&thread);
            d.clear_background(Color::BLACK);
            screen.draw(&mut d);
        });

        // --- Scale the framebuffer into the window ---
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);

        let sw = d.get_screen_width() as f32;
        let sh = d.get_screen_height() as f32;

        d.draw_texture_pro(
            &framebuffer,
            Rectangle::new(0.0, 0.0, framebuffer.width() as f32, -(framebuffer.height() as f32)),
            fit_to_window(sw, sh, RENDER_WIDTH as f32, RENDER_HEIGHT as f32),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
    }

    info!("window closed");
    Ok(())
}

fn mount<'aud>(
    route: Route,
    settings: &Settings,
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    audio: Option<&'aud RaylibAudio>,
) -> Result<Box<dyn Screen + 'aud>> {
    let typeface = Typeface::load(rl, thread, &settings.asset(&settings.font));
    match route {
        Route::Intro => {
            let backdrop = load_background(rl, thread, &settings.asset(&settings.backdrop_image));
            let cue = SoundCue::load(audio, &settings.asset(&settings.hammer_sound));
            if !cue.is_loaded() {
                info!("intro runs without its hammer cue");
            }
            let screen = IntroScreen::new(slogans::intro_lines(), settings.intro_policy()?, cue, backdrop, typeface)
                .context("building the intro")?;
            Ok(Box::new(screen))
        }
        Route::Forge => {
            let video = match VideoDecoder::spawn(
                &settings.ffmpeg,
                &settings.asset(&settings.hero_video),
                RENDER_WIDTH / 2,
                RENDER_HEIGHT / 2,
            ) {
                Ok(video) => Some(video),
                Err(e) => {
                    warn!(error = %format!("{e:#}"), "background video unavailable, using gradient fallback");
                    None
                }
            };
            let screen = HeroScreen::new(
                slogans::hero_titles(),
                settings.hero_policy()?,
                settings.hero_transition(),
                video,
                typeface,
                settings.cta_url.clone(),
            )
            .context("building the hero")?;
            Ok(Box::new(screen))
        }
    }
}
