pub const RENDER_WIDTH: i32 = 1920;           // Width of the render texture
pub const RENDER_HEIGHT: i32 = 1080;          // Height of the render texture
pub const FPS: u32 = 60;                      // Frames per second

pub const INTRO_START_DELAY_MS: u64 = 700;    // First slogan is held this long
pub const INTRO_MIN_DELAY_MS: u64 = 95;       // Pace the ramp bottoms out at
pub const INTRO_CUE_LEAD_MS: u64 = 300;       // Hammer hit plays this long before each change
pub const INTRO_TRAILING_PAUSE_MS: u64 = 400; // Hold on the last slogan before navigating

pub const HERO_INTERVAL_MS: u64 = 3000;       // Time each hero title stays up
pub const HERO_TRANSITION_MS: u64 = 600;      // Slide in/out duration of a hero title

pub const INTRO_TITLE_SIZE: i32 = 160;
pub const INTRO_SLOGAN_SIZE: i32 = 96;
pub const HERO_HEADING_SIZE: i32 = 112;
pub const HERO_TITLE_SIZE: i32 = 64;
pub const HERO_BODY_SIZE: i32 = 36;
pub const HERO_CTA_SIZE: i32 = 32;
pub const FONT_LOAD_SIZE: i32 = 160;          // Glyph atlas size, the largest size drawn

pub const MAX_HERO_TITLE_CHARS: usize = 40;
