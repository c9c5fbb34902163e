use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

use crate::constants::*;
use crate::error::{LandingError, Result};
use crate::schedule::{Policy, Ramp};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub assets_dir: PathBuf,
    pub hammer_sound: String,
    pub backdrop_image: String,
    pub hero_video: String,
    pub font: String,
    pub ffmpeg: String,
    pub cta_url: String,
    pub intro: IntroSettings,
    pub hero: HeroSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IntroSettings {
    pub start_delay_ms: u64,
    pub min_delay_ms: u64,
    pub cue_lead_ms: u64,
    pub trailing_pause_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HeroSettings {
    pub interval_ms: u64,
    pub transition_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            hammer_sound: "hammer.mp3".into(),
            backdrop_image: "bull2.png".into(),
            hero_video: "forge.mp4".into(),
            font: "Inter-Bold.ttf".into(),
            ffmpeg: "ffmpeg".into(),
            cta_url: "https://www.linkedin.com/company/arche-forge/posts/?feedView=all".into(),
            intro: IntroSettings::default(),
            hero: HeroSettings::default(),
        }
    }
}

impl Default for IntroSettings {
    fn default() -> Self {
        Self {
            start_delay_ms: INTRO_START_DELAY_MS,
            min_delay_ms: INTRO_MIN_DELAY_MS,
            cue_lead_ms: INTRO_CUE_LEAD_MS,
            trailing_pause_ms: INTRO_TRAILING_PAUSE_MS,
        }
    }
}

impl Default for HeroSettings {
    fn default() -> Self {
        Self {
            interval_ms: HERO_INTERVAL_MS,
            transition_ms: HERO_TRANSITION_MS,
        }
    }
}

impl Settings {
    /// Reads `path` when it exists. A missing file means defaults, a file that
    /// does not parse is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        let settings = Self::parse(&raw).map_err(|source| LandingError::Config {
            path: path.display().to_string(),
            source,
        })?;
        info!(path = %path.display(), "loaded config");
        Ok(settings)
    }

    pub fn parse(raw: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn asset(&self, name: &str) -> PathBuf {
        self.assets_dir.join(name)
    }

    pub fn intro_policy(&self) -> Result<Policy> {
        let intro = &self.intro;
        let ramp = Ramp::new(
            Duration::from_millis(intro.start_delay_ms),
            Duration::from_millis(intro.min_delay_ms),
            Duration::from_millis(intro.cue_lead_ms),
            Duration::from_millis(intro.trailing_pause_ms),
        )?;
        Ok(Policy::Terminating(ramp))
    }

    pub fn hero_policy(&self) -> Result<Policy> {
        Policy::cyclic(Duration::from_millis(self.hero.interval_ms))
    }

    pub fn hero_transition(&self) -> Duration {
        Duration::from_millis(self.hero.transition_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let settings = Settings::parse("").unwrap();
        assert_eq!(settings.intro.start_delay_ms, 700);
        assert_eq!(settings.intro.min_delay_ms, 95);
        assert_eq!(settings.hero.interval_ms, 3000);
        assert_eq!(settings.asset("hammer.mp3"), PathBuf::from("assets/hammer.mp3"));
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let settings = Settings::parse(include_str!("../landing.toml")).unwrap();
        let defaults = Settings::default();
        assert_eq!(settings.assets_dir, defaults.assets_dir);
        assert_eq!(settings.hero_video, defaults.hero_video);
        assert_eq!(settings.font, defaults.font);
        assert_eq!(settings.cta_url, defaults.cta_url);
        assert_eq!(settings.intro.trailing_pause_ms, defaults.intro.trailing_pause_ms);
        assert_eq!(settings.hero.transition_ms, defaults.hero.transition_ms);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let settings = Settings::parse(
            r#"
            assets_dir = "public"

            [hero]
            interval_ms = 2000
            "#,
        )
        .unwrap();
        assert_eq!(settings.assets_dir, PathBuf::from("public"));
        assert_eq!(settings.hero.interval_ms, 2000);
        assert_eq!(settings.hero.transition_ms, HERO_TRANSITION_MS);
        assert_eq!(settings.intro.cue_lead_ms, 300);
    }

    #[test]
    fn call_to_action_link_can_be_overridden() {
        let settings = Settings::parse(r#"cta_url = "https://example.com/forge""#).unwrap();
        assert_eq!(settings.cta_url, "https://example.com/forge");
        assert!(Settings::default().cta_url.starts_with("https://www.linkedin.com/"));
    }

    #[test]
    fn bad_timing_is_rejected_when_building_policies() {
        let mut settings = Settings::default();
        settings.intro.min_delay_ms = 900;
        assert!(matches!(
            settings.intro_policy(),
            Err(LandingError::InvalidTiming(_))
        ));

        settings.hero.interval_ms = 0;
        assert!(settings.hero_policy().is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("forge-landing-missing-config.toml");
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.ffmpeg, "ffmpeg");
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let path = std::env::temp_dir().join(format!(
            "forge-landing-bad-config-{}.toml",
            std::process::id()
        ));
        fs::write(&path, "intro = 3").unwrap();
        let err = Settings::load(&path).unwrap_err();
        fs::remove_file(&path).unwrap();
        assert!(matches!(err, LandingError::Config { .. }));
    }
}
