use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

/// Allowed range for the manual navigation page fraction.
pub const NAV_FRACTION_RANGE: (f64, f64) = (0.7, 0.82);

/// Allowed range for the speed reference frame, in milliseconds.
pub const REFERENCE_FRAME_MS_RANGE: (f64, f64) = (1.0, 1000.0);

/// Allowed range for typing and erasing speeds, in characters per second.
pub const CHARS_PER_SECOND_RANGE: (f64, f64) = (0.5, 1000.0);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub rail: RailConfig,
    #[serde(default)]
    pub typewriter: TypewriterConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Site content file; the built-in content is used when unset
    #[serde(default)]
    pub content_path: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            content_path: None,
        }
    }
}

/// Platform motion preference as configured by the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MotionSetting {
    /// Follow the environment (`REELFRONT_REDUCED_MOTION`)
    #[default]
    Auto,
    /// Always reduce motion
    Reduce,
    /// Never reduce motion
    NoPreference,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds while nothing is moving
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while rails, scenes or the typewriter are animating
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Reduced-motion preference
    #[serde(default)]
    pub reduced_motion: MotionSetting,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
    /// Page scrolling
    #[serde(default)]
    pub scroll: ScrollConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            reduced_motion: MotionSetting::default(),
            theme: ThemeConfig::default(),
            scroll: ScrollConfig::default(),
        }
    }
}

/// Easing curve applied to tweened motion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EasingType {
    None,
    Linear,
    #[default]
    Cubic,
    Quintic,
    EaseOut,
    EaseInOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Animate page scrolling
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Page scroll animation duration in milliseconds
    #[serde(default = "default_scroll_duration")]
    pub animation_duration_ms: u64,
    /// Page scroll easing
    #[serde(default)]
    pub easing: EasingType,
    /// Lines per scroll step when smooth scrolling is off
    #[serde(default = "default_scroll_lines")]
    pub scroll_lines: u16,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_scroll_duration(),
            easing: EasingType::default(),
            scroll_lines: default_scroll_lines(),
        }
    }
}

/// Media rail behaviour shared by the testimonial rail and the image reel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RailConfig {
    /// Distance advanced per reference frame, in columns
    #[serde(default = "default_rail_speed")]
    pub speed: f64,
    /// Reference frame interval used to normalize elapsed time
    #[serde(default = "default_reference_frame_ms")]
    pub reference_frame_ms: f64,
    /// Quiet period after a manual interaction before autoscroll resumes
    #[serde(default = "default_resume_delay")]
    pub resume_delay_ms: u64,
    /// Fraction of the visible width covered by one next/previous jump
    #[serde(default = "default_nav_fraction")]
    pub nav_fraction: f64,
    /// Duration of the smooth jump
    #[serde(default = "default_nav_duration")]
    pub nav_duration_ms: u64,
    /// Easing of the smooth jump
    #[serde(default)]
    pub nav_easing: EasingType,
}

impl Default for RailConfig {
    fn default() -> Self {
        Self {
            speed: default_rail_speed(),
            reference_frame_ms: default_reference_frame_ms(),
            resume_delay_ms: default_resume_delay(),
            nav_fraction: default_nav_fraction(),
            nav_duration_ms: default_nav_duration(),
            nav_easing: EasingType::default(),
        }
    }
}

impl RailConfig {
    pub fn resume_delay(&self) -> Duration {
        Duration::from_millis(self.resume_delay_ms)
    }

    pub fn reference_frame(&self) -> Duration {
        Duration::try_from_secs_f64(self.reference_frame_ms / 1000.0)
            .ok()
            .filter(|frame| !frame.is_zero())
            .unwrap_or_else(|| Duration::from_secs_f64(default_reference_frame_ms() / 1000.0))
    }

    pub fn nav_duration(&self) -> Duration {
        Duration::from_millis(self.nav_duration_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypewriterConfig {
    #[serde(default = "default_type_speed")]
    pub chars_per_second: f64,
    #[serde(default = "default_erase_speed")]
    pub erase_chars_per_second: f64,
    /// How long a fully typed phrase stays before erasing
    #[serde(default = "default_hold_ms")]
    pub hold_ms: u64,
    #[serde(default = "default_caret_blink_ms")]
    pub caret_blink_ms: u64,
    /// Cycle through all headline phrases instead of typing the first once
    #[serde(default = "default_true")]
    pub cycle: bool,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            chars_per_second: default_type_speed(),
            erase_chars_per_second: default_erase_speed(),
            hold_ms: default_hold_ms(),
            caret_blink_ms: default_caret_blink_ms(),
            cycle: default_true(),
        }
    }
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a table with overrides
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name (e.g., "ember", "nord")
    pub name: String,
    /// Optional color overrides for semantic colors
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ThemeConfigRepr {
    Name(String),
    Table {
        #[serde(default = "default_theme_name")]
        name: String,
        #[serde(default)]
        colors: ThemeColorOverrides,
    },
}

impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match ThemeConfigRepr::deserialize(deserializer)? {
            ThemeConfigRepr::Name(name) => ThemeConfig {
                name,
                colors: ThemeColorOverrides::default(),
            },
            ThemeConfigRepr::Table { name, colors } => ThemeConfig { name, colors },
        })
    }
}

fn default_theme_name() -> String {
    "ember".to_string()
}

/// Optional color overrides, each a hex string ("#ff0000" or "ff0000")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    pub bg0: Option<String>,
    pub bg1: Option<String>,
    pub bg2: Option<String>,
    pub fg0: Option<String>,
    pub fg1: Option<String>,
    pub accent: Option<String>,
    pub accent_alt: Option<String>,
    pub highlight: Option<String>,
    pub muted: Option<String>,
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "<C-d>" (Ctrl+d), "<S-Tab>", "<CR>", "<Space>", "gg"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    #[serde(default = "default_key_quit")]
    pub quit: String,

    // Pages
    #[serde(default = "default_key_next_page")]
    pub next_page: String,
    #[serde(default = "default_key_prev_page")]
    pub prev_page: String,

    // Page scrolling
    #[serde(default = "default_key_scroll_down")]
    pub scroll_down: String,
    #[serde(default = "default_key_scroll_up")]
    pub scroll_up: String,
    #[serde(default = "default_key_scroll_half_down")]
    pub scroll_half_down: String,
    #[serde(default = "default_key_scroll_half_up")]
    pub scroll_half_up: String,
    #[serde(default = "default_key_jump_to_top")]
    pub jump_to_top: String,
    #[serde(default = "default_key_jump_to_bottom")]
    pub jump_to_bottom: String,

    // Focus between interactive widgets
    #[serde(default = "default_key_focus_next")]
    pub focus_next: String,
    #[serde(default = "default_key_focus_prev")]
    pub focus_prev: String,

    // Rails
    #[serde(default = "default_key_rail_forward")]
    pub rail_forward: String,
    #[serde(default = "default_key_rail_backward")]
    pub rail_backward: String,

    // Media
    #[serde(default = "default_key_toggle_play")]
    pub toggle_play: String,
    #[serde(default = "default_key_seek_forward")]
    pub seek_forward: String,
    #[serde(default = "default_key_seek_backward")]
    pub seek_backward: String,
    #[serde(default = "default_key_next_track")]
    pub next_track: String,
    #[serde(default = "default_key_prev_track")]
    pub prev_track: String,

    // Misc
    #[serde(default = "default_key_toggle_motion")]
    pub toggle_reduced_motion: String,
    #[serde(default = "default_key_open_link")]
    pub open_link: String,
    #[serde(default = "default_key_help")]
    pub help: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            next_page: default_key_next_page(),
            prev_page: default_key_prev_page(),
            scroll_down: default_key_scroll_down(),
            scroll_up: default_key_scroll_up(),
            scroll_half_down: default_key_scroll_half_down(),
            scroll_half_up: default_key_scroll_half_up(),
            jump_to_top: default_key_jump_to_top(),
            jump_to_bottom: default_key_jump_to_bottom(),
            focus_next: default_key_focus_next(),
            focus_prev: default_key_focus_prev(),
            rail_forward: default_key_rail_forward(),
            rail_backward: default_key_rail_backward(),
            toggle_play: default_key_toggle_play(),
            seek_forward: default_key_seek_forward(),
            seek_backward: default_key_seek_backward(),
            next_track: default_key_next_track(),
            prev_track: default_key_prev_track(),
            toggle_reduced_motion: default_key_toggle_motion(),
            open_link: default_key_open_link(),
            help: default_key_help(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_next_page() -> String { "]".to_string() }
fn default_key_prev_page() -> String { "[".to_string() }
fn default_key_scroll_down() -> String { "j".to_string() }
fn default_key_scroll_up() -> String { "k".to_string() }
fn default_key_scroll_half_down() -> String { "<C-d>".to_string() }
fn default_key_scroll_half_up() -> String { "<C-u>".to_string() }
fn default_key_jump_to_top() -> String { "gg".to_string() }
fn default_key_jump_to_bottom() -> String { "G".to_string() }
fn default_key_focus_next() -> String { "<Tab>".to_string() }
fn default_key_focus_prev() -> String { "<S-Tab>".to_string() }
fn default_key_rail_forward() -> String { "l".to_string() }
fn default_key_rail_backward() -> String { "h".to_string() }
fn default_key_toggle_play() -> String { "<Space>".to_string() }
fn default_key_seek_forward() -> String { ".".to_string() }
fn default_key_seek_backward() -> String { ",".to_string() }
fn default_key_next_track() -> String { "n".to_string() }
fn default_key_prev_track() -> String { "N".to_string() }
fn default_key_toggle_motion() -> String { "m".to_string() }
fn default_key_open_link() -> String { "o".to_string() }
fn default_key_help() -> String { "?".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("reelfront")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

fn default_scroll_duration() -> u64 {
    150
}

fn default_scroll_lines() -> u16 {
    1
}

fn default_rail_speed() -> f64 {
    0.08
}

/// Clamp a positive setting into `range`; non-positive or non-finite values
/// fall back to `default`
fn clamp_or_default(key: &str, value: f64, (lo, hi): (f64, f64), default: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        warn!(key, value, "invalid, using default");
        return default;
    }
    if !(lo..=hi).contains(&value) {
        let clamped = value.clamp(lo, hi);
        warn!(key, value, clamped, "out of range");
        return clamped;
    }
    value
}

fn default_reference_frame_ms() -> f64 {
    1000.0 / 60.0
}

fn default_resume_delay() -> u64 {
    2600
}

fn default_nav_fraction() -> f64 {
    0.8
}

fn default_nav_duration() -> u64 {
    450
}

fn default_type_speed() -> f64 {
    18.0
}

fn default_erase_speed() -> f64 {
    40.0
}

fn default_hold_ms() -> u64 {
    1800
}

fn default_caret_blink_ms() -> u64 {
    530
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path; a missing file yields defaults
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration text and clamp out-of-range values
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))?;
        Ok(config.validated())
    }

    /// Clamp values that would break the motion engine
    pub fn validated(mut self) -> Self {
        let (lo, hi) = NAV_FRACTION_RANGE;
        if !(lo..=hi).contains(&self.rail.nav_fraction) {
            let clamped = if self.rail.nav_fraction.is_finite() {
                self.rail.nav_fraction.clamp(lo, hi)
            } else {
                default_nav_fraction()
            };
            warn!(
                value = self.rail.nav_fraction,
                clamped, "rail.nav_fraction out of range"
            );
            self.rail.nav_fraction = clamped;
        }
        if !self.rail.speed.is_finite() || self.rail.speed < 0.0 {
            warn!(value = self.rail.speed, "rail.speed invalid, using default");
            self.rail.speed = default_rail_speed();
        }
        self.rail.reference_frame_ms = clamp_or_default(
            "rail.reference_frame_ms",
            self.rail.reference_frame_ms,
            REFERENCE_FRAME_MS_RANGE,
            default_reference_frame_ms(),
        );
        if self.ui.animation_fps == 0 {
            warn!("ui.animation_fps is 0, using default");
            self.ui.animation_fps = default_animation_fps();
        }
        self.typewriter.chars_per_second = clamp_or_default(
            "typewriter.chars_per_second",
            self.typewriter.chars_per_second,
            CHARS_PER_SECOND_RANGE,
            default_type_speed(),
        );
        self.typewriter.erase_chars_per_second = clamp_or_default(
            "typewriter.erase_chars_per_second",
            self.typewriter.erase_chars_per_second,
            CHARS_PER_SECOND_RANGE,
            default_erase_speed(),
        );
        self
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/reelfront/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("reelfront")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Log file used while the terminal UI owns the screen
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("reelfront.log")
    }

    /// Content file override (with tilde expansion)
    pub fn content_path(&self) -> Option<PathBuf> {
        self.general.content_path.as_deref().map(expand_tilde)
    }

    /// Frame interval used while anything is animating
    pub fn animation_tick(&self) -> Duration {
        Duration::from_millis(1000 / self.ui.animation_fps.max(1) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.rail.resume_delay(), Duration::from_millis(2600));
        assert!((config.rail.nav_fraction - 0.8).abs() < f64::EPSILON);
        assert_eq!(config.ui.reduced_motion, MotionSetting::Auto);
        assert_eq!(config.ui.theme.name, "ember");
        assert_eq!(config.keymap.jump_to_top, "gg");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [rail]
            resume_delay_ms = 4000

            [ui]
            reduced_motion = "reduce"
            theme = "nord"
            "#,
        )
        .unwrap();
        assert_eq!(config.rail.resume_delay_ms, 4000);
        assert!((config.rail.speed - default_rail_speed()).abs() < f64::EPSILON);
        assert_eq!(config.ui.reduced_motion, MotionSetting::Reduce);
        assert_eq!(config.ui.theme.name, "nord");
        assert_eq!(config.ui.tick_rate_ms, 100);
    }

    #[test]
    fn test_theme_table_form() {
        let config = AppConfig::from_toml(
            r##"
            [ui.theme]
            name = "nord"
            colors = { accent = "#ff0000" }
            "##,
        )
        .unwrap();
        assert_eq!(config.ui.theme.name, "nord");
        assert_eq!(config.ui.theme.colors.accent.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn test_nav_fraction_clamped() {
        let config = AppConfig::from_toml("[rail]\nnav_fraction = 1.5\n").unwrap();
        assert!((config.rail.nav_fraction - 0.82).abs() < f64::EPSILON);

        let config = AppConfig::from_toml("[rail]\nnav_fraction = 0.1\n").unwrap();
        assert!((config.rail.nav_fraction - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_speed_falls_back() {
        let config = AppConfig::from_toml("[rail]\nspeed = -3.0\n").unwrap();
        assert!((config.rail.speed - default_rail_speed()).abs() < f64::EPSILON);
    }

    #[test]
    fn test_huge_reference_frame_clamped() {
        let config = AppConfig::from_toml("[rail]\nreference_frame_ms = 1e30\n").unwrap();
        assert_eq!(config.rail.reference_frame_ms, REFERENCE_FRAME_MS_RANGE.1);
        assert_eq!(config.rail.reference_frame(), Duration::from_secs(1));

        let config = AppConfig::from_toml("[rail]\nreference_frame_ms = 0.0\n").unwrap();
        assert!((config.rail.reference_frame_ms - default_reference_frame_ms()).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unvalidated_reference_frame_falls_back() {
        let rail = RailConfig {
            reference_frame_ms: 1e30,
            ..RailConfig::default()
        };
        assert_eq!(rail.reference_frame(), RailConfig::default().reference_frame());

        let rail = RailConfig {
            reference_frame_ms: f64::NAN,
            ..RailConfig::default()
        };
        assert_eq!(rail.reference_frame(), RailConfig::default().reference_frame());
    }

    #[test]
    fn test_typing_speeds_clamped() {
        let config = AppConfig::from_toml(
            "[typewriter]\nchars_per_second = 1e-300\nerase_chars_per_second = 1e9\n",
        )
        .unwrap();
        assert_eq!(config.typewriter.chars_per_second, CHARS_PER_SECOND_RANGE.0);
        assert_eq!(config.typewriter.erase_chars_per_second, CHARS_PER_SECOND_RANGE.1);
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = AppConfig::from_toml("[rail\nspeed = 1").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/reelfront.toml")).unwrap();
        assert_eq!(config.ui.animation_fps, 60);
    }
}
