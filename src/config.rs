use crate::animation::{Transition, TransitionStyle, get_transition};
use crate::element::{ElementFactory, ElementStyle, TextBox, get_element_factory};
use crate::render::Palette;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

/// Default number of elements.
pub const DEFAULT_NUM_ELEMENTS: usize = 300;

/// Default interval between two blinks, in milliseconds.
pub const DEFAULT_BLINK_INTERVAL: u64 = 1000;

/// Default opacity an element dims to while blinking.
pub const DEFAULT_BLINK_OPACITY: f32 = 0.5;

/// Default blink duration in milliseconds.
pub const DEFAULT_BLINK_DURATION: u64 = 1000;

/// Default duration of the animation onto a path, in milliseconds.
pub const DEFAULT_ANIMATION_DURATION: u64 = 1000;

/// Default id of the container elements are attached to.
pub const DEFAULT_CONTAINER: &str = "container";

/// Errors that can occur when loading the configuration file
#[derive(thiserror::Error, Debug)]
pub enum ConfigLoadError {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] serde_yaml::Error),
}

/// The contents of the configuration file.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    pub positioner: PositionerConfig,
    pub render: RenderConfig,

    /// SVG path data for every path the elements can be laid out on.
    pub paths: Vec<String>,
}

impl Config {
    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load the configuration file at the default location, if there is one.
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigLoadError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(contents)?;
        Ok(config.sanitize())
    }

    /// The path the configuration is looked up at when none is given explicitly.
    pub fn default_path() -> Option<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "pathblink")?;
        Some(dirs.config_dir().join("config.yaml"))
    }

    fn sanitize(mut self) -> Self {
        let opacity = self.positioner.blink.opacity;
        if !(0.0..=1.0).contains(&opacity) {
            warn!("blink opacity {opacity} is outside [0, 1], clamping it");
            self.positioner.blink.opacity = opacity.clamp(0.0, 1.0);
        }
        if self.render.cell_width <= 0.0 || self.render.cell_height <= 0.0 {
            warn!("cell size must be positive, using the default one");
            let defaults = RenderConfig::default();
            self.render.cell_width = defaults.cell_width;
            self.render.cell_height = defaults.cell_height;
        }
        if self.render.fps == 0 {
            warn!("fps must be positive, using the default");
            self.render.fps = RenderConfig::default().fps;
        }
        self
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct PositionerConfig {
    /// The id of the container the elements are attached to.
    pub container: String,

    /// The number of elements to create.
    pub elements: usize,

    /// What each element displays.
    pub element: ElementStyle,

    pub blink: BlinkConfig,

    /// The duration of the animation onto a path, in milliseconds.
    pub animation_duration: u64,

    /// The transition played when animating onto a path.
    pub transition: TransitionStyle,

    /// Seed for every random choice, for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for PositionerConfig {
    fn default() -> Self {
        Self {
            container: DEFAULT_CONTAINER.to_string(),
            elements: DEFAULT_NUM_ELEMENTS,
            element: ElementStyle::default(),
            blink: BlinkConfig::default(),
            animation_duration: DEFAULT_ANIMATION_DURATION,
            transition: TransitionStyle::default(),
            seed: None,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct BlinkConfig {
    /// Whether a random element blinks periodically.
    pub enabled: bool,

    /// The interval between each blink, in milliseconds.
    pub interval: u64,

    /// The opacity of the blinking element at the middle of the blink.
    pub opacity: f32,

    /// The duration of each blink, in milliseconds.
    pub duration: u64,
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval: DEFAULT_BLINK_INTERVAL,
            opacity: DEFAULT_BLINK_OPACITY,
            duration: DEFAULT_BLINK_DURATION,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct RenderConfig {
    /// How many surface pixels a terminal column spans.
    pub cell_width: f64,

    /// How many surface pixels a terminal row spans.
    pub cell_height: f64,

    /// Frames drawn per second.
    pub fps: u32,

    pub palette: Palette,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { cell_width: 8.0, cell_height: 16.0, fps: 30, palette: Palette::default() }
    }
}

/// Timing and intensity of the highlight pulse.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlinkOptions {
    pub interval: Duration,
    pub opacity: f32,
    pub duration: Duration,
}

impl Default for BlinkOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_BLINK_INTERVAL),
            opacity: DEFAULT_BLINK_OPACITY,
            duration: Duration::from_millis(DEFAULT_BLINK_DURATION),
        }
    }
}

impl From<&BlinkConfig> for BlinkOptions {
    fn from(config: &BlinkConfig) -> Self {
        Self {
            interval: Duration::from_millis(config.interval),
            opacity: config.opacity,
            duration: Duration::from_millis(config.duration),
        }
    }
}

/// Everything needed to build a [`Positioner`](crate::positioner::Positioner).
pub struct PositionerOptions<E> {
    pub container: String,
    pub elements: usize,
    pub element: ElementFactory<E>,

    /// `None` disables the highlight cycle.
    pub blink: Option<BlinkOptions>,

    pub animation_duration: Duration,
    pub transition: Box<dyn Transition>,
    pub rng: fastrand::Rng,
}

impl<E> PositionerOptions<E> {
    /// Options with every default, creating elements through `element`.
    pub fn new(element: ElementFactory<E>) -> Self {
        Self {
            container: DEFAULT_CONTAINER.to_string(),
            elements: DEFAULT_NUM_ELEMENTS,
            element,
            blink: None,
            animation_duration: Duration::from_millis(DEFAULT_ANIMATION_DURATION),
            transition: get_transition(TransitionStyle::None, fastrand::Rng::new()),
            rng: fastrand::Rng::new(),
        }
    }

    pub fn container<S: Into<String>>(self, container: S) -> Self {
        Self { container: container.into(), ..self }
    }

    pub fn elements(self, elements: usize) -> Self {
        Self { elements, ..self }
    }

    pub fn blink(self, blink: BlinkOptions) -> Self {
        Self { blink: Some(blink), ..self }
    }

    pub fn animation_duration(self, animation_duration: Duration) -> Self {
        Self { animation_duration, ..self }
    }

    pub fn transition<T: Transition + 'static>(self, transition: T) -> Self {
        Self { transition: Box::new(transition), ..self }
    }

    pub fn rng(self, rng: fastrand::Rng) -> Self {
        Self { rng, ..self }
    }
}

impl Default for PositionerOptions<TextBox> {
    fn default() -> Self {
        Self::new(get_element_factory(ElementStyle::Numbered, fastrand::Rng::new()))
    }
}

impl From<&PositionerConfig> for PositionerOptions<TextBox> {
    fn from(config: &PositionerConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self {
            container: config.container.clone(),
            elements: config.elements,
            element: get_element_factory(config.element, rng.fork()),
            blink: config.blink.enabled.then(|| BlinkOptions::from(&config.blink)),
            animation_duration: Duration::from_millis(config.animation_duration),
            transition: get_transition(config.transition, rng.fork()),
            rng,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::from_yaml("  \n").expect("invalid config");
        assert_eq!(config, Config::default());
        assert_eq!(config.positioner.elements, 300);
        assert_eq!(config.positioner.container, "container");
        assert!(!config.positioner.blink.enabled);
    }

    #[test]
    fn partial_file() {
        let contents = r#"
positioner:
  elements: 12
  transition: mix
  blink:
    enabled: true
    opacity: 0.2
paths:
  - "M0 0 L100 0"
"#;
        let config = Config::from_yaml(contents).expect("invalid config");
        assert_eq!(config.positioner.elements, 12);
        assert_eq!(config.positioner.transition, TransitionStyle::Mix);
        assert_eq!(config.positioner.blink.opacity, 0.2);
        assert_eq!(config.positioner.blink.interval, DEFAULT_BLINK_INTERVAL);
        assert_eq!(config.paths, vec!["M0 0 L100 0".to_string()]);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = Config::from_yaml("positioner:\n  blinking: true\n");
        assert!(matches!(result, Err(ConfigLoadError::Invalid(_))));
    }

    #[test]
    fn out_of_range_values_are_fixed() {
        let config = Config::from_yaml("positioner:\n  blink:\n    opacity: 3.0\nrender:\n  fps: 0\n").expect("invalid config");
        assert_eq!(config.positioner.blink.opacity, 1.0);
        assert_eq!(config.render.fps, RenderConfig::default().fps);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("failed to create file");
        writeln!(file, "positioner:\n  seed: 9\n  element: binary").expect("failed to write");
        let config = Config::load(file.path()).expect("invalid config");
        assert_eq!(config.positioner.seed, Some(9));
        assert_eq!(config.positioner.element, ElementStyle::Binary);
    }

    #[test]
    fn missing_file() {
        let result = Config::load(Path::new("/definitely/not/here.yaml"));
        assert!(matches!(result, Err(ConfigLoadError::Io(_))));
    }

    #[test]
    fn options_from_config() {
        let config = PositionerConfig {
            elements: 4,
            blink: BlinkConfig { enabled: true, interval: 250, ..Default::default() },
            seed: Some(1),
            ..Default::default()
        };
        let options = PositionerOptions::from(&config);
        assert_eq!(options.elements, 4);
        assert_eq!(options.animation_duration, Duration::from_millis(DEFAULT_ANIMATION_DURATION));
        let blink = options.blink.expect("blink disabled");
        assert_eq!(blink.interval, Duration::from_millis(250));
        assert_eq!(blink.opacity, DEFAULT_BLINK_OPACITY);
    }

    #[test]
    fn blink_disabled_by_default() {
        let options = PositionerOptions::from(&PositionerConfig::default());
        assert!(options.blink.is_none());
    }
}
