//! Configuration management for glaze.
//!
//! Parses `glaze.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `content.source_dir`
//! - `content.output_dir`
//! - `og_image.author_or_brand`
//! - `og_image.output_dir`
//! - `og_image.font`
//! - `og_image.brand_mark`

mod expand;

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override markdown source directory.
    pub source_dir: Option<PathBuf>,
    /// Override output directory for rendered fragments.
    pub output_dir: Option<PathBuf>,
    /// Override OG image output directory.
    pub og_output_dir: Option<PathBuf>,
    /// Override OG image generation flag.
    pub og_enabled: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "glaze.toml";

/// Default words-per-minute for reading time estimation.
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

/// Default badge swatch when no color is given.
pub const DEFAULT_BADGE_COLOR: &str = "#bebfc5";

/// Background variant for generated pages and OG images.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BgType {
    Plum,
    Dot,
    Rose,
    Particle,
}

impl BgType {
    /// All variants, in declaration order.
    pub const ALL: [Self; 4] = [Self::Plum, Self::Dot, Self::Rose, Self::Particle];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plum => "plum",
            Self::Dot => "dot",
            Self::Rose => "rose",
            Self::Particle => "particle",
        }
    }
}

impl fmt::Display for BgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BgType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|bg| bg.as_str() == s)
            .ok_or_else(|| {
                ConfigError::Validation(format!(
                    "unknown background '{s}', expected one of: plum, dot, rose, particle"
                ))
            })
    }
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content configuration (paths are relative strings from TOML).
    content: ContentConfigRaw,
    /// Reading time estimation settings.
    pub reading_time: ReadingTimeConfig,
    /// Badge directive settings.
    pub badge: BadgeConfig,
    /// OG image configuration (paths are relative strings from TOML).
    og_image: OgImageConfigRaw,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Resolved OG image configuration (set after loading).
    #[serde(skip)]
    pub og_image_resolved: OgImageConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw content configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    source_dir: Option<String>,
    output_dir: Option<String>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// Root directory of markdown sources.
    pub source_dir: PathBuf,
    /// Directory receiving HTML fragments and metadata JSON.
    pub output_dir: PathBuf,
}

/// Reading time configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReadingTimeConfig {
    /// Reading speed used for the estimate.
    pub words_per_minute: u32,
}

impl Default for ReadingTimeConfig {
    fn default() -> Self {
        Self {
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
        }
    }
}

/// Badge configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BadgeConfig {
    /// Color used by `:badge` when no `color` attribute is given.
    pub default_color: String,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            default_color: DEFAULT_BADGE_COLOR.to_owned(),
        }
    }
}

/// Raw OG image configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OgImageConfigRaw {
    enabled: Option<bool>,
    author_or_brand: Option<String>,
    fallback_title: Option<String>,
    fallback_bg_type: Option<BgType>,
    output_dir: Option<String>,
    font: Option<String>,
    font_family: Option<String>,
    system_fonts: Option<bool>,
    brand_mark: Option<String>,
    backgrounds: HashMap<String, String>,
}

/// Resolved OG image configuration with absolute paths.
#[derive(Debug, Clone)]
pub struct OgImageConfig {
    /// Whether OG images are generated at all.
    pub enabled: bool,
    /// Author or brand name printed above the title.
    pub author_or_brand: String,
    /// Title of the site-wide fallback image.
    pub fallback_title: String,
    /// Background used when a document declares none.
    pub fallback_bg_type: BgType,
    /// Flat directory that receives `<slug>.png` files.
    pub output_dir: PathBuf,
    /// Font file loaded into the font database.
    pub font: Option<PathBuf>,
    /// Font family referenced by the card markup.
    pub font_family: String,
    /// Also load fonts installed on the system.
    pub system_fonts: bool,
    /// SVG file replacing the built-in brand mark.
    pub brand_mark: Option<PathBuf>,
    /// Image files replacing the built-in background art.
    pub backgrounds: BTreeMap<BgType, PathBuf>,
}

impl OgImageConfig {
    /// Defaults with `output_dir` under `base`.
    #[must_use]
    pub fn with_base(base: &Path) -> Self {
        Self {
            enabled: true,
            author_or_brand: String::new(),
            fallback_title: "Untitled".to_owned(),
            fallback_bg_type: BgType::Plum,
            output_dir: base.join("public/og-images"),
            font: None,
            font_family: "Inter".to_owned(),
            system_fonts: true,
            brand_mark: None,
            backgrounds: BTreeMap::new(),
        }
    }
}

impl Default for OgImageConfig {
    fn default() -> Self {
        Self::with_base(Path::new("."))
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`og_image.output_dir`").
        field: String,
        /// Error message (e.g., "${`OG_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `glaze.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.content_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.content_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(og_output_dir) = &settings.og_output_dir {
            self.og_image_resolved.output_dir.clone_from(og_output_dir);
        }
        if let Some(og_enabled) = settings.og_enabled {
            self.og_image_resolved.enabled = og_enabled;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            content: ContentConfigRaw::default(),
            reading_time: ReadingTimeConfig::default(),
            badge: BadgeConfig::default(),
            og_image: OgImageConfigRaw::default(),
            content_resolved: ContentConfig {
                source_dir: base.join("src/content"),
                output_dir: base.join("dist"),
            },
            og_image_resolved: OgImageConfig::with_base(base),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reading_time.words_per_minute == 0 {
            return Err(ConfigError::Validation(
                "reading_time.words_per_minute must be greater than 0".to_owned(),
            ));
        }
        require_non_empty(&self.badge.default_color, "badge.default_color")?;

        let og = &self.og_image_resolved;
        if og.enabled {
            require_non_empty(&og.fallback_title, "og_image.fallback_title")?;
            require_non_empty(&og.font_family, "og_image.font_family")?;
            if og.font.is_none() && !og.system_fonts {
                return Err(ConfigError::Validation(
                    "og_image needs either `font` or `system_fonts = true`".to_owned(),
                ));
            }
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let content = &mut self.content;
        content.source_dir = expand::expand_opt(content.source_dir.as_deref(), "content.source_dir")?;
        content.output_dir = expand::expand_opt(content.output_dir.as_deref(), "content.output_dir")?;

        let og = &mut self.og_image;
        og.author_or_brand =
            expand::expand_opt(og.author_or_brand.as_deref(), "og_image.author_or_brand")?;
        og.output_dir = expand::expand_opt(og.output_dir.as_deref(), "og_image.output_dir")?;
        og.font = expand::expand_opt(og.font.as_deref(), "og_image.font")?;
        og.brand_mark = expand::expand_opt(og.brand_mark.as_deref(), "og_image.brand_mark")?;

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.content_resolved = ContentConfig {
            source_dir: resolve(self.content.source_dir.as_deref(), "src/content"),
            output_dir: resolve(self.content.output_dir.as_deref(), "dist"),
        };

        let raw = &self.og_image;
        let defaults = OgImageConfig::with_base(config_dir);

        let mut backgrounds = BTreeMap::new();
        for (name, path) in &raw.backgrounds {
            let bg: BgType = name.parse()?;
            let expanded = expand::expand_env(path, &format!("og_image.backgrounds.{name}"))?;
            backgrounds.insert(bg, config_dir.join(expanded));
        }

        self.og_image_resolved = OgImageConfig {
            enabled: raw.enabled.unwrap_or(defaults.enabled),
            author_or_brand: raw
                .author_or_brand
                .clone()
                .unwrap_or(defaults.author_or_brand),
            fallback_title: raw.fallback_title.clone().unwrap_or(defaults.fallback_title),
            fallback_bg_type: raw.fallback_bg_type.unwrap_or(defaults.fallback_bg_type),
            output_dir: raw
                .output_dir
                .as_deref()
                .map_or(defaults.output_dir, |d| config_dir.join(d)),
            font: raw.font.as_deref().map(|f| config_dir.join(f)),
            font_family: raw.font_family.clone().unwrap_or(defaults.font_family),
            system_fonts: raw.system_fonts.unwrap_or(defaults.system_fonts),
            brand_mark: raw.brand_mark.as_deref().map(|f| config_dir.join(f)),
            backgrounds,
        };

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/site"));
        assert_eq!(
            config.content_resolved.source_dir,
            PathBuf::from("/site/src/content")
        );
        assert_eq!(config.content_resolved.output_dir, PathBuf::from("/site/dist"));
        assert_eq!(
            config.og_image_resolved.output_dir,
            PathBuf::from("/site/public/og-images")
        );
        assert_eq!(config.reading_time.words_per_minute, 200);
        assert_eq!(config.badge.default_color, "#bebfc5");
        assert!(config.og_image_resolved.enabled);
        assert_eq!(config.og_image_resolved.fallback_bg_type, BgType::Plum);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.reading_time.words_per_minute, 200);
        assert_eq!(config.badge.default_color, "#bebfc5");
    }

    #[test]
    fn test_bg_type_from_str() {
        assert_eq!("rose".parse::<BgType>().unwrap(), BgType::Rose);
        assert!("stripes".parse::<BgType>().is_err());
        assert_eq!(BgType::Particle.to_string(), "particle");
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[content]
source_dir = "posts"
output_dir = "out"

[og_image]
author_or_brand = "Jane Doe"
fallback_title = "Jane's notes"
fallback_bg_type = "dot"
output_dir = "public/og"
font = "fonts/Inter.ttf"

[og_image.backgrounds]
rose = "art/rose.png"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project")).unwrap();

        assert_eq!(config.content_resolved.source_dir, PathBuf::from("/project/posts"));
        assert_eq!(config.content_resolved.output_dir, PathBuf::from("/project/out"));

        let og = &config.og_image_resolved;
        assert_eq!(og.author_or_brand, "Jane Doe");
        assert_eq!(og.fallback_title, "Jane's notes");
        assert_eq!(og.fallback_bg_type, BgType::Dot);
        assert_eq!(og.output_dir, PathBuf::from("/project/public/og"));
        assert_eq!(og.font, Some(PathBuf::from("/project/fonts/Inter.ttf")));
        assert_eq!(
            og.backgrounds.get(&BgType::Rose),
            Some(&PathBuf::from("/project/art/rose.png"))
        );
    }

    #[test]
    fn test_unknown_background_key_rejected() {
        let toml = r#"
[og_image.backgrounds]
stripes = "art/stripes.png"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.resolve_paths(Path::new("/project")).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("stripes"));
    }

    #[test]
    fn test_unknown_fallback_bg_type_is_parse_error() {
        let toml = r#"
[og_image]
fallback_bg_type = "stripes"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_zero_words_per_minute() {
        let mut config = Config::default_with_base(Path::new("/site"));
        config.reading_time.words_per_minute = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("words_per_minute"));
    }

    #[test]
    fn test_validate_empty_fallback_title() {
        let mut config = Config::default_with_base(Path::new("/site"));
        config.og_image_resolved.fallback_title = "  ".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("og_image.fallback_title"));
    }

    #[test]
    fn test_validate_disabled_og_skips_og_checks() {
        let mut config = Config::default_with_base(Path::new("/site"));
        config.og_image_resolved.enabled = false;
        config.og_image_resolved.fallback_title = String::new();
        config.og_image_resolved.system_fonts = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_requires_some_font_source() {
        let mut config = Config::default_with_base(Path::new("/site"));
        config.og_image_resolved.system_fonts = false;
        assert!(config.validate().is_err());

        config.og_image_resolved.font = Some(PathBuf::from("/site/Inter.ttf"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/site"));
        let settings = CliSettings {
            source_dir: Some(PathBuf::from("/elsewhere/content")),
            og_enabled: Some(false),
            ..CliSettings::default()
        };

        config.apply_cli_settings(&settings);

        assert_eq!(
            config.content_resolved.source_dir,
            PathBuf::from("/elsewhere/content")
        );
        assert_eq!(config.content_resolved.output_dir, PathBuf::from("/site/dist"));
        assert!(!config.og_image_resolved.enabled);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/site"));
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(
            config.og_image_resolved.output_dir,
            PathBuf::from("/site/public/og-images")
        );
        assert!(config.og_image_resolved.enabled);
    }

    #[test]
    fn test_expand_env_vars_output_dir() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("GLAZE_TEST_OG_DIR", "static/og");
        }

        let toml = r#"
[og_image]
output_dir = "${GLAZE_TEST_OG_DIR}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();
        config.resolve_paths(Path::new("/project")).unwrap();

        assert_eq!(
            config.og_image_resolved.output_dir,
            PathBuf::from("/project/static/og")
        );

        unsafe {
            std::env::remove_var("GLAZE_TEST_OG_DIR");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        let toml = r#"
[content]
source_dir = "${GLAZE_TEST_MISSING_SOURCE}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("content.source_dir"));
    }

    #[test]
    fn test_load_explicit_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("glaze.toml");
        std::fs::write(
            &path,
            "[og_image]\nauthor_or_brand = \"Brand\"\n[reading_time]\nwords_per_minute = 250\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.config_path, Some(path));
        assert_eq!(config.reading_time.words_per_minute, 250);
        assert_eq!(config.og_image_resolved.author_or_brand, "Brand");
        assert_eq!(
            config.content_resolved.source_dir,
            tmp.path().join("src/content")
        );
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let result = Config::load(Some(Path::new("/nonexistent/glaze.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_invalid_file_fails_validation() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("glaze.toml");
        std::fs::write(&path, "[reading_time]\nwords_per_minute = 0\n").unwrap();

        let result = Config::load(Some(&path), None);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
