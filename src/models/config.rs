use std::path::{Path, PathBuf};

use eink7_dither::{DistanceMetric, DitherError, DitherOptions, Enhance, KernelKind, Palette};
use serde::Deserialize;

use crate::error::ConfigError;

/// Environment variable naming the config file when `--config` is absent.
pub const CONFIG_ENV_VAR: &str = "SEVENINK_CONFIG";

/// Dithering configuration loaded from a YAML file
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Diffusion kernel
    pub kernel: KernelKind,

    /// Alternate row direction
    pub serpentine: bool,

    /// Palette distance metric
    pub metric: DistanceMetric,

    /// Hex colors replacing the built-in seven-color palette
    pub palette: Option<Vec<String>>,

    /// Enhancement applied before dithering
    pub enhance: Option<Enhance>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let options = DitherOptions::default();
        Self {
            kernel: options.kernel,
            serpentine: options.serpentine,
            metric: DistanceMetric::default(),
            palette: None,
            enhance: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, falling back to `$SEVENINK_CONFIG`.
    ///
    /// No path at all, or a path that does not exist, gives the default
    /// configuration. A file that exists but cannot be read or parsed is an
    /// error naming the file.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let env_path = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        match resolve_path(path, env_path) {
            Some(path) => Self::load_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "Config file not found, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config = Self::parse(&content, path)?;
        tracing::info!(
            path = %path.display(),
            kernel = %config.kernel,
            metric = %config.metric,
            custom_palette = config.palette.is_some(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parse YAML text; `path` is only used to name the source in errors.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        // An empty document deserializes as null rather than an empty map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Build the configured palette with the configured distance metric.
    pub fn palette(&self) -> Result<Palette, ConfigError> {
        let palette = match &self.palette {
            Some(colors) => Palette::from_hex(colors.as_slice()).map_err(DitherError::from)?,
            None => Palette::eink7(),
        };
        Ok(palette.with_distance_metric(self.metric))
    }

    pub fn dither_options(&self) -> DitherOptions {
        DitherOptions::new()
            .kernel(self.kernel)
            .serpentine(self.serpentine)
    }

    /// Apply command-line overrides on top of file values.
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if let Some(kernel) = overrides.kernel {
            self.kernel = kernel;
        }
        if let Some(metric) = overrides.metric {
            self.metric = metric;
        }
        if overrides.no_serpentine {
            self.serpentine = false;
        }
        if overrides.enhance && self.enhance.is_none() {
            self.enhance = Some(Enhance::vibrant());
        }
        self
    }
}

/// Values given on the command line that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub kernel: Option<KernelKind>,
    pub metric: Option<DistanceMetric>,
    pub no_serpentine: bool,
    pub enhance: bool,
}

fn resolve_path(explicit: Option<&Path>, env_path: Option<PathBuf>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| env_path.filter(|p| !p.as_os_str().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use eink7_dither::Rgb;
    use pretty_assertions::assert_eq;

    fn parse(yaml: &str) -> AppConfig {
        AppConfig::parse(yaml, Path::new("test.yaml")).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.kernel, KernelKind::FloydSteinberg);
        assert!(config.serpentine);
        assert_eq!(config.metric, DistanceMetric::SimplifiedCiede2000);
        assert!(config.palette.is_none());
        assert!(config.enhance.is_none());
        assert_eq!(config.palette().unwrap(), Palette::eink7());
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(parse(""), AppConfig::default());
        assert_eq!(parse("  \n"), AppConfig::default());
    }

    #[test]
    fn test_deserialize_config() {
        let config = parse(
            r##"
kernel: jarvis-judice-ninke
serpentine: false
metric: cie76
palette: ["#000000", "#FFFFFF", "#FF0000"]
enhance:
  saturation: 1.5
"##,
        );

        assert_eq!(config.kernel, KernelKind::JarvisJudiceNinke);
        assert!(!config.serpentine);
        assert_eq!(config.metric, DistanceMetric::Cie76);

        let enhance = config.enhance.unwrap();
        assert_eq!(enhance.saturation, 1.5);
        assert_eq!(enhance.contrast, 1.0);
        assert_eq!(enhance.brightness, 1.0);

        let palette = config.palette().unwrap();
        assert_eq!(palette.len(), 3);
        assert_eq!(palette.color(2), Rgb::new(255, 0, 0));
        assert_eq!(palette.distance_metric(), DistanceMetric::Cie76);
    }

    #[test]
    fn test_rgb_metric_from_file() {
        let config = parse("metric: rgb\n");
        assert_eq!(config.metric, DistanceMetric::Rgb);

        let palette = config.palette().unwrap();
        assert_eq!(palette.distance_metric(), DistanceMetric::Rgb);
        // Dark gray goes to black in RGB, to white in Lab
        assert_eq!(palette.find_nearest(Rgb::new(120, 120, 120)).0, 0);
    }

    #[test]
    fn test_kernel_aliases() {
        assert_eq!(parse("kernel: fs").kernel, KernelKind::FloydSteinberg);
        assert_eq!(parse("kernel: jjn").kernel, KernelKind::JarvisJudiceNinke);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = parse("serpentine: false\n");
        assert_eq!(config.kernel, KernelKind::FloydSteinberg);
        assert!(!config.serpentine);
        assert_eq!(
            config.dither_options(),
            DitherOptions::new().serpentine(false)
        );
    }

    #[test]
    fn test_malformed_config_names_file() {
        let err = AppConfig::parse("kernel: [1, 2", Path::new("broken.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.yaml"));
    }

    #[test]
    fn test_unknown_kernel_rejected() {
        let err = AppConfig::parse("kernel: atkinson", Path::new("k.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_invalid_palette_color() {
        let config = parse("palette: ['#000000', '#GGGGGG']");
        assert!(matches!(
            config.palette().unwrap_err(),
            ConfigError::Palette(_)
        ));
    }

    #[test]
    fn test_overrides_take_precedence() {
        let config = parse("kernel: jjn\nmetric: cie76\nenhance:\n  contrast: 1.2\n");
        let overrides = Overrides {
            kernel: Some(KernelKind::FloydSteinberg),
            metric: Some(DistanceMetric::Rgb),
            no_serpentine: true,
            enhance: true,
        };
        let config = config.with_overrides(&overrides);

        assert_eq!(config.kernel, KernelKind::FloydSteinberg);
        assert_eq!(config.metric, DistanceMetric::Rgb);
        assert!(!config.serpentine);
        // --enhance does not replace factors the file already set
        assert_eq!(config.enhance.unwrap().contrast, 1.2);
    }

    #[test]
    fn test_enhance_flag_uses_vibrant_preset() {
        let overrides = Overrides {
            enhance: true,
            ..Default::default()
        };
        let config = AppConfig::default().with_overrides(&overrides);
        assert_eq!(config.enhance, Some(Enhance::vibrant()));
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_file(&dir.path().join("absent.yaml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sevenink.yaml");
        std::fs::write(&path, "kernel: jarvis-judice-ninke\n").unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.kernel, KernelKind::JarvisJudiceNinke);
    }

    #[test]
    fn test_resolve_path() {
        let explicit = Path::new("a.yaml");
        let env = Some(PathBuf::from("b.yaml"));

        assert_eq!(
            resolve_path(Some(explicit), env.clone()),
            Some(PathBuf::from("a.yaml"))
        );
        assert_eq!(resolve_path(None, env), Some(PathBuf::from("b.yaml")));
        assert_eq!(resolve_path(None, Some(PathBuf::new())), None);
        assert_eq!(resolve_path(None, None), None);
    }
}
