use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Manifest endpoint of the Material Symbols font set.
pub const DEFAULT_METADATA_URL: &str =
    "http://fonts.google.com/metadata/icons?incomplete=1&key=material_symbols";

/// Per-icon SVG URL. Placeholders: `{host}`, `{family}`, `{icon}`, `{size_px}`.
pub const DEFAULT_SVG_URL_TEMPLATE: &str =
    "https://{host}/s/i/short-term/release/{family}/{icon}/default/{size_px}px.svg";

/// Output directory relative to the repository root. `{project}` is substituted.
pub const DEFAULT_OUTPUT_DIR: &str = "src/{project}/Icons";

/// Fixed render size of every fetched icon.
pub const ICON_SIZE_PX: u32 = 24;

/// Global configuration loaded from `~/.config/symgen/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// URL of the icon manifest (served with a 5-char anti-hijacking preamble).
    pub metadata_url: String,
    /// Template for the per-icon SVG URL.
    pub svg_url_template: String,
    /// Destination directory for generated files, relative to the repository root.
    pub output_dir: String,
    /// Namespace of the generated code; also substituted into `output_dir`.
    pub project: String,
    /// Maximum number of SVG downloads in flight per family.
    pub max_concurrent_fetches: usize,
    /// Connect timeout per request, in seconds.
    pub connect_timeout_secs: u64,
    /// Total timeout per request, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            metadata_url: DEFAULT_METADATA_URL.to_string(),
            svg_url_template: DEFAULT_SVG_URL_TEMPLATE.to_string(),
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            project: "LumexUI".to_string(),
            max_concurrent_fetches: 50,
            connect_timeout_secs: 15,
            request_timeout_secs: 30,
        }
    }
}

impl GeneratorConfig {
    /// Concurrency limit, never below one.
    pub fn concurrency(&self) -> usize {
        self.max_concurrent_fetches.max(1)
    }

    /// Absolute output directory for the given repository root.
    pub fn output_dir_in(&self, root: &Path) -> PathBuf {
        root.join(self.output_dir.replace("{project}", &self.project))
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("symgen")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<GeneratorConfig> {
    let path = config_path()?;
    load_or_init_at(&path)
}

/// Same as [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<GeneratorConfig> {
    if !path.exists() {
        let default_cfg = GeneratorConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: GeneratorConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = GeneratorConfig::default();
        assert_eq!(cfg.metadata_url, DEFAULT_METADATA_URL);
        assert_eq!(cfg.max_concurrent_fetches, 50);
        assert_eq!(cfg.project, "LumexUI");
        assert_eq!(cfg.connect_timeout_secs, 15);
    }

    #[test]
    fn output_dir_substitutes_project() {
        let cfg = GeneratorConfig::default();
        let dir = cfg.output_dir_in(Path::new("/repo"));
        assert_eq!(dir, Path::new("/repo/src/LumexUI/Icons"));
    }

    #[test]
    fn concurrency_is_at_least_one() {
        let cfg = GeneratorConfig {
            max_concurrent_fetches: 0,
            ..GeneratorConfig::default()
        };
        assert_eq!(cfg.concurrency(), 1);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            metadata_url = "http://127.0.0.1:8080/metadata"
            svg_url_template = "http://{host}/{family}/{icon}/{size_px}.svg"
            output_dir = "out/{project}"
            project = "Acme"
            max_concurrent_fetches = 8
            connect_timeout_secs = 5
            request_timeout_secs = 10
        "#;
        let cfg: GeneratorConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.max_concurrent_fetches, 8);
        assert_eq!(cfg.project, "Acme");
        assert_eq!(cfg.output_dir_in(Path::new("/r")), Path::new("/r/out/Acme"));
    }

    #[test]
    fn load_or_init_writes_defaults_then_reads_them_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let created = load_or_init_at(&path).unwrap();
        assert!(path.exists());
        assert_eq!(created, GeneratorConfig::default());

        let edited = std::fs::read_to_string(&path)
            .unwrap()
            .replace("max_concurrent_fetches = 50", "max_concurrent_fetches = 3");
        std::fs::write(&path, edited).unwrap();
        let loaded = load_or_init_at(&path).unwrap();
        assert_eq!(loaded.max_concurrent_fetches, 3);
    }
}
