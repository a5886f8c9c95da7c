//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// File name looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "brigade.toml";

/// Prefix of environment overrides (`BRIGADE_LOOP__MAX_TURNS=8`)
pub const ENV_PREFIX: &str = "BRIGADE_";

/// One place configuration may come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    pub label: &'static str,
    pub path: PathBuf,
    pub found: bool,
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `BRIGADE_*` environment variables
    /// 2. Explicit config path (if provided)
    /// 3. Project: `./brigade.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/brigade/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(
            Self::global_config_path().as_deref(),
            Path::new("."),
            config_path,
        )
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(Box::new)
    }

    /// File-based layers only, rooted at `project_dir`.
    pub fn figment(
        global_path: Option<&Path>,
        project_dir: &Path,
        config_path: Option<&Path>,
    ) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global) = global_path
            && global.exists()
        {
            figment = figment.merge(Toml::file(global));
        }

        let project = project_dir.join(PROJECT_CONFIG_FILE);
        if project.exists() {
            figment = figment.merge(Toml::file(project));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("brigade").join("config.toml"))
    }

    /// Config file locations in priority order (for `--show-config`)
    pub fn sources(config_path: Option<&Path>) -> Vec<ConfigSource> {
        let mut sources = Vec::new();
        if let Some(path) = config_path {
            sources.push(ConfigSource {
                label: "Explicit",
                path: path.to_path_buf(),
                found: path.exists(),
            });
        }
        let project = PathBuf::from(PROJECT_CONFIG_FILE);
        sources.push(ConfigSource {
            label: "Project",
            found: project.exists(),
            path: project,
        });
        if let Some(global) = Self::global_config_path() {
            sources.push(ConfigSource {
                label: "Global",
                found: global.exists(),
                path: global,
            });
        }
        sources
    }
}
