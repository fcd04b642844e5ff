//! Layered CLI configuration.
//!
//! Defaults, then a TOML file, then environment and flags (clap resolves
//! those two together before they reach [`MuseConfig::with_overrides`]).

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Config file looked up in the working directory.
const LOCAL_CONFIG: &str = "muse.toml";

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// On-disk shape of `muse.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    #[serde(default)]
    output: OutputSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OutputSection {
    dir: Option<PathBuf>,
}

/// Resolved settings for one invocation.
#[derive(Debug, Clone)]
pub struct MuseConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub output_dir: PathBuf,
}

/// Values supplied through flags or environment.
#[derive(Debug, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
}

impl Default for MuseConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: muse_gemini::DEFAULT_MODEL.to_string(),
            base_url: muse_gemini::DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            output_dir: PathBuf::from("."),
        }
    }
}

impl MuseConfig {
    /// Load from `explicit`, or the first config file found.
    ///
    /// An explicit path must exist; discovered paths are optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => discover(),
        };

        match path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading config file");
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }

    fn from_toml(text: &str) -> Result<Self> {
        let file: FileConfig = toml::from_str(text)?;
        let defaults = Self::default();

        Ok(Self {
            api_key: file.api_key.filter(|k| !k.trim().is_empty()),
            model: file.model.unwrap_or(defaults.model),
            base_url: file.base_url.unwrap_or(defaults.base_url),
            timeout: file
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            output_dir: file.output.dir.unwrap_or(defaults.output_dir),
        })
    }

    /// Apply flag/environment values on top of the file.
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(key) = overrides.api_key.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(model) = overrides.model {
            self.model = model;
        }
        if let Some(base_url) = overrides.base_url {
            self.base_url = base_url;
        }
        self
    }

    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "GEMINI_API_KEY environment variable not set.\n\
                 Set it with: export GEMINI_API_KEY=your-key\n\
                 or add `api_key = \"...\"` to {}",
                LOCAL_CONFIG
            )
        })
    }

    /// Resolve an output file name against the configured directory.
    pub fn output_path(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.output_dir.join(file)
        }
    }
}

fn discover() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG);
    if local.exists() {
        return Some(local);
    }

    let user = dirs::config_dir()?.join("muse").join("config.toml");
    user.exists().then_some(user)
}
