use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{Result, ScoreError};
use crate::MediaType;

/// Account flags applied when a caller does not send its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountConfig {
    pub premium: bool,
    pub verified: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostDefaults {
    pub media: MediaType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8787,
        }
    }
}

/// Caller-side defaults. The scoring rules themselves are fixed and have no
/// configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    pub account: AccountConfig,
    pub post: PostDefaults,
    pub server: ServerConfig,
}

impl ScorerConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>)> {
        let config_path = path.or_else(default_config_path);
        let mut config = match config_path.as_ref() {
            Some(path) if path.exists() => {
                let contents =
                    std::fs::read_to_string(path).map_err(|source| ScoreError::ConfigRead {
                        path: path.clone(),
                        source,
                    })?;
                info!(path = %path.display(), "loaded config");
                toml::from_str(&contents).map_err(|source| ScoreError::ConfigParse {
                    path: path.clone(),
                    source,
                })?
            }
            _ => ScorerConfig::default(),
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let write_error = |reason: String| ScoreError::ConfigWrite {
            path: path.to_path_buf(),
            reason,
        };
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|err| write_error(err.to_string()))?;
        }
        let payload = toml::to_string_pretty(self).map_err(|err| write_error(err.to_string()))?;
        std::fs::write(path, payload).map_err(|err| write_error(err.to_string()))?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Some(value) = env_flag("POST_SCORE_PREMIUM") {
            self.account.premium = value;
        }
        if let Some(value) = env_flag("POST_SCORE_VERIFIED") {
            self.account.verified = value;
        }
        if let Ok(media) = env::var("POST_SCORE_MEDIA") {
            match media.parse::<MediaType>() {
                Ok(value) => self.post.media = value,
                Err(err) => debug!(%err, "ignoring POST_SCORE_MEDIA"),
            }
        }
        if let Ok(host) = env::var("POST_SCORE_HOST") {
            if !host.trim().is_empty() {
                self.server.host = host;
            }
        }
        if let Ok(port) = env::var("POST_SCORE_PORT") {
            if let Ok(value) = port.parse::<u16>() {
                self.server.port = value;
            }
        }
    }
}

fn env_flag(name: &str) -> Option<bool> {
    let value = env::var(name).ok()?;
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("POST_SCORE_CONFIG")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/post-score.toml")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: ScorerConfig = toml::from_str("[account]\npremium = true\nverified = false\n")
            .expect("config parses");
        assert!(config.account.premium);
        assert_eq!(config.post.media, MediaType::None);
        assert_eq!(config.server.port, 8787);
    }

    #[test]
    fn media_default_parses_from_toml() {
        let config: ScorerConfig =
            toml::from_str("[post]\nmedia = \"video\"\n").expect("config parses");
        assert_eq!(config.post.media, MediaType::Video);
    }

    #[test]
    fn write_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("post-score.toml");
        let mut config = ScorerConfig::default();
        config.account.verified = true;
        config.server.port = 9000;
        config.write(&path).expect("config written");

        let contents = std::fs::read_to_string(&path).expect("config readable");
        let loaded: ScorerConfig = toml::from_str(&contents).expect("config parses");
        assert_eq!(loaded, config);
    }

    #[test]
    fn invalid_file_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[account\npremium = ").expect("write broken file");
        let err = ScorerConfig::load(Some(path)).expect_err("broken config rejected");
        assert!(matches!(err, ScoreError::ConfigParse { .. }));
    }
}
