//! Configuration for locator invocations.
//!
//! Load order: `.objlocator/config.toml` → environment variables → defaults.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".objlocator";
const CONFIG_FILE: &str = "config.toml";

/// Top-level locator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    pub resolve: ResolveConfig,
    pub output: OutputConfig,
    pub snapshot: SnapshotConfig,
}

/// Resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Namespace used when the caller does not name one.
    pub namespace: String,
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty: bool,
}

/// Snapshot settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// Default cluster snapshot file, relative to the project root.
    pub path: Option<PathBuf>,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            namespace: "default".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Helper to parse an env var and apply it to a config field.
fn env_override<T: std::str::FromStr>(var: &str, target: &mut T) {
    if let Ok(v) = std::env::var(var)
        && let Ok(n) = v.parse()
    {
        *target = n;
    }
}

impl LocatorConfig {
    /// Path of the config file for a project root.
    pub fn file(project_root: &Path) -> PathBuf {
        project_root.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Load config from `.objlocator/config.toml` in the project root, with env var overrides.
    /// Falls back to defaults if no config file exists.
    pub fn load(project_root: &Path) -> Result<Self> {
        let config_path = Self::file(project_root);

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };

        env_override("OBJLOCATOR_NAMESPACE", &mut config.resolve.namespace);
        env_override("OBJLOCATOR_PRETTY", &mut config.output.pretty);
        if let Ok(path) = std::env::var("OBJLOCATOR_SNAPSHOT")
            && !path.is_empty()
        {
            config.snapshot.path = Some(PathBuf::from(path));
        }

        // Relative snapshot paths are anchored at the project root.
        if let Some(path) = config.snapshot.path.take() {
            config.snapshot.path = Some(if path.is_relative() {
                project_root.join(path)
            } else {
                path
            });
        }

        if config.resolve.namespace.trim().is_empty() {
            anyhow::bail!("resolve.namespace must not be empty");
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LocatorConfig::default();
        assert_eq!(config.resolve.namespace, "default");
        assert!(config.output.pretty);
        assert!(config.snapshot.path.is_none());
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
[resolve]
namespace = "prod"

[snapshot]
path = "cluster.json"
"#;
        let config: LocatorConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.resolve.namespace, "prod");
        assert_eq!(config.snapshot.path, Some(PathBuf::from("cluster.json")));
        // Defaults for unspecified fields
        assert!(config.output.pretty);
    }

    #[test]
    fn test_config_load_nonexistent() {
        let config = LocatorConfig::load(Path::new("/nonexistent/path")).unwrap();
        assert_eq!(config.resolve.namespace, "default");
    }

    #[test]
    fn test_load_anchors_relative_snapshot_path() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join(".objlocator");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("config.toml"),
            r#"
[snapshot]
path = "fixtures/cluster.json"
"#,
        )
        .unwrap();

        let config = LocatorConfig::load(tmp.path()).unwrap();
        assert_eq!(
            config.snapshot.path,
            Some(tmp.path().join("fixtures/cluster.json"))
        );
    }

    #[test]
    fn test_load_rejects_blank_namespace() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join(".objlocator");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.toml"), "[resolve]\nnamespace = \"\"\n").unwrap();

        assert!(LocatorConfig::load(tmp.path()).is_err());
    }
}
