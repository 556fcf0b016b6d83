use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// CLI configuration loaded from genql.toml.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GenqlConfig {
    #[serde(default)]
    pub document: DocumentConfig,
    #[serde(default)]
    pub init: InitConfig,
}

/// Where the schema document lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    #[serde(default = "default_document_path")]
    pub path: PathBuf,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            path: default_document_path(),
        }
    }
}

/// Settings for the header `genql init` writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_database_url_env")]
    pub database_url_env: String,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            database_url_env: default_database_url_env(),
        }
    }
}

fn default_document_path() -> PathBuf {
    PathBuf::from("prisma/schema.prisma")
}

fn default_provider() -> String {
    "postgresql".to_string()
}

fn default_database_url_env() -> String {
    "DATABASE_URL".to_string()
}

/// Discovery order for config file:
/// 1. `--config <path>` (explicit)
/// 2. `GENQL_CONFIG` env var
/// 3. `./genql.toml` (project-local)
/// 4. `$XDG_CONFIG_HOME/genql/config.toml`
/// 5. `~/.config/genql/config.toml`
pub fn load_config(explicit_path: Option<&Path>) -> Result<GenqlConfig, CliError> {
    if let Some(path) = explicit_path {
        return load_config_from_path(path);
    }

    if let Ok(env_path) = std::env::var("GENQL_CONFIG") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return load_config_from_path(&path);
        }
    }

    let local = PathBuf::from("genql.toml");
    if local.exists() {
        return load_config_from_path(&local);
    }

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        let path = PathBuf::from(xdg).join("genql/config.toml");
        if path.exists() {
            return load_config_from_path(&path);
        }
    }

    if let Some(home) = std::env::var_os("HOME") {
        let path = PathBuf::from(home).join(".config/genql/config.toml");
        if path.exists() {
            return load_config_from_path(&path);
        }
    }

    Ok(GenqlConfig::default())
}

fn load_config_from_path(path: &Path) -> Result<GenqlConfig, CliError> {
    let contents = std::fs::read_to_string(path).map_err(|e| CliError::Config {
        message: format!("cannot read {}: {}", path.display(), e),
    })?;

    let config: GenqlConfig = toml::from_str(&contents).map_err(|e| CliError::Config {
        message: format!("failed to parse {}: {}", path.display(), e),
    })?;
    tracing::debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}

/// The schema document path: `--schema` wins over the configuration.
pub fn resolve_document_path(config: &GenqlConfig, global: &GlobalOpts) -> PathBuf {
    global
        .schema
        .clone()
        .unwrap_or_else(|| config.document.path.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global(schema: Option<&str>) -> GlobalOpts {
        GlobalOpts {
            config: None,
            schema: schema.map(PathBuf::from),
            format: "human".into(),
            verbose: 0,
            quiet: false,
            no_color: false,
        }
    }

    #[test]
    fn default_config_has_expected_values() {
        let config = GenqlConfig::default();
        assert_eq!(config.document.path, PathBuf::from("prisma/schema.prisma"));
        assert_eq!(config.init.provider, "postgresql");
        assert_eq!(config.init.database_url_env, "DATABASE_URL");
    }

    #[test]
    fn parse_minimal_toml() {
        let toml_str = r#"
[document]
path = "db/schema.prisma"
"#;
        let config: GenqlConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.document.path, PathBuf::from("db/schema.prisma"));
        assert_eq!(config.init.provider, "postgresql");
    }

    #[test]
    fn parse_full_toml() {
        let toml_str = r#"
[document]
path = "schema.prisma"

[init]
provider = "sqlite"
database_url_env = "APP_DB"
"#;
        let config: GenqlConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.document.path, PathBuf::from("schema.prisma"));
        assert_eq!(config.init.provider, "sqlite");
        assert_eq!(config.init.database_url_env, "APP_DB");
    }

    #[test]
    fn schema_flag_overrides_config() {
        let config = GenqlConfig::default();
        assert_eq!(
            resolve_document_path(&config, &global(Some("other.prisma"))),
            PathBuf::from("other.prisma")
        );
        assert_eq!(
            resolve_document_path(&config, &global(None)),
            PathBuf::from("prisma/schema.prisma")
        );
    }

    #[test]
    fn explicit_config_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genql.toml");
        std::fs::write(&path, "[init]\nprovider = \"mysql\"\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.init.provider, "mysql");
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genql.toml");
        std::fs::write(&path, "[document\npath = ").unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
    }

    #[test]
    fn load_config_from_explicit_missing_file() {
        let result = load_config(Some(Path::new("/nonexistent/genql.toml")));
        assert!(result.is_err());
    }
}
