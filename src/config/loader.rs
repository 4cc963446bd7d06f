//! Layered configuration loading.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

const CONFIG_DIR_ENV: &str = "CATALOG_CONFIG_DIR";
const CONFIG_FILE_ENV: &str = "CATALOG_CONFIG_FILE";
const DEFAULT_CONFIG_DIR: &str = "config";

/// Prefix for environment overrides, e.g. `CATALOG_DATABASE__URL`
const ENV_PREFIX: &str = "CATALOG";
const ENV_SEPARATOR: &str = "__";

/// Loads [`Settings`] from, lowest priority first:
/// 1. `default.toml` (required)
/// 2. `{environment}.toml`
/// 3. `local.toml`
/// 4. `CATALOG_*` environment variables
///
/// A single config file replaces steps 1-3 when one is selected.
#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a loader from `CATALOG_CONFIG_DIR`, `CATALOG_CONFIG_FILE` and
    /// `CATALOG_APP_ENV`.
    ///
    /// # Errors
    ///
    /// Fails when both `CATALOG_CONFIG_DIR` and `CATALOG_CONFIG_FILE` are set.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV).ok().map(PathBuf::from);
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_dir.is_some() && config_file.is_some() {
            return Err(ConfigError::mutual_exclusivity(
                "CATALOG_CONFIG_DIR and CATALOG_CONFIG_FILE cannot both be set. \
                 Use CATALOG_CONFIG_DIR for layered configuration or \
                 CATALOG_CONFIG_FILE for a single configuration file.",
            ));
        }

        Ok(Self {
            config_dir: config_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Load a single file instead of the layered directory.
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Load and validate the configuration.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let settings: Settings = self.build_config()?.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        settings.validate()?;

        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = match self.config_file {
            Some(ref config_file) => add_file_source(Config::builder(), config_file, true)?,
            None => self.build_layered_config(Config::builder())?,
        };

        // CATALOG_SERVER__PORT -> server.port
        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator(ENV_SEPARATOR)
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()
            .map_err(ConfigError::from)
    }

    fn build_layered_config(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let builder = add_file_source(builder, &self.config_dir.join("default.toml"), true)?;
        let env_path = self
            .config_dir
            .join(format!("{}.toml", self.environment.as_str()));
        let builder = add_file_source(builder, &env_path, false)?;
        add_file_source(builder, &self.config_dir.join("local.toml"), false)
    }
}

fn add_file_source(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
    required: bool,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if required && !path.is_file() {
        return Err(ConfigError::file_not_found(format!(
            "Required configuration file not found: {}",
            path.display()
        )));
    }

    Ok(builder.add_source(File::from(path).format(FileFormat::Toml).required(required)))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serializes every test that touches process environment variables.
    pub(crate) static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const BASE: &str = r#"
        [server]
        port = 3000

        [database]
        url = "postgres://localhost/catalog"
    "#;

    fn setup_config_dir(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        for (name, content) in files {
            fs::write(temp_dir.path().join(name), content).expect("Failed to write config file");
        }
        temp_dir
    }

    /// Sets environment variables and restores them on drop
    pub(crate) struct EnvGuard {
        vars_to_restore: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        pub(crate) fn new() -> Self {
            Self {
                vars_to_restore: Vec::new(),
            }
        }

        pub(crate) fn set(&mut self, key: &str, value: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::set_var(key, value);
            }
        }

        pub(crate) fn remove(&mut self, key: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::remove_var(key);
            }
        }

        /// Clear every variable the loader reads.
        pub(crate) fn clean() -> Self {
            let mut env = Self::new();
            let keys: Vec<String> = std::env::vars()
                .map(|(key, _)| key)
                .filter(|key| key.starts_with("CATALOG_"))
                .collect();
            for key in keys {
                env.remove(&key);
            }
            env
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, original_value) in self.vars_to_restore.iter().rev() {
                unsafe {
                    match original_value {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    fn loader_for(dir: &TempDir) -> ConfigLoader {
        ConfigLoader {
            config_dir: dir.path().to_path_buf(),
            config_file: None,
            environment: AppEnvironment::Development,
        }
    }

    #[test]
    fn test_new_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let _env = EnvGuard::clean();

        let loader = ConfigLoader::new().unwrap();
        assert_eq!(loader.config_dir(), Path::new("config"));
        assert!(loader.config_file.is_none());
        assert_eq!(loader.environment(), AppEnvironment::Development);
    }

    #[test]
    fn test_new_reads_environment_variables() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let mut env = EnvGuard::clean();
        env.set("CATALOG_CONFIG_DIR", "/custom/config");
        env.set("CATALOG_APP_ENV", "prod");

        let loader = ConfigLoader::new().unwrap();
        assert_eq!(loader.config_dir(), Path::new("/custom/config"));
        assert_eq!(loader.environment(), AppEnvironment::Production);
    }

    #[test]
    fn test_dir_and_file_are_mutually_exclusive() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let mut env = EnvGuard::clean();
        env.set("CATALOG_CONFIG_DIR", "/custom/config");
        env.set("CATALOG_CONFIG_FILE", "/custom/app.toml");

        assert!(matches!(
            ConfigLoader::new(),
            Err(ConfigError::MutualExclusivityError(_))
        ));
    }

    #[test]
    fn test_missing_default_toml() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let _env = EnvGuard::clean();
        let dir = setup_config_dir(&[]);

        assert!(matches!(
            loader_for(&dir).load(),
            Err(ConfigError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_layered_precedence() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let mut env = EnvGuard::clean();
        let dir = setup_config_dir(&[
            ("default.toml", BASE),
            (
                "production.toml",
                "[server]\nport = 4000\nhost = \"0.0.0.0\"\n[logger]\nlevel = \"warn\"\n",
            ),
            ("local.toml", "[server]\nport = 5000\n"),
        ]);
        env.set("CATALOG_LOGGER__LEVEL", "debug");

        let settings = loader_for(&dir)
            .with_environment(AppEnvironment::Production)
            .load()
            .unwrap();

        assert_eq!(settings.server.port, 5000);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.logger.level, "debug");
        assert_eq!(settings.database.url, "postgres://localhost/catalog");
    }

    #[test]
    fn test_environment_file_is_optional() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let _env = EnvGuard::clean();
        let dir = setup_config_dir(&[("default.toml", BASE)]);

        let settings = loader_for(&dir)
            .with_environment(AppEnvironment::Staging)
            .load()
            .unwrap();

        assert_eq!(settings.server.port, 3000);
    }

    #[test]
    fn test_env_var_override_parses_numbers() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let mut env = EnvGuard::clean();
        let dir = setup_config_dir(&[("default.toml", BASE)]);
        env.set("CATALOG_SERVER__PORT", "8081");
        env.set("CATALOG_DATABASE__AUTO_MIGRATE", "true");

        let settings = loader_for(&dir).load().unwrap();

        assert_eq!(settings.server.port, 8081);
        assert!(settings.database.auto_migrate);
    }

    #[test]
    fn test_single_file_mode_skips_directory() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let _env = EnvGuard::clean();
        let dir = setup_config_dir(&[
            ("default.toml", "[server]\nport = 1\n"),
            ("standalone.toml", BASE),
        ]);

        let settings = loader_for(&dir)
            .with_config_file(dir.path().join("standalone.toml"))
            .load()
            .unwrap();

        assert_eq!(settings.server.port, 3000);
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let _env = EnvGuard::clean();
        let dir = setup_config_dir(&[("default.toml", "[database]\nurl = \"\"\n")]);

        assert!(matches!(
            loader_for(&dir).load(),
            Err(ConfigError::ValidationError { ref field, .. }) if field == "database.url"
        ));
    }
}
