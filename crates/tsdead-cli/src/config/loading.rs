use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized, Toml},
};

use crate::config::{ConfigOverrides, TsdeadConfig};
use crate::error::{ConfigError, Result};

const CONFIG_FILES: [&str; 2] = ["tsdead.toml", "tsdead.json"];

impl TsdeadConfig {
    /// Load configuration from multiple sources.
    /// Priority: CLI args > environment variables > config file > defaults
    pub fn load(
        cwd: &Path,
        config_path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if let Some(path) = Self::config_file(cwd, config_path)? {
            tracing::debug!(path = %path.display(), "loading config file");
            figment = match path.extension().and_then(|ext| ext.to_str()) {
                Some("json") => figment.merge(Json::file(path)),
                _ => figment.merge(Toml::file(path)),
            };
        }

        // TSDEAD_ROOT, TSDEAD_REPORT_DEFAULT_EXPORTS, ...
        figment = figment.merge(Env::prefixed("TSDEAD_"));

        figment = figment.merge(Serialized::defaults(overrides));

        let config: Self = figment.extract().map_err(|e| ConfigError::Invalid {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// The explicit `--config` file, or the first default file present in `cwd`.
    fn config_file(cwd: &Path, config_path: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = config_path {
            let path = cwd.join(path);
            if !path.is_file() {
                return Err(ConfigError::NotFound(path).into());
            }
            return Ok(Some(path));
        }
        Ok(CONFIG_FILES
            .iter()
            .map(|name| cwd.join(name))
            .find(|path| path.is_file()))
    }
}
