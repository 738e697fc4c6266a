#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::env;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    BackendURL,
    BackendHealthCheckTimeout,
    ConfigFile,
    SessionID,
    StorageFile,
    Username,
}

pub struct Config {}

fn app_dir(base: Option<path::PathBuf>) -> path::PathBuf {
    return base.unwrap_or_else(env::temp_dir).join("parley");
}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        if key == ConfigKey::Username {
            let mut user = env::var("USER").unwrap_or_else(|_| return "".to_string());
            if user.is_empty() {
                user = "User".to_string();
            }

            return user;
        }

        #[cfg(not(target_os = "macos"))]
        let config_path = app_dir(dirs::config_dir()).join("config.toml");
        #[cfg(target_os = "macos")]
        let config_path =
            app_dir(dirs::home_dir().map(|home| return home.join(".config"))).join("config.toml");

        let storage_path = app_dir(dirs::cache_dir()).join("storage.yaml");

        let res = match key {
            ConfigKey::BackendURL => "http://localhost:8000".to_string(),
            ConfigKey::BackendHealthCheckTimeout => "1000".to_string(),

            // Special
            ConfigKey::ConfigFile => config_path.to_string_lossy().to_string(),
            ConfigKey::SessionID => "".to_string(),
            ConfigKey::StorageFile => storage_path.to_string_lossy().to_string(),
            ConfigKey::Username => "".to_string(),
        };

        return res;
    }

    fn validate(key: ConfigKey, val: &str) -> Result<()> {
        if key == ConfigKey::BackendHealthCheckTimeout && val.parse::<u64>().is_err() {
            bail!(format!(
                "config.toml has an invalid value for key '{key}': {val}\nExpected a number of milliseconds"
            ));
        }

        if key == ConfigKey::BackendURL
            && !(val.starts_with("http://") || val.starts_with("https://"))
        {
            bail!(format!(
                "config.toml has an invalid value for key '{key}': {val}\nExpected an http:// or https:// URL"
            ));
        }

        return Ok(());
    }

    /// Layers defaults, then the config file, then CLI arguments and their
    /// environment variables.
    pub async fn load(clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if key == ConfigKey::ConfigFile {
                    continue;
                }

                if let Some(val) = doc.get(&key.to_string()) {
                    if let Some(val_int) = val.as_integer() {
                        let val_str = val_int.to_string();
                        Config::validate(key, &val_str)?;
                        Config::set(key, &val_str);
                    } else if let Some(val_str) = val.as_str() {
                        if val_str.is_empty() && key != ConfigKey::StorageFile {
                            continue;
                        }
                        Config::validate(key, val_str)?;
                        Config::set(key, val_str);
                    } else {
                        bail!(format!(
                            "config.toml has an invalid value for key '{key}': {val}"
                        ));
                    }
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }

        tracing::debug!(
            username = %Config::get(ConfigKey::Username),
            backend_url = %Config::get(ConfigKey::BackendURL),
            storage_file = %Config::get(ConfigKey::StorageFile),
            "config"
        );

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::SessionID || key == ConfigKey::ConfigFile {
                    return None;
                }

                if key == ConfigKey::Username {
                    return Some(
                        "# Your user name displayed in all chat bubbles.\n# username = \"\""
                            .to_string(),
                    );
                }

                let key_name = key.to_string();
                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key_name.as_str()))?;

                let description = arg
                    .get_help()
                    .map(|help| return help.to_string())
                    .unwrap_or_default();
                let description = description
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if val.parse::<i32>().is_ok() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
