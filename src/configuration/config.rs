#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::collections::HashMap;
use std::env;
use std::ffi::OsStr;
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

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ConfigFile,
    HealthCheckTimeout,
    #[strum(serialize = "server-url")]
    ServerURL,
}

pub struct Config {}

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
        #[cfg(not(target_os = "macos"))]
        let config_path = dirs::config_dir()
            .unwrap_or_else(env::temp_dir)
            .join("healthchat/config.toml");
        #[cfg(target_os = "macos")]
        let config_path = path::PathBuf::from(env::var("HOME").unwrap_or_default())
            .join(".config/healthchat/config.toml");

        let res = match key {
            ConfigKey::HealthCheckTimeout => "1000".to_string(),
            ConfigKey::ServerURL => "http://192.168.1.10:5050".to_string(),

            // Special
            ConfigKey::ConfigFile => config_path.to_string_lossy().to_string(),
        };

        return res;
    }

    /// Resolves defaults, then the TOML config file, then CLI arguments and
    /// environment. Nothing is stored unless every layer validates.
    pub async fn load(cmd: Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        let mut resolved = ConfigKey::iter()
            .map(|key| return (key, Config::default(key)))
            .collect::<HashMap<ConfigKey, String>>();

        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                resolved.insert(ConfigKey::ConfigFile, arg_config_file.to_string());
            }
        }

        let config_path = path::PathBuf::from(&resolved[&ConfigKey::ConfigFile]);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if key == ConfigKey::ConfigFile {
                    continue;
                }

                if let Some(val) = doc.get(&key.to_string()) {
                    if let Some(val_int) = val.as_integer() {
                        if key != ConfigKey::HealthCheckTimeout {
                            bail!(format!(
                                "config.toml has an invalid value for key '{key}': expected a string"
                            ));
                        }
                        resolved.insert(key, val_int.to_string());
                    } else if let Some(val_str) = val.as_str() {
                        if val_str.is_empty() {
                            continue;
                        }
                        // Use clap value parsers to do validation.
                        if let Some(arg) = cmd
                            .get_arguments()
                            .find(|e| return e.get_long() == Some(key.to_string().as_str()))
                        {
                            if let Err(err) = arg.get_value_parser().parse_ref(
                                &cmd,
                                Some(arg),
                                OsStr::new(val_str),
                            ) {
                                bail!(format!(
                                    "config.toml has an invalid value for key '{key}': {val_str}\n{}",
                                    err.kind()
                                ));
                            }
                        }
                        resolved.insert(key, val_str.to_string());
                    } else {
                        bail!(format!("config.toml has an invalid value for key '{key}'"));
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
                    resolved.insert(key, val.to_string());
                }
            }
        }

        if resolved[&ConfigKey::HealthCheckTimeout]
            .parse::<u64>()
            .is_err()
        {
            bail!(format!(
                "{} must be a number of milliseconds",
                ConfigKey::HealthCheckTimeout
            ));
        }

        for (key, val) in resolved.iter() {
            Config::set(*key, val);
        }

        tracing::debug!(
            server_url = %Config::get(ConfigKey::ServerURL),
            health_check_timeout = %Config::get(ConfigKey::HealthCheckTimeout),
            config_file = %Config::get(ConfigKey::ConfigFile),
            "config"
        );

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let description = arg
                    .get_help()
                    .map(|e| return e.to_string())
                    .unwrap_or_default()
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
