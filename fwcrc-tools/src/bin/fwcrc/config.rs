use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use figment::{
    providers::{Data, Env, Format, Json, Toml, Yaml},
    Figment,
};
use fwcrc::{ChecksumOptions, StagingLayout, VerifyOptions};
use serde::{Deserialize, Serialize};

use crate::util::logging::LogLevel;

/// Files to search for, without extension.
const CONFIG_FILES: [&str; 2] = [".fwcrc", ".fwcrc.local"];

/// Prefix of the environment variables overriding the configuration.
const ENV_PREFIX: &str = "FWCRC_";

/// The main struct holding all the possible config options.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub log_level: Option<LogLevel>,
    /// Where staged package images live.
    pub layout: StagingLayout,
    pub checksum: ChecksumOptions,
    /// Reject package records that carry no reference checksum.
    pub require_reference: bool,
}

impl Config {
    pub fn verify_options(&self) -> VerifyOptions {
        VerifyOptions {
            require_reference: self.require_reference,
            checksum: self.checksum,
        }
    }
}

/// Loads the configuration.
///
/// Sources are merged in order, later ones overriding earlier ones: built-in
/// defaults, `.fwcrc` and `.fwcrc.local` files in the home and the current
/// directory, the explicitly given `config_file`, and `FWCRC_` environment
/// variables (nested keys separated by `__`, e.g. `FWCRC_LAYOUT__ROOT`).
pub fn load_config(config_file: Option<&Path>) -> anyhow::Result<Config> {
    // Paths to search for the configuration file.
    let mut paths = vec![];
    if let Some(home) = directories::UserDirs::new().map(|user| user.home_dir().to_path_buf()) {
        paths.push(home);
    }
    paths.push(PathBuf::from("."));

    let default_config = serde_json::to_string_pretty(&Config::default())?;
    let mut figment = Figment::from(Data::<Json>::string(&default_config));
    for path in paths {
        for file in CONFIG_FILES {
            figment = figment
                .merge(Toml::file(path.join(format!("{file}.toml"))))
                .merge(Json::file(path.join(format!("{file}.json"))))
                .merge(Yaml::file(path.join(format!("{file}.yaml"))))
                .merge(Yaml::file(path.join(format!("{file}.yml"))));
        }
    }

    if let Some(config_file) = config_file {
        anyhow::ensure!(
            config_file.is_file(),
            "The configuration file {:?} does not exist.",
            config_file
        );
        figment = merge_file(figment, config_file)?;
    }

    let figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

    figment
        .extract::<Config>()
        .context("Failed to parse the configuration.")
}

/// Merges a single file into `figment`, choosing the format from its extension.
pub fn merge_file(figment: Figment, file: &Path) -> anyhow::Result<Figment> {
    let figment = match file.extension().and_then(|e| e.to_str()) {
        Some("toml") => figment.merge(Toml::file(file)),
        Some("json") => figment.merge(Json::file(file)),
        Some("yml" | "yaml") => figment.merge(Yaml::file(file)),
        _ => bail!(
            "File format of {:?} not recognized from extension (supported: .toml, .json, .yaml / .yml)",
            file
        ),
    };

    Ok(figment)
}
