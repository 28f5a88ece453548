use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use thiserror::Error;

use solana_sdk::pubkey::Pubkey;

use alm_instructions::{ControllerIxBuilder, Result as IxResult};
use alm_program_common::programs::ProgramIds;

use crate::network::NetworkKind;

/// Description of errors that occur when reading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed while trying I/O on {path}: {error}")]
    IoError {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("failed while parsing toml in {path}: {error}")]
    Toml {
        path: PathBuf,
        error: toml::de::Error,
    },
}

/// The programs a client talks to on a given network
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvironmentConfig {
    /// The network this environment should exist within
    pub network: NetworkKind,

    /// The program deployments on that network
    pub programs: ProgramIds,
}

impl EnvironmentConfig {
    /// An environment using the public deployments of every program
    pub fn new(network: NetworkKind) -> Self {
        Self {
            network,
            programs: ProgramIds::default(),
        }
    }

    /// Instruction builder for the controller with `id` in this environment
    pub fn controller_ix_builder(&self, id: u16, authority: Pubkey) -> IxResult<ControllerIxBuilder> {
        ControllerIxBuilder::from_id(self.programs, id, authority)
    }
}

/// Program addresses that replace the public deployment when present
#[serde_as]
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct ProgramOverrides {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    controller: Option<Pubkey>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    token: Option<Pubkey>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    token_2022: Option<Pubkey>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    associated_token: Option<Pubkey>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    system: Option<Pubkey>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    kamino_lend: Option<Pubkey>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    kamino_farms: Option<Pubkey>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    drift: Option<Pubkey>,
}

impl ProgramOverrides {
    fn apply(&self, defaults: ProgramIds) -> ProgramIds {
        ProgramIds {
            controller: self.controller.unwrap_or(defaults.controller),
            token: self.token.unwrap_or(defaults.token),
            token_2022: self.token_2022.unwrap_or(defaults.token_2022),
            associated_token: self.associated_token.unwrap_or(defaults.associated_token),
            system: self.system.unwrap_or(defaults.system),
            kamino_lend: self.kamino_lend.unwrap_or(defaults.kamino_lend),
            kamino_farms: self.kamino_farms.unwrap_or(defaults.kamino_farms),
            drift: self.drift.unwrap_or(defaults.drift),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct EnvConfigFile {
    network: NetworkKind,

    #[serde(default)]
    programs: ProgramOverrides,
}

/// Parse environment configuration from toml text
pub fn parse_env_config(content: &str) -> Result<EnvironmentConfig, toml::de::Error> {
    let file = toml::from_str::<EnvConfigFile>(content)?;

    if file.programs != ProgramOverrides::default() {
        log::info!("{:?} program overrides: {:?}", file.network, file.programs);
    }

    Ok(EnvironmentConfig {
        network: file.network,
        programs: file.programs.apply(ProgramIds::default()),
    })
}

/// Read environment configuration from a toml file
pub fn read_env_config_file(path: &Path) -> Result<EnvironmentConfig, ConfigError> {
    log::info!("reading environment config from {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|error| ConfigError::IoError {
        path: path.to_path_buf(),
        error,
    })?;

    parse_env_config(&content).map_err(|error| ConfigError::Toml {
        path: path.to_path_buf(),
        error,
    })
}
