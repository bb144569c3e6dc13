//! Client configuration parsed from environment variables.

use crate::error::ConfigError;

pub const DEFAULT_SERVER_ROOT: &str = "https://recapextension.org/recap";

pub const SERVER_ROOT_VAR: &str = "RECAP_SERVER_ROOT";
pub const TEAM_NAME_VAR: &str = "RECAP_TEAM_NAME";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecapConfig {
    /// Root of the RECAP endpoints, ending in `/recap` for the production server.
    pub server_root: String,
    /// Team credited for uploads. Empty names count as unset.
    pub team_name: Option<String>,
}

impl Default for RecapConfig {
    fn default() -> Self {
        Self {
            server_root: DEFAULT_SERVER_ROOT.to_string(),
            team_name: None,
        }
    }
}

impl RecapConfig {
    pub fn new(server_root: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            server_root: validate_root(server_root)?,
            team_name: None,
        })
    }

    pub fn with_team_name(mut self, team_name: impl Into<String>) -> Self {
        self.team_name = normalize_team(Some(team_name.into()));
        self
    }

    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `RECAP_SERVER_ROOT`: default `https://recapextension.org/recap`
    /// - `RECAP_TEAM_NAME`: unset or empty means no team
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let server_root = match lookup(SERVER_ROOT_VAR) {
            Some(root) if !root.trim().is_empty() => validate_root(&root)?,
            _ => DEFAULT_SERVER_ROOT.to_string(),
        };
        Ok(Self {
            server_root,
            team_name: normalize_team(lookup(TEAM_NAME_VAR)),
        })
    }
}

fn validate_root(root: &str) -> Result<String, ConfigError> {
    let root = root.trim().trim_end_matches('/');
    if root.starts_with("http://") || root.starts_with("https://") {
        Ok(root.to_string())
    } else {
        Err(ConfigError::InvalidServerRoot(root.to_string()))
    }
}

fn normalize_team(team: Option<String>) -> Option<String> {
    team.filter(|t| !t.is_empty())
}
