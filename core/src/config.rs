//! Base URLs for the Roblox web hosts the client talks to.

use serde::Deserialize;

pub const DEFAULT_APIS_URL: &str = "https://apis.roblox.com";
pub const DEFAULT_GAMES_URL: &str = "https://games.roblox.com";
pub const DEFAULT_GROUPS_URL: &str = "https://groups.roblox.com";
pub const DEFAULT_THUMBNAILS_URL: &str = "https://thumbnails.roblox.com";

/// One base URL per upstream host. Trailing slashes are stripped on every
/// constructor so paths can be appended with a single `/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Host for the modern endpoints; relative request paths resolve here.
    pub apis_base_url: String,
    pub games_base_url: String,
    pub groups_base_url: String,
    pub thumbnails_base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            apis_base_url: DEFAULT_APIS_URL.to_string(),
            games_base_url: DEFAULT_GAMES_URL.to_string(),
            groups_base_url: DEFAULT_GROUPS_URL.to_string(),
            thumbnails_base_url: DEFAULT_THUMBNAILS_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Route every host to the same base URL, e.g. a local mock server.
    pub fn single_host(base_url: &str) -> Self {
        let base = trim(base_url);
        Self {
            apis_base_url: base.clone(),
            games_base_url: base.clone(),
            groups_base_url: base.clone(),
            thumbnails_base_url: base,
        }
    }

    /// Defaults overridden by `ROBLOX_API_BASE_URL` (all hosts), then by the
    /// per-host `ROBLOX_APIS_URL`, `ROBLOX_GAMES_URL`, `ROBLOX_GROUPS_URL`
    /// and `ROBLOX_THUMBNAILS_URL`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = match lookup("ROBLOX_API_BASE_URL") {
            Some(base) => Self::single_host(&base),
            None => Self::default(),
        };
        if let Some(url) = lookup("ROBLOX_APIS_URL") {
            config.apis_base_url = url;
        }
        if let Some(url) = lookup("ROBLOX_GAMES_URL") {
            config.games_base_url = url;
        }
        if let Some(url) = lookup("ROBLOX_GROUPS_URL") {
            config.groups_base_url = url;
        }
        if let Some(url) = lookup("ROBLOX_THUMBNAILS_URL") {
            config.thumbnails_base_url = url;
        }
        config.normalized()
    }

    /// Strip trailing slashes from every base URL.
    pub fn normalized(self) -> Self {
        Self {
            apis_base_url: trim(&self.apis_base_url),
            games_base_url: trim(&self.games_base_url),
            groups_base_url: trim(&self.groups_base_url),
            thumbnails_base_url: trim(&self.thumbnails_base_url),
        }
    }
}

fn trim(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
