use serde::Deserialize;

/// Default API location, the mock served by `bin/serv`
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Where and how the client reaches the remote API
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Base URL, endpoint paths are appended to it
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Sent as `x-api-key` when present
    #[serde(default)]
    pub api_key: Option<String>,
    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Read `UMS_BASE_URL`, `UMS_API_KEY` and `UMS_TIMEOUT_SECS`; all optional
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed("UMS_").from_env()
    }

    /// Same as [`Self::from_env`] but over an explicit set of variables
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed("UMS_").from_iter(vars)
    }
}
