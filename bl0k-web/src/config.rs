use gloo_storage::{LocalStorage, Storage};

const KEY_API_BASE: &str = "api-base";
const KEY_AUTH_TOKEN: &str = "auth-token";

pub const DEFAULT_API_BASE: &str = "https://api.bl0k.cz/1";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub api_base: String,
    pub token: Option<String>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            api_base: String::from(DEFAULT_API_BASE),
            token: None,
        }
    }
}

impl Config {
    /// Defaults, overridden by whatever LocalStorage holds
    pub fn load() -> Config {
        let mut config = Config::default();
        if let Ok(base) = LocalStorage::get::<String>(KEY_API_BASE) {
            tracing::info!(%base, "using api base from local storage");
            config.api_base = String::from(base.trim_end_matches('/'));
        }
        config.token = LocalStorage::get(KEY_AUTH_TOKEN).ok();
        config
    }
}
