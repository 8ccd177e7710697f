use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use url::Url;

/// Site origin used for seed links and form defaults.
pub const SITE_ORIGIN: &str = "https://kpii.or.kr/";

/// Runtime configuration.
///
/// Defaults are merged with `KPII_`-prefixed environment variables, e.g.
/// `KPII_DATABASE_URL=sqlite:/var/lib/kpii/kita.db`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub loglevel: String,
    /// Secret for the private session cookie; at least 64 bytes.
    pub cookie_secret: Option<String>,
    /// Drop the `Secure` attribute so the cookie also travels over plain HTTP.
    pub insecure_cookie: bool,
    /// Page holding the social contribution listing table.
    pub csr_source_url: Option<Url>,
    pub proxy: Option<Url>,
    pub auto_advance_secs: u64,
    pub session_idle_minutes: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:kita.db".to_string(),
            listen_addr: "0.0.0.0:8000".to_string(),
            loglevel: "info".to_string(),
            cookie_secret: None,
            insecure_cookie: false,
            csr_source_url: None,
            proxy: None,
            auto_advance_secs: 5,
            session_idle_minutes: 120,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::prefixed("KPII_"))
            .extract()
    }

    pub fn auto_advance_interval(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.auto_advance_secs.max(1) as i64)
    }

    pub fn session_idle_timeout(&self) -> time::Duration {
        time::Duration::minutes(self.session_idle_minutes.max(1))
    }
}
