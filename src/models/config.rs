use serde::Deserialize;

/// Configuration options of the Rango server.
///
/// Loaded from `config/default.yaml`, an optional `config/{APP_ENV}.yaml`
/// and `APP_*` environment variables, in that order.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Key material for signing and encrypting cookies, at least 64 bytes.
    pub secret: String,
    /// Glob of the Tera templates.
    pub templates_dir: String,
    #[serde(default)]
    pub secure_cookies: bool,
    /// Shown on the about page.
    pub author: String,
}
