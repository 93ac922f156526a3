use core_config::{AppInfo, FromEnv, app_info, env_bool, server::ServerConfig};

pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Mounts `/test/*` (reset, events, metrics). Defaults to on outside production.
    pub enable_test_routes: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let enable_test_routes = env_bool("ENABLE_TEST_ROUTES", !environment.is_production())?;

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            enable_test_routes,
        })
    }
}
