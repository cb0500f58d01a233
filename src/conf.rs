use config::{Config, ConfigError, Environment};
use lazy_static::lazy_static;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Settings {
    pub service_name: String,
    pub listen_port: String,
    #[serde(default)]
    pub database_url: String,
    pub database_pool_max_connections: u32,
    //auth
    pub jwt_secret: String,
    pub jwt_lifetime_hours: i64,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let conf = Config::builder()
            .set_default("service_name", "jobtrack")?
            .set_default("listen_port", "3000")?
            .set_default("database_pool_max_connections", 5)?
            .set_default("jwt_lifetime_hours", 720)?
            .add_source(Environment::default())
            .build()?;
        let s: Settings = conf.try_deserialize()?;
        if s.jwt_secret.is_empty() {
            return Err(ConfigError::Message("JWT_SECRET must not be empty".into()));
        }
        Ok(s)
    }
}

lazy_static! {
    pub static ref settings: Settings = Settings::new().expect("improperly configured");
}
