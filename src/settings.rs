use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;
use tracing::{error, info};

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct RoomSettings {
    pub floorplan: String,
    pub door: Option<[i32; 2]>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WalkerSettings {
    pub leg_duration: u64,
    pub frame_interval: u32,
    pub frame_count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimSettings {
    pub tick_hz: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub room: RoomSettings,
    pub walker: WalkerSettings,
    pub sim: SimSettings,
}

pub fn load_config() -> Result<AppConfig, ConfigError> {
    info!("Attempting to load configuration from {}", DEFAULT_CONFIG_PATH);

    let settings = Config::builder()
        .add_source(File::new(DEFAULT_CONFIG_PATH, FileFormat::Toml).required(true))
        .build()
        .and_then(Config::try_deserialize::<AppConfig>);

    match settings {
        Ok(config) => {
            info!("Successfully loaded configuration: {:?}", config);
            Ok(config)
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            Err(e)
        }
    }
}
