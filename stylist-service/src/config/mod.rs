use service_core::config as core_config;
use service_core::error::AppError;

#[derive(Debug, Clone)]
pub struct StylistConfig {
    pub common: core_config::Config,
}

impl StylistConfig {
    pub fn load() -> Result<Self, AppError> {
        Ok(StylistConfig {
            common: core_config::Config::load()?,
        })
    }
}
