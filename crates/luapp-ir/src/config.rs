use crate::error::ConfigError;
use crate::logging;
use crate::regalloc::MAX_REGISTERS;
use serde::Deserialize;

/// Options for one IR construction run.
///
/// ```toml
/// max_registers = 200
/// log_level = "luapp_ir=debug"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IrConfig {
    /// Register file size per prototype. Default: 255, which is also the ceiling.
    pub max_registers: u8,
    /// `tracing` filter directive used by [`IrConfig::init_logging`].
    /// Unset means `RUST_LOG`, then [`DEFAULT_FILTER`](logging::DEFAULT_FILTER).
    pub log_level: Option<String>,
}

impl Default for IrConfig {
    fn default() -> Self {
        IrConfig {
            max_registers: MAX_REGISTERS as u8,
            log_level: None,
        }
    }
}

impl IrConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: IrConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_registers == 0 {
            return Err(ConfigError::Invalid(
                "max_registers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The filter this config resolves to.
    pub fn log_filter(&self) -> tracing_subscriber::EnvFilter {
        logging::filter_for(self.log_level.as_deref())
    }

    /// Install the crate's subscriber with [`IrConfig::log_filter`], once per process.
    pub fn init_logging(&self) {
        logging::install(self.log_level.as_deref());
    }
}
