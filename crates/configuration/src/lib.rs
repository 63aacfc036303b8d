use crate::error::ConfigError;
use crate::settings::Config;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{ArenaParams, DatabaseSettings};

/// Loads the application configuration from the `config.toml` file.
///
/// This function is the primary entry point for this crate. It reads the configuration file,
/// deserializes it into our strongly-typed `Config` struct, and returns it.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        // Tells the builder to look for a file named `config.toml`
        .add_source(config::File::with_name("config.toml"))
        // Optionally, one could add environment variables here as well.
        // .add_source(config::Environment::with_prefix("APP"));
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    Ok(config)
}

/// Rejects parameter combinations the arena cannot work with.
fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.arena.base_health <= 0 {
        return Err(ConfigError::ValidationError(
            "arena.base_health must be positive".to_string(),
        ));
    }
    if config.arena.defense_divisor <= 0 {
        return Err(ConfigError::ValidationError(
            "arena.defense_divisor must be positive".to_string(),
        ));
    }
    if config.database.max_connections == 0 {
        return Err(ConfigError::ValidationError(
            "database.max_connections must be at least 1".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{ArenaParams, DatabaseSettings};

    fn config() -> Config {
        Config {
            arena: ArenaParams {
                base_health: 100,
                health_per_price: 2,
                attack_low: 12,
                attack_med: 15,
                attack_high: 18,
                defense_divisor: 4,
            },
            database: DatabaseSettings {
                max_connections: 5,
                acquire_timeout_secs: 5,
            },
        }
    }

    #[test]
    fn accepts_sane_parameters() {
        assert!(validate(&config()).is_ok());
    }

    #[test]
    fn rejects_a_zero_defense_divisor() {
        let mut config = config();
        config.arena.defense_divisor = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn rejects_an_empty_pool() {
        let mut config = config();
        config.database.max_connections = 0;
        assert!(validate(&config).is_err());
    }
}
