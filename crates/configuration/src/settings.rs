use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub arena: ArenaParams,
    pub database: DatabaseSettings,
}

/// Tuning knobs for turning a catalog meal into an arena combatant.
#[derive(Debug, Clone, Deserialize)]
pub struct ArenaParams {
    /// Health every combatant starts with before the price bonus.
    pub base_health: i64,
    /// Extra health per whole unit of meal price.
    pub health_per_price: i64,
    /// Attack stat for LOW-difficulty meals.
    pub attack_low: i64,
    /// Attack stat for MED-difficulty meals.
    pub attack_med: i64,
    /// Attack stat for HIGH-difficulty meals.
    pub attack_high: i64,
    /// Defense = price / divisor, floored at 1.
    pub defense_divisor: i64,
}

/// Pool settings for the catalog database connection.
///
/// The database URL itself stays in the environment (`DATABASE_URL`),
/// not in the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Upper bound on pooled connections.
    pub max_connections: u32,
    /// How long to wait for a free connection before giving up.
    pub acquire_timeout_secs: u64,
}
