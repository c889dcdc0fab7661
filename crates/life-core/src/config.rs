//! Configuration types for the grid, simulation and controller.

use crate::{Error, Result, SeedPattern};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest grid the controller will allocate (rows x columns)
pub const MAX_GRID_CELLS: i64 = 4_000_000;

/// Grid dimensions and initial pattern
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Number of rows
    pub rows: i32,
    /// Number of columns
    pub columns: i32,
    /// Initial "on" cells. `None` means the built-in glider + pulsar layout.
    pub seed: Option<SeedPattern>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 30,
            columns: 60,
            seed: None,
        }
    }
}

/// Simulation bookkeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// How many past generations are remembered for cycle detection
    pub history_len: usize,
    /// Emit population metrics every N generations (0 disables)
    pub metrics_interval: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            history_len: 10,
            metrics_interval: 100,
        }
    }
}

/// Stepping loop behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Delay between generations (milliseconds)
    pub interval_ms: u64,
    /// Stop the loop once the grid settles or starts repeating
    pub pause_on_cycle: bool,
    /// Fill probability used by `random` when no density is given
    pub random_density: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            interval_ms: 200,
            pause_on_cycle: false,
            random_density: 0.25,
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Emit JSON lines instead of human-readable logs
    pub json: bool,
    /// Filter directive used when `RUST_LOG` is unset
    pub filter: Option<String>,
}

/// Everything the controller binary reads at startup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub grid: GridConfig,
    pub simulation: SimulationConfig,
    pub controller: ControllerConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load from a JSON file; absent fields keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid.rows <= 0 || self.grid.columns <= 0 {
            return Err(Error::InvalidDimension {
                rows: self.grid.rows as i64,
                columns: self.grid.columns as i64,
            });
        }
        let cells = i64::from(self.grid.rows) * i64::from(self.grid.columns);
        if cells > MAX_GRID_CELLS {
            return Err(Error::Config(format!(
                "grid of {}x{} has {} cells, the limit is {}",
                self.grid.rows, self.grid.columns, cells, MAX_GRID_CELLS
            )));
        }
        if self.controller.interval_ms == 0 {
            return Err(Error::Config("controller.interval_ms must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&self.controller.random_density) {
            return Err(Error::Config(format!(
                "controller.random_density must be within 0.0..=1.0, got {}",
                self.controller.random_density
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs() {
        let config = AppConfig::default();
        assert_eq!(config.grid.rows, 30);
        assert_eq!(config.grid.columns, 60);
        assert!(config.grid.seed.is_none());
        assert_eq!(config.simulation.history_len, 10);
        assert_eq!(config.controller.interval_ms, 200);
        assert!(!config.telemetry.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{"grid": {"rows": 8, "seed": {"1": [3], "2": [1, 3]}}, "controller": {"interval_ms": 50}}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.grid.rows, 8);
        assert_eq!(config.grid.columns, 60);
        assert_eq!(config.grid.seed.as_ref().map(SeedPattern::len), Some(3));
        assert_eq!(config.controller.interval_ms, 50);
        assert_eq!(config.simulation.metrics_interval, 100);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.grid.columns = 0;
        assert!(matches!(config.validate(), Err(Error::InvalidDimension { .. })));

        let mut config = AppConfig::default();
        config.grid.rows = 1_000_000;
        config.grid.columns = 1_000_000;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut config = AppConfig::default();
        config.grid.rows = 2_000;
        config.grid.columns = 2_000;
        assert!(config.validate().is_ok());

        let mut config = AppConfig::default();
        config.controller.interval_ms = 0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut config = AppConfig::default();
        config.controller.random_density = 1.5;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("life-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"grid": {"rows": 12, "columns": 12}}"#).unwrap();
        let config = AppConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.grid.rows, 12);

        let missing = AppConfig::load(Path::new("/definitely/not/here.json"));
        assert!(matches!(missing, Err(Error::Io(_))));
    }
}
