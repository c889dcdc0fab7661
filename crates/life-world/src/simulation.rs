//! Simulation driver: generation counting, metrics and cycle detection.

use crate::grid::GridEngine;
use crate::patterns;
use life_core::{Coord, GridConfig, Result, SeedPattern, SimulationConfig};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::collections::VecDeque;
use std::hash::{Hash, Hasher};
use tracing::{debug, event, info, instrument, Level};

/// How the grid relates to recent generations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cycle {
    /// Nothing changed this generation
    Still,
    /// The grid matches the one from this many generations ago
    Period(usize),
}

/// Outcome of a single generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepReport {
    pub generation: u64,
    pub changed: Vec<Coord>,
    pub population: usize,
    pub cycle: Option<Cycle>,
}

/// A past generation: the hash filters candidates, the cells confirm a match
struct Snapshot {
    hash: u64,
    cells: Vec<bool>,
}

pub struct Simulation {
    engine: GridEngine,
    config: SimulationConfig,
    generation: u64,
    // Most recent generation at the back
    history: VecDeque<Snapshot>,
}

impl Simulation {
    pub fn new(grid_config: &GridConfig, config: &SimulationConfig) -> Result<Self> {
        let seed = grid_config
            .seed
            .clone()
            .unwrap_or_else(patterns::default_seed);
        let engine = GridEngine::new(grid_config.rows, grid_config.columns, &seed)?;
        Ok(Self::from_engine(engine, config.clone()))
    }

    pub fn from_engine(engine: GridEngine, config: SimulationConfig) -> Self {
        let mut sim = Self {
            engine,
            config,
            generation: 0,
            history: VecDeque::new(),
        };
        sim.reset_history();
        sim
    }

    pub fn engine(&self) -> &GridEngine {
        &self.engine
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Run one generation
    pub fn advance(&mut self) -> StepReport {
        let changed = self.engine.step();
        self.generation += 1;

        let cycle = if changed.is_empty() {
            Some(Cycle::Still)
        } else {
            self.record_generation()
        };
        let population = self.engine.population();

        debug!(
            generation = self.generation,
            changed = changed.len(),
            population,
            ?cycle,
            "Advanced generation"
        );

        if self.config.metrics_interval > 0 && self.generation % self.config.metrics_interval == 0 {
            self.emit_population_metrics();
        }

        StepReport {
            generation: self.generation,
            changed,
            population,
            cycle,
        }
    }

    /// Run `count` generations, stopping early once a cycle shows up
    #[instrument(skip(self))]
    pub fn run(&mut self, count: u64) -> Option<StepReport> {
        let mut last = None;
        for _ in 0..count {
            let report = self.advance();
            let settled = report.cycle.is_some();
            last = Some(report);
            if settled {
                break;
            }
        }
        last
    }

    pub fn toggle(&mut self, row: i32, col: i32) -> Result<bool> {
        let alive = self.engine.toggle(row, col)?;
        self.reset_history();
        Ok(alive)
    }

    pub fn get_state(&self, row: i32, col: i32) -> Result<bool> {
        self.engine.get_state(row, col)
    }

    pub fn count_live_neighbors(&self, row: i32, col: i32) -> Result<u8> {
        self.engine.count_live_neighbors(row, col)
    }

    /// Turn every cell off and restart the generation count
    pub fn clear(&mut self) {
        self.engine.clear();
        self.generation = 0;
        self.reset_history();
        info!(event = "grid_cleared", "Grid cleared");
    }

    /// Replace the grid contents with a new seed and restart the generation count
    pub fn reseed(&mut self, seed: &SeedPattern) {
        self.engine.reseed(seed);
        self.generation = 0;
        self.reset_history();
        info!(
            event = "grid_reseeded",
            seed_cells = seed.len(),
            population = self.engine.population(),
            "Grid reseeded"
        );
    }

    fn snapshot(&self) -> Snapshot {
        let cells = self.engine.cells();
        let mut hasher = DefaultHasher::new();
        cells.hash(&mut hasher);
        Snapshot {
            hash: hasher.finish(),
            cells: cells.to_vec(),
        }
    }

    fn reset_history(&mut self) {
        self.history.clear();
        let snapshot = self.snapshot();
        self.history.push_back(snapshot);
    }

    fn record_generation(&mut self) -> Option<Cycle> {
        let current = self.snapshot();
        let period = self
            .history
            .iter()
            .rev()
            .position(|past| past.hash == current.hash && past.cells == current.cells)
            .map(|distance| Cycle::Period(distance + 1));

        self.history.push_back(current);
        while self.history.len() > self.config.history_len.max(1) {
            self.history.pop_front();
        }
        period
    }

    fn emit_population_metrics(&self) {
        let total = self.engine.num_rows() * self.engine.num_columns();
        let population = self.engine.population();
        let density = population as f64 / total as f64;

        info!(
            event = "population_metrics",
            generation = self.generation,
            population,
            total_cells = total,
            density = format!("{:.3}", density),
            "Population metrics"
        );

        event!(
            Level::INFO,
            gauge_name = "population",
            gauge_value = population,
            "Population gauge"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{BLINKER, BLOCK, GLIDER};

    fn sim_with(rows: i32, columns: i32, seed: SeedPattern) -> Simulation {
        let grid_config = GridConfig {
            rows,
            columns,
            seed: Some(seed),
        };
        Simulation::new(&grid_config, &SimulationConfig::default()).unwrap()
    }

    #[test]
    fn test_simulation_creation() {
        let sim = Simulation::new(&GridConfig::default(), &SimulationConfig::default()).unwrap();
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.engine().population(), patterns::default_seed().len());
    }

    #[test]
    fn test_invalid_grid_config() {
        let grid_config = GridConfig {
            rows: 0,
            ..Default::default()
        };
        assert!(Simulation::new(&grid_config, &SimulationConfig::default()).is_err());
    }

    #[test]
    fn test_block_reports_still() {
        let mut sim = sim_with(4, 4, BLOCK.seed_at(1, 1));
        let report = sim.advance();
        assert_eq!(report.generation, 1);
        assert_eq!(report.cycle, Some(Cycle::Still));
        assert_eq!(report.population, 4);
    }

    #[test]
    fn test_blinker_reports_period_two() {
        let mut sim = sim_with(5, 5, BLINKER.seed_at(2, 1));
        assert_eq!(sim.advance().cycle, None);
        assert_eq!(sim.advance().cycle, Some(Cycle::Period(2)));
    }

    #[test]
    fn test_hash_match_without_equal_cells_is_not_a_cycle() {
        let mut sim = sim_with(5, 5, BLINKER.seed_at(2, 1));
        sim.advance();

        // Plant a colliding entry: same hash as the next (horizontal) phase, different cells
        let horizontal_hash = sim.history[0].hash;
        sim.history.clear();
        sim.history.push_back(Snapshot {
            hash: horizontal_hash,
            cells: vec![false; 25],
        });

        assert_eq!(sim.advance().cycle, None);
    }

    #[test]
    fn test_glider_translates() {
        let mut sim = sim_with(10, 10, GLIDER.seed_at(0, 0));
        let start: Vec<Coord> = sim.engine().live_cells().collect();
        for _ in 0..4 {
            assert_eq!(sim.advance().cycle, None);
        }
        let moved: Vec<Coord> = sim.engine().live_cells().collect();
        let expected: Vec<Coord> = start.iter().filter_map(|c| c.offset(1, 1)).collect();
        assert_eq!(moved, expected);
    }

    #[test]
    fn test_run_stops_at_cycle() {
        let mut sim = sim_with(5, 5, BLINKER.seed_at(2, 1));
        let report = sim.run(100).unwrap();
        assert_eq!(report.generation, 2);
        assert_eq!(sim.generation(), 2);
    }

    #[test]
    fn test_toggle_resets_cycle_history() {
        let mut sim = sim_with(5, 5, BLINKER.seed_at(2, 1));
        sim.advance();
        assert!(sim.toggle(0, 0).unwrap());
        assert!(!sim.toggle(0, 0).unwrap());
        // Back on the vertical phase, but the horizontal phase was forgotten
        assert_eq!(sim.advance().cycle, None);
        assert_eq!(sim.generation(), 2);
    }

    #[test]
    fn test_clear_and_reseed_reset_generation() {
        let mut sim = sim_with(5, 5, BLINKER.seed_at(2, 1));
        sim.advance();
        sim.clear();
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.engine().population(), 0);

        sim.reseed(&BLOCK.seed_at(0, 0));
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.engine().population(), 4);
        assert!(sim.get_state(1, 1).unwrap());
    }

    #[test]
    fn test_report_serializes() {
        let mut sim = sim_with(4, 4, BLOCK.seed_at(1, 1));
        let json = serde_json::to_value(sim.advance()).unwrap();
        assert_eq!(json["generation"], 1);
        assert_eq!(json["cycle"], "Still");
    }
}
