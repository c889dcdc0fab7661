//! Runs the simulation on a timer and applies user commands between steps.

use crate::command::{Command, HELP};
use crate::render::Renderer;
use life_core::{ControllerConfig, Coord, Error, Result, SeedPattern};
use life_world::{patterns, Simulation, StepReport};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

/// What the command loop should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// State of one cell as seen by `inspect`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellInfo {
    pub coord: Coord,
    pub alive: bool,
    pub live_neighbors: u8,
}

struct Runner {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

pub struct Controller {
    simulation: Arc<Mutex<Simulation>>,
    renderer: Arc<dyn Renderer>,
    config: ControllerConfig,
    runner: Option<Runner>,
}

impl Controller {
    pub fn new(simulation: Simulation, renderer: Arc<dyn Renderer>, config: ControllerConfig) -> Self {
        Self {
            simulation: Arc::new(Mutex::new(simulation)),
            renderer,
            config,
            runner: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.runner
            .as_ref()
            .is_some_and(|runner| !runner.handle.is_finished())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.config.interval_ms)
    }

    pub fn generation(&self) -> u64 {
        self.simulation.lock().generation()
    }

    /// Start stepping; the first generation runs immediately
    pub fn start(&mut self) {
        self.spawn_runner(Instant::now());
    }

    /// Stop stepping. Returns once no further step can happen.
    pub async fn stop(&mut self) {
        if let Some(runner) = self.runner.take() {
            runner.cancel.cancel();
            // A cancelled or finished task has nothing left to report
            let _ = runner.handle.await;
            info!(event = "simulation_stopped", generation = self.generation(), "Simulation stopped");
        }
    }

    /// Change the delay between generations. A running loop picks it up from the next tick.
    pub async fn set_interval(&mut self, ms: u64) -> Result<()> {
        if ms == 0 {
            return Err(Error::InvalidCommand("interval must be positive".to_string()));
        }
        self.config.interval_ms = ms;
        info!(interval_ms = ms, "Interval changed");

        if self.is_running() {
            self.stop().await;
            let period = self.interval();
            self.spawn_runner(Instant::now() + period);
        }
        Ok(())
    }

    /// Advance up to `count` generations by hand, stopping early once the grid settles
    pub fn step(&self, count: u64) -> Option<StepReport> {
        let (report, grid) = {
            let mut sim = self.simulation.lock();
            let report = sim.run(count)?;
            (report, sim.engine().clone())
        };
        self.renderer.render_step(&grid, &report);
        Some(report)
    }

    pub fn toggle(&self, coord: Coord) -> Result<bool> {
        let alive = self.simulation.lock().toggle(coord.row, coord.col)?;
        debug!(row = coord.row, col = coord.col, alive, "Cell toggled");
        self.show();
        Ok(alive)
    }

    pub fn inspect(&self, coord: Coord) -> Result<CellInfo> {
        let sim = self.simulation.lock();
        Ok(CellInfo {
            coord,
            alive: sim.get_state(coord.row, coord.col)?,
            live_neighbors: sim.count_live_neighbors(coord.row, coord.col)?,
        })
    }

    pub fn clear(&self) {
        self.simulation.lock().clear();
        self.show();
    }

    /// Replace the grid with a random soup
    pub fn randomize(&self, density: Option<f32>) -> u64 {
        let density = density.unwrap_or(self.config.random_density);
        let rng_seed = rand::random::<u64>();
        self.reseed_with(|rows, columns| SeedPattern::random(rows, columns, density, rng_seed));
        info!(event = "random_soup", density, rng_seed, "Applied random soup");
        rng_seed
    }

    /// Replace the grid with a named pattern placed at `at`. The whole pattern must fit.
    pub fn load(&self, name: &str, at: Coord) -> Result<()> {
        let pattern = patterns::find(name)
            .ok_or_else(|| Error::InvalidCommand(format!("unknown pattern: {name}")))?;

        let (rows, columns) = {
            let sim = self.simulation.lock();
            (sim.engine().num_rows(), sim.engine().num_columns())
        };
        if !pattern.fits(rows, columns, at) {
            return Err(Error::InvalidCommand(format!(
                "{} at {} does not fit the {}x{} grid",
                pattern.name, at, rows, columns
            )));
        }

        self.reseed_with(|_, _| pattern.seed_at(at.row, at.col));
        Ok(())
    }

    /// Render a copy of the current grid; the lock is released before drawing
    pub fn show(&self) {
        let (grid, generation) = {
            let sim = self.simulation.lock();
            (sim.engine().clone(), sim.generation())
        };
        self.renderer.render(&grid, generation);
    }

    #[instrument(skip(self))]
    pub async fn handle(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Start => {
                if self.is_running() {
                    self.renderer.message("already running");
                } else {
                    self.start();
                }
            }
            Command::Stop => self.stop().await,
            Command::Step(count) => {
                self.step(count);
            }
            Command::Toggle(coord) => {
                self.toggle(coord)?;
            }
            Command::Inspect(coord) => {
                let info = self.inspect(coord)?;
                self.renderer.message(&format!(
                    "{} is {} with {} live neighbors",
                    info.coord,
                    if info.alive { "on" } else { "off" },
                    info.live_neighbors
                ));
            }
            Command::Interval(ms) => self.set_interval(ms).await?,
            Command::Clear => self.clear(),
            Command::Random(density) => {
                self.randomize(density);
            }
            Command::Load { name, at } => self.load(&name, at)?,
            Command::Show => self.show(),
            Command::Help => self.renderer.message(HELP),
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn reseed_with(&self, seed: impl FnOnce(i32, i32) -> SeedPattern) {
        {
            let mut sim = self.simulation.lock();
            let (rows, columns) = (sim.engine().num_rows(), sim.engine().num_columns());
            sim.reseed(&seed(rows as i32, columns as i32));
        }
        self.show();
    }

    fn spawn_runner(&mut self, first_tick: Instant) {
        if self.is_running() {
            return;
        }

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run_loop(
            self.simulation.clone(),
            self.renderer.clone(),
            first_tick,
            self.interval(),
            self.config.pause_on_cycle,
            cancel.clone(),
        ));
        self.runner = Some(Runner { cancel, handle });
        info!(
            event = "simulation_started",
            interval_ms = self.config.interval_ms,
            "Simulation started"
        );
    }
}

async fn run_loop(
    simulation: Arc<Mutex<Simulation>>,
    renderer: Arc<dyn Renderer>,
    first_tick: Instant,
    period: Duration,
    pause_on_cycle: bool,
    cancel: CancellationToken,
) {
    let mut ticker = interval_at(first_tick, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                let (report, grid) = {
                    let mut sim = simulation.lock();
                    let report = sim.advance();
                    (report, sim.engine().clone())
                };
                renderer.render_step(&grid, &report);

                if let (true, Some(cycle)) = (pause_on_cycle, report.cycle) {
                    info!(
                        event = "simulation_settled",
                        generation = report.generation,
                        ?cycle,
                        "Pattern settled, pausing"
                    );
                    renderer.message(&format!("settled at generation {} ({:?}), paused", report.generation, cycle));
                    break;
                }
            }
        }
    }
}
