//! Text rendering of the grid.

use life_world::{GridEngine, StepReport};
use std::io::Write;

pub const LIVE: char = '#';
pub const DEAD: char = '.';

/// Something that can present the grid after it changes
pub trait Renderer: Send + Sync {
    fn render(&self, grid: &GridEngine, generation: u64);

    /// Called after a timed or manual step; defaults to a full redraw
    fn render_step(&self, grid: &GridEngine, report: &StepReport) {
        self.render(grid, report.generation);
    }

    fn message(&self, text: &str);
}

/// Draw the grid as lines of `#` and `.`
pub fn frame(grid: &GridEngine, generation: u64) -> String {
    let mut out = String::with_capacity((grid.num_columns() + 1) * (grid.num_rows() + 1));
    out.push_str(&format!(
        "generation {}  population {}  ({}x{})\n",
        generation,
        grid.population(),
        grid.num_rows(),
        grid.num_columns()
    ));
    for row in grid.rows() {
        out.extend(row.iter().map(|&alive| if alive { LIVE } else { DEAD }));
        out.push('\n');
    }
    out
}

/// Prints frames to stdout
pub struct TerminalRenderer;

impl Renderer for TerminalRenderer {
    fn render(&self, grid: &GridEngine, generation: u64) {
        let mut stdout = std::io::stdout().lock();
        // stdout may already be closed
        let _ = stdout.write_all(frame(grid, generation).as_bytes());
        let _ = stdout.flush();
    }

    fn message(&self, text: &str) {
        println!("{text}");
    }
}
