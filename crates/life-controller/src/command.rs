//! Text commands read from the terminal.

use life_core::{Coord, Error, Result};
use std::str::FromStr;

pub const HELP: &str = "\
commands:
  start | stop          run or pause the simulation
  step [COUNT]          advance generations, stopping early once settled
  toggle ROW COL        flip a cell
  inspect ROW COL       show a cell and its live neighbors
  interval MS           set the delay between generations
  clear                 turn every cell off
  random [DENSITY]      fill with a random soup
  load NAME [ROW COL]   replace the grid with a named pattern
  show                  print the grid
  help                  print this message
  quit                  exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Start,
    Stop,
    Step(u64),
    Toggle(Coord),
    Inspect(Coord),
    Interval(u64),
    Clear,
    Random(Option<f32>),
    Load { name: String, at: Coord },
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let Some(word) = parts.next() else {
            return Err(Error::InvalidCommand("empty input".to_string()));
        };
        let args: Vec<&str> = parts.collect();

        let command = match (word.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("start", []) => Command::Start,
            ("stop", []) => Command::Stop,
            ("step", []) => Command::Step(1),
            ("step", [count]) => {
                let count = parse_number::<u64>(count)?;
                if count == 0 {
                    return Err(Error::InvalidCommand("step count must be positive".to_string()));
                }
                Command::Step(count)
            }
            ("toggle", [row, col]) => Command::Toggle(parse_coord(row, col)?),
            ("inspect", [row, col]) => Command::Inspect(parse_coord(row, col)?),
            ("interval", [ms]) => {
                let ms = parse_number::<u64>(ms)?;
                if ms == 0 {
                    return Err(Error::InvalidCommand("interval must be positive".to_string()));
                }
                Command::Interval(ms)
            }
            ("clear", []) => Command::Clear,
            ("random", []) => Command::Random(None),
            ("random", [density]) => {
                let density = parse_number::<f32>(density)?;
                if !(0.0..=1.0).contains(&density) {
                    return Err(Error::InvalidCommand(format!(
                        "density must be within 0.0..=1.0, got {density}"
                    )));
                }
                Command::Random(Some(density))
            }
            ("load", [name]) => Command::Load {
                name: name.to_string(),
                at: Coord::new(0, 0),
            },
            ("load", [name, row, col]) => Command::Load {
                name: name.to_string(),
                at: parse_coord(row, col)?,
            },
            ("show", []) => Command::Show,
            ("help" | "?", []) => Command::Help,
            ("quit" | "exit", []) => Command::Quit,
            _ => return Err(Error::InvalidCommand(line.trim().to_string())),
        };

        Ok(command)
    }
}

fn parse_coord(row: &str, col: &str) -> Result<Coord> {
    Ok(Coord::new(parse_number(row)?, parse_number(col)?))
}

fn parse_number<T: FromStr>(value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::InvalidCommand(format!("not a number: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!("start".parse::<Command>().unwrap(), Command::Start);
        assert_eq!("  STOP ".parse::<Command>().unwrap(), Command::Stop);
        assert_eq!("step".parse::<Command>().unwrap(), Command::Step(1));
        assert_eq!("step 25".parse::<Command>().unwrap(), Command::Step(25));
        assert!("step 0".parse::<Command>().is_err());
        assert_eq!("exit".parse::<Command>().unwrap(), Command::Quit);
        assert_eq!("?".parse::<Command>().unwrap(), Command::Help);
    }

    #[test]
    fn test_parse_coordinates() {
        assert_eq!(
            "toggle 3 4".parse::<Command>().unwrap(),
            Command::Toggle(Coord::new(3, 4))
        );
        // Negative coordinates parse; the grid rejects them later
        assert_eq!(
            "inspect -1 0".parse::<Command>().unwrap(),
            Command::Inspect(Coord::new(-1, 0))
        );
        assert!("toggle 3".parse::<Command>().is_err());
        assert!("toggle a b".parse::<Command>().is_err());
    }

    #[test]
    fn test_parse_interval_and_random() {
        assert_eq!("interval 50".parse::<Command>().unwrap(), Command::Interval(50));
        assert!("interval 0".parse::<Command>().is_err());
        assert!("interval -5".parse::<Command>().is_err());

        assert_eq!("random".parse::<Command>().unwrap(), Command::Random(None));
        assert_eq!("random 0.5".parse::<Command>().unwrap(), Command::Random(Some(0.5)));
        assert!("random 2".parse::<Command>().is_err());
    }

    #[test]
    fn test_parse_load() {
        assert_eq!(
            "load glider".parse::<Command>().unwrap(),
            Command::Load {
                name: "glider".to_string(),
                at: Coord::new(0, 0)
            }
        );
        assert_eq!(
            "load pulsar 2 40".parse::<Command>().unwrap(),
            Command::Load {
                name: "pulsar".to_string(),
                at: Coord::new(2, 40)
            }
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(matches!("".parse::<Command>(), Err(Error::InvalidCommand(_))));
        assert!(matches!("dance".parse::<Command>(), Err(Error::InvalidCommand(_))));
        assert!(matches!("start now".parse::<Command>(), Err(Error::InvalidCommand(_))));
    }
}
