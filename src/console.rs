//! Line commands for driving the adapter by hand

use std::fmt;

use crate::telescope_control::{Coordinates, TelescopeAdapter};
use crate::util::*;

pub const HELP: &str = "\
goto <ra> <dec>     slew to RA (hours) / DEC (degrees) and track
sync <ra> <dec>     sync the mount to RA / DEC
move <n|s|e|w> <s>  move at slew rate index s
stop <n|s|e|w>      stop moving in a direction
speed <s>           select slew rate index s
park | unpark
connect | disconnect
pos | devices | status
help | quit";

#[derive(Debug, PartialEq)]
pub enum Command {
    Goto(Coordinates),
    Sync(Coordinates),
    Move(MotionDirection, i32),
    Speed(i32),
    Park,
    Unpark,
    Connect,
    Disconnect,
    Position,
    Devices,
    Status,
    Help,
    Quit,
}

#[derive(Debug, PartialEq)]
pub struct ParseError(String);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseError {}

fn parse_number<T: std::str::FromStr>(arg: Option<&str>, what: &str) -> Result<T, ParseError> {
    let arg = arg.ok_or_else(|| ParseError(format!("Missing {}", what)))?;
    arg.parse()
        .map_err(|_| ParseError(format!("Invalid {}: \"{}\"", what, arg)))
}

fn parse_direction(arg: Option<&str>) -> Result<MotionDirection, ParseError> {
    let arg = arg.ok_or_else(|| ParseError("Missing direction".to_string()))?;
    MotionDirection::parse(arg).ok_or_else(|| ParseError(format!("Unknown direction \"{}\"", arg)))
}

fn parse_coordinates<'a>(
    mut args: impl Iterator<Item = &'a str>,
) -> Result<Coordinates, ParseError> {
    let ra = parse_number(args.next(), "right ascension")?;
    let dec = parse_number(args.next(), "declination")?;
    Ok(Coordinates::new(ra, dec))
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let mut args = line.split_whitespace();
        let command = args.next().unwrap_or_default().to_ascii_lowercase();
        match command.as_str() {
            "goto" => Ok(Command::Goto(parse_coordinates(args)?)),
            "sync" => Ok(Command::Sync(parse_coordinates(args)?)),
            "move" => {
                let direction = parse_direction(args.next())?;
                Ok(Command::Move(direction, parse_number(args.next(), "speed")?))
            }
            "stop" => Ok(Command::Move(parse_direction(args.next())?, SLEW_STOP)),
            "speed" => Ok(Command::Speed(parse_number(args.next(), "speed")?)),
            "park" => Ok(Command::Park),
            "unpark" => Ok(Command::Unpark),
            "connect" => Ok(Command::Connect),
            "disconnect" => Ok(Command::Disconnect),
            "pos" | "position" => Ok(Command::Position),
            "devices" => Ok(Command::Devices),
            "status" => Ok(Command::Status),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(ParseError(format!("Unknown command \"{}\"", other))),
        }
    }

    /// Runs the command, returning text to show the user
    pub async fn execute(self, adapter: &TelescopeAdapter) -> Option<String> {
        match self {
            Command::Goto(coords) => adapter.set_position(coords).await,
            Command::Sync(coords) => adapter.sync_position(coords).await,
            Command::Move(direction, speed) => {
                adapter.move_towards(direction, speed).await;
                return Some(if SlewRate::is_stop(speed) {
                    format!("Stopping {}", direction)
                } else {
                    format!("Moving {} at speed {}", direction, SlewRate::describe(speed))
                });
            }
            Command::Speed(speed) => {
                adapter.set_speed(speed).await;
                return Some(format!("Speed {}", SlewRate::describe(speed)));
            }
            Command::Park => adapter.park_telescope().await,
            Command::Unpark => adapter.un_park_telescope().await,
            Command::Connect => adapter.connect_telescope().await,
            Command::Disconnect => adapter.disconnect_telescope().await,
            Command::Position => return Some(adapter.position().await.to_string()),
            Command::Devices => return Some(adapter.devices().await.join("\n")),
            Command::Status => {
                return Some(if adapter.is_device_connected().await {
                    "Connected".to_string()
                } else {
                    "Not connected".to_string()
                })
            }
            Command::Help => return Some(HELP.to_string()),
            Command::Quit => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulatorSettings;
    use crate::simulator::SimulatedMount;

    #[test]
    fn test_parse() {
        assert_eq!(
            Command::parse("goto 5.5 -20"),
            Ok(Command::Goto(Coordinates::new(5.5, -20.)))
        );
        assert_eq!(
            Command::parse("  SYNC 1 2 "),
            Ok(Command::Sync(Coordinates::new(1., 2.)))
        );
        assert_eq!(
            Command::parse("move n 3"),
            Ok(Command::Move(MotionDirection::North, 3))
        );
        assert_eq!(
            Command::parse("stop west"),
            Ok(Command::Move(MotionDirection::West, SLEW_STOP))
        );
        assert_eq!(Command::parse("speed 2"), Ok(Command::Speed(2)));
        assert_eq!(Command::parse("unpark"), Ok(Command::Unpark));
        assert_eq!(Command::parse("Disconnect"), Ok(Command::Disconnect));
        assert_eq!(Command::parse("exit"), Ok(Command::Quit));
    }

    #[tokio::test]
    async fn test_execute_describes_speed() {
        let (mount, _events) = SimulatedMount::new(&SimulatorSettings::default());
        let adapter = TelescopeAdapter::new(mount);

        assert_eq!(
            Command::Speed(2).execute(&adapter).await.as_deref(),
            Some("Speed 2 (Find)")
        );
        assert_eq!(
            Command::Move(MotionDirection::East, 6).execute(&adapter).await.as_deref(),
            Some("Moving East at speed 6")
        );
        assert_eq!(
            Command::Move(MotionDirection::North, SLEW_STOP)
                .execute(&adapter)
                .await
                .as_deref(),
            Some("Stopping North")
        );
        assert_eq!(Command::Disconnect.execute(&adapter).await, None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(Command::parse("goto 5.5").is_err());
        assert!(Command::parse("goto a b").is_err());
        assert!(Command::parse("move up 3").is_err());
        assert!(Command::parse("dance").is_err());
        assert!(Command::parse("").is_err());
    }
}
