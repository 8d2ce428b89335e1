use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workout_tracker_lib::{
    config::{MapConfig, DEFAULT_ZOOM},
    coordinates::FixedLocation,
    Coordinates, Coordinator, FormInput, WorkoutError, WorkoutId,
};

use crate::terminal::{format_entry, TerminalMap, TerminalPanel};

mod terminal;

#[derive(Parser)]
#[command(name = "WorkoutCLI")]
#[command(about = "Log workouts on a simulated map, one command per line on stdin", long_about = None)]
struct Cli {
    /// Current position as lat,lng. Leave out to simulate a failed location lookup
    #[arg(long, allow_hyphen_values = true)]
    position: Option<Coordinates>,
    /// Zoom level of the initial map view
    #[arg(long, default_value_t = DEFAULT_ZOOM)]
    zoom: f64,
    /// Print workouts as JSON in `list`
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
#[command(multicall = true)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Select a location on the map
    Click {
        #[arg(allow_hyphen_values = true)]
        at: Coordinates,
    },
    /// Submit the workout form for the selected location
    Submit {
        kind: String,
        #[arg(allow_hyphen_values = true)]
        distance: String,
        #[arg(allow_hyphen_values = true)]
        duration: String,
        /// Cadence for running, elevation gain for cycling
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Center the map on a logged workout
    Select { id: String },
    /// List logged workouts in the order they were added
    List,
    Quit,
}

impl Command {
    fn parse_line(line: &str) -> Result<Self, clap::Error> {
        Line::try_parse_from(line.split_whitespace()).map(|line| line.command)
    }
}

fn form_input(kind: String, distance: String, duration: String, value: String) -> FormInput {
    // The coordinator picks the field matching the kind
    FormInput {
        kind,
        distance,
        duration,
        cadence: value.clone(),
        elevation: value,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info,workout_tracker_lib=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = MapConfig::default().with_zoom(cli.zoom);
    let mut coordinator = Coordinator::new(TerminalMap::default(), TerminalPanel::default(), config);

    // Without a position there is no map to click on
    coordinator.start(&FixedLocation(cli.position)).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse_line(&line) {
            Ok(command) => command,
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        };

        match command {
            Command::Click { at } => coordinator.on_location_selected(at),
            Command::Submit { kind, distance, duration, value } => {
                match coordinator.on_form_submitted(&form_input(kind, distance, duration, value)) {
                    Ok(id) => tracing::info!("Logged workout {id}"),
                    Err(err @ WorkoutError::InvalidInput(_)) => tracing::warn!("{err}"),
                    Err(err) => tracing::error!("{err}"),
                }
            }
            Command::Select { id } => {
                if let Err(err) = coordinator.on_list_entry_selected(&WorkoutId::from(id)) {
                    tracing::error!("{err}");
                }
            }
            Command::List => {
                for record in coordinator.log().iter() {
                    if cli.json {
                        println!("{}", serde_json::to_string(record)?);
                    } else {
                        println!("{}", format_entry(&record.into()));
                    }
                }
            }
            Command::Quit => break,
        }
    }

    tracing::info!("Logged {} workouts this session", coordinator.log().len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_submit_with_negative_numbers() {
        let command = Command::parse_line("submit running -1 25 150").unwrap();
        assert_eq!(
            command,
            Command::Submit {
                kind: "running".into(),
                distance: "-1".into(),
                duration: "25".into(),
                value: "150".into(),
            }
        );
    }

    #[test]
    fn parses_click_coordinates() {
        let command = Command::parse_line("click -33.86,151.21").unwrap();
        assert_eq!(command, Command::Click { at: Coordinates::new(-33.86, 151.21) });
    }

    #[test]
    fn rejects_unknown_commands_and_bad_coordinates() {
        assert!(Command::parse_line("jump").is_err());
        assert!(Command::parse_line("click somewhere").is_err());
    }

    #[test]
    fn replays_a_session_through_terminal_surfaces() {
        let mut coordinator = Coordinator::new(TerminalMap::default(), TerminalPanel::default(), MapConfig::default());
        coordinator.on_position_resolved(Ok(Coordinates::new(10., 20.))).unwrap();

        coordinator.on_location_selected(Coordinates::new(10., 20.));
        let err = coordinator
            .on_form_submitted(&form_input("running".into(), "-1".into(), "25".into(), "150".into()))
            .unwrap_err();
        assert!(matches!(err, WorkoutError::InvalidInput(_)));

        let id = coordinator
            .on_form_submitted(&form_input("cycling".into(), "20".into(), "60".into(), "0".into()))
            .unwrap();
        coordinator.on_list_entry_selected(&id).unwrap();

        assert_eq!(coordinator.map().markers.len(), 1);
        assert_eq!(coordinator.map().view, Some((Coordinates::new(10., 20.), DEFAULT_ZOOM)));
        assert_eq!(coordinator.panel().entries.len(), 1);
        assert_eq!(coordinator.panel().messages.len(), 1);
        assert!(!coordinator.panel().form_open);
        assert!(format_entry(&coordinator.panel().entries[0]).contains("20.0 km/h"));
    }
}
