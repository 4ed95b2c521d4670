//! Pathfix CLI - Command-line interface for path orientation correction

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{correct, inspect, scene, segments};
use pathfix_core::PolicyKind;

#[derive(Parser)]
#[command(name = "pathfix")]
#[command(about = "Segment-aware orientation correction for point paths", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use this config file instead of the global and project configs
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recompute point orientations and write the corrected path
    Correct {
        /// Input CSV file
        input: String,

        /// Output CSV file
        #[arg(short, long)]
        output: Option<String>,

        /// Orientation policy (tangent or perpendicular-bisector)
        #[arg(long, value_parser = parse_policy)]
        policy: Option<PolicyKind>,

        /// Rotate tangents by -90 degrees about X before writing
        #[arg(long)]
        realign: bool,

        /// Segment marker tag
        #[arg(long)]
        marker: Option<String>,

        /// Rewrite segment ids to consecutive numbers
        #[arg(long)]
        renumber: bool,

        /// Discard the first point of the input
        #[arg(long)]
        drop_first_point: bool,
    },

    /// List the segments of a path
    Segments {
        /// Input CSV file
        input: String,

        /// Segment marker tag
        #[arg(long)]
        marker: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },

    /// Show points with their orientation as display angles
    Inspect {
        /// Input CSV file
        input: String,

        /// Show at most this many points
        #[arg(long)]
        limit: Option<usize>,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },

    /// Build the 3D scene of a path and export it as Wavefront OBJ
    Scene {
        /// Input CSV file
        input: String,

        /// Output OBJ file
        #[arg(short, long, default_value = "scene.obj")]
        output: String,

        /// Correct orientations with this policy before building
        #[arg(long, value_parser = parse_policy)]
        policy: Option<PolicyKind>,

        /// Camera orbit (comma-separated azimuth,polar deltas in degrees)
        #[arg(long, value_parser = parse_angles)]
        orbit: Option<[f64; 2]>,

        /// Wheel steps to zoom after framing (negative zooms out)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        zoom: i32,
    },
}

fn parse_policy(s: &str) -> Result<PolicyKind, String> {
    s.parse::<PolicyKind>().map_err(|_| {
        format!(
            "unknown policy '{}'; valid values: tangent, perpendicular-bisector",
            s
        )
    })
}

fn parse_format(s: &str) -> Result<String, String> {
    match s {
        "text" | "json" => Ok(s.to_string()),
        _ => Err(format!("unknown format '{}'; valid values: text, json", s)),
    }
}

fn parse_angles(s: &str) -> Result<[f64; 2], String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 2 {
        return Err(format!("expected 2 comma-separated values, got {}", parts.len()));
    }
    let azimuth: f64 = parts[0].trim().parse().map_err(|e| format!("invalid azimuth: {}", e))?;
    let polar: f64 = parts[1].trim().parse().map_err(|e| format!("invalid polar: {}", e))?;
    Ok([azimuth, polar])
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = commands::load_config(cli.config.as_deref())?;
    log::debug!("Resolved configuration: {:?}", config);

    match cli.command {
        Commands::Correct {
            input,
            output,
            policy,
            realign,
            marker,
            renumber,
            drop_first_point,
        } => correct::run(
            correct::CorrectArgs {
                input,
                output,
                policy,
                realign,
                marker,
                renumber,
                drop_first_point,
            },
            config,
        ),
        Commands::Segments {
            input,
            marker,
            format,
        } => segments::run(&input, marker, &format, config),
        Commands::Inspect {
            input,
            limit,
            format,
        } => inspect::run(&input, limit, &format, config),
        Commands::Scene {
            input,
            output,
            policy,
            orbit,
            zoom,
        } => scene::run(
            scene::SceneArgs {
                input,
                output,
                policy,
                orbit,
                zoom,
            },
            config,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_policy() {
        assert_eq!(parse_policy("tangent"), Ok(PolicyKind::Tangent));
        assert_eq!(
            parse_policy("perpendicular-bisector"),
            Ok(PolicyKind::PerpendicularBisector)
        );
        assert!(parse_policy("spline").unwrap_err().contains("spline"));
    }

    #[test]
    fn test_parse_angles() {
        assert_eq!(parse_angles("30, -10"), Ok([30.0, -10.0]));
        assert!(parse_angles("30").is_err());
        assert!(parse_angles("a,1").unwrap_err().starts_with("invalid azimuth"));
    }

    #[test]
    fn test_parse_format() {
        assert!(parse_format("json").is_ok());
        assert!(parse_format("toml").is_err());
    }

    #[test]
    fn test_cli_parses_correct_command() {
        let cli = Cli::try_parse_from([
            "pathfix",
            "-vv",
            "correct",
            "in.csv",
            "-o",
            "out.csv",
            "--policy",
            "bisector",
            "--renumber",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Correct {
                input,
                output,
                policy,
                renumber,
                realign,
                ..
            } => {
                assert_eq!(input, "in.csv");
                assert_eq!(output.as_deref(), Some("out.csv"));
                assert_eq!(policy, Some(PolicyKind::PerpendicularBisector));
                assert!(renumber);
                assert!(!realign);
            }
            _ => panic!("expected correct command"),
        }
    }

    #[test]
    fn test_cli_parses_negative_zoom() {
        let cli = Cli::try_parse_from(["pathfix", "scene", "in.csv", "--zoom", "-3"]).unwrap();
        match cli.command {
            Commands::Scene { zoom, output, .. } => {
                assert_eq!(zoom, -3);
                assert_eq!(output, "scene.obj");
            }
            _ => panic!("expected scene command"),
        }
    }
}
