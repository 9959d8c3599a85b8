//! Command‑line entry point for the `pmap` tool.
//!
//! Builds LED wiring layouts from drawing operations, and inspects or queries
//! saved operation logs.

use std::{
    fmt::Display,
    fs, io,
    path::{Path, PathBuf},
    process,
    str::FromStr,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pixelmap::{Operation, operation::Argument};
use tracing_subscriber::EnvFilter;

/// CLI command implementations.
mod cmd;

/// An operation parsed from `name:arg,arg,...`.
#[derive(Clone, Copy, Debug)]
struct OpArg(Operation);

impl FromStr for OpArg {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (name, args) = value
            .split_once(':')
            .ok_or_else(|| format!("operation '{value}' must be in NAME:ARG,ARG,... form"))?;

        let arguments = args
            .split(',')
            .map(|arg| match arg.trim() {
                "true" => Ok(Argument::Bool(true)),
                "false" => Ok(Argument::Bool(false)),
                other => other.parse::<i64>().map(Argument::Int).map_err(|_| {
                    format!("invalid argument '{other}': expected an integer, true or false")
                }),
            })
            .collect::<Result<Vec<_>, String>>()?;

        Operation::from_parts(name.trim(), &arguments)
            .map(Self)
            .map_err(|e| e.to_string())
    }
}

#[derive(Parser)]
#[command(name = "pmap")]
#[command(version = env!("CARGO_PKG_VERSION"))]
/// Top‑level CLI options and subcommands.
struct Cli {
    /// Sets the level of verbosity (`-v`, `-vv`, ...).
    #[arg(short, action = clap::ArgAction::Count, global = true, help = "Sets the level of verbosity")]
    v: u8,

    /// Command to execute.
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
/// Subcommands supported by the `pmap` tool.
enum Commands {
    #[command(about = "Build a layout from operations and write its log")]
    /// Build a layout from operations and write its operation log.
    Build {
        #[arg(short = 'o', long = "output", help = "Output file; stdout when omitted")]
        /// Optional output path for the log.
        output: Option<PathBuf>,

        #[arg(long = "pretty", default_value_t = false, help = "Indent the JSON output")]
        /// Write indented JSON.
        pretty: bool,

        #[arg(
            value_name = "OP",
            help = "Operations as NAME:ARG,... (point:X,Y line:X,Y,DX,DY zigzag:X,Y,DX,DY,BOOL gap:N)"
        )]
        /// Operations to apply, in wire order.
        ops: Vec<OpArg>,
    },

    #[command(about = "List every wire position of a layout")]
    /// Print one line per wire position.
    Show {
        #[arg(help = "Operation log file, or '-' for stdin")]
        /// Operation log to replay.
        log: PathBuf,
    },

    #[command(about = "Print the coordinate at a wire position")]
    /// Look up a wire position.
    At {
        #[arg(help = "Operation log file, or '-' for stdin")]
        /// Operation log to replay.
        log: PathBuf,

        #[arg(help = "Wire position")]
        /// Wire position to look up.
        index: usize,
    },

    #[command(
        about = "Print the wire position of a coordinate",
        allow_negative_numbers = true
    )]
    /// Look up a canvas coordinate.
    Find {
        #[arg(help = "Operation log file, or '-' for stdin")]
        /// Operation log to replay.
        log: PathBuf,

        #[arg(help = "X coordinate")]
        /// Column.
        x: i32,

        #[arg(help = "Y coordinate")]
        /// Row.
        y: i32,
    },

    #[command(about = "Replay a log and summarise the layout")]
    /// Validate a log and print a summary.
    Check {
        #[arg(help = "Operation log file, or '-' for stdin")]
        /// Operation log to replay.
        log: PathBuf,
    },
}

/// Print a command's output, or its error and exit non-zero.
fn report<E: Display>(result: Result<String, E>) {
    match result {
        Ok(text) => print!("{text}"),
        Err(e) => {
            eprintln!("{e:#}");
            process::exit(1);
        }
    }
}

/// Install a stderr subscriber; `RUST_LOG` overrides the `-v` level.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
    {
        eprintln!("failed to initialise logging: {e}");
    }
}

/// Handle the `build` subcommand.
fn handle_build(ops: &[OpArg], output: Option<&Path>, pretty: bool) -> Result<String> {
    let ops: Vec<Operation> = ops.iter().map(|op| op.0).collect();
    let map = cmd::build(&ops)?;
    let log = cmd::export(&map, pretty)?;
    match output {
        Some(path) => {
            fs::write(path, format!("{log}\n"))
                .with_context(|| format!("failed to write {}", path.display()))?;
            Ok(format!("Wrote {} entries to {}\n", map.len(), path.display()))
        }
        None => Ok(format!("{log}\n")),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.v);

    match cli.command {
        Commands::Build {
            output,
            pretty,
            ops,
        } => report(handle_build(&ops, output.as_deref(), pretty)),
        Commands::Show { log } => report(cmd::load(&log).map(|map| cmd::show(&map))),
        Commands::At { log, index } => {
            report(cmd::load(&log).and_then(|map| cmd::at(&map, index).map(|s| format!("{s}\n"))))
        }
        Commands::Find { log, x, y } => {
            report(cmd::load(&log).and_then(|map| cmd::find(&map, x, y).map(|s| format!("{s}\n"))))
        }
        Commands::Check { log } => report(cmd::load(&log).map(|map| cmd::check(&map))),
    }
}

#[cfg(test)]
mod tests {
    use pixelmap::Direction;

    use super::*;

    #[test]
    fn parses_operations() {
        let op: OpArg = "zigzag:0,0,3,-3,false".parse().unwrap();
        assert_eq!(
            op.0,
            Operation::Zigzag {
                x1: 0,
                y1: 0,
                dx: 3,
                dy: -3,
                direction: Direction::Vertical,
            }
        );
        let op: OpArg = "gap: 2".parse().unwrap();
        assert_eq!(op.0, Operation::Gap { count: 2 });
    }

    #[test]
    fn rejects_invalid_operations() {
        assert!("zigzag".parse::<OpArg>().is_err());
        assert!("circle:1,2,3".parse::<OpArg>().is_err());
        assert!("line:0,0,x,1".parse::<OpArg>().is_err());
        assert!("line:0,0,1".parse::<OpArg>().is_err());
    }
}
