//! Seltzer command line shell
//!
//! A thin wrapper around the variable engine: resolve a set, look up a
//! single typed value, or list what a vars directory offers. All
//! semantics live in the application layer; this binary only parses
//! arguments, initializes tracing, and renders output.

use std::error::Error;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use seltzer_application::accessor::{TypeSpec, VarAccessor};
use seltzer_application::resolver::VariableResolver;
use seltzer_infrastructure::{FsVariableSource, StdPathProbe, available_sets};

#[derive(Parser)]
#[command(name = "seltzer", version, about = "Configuration variable resolution toolchain")]
struct Cli {
    /// Directory containing variable-set files.
    #[arg(short = 'd', long, global = true, default_value = ".")]
    vars_dir: PathBuf,

    /// Increases log verbosity (-v debug, -vv trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolves a variable set, inheritance included, and prints it.
    Resolve {
        /// The variable-set name.
        name: String,
        /// Output rendering.
        #[arg(long, value_enum, default_value = "yaml")]
        output: OutputFormat,
    },
    /// Looks up one dotted path in a resolved variable set.
    Get {
        /// The variable-set name.
        name: String,
        /// The dotted path, for example `db.port`.
        path: String,
        /// Optional type spec (`integer`, `bool?`, `file`, ...).
        #[arg(long = "type")]
        type_spec: Option<String>,
        /// Validate instead of coercing; path kinds also check the disk.
        #[arg(long)]
        strict: bool,
    },
    /// Lists the variable sets available under the vars directory.
    List,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// YAML output.
    Yaml,
    /// Pretty-printed JSON output.
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(error) = run(&cli) {
        eprintln!("error: {error}");
        let mut cause = error.source();
        while let Some(inner) = cause {
            eprintln!("  caused by: {inner}");
            cause = inner.source();
        }
        std::process::exit(1);
    }
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let resolver = VariableResolver::new(FsVariableSource::new());

    match &cli.command {
        Command::Resolve { name, output } => {
            let vars = resolver.resolve(&cli.vars_dir, name)?;
            let rendered = match output {
                OutputFormat::Yaml => serde_yaml::to_string(&vars)?,
                OutputFormat::Json => {
                    let mut json = serde_json::to_string_pretty(&vars)?;
                    json.push('\n');
                    json
                }
            };
            print!("{rendered}");
        }
        Command::Get {
            name,
            path,
            type_spec,
            strict,
        } => {
            let vars = resolver.resolve(&cli.vars_dir, name)?;
            let access = VarAccessor::new(&vars, StdPathProbe::new());
            match type_spec {
                Some(tag) => {
                    let mut spec = TypeSpec::from_str(tag)?;
                    spec.strict = *strict;
                    let value = access.require_typed(path, &spec)?;
                    println!("{value}");
                }
                None => {
                    let value = access.require(path)?;
                    print!("{}", serde_yaml::to_string(value)?);
                }
            }
        }
        Command::List => {
            for name in available_sets(&cli.vars_dir)? {
                println!("{name}");
            }
        }
    }

    Ok(())
}
