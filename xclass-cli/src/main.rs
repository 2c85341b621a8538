//! xclass command-line tool
//!
//! Works on class definitions stored as XML:
//!   xclass fmt Space.Class.xml
//!   xclass diff old.xml new.xml --json
//!   xclass query Space.Class.xml -p Space.Class_title_like=report
//!   xclass new Space.Class.xml -s title=Report -s tags=a -s tags=b --validate
//!
//! Settings come from `--config <file>`, or `xclass.toml` in the working
//! directory when present.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;
use xclass_cli::{Engine, diff, parse_key_value, query, render_diff, render_status};
use xclass_model::EngineConfig;

const DEFAULT_CONFIG: &str = "xclass.toml";

#[derive(Parser, Debug)]
#[command(name = "xclass")]
#[command(about = "Format, diff, query and instantiate xclass class definitions")]
struct Args {
    /// Path to an xclass.toml configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a class in canonical form
    Fmt { schema: PathBuf },

    /// List field changes between two versions of a class
    Diff {
        old: PathBuf,
        new: PathBuf,
        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the storage query clauses for search parameters
    Query {
        schema: PathBuf,
        /// Search parameter, `<class>_<field>[_<suffix>]=value`
        #[arg(short = 'p', long = "param", value_parser = parse_key_value)]
        params: Vec<(String, String)>,
    },

    /// Create an object from field values and print it
    New {
        schema: PathBuf,
        /// Field value, `field=value`; repeat a field for multi-valued input
        #[arg(short = 's', long = "set", value_parser = parse_key_value)]
        values: Vec<(String, String)>,
        /// Validate the object before printing it
        #[arg(long)]
        validate: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = match &args.config {
        Some(path) => EngineConfig::load_from(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => EngineConfig::load_or_default(Path::new(DEFAULT_CONFIG)),
    };
    let engine = Engine::from_config(&config);

    match args.command {
        Command::Fmt { schema } => {
            let schema = engine.load_schema(&schema)?;
            println!("{}", engine.format(&schema)?);
        }
        Command::Diff { old, new, json } => {
            let old = engine.load_schema(&old)?;
            let new = engine.load_schema(&new)?;
            let entries = diff(&old, &new);
            info!(changes = entries.len(), "Compared classes");
            if old != new && entries.is_empty() {
                info!("Class headers differ");
            }
            let rendered = render_diff(&entries, json)?;
            if !rendered.is_empty() {
                println!("{rendered}");
            }
        }
        Command::Query { schema, params } => {
            let schema = engine.load_schema(&schema)?;
            println!("{}", query(&schema, &params));
        }
        Command::New {
            schema,
            values,
            validate,
        } => {
            let schema = engine.load_schema(&schema)?;
            if validate {
                let created = engine.instantiate_validated(&schema, &values)?;
                println!("{}", engine.encode_instance(&created.instance)?);
                if !created.valid {
                    eprintln!("{}", render_status(&created.status));
                    bail!("object of {} failed validation", schema.name());
                }
            } else {
                let instance = engine.instantiate(&schema, &values)?;
                println!("{}", engine.encode_instance(&instance)?);
            }
        }
    }

    Ok(())
}
