//! `querygen` - generate typed TanStack Query accessors from API schemas.
//!
//! ```text
//! querygen generate --schema api.json --fetcher ./utils/fetcher#apiFetcher --output src/api.generated.ts
//! querygen batch --schema-dir schemas --fetcher ./utils/fetcher --output-dir src/generated --framework vue
//! ```

mod batch;
mod common;
mod generate;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "querygen",
    version,
    about = "Generate typed TanStack Query accessors from JSON schemas and OpenAPI documents"
)]
struct Cli {
    /// Log debug details of every stage
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate one schema file
    Generate(generate::GenerateArgs),
    /// Generate every schema file of a directory
    Batch(batch::BatchArgs),
}

fn main() {
    std::process::exit(run_cli(std::env::args_os()));
}

fn run_cli<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => {
            init_tracing(cli.verbose);
            match cli.command {
                Commands::Generate(args) => generate::run(args),
                Commands::Batch(args) => batch::run(args),
            }
        }
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            code
        }
    }
}

/// `RUST_LOG` wins over the verbosity flag.
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("querygen={level},querygen_core={level}")));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    if tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}
