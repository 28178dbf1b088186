use clap::Args;
use std::path::PathBuf;
use tracing::debug;

use querygen_core::generate_file;

use crate::common::TargetArgs;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Schema document (.json, .yaml or .yml)
    #[arg(long, value_name = "FILE")]
    pub schema: PathBuf,
    /// Accessor module to write; OpenAPI input also writes `<stem>.typed.ts` beside it
    #[arg(long, value_name = "FILE")]
    pub output: PathBuf,
    #[command(flatten)]
    pub target: TargetArgs,
}

pub fn run(args: GenerateArgs) -> i32 {
    let config = args.target.config();
    debug!(
        schema = %args.schema.display(),
        framework = ?config.framework,
        "Generating accessors."
    );
    match generate_file(&args.schema, &args.output, &config) {
        Ok(true) => {
            println!("generated {}", args.output.display());
            0
        }
        Ok(false) => {
            println!("{} has no operations, nothing generated", args.schema.display());
            0
        }
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}
