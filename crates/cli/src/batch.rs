use clap::Args;
use std::path::PathBuf;
use tracing::debug;

use querygen_core::generate_dir;

use crate::common::TargetArgs;

#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Directory whose top-level .json/.yaml/.yml files are generated
    #[arg(long = "schema-dir", value_name = "DIR")]
    pub schema_dir: PathBuf,
    /// Directory receiving `<stem>.generated.ts` files, created if missing
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: PathBuf,
    #[command(flatten)]
    pub target: TargetArgs,
}

pub fn run(args: BatchArgs) -> i32 {
    let config = args.target.config();
    debug!(
        schema_dir = %args.schema_dir.display(),
        output_dir = %args.output_dir.display(),
        "Generating directory."
    );
    match generate_dir(&args.schema_dir, &args.output_dir, &config) {
        Ok(written) => {
            for path in &written {
                println!("generated {}", path.display());
            }
            0
        }
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}
