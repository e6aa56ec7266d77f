use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use flatjson_sdk::sample::{print_creature, sample_creature, CREATURE_ID};
use flatjson_sdk::{print_to_string, Options};

#[derive(Parser)]
#[command(name = "flatjson")]
#[command(about = "Print FlatBuffers binaries for the built-in sample schema as JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a sample-schema binary buffer as JSON
    Print {
        /// Input buffer (as written by `sample`)
        #[arg(short, long)]
        input: PathBuf,

        /// Spaces per nesting level; 0 prints compact JSON
        #[arg(long, default_value_t = 2)]
        indent: usize,

        /// Emit bare identifiers instead of quoted names (not valid JSON)
        #[arg(long)]
        unquote: bool,

        /// Print enums as raw numbers instead of symbols
        #[arg(long)]
        noenum: bool,

        /// Emit scalar fields even when they equal their schema default
        #[arg(long)]
        keep_default: bool,

        /// Emit absent scalar fields as their schema default
        #[arg(long)]
        force_default: bool,

        /// Skip the file-identifier check
        #[arg(long)]
        no_identifier_check: bool,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write the canned sample buffer, so `print` has input to chew on
    Sample {
        /// Output `.bin` file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Print {
            input,
            indent,
            unquote,
            noenum,
            keep_default,
            force_default,
            no_identifier_check,
            output,
        } => {
            let buf = fs::read(input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let options = Options {
                indent: *indent,
                unquote: *unquote,
                noenum: *noenum,
                skip_default: !keep_default,
                force_default: *force_default,
            };
            let fid = if *no_identifier_check {
                None
            } else {
                Some(CREATURE_ID)
            };
            let json = print_to_string(&buf, fid, print_creature, options)
                .with_context(|| format!("failed to print {}", input.display()))?;
            match output {
                Some(path) => {
                    fs::write(path, &json)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("Printed {} → {}", input.display(), path.display());
                }
                None => print!("{}", json),
            }
            Ok(())
        }

        Commands::Sample { output } => {
            let buf = sample_creature();
            fs::write(output, &buf)
                .with_context(|| format!("failed to write {}", output.display()))?;
            println!("Wrote {} sample bytes to {}", buf.len(), output.display());
            Ok(())
        }
    }
}
