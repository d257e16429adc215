use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use env_logger::Env;
use huffman_compression::{compress, decompress};
use log::info;

#[derive(Parser, Debug)]
#[command(version, about = "Huffman file compressor", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress the input file
    #[command(visible_alias = "c")]
    Compress { input: PathBuf, output: PathBuf },
    /// Decompress the input file
    #[command(visible_alias = "d")]
    Decompress { input: PathBuf, output: PathBuf },
}

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let args = Args::parse();
    match args.command {
        Command::Compress { input, output } => {
            let (reader, writer) = open(&input, &output)?;
            compress(reader, writer)
                .with_context(|| format!("Failed to compress {}", input.display()))?;
            report(&input, &output)
        }
        Command::Decompress { input, output } => {
            let (reader, writer) = open(&input, &output)?;
            decompress(reader, writer)
                .with_context(|| format!("Failed to decompress {}", input.display()))?;
            report(&input, &output)
        }
    }
}

fn open(input: &Path, output: &Path) -> anyhow::Result<(File, File)> {
    let reader = File::open(input)
        .with_context(|| format!("Could not open input file {}", input.display()))?;
    let writer = File::create(output)
        .with_context(|| format!("Could not open output file {}", output.display()))?;
    Ok((reader, writer))
}

fn report(input: &Path, output: &Path) -> anyhow::Result<()> {
    let input_len = fs::metadata(input)?.len();
    let output_len = fs::metadata(output)?.len();
    let ratio = if input_len == 0 {
        0.0
    } else {
        output_len as f64 / input_len as f64 * 100.0
    };
    info!(
        "{} ({input_len} bytes) -> {} ({output_len} bytes), {ratio:.1}%",
        input.display(),
        output.display()
    );
    Ok(())
}
