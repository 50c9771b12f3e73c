use std::{fs::{self, File}, path::{Path, PathBuf}, time::Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use huffman_rust::{
    io::{default_output_path, properties_path, FileSink, FileSource},
    properties::ContainerProperties,
    utils::logging::init_tracing,
    ByteSink, ByteSource, HuffmanCodec,
};

#[derive(Parser, Debug)]
#[command(about = "Encodes and decodes files using Huffman coding")]
struct Args {
    /// Log verbosity: trace, debug, info, warn or error
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a file into a Huffman container
    Encode {
        /// The file to compress
        input: PathBuf,
        /// Destination of the container (defaults to the input name with a .bin extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also write <output>.properties describing the container
        #[arg(short, long, default_value_t = false)]
        properties: bool,
    },
    /// Restore the original file from a Huffman container
    Decode {
        /// The container to decompress
        input: PathBuf,
        /// Destination of the decoded content
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Print the frequency and code tables of a file
    Stats {
        /// The file to analyze
        input: PathBuf,
        /// Print JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    FileSource::new(path)
        .read_bytes()
        .with_context(|| format!("Could not read {}", path.display()))
}

fn encode(codec: HuffmanCodec, input: &Path, output: Option<PathBuf>, properties: bool) -> Result<()> {
    let data = read_input(input)?;

    let comp_time = Instant::now();
    let container = codec
        .encode(&data)
        .with_context(|| format!("Failed encoding {}", input.display()))?;
    let bytes = container.to_bytes()?;
    let comp_time = comp_time.elapsed().as_nanos();

    let output = output.unwrap_or_else(|| default_output_path(input));
    FileSink::new(&output)
        .write_bytes(&bytes)
        .with_context(|| format!("Could not write {}", output.display()))?;

    if properties {
        let props = ContainerProperties::from(&codec.analyze(&data)?);
        let props_path = properties_path(&output);
        fs::write(&props_path, String::from(props))
            .with_context(|| format!("Could not write {}", props_path.display()))?;
        info!(path = %props_path.display(), "wrote properties");
    }

    println!(
        "encoded {} bytes into {} bytes ({}) in {}ns",
        data.len(),
        bytes.len(),
        output.display(),
        comp_time
    );

    Ok(())
}

/// Warns when a sidecar exists and disagrees with what was decoded.
fn check_properties(container: &Path, decoded_len: usize) {
    let props_path = properties_path(container);
    if !props_path.is_file() {
        return;
    }

    let props = File::open(&props_path)
        .map_err(anyhow::Error::from)
        .and_then(|f| ContainerProperties::read(f).map_err(anyhow::Error::from));

    match props {
        Ok(props) if props.original_length != decoded_len as u64 => warn!(
            expected = props.original_length,
            decoded = decoded_len,
            "decoded length differs from {}",
            props_path.display()
        ),
        Ok(_) => info!(path = %props_path.display(), "decoded length matches properties"),
        Err(e) => warn!("ignoring unreadable {}: {e}", props_path.display()),
    }
}

fn decode(codec: HuffmanCodec, input: &Path, output: &Path) -> Result<()> {
    let bytes = read_input(input)?;

    let decomp_time = Instant::now();
    let decoded = codec
        .decompress(&bytes)
        .with_context(|| format!("Failed decoding {}", input.display()))?;
    let decomp_time = decomp_time.elapsed().as_nanos();

    check_properties(input, decoded.len());

    FileSink::new(output)
        .write_bytes(&decoded)
        .with_context(|| format!("Could not write {}", output.display()))?;

    println!(
        "decoded {} bytes into {} bytes ({}) in {}ns",
        bytes.len(),
        decoded.len(),
        output.display(),
        decomp_time
    );

    Ok(())
}

fn stats(codec: HuffmanCodec, input: &Path, json: bool) -> Result<()> {
    let data = read_input(input)?;
    let stats = codec
        .analyze(&data)
        .with_context(|| format!("Failed analyzing {}", input.display()))?;

    if json {
        println!("{}", stats.to_json()?);
    } else {
        print!("{}", stats);
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let codec = HuffmanCodec::new();

    match args.command {
        Command::Encode { input, output, properties } => encode(codec, &input, output, properties),
        Command::Decode { input, output } => decode(codec, &input, &output),
        Command::Stats { input, json } => stats(codec, &input, json),
    }
}
