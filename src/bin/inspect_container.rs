use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;

use huffman_rust::{
    io::{properties_path, FileSource},
    properties::ContainerProperties,
    stats::display_symbol,
    utils::logging::init_tracing,
    ByteSource, EncodedContainer, HuffmanTree,
};

#[derive(Parser, Debug)]
#[command(about = "Print the sections and code table of a Huffman container without decoding its payload")]
struct Args {
    /// The container file
    source_name: PathBuf,
    /// Print JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Log verbosity: trace, debug, info, warn or error
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let bytes = FileSource::new(&args.source_name)
        .read_bytes()
        .with_context(|| format!("Could not read {}", args.source_name.display()))?;

    let container = EncodedContainer::from_bytes(&bytes)
        .with_context(|| format!("{} is not a Huffman container", args.source_name.display()))?;
    let (tree, _) = HuffmanTree::deserialize(&container.tree).context("Failed reading the tree section")?;
    let table = tree.code_table();

    let props_path = properties_path(&args.source_name);
    let props = match File::open(&props_path) {
        Ok(f) => Some(
            ContainerProperties::read(BufReader::new(f))
                .with_context(|| format!("Failed parsing {}", props_path.display()))?,
        ),
        Err(_) => None,
    };

    if args.json {
        let codes: Vec<_> = table
            .iter()
            .map(|(symbol, code)| json!({ "symbol": symbol, "code": code.to_string() }))
            .collect();

        let out = json!({
            "container_bytes": bytes.len(),
            "tree_bytes": container.tree.len(),
            "tree_height": tree.height(),
            "leaves": tree.leaf_count(),
            "payload_bits": container.valid_bits,
            "payload_bytes": container.payload.len(),
            "original_length": props.as_ref().map(|p| p.original_length),
            "codes": codes,
        });

        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("container bytes {}", bytes.len());
    println!("tree bytes      {} ({} leaves, height {})", container.tree.len(), tree.leaf_count(), tree.height());
    println!("payload         {} bits in {} bytes", container.valid_bits, container.payload.len());
    if let Some(props) = props {
        println!("original length {} (from {})", props.original_length, props_path.display());
    }
    println!();

    for (symbol, code) in table.iter() {
        println!("{:>8} | {}", display_symbol(symbol), code);
    }

    Ok(())
}
