use std::{fs, path::PathBuf};

use anyhow::{ensure, Context, Result};
use clap::Parser;

use huffman_rust::{io::FileSource, utils::{logging::init_tracing, timer::Timer}, ByteSource, HuffmanCodec};

#[derive(Parser, Debug)]
#[command(about = "Repeatedly encode and decode a file and report the timings")]
struct Args {
    /// The file to compress
    source_name: PathBuf,
    /// Number of encode/decode rounds
    #[arg(short, long, default_value_t = 10)]
    iterations: u32,
    /// Also write the report to <source_name>.stats
    #[arg(short, long = "save", default_value_t = false)]
    save_stats: bool,
    /// Log verbosity: trace, debug, info, warn or error
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let data = FileSource::new(&args.source_name)
        .read_bytes()
        .with_context(|| format!("Could not read {}", args.source_name.display()))?;

    let codec = HuffmanCodec::new();
    let mut encode_time = Timer::new();
    let mut decode_time = Timer::new();
    let mut compressed_len = 0;

    for _ in 0..args.iterations {
        encode_time.start();
        let compressed = codec.compress(&data)?;
        encode_time.stop();

        decode_time.start();
        let decoded = codec.decompress(&compressed)?;
        decode_time.stop();

        ensure!(decoded == data, "round trip of {} did not reproduce the input", args.source_name.display());
        compressed_len = compressed.len();
    }

    let mut out_stats = String::new();

    out_stats.push_str("################### Huffman round-trip stats ###################\n");
    out_stats.push_str(&format!("input bytes {}\n", data.len()));
    out_stats.push_str(&format!("container bytes {}\n", compressed_len));
    out_stats.push_str(&format!("rounds {}\n", args.iterations));
    out_stats.push_str(&format!("mean encode {} ns\n", encode_time.mean().as_nanos()));
    out_stats.push_str(&format!("mean decode {} ns\n", decode_time.mean().as_nanos()));
    out_stats.push_str(&format!("encode throughput {:.0} B/s\n", encode_time.throughput(data.len())));
    out_stats.push_str(&format!("decode throughput {:.0} B/s\n", decode_time.throughput(data.len())));

    print!("{}", out_stats);

    if args.save_stats {
        let stats_path = format!("{}.stats", args.source_name.display());
        fs::write(&stats_path, out_stats).with_context(|| format!("Could not write {}", stats_path))?;
    }

    Ok(())
}
