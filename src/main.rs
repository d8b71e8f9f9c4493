//! capfield CLI: decodes an Ethernet pcap file and prints one JSON
//! document per packet.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use capfield::engine::{DecodeConfig, parse_pcap};
use capfield::{CapturedPacket, InputConfig, ModuleConfig, PacketAnnotator, PacketMetadata};

#[derive(Debug, Parser)]
#[command(name = "capfield", version, about = "Decode packets from a pcap file into field records")]
struct Args {
    /// Classic pcap file with Ethernet link type
    file: PathBuf,

    /// Keep only the first 100 bytes of each frame
    #[arg(long = "metadata-only")]
    metadata_only: bool,

    /// Maximum nesting of protocol decoders
    #[arg(long = "max-depth", default_value_t = DecodeConfig::default().max_depth)]
    max_depth: usize,

    /// Tag attached to every message
    #[arg(long)]
    tag: Option<String>,

    /// Pretty-print each JSON document
    #[arg(long)]
    pretty: bool,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("Failed to read PCAP file: {}", args.file.display()))?;
    let pcap = parse_pcap(&bytes)
        .with_context(|| format!("Failed to parse PCAP file: {}", args.file.display()))?;
    pcap.ensure_ethernet()?;

    let config = ModuleConfig {
        metadata_only: args.metadata_only,
        decode: DecodeConfig {
            max_depth: args.max_depth,
            ..DecodeConfig::default()
        },
        ..ModuleConfig::default()
    };
    let mut input = InputConfig::from_file(args.file.display().to_string());
    input.tag = args.tag;

    let mut annotator = PacketAnnotator::new(config, &input).context("Invalid configuration")?;
    let snap_length = annotator.config().effective_snap_length();

    tracing::info!(
        records = pcap.records.len(),
        snaplen = pcap.snaplen,
        nanosecond = pcap.nanosecond,
        "decoding capture"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for record in &pcap.records {
        let metadata = PacketMetadata::from_capture(
            record.timestamp_sec,
            record.timestamp_subsec,
            pcap.nanosecond,
            record.original_len as usize,
        );
        let mut packet = CapturedPacket::new(record.data.to_vec(), metadata);
        packet.truncate_to(snap_length);
        tracing::trace!("captured frame\n{packet}");

        let message = annotator.annotate(&packet);
        let json = if args.pretty {
            message.to_json_pretty(annotator.config())?
        } else {
            message.to_json(annotator.config())?
        };
        writeln!(out, "{json}")?;
    }
    out.flush()?;

    Ok(())
}
