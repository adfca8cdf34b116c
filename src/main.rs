use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;

use umi_read_splitter::{run, Direction, ProtocolRegistry, RestoreSpan, SplitConfig, AUTO};

#[derive(Parser)]
#[command(name = "umi-read-splitter")]
#[command(about = "Move protocol barcode/UMI prefixes between R1 and R2 FASTQ reads", version)]
struct Args {
    #[arg(short = '1', long, help = "Input R1 FASTQ/FASTA file", required_unless_present = "list_protocols")]
    r1_input: Option<PathBuf>,

    #[arg(short = '2', long, help = "Input R2 FASTQ/FASTA file", required_unless_present = "list_protocols")]
    r2_input: Option<PathBuf>,

    #[arg(short = 'o', long, help = "Output R1 FASTQ file (.gz to compress)", required_unless_present = "list_protocols")]
    r1_output: Option<PathBuf>,

    #[arg(short = 'p', long, help = "Output R2 FASTQ file (.gz to compress)", required_unless_present = "list_protocols")]
    r2_output: Option<PathBuf>,

    #[arg(short = 'r', long, default_value = "false", help = "Restore reads previously split by this tool")]
    reverse: bool,

    #[arg(
        long,
        requires = "reverse",
        help = "Original R1 read length; with --reverse, grow R1 back to this length instead of moving the cut point"
    )]
    r1_length: Option<usize>,

    #[arg(long, default_value = AUTO, help = "Protocol to match, or 'auto' to try every known protocol")]
    protocol: String,

    #[arg(long, help = "JSON protocol table replacing the built-in protocols")]
    protocol_table: Option<PathBuf>,

    #[arg(short = 't', long, default_value = "4", help = "Number of threads")]
    threads: usize,

    #[arg(short = 'b', long, default_value = "200000", help = "Batch size for processing")]
    batch_size: usize,

    #[arg(
        short = 'c',
        long,
        default_value = "1",
        value_parser = clap::value_parser!(u32).range(0..=9),
        help = "gzip level for .gz outputs"
    )]
    compression_level: u32,

    #[arg(long, default_value = "false", help = "Fail when R1 and R2 have different record counts")]
    strict_pairing: bool,

    #[arg(long, default_value = "false", help = "List known protocols and exit")]
    list_protocols: bool,

    #[arg(short = 'v', long, default_value = "false", help = "Verbose output showing progress")]
    verbose: bool,
}

fn load_registry(args: &Args) -> Result<ProtocolRegistry> {
    let registry = match &args.protocol_table {
        Some(path) => ProtocolRegistry::from_json_file(path)
            .with_context(|| format!("Failed to load protocol table {}", path.display()))?,
        None => ProtocolRegistry::builtin().context("Built-in protocol table is inconsistent")?,
    };
    Ok(registry)
}

fn list_protocols(registry: &ProtocolRegistry) {
    println!("{:<14} {:<24} {:>9}  whitelist", "protocol", "layout", "cut point");
    for protocol in registry.all_in_priority_order() {
        let whitelist = match protocol.whitelist() {
            Some(wl) => format!("{} barcodes", wl.barcode_count()),
            None => "none".to_string(),
        };
        println!(
            "{:<14} {:<24} {:>9}  {}",
            protocol.name(),
            protocol.layout().to_string(),
            protocol.cut_point(),
            whitelist
        );
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    let registry = load_registry(&args)?;
    if args.list_protocols {
        list_protocols(&registry);
        return Ok(());
    }
    let registry = registry.select(&args.protocol)?;

    let (Some(r1_input), Some(r2_input), Some(r1_output), Some(r2_output)) =
        (args.r1_input, args.r2_input, args.r1_output, args.r2_output)
    else {
        anyhow::bail!("R1/R2 input and output paths are required");
    };

    let mut config = SplitConfig::new(r1_input, r2_input, r1_output, r2_output);
    config.direction = if args.reverse { Direction::Restore } else { Direction::Split };
    config.restore_span = args.r1_length.map_or(RestoreSpan::CutPoint, RestoreSpan::ReadLength);
    config.threads = args.threads;
    config.batch_size = args.batch_size;
    config.compression_level = args.compression_level;
    config.strict_pairing = args.strict_pairing;

    info!(
        "{} {} and {} with {} protocol(s), {} threads",
        if args.reverse { "Restoring" } else { "Splitting" },
        config.r1_input.display(),
        config.r2_input.display(),
        registry.len(),
        config.threads
    );

    let summary = run(&config, Arc::new(registry)).context("Processing failed")?;

    info!("Processing complete!");
    info!("Read pairs: {}", summary.pairs);
    info!("Transformed pairs: {}", summary.classified);
    for (protocol, count) in &summary.per_protocol {
        info!("  {protocol}: {count}");
    }
    info!("Passed through unchanged: {}", summary.passed_through);
    info!("R1/R2 name mismatches: {}", summary.id_mismatches);
    info!("Dropped without a mate: {} R1, {} R2", summary.r1_surplus, summary.r2_surplus);
    info!("Output files:");
    info!("  R1: {}", config.r1_output.display());
    info!("  R2: {}", config.r2_output.display());

    Ok(())
}
