//! filecat - read files through a size-bounded LRU file cache

mod report;

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use filecache::{CachedFileReader, FileCacheItem, SharedCache};
use memlru::LruCache;
use tracing::{debug, info};

use crate::report::Report;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Files to read
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Cache capacity in bytes
    #[arg(short, long, default_value_t = 64 * 1024 * 1024)]
    capacity: usize,

    /// Gzip file contents before caching and output
    #[arg(short, long)]
    gzip: bool,

    /// Number of passes over the file list
    #[arg(short, long, default_value_t = 1)]
    repeat: usize,

    /// Do not write file contents to stdout
    #[arg(short, long)]
    quiet: bool,

    /// Print the statistics report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    info!("Starting filecat v{}", env!("CARGO_PKG_VERSION"));
    info!("Cache capacity: {} bytes", args.capacity);

    let cache: Arc<LruCache<FileCacheItem>> = Arc::new(LruCache::new(args.capacity));
    let shared: SharedCache = cache.clone();
    let reader = CachedFileReader::new(Some(shared), args.gzip);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for pass in 0..args.repeat {
        debug!(pass, "reading file list");
        for path in &args.paths {
            let data = reader
                .read(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            if !args.quiet {
                out.write_all(&data).context("Failed to write to stdout")?;
            }
        }
    }
    out.flush()?;
    drop(out);

    let report = Report::from_cache(&cache);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        eprint!("{report}");
    }

    Ok(())
}
