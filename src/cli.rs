//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// Fetch remote videos and build a bounded playlist manifest.
///
/// Reads `videos.remote.json` from the project root, downloads each URL with
/// yt-dlp into `public/video/<id>/`, and writes `videos.json` describing up to
/// 12 playable files. Without yt-dlp, previously downloaded files are used.
#[derive(Parser, Debug)]
#[command(name = "reelfetch")]
#[command(author, version, about)]
pub struct Args {
    /// Project root holding the source list, manifest, and public/ directory
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Source list path (default: <root>/videos.remote.json)
    #[arg(long, value_name = "FILE")]
    pub sources: Option<PathBuf>,

    /// Manifest output path (default: <root>/videos.json)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Downloader executable (default: yt-dlp)
    #[arg(long, value_name = "PROGRAM")]
    pub tool: Option<String>,

    /// Skip downloading and build the manifest from files already on disk
    #[arg(long)]
    pub no_fetch: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}
