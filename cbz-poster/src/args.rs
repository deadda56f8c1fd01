use camino::Utf8PathBuf;
use cbz_poster::poster::{DEFAULT_PADDING, DEFAULT_THUMBNAIL_HEIGHT};
use clap::Parser;

#[derive(Parser, Debug)]
#[clap(about, author, version)]
pub struct Args {
    /// Directory containing the .cbr archives, prompted for when missing
    pub path: Option<Utf8PathBuf>,
    /// Height every cover is resized to in the poster
    #[clap(long, default_value_t = DEFAULT_THUMBNAIL_HEIGHT, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,
    /// Space between the covers
    #[clap(long, default_value_t = DEFAULT_PADDING)]
    pub padding: u32,
    /// Path to the UnRAR executable, looked for in the usual places when missing
    #[clap(long)]
    pub unrar: Option<Utf8PathBuf>,
    /// Keep the extracted covers
    #[clap(long, action)]
    pub keep_covers: bool,
    /// Print debug logs
    #[clap(short, long, action)]
    pub verbose: bool,
}
