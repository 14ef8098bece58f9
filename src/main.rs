use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use yamusic_export::{run, Mode};

#[derive(Parser)]
#[clap(
    name = "yamusic-export",
    about = "Exports Yandex Music playlists to JSON files."
)]
struct Opt {
    /// Playlist page URLs
    #[clap(short, long, multiple_values = true)]
    pub urls: Vec<String>,

    /// Saved playlist HTML files; ignored when urls are given
    #[clap(short, long, multiple_values = true)]
    pub files: Vec<PathBuf>,

    /// Account API token; exports every playlist of the account, ignoring urls and files
    #[clap(short, long)]
    pub token: Option<String>,

    /// Directory the JSON files are written to
    #[clap(short, long, default_value = ".")]
    pub output_dir: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Opt {
        urls,
        files,
        token,
        output_dir,
    } = Opt::parse();

    let mode = Mode::select(token, urls, files);
    if let Mode::Api { .. } = mode {
        log::info!("exporting account playlists");
    }
    run(mode, &output_dir)?;

    Ok(())
}
