use crate::track::{Track, Tracklist};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{prelude::*, BufWriter};
use std::path::{Path, PathBuf};

/// Origin tag written into every export.
pub const DEFAULT_SOURCE: &str = "Youtube";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistExport {
    pub name: String,
    pub number_of_track: usize,
    pub source: String,
    pub tracks: Vec<Track>,
}

impl From<Tracklist> for PlaylistExport {
    fn from(tracklist: Tracklist) -> Self {
        PlaylistExport {
            name: tracklist.title,
            number_of_track: tracklist.tracks.len(),
            source: DEFAULT_SOURCE.to_string(),
            tracks: tracklist.tracks,
        }
    }
}

/// Writes `<title>.json` into `dir`. The title is used verbatim as the file stem.
pub fn save(tracklist: Tracklist, dir: &Path) -> Result<PathBuf> {
    let file_name = format!("{}.json", tracklist.title);
    let path = dir.join(&file_name);
    let export = PlaylistExport::from(tracklist);

    let file = File::create(&path).with_context(|| format!("couldn't create {:?}", path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &export)?;
    writer.flush()?;

    log::info!("Exported: {} with {} tracks", file_name, export.number_of_track);
    Ok(path)
}
