use crate::track::{normalize_all, RawTrack, Tracklist};
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;

const MARKER: &str = "var Mu={";

static ASSIGNMENT: Lazy<Regex> = Lazy::new(|| Regex::new("var Mu=(.*);").unwrap());

#[derive(Deserialize)]
struct PlaylistJson {
    title: String,
    tracks: Vec<RawTrack>,
}

#[derive(Deserialize)]
struct PageData {
    playlist: PlaylistJson,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageState {
    page_data: PageData,
}

/// Reads the playlist out of the page state assigned to `Mu` in an inline script.
///
/// Returns an empty tracklist when there is no such script or the state has no
/// top-level `playlist` key; the caller treats that as "try the markup instead".
/// Only the key's presence matters, the tracks are read from `pageData.playlist`.
pub fn extract(document: &Html) -> Result<Tracklist> {
    let selector = Selector::parse("script").unwrap();
    let text = match document
        .select(&selector)
        .map(|x| x.text().collect::<String>())
        .find(|x| x.contains(MARKER))
    {
        Some(text) => text,
        None => return Ok(Tracklist::default()),
    };

    let json = ASSIGNMENT
        .captures(&text)
        .and_then(|x| x.get(1))
        .context("unterminated page state assignment")?
        .as_str();
    let state: Value = serde_json::from_str(json).context("malformed page state JSON")?;
    if state.get("playlist").is_none() {
        return Ok(Tracklist::default());
    }

    let state: PageState =
        serde_json::from_value(state).context("unexpected pageData.playlist in page state")?;
    let playlist = state.page_data.playlist;
    Ok(Tracklist {
        tracks: normalize_all(&playlist.tracks)?,
        title: playlist.title,
    })
}
