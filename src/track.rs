use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Canonical, source-agnostic track as written to the export file.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Track {
    pub title: String,
    pub artist: String,
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub album: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub thumbnail: Option<String>,
}

/// Playlist title plus its normalized tracks, in page or API order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tracklist {
    pub title: String,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Artist {
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Album {
    pub title: String,
}

/// A track object as found in the page state blob or returned by the account API.
///
/// Both spellings of the cover field are folded into `cover_uri` while
/// deserializing; `coverUri` wins unless it is absent or null.
#[derive(Debug, Deserialize, Clone)]
#[serde(from = "RawTrackRepr")]
pub struct RawTrack {
    pub title: String,
    pub artists: Vec<Artist>,
    pub albums: Vec<Album>,
    pub cover_uri: Option<String>,
}

#[derive(Deserialize)]
struct RawTrackRepr {
    title: String,
    artists: Vec<Artist>,
    #[serde(default)]
    albums: Option<Vec<Album>>,
    #[serde(rename = "coverUri")]
    cover_uri: Option<String>,
    #[serde(rename = "cover_uri")]
    cover_uri_alt: Option<String>,
}

impl From<RawTrackRepr> for RawTrack {
    fn from(repr: RawTrackRepr) -> Self {
        RawTrack {
            title: repr.title,
            artists: repr.artists,
            albums: repr.albums.unwrap_or_default(),
            cover_uri: repr.cover_uri.or(repr.cover_uri_alt),
        }
    }
}

/// Builds the thumbnail URL for a cover URI, `None` if nothing is left after cleaning.
pub fn thumbnail_url(cover_uri: &str) -> Result<Option<String>> {
    let cleaned = cover_uri.replace('%', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Ok(None);
    }

    let mut url = Url::parse(&format!("https://{}", cleaned))
        .with_context(|| format!("invalid cover uri {:?}", cover_uri))?;
    url.path_segments_mut()
        .map_err(|_| anyhow::anyhow!("cover uri {:?} cannot be a base", cover_uri))?
        .pop_if_empty()
        .push("50x50");
    Ok(Some(url.to_string()))
}

impl RawTrack {
    /// Normalizes the track found at zero-based `position` of its list.
    pub fn normalize(&self, position: usize) -> Result<Track> {
        let thumbnail = match &self.cover_uri {
            Some(uri) => thumbnail_url(uri)?,
            None => None,
        };

        Ok(Track {
            title: self.title.clone(),
            artist: self
                .artists
                .iter()
                .map(|x| x.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            index: position + 1,
            album: self.albums.first().map(|x| x.title.clone()),
            thumbnail,
        })
    }
}

pub fn normalize_all(raw: &[RawTrack]) -> Result<Vec<Track>> {
    raw.iter()
        .enumerate()
        .map(|(i, track)| track.normalize(i))
        .collect()
}
