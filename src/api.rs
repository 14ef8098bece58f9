use crate::export;
use crate::track::{normalize_all, RawTrack, Tracklist};
use anyhow::{ensure, Context, Result};
use attohttpc::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use url::form_urlencoded;

pub const API_BASE: &str = "https://api.music.yandex.net";

#[derive(Deserialize)]
struct Envelope<T> {
    result: T,
}

/// Track ids come back as strings or numbers depending on the endpoint.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum TrackId {
    Number(u64),
    Text(String),
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackId::Number(id) => write!(f, "{}", id),
            TrackId::Text(id) => write!(f, "{}", id),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TrackShort {
    pub id: TrackId,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Playlist {
    pub kind: u64,
    pub title: String,
    #[serde(default)]
    pub tracks: Vec<TrackShort>,
}

/// Blocking client for the account API.
#[derive(Debug, Clone)]
pub struct Client {
    base: String,
    token: String,
}

impl Client {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(token, API_BASE)
    }

    pub fn with_base_url(token: impl Into<String>, base: &str) -> Self {
        Client {
            base: base.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn authorization(&self) -> String {
        format!("OAuth {}", self.token)
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base, path);
        let response = attohttpc::get(&url)
            .try_header(AUTHORIZATION, self.authorization())
            .context("token is not a valid header value")?
            .send()
            .with_context(|| format!("couldn't request {}", path))?;
        receive(response, path)
    }

    fn post<T: DeserializeOwned>(&self, path: &str, form: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{}", self.base, path);
        let body = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(form)
            .finish();
        let response = attohttpc::post(&url)
            .text(body)
            .try_header(AUTHORIZATION, self.authorization())
            .context("token is not a valid header value")?
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .send()
            .with_context(|| format!("couldn't request {}", path))?;
        receive(response, path)
    }

    /// Authenticates the token and returns the account's user id.
    pub fn uid(&self) -> Result<u64> {
        #[derive(Deserialize)]
        struct Account {
            uid: Option<u64>,
        }

        #[derive(Deserialize)]
        struct Status {
            account: Account,
        }

        let status: Status = self.get("/account/status")?;
        status.account.uid.context("token was not accepted")
    }

    /// Every playlist of the account, with track ids.
    pub fn playlists(&self, uid: u64) -> Result<Vec<Playlist>> {
        #[derive(Deserialize)]
        struct Summary {
            kind: u64,
        }

        let summaries: Vec<Summary> = self.get(&format!("/users/{}/playlists/list", uid))?;
        if summaries.is_empty() {
            return Ok(vec![]);
        }

        let kinds = summaries
            .iter()
            .map(|x| x.kind.to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.post(&format!("/users/{}/playlists", uid), &[("kinds", kinds)])
    }

    pub fn tracks(&self, ids: &[TrackId]) -> Result<Vec<RawTrack>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let ids = ids.iter().map(|x| x.to_string()).collect::<Vec<_>>().join(",");
        self.post("/tracks", &[("track-ids", ids)])
    }
}

fn receive<T: DeserializeOwned>(response: attohttpc::Response, path: &str) -> Result<T> {
    let status = response.status();
    let text = response.text()?;
    ensure!(status.is_success(), "{} failed with {}", path, status);

    let envelope: Envelope<T> =
        serde_json::from_str(&text).with_context(|| format!("unexpected response from {}", path))?;
    Ok(envelope.result)
}

/// Exports every playlist of the account as soon as its tracks are fetched.
pub fn export_all(client: &Client, dir: &Path) -> Result<Vec<PathBuf>> {
    let uid = client.uid()?;
    let playlists = client.playlists(uid)?;
    log::debug!("account {} has {} playlists", uid, playlists.len());

    playlists
        .into_iter()
        .map(|playlist| {
            let ids: Vec<_> = playlist.tracks.iter().map(|x| x.id.clone()).collect();
            let raw = client
                .tracks(&ids)
                .with_context(|| format!("couldn't fetch tracks of {:?}", playlist.title))?;
            let tracklist = Tracklist {
                tracks: normalize_all(&raw)?,
                title: playlist.title,
            };
            export::save(tracklist, dir)
        })
        .collect()
}
