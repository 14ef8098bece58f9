use anyhow::{Context, Result};
use attohttpc::header::{ACCEPT, CONNECTION, USER_AGENT};
use std::fmt;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

/// Somewhere a playlist page can be read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Url(url) => write!(f, "{}", url),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl Source {
    /// Returns the page HTML, or `None` (after logging why) when this input should be skipped.
    pub fn load(&self) -> Result<Option<String>> {
        match self {
            Source::Url(url) => fetch(url),
            Source::File(path) => read(path),
        }
    }
}

fn fetch(url: &str) -> Result<Option<String>> {
    let response = attohttpc::get(url)
        .header(USER_AGENT, "curl/8.7.3")
        .header(ACCEPT, "*/*")
        .header(CONNECTION, "keep-alive")
        .send()
        .with_context(|| format!("couldn't request {}", url))?;

    if !response.is_success() {
        log::warn!("Couldn't load {} - [{}]", url, response.status().as_u16());
        return Ok(None);
    }

    Ok(Some(response.text()?))
}

fn read(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        log::warn!("File {} does not exist", path.display());
        return Ok(None);
    }

    let text = read_to_string(path).with_context(|| format!("couldn't read {}", path.display()))?;
    Ok(Some(text))
}
