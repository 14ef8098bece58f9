use crate::track::Tracklist;
use crate::{dom, script};
use anyhow::{ensure, Result};
use scraper::{Html, Selector};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Page state JSON embedded in an inline script.
    ScriptBlob,
    /// Rendered track markup.
    Dom,
}

impl Strategy {
    /// In order of preference.
    pub const ALL: [Strategy; 2] = [Strategy::ScriptBlob, Strategy::Dom];

    pub fn extract(self, document: &Html) -> Result<Tracklist> {
        match self {
            Strategy::ScriptBlob => script::extract(document),
            Strategy::Dom => dom::extract(document),
        }
    }
}

pub fn has_captcha(document: &Html) -> bool {
    let selector = Selector::parse("div.CheckboxCaptcha-Label").unwrap();
    document.select(&selector).next().is_some()
}

pub fn ensure_no_captcha(document: &Html) -> Result<()> {
    ensure!(!has_captcha(document), "Captcha showed!");
    Ok(())
}

/// Runs each strategy in turn, keeping the first result with tracks.
///
/// The last strategy's result is returned as-is even when it is empty.
pub fn extract(document: &Html) -> Result<Tracklist> {
    let mut tracklist = Tracklist::default();
    for strategy in Strategy::ALL.iter() {
        tracklist = strategy.extract(document)?;
        if !tracklist.tracks.is_empty() {
            log::debug!("{:?} found {} tracks", strategy, tracklist.tracks.len());
            break;
        }
    }
    Ok(tracklist)
}
