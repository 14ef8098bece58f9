use anyhow::Result;
use scraper::Html;
use std::path::{Path, PathBuf};

pub mod api;
pub mod dom;
pub mod export;
pub mod extract;
pub mod script;
pub mod source;
pub mod track;

pub use export::DEFAULT_SOURCE;
pub use source::Source;

/// What a run reads playlists from.
#[derive(Debug, Clone)]
pub enum Mode {
    /// Every playlist of the account behind the token.
    Api { token: String },
    /// Playlist pages, processed in the given order.
    Documents(Vec<Source>),
}

impl Mode {
    /// A token wins over any urls or files, and urls win over files.
    pub fn select(token: Option<String>, urls: Vec<String>, files: Vec<PathBuf>) -> Mode {
        match token {
            Some(token) => Mode::Api { token },
            None if !urls.is_empty() => Mode::Documents(urls.into_iter().map(Source::Url).collect()),
            None => Mode::Documents(files.into_iter().map(Source::File).collect()),
        }
    }
}

/// Exports every playlist `mode` yields into `out_dir`, returning the written files.
pub fn run(mode: Mode, out_dir: &Path) -> Result<Vec<PathBuf>> {
    match mode {
        Mode::Api { token } => api::export_all(&api::Client::new(token), out_dir),
        Mode::Documents(sources) => export_documents(&sources, out_dir),
    }
}

/// Loads all sources up front so a captcha on any page stops the run before anything is written.
pub fn export_documents(sources: &[Source], out_dir: &Path) -> Result<Vec<PathBuf>> {
    if sources.is_empty() {
        log::warn!("nothing to export: pass urls, files or a token");
        return Ok(vec![]);
    }

    let mut documents = vec![];
    for source in sources {
        log::debug!("loading {}", source);
        if let Some(html) = source.load()? {
            documents.push(Html::parse_document(&html));
        }
    }

    for document in &documents {
        extract::ensure_no_captcha(document)?;
    }

    documents
        .iter()
        .map(|document| export::save(extract::extract(document)?, out_dir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_takes_precedence() {
        let mode = Mode::select(
            Some("abc".to_string()),
            vec!["https://example.com".to_string()],
            vec![PathBuf::from("a.html")],
        );
        assert!(matches!(mode, Mode::Api { token } if token == "abc"));
    }

    #[test]
    fn urls_exclude_files() {
        let mode = Mode::select(
            None,
            vec!["https://example.com".to_string()],
            vec![PathBuf::from("a.html")],
        );
        match mode {
            Mode::Documents(sources) => assert_eq!(
                sources,
                vec![Source::Url("https://example.com".to_string())]
            ),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn files_without_urls() {
        let mode = Mode::select(None, vec![], vec![PathBuf::from("a.html")]);
        match mode {
            Mode::Documents(sources) => {
                assert_eq!(sources, vec![Source::File(PathBuf::from("a.html"))])
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn no_inputs_exports_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run(Mode::Documents(vec![]), dir.path()).unwrap().is_empty());
    }
}
