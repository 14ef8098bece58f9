use crate::track::{Track, Tracklist};
use anyhow::{Context, Result};
use scraper::{ElementRef, Html, Selector};

fn text_of(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn title(document: &Html) -> Result<String> {
    let primary = Selector::parse(".page-playlist__title").unwrap();
    let secondary = Selector::parse("div.sidebar__title.typo-h2").unwrap();
    let element = document
        .select(&primary)
        .next()
        .or_else(|| document.select(&secondary).next())
        .context("missing playlist title")?;

    let text = text_of(element);
    if !text.is_empty() {
        return Ok(text);
    }
    element
        .value()
        .attr("value")
        .map(str::to_string)
        .context("playlist title has neither text nor value")
}

fn track(element: ElementRef, position: usize) -> Result<Track> {
    let name = Selector::parse("div.d-track__name").unwrap();
    let artists = Selector::parse("span.d-track__artists").unwrap();
    let cover = Selector::parse("img.entity-cover__image.deco-pane").unwrap();

    let thumbnail = match element.select(&cover).next() {
        Some(image) => {
            let src = image.value().attr("src").context("cover image without src")?;
            Some(format!("https:{}", src))
        }
        None => None,
    };

    Ok(Track {
        title: text_of(element.select(&name).next().context("missing track name")?),
        artist: text_of(element.select(&artists).next().context("missing track artists")?),
        index: position + 1,
        album: None,
        thumbnail,
    })
}

/// Scrapes the rendered playlist markup.
pub fn extract(document: &Html) -> Result<Tracklist> {
    let title = title(document)?;
    let selector = Selector::parse("div.d-track").unwrap();
    let tracks = document
        .select(&selector)
        .enumerate()
        .map(|(i, x)| track(x, i))
        .collect::<Result<_>>()
        .with_context(|| format!("couldn't scrape tracks of {:?}", title))?;

    Ok(Tracklist { title, tracks })
}
