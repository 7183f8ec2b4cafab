//! The two rendering flows: URL screenshots and slide decks.

use crate::document::{assemble_document, SLIDE_VIEWPORT};
use crate::normalize::normalize_fragment;
use crate::pages::{odd_pages, PageRanges};
use crate::renderer::PrintOptions;
use crate::session::SessionPool;
use crate::{Error, Result, Viewport};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;

/// Window size used for URL screenshots.
pub const SCREENSHOT_VIEWPORT: Viewport = Viewport {
    width: 800,
    height: 600,
    scale: 1.0,
};

static CAPTURABLE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\n\r\x{2028}\x{2029}]+$").expect("capturable url pattern is valid"));

/// Whether `url` has a lowercase `http://` or `https://` scheme followed by
/// at least one character (and no line breaks).
pub fn is_capturable_url(url: &str) -> bool {
    CAPTURABLE_URL.is_match(url)
}

/// Screenshot `url` in a fresh browser session.
pub async fn capture_url(pool: &SessionPool, url: &str, timeout: Duration) -> Result<Vec<u8>> {
    let session = pool.acquire(SCREENSHOT_VIEWPORT).await?;
    let result = session.capture_screenshot(url, timeout).await;
    session.release().await;
    result
}

/// A non-empty, ordered list of slide fragments.
#[derive(Debug, Clone)]
pub struct SlideDeck {
    slides: Vec<String>,
}

impl SlideDeck {
    pub fn new(slides: Vec<String>) -> Result<Self> {
        if slides.is_empty() {
            return Err(Error::EmptyDeck);
        }
        Ok(Self { slides })
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Normalize every fragment and lay the deck out as one printable page.
    pub fn document(&self) -> Result<String> {
        let normalized: Vec<String> = self
            .slides
            .iter()
            .map(|slide| normalize_fragment(slide).into_owned())
            .collect();
        assemble_document(&normalized)
    }

    /// Pages of the rendered deck that end up in the PDF.
    pub fn retained_pages(&self) -> PageRanges {
        odd_pages(self.slides.len())
    }

    pub fn print_options(&self) -> PrintOptions {
        PrintOptions::for_viewport(SLIDE_VIEWPORT).with_page_ranges(self.retained_pages())
    }
}

/// Render `deck` to a PDF holding only its odd-numbered pages.
///
/// Chrome applies the page ranges while printing, so one pass is enough.
pub async fn render_deck(pool: &SessionPool, deck: &SlideDeck) -> Result<Vec<u8>> {
    let html = deck.document()?;
    let options = deck.print_options();
    debug!(
        "rendering {} slides, keeping pages {}",
        deck.len(),
        deck.retained_pages()
    );

    let session = pool.acquire(SLIDE_VIEWPORT).await?;
    let result = session.render_pdf(html, options).await;
    session.release().await;
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capturable_urls() {
        for url in ["http://example.com", "https://example.com/a?b=c", "http://x"] {
            assert!(is_capturable_url(url), "{url} should be accepted");
        }
    }

    #[test]
    fn test_rejected_urls() {
        for url in [
            "",
            "ftp://x",
            "http://",
            "https://",
            "HTTP://example.com",
            "example.com",
            " http://example.com",
            "http://example.com\nmore",
            "http://example.com\rmore",
            "http://example.com\u{2028}more",
            "http://example.com\u{2029}more",
            "javascript:alert(1)",
        ] {
            assert!(!is_capturable_url(url), "{url:?} should be rejected");
        }
    }

    #[test]
    fn test_empty_deck_is_rejected() {
        assert!(matches!(SlideDeck::new(vec![]), Err(Error::EmptyDeck)));
    }

    #[test]
    fn test_deck_document_is_normalized() {
        let deck = SlideDeck::new(vec![
            r#"<ul><li><p><span style="color:red">Hi</span></p></li></ul>"#.to_string(),
            "<div>b</div>".to_string(),
        ])
        .unwrap();
        let html = deck.document().unwrap();
        assert!(html.contains(r#"<ul><li style="color:red">Hi</li></ul>"#));
        assert!(html.contains(r#"id="slide-2""#));
        assert!(!html.contains(r#"id="slide-3""#));
    }

    #[test]
    fn test_deck_print_options() {
        let slides = (0..4).map(|i| format!("<p>{i}</p>")).collect();
        let deck = SlideDeck::new(slides).unwrap();
        let options = deck.print_options();
        assert_eq!(options.page_ranges.map(|r| r.to_string()).as_deref(), Some("1,3"));
        assert_eq!(options.scale, 1.0);
    }
}
