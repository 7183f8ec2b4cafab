//! Renderer adapter seam.
//!
//! A [`Launcher`] starts independent browser sessions; each session is a
//! [`Renderer`] that can screenshot a URL or print an HTML document to PDF.
//! Renderers are created and used on a single worker thread (see
//! [`crate::session`]), so they do not need to be `Send`.

use crate::pages::PageRanges;
use crate::{Result, Viewport};
use std::time::Duration;

/// CSS pixels per inch, used to convert viewport sizes into paper sizes.
const CSS_PX_PER_INCH: f64 = 96.0;

/// Page margins in inches
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Print settings for a PDF export
#[derive(Debug, Clone, PartialEq)]
pub struct PrintOptions {
    /// Paper width in inches
    pub paper_width: f64,
    /// Paper height in inches
    pub paper_height: f64,
    pub margins: Margins,
    pub landscape: bool,
    /// Print background colors and images
    pub print_background: bool,
    /// Let a CSS `@page` size win over `paper_width`/`paper_height`
    pub prefer_css_page_size: bool,
    pub scale: f64,
    /// Restrict output to these pages; `None` prints every page
    pub page_ranges: Option<PageRanges>,
}

impl PrintOptions {
    /// Borderless landscape pages sized exactly to `viewport`.
    pub fn for_viewport(viewport: Viewport) -> Self {
        Self {
            paper_width: f64::from(viewport.width) / CSS_PX_PER_INCH,
            paper_height: f64::from(viewport.height) / CSS_PX_PER_INCH,
            margins: Margins::default(),
            landscape: true,
            print_background: true,
            prefer_css_page_size: true,
            scale: viewport.scale,
            page_ranges: None,
        }
    }

    pub fn with_page_ranges(mut self, ranges: PageRanges) -> Self {
        self.page_ranges = Some(ranges);
        self
    }
}

/// One live browser session.
pub trait Renderer {
    /// Navigate to `url` and capture the viewport as PNG. Fails if navigation
    /// does not complete within `timeout`.
    fn capture_screenshot(&mut self, url: &str, timeout: Duration) -> Result<Vec<u8>>;

    /// Load a full HTML document and print it to PDF.
    fn render_pdf(&mut self, html: &str, options: &PrintOptions) -> Result<Vec<u8>>;

    /// Close the session and terminate its browser process.
    fn close(self: Box<Self>) -> Result<()>;
}

/// Starts browser sessions. Shared across request handlers.
pub trait Launcher: Send + Sync {
    fn launch(&self, viewport: Viewport) -> Result<Box<dyn Renderer>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SLIDE_VIEWPORT;
    use crate::pages::odd_pages;

    #[test]
    fn test_slide_paper_size() {
        let options = PrintOptions::for_viewport(SLIDE_VIEWPORT);
        assert_eq!(options.paper_width, 11.25);
        assert_eq!(options.paper_height, 8.4375);
        assert_eq!(options.margins, Margins::default());
        assert!(options.landscape);
        assert!(options.print_background);
        assert!(options.prefer_css_page_size);
        assert_eq!(options.scale, 1.0);
        assert!(options.page_ranges.is_none());
    }

    #[test]
    fn test_with_page_ranges() {
        let options = PrintOptions::for_viewport(SLIDE_VIEWPORT).with_page_ranges(odd_pages(5));
        assert_eq!(options.page_ranges.map(|r| r.to_string()).as_deref(), Some("1,3,5"));
    }
}
