//! Slide document assembly.
//!
//! All slides of a deck are laid out in one HTML page. Each fragment becomes
//! a fixed-size `.slide` block that breaks to a new printed page, so slide
//! *i* prints as page *i*.

use crate::{Result, Viewport};
use askama::Template;

/// Viewport (and printed page size) of one slide, in CSS pixels.
pub const SLIDE_VIEWPORT: Viewport = Viewport {
    width: 1080,
    height: 810,
    scale: 1.0,
};

/// Web font referenced by the slide stylesheet.
pub const SLIDE_FONT_URL: &str =
    "https://fonts.gstatic.com/s/liberationsans/v14/mem5YaGs126MiZpBA-UN_r8OUuhp.ttf";

const SLIDE_FONT_STACK: &str =
    "'Liberation Sans', Arial, 'Helvetica Neue', Helvetica, sans-serif";

#[derive(Template)]
#[template(path = "slides.html")]
struct SlideDocument<'a> {
    slides: &'a [String],
    width: u32,
    height: u32,
    font_url: &'static str,
    font_stack: &'static str,
}

/// Build the printable document for `slides`.
///
/// Fragments are inserted verbatim; malformed markup is passed through.
/// An empty slice still produces a complete document with no slide blocks.
pub fn assemble_document(slides: &[String]) -> Result<String> {
    let document = SlideDocument {
        slides,
        width: SLIDE_VIEWPORT.width,
        height: SLIDE_VIEWPORT.height,
        font_url: SLIDE_FONT_URL,
        font_stack: SLIDE_FONT_STACK,
    };
    Ok(document.render()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slide_ids(html: &str) -> Vec<String> {
        html.match_indices("<div class=\"slide\" id=\"")
            .map(|(start, marker)| {
                let rest = &html[start + marker.len()..];
                let end = rest.find('"').unwrap();
                rest[..end].to_string()
            })
            .collect()
    }

    #[test]
    fn test_one_numbered_block_per_slide_in_order() {
        let slides: Vec<String> = ["<div>a</div>", "<div>b</div>", "<div>c</div>"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let html = assemble_document(&slides).unwrap();

        assert_eq!(slide_ids(&html), vec!["slide-1", "slide-2", "slide-3"]);
        let a = html.find("<div>a</div>").unwrap();
        let b = html.find("<div>b</div>").unwrap();
        let c = html.find("<div>c</div>").unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_empty_fragments_keep_their_block() {
        let slides = vec![String::new(), "<p>x</p>".to_string(), String::new()];
        let html = assemble_document(&slides).unwrap();
        assert_eq!(slide_ids(&html), vec!["slide-1", "slide-2", "slide-3"]);
        assert!(html.contains(r#"id="slide-1" style="contain: layout size;"></div>"#));
    }

    #[test]
    fn test_zero_slides_is_still_a_document() {
        let html = assemble_document(&[]).unwrap();
        assert!(slide_ids(&html).is_empty());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<body>"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_fragments_are_not_escaped() {
        let slides = vec![r#"<ul><li style="color:red">Hi & bye</li></ul>"#.to_string()];
        let html = assemble_document(&slides).unwrap();
        assert!(html.contains(r#"<ul><li style="color:red">Hi & bye</li></ul>"#));
    }

    #[test]
    fn test_print_rules() {
        let html = assemble_document(&["<div></div>".to_string()]).unwrap();
        assert!(html.contains("size: 1080px 810px landscape;"));
        assert!(html.contains("break-after: page;"));
        assert!(html.contains("break-inside: avoid !important;"));
        assert!(html.contains(SLIDE_FONT_URL));
        assert!(html.contains("font-family: 'Liberation Sans', Arial, 'Helvetica Neue', Helvetica, sans-serif;"));
        for data_type in ["title", "paragraph", "image"] {
            assert!(html.contains(&format!("div[data-type=\"{data_type}\"]")));
        }
    }

    #[test]
    fn test_large_deck_numbering_has_no_gaps() {
        let slides: Vec<String> = (0..25).map(|i| format!("<p>{i}</p>")).collect();
        let html = assemble_document(&slides).unwrap();
        let expected: Vec<String> = (1..=25).map(|i| format!("slide-{i}")).collect();
        assert_eq!(slide_ids(&html), expected);
    }
}
