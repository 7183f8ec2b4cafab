//! slidepress
//!
//! A small HTTP service that drives headless Chrome to produce two kinds of
//! artifacts:
//!
//! - a PNG screenshot of a URL, embedded in an HTML page;
//! - a PDF of an HTML slide deck, one slide per landscape page, keeping only
//!   the odd-numbered pages.
//!
//! # Features
//!
//! - **CDP Backend** (default): renders through the Chrome DevTools Protocol
//! - **Bounded sessions**: at most `max_sessions` browsers run at once, each
//!   closed on every exit path
//!
//! # Example
//!
//! ```no_run
//! use slidepress::pipeline::{render_deck, SlideDeck};
//! use slidepress::session::SessionPool;
//! use std::sync::Arc;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = SessionPool::new(Arc::new(slidepress::cdp::CdpLauncher::default()), 2);
//! let deck = SlideDeck::new(vec!["<h1>One</h1>".into(), "<h1>Two</h1>".into()])?;
//! let pdf = render_deck(&pool, &deck).await?;
//! std::fs::write("deck.pdf", pdf)?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub use error::{Error, Result};

#[cfg(feature = "cdp")]
pub mod cdp;

pub mod config;
pub mod document;
pub mod normalize;
pub mod pages;
pub mod pipeline;
pub mod renderer;
pub mod server;
pub mod session;

pub use config::ServerConfig;
pub use renderer::{Launcher, PrintOptions, Renderer};
pub use session::{Session, SessionPool};

/// Viewport dimensions in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    /// Device scale factor, also used as the PDF print scale
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            scale: 1.0,
        }
    }
}
