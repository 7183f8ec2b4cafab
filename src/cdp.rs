//! Chrome DevTools Protocol adapter implementation

use crate::renderer::{Launcher, PrintOptions, Renderer};
use crate::{Error, Result, Viewport};
use base64::Engine as Base64Engine;
use headless_chrome::browser::tab::Tab;
use headless_chrome::protocol::cdp::Page;
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions};
use log::debug;
use std::ffi::OsStr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How long a freshly loaded document may take to finish loading its web fonts.
const DOCUMENT_LOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Launches one headless Chrome process per session (uses the `headless_chrome` crate)
#[derive(Debug, Clone, Default)]
pub struct CdpLauncher {
    /// Chrome binary; auto-detected when `None`
    pub chrome_path: Option<PathBuf>,
    /// Keep Chrome's sandbox enabled. Containers usually need it off.
    pub sandbox: bool,
}

impl Launcher for CdpLauncher {
    fn launch(&self, viewport: Viewport) -> Result<Box<dyn Renderer>> {
        Ok(Box::new(CdpRenderer::launch(self, viewport)?))
    }
}

/// A headless Chrome instance with a single tab.
pub struct CdpRenderer {
    browser: Browser,
    tab: Arc<Tab>,
}

impl CdpRenderer {
    fn launch(launcher: &CdpLauncher, viewport: Viewport) -> Result<Self> {
        // Configure headless Chrome launch options
        let launch_options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(launcher.sandbox)
            .path(launcher.chrome_path.clone())
            .window_size(Some((viewport.width, viewport.height)))
            .args(vec![OsStr::new("--disable-dev-shm-usage")])
            .build()
            .map_err(|e| Error::InitializationError(format!("Failed to build launch options: {}", e)))?;

        let browser = Browser::new(launch_options)
            .map_err(|e| Error::InitializationError(format!("Failed to launch browser: {}", e)))?;

        let tab = browser
            .new_tab()
            .map_err(|e| Error::InitializationError(format!("Failed to create tab: {}", e)))?;

        debug!("launched headless chrome with a {}x{} window", viewport.width, viewport.height);

        Ok(Self { browser, tab })
    }

    fn navigate(&self, url: &str, timeout: Duration) -> Result<()> {
        self.tab.set_default_timeout(timeout);

        self.tab
            .navigate_to(url)
            .map_err(|e| Error::LoadError(format!("Navigation failed: {}", e)))?;

        let started = Instant::now();
        self.tab
            .wait_until_navigated()
            .map_err(|e| navigation_error(started.elapsed(), timeout, e))?;

        Ok(())
    }
}

/// A wait that failed once the deadline had passed is reported as a timeout.
fn navigation_error(elapsed: Duration, timeout: Duration, cause: impl std::fmt::Display) -> Error {
    if elapsed >= timeout {
        Error::Timeout(timeout.as_millis() as u64)
    } else {
        Error::LoadError(format!("Navigation did not complete: {}", cause))
    }
}

impl Renderer for CdpRenderer {
    fn capture_screenshot(&mut self, url: &str, timeout: Duration) -> Result<Vec<u8>> {
        self.navigate(url, timeout)?;

        let png = self
            .tab
            .capture_screenshot(Page::CaptureScreenshotFormatOption::Png, None, None, true)
            .map_err(|e| Error::RenderError(format!("Screenshot failed: {}", e)))?;

        Ok(png)
    }

    fn render_pdf(&mut self, html: &str, options: &PrintOptions) -> Result<Vec<u8>> {
        // Encode the document as a data URL so it loads like any other page.
        let b64 = Base64Engine::encode(&base64::engine::general_purpose::STANDARD, html);
        self.navigate(&format!("data:text/html;charset=utf-8;base64,{}", b64), DOCUMENT_LOAD_TIMEOUT)?;

        // The load event does not wait for @font-face downloads.
        self.tab
            .evaluate("document.fonts.ready.then(() => true)", true)
            .map_err(|e| Error::LoadError(format!("Waiting for fonts failed: {}", e)))?;

        let pdf = self
            .tab
            .print_to_pdf(Some(to_cdp_options(options)))
            .map_err(|e| Error::RenderError(format!("PDF export failed: {}", e)))?;

        Ok(pdf)
    }

    fn close(self: Box<Self>) -> Result<()> {
        // Dropping the browser terminates the child process.
        let Self { browser, tab } = *self;
        drop(tab);
        drop(browser);
        Ok(())
    }
}

fn to_cdp_options(options: &PrintOptions) -> PrintToPdfOptions {
    PrintToPdfOptions {
        landscape: Some(options.landscape),
        display_header_footer: Some(false),
        print_background: Some(options.print_background),
        scale: Some(options.scale),
        paper_width: Some(options.paper_width),
        paper_height: Some(options.paper_height),
        margin_top: Some(options.margins.top),
        margin_bottom: Some(options.margins.bottom),
        margin_left: Some(options.margins.left),
        margin_right: Some(options.margins.right),
        page_ranges: options.page_ranges.as_ref().map(|r| r.to_string()),
        prefer_css_page_size: Some(options.prefer_css_page_size),
        ..Default::default()
    }
}
