//! Bounded pool of browser sessions with an async facade.
//!
//! Every [`Session`] owns one browser launched on a dedicated worker thread.
//! Async callers send commands over a channel and await the reply on a
//! `oneshot`, so the blocking CDP client never runs on the runtime and the
//! renderer does not need to be `Send`.
//!
//! The pool permit travels with the worker and is only returned after the
//! browser has been closed, so `max_sessions` bounds live browser processes.

use crate::renderer::{Launcher, PrintOptions, Renderer};
use crate::{Error, Result, Viewport};
use log::{debug, warn};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::{oneshot, OwnedSemaphorePermit, Semaphore};

enum Command {
    Screenshot(String, Duration, oneshot::Sender<Result<Vec<u8>>>),
    Pdf(String, PrintOptions, oneshot::Sender<Result<Vec<u8>>>),
    Close(oneshot::Sender<Result<()>>),
}

/// Hands out browser sessions, at most `max_sessions` at a time.
#[derive(Clone)]
pub struct SessionPool {
    launcher: Arc<dyn Launcher>,
    permits: Arc<Semaphore>,
    max_sessions: usize,
}

impl SessionPool {
    pub fn new(launcher: Arc<dyn Launcher>, max_sessions: usize) -> Self {
        Self {
            launcher,
            permits: Arc::new(Semaphore::new(max_sessions)),
            max_sessions,
        }
    }

    pub fn max_sessions(&self) -> usize {
        self.max_sessions
    }

    /// Number of sessions that could be launched right now without waiting.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Wait for a free slot and launch a browser sized to `viewport`.
    ///
    /// If the launch fails the slot is returned before the error is.
    pub async fn acquire(&self, viewport: Viewport) -> Result<Session> {
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| Error::SessionError(format!("Session pool closed: {}", e)))?;

        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
        let (init_tx, init_rx) = oneshot::channel::<Result<()>>();
        let launcher = Arc::clone(&self.launcher);

        thread::Builder::new()
            .name("render-session".to_string())
            .spawn(move || run_worker(launcher, viewport, permit, cmd_rx, init_tx))
            .map_err(|e| Error::SessionError(format!("Failed to spawn session worker: {}", e)))?;

        // Wait for the worker to report launch success or failure
        init_rx
            .await
            .map_err(|e| Error::SessionError(format!("Worker init canceled: {}", e)))??;

        Ok(Session { cmd_tx })
    }
}

fn run_worker(
    launcher: Arc<dyn Launcher>,
    viewport: Viewport,
    permit: OwnedSemaphorePermit,
    cmd_rx: Receiver<Command>,
    init_tx: oneshot::Sender<Result<()>>,
) {
    let mut renderer = match launcher.launch(viewport) {
        Ok(r) => r,
        Err(err) => {
            drop(permit);
            let _ = init_tx.send(Err(err));
            return;
        }
    };
    let _ = init_tx.send(Ok(()));
    debug!("render session started");

    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            Command::Screenshot(url, timeout, resp) => {
                let _ = resp.send(renderer.capture_screenshot(&url, timeout));
            }
            Command::Pdf(html, options, resp) => {
                let _ = resp.send(renderer.render_pdf(&html, &options));
            }
            Command::Close(resp) => {
                let res = renderer.close();
                drop(permit);
                debug!("render session closed");
                let _ = resp.send(res);
                return;
            }
        }
    }

    // Every handle was dropped without an explicit close.
    if let Err(e) = renderer.close() {
        warn!("Failed to close abandoned render session: {}", e);
    }
    drop(permit);
}

/// Handle to one launched browser session.
///
/// Call [`Session::release`] when done. Dropping the handle also closes the
/// browser, from the worker thread, once any in-flight command finishes.
pub struct Session {
    cmd_tx: Sender<Command>,
}

impl Session {
    /// Navigate to `url` and capture a PNG screenshot.
    pub async fn capture_screenshot(&self, url: &str, timeout: Duration) -> Result<Vec<u8>> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Screenshot(url.to_string(), timeout, tx))?;
        rx.await
            .map_err(|e| Error::SessionError(format!("Screenshot canceled: {}", e)))?
    }

    /// Print an HTML document to PDF.
    pub async fn render_pdf(&self, html: String, options: PrintOptions) -> Result<Vec<u8>> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Pdf(html, options, tx))?;
        rx.await
            .map_err(|e| Error::SessionError(format!("PDF render canceled: {}", e)))?
    }

    /// Close the browser and wait for it to exit.
    pub async fn close(self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Close(tx))?;
        rx.await
            .map_err(|e| Error::SessionError(format!("Close canceled: {}", e)))?
    }

    /// Close the browser, logging instead of returning a close failure.
    pub async fn release(self) {
        if let Err(e) = self.close().await {
            warn!("Failed to close render session: {}", e);
        }
    }

    fn send(&self, cmd: Command) -> Result<()> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| Error::SessionError("Session worker has exited".into()))
    }
}
