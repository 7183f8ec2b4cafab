//! End-to-end tests against a real headless Chrome

#![cfg(feature = "cdp")]

use slidepress::cdp::CdpLauncher;
use slidepress::pipeline::{capture_url, render_deck, SlideDeck};
use regex::bytes::Regex;
use slidepress::session::SessionPool;
use std::sync::{Arc, Once};
use std::time::Duration;
use tiny_http::{Response, Server};

static INIT: Once = Once::new();

/// Start a simple test HTTP server
fn start_test_server() -> String {
    INIT.call_once(|| {
        std::thread::spawn(|| {
            let server = Server::http("127.0.0.1:18081").unwrap();
            for request in server.incoming_requests() {
                let response = match request.url() {
                    "/" => Response::from_string(
                        r#"<!DOCTYPE html>
<html>
<head><title>Test Page</title></head>
<body><h1>Hello from Test Server</h1></body>
</html>"#,
                    )
                    .with_header(
                        "Content-Type: text/html; charset=utf-8"
                            .parse::<tiny_http::Header>()
                            .unwrap(),
                    ),
                    _ => Response::from_string("Not Found").with_status_code(404),
                };
                let _ = request.respond(response);
            }
        });
        // Give the server time to start
        std::thread::sleep(Duration::from_millis(100));
    });

    "http://127.0.0.1:18081/".to_string()
}

/// Number of page objects in a PDF (`/Type /Page`, not the `/Pages` tree node)
fn page_count(pdf: &[u8]) -> usize {
    Regex::new(r"(?-u)/Type\s*/Page\b").unwrap().find_iter(pdf).count()
}

fn pool() -> SessionPool {
    SessionPool::new(Arc::new(CdpLauncher::default()), 2)
}

#[tokio::test]
#[ignore] // Requires Chrome to be installed
async fn test_screenshot_of_served_page() {
    let url = start_test_server();
    let png = capture_url(&pool(), &url, Duration::from_secs(30))
        .await
        .expect("Failed to capture screenshot");

    assert!(png.len() > 100, "PNG data seems too small");
    // PNG files start with these magic bytes
    assert_eq!(&png[0..8], b"\x89PNG\r\n\x1a\n");
}

#[tokio::test]
#[ignore] // Requires Chrome to be installed
async fn test_unreachable_url_fails() {
    let result = capture_url(&pool(), "http://127.0.0.1:9/", Duration::from_secs(5)).await;
    assert!(result.is_err());
}

#[tokio::test]
#[ignore] // Requires Chrome to be installed
async fn test_slides_pdf() {
    let deck = SlideDeck::new(vec![
        "<div>a</div>".to_string(),
        "<div>b</div>".to_string(),
        "<div>c</div>".to_string(),
    ])
    .unwrap();

    let pool = pool();
    let pdf = render_deck(&pool, &deck).await.expect("Failed to render PDF");
    assert!(pdf.starts_with(b"%PDF"));
    // slides 1 and 3 only
    assert_eq!(page_count(&pdf), 2);
    assert_eq!(pool.available(), pool.max_sessions());
}
