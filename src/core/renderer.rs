//! Rendering surface backed by a headless Chromium instance.
//!
//! All layout and painting is delegated to the browser engine; this
//! module only drives it over the DevTools protocol: load a composed
//! document, wait for it to paint, and grab the viewport as PNG bytes.

use std::thread;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use headless_chrome::protocol::cdp::Page;
use headless_chrome::{Browser, LaunchOptions};
use thiserror::Error;

/// Errors from the embedded rendering engine.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to launch rendering engine: {0}")]
    Launch(String),

    #[error("failed to load document: {0}")]
    Load(String),

    #[error("viewport capture failed: {0}")]
    Capture(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;

/// Viewport dimensions for rendering and capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// A headless browser tab sized to a fixed viewport.
///
/// One surface is created per render job and dropped with it, taking the
/// browser subprocess down with it.
pub struct RenderSurface {
    // Owns the browser subprocess; the tab handle is only valid while
    // this is alive.
    _browser: Browser,
    tab: std::sync::Arc<headless_chrome::browser::tab::Tab>,
    viewport: Viewport,
}

impl RenderSurface {
    /// Launch a headless browser with a window matching the viewport.
    pub fn new(viewport: Viewport) -> Result<Self> {
        let launch_options = LaunchOptions::default_builder()
            .headless(true)
            .window_size(Some((viewport.width, viewport.height)))
            .build()
            .map_err(|e| RenderError::Launch(format!("invalid launch options: {}", e)))?;

        let browser = Browser::new(launch_options)
            .map_err(|e| RenderError::Launch(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| RenderError::Launch(format!("failed to open tab: {}", e)))?;

        Ok(Self {
            _browser: browser,
            tab,
            viewport,
        })
    }

    /// Load a composed HTML document into the tab and wait for the
    /// navigation to finish.
    pub fn load_html(&self, document: &str) -> Result<()> {
        let url = data_url(document);

        self.tab
            .navigate_to(&url)
            .map_err(|e| RenderError::Load(e.to_string()))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| RenderError::Load(format!("wait for navigation failed: {}", e)))?;

        Ok(())
    }

    /// Grab the current visual state of the viewport as PNG bytes.
    pub fn capture(&self) -> Result<Vec<u8>> {
        let clip = Page::Viewport {
            x: 0.0,
            y: 0.0,
            width: self.viewport.width as f64,
            height: self.viewport.height as f64,
            scale: 1.0,
        };

        self.tab
            .capture_screenshot(Page::CaptureScreenshotFormatOption::Png, None, Some(clip), true)
            .map_err(|e| RenderError::Capture(e.to_string()))
    }
}

/// Encode a document as a base64 `data:` URL the tab can navigate to.
pub fn data_url(document: &str) -> String {
    format!(
        "data:text/html;charset=utf-8;base64,{}",
        STANDARD.encode(document.as_bytes())
    )
}

/// Render a document and capture the viewport as PNG bytes.
///
/// Navigation completion is awaited before the settle delay, so the
/// delay only has to cover asynchronous paint after load.
pub fn render_to_png(document: &str, viewport: Viewport, settle_delay_ms: u64) -> Result<Vec<u8>> {
    log::info!(
        "rendering document ({} bytes) at {}x{}",
        document.len(),
        viewport.width,
        viewport.height
    );

    let surface = RenderSurface::new(viewport)?;
    surface.load_html(document)?;

    // The engine keeps painting after the navigation settles.
    thread::sleep(Duration::from_millis(settle_delay_ms));

    surface.capture()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_shape() {
        let url = data_url("<p>hi</p>");
        assert!(url.starts_with("data:text/html;charset=utf-8;base64,"));
        // "<p>hi</p>" in standard base64
        assert!(url.ends_with("PHA+aGk8L3A+"));
    }

    #[test]
    fn test_data_url_empty_document() {
        assert_eq!(data_url(""), "data:text/html;charset=utf-8;base64,");
    }
}
