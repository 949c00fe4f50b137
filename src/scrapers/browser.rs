use anyhow::{Context, Result};
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// Pause between scroll steps while waiting for more cards to load.
pub const SCROLL_PAUSE: Duration = Duration::from_secs(1);
/// Settle time after navigating to a browser-rendered profile page.
pub const PROFILE_SETTLE: Duration = Duration::from_secs(2);

/// Headless Chrome session for directories that only render via script.
///
/// One tab is reused for every page in a run. Dropping the session kills
/// the Chrome process, so early returns and errors release it too.
pub struct DirectoryBrowser {
    tab: Arc<Tab>,
    /// Owns the Chrome process; the tab dies with it.
    _browser: Browser,
}

impl DirectoryBrowser {
    /// Launch headless Chrome and open the tab used for rendering.
    pub fn launch() -> Result<Self> {
        info!("Launching headless Chrome...");

        let options = LaunchOptions::default_builder()
            .headless(true)
            .build()
            .context("Failed to build launch options")?;

        let browser = Browser::new(options).context("Failed to launch Chrome browser")?;
        let tab = browser.new_tab().context("Failed to open browser tab")?;

        Ok(Self {
            tab,
            _browser: browser,
        })
    }

    /// Navigate to `url` and return the rendered document.
    pub fn render(&self, url: &str) -> Result<String> {
        self.navigate(url)?;
        self.page_source()
    }

    /// Render a profile page, giving its scripts time to settle.
    pub fn render_profile(&self, url: &str) -> Result<String> {
        self.navigate(url)?;
        thread::sleep(PROFILE_SETTLE);
        self.page_source()
    }

    /// Render a page that loads more content as you scroll.
    ///
    /// Keeps scrolling to the bottom until the document height stops
    /// growing, then returns the full document.
    pub fn render_scrolled(&self, url: &str) -> Result<String> {
        self.navigate(url)?;

        let mut height = self.document_height()?;
        loop {
            self.scroll_to_bottom()?;
            thread::sleep(SCROLL_PAUSE);

            let new_height = self.document_height()?;
            if new_height == height {
                break;
            }
            debug!("Document height grew to {new_height}");
            height = new_height;
        }

        self.page_source()
    }

    fn navigate(&self, url: &str) -> Result<()> {
        self.tab
            .navigate_to(url)
            .with_context(|| format!("Failed to navigate to {url}"))?;
        self.tab
            .wait_until_navigated()
            .context("Page never finished loading")?;
        Ok(())
    }

    fn scroll_to_bottom(&self) -> Result<()> {
        self.tab
            .evaluate("window.scrollTo(0, document.body.scrollHeight);", false)?;
        Ok(())
    }

    fn document_height(&self) -> Result<i64> {
        let result = self.tab.evaluate("document.body.scrollHeight", false)?;
        result
            .value
            .and_then(|value| value.as_f64())
            .map(|height| height as i64)
            .context("Could not read document height")
    }

    fn page_source(&self) -> Result<String> {
        let result = self
            .tab
            .evaluate("document.documentElement.outerHTML", false)?;
        result
            .value
            .and_then(|value| value.as_str().map(str::to_string))
            .context("Could not get HTML from page")
    }
}
