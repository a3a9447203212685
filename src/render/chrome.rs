//! Headless Chrome renderer.
//!
//! Elements are located and clicked through small JavaScript snippets
//! evaluated in the page, which keeps [`TabControl`] free of browser handles.

use std::sync::Arc;
use std::time::Duration;

use headless_chrome::{Browser, LaunchOptions, Tab};

use super::{Renderer, TabControl};
use crate::error::{Error, Result};
use crate::text::normalize_opt;

/// Browser launch settings.
#[derive(Debug, Clone)]
pub struct ChromeConfig {
    /// Run without a visible window
    pub headless: bool,

    /// Browser window size
    pub window_size: (u32, u32),

    /// Overrides Chrome's own user agent when set
    pub user_agent: Option<String>,

    /// Timeout for navigation and element waits
    pub timeout: Duration,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_size: (1920, 1080),
            user_agent: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Renderer driving one Chrome tab for the whole run.
pub struct ChromeRenderer {
    // Keeps the browser process alive as long as the tab is in use.
    _browser: Browser,
    tab: Arc<Tab>,
}

impl ChromeRenderer {
    /// Start Chrome and open the tab used for every page.
    pub fn launch(config: &ChromeConfig) -> Result<Self> {
        let launch_options = LaunchOptions::default_builder()
            .headless(config.headless)
            .window_size(Some(config.window_size))
            .build()
            .map_err(|e| Error::Render(format!("invalid launch options: {e}")))?;

        let browser = Browser::new(launch_options)
            .map_err(|e| Error::Render(format!("browser failed to start: {e}")))?;

        let tab = browser
            .new_tab()
            .map_err(|e| Error::Render(format!("tab creation failed: {e}")))?;
        tab.set_default_timeout(config.timeout);

        if let Some(user_agent) = &config.user_agent {
            tab.set_user_agent(user_agent, None, None)
                .map_err(|e| Error::Render(format!("setting user agent failed: {e}")))?;
        }

        log::info!("Browser session started");
        Ok(Self {
            _browser: browser,
            tab,
        })
    }

    fn evaluate(&self, script: &str) -> Result<Option<serde_json::Value>> {
        self.tab
            .evaluate(script, false)
            .map(|remote| remote.value)
            .map_err(|e| Error::Render(format!("script failed: {e}")))
    }
}

/// Selector as a JavaScript string literal.
fn js_string(selector: &str) -> String {
    serde_json::Value::String(selector.to_string()).to_string()
}

impl Renderer for ChromeRenderer {
    fn open(&mut self, url: &str) -> Result<()> {
        self.tab
            .navigate_to(url)
            .map_err(|e| Error::Render(format!("navigating to {url} failed: {e}")))?;
        self.tab
            .wait_until_navigated()
            .map_err(|e| Error::Render(format!("page load timed out for {url}: {e}")))?;
        Ok(())
    }

    fn find(&mut self, selector: &str) -> Result<Vec<TabControl>> {
        let script = format!(
            "JSON.stringify(Array.from(document.querySelectorAll({})).map(e => e.innerText ?? e.textContent))",
            js_string(selector)
        );

        // Detached or text-less nodes come back as null.
        let texts: Vec<Option<String>> = match self.evaluate(&script)? {
            Some(serde_json::Value::String(json)) => serde_json::from_str(&json)
                .map_err(|e| Error::Render(format!("unexpected element list: {e}")))?,
            _ => Vec::new(),
        };

        Ok(texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| TabControl {
                selector: selector.to_string(),
                index,
                text: normalize_opt(text.as_deref()),
            })
            .collect())
    }

    fn click(&mut self, control: &TabControl) -> Result<()> {
        let script = format!(
            "(() => {{ const el = document.querySelectorAll({})[{}]; if (!el) return false; el.click(); return true; }})()",
            js_string(&control.selector),
            control.index
        );

        match self.evaluate(&script)? {
            Some(serde_json::Value::Bool(true)) => Ok(()),
            _ => Err(Error::Render(format!(
                "tab control {} #{} is gone",
                control.selector, control.index
            ))),
        }
    }

    fn current_markup(&mut self) -> Result<String> {
        self.tab
            .get_content()
            .map_err(|e| Error::Render(format!("reading page content failed: {e}")))
    }

    fn close(&mut self) {
        if let Err(e) = self.tab.close(false) {
            log::warn!("Closing browser tab failed: {e}");
        }
        log::info!("Browser session closed");
    }
}
