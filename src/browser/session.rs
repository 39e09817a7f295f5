use crate::browser::config::{ConnectionOptions, LaunchOptions};
use crate::error::{InspectorError, Result};
use headless_chrome::{Browser, Tab};
use std::{ffi::OsStr, sync::Arc, time::Duration};

/// Browser session that manages a Chrome/Chromium instance
pub struct BrowserSession {
    /// The underlying headless_chrome Browser instance
    browser: Browser,
}

impl BrowserSession {
    /// Launch a new browser instance with the given options
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));

        // Inspection sessions are long lived; the default 30s idle timeout would kill them
        launch_opts.idle_browser_timeout = Duration::from_secs(60 * 60);

        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));
        launch_opts.path = options.chrome_path;
        launch_opts.user_data_dir = options.user_data_dir;
        launch_opts.sandbox = options.sandbox;

        let browser = Browser::new(launch_opts).map_err(|e| InspectorError::LaunchFailed(e.to_string()))?;

        browser
            .new_tab()
            .map_err(|e| InspectorError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        Ok(Self { browser })
    }

    /// Connect to an existing browser instance via WebSocket
    pub fn connect(options: ConnectionOptions) -> Result<Self> {
        let browser = Browser::connect_with_timeout(options.ws_url, Duration::from_millis(options.timeout))
            .map_err(|e| InspectorError::ConnectionFailed(e.to_string()))?;

        Ok(Self { browser })
    }

    /// Get all tabs
    pub fn get_tabs(&self) -> Result<Vec<Arc<Tab>>> {
        let tabs = self
            .browser
            .get_tabs()
            .lock()
            .map_err(|e| InspectorError::TabOperationFailed(format!("Failed to get tabs: {}", e)))?
            .clone();

        Ok(tabs)
    }

    /// Get the currently active tab by checking the document visibility and focus state
    pub fn get_active_tab(&self) -> Result<Arc<Tab>> {
        let tabs = self.get_tabs()?;

        // Visible and focused is the strongest signal, visible alone the fallback
        for probe in [
            "document.visibilityState === 'visible' && document.hasFocus()",
            "document.visibilityState === 'visible'",
        ] {
            for tab in &tabs {
                match tab.evaluate(probe, false) {
                    Ok(remote_object) => {
                        if remote_object.value.and_then(|v| v.as_bool()).unwrap_or(false) {
                            return Ok(tab.clone());
                        }
                    }
                    Err(e) => {
                        log::debug!("Failed to check tab status: {}", e);
                    }
                }
            }
        }

        // A single tab is the inspected one even when the window is hidden
        if let [only] = tabs.as_slice() {
            return Ok(only.clone());
        }

        Err(InspectorError::TabOperationFailed("No active tab found".to_string()))
    }

    /// Find a tab by its CDP target id
    pub fn find_tab(&self, target_id: &str) -> Result<Arc<Tab>> {
        self.get_tabs()?
            .into_iter()
            .find(|tab| tab.get_target_id() == target_id)
            .ok_or_else(|| InspectorError::TabOperationFailed(format!("Tab {} is gone", target_id)))
    }

    /// Navigate the active tab to a URL and wait for it to load
    pub fn navigate(&self, url: &str) -> Result<()> {
        let tab = self.get_active_tab()?;
        tab.navigate_to(url)
            .map_err(|e| InspectorError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e)))?;
        tab.wait_until_navigated()
            .map_err(|e| InspectorError::NavigationFailed(format!("Navigation timeout: {}", e)))?;

        Ok(())
    }

    /// Evaluate a script in a tab, decoding a JSON string result into a value
    ///
    /// Page scripts return `JSON.stringify(...)` so that objects cross CDP by value.
    pub fn evaluate_json(&self, tab: &Tab, script: &str) -> Result<serde_json::Value> {
        let result = tab
            .evaluate(script, false)
            .map_err(|e| InspectorError::EvaluationFailed(e.to_string()))?;

        match result.value {
            Some(serde_json::Value::String(json)) => serde_json::from_str(&json)
                .map_err(|e| InspectorError::EvaluationFailed(format!("Script returned invalid JSON: {}", e))),
            Some(value) => Ok(value),
            None => Ok(serde_json::Value::Null),
        }
    }

    /// Get the underlying Browser instance
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Close all tabs; the browser process exits when the session is dropped
    pub fn close(&self) -> Result<()> {
        for tab in self.get_tabs()? {
            if let Err(e) = tab.close(false) {
                log::debug!("Failed to close tab: {}", e);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Integration tests (require Chrome to be installed)
    #[test]
    #[ignore] // Ignore by default, run with: cargo test -- --ignored
    fn test_launch_browser() {
        let result = BrowserSession::launch(LaunchOptions::new().headless(true));
        assert!(result.is_ok());
    }

    #[test]
    #[ignore]
    fn test_get_active_tab() {
        let session = BrowserSession::launch(LaunchOptions::new().headless(true)).expect("Failed to launch browser");

        let tab = session.get_active_tab().expect("No active tab");
        let same = session.find_tab(tab.get_target_id()).expect("Tab not found by id");
        assert_eq!(same.get_target_id(), tab.get_target_id());
    }

    #[test]
    #[ignore]
    fn test_evaluate_json() {
        let session = BrowserSession::launch(LaunchOptions::new().headless(true)).expect("Failed to launch browser");
        let tab = session.get_active_tab().expect("No active tab");

        let value = session
            .evaluate_json(&tab, "JSON.stringify({answer: 42})")
            .expect("Evaluation failed");
        assert_eq!(value["answer"], 42);
    }
}
