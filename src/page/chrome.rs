use crate::browser::BrowserSession;
use crate::error::{InspectorError, Result};
use crate::page::{PageHost, PageId, PageScript};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Inspects the active tab of a Chrome session
///
/// CDP calls block, so they run on tokio's blocking pool.
#[derive(Clone)]
pub struct ChromeHost {
    session: Arc<BrowserSession>,
}

impl ChromeHost {
    pub fn new(session: Arc<BrowserSession>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Arc<BrowserSession> {
        &self.session
    }
}

#[async_trait]
impl PageHost for ChromeHost {
    async fn inspected_page(&self) -> Option<PageId> {
        let session = self.session.clone();
        let result = tokio::task::spawn_blocking(move || {
            session
                .get_active_tab()
                .map(|tab| PageId(tab.get_target_id().clone()))
        })
        .await;

        match result {
            Ok(Ok(page)) => Some(page),
            Ok(Err(e)) => {
                log::debug!("No inspectable tab: {}", e);
                None
            }
            Err(e) => {
                log::warn!("Tab lookup task failed: {}", e);
                None
            }
        }
    }

    async fn execute(&self, page: &PageId, script: &PageScript) -> Result<Value> {
        let session = self.session.clone();
        let target_id = page.0.clone();
        let js = script.to_js();

        tokio::task::spawn_blocking(move || {
            let tab = session.find_tab(&target_id)?;
            session.evaluate_json(&tab, &js)
        })
        .await
        .map_err(|e| InspectorError::EvaluationFailed(format!("Script task failed: {}", e)))?
    }
}
