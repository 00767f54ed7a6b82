// Network gate - wait for data API requests triggered by UI actions
//
// playwright-rs offers request interception (`Page::route`) but no
// `waitForResponse`. The gate installs a single pass-through route for the
// data API and rebroadcasts each intercepted request on a tokio broadcast
// channel. A waiter subscribes *before* the UI action runs, so a request
// fired synchronously by a click is never missed.
//
// Only the last registered route handler sees a request. Installing another
// route over the same glob after the gate silences it.

use crate::error::{Error, Result};
use playwright_rs::Page;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tokio::sync::broadcast::{self, error::RecvError};

/// Buffered requests per subscriber before it starts lagging
const CHANNEL_CAPACITY: usize = 64;

/// A request observed by the gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedRequest {
    pub method: String,
    pub url: String,
}

/// Which requests a waiter is interested in.
///
/// Matches when the URL contains `url_fragment` and the method is one of
/// `methods` (any method when empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMatcher {
    url_fragment: String,
    methods: Vec<String>,
}

impl RequestMatcher {
    pub fn new(url_fragment: impl Into<String>) -> Self {
        Self {
            url_fragment: url_fragment.into(),
            methods: Vec::new(),
        }
    }

    /// Adds an accepted HTTP method.
    pub fn method(mut self, method: &str) -> Self {
        self.methods.push(method.to_uppercase());
        self
    }

    pub fn matches(&self, request: &ObservedRequest) -> bool {
        request.url.contains(&self.url_fragment)
            && (self.methods.is_empty()
                || self
                    .methods
                    .iter()
                    .any(|m| m.eq_ignore_ascii_case(&request.method)))
    }
}

impl fmt::Display for RequestMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.methods.is_empty() {
            write!(f, "any request to '{}'", self.url_fragment)
        } else {
            write!(f, "{} '{}'", self.methods.join("|"), self.url_fragment)
        }
    }
}

/// Broadcasts intercepted data API requests to waiters.
#[derive(Clone)]
pub struct NetworkGate {
    sender: broadcast::Sender<ObservedRequest>,
    timeout: Duration,
}

impl NetworkGate {
    /// Creates a gate that is not attached to any page.
    ///
    /// Use [`NetworkGate::install`] to feed it from a page's traffic.
    pub fn new(timeout: Duration) -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender, timeout }
    }

    /// Installs a pass-through route on `page` for URLs matching `glob`.
    ///
    /// Each intercepted request is continued unchanged, then published.
    pub async fn install(page: &Page, glob: &str, timeout: Duration) -> Result<Self> {
        let gate = Self::new(timeout);
        let sender = gate.sender.clone();

        page.route(glob, move |route| {
            let sender = sender.clone();
            async move {
                let request = route.request();
                let observed = ObservedRequest {
                    method: request.method().to_string(),
                    url: request.url().to_string(),
                };
                route.continue_(None).await?;
                tracing::debug!("Network gate saw {} {}", observed.method, observed.url);
                // No subscribers is the common case between waits.
                let _ = sender.send(observed);
                Ok(())
            }
        })
        .await?;

        tracing::debug!("Network gate installed for {}", glob);
        Ok(gate)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Publishes a request to current subscribers, returning how many received it.
    pub fn publish(&self, request: ObservedRequest) -> usize {
        self.sender.send(request).unwrap_or(0)
    }

    /// Starts listening. Requests published before this call are not seen.
    pub fn subscribe(&self) -> RequestWaiter {
        RequestWaiter {
            receiver: self.sender.subscribe(),
            timeout: self.timeout,
        }
    }

    /// Runs `action` and waits for the first request it triggers that
    /// satisfies `matcher`.
    pub async fn wait_for<F, Fut>(
        &self,
        matcher: &RequestMatcher,
        action: F,
    ) -> Result<ObservedRequest>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let waiter = self.subscribe();
        action().await?;
        waiter.wait(matcher).await
    }
}

/// A subscription to the gate, created before the triggering action.
pub struct RequestWaiter {
    receiver: broadcast::Receiver<ObservedRequest>,
    timeout: Duration,
}

impl RequestWaiter {
    /// Waits for the next request satisfying `matcher`.
    pub async fn wait(mut self, matcher: &RequestMatcher) -> Result<ObservedRequest> {
        let timeout = self.timeout;
        let receiver = &mut self.receiver;

        let outcome = tokio::time::timeout(timeout, async {
            loop {
                match receiver.recv().await {
                    Ok(request) if matcher.matches(&request) => return Ok(request),
                    Ok(request) => {
                        tracing::debug!(
                            "Ignoring {} {} while waiting for {}",
                            request.method,
                            request.url,
                            matcher
                        );
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!("Network gate waiter lagged, {} requests dropped", skipped);
                    }
                    Err(RecvError::Closed) => return Err(Error::GateClosed(matcher.to_string())),
                }
            }
        })
        .await;

        outcome.map_err(|_| {
            Error::Timeout(format!("no {} observed within {:?}", matcher, timeout))
        })?
    }
}
