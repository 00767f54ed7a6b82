// Expectations - polling assertions playwright-rs's `expect` does not cover
//
// Same auto-retry model as `playwright_rs::expect`: evaluate, compare, sleep,
// repeat until the condition holds or the timeout elapses. Covers element
// counts and arbitrary async string probes (e.g. the page URL).

use crate::error::{Error, Result};
use playwright_rs::Locator;
use std::future::Future;
use std::time::{Duration, Instant};

/// Default timeout for assertions (5 seconds, matching Playwright)
pub const DEFAULT_ASSERTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Default polling interval for assertions (100ms)
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Polls `probe` until `accept` holds. On timeout returns the last value seen.
async fn retry<T, F, Fut, A>(
    timeout: Duration,
    poll_interval: Duration,
    mut probe: F,
    accept: A,
) -> Result<std::result::Result<(), T>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
    A: Fn(&T) -> bool,
{
    let start = Instant::now();

    loop {
        let value = probe().await?;
        if accept(&value) {
            return Ok(Ok(()));
        }

        if start.elapsed() >= timeout {
            return Ok(Err(value));
        }

        tokio::time::sleep(poll_interval).await;
    }
}

/// Creates a count expectation for a locator.
///
/// # Example
///
/// ```ignore
/// expect_count(page.locator(".nc-drawer-expanded-form .ant-drawer-content").await)
///     .to_equal(2)
///     .await?;
/// ```
pub fn expect_count(locator: Locator) -> CountExpectation {
    CountExpectation {
        locator,
        timeout: DEFAULT_ASSERTION_TIMEOUT,
        poll_interval: DEFAULT_POLL_INTERVAL,
    }
}

/// Asserts on the number of elements a locator resolves to.
pub struct CountExpectation {
    locator: Locator,
    timeout: Duration,
    poll_interval: Duration,
}

#[allow(clippy::wrong_self_convention)]
impl CountExpectation {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Asserts that the locator matches exactly `expected` elements.
    pub async fn to_equal(self, expected: usize) -> Result<()> {
        let locator = self.locator.clone();
        let outcome = retry(
            self.timeout,
            self.poll_interval,
            || {
                let locator = locator.clone();
                async move { Ok(locator.count().await?) }
            },
            |count| *count == expected,
        )
        .await?;

        outcome.map_err(|last| {
            Error::AssertionTimeout(format!(
                "Expected '{}' to match {} element(s), but found {} after {:?}",
                self.locator.selector(),
                expected,
                last,
                self.timeout
            ))
        })
    }
}

/// Creates an expectation over an async string probe.
///
/// Playwright's `expect.poll`: the probe is re-evaluated until the matcher
/// passes.
///
/// # Example
///
/// ```ignore
/// let page = page.clone();
/// expect_poll("page URL", move || {
///     let page = page.clone();
///     async move { Ok(page.url()) }
/// })
/// .to_contain("rowId=1")
/// .await?;
/// ```
pub fn expect_poll<F, Fut>(description: impl Into<String>, probe: F) -> PollExpectation<F>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<String>>,
{
    PollExpectation {
        description: description.into(),
        probe,
        timeout: DEFAULT_ASSERTION_TIMEOUT,
        poll_interval: DEFAULT_POLL_INTERVAL,
    }
}

pub struct PollExpectation<F> {
    description: String,
    probe: F,
    timeout: Duration,
    poll_interval: Duration,
}

#[allow(clippy::wrong_self_convention)]
impl<F, Fut> PollExpectation<F>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<String>>,
{
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Asserts that the probed value eventually contains `expected`.
    pub async fn to_contain(self, expected: &str) -> Result<()> {
        let outcome = retry(self.timeout, self.poll_interval, self.probe, |value: &String| {
            value.contains(expected)
        })
        .await?;

        outcome.map_err(|last| {
            Error::AssertionTimeout(format!(
                "Expected {} to contain '{}', but was '{}' after {:?}",
                self.description,
                expected,
                last,
                self.timeout
            ))
        })
    }

    /// Asserts that the probed value eventually equals `expected`.
    pub async fn to_equal(self, expected: &str) -> Result<()> {
        let outcome = retry(self.timeout, self.poll_interval, self.probe, |value: &String| {
            value == expected
        })
        .await?;

        outcome.map_err(|last| {
            Error::AssertionTimeout(format!(
                "Expected {} to be '{}', but was '{}' after {:?}",
                self.description,
                expected,
                last,
                self.timeout
            ))
        })
    }
}
