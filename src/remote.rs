use std::time::{Duration, Instant};

use crate::error::{Result, StatsError};

/// One blocking GET; the body comes back untouched. Non-2xx statuses and
/// timeouts are fetch errors, nothing is retried.
pub fn fetch_text(url: &str, timeout: Duration) -> Result<String> {
    let fetch_err = |source| StatsError::Fetch { url: url.to_string(), source };

    vprintln!("remote: GET {} (timeout {}s)", url, timeout.as_secs());
    let t0 = Instant::now();
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(fetch_err)?;
    let resp = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(fetch_err)?;
    let text = resp.text().map_err(fetch_err)?;
    vprintln!("remote: fetched in {:.3}s ({} bytes)", t0.elapsed().as_secs_f64(), text.len());
    Ok(text)
}
