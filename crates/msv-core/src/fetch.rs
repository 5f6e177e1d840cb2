//! HTTP GET of a full artifact body.
//!
//! Uses the curl crate (libcurl). Follows redirects and applies the timeouts
//! from `FetchOptions`. Runs in the current thread; call from
//! `spawn_blocking` if used from async code.

use std::time::Duration;

/// Transfer limits applied to every fetch. A bounded transfer keeps one
/// stuck mirror from stalling the whole run.
#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub max_redirects: u32,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(300),
            max_redirects: 10,
        }
    }
}

/// Response from a completed transfer. Any HTTP status lands here; only
/// transport-level failures return `Err`.
#[derive(Debug)]
pub struct FetchResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

/// Downloads `url` into memory with a single GET.
pub fn fetch(url: &str, opts: &FetchOptions) -> Result<FetchResponse, curl::Error> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(opts.max_redirects)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.timeout(opts.timeout)?;
    easy.fail_on_error(false)?;

    let mut body = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    Ok(FetchResponse { status, body })
}
