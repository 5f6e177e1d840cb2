//! Concurrent link verification and fan-in aggregation.
//!
//! Every selected manifest is expanded into its link-checks up front, then one
//! task per check is spawned into a `JoinSet`. Draining the set yields exactly
//! one outcome per dispatched check, so the aggregate can neither hang on a
//! missing send nor drop a result.

use anyhow::Result;
use std::fmt;
use tokio::task::JoinSet;

use crate::catalog::{CatalogError, LinkCheck, Manifest};
use crate::checksum;
use crate::fetch::{self, FetchOptions};

/// Terminal outcome of one link-check. No retries: whatever happens on the
/// single attempt stands for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkCheckOutcome {
    /// Fetched body hashed to the declared digest.
    Verified,
    /// Fetch succeeded but the body hashed to something else.
    Mismatch { expected: String, actual: String },
    /// Transport-level failure (DNS, connect, timeout, ...).
    FetchError { cause: String },
    /// Server answered with a non-2xx status.
    StatusError { code: u32 },
}

impl LinkCheckOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, LinkCheckOutcome::Verified)
    }
}

impl fmt::Display for LinkCheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkCheckOutcome::Verified => write!(f, "verified"),
            LinkCheckOutcome::Mismatch { expected, actual } => {
                write!(
                    f,
                    "hash mismatch: expected value from modlinks: {}, actual value: {}",
                    expected, actual
                )
            }
            LinkCheckOutcome::FetchError { cause } => write!(f, "fetch failed: {}", cause),
            LinkCheckOutcome::StatusError { code } => write!(f, "invalid status code {}", code),
        }
    }
}

/// One delivered outcome, tied back to the check that produced it.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub check: LinkCheck,
    pub outcome: LinkCheckOutcome,
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.check.platform {
            Some(platform) => write!(
                f,
                "{} ({}) in link {}: {}",
                self.check.name, platform, self.check.url, self.outcome
            ),
            None => write!(
                f,
                "{} in link {}: {}",
                self.check.name, self.check.url, self.outcome
            ),
        }
    }
}

/// Aggregate verdict over every dispatched link-check.
#[derive(Debug)]
pub enum Verdict {
    AllPassed(usize),
    SomeFailed {
        checked: usize,
        failures: Vec<CheckResult>,
    },
}

impl Verdict {
    /// Number of link-checks dispatched (and received) this run.
    pub fn checked(&self) -> usize {
        match self {
            Verdict::AllPassed(n) => *n,
            Verdict::SomeFailed { checked, .. } => *checked,
        }
    }

    pub fn all_passed(&self) -> bool {
        matches!(self, Verdict::AllPassed(_))
    }
}

/// Expands every selected manifest into its link-checks. A manifest with no
/// links at all fails the whole run here, before any task is spawned.
pub fn expand_checks(selected: &[Manifest]) -> Result<Vec<LinkCheck>, CatalogError> {
    let mut checks = Vec::new();
    for manifest in selected {
        checks.extend(manifest.checks()?);
    }
    Ok(checks)
}

/// Runs one link-check to completion. Every exit path returns exactly one
/// outcome; nothing here aborts sibling checks.
pub async fn check_link(check: LinkCheck, opts: FetchOptions) -> CheckResult {
    let url = check.url.trim().to_string();

    let fetched = tokio::task::spawn_blocking(move || fetch::fetch(&url, &opts)).await;

    let outcome = match fetched {
        Err(join_err) => LinkCheckOutcome::FetchError {
            cause: format!("check task join: {}", join_err),
        },
        Ok(Err(e)) => LinkCheckOutcome::FetchError {
            cause: e.to_string(),
        },
        Ok(Ok(response)) if !(200..300).contains(&response.status) => {
            LinkCheckOutcome::StatusError {
                code: response.status,
            }
        }
        Ok(Ok(response)) => {
            let actual = checksum::sha256_bytes(&response.body);
            if checksum::digest_matches(&check.sha256, &actual) {
                LinkCheckOutcome::Verified
            } else {
                LinkCheckOutcome::Mismatch {
                    expected: check.sha256.clone(),
                    actual,
                }
            }
        }
    };

    CheckResult { check, outcome }
}

/// Dispatches one task per link-check across all selected manifests and waits
/// for every outcome. Outcomes arrive in completion order; only the count
/// matters. Returns `Err` only for fatal problems (a no-link manifest, or a
/// panicked check task).
pub async fn run_checks(selected: &[Manifest], opts: FetchOptions) -> Result<Verdict> {
    let checks = expand_checks(selected)?;
    let dispatched = checks.len();

    let mut join_set = JoinSet::new();
    for check in checks {
        join_set.spawn(check_link(check, opts));
    }

    let mut received = 0usize;
    let mut failures = Vec::new();
    while let Some(res) = join_set.join_next().await {
        let result = res.map_err(|e| anyhow::anyhow!("check task join: {}", e))?;
        received += 1;
        if result.outcome.is_verified() {
            tracing::debug!(name = %result.check.name, url = %result.check.url, "verified");
        } else {
            tracing::warn!(name = %result.check.name, url = %result.check.url, outcome = %result.outcome, "check failed");
            failures.push(result);
        }
    }

    if received != dispatched {
        anyhow::bail!(
            "outcome count mismatch: dispatched {} check(s), received {}",
            dispatched,
            received
        );
    }

    if failures.is_empty() {
        Ok(Verdict::AllPassed(dispatched))
    } else {
        Ok(Verdict::SomeFailed {
            checked: dispatched,
            failures,
        })
    }
}
