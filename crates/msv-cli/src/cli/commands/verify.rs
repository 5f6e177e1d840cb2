//! `msv verify` – diff two catalogs and check every selected link.

use anyhow::Result;
use msv_core::catalog::Catalog;
use msv_core::config::MsvConfig;
use msv_core::diff::select_for_verification;
use msv_core::verify::{run_checks, Verdict};
use std::path::Path;
use std::time::Instant;

pub async fn run_verify(
    baseline_path: &Path,
    incoming_path: &Path,
    cfg: &MsvConfig,
    annotate: bool,
) -> Result<()> {
    let start = Instant::now();

    let baseline = Catalog::load(baseline_path)?;
    let incoming = Catalog::load(incoming_path)?;

    let selected = select_for_verification(baseline, incoming);
    let mod_count = selected.len();
    tracing::info!(selected = mod_count, "catalogs diffed");

    for manifest in &selected {
        println!("Checking '{}'", manifest.name);
    }

    let verdict = run_checks(&selected, cfg.fetch_options()).await?;

    if let Verdict::SomeFailed { failures, .. } = &verdict {
        for failure in failures {
            println!("{}", failure);
            if annotate {
                println!("::error title=Check::{}", failure);
            }
        }
    }

    println!(
        "Checked {} mods in {}ms",
        mod_count,
        start.elapsed().as_millis()
    );

    match verdict {
        Verdict::AllPassed(_) => Ok(()),
        Verdict::SomeFailed { checked, failures } => {
            anyhow::bail!("{} of {} check(s) failed", failures.len(), checked)
        }
    }
}
