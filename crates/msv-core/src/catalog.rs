//! Catalog entity model: manifests, links, and on-disk JSON parsing.
//!
//! A catalog lists every mod the distribution knows about; each manifest
//! carries either one cross-platform link or a group of per-OS links, and
//! every link declares the SHA-256 the downloaded artifact must hash to.

use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error raised while loading or expanding a catalog. All variants are fatal:
/// the run aborts before any network activity.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Manifest has neither a single link nor any platform links.
    #[error("no links found for manifest '{name}'")]
    NoLinks { name: String },
}

/// One download location plus the hex SHA-256 its content must hash to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Link {
    pub url: String,
    pub sha256: String,
}

/// Per-OS link slots. A missing slot means no build for that platform.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlatformLinks {
    pub linux: Option<Link>,
    pub mac: Option<Link>,
    pub windows: Option<Link>,
}

/// One named catalog entry.
///
/// When both `link` and `links` are populated, `link` wins; `checks` never
/// expands the platform group in that case.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    pub name: String,
    pub link: Option<Link>,
    pub links: Option<PlatformLinks>,
}

/// A whole catalog document.
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    pub manifests: Vec<Manifest>,
}

/// Platform slot a link-check came from; `None` platform means the
/// cross-platform link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    Mac,
    Windows,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Linux => write!(f, "linux"),
            Platform::Mac => write!(f, "mac"),
            Platform::Windows => write!(f, "windows"),
        }
    }
}

/// One unit of verification work: a URL and the digest it must hash to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCheck {
    pub name: String,
    pub platform: Option<Platform>,
    pub url: String,
    pub sha256: String,
}

impl Link {
    fn normalize(&mut self) {
        self.url = self.url.trim().to_string();
    }
}

impl Manifest {
    /// Trims incidental whitespace (e.g. line breaks introduced by catalog
    /// tooling) from every present link URL. Idempotent; digests are left alone. Must run on both catalogs
    /// before any comparison, so formatting noise never reads as a change.
    pub fn normalize(&mut self) {
        if let Some(link) = &mut self.link {
            link.normalize();
        }
        if let Some(links) = &mut self.links {
            for slot in [&mut links.linux, &mut links.mac, &mut links.windows] {
                if let Some(link) = slot {
                    link.normalize();
                }
            }
        }
    }

    /// Expands this manifest into its link-checks: the single link if present,
    /// otherwise one check per populated platform slot.
    pub fn checks(&self) -> Result<Vec<LinkCheck>, CatalogError> {
        if let Some(link) = &self.link {
            return Ok(vec![LinkCheck {
                name: self.name.clone(),
                platform: None,
                url: link.url.clone(),
                sha256: link.sha256.clone(),
            }]);
        }

        let mut checks = Vec::new();
        if let Some(links) = &self.links {
            let slots = [
                (Platform::Linux, &links.linux),
                (Platform::Mac, &links.mac),
                (Platform::Windows, &links.windows),
            ];
            for (platform, slot) in slots {
                if let Some(link) = slot {
                    checks.push(LinkCheck {
                        name: self.name.clone(),
                        platform: Some(platform),
                        url: link.url.clone(),
                        sha256: link.sha256.clone(),
                    });
                }
            }
        }

        if checks.is_empty() {
            return Err(CatalogError::NoLinks {
                name: self.name.clone(),
            });
        }
        Ok(checks)
    }
}

impl Catalog {
    /// Loads a catalog document from `path`. Unreadable or malformed input is
    /// fatal for the whole run.
    pub fn load(path: &Path) -> Result<Catalog, CatalogError> {
        let data = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog: Catalog =
            serde_json::from_str(&data).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(catalog)
    }

    pub fn normalize(&mut self) {
        for manifest in &mut self.manifests {
            manifest.normalize();
        }
    }
}
