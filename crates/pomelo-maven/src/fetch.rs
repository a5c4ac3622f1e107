//! Remote POM fetching with retries, cancellation, and sidecar checksums.

use std::time::Duration;

use md5::Md5;
use reqwest::Client;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use tokio_util::sync::CancellationToken;

use pomelo_core::coordinate::Coordinate;
use pomelo_util::errors::PomeloError;

use crate::repository::MavenRepository;

const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Build a shared reqwest client for POM fetches.
pub fn build_client(timeout: Duration) -> miette::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("pomelo/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| {
            PomeloError::Network {
                message: format!("Failed to create HTTP client: {e}"),
            }
            .into()
        })
}

/// Fetch the raw POM bytes for a coordinate from a repository.
///
/// Returns `Ok(None)` for 404 (artifact not present in this repo),
/// `Err(Network)` for transport failures after exhausting `retries`
/// attempts, and on cancellation. Fetched bytes are verified against the
/// repository's checksum sidecar when one exists; a corrupt POM is
/// reported as a failed fetch.
pub async fn fetch_pom_bytes(
    client: &Client,
    repo: &MavenRepository,
    coord: &Coordinate,
    retries: u32,
    cancel: &CancellationToken,
) -> miette::Result<Option<Vec<u8>>> {
    let url = repo.pom_url(coord);

    let bytes = tokio::select! {
        _ = cancel.cancelled() => {
            return Err(PomeloError::Network {
                message: format!("fetch of {url} cancelled"),
            }
            .into());
        }
        result = download_bytes(client, &url, retries) => result?,
    };

    let Some(bytes) = bytes else {
        return Ok(None);
    };

    match fetch_sidecar_digest(client, &url, &bytes).await? {
        SidecarCheck::Match(algo) => {
            tracing::trace!("{} sidecar ok for POM {coord}", algo.extension());
        }
        SidecarCheck::Mismatch {
            algo,
            expected,
            actual,
        } => {
            return Err(PomeloError::Network {
                message: format!(
                    "corrupt POM for {coord}: {} sidecar says {expected}, fetched data hashes to {actual}",
                    algo.extension()
                ),
            }
            .into());
        }
        SidecarCheck::NoSidecar => {
            tracing::debug!("no checksum sidecar published for POM {coord}");
        }
    }

    Ok(Some(bytes))
}

/// Checksum sidecar algorithms published alongside Maven artifacts,
/// strongest first. Repositories publish any subset of these next to the
/// POM as `<pom-url>.<ext>` files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SidecarAlgo {
    Sha256,
    Sha1,
    Md5,
}

impl SidecarAlgo {
    const ALL: [SidecarAlgo; 3] = [Self::Sha256, Self::Sha1, Self::Md5];

    fn extension(self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha1 => "sha1",
            Self::Md5 => "md5",
        }
    }

    fn digest(self, data: &[u8]) -> String {
        match self {
            Self::Sha256 => format!("{:x}", Sha256::digest(data)),
            Self::Sha1 => format!("{:x}", Sha1::digest(data)),
            Self::Md5 => format!("{:x}", Md5::digest(data)),
        }
    }
}

/// Outcome of checking fetched bytes against repository sidecars.
enum SidecarCheck {
    Match(SidecarAlgo),
    Mismatch {
        algo: SidecarAlgo,
        expected: String,
        actual: String,
    },
    NoSidecar,
}

/// Check fetched bytes against the first sidecar the repository has.
///
/// Only the strongest published algorithm is consulted; transport errors
/// while probing for sidecars bubble up to the caller.
async fn fetch_sidecar_digest(
    client: &Client,
    pom_url: &str,
    data: &[u8],
) -> miette::Result<SidecarCheck> {
    for algo in SidecarAlgo::ALL {
        let sidecar_url = format!("{pom_url}.{}", algo.extension());
        let Some(content) = download_text(client, &sidecar_url).await? else {
            continue;
        };
        let expected = sidecar_hash(&content);
        if expected.is_empty() {
            tracing::debug!("empty sidecar at {sidecar_url}, skipping");
            continue;
        }
        let actual = algo.digest(data);
        if expected == actual {
            return Ok(SidecarCheck::Match(algo));
        }
        return Ok(SidecarCheck::Mismatch {
            algo,
            expected,
            actual,
        });
    }
    Ok(SidecarCheck::NoSidecar)
}

/// Pull the hex hash out of sidecar content.
///
/// Sidecar files contain either just the hash or `hash  filename`; some
/// tools write uppercase hex, so the result is normalized to lowercase.
fn sidecar_hash(content: &str) -> String {
    content
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_ascii_lowercase()
}

/// Download raw bytes from a URL with retries.
///
/// Returns `Ok(None)` for 404. Timeouts, connect failures, and 5xx
/// responses are retried with linear backoff.
pub async fn download_bytes(
    client: &Client,
    url: &str,
    retries: u32,
) -> miette::Result<Option<Vec<u8>>> {
    let attempts = retries.max(1);
    let mut last_err = String::new();

    for attempt in 0..attempts {
        if attempt > 0 {
            tokio::time::sleep(RETRY_DELAY * attempt).await;
        }

        match client.get(url).send().await {
            Ok(resp) => {
                let status = resp.status();
                if status == reqwest::StatusCode::NOT_FOUND {
                    return Ok(None);
                }
                if status.is_server_error() {
                    last_err = format!("HTTP {status} from {url}");
                    continue;
                }
                if !status.is_success() {
                    return Err(PomeloError::Network {
                        message: format!("HTTP {status} fetching {url}"),
                    }
                    .into());
                }

                let bytes = resp.bytes().await.map_err(|e| PomeloError::Network {
                    message: format!("Failed to read response from {url}: {e}"),
                })?;
                return Ok(Some(bytes.to_vec()));
            }
            Err(e) if e.is_timeout() || e.is_connect() => {
                last_err = format!("{e}");
                continue;
            }
            Err(e) => {
                return Err(PomeloError::Network {
                    message: format!("Request to {url} failed: {e}"),
                }
                .into());
            }
        }
    }

    Err(PomeloError::Network {
        message: format!("Failed after {attempts} attempts for {url}: {last_err}"),
    }
    .into())
}

/// Download a small text file (checksum sidecar), without retries.
async fn download_text(client: &Client, url: &str) -> miette::Result<Option<String>> {
    match download_bytes(client, url, 1).await? {
        Some(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).to_string())),
        None => Ok(None),
    }
}
