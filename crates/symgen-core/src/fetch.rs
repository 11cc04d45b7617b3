//! Parallel SVG fetcher: bounded fan-out of blocking GETs for one family.
//!
//! Keeps up to `concurrency` downloads in flight; when one finishes, the next
//! queued request is started until the queue is empty. Results come back in
//! submission order. A failed icon is recorded and never stops its siblings.

use crate::error::{GenerateError, HttpError};
use crate::http::HttpClient;
use crate::resolve::FetchRequest;
use crate::svg;
use tokio::task::JoinSet;

/// A generated constant: identifier plus escaped inner SVG markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constant {
    pub name: String,
    pub body: String,
}

/// An icon that could not be fetched. No retry is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub name: String,
    pub url: String,
    pub reason: String,
}

/// Outcome of fetching every request of one family.
#[derive(Debug, Clone, Default)]
pub struct FamilyFetch {
    /// Successful icons, in submission order.
    pub constants: Vec<Constant>,
    /// Failed icons, in submission order.
    pub failures: Vec<FetchFailure>,
}

impl FamilyFetch {
    pub fn requested(&self) -> usize {
        self.constants.len() + self.failures.len()
    }
}

/// GETs one SVG and normalizes it.
fn fetch_one(client: &HttpClient, url: &str) -> Result<String, HttpError> {
    let raw = client.get_text(url)?;
    if !svg::is_well_formed_wrapper(&raw) {
        tracing::warn!(url, "unexpected SVG wrapper; generated markup may be garbled");
    }
    Ok(svg::cleanup_svg(&raw))
}

/// Fetches all `requests` with at most `concurrency` GETs in flight.
///
/// Only a panicking worker is an error; per-icon failures land in
/// [`FamilyFetch::failures`].
pub async fn fetch_family(
    client: &HttpClient,
    requests: &[FetchRequest],
    concurrency: usize,
) -> Result<FamilyFetch, GenerateError> {
    let max_concurrent = concurrency.max(1);
    let mut slots: Vec<Option<Result<String, HttpError>>> =
        (0..requests.len()).map(|_| None).collect();
    let mut queue = requests.iter().enumerate();
    let mut join_set = JoinSet::new();

    loop {
        while join_set.len() < max_concurrent {
            let Some((idx, request)) = queue.next() else {
                break;
            };
            let client = client.clone();
            let url = request.url.clone();
            join_set.spawn_blocking(move || (idx, fetch_one(&client, &url)));
        }

        let Some(res) = join_set.join_next().await else {
            break;
        };
        let (idx, outcome) = res.map_err(|e| GenerateError::Join(e.to_string()))?;
        slots[idx] = Some(outcome);
    }

    let mut family = FamilyFetch::default();
    for (request, slot) in requests.iter().zip(slots) {
        match slot {
            Some(Ok(body)) => family.constants.push(Constant {
                name: request.name.clone(),
                body,
            }),
            Some(Err(e)) => {
                tracing::warn!(icon = %request.name, url = %request.url, "fetch failed: {}", e);
                family.failures.push(FetchFailure {
                    name: request.name.clone(),
                    url: request.url.clone(),
                    reason: e.to_string(),
                });
            }
            None => {}
        }
    }

    Ok(family)
}
