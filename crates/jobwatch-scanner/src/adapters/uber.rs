//! Uber careers search API.
//!
//! A POST with a page number and a fixed engineering query; the response
//! nests results under `data.results`.

use super::{unexpected_shape, JobCollector, Paging, ScrapeContext};
use crate::error::Result;
use crate::http::Request;
use crate::parser::{array_at, normalize_location, str_field};
use crate::url_builder::build_url;
use jobwatch_core::JobRecord;
use serde_json::{json, Value};
use tracing::debug;

const VENDOR: &str = "Uber";
const PAGING: Paging = Paging {
    page_size: 50,
    max_pages: 20,
};

pub(super) async fn fetch(ctx: &ScrapeContext<'_>, out: &mut JobCollector<'_>) -> Result<()> {
    for page in 0..PAGING.max_pages {
        let body = json!({
            "params": {
                "department": ["Engineering"],
                "query": "software engineer",
            },
            "page": page,
            "limit": PAGING.page_size,
        });
        let request = Request::post_json(ctx.endpoints.uber.as_str(), &body)?
            .query("localeCode", "en")
            .header("x-csrf-token", "x");
        let response: Value = ctx.http.fetch_json(&request).await?;
        let results = array_at(&response, &["data", "results"])
            .ok_or_else(|| unexpected_shape(VENDOR, "`data.results` is not a list"))?;

        for job in results {
            let id = str_field(job, "id");
            if id.is_empty() {
                continue;
            }
            let url = build_url(&ctx.endpoints.uber_posting, &[("id", id.as_str())])?;
            out.offer(
                JobRecord::new(str_field(job, "title"), url)
                    .with_location(job.get("location").and_then(normalize_location)),
            );
        }

        if PAGING.is_last_page(results.len()) {
            debug!(vendor = VENDOR, pages = page + 1, "pagination finished");
            break;
        }
    }
    Ok(())
}
