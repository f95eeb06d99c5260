//! Netflix careers API, ten positions per page.

use super::{unexpected_shape, JobCollector, Paging, ScrapeContext};
use crate::error::Result;
use crate::http::Request;
use crate::parser::{array_at, normalize_location, str_field};
use jobwatch_core::JobRecord;
use serde_json::Value;
use tracing::debug;

const VENDOR: &str = "Netflix";
const PAGING: Paging = Paging {
    page_size: 10,
    max_pages: 100,
};

pub(super) async fn fetch(ctx: &ScrapeContext<'_>, out: &mut JobCollector<'_>) -> Result<()> {
    for page in 0..PAGING.max_pages {
        let request = Request::get(ctx.endpoints.netflix.as_str())
            .query("domain", "netflix.com")
            .query("start", page * PAGING.page_size)
            .query("num", PAGING.page_size)
            .query("query", "Software Engineer")
            .query("sort_by", "relevance");
        let body: Value = ctx.http.fetch_json(&request).await?;
        let positions = array_at(&body, &["positions"])
            .ok_or_else(|| unexpected_shape(VENDOR, "`positions` is not a list"))?;

        for position in positions {
            let location = position
                .get("location")
                .and_then(normalize_location)
                .or_else(|| position.get("locations").and_then(normalize_location));
            out.offer(
                JobRecord::new(
                    str_field(position, "name"),
                    str_field(position, "canonicalPositionUrl"),
                )
                .with_location(location),
            );
        }

        if PAGING.is_last_page(positions.len()) {
            debug!(vendor = VENDOR, pages = page + 1, "pagination finished");
            break;
        }
    }
    Ok(())
}
