//! Spotify careers search API, engineering category only.

use super::{unexpected_shape, JobCollector, ScrapeContext};
use crate::error::Result;
use crate::http::Request;
use crate::parser::{array_at, normalize_location, str_field};
use crate::url_builder::build_url;
use jobwatch_core::JobRecord;
use serde_json::Value;

const VENDOR: &str = "Spotify";

pub(super) async fn fetch(ctx: &ScrapeContext<'_>, out: &mut JobCollector<'_>) -> Result<()> {
    let request = Request::get(ctx.endpoints.spotify.as_str()).query("c", "engineering");
    let body: Value = ctx.http.fetch_json(&request).await?;

    let jobs = array_at(&body, &["result"])
        .ok_or_else(|| unexpected_shape(VENDOR, "`result` is not a list"))?;
    for job in jobs {
        let id = str_field(job, "id");
        if id.is_empty() {
            continue;
        }
        let url = build_url(&ctx.endpoints.spotify_posting, &[("id", id.as_str())])?;
        out.offer(
            JobRecord::new(str_field(job, "text"), url)
                .with_location(job.get("locations").and_then(normalize_location)),
        );
    }
    Ok(())
}
