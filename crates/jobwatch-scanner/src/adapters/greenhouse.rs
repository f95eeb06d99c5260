//! Greenhouse job board API: `{"jobs": [{title, absolute_url, location: {name}}]}`.

use super::{unexpected_shape, JobCollector, ScrapeContext};
use crate::error::Result;
use crate::http::Request;
use crate::parser::{array_at, normalize_location, str_field};
use crate::url_builder::build_url;
use jobwatch_core::{CompanySlug, JobRecord};
use serde_json::Value;

const VENDOR: &str = "Greenhouse";

pub(super) async fn fetch(
    ctx: &ScrapeContext<'_>,
    out: &mut JobCollector<'_>,
    slug: &CompanySlug,
) -> Result<()> {
    let url = build_url(&ctx.endpoints.greenhouse, &[("slug", slug.as_str())])?;
    let body: Value = ctx.http.fetch_json(&Request::get(url)).await?;

    let jobs = array_at(&body, &["jobs"])
        .ok_or_else(|| unexpected_shape(VENDOR, "`jobs` is not a list"))?;
    for job in jobs {
        out.offer(
            JobRecord::new(str_field(job, "title"), str_field(job, "absolute_url"))
                .with_location(job.get("location").and_then(normalize_location)),
        );
    }
    Ok(())
}
