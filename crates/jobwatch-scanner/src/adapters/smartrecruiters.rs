//! SmartRecruiters postings API, paged by offset.
//!
//! `{"content": [{id, name, location: {city, region, country}}]}`; the public
//! posting URL is built from the slug and posting id.

use super::{unexpected_shape, JobCollector, Paging, ScrapeContext};
use crate::error::Result;
use crate::http::Request;
use crate::parser::{array_at, normalize_location, str_field};
use crate::url_builder::build_url;
use jobwatch_core::{CompanySlug, JobRecord};
use serde_json::Value;
use tracing::debug;

const VENDOR: &str = "SmartRecruiters";
const PAGING: Paging = Paging {
    page_size: 100,
    max_pages: 50,
};

pub(super) async fn fetch(
    ctx: &ScrapeContext<'_>,
    out: &mut JobCollector<'_>,
    slug: &CompanySlug,
) -> Result<()> {
    let url = build_url(&ctx.endpoints.smartrecruiters, &[("slug", slug.as_str())])?;

    for page in 0..PAGING.max_pages {
        let request = Request::get(url.clone())
            .query("limit", PAGING.page_size)
            .query("offset", page * PAGING.page_size);
        let body: Value = ctx.http.fetch_json(&request).await?;
        let postings = array_at(&body, &["content"])
            .ok_or_else(|| unexpected_shape(VENDOR, "`content` is not a list"))?;

        for posting in postings {
            let id = str_field(posting, "id");
            if id.is_empty() {
                continue;
            }
            let posting_url = build_url(
                &ctx.endpoints.smartrecruiters_posting,
                &[("slug", slug.as_str()), ("id", id.as_str())],
            )?;
            out.offer(
                JobRecord::new(str_field(posting, "name"), posting_url)
                    .with_location(posting.get("location").and_then(normalize_location)),
            );
        }

        if PAGING.is_last_page(postings.len()) {
            debug!(vendor = VENDOR, pages = page + 1, "pagination finished");
            break;
        }
    }
    Ok(())
}
