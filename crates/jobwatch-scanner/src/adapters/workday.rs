//! Workday career sites.
//!
//! Both host families expose the same CXS search endpoint:
//! `POST {host}/wday/cxs/{tenant}/{site}/jobs` with an offset/limit body,
//! answering `{"jobPostings": [{title, externalPath, locationsText}]}`.
//! Only the public posting URL differs between them.

use super::{unexpected_shape, JobCollector, Paging, ScrapeContext};
use crate::error::Result;
use crate::http::Request;
use crate::parser::{array_at, normalize_location, str_field};
use crate::url_builder::build_url;
use jobwatch_core::{CompanySlug, JobRecord};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

const PAGING: Paging = Paging {
    page_size: 20,
    max_pages: 150,
};

/// Which Workday host family serves the career site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkdayHost {
    /// `<tenant>.wd<N>.myworkdayjobs.com/<site>`
    Jobs,
    /// `wd<N>.myworkdaysite.com/recruiting/<tenant>/<site>`
    Site,
}

impl WorkdayHost {
    pub(crate) fn vendor_name(self) -> &'static str {
        match self {
            Self::Jobs => "Workday",
            Self::Site => "Workday Site",
        }
    }
}

/// A Workday career site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkdayTarget {
    /// Host family
    pub host: WorkdayHost,
    /// Workday tenant
    pub tenant: CompanySlug,
    /// Datacenter number
    pub datacenter: u16,
    /// Career site path segment
    pub site: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchBody {
    applied_facets: serde_json::Map<String, Value>,
    limit: usize,
    offset: usize,
    search_text: &'static str,
}

impl WorkdayTarget {
    fn base_url(&self, ctx: &ScrapeContext<'_>) -> Result<String> {
        let datacenter = self.datacenter.to_string();
        let values = [("tenant", self.tenant.as_str()), ("datacenter", datacenter.as_str())];
        let base = match self.host {
            WorkdayHost::Jobs => build_url(&ctx.endpoints.workday_jobs, &values)?,
            WorkdayHost::Site => build_url(&ctx.endpoints.workday_site, &values)?,
        };
        Ok(base.trim_end_matches('/').to_string())
    }

    fn posting_url(&self, base: &str, external_path: &str) -> String {
        let site = urlencoding::encode(&self.site);
        match self.host {
            WorkdayHost::Jobs => format!("{base}/en-US/{site}{external_path}"),
            WorkdayHost::Site => format!(
                "{base}/en-US/recruiting/{}/{site}{external_path}",
                self.tenant.url_encoded()
            ),
        }
    }
}

pub(super) async fn fetch(
    ctx: &ScrapeContext<'_>,
    out: &mut JobCollector<'_>,
    target: &WorkdayTarget,
) -> Result<()> {
    let vendor = target.host.vendor_name();
    let base = target.base_url(ctx)?;
    let search_url = format!(
        "{base}/wday/cxs/{}/{}/jobs",
        target.tenant.url_encoded(),
        urlencoding::encode(&target.site)
    );

    for page in 0..PAGING.max_pages {
        let body = SearchBody {
            applied_facets: serde_json::Map::new(),
            limit: PAGING.page_size,
            offset: page * PAGING.page_size,
            search_text: "",
        };
        let response: Value = ctx
            .http
            .fetch_json(&Request::post_json(search_url.as_str(), &body)?)
            .await?;
        let postings = array_at(&response, &["jobPostings"])
            .ok_or_else(|| unexpected_shape(vendor, "`jobPostings` is not a list"))?;

        for posting in postings {
            let path = str_field(posting, "externalPath");
            if path.is_empty() {
                continue;
            }
            out.offer(
                JobRecord::new(str_field(posting, "title"), target.posting_url(&base, &path))
                    .with_location(posting.get("locationsText").and_then(normalize_location)),
            );
        }

        if PAGING.is_last_page(postings.len()) {
            debug!(vendor, pages = page + 1, "pagination finished");
            break;
        }
    }
    Ok(())
}
