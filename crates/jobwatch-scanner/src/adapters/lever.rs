//! Lever hosted job board (HTML).
//!
//! Each posting is a `div.posting` with the title in `h5`, the link in the
//! first anchor and the location in `span.sort-by-location`.

use super::{JobCollector, ScrapeContext};
use crate::error::{Result, ScanError};
use crate::http::Request;
use crate::parser::{parse_html, select_link, select_text, selector};
use crate::url_builder::build_url;
use jobwatch_core::{CompanySlug, JobRecord};
use url::Url;

pub(super) async fn fetch(
    ctx: &ScrapeContext<'_>,
    out: &mut JobCollector<'_>,
    slug: &CompanySlug,
) -> Result<()> {
    let url = build_url(&ctx.endpoints.lever, &[("slug", slug.as_str())])?;
    let body = ctx.http.fetch_text(&Request::get(url.clone())).await?;

    for job in parse_postings(&body, &url)? {
        out.offer(job);
    }
    Ok(())
}

fn parse_postings(body: &str, page_url: &str) -> Result<Vec<JobRecord>> {
    let base = Url::parse(page_url).map_err(|e| ScanError::InvalidUrl {
        url: page_url.to_string(),
        reason: e.to_string(),
    })?;
    let posting_sel = selector("div.posting");
    let title_sel = selector("h5");
    let link_sel = selector("a");
    let location_sel = selector("span.sort-by-location");

    let document = parse_html(body);
    let jobs = document
        .select(&posting_sel)
        .filter_map(|el| {
            let title = select_text(&el, &title_sel)?;
            let url = select_link(&el, &link_sel, &base)?;
            Some(JobRecord::new(title, url).with_location(select_text(&el, &location_sel)))
        })
        .collect();
    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_postings() {
        let html = r#"
            <div class="postings-group">
              <div class="posting" data-qa-posting-id="abc">
                <a class="posting-title" href="https://jobs.lever.co/acme/abc">
                  <h5 data-qa="posting-name">Backend Engineer</h5>
                  <div class="posting-categories">
                    <span class="sort-by-location posting-category">Austin, TX</span>
                  </div>
                </a>
              </div>
              <div class="posting">
                <a class="posting-title" href="/acme/def"><h5>Platform Engineer</h5></a>
              </div>
              <div class="posting"><h5>No link</h5></div>
            </div>
        "#;

        let jobs = parse_postings(html, "https://jobs.lever.co/acme").expect("parse");
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].title, "Backend Engineer");
        assert_eq!(jobs[0].url, "https://jobs.lever.co/acme/abc");
        assert_eq!(jobs[0].location.as_deref(), Some("Austin, TX"));
        assert_eq!(jobs[1].url, "https://jobs.lever.co/acme/def");
        assert_eq!(jobs[1].location, None);
    }
}
