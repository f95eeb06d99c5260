//! Jobvite hosted job list (HTML table).

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
    let url = build_url(&ctx.endpoints.jobvite, &[("slug", slug.as_str())])?;
    let body = ctx.http.fetch_text(&Request::get(url.clone())).await?;

    for job in parse_rows(&body, &url)? {
        out.offer(job);
    }
    Ok(())
}

fn parse_rows(body: &str, page_url: &str) -> Result<Vec<JobRecord>> {
    let base = Url::parse(page_url).map_err(|e| ScanError::InvalidUrl {
        url: page_url.to_string(),
        reason: e.to_string(),
    })?;
    let row_sel = selector("tr");
    let name_sel = selector("td.jv-job-list-name a");
    let location_sel = selector("td.jv-job-list-location");

    let document = parse_html(body);
    let jobs = document
        .select(&row_sel)
        .filter_map(|row| {
            let title = select_text(&row, &name_sel)?;
            let url = select_link(&row, &name_sel, &base)?;
            Some(JobRecord::new(title, url).with_location(select_text(&row, &location_sel)))
        })
        .collect();
    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rows_resolves_relative_links() {
        let html = r#"
            <table class="jv-job-list">
              <tr>
                <td class="jv-job-list-name"><a href="/acme/job/oAbC1">Software Engineer</a></td>
                <td class="jv-job-list-location">
                    Boston, Massachusetts
                </td>
              </tr>
              <tr><th>Header row</th></tr>
            </table>
        "#;

        let jobs = parse_rows(html, "https://jobs.jobvite.com/acme/jobs").expect("parse");
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].url, "https://jobs.jobvite.com/acme/job/oAbC1");
        assert_eq!(jobs[0].location.as_deref(), Some("Boston, Massachusetts"));
    }
}
