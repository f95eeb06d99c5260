//! Endpoint template expansion.

use crate::error::{Result, ScanError};
use url::Url;

/// Replace `{name}` placeholders in an endpoint template.
///
/// Values are percent-encoded. The result must be an absolute URL with no
/// placeholder left over.
pub fn build_url(template: &str, values: &[(&str, &str)]) -> Result<String> {
    let mut url = template.to_string();
    for (name, value) in values {
        url = url.replace(&format!("{{{name}}}"), &urlencoding::encode(value));
    }

    if let Some(start) = url.find('{') {
        let end = url[start..].find('}').map_or(url.len(), |e| start + e + 1);
        return Err(ScanError::InvalidUrl {
            reason: format!("unfilled placeholder {}", &url[start..end]),
            url,
        });
    }

    Url::parse(&url).map_err(|e| ScanError::InvalidUrl {
        url: url.clone(),
        reason: e.to_string(),
    })?;
    Ok(url)
}
