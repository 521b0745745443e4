use crate::error::{ResolveError, Result};
use url::Url;

pub const FALLBACK_SERVICE_BASE: &str = "https://api.faviconkit.com";
pub const DEFAULT_FALLBACK_SIZE: u32 = 256;
pub const COMPACT_FALLBACK_SIZE: u32 = 64;

const SCHEME_SEPARATOR: &str = "://";

/// Scheme and host of the page being resolved, derived once from the input
/// URL and threaded through normalization and fallback construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOrigin {
    scheme: String,
    host: String,
}

impl PageOrigin {
    /// Derive the origin from a page URL. Fails with `InvalidUrl` when the
    /// input has no parseable scheme and host.
    pub fn parse(page_url: &str) -> Result<Self> {
        let parsed = Url::parse(page_url)
            .map_err(|e| ResolveError::InvalidUrl(format!("Invalid URL: {}", e)))?;

        let host = parsed
            .host_str()
            .ok_or_else(|| ResolveError::InvalidUrl(format!("URL has no host: {}", page_url)))?;

        let host = match parsed.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        Ok(Self {
            scheme: parsed.scheme().to_string(),
            host,
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Turn an icon `href` into an absolute URI against this origin.
    ///
    /// An href that already carries a scheme separator passes through
    /// unchanged; anything else is prefixed with `scheme://host`. An absent
    /// href degenerates to the bare origin.
    pub fn absolutize(&self, href: Option<&str>) -> String {
        match href {
            Some(href) if href.contains(SCHEME_SEPARATOR) => href.to_string(),
            Some(href) => format!("{}{}{}{}", self.scheme, SCHEME_SEPARATOR, self.host, href),
            None => format!("{}{}{}", self.scheme, SCHEME_SEPARATOR, self.host),
        }
    }

    /// External favicon service URI for this origin's host at `size` pixels.
    pub fn fallback_uri(&self, size: u32) -> String {
        format!("{}/{}/{}", FALLBACK_SERVICE_BASE, self.host, size)
    }
}

/// Seed character for a letter-avatar placeholder: the first character of a
/// non-empty title, else of the page host, uppercased.
pub fn fallback_letter(title: Option<&str>, page_url: &str) -> Option<char> {
    if let Some(title) = title
        && let Some(first) = title.trim().chars().next()
    {
        return Some(first.to_ascii_uppercase());
    }

    let origin = PageOrigin::parse(page_url).ok()?;
    origin.host.chars().next().map(|c| c.to_ascii_uppercase())
}
