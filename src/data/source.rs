use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Proxy, Url};

use super::error::{LoadError, Result};

/// Path prefix the site is served under.
pub const BASE_PATH: &str = "/force-curves2";

/// Origin used when none is configured.
pub const DEFAULT_ORIGIN: &str = "http://localhost:8080";

// ---------------------------------------------------------------------------
// Resource paths
// ---------------------------------------------------------------------------

/// Path of a dataset resource as unencoded segments. Segments are only
/// percent-encoded when placed into a URL, so a switch name may contain
/// `#`, `?` or `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourcePath(Vec<String>);

impl ResourcePath {
    fn under_base<'a>(rest: impl IntoIterator<Item = &'a str>) -> Self {
        let segments = BASE_PATH
            .split('/')
            .filter(|s| !s.is_empty())
            .chain(rest)
            .map(str::to_string)
            .collect();
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.0 {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

pub fn switch_meta_path() -> ResourcePath {
    ResourcePath::under_base(["data", "switchmeta.csv"])
}

pub fn curve_path(name: &str, stroke: Stroke) -> ResourcePath {
    let file = format!("{name}.{stroke}.csv");
    ResourcePath::under_base(["data", "csv_output", file.as_str()])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stroke {
    Down,
    Up,
}

impl fmt::Display for Stroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stroke::Down => f.write_str("downstroke"),
            Stroke::Up => f.write_str("upstroke"),
        }
    }
}

// ---------------------------------------------------------------------------
// Source trait
// ---------------------------------------------------------------------------

/// Something that can hand back the text body of a dataset resource.
#[async_trait]
pub trait CurveSource: Send + Sync {
    async fn fetch_text(&self, path: &ResourcePath) -> Result<String>;
}

// ---------------------------------------------------------------------------
// HTTP
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// Scheme, host and an optional path prefix the site is mounted under.
    pub origin: Url,
    /// `None` uses the system proxy settings. `Some` sends every request,
    /// whatever its scheme, through exactly these.
    pub proxies: Option<Vec<Url>>,
    /// No timeout unless set.
    pub timeout: Option<Duration>,
}

impl HttpSettings {
    pub fn new(origin: &str) -> Result<Self> {
        let origin = Url::parse(origin)?;
        if origin.cannot_be_a_base() {
            return Err(LoadError::InvalidOrigin(origin.to_string()));
        }
        Ok(Self {
            origin,
            proxies: None,
            timeout: None,
        })
    }

    fn build_client(&self) -> Result<Client> {
        let mut cb = Client::builder();

        if let Some(proxies) = &self.proxies {
            cb = cb.no_proxy();
            for u in proxies {
                cb = cb.proxy(Proxy::all(u.clone())?);
            }
        }
        if let Some(timeout) = self.timeout {
            cb = cb.timeout(timeout);
        }

        Ok(cb.build()?)
    }
}

/// Fetches resources with plain GET requests against a fixed origin.
pub struct HttpSource {
    client: Client,
    origin: Url,
}

impl HttpSource {
    pub fn new(settings: HttpSettings) -> Result<Self> {
        Ok(Self {
            client: settings.build_client()?,
            origin: settings.origin,
        })
    }

    /// Appends `path` to the origin's own path, one encoded segment each.
    pub fn url_for(&self, path: &ResourcePath) -> Result<Url> {
        let mut url = self.origin.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|_| LoadError::InvalidOrigin(self.origin.to_string()))?
            .pop_if_empty()
            .extend(path.segments());
        Ok(url)
    }
}

#[async_trait]
impl CurveSource for HttpSource {
    async fn fetch_text(&self, path: &ResourcePath) -> Result<String> {
        let url = self.url_for(path)?;
        log::debug!("GET {url}");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status,
            });
        }

        Ok(response.text().await?)
    }
}
