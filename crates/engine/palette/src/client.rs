//! COLOURlovers palette client
//!
//! Requests a batch of random palettes, optionally through a CORS relay, and
//! decodes them into a [`PaletteSet`]. [`PaletteClient::fetch_palettes`] never
//! fails: any transport or decoding error is logged and replaced by
//! [`PaletteSet::fallback`].

use crate::color::{Palette, PaletteSet};
use crate::error::{PaletteError, PaletteResult};
use crate::transport::{HttpTransport, PaletteTransport};
use reqwest::Url;
use serde::Deserialize;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// Random-palette endpoint of the COLOURlovers API
pub const DEFAULT_ENDPOINT: &str = "https://www.colourlovers.com/api/palettes/random";

/// Relay that proxies the URL given in its `url` parameter verbatim
pub const DEFAULT_RELAY_ENDPOINT: &str = "https://api.allorigins.win/raw";

/// Number of palettes requested per fetch
pub const DEFAULT_NUM_RESULTS: u32 = 5;

/// How the request reaches the palette service
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Routing {
    /// GET the palette endpoint directly
    #[default]
    Direct,
    /// GET the relay endpoint, passing the palette URL URL-encoded as `url`
    Relay { endpoint: String },
}

impl Routing {
    pub fn relay(endpoint: impl Into<String>) -> Self {
        Self::Relay {
            endpoint: endpoint.into(),
        }
    }
}

/// One palette record as returned by the service; other fields are ignored
#[derive(Debug, Deserialize)]
struct PaletteRecord {
    #[serde(default)]
    title: Option<String>,
    colors: Vec<String>,
}

/// Palette service client
///
/// # Example
///
/// ```no_run
/// use palette::{PaletteClient, Routing};
///
/// # async fn run() {
/// let client = PaletteClient::http().with_routing(Routing::relay("https://api.allorigins.win/raw"));
/// let palettes = client.fetch_palettes().await;
/// println!("{} palettes", palettes.len());
/// # }
/// ```
pub struct PaletteClient<T = HttpTransport> {
    transport: T,
    endpoint: String,
    num_results: u32,
    routing: Routing,
}

impl PaletteClient<HttpTransport> {
    /// Client over a default reqwest transport
    pub fn http() -> Self {
        Self::new(HttpTransport::new())
    }
}

impl<T: PaletteTransport> PaletteClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            num_results: DEFAULT_NUM_RESULTS,
            routing: Routing::Direct,
        }
    }

    /// Override the palette endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override how many palettes are requested
    pub fn with_num_results(mut self, num_results: u32) -> Self {
        self.num_results = num_results;
        self
    }

    pub fn with_routing(mut self, routing: Routing) -> Self {
        self.routing = routing;
        self
    }

    /// Build the request URL for a given cache-busting timestamp
    pub fn request_url(&self, timestamp_ms: u128) -> PaletteResult<Url> {
        let num_results = self.num_results.to_string();
        let timestamp = timestamp_ms.to_string();
        let target = Url::parse_with_params(
            &self.endpoint,
            &[
                ("format", "json"),
                ("numResults", num_results.as_str()),
                ("_", timestamp.as_str()),
            ],
        )
        .map_err(|e| PaletteError::Url(format!("{}: {e}", self.endpoint)))?;

        match &self.routing {
            Routing::Direct => Ok(target),
            Routing::Relay { endpoint } => {
                Url::parse_with_params(endpoint, &[("url", target.as_str())])
                    .map_err(|e| PaletteError::Url(format!("{endpoint}: {e}")))
            }
        }
    }

    /// Fetch and decode palettes, surfacing any failure
    pub async fn try_fetch(&self) -> PaletteResult<PaletteSet> {
        let url = self.request_url(unix_millis())?;
        debug!(%url, "requesting palettes");

        let body = self.transport.get(&url).await?;
        parse_palettes(&body)
    }

    /// Fetch palettes, substituting the fallback set on any failure
    pub async fn fetch_palettes(&self) -> PaletteSet {
        match self.try_fetch().await {
            Ok(palettes) => {
                debug!(
                    palettes = palettes.len(),
                    colors = palettes.color_count(),
                    "loaded palettes"
                );
                palettes
            }
            Err(error) => {
                warn!(%error, "failed to load palettes, using fallback colors");
                PaletteSet::fallback()
            }
        }
    }
}

/// Decode a palette service response body
///
/// Records with no colors are skipped. A body that yields no palette at all is
/// malformed.
pub fn parse_palettes(body: &str) -> PaletteResult<PaletteSet> {
    let records: Vec<PaletteRecord> = serde_json::from_str(body)?;

    let mut palettes = Vec::with_capacity(records.len());
    for record in records {
        if record.colors.is_empty() {
            debug!(title = ?record.title, "skipping palette without colors");
            continue;
        }
        palettes.push(Palette::from_hex(&record.colors)?);
    }

    if palettes.is_empty() {
        return Err(PaletteError::Malformed(
            "response contained no usable palettes".to_string(),
        ));
    }

    PaletteSet::new(palettes)
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn test_direct_url() {
        let client = PaletteClient::http();
        let url = client.request_url(1_700_000_000_000).unwrap();

        assert_eq!(
            url.as_str(),
            "https://www.colourlovers.com/api/palettes/random?format=json&numResults=5&_=1700000000000"
        );
    }

    #[test]
    fn test_relay_url_encodes_target() {
        let client = PaletteClient::http().with_routing(Routing::relay(DEFAULT_RELAY_ENDPOINT));
        let url = client.request_url(42).unwrap();

        assert!(url.as_str().starts_with("https://api.allorigins.win/raw?url="));
        assert!(!url.as_str().contains("numResults=5&"));

        let (key, target) = url.query_pairs().next().unwrap();
        assert_eq!(key, "url");
        assert_eq!(
            target,
            "https://www.colourlovers.com/api/palettes/random?format=json&numResults=5&_=42"
        );
    }

    #[test]
    fn test_custom_num_results() {
        let client = PaletteClient::http().with_num_results(8);
        let url = client.request_url(0).unwrap();
        assert!(url.query_pairs().any(|(k, v)| k == "numResults" && v == "8"));
    }

    #[test]
    fn test_invalid_endpoint() {
        let client = PaletteClient::http().with_endpoint("not a url");
        assert!(matches!(client.request_url(0), Err(PaletteError::Url(_))));
    }

    #[test]
    fn test_parse_preserves_order() {
        let body = r#"[
            {"id": 1, "title": "first", "colors": ["FF0000", "00FF00"]},
            {"id": 2, "title": "second", "colors": ["0000ff"]}
        ]"#;
        let set = parse_palettes(body).unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.wrapping(0).colors(), &[Color::RED, Color::GREEN]);
        assert_eq!(set.wrapping(1).colors(), &[Color::BLUE]);
    }

    #[test]
    fn test_parse_skips_empty_records() {
        let body = r#"[{"colors": []}, {"colors": ["123456"]}]"#;
        let set = parse_palettes(body).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.wrapping(0).colors(), &[Color::new(0x12, 0x34, 0x56)]);
    }

    #[test]
    fn test_parse_failures_are_malformed() {
        for body in [
            "",
            "<html>rate limited</html>",
            "{}",
            "[]",
            r#"[{"title": "no colors field"}]"#,
            r#"[{"colors": []}]"#,
            r#"[{"colors": ["12345Z"]}]"#,
        ] {
            let err = parse_palettes(body).unwrap_err();
            assert!(err.is_malformed(), "{body:?} gave {err:?}");
        }
    }
}
