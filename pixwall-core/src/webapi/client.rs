use serde::Deserialize;

use crate::{
    error::Error,
    item::{WallpaperId, WallpaperItem},
    query::SearchQuery,
};

use super::transport::Transport;

pub const PIXABAY_API_URL: &str = "https://pixabay.com/api/";
pub const DEFAULT_PAGE_SIZE: usize = 30;

const MIN_WIDTH: u32 = 1080;
const MIN_HEIGHT: u32 = 1920;

/// Turns a search term into wallpapers with one request to the image API.
/// Holds no state between calls.
pub struct WallpaperQuery<T> {
    transport: T,
    base_url: String,
    api_key: String,
    page_size: usize,
}

impl<T: Transport> WallpaperQuery<T> {
    pub fn new(transport: T, api_key: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: PIXABAY_API_URL.to_string(),
            api_key: api_key.into(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Returns `Ok(None)` without touching the network when `query` is blank,
    /// so the caller keeps whatever it is already showing.
    pub fn search(&self, query: &SearchQuery) -> Result<Option<Vec<WallpaperItem>>, Error> {
        if query.is_blank() {
            log::debug!("skipping blank search");
            return Ok(None);
        }
        log::info!("searching wallpapers: {:?}", query.as_term());
        let body = self.transport.get(&self.base_url, &self.params(query))?;
        let items = parse_hits(&body)?;
        log::debug!("{} wallpapers for {:?}", items.len(), query.as_term());
        Ok(Some(items))
    }

    fn params(&self, query: &SearchQuery) -> Vec<(&'static str, String)> {
        vec![
            ("key", self.api_key.clone()),
            ("q", query.as_term().trim().to_string()),
            ("image_type", "photo".to_string()),
            ("orientation", "vertical".to_string()),
            ("min_height", MIN_HEIGHT.to_string()),
            ("min_width", MIN_WIDTH.to_string()),
            ("per_page", self.page_size.to_string()),
        ]
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Deserialize)]
struct Hit {
    id: Option<u64>,
    #[serde(rename = "largeImageURL")]
    large_image_url: Option<String>,
    user: Option<String>,
    tags: Option<String>,
}

impl Hit {
    fn into_item(self) -> Option<WallpaperItem> {
        match (self.id, self.large_image_url) {
            (Some(id), Some(image_url)) => Some(WallpaperItem {
                id: WallpaperId(id),
                image_url,
                user: self.user.unwrap_or_default(),
                tags: self.tags.unwrap_or_default(),
            }),
            (id, _) => {
                log::debug!("dropping incomplete hit: {:?}", id);
                None
            }
        }
    }
}

fn parse_hits(body: &str) -> Result<Vec<WallpaperItem>, Error> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response.hits.into_iter().filter_map(Hit::into_item).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct ScriptedTransport {
        response: Result<String, String>,
        calls: RefCell<Vec<Vec<(String, String)>>>,
    }

    impl ScriptedTransport {
        fn ok(body: &str) -> Self {
            Self {
                response: Ok(body.to_string()),
                calls: RefCell::default(),
            }
        }

        fn failing() -> Self {
            Self {
                response: Err("connection refused".to_string()),
                calls: RefCell::default(),
            }
        }
    }

    impl Transport for ScriptedTransport {
        fn get(&self, _url: &str, query: &[(&str, String)]) -> Result<String, Error> {
            self.calls.borrow_mut().push(
                query
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
            );
            self.response.clone().map_err(Error::NetworkError)
        }
    }

    const TWO_HITS: &str = r#"{
        "total": 2, "totalHits": 2,
        "hits": [
            {"id": 11, "largeImageURL": "https://x/11.jpg", "user": "ann", "tags": "tree, leaf", "likes": 9},
            {"id": 12, "largeImageURL": "https://x/12.jpg", "user": "bob", "tags": "lake"}
        ]
    }"#;

    #[test]
    fn returns_hits() {
        let api = WallpaperQuery::new(ScriptedTransport::ok(TWO_HITS), "k");
        let items = api.search(&"nature".into()).unwrap().unwrap();
        let ids: Vec<_> = items.iter().map(|item| item.id.0).collect();
        assert_eq!(ids, [11, 12]);
        assert_eq!(items[1].user, "bob");
    }

    #[test]
    fn sends_fixed_params() {
        let transport = ScriptedTransport::ok(TWO_HITS);
        let api = WallpaperQuery::new(&transport, "secret");
        api.search(&" nature ".into()).unwrap();
        let calls = transport.calls.borrow();
        let params: Vec<(&str, &str)> = calls[0]
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            params,
            [
                ("key", "secret"),
                ("q", "nature"),
                ("image_type", "photo"),
                ("orientation", "vertical"),
                ("min_height", "1920"),
                ("min_width", "1080"),
                ("per_page", "30"),
            ]
        );
    }

    #[test]
    fn blank_term_issues_no_request() {
        let transport = ScriptedTransport::ok(TWO_HITS);
        let api = WallpaperQuery::new(&transport, "k");
        assert!(api.search(&"".into()).unwrap().is_none());
        assert!(api.search(&"   ".into()).unwrap().is_none());
        assert!(transport.calls.borrow().is_empty());
    }

    #[test]
    fn transport_failure_is_surfaced() {
        let api = WallpaperQuery::new(ScriptedTransport::failing(), "k");
        assert!(matches!(
            api.search(&"nature".into()),
            Err(Error::NetworkError(_))
        ));
    }

    #[test]
    fn malformed_body_is_parse_error() {
        let api = WallpaperQuery::new(ScriptedTransport::ok("<html>"), "k");
        assert!(matches!(
            api.search(&"nature".into()),
            Err(Error::ParseError(_))
        ));
    }

    #[test]
    fn missing_fields_are_absent() {
        let body = r#"{"hits": [
            {"id": 1, "largeImageURL": "https://x/1.jpg"},
            {"id": 2},
            {"largeImageURL": "https://x/3.jpg"}
        ]}"#;
        let items = parse_hits(body).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].user, "");
        assert_eq!(items[0].tags, "");
        assert!(parse_hits("{}").unwrap().is_empty());
    }
}
