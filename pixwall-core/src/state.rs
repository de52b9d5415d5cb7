use crate::{
    bookmark::{BookmarkSet, BookmarkStore},
    download::Downloader,
    error::{Error, Severity},
    item::{WallpaperId, WallpaperItem},
    promise::Promise,
    query::SearchQuery,
    storage::Storage,
    webapi::{Transport, WallpaperQuery},
};

#[derive(Debug, Default)]
pub struct Search {
    pub query: SearchQuery,
    /// The list on display.  Only a successful search replaces it.
    pub items: Vec<WallpaperItem>,
    /// Outcome of the latest request, resolved with the number of hits.
    pub request: Promise<usize, SearchQuery>,
}

/// Feedback for the user after a download.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Notice {
    Success { title: String, message: String },
    Alert { title: String, message: String },
}

impl Notice {
    fn success(message: impl Into<String>) -> Self {
        Self::Success {
            title: "Success".into(),
            message: message.into(),
        }
    }

    fn alert(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Alert {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Everything the presentation layer reads, with the handlers it calls.
/// Requests are handled in the order they are issued; when two searches
/// overlap, whichever completes last owns the list.
pub struct AppState<S, T, D> {
    store: BookmarkStore<S>,
    api: WallpaperQuery<T>,
    downloader: D,
    bookmarks: BookmarkSet,
    pub search: Search,
}

impl<S, T, D> AppState<S, T, D>
where
    S: Storage,
    T: Transport,
    D: Downloader,
{
    pub fn new(store: BookmarkStore<S>, api: WallpaperQuery<T>, downloader: D) -> Self {
        let bookmarks = store.load();
        Self {
            store,
            api,
            downloader,
            bookmarks,
            search: Search::default(),
        }
    }

    pub fn on_search(&mut self, query: impl Into<SearchQuery>) {
        if let Some(query) = self.begin_search(query.into()) {
            let result = self.api.search(&query);
            self.finish_search(query, result);
        }
    }

    /// Marks `query` as loading.  Returns `None`, leaving everything as it
    /// was, for a blank query.
    pub fn begin_search(&mut self, query: SearchQuery) -> Option<SearchQuery> {
        if query.is_blank() {
            return None;
        }
        log::info!("search query updated: {:?}", query.as_term());
        self.search.query = query.clone();
        self.search.request.defer(query.clone());
        Some(query)
    }

    pub fn finish_search(
        &mut self,
        query: SearchQuery,
        result: Result<Option<Vec<WallpaperItem>>, Error>,
    ) {
        match result {
            Ok(Some(items)) => {
                self.search.request.resolve(items.len());
                self.search.items = items;
            }
            Ok(None) => {
                self.search.request.resolve(self.search.items.len());
            }
            Err(err) => {
                log::error!("error fetching wallpapers for {:?}: {}", query.as_term(), err);
                self.search.request.reject(err);
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.search.request.is_pending()
    }

    /// Message to show in place of the results, if the last search failed.
    pub fn search_error(&self) -> Option<String> {
        self.search
            .request
            .error()
            .filter(|err| err.severity() == Severity::Inline)
            .map(|err| format!("Error: {err}"))
    }

    /// Changes only through `on_toggle_bookmark`, which persists each one.
    pub fn bookmarks(&self) -> &BookmarkSet {
        &self.bookmarks
    }

    pub fn is_bookmarked(&self, id: WallpaperId) -> bool {
        self.bookmarks.contains(id)
    }

    /// Flips the bookmark on `item` and persists the result.  Returns whether
    /// the item is bookmarked afterwards.  A failed write is logged; the
    /// in-memory set is kept either way.
    pub fn on_toggle_bookmark(&mut self, item: &WallpaperItem) -> bool {
        self.bookmarks = BookmarkStore::<S>::toggle(&self.bookmarks, item);
        if let Err(err) = self.store.persist(&self.bookmarks) {
            // Storage failures stay out of the UI; the next toggle retries.
            log::debug!("keeping unsaved bookmarks in memory: {}", err);
        }
        self.is_bookmarked(item.id)
    }

    pub fn on_download(&self, url: &str) -> Notice {
        match self.downloader.download(url) {
            Ok(path) => {
                log::info!("wallpaper saved to {:?}", path);
                Notice::success("Wallpaper downloaded successfully!")
            }
            Err(err) if err.is_permission_denied() => {
                log::warn!("download denied: {}", err);
                Notice::alert(
                    "Permission denied",
                    "Please grant write access to the download folder to download images.",
                )
            }
            Err(err) => {
                log::error!("error downloading {}: {}", url, err);
                Notice::alert("Error", "An error occurred while downloading the image.")
            }
        }
    }

    /// Looks `id` up in the displayed results, then in the bookmarks.
    pub fn find_item(&self, id: WallpaperId) -> Option<&WallpaperItem> {
        self.search
            .items
            .iter()
            .find(|item| item.id == id)
            .or_else(|| self.bookmarks.get(id))
    }
}
