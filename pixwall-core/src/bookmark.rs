use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    error::Error,
    item::{WallpaperId, WallpaperItem},
    storage::Storage,
};

pub const BOOKMARKS_KEY: &str = "bookmarkedWallpapers";

/// Saved wallpapers, unique by id.  Keeps insertion order for display but
/// compares as a set.
#[derive(Clone, Debug, Default)]
pub struct BookmarkSet {
    items: Vec<WallpaperItem>,
}

impl BookmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from `items`, keeping the first entry of any repeated id.
    pub fn from_items(items: impl IntoIterator<Item = WallpaperItem>) -> Self {
        let mut set = Self::new();
        for item in items {
            if !set.contains(item.id) {
                set.items.push(item);
            }
        }
        set
    }

    pub fn contains(&self, id: WallpaperId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub fn get(&self, id: WallpaperId) -> Option<&WallpaperItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WallpaperItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns a copy with `item` removed if its id is present, or appended
    /// otherwise.
    pub fn toggled(&self, item: &WallpaperItem) -> Self {
        let items = if self.contains(item.id) {
            self.items
                .iter()
                .filter(|saved| saved.id != item.id)
                .cloned()
                .collect()
        } else {
            let mut items = self.items.clone();
            items.push(item.clone());
            items
        };
        Self { items }
    }
}

impl PartialEq for BookmarkSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .items
                .iter()
                .all(|item| other.get(item.id) == Some(item))
    }
}

impl Eq for BookmarkSet {}

impl<'a> IntoIterator for &'a BookmarkSet {
    type Item = &'a WallpaperItem;
    type IntoIter = std::slice::Iter<'a, WallpaperItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Serialize for BookmarkSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BookmarkSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<WallpaperItem>::deserialize(deserializer).map(Self::from_items)
    }
}

/// Mediates between a `BookmarkSet` and its persisted slot.
///
/// Mutation is a two-step contract: `toggle` computes the next set, then the
/// caller hands it to `persist`.  The two are not atomic; a crash in between
/// loses the latest toggle and nothing else.
pub struct BookmarkStore<S> {
    storage: S,
    key: String,
}

impl<S: Storage> BookmarkStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, BOOKMARKS_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Reads the persisted set.  Absent, unreadable or corrupt data yields an
    /// empty set; the failure is logged.
    pub fn load(&self) -> BookmarkSet {
        match self.try_load() {
            Ok(set) => {
                log::info!("loaded {} bookmarks", set.len());
                set
            }
            Err(err) => {
                log::error!("error loading bookmarks: {}", err);
                BookmarkSet::new()
            }
        }
    }

    pub fn try_load(&self) -> Result<BookmarkSet, Error> {
        match self.storage.get(&self.key)? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map_err(|err| Error::StorageReadError(err.to_string())),
            None => Ok(BookmarkSet::new()),
        }
    }

    pub fn toggle(set: &BookmarkSet, item: &WallpaperItem) -> BookmarkSet {
        set.toggled(item)
    }

    /// Overwrites the slot with `set`.  A failure is logged and returned; the
    /// caller's in-memory set stays authoritative.
    pub fn persist(&self, set: &BookmarkSet) -> Result<(), Error> {
        let result = serde_json::to_vec(set)
            .map_err(|err| Error::StorageWriteError(err.to_string()))
            .and_then(|bytes| self.storage.set(&self.key, &bytes));
        if let Err(err) = &result {
            log::error!("error saving bookmarks: {}", err);
        }
        result
    }
}
