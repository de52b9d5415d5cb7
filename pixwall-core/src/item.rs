use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Error;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WallpaperId(pub u64);

impl fmt::Display for WallpaperId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for WallpaperId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse()
            .map(Self)
            .map_err(|_| Error::ParseError(format!("invalid wallpaper id: {s:?}")))
    }
}

/// A remotely hosted image.  Serialized with the field names the image API
/// uses, so a bookmark slot holds the same shape as a search hit.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct WallpaperItem {
    pub id: WallpaperId,
    #[serde(rename = "largeImageURL")]
    pub image_url: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub tags: String,
}

impl WallpaperItem {
    pub const PROVIDER: &'static str = "Pixabay";

    pub fn tag_list(&self) -> impl Iterator<Item = &str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
    }

    pub fn details(&self) -> String {
        format!(
            "Photographer: {}\nTags: {}\nProvided by {}",
            self.user,
            self.tags,
            Self::PROVIDER
        )
    }

    pub fn file_name(&self) -> Option<String> {
        file_name_from_url(&self.image_url)
    }
}

/// Last non-empty path segment of `url`.
pub fn file_name_from_url(url: &str) -> Option<String> {
    let url = Url::parse(url).ok()?;
    url.path_segments()?
        .rfind(|segment| !segment.is_empty())
        .map(str::to_string)
}
