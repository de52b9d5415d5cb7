mod client;
mod transport;

pub use client::{WallpaperQuery, DEFAULT_PAGE_SIZE, PIXABAY_API_URL};
pub use transport::{Transport, UreqTransport};
