use clap::{Parser, Subcommand};
use env_logger::{Builder, Env};
use pixwall_core::{
    bookmark::BookmarkStore,
    config::Config,
    download::HttpDownloader,
    error::Error,
    item::{WallpaperId, WallpaperItem},
    query::{Category, SearchQuery},
    state::{AppState, Notice},
    storage::FileStorage,
    webapi::{UreqTransport, WallpaperQuery},
};
use std::process;

const ENV_LOG: &str = "PIXWALL_LOG";
const ENV_LOG_STYLE: &str = "PIXWALL_LOG_STYLE";

type App = AppState<FileStorage, UreqTransport, HttpDownloader>;

#[derive(Parser)]
#[command(author, version, about = "Browse, bookmark and download Pixabay wallpapers")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Search wallpapers by a free-text term
    Search { term: String },
    /// Browse one of the built-in categories
    Category { category: Category },
    /// Browse Editor's Choice
    EditorsChoice,
    /// List bookmarked wallpapers
    Bookmarks,
    /// Search for <term> and toggle the bookmark on hit <id>
    Bookmark { term: String, id: WallpaperId },
    /// Remove a bookmarked wallpaper
    Unbookmark { id: WallpaperId },
    /// Show photographer and tags of a bookmarked wallpaper
    Info { id: WallpaperId },
    /// Download an image into the download folder
    Download { url: String },
}

fn main() {
    Builder::from_env(
        Env::new()
            .filter_or(ENV_LOG, "info")
            .write_style(ENV_LOG_STYLE),
    )
    .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        fail(err.to_string());
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let config = match Config::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(err) => {
            log::error!("failed to load config, using defaults: {}", err);
            Config::default()
        }
    };
    let mut app = build_app(&config)?;

    match cli.command {
        None => search(&mut app, config.initial_query()),
        Some(Command::Search { term }) => search(&mut app, SearchQuery::Term(term)),
        Some(Command::Category { category }) => search(&mut app, category.into()),
        Some(Command::EditorsChoice) => search(&mut app, SearchQuery::EditorsChoice),
        Some(Command::Bookmarks) => {
            if app.bookmarks().is_empty() {
                println!("No bookmarks available.");
            }
            for item in app.bookmarks() {
                print_item(&app, item);
            }
            Ok(())
        }
        Some(Command::Bookmark { term, id }) => {
            search(&mut app, SearchQuery::Term(term))?;
            let item = app
                .search
                .items
                .iter()
                .find(|item| item.id == id)
                .cloned()
                .unwrap_or_else(|| fail(format!("no result with id {id}")));
            toggle(&mut app, &item);
            Ok(())
        }
        Some(Command::Unbookmark { id }) => {
            let item = app
                .bookmarks()
                .get(id)
                .cloned()
                .unwrap_or_else(|| fail(format!("{id} is not bookmarked")));
            toggle(&mut app, &item);
            Ok(())
        }
        Some(Command::Info { id }) => {
            let item = app
                .find_item(id)
                .unwrap_or_else(|| fail(format!("no wallpaper with id {id}")));
            println!("Wallpaper Info\n{}\n{}", item.details(), item.image_url);
            Ok(())
        }
        Some(Command::Download { url }) => match app.on_download(&url) {
            Notice::Success { title, message } => {
                println!("{title}: {message}");
                Ok(())
            }
            Notice::Alert { title, message } => fail(format!("{title}: {message}")),
        },
    }
}

fn fail(message: String) -> ! {
    eprintln!("{message}");
    process::exit(1)
}

fn build_app(config: &Config) -> Result<App, Error> {
    let api_key = config
        .api_key()
        .ok_or_else(|| Error::ConfigError("missing Pixabay API key".into()))?;
    let data_dir =
        Config::data_dir().ok_or_else(|| Error::ConfigError("no data directory".into()))?;
    let download_dir = config
        .download_dir()
        .ok_or_else(|| Error::ConfigError("no download directory".into()))?;
    let proxy = Config::proxy();

    let store = BookmarkStore::new(FileStorage::new(data_dir));
    let api = WallpaperQuery::new(UreqTransport::new(proxy.as_deref()), api_key)
        .with_page_size(config.page_size);
    let downloader = HttpDownloader::new(download_dir, proxy.as_deref());
    Ok(AppState::new(store, api, downloader))
}

fn search(app: &mut App, query: SearchQuery) -> Result<(), Error> {
    app.on_search(query);
    if let Some(message) = app.search_error() {
        println!("{message}");
        return Ok(());
    }
    for item in &app.search.items {
        print_item(app, item);
    }
    Ok(())
}

fn toggle(app: &mut App, item: &WallpaperItem) {
    if app.on_toggle_bookmark(item) {
        println!("Bookmarked {}", item.id);
    } else {
        println!("Removed bookmark {}", item.id);
    }
}

fn print_item(app: &App, item: &WallpaperItem) {
    let mark = if app.is_bookmarked(item.id) { '*' } else { ' ' };
    println!(
        "{mark} {:>10}  {:<20}  {}  {}",
        item.id, item.user, item.tags, item.image_url
    );
}
