use std::{
    io,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use ureq::Agent;

use crate::{
    error::Error,
    item::file_name_from_url,
    util::{default_ureq_agent, mkdir_if_not_exists},
};

/// Saves a remote asset somewhere the user can reach it.
pub trait Downloader {
    fn download(&self, url: &str) -> Result<PathBuf, Error>;
}

/// Writes assets into a local directory, named after the last URL segment.
pub struct HttpDownloader {
    agent: Agent,
    dir: PathBuf,
}

impl HttpDownloader {
    pub fn new(dir: PathBuf, proxy_url: Option<&str>) -> Self {
        Self {
            agent: default_ureq_agent(proxy_url),
            dir,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn target_path(&self, url: &str) -> Result<PathBuf, Error> {
        let name = file_name_from_url(url)
            .ok_or_else(|| Error::ParseError(format!("no file name in {url:?}")))?;
        Ok(self.dir.join(name))
    }
}

impl Downloader for HttpDownloader {
    fn download(&self, url: &str) -> Result<PathBuf, Error> {
        let path = self.target_path(url)?;
        mkdir_if_not_exists(&self.dir)?;
        // Stream next to the target and rename over it once complete, a failed
        // download leaves any earlier file of the same name untouched.
        let mut file = NamedTempFile::new_in(&self.dir)?;

        log::info!("downloading {} to {:?}", url, path);
        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|err| Error::NetworkError(err.to_string()))?;
        let mut reader = response.into_body().into_reader();
        let bytes = io::copy(&mut reader, &mut file)?;
        file.persist(&path).map_err(|err| Error::from(err.error))?;

        log::debug!("downloaded {} bytes", bytes);
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, net::TcpListener};

    fn closed_port() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    }

    #[test]
    fn url_without_file_name_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let downloader = HttpDownloader::new(dir.path().to_path_buf(), None);
        assert!(matches!(
            downloader.download("https://example.com/"),
            Err(Error::ParseError(_))
        ));
    }

    #[test]
    fn unreachable_host_is_network_error_and_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let downloader = HttpDownloader::new(dir.path().to_path_buf(), None);
        let port = closed_port();
        let result = downloader.download(&format!("http://127.0.0.1:{port}/a/photo.jpg"));
        assert!(matches!(result, Err(Error::NetworkError(_))), "{result:?}");
        assert!(!dir.path().join("photo.jpg").exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn failed_download_keeps_earlier_file() {
        let dir = tempfile::tempdir().unwrap();
        let earlier = dir.path().join("photo.jpg");
        fs::write(&earlier, b"earlier").unwrap();
        let downloader = HttpDownloader::new(dir.path().to_path_buf(), None);

        let port = closed_port();
        let result = downloader.download(&format!("http://127.0.0.1:{port}/a/photo.jpg"));

        assert!(matches!(result, Err(Error::NetworkError(_))), "{result:?}");
        assert_eq!(fs::read(&earlier).unwrap(), b"earlier");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn uncreatable_dir_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"x").unwrap();
        let downloader = HttpDownloader::new(blocker.join("downloads"), None);
        let port = closed_port();
        assert!(downloader
            .download(&format!("http://127.0.0.1:{port}/photo.jpg"))
            .is_err());
    }
}
