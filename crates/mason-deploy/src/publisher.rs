//! Publishing built files to their serving location.

use std::fs;
use std::path::PathBuf;

use mason_build::FileMap;

/// What a publisher reports back after a successful publish.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublishReceipt {
    /// Public URL the published site serves from.
    pub url: String,
    /// Number of files written.
    pub files_written: usize,
}

/// Destination for a built site's files.
///
/// Implementations choose where files land; the orchestrator only cares
/// about the receipt.
pub trait Publisher: Send + Sync {
    /// Write every file in `files` under the site's `domain`.
    ///
    /// # Errors
    ///
    /// Returns an [`std::io::Error`] if any file cannot be written.
    fn publish(&self, domain: &str, files: &FileMap) -> Result<PublishReceipt, std::io::Error>;
}

/// Publishes into a per-domain directory under a local root.
///
/// Output paths may carry nested directories (footprint asset paths like
/// `assets/css/style.css`), so parents are created as needed.
#[derive(Clone, Debug)]
pub struct DirPublisher {
    root: PathBuf,
}

impl DirPublisher {
    /// Create a publisher rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Publisher for DirPublisher {
    fn publish(&self, domain: &str, files: &FileMap) -> Result<PublishReceipt, std::io::Error> {
        let site_root = self.root.join(domain);
        for (name, contents) in files {
            let path = site_root.join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, contents)?;
        }
        Ok(PublishReceipt {
            url: format!("https://{domain}"),
            files_written: files.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(DirPublisher: Send, Sync);

    #[test]
    fn test_publish_writes_files_under_domain() {
        let dir = tempfile::tempdir().unwrap();
        let publisher = DirPublisher::new(dir.path());
        let mut files = FileMap::new();
        files.insert("index.html".to_owned(), "<html></html>".to_owned());
        files.insert("styles.css".to_owned(), "body {}".to_owned());

        let receipt = publisher.publish("acme.example", &files).unwrap();

        assert_eq!(receipt.url, "https://acme.example");
        assert_eq!(receipt.files_written, 2);
        let html = std::fs::read_to_string(dir.path().join("acme.example/index.html")).unwrap();
        assert_eq!(html, "<html></html>");
    }

    #[test]
    fn test_publish_creates_nested_asset_directories() {
        let dir = tempfile::tempdir().unwrap();
        let publisher = DirPublisher::new(dir.path());
        let mut files = FileMap::new();
        files.insert("assets/css/style.css".to_owned(), ":root {}".to_owned());

        publisher.publish("acme.example", &files).unwrap();

        let css =
            std::fs::read_to_string(dir.path().join("acme.example/assets/css/style.css")).unwrap();
        assert_eq!(css, ":root {}");
    }

    #[test]
    fn test_publish_empty_map_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let publisher = DirPublisher::new(dir.path());

        let receipt = publisher.publish("acme.example", &FileMap::new()).unwrap();

        assert_eq!(receipt.files_written, 0);
    }
}
