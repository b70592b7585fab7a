use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;
use tracing::warn;

/// Flat directory of stored images, addressed by file name.
#[derive(Clone, Debug)]
pub struct ImageStore {
    base_dir: PathBuf,
}

impl ImageStore {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub async fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.base_dir)
            .await
            .with_context(|| format!("create storage dir {}", self.base_dir.display()))
    }

    pub async fn get(&self, file_name: &str) -> Result<Vec<u8>> {
        let path = self.resolve_path(file_name);
        fs::read(&path)
            .await
            .with_context(|| format!("read {}", path.display()))
    }

    /// Writes `data` under `file_name`, replacing any existing file.
    pub async fn put(&self, file_name: &str, data: &[u8]) -> Result<()> {
        let path = self.resolve_path(file_name);
        fs::write(&path, data)
            .await
            .with_context(|| format!("write {}", path.display()))
    }

    /// Names of every entry in the storage directory, in directory order.
    /// Entries whose names are not valid UTF-8 are skipped with a warning.
    pub async fn list(&self) -> Result<Vec<String>> {
        let mut dir = fs::read_dir(&self.base_dir)
            .await
            .with_context(|| format!("list {}", self.base_dir.display()))?;
        let mut names = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            let file_name = entry.file_name();
            match file_name.to_str() {
                Some(name) => names.push(name.to_string()),
                None => warn!(
                    entry = %file_name.to_string_lossy(),
                    dir = %self.base_dir.display(),
                    "skipping entry with non-utf-8 name"
                ),
            }
        }
        Ok(names)
    }

    pub fn resolve_path(&self, file_name: &str) -> PathBuf {
        self.base_dir.join(Path::new(file_name))
    }
}

/// True when `name` names a single entry directly inside the storage
/// directory: no separators, no `.`/`..`, nothing absolute.
pub fn is_plain_file_name(name: &str) -> bool {
    if name.is_empty() || name.contains(['/', '\\', '\0']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_get_and_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path().to_path_buf());

        store.put("a.png", b"first").await.unwrap();
        store.put("a.png", b"second").await.unwrap();
        store.put("b.gif", b"gif").await.unwrap();

        assert_eq!(store.get("a.png").await.unwrap(), b"second");
        let mut names = store.list().await.unwrap();
        names.sort();
        assert_eq!(names, vec!["a.png".to_string(), "b.gif".to_string()]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn list_skips_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path().to_path_buf());
        store.put("ok.png", b"png").await.unwrap();
        let raw = dir.path().join(OsStr::from_bytes(b"bad-\xff.png"));
        if std::fs::write(&raw, b"x").is_err() {
            // filesystem refuses non-utf-8 names
            return;
        }

        assert_eq!(store.list().await.unwrap(), vec!["ok.png".to_string()]);
    }

    #[tokio::test]
    async fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path().join("nope"));
        assert!(store.list().await.is_err());
        assert!(store.get("x.png").await.is_err());
    }

    #[tokio::test]
    async fn ensure_dir_creates_nested_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path().join("a").join("b"));
        store.ensure_dir().await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[test]
    fn plain_file_names() {
        assert!(is_plain_file_name("foo.png"));
        assert!(is_plain_file_name("foo bar.v2.png"));
        assert!(!is_plain_file_name(""));
        assert!(!is_plain_file_name(".."));
        assert!(!is_plain_file_name("../etc.png"));
        assert!(!is_plain_file_name("nested/foo.png"));
        assert!(!is_plain_file_name("/abs.png"));
        assert!(!is_plain_file_name("win\\path.png"));
    }
}
