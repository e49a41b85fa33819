//! Loading translation tables from disk (or memory) and memoizing them.

use std::collections::HashMap;
use std::future::Future;
use std::path::{
    Path,
    PathBuf,
};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;

use super::table::TranslationTable;
use super::translator::Translator;

#[derive(Error, Debug)]
pub enum LoadError {
    /// The file exists but could not be read
    #[error("Failed to read translation file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file is not a valid translation table
    #[error("Failed to parse translation file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// No table exists at the path
    #[error("Translation file not found: {}", .0.display())]
    NotFound(PathBuf),
}

/// Source of translation tables, keyed by path.
pub trait TableLoader: Send + Sync {
    /// # Errors
    /// [`LoadError`] when the table at `path` is absent or unreadable.
    fn load(&self, path: &Path) -> impl Future<Output = Result<TranslationTable, LoadError>> + Send;
}

/// Reads `<path>` as a JSON translation file.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFileLoader;

impl TableLoader for JsonFileLoader {
    async fn load(&self, path: &Path) -> Result<TranslationTable, LoadError> {
        let content = tokio::fs::read_to_string(path).await.map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LoadError::NotFound(path.to_path_buf())
            } else {
                LoadError::Io { path: path.to_path_buf(), source }
            }
        })?;

        TranslationTable::from_json_str(&content)
            .map_err(|source| LoadError::Parse { path: path.to_path_buf(), source })
    }
}

/// Tables held in memory, for embedding or tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    tables: HashMap<PathBuf, TranslationTable>,
}

impl MemoryLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_table(mut self, path: impl Into<PathBuf>, table: TranslationTable) -> Self {
        self.tables.insert(path.into(), table);
        self
    }
}

impl TableLoader for MemoryLoader {
    async fn load(&self, path: &Path) -> Result<TranslationTable, LoadError> {
        self.tables.get(path).cloned().ok_or_else(|| LoadError::NotFound(path.to_path_buf()))
    }
}

/// Loaded tables by source path. Shared between clones.
///
/// Lookup and insertion are separate steps, so concurrent misses for the same
/// path may load it twice; the last write wins.
#[derive(Clone, Debug, Default)]
pub struct TableCache {
    tables: Arc<RwLock<HashMap<PathBuf, Arc<TranslationTable>>>>,
}

impl TableCache {
    #[must_use]
    pub fn new() -> Self {
        Self { tables: Arc::new(RwLock::new(HashMap::new())) }
    }

    pub async fn get(&self, path: &Path) -> Option<Arc<TranslationTable>> {
        self.tables.read().await.get(path).cloned()
    }

    pub async fn insert(&self, path: PathBuf, table: Arc<TranslationTable>) {
        self.tables.write().await.insert(path, table);
    }

    pub async fn len(&self) -> usize {
        self.tables.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tables.read().await.is_empty()
    }

    /// Returns the cached table for `path`, loading it through `loader` on a miss.
    ///
    /// Failures are not cached.
    ///
    /// # Errors
    /// Whatever `loader` reports.
    pub async fn get_or_load<L: TableLoader>(
        &self,
        path: &Path,
        loader: &L,
    ) -> Result<Arc<TranslationTable>, LoadError> {
        if let Some(table) = self.get(path).await {
            tracing::debug!(path = %path.display(), "Translation table cache hit");
            return Ok(table);
        }

        tracing::debug!(path = %path.display(), "Loading translation table");
        let table = Arc::new(loader.load(path).await?);
        self.insert(path.to_path_buf(), Arc::clone(&table)).await;
        Ok(table)
    }
}

/// Entry point: a folder of `<language>.json` files.
///
/// ```no_run
/// # async fn run() {
/// use interp_i18n::resolver::{TranslateOptions, Translations};
///
/// let translations = Translations::new("languages");
/// let en = translations.translator("en", Some("error")).await;
/// let text = en.t("404", TranslateOptions::new());
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Translations<L = JsonFileLoader> {
    folder: PathBuf,
    loader: L,
    cache: TableCache,
}

impl Translations<JsonFileLoader> {
    #[must_use]
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self::with_loader(folder, JsonFileLoader)
    }
}

impl<L: TableLoader> Translations<L> {
    #[must_use]
    pub fn with_loader(folder: impl Into<PathBuf>, loader: L) -> Self {
        Self { folder: folder.into(), loader, cache: TableCache::new() }
    }

    /// Shares `cache` with other roots instead of a private one.
    #[must_use]
    pub fn with_cache(mut self, cache: TableCache) -> Self {
        self.cache = cache;
        self
    }

    #[must_use]
    pub const fn cache(&self) -> &TableCache {
        &self.cache
    }

    #[must_use]
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// `<folder>/<language>.json`
    #[must_use]
    pub fn source_path(&self, language: &str) -> PathBuf {
        self.folder.join(format!("{language}.json"))
    }

    /// Translator for `language`, scoped to `prefix`.
    ///
    /// A table that cannot be loaded gives a translator that answers every
    /// lookup with a "Could not find the translation file" message.
    pub async fn translator(&self, language: &str, prefix: Option<&str>) -> Translator {
        let path = self.source_path(language);
        match self.cache.get_or_load(&path, &self.loader).await {
            Ok(table) => Translator::from_table(table, language, prefix),
            Err(err) => {
                tracing::warn!(language, error = %err, "Failed to load translation table");
                Translator::unavailable(
                    language,
                    format!("Could not find the translation file for {language} (path: {})", path.display()),
                )
            }
        }
    }
}
