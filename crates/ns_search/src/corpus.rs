use std::sync::{Arc, OnceLock};
use ns_core::{Article, NewsSource};
use tokio::sync::RwLock;
use tracing::{info, warn};

/// An article in a corpus snapshot, plus body text fetched for it later.
#[derive(Debug)]
pub struct CorpusEntry {
    article: Article,
    fetched: OnceLock<String>,
}

impl CorpusEntry {
    pub fn new(article: Article) -> Self {
        Self {
            article,
            fetched: OnceLock::new(),
        }
    }

    pub fn article(&self) -> &Article {
        &self.article
    }

    /// Listed content, else content fetched earlier, else the empty string.
    pub fn content(&self) -> &str {
        if !self.article.content.is_empty() {
            return &self.article.content;
        }
        self.fetched.get().map(String::as_str).unwrap_or("")
    }

    /// True while the article has no body text at all.
    pub fn needs_content(&self) -> bool {
        self.article.content.is_empty() && self.fetched.get().is_none()
    }

    /// Records fetched body text. The first fill wins.
    pub fn fill_content(&self, content: String) {
        let _ = self.fetched.set(content);
    }
}

/// An immutable, ordered set of articles. Searches hold an `Arc` to one
/// snapshot for their whole duration.
#[derive(Debug, Default)]
pub struct Corpus {
    entries: Vec<CorpusEntry>,
    sources: Vec<String>,
}

impl Corpus {
    pub fn new(articles: Vec<Article>, sources: Vec<String>) -> Self {
        Self {
            entries: articles.into_iter().map(CorpusEntry::new).collect(),
            sources,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CorpusEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&CorpusEntry> {
        self.entries.get(index)
    }

    /// Names of the sources this snapshot was built from.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }
}

/// Holds the current corpus snapshot and rebuilds it from the sources.
pub struct CorpusStore {
    sources: Vec<Arc<dyn NewsSource>>,
    current: RwLock<Arc<Corpus>>,
}

impl CorpusStore {
    pub fn new(sources: Vec<Arc<dyn NewsSource>>) -> Self {
        Self {
            sources,
            current: RwLock::new(Arc::new(Corpus::default())),
        }
    }

    /// Fetches every source and replaces the corpus with their concatenation.
    /// A failing source contributes no articles.
    pub async fn load(&self) -> Arc<Corpus> {
        let mut articles = Vec::new();
        let mut names = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            names.push(source.name().to_string());
            match source.fetch_articles().await {
                Ok(mut listed) => articles.append(&mut listed),
                Err(e) => warn!("⚠️ Failed to fetch articles from {}: {}", source.name(), e),
            }
        }

        self.replace(articles, names).await
    }

    /// Installs `articles` as the new snapshot.
    pub async fn replace(&self, articles: Vec<Article>, sources: Vec<String>) -> Arc<Corpus> {
        let corpus = Arc::new(Corpus::new(articles, sources));
        *self.current.write().await = corpus.clone();
        info!("📚 Corpus replaced with {} articles", corpus.len());
        corpus
    }

    pub async fn current(&self) -> Arc<Corpus> {
        self.current.read().await.clone()
    }
}
