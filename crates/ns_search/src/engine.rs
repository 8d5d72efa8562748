use std::sync::Arc;
use futures::future::join_all;
use ns_core::{ContentFetcher, EnrichmentRecord, Error, Fingerprint, Result, SentimentModel};
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tracing::{debug, error, info};

use crate::cache::EnrichmentCache;
use crate::config::SearchConfig;
use crate::corpus::CorpusStore;
use crate::enricher::Enricher;
use crate::ranker::Ranker;

pub const REFRESH_MESSAGE: &str = "News data refreshed";

fn default_page() -> usize {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default)]
    pub include_all: bool,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
            include_all: false,
        }
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn include_all(mut self, include_all: bool) -> Self {
        self.include_all = include_all;
        self
    }
}

/// One page of results.
#[derive(Debug, Clone)]
pub struct SearchPage {
    pub results: Vec<EnrichmentRecord>,
    /// Set when new entries could not be saved. The results are still valid.
    pub cache_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshSummary {
    pub message: String,
    pub sources: Vec<String>,
    pub count: usize,
}

enum Slot {
    Ready(EnrichmentRecord),
    Pending { index: usize, score: f64, fingerprint: Fingerprint },
}

/// Ranks, paginates, filters and enriches search results.
pub struct SearchEngine {
    corpus: CorpusStore,
    cache: EnrichmentCache,
    enricher: Enricher,
    ranker: Ranker,
    config: SearchConfig,
    semaphore: Arc<Semaphore>,
}

impl SearchEngine {
    pub fn new(
        corpus: CorpusStore,
        cache: EnrichmentCache,
        fetcher: Arc<dyn ContentFetcher>,
        model: Arc<dyn SentimentModel>,
        config: SearchConfig,
    ) -> Self {
        Self {
            enricher: Enricher::new(fetcher, model, &config),
            ranker: Ranker::new(config.ranker.clone()),
            semaphore: Arc::new(Semaphore::new(config.max_enrichment_concurrency.max(1))),
            corpus,
            cache,
            config,
        }
    }

    pub fn corpus(&self) -> &CorpusStore {
        &self.corpus
    }

    pub fn cache(&self) -> &EnrichmentCache {
        &self.cache
    }

    /// Replaces the corpus from its sources. The cache is left untouched.
    pub async fn refresh(&self) -> RefreshSummary {
        let corpus = self.corpus.load().await;
        RefreshSummary {
            message: REFRESH_MESSAGE.to_string(),
            sources: corpus.sources().to_vec(),
            count: corpus.len(),
        }
    }

    pub async fn search(&self, request: &SearchRequest) -> Result<SearchPage> {
        if request.page == 0 {
            return Err(Error::InvalidRequest("page must be 1 or greater".to_string()));
        }

        let corpus = self.corpus.current().await;
        let scores = self.ranker.score(&corpus, &request.query);
        let ranked = Ranker::rank(&scores);

        let page_size = self.config.page_size;
        let start = (request.page - 1).saturating_mul(page_size).min(ranked.len());
        let end = start.saturating_add(page_size).min(ranked.len());
        let skip_unmatched = !request.query.is_empty() && !request.include_all;

        let mut slots = Vec::with_capacity(end - start);
        for &index in &ranked[start..end] {
            let score = scores[index];
            if skip_unmatched && score == 0.0 {
                continue;
            }
            let fingerprint = Fingerprint::of(corpus.entries()[index].article());
            match self.cache.get(&fingerprint).await {
                Some(cached) => slots.push(Slot::Ready(cached.with_score(score))),
                None => slots.push(Slot::Pending { index, score, fingerprint }),
            }
        }

        let pending = slots.iter().filter_map(|slot| match slot {
            Slot::Pending { index, score, .. } => Some((*index, *score)),
            Slot::Ready(_) => None,
        });
        let enrichments = join_all(pending.map(|(index, score)| {
            let semaphore = self.semaphore.clone();
            let entry = &corpus.entries()[index];
            async move {
                let _permit = semaphore.acquire().await.map_err(|e| Error::External(e.into()))?;
                Ok::<_, Error>(self.enricher.enrich(entry, score).await)
            }
        }))
        .await
        .into_iter()
        .collect::<Result<Vec<_>>>()?;

        let mut enrichments = enrichments.into_iter();
        let mut results = Vec::with_capacity(slots.len());
        let mut inserted = 0;
        for slot in slots {
            match slot {
                Slot::Ready(record) => results.push(record),
                Slot::Pending { fingerprint, .. } => {
                    let Some(enriched) = enrichments.next() else { break };
                    if enriched.cacheable {
                        self.cache.put(fingerprint, enriched.record.clone()).await;
                        inserted += 1;
                    }
                    results.push(enriched.record);
                }
            }
        }

        debug!(
            "🔍 {:?} page {}: {} results, {} newly enriched",
            request.query,
            request.page,
            results.len(),
            inserted
        );

        let mut cache_error = None;
        if inserted > 0 {
            if let Err(e) = self.cache.persist().await {
                error!("❌ Failed to persist enrichment cache: {}", e);
                cache_error = Some(e.to_string());
            } else {
                info!("💾 Cached {} new enrichments", inserted);
            }
        }

        Ok(SearchPage { results, cache_error })
    }
}
