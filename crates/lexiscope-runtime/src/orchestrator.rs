//! Analysis pipeline: lexical + narrative analysis, merge, persist.

use std::sync::Arc;

use chrono::Utc;
use lexiscope_core::{
    AnalysisRecord, CapabilityReport, Connectivity, Error, LexiscopeConfig, Outcome, Result,
    SearchQuery,
};
use lexiscope_lexical::{InsightExtractor, TextInsights};
use lexiscope_narrative::mock::mock_analysis;
use lexiscope_narrative::{create_backend, LLMConfig, NarrativeAnalysis, NarrativeAnalyzer};
use lexiscope_store::{apply_query, create_store, AnalysisStore};
use tracing::{debug, info, warn};

use crate::types::{AnalysisReport, PersistStatus};

/// Top-level coordinator for analysis requests.
#[derive(Clone)]
pub struct AnalysisPipeline {
    extractor: InsightExtractor,
    analyzer: NarrativeAnalyzer,
    store: Option<Arc<dyn AnalysisStore>>,
}

impl AnalysisPipeline {
    pub fn new(
        extractor: InsightExtractor,
        analyzer: NarrativeAnalyzer,
        store: Option<Arc<dyn AnalysisStore>>,
    ) -> Self {
        Self {
            extractor,
            analyzer,
            store,
        }
    }

    /// Wire up every capability from configuration. Missing capabilities are
    /// logged and left out; the pipeline still serves requests.
    pub fn from_config(config: &LexiscopeConfig) -> Self {
        let extractor = InsightExtractor::from_config(&config.lexical);
        let llm_config = LLMConfig::load(&config.data_paths.llm_config_file);
        let analyzer = NarrativeAnalyzer::new(
            create_backend(&llm_config, config.llm_timeout()),
            config.llm_timeout(),
        );
        let store = create_store(config.store, &config.data_paths);

        let pipeline = Self::new(extractor, analyzer, store);
        let caps = pipeline.capabilities();
        info!(
            "Analysis pipeline initialized: database={}, llm={} ({}), nlp={} ({})",
            caps.database,
            caps.llm,
            caps.llm_model.as_deref().unwrap_or("offline"),
            caps.nlp,
            caps.nlp_pipeline.as_deref().unwrap_or("none"),
        );
        if !caps.fully_available() {
            warn!("Some capabilities are unavailable, affected analyses will use fallbacks");
        }
        pipeline
    }

    pub fn capabilities(&self) -> CapabilityReport {
        CapabilityReport {
            database: Connectivity::from_flag(
                self.store.as_ref().is_some_and(|s| s.is_available()),
            ),
            llm: Connectivity::from_flag(self.analyzer.is_available()),
            nlp: Connectivity::from_flag(self.extractor.is_available()),
            llm_model: self.analyzer.model().map(str::to_string),
            nlp_pipeline: self.extractor.pipeline_name().map(str::to_string),
        }
    }

    /// Analyze `text`, merge both analyzers' output and persist the record.
    ///
    /// Only blank input is an error; capability failures show up in
    /// `degradations` and `persist`.
    pub async fn analyze(&self, text: &str) -> Result<AnalysisReport> {
        if text.trim().is_empty() {
            return Err(Error::Validation("Text is required".into()));
        }

        let extractor = self.extractor.clone();
        let owned = text.to_string();
        let lexical = tokio::task::spawn_blocking(move || extractor.extract_insights(&owned));

        let (insights, narrative) = tokio::join!(lexical, self.analyzer.analyze(text));
        let insights = insights
            .unwrap_or_else(|e| Outcome::failed(format!("Lexical extraction aborted: {}", e)));

        let degradations: Vec<String> = [insights.reason(), narrative.reason()]
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect();
        let record = merge(text, insights, narrative);
        debug!(
            id = %record.id,
            sentiment = %record.sentiment,
            degraded = degradations.len(),
            "Merged analysis"
        );

        let persist = self.persist(&record);
        Ok(AnalysisReport {
            record,
            persist,
            degradations,
        })
    }

    fn persist(&self, record: &AnalysisRecord) -> PersistStatus {
        let Some(store) = &self.store else {
            return PersistStatus::Skipped {
                reason: "database unavailable".into(),
            };
        };
        match store.insert(record) {
            Ok(()) => PersistStatus::Stored,
            Err(e) => {
                warn!("Failed to persist analysis {}: {}", record.id, e);
                PersistStatus::Skipped {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Stored analyses matching `query`. Without a store the result is empty.
    pub fn search(&self, query: &SearchQuery) -> Result<Vec<AnalysisRecord>> {
        if query.topic.is_none() && query.keyword.is_none() {
            return Err(Error::Validation(
                "Either topic or keyword parameter is required".into(),
            ));
        }
        let Some(store) = &self.store else {
            return Ok(Vec::new());
        };
        let found = apply_query(store.list()?, query);
        debug!("Search matched {} analyses", found.len());
        Ok(found)
    }

    /// All stored analyses, newest first.
    pub fn list(&self) -> Result<Vec<AnalysisRecord>> {
        match &self.store {
            Some(store) => store.list(),
            None => Ok(Vec::new()),
        }
    }

    pub fn get(&self, id: &str) -> Result<AnalysisRecord> {
        self.store
            .as_ref()
            .map(|s| s.get(id))
            .transpose()?
            .flatten()
            .ok_or_else(|| Error::NotFound(format!("Analysis {} not found", id)))
    }
}

/// Combine both analyzers' output into a new record.
///
/// Entities, phrases, readability and counts come only from a fully
/// successful lexical pass.
fn merge(
    text: &str,
    insights: Outcome<TextInsights>,
    narrative: Outcome<NarrativeAnalysis>,
) -> AnalysisRecord {
    let full = insights.is_success();
    let insights = insights.unwrap_or_else(TextInsights::default);
    let narrative = narrative.unwrap_or_else(|| mock_analysis(text));

    let mut record = AnalysisRecord {
        id: AnalysisRecord::new_id(),
        text: text.to_string(),
        summary: narrative.summary,
        title: narrative.title,
        topics: narrative.topics,
        sentiment: narrative.sentiment,
        keywords: insights.keywords,
        confidence_score: narrative.confidence_score,
        entities: None,
        phrases: None,
        readability_score: None,
        word_count: None,
        sentence_count: None,
        created_at: Utc::now(),
    };
    if full {
        record.entities = Some(insights.entities);
        record.phrases = Some(insights.phrases);
        record.readability_score = Some(insights.readability_score);
        record.word_count = Some(insights.word_count);
        record.sentence_count = Some(insights.sentence_count);
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;
    use lexiscope_core::{DataPaths, LexicalConfig, NlpMode, Sentiment, SortBy, StoreMode};
    use lexiscope_lexical::{HeuristicPipeline, NlpPipeline};
    use lexiscope_narrative::{ChatMessage, CompletionBackend};
    use lexiscope_store::SqliteStore;
    use parking_lot::Mutex;
    use tempfile::TempDir;

    const REVIEW: &str = "I love this amazing product, it works great!";

    #[derive(Default)]
    struct MemoryStore {
        records: Mutex<Vec<AnalysisRecord>>,
    }

    impl AnalysisStore for MemoryStore {
        fn name(&self) -> &str {
            "memory"
        }

        fn is_available(&self) -> bool {
            true
        }

        fn insert(&self, record: &AnalysisRecord) -> Result<()> {
            self.records.lock().push(record.clone());
            Ok(())
        }

        fn get(&self, id: &str) -> Result<Option<AnalysisRecord>> {
            Ok(self.records.lock().iter().find(|r| r.id == id).cloned())
        }

        fn list(&self) -> Result<Vec<AnalysisRecord>> {
            let mut all = self.records.lock().clone();
            all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(all)
        }
    }

    struct ReadOnlyStore;

    impl AnalysisStore for ReadOnlyStore {
        fn name(&self) -> &str {
            "read-only"
        }

        fn is_available(&self) -> bool {
            true
        }

        fn insert(&self, _record: &AnalysisRecord) -> Result<()> {
            Err(Error::Database("attempt to write a readonly database".into()))
        }

        fn get(&self, _id: &str) -> Result<Option<AnalysisRecord>> {
            Ok(None)
        }

        fn list(&self) -> Result<Vec<AnalysisRecord>> {
            Ok(Vec::new())
        }
    }

    struct Canned(&'static str);

    #[async_trait]
    impl CompletionBackend for Canned {
        fn model(&self) -> &str {
            "canned"
        }

        async fn complete(&self, _messages: &[ChatMessage]) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    const STRUCTURED: &str = r#"{"summary":"An enthusiastic product review.","title":"Product praise","topics":["product","review"],"sentiment":"positive","confidence_score":0.92}"#;

    fn pipeline(
        nlp: bool,
        backend: Option<Arc<dyn CompletionBackend>>,
        store: Option<Arc<dyn AnalysisStore>>,
    ) -> AnalysisPipeline {
        let nlp: Option<Arc<dyn NlpPipeline>> = if nlp {
            Some(Arc::new(HeuristicPipeline::new()))
        } else {
            None
        };
        AnalysisPipeline::new(
            InsightExtractor::new(nlp, &LexicalConfig::default()),
            NarrativeAnalyzer::new(backend, Duration::from_secs(2)),
            store,
        )
    }

    #[tokio::test]
    async fn test_full_analysis_is_stored() {
        let store = Arc::new(MemoryStore::default());
        let p = pipeline(true, Some(Arc::new(Canned(STRUCTURED))), Some(store.clone()));

        let report = p.analyze(REVIEW).await.unwrap();
        assert!(report.degradations.is_empty(), "{:?}", report.degradations);
        assert!(report.persist.is_stored());
        assert!(report.warning().is_none());

        let record = &report.record;
        assert_eq!(record.summary, "An enthusiastic product review.");
        assert_eq!(record.title.as_deref(), Some("Product praise"));
        assert_eq!(record.sentiment, Sentiment::Positive);
        assert_eq!(record.keywords, vec!["product".to_string()]);
        assert_eq!(record.word_count, Some(8));
        assert_eq!(record.sentence_count, Some(1));
        assert!(record.entities.is_some());
        assert!(record.readability_score.is_some());

        assert_eq!(p.get(&record.id).unwrap().summary, record.summary);
        assert_eq!(store.records.lock().len(), 1);

        let caps = p.capabilities();
        assert!(caps.fully_available());
        assert_eq!(caps.llm_model.as_deref(), Some("canned"));
        assert_eq!(caps.nlp_pipeline.as_deref(), Some("heuristic"));
    }

    #[tokio::test]
    async fn test_offline_analysis_without_llm() {
        let p = pipeline(true, None, Some(Arc::new(MemoryStore::default())));
        let report = p.analyze(REVIEW).await.unwrap();
        assert_eq!(report.degradations.len(), 1);
        assert_eq!(report.record.sentiment, Sentiment::Positive);
        assert_eq!(report.record.confidence_score, 0.8);
        assert_eq!(report.record.topics, vec!["amazing", "product", "works"]);
        assert!(report.record.phrases.is_some());
    }

    #[tokio::test]
    async fn test_degraded_lexical_omits_detail_fields() {
        let p = pipeline(false, Some(Arc::new(Canned(STRUCTURED))), None);
        let report = p.analyze("The battery died. The battery was replaced.").await.unwrap();
        assert_eq!(report.degradations.len(), 1);
        let record = &report.record;
        assert_eq!(record.keywords, vec!["battery".to_string()]);
        assert!(record.entities.is_none());
        assert!(record.phrases.is_none());
        assert!(record.readability_score.is_none());
        assert!(record.word_count.is_none());
    }

    #[tokio::test]
    async fn test_blank_text_rejected_before_work() {
        let store = Arc::new(MemoryStore::default());
        let p = pipeline(true, None, Some(store.clone()));
        let err = p.analyze("   \n ").await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(store.records.lock().is_empty());
    }

    #[tokio::test]
    async fn test_missing_store_skips_persist() {
        let p = pipeline(true, None, None);
        let report = p.analyze(REVIEW).await.unwrap();
        assert!(!report.persist.is_stored());
        assert!(report.warning().unwrap().contains("not saved"));
        assert!(p.list().unwrap().is_empty());
        assert!(matches!(p.get(&report.record.id), Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_failing_insert_still_returns_record() {
        let p = pipeline(true, None, Some(Arc::new(ReadOnlyStore)));
        let report = p.analyze(REVIEW).await.unwrap();
        match &report.persist {
            PersistStatus::Skipped { reason } => assert!(reason.contains("readonly")),
            other => panic!("expected skipped, got {:?}", other),
        }
        assert!(!report.record.summary.is_empty());
    }

    #[tokio::test]
    async fn test_search_over_sqlite() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(SqliteStore::open(dir.path().join("lexiscope.db")).unwrap());
        let p = pipeline(true, None, Some(store));

        let first = p.analyze(REVIEW).await.unwrap().record;
        let second = p
            .analyze("This terrible product broke after a day. I hate it.")
            .await
            .unwrap()
            .record;

        let query = SearchQuery {
            keyword: Some("PRODUCT".into()),
            ..SearchQuery::default()
        };
        let found = p.search(&query).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].id, second.id);

        let by_sentiment = SearchQuery {
            sort_by: SortBy::Sentiment,
            ..query.clone()
        };
        let found = p.search(&by_sentiment).unwrap();
        assert_eq!(found[0].id, first.id);

        let negative_only = SearchQuery {
            sentiment: Some(Sentiment::Negative),
            ..query
        };
        let found = p.search(&negative_only).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, second.id);
    }

    #[test]
    fn test_search_requires_filter() {
        let p = pipeline(true, None, Some(Arc::new(MemoryStore::default())));
        assert!(matches!(p.search(&SearchQuery::default()), Err(Error::Validation(_))));

        let store_less = pipeline(true, None, None);
        let query = SearchQuery {
            topic: Some("health".into()),
            ..SearchQuery::default()
        };
        assert!(store_less.search(&query).unwrap().is_empty());
    }

    #[test]
    fn test_capabilities_from_config() {
        let dir = TempDir::new().unwrap();
        let config = LexiscopeConfig {
            port: 0,
            data_paths: DataPaths::new(dir.path()).unwrap(),
            store: StoreMode::Off,
            lexical: LexicalConfig {
                nlp: NlpMode::Off,
                ..LexicalConfig::default()
            },
            llm_timeout_secs: 1,
        };
        let caps = AnalysisPipeline::from_config(&config).capabilities();
        assert_eq!(caps.database, Connectivity::Disconnected);
        assert_eq!(caps.nlp, Connectivity::Disconnected);
        assert!(caps.nlp_pipeline.is_none());
        assert!(!caps.fully_available());
    }
}
