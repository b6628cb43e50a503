// Process-wide caches: one pipeline per model name, one Doc per (model, text).
// Neither cache evicts; entries live until the process exits.
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use super::{Doc, Pipeline};
use crate::error::AppResult;

static PIPELINES: Lazy<Mutex<HashMap<String, Arc<Pipeline>>>> = Lazy::new(|| Mutex::new(HashMap::new()));

static DOCS: Lazy<Mutex<HashMap<(String, String), Arc<Doc>>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// Return the pipeline called `name`, building it on first use.
/// Every call with the same name returns the same instance.
pub fn load_pipeline(name: &str) -> AppResult<Arc<Pipeline>> {
    // the lock is held while building so a pipeline is never built twice
    let mut pipelines = PIPELINES.lock();
    if let Some(pipeline) = pipelines.get(name) {
        debug!(model = name, "pipeline cache hit");
        return Ok(Arc::clone(pipeline));
    }

    debug!(model = name, "pipeline cache miss");
    let pipeline = Arc::new(Pipeline::load(name)?);
    pipelines.insert(name.to_string(), Arc::clone(&pipeline));
    Ok(pipeline)
}

/// Run `pipeline` over `text`, reusing the result of an earlier identical call.
pub fn analyze(pipeline: &Pipeline, text: &str) -> Arc<Doc> {
    let key = (pipeline.name().to_string(), text.to_string());
    let mut docs = DOCS.lock();
    if let Some(doc) = docs.get(&key) {
        debug!(model = pipeline.name(), chars = text.len(), "analysis cache hit");
        return Arc::clone(doc);
    }

    debug!(model = pipeline.name(), chars = text.len(), "analysis cache miss");
    let doc = Arc::new(pipeline.process(text));
    docs.insert(key, Arc::clone(&doc));
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_same_instance_per_name() {
        let a = load_pipeline("en_core_web_sm").unwrap();
        let b = load_pipeline("en_core_web_sm").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_distinct_instance_per_name() {
        let sm = load_pipeline("en_core_web_sm").unwrap();
        let md = load_pipeline("en_core_web_md").unwrap();
        assert!(!Arc::ptr_eq(&sm, &md));
        assert_eq!(md.name(), "en_core_web_md");
    }

    #[test]
    fn test_unknown_model_not_cached() {
        assert!(matches!(load_pipeline("no_such_model"), Err(AppError::PipelineUnavailable(_))));
        assert!(!PIPELINES.lock().contains_key("no_such_model"));
    }

    #[test]
    fn test_same_instance_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| load_pipeline("en_core_web_md").unwrap()))
            .collect();
        let loaded: Vec<Arc<Pipeline>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for p in &loaded[1..] {
            assert!(Arc::ptr_eq(&loaded[0], p));
        }
    }

    #[test]
    fn test_analysis_is_memoized() {
        let pipeline = load_pipeline("en_core_web_sm").unwrap();
        let first = analyze(&pipeline, "Memo test: Paris in spring.");
        let second = analyze(&pipeline, "Memo test: Paris in spring.");
        let other = analyze(&pipeline, "Memo test: Tokyo in autumn.");
        assert!(Arc::ptr_eq(&first, &second));
        assert!(!Arc::ptr_eq(&first, &other));
        assert_eq!(first.text, "Memo test: Paris in spring.");
    }

    #[test]
    fn test_analysis_keyed_by_model() {
        let sm = load_pipeline("en_core_web_sm").unwrap();
        let md = load_pipeline("en_core_web_md").unwrap();
        let text = "Key test: we flew to Iceland.";
        let a = analyze(&sm, text);
        let b = analyze(&md, text);
        assert!(!Arc::ptr_eq(&a, &b));
        assert!(a.entities.is_empty());
        assert_eq!(b.entities.len(), 1);
    }
}
