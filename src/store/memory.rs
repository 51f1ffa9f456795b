//! store::memory
//!
//! In-memory content store for tests and offline fixtures.
//!
//! # Design
//!
//! The memory store evaluates [`Query`] values directly against stored JSON
//! documents: type filter, ordering, projection (including reference
//! dereference) and slicing. Every write is validated against the schema,
//! so content that could never be saved on the platform can never be read
//! back either.
//!
//! For testing error paths and lifecycles it can be configured to fail
//! fetches, and its gate can hold fetches open until released.
//!
//! # Example
//!
//! ```
//! use groundwork::store::{ContentStore, MemoryStore, Query};
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let store = MemoryStore::new();
//! store.insert(json!({ "_id": "t1", "_type": "testimonial", "name": "Ana", "review": "Spotless work" })).unwrap();
//!
//! let result = store.fetch(&Query::documents("testimonial").fields(["name"])).await.unwrap();
//! assert_eq!(result, json!([{ "name": "Ana" }]));
//! # });
//! ```

use std::cmp::Ordering as CmpOrdering;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use tokio::sync::watch;

use super::query::{Direction, Ordering, Projection, Query, Range};
use super::traits::{ContentStore, StoreError};
use crate::content::{
    validate_document_with, DocumentsResolver, ValidationReport, Violation, ViolationKind,
};
use crate::core::types::DocumentId;

/// Creation timestamps are assigned from this instant (2024-01-01T00:00:00Z),
/// one second apart, so creation order is preserved.
const CREATED_AT_BASE: i64 = 1_704_067_200;

/// In-memory content store.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    /// Internal state shared across clones.
    inner: Arc<Mutex<MemoryStoreInner>>,
    /// `true` while fetches are being held open.
    gate: Arc<watch::Sender<bool>>,
}

/// Internal mutable state.
#[derive(Debug)]
struct MemoryStoreInner {
    /// Documents in insertion order.
    documents: Vec<Value>,
    /// Next creation sequence number.
    next_seq: i64,
    /// Failure configuration.
    fail_on: Option<FailOn>,
    /// Recorded operations for verification.
    operations: Vec<StoreOperation>,
}

/// Configuration for which fetches should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail every fetch with the given error.
    Fetch(StoreError),
    /// Fail fetches for one document type with the given error.
    FetchType(String, StoreError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOperation {
    Fetch { query: String },
    Insert { id: String },
    Delete { id: String },
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        let (gate, _) = watch::channel(false);
        Self {
            inner: Arc::new(Mutex::new(MemoryStoreInner {
                documents: Vec::new(),
                next_seq: 0,
                fail_on: None,
                operations: Vec::new(),
            })),
            gate: Arc::new(gate),
        }
    }

    /// Create a store holding `documents`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Rejected` if any document fails validation.
    pub fn with_documents(documents: Vec<Value>) -> Result<Self, StoreError> {
        let store = Self::new();
        store.insert_all(documents)?;
        Ok(store)
    }

    fn lock(&self) -> MutexGuard<'_, MemoryStoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Validate and store a document, replacing any with the same `_id`.
    ///
    /// References are resolved against documents already in the store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Rejected` with the full validation report.
    pub fn insert(&self, doc: Value) -> Result<DocumentId, StoreError> {
        let mut ids = self.insert_all(vec![doc])?;
        ids.pop()
            .ok_or_else(|| StoreError::Decode("no document inserted".into()))
    }

    /// Validate and store a batch atomically.
    ///
    /// References may point at other documents in the same batch. Nothing
    /// is stored unless every document passes.
    pub fn insert_all(&self, docs: Vec<Value>) -> Result<Vec<DocumentId>, StoreError> {
        let mut inner = self.lock();

        let mut visible: Vec<Value> = inner.documents.clone();
        visible.extend(docs.iter().cloned());

        let mut ids = Vec::with_capacity(docs.len());
        for doc in &docs {
            validate_document_with(doc, &DocumentsResolver(&visible))?;
            ids.push(document_id(doc)?);
        }

        for (mut doc, id) in docs.into_iter().zip(ids.iter()) {
            let existing = inner
                .documents
                .iter()
                .position(|d| d.get("_id").and_then(Value::as_str) == Some(id.as_str()));

            if doc.get("_createdAt").is_none() {
                let created_at = match existing {
                    Some(i) => inner.documents[i].get("_createdAt").cloned(),
                    None => None,
                }
                .unwrap_or_else(|| Value::String(creation_timestamp(inner.next_seq)));
                if let Value::Object(map) = &mut doc {
                    map.insert("_createdAt".to_string(), created_at);
                }
            }
            inner.next_seq += 1;

            match existing {
                Some(i) => inner.documents[i] = doc,
                None => inner.documents.push(doc),
            }
            inner.operations.push(StoreOperation::Insert {
                id: id.to_string(),
            });
            tracing::debug!(id = %id, "document stored");
        }

        Ok(ids)
    }

    /// Remove a document. Returns whether it existed.
    pub fn delete(&self, id: &str) -> bool {
        let mut inner = self.lock();
        let before = inner.documents.len();
        inner
            .documents
            .retain(|d| d.get("_id").and_then(Value::as_str) != Some(id));
        inner.operations.push(StoreOperation::Delete { id: id.to_string() });
        inner.documents.len() != before
    }

    /// Get a stored document by id (for test verification).
    pub fn get(&self, id: &str) -> Option<Value> {
        self.lock()
            .documents
            .iter()
            .find(|d| d.get("_id").and_then(Value::as_str) == Some(id))
            .cloned()
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.lock().documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Configure the store to fail fetches.
    ///
    /// # Example
    ///
    /// ```
    /// use groundwork::store::{FailOn, MemoryStore, StoreError};
    ///
    /// let store = MemoryStore::new()
    ///     .fail_on(FailOn::Fetch(StoreError::RateLimited));
    /// ```
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        self.set_fail_on(fail_on);
        self
    }

    /// Configure failures on a shared handle.
    pub fn set_fail_on(&self, fail_on: FailOn) {
        self.lock().fail_on = Some(fail_on);
    }

    /// Clear the failure configuration.
    pub fn clear_fail_on(&self) {
        self.lock().fail_on = None;
    }

    /// Hold every fetch open until [`release`](Self::release) is called.
    pub fn hold(&self) {
        self.gate.send_replace(true);
    }

    /// Let held fetches complete.
    pub fn release(&self) {
        self.gate.send_replace(false);
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<StoreOperation> {
        self.lock().operations.clone()
    }

    /// Number of fetches issued so far.
    pub fn fetch_count(&self) -> usize {
        self.lock()
            .operations
            .iter()
            .filter(|op| matches!(op, StoreOperation::Fetch { .. }))
            .count()
    }

    async fn wait_for_gate(&self) {
        let mut rx = self.gate.subscribe();
        loop {
            let held = *rx.borrow_and_update();
            if !held {
                break;
            }
            if rx.changed().await.is_err() {
                break;
            }
        }
    }

    fn check_fail(&self, query: &Query) -> Option<StoreError> {
        match &self.lock().fail_on {
            Some(FailOn::Fetch(e)) => Some(e.clone()),
            Some(FailOn::FetchType(doc_type, e)) if doc_type == query.doc_type() => Some(e.clone()),
            _ => None,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn fetch(&self, query: &Query) -> Result<Value, StoreError> {
        let groq = query.to_groq();
        tracing::debug!(store = self.name(), query = %groq, "fetching");
        self.lock()
            .operations
            .push(StoreOperation::Fetch { query: groq });

        self.wait_for_gate().await;

        if let Some(err) = self.check_fail(query) {
            tracing::warn!(store = self.name(), error = %err, "query failed");
            return Err(err);
        }

        let inner = self.lock();
        Ok(evaluate(&inner.documents, query))
    }
}

/// Parse a content export: a JSON array of documents or NDJSON.
///
/// # Errors
///
/// Returns the first JSON syntax error.
pub fn parse_documents(text: &str) -> Result<Vec<Value>, serde_json::Error> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed);
    }
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(serde_json::from_str)
        .collect()
}

fn document_id(doc: &Value) -> Result<DocumentId, ValidationReport> {
    let type_name = doc.get("_type").and_then(Value::as_str).unwrap_or_default();
    let report = |message: &str| ValidationReport {
        document_type: type_name.to_string(),
        document_id: None,
        violations: vec![Violation {
            path: "_id".to_string(),
            kind: ViolationKind::Required,
            message: message.to_string(),
        }],
    };
    let raw = doc
        .get("_id")
        .and_then(Value::as_str)
        .ok_or_else(|| report("document id is required"))?;
    DocumentId::new(raw).map_err(|e| report(&e.to_string()))
}

fn creation_timestamp(seq: i64) -> String {
    DateTime::<Utc>::from_timestamp(CREATED_AT_BASE + seq, 0)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

// =============================================================================
// Query evaluation
// =============================================================================

fn evaluate(documents: &[Value], query: &Query) -> Value {
    let mut matched: Vec<&Value> = documents
        .iter()
        .filter(|doc| doc.get("_type").and_then(Value::as_str) == Some(query.doc_type()))
        .collect();

    if !query.orderings().is_empty() {
        // Stable: ties keep insertion order.
        matched.sort_by(|a, b| compare_documents(a, b, query.orderings()));
    }

    let select = |doc: &Value| project(doc, query.projection(), documents);

    match query.range() {
        Some(Range::Index(i)) => matched
            .get(i)
            .copied()
            .map(select)
            .unwrap_or(Value::Null),
        Some(Range::Slice { start, end }) => {
            let count = if end >= start { end - start + 1 } else { 0 };
            Value::Array(
                matched
                    .iter()
                    .copied()
                    .skip(start)
                    .take(count)
                    .map(select)
                    .collect(),
            )
        }
        Some(Range::Empty) => Value::Array(Vec::new()),
        None => Value::Array(matched.iter().copied().map(select).collect()),
    }
}

fn compare_documents(a: &Value, b: &Value, orderings: &[Ordering]) -> CmpOrdering {
    for ordering in orderings {
        let ord = compare_values(
            a.get(&ordering.field),
            b.get(&ordering.field),
            ordering.direction,
        );
        if ord != CmpOrdering::Equal {
            return ord;
        }
    }
    CmpOrdering::Equal
}

/// Missing and null values sort last in either direction.
fn compare_values(a: Option<&Value>, b: Option<&Value>, direction: Direction) -> CmpOrdering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => CmpOrdering::Equal,
        (None, Some(_)) => CmpOrdering::Greater,
        (Some(_), None) => CmpOrdering::Less,
        (Some(a), Some(b)) => {
            let ord = compare_present(a, b);
            match direction {
                Direction::Asc => ord,
                Direction::Desc => ord.reverse(),
            }
        }
    }
}

fn compare_present(a: &Value, b: &Value) -> CmpOrdering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or_default();
            let y = y.as_f64().unwrap_or_default();
            x.partial_cmp(&y).unwrap_or(CmpOrdering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

fn project(doc: &Value, projection: &[Projection], documents: &[Value]) -> Value {
    if projection.is_empty() {
        return doc.clone();
    }

    let mut out = Map::new();
    for entry in projection {
        let value = match entry {
            Projection::Field(name) => doc.get(name).cloned().unwrap_or(Value::Null),
            Projection::Alias { path, .. } => eval_path(doc, path, documents),
            Projection::Deref { field, fields } => deref_project(doc.get(field), fields, documents),
        };
        out.insert(entry.output_name().to_string(), value);
    }
    Value::Object(out)
}

fn resolve_ref<'a>(value: &Value, documents: &'a [Value]) -> Option<&'a Value> {
    let id = value.get("_ref")?.as_str()?;
    documents
        .iter()
        .find(|doc| doc.get("_id").and_then(Value::as_str) == Some(id))
}

fn deref_project(value: Option<&Value>, fields: &[String], documents: &[Value]) -> Value {
    match value {
        Some(Value::Array(items)) => Value::Array(
            items
                .iter()
                .map(|item| deref_project(Some(item), fields, documents))
                .collect(),
        ),
        Some(reference) => match resolve_ref(reference, documents) {
            Some(target) if fields.is_empty() => target.clone(),
            Some(target) => Value::Object(
                fields
                    .iter()
                    .map(|f| (f.clone(), target.get(f).cloned().unwrap_or(Value::Null)))
                    .collect(),
            ),
            None => Value::Null,
        },
        None => Value::Null,
    }
}

/// Evaluate a dotted path such as `image.asset->url`.
fn eval_path(doc: &Value, path: &str, documents: &[Value]) -> Value {
    let mut current = doc.clone();
    for segment in path.split('.') {
        let mut parts = segment.split("->");
        if let Some(name) = parts.next().filter(|n| !n.is_empty()) {
            current = current.get(name).cloned().unwrap_or(Value::Null);
        }
        for next in parts {
            current = resolve_ref(&current, documents)
                .cloned()
                .unwrap_or(Value::Null);
            if !next.is_empty() {
                current = current.get(next).cloned().unwrap_or(Value::Null);
            }
        }
        if current.is_null() {
            break;
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn service(id: &str, title: &str, order: i64) -> Value {
        json!({ "_id": id, "_type": "service", "title": title, "order": order })
    }

    #[tokio::test]
    async fn orders_ascending_with_stable_ties() {
        let store = MemoryStore::new();
        store.insert(service("s-a", "A", 2)).unwrap();
        store.insert(service("s-b", "B", 1)).unwrap();
        store.insert(service("s-c", "C", 2)).unwrap();

        let q = Query::documents("service")
            .order_by("order", Direction::Asc)
            .fields(["title"]);
        let result = store.fetch(&q).await.unwrap();
        assert_eq!(result, json!([{ "title": "B" }, { "title": "A" }, { "title": "C" }]));
    }

    #[tokio::test]
    async fn nulls_sort_last() {
        let store = MemoryStore::new();
        store
            .insert(json!({ "_id": "s-x", "_type": "service", "title": "X" }))
            .unwrap();
        store.insert(service("s-y", "Y", 5)).unwrap();

        for direction in [Direction::Asc, Direction::Desc] {
            let q = Query::documents("service")
                .order_by("order", direction)
                .fields(["title"]);
            let result = store.fetch(&q).await.unwrap();
            assert_eq!(result[1]["title"], "X");
        }
    }

    #[tokio::test]
    async fn first_on_empty_is_null() {
        let store = MemoryStore::new();
        let result = store.fetch(&Query::documents("aboutus").first()).await.unwrap();
        assert!(result.is_null());
    }

    #[tokio::test]
    async fn deref_and_alias() {
        let store = MemoryStore::new();
        store.insert(service("svc-floor", "Flooring", 1)).unwrap();
        store
            .insert(json!({
                "_id": "proj-1",
                "_type": "project",
                "title": "Oak floors",
                "slug": { "current": "oak-floors" },
                "shortDescription": "Hardwood throughout",
                "service": { "_type": "reference", "_ref": "svc-floor" },
                "images": [{ "_type": "image", "asset": { "_ref": "image-a-10x10-jpg" }, "alt": "Oak" }]
            }))
            .unwrap();

        let q = Query::documents("project")
            .deref("service", &["title"])
            .alias("serviceTitle", "service->title")
            .alias("missing", "nothing->title");
        let result = store.fetch(&q).await.unwrap();
        assert_eq!(result[0]["service"], json!({ "title": "Flooring" }));
        assert_eq!(result[0]["serviceTitle"], "Flooring");
        assert!(result[0]["missing"].is_null());
    }

    #[test]
    fn insert_rejects_invalid_document() {
        let store = MemoryStore::new();
        let err = store
            .insert(json!({ "_id": "t1", "_type": "testimonial", "name": "No review" }))
            .unwrap_err();
        match err {
            StoreError::Rejected(report) => assert!(report.has_violation_at("review")),
            other => panic!("expected rejection, got {:?}", other),
        }
        assert!(store.is_empty());
    }

    #[test]
    fn insert_requires_id() {
        let store = MemoryStore::new();
        let err = store
            .insert(json!({ "_type": "testimonial", "name": "A", "review": "B" }))
            .unwrap_err();
        assert!(matches!(err, StoreError::Rejected(r) if r.has_violation_at("_id")));
    }

    #[test]
    fn batch_resolves_references_within_batch() {
        let store = MemoryStore::with_documents(vec![
            json!({
                "_id": "proj-1",
                "_type": "project",
                "title": "Deck",
                "slug": { "current": "deck" },
                "shortDescription": "Cedar deck",
                "service": { "_ref": "svc-1" },
                "images": [{ "_type": "image", "asset": { "_ref": "image-a-10x10-jpg" }, "alt": "Deck" }]
            }),
            service("svc-1", "Outdoor", 1),
        ])
        .unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn replace_keeps_creation_time() {
        let store = MemoryStore::new();
        store.insert(service("s1", "Old", 1)).unwrap();
        let created = store.get("s1").unwrap()["_createdAt"].clone();
        store.insert(service("s1", "New", 1)).unwrap();

        assert_eq!(store.len(), 1);
        let doc = store.get("s1").unwrap();
        assert_eq!(doc["title"], "New");
        assert_eq!(doc["_createdAt"], created);
    }

    #[test]
    fn creation_timestamps_increase() {
        assert_eq!(creation_timestamp(0), "2024-01-01T00:00:00Z");
        assert!(creation_timestamp(1) > creation_timestamp(0));
    }

    #[tokio::test]
    async fn fail_on_type_only() {
        let store = MemoryStore::new().fail_on(FailOn::FetchType(
            "service".into(),
            StoreError::NetworkError("offline".into()),
        ));
        assert!(store.fetch(&Query::documents("service")).await.is_err());
        assert!(store.fetch(&Query::documents("project")).await.is_ok());

        store.clear_fail_on();
        assert!(store.fetch(&Query::documents("service")).await.is_ok());
        assert_eq!(store.fetch_count(), 3);
    }

    #[tokio::test]
    async fn hold_and_release() {
        let store = MemoryStore::new();
        store.hold();

        let handle = tokio::spawn({
            let store = store.clone();
            async move { store.fetch(&Query::documents("service")).await }
        });

        tokio::task::yield_now().await;
        assert!(!handle.is_finished());

        store.release();
        let result = handle.await.unwrap().unwrap();
        assert_eq!(result, json!([]));
    }

    #[test]
    fn parses_array_and_ndjson() {
        let array = parse_documents(r#"[{"_id":"a"},{"_id":"b"}]"#).unwrap();
        assert_eq!(array.len(), 2);

        let ndjson = parse_documents("{\"_id\":\"a\"}\n\n{\"_id\":\"b\"}\n").unwrap();
        assert_eq!(ndjson.len(), 2);
    }

    #[test]
    fn delete_removes_document() {
        let store = MemoryStore::new();
        store.insert(service("s1", "A", 1)).unwrap();
        assert!(store.delete("s1"));
        assert!(!store.delete("s1"));
        assert!(store.is_empty());
    }
}
