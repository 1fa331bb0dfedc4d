//! Catalog ingestion: read JSONL → map rows → embed in batches → upsert into Qdrant.
//!
//! Point ids are UUIDv5 of the catalog id, so re-ingesting the same file
//! overwrites points instead of duplicating them. The payload is the row's
//! metadata plus the embedded text under `content`.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use qdrant_client::qdrant::{
    ListValue, PointId, PointStruct, Struct, Value as QValue, Vector, Vectors, value, vectors,
};
use serde_json::Value;
use services::uuid::stable_uuid;
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::embed::EmbeddingsProvider;
use crate::embed_pool::embed_all;
use crate::errors::StoreError;
use crate::io_jsonl::read_all_jsonl;
use crate::mappers::map_catalog_row;
use crate::qdrant_facade::QdrantFacade;
use crate::record::{CONTENT_KEY, CatalogRecord, IngestStats};

/// How the target collection is prepared before writing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectionMode {
    /// Create if missing, keep existing points.
    Keep,
    /// Drop and create again.
    Fresh,
}

/// Ingests the catalog JSONL at `jsonl_path` into the configured collection.
pub async fn ingest_catalog(
    cfg: &StoreConfig,
    jsonl_path: impl AsRef<Path>,
    mode: CollectionMode,
    provider: &dyn EmbeddingsProvider,
    client: &QdrantFacade,
) -> Result<IngestStats, StoreError> {
    let started = Instant::now();
    info!(
        target: "product_store::ingest",
        path = ?jsonl_path.as_ref(),
        collection = client.collection(),
        ?mode,
        "ingest_catalog: start"
    );

    let read = read_all_jsonl(&jsonl_path)?;
    let total_rows = read.rows.len() + read.malformed;

    let (records, unusable) = collect_records(&read.rows);
    let skipped = read.malformed + unusable;

    if records.is_empty() {
        warn!(target: "product_store::ingest", "ingest_catalog: nothing to index");
        return Ok(IngestStats {
            read: total_rows,
            skipped,
            indexed: 0,
            duration_ms: started.elapsed().as_millis(),
        });
    }

    let space = cfg.vector_space();
    match mode {
        CollectionMode::Keep => client.ensure_collection(&space).await?,
        CollectionMode::Fresh => client.reset_collection(&space).await?,
    }

    let batch_size = cfg.upsert_batch.max(1);
    let pb = ProgressBar::new(records.len().div_ceil(batch_size) as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})",
        )
        .map(|s| s.progress_chars("##-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut indexed = 0usize;
    for chunk in records.chunks(batch_size) {
        let texts: Vec<String> = chunk.iter().map(|r| r.text.clone()).collect();
        let vectors = embed_all(
            &texts,
            provider,
            cfg.embedding.dim,
            cfg.embedding.concurrency,
        )
        .await?;

        let points = build_points(chunk, vectors);
        indexed += client.upsert_points(points).await?;
        pb.inc(1);
    }
    pb.finish_with_message("ingestion complete");

    let stats = IngestStats {
        read: total_rows,
        skipped,
        indexed,
        duration_ms: started.elapsed().as_millis(),
    };

    info!(
        target: "product_store::ingest",
        read = stats.read,
        skipped = stats.skipped,
        indexed = stats.indexed,
        duration_ms = stats.duration_ms,
        "ingest_catalog: finished"
    );

    Ok(stats)
}

/// Maps rows and drops duplicates by catalog id (first wins).
///
/// Returns the records and the number of rows dropped.
pub(crate) fn collect_records(rows: &[Value]) -> (Vec<CatalogRecord>, usize) {
    let mut seen: HashSet<String> = HashSet::with_capacity(rows.len());
    let mut out = Vec::with_capacity(rows.len());
    let mut dropped = 0usize;

    for row in rows {
        match map_catalog_row(row) {
            Some(r) if seen.insert(r.id.clone()) => out.push(r),
            Some(r) => {
                debug!(target: "product_store::ingest", id = %r.id, "duplicate id dropped");
                dropped += 1;
            }
            None => dropped += 1,
        }
    }

    (out, dropped)
}

/// Builds Qdrant points for a batch of records and their vectors.
fn build_points(chunk: &[CatalogRecord], vectors: Vec<Vec<f32>>) -> Vec<PointStruct> {
    chunk
        .iter()
        .zip(vectors)
        .map(|(r, vector)| {
            let pid: PointId = stable_uuid(&r.id).to_string().into();

            PointStruct {
                id: Some(pid),
                payload: build_payload(r),
                vectors: Some(Vectors {
                    vectors_options: Some(vectors::VectorsOptions::Vector(Vector {
                        data: vector,
                        ..Default::default()
                    })),
                }),
                ..Default::default()
            }
        })
        .collect()
}

/// Payload: metadata keys plus `content`.
pub(crate) fn build_payload(r: &CatalogRecord) -> HashMap<String, QValue> {
    let mut payload: HashMap<String, QValue> = r
        .metadata
        .iter()
        .map(|(k, v)| (k.clone(), json_to_qvalue(v.clone())))
        .collect();
    payload.insert(
        CONTENT_KEY.into(),
        QValue {
            kind: Some(value::Kind::StringValue(r.text.clone())),
        },
    );
    payload
}

/// Converts `serde_json::Value` into Qdrant `Value` (handles arrays/objects).
fn json_to_qvalue(v: Value) -> QValue {
    use value::Kind as K;
    match v {
        Value::String(s) => QValue {
            kind: Some(K::StringValue(s)),
        },
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                QValue {
                    kind: Some(K::IntegerValue(i)),
                }
            } else {
                match n.as_f64().filter(|f| f.is_finite()) {
                    Some(f) => QValue {
                        kind: Some(K::DoubleValue(f)),
                    },
                    None => QValue { kind: None },
                }
            }
        }
        Value::Bool(b) => QValue {
            kind: Some(K::BoolValue(b)),
        },
        Value::Array(arr) => QValue {
            kind: Some(K::ListValue(ListValue {
                values: arr.into_iter().map(json_to_qvalue).collect(),
            })),
        },
        Value::Object(map) => QValue {
            kind: Some(K::StructValue(Struct {
                fields: map
                    .into_iter()
                    .map(|(k, v)| (k, json_to_qvalue(v)))
                    .collect(),
            })),
        },
        Value::Null => QValue { kind: None },
    }
}
