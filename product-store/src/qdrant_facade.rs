//! Thin adapter around `qdrant-client` to isolate API usage.
//!
//! All Qdrant calls go through this facade so the rest of the crate never
//! touches the builder API directly.

use std::collections::HashMap;

use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, SearchParamsBuilder, SearchPointsBuilder,
    UpsertPointsBuilder, Value as QValue, VectorParamsBuilder,
};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::{DistanceKind, StoreConfig, VectorSpace};
use crate::errors::StoreError;

/// A facade over the Qdrant client bound to one collection.
pub struct QdrantFacade {
    client: Qdrant,
    collection: String,
}

impl QdrantFacade {
    /// Creates a new facade from the given configuration.
    pub fn new(cfg: &StoreConfig) -> Result<Self, StoreError> {
        cfg.validate()?;

        let mut builder = Qdrant::from_url(&cfg.qdrant_url);
        if let Some(key) = &cfg.qdrant_api_key {
            builder = builder.api_key(key.clone());
        }
        let client = builder
            .build()
            .map_err(|e| StoreError::Qdrant(e.to_string()))?;

        Ok(Self {
            client,
            collection: cfg.collection.clone(),
        })
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Creates the collection unless it already exists.
    pub async fn ensure_collection(&self, space: &VectorSpace) -> Result<(), StoreError> {
        info!(
            target: "product_store::qdrant",
            collection = %self.collection,
            size = space.size,
            distance = ?space.distance,
            "ensure_collection"
        );

        match self.client.collection_info(&self.collection).await {
            Ok(_) => {
                debug!(target: "product_store::qdrant", "collection already exists");
                return Ok(());
            }
            Err(err) => {
                warn!(
                    target: "product_store::qdrant",
                    collection = %self.collection,
                    error = %err,
                    "collection not found, will be created"
                );
            }
        }

        self.create(space).await
    }

    /// Drops the collection (ignoring "not found") and creates it again.
    pub async fn reset_collection(&self, space: &VectorSpace) -> Result<(), StoreError> {
        if let Err(e) = self.client.delete_collection(&self.collection).await {
            debug!(target: "product_store::qdrant", error = %e, "delete_collection ignored");
        }
        self.create(space).await
    }

    async fn create(&self, space: &VectorSpace) -> Result<(), StoreError> {
        let distance = match space.distance {
            DistanceKind::Cosine => Distance::Cosine,
            DistanceKind::Dot => Distance::Dot,
            DistanceKind::Euclid => Distance::Euclid,
        };
        debug!(target: "product_store::qdrant", ?distance, size = space.size, "create_collection");

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection)
                    .vectors_config(VectorParamsBuilder::new(space.size as u64, distance)),
            )
            .await
            .map_err(|e| StoreError::Qdrant(format!("create_collection: {e}")))?;

        info!(target: "product_store::qdrant", collection = %self.collection, "collection created");
        Ok(())
    }

    /// Upserts a batch of points and waits for it to be applied.
    ///
    /// Returns the number of points written.
    pub async fn upsert_points(&self, points: Vec<PointStruct>) -> Result<usize, StoreError> {
        if points.is_empty() {
            return Ok(0);
        }
        let n = points.len();

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, points).wait(true))
            .await
            .map_err(|e| StoreError::Qdrant(format!("upsert_points: {e}")))?;

        debug!(target: "product_store::qdrant", points = n, "upsert done");
        Ok(n)
    }

    /// k-NN search returning `(score, payload)` best-first.
    pub async fn search(
        &self,
        vector: Vec<f32>,
        top_k: u64,
        exact: bool,
    ) -> Result<Vec<(f32, Value)>, StoreError> {
        debug!(
            target: "product_store::qdrant",
            collection = %self.collection,
            top_k,
            exact,
            "search"
        );

        let mut builder =
            SearchPointsBuilder::new(&self.collection, vector, top_k).with_payload(true);
        if exact {
            builder = builder.params(SearchParamsBuilder::default().exact(true));
        }

        let res = self
            .client
            .search_points(builder)
            .await
            .map_err(|e| StoreError::Qdrant(format!("search_points: {e}")))?;

        Ok(res
            .result
            .into_iter()
            .map(|r| (r.score, qpayload_to_json(r.payload)))
            .collect())
    }
}

/// Converts a Qdrant payload into a JSON object.
pub(crate) fn qpayload_to_json(p: HashMap<String, QValue>) -> Value {
    Value::Object(
        p.into_iter()
            .map(|(k, v)| (k, qvalue_to_json(v)))
            .collect(),
    )
}

fn qvalue_to_json(v: QValue) -> Value {
    use qdrant_client::qdrant::value::Kind as K;
    match v.kind {
        Some(K::StringValue(s)) => Value::String(s),
        Some(K::IntegerValue(i)) => Value::Number(i.into()),
        Some(K::DoubleValue(f)) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Some(K::BoolValue(b)) => Value::Bool(b),
        Some(K::ListValue(l)) => Value::Array(l.values.into_iter().map(qvalue_to_json).collect()),
        Some(K::StructValue(s)) => Value::Object(
            s.fields
                .into_iter()
                .map(|(k, v)| (k, qvalue_to_json(v)))
                .collect(),
        ),
        _ => Value::Null,
    }
}
