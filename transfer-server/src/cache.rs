//! Caching layer for MBTA API responses.
//!
//! Predictions go stale in under a minute, so they get a short TTL
//! keyed by stop and page size. Shape geometry is effectively static,
//! so it gets a long TTL keyed by canonical route id, caching the
//! empty result too so an unmapped route id does not hammer the
//! upstream. Nearby-stop lookups bucket the coordinate and radius to
//! three decimal places (~100 m) to bound cache cardinality.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::{Prediction, StopId};
use crate::mbta::{MbtaClient, MbtaError, StopResource, convert_predictions};

/// Cache key for nearby-stop lookups: (lat bucket, lng bucket, radius
/// bucket, limit). Every parameter that changes the upstream result is
/// part of the key.
type NearbyKey = (i64, i64, i64, u8);

/// Cache key for prediction lookups: (stop, page limit).
type PredictionsKey = (StopId, u8);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached predictions.
    pub predictions_ttl: Duration,

    /// TTL for cached shapes and stop listings.
    pub static_ttl: Duration,

    /// Maximum number of entries per cache.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            predictions_ttl: Duration::from_secs(60),
            static_ttl: Duration::from_secs(60 * 60),
            max_capacity: 1000,
        }
    }
}

/// MBTA client with caching.
///
/// Wraps an [`MbtaClient`] and caches converted responses.
pub struct CachedMbtaClient {
    client: MbtaClient,
    predictions: MokaCache<PredictionsKey, Arc<Vec<Prediction>>>,
    shapes: MokaCache<String, Arc<Option<String>>>,
    nearby: MokaCache<NearbyKey, Arc<Vec<StopResource>>>,
    stations: MokaCache<(), Arc<Vec<StopResource>>>,
}

/// Bucket a coordinate to three decimal places.
fn coord_bucket(value: f64) -> i64 {
    (value * 1000.0).round() as i64
}

fn nearby_key(lat: f64, lng: f64, radius: f64, limit: u8) -> NearbyKey {
    (
        coord_bucket(lat),
        coord_bucket(lng),
        coord_bucket(radius),
        limit,
    )
}

impl CachedMbtaClient {
    /// Create a new cached client.
    pub fn new(client: MbtaClient, config: &CacheConfig) -> Self {
        let predictions = MokaCache::builder()
            .time_to_live(config.predictions_ttl)
            .max_capacity(config.max_capacity)
            .build();
        let shapes = MokaCache::builder()
            .time_to_live(config.static_ttl)
            .max_capacity(config.max_capacity)
            .build();
        let nearby = MokaCache::builder()
            .time_to_live(config.static_ttl)
            .max_capacity(config.max_capacity)
            .build();
        let stations = MokaCache::builder()
            .time_to_live(config.static_ttl)
            .max_capacity(1)
            .build();

        Self {
            client,
            predictions,
            shapes,
            nearby,
            stations,
        }
    }

    /// Get converted predictions at a stop, using the cache if fresh.
    pub async fn get_predictions(
        &self,
        stop: &StopId,
        limit: u8,
    ) -> Result<Arc<Vec<Prediction>>, MbtaError> {
        let key = (stop.clone(), limit);
        if let Some(cached) = self.predictions.get(&key).await {
            return Ok(cached);
        }

        let resources = self.client.get_predictions(stop, limit).await?;
        let converted = convert_predictions(&resources, stop).map_err(|e| MbtaError::Json {
            message: e.to_string(),
            body: None,
        })?;

        let entry = Arc::new(converted);
        self.predictions.insert(key, entry.clone()).await;

        Ok(entry)
    }

    /// Get the first shape polyline for a canonical route id.
    ///
    /// `None` means the upstream has no shape for this id ("no polyline
    /// available"); that outcome is cached like any other.
    pub async fn get_shape_polyline(
        &self,
        route_id: &str,
    ) -> Result<Arc<Option<String>>, MbtaError> {
        if let Some(cached) = self.shapes.get(route_id).await {
            return Ok(cached);
        }

        let shapes = self.client.get_shapes(route_id, 1).await?;
        let polyline = shapes.into_iter().next().map(|s| s.attributes.polyline);

        let entry = Arc::new(polyline);
        self.shapes
            .insert(route_id.to_string(), entry.clone())
            .await;

        Ok(entry)
    }

    /// Get stops near a coordinate, sorted by distance.
    pub async fn get_nearby_stops(
        &self,
        lat: f64,
        lng: f64,
        radius: f64,
        limit: u8,
    ) -> Result<Arc<Vec<StopResource>>, MbtaError> {
        let key = nearby_key(lat, lng, radius, limit);

        if let Some(cached) = self.nearby.get(&key).await {
            return Ok(cached);
        }

        let stops = self.client.get_nearby_stops(lat, lng, radius, limit).await?;
        let entry = Arc::new(stops);
        self.nearby.insert(key, entry.clone()).await;

        Ok(entry)
    }

    /// Search stations by name, case-insensitively.
    ///
    /// Fetches the station listing (cached for an hour) and filters it
    /// by substring; the V3 API offers no free-text search of its own.
    pub async fn search_stops(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<StopResource>, MbtaError> {
        let stations = match self.stations.get(&()).await {
            Some(cached) => cached,
            None => {
                let stations = self.client.get_stops_page(500).await?;
                let entry = Arc::new(stations);
                self.stations.insert((), entry.clone()).await;
                entry
            }
        };

        Ok(match_stops_by_name(&stations, query, limit))
    }

    /// Access the underlying client for operations that bypass cache.
    pub fn client(&self) -> &MbtaClient {
        &self.client
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.predictions.invalidate_all();
        self.shapes.invalidate_all();
        self.nearby.invalidate_all();
        self.stations.invalidate_all();
    }
}

/// Filter stops whose name contains the query, case-insensitively.
///
/// Queries shorter than two characters return nothing (matching the
/// frontend contract, which never sends shorter queries).
pub fn match_stops_by_name(stops: &[StopResource], query: &str, limit: usize) -> Vec<StopResource> {
    let q = query.trim().to_lowercase();
    if q.chars().count() < 2 {
        return Vec::new();
    }

    stops
        .iter()
        .filter(|s| s.attributes.name.to_lowercase().contains(&q))
        .take(limit)
        .cloned()
        .collect()
}
