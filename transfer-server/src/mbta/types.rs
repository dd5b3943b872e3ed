//! Wire types for the MBTA V3 API (JSON:API shape).
//!
//! Each resource arrives as `{id, attributes, relationships}` inside a
//! `data` array. Only the fields this server reads are modelled; serde
//! ignores the rest.

use serde::Deserialize;

/// JSON:API envelope for a collection response.
#[derive(Debug, Deserialize)]
pub struct Document<T> {
    pub data: Vec<T>,
}

/// A stop resource from `/stops`.
#[derive(Debug, Clone, Deserialize)]
pub struct StopResource {
    pub id: String,
    pub attributes: StopAttributes,
}

/// Attributes of a stop.
#[derive(Debug, Clone, Deserialize)]
pub struct StopAttributes {
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub municipality: Option<String>,
}

/// A prediction resource from `/predictions`.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionResource {
    pub id: String,
    pub attributes: PredictionAttributes,
    #[serde(default)]
    pub relationships: PredictionRelationships,
}

/// Attributes of a prediction. Times are ISO-8601 strings or null;
/// parsing to typed instants happens in the conversion layer.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionAttributes {
    pub arrival_time: Option<String>,
    pub departure_time: Option<String>,
}

/// Relationships of a prediction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictionRelationships {
    #[serde(default)]
    pub route: Option<Relationship>,
    #[serde(default)]
    pub stop: Option<Relationship>,
    #[serde(default)]
    pub trip: Option<Relationship>,
}

/// A to-one relationship: `{"data": {"id": "...", "type": "..."}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Relationship {
    pub data: Option<RelationshipData>,
}

/// The referenced resource identifier.
#[derive(Debug, Clone, Deserialize)]
pub struct RelationshipData {
    pub id: String,
}

impl Relationship {
    /// The related resource id, if present.
    pub fn id(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.id.as_str())
    }
}

/// A shape resource from `/shapes`.
#[derive(Debug, Clone, Deserialize)]
pub struct ShapeResource {
    pub id: String,
    pub attributes: ShapeAttributes,
}

/// Attributes of a shape.
#[derive(Debug, Clone, Deserialize)]
pub struct ShapeAttributes {
    /// Google-encoded polyline (precision 5).
    pub polyline: String,
}
