//! Conversion from MBTA wire types to domain types.
//!
//! The predictions feed is permissive: times are nullable strings and
//! relationships may be absent. Conversion parses timestamps, fills in
//! the stop from the query when the relationship is missing, and drops
//! records that carry no usable time at all.

use chrono::{DateTime, Utc};

use crate::domain::{DomainError, Prediction, StopId};

use super::types::PredictionResource;

/// Parse an optional ISO-8601 timestamp, normalizing to UTC.
///
/// MBTA times carry a fixed offset (e.g. `-04:00`); downstream
/// arithmetic is all in UTC.
fn parse_time(value: Option<&str>) -> Result<Option<DateTime<Utc>>, DomainError> {
    let Some(raw) = value else {
        return Ok(None);
    };

    let parsed =
        DateTime::parse_from_rfc3339(raw).map_err(|e| DomainError::InvalidTimestamp {
            value: raw.to_string(),
            message: e.to_string(),
        })?;

    Ok(Some(parsed.with_timezone(&Utc)))
}

/// Convert one wire prediction to a domain prediction.
///
/// Returns `Ok(None)` for records with neither an arrival nor a
/// departure time; those carry no information a classifier or sort
/// could use.
pub fn convert_prediction(
    resource: &PredictionResource,
    queried_stop: &StopId,
) -> Result<Option<Prediction>, DomainError> {
    let arrival_time = parse_time(resource.attributes.arrival_time.as_deref())?;
    let departure_time = parse_time(resource.attributes.departure_time.as_deref())?;

    // The stop relationship may point at a child platform id; fall back
    // to the stop we queried for when it is absent.
    let stop = resource
        .relationships
        .stop
        .as_ref()
        .and_then(|r| r.id())
        .and_then(|id| StopId::parse(id).ok())
        .unwrap_or_else(|| queried_stop.clone());

    let route = resource
        .relationships
        .route
        .as_ref()
        .and_then(|r| r.id())
        .unwrap_or_default()
        .to_string();

    let trip = resource
        .relationships
        .trip
        .as_ref()
        .and_then(|r| r.id())
        .map(str::to_string);

    let prediction = Prediction {
        stop,
        route,
        trip,
        arrival_time,
        departure_time,
    };

    if prediction.is_empty() {
        return Ok(None);
    }

    Ok(Some(prediction))
}

/// Convert a page of wire predictions, dropping empty records and
/// ordering the rest by effective time.
///
/// The upstream sorts by departure time, which scatters arrival-only
/// records; re-sorting here gives callers one consistent order.
///
/// A malformed timestamp anywhere in the page is an error: silently
/// skipping it could misclassify a transfer.
pub fn convert_predictions(
    resources: &[PredictionResource],
    queried_stop: &StopId,
) -> Result<Vec<Prediction>, DomainError> {
    let mut out = Vec::with_capacity(resources.len());

    for resource in resources {
        if let Some(prediction) = convert_prediction(resource, queried_stop)? {
            out.push(prediction);
        }
    }

    out.sort_by_key(Prediction::effective_time);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mbta::types::Document;

    fn stop() -> StopId {
        StopId::parse("place-dwnxg").unwrap()
    }

    fn page(body: &str) -> Vec<PredictionResource> {
        let doc: Document<PredictionResource> = serde_json::from_str(body).unwrap();
        doc.data
    }

    #[test]
    fn converts_offset_times_to_utc() {
        let resources = page(
            r#"{"data": [{
                "id": "p1",
                "attributes": {
                    "arrival_time": "2024-03-15T10:00:00-04:00",
                    "departure_time": "2024-03-15T10:01:30-04:00"
                },
                "relationships": {
                    "route": {"data": {"id": "Red", "type": "route"}},
                    "stop": {"data": {"id": "70080", "type": "stop"}}
                }
            }]}"#,
        );

        let predictions = convert_predictions(&resources, &stop()).unwrap();
        assert_eq!(predictions.len(), 1);

        let p = &predictions[0];
        assert_eq!(p.route, "Red");
        assert_eq!(p.stop.as_str(), "70080");
        assert_eq!(
            p.arrival_time.unwrap().to_rfc3339(),
            "2024-03-15T14:00:00+00:00"
        );
        assert_eq!(
            p.departure_time.unwrap().to_rfc3339(),
            "2024-03-15T14:01:30+00:00"
        );
    }

    #[test]
    fn drops_records_with_no_time() {
        let resources = page(
            r#"{"data": [
                {"id": "p1", "attributes": {"arrival_time": null, "departure_time": null}},
                {"id": "p2", "attributes": {"arrival_time": "2024-03-15T10:00:00-04:00", "departure_time": null}}
            ]}"#,
        );

        let predictions = convert_predictions(&resources, &stop()).unwrap();
        assert_eq!(predictions.len(), 1);
        assert!(predictions[0].departure_time.is_none());
    }

    #[test]
    fn missing_stop_relationship_falls_back_to_query() {
        let resources = page(
            r#"{"data": [{
                "id": "p1",
                "attributes": {"arrival_time": "2024-03-15T10:00:00-04:00", "departure_time": null}
            }]}"#,
        );

        let predictions = convert_predictions(&resources, &stop()).unwrap();
        assert_eq!(predictions[0].stop.as_str(), "place-dwnxg");
        assert_eq!(predictions[0].route, "");
        assert!(predictions[0].trip.is_none());
    }

    #[test]
    fn output_is_in_effective_time_order() {
        // Departure-sorted upstream order would leave the arrival-only
        // record (p2) last; effective-time order puts it first.
        let resources = page(
            r#"{"data": [
                {"id": "p1", "attributes": {"arrival_time": null, "departure_time": "2024-03-15T10:05:00-04:00"}},
                {"id": "p3", "attributes": {"arrival_time": null, "departure_time": "2024-03-15T10:09:00-04:00"}},
                {"id": "p2", "attributes": {"arrival_time": "2024-03-15T10:02:00-04:00", "departure_time": null}}
            ]}"#,
        );

        let predictions = convert_predictions(&resources, &stop()).unwrap();
        let times: Vec<_> = predictions
            .iter()
            .map(|p| p.effective_time().unwrap().to_rfc3339())
            .collect();
        assert_eq!(
            times,
            vec![
                "2024-03-15T14:02:00+00:00",
                "2024-03-15T14:05:00+00:00",
                "2024-03-15T14:09:00+00:00",
            ]
        );
    }

    #[test]
    fn malformed_timestamp_is_an_error() {
        let resources = page(
            r#"{"data": [{
                "id": "p1",
                "attributes": {"arrival_time": "tomorrow-ish", "departure_time": null}
            }]}"#,
        );

        let err = convert_predictions(&resources, &stop()).unwrap_err();
        assert!(err.to_string().contains("tomorrow-ish"));
    }
}
