//! Person closest to a landmark
//!
//! Keeps the closest record seen so far together with its haversine distance
//! to the landmark. A later record only takes over when it is strictly closer,
//! so among equidistant people the first one wins. The report lists every
//! field of the retained record in its original order, with `name` rendered as
//! "first last".

use crate::error::StatsError;
use crate::record::{display_value, Record};
use crate::stats::store::Namespace;
use crate::stats::{Report, StatisticUnit};
use crate::util::geo::Coordinate;
use serde_json::{json, Value};

pub const NAME: &str = "nearest-landmark";

const CLOSEST: &str = "nearest-landmark.closest";

pub const EIFFEL_TOWER: Coordinate = Coordinate {
    latitude: 48.8584,
    longitude: 2.2945,
};

/// Closest record retained so far
#[derive(Debug, Clone)]
pub struct Closest {
    pub record: Record,
    pub distance_km: f64,
}

/// Finds the person living nearest to a fixed coordinate
#[derive(Debug, Clone)]
pub struct NearestToLandmark {
    landmark_name: String,
    landmark: Coordinate,
}

impl NearestToLandmark {
    pub fn new(landmark_name: &str, landmark: Coordinate) -> Self {
        Self {
            landmark_name: landmark_name.to_string(),
            landmark,
        }
    }

    pub fn eiffel_tower() -> Self {
        Self::new("Eiffel Tower", EIFFEL_TOWER)
    }
}

impl StatisticUnit for NearestToLandmark {
    fn name(&self) -> &str {
        NAME
    }

    fn init(&self, ns: &mut Namespace<'_>) -> Result<(), StatsError> {
        ns.insert(CLOSEST, None::<Closest>)
    }

    fn accumulate(&self, record: &Record, ns: &mut Namespace<'_>) -> Result<(), StatsError> {
        let position = Coordinate::new(record.latitude()?, record.longitude()?);
        let distance_km = position.distance_km(&self.landmark);

        let closest = ns.get_mut::<Option<Closest>>(CLOSEST)?;
        let is_closer = match closest {
            Some(current) => distance_km < current.distance_km,
            None => true,
        };
        if is_closer {
            *closest = Some(Closest {
                record: record.clone(),
                distance_km,
            });
        }
        Ok(())
    }

    fn finalize(&self, ns: &mut Namespace<'_>) -> Result<Report, StatsError> {
        let closest = ns
            .get::<Option<Closest>>(CLOSEST)?
            .as_ref()
            .ok_or_else(|| StatsError::MissingSlot {
                unit: NAME.to_string(),
                key: CLOSEST.to_string(),
            })?;

        let mut details = Vec::with_capacity(closest.record.fields().len());
        for (key, value) in closest.record.fields() {
            let shown = if key == "name" {
                closest.record.full_name()?
            } else {
                display_value(value)
            };
            details.push(format!("{}: {}", key, shown));
        }

        let data = json!({
            "landmark": self.landmark_name,
            "landmark_coordinate": self.landmark,
            "distance_km": closest.distance_km,
            "position": closest.record.position(),
            "person": Value::Object(closest.record.fields().clone()),
        });

        Ok(Report::new(
            NAME,
            format!("Details of the person closest to the {}:", self.landmark_name),
            data,
        )
        .with_details(details))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::tests::records;
    use crate::stats::aggregator::AggregationEngine;

    fn run(unit: NearestToLandmark, people: Value) -> Report {
        let engine = AggregationEngine::with_units(vec![Box::new(unit)]).unwrap();
        let mut reports: Vec<Report> = Vec::new();
        engine.run(&records(people), &mut reports).unwrap();
        reports.remove(0)
    }

    fn person(first: &str, lat: f64, long: f64) -> Value {
        json!({
            "name": { "first": first, "last": "Doe" },
            "latitude": lat,
            "longitude": long
        })
    }

    #[test]
    fn test_retains_closer_record() {
        let report = run(
            NearestToLandmark::eiffel_tower(),
            json!([person("Far", 40.0, -74.0), person("Near", 48.86, 2.29)]),
        );
        assert_eq!(report.data["person"]["name"]["first"], "Near");
        assert_eq!(report.data["position"], 1);
    }

    #[test]
    fn test_later_closer_record_replaces_earlier() {
        let report = run(
            NearestToLandmark::eiffel_tower(),
            json!([
                person("Paris", 48.85, 2.35),
                person("Sydney", -33.86, 151.21),
                person("Tower", 48.8584, 2.2946),
                person("London", 51.5, -0.12)
            ]),
        );
        assert_eq!(report.data["person"]["name"]["first"], "Tower");
        assert!(report.data["distance_km"].as_f64().unwrap() < 0.01);
    }

    #[test]
    fn test_tie_keeps_first() {
        let report = run(
            NearestToLandmark::eiffel_tower(),
            json!([person("First", 10.0, 10.0), person("Second", 10.0, 10.0)]),
        );
        assert_eq!(report.data["person"]["name"]["first"], "First");
    }

    #[test]
    fn test_single_record_is_reported() {
        let report = run(NearestToLandmark::eiffel_tower(), json!([person("Only", 0.0, 0.0)]));
        assert_eq!(report.data["person"]["name"]["first"], "Only");
        assert_eq!(report.headline, "Details of the person closest to the Eiffel Tower:");
    }

    #[test]
    fn test_details_list_fields_in_order_with_full_name() {
        let report = run(
            NearestToLandmark::eiffel_tower(),
            json!([{
                "_id": "abc",
                "name": { "first": "Jane", "last": "Roe" },
                "tags": ["x", "y"],
                "latitude": 48.0,
                "longitude": 2.0
            }]),
        );
        assert_eq!(
            report.details,
            vec![
                "_id: abc",
                "name: Jane Roe",
                "tags: x,y",
                "latitude: 48",
                "longitude: 2",
            ]
        );
    }

    #[test]
    fn test_non_finite_coordinate_fails_run() {
        let engine = AggregationEngine::with_units(vec![Box::new(NearestToLandmark::eiffel_tower())]).unwrap();
        let input = records(json!([
            person("Valid", 48.0, 2.0),
            {"name": {"first": "Broken", "last": "Doe"}, "latitude": "NaN", "longitude": 2.0}
        ]));
        let mut reports: Vec<Report> = Vec::new();
        let err = engine.run(&input, &mut reports).unwrap_err();
        assert!(matches!(err, StatsError::RecordShape { index: 1, field: "latitude", .. }));
        assert!(reports.is_empty());
    }

    #[test]
    fn test_custom_landmark() {
        let statue = NearestToLandmark::new("Statue of Liberty", Coordinate::new(40.6892, -74.0445));
        let report = run(
            statue,
            json!([person("Paris", 48.85, 2.35), person("Jersey", 40.7, -74.05)]),
        );
        assert_eq!(report.data["person"]["name"]["first"], "Jersey");
        assert_eq!(report.data["landmark"], "Statue of Liberty");
    }
}
