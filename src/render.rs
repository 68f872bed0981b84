//! Turns a filtered table into something to show: a distance readout or a
//! GeoJSON layer of fixes.

use std::fmt;

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue};
use serde::Serialize;
use serde_json::json;

use crate::{
    filter::{filter, Selection},
    model::EnrichedFix,
    table::Table,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistanceSummary {
    pub fixes: usize,
    pub total_km: f64,
    pub total_miles: f64,
}

impl fmt::Display for DistanceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total distance: {:.2} km / {:.2} miles",
            self.total_km, self.total_miles
        )
    }
}

/// Sums the leg distances of the selected fixes. A leg is counted when the
/// fix it starts from is selected.
pub fn distance(table: &Table, selection: &Selection) -> DistanceSummary {
    let fixes = filter(table, selection);
    DistanceSummary {
        fixes: fixes.len(),
        // fold from +0.0: an empty f64 sum is -0.0
        total_km: fixes.iter().fold(0.0, |acc, x| acc + x.distance_km),
        total_miles: fixes.iter().fold(0.0, |acc, x| acc + x.distance_miles),
    }
}

pub fn map(table: &Table, selection: &Selection) -> FeatureCollection {
    let fixes = filter(table, selection);

    let center = if fixes.is_empty() {
        JsonValue::Null
    } else {
        let n = fixes.len() as f64;
        let lat = fixes.iter().map(|x| x.fix.latitude).sum::<f64>() / n;
        let lon = fixes.iter().map(|x| x.fix.longitude).sum::<f64>() / n;
        json!([lat, lon])
    };

    let mut foreign_members = JsonObject::new();
    foreign_members.insert("center".to_string(), center);

    FeatureCollection {
        bbox: None,
        features: fixes.into_iter().map(feature).collect(),
        foreign_members: Some(foreign_members),
    }
}

fn feature(fix: &EnrichedFix) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("date".to_string(), json!(fix.date().to_string()));
    properties.insert(
        "time".to_string(),
        json!(fix.time().format("%H:%M:%S").to_string()),
    );
    properties.insert("group".to_string(), json!(fix.group()));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(geojson::Value::from(&fix.fix.point()))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}
