//! Loading and enriching a CSV of location fixes.
//!
//! A [`Table`] is built once and never mutated afterwards. Filters and
//! renderers borrow it.

use std::{fs::File, io::Read, path::Path};

use chrono::{NaiveDate, NaiveTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    config::FormatConfig,
    distance,
    error::{line_of, Error, Result},
    model::{EnrichedFix, Fix, TimeOfDay},
    split::split_timestamp,
};

/// Either `date` + `time` or a combined `timestamp` must be present. Other
/// columns are ignored.
#[derive(Debug, Deserialize)]
struct RawFix {
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    time: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(rename = "location-lat")]
    latitude: f64,
    #[serde(rename = "location-long")]
    longitude: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Table {
    fixes: Vec<EnrichedFix>,
}

/// Distinct values seen for each filter dimension, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Options {
    pub months: Vec<u32>,
    pub years: Vec<i32>,
    pub days: Vec<u32>,
    pub time_of_day: Vec<TimeOfDay>,
}

impl Table {
    pub fn load(path: &Path, formats: &FormatConfig) -> Result<Self> {
        let table = Self::from_reader(File::open(path)?, formats)?;
        info!(rows = table.len(), "loaded {}", path.display());
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R, formats: &FormatConfig) -> Result<Self> {
        let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
        let header = reader.headers()?.clone();

        let mut fixes = Vec::new();
        let mut record = StringRecord::new();
        while reader.read_record(&mut record)? {
            let raw: RawFix = record.deserialize(Some(&header))?;
            fixes.push(parse_fix(raw, line_of(&record), formats)?);
        }

        Ok(Self::from_fixes(fixes))
    }

    /// Sorts by date and time, then derives calendar fields and leg
    /// distances. Equal timestamps keep their input order.
    pub fn from_fixes(mut fixes: Vec<Fix>) -> Self {
        fixes.sort_by_key(|x| x.datetime);
        let points: Vec<_> = fixes.iter().map(Fix::point).collect();
        let legs = distance::leg_distances(&points);
        let fixes = fixes
            .into_iter()
            .zip(legs)
            .map(|(fix, km)| EnrichedFix::new(fix, km))
            .collect();
        Self { fixes }
    }

    pub fn fixes(&self) -> &[EnrichedFix] {
        &self.fixes
    }

    pub fn len(&self) -> usize {
        self.fixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }

    pub fn options(&self) -> Options {
        let mut options = Options::default();
        for x in &self.fixes {
            push_unique(&mut options.months, x.month);
            push_unique(&mut options.years, x.year);
            push_unique(&mut options.days, x.day);
            push_unique(&mut options.time_of_day, x.time_of_day);
        }
        options
    }
}

fn push_unique<T: PartialEq>(values: &mut Vec<T>, value: T) {
    if !values.contains(&value) {
        values.push(value);
    }
}

fn parse_fix(raw: RawFix, line: u64, formats: &FormatConfig) -> Result<Fix> {
    let (date, time) = match (&raw.date, &raw.time, &raw.timestamp) {
        (Some(date), Some(time), _) => (date.as_str(), time.as_str()),
        (_, _, Some(timestamp)) => split_timestamp(timestamp, line)?,
        _ => return Err(Error::MissingTimestamp { line }),
    };

    let date = NaiveDate::parse_from_str(date, &formats.date).map_err(|source| {
        Error::InvalidDate {
            line,
            value: date.to_string(),
            format: formats.date.clone(),
            source,
        }
    })?;
    let time = formats
        .time
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(time, format).ok())
        .ok_or_else(|| Error::InvalidTime {
            line,
            value: time.to_string(),
            formats: formats.time.clone(),
        })?;

    debug!(line, %date, %time, "parsed fix");
    Ok(Fix::new(date, time, raw.latitude, raw.longitude))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn load(input: &str) -> Result<Table> {
        Table::from_reader(input.as_bytes(), &FormatConfig::default())
    }

    #[test]
    fn sorts_and_enriches() {
        let table = load(
            "date,time,location-long,location-lat\n\
             1/2/2020,13:00:00,0.0,1.0\n\
             1/1/2020,08:00:00,0.0,0.0\n\
             1/2/2020,07:30:00,0.0,0.0\n",
        )
        .unwrap();
        let fixes = table.fixes();
        assert_eq!(fixes.len(), 3);

        assert_eq!((fixes[0].day, fixes[0].hour), (1, 8));
        assert_eq!(fixes[0].distance_km, 0.0);
        assert_eq!((fixes[1].day, fixes[1].hour), (2, 7));
        assert!((fixes[1].distance_km - 111.195).abs() < 1e-3);
        assert_eq!(fixes[2].time_of_day, TimeOfDay::Pm);
        assert_eq!(fixes[2].distance_km, 0.0);
    }

    #[test]
    fn accepts_timestamp_column_and_extra_columns() {
        let table = load(
            "event-id,timestamp,location-long,location-lat\n\
             7,3/4/2021 18:45:10,13.4,52.5\n",
        )
        .unwrap();
        let fix = &table.fixes()[0];
        assert_eq!((fix.year, fix.month, fix.day), (2021, 3, 4));
        assert_eq!(fix.time_of_day, TimeOfDay::Pm);
        assert_eq!(fix.fix.latitude, 52.5);
    }

    #[test]
    fn time_without_seconds() {
        let table = load("date,time,location-long,location-lat\n1/1/2020,09:00,1,1\n").unwrap();
        assert_eq!(table.fixes()[0].hour, 9);
    }

    #[test]
    fn empty_and_single_row() {
        let empty = load("date,time,location-long,location-lat\n").unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.options(), Options::default());

        let single = load("date,time,location-long,location-lat\n1/1/2020,09:00,1,1\n").unwrap();
        assert_eq!(single.len(), 1);
        assert_eq!(single.fixes()[0].distance_km, 0.0);
    }

    #[test]
    fn equal_timestamps_keep_file_order() {
        let table = load(
            "date,time,location-long,location-lat\n\
             1/1/2020,09:00,0,0\n\
             1/1/2020,09:00,0,2\n\
             1/1/2020,08:00,0,1\n",
        )
        .unwrap();
        let lats: Vec<f64> = table.fixes().iter().map(|x| x.fix.latitude).collect();
        assert_eq!(lats, [1.0, 0.0, 2.0]);
    }

    #[test]
    fn options_in_first_seen_order() {
        let table = load(
            "date,time,location-long,location-lat\n\
             2/5/2021,14:00,0,0\n\
             1/5/2020,09:00,0,0\n\
             1/7/2020,15:00,0,0\n",
        )
        .unwrap();
        let options = table.options();
        assert_eq!(options.months, [1, 2]);
        assert_eq!(options.years, [2020, 2021]);
        assert_eq!(options.days, [5, 7]);
        assert_eq!(options.time_of_day, [TimeOfDay::Am, TimeOfDay::Pm]);
    }

    #[test]
    fn malformed_timestamp() {
        let err = load("timestamp,location-long,location-lat\n2020-01-01T08:00,1,1\n").unwrap_err();
        assert!(matches!(err, Error::MalformedTimestamp { line: 2, .. }));
    }

    #[test]
    fn invalid_date_and_time() {
        let err = load("date,time,location-long,location-lat\n2020-01-01,08:00,1,1\n").unwrap_err();
        assert!(matches!(err, Error::InvalidDate { line: 2, .. }));

        let err = load("date,time,location-long,location-lat\n1/1/2020,8am,1,1\n").unwrap_err();
        assert!(matches!(err, Error::InvalidTime { line: 2, .. }));
    }

    #[test]
    fn missing_timestamp() {
        let err = load("date,location-long,location-lat\n1/1/2020,1,1\n").unwrap_err();
        assert!(matches!(err, Error::MissingTimestamp { line: 2 }));
    }

    #[test]
    fn padded_fields() {
        let table = load(
            "date, time, location-long, location-lat\n\
             1/1/2020 , 08:00 , 13.4 ,  52.5\n",
        )
        .unwrap();
        let fix = &table.fixes()[0];
        assert_eq!((fix.fix.latitude, fix.fix.longitude), (52.5, 13.4));
        assert_eq!(fix.hour, 8);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixes.csv");
        fs::write(
            &path,
            "date,time,location-long,location-lat\n1/2/2020,10:00:00,0,1\n1/1/2020,09:00:00,0,0\n",
        )
        .unwrap();

        let table = Table::load(&path, &FormatConfig::default()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.fixes()[0].day, 1);
        assert!((table.fixes()[0].distance_km - 111.195).abs() < 1e-3);
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Table::load(&dir.path().join("nope.csv"), &FormatConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
