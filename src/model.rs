use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use geo::Point;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::distance;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum TimeOfDay {
    #[strum(serialize = "AM")]
    #[serde(rename = "AM")]
    Am,
    #[strum(serialize = "PM")]
    #[serde(rename = "PM")]
    Pm,
}

impl TimeOfDay {
    pub fn from_hour(hour: u32) -> Self {
        if hour < 12 {
            TimeOfDay::Am
        } else {
            TimeOfDay::Pm
        }
    }
}

/// One recorded GPS observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fix {
    pub datetime: NaiveDateTime,
    pub latitude: f64,
    pub longitude: f64,
}

impl Fix {
    pub fn new(date: NaiveDate, time: NaiveTime, latitude: f64, longitude: f64) -> Self {
        Self {
            datetime: date.and_time(time),
            latitude,
            longitude,
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.longitude, self.latitude)
    }
}

/// A fix with its calendar fields and the distance to the following fix.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedFix {
    pub fix: Fix,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub time_of_day: TimeOfDay,
    pub distance_km: f64,
    pub distance_miles: f64,
}

impl EnrichedFix {
    pub fn new(fix: Fix, distance_km: f64) -> Self {
        let hour = fix.datetime.hour();
        Self {
            year: fix.datetime.year(),
            month: fix.datetime.month(),
            day: fix.datetime.day(),
            hour,
            time_of_day: TimeOfDay::from_hour(hour),
            distance_km,
            distance_miles: distance::km_to_miles(distance_km),
            fix,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.fix.datetime.date()
    }

    pub fn time(&self) -> NaiveTime {
        self.fix.datetime.time()
    }

    /// Colour key for map layers, e.g. `2020_1_AM`.
    pub fn group(&self) -> String {
        format!("{}_{}_{}", self.year, self.month, self.time_of_day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix(date: (i32, u32, u32), time: (u32, u32)) -> Fix {
        Fix::new(
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            NaiveTime::from_hms_opt(time.0, time.1, 0).unwrap(),
            52.5,
            13.4,
        )
    }

    #[test]
    fn time_of_day_boundary() {
        assert_eq!(TimeOfDay::from_hour(0), TimeOfDay::Am);
        assert_eq!(TimeOfDay::from_hour(11), TimeOfDay::Am);
        assert_eq!(TimeOfDay::from_hour(12), TimeOfDay::Pm);
        assert_eq!(TimeOfDay::from_hour(23), TimeOfDay::Pm);
    }

    #[test]
    fn time_of_day_text() {
        assert_eq!(TimeOfDay::Am.to_string(), "AM");
        assert_eq!("PM".parse::<TimeOfDay>().unwrap(), TimeOfDay::Pm);
        assert!("pm".parse::<TimeOfDay>().is_err());
        assert_eq!(serde_json::to_string(&TimeOfDay::Pm).unwrap(), "\"PM\"");
    }

    #[test]
    fn derived_fields() {
        let e = EnrichedFix::new(fix((2021, 3, 14), (15, 9)), 2.0);
        assert_eq!((e.year, e.month, e.day, e.hour), (2021, 3, 14, 15));
        assert_eq!(e.time_of_day, TimeOfDay::Pm);
        assert!((e.distance_miles - 1.242742).abs() < 1e-9);
        assert_eq!(e.group(), "2021_3_PM");
    }

    #[test]
    fn point_is_lon_lat() {
        let p = fix((2020, 1, 1), (0, 0)).point();
        assert_eq!(p.x_y(), (13.4, 52.5));
    }
}
