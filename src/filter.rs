use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{
    model::{EnrichedFix, TimeOfDay},
    table::{Options, Table},
};

/// Selected values per dimension. A fix passes when every one of its
/// fields is selected, so an empty dimension matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selection {
    pub months: BTreeSet<u32>,
    pub years: BTreeSet<i32>,
    pub days: BTreeSet<u32>,
    pub time_of_day: BTreeSet<TimeOfDay>,
}

impl Selection {
    /// Everything that appears in the table.
    pub fn all(options: &Options) -> Self {
        Self {
            months: options.months.iter().copied().collect(),
            years: options.years.iter().copied().collect(),
            days: options.days.iter().copied().collect(),
            time_of_day: options.time_of_day.iter().copied().collect(),
        }
    }

    pub fn matches(&self, fix: &EnrichedFix) -> bool {
        self.months.contains(&fix.month)
            && self.years.contains(&fix.year)
            && self.days.contains(&fix.day)
            && self.time_of_day.contains(&fix.time_of_day)
    }
}

pub fn filter<'a>(table: &'a Table, selection: &Selection) -> Vec<&'a EnrichedFix> {
    table
        .fixes()
        .iter()
        .filter(|x| selection.matches(x))
        .collect()
}
