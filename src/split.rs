//! Split a combined `timestamp` column into `date` and `time`.

use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use csv::StringRecord;
use serde::Deserialize;
use tracing::info;

use crate::{
    error::{line_of, Error, Result},
    extract::column_indices,
};

const INPUT_COLUMNS: [&str; 3] = ["timestamp", "location-long", "location-lat"];

pub const OUTPUT_HEADER: [&str; 4] = ["date", "time", "location-long", "location-lat"];

#[derive(Debug, Deserialize)]
struct TimestampRow {
    timestamp: String,
    #[serde(rename = "location-long")]
    longitude: String,
    #[serde(rename = "location-lat")]
    latitude: String,
}

/// Splits `"<date> <time>"` on the first space.
pub fn split_timestamp(value: &str, line: u64) -> Result<(&str, &str)> {
    value
        .split_once(' ')
        .ok_or_else(|| Error::MalformedTimestamp {
            line,
            value: value.to_string(),
        })
}

/// Rewrites `timestamp,location-long,location-lat` rows as
/// `date,time,location-long,location-lat`. Any other input columns are
/// dropped. Returns the number of rows written.
pub fn split_timestamps<R: Read, W: Write>(reader: R, writer: W) -> Result<usize> {
    let mut reader = csv::Reader::from_reader(reader);
    let header = checked_header(&mut reader)?;
    write_split(&mut reader, &header, writer)
}

fn checked_header<R: Read>(reader: &mut csv::Reader<R>) -> Result<StringRecord> {
    let header = reader.headers()?.clone();
    column_indices(&header, &INPUT_COLUMNS)?;
    Ok(header)
}

fn write_split<R: Read, W: Write>(
    reader: &mut csv::Reader<R>,
    header: &StringRecord,
    writer: W,
) -> Result<usize> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(OUTPUT_HEADER)?;

    let mut count = 0;
    let mut record = StringRecord::new();
    while reader.read_record(&mut record)? {
        let row: TimestampRow = record.deserialize(Some(header))?;
        let (date, time) = split_timestamp(&row.timestamp, line_of(&record))?;
        writer.write_record([date, time, row.longitude.as_str(), row.latitude.as_str()])?;
        count += 1;
    }
    writer.flush()?;

    Ok(count)
}

/// The output file is only created once the input header has been checked.
pub fn run(input: &Path, output: &Path) -> Result<()> {
    let mut reader = csv::Reader::from_path(input)?;
    let header = checked_header(&mut reader)?;
    let count = write_split(&mut reader, &header, File::create(output)?)?;
    info!(rows = count, "split timestamps from {} into {}", input.display(), output.display());
    Ok(())
}
