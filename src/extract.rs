//! Copy a subset of columns from one CSV file into another.

use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use csv::StringRecord;
use tracing::info;

use crate::error::{Error, Result};

/// Position of each of `columns` in `header`.
pub fn column_indices<S: AsRef<str>>(header: &StringRecord, columns: &[S]) -> Result<Vec<usize>> {
    columns
        .iter()
        .map(|column| {
            let column = column.as_ref();
            header
                .iter()
                .position(|x| x == column)
                .ok_or_else(|| Error::MissingColumn {
                    column: column.to_string(),
                })
        })
        .collect()
}

/// Writes `columns` of every row in `reader` to `writer`, header first, in
/// the requested column order. Returns the number of data rows written.
pub fn extract_columns<R: Read, W: Write>(
    reader: R,
    writer: W,
    columns: &[String],
) -> Result<usize> {
    let mut reader = csv::Reader::from_reader(reader);
    let indices = column_indices(reader.headers()?, columns)?;
    copy_columns(&mut reader, writer, columns, &indices)
}

fn copy_columns<R: Read, W: Write>(
    reader: &mut csv::Reader<R>,
    writer: W,
    columns: &[String],
    indices: &[usize],
) -> Result<usize> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(columns)?;

    let mut count = 0;
    let mut record = StringRecord::new();
    while reader.read_record(&mut record)? {
        writer.write_record(indices.iter().map(|&i| record.get(i).unwrap_or("")))?;
        count += 1;
    }
    writer.flush()?;

    Ok(count)
}

/// The output file is only created once every column has been found.
pub fn run(input: &Path, output: &Path, columns: &[String]) -> Result<()> {
    let mut reader = csv::Reader::from_path(input)?;
    let indices = column_indices(reader.headers()?, columns)?;
    let count = copy_columns(&mut reader, File::create(output)?, columns, &indices)?;
    info!(
        rows = count,
        columns = ?columns,
        "extracted {} into {}",
        input.display(),
        output.display()
    );
    Ok(())
}
