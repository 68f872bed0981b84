use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("column `{column}` not found in input header")]
    MissingColumn { column: String },

    #[error("line {line}: timestamp {value:?} has no space between date and time")]
    MalformedTimestamp { line: u64, value: String },

    #[error("line {line}: date {value:?} does not match `{format}`")]
    InvalidDate {
        line: u64,
        value: String,
        format: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("line {line}: time {value:?} does not match any of {formats:?}")]
    InvalidTime {
        line: u64,
        value: String,
        formats: Vec<String>,
    },

    #[error("line {line}: row has neither `date`/`time` nor `timestamp`")]
    MissingTimestamp { line: u64 },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Line number of a record, or 0 when the reader did not track one.
pub(crate) fn line_of(record: &csv::StringRecord) -> u64 {
    record.position().map(|x| x.line()).unwrap_or(0)
}
