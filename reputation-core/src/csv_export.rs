//! CSV export of flattened records.

use chrono::SecondsFormat;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::CoreError;
use crate::types::Record;

pub const DEFAULT_EXPORT_FILENAME: &str = "reputationfix_export.csv";

pub const CSV_HEADERS: [&str; 12] = [
    "source",
    "title",
    "url",
    "author",
    "published_at",
    "snippet",
    "score",
    "sentiment",
    "likes",
    "comments",
    "shares",
    "views",
];

/// Quotes a field only if it contains a comma, a newline or a double quote.
pub fn escape_field(value: &str) -> String {
    if value.contains(',') || value.contains('\n') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn optional_count(value: Option<u64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn record_fields(record: &Record) -> [String; 12] {
    [
        record.source.key().to_string(),
        record.title.clone(),
        record.url.clone(),
        record.author.clone(),
        record
            .published_at
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        record.snippet.clone(),
        record.score().to_string(),
        record.sentiment().to_string(),
        optional_count(record.metrics.likes),
        optional_count(record.metrics.comments),
        optional_count(record.metrics.shares),
        optional_count(record.metrics.views),
    ]
}

fn join_row<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|field| escape_field(field.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Header row followed by one row per record, joined with `\n`.
pub fn serialize<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut rows = vec![join_row(&CSV_HEADERS)];
    rows.extend(records.into_iter().map(|r| join_row(&record_fields(r))));
    rows.join("\n")
}

/// Writes the CSV for `records` to `directory/filename` and returns the path.
pub fn write_export<'a, I>(
    directory: &Path,
    filename: &str,
    records: I,
) -> Result<PathBuf, CoreError>
where
    I: IntoIterator<Item = &'a Record>,
{
    let path = directory.join(filename);
    let csv = serialize(records);

    fs::create_dir_all(directory).map_err(|e| CoreError::Export {
        path: directory.display().to_string(),
        reason: e.to_string(),
    })?;
    fs::write(&path, csv.as_bytes()).map_err(|e| CoreError::Export {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    info!("Exported {} bytes of CSV to {}", csv.len(), path.display());
    Ok(path)
}
