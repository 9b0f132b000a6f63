use chrono::{Local, TimeZone};
use filedeck_model::FileRecord;
use serde::Serialize;

const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
const SIZE_STEP: f64 = 1024.0;

/// Base-1024 size with one decimal, e.g. `129845` -> `"126.8 KB"`. Plain bytes print whole.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= SIZE_STEP && unit < SIZE_UNITS.len() - 1 {
        value /= SIZE_STEP;
        unit += 1;
    }

    let mut rounded = (value * 10.0).round() / 10.0;
    if rounded >= SIZE_STEP && unit < SIZE_UNITS.len() - 1 {
        rounded = ((rounded / SIZE_STEP) * 10.0).round() / 10.0;
        unit += 1;
    }

    format!("{rounded:.1} {}", SIZE_UNITS[unit])
}

pub fn format_modified(unix_ms: i64) -> String {
    format_modified_in(unix_ms, &Local)
}

pub fn format_modified_in<Tz>(unix_ms: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    tz.timestamp_millis_opt(unix_ms)
        .single()
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Display-ready projection of the selected record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailsView {
    pub name: String,
    pub path: String,
    pub size: String,
    pub file_type: String,
    pub modified: String,
    pub tags: Vec<String>,
}

impl DetailsView {
    pub fn from_record(record: &FileRecord) -> Self {
        Self {
            name: record.name.clone(),
            path: record.path.clone(),
            size: format_size(record.size),
            file_type: record.file_type.to_uppercase(),
            modified: format_modified(record.modified_unix_ms),
            tags: record.tags.clone(),
        }
    }
}
