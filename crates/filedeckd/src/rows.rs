use chrono::{Local, TimeZone};
use filedeck_model::FileRecord;
use serde::Serialize;

use crate::details::format_size;

pub const EMPTY_RESULTS_MESSAGE: &str = "No files found";
pub const EMPTY_RESULTS_HINT: &str = "Try adjusting your search or filters";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileIcon {
    Document,
    Note,
    Chart,
    Image,
    Video,
    Audio,
}

impl FileIcon {
    pub fn for_type(file_type: &str) -> Self {
        match file_type.trim().to_lowercase().as_str() {
            "md" => Self::Note,
            "xls" | "ppt" => Self::Chart,
            "img" => Self::Image,
            "vid" => Self::Video,
            "aud" => Self::Audio,
            _ => Self::Document,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Document => "📄",
            Self::Note => "📝",
            Self::Chart => "📊",
            Self::Image => "🖼️",
            Self::Video => "🎥",
            Self::Audio => "🎵",
        }
    }
}

/// One line of the result list: icon, name, size and day, plus tag chips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    pub id: String,
    pub icon: FileIcon,
    pub name: String,
    pub size: String,
    pub modified_date: String,
    pub tags: Vec<String>,
}

impl ResultRow {
    pub fn from_record(record: &FileRecord) -> Self {
        Self::from_record_in(record, &Local)
    }

    pub fn from_record_in<Tz>(record: &FileRecord, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        Self {
            id: record.id.clone(),
            icon: FileIcon::for_type(&record.file_type),
            name: record.name.clone(),
            size: format_size(record.size),
            modified_date: format_date_in(record.modified_unix_ms, tz),
            tags: record.tags.clone(),
        }
    }

    /// `"<size> • <date>"`, the secondary line under the name.
    pub fn subtitle(&self) -> String {
        format!("{} • {}", self.size, self.modified_date)
    }
}

fn format_date_in<Tz>(unix_ms: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    tz.timestamp_millis_opt(unix_ms)
        .single()
        .map(|at| at.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
