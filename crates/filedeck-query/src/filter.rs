use chrono::{DateTime, Duration, Local, NaiveTime, TimeZone};
use filedeck_model::{DateRange, FileRecord, FilterCriteria};

/// Half-open window `[start_ms, end_ms)` in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl TimeWindow {
    pub fn contains(&self, unix_ms: i64) -> bool {
        unix_ms >= self.start_ms && unix_ms < self.end_ms
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPredicate {
    types_lc: Vec<String>,
    tag_lc: String,
    window: Option<TimeWindow>,
}

impl FilterPredicate {
    pub fn accepts(&self, record: &FileRecord) -> bool {
        self.type_ok(record) && self.tag_ok(record) && self.date_ok(record)
    }

    pub fn is_unrestricted(&self) -> bool {
        self.types_lc.is_empty() && self.tag_lc.is_empty() && self.window.is_none()
    }

    pub fn window(&self) -> Option<TimeWindow> {
        self.window
    }

    fn type_ok(&self, record: &FileRecord) -> bool {
        if self.types_lc.is_empty() {
            return true;
        }
        let record_type = record.file_type.to_lowercase();
        self.types_lc.iter().any(|t| *t == record_type)
    }

    fn tag_ok(&self, record: &FileRecord) -> bool {
        if self.tag_lc.is_empty() {
            return true;
        }
        record
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&self.tag_lc))
    }

    fn date_ok(&self, record: &FileRecord) -> bool {
        self.window
            .map(|window| window.contains(record.modified_unix_ms))
            .unwrap_or(true)
    }
}

pub fn build_predicate(criteria: &FilterCriteria) -> FilterPredicate {
    build_predicate_at(criteria, &Local::now())
}

/// Same as [`build_predicate`] with "now" pinned. The date window is fixed at this instant.
pub fn build_predicate_at<Tz: TimeZone>(
    criteria: &FilterCriteria,
    now: &DateTime<Tz>,
) -> FilterPredicate {
    let mut types_lc: Vec<String> = criteria
        .types
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();
    types_lc.sort_unstable();
    types_lc.dedup();

    FilterPredicate {
        types_lc,
        tag_lc: criteria.tag.trim().to_lowercase(),
        window: date_window(criteria.date_range, now),
    }
}

fn date_window<Tz: TimeZone>(range: DateRange, now: &DateTime<Tz>) -> Option<TimeWindow> {
    let end_ms = now.timestamp_millis();
    let start_ms = match range {
        DateRange::Any => return None,
        DateRange::Today => start_of_day_ms(now),
        other => {
            let days = other.trailing_days()?;
            (now.clone() - Duration::days(days)).timestamp_millis()
        }
    };

    Some(TimeWindow { start_ms, end_ms })
}

const DAY_START_STEP_MINUTES: i64 = 15;

fn start_of_day_ms<Tz: TimeZone>(now: &DateTime<Tz>) -> i64 {
    let midnight = now.date_naive().and_time(NaiveTime::MIN);
    let tz = now.timezone();
    // Midnight can fall in a DST gap; walk forward to the first local time that exists.
    let steps = 24 * 60 / DAY_START_STEP_MINUTES;
    (0..steps)
        .map(|step| midnight + Duration::minutes(step * DAY_START_STEP_MINUTES))
        .take_while(|local| *local <= now.naive_local())
        .find_map(|local| tz.from_local_datetime(&local).earliest())
        .map(|start| start.timestamp_millis())
        .unwrap_or_else(|| {
            let elapsed = now.naive_local() - midnight;
            now.timestamp_millis() - elapsed.num_milliseconds()
        })
}
