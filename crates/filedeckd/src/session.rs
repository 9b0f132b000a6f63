use filedeck_config::Settings;
use filedeck_model::{DateRange, FileRecord, FilterCriteria};
use filedeck_palette::{CommandPalette, PaletteCommand};
use filedeck_query::{compose_results, BackendError, SearchRequest};

use crate::details::DetailsView;
use crate::rows::ResultRow;
use crate::selection::Selection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchApplied {
    Applied { shown: usize },
    Failed,
    Stale,
}

struct InFlight {
    generation: u64,
    query: String,
}

/// All state owned by one open window. Mutated only through these handlers.
pub struct Session {
    query: String,
    criteria: FilterCriteria,
    active_query: String,
    candidates: Vec<FileRecord>,
    results: Vec<FileRecord>,
    selection: Selection,
    palette: CommandPalette,
    latest_generation: u64,
    in_flight: Option<InFlight>,
    result_limit: usize,
    notice: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl Session {
    pub fn new(settings: &Settings) -> Self {
        let mut palette = CommandPalette::default();
        palette.extend_catalog(
            settings
                .extra_commands
                .iter()
                .map(|entry| PaletteCommand::new(&entry.id, &entry.label)),
        );

        Self {
            query: String::new(),
            criteria: FilterCriteria::with_date_range(settings.default_date_range),
            active_query: String::new(),
            candidates: Vec::new(),
            results: Vec::new(),
            selection: Selection::default(),
            palette,
            latest_generation: 0,
            in_flight: None,
            result_limit: settings.result_limit,
            notice: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.refresh_results();
    }

    pub fn toggle_type(&mut self, file_type: &str) {
        self.criteria.toggle_type(file_type);
        self.refresh_results();
    }

    pub fn set_tag_filter(&mut self, tag: &str) {
        self.criteria.tag = tag.to_string();
        self.refresh_results();
    }

    pub fn set_date_range(&mut self, date_range: DateRange) {
        self.criteria.date_range = date_range;
        self.refresh_results();
    }

    pub fn results(&self) -> &[FileRecord] {
        &self.results
    }

    /// Displayed results as list rows; empty means the "No files found" state.
    pub fn result_rows(&self) -> Vec<ResultRow> {
        self.results.iter().map(ResultRow::from_record).collect()
    }

    pub fn is_searching(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn latest_generation(&self) -> u64 {
        self.latest_generation
    }

    /// Tags the current query with a fresh generation. Earlier requests become stale.
    pub fn begin_search(&mut self) -> SearchRequest {
        self.latest_generation += 1;
        let request = SearchRequest {
            generation: self.latest_generation,
            query: self.query.clone(),
        };
        self.in_flight = Some(InFlight {
            generation: request.generation,
            query: request.query.clone(),
        });

        tracing::debug!(generation = request.generation, query = %request.query, "search issued");
        request
    }

    pub fn apply_search_result(
        &mut self,
        generation: u64,
        result: Result<Vec<FileRecord>, BackendError>,
    ) -> SearchApplied {
        let query = match self.in_flight.take() {
            Some(in_flight) if in_flight.generation == generation => in_flight.query,
            other => {
                self.in_flight = other;
                tracing::debug!(
                    generation,
                    latest = self.latest_generation,
                    "discarding stale search response"
                );
                return SearchApplied::Stale;
            }
        };

        self.active_query = query;
        let outcome = match result {
            Ok(records) => {
                self.candidates = records;
                self.refresh_results();
                SearchApplied::Applied {
                    shown: self.results.len(),
                }
            }
            Err(err) => {
                tracing::warn!(generation, error = %err, "search backend failed, showing no results");
                self.candidates.clear();
                self.refresh_results();
                SearchApplied::Failed
            }
        };

        tracing::info!(
            generation,
            candidates = self.candidates.len(),
            shown = self.results.len(),
            "search applied"
        );
        outcome
    }

    pub fn select(&mut self, record: FileRecord) {
        self.selection.select(record);
    }

    /// Selects the displayed result at `index`. Out-of-range indices are ignored.
    pub fn select_at(&mut self, index: usize) -> bool {
        let Some(record) = self.results.get(index).cloned() else {
            return false;
        };
        self.selection.select(record);
        true
    }

    pub fn selected(&self) -> Option<&FileRecord> {
        self.selection.current()
    }

    pub fn details(&self) -> Option<DetailsView> {
        self.selection.current().map(DetailsView::from_record)
    }

    pub fn palette(&self) -> &CommandPalette {
        &self.palette
    }

    pub fn palette_mut(&mut self) -> &mut CommandPalette {
        &mut self.palette
    }

    pub fn set_notice(&mut self, notice: String) {
        self.notice = Some(notice);
    }

    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    fn refresh_results(&mut self) {
        let mut results = compose_results(&self.candidates, &self.active_query, &self.criteria);
        if self.result_limit > 0 {
            results.truncate(self.result_limit);
        }
        self.results = results;
        self.selection.on_result_set_changed(&self.results);
    }
}
