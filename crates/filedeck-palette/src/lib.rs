use serde::{Deserialize, Serialize};

pub const COMMAND_SEARCH: &str = "search";
pub const COMMAND_REINDEX: &str = "reindex";
pub const COMMAND_SETTINGS: &str = "settings";
pub const COMMAND_HELP: &str = "help";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteCommand {
    pub id: String,
    pub label: String,
}

impl PaletteCommand {
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
        }
    }

    fn label_contains(&self, query_lc: &str) -> bool {
        query_lc.is_empty() || self.label.to_lowercase().contains(query_lc)
    }
}

pub fn default_catalog() -> Vec<PaletteCommand> {
    vec![
        PaletteCommand::new(COMMAND_SEARCH, "Search files"),
        PaletteCommand::new(COMMAND_REINDEX, "Reindex files"),
        PaletteCommand::new(COMMAND_SETTINGS, "Settings"),
        PaletteCommand::new(COMMAND_HELP, "Help"),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteKey {
    Escape,
    ArrowDown,
    ArrowUp,
    Enter,
}

impl PaletteKey {
    /// Maps DOM-style key names. Anything else is not a palette key.
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "Escape" => Some(Self::Escape),
            "ArrowDown" => Some(Self::ArrowDown),
            "ArrowUp" => Some(Self::ArrowUp),
            "Enter" => Some(Self::Enter),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteOutcome {
    /// Palette is closed; input was not consumed.
    Ignored,
    Highlighted(usize),
    Dismissed,
    Fired(String),
    /// Consumed without effect, e.g. Enter on an empty list.
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct CommandPalette {
    catalog: Vec<PaletteCommand>,
    query: String,
    highlighted: usize,
    open: bool,
}

impl Default for CommandPalette {
    fn default() -> Self {
        Self::new(default_catalog())
    }
}

impl CommandPalette {
    pub fn new(catalog: Vec<PaletteCommand>) -> Self {
        Self {
            catalog,
            query: String::new(),
            highlighted: 0,
            open: false,
        }
    }

    /// Appends host commands. Ids already in the catalog are skipped.
    pub fn extend_catalog(&mut self, commands: impl IntoIterator<Item = PaletteCommand>) {
        for command in commands {
            if self.catalog.iter().any(|c| c.id == command.id) {
                tracing::warn!(id = %command.id, "duplicate palette command ignored");
                continue;
            }
            self.catalog.push(command);
        }
        self.clamp_highlighted();
    }

    pub fn catalog(&self) -> &[PaletteCommand] {
        &self.catalog
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn highlighted_index(&self) -> usize {
        self.highlighted
    }

    pub fn open(&mut self) {
        if self.open {
            return;
        }
        self.open = true;
        self.query.clear();
        self.highlighted = 0;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.clamp_highlighted();
    }

    pub fn visible_commands(&self) -> Vec<&PaletteCommand> {
        let query_lc = self.query.to_lowercase();
        self.catalog
            .iter()
            .filter(|command| command.label_contains(&query_lc))
            .collect()
    }

    pub fn highlighted_command(&self) -> Option<&PaletteCommand> {
        self.visible_commands().get(self.highlighted).copied()
    }

    pub fn handle_key(&mut self, key: PaletteKey) -> PaletteOutcome {
        if !self.open {
            return PaletteOutcome::Ignored;
        }

        let visible_count = self.visible_commands().len();
        match key {
            PaletteKey::Escape => {
                self.close();
                PaletteOutcome::Dismissed
            }
            PaletteKey::ArrowDown => {
                self.highlighted = if visible_count == 0 {
                    0
                } else {
                    (self.highlighted + 1) % visible_count
                };
                PaletteOutcome::Highlighted(self.highlighted)
            }
            PaletteKey::ArrowUp => {
                self.highlighted = if visible_count == 0 {
                    0
                } else {
                    (self.highlighted % visible_count + visible_count - 1) % visible_count
                };
                PaletteOutcome::Highlighted(self.highlighted)
            }
            PaletteKey::Enter => self.fire(self.highlighted),
        }
    }

    /// Fires the visible command at `position`, as a click on that row would.
    pub fn activate(&mut self, position: usize) -> PaletteOutcome {
        if !self.open {
            return PaletteOutcome::Ignored;
        }
        self.fire(position)
    }

    fn fire(&mut self, position: usize) -> PaletteOutcome {
        let Some(id) = self
            .visible_commands()
            .get(position)
            .map(|command| command.id.clone())
        else {
            return PaletteOutcome::Unchanged;
        };

        tracing::info!(id = %id, "palette command fired");
        self.close();
        PaletteOutcome::Fired(id)
    }

    fn clamp_highlighted(&mut self) {
        let visible_count = self.visible_commands().len();
        if visible_count == 0 {
            self.highlighted = 0;
        } else {
            self.highlighted = self.highlighted.min(visible_count - 1);
        }
    }
}
