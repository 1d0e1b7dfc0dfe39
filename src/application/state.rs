//! Application state management for the club directory browser.
//!
//! This module contains the view state engine: the club collection, the
//! active filters, the reveal window, and the terminal UI state, together
//! with the mutators that drive them.

use crate::domain::{Club, DirectoryError, DirectoryFilter, DirectoryView, CATEGORY_ALL};
use tracing::error;

/// Number of clubs revealed initially and after any filter change.
const INITIAL_REVEAL_COUNT: usize = 6;

/// How many additional clubs each "show more" reveals.
const REVEAL_STEP: usize = 3;

/// Represents the current mode of the application.
///
/// The application can be in different modes that determine how user input
/// is interpreted and what UI elements are displayed.
#[derive(Debug)]
pub enum AppMode {
    /// Normal browsing mode - arrow keys move selection, shortcuts available
    Normal,
    /// Search mode - user is typing a search query, filtering live
    Search,
    /// CSV export dialog is open
    ExportCsv,
    /// Help screen is displayed
    Help,
}

/// Main application state containing the club directory and UI state.
///
/// This structure owns the loaded club collection and the filter state, and
/// is the single writer for both. Every mutator is synchronous and
/// infallible; the derived view is recomputed from scratch on each
/// [`App::view`] call rather than cached.
///
/// # Examples
///
/// ```
/// use tclubs::application::App;
///
/// let app = App::default();
/// assert_eq!(app.selected_category, "all");
/// assert_eq!(app.reveal_count, 6);
/// assert!(app.is_loading);
/// ```
#[derive(Debug)]
pub struct App {
    /// The full loaded club collection (empty until the load resolves)
    pub clubs: Vec<Club>,
    /// Active category tag, `"all"` when no category filter is applied
    pub selected_category: String,
    /// Active free-text search query, compared case-insensitively
    pub search_query: String,
    /// How many matching clubs are revealed
    pub reveal_count: usize,
    /// Id of the club whose detail view is open, at most one at a time
    pub expanded_id: Option<u32>,
    /// True until the data source adapter resolves or fails
    pub is_loading: bool,
    /// Current application mode
    pub mode: AppMode,
    /// Cursor position within the visible list (zero-based)
    pub selected_index: usize,
    /// First visible-list row shown in the viewport
    pub scroll_offset: usize,
    /// Viewport height in list rows (for scrolling calculations)
    pub viewport_rows: usize,
    /// Cursor position within the text input buffer
    pub cursor_position: usize,
    /// Input buffer for filename entry
    pub filename_input: String,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Scroll position in help text
    pub help_scroll: usize,
}

impl Default for App {
    fn default() -> Self {
        Self {
            clubs: Vec::new(),
            selected_category: CATEGORY_ALL.to_string(),
            search_query: String::new(),
            reveal_count: INITIAL_REVEAL_COUNT,
            expanded_id: None,
            is_loading: true,
            mode: AppMode::Normal,
            selected_index: 0,
            scroll_offset: 0,
            viewport_rows: 12, // Default reasonable size
            cursor_position: 0,
            filename_input: String::new(),
            status_message: None,
            help_scroll: 0,
        }
    }
}

impl App {
    /// Derives the current view of the directory.
    ///
    /// Pure function of `(clubs, selected_category, search_query,
    /// reveal_count)`; call again after any mutation.
    pub fn view(&self) -> DirectoryView<'_> {
        DirectoryFilter::new(&self.clubs).derive(
            &self.selected_category,
            &self.search_query,
            self.reveal_count,
        )
    }

    /// Sets the active category and restores the initial reveal window.
    ///
    /// Tags are matched exactly and case-sensitively; an unrecognized tag is
    /// accepted and simply matches nothing.
    pub fn set_category(&mut self, category: &str) {
        self.selected_category = category.to_string();
        self.reveal_count = INITIAL_REVEAL_COUNT;
        self.clamp_selection();
    }

    /// Sets the search query and restores the initial reveal window.
    pub fn set_search(&mut self, query: &str) {
        self.search_query = query.to_string();
        self.reveal_count = INITIAL_REVEAL_COUNT;
        self.clamp_selection();
    }

    /// Widens the reveal window by one step.
    ///
    /// The count keeps growing even when every match is already visible;
    /// the visible set just stops growing past the matched set.
    pub fn show_more(&mut self) {
        self.reveal_count += REVEAL_STEP;
    }

    /// Restores every filter field to its default.
    pub fn reset_filters(&mut self) {
        self.selected_category = CATEGORY_ALL.to_string();
        self.search_query.clear();
        self.reveal_count = INITIAL_REVEAL_COUNT;
        self.expanded_id = None;
        self.selected_index = 0;
        self.scroll_offset = 0;
    }

    /// Opens the detail view for a club, or closes it if already open.
    ///
    /// At most one club is expanded at a time; expanding one club collapses
    /// any other. The invariant lives here so every UI entry point gets it.
    pub fn toggle_expanded(&mut self, id: u32) {
        if self.expanded_id == Some(id) {
            self.expanded_id = None;
        } else {
            self.expanded_id = Some(id);
        }
    }

    /// Whether the given club's detail view is open.
    pub fn is_expanded(&self, id: u32) -> bool {
        self.expanded_id == Some(id)
    }

    /// Installs the loaded club collection.
    ///
    /// Called exactly once, when the data source adapter resolves.
    pub fn on_load_success(&mut self, clubs: Vec<Club>) {
        self.clubs = clubs;
        self.is_loading = false;
    }

    /// Records a failed load.
    ///
    /// The error goes to the log; the collection stays empty and the UI
    /// degrades to a "no clubs" state. There is no retry.
    pub fn on_load_failure(&mut self, err: &DirectoryError) {
        error!("failed to load club data: {}", err);
        self.is_loading = false;
    }

    /// Returns the club under the cursor, if any.
    pub fn selected_club(&self) -> Option<&Club> {
        self.view().visible.get(self.selected_index).copied()
    }

    /// Moves the cursor one club down the visible list.
    pub fn select_next(&mut self) {
        let shown = self.view().shown_count();
        if shown > 0 && self.selected_index < shown - 1 {
            self.selected_index += 1;
            self.ensure_cursor_visible();
        }
    }

    /// Moves the cursor one club up the visible list.
    pub fn select_previous(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.ensure_cursor_visible();
        }
    }

    /// Updates the viewport size for proper scrolling calculations.
    pub fn update_viewport_size(&mut self, rows: usize) {
        self.viewport_rows = rows.max(1);
    }

    /// Ensures the selected club is visible by adjusting the scroll offset.
    pub fn ensure_cursor_visible(&mut self) {
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + self.viewport_rows {
            self.scroll_offset = self.selected_index.saturating_sub(self.viewport_rows - 1);
        }
    }

    /// Keeps the cursor inside the visible list after a filter change.
    fn clamp_selection(&mut self) {
        let shown = self.view().shown_count();
        if self.selected_index >= shown {
            self.selected_index = shown.saturating_sub(1);
        }
        if self.scroll_offset > self.selected_index {
            self.scroll_offset = self.selected_index;
        }
    }

    /// Switches to search mode and clears any previous query.
    pub fn start_search(&mut self) {
        self.mode = AppMode::Search;
        self.set_search("");
        self.cursor_position = 0;
        self.status_message = None;
    }

    /// Leaves search mode, keeping the query active as a filter.
    ///
    /// Sets a status message reporting how many clubs match.
    pub fn finish_search(&mut self) {
        self.mode = AppMode::Normal;
        self.cursor_position = 0;

        let matched = self.view().matched_count;
        if self.search_query.is_empty() {
            self.status_message = None;
        } else {
            self.status_message = Some(format!(
                "{} {} '{}'",
                matched,
                if matched == 1 { "club matches" } else { "clubs match" },
                self.search_query
            ));
        }
    }

    /// Cancels search mode, dropping the query.
    pub fn cancel_search(&mut self) {
        self.mode = AppMode::Normal;
        self.set_search("");
        self.cursor_position = 0;
    }

    /// Switches to CSV export mode to prompt for a filename.
    pub fn start_csv_export(&mut self) {
        self.mode = AppMode::ExportCsv;
        self.filename_input = "clubs.csv".to_string();
        self.cursor_position = self.filename_input.len();
        self.status_message = None;
    }

    /// Gets the filename to use for CSV export.
    ///
    /// Returns the filename input if not empty, otherwise a default.
    pub fn get_csv_export_filename(&self) -> String {
        if self.filename_input.is_empty() {
            "clubs.csv".to_string()
        } else {
            self.filename_input.clone()
        }
    }

    /// Processes the result of a CSV export operation.
    ///
    /// Sets the status message and returns to normal mode.
    pub fn set_csv_export_result(&mut self, result: Result<String, String>) {
        match result {
            Ok(filename) => {
                self.status_message = Some(format!("Exported to {}", filename));
            }
            Err(err) => {
                self.status_message = Some(format!("Export failed: {}", err));
            }
        }

        self.mode = AppMode::Normal;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    /// Cancels filename input and returns to normal mode.
    pub fn cancel_filename_input(&mut self) {
        self.mode = AppMode::Normal;
        self.filename_input.clear();
        self.cursor_position = 0;
    }
}
