use crate::application::{App, AppMode};
use crate::domain::{DirectoryFilter, RosterExporter};
use crate::presentation::ui::CATEGORIES;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::Search => Self::handle_search_mode(app, key),
            AppMode::ExportCsv => Self::handle_export_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('e') = key {
                app.start_csv_export();
            }
            return;
        }

        // Any keypress dismisses a lingering status message; actions below
        // set their own.
        app.status_message = None;

        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                app.select_previous();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.select_next();
            }
            KeyCode::Enter => {
                if let Some(id) = app.selected_club().map(|club| club.id) {
                    app.toggle_expanded(id);
                }
            }
            KeyCode::Esc => {
                if let Some(id) = app.expanded_id {
                    app.toggle_expanded(id);
                }
            }
            KeyCode::Tab => {
                Self::cycle_category(app, 1);
            }
            KeyCode::BackTab => {
                Self::cycle_category(app, -1);
            }
            KeyCode::Char(c @ '1'..='6') => {
                let index = c as usize - '1' as usize;
                let (_, value) = CATEGORIES[index];
                app.set_category(value);
            }
            KeyCode::Char('/') => {
                app.start_search();
            }
            KeyCode::Char('m') | KeyCode::Char(' ') => {
                app.show_more();
            }
            KeyCode::Char('r') => {
                app.reset_filters();
            }
            KeyCode::Char('c') => {
                if let Some(email) = app.selected_club().map(|club| club.contact.email.clone()) {
                    app.status_message = Some(match Self::copy_to_clipboard(&email) {
                        Ok(()) => format!("Copied {} to clipboard", email),
                        Err(err) => format!("Clipboard error: {}", err),
                    });
                }
            }
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.mode = AppMode::Help;
                app.help_scroll = 0;
            }
            KeyCode::Char('q') => {
                // Will be handled by main loop
            }
            _ => {}
        }
    }

    fn cycle_category(app: &mut App, step: isize) {
        let current = CATEGORIES
            .iter()
            .position(|(_, value)| *value == app.selected_category)
            .unwrap_or(0);
        let next = (current as isize + step).rem_euclid(CATEGORIES.len() as isize) as usize;
        app.set_category(CATEGORIES[next].1);
    }

    fn copy_to_clipboard(text: &str) -> Result<(), String> {
        arboard::Clipboard::new()
            .and_then(|mut clipboard| clipboard.set_text(text.to_string()))
            .map_err(|e| e.to_string())
    }

    fn handle_search_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                app.finish_search();
            }
            KeyCode::Esc => {
                app.cancel_search();
            }
            KeyCode::Backspace => {
                if app.cursor_position > 0 {
                    let mut query = app.search_query.clone();
                    query.remove(app.cursor_position - 1);
                    app.set_search(&query);
                    app.cursor_position -= 1;
                }
            }
            KeyCode::Delete => {
                if app.cursor_position < app.search_query.len() {
                    let mut query = app.search_query.clone();
                    query.remove(app.cursor_position);
                    app.set_search(&query);
                }
            }
            KeyCode::Left => {
                if app.cursor_position > 0 {
                    app.cursor_position -= 1;
                }
            }
            KeyCode::Right => {
                if app.cursor_position < app.search_query.len() {
                    app.cursor_position += 1;
                }
            }
            KeyCode::Home => {
                app.cursor_position = 0;
            }
            KeyCode::End => {
                app.cursor_position = app.search_query.len();
            }
            KeyCode::Char(c) => {
                // The list filters live as the query is edited.
                let mut query = app.search_query.clone();
                query.insert(app.cursor_position, c);
                app.set_search(&query);
                app.cursor_position += 1;
            }
            _ => {}
        }
    }

    fn handle_export_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                let filename = app.get_csv_export_filename();
                let matched = DirectoryFilter::new(&app.clubs)
                    .matched(&app.selected_category, &app.search_query);
                let result = RosterExporter::export_to_csv(&matched, &filename);
                app.set_csv_export_result(result);
            }
            KeyCode::Esc => {
                app.cancel_filename_input();
            }
            KeyCode::Backspace => {
                if app.cursor_position > 0 {
                    app.filename_input.remove(app.cursor_position - 1);
                    app.cursor_position -= 1;
                }
            }
            KeyCode::Delete => {
                if app.cursor_position < app.filename_input.len() {
                    app.filename_input.remove(app.cursor_position);
                }
            }
            KeyCode::Left => {
                if app.cursor_position > 0 {
                    app.cursor_position -= 1;
                }
            }
            KeyCode::Right => {
                if app.cursor_position < app.filename_input.len() {
                    app.cursor_position += 1;
                }
            }
            KeyCode::Home => {
                app.cursor_position = 0;
            }
            KeyCode::End => {
                app.cursor_position = app.filename_input.len();
            }
            KeyCode::Char(c) => {
                app.filename_input.insert(app.cursor_position, c);
                app.cursor_position += 1;
            }
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.mode = AppMode::Normal;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if app.help_scroll > 0 {
                    app.help_scroll -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{App, AppMode};
    use crate::domain::{Club, Contact, CATEGORY_ALL};

    fn club(id: u32, name: &str, category: &str) -> Club {
        Club {
            id,
            name: name.to_string(),
            category: category.to_string(),
            description: format!("{} description", name),
            long_description: format!("{} long description", name),
            logo: format!("{}.png", id),
            members: 15,
            meetings: "Weekly".to_string(),
            activities: vec![],
            contact: Contact {
                email: format!("club{}@uni.example", id),
                president: "President".to_string(),
            },
        }
    }

    fn loaded_app() -> App {
        let mut app = App::default();
        app.on_load_success(vec![
            club(1, "Robotics Club", "Mecatronique"),
            club(2, "Hiking Society", "Sports"),
            club(3, "Chess Circle", "Social"),
        ]);
        app
    }

    #[test]
    fn test_slash_enters_search_mode() {
        let mut app = loaded_app();

        InputHandler::handle_key_event(&mut app, KeyCode::Char('/'), KeyModifiers::NONE);
        assert!(matches!(app.mode, AppMode::Search));
        assert!(app.search_query.is_empty());
    }

    #[test]
    fn test_search_typing_filters_live_and_resets_reveal() {
        let mut app = loaded_app();
        app.show_more();
        assert_eq!(app.reveal_count, 9);

        InputHandler::handle_key_event(&mut app, KeyCode::Char('/'), KeyModifiers::NONE);
        for c in "robot".chars() {
            InputHandler::handle_key_event(&mut app, KeyCode::Char(c), KeyModifiers::NONE);
        }

        assert_eq!(app.search_query, "robot");
        assert_eq!(app.reveal_count, 6);
        assert_eq!(app.view().matched_count, 1);
    }

    #[test]
    fn test_search_backspace_and_escape() {
        let mut app = loaded_app();

        InputHandler::handle_key_event(&mut app, KeyCode::Char('/'), KeyModifiers::NONE);
        for c in "ro".chars() {
            InputHandler::handle_key_event(&mut app, KeyCode::Char(c), KeyModifiers::NONE);
        }
        InputHandler::handle_key_event(&mut app, KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(app.search_query, "r");

        InputHandler::handle_key_event(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert!(matches!(app.mode, AppMode::Normal));
        assert!(app.search_query.is_empty());
    }

    #[test]
    fn test_tab_cycles_categories() {
        let mut app = loaded_app();
        assert_eq!(app.selected_category, CATEGORY_ALL);

        InputHandler::handle_key_event(&mut app, KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.selected_category, "Informatique");

        InputHandler::handle_key_event(&mut app, KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(app.selected_category, CATEGORY_ALL);

        // Cycling backward from the first entry wraps to the last.
        InputHandler::handle_key_event(&mut app, KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(app.selected_category, "Sports");
    }

    #[test]
    fn test_digit_selects_category_and_resets_reveal() {
        let mut app = loaded_app();
        app.show_more();

        InputHandler::handle_key_event(&mut app, KeyCode::Char('6'), KeyModifiers::NONE);
        assert_eq!(app.selected_category, "Sports");
        assert_eq!(app.reveal_count, 6);
    }

    #[test]
    fn test_show_more_keys() {
        let mut app = loaded_app();

        InputHandler::handle_key_event(&mut app, KeyCode::Char('m'), KeyModifiers::NONE);
        assert_eq!(app.reveal_count, 9);

        InputHandler::handle_key_event(&mut app, KeyCode::Char(' '), KeyModifiers::NONE);
        assert_eq!(app.reveal_count, 12);
    }

    #[test]
    fn test_reset_key() {
        let mut app = loaded_app();
        app.set_category("Sports");
        app.show_more();
        app.toggle_expanded(2);

        InputHandler::handle_key_event(&mut app, KeyCode::Char('r'), KeyModifiers::NONE);
        assert_eq!(app.selected_category, CATEGORY_ALL);
        assert_eq!(app.reveal_count, 6);
        assert!(app.expanded_id.is_none());
    }

    #[test]
    fn test_enter_toggles_selected_club_details() {
        let mut app = loaded_app();

        InputHandler::handle_key_event(&mut app, KeyCode::Down, KeyModifiers::NONE);
        InputHandler::handle_key_event(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.expanded_id, Some(2));

        InputHandler::handle_key_event(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert!(app.expanded_id.is_none());
    }

    #[test]
    fn test_escape_collapses_detail_panel() {
        let mut app = loaded_app();
        app.toggle_expanded(1);

        InputHandler::handle_key_event(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert!(app.expanded_id.is_none());
    }

    #[test]
    fn test_navigation_keys_move_selection() {
        let mut app = loaded_app();

        InputHandler::handle_key_event(&mut app, KeyCode::Char('j'), KeyModifiers::NONE);
        InputHandler::handle_key_event(&mut app, KeyCode::Char('j'), KeyModifiers::NONE);
        assert_eq!(app.selected_index, 2);

        InputHandler::handle_key_event(&mut app, KeyCode::Char('k'), KeyModifiers::NONE);
        assert_eq!(app.selected_index, 1);
    }

    #[test]
    fn test_csv_export_key_binding() {
        let mut app = loaded_app();

        InputHandler::handle_key_event(&mut app, KeyCode::Char('e'), KeyModifiers::CONTROL);
        assert!(matches!(app.mode, AppMode::ExportCsv));
        assert_eq!(app.filename_input, "clubs.csv");
    }

    #[test]
    fn test_export_filename_input() {
        let mut app = loaded_app();
        app.start_csv_export();

        InputHandler::handle_key_event(&mut app, KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(app.filename_input, "clubs.csvx");

        InputHandler::handle_key_event(&mut app, KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(app.filename_input, "clubs.csv");

        InputHandler::handle_key_event(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert!(matches!(app.mode, AppMode::Normal));
        assert!(app.filename_input.is_empty());
    }

    #[test]
    fn test_export_writes_matched_set() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sports.csv");
        let path_str = path.to_str().unwrap().to_string();

        let mut app = loaded_app();
        app.set_category("Sports");
        app.start_csv_export();
        app.filename_input = path_str.clone();
        app.cursor_position = app.filename_input.len();

        InputHandler::handle_key_event(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert!(matches!(app.mode, AppMode::Normal));
        assert!(app.status_message.as_ref().unwrap().contains("Exported to"));

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2); // header + the one Sports club
        assert!(content.contains("Hiking Society"));
    }

    #[test]
    fn test_help_mode_open_and_close() {
        let mut app = loaded_app();

        InputHandler::handle_key_event(&mut app, KeyCode::Char('?'), KeyModifiers::NONE);
        assert!(matches!(app.mode, AppMode::Help));

        InputHandler::handle_key_event(&mut app, KeyCode::Down, KeyModifiers::NONE);
        InputHandler::handle_key_event(&mut app, KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(app.help_scroll, 2);

        InputHandler::handle_key_event(&mut app, KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(matches!(app.mode, AppMode::Normal));
    }
}
