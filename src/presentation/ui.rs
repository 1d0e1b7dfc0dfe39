use crate::application::{App, AppMode};
use crate::domain::{Club, DirectoryView, CATEGORY_ALL};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

/// The fixed category enumeration: display label and tag value.
///
/// Tag values are matched exactly against `Club::category`; the labels are
/// purely presentational.
pub const CATEGORIES: [(&str, &str); 6] = [
    ("Tous les Clubs", CATEGORY_ALL),
    ("Informatique", "Informatique"),
    ("Social", "Social"),
    ("Mecatronique", "Mecatronique"),
    ("Environnement", "Environnement"),
    ("Sports", "Sports"),
];

/// Accent color for a category tag.
pub fn category_color(category: &str) -> Color {
    match category {
        "Informatique" => Color::Blue,
        "Social" => Color::Magenta,
        "Mecatronique" => Color::Green,
        "Environnement" => Color::Cyan,
        "Sports" => Color::Yellow,
        _ => Color::Gray,
    }
}

pub fn render_ui(f: &mut Frame, app: &mut App) {
    let show_detail = {
        let view = app.view();
        expanded_visible_club(app, &view).is_some()
    };

    let mut constraints = vec![
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ];
    if show_detail {
        constraints.push(Constraint::Length(10));
    }
    constraints.push(Constraint::Length(3));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    // Keep the scroll math in sync with the actual list height.
    app.update_viewport_size(chunks[2].height.saturating_sub(3) as usize);

    let view = app.view();
    render_header(f, app, &view, chunks[0]);
    render_category_tabs(f, app, chunks[1]);
    render_club_list(f, app, &view, chunks[2]);

    if show_detail {
        if let Some(club) = expanded_visible_club(app, &view) {
            render_detail_panel(f, club, chunks[3]);
        }
        render_status_bar(f, app, chunks[4]);
    } else {
        render_status_bar(f, app, chunks[3]);
    }

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

/// The expanded club, if it is currently visible.
///
/// A club filtered out of the visible set keeps its expanded flag but its
/// panel is not drawn until it matches again.
fn expanded_visible_club<'a>(app: &App, view: &DirectoryView<'a>) -> Option<&'a Club> {
    let id = app.expanded_id?;
    view.visible.iter().copied().find(|club| club.id == id)
}

fn render_header(f: &mut Frame, app: &App, view: &DirectoryView, area: Rect) {
    let text = if app.is_loading {
        "tclubs - University Club Directory | Loading clubs...".to_string()
    } else {
        format!(
            "tclubs - University Club Directory | Showing {} of {} clubs",
            view.shown_count(),
            view.total_count
        )
    };

    let header = Paragraph::new(text).style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_category_tabs(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();
    for (index, &(label, value)) in CATEGORIES.iter().enumerate() {
        let style = if app.selected_category == value {
            Style::default().bg(Color::LightBlue).fg(Color::Black)
        } else {
            Style::default().fg(category_color(value))
        };
        spans.push(Span::styled(format!(" {}:{} ", index + 1, label), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_club_list(f: &mut Frame, app: &App, view: &DirectoryView, area: Rect) {
    if app.is_loading {
        let loading = Paragraph::new("Loading clubs...")
            .block(Block::default().borders(Borders::ALL).title("Clubs"));
        f.render_widget(loading, area);
        return;
    }

    if view.total_count == 0 {
        let empty = Paragraph::new("No clubs available.")
            .block(Block::default().borders(Borders::ALL).title("Clubs"));
        f.render_widget(empty, area);
        return;
    }

    if view.shown_count() == 0 {
        let empty = Paragraph::new("No clubs match the current filters. Press 'r' to reset.")
            .block(Block::default().borders(Borders::ALL).title("Clubs"));
        f.render_widget(empty, area);
        return;
    }

    let visible_rows = (area.height as usize).saturating_sub(3);
    let end = (app.scroll_offset + visible_rows).min(view.shown_count());

    let header_row = Row::new(vec![
        Cell::from(""),
        Cell::from("Name").style(Style::default().fg(Color::Yellow)),
        Cell::from("Category").style(Style::default().fg(Color::Yellow)),
        Cell::from("Members").style(Style::default().fg(Color::Yellow)),
        Cell::from("Description").style(Style::default().fg(Color::Yellow)),
    ])
    .height(1);

    let mut rows = vec![header_row];
    for (index, club) in view.visible[app.scroll_offset..end].iter().enumerate() {
        let absolute_index = app.scroll_offset + index;
        let marker = if app.is_expanded(club.id) { "▾" } else { " " };

        let row_style = if absolute_index == app.selected_index {
            Style::default().bg(Color::Blue).fg(Color::White)
        } else {
            Style::default()
        };
        let category_style = if absolute_index == app.selected_index {
            Style::default().bg(Color::Blue).fg(Color::White)
        } else {
            Style::default().fg(category_color(&club.category))
        };

        rows.push(
            Row::new(vec![
                Cell::from(marker),
                Cell::from(club.name.as_str()),
                Cell::from(club.category.as_str()).style(category_style),
                Cell::from(club.members.to_string()),
                Cell::from(club.description.as_str()),
            ])
            .style(row_style)
            .height(1),
        );
    }

    let title = if view.has_more {
        format!(
            "Clubs ({} of {} matches, press 'm' for more)",
            view.shown_count(),
            view.matched_count
        )
    } else {
        format!("Clubs ({} matches)", view.matched_count)
    };

    let widths = [
        Constraint::Length(1),
        Constraint::Percentage(25),
        Constraint::Length(13),
        Constraint::Length(7),
        Constraint::Min(10),
    ];
    let table = Table::new(rows, widths)
        .block(Block::default().borders(Borders::ALL).title(title))
        .column_spacing(1);

    f.render_widget(table, area);
}

fn render_detail_panel(f: &mut Frame, club: &Club, area: Rect) {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                club.category.as_str(),
                Style::default().fg(category_color(&club.category)),
            ),
            Span::raw(format!(" | {} members | {}", club.members, club.meetings)),
        ]),
        Line::from(club.long_description.as_str()),
    ];
    if !club.activities.is_empty() {
        lines.push(Line::from(format!(
            "Activities: {}",
            club.activities.join(", ")
        )));
    }
    lines.push(Line::from(format!(
        "Contact: {} ({})",
        club.contact.email, club.contact.president
    )));

    let detail = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(club.name.as_str())
                .style(Style::default().fg(Color::White)),
        );
    f.render_widget(detail, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let input_text = match app.mode {
        AppMode::Normal => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                "↑↓/jk: navigate | Enter: details | Tab/1-6: category | /: search | m: show more | r: reset | c: copy email | Ctrl+E: export CSV | ?: help | q: quit".to_string()
            }
        }
        AppMode::Search => format!(
            "Search: {} (filters as you type, Enter to keep, Esc to clear)",
            app.search_query
        ),
        AppMode::ExportCsv => format!(
            "Export CSV as: {} (Enter to export, Esc to cancel)",
            app.filename_input
        ),
        AppMode::Help => {
            "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string()
        }
    };

    let input = Paragraph::new(input_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::Search => Style::default().fg(Color::Green),
            AppMode::ExportCsv => Style::default().fg(Color::Magenta),
            AppMode::Help => Style::default().fg(Color::Cyan),
        });
    f.render_widget(input, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(
                    "tclubs Help (Line {}/{})",
                    start_line + 1,
                    help_lines.len()
                ))
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

fn get_help_text() -> String {
    r#"TCLUBS - UNIVERSITY CLUB DIRECTORY

=== BROWSING ===
↑↓ or j/k       Move the cursor through the visible clubs
Enter           Expand/collapse the selected club's details
Esc             Collapse the open detail panel
m or Space      Reveal more matching clubs (3 at a time)

=== FILTERING ===
Tab / Shift+Tab Cycle through categories
1-6             Select a category directly
/               Search clubs by name or description
                The list filters live as you type.
                Enter keeps the query active, Esc clears it.
r               Reset all filters (category, search, reveal, details)

Category and search combine: a club must match both. Search is
case-insensitive and looks at the name, the short description, and
the long description.

=== ACTIONS ===
c               Copy the selected club's contact email to the clipboard
Ctrl+E          Export the matching clubs to a CSV file

=== DATA ===
The club list is loaded once at startup, from data/clubs-data.json
by default. Pass a file path or an http(s) URL as the first argument
to load a different dataset. If the load fails the directory stays
empty; check the log output for the cause.

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/?/q      Close this help window"#
        .to_string()
}
