//! Frame rendering: header, feedback line, list panel, detail forms, footer,
//! and the confirmation modal. Pure view code over `Dashboard` state.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use tutodash_core::controller::{CONFIRM_DELETE, CONFIRM_DELETE_ALL};
use tutodash_core::{PendingAction, Tutorial, TutorialDraft};

use crate::app::{App, FormField, Mode};

const DESCRIPTION_PREVIEW_CHARS: usize = 60;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let header = Paragraph::new("Tutorial Dashboard")
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).title(" tutodash "));
    frame.render_widget(header, chunks[0]);

    frame.render_widget(feedback_line(app), chunks[1]);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[2]);

    render_list_panel(frame, app, panels[0]);
    render_detail_panel(frame, app, panels[1]);

    frame.render_widget(Paragraph::new(help_line(app.mode)).dim(), chunks[3]);

    match app.mode {
        Mode::ConfirmDelete => render_confirm(frame, CONFIRM_DELETE),
        Mode::ConfirmDeleteAll => render_confirm(frame, CONFIRM_DELETE_ALL),
        _ => {}
    }
}

fn feedback_line(app: &App) -> Paragraph<'_> {
    let dash = &app.dashboard;
    let mut spans = vec![Span::styled(
        dash.summary_line(),
        Style::default().fg(Color::DarkGray),
    )];
    if dash.loading {
        spans.push(Span::styled("  Refreshing...", Style::default().fg(Color::Yellow)));
    }
    if let Some(label) = pending_label(dash.pending) {
        spans.push(Span::styled(
            format!("  {label}"),
            Style::default().fg(Color::Yellow),
        ));
    }
    if let Some(status) = &dash.status {
        spans.push(Span::styled(
            format!("  {status}"),
            Style::default().fg(Color::Green),
        ));
    }
    if let Some(error) = &dash.error {
        spans.push(Span::styled(
            format!("  {error}"),
            Style::default().fg(Color::Red),
        ));
    }
    Paragraph::new(Line::from(spans))
}

fn render_list_panel(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    let dash = &app.dashboard;
    let search_title = if dash.search_enabled() {
        " Search by title "
    } else {
        " Search disabled (published only) "
    };
    let search_style = if app.mode == Mode::Search {
        Style::default().fg(Color::Cyan)
    } else if !dash.search_enabled() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    let search = Paragraph::new(dash.search_term.as_str())
        .style(search_style)
        .block(Block::default().borders(Borders::ALL).title(search_title));
    frame.render_widget(search, rows[0]);

    let items: Vec<ListItem> = dash
        .tutorials
        .iter()
        .map(|t| list_item(t, dash.selected_id))
        .collect();
    let count_title = if dash.tutorials.is_empty() {
        " Library - no tutorials to show ".to_string()
    } else {
        format!(" Library - {} tutorial(s) loaded ", dash.tutorials.len())
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(count_title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("» ");
    let mut state = ListState::default();
    if !dash.tutorials.is_empty() {
        state.select(Some(app.cursor));
    }
    frame.render_stateful_widget(list, rows[1], &mut state);
}

fn list_item(tutorial: &Tutorial, selected_id: Option<i64>) -> ListItem<'_> {
    let (badge, badge_color) = badge(tutorial.published);
    let title_style = if selected_id == Some(tutorial.id) {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let title = Line::from(vec![
        Span::styled(card_title(tutorial).to_string(), title_style),
        Span::raw("  "),
        Span::styled(format!("[{badge}]"), Style::default().fg(badge_color)),
    ]);
    let meta = Line::from(Span::styled(
        format!(
            "ID #{} - {}",
            tutorial.id,
            description_preview(&tutorial.description)
        ),
        Style::default().fg(Color::DarkGray),
    ));
    ListItem::new(vec![title, meta])
}

fn render_detail_panel(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let dash = &app.dashboard;

    let create_active = match app.mode {
        Mode::Create(field) => Some(field),
        _ => None,
    };
    let create = Paragraph::new(form_lines(&dash.create_form, create_active))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Create Tutorial "));
    frame.render_widget(create, rows[0]);

    if dash.selected_id.is_some() {
        let edit_active = match app.mode {
            Mode::Edit(field) => Some(field),
            _ => None,
        };
        let edit = Paragraph::new(form_lines(&dash.edit_form, edit_active))
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(" Edit Tutorial "));
        frame.render_widget(edit, rows[1]);
    } else {
        let placeholder = Paragraph::new("Pick a tutorial from the list to update its details.")
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(" Select a Tutorial "));
        frame.render_widget(placeholder, rows[1]);
    }
}

fn form_lines(draft: &TutorialDraft, active: Option<FormField>) -> Vec<Line<'static>> {
    let marker = |field: FormField| if active == Some(field) { "› " } else { "  " };
    let field_style = |field: FormField| {
        if active == Some(field) {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        }
    };
    vec![
        Line::from(vec![
            Span::raw(marker(FormField::Title)),
            Span::raw("Title:       "),
            Span::styled(draft.title.clone(), field_style(FormField::Title)),
        ]),
        Line::from(vec![
            Span::raw(marker(FormField::Description)),
            Span::raw("Description: "),
            Span::styled(draft.description.clone(), field_style(FormField::Description)),
        ]),
        Line::from(vec![
            Span::raw(marker(FormField::Published)),
            Span::styled(
                format!("[{}] Published", if draft.published { "x" } else { " " }),
                field_style(FormField::Published),
            ),
        ]),
    ]
}

fn render_confirm(frame: &mut Frame, prompt: &str) {
    let area = centered_rect(50, 5, frame.area());
    frame.render_widget(Clear, area);
    let body = Paragraph::new(vec![
        Line::from(prompt.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "[y] yes    [n] no",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL).title(" Confirm "));
    frame.render_widget(body, area);
}

fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(height),
            Constraint::Min(1),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}

fn pending_label(pending: Option<PendingAction>) -> Option<&'static str> {
    pending.map(|action| match action {
        PendingAction::Create => "Creating...",
        PendingAction::Update => "Saving...",
        PendingAction::Delete => "Deleting...",
        PendingAction::DeleteAll => "Clearing...",
    })
}

fn help_line(mode: Mode) -> &'static str {
    match mode {
        Mode::Browse => {
            "up/down move  enter select  c create  e edit  d delete  D delete all  / search  p published-only  x reset  r refresh  q quit"
        }
        Mode::Search => "type to edit  enter search  esc cancel",
        Mode::Create(_) | Mode::Edit(_) => {
            "tab next field  space toggle published  enter save  esc cancel"
        }
        Mode::ConfirmDelete | Mode::ConfirmDeleteAll => "y confirm  n cancel",
    }
}

fn badge(published: bool) -> (&'static str, Color) {
    if published {
        ("Published", Color::Green)
    } else {
        ("Draft", Color::Yellow)
    }
}

fn card_title(tutorial: &Tutorial) -> &str {
    if tutorial.title.is_empty() {
        "Untitled tutorial"
    } else {
        &tutorial.title
    }
}

fn description_preview(description: &str) -> String {
    if description.is_empty() {
        return "No description".to_string();
    }
    description.chars().take(DESCRIPTION_PREVIEW_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_title_falls_back_to_untitled() {
        let t = Tutorial {
            id: 1,
            title: String::new(),
            description: String::new(),
            published: false,
        };
        assert_eq!(card_title(&t), "Untitled tutorial");
    }

    #[test]
    fn description_preview_truncates_on_char_boundaries() {
        assert_eq!(description_preview(""), "No description");
        assert_eq!(description_preview("short"), "short");
        let long: String = "ä".repeat(100);
        assert_eq!(description_preview(&long).chars().count(), 60);
    }

    #[test]
    fn badge_reflects_published_flag() {
        assert_eq!(badge(true).0, "Published");
        assert_eq!(badge(false).0, "Draft");
    }

    #[test]
    fn pending_labels_match_actions() {
        assert_eq!(pending_label(Some(PendingAction::Delete)), Some("Deleting..."));
        assert_eq!(pending_label(None), None);
    }
}
