// crates/nt-cli/src/tui/ui.rs - Drawing the browser
//
// Pure presentation: reads App state, never changes what is stored.

use nt_core::Note;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, List, ListItem, Padding, Paragraph, Wrap};
use tui_textarea::TextArea;

use super::app::{App, Mode, Stage, Status};
use super::layout::soft_break_long_tokens;

const ACCENT: Color = Color::Rgb(123, 104, 238);
const BODY: Color = Color::Rgb(220, 220, 220);
const DONE: Color = Color::Rgb(50, 205, 50);
const MUTED: Color = Color::Rgb(136, 136, 136);

const DONE_MARK: &str = "✅";
const OPEN_MARK: &str = "❌";

pub fn draw(frame: &mut Frame, app: &mut App<'_>) {
    let outer = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT))
        .padding(Padding::uniform(1));
    let inner = outer.inner(frame.area());
    frame.render_widget(outer, frame.area());

    let [main, status_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

    if let Some(status) = app.status() {
        frame.render_widget(status_line(status), status_area);
    }

    match app.mode() {
        Mode::List => draw_list(frame, app, main),
        Mode::View { note } => draw_view(frame, app, note, main),
        Mode::Add {
            stage: Stage::Title,
            input,
            ..
        } => draw_input(
            frame,
            main,
            "Add Note — Title",
            "(Enter) go to Body • (Esc) cancel",
            input,
            Some(app.viewport().input_width()),
        ),
        Mode::Add {
            stage: Stage::Body,
            input,
            ..
        } => draw_input(
            frame,
            main,
            "Add Note — Body (Ctrl+S to save)",
            "(Ctrl+S) save • (Esc) back to Title • (Ctrl+X) discard",
            input,
            None,
        ),
        Mode::Edit { input, .. } => draw_input(
            frame,
            main,
            "Edit Note — Body (Ctrl+S to save)",
            "(Ctrl+S) save • (Esc) cancel",
            input,
            None,
        ),
    }
}

fn completion_mark(note: &Note) -> &'static str {
    if note.completed { DONE_MARK } else { OPEN_MARK }
}

/// List row: title, completion mark, timestamp
fn row_line(note: &Note, timestamp_format: &str) -> Line<'static> {
    let title_style = if note.completed {
        Style::default().fg(DONE)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::styled(note.title.clone(), title_style),
        Span::raw(format!(" {} ", completion_mark(note))),
        Span::styled(
            note.created_at.format(timestamp_format).to_string(),
            Style::default().fg(MUTED).add_modifier(Modifier::ITALIC),
        ),
    ])
}

fn draw_list(frame: &mut Frame, app: &mut App<'_>, area: Rect) {
    let viewport = app.viewport();
    let [list_area, _, count_area, help_area] = Layout::vertical([
        Constraint::Length(viewport.list_rows()),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);
    let [list_area, _] =
        Layout::horizontal([Constraint::Length(viewport.list_width()), Constraint::Min(0)])
            .areas(list_area);

    let timestamp_format = app.display().timestamp_format.clone();
    let items: Vec<ListItem> = app
        .visible_notes()
        .into_iter()
        .map(|note| ListItem::new(row_line(note, &timestamp_format)))
        .collect();

    let mut summary = format!(" {} notes ", app.note_count());
    let filter = app.filter();
    if filter.is_active() {
        let cursor = if filter.typing { "▏" } else { "" };
        summary.push_str(&format!("• filter: {}{cursor} ", filter.query));
    }
    let empty = items.is_empty();

    let list = List::new(items)
        .block(Block::new().title(Line::from("Notes").bold().fg(ACCENT)))
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .highlight_symbol("│ ");

    let (_, list_state) = app.render_parts();
    frame.render_stateful_widget(list, list_area, list_state);

    if empty {
        let hint = Paragraph::new("No notes yet. Press (a) to add one.").fg(MUTED);
        let [_, hint_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(list_area);
        frame.render_widget(hint, hint_area);
    }

    frame.render_widget(
        Paragraph::new(format!("(↑/k up • ↓/j down • / filter) •{summary}")).fg(MUTED),
        count_area,
    );
    frame.render_widget(
        Paragraph::new("(a) add • (enter) view • (c) toggle complete • (q) quit").fg(MUTED),
        help_area,
    );
}

fn draw_view(frame: &mut Frame, app: &App<'_>, note: &Note, area: Rect) {
    let viewport = app.viewport();
    let display = app.display();

    let [content, _] =
        Layout::horizontal([Constraint::Length(viewport.content_width()), Constraint::Min(0)])
            .areas(area);
    let [title_area, _, body_area, help_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(content);

    let title = Paragraph::new(row_line(note, &display.timestamp_format))
        .bold()
        .fg(ACCENT);
    frame.render_widget(title, title_area);

    let body_text = soft_break_long_tokens(&note.body, display.soft_break_width);
    let body = Paragraph::new(Text::from(body_text))
        .style(Style::default().fg(BODY))
        .block(Block::new().padding(Padding::horizontal(2)))
        .wrap(Wrap { trim: false });
    frame.render_widget(body, body_area);

    frame.render_widget(
        Paragraph::new("(e) edit • (d) delete • (c) toggle complete • (Esc) back").fg(MUTED),
        help_area,
    );
}

fn draw_input(
    frame: &mut Frame,
    area: Rect,
    heading: &str,
    help: &str,
    input: &TextArea<'static>,
    width: Option<u16>,
) {
    let input_height = if width.is_some() {
        Constraint::Length(1)
    } else {
        Constraint::Min(1)
    };
    let [heading_area, _, input_area, _, help_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        input_height,
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let input_area = match width {
        Some(width) => {
            let [narrow, _] =
                Layout::horizontal([Constraint::Length(width), Constraint::Min(0)]).areas(input_area);
            narrow
        }
        None => input_area,
    };

    frame.render_widget(Paragraph::new(heading.to_string()).bold(), heading_area);
    frame.render_widget(input, input_area);
    frame.render_widget(Paragraph::new(help.to_string()).fg(MUTED), help_area);
}

fn status_line(status: &Status) -> Paragraph<'static> {
    let color = if status.is_error { Color::Red } else { MUTED };
    Paragraph::new(status.text.clone()).fg(color)
}
