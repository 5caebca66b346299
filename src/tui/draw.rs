use super::help::draw_help;
use super::state::{Mode, Tab, UiState};
use crate::customers::{table_rows, AddressField, FormField, DELETE_PROMPT};
use crate::outcome::Notice;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Tabs, Wrap},
    Frame,
};

pub fn draw(area: Rect, f: &mut Frame, state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(area);

    let tabs = Tabs::new(Tab::TITLES.iter().map(|t| Line::from(*t)).collect::<Vec<_>>())
        .select(state.tab.index())
        .block(Block::default().borders(Borders::ALL).title("frappe-desk"))
        .highlight_style(Style::default().fg(Color::Yellow));
    f.render_widget(tabs, chunks[0]);

    match state.tab {
        Tab::Customers => draw_customers(chunks[1], f, state),
        Tab::Feed => draw_feed(chunks[1], f, state),
    }
    draw_status(chunks[2], f, state);

    match &state.mode {
        Mode::ConfirmDelete(docname) if state.tab == Tab::Customers => {
            draw_confirm(centered(area, 50, 7), f, docname)
        }
        Mode::PhotoPath(buf) if state.tab == Tab::Customers => {
            draw_photo_prompt(centered(area, 60, 3), f, buf)
        }
        _ => {}
    }
    if state.show_help {
        draw_help(centered(area, 60, 34), f);
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}

fn draw_customers(area: Rect, f: &mut Frame, state: &UiState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)].as_ref())
        .split(area);

    let rows = table_rows(&state.customers.table).into_iter().map(|r| {
        Row::new(vec![
            Cell::from(r.docname),
            Cell::from(r.name),
            Cell::from(r.email),
            Cell::from(r.photo),
        ])
    });
    let widths = [
        Constraint::Length(12),
        Constraint::Percentage(30),
        Constraint::Percentage(35),
        Constraint::Min(8),
    ];
    let list_focused = state.mode == Mode::Browse;
    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["ID", "Name", "Email", "Photo"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Customers ({})", state.customers.table.len()))
                .border_style(focus_style(list_focused)),
        )
        .row_highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan));

    let mut ts = TableState::default();
    if !state.customers.table.is_empty() {
        ts.select(Some(state.selected));
    }
    f.render_stateful_widget(table, cols[0], &mut ts);

    draw_form(cols[1], f, state);
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn draw_form(area: Rect, f: &mut Frame, state: &UiState) {
    let form = &state.customers.form;
    let editing = state.mode == Mode::Form;
    let focused = if editing { state.focused_field() } else { None };
    let title = match form.docname() {
        Some(d) => format!("Edit {d}"),
        None => "New customer".to_string(),
    };

    let mut lines: Vec<Line> = Vec::new();
    let mut row_no = 0;
    for field in form.focus_order() {
        let label = match field {
            FormField::Scalar(s) => s.label().to_string(),
            FormField::Address(_, a) => {
                if a == AddressField::Line1 {
                    row_no += 1;
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled(
                        format!("Address {row_no}"),
                        Style::default().fg(Color::Magenta),
                    )));
                }
                format!("  {}", a.label())
            }
        };
        let value = form.value(field).unwrap_or_default();
        let is_focused = focused == Some(field);
        let value_style = if is_focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let cursor = if is_focused { "▏" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(format!("{label:<16}"), Style::default().fg(Color::Gray)),
            Span::styled(value.to_string(), value_style),
            Span::styled(cursor, value_style),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(format!("{:<16}", "Photo"), Style::default().fg(Color::Gray)),
        Span::raw(state.customers.session.photo.clone().unwrap_or_else(|| "(none)".into())),
    ]));

    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(focus_style(editing)),
    );
    f.render_widget(p, area);
}

fn draw_feed(area: Rect, f: &mut Frame, state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
        .split(area);

    let search = Paragraph::new(Line::from(vec![
        Span::raw(state.feed.term.clone()),
        Span::styled("▏", Style::default().fg(Color::Yellow)),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Search"));
    f.render_widget(search, chunks[0]);

    let mut lines: Vec<Line> = Vec::new();
    if state.feed.cards.is_empty() {
        lines.push(Line::from(Span::styled(
            "No posts found.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for card in &state.feed.cards {
        lines.push(Line::from(Span::styled(
            card.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(card.link.clone(), Style::default().fg(Color::Cyan))));
        lines.push(Line::from(Span::styled(card.meta.clone(), Style::default().fg(Color::DarkGray))));
        lines.push(Line::from(card.excerpt.clone()));
        lines.push(Line::from(""));
    }

    let scroll = u16::try_from(state.feed_scroll).unwrap_or(u16::MAX);
    let title = match state.feed.pending() {
        0 => format!("Posts ({})", state.feed.cards.len()),
        n => format!("Posts ({}, {n} searching)", state.feed.cards.len()),
    };
    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title),
        );
    f.render_widget(p, chunks[1]);
}

fn draw_status(area: Rect, f: &mut Frame, state: &UiState) {
    let mut spans = Vec::new();
    if state.in_flight > 0 {
        spans.push(Span::styled(
            format!("[{} pending] ", state.in_flight),
            Style::default().fg(Color::Blue),
        ));
    }
    if let Some(n) = state.status_notice() {
        let color = match n {
            Notice::Info(_) => Color::Green,
            Notice::Warning(_) => Color::Yellow,
            Notice::Error(_) => Color::Red,
        };
        spans.push(Span::styled(n.text().to_string(), Style::default().fg(color)));
    } else {
        spans.push(Span::styled("F1 for help", Style::default().fg(Color::DarkGray)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_confirm(area: Rect, f: &mut Frame, docname: &str) {
    let p = Paragraph::new(vec![
        Line::from(DELETE_PROMPT),
        Line::from(Span::styled(docname.to_string(), Style::default().fg(Color::Yellow))),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(Color::Magenta)),
            Span::raw(" delete   "),
            Span::styled("n", Style::default().fg(Color::Magenta)),
            Span::raw(" keep"),
        ]),
    ])
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL).title("Delete"));
    f.render_widget(Clear, area);
    f.render_widget(p, area);
}

fn draw_photo_prompt(area: Rect, f: &mut Frame, buf: &str) {
    let p = Paragraph::new(Line::from(vec![
        Span::raw(buf.to_string()),
        Span::styled("▏", Style::default().fg(Color::Yellow)),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Photo file (Enter to upload)"));
    f.render_widget(Clear, area);
    f.render_widget(p, area);
}
