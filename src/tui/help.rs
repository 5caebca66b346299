use ratatui::{
    layout::Rect,
    style::Color,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

fn key(k: &'static str, pad: usize, what: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(k, Style::default().fg(Color::Magenta)),
        Span::raw(" ".repeat(pad)),
        Span::raw(what),
    ])
}

pub fn draw_help(area: Rect, f: &mut Frame) {
    let p = Paragraph::new(vec![
        Line::from("Keybinds:"),
        key("Ctrl-C", 6, "Quit"),
        key("q", 11, "Quit (customer list)"),
        key("tab", 9, "Switch tabs (customer list, feed)"),
        key("F1 / ?", 6, "Show this help"),
        Line::from(""),
        Line::from("Customer list:"),
        key("↑/↓ j/k", 5, "Select"),
        key("e / Enter", 3, "Edit selected"),
        key("n", 11, "New customer"),
        key("f", 11, "Back to the form"),
        key("d", 11, "Delete selected"),
        key("r", 11, "Reload list"),
        Line::from(""),
        Line::from("Customer form:"),
        key("tab / ↓", 5, "Next field"),
        key("S-tab / ↑", 3, "Previous field"),
        key("Ctrl-A", 6, "Add address row"),
        key("Ctrl-D", 6, "Remove focused address row"),
        key("Ctrl-U", 6, "Upload photo"),
        key("Ctrl-S", 6, "Save"),
        key("Ctrl-R", 6, "Reset form"),
        key("Esc", 9, "Back to list"),
        Line::from(""),
        Line::from("Feed:"),
        key("type", 8, "Search titles"),
        key("↑/↓", 9, "Scroll"),
        key("Esc", 9, "Clear search"),
    ])
    .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(Clear, area);
    f.render_widget(p, area);
}
