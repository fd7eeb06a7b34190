use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use crate::app::App;
use crate::selection::HeaderCheckbox;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let table = &app.table;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let header = table.header();
    let summary = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(
            header_glyph(header),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            table.selection_label(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  ({} open of {})", table.open_count(), table.records().len()),
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    frame.render_widget(summary, chunks[0]);

    let block = Block::default().borders(Borders::ALL).title(" Issues ");

    if table.records().is_empty() {
        let empty = Paragraph::new("No issues")
            .block(block)
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let column_header = Row::new(["", "Name", "Message", "Status"].map(|h| {
        Cell::from(h).style(Style::default().add_modifier(Modifier::BOLD))
    }))
    .style(Style::default().fg(Color::White))
    .height(1);

    let rows = table.records().iter().enumerate().map(|(i, record)| {
        let open = record.status.is_open();
        let checked = table.is_checked(i);

        let mut style = if open {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        if checked {
            style = style.bg(Color::Blue);
        }

        let status_color = if open { Color::LightBlue } else { Color::Gray };

        Row::new(vec![
            Cell::from(checkbox_glyph(checked, !open)),
            Cell::from(record.name.clone()),
            Cell::from(record.message.clone()),
            Cell::from(Line::from(vec![
                Span::styled("● ", Style::default().fg(status_color)),
                Span::styled(record.status.to_string(), Style::default().fg(status_color)),
            ])),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Length(3),
        Constraint::Percentage(20),
        Constraint::Min(20),
        Constraint::Length(10),
    ];

    let widget = Table::new(rows, widths)
        .header(column_header)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = TableState::default().with_selected(Some(table.cursor));
    frame.render_stateful_widget(widget, chunks[1], &mut state);
}

fn header_glyph(header: HeaderCheckbox) -> &'static str {
    if header.indeterminate {
        "[-]"
    } else if header.checked {
        "[x]"
    } else {
        "[ ]"
    }
}

fn checkbox_glyph(checked: bool, disabled: bool) -> &'static str {
    match (checked, disabled) {
        (true, _) => "[x]",
        (false, true) => " · ",
        (false, false) => "[ ]",
    }
}
