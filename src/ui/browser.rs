use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use super::{popup, truncate};
use crate::app::App;
use crate::browser::{format_stars, BrowserState, FetchState};
use crate::types::Item;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let browser = &app.browser;
    let showing_results = matches!(browser.fetch, FetchState::Success { .. });

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(if showing_results { 3 } else { 0 }),
        ])
        .split(area);

    let subtitle = Paragraph::new(Line::from(Span::styled(
        format!(
            " Discover popular repositories with {}+ stars",
            browser.min_stars()
        ),
        Style::default().fg(Color::Gray),
    )));
    frame.render_widget(subtitle, chunks[0]);

    match &browser.fetch {
        FetchState::Idle => {}
        FetchState::Loading => render_loading(frame, chunks[1]),
        FetchState::Failure(message) => popup::render_retry(frame, chunks[1], message),
        FetchState::Success { items, .. } => {
            render_cards(frame, browser, items, chunks[1]);
            render_pagination(frame, browser, chunks[2]);
        }
    }
}

fn render_loading(frame: &mut Frame, area: Rect) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let loading = Paragraph::new("⟳ Loading repositories...")
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center);
    frame.render_widget(loading, vertical[1]);
}

fn render_cards(frame: &mut Frame, browser: &BrowserState, items: &[Item], area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Repositories (page {}) ", browser.page));

    if items.is_empty() {
        let empty = Paragraph::new("No repositories found")
            .block(block)
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(empty, area);
        return;
    }

    let w = area.width.saturating_sub(4) as usize;

    let cards: Vec<ListItem> = items
        .iter()
        .enumerate()
        .map(|(i, item)| card(item, i == browser.cursor, w))
        .collect();

    let list = List::new(cards)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    state.select(Some(browser.cursor));

    frame.render_stateful_widget(list, area, &mut state);
}

fn card(item: &Item, selected: bool, width: usize) -> ListItem<'static> {
    let name_style = if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let stars = format!("★ {}", format_stars(item.star_count));
    let name_width = width.saturating_sub(stars.chars().count() + 1);

    let description = item
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or("No description available");

    let mut links = Vec::new();
    if let Some(language) = &item.primary_language {
        links.push(Span::styled(
            format!("[{}]", language),
            Style::default().fg(Color::LightBlue),
        ));
        links.push(Span::raw(" "));
    }
    links.push(Span::styled(
        item.url.clone(),
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::UNDERLINED),
    ));

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{:<name_width$}", truncate(&item.name, name_width)),
                name_style,
            ),
            Span::raw(" "),
            Span::styled(stars, Style::default().fg(Color::Yellow)),
        ]),
        Line::from(vec![
            Span::styled("by ", Style::default().fg(Color::Gray)),
            Span::styled(item.owner.login.clone(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(Span::styled(
            truncate(description, width),
            Style::default().fg(Color::Gray),
        )),
        Line::from(links),
        Line::from(""),
    ];

    ListItem::new(Text::from(lines))
}

fn render_pagination(frame: &mut Frame, browser: &BrowserState, area: Rect) {
    let control = |label: &'static str, enabled: bool| {
        if enabled {
            Span::styled(
                label,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(label, Style::default().fg(Color::DarkGray))
        }
    };

    let line = Line::from(vec![
        Span::raw("Page "),
        Span::styled(
            browser.page.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" of "),
        Span::styled(
            browser.total_pages().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("    "),
        control("◀ [h] Previous", browser.can_prev()),
        Span::raw("  "),
        control("[l] Next ▶", browser.can_next()),
    ]);

    let footer = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
