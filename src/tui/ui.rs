use crate::tui::app::{App, Focus};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

/// The scroll hint only appears once the list is longer than this.
const SCROLL_HINT_MIN_ITEMS: usize = 5;

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(3), // Input
            Constraint::Min(0),    // Items
            Constraint::Length(3), // Footer
        ])
        .split(frame.size());

    draw_header(frame, chunks[0]);
    draw_input(frame, chunks[1], app);
    draw_todo_list(frame, chunks[2], app);
    draw_footer(frame, chunks[3], app);

    if app.help_mode {
        draw_help_window(frame);
    }
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new("TodoList App")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    frame.render_widget(header, area);
}

fn draw_input(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Input;
    let cursor = if focused { "█" } else { "" };
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let input = Paragraph::new(format!("{}{}", app.draft().title, cursor)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(app.input_title())
            .border_style(border_style),
    );

    frame.render_widget(input, area);
}

fn draw_todo_list(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title("Items");

    if app.items().is_empty() {
        let empty = Paragraph::new("Add a Todo to your list")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    let editing = app.editing_index();
    let items: Vec<ListItem> = app
        .items()
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let checkbox = if item.is_checked { "☑" } else { "☐" };
            let style = if editing == Some(i) {
                Style::default().bg(Color::Blue).fg(Color::White)
            } else if item.is_checked {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(Color::White)
            };

            ListItem::new(Line::from(Span::styled(
                format!("{} {}", checkbox, item.title),
                style,
            )))
        })
        .collect();

    let highlight = if app.focus == Focus::List {
        Style::default()
            .bg(Color::Yellow)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let list = List::new(items).block(block).highlight_style(highlight);

    let mut list_state = ListState::default();
    list_state.select(Some(app.selected_index));

    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Whether the list overflows the rows available inside its bordered block.
pub fn needs_scroll_hint(item_count: usize, list_height: u16) -> bool {
    let visible_rows = usize::from(list_height.saturating_sub(2));
    item_count > SCROLL_HINT_MIN_ITEMS && item_count > visible_rows
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();

    if let Some(message) = &app.status_message {
        spans.push(Span::styled(
            format!("{} | ", message),
            Style::default().fg(Color::Red),
        ));
    }

    let list_height = frame.size().height.saturating_sub(2 + 1 + 3 + 3);
    if needs_scroll_hint(app.items().len(), list_height) {
        spans.push(Span::styled(
            "Scroll Down | ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
    }

    let hints = match app.focus {
        Focus::Input => "Enter: submit | Esc: cancel edit / list | Tab: list",
        Focus::List => "↑↓/j/k: navigate | Space: check | e: edit | d: delete | ?: help | q: quit",
    };
    spans.push(Span::styled(
        format!(
            "Items: {} | Completed: {} | {}",
            app.total_items(),
            app.completed_items(),
            hints
        ),
        Style::default().fg(Color::Yellow),
    ));

    let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}

fn draw_help_window(frame: &mut Frame) {
    let help_text = [
        "TodoList - Keyboard Commands",
        "",
        "INPUT:",
        "  type              Edit the draft",
        "  Enter             Add the draft, or save the edit",
        "  Esc               Cancel edit, or switch to the list",
        "  Tab               Switch to the list",
        "",
        "LIST:",
        "  ↑↓ / j/k          Navigate up/down",
        "  Space / x         Check or uncheck",
        "  e                 Edit item",
        "  d                 Delete item",
        "  a / i / Tab       Switch to the input",
        "  Esc               Cancel edit",
        "",
        "OTHER:",
        "  ?                 Show this help (press ? or Esc to close)",
        "  q / Ctrl+C        Quit application",
    ];

    let help_paragraph = Paragraph::new(help_text.join("\n"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help - Keyboard Commands ")
                .style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().fg(Color::White))
        .wrap(ratatui::widgets::Wrap { trim: true });

    let area = centered_rect(70, 70, frame.size());

    frame.render_widget(Clear, area);
    frame.render_widget(help_paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
