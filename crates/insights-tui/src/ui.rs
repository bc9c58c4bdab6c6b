use chrono::Local;
use insights_core::dashboard::{NO_ISSUES_PLACEHOLDER, NO_RECENT_PLACEHOLDER};
use insights_core::{IssuePriority, Priority, RecentCase};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use crate::app::{App, FormField, NoticeKind, TextInput, TAG_COLUMNS};

const BAR_WIDTH: usize = 20;

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);

    let [form_area, dashboard_area] = Layout::horizontal([
        Constraint::Percentage(45),
        Constraint::Percentage(55),
    ])
    .areas(body_area);

    render_form(app, frame, form_area);
    render_dashboard(app, frame, dashboard_area);
    render_footer(app, frame, footer_area);

    if app.notice.is_some() {
        render_notice(app, frame, area);
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let logged = app.session.records().len();
    let logged_indicator = if logged > 0 {
        format!(" [{} logged]", logged)
    } else {
        String::new()
    };

    let title = Line::from(vec![
        Span::styled(" Customer Insights ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(logged_indicator, Style::default().fg(Color::DarkGray)),
        Span::raw(" "),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    frame.render_widget(Paragraph::new(title), area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let mut hints = vec![
        Span::styled(" Tab ", key_style),
        Span::styled(" next field ", label_style),
    ];

    match app.focus {
        FormField::InteractionType => {
            hints.push(Span::styled(" ←/→ ", key_style));
            hints.push(Span::styled(" change type ", label_style));
        }
        FormField::Tags => {
            hints.push(Span::styled(" arrows ", key_style));
            hints.push(Span::styled(" move ", label_style));
            hints.push(Span::styled(" Space ", key_style));
            hints.push(Span::styled(" toggle ", label_style));
        }
        FormField::CustomerName | FormField::Description => {
            hints.push(Span::styled(" Enter ", key_style));
            hints.push(Span::styled(" submit ", label_style));
        }
    }

    hints.push(Span::styled(" Ctrl+S ", key_style));
    hints.push(Span::styled(" submit ", label_style));
    hints.push(Span::styled(" Esc ", key_style));
    hints.push(Span::styled(" quit ", label_style));

    frame.render_widget(Paragraph::new(Line::from(hints)), area);
}

fn field_block(title: &str, focused: bool) -> Block<'_> {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title)
}

fn render_form(app: &mut App, frame: &mut Frame, area: Rect) {
    let tag_rows = app.available_tags.len().div_ceil(TAG_COLUMNS) as u16;

    let outer = Block::default()
        .borders(Borders::ALL)
        .title(" Log Customer Interaction ");
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let [name_area, type_area, description_area, tags_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(4),
        Constraint::Length(tag_rows + 2),
    ])
    .areas(inner);

    render_text_input(
        frame,
        name_area,
        " Customer Name ",
        &app.customer_name,
        app.focus == FormField::CustomerName,
    );

    let type_focused = app.focus == FormField::InteractionType;
    let type_line = Line::from(vec![
        Span::styled("◀ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.interaction_type.display_name(),
            if type_focused {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            },
        ),
        Span::styled(" ▶", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(
        Paragraph::new(type_line).block(field_block(" Interaction Type ", type_focused)),
        type_area,
    );

    render_text_input(
        frame,
        description_area,
        " Description ",
        &app.description,
        app.focus == FormField::Description,
    );

    render_tags(app, frame, tags_area);
}

/// Text box that hard-wraps by character so the cursor lands where typed text does.
fn render_text_input(frame: &mut Frame, area: Rect, title: &str, input: &TextInput, focused: bool) {
    let block = field_block(title, focused);
    let inner = block.inner(area);
    let width = inner.width.max(1) as usize;

    let chars: Vec<char> = input.value.chars().collect();
    let lines: Vec<Line> = if chars.is_empty() {
        vec![Line::default()]
    } else {
        chars
            .chunks(width)
            .map(|chunk| Line::raw(chunk.iter().collect::<String>()))
            .collect()
    };

    // Keep the cursor row visible in short boxes
    let cursor_row = (input.cursor / width) as u16;
    let scroll = cursor_row.saturating_sub(inner.height.saturating_sub(1));

    frame.render_widget(
        Paragraph::new(Text::from(lines)).block(block).scroll((scroll, 0)),
        area,
    );

    if focused {
        let cursor_col = (input.cursor % width) as u16;
        frame.set_cursor_position((inner.x + cursor_col, inner.y + cursor_row - scroll));
    }
}

fn render_tags(app: &mut App, frame: &mut Frame, area: Rect) {
    let focused = app.focus == FormField::Tags;
    let selected = app.session.selection().len();
    let title = format!(" Issue Categories ({} selected) ", selected);
    let block = field_block(&title, focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let column_width = inner.width / TAG_COLUMNS as u16;
    app.tag_areas.clear();

    for (idx, tag) in app.available_tags.iter().enumerate() {
        let row = (idx / TAG_COLUMNS) as u16;
        let col = (idx % TAG_COLUMNS) as u16;
        if row >= inner.height {
            break;
        }

        let chip_area = Rect::new(
            inner.x + col * column_width,
            inner.y + row,
            column_width,
            1,
        );

        let is_selected = app.session.selection().contains(tag);
        let is_cursor = focused && idx == app.tag_cursor;

        let mut style = if is_selected {
            Style::default().bg(Color::Green).fg(Color::Black)
        } else {
            Style::default()
        };
        if is_cursor {
            style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
        }

        let marker = if is_selected { "[x] " } else { "[ ] " };
        frame.render_widget(
            Paragraph::new(Span::styled(format!("{}{}", marker, tag.display_name()), style)),
            chip_area,
        );
        app.tag_areas.push((chip_area, idx));
    }
}

fn render_dashboard(app: &App, frame: &mut Frame, area: Rect) {
    let [stats_area, issues_area, recent_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Percentage(45),
        Constraint::Min(0),
    ])
    .areas(area);

    let [total_area, week_area, top_area] = Layout::horizontal([
        Constraint::Percentage(25),
        Constraint::Percentage(25),
        Constraint::Percentage(50),
    ])
    .areas(stats_area);

    let summary = &app.summary;
    render_stat(frame, total_area, " Total Cases ", summary.total.to_string());
    render_stat(frame, week_area, " This Week ", summary.this_week.to_string());
    render_stat(frame, top_area, " Top Issue ", summary.top_issue_label().to_string());

    render_issue_list(frame, issues_area, &summary.priorities);
    render_recent_cases(frame, recent_area, &summary.recent);
}

fn render_stat(frame: &mut Frame, area: Rect, title: &str, value: String) {
    let paragraph = Paragraph::new(Span::styled(
        value,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
    .centered()
    .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, area);
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Green,
    }
}

fn percentage_bar(percentage: f64) -> String {
    let filled = ((percentage / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn render_issue_list(frame: &mut Frame, area: Rect, priorities: &[IssuePriority]) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Issue Priority ");

    if priorities.is_empty() {
        let placeholder = Paragraph::new(NO_ISSUES_PLACEHOLDER)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let items: Vec<ListItem> = priorities
        .iter()
        .map(|issue| {
            let color = priority_color(issue.priority);
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(issue.tag.display_name().to_string(), Style::default().bold()),
                    Span::raw("  "),
                    Span::styled(issue.priority.badge(), Style::default().fg(color)),
                ]),
                Line::from(vec![
                    Span::styled(percentage_bar(issue.percentage), Style::default().fg(color)),
                    Span::raw(" "),
                    Span::styled(issue.cases_label(), Style::default().fg(Color::DarkGray)),
                ]),
            ])
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn render_recent_cases(frame: &mut Frame, area: Rect, recent: &[RecentCase]) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Recent Cases ");

    if recent.is_empty() {
        let placeholder = Paragraph::new(NO_RECENT_PLACEHOLDER)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for case in recent {
        let date = case.created_at.with_timezone(&Local).format("%Y-%m-%d").to_string();
        lines.push(Line::from(vec![
            Span::styled(case.customer_name.clone(), Style::default().bold()),
            Span::raw(" - "),
            Span::raw(case.interaction_type.display_name()),
        ]));
        lines.push(Line::styled(date, Style::default().fg(Color::DarkGray)));
        lines.push(Line::raw(case.preview.clone()));
        lines.push(Line::default());
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(paragraph, area);
}

fn render_notice(app: &App, frame: &mut Frame, area: Rect) {
    let Some(notice) = &app.notice else {
        return;
    };

    let (title, color) = match notice.kind {
        NoticeKind::Success => (" Logged ", Color::Green),
        NoticeKind::Error => (" Cannot Submit ", Color::Red),
    };

    // Calculate popup size and position (centered)
    let popup_width = 50.min(area.width.saturating_sub(4));
    let popup_height = 6.min(area.height.saturating_sub(2));

    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title);

    let text = Text::from(vec![
        Line::raw(notice.message.clone()),
        Line::default(),
        Line::styled("Press any key to continue", Style::default().fg(Color::DarkGray)),
    ]);

    frame.render_widget(
        Paragraph::new(text).wrap(Wrap { trim: true }).block(block),
        popup_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use insights_core::Config;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_empty_dashboard_shows_placeholders() {
        let mut app = App::new(&Config::default());
        let screen = rendered(&mut app);
        assert!(screen.contains("N/A"));
        assert!(screen.contains("No recent cases"));
        assert!(screen.contains("No data yet"));
        assert_eq!(app.tag_areas.len(), 10);
    }

    #[test]
    fn test_populated_dashboard() {
        let mut app = App::new(&Config::default());
        app.customer_name.insert('Z');
        app.toggle_tag(0);
        app.submit();
        app.dismiss_notice();

        let screen = rendered(&mut app);
        assert!(screen.contains("Billing Issues"));
        assert!(screen.contains("HIGH PRIORITY"));
        assert!(screen.contains("1 cases (100.0%)"));
        assert!(!screen.contains("No recent cases"));
    }

    #[test]
    fn test_error_notice_is_drawn() {
        let mut app = App::new(&Config::default());
        app.submit();
        let screen = rendered(&mut app);
        assert!(screen.contains("Cannot Submit"));
    }

    #[test]
    fn test_percentage_bar_fills_proportionally() {
        assert_eq!(percentage_bar(50.0).chars().filter(|c| *c == '█').count(), 10);
        assert_eq!(percentage_bar(100.0).chars().count(), BAR_WIDTH);
        assert!(!percentage_bar(0.0).contains('█'));
    }
}
