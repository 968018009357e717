use std::borrow::Cow;

use super::form::{FormTab, FormViewState};
use super::state::AppState;
use crate::engine::decision::{GO_MIN_ROI_PCT, NO_GO_MAX_ROI_PCT};
use crate::engine::{Breakeven, Decision, YearResult};
use crate::fields::FieldKind;
use crate::format::{format_count, format_currency, format_percent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Tabs},
    Frame,
};

pub fn draw(f: &mut Frame, state: &AppState, tabs: &[FormTab], view: &FormViewState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // decision banner
            Constraint::Length(8), // results table
            Constraint::Min(8),    // form + log
            Constraint::Length(1), // help line
        ])
        .split(f.area());

    draw_decision(f, state, chunks[0]);
    draw_results(f, state, chunks[1]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(chunks[2]);
    draw_form(f, tabs, view, body[0]);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(body[1]);
    draw_legend(f, side[0]);
    draw_logs(f, state, side[1]);

    draw_footer(f, state, view, chunks[3]);
}

/// Banner color for a decision.
pub fn decision_color(decision: Decision) -> Color {
    match decision {
        Decision::Go => Color::Green,
        Decision::NoGo => Color::Red,
        Decision::Review => Color::Yellow,
    }
}

fn decision_icon(decision: Decision) -> &'static str {
    match decision {
        Decision::Go => "\u{2714}",
        Decision::NoGo => "\u{2716}",
        Decision::Review => "\u{26a0}",
    }
}

fn breakeven_text(breakeven: Breakeven) -> String {
    match breakeven.year() {
        Some(year) => format!("Year {}", year),
        None => breakeven.label().to_string(),
    }
}

fn profit_color(value: f64) -> Color {
    if value >= 0.0 {
        Color::Green
    } else {
        Color::Red
    }
}

fn draw_decision(f: &mut Frame, state: &AppState, area: Rect) {
    let r = &state.results;
    let color = decision_color(r.decision);

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} {}", decision_icon(r.decision), r.decision.label()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ({})", r.confidence.label()),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(vec![
            Span::raw(" 3-Year Cumulative Profit: "),
            Span::styled(
                format_currency(r.three_year_cumulative_profit),
                Style::default()
                    .fg(profit_color(r.three_year_cumulative_profit))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                " | ROI: {} | Breakeven: {}",
                format_percent(r.roi_pct),
                breakeven_text(r.breakeven)
            )),
        ]),
    ];

    let banner = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(" Market Entry Calculator "),
    );
    f.render_widget(banner, area);
}

fn draw_results(f: &mut Frame, state: &AppState, area: Rect) {
    let years = state.results.years();

    let header = Row::new(vec![
        Cell::from("Metric"),
        Cell::from("Year 1"),
        Cell::from("Year 2"),
        Cell::from("Year 3"),
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let mut cumulative = vec![Cell::from("Cumulative Profit")
        .style(Style::default().add_modifier(Modifier::BOLD))];
    cumulative.extend(years.iter().map(|y| {
        Cell::from(format_currency(y.cumulative_profit)).style(
            Style::default()
                .fg(profit_color(y.cumulative_profit))
                .add_modifier(Modifier::BOLD),
        )
    }));

    let rows = vec![
        year_row("Customers", years, |y| format_count(y.customers)),
        year_row("Revenue", years, |y| format_currency(y.revenue)),
        year_row("Total Costs", years, |y| format_currency(y.costs)),
        year_row("Contribution Margin", years, |y| format_currency(y.margin)),
        Row::new(cumulative),
    ];

    let table = Table::new(
        rows,
        [
            Constraint::Length(22),
            Constraint::Min(14),
            Constraint::Min(14),
            Constraint::Min(14),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(" Projection "));
    f.render_widget(table, area);
}

fn year_row<'a>(
    label: &'a str,
    years: [&YearResult; 3],
    metric: impl Fn(&YearResult) -> String,
) -> Row<'a> {
    let mut cells = vec![Cell::from(label)];
    cells.extend(years.into_iter().map(|y| Cell::from(metric(y))));
    Row::new(cells)
}

fn draw_form(f: &mut Frame, tabs: &[FormTab], view: &FormViewState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let tab_titles: Vec<Line> = tabs
        .iter()
        .enumerate()
        .map(|(i, t)| {
            if i == view.active_tab {
                Line::from(Span::styled(
                    t.label.as_str(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::raw(t.label.as_str()))
            }
        })
        .collect();
    let tab_bar = Tabs::new(tab_titles)
        .block(Block::default().borders(Borders::ALL).title(" Inputs "))
        .highlight_style(Style::default().fg(Color::Yellow))
        .select(view.active_tab);
    f.render_widget(tab_bar, chunks[0]);

    let Some(active) = tabs.get(view.active_tab) else {
        return;
    };
    let rows: Vec<Row> = active
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let value_str = if view.editing && i == view.selected_field {
                format!("{}\u{258f}", view.edit_buffer) // show cursor
            } else if let FieldKind::Choice(_) = &field.kind {
                format!("\u{25c0} {} \u{25b6}", field.value)
            } else {
                field.value.clone()
            };
            let label_style = if field.read_only() {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let value_style = if field.read_only() {
                Style::default().add_modifier(Modifier::BOLD)
            } else if i == view.selected_field {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(field.label.clone()).style(label_style),
                Cell::from(value_str).style(value_style),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [Constraint::Percentage(60), Constraint::Percentage(40)],
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", active.label)),
    )
    .row_highlight_style(Style::default().bg(Color::DarkGray));
    let mut table_state = TableState::default();
    table_state.select(Some(view.selected_field));
    f.render_stateful_widget(table, chunks[1], &mut table_state);
}

fn draw_legend(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(vec![
            Span::styled(" GO", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(format!(": breakeven \u{2264} Year 2 and ROI > {GO_MIN_ROI_PCT}%")),
        ]),
        Line::from(vec![
            Span::styled(" NO GO", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(format!(": no breakeven in 3 years and ROI < {NO_GO_MAX_ROI_PCT}%")),
        ]),
        Line::from(vec![
            Span::styled(" REVIEW", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(": all other scenarios"),
        ]),
    ];
    let legend = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Decision Logic "));
    f.render_widget(legend, area);
}

fn draw_logs(f: &mut Frame, state: &AppState, area: Rect) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let visible = area.height.saturating_sub(2) as usize;

    let lines: Vec<Line> = state
        .logs
        .iter()
        .rev()
        .take(visible)
        .rev()
        .map(|entry| {
            let color = match entry.level.as_str() {
                "WARN" => Color::Yellow,
                "ERROR" | "NO GO" => Color::Red,
                "GO" => Color::Green,
                "EXPORT" => Color::Cyan,
                _ => Color::White,
            };
            let prefix = format!(" {} {:<6} ", entry.time, entry.level);
            let room = inner_width.saturating_sub(prefix.chars().count());
            Line::from(vec![
                Span::styled(prefix, Style::default().fg(color)),
                Span::raw(truncate_with_ellipsis(&entry.message, room).into_owned()),
            ])
        })
        .collect();

    let logs = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Activity "));
    f.render_widget(logs, area);
}

fn draw_footer(f: &mut Frame, state: &AppState, view: &FormViewState, area: Rect) {
    let help = if view.editing {
        " Enter: confirm | Esc: cancel | Type to edit ".to_string()
    } else {
        let export = match &state.last_export {
            Some(path) => format!(" | last export: {}", path.display()),
            None => String::new(),
        };
        format!(
            " \u{2190}\u{2192}: sections | \u{2191}\u{2193}: fields | Enter: edit | Space: next option | x: export CSV | r: reset | q: quit{}",
            export
        )
    };
    let help_line = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    f.render_widget(help_line, area);
}

/// Truncate to at most `max_width` characters, ending in `...` when cut.
fn truncate_with_ellipsis(s: &str, max_width: usize) -> Cow<'_, str> {
    if s.chars().count() <= max_width {
        return Cow::Borrowed(s);
    }
    if max_width <= 3 {
        return Cow::Owned(".".repeat(max_width));
    }
    let kept: String = s.chars().take(max_width - 3).collect();
    Cow::Owned(format!("{}...", kept))
}
