use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;

use crate::ui::app::App;
use crate::ui::theme::Palette;
use crate::ui::util::{format_amount, format_percent, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Summary cards
            Constraint::Length(8), // Alerts + projection
            Constraint::Min(8),    // Category chart
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app, p);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);
    render_alerts(f, middle[0], app, p);
    render_projection(f, middle[1], app, p);

    render_spending_chart(f, chunks[2], app, p);
}

fn titled_block<'a>(title: String, p: &Palette) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(p.overlay))
        .title(Span::styled(format!(" {title} "), p.title_style()))
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App, p: &Palette) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let summary = &app.summary;
    render_card(
        f,
        cards[0],
        p,
        "This Month",
        format_amount(summary.month_spending),
        p.red,
        format!("{} txns", summary.month_count),
    );
    render_card(
        f,
        cards[1],
        p,
        "Avg Transaction",
        format_amount(summary.average_transaction),
        p.accent,
        format!("{} txns total", app.transactions.len()),
    );
    render_card(
        f,
        cards[2],
        p,
        "Saved",
        format_amount(summary.goals.total_saved),
        p.green,
        format!("of {}", format_amount(summary.goals.total_target)),
    );
    render_card(
        f,
        cards[3],
        p,
        "Goal Progress",
        format_percent(summary.goals.overall_progress),
        p.yellow,
        format!("{} active goals", summary.goals.count),
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    p: &Palette,
    title: &str,
    value: String,
    color: Color,
    subtitle: String,
) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, p.dim_style())),
    ])
    .centered()
    .block(titled_block(title.to_string(), p));
    f.render_widget(text, area);
}

fn render_alerts(f: &mut Frame, area: Rect, app: &App, p: &Palette) {
    let alerts = app.visible_alerts();
    let block = titled_block(format!("Budget Alerts ({})", alerts.len()), p);

    if alerts.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("All categories within budget", p.dim_style())),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let items: Vec<ListItem> = alerts
        .iter()
        .enumerate()
        .map(|(i, alert)| {
            let style = if i == app.alert_index {
                p.selected_style()
            } else {
                Style::default().fg(p.red)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<15}", alert.category.as_str()), style),
                Span::styled(
                    format!(
                        " {} / {}",
                        format_amount(alert.current_spending),
                        format_amount(alert.budget_limit)
                    ),
                    p.normal_style(),
                ),
                Span::styled(
                    format!("  +{}", format_amount(alert.over_by)),
                    Style::default().fg(p.red).add_modifier(Modifier::BOLD),
                ),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

fn render_projection(f: &mut Frame, area: Rect, app: &App, p: &Palette) {
    let mut lines: Vec<Line> = app
        .projection
        .iter()
        .map(|month| {
            Line::from(vec![
                Span::styled(format!(" {} {}  ", month.label, month.year), p.dim_style()),
                Span::styled(
                    format_amount(month.amount),
                    Style::default().fg(p.yellow).add_modifier(Modifier::BOLD),
                ),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " +5% per month over the 3-month average",
        p.dim_style(),
    )));

    let block = titled_block("Projected Spending".to_string(), p);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_spending_chart(f: &mut Frame, area: Rect, app: &App, p: &Palette) {
    let block = titled_block("Spending by Category".to_string(), p);

    if app.category_totals.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No transactions yet. Add one with :add-txn or :import a CSV",
            p.dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = app
        .category_totals
        .ranked()
        .into_iter()
        .map(|(category, amount)| {
            Bar::default()
                .value(amount.round().to_u64().unwrap_or(0))
                .label(Line::from(truncate(category.as_str(), 12)))
                .text_value(format_amount(amount))
                .style(Style::default().fg(p.accent))
                .value_style(Style::default().fg(p.header_bg).bg(p.accent))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(12)
        .bar_gap(1)
        .bar_style(Style::default().fg(p.accent))
        .value_style(Style::default().fg(p.text));

    f.render_widget(chart, area);
}
