use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::util::{format_amount, progress_bar};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();

    let items: Vec<ListItem> = app
        .budget_statuses
        .iter()
        .enumerate()
        .skip(app.budget_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, status)| {
            let ratio = (status.percent_used() / Decimal::ONE_HUNDRED)
                .to_f64()
                .unwrap_or(0.0);

            let color = if status.is_over() {
                p.red
            } else if ratio > 0.8 {
                p.yellow
            } else {
                p.green
            };

            let style = if i == app.budget_index {
                p.selected_style()
            } else if i % 2 == 0 {
                p.alt_row_style()
            } else {
                p.normal_style()
            };

            let flag = if status.is_over() {
                format!("  over by {}", format_amount(-status.remaining()))
            } else if app.dismissed.contains(&status.category) {
                "  (alert dismissed)".to_string()
            } else {
                format!("  {} left", format_amount(status.remaining()))
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<16}", status.category.as_str()), style),
                Span::styled(
                    format!(
                        "{:>10} / {:<10} ",
                        format_amount(status.spent),
                        format_amount(status.limit)
                    ),
                    Style::default().fg(color),
                ),
                Span::styled(progress_bar(ratio, 20), Style::default().fg(color)),
                Span::styled(
                    format!(" {:>4.0}%", ratio * 100.0),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(flag, p.dim_style()),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(p.overlay))
            .title(Span::styled(
                format!(" Budgets for {} ", app.window),
                p.title_style(),
            )),
    );
    f.render_widget(list, area);
}
