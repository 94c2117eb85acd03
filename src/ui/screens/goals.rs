use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::metrics::goal_progress;
use crate::ui::app::App;
use crate::ui::util::{format_amount, format_percent, progress_bar, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let totals = &app.summary.goals;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(p.overlay))
        .title(Span::styled(
            format!(
                " Goals ({}) | {} of {} saved ",
                totals.count,
                format_amount(totals.total_saved),
                format_amount(totals.total_target)
            ),
            p.title_style(),
        ));

    if app.goals.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No savings goals yet", p.dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Use :goal <target> <name> [--saved N] [--icon car] to add one",
                p.dim_style(),
            )),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let items: Vec<ListItem> = app
        .goals
        .iter()
        .enumerate()
        .skip(app.goal_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, goal)| {
            let progress = goal_progress(goal).ok();
            let ratio = progress
                .map(|pct| (pct / Decimal::ONE_HUNDRED).to_f64().unwrap_or(0.0))
                .unwrap_or(0.0);
            let color = if ratio >= 1.0 {
                p.green
            } else if ratio >= 0.5 {
                p.yellow
            } else {
                p.accent
            };

            let name_style = if i == app.goal_index {
                p.selected_style()
            } else {
                p.normal_style()
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", goal.icon.glyph()), p.normal_style()),
                Span::styled(format!("{:<22}", truncate(&goal.name, 21)), name_style),
                Span::styled(
                    format!(
                        "{:>12} / {:<12} ",
                        format_amount(goal.saved_amount),
                        format_amount(goal.target_amount)
                    ),
                    p.dim_style(),
                ),
                Span::styled(progress_bar(ratio, 20), Style::default().fg(color)),
                Span::styled(
                    progress
                        .map(|pct| format!(" {}", format_percent(pct)))
                        .unwrap_or_else(|| " invalid target".to_string()),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}
