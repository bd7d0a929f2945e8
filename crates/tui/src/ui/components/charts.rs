use engine::Money;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    widgets::BarChart,
};

use crate::ui::{components::card::Card, theme::Theme};

/// Vertical bar chart of daily amounts inside a card.
///
/// Values are shown in thousands of tenge so the bar labels stay narrow.
pub fn render_daily_chart(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    days: &[(&str, Money)],
    theme: &Theme,
) {
    let data: Vec<(&str, u64)> = days
        .iter()
        .map(|(day, amount)| (*day, thousands(*amount)))
        .collect();

    let chart = BarChart::default()
        .data(data.as_slice())
        .bar_width(5)
        .bar_gap(2)
        .bar_style(Style::default().fg(theme.accent))
        .value_style(
            Style::default()
                .fg(theme.text)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .label_style(Style::default().fg(theme.dim));

    let inner = Card::new(title, theme).render_frame(frame, area);
    frame.render_widget(chart, inner);
}

fn thousands(amount: Money) -> u64 {
    u64::try_from(amount.amount().max(0)).unwrap_or(0) / 1_000
}

/// Creates a simple ASCII-based horizontal bar for inline use.
///
/// Returns a string like `████████░░░░░░░░░░░░` representing the ratio.
#[must_use]
pub fn ascii_bar(value: u64, max: u64, width: usize) -> String {
    if max == 0 {
        return "░".repeat(width);
    }

    let filled = ((value.min(max) as u128 * width as u128) / max as u128) as usize;
    let empty = width.saturating_sub(filled);

    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_bar_fills_by_ratio() {
        assert_eq!(ascii_bar(50, 100, 10), "█████░░░░░");
        assert_eq!(ascii_bar(100, 100, 4), "████");
        assert_eq!(ascii_bar(300, 100, 4), "████");
        assert_eq!(ascii_bar(0, 0, 3), "░░░");
    }

    #[test]
    fn chart_values_in_thousands() {
        assert_eq!(thousands(Money::new(12_500)), 12);
        assert_eq!(thousands(Money::new(-5_000)), 0);
    }
}
