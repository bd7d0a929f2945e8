use engine::Money;
use ratatui::{
    style::{Modifier, Style},
    text::Span,
    widgets::Gauge,
};

use crate::ui::{components::charts::ascii_bar, theme::Theme};

/// Amount span, bold when it is a headline figure.
#[must_use]
pub fn styled_amount(amount: Money, theme: &Theme, bold: bool) -> Span<'static> {
    let mut style = Style::default().fg(theme.text);
    if bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    Span::styled(amount.to_string(), style)
}

/// Amount colored by meaning: paid money is positive, debt left is negative.
#[must_use]
pub fn balance_amount(amount: Money, paid: bool, theme: &Theme) -> Span<'static> {
    let color = if amount.is_zero() {
        theme.text_muted
    } else if paid {
        theme.positive
    } else {
        theme.negative
    };
    Span::styled(amount.to_string(), Style::default().fg(color))
}

/// Color for a repayment percentage: amber while early, green near the end.
pub fn progress_color(progress: u8, theme: &Theme) -> ratatui::style::Color {
    match progress {
        0..=29 => theme.warning,
        30..=79 => theme.accent,
        _ => theme.positive,
    }
}

/// `████░░░░ 40%` for loan cards.
#[must_use]
pub fn progress_bar(progress: u8, width: usize, theme: &Theme) -> Span<'static> {
    let progress = progress.min(100);
    Span::styled(
        format!("{} {progress:>3}%", ascii_bar(progress.into(), 100, width)),
        Style::default().fg(progress_color(progress, theme)),
    )
}

/// Full-width gauge for the overall repayment progress.
#[must_use]
pub fn progress_gauge(progress: f64, theme: &Theme) -> Gauge<'static> {
    let ratio = (progress / 100.0).clamp(0.0, 1.0);
    Gauge::default()
        .gauge_style(Style::default().fg(theme.positive).bg(theme.surface))
        .ratio(ratio)
        .label(format!("{progress:.1}%"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_bar_text() {
        let theme = Theme::default();
        let span = progress_bar(40, 10, &theme);
        assert_eq!(span.content, "████░░░░░░  40%");
        assert_eq!(span.style.fg, Some(theme.accent));
    }

    #[test]
    fn progress_colors_by_stage() {
        let theme = Theme::default();
        assert_eq!(progress_color(17, &theme), theme.warning);
        assert_eq!(progress_color(55, &theme), theme.accent);
        assert_eq!(progress_color(100, &theme), theme.positive);
    }

    #[test]
    fn amounts_use_tenge_format() {
        let theme = Theme::default();
        assert_eq!(
            styled_amount(Money::new(4_850_000), &theme, true).content,
            "4 850 000 ₸"
        );
        assert_eq!(
            balance_amount(Money::ZERO, false, &theme).style.fg,
            Some(theme.text_muted)
        );
    }
}
