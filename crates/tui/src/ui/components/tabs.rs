use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::theme::Theme;

/// Renders a horizontal tab bar; `active` is the index of the current tab.
pub fn render_tabs(frame: &mut Frame<'_>, area: Rect, labels: &[&str], active: usize, theme: &Theme) {
    frame.render_widget(Paragraph::new(tab_line(labels, active, theme)), area);
}

pub fn tab_line(labels: &[&str], active: usize, theme: &Theme) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];

    for (i, label) in labels.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }

        if i == active {
            spans.push(Span::styled("[", Style::default().fg(theme.accent)));
            spans.push(Span::styled(
                label.to_string(),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled("]", Style::default().fg(theme.accent)));
        } else {
            spans.push(Span::styled(
                label.to_string(),
                Style::default().fg(theme.text_muted),
            ));
        }
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_tab_is_bracketed() {
        let line = tab_line(&["Курсы", "Прямые эфиры", "Статьи"], 1, &Theme::default());
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, " Курсы  [Прямые эфиры]  Статьи");
    }
}
