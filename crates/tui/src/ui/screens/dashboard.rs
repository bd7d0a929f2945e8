use engine::{Loan, LoanSummary};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

use crate::{
    app::AppState,
    ui::{
        components::{
            card::{Card, StatCard},
            money::{balance_amount, progress_bar, progress_gauge, styled_amount},
        },
        theme::{Theme, hex_color},
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Stat cards
            Constraint::Length(3), // Overall progress
            Constraint::Min(0),    // Loans
        ])
        .split(area);

    let summary = state.engine.loans().summary();
    render_summary(frame, layout[0], &summary, &theme);

    let inner = Card::new("Общий прогресс", &theme).render_frame(frame, layout[1]);
    frame.render_widget(progress_gauge(summary.progress, &theme), inner);

    render_loans(frame, layout[2], state, &theme);
}

fn render_summary(frame: &mut Frame<'_>, area: Rect, summary: &LoanSummary, theme: &Theme) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    StatCard::new("Первоначальная сумма", summary.total.to_string(), theme)
        .subtitle("Общая сумма кредитов")
        .render(frame, cards[0]);
    StatCard::new("Выплачено", summary.paid.to_string(), theme)
        .subtitle(format!("{}% от суммы", summary.rounded_progress()))
        .tone(theme.positive)
        .render(frame, cards[1]);
    StatCard::new("Осталось погасить", summary.remaining.to_string(), theme)
        .tone(theme.negative)
        .render(frame, cards[2]);
}

fn render_loans(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let loans = state.engine.loans().loans();
    let card = Card::new("Все кредиты", theme).focused(!state.is_typing());
    let inner = card.render_frame(frame, area);

    if loans.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(Span::styled(
                "У вас пока нет кредитов.",
                Style::default().fg(theme.text_muted),
            )),
            Line::from(vec![
                Span::raw("Нажмите "),
                Span::styled("a", Style::default().fg(theme.accent)),
                Span::raw(", чтобы добавить займ."),
            ]),
        ]);
        frame.render_widget(empty, inner);
        return;
    }

    let bar_width = usize::from(inner.width.saturating_sub(10)).clamp(10, 40);
    let items: Vec<ListItem<'_>> = loans
        .iter()
        .enumerate()
        .map(|(i, loan)| ListItem::new(loan_lines(loan, i == state.selected_loan, bar_width, theme)))
        .collect();

    let list = List::new(items).highlight_style(Style::default().bg(theme.surface));
    let mut list_state = ListState::default().with_selected(Some(state.selected_loan));
    frame.render_stateful_widget(list, inner, &mut list_state);
}

fn loan_lines(loan: &Loan, selected: bool, bar_width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let marker = if selected { "▌" } else { " " };
    let marker = Span::styled(marker, Style::default().fg(hex_color(&loan.color)));
    let muted = Style::default().fg(theme.text_muted);

    let mut lines = vec![
        Line::from(vec![
            marker.clone(),
            Span::styled(
                loan.display_title(),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}% · {} {}", loan.interest_rate, loan.term, loan.term_unit.label()),
                muted,
            ),
        ]),
        Line::from(vec![
            marker.clone(),
            Span::styled("Общая сумма: ", muted),
            styled_amount(loan.total_amount, theme, false),
            Span::styled("   Осталось: ", muted),
            balance_amount(loan.remaining_amount, false, theme),
            Span::styled("   Ежемесячный платёж: ", muted),
            styled_amount(loan.monthly_payment, theme, false),
        ]),
        Line::from(vec![marker.clone(), progress_bar(loan.progress, bar_width, theme)]),
    ];

    if selected {
        lines.push(Line::from(vec![
            marker,
            Span::styled("m", Style::default().fg(theme.accent)),
            Span::raw(" Оплатить месяц  "),
            Span::styled("x", Style::default().fg(theme.accent)),
            Span::raw(" Доп. платёж  "),
            Span::styled("e", Style::default().fg(theme.accent)),
            Span::raw(" Изменить  "),
            Span::styled("d", Style::default().fg(theme.accent)),
            Span::raw(" Удалить"),
        ]));
    }
    lines.push(Line::default());
    lines
}

#[cfg(test)]
mod tests {
    use engine::Engine;

    use super::*;

    fn plain(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn selected_loan_lists_actions() {
        let engine = Engine::builder().sample_data(true).build();
        let loan = engine.loans().get(2).unwrap();
        let lines = plain(&loan_lines(loan, true, 10, &Theme::default()));

        assert_eq!(lines[0], "▌Автокредит - Toyota Camry  18% · 5 годы");
        assert_eq!(
            lines[1],
            "▌Общая сумма: 5 000 000 ₸   Осталось: 3 200 000 ₸   Ежемесячный платёж: 85 000 ₸"
        );
        assert_eq!(lines[2], "▌███░░░░░░░  36%");
        assert!(lines[3].contains("Оплатить месяц"));
    }

    #[test]
    fn unselected_loan_has_no_actions() {
        let engine = Engine::builder().sample_data(true).build();
        let loan = engine.loans().get(1).unwrap();
        let lines = loan_lines(loan, false, 10, &Theme::default());
        assert_eq!(lines.len(), 4);
    }
}
