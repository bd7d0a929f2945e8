use engine::{CategoryTotal, Expense, ExpensePeriod, Money, WEEKLY_SPENDING};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::AppState,
    ui::{
        components::{
            card::{Card, StatCard},
            charts::{ascii_bar, render_daily_chart},
            tabs::tab_line,
        },
        theme::{Theme, hex_color},
    },
};

const PERIODS: [ExpensePeriod; 3] = [ExpensePeriod::Day, ExpensePeriod::Week, ExpensePeriod::Month];

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let ledger = state.engine.expenses();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),  // Heading
            Constraint::Length(4),  // Total
            Constraint::Length(12), // Categories + chart
            Constraint::Min(0),     // History
        ])
        .split(area);

    let heading = Paragraph::new(vec![
        Line::from(Span::styled(
            "Расходы",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Отслеживайте свои траты и анализируйте привычки",
            Style::default().fg(theme.text_muted),
        )),
    ]);
    frame.render_widget(heading, rows[0]);

    StatCard::new("Общие расходы", ledger.total().to_string(), &theme)
        .subtitle(format!("{} операций", ledger.len()))
        .render(frame, rows[1]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(rows[2]);

    let inner = Card::new("Расходы по категориям", &theme).render_frame(frame, middle[0]);
    let bar_width = usize::from(inner.width.saturating_sub(30)).clamp(5, 20);
    frame.render_widget(
        Paragraph::new(category_lines(&ledger.category_totals(), bar_width, &theme)),
        inner,
    );

    render_dynamics(frame, middle[1], state.expense_period, &theme);

    let inner = Card::new("История расходов", &theme).render_frame(frame, rows[3]);
    frame.render_widget(Paragraph::new(history_lines(ledger.entries(), &theme)), inner);
}

fn render_dynamics(frame: &mut Frame<'_>, area: Rect, period: ExpensePeriod, theme: &Theme) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let labels = PERIODS.map(ExpensePeriod::label);
    let active = PERIODS.iter().position(|p| *p == period).unwrap_or(0);
    frame.render_widget(Paragraph::new(tab_line(&labels, active, theme)), parts[0]);

    let title = format!("Динамика расходов · {}", weekly_total());
    render_daily_chart(frame, parts[1], &title, &WEEKLY_SPENDING, theme);
}

fn category_lines(totals: &[CategoryTotal], bar_width: usize, theme: &Theme) -> Vec<Line<'static>> {
    if totals.is_empty() {
        return vec![Line::from(Span::styled(
            "Пока нет расходов",
            Style::default().fg(theme.text_muted),
        ))];
    }

    totals
        .iter()
        .map(|entry| {
            let color = hex_color(entry.category.color());
            Line::from(vec![
                Span::raw(format!("{} ", entry.category.icon())),
                Span::styled(
                    format!("{:<12}", entry.category.label()),
                    Style::default().fg(theme.text),
                ),
                Span::styled(
                    ascii_bar(entry.share.into(), 100, bar_width),
                    Style::default().fg(color),
                ),
                Span::styled(
                    format!(" {:>3}% ", entry.share),
                    Style::default().fg(theme.text_muted),
                ),
                Span::raw(entry.total.to_string()),
            ])
        })
        .collect()
}

fn history_lines(entries: &[Expense], theme: &Theme) -> Vec<Line<'static>> {
    if entries.is_empty() {
        return vec![Line::from(Span::styled(
            "Нажмите a, чтобы добавить расход",
            Style::default().fg(theme.text_muted),
        ))];
    }

    entries
        .iter()
        .map(|expense| {
            Line::from(vec![
                Span::styled(
                    expense.date.format("%d.%m.%Y  ").to_string(),
                    Style::default().fg(theme.dim),
                ),
                Span::raw(format!("{} ", expense.category.icon())),
                Span::styled(expense.title.clone(), Style::default().fg(theme.text)),
                Span::styled(
                    format!("  {}  ", expense.category.label()),
                    Style::default().fg(hex_color(expense.category.color())),
                ),
                Span::styled(
                    (-expense.amount).to_string(),
                    Style::default().fg(theme.negative),
                ),
            ])
        })
        .collect()
}

fn weekly_total() -> Money {
    WEEKLY_SPENDING.iter().map(|(_, amount)| *amount).sum()
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
    fn categories_show_share_and_total() {
        let engine = Engine::builder().sample_data(true).build();
        let totals = engine.expenses().category_totals();
        let lines = plain(&category_lines(&totals, 10, &Theme::default()));

        let food = lines.iter().find(|l| l.contains("Еда")).unwrap();
        assert!(food.ends_with("27 000 ₸"));
        assert!(food.contains("42%"));
    }

    #[test]
    fn history_shows_negative_amounts() {
        let engine = Engine::builder().sample_data(true).build();
        let lines = plain(&history_lines(engine.expenses().entries(), &Theme::default()));
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("07.11.2025"));
        assert!(lines.iter().all(|l| l.contains("-")));
    }

    #[test]
    fn weekly_chart_total() {
        assert_eq!(weekly_total(), Money::new(73_500));
    }

    #[test]
    fn empty_ledger_prompts_to_add() {
        let lines = plain(&history_lines(&[], &Theme::default()));
        assert_eq!(lines, vec!["Нажмите a, чтобы добавить расход".to_string()]);
    }
}
