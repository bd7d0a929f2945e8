use engine::{EXTRA_PAYMENT_STEP, Engine, Loan, LoanId, Money};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::{
    app::{
        Modal,
        forms::{ExpenseField, ExpenseForm, LoanField, LoanForm, TextField},
    },
    ui::{components::centered_rect, theme::Theme},
};

const POST_PLACEHOLDER: &str = "Что вы думаете о финансовой грамотности?";

pub fn render(frame: &mut Frame<'_>, area: Rect, modal: &Modal, engine: &Engine) {
    let theme = Theme::default();
    let (title, lines) = dialog(modal, engine, &theme);

    let height = (lines.len() as u16).saturating_add(4);
    let rect = centered_rect(60, height, area);
    frame.render_widget(Clear, rect);

    let block = Block::default()
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.surface));

    let content = Paragraph::new(lines)
        .block(block.padding(ratatui::widgets::Padding::horizontal(1)))
        .wrap(Wrap { trim: false });
    frame.render_widget(content, rect);
}

/// Title and body of the dialog.
fn dialog(modal: &Modal, engine: &Engine, theme: &Theme) -> (&'static str, Vec<Line<'static>>) {
    match modal {
        Modal::AddLoan(form) => ("Добавить займ", loan_form_lines(form, theme)),
        Modal::EditLoan { form, .. } => ("Изменить займ", loan_form_lines(form, theme)),
        Modal::MonthlyPayment { id } => (
            "Подтверждение платежа",
            with_loan(engine, *id, theme, |loan| {
                let new_remaining = loan
                    .remaining_amount
                    .saturating_sub(loan.monthly_payment)
                    .max(Money::ZERO);
                let mut lines = vec![
                    row("Кредит", loan.display_title(), theme),
                    row("Сумма платежа", loan.monthly_payment.to_string(), theme),
                    row("Текущий остаток", loan.remaining_amount.to_string(), theme),
                    row("Новый остаток", new_remaining.to_string(), theme),
                    Line::default(),
                ];
                lines.push(hints(&[("Enter", "Оплатить"), ("Esc", "Отмена")], theme));
                lines
            }),
        ),
        Modal::ExtraPayment { id, amount } => (
            "Дополнительный платёж",
            with_loan(engine, *id, theme, |loan| {
                let preview = loan.preview_extra_payment(*amount);
                vec![
                    row("Кредит", loan.display_title(), theme),
                    Line::from(vec![
                        label("Сумма платежа", theme),
                        Span::styled(
                            format!("◂ {} ▸", preview.amount),
                            Style::default()
                                .fg(theme.accent)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(
                            format!("  ±{EXTRA_PAYMENT_STEP}"),
                            Style::default().fg(theme.dim),
                        ),
                    ]),
                    row("Текущий остаток", preview.current_remaining.to_string(), theme),
                    row("Новый остаток", preview.new_remaining.to_string(), theme),
                    row(
                        "Ускорение выплаты",
                        format!("~{} мес.", preview.months_saved),
                        theme,
                    ),
                    row("Экономия на процентах", preview.interest_saved.to_string(), theme),
                    Line::default(),
                    hints(
                        &[("↑/↓", "сумма"), ("Enter", "Внести платёж"), ("Esc", "Отмена")],
                        theme,
                    ),
                ]
            }),
        ),
        Modal::DeleteLoan { id } => (
            "Удалить кредит",
            with_loan(engine, *id, theme, |loan| {
                vec![
                    Line::from(format!(
                        "Вы уверены, что хотите удалить «{}»?",
                        loan.display_title()
                    )),
                    Line::from(Span::styled(
                        "Это действие нельзя отменить.",
                        Style::default().fg(theme.negative),
                    )),
                    Line::default(),
                    hints(&[("Enter", "Удалить"), ("Esc", "Отмена")], theme),
                ]
            }),
        ),
        Modal::AddExpense(form) => ("Добавить расход", expense_form_lines(form, theme)),
        Modal::CreatePost { content, error } => {
            let mut lines = vec![input_line(content, POST_PLACEHOLDER, true, theme)];
            push_error(&mut lines, error.as_deref(), theme);
            lines.push(Line::default());
            lines.push(hints(&[("Enter", "Опубликовать"), ("Esc", "Отмена")], theme));
            ("Создать пост", lines)
        }
    }
}

fn with_loan(
    engine: &Engine,
    id: LoanId,
    theme: &Theme,
    lines: impl FnOnce(&Loan) -> Vec<Line<'static>>,
) -> Vec<Line<'static>> {
    match engine.loans().get(id) {
        Ok(loan) => lines(loan),
        Err(_) => vec![Line::from(Span::styled(
            "Кредит не найден.",
            Style::default().fg(theme.error),
        ))],
    }
}

fn loan_form_lines(form: &LoanForm, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for field in LoanField::ALL {
        let focused = form.focus == field;
        lines.push(field_label(field.label(), focused, theme));
        lines.push(match field {
            LoanField::Title => input_line(&form.title, "", focused, theme),
            LoanField::Total => input_line(&form.total, "0", focused, theme),
            LoanField::Rate => input_line(&form.rate, "0", focused, theme),
            LoanField::Monthly => input_line(&form.monthly, "0", focused, theme),
            LoanField::Term => input_line(&form.term, "12", focused, theme),
            LoanField::Unit => choice_line(form.unit.label(), focused, theme),
        });
    }
    push_error(&mut lines, form.error.as_deref(), theme);
    lines.push(Line::default());
    lines.push(hints(
        &[("Tab", "далее"), ("Enter", "Сохранить"), ("Esc", "Отмена")],
        theme,
    ));
    lines
}

fn expense_form_lines(form: &ExpenseForm, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for field in [
        ExpenseField::Amount,
        ExpenseField::Category,
        ExpenseField::Description,
    ] {
        let focused = form.focus == field;
        lines.push(field_label(field.label(), focused, theme));
        lines.push(match field {
            ExpenseField::Amount => input_line(&form.amount, "0", focused, theme),
            ExpenseField::Category => choice_line(form.category_label(), focused, theme),
            ExpenseField::Description => {
                input_line(&form.description, "На что потрачено?", focused, theme)
            }
        });
    }
    push_error(&mut lines, form.error.as_deref(), theme);
    lines.push(Line::default());
    lines.push(hints(
        &[("Tab", "далее"), ("Enter", "Добавить"), ("Esc", "Отмена")],
        theme,
    ));
    lines
}

fn field_label(text: &'static str, focused: bool, theme: &Theme) -> Line<'static> {
    let color = if focused { theme.accent } else { theme.text_muted };
    Line::from(Span::styled(text, Style::default().fg(color)))
}

fn input_line(
    field: &TextField,
    placeholder: &'static str,
    focused: bool,
    theme: &Theme,
) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    if field.value.is_empty() {
        spans.push(Span::styled(placeholder, Style::default().fg(theme.dim)));
    } else {
        spans.push(Span::styled(
            field.value.clone(),
            Style::default().fg(theme.text),
        ));
    }
    if focused {
        spans.push(Span::styled("▏", Style::default().fg(theme.accent)));
    }
    Line::from(spans)
}

fn choice_line(value: &'static str, focused: bool, theme: &Theme) -> Line<'static> {
    let style = if focused {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };
    Line::from(vec![Span::raw("  "), Span::styled(format!("‹ {value} ›"), style)])
}

fn row(name: &'static str, value: String, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        label(name, theme),
        Span::styled(value, Style::default().fg(theme.text)),
    ])
}

fn label(name: &'static str, theme: &Theme) -> Span<'static> {
    Span::styled(format!("{name}: "), Style::default().fg(theme.text_muted))
}

fn push_error(lines: &mut Vec<Line<'static>>, error: Option<&str>, theme: &Theme) {
    if let Some(error) = error {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(theme.error),
        )));
    }
}

fn hints(keys: &[(&'static str, &'static str)], theme: &Theme) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, (key, action)) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {action}")));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use engine::EXTRA_PAYMENT_DEFAULT;

    use super::*;

    fn text(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn monthly_payment_shows_new_balance() {
        let engine = Engine::builder().sample_data(true).build();
        let (title, lines) = dialog(&Modal::MonthlyPayment { id: 3 }, &engine, &Theme::default());
        let body = text(&lines);

        assert_eq!(title, "Подтверждение платежа");
        assert!(body.contains("Кредит: Потребительский кредит - Ремонт"));
        assert!(body.contains("Сумма платежа: 45 000 ₸"));
        assert!(body.contains("Новый остаток: 405 000 ₸"));
    }

    #[test]
    fn extra_payment_shows_preview() {
        let engine = Engine::builder().sample_data(true).build();
        let modal = Modal::ExtraPayment {
            id: 2,
            amount: EXTRA_PAYMENT_DEFAULT,
        };
        let body = text(&dialog(&modal, &engine, &Theme::default()).1);

        assert!(body.contains("◂ 10 000 ₸ ▸"));
        assert!(body.contains("Новый остаток: 3 190 000 ₸"));
        assert!(body.contains("Ускорение выплаты: ~1 мес."));
    }

    #[test]
    fn missing_loan_is_reported() {
        let engine = Engine::builder().build();
        let body = text(&dialog(&Modal::DeleteLoan { id: 9 }, &engine, &Theme::default()).1);
        assert_eq!(body, "Кредит не найден.");
    }

    #[test]
    fn empty_post_shows_placeholder() {
        let engine = Engine::builder().build();
        let modal = Modal::CreatePost {
            content: TextField::default(),
            error: None,
        };
        let (title, lines) = dialog(&modal, &engine, &Theme::default());
        assert_eq!(title, "Создать пост");
        assert!(text(&lines).starts_with(&format!("  {POST_PLACEHOLDER}▏")));
    }
}
