//! Input forms of the modal dialogs and their parsing.

use chrono::NaiveDate;
use engine::{ExpenseCategory, Loan, Money, NewExpense, NewLoan, TermUnit};

/// A single-line text input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    pub value: String,
}

impl TextField {
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn push(&mut self, ch: char) {
        self.value.push(ch);
    }

    pub fn pop(&mut self) {
        self.value.pop();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanField {
    Title,
    Total,
    Rate,
    Monthly,
    Term,
    Unit,
}

impl LoanField {
    pub const ALL: [LoanField; 6] = [
        Self::Title,
        Self::Total,
        Self::Rate,
        Self::Monthly,
        Self::Term,
        Self::Unit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Название займа",
            Self::Total => "Сумма займа",
            Self::Rate => "Годовая ставка (%)",
            Self::Monthly => "Рекомендуемая ежемесячная оплата",
            Self::Term => "Срок выплаты",
            Self::Unit => "Единица срока",
        }
    }
}

/// Parsed and validated loan form.
#[derive(Debug, Clone, PartialEq)]
pub struct LoanInput {
    pub title: String,
    pub total_amount: Money,
    pub interest_rate: f64,
    pub monthly_payment: Money,
    pub term: u32,
    pub term_unit: TermUnit,
}

impl LoanInput {
    pub fn into_new_loan(self) -> NewLoan {
        NewLoan {
            title: self.title,
            subtitle: String::new(),
            total_amount: self.total_amount,
            monthly_payment: self.monthly_payment,
            interest_rate: self.interest_rate,
            term: self.term,
            term_unit: self.term_unit,
        }
    }

    /// Writes the edited fields over `loan`. The remaining balance is kept
    /// and the subtitle, merged into the title by the form, is cleared.
    pub fn apply_to(self, loan: &Loan) -> Loan {
        Loan {
            title: self.title,
            subtitle: String::new(),
            total_amount: self.total_amount,
            monthly_payment: self.monthly_payment,
            interest_rate: self.interest_rate,
            term: self.term,
            term_unit: self.term_unit,
            ..loan.clone()
        }
    }
}

/// Add/edit loan form.
#[derive(Debug, Clone)]
pub struct LoanForm {
    pub title: TextField,
    pub total: TextField,
    pub rate: TextField,
    pub monthly: TextField,
    pub term: TextField,
    pub unit: TermUnit,
    pub focus: LoanField,
    pub error: Option<String>,
}

impl Default for LoanForm {
    fn default() -> Self {
        Self {
            title: TextField::default(),
            total: TextField::default(),
            rate: TextField::default(),
            monthly: TextField::default(),
            term: TextField::default(),
            unit: TermUnit::Months,
            focus: LoanField::Title,
            error: None,
        }
    }
}

impl LoanForm {
    /// Edit form prefilled from an existing loan.
    pub fn from_loan(loan: &Loan) -> Self {
        Self {
            title: TextField::with_value(loan.display_title()),
            total: TextField::with_value(loan.total_amount.amount().to_string()),
            rate: TextField::with_value(loan.interest_rate.to_string()),
            monthly: TextField::with_value(loan.monthly_payment.amount().to_string()),
            term: TextField::with_value(loan.term.to_string()),
            unit: loan.term_unit,
            ..Self::default()
        }
    }

    pub fn next_field(&mut self) {
        let index = LoanField::ALL
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0);
        self.focus = LoanField::ALL[(index + 1) % LoanField::ALL.len()];
    }

    pub fn prev_field(&mut self) {
        let index = LoanField::ALL
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0);
        self.focus = LoanField::ALL[(index + LoanField::ALL.len() - 1) % LoanField::ALL.len()];
    }

    fn focused_text(&mut self) -> Option<&mut TextField> {
        match self.focus {
            LoanField::Title => Some(&mut self.title),
            LoanField::Total => Some(&mut self.total),
            LoanField::Rate => Some(&mut self.rate),
            LoanField::Monthly => Some(&mut self.monthly),
            LoanField::Term => Some(&mut self.term),
            LoanField::Unit => None,
        }
    }

    pub fn input(&mut self, ch: char) {
        match self.focused_text() {
            Some(field) => field.push(ch),
            None if ch == ' ' => self.unit = self.unit.toggled(),
            None => {}
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.focused_text() {
            field.pop();
        }
    }

    /// Left/right on the unit field switches months/years.
    pub fn toggle_unit(&mut self) {
        if self.focus == LoanField::Unit {
            self.unit = self.unit.toggled();
        }
    }

    pub fn parse(&self) -> Result<LoanInput, String> {
        let title = self.title.value.trim();
        if title.is_empty() {
            return Err("Введите название займа.".to_string());
        }

        let total_amount = parse_amount(&self.total.value, "Некорректная сумма займа.")?;
        let interest_rate = parse_rate(&self.rate.value)?;
        let monthly_payment =
            parse_amount(&self.monthly.value, "Некорректная ежемесячная оплата.")?;
        let term = self
            .term
            .value
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|t| *t > 0)
            .ok_or_else(|| "Некорректный срок выплаты.".to_string())?;

        Ok(LoanInput {
            title: title.to_string(),
            total_amount,
            interest_rate,
            monthly_payment,
            term,
            term_unit: self.unit,
        })
    }
}

/// Non-negative whole tenge.
fn parse_amount(raw: &str, message: &str) -> Result<Money, String> {
    raw.parse::<Money>()
        .ok()
        .filter(|m| !m.is_negative())
        .ok_or_else(|| message.to_string())
}

/// Accepts both `12.5` and `12,5`.
fn parse_rate(raw: &str) -> Result<f64, String> {
    let normalized = raw.trim().replace(',', ".");
    normalized
        .parse::<f64>()
        .ok()
        .filter(|r| r.is_finite() && *r >= 0.0)
        .ok_or_else(|| "Некорректная годовая ставка.".to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseField {
    Amount,
    Category,
    Description,
}

impl ExpenseField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Amount => "Сумма (₸)",
            Self::Category => "Категория",
            Self::Description => "Описание (опционально)",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExpenseForm {
    pub amount: TextField,
    /// `None` until the user picks one ("Выберите").
    pub category: Option<ExpenseCategory>,
    pub description: TextField,
    pub focus: ExpenseField,
    pub error: Option<String>,
}

impl Default for ExpenseForm {
    fn default() -> Self {
        Self {
            amount: TextField::default(),
            category: None,
            description: TextField::default(),
            focus: ExpenseField::Amount,
            error: None,
        }
    }
}

impl ExpenseForm {
    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            ExpenseField::Amount => ExpenseField::Category,
            ExpenseField::Category => ExpenseField::Description,
            ExpenseField::Description => ExpenseField::Amount,
        };
    }

    pub fn prev_field(&mut self) {
        self.focus = match self.focus {
            ExpenseField::Amount => ExpenseField::Description,
            ExpenseField::Category => ExpenseField::Amount,
            ExpenseField::Description => ExpenseField::Category,
        };
    }

    pub fn input(&mut self, ch: char) {
        match self.focus {
            ExpenseField::Amount => self.amount.push(ch),
            ExpenseField::Description => self.description.push(ch),
            ExpenseField::Category if ch == ' ' => self.next_category(),
            ExpenseField::Category => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            ExpenseField::Amount => self.amount.pop(),
            ExpenseField::Description => self.description.pop(),
            ExpenseField::Category => self.category = None,
        }
    }

    pub fn next_category(&mut self) {
        self.category = Some(match self.category {
            Some(category) => category.next(),
            None => ExpenseCategory::ALL[0],
        });
    }

    pub fn prev_category(&mut self) {
        self.category = Some(match self.category {
            Some(category) => category.prev(),
            None => ExpenseCategory::ALL[ExpenseCategory::ALL.len() - 1],
        });
    }

    pub fn category_label(&self) -> &'static str {
        self.category.map_or("Выберите", ExpenseCategory::label)
    }

    pub fn parse(&self, today: NaiveDate) -> Result<NewExpense, String> {
        if self.amount.value.trim().is_empty() {
            return Err("Введите сумму.".to_string());
        }
        let amount = parse_amount(&self.amount.value, "Некорректная сумма.")?;
        let category = self
            .category
            .ok_or_else(|| "Выберите категорию.".to_string())?;

        Ok(NewExpense {
            amount,
            category,
            description: self.description.value.clone(),
            date: today,
        })
    }
}
