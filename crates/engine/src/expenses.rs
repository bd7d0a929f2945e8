//! The module contains the expense log and its per-category breakdown.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Money;

/// Spending per weekday shown by the "expense dynamics" chart.
///
/// This is fixed sample data, it is not derived from the expense log.
pub const WEEKLY_SPENDING: [(&str, Money); 7] = [
    ("Пн", Money::new(8_000)),
    ("Вт", Money::new(12_000)),
    ("Ср", Money::new(5_000)),
    ("Чт", Money::new(15_000)),
    ("Пт", Money::new(9_500)),
    ("Сб", Money::new(18_000)),
    ("Вс", Money::new(6_000)),
];

/// The fixed set of expense categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Food,
    Transport,
    Education,
    Entertainment,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 4] = [
        Self::Food,
        Self::Transport,
        Self::Education,
        Self::Entertainment,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Food => "Еда",
            Self::Transport => "Транспорт",
            Self::Education => "Образование",
            Self::Entertainment => "Развлечения",
        }
    }

    /// Hex colour used for the legend and history icons.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Food => "#3b82f6",
            Self::Transport => "#a855f7",
            Self::Education => "#10b981",
            Self::Entertainment => "#f43f5e",
        }
    }

    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Food => "🛍",
            Self::Transport => "🚗",
            Self::Education => "🎓",
            Self::Entertainment => "☕",
        }
    }

    /// Next category in [`ExpenseCategory::ALL`], wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// Previous category in [`ExpenseCategory::ALL`], wrapping around.
    #[must_use]
    pub fn prev(self) -> Self {
        let index = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// A logged expense. Never changed after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub title: String,
    pub category: ExpenseCategory,
    pub date: NaiveDate,
    pub amount: Money,
}

impl Expense {
    pub fn new(
        title: impl Into<String>,
        category: ExpenseCategory,
        date: NaiveDate,
        amount: Money,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            category,
            date,
            amount,
        }
    }
}

/// Fields the user provides when logging an expense.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewExpense {
    pub amount: Money,
    pub category: ExpenseCategory,
    /// Optional free text; the category label is used when blank.
    pub description: String,
    pub date: NaiveDate,
}

/// Sum of the expenses of one category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub total: Money,
    /// Share of all expenses, rounded to a whole percent.
    pub share: u8,
}

/// Day/week/month selector of the dynamics chart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExpensePeriod {
    #[default]
    Day,
    Week,
    Month,
}

impl ExpensePeriod {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Day => "День",
            Self::Week => "Неделя",
            Self::Month => "Месяц",
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Day => Self::Week,
            Self::Week => Self::Month,
            Self::Month => Self::Day,
        }
    }
}

/// Expense history, newest first.
#[derive(Debug, Default, Clone)]
pub struct ExpenseLedger {
    entries: Vec<Expense>,
}

impl ExpenseLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from entries already ordered newest first.
    pub fn with_entries(entries: Vec<Expense>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Expense] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Logs an expense at the top of the history.
    pub fn add(&mut self, new: NewExpense) -> &Expense {
        let description = new.description.trim();
        let title = if description.is_empty() {
            new.category.label()
        } else {
            description
        };
        let expense = Expense::new(title, new.category, new.date, new.amount);
        tracing::debug!(
            expense_id = %expense.id,
            category = new.category.label(),
            amount = %new.amount,
            "expense added"
        );

        self.entries.insert(0, expense);
        &self.entries[0]
    }

    pub fn total(&self) -> Money {
        self.entries.iter().map(|e| e.amount).sum()
    }

    /// Per-category sums, in order of first appearance in the history.
    pub fn category_totals(&self) -> Vec<CategoryTotal> {
        let mut totals: Vec<(ExpenseCategory, Money)> = Vec::new();
        for entry in &self.entries {
            match totals.iter_mut().find(|(c, _)| *c == entry.category) {
                Some((_, sum)) => *sum += entry.amount,
                None => totals.push((entry.category, entry.amount)),
            }
        }

        let grand_total: Money = totals.iter().map(|(_, sum)| *sum).sum();
        totals
            .into_iter()
            .map(|(category, total)| CategoryTotal {
                category,
                total,
                share: share_percent(total, grand_total),
            })
            .collect()
    }
}

fn share_percent(value: Money, total: Money) -> u8 {
    if total.is_zero() {
        return 0;
    }
    let ratio = value.amount() as f64 * 100.0 / total.amount() as f64;
    (ratio + 0.5).floor().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, d).unwrap()
    }

    fn new_expense(amount: i64, category: ExpenseCategory, description: &str) -> NewExpense {
        NewExpense {
            amount: Money::new(amount),
            category,
            description: description.to_string(),
            date: day(8),
        }
    }

    #[test]
    fn add_prepends() {
        let mut ledger = ExpenseLedger::new();
        ledger.add(new_expense(15_000, ExpenseCategory::Food, "Продукты"));
        ledger.add(new_expense(8_000, ExpenseCategory::Transport, "Бензин"));

        let titles: Vec<_> = ledger.entries().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Бензин", "Продукты"]);
    }

    #[test]
    fn blank_description_falls_back_to_category() {
        let mut ledger = ExpenseLedger::new();
        let entry = ledger.add(new_expense(5_000, ExpenseCategory::Entertainment, "   "));

        assert_eq!(entry.title, "Развлечения");
        assert_eq!(entry.date, day(8));
    }

    #[test]
    fn totals_group_by_first_appearance() {
        let mut ledger = ExpenseLedger::new();
        ledger.add(new_expense(5_000, ExpenseCategory::Entertainment, "Кофе"));
        ledger.add(new_expense(12_000, ExpenseCategory::Food, "Ресторан"));
        ledger.add(new_expense(25_000, ExpenseCategory::Education, "Курс"));
        ledger.add(new_expense(15_000, ExpenseCategory::Food, "Продукты"));

        let totals = ledger.category_totals();

        let order: Vec<_> = totals.iter().map(|t| t.category).collect();
        assert_eq!(
            order,
            vec![
                ExpenseCategory::Food,
                ExpenseCategory::Education,
                ExpenseCategory::Entertainment
            ]
        );
        assert_eq!(totals[0].total, Money::new(27_000));
        assert_eq!(ledger.total(), Money::new(57_000));
        // 27/57 = 47.4%, 25/57 = 43.9%, 5/57 = 8.8%
        assert_eq!(
            totals.iter().map(|t| t.share).collect::<Vec<_>>(),
            vec![47, 44, 9]
        );
    }

    #[test]
    fn empty_ledger_has_no_totals() {
        let ledger = ExpenseLedger::new();
        assert!(ledger.category_totals().is_empty());
        assert_eq!(ledger.total(), Money::ZERO);
    }

    #[test]
    fn category_cycles() {
        assert_eq!(ExpenseCategory::Entertainment.next(), ExpenseCategory::Food);
        assert_eq!(ExpenseCategory::Food.prev(), ExpenseCategory::Entertainment);
    }

    #[test]
    fn weekly_chart_is_static() {
        let total: Money = WEEKLY_SPENDING.iter().map(|(_, v)| *v).sum();
        assert_eq!(total, Money::new(73_500));
    }
}
