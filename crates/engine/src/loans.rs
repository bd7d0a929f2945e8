//! The module contains the `Loan` record and the `LoanLedger` holding them.
//!
//! The ledger is the only place where loan balances change. Every payment
//! or edit re-normalizes the touched loan, keeping the two loan invariants:
//!
//! - `remaining_amount` stays inside `[0, total_amount]`;
//! - `progress` equals `round(100 × (total − remaining) / total)` clamped to
//!   `[0, 100]`, and is `0` for a zero-principal loan.

use serde::{Deserialize, Serialize};

use crate::{EngineError, Money, ResultEngine};

/// Identifier of a loan. Issued by [`LoanLedger::add`].
pub type LoanId = u32;

/// Colour given to every loan the user creates.
pub const DEFAULT_LOAN_COLOR: &str = "#3b82f6";

/// Amount proposed when the extra payment dialog opens.
pub const EXTRA_PAYMENT_DEFAULT: Money = Money::new(10_000);

/// Increment used by the extra payment stepper.
pub const EXTRA_PAYMENT_STEP: Money = Money::new(1_000);

/// Unit of the loan term.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermUnit {
    #[default]
    Months,
    Years,
}

impl TermUnit {
    /// Label shown next to the term.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Months => "месяцы",
            Self::Years => "годы",
        }
    }

    /// The other unit.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Months => Self::Years,
            Self::Years => Self::Months,
        }
    }
}

/// A tracked debt obligation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: LoanId,
    pub title: String,
    pub subtitle: String,
    pub total_amount: Money,
    pub remaining_amount: Money,
    pub monthly_payment: Money,
    /// Annual rate in percent. Informational, no formula uses it.
    pub interest_rate: f64,
    pub term: u32,
    pub term_unit: TermUnit,
    /// Percentage of the principal already repaid, derived.
    pub progress: u8,
    pub color: String,
}

impl Loan {
    /// `"title - subtitle"`, or just the title when there is no subtitle.
    #[must_use]
    pub fn display_title(&self) -> String {
        if self.subtitle.trim().is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", self.title, self.subtitle)
        }
    }

    /// Principal already repaid.
    #[must_use]
    pub fn paid_amount(&self) -> Money {
        self.total_amount.saturating_sub(self.remaining_amount)
    }

    /// What an extra payment of `amount` would do, without applying it.
    #[must_use]
    pub fn preview_extra_payment(&self, amount: Money) -> ExtraPaymentPreview {
        let new_remaining = self.remaining_amount.saturating_sub(amount).max(Money::ZERO);
        // Rough estimates: one month per 10 000 paid, a quarter of the
        // amount saved on interest.
        let months_saved = amount.amount().div_euclid(10_000).max(1);
        let interest_saved = Money::new(amount.amount().div_euclid(4));

        ExtraPaymentPreview {
            current_remaining: self.remaining_amount,
            amount,
            new_remaining,
            months_saved,
            interest_saved,
        }
    }

    fn apply_payment(&mut self, amount: Money) {
        self.remaining_amount = self.remaining_amount.saturating_sub(amount);
        self.normalize();
    }

    /// Re-establishes the balance and progress invariants.
    fn normalize(&mut self) {
        let upper = self.total_amount.max(Money::ZERO);
        self.remaining_amount = self.remaining_amount.clamp_to(Money::ZERO, upper);
        self.progress = progress_percent(self.total_amount, self.remaining_amount);
    }
}

/// Computes the repaid percentage of a loan.
///
/// Rounds half up and clamps to `[0, 100]`. A zero principal yields `0`.
///
/// ```rust
/// use engine::{Money, progress_percent};
///
/// assert_eq!(progress_percent(Money::new(15_000_000), Money::new(12_500_000)), 17);
/// assert_eq!(progress_percent(Money::ZERO, Money::ZERO), 0);
/// ```
#[must_use]
pub fn progress_percent(total: Money, remaining: Money) -> u8 {
    if total.is_zero() {
        return 0;
    }
    let paid = total.saturating_sub(remaining);
    let ratio = paid.amount() as f64 * 100.0 / total.amount() as f64;
    (ratio + 0.5).floor().clamp(0.0, 100.0) as u8
}

/// Fields the user provides when adding a loan.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewLoan {
    pub title: String,
    pub subtitle: String,
    pub total_amount: Money,
    pub monthly_payment: Money,
    pub interest_rate: f64,
    pub term: u32,
    pub term_unit: TermUnit,
}

/// Outcome of a prospective extra payment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtraPaymentPreview {
    pub current_remaining: Money,
    pub amount: Money,
    pub new_remaining: Money,
    pub months_saved: i64,
    pub interest_saved: Money,
}

/// Totals across every loan of the ledger.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoanSummary {
    pub total: Money,
    pub remaining: Money,
    pub paid: Money,
    /// Overall repaid percentage, unrounded. `0.0` when there is no principal.
    pub progress: f64,
}

impl LoanSummary {
    /// Progress rounded half up to a whole percent.
    #[must_use]
    pub fn rounded_progress(&self) -> u8 {
        (self.progress + 0.5).floor().clamp(0.0, 100.0) as u8
    }
}

/// Ordered, in-memory collection of loans.
#[derive(Debug, Default, Clone)]
pub struct LoanLedger {
    loans: Vec<Loan>,
    /// Highest id ever handed out, so deleted ids are not issued again.
    last_issued_id: LoanId,
}

impl LoanLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from existing records, normalizing each of them.
    pub fn with_loans(loans: Vec<Loan>) -> Self {
        let mut loans = loans;
        for loan in &mut loans {
            loan.normalize();
        }
        let last_issued_id = loans.iter().map(|l| l.id).max().unwrap_or(0);
        Self {
            loans,
            last_issued_id,
        }
    }

    pub fn loans(&self) -> &[Loan] {
        &self.loans
    }

    pub fn len(&self) -> usize {
        self.loans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loans.is_empty()
    }

    pub fn get(&self, id: LoanId) -> ResultEngine<&Loan> {
        self.loans
            .iter()
            .find(|loan| loan.id == id)
            .ok_or_else(|| EngineError::KeyNotFound(format!("loan {id}")))
    }

    fn get_mut(&mut self, id: LoanId) -> ResultEngine<&mut Loan> {
        self.loans
            .iter_mut()
            .find(|loan| loan.id == id)
            .ok_or_else(|| EngineError::KeyNotFound(format!("loan {id}")))
    }

    /// Adds a loan. The new loan starts with nothing repaid.
    ///
    /// Amounts are accepted as given, negative or zero included: the balance
    /// equals the principal and progress is `0` until the first payment.
    pub fn add(&mut self, new: NewLoan) -> &Loan {
        let max_existing = self.loans.iter().map(|l| l.id).max().unwrap_or(0);
        let id = max_existing.max(self.last_issued_id) + 1;
        self.last_issued_id = id;

        let loan = Loan {
            id,
            title: new.title,
            subtitle: new.subtitle,
            total_amount: new.total_amount,
            remaining_amount: new.total_amount,
            monthly_payment: new.monthly_payment,
            interest_rate: new.interest_rate,
            term: new.term,
            term_unit: new.term_unit,
            progress: 0,
            color: DEFAULT_LOAN_COLOR.to_string(),
        };
        tracing::debug!(loan_id = id, total = %loan.total_amount, "loan added");

        self.loans.push(loan);
        &self.loans[self.loans.len() - 1]
    }

    /// Reduces the remaining balance of a loan by `amount`.
    pub fn apply_payment(&mut self, id: LoanId, amount: Money) -> ResultEngine<&Loan> {
        let loan = self.get_mut(id)?;
        loan.apply_payment(amount);
        tracing::debug!(
            loan_id = id,
            amount = %amount,
            remaining = %loan.remaining_amount,
            progress = loan.progress,
            "payment applied"
        );
        Ok(&*loan)
    }

    /// Applies the scheduled monthly payment of a loan.
    pub fn pay_monthly(&mut self, id: LoanId) -> ResultEngine<&Loan> {
        let amount = self.get(id)?.monthly_payment;
        self.apply_payment(id, amount)
    }

    /// Applies an ad hoc payment of any amount.
    pub fn pay_extra(&mut self, id: LoanId, amount: Money) -> ResultEngine<&Loan> {
        self.apply_payment(id, amount)
    }

    /// Replaces the whole record carrying the same id.
    ///
    /// Derived fields are recomputed from the new amounts.
    pub fn replace(&mut self, loan: Loan) -> ResultEngine<&Loan> {
        let slot = self.get_mut(loan.id)?;
        *slot = loan;
        slot.normalize();
        tracing::debug!(loan_id = slot.id, "loan replaced");
        Ok(&*slot)
    }

    /// Removes a loan for good.
    pub fn delete(&mut self, id: LoanId) -> ResultEngine<Loan> {
        let index = self
            .loans
            .iter()
            .position(|loan| loan.id == id)
            .ok_or_else(|| EngineError::KeyNotFound(format!("loan {id}")))?;
        let loan = self.loans.remove(index);
        tracing::debug!(loan_id = id, "loan deleted");
        Ok(loan)
    }

    pub fn summary(&self) -> LoanSummary {
        let total: Money = self.loans.iter().map(|l| l.total_amount).sum();
        let remaining: Money = self.loans.iter().map(|l| l.remaining_amount).sum();
        let paid = total - remaining;
        let progress = if total.amount() > 0 {
            paid.amount() as f64 * 100.0 / total.amount() as f64
        } else {
            0.0
        };

        LoanSummary {
            total,
            remaining,
            paid,
            progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_loan(total: i64) -> NewLoan {
        NewLoan {
            title: String::from("Потребительский кредит"),
            subtitle: String::from("Ремонт"),
            total_amount: Money::new(total),
            monthly_payment: Money::new(45_000),
            interest_rate: 22.5,
            term: 24,
            term_unit: TermUnit::Months,
        }
    }

    fn loan(total: i64, remaining: i64) -> Loan {
        Loan {
            id: 3,
            title: String::from("Потребительский кредит"),
            subtitle: String::from("Ремонт"),
            total_amount: Money::new(total),
            remaining_amount: Money::new(remaining),
            monthly_payment: Money::new(45_000),
            interest_rate: 22.5,
            term: 24,
            term_unit: TermUnit::Months,
            progress: 0,
            color: DEFAULT_LOAN_COLOR.to_string(),
        }
    }

    #[test]
    fn add_starts_unpaid() {
        let mut ledger = LoanLedger::new();
        let loan = ledger.add(new_loan(1_000_000)).clone();

        assert_eq!(loan.id, 1);
        assert_eq!(loan.remaining_amount, Money::new(1_000_000));
        assert_eq!(loan.progress, 0);
        assert_eq!(loan.color, DEFAULT_LOAN_COLOR);
        assert_eq!(ledger.get(1).unwrap(), &loan);
    }

    #[test]
    fn negative_principal_is_stored_as_given() {
        let mut ledger = LoanLedger::new();
        let loan = ledger.add(new_loan(-500_000)).clone();

        assert_eq!(loan.total_amount, Money::new(-500_000));
        assert_eq!(loan.remaining_amount, Money::new(-500_000));
        assert_eq!(loan.progress, 0);
    }

    #[test]
    fn summary_saturates_on_huge_principal() {
        let mut ledger = LoanLedger::with_loans(vec![loan(1_000_000, 450_000)]);
        ledger.add(new_loan(i64::MAX));

        let summary = ledger.summary();

        assert_eq!(summary.total, Money::new(i64::MAX));
        assert_eq!(summary.remaining, Money::new(i64::MAX));
        assert_eq!(summary.paid, Money::ZERO);
        assert_eq!(summary.rounded_progress(), 0);
    }

    #[test]
    fn paying_the_whole_balance_closes_the_loan() {
        let mut ledger = LoanLedger::with_loans(vec![loan(1_000_000, 450_000)]);
        assert_eq!(ledger.get(3).unwrap().progress, 55);

        let loan = ledger.apply_payment(3, Money::new(450_000)).unwrap();

        assert_eq!(loan.remaining_amount, Money::ZERO);
        assert_eq!(loan.progress, 100);
    }

    #[test]
    fn overpayment_clamps_at_zero() {
        let mut ledger = LoanLedger::with_loans(vec![loan(1_000_000, 450_000)]);

        let loan = ledger.pay_extra(3, Money::new(5_000_000)).unwrap();

        assert_eq!(loan.remaining_amount, Money::ZERO);
        assert_eq!(loan.progress, 100);
    }

    #[test]
    fn negative_payment_cannot_exceed_principal() {
        let mut ledger = LoanLedger::with_loans(vec![loan(1_000_000, 950_000)]);

        let loan = ledger.apply_payment(3, Money::new(-200_000)).unwrap();

        assert_eq!(loan.remaining_amount, Money::new(1_000_000));
        assert_eq!(loan.progress, 0);
    }

    #[test]
    fn zero_principal_has_zero_progress() {
        let mut ledger = LoanLedger::new();
        let id = ledger.add(new_loan(0)).id;

        let loan = ledger.apply_payment(id, Money::new(10_000)).unwrap();

        assert_eq!(loan.remaining_amount, Money::ZERO);
        assert_eq!(loan.progress, 0);
    }

    #[test]
    fn monthly_payment_uses_scheduled_amount() {
        let mut ledger = LoanLedger::with_loans(vec![loan(1_000_000, 450_000)]);

        let loan = ledger.pay_monthly(3).unwrap();

        assert_eq!(loan.remaining_amount, Money::new(405_000));
        assert_eq!(loan.progress, 60);
    }

    #[test]
    fn progress_rounds_half_up() {
        assert_eq!(progress_percent(Money::new(200), Money::new(199)), 1);
        assert_eq!(progress_percent(Money::new(8), Money::new(7)), 13);
        assert_eq!(progress_percent(Money::new(1000), Money::new(995)), 1);
        assert_eq!(progress_percent(Money::new(1000), Money::new(996)), 0);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut ledger = LoanLedger::new();
        let first = ledger.add(new_loan(100)).id;
        let second = ledger.add(new_loan(200)).id;
        ledger.delete(second).unwrap();

        let third = ledger.add(new_loan(300)).id;

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(third, 3);
    }

    #[test]
    fn replace_recomputes_progress() {
        let mut ledger = LoanLedger::with_loans(vec![loan(1_000_000, 450_000)]);
        let mut edited = ledger.get(3).unwrap().clone();
        edited.total_amount = Money::new(900_000);

        let loan = ledger.replace(edited).unwrap();

        assert_eq!(loan.remaining_amount, Money::new(450_000));
        assert_eq!(loan.progress, 50);
    }

    #[test]
    fn replace_clamps_remaining_to_new_total() {
        let mut ledger = LoanLedger::with_loans(vec![loan(1_000_000, 450_000)]);
        let mut edited = ledger.get(3).unwrap().clone();
        edited.total_amount = Money::new(300_000);

        let loan = ledger.replace(edited).unwrap();

        assert_eq!(loan.remaining_amount, Money::new(300_000));
        assert_eq!(loan.progress, 0);
    }

    #[test]
    fn unknown_id_is_reported() {
        let mut ledger = LoanLedger::new();

        assert_eq!(
            ledger.apply_payment(42, Money::new(1)).unwrap_err(),
            EngineError::KeyNotFound("loan 42".to_string())
        );
        assert!(ledger.delete(42).is_err());
        assert!(ledger.replace(loan(10, 10)).is_err());
    }

    #[test]
    fn preview_matches_dialog_estimates() {
        let loan = loan(1_000_000, 450_000);

        let preview = loan.preview_extra_payment(Money::new(25_000));
        assert_eq!(preview.new_remaining, Money::new(425_000));
        assert_eq!(preview.months_saved, 2);
        assert_eq!(preview.interest_saved, Money::new(6_250));

        let small = loan.preview_extra_payment(Money::new(3_000));
        assert_eq!(small.months_saved, 1);

        let huge = loan.preview_extra_payment(Money::new(2_000_000));
        assert_eq!(huge.new_remaining, Money::ZERO);
    }

    #[test]
    fn display_title_joins_subtitle() {
        let mut loan = loan(1, 1);
        assert_eq!(loan.display_title(), "Потребительский кредит - Ремонт");
        loan.subtitle.clear();
        assert_eq!(loan.display_title(), "Потребительский кредит");
    }

    #[test]
    fn summary_over_empty_ledger_is_zero() {
        let summary = LoanLedger::new().summary();
        assert_eq!(summary.total, Money::ZERO);
        assert_eq!(summary.progress, 0.0);
        assert_eq!(summary.rounded_progress(), 0);
    }
}
