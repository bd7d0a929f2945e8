//! In-memory domain of the finance tracker: loans, expenses and the
//! learning/community content.
//!
//! All state lives for a single session. [`Engine`] groups the ledgers so
//! the frontend can own one value and hand out borrows per screen.
pub use community::{
    CURRENT_AUTHOR, CURRENT_AUTHOR_INITIALS, CommunityFeed, DEFAULT_AVATAR_COLOR, Post,
};
pub use error::EngineError;
pub use expenses::{
    CategoryTotal, Expense, ExpenseCategory, ExpenseLedger, ExpensePeriod, NewExpense,
    WEEKLY_SPENDING,
};
pub use learning::{Article, Course, LearningCatalog, LearningTab, Stream};
pub use loans::{
    DEFAULT_LOAN_COLOR, EXTRA_PAYMENT_DEFAULT, EXTRA_PAYMENT_STEP, ExtraPaymentPreview, Loan,
    LoanId, LoanLedger, LoanSummary, NewLoan, TermUnit, progress_percent,
};
pub use money::{Money, TENGE_SIGN};

mod community;
mod error;
mod expenses;
mod learning;
mod loans;
mod money;
pub mod sample;

pub type ResultEngine<T> = Result<T, EngineError>;

#[derive(Debug, Default)]
pub struct Engine {
    loans: LoanLedger,
    expenses: ExpenseLedger,
    feed: CommunityFeed,
    catalog: LearningCatalog,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn loans(&self) -> &LoanLedger {
        &self.loans
    }

    pub fn loans_mut(&mut self) -> &mut LoanLedger {
        &mut self.loans
    }

    pub fn expenses(&self) -> &ExpenseLedger {
        &self.expenses
    }

    pub fn expenses_mut(&mut self) -> &mut ExpenseLedger {
        &mut self.expenses
    }

    pub fn feed(&self) -> &CommunityFeed {
        &self.feed
    }

    pub fn feed_mut(&mut self) -> &mut CommunityFeed {
        &mut self.feed
    }

    pub fn catalog(&self) -> &LearningCatalog {
        &self.catalog
    }
}

/// The builder for `Engine`
#[derive(Debug, Default)]
pub struct EngineBuilder {
    sample_data: bool,
}

impl EngineBuilder {
    /// Seed the ledgers with the demo records.
    pub fn sample_data(mut self, enabled: bool) -> EngineBuilder {
        self.sample_data = enabled;
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> Engine {
        if !self.sample_data {
            return Engine {
                catalog: sample::catalog(),
                ..Engine::default()
            };
        }

        let engine = Engine {
            loans: LoanLedger::with_loans(sample::loans()),
            expenses: ExpenseLedger::with_entries(sample::expenses()),
            feed: CommunityFeed::with_posts(sample::posts()),
            catalog: sample::catalog(),
        };
        tracing::debug!(
            loans = engine.loans.len(),
            expenses = engine.expenses.len(),
            "engine seeded with sample data"
        );
        engine
    }
}
