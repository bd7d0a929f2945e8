pub mod forms;

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use assistant::{ChatRelay, ChatSession, GenerativeClient, RelayError, SUGGESTIONS, Submission};
use chrono::Local;
use crossterm::event::{self, Event, KeyEvent};
use engine::{
    EXTRA_PAYMENT_DEFAULT, EXTRA_PAYMENT_STEP, Engine, EngineError, ExpensePeriod, LearningTab,
    Loan, LoanId, Money,
};
use tokio::sync::mpsc;

use crate::{
    app::forms::{ExpenseField, ExpenseForm, LoanForm, TextField},
    config::AppConfig,
    error::{AppError, Result},
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

const TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Dashboard,
    Expenses,
    Learning,
}

impl Section {
    pub const ALL: [Section; 3] = [Self::Dashboard, Self::Expenses, Self::Learning];

    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Главная",
            Self::Expenses => "Расходы",
            Self::Learning => "Обучение",
        }
    }

    pub fn shortcut(self) -> char {
        match self {
            Self::Dashboard => '1',
            Self::Expenses => '2',
            Self::Learning => '3',
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Dashboard => Self::Expenses,
            Self::Expenses => Self::Learning,
            Self::Learning => Self::Dashboard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    expires_at: Instant,
}

/// The dialog currently on top of the screen, if any.
#[derive(Debug, Clone)]
pub enum Modal {
    AddLoan(LoanForm),
    EditLoan {
        id: LoanId,
        form: LoanForm,
    },
    MonthlyPayment {
        id: LoanId,
    },
    ExtraPayment {
        id: LoanId,
        amount: Money,
    },
    DeleteLoan {
        id: LoanId,
    },
    AddExpense(ExpenseForm),
    CreatePost {
        content: TextField,
        error: Option<String>,
    },
}

#[derive(Debug)]
pub struct ChatState {
    pub open: bool,
    pub fullscreen: bool,
    pub input: TextField,
    pub session: ChatSession,
    next_suggestion: usize,
}

impl ChatState {
    pub fn new(has_credential: bool) -> Self {
        Self {
            open: false,
            fullscreen: false,
            input: TextField::default(),
            session: ChatSession::new(has_credential),
            next_suggestion: 0,
        }
    }
}

/// Follow-up the event loop has to run after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    Ask(String),
}

#[derive(Debug)]
pub struct AppState {
    pub engine: Engine,
    pub section: Section,
    pub selected_loan: usize,
    pub expense_period: ExpensePeriod,
    pub learning_tab: LearningTab,
    pub feed_offset: usize,
    pub modal: Option<Modal>,
    pub chat: ChatState,
    pub toast: Option<ToastState>,
}

pub struct App {
    pub state: AppState,
    relay: Option<Arc<ChatRelay<GenerativeClient>>>,
    replies_tx: mpsc::UnboundedSender<Reply>,
    replies_rx: mpsc::UnboundedReceiver<Reply>,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let engine = Engine::builder().sample_data(config.sample_data).build();
        let relay = assistant::connect(&config.assistant)?.map(Arc::new);
        let state = AppState::new(engine, relay.is_some());
        let (replies_tx, replies_rx) = mpsc::unbounded_channel();

        Ok(Self {
            state,
            relay,
            replies_tx,
            replies_rx,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(100);

        while !self.should_quit {
            while let Ok(outcome) = self.replies_rx.try_recv() {
                self.state.receive_reply(outcome);
            }
            self.state.expire_toast(Instant::now());

            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    _ => {}
                }
            }
            tokio::task::yield_now().await;
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match self.state.handle_action(map_key(key)) {
            Effect::None => {}
            Effect::Quit => self.should_quit = true,
            Effect::Ask(question) => self.ask(question),
        }
    }

    /// Runs the relay off the event loop; the answer comes back through the
    /// reply channel.
    fn ask(&self, question: String) {
        let tx = self.replies_tx.clone();
        let Some(relay) = self.relay.clone() else {
            deliver(
                &tx,
                Err(RelayError {
                    failures: Vec::new(),
                }),
            );
            return;
        };

        tracing::debug!(chars = question.chars().count(), "chat question sent");
        tokio::spawn(async move {
            let outcome = relay.ask(&question).await;
            deliver(&tx, outcome);
        });
    }
}

type Reply = std::result::Result<String, RelayError>;

/// Hands a chat outcome to the event loop. Returns `false` once the loop is gone.
fn deliver(tx: &mpsc::UnboundedSender<Reply>, outcome: Reply) -> bool {
    if tx.send(outcome).is_err() {
        tracing::debug!("chat reply dropped, the app is closing");
        return false;
    }
    true
}

impl AppState {
    pub fn new(engine: Engine, has_credential: bool) -> Self {
        Self {
            engine,
            section: Section::Dashboard,
            selected_loan: 0,
            expense_period: ExpensePeriod::default(),
            learning_tab: LearningTab::default(),
            feed_offset: 0,
            modal: None,
            chat: ChatState::new(has_credential),
            toast: None,
        }
    }

    pub fn selected_loan(&self) -> Option<&Loan> {
        self.engine.loans().loans().get(self.selected_loan)
    }

    /// Whether the keyboard currently feeds a text field.
    pub fn is_typing(&self) -> bool {
        self.modal.is_some() || self.chat.open
    }

    pub fn handle_action(&mut self, action: AppAction) -> Effect {
        if action == AppAction::Quit {
            return Effect::Quit;
        }

        if let Some(modal) = self.modal.take() {
            self.handle_modal(modal, action);
            return Effect::None;
        }
        if self.chat.open {
            return self.handle_chat(action);
        }
        self.handle_screen(action)
    }

    pub fn receive_reply(&mut self, outcome: std::result::Result<String, RelayError>) {
        if let Err(err) = &outcome {
            tracing::warn!(kind = ?err.kind(), "chat request failed");
        }
        self.chat.session.complete(outcome);
    }

    pub fn expire_toast(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| t.expires_at <= now) {
            self.toast = None;
        }
    }

    fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(ToastState {
            message: message.into(),
            level,
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    fn report(&mut self, err: EngineError) {
        tracing::warn!("operation rejected: {err}");
        self.show_toast(ToastLevel::Error, message_for_error(&err));
    }

    fn handle_screen(&mut self, action: AppAction) -> Effect {
        match action {
            AppAction::Input('q') => return Effect::Quit,
            AppAction::Input('c') => self.chat.open = true,
            AppAction::NextField => self.section = self.section.next(),
            AppAction::Input(ch) => {
                if let Some(section) = Section::ALL.into_iter().find(|s| s.shortcut() == ch) {
                    self.section = section;
                    return Effect::None;
                }
                match self.section {
                    Section::Dashboard => self.dashboard_key(ch),
                    Section::Expenses => self.expenses_key(ch),
                    Section::Learning => self.learning_key(ch),
                }
            }
            AppAction::Up | AppAction::Down | AppAction::Left | AppAction::Right => {
                self.navigate(action)
            }
            _ => {}
        }
        Effect::None
    }

    fn navigate(&mut self, action: AppAction) {
        match (self.section, action) {
            (Section::Dashboard, AppAction::Up) => {
                self.selected_loan = self.selected_loan.saturating_sub(1);
            }
            (Section::Dashboard, AppAction::Down) => {
                let last = self.engine.loans().len().saturating_sub(1);
                self.selected_loan = (self.selected_loan + 1).min(last);
            }
            (Section::Learning, AppAction::Left) => self.learning_tab = self.learning_tab.prev(),
            (Section::Learning, AppAction::Right) => self.learning_tab = self.learning_tab.next(),
            (Section::Learning, AppAction::Up) => {
                self.feed_offset = self.feed_offset.saturating_sub(1);
            }
            (Section::Learning, AppAction::Down) => {
                let last = self.engine.feed().posts().len().saturating_sub(1);
                self.feed_offset = (self.feed_offset + 1).min(last);
            }
            _ => {}
        }
    }

    fn dashboard_key(&mut self, ch: char) {
        if ch == 'a' {
            self.modal = Some(Modal::AddLoan(LoanForm::default()));
            return;
        }

        let Some(loan) = self.selected_loan() else {
            return;
        };
        let id = loan.id;
        let modal = match ch {
            'e' => Some(Modal::EditLoan {
                id,
                form: LoanForm::from_loan(loan),
            }),
            'm' => Some(Modal::MonthlyPayment { id }),
            'x' => Some(Modal::ExtraPayment {
                id,
                amount: EXTRA_PAYMENT_DEFAULT,
            }),
            'd' => Some(Modal::DeleteLoan { id }),
            _ => return,
        };
        self.modal = modal;
    }

    fn expenses_key(&mut self, ch: char) {
        match ch {
            'a' => self.modal = Some(Modal::AddExpense(ExpenseForm::default())),
            'p' => self.expense_period = self.expense_period.next(),
            _ => {}
        }
    }

    fn learning_key(&mut self, ch: char) {
        if ch == 'n' {
            self.modal = Some(Modal::CreatePost {
                content: TextField::default(),
                error: None,
            });
        }
    }

    fn handle_chat(&mut self, action: AppAction) -> Effect {
        let chat = &mut self.chat;
        match action {
            AppAction::Cancel => chat.open = false,
            AppAction::ToggleFullscreen => chat.fullscreen = !chat.fullscreen,
            AppAction::NextField => {
                let suggestion = SUGGESTIONS[chat.next_suggestion % SUGGESTIONS.len()];
                chat.input = TextField::with_value(suggestion);
                chat.next_suggestion += 1;
            }
            AppAction::Submit => {
                if let Submission::Send(question) = chat.session.submit(&chat.input.value) {
                    chat.input = TextField::default();
                    chat.next_suggestion = 0;
                    return Effect::Ask(question);
                }
            }
            AppAction::Backspace => chat.input.pop(),
            AppAction::Input(ch) => chat.input.push(ch),
            _ => {}
        }
        Effect::None
    }

    fn handle_modal(&mut self, mut modal: Modal, action: AppAction) {
        let keep_open = match action {
            AppAction::Cancel => false,
            AppAction::Submit => !self.submit_modal(&mut modal),
            _ => {
                edit_modal(&mut modal, action);
                true
            }
        };
        if keep_open {
            self.modal = Some(modal);
        }
    }

    /// Applies a dialog. Returns `false` when it has to stay open.
    fn submit_modal(&mut self, modal: &mut Modal) -> bool {
        match modal {
            Modal::AddLoan(form) => match form.parse() {
                Ok(input) => {
                    let loan = self.engine.loans_mut().add(input.into_new_loan());
                    let message = format!("Кредит «{}» добавлен", loan.title);
                    self.selected_loan = self.engine.loans().len().saturating_sub(1);
                    self.show_toast(ToastLevel::Success, message);
                    true
                }
                Err(message) => {
                    form.error = Some(message);
                    false
                }
            },
            Modal::EditLoan { id, form } => {
                let input = match form.parse() {
                    Ok(input) => input,
                    Err(message) => {
                        form.error = Some(message);
                        return false;
                    }
                };
                let result = self
                    .engine
                    .loans()
                    .get(*id)
                    .map(|loan| input.apply_to(loan))
                    .and_then(|edited| self.engine.loans_mut().replace(edited).map(|_| ()));
                match result {
                    Ok(()) => self.show_toast(ToastLevel::Success, "Изменения сохранены"),
                    Err(err) => self.report(err),
                }
                true
            }
            Modal::MonthlyPayment { id } => {
                let result = self
                    .engine
                    .loans_mut()
                    .pay_monthly(*id)
                    .map(|loan| loan.remaining_amount);
                self.payment_done(result);
                true
            }
            Modal::ExtraPayment { id, amount } => {
                let result = self
                    .engine
                    .loans_mut()
                    .pay_extra(*id, *amount)
                    .map(|loan| loan.remaining_amount);
                self.payment_done(result);
                true
            }
            Modal::DeleteLoan { id } => {
                match self.engine.loans_mut().delete(*id) {
                    Ok(loan) => {
                        let last = self.engine.loans().len().saturating_sub(1);
                        self.selected_loan = self.selected_loan.min(last);
                        self.show_toast(ToastLevel::Info, format!("Кредит «{}» удалён", loan.title));
                    }
                    Err(err) => self.report(err),
                }
                true
            }
            Modal::AddExpense(form) => match form.parse(Local::now().date_naive()) {
                Ok(expense) => {
                    self.engine.expenses_mut().add(expense);
                    self.show_toast(ToastLevel::Success, "Расход добавлен");
                    true
                }
                Err(message) => {
                    form.error = Some(message);
                    false
                }
            },
            Modal::CreatePost { content, error } => {
                match self.engine.feed_mut().create_post(&content.value) {
                    Ok(_) => {
                        self.feed_offset = 0;
                        self.show_toast(ToastLevel::Success, "Пост опубликован");
                        true
                    }
                    Err(EngineError::InvalidInput(_)) => {
                        *error = Some("Напишите текст поста.".to_string());
                        false
                    }
                    Err(err) => {
                        self.report(err);
                        true
                    }
                }
            }
        }
    }

    fn payment_done(&mut self, result: engine::ResultEngine<Money>) {
        match result {
            Ok(remaining) if remaining.is_zero() => {
                self.show_toast(ToastLevel::Success, "Кредит полностью погашен!");
            }
            Ok(remaining) => {
                self.show_toast(
                    ToastLevel::Success,
                    format!("Платёж внесён. Осталось: {remaining}"),
                );
            }
            Err(err) => self.report(err),
        }
    }
}

fn edit_modal(modal: &mut Modal, action: AppAction) {
    match modal {
        Modal::AddLoan(form) | Modal::EditLoan { form, .. } => match action {
            AppAction::NextField | AppAction::Down => form.next_field(),
            AppAction::PrevField | AppAction::Up => form.prev_field(),
            AppAction::Left | AppAction::Right => form.toggle_unit(),
            AppAction::Backspace => form.backspace(),
            AppAction::Input(ch) => form.input(ch),
            _ => {}
        },
        Modal::ExtraPayment { amount, .. } => {
            *amount = match action {
                AppAction::Up | AppAction::Right | AppAction::Input('+') => {
                    amount.saturating_add(EXTRA_PAYMENT_STEP)
                }
                AppAction::Down | AppAction::Left | AppAction::Input('-') => amount
                    .saturating_sub(EXTRA_PAYMENT_STEP)
                    .max(Money::ZERO),
                AppAction::Input(ch) => match ch.to_digit(10) {
                    Some(digit) => Money::new(
                        amount
                            .amount()
                            .saturating_mul(10)
                            .saturating_add(i64::from(digit)),
                    ),
                    None => *amount,
                },
                AppAction::Backspace => Money::new(amount.amount() / 10),
                _ => *amount,
            };
        }
        Modal::AddExpense(form) => match action {
            AppAction::NextField | AppAction::Down => form.next_field(),
            AppAction::PrevField | AppAction::Up => form.prev_field(),
            AppAction::Left if form.focus == ExpenseField::Category => form.prev_category(),
            AppAction::Right if form.focus == ExpenseField::Category => form.next_category(),
            AppAction::Backspace => form.backspace(),
            AppAction::Input(ch) => form.input(ch),
            _ => {}
        },
        Modal::CreatePost { content, .. } => match action {
            AppAction::Backspace => content.pop(),
            AppAction::Input(ch) => content.push(ch),
            _ => {}
        },
        Modal::MonthlyPayment { .. } | Modal::DeleteLoan { .. } => {}
    }
}

fn message_for_error(err: &EngineError) -> String {
    match err {
        EngineError::KeyNotFound(_) => "Запись не найдена.".to_string(),
        EngineError::InvalidAmount(message) => format!("Некорректная сумма: {message}"),
        EngineError::InvalidInput(message) => format!("Некорректные данные: {message}"),
    }
}
