//! Conversation state of the chat widget.
//!
//! The session does not talk to the network. [`ChatSession::submit`] tells
//! the caller whether to send a question; the caller hands the outcome back
//! through [`ChatSession::complete`].

use chrono::{DateTime, Local};

use crate::error::RelayError;

pub const GREETING: &str = "Привет! Я ваш финансовый помощник. Чем могу помочь сегодня?";
pub const MISSING_KEY_MESSAGE: &str = "Пожалуйста, введите API ключ для использования AI.";

/// Canned questions offered under the input box.
pub const SUGGESTIONS: [&str; 4] = [
    "Как быстрее погасить кредит?",
    "Рассчитать досрочное погашение",
    "Советы по экономии",
    "Какой кредит лучше закрыть первым?",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    pub sent_at: DateTime<Local>,
}

impl ChatMessage {
    fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            sent_at: Local::now(),
        }
    }
}

/// What the caller should do with a submitted text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    /// Blank input, nothing happened.
    Ignored,
    /// A request is already in flight.
    Busy,
    /// No credential; an explanatory reply was appended.
    MissingKey,
    /// Send this question and report back with `complete`.
    Send(String),
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    loading: bool,
    has_credential: bool,
}

impl ChatSession {
    pub fn new(has_credential: bool) -> Self {
        Self {
            messages: vec![ChatMessage::new(Sender::Assistant, GREETING)],
            loading: false,
            has_credential,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn submit(&mut self, text: &str) -> Submission {
        if text.trim().is_empty() {
            return Submission::Ignored;
        }
        if self.loading {
            return Submission::Busy;
        }
        if !self.has_credential {
            self.messages
                .push(ChatMessage::new(Sender::Assistant, MISSING_KEY_MESSAGE));
            return Submission::MissingKey;
        }

        self.messages.push(ChatMessage::new(Sender::User, text));
        self.loading = true;
        Submission::Send(text.to_string())
    }

    /// Appends the answer, or the user-facing failure message.
    pub fn complete(&mut self, outcome: Result<String, RelayError>) {
        let text = match outcome {
            Ok(answer) => answer,
            Err(err) => err.user_message().to_string(),
        };
        self.messages.push(ChatMessage::new(Sender::Assistant, text));
        self.loading = false;
    }
}
