pub mod chat;
pub mod dashboard;
pub mod expenses;
pub mod learning;
