//! Observable colony state: the event log and chat history

pub mod state;

pub use state::{ChatHistory, ChatMessage, ColonyLog, LogCategory, LogEntry};
