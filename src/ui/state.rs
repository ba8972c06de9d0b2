//! Bounded, append-only histories read by render sinks and oracles

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::types::Tick;

/// Default number of log entries kept
pub const MAX_LOG_ENTRIES: usize = 100;
/// Default number of chat messages kept
pub const MAX_CHAT_MESSAGES: usize = 20;

/// An entry in the colony log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub tick: Tick,
    pub message: String,
    pub category: LogCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogCategory {
    Action,
    Combat,
    Production,
    Decision,
    System,
}

/// Human-readable event history; oldest entries fall off the front
#[derive(Debug, Clone)]
pub struct ColonyLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl ColonyLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Add an entry, evicting the oldest when full
    pub fn push(&mut self, tick: Tick, category: LogCategory, message: impl Into<String>) {
        let message = message.into();
        debug!(tick, ?category, "{}", message);
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            tick,
            message,
            category,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    /// Most recent `n` entries, oldest first
    pub fn tail(&self, n: usize) -> Vec<LogEntry> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip).cloned().collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|e| e.message.contains(needle))
    }
}

impl Default for ColonyLog {
    fn default() -> Self {
        Self::new(MAX_LOG_ENTRIES)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub survivor_name: String,
    pub text: String,
}

/// Messages survivors broadcast alongside their decisions
#[derive(Debug, Clone)]
pub struct ChatHistory {
    messages: VecDeque<ChatMessage>,
    capacity: usize,
}

impl ChatHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            messages: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, survivor_name: impl Into<String>, text: impl Into<String>) {
        if self.messages.len() >= self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(ChatMessage {
            survivor_name: survivor_name.into(),
            text: text.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn tail(&self, n: usize) -> Vec<ChatMessage> {
        let skip = self.messages.len().saturating_sub(n);
        self.messages.iter().skip(skip).cloned().collect()
    }
}

impl Default for ChatHistory {
    fn default() -> Self {
        Self::new(MAX_CHAT_MESSAGES)
    }
}
