//! Bounded, append-only conversation store shared by all personas of a session

use chrono::{DateTime, Local};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One completed user/bot round trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    pub timestamp: DateTime<Local>,
    #[serde(rename = "persona")]
    pub persona_name: String,
    #[serde(rename = "user")]
    pub user_text: String,
    #[serde(rename = "bot")]
    pub bot_text: String,
}

impl Exchange {
    pub fn new(
        persona_name: impl Into<String>,
        user_text: impl Into<String>,
        bot_text: impl Into<String>,
    ) -> Self {
        Self::at(Local::now(), persona_name, user_text, bot_text)
    }

    pub fn at(
        timestamp: DateTime<Local>,
        persona_name: impl Into<String>,
        user_text: impl Into<String>,
        bot_text: impl Into<String>,
    ) -> Self {
        Exchange {
            timestamp,
            persona_name: persona_name.into(),
            user_text: user_text.into(),
            bot_text: bot_text.into(),
        }
    }
}

/// Aggregate counts over the retained exchanges
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStats {
    pub total_exchanges: usize,
    /// Exchange count per persona, in order of first appearance
    pub by_persona: IndexMap<String, usize>,
    /// Characters of user and bot text combined
    pub total_chars: usize,
}

/// Chronologically ordered exchanges, capped at `max_size`.
///
/// Once full, each append evicts the oldest exchange.
#[derive(Debug, Clone)]
pub struct ConversationStore {
    exchanges: VecDeque<Exchange>,
    max_size: usize,
}

impl ConversationStore {
    /// `max_size` is clamped to at least 1
    pub fn new(max_size: usize) -> Self {
        let max_size = max_size.max(1);
        ConversationStore {
            exchanges: VecDeque::with_capacity(max_size),
            max_size,
        }
    }

    pub fn append(&mut self, exchange: Exchange) {
        self.exchanges.push_back(exchange);
        while self.exchanges.len() > self.max_size {
            self.exchanges.pop_front();
        }
    }

    /// The last `min(n, size())` exchanges, oldest first
    pub fn recent_window(&self, n: usize) -> impl Iterator<Item = &Exchange> + '_ {
        let skip = self.exchanges.len().saturating_sub(n);
        self.exchanges.iter().skip(skip)
    }

    pub fn clear(&mut self) {
        self.exchanges.clear();
    }

    pub fn size(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn iter(&self) -> impl Iterator<Item = &Exchange> + '_ {
        self.exchanges.iter()
    }

    pub fn to_vec(&self) -> Vec<Exchange> {
        self.exchanges.iter().cloned().collect()
    }

    pub fn stats(&self) -> MemoryStats {
        let mut stats = MemoryStats {
            total_exchanges: self.exchanges.len(),
            ..MemoryStats::default()
        };
        for exchange in &self.exchanges {
            *stats
                .by_persona
                .entry(exchange.persona_name.clone())
                .or_insert(0) += 1;
            stats.total_chars +=
                exchange.user_text.chars().count() + exchange.bot_text.chars().count();
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(i: usize) -> Exchange {
        Exchange::new("RoastBot", format!("user #{i}"), format!("bot #{i}"))
    }

    #[test]
    fn test_append_and_size() {
        let mut store = ConversationStore::new(30);
        assert!(store.is_empty());
        store.append(numbered(1));
        store.append(numbered(2));
        assert_eq!(store.size(), 2);
    }

    #[test]
    fn test_size_never_exceeds_max() {
        let mut store = ConversationStore::new(5);
        for i in 1..=50 {
            store.append(numbered(i));
            assert!(store.size() <= 5, "size {} after append #{i}", store.size());
        }
    }

    #[test]
    fn test_eviction_is_oldest_first() {
        let mut store = ConversationStore::new(30);
        for i in 1..=31 {
            store.append(numbered(i));
        }
        assert_eq!(store.size(), 30);

        let users: Vec<String> = store.iter().map(|e| e.user_text.clone()).collect();
        assert!(!users.contains(&"user #1".to_string()));
        let expected: Vec<String> = (2..=31).map(|i| format!("user #{i}")).collect();
        assert_eq!(users, expected);
    }

    #[test]
    fn test_recent_window_is_chronological_tail() {
        let mut store = ConversationStore::new(30);
        for i in 1..=10 {
            store.append(numbered(i));
        }
        let window: Vec<&str> = store.recent_window(3).map(|e| e.user_text.as_str()).collect();
        assert_eq!(window, vec!["user #8", "user #9", "user #10"]);
    }

    #[test]
    fn test_recent_window_larger_than_store() {
        let mut store = ConversationStore::new(30);
        store.append(numbered(1));
        store.append(numbered(2));
        assert_eq!(store.recent_window(20).count(), 2);
        assert_eq!(store.recent_window(0).count(), 0);
    }

    #[test]
    fn test_clear_empties_store() {
        let mut store = ConversationStore::new(3);
        store.append(numbered(1));
        store.clear();
        assert_eq!(store.size(), 0);
        assert_eq!(store.max_size(), 3);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut store = ConversationStore::new(0);
        store.append(numbered(1));
        store.append(numbered(2));
        assert_eq!(store.size(), 1);
        assert_eq!(store.iter().next().unwrap().user_text, "user #2");
    }

    #[test]
    fn test_stats_counts_by_persona_in_first_seen_order() {
        let mut store = ConversationStore::new(30);
        store.append(Exchange::new("PirateBot", "ahoy", "arr"));
        store.append(Exchange::new("RoastBot", "hi", "yo"));
        store.append(Exchange::new("PirateBot", "héllo", "ok"));

        let stats = store.stats();
        assert_eq!(stats.total_exchanges, 3);
        let order: Vec<(&str, usize)> = stats
            .by_persona
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        assert_eq!(order, vec![("PirateBot", 2), ("RoastBot", 1)]);
        // "ahoy"+"arr" = 7, "hi"+"yo" = 4, "héllo"+"ok" = 7
        assert_eq!(stats.total_chars, 18);
    }

    #[test]
    fn test_exchange_serializes_with_export_keys() {
        let exchange = Exchange::new("EmojiBot", "hello", "👋");
        let value = serde_json::to_value(&exchange).unwrap();
        assert_eq!(value["persona"], "EmojiBot");
        assert_eq!(value["user"], "hello");
        assert_eq!(value["bot"], "👋");
        assert!(value["timestamp"].is_string());
    }
}
