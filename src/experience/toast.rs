use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const TOAST_LIFETIME: Duration = Duration::from_secs(2);
pub const MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub text: String,
    pub expires_at: Instant,
}

/// Short-lived notifications; the oldest is pushed out when full.
#[derive(Debug, Default)]
pub struct ToastQueue {
    items: VecDeque<Toast>,
    last_id: u64,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: impl Into<String>, now: Instant) -> u64 {
        while self.items.len() >= MAX_VISIBLE {
            self.items.pop_front();
        }
        self.last_id += 1;
        self.items.push_back(Toast {
            id: self.last_id,
            text: text.into(),
            expires_at: now + TOAST_LIFETIME,
        });
        self.last_id
    }

    pub fn expire(&mut self, now: Instant) {
        self.items.retain(|t| t.expires_at > now);
    }

    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.items.iter().map(|t| t.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_newest_three() {
        let now = Instant::now();
        let mut q = ToastQueue::new();
        for text in ["a", "b", "c", "d"] {
            q.push(text, now);
        }
        assert_eq!(q.texts(), vec!["b", "c", "d"]);
    }

    #[test]
    fn expires_after_lifetime() {
        let now = Instant::now();
        let mut q = ToastQueue::new();
        q.push("hello", now);
        q.expire(now + Duration::from_millis(1_999));
        assert!(!q.is_empty());
        q.expire(now + TOAST_LIFETIME);
        assert!(q.is_empty());
    }
}
