//! In-memory implementations of the store and gateway seams
//!
//! Used by the core test suite and by API-level tests that need a real
//! controller without Redis or an SMS provider. The store keeps its own
//! manually-advanced clock so tests can expire entries deterministically.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use super::service::CODE_LENGTH;
use super::traits::{OtpStore, SmsGateway};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    /// Absolute expiry on the store's own clock; `None` means no expiry
    expires_at_ms: Option<u64>,
}

/// In-memory key-value store with TTL semantics matching Redis
///
/// Expiry is evaluated lazily against an internal clock that only moves when
/// [`MemoryStore::advance`] is called, so a test controls exactly when an
/// entry dies.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Entry>>,
    clock_ms: AtomicU64,
    fail: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the store's clock forward, expiring entries whose TTL elapses
    pub fn advance(&self, by: Duration) {
        self.clock_ms
            .fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }

    /// Make every subsequent operation fail, simulating a store outage
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Number of live (unexpired) entries
    pub fn live_entries(&self) -> usize {
        let now = self.now_ms();
        self.entries
            .lock()
            .unwrap()
            .values()
            .filter(|e| e.expires_at_ms.map(|at| at > now).unwrap_or(true))
            .count()
    }

    /// Peek at a live value without going through the trait
    pub fn peek(&self, key: &str) -> Option<String> {
        let now = self.now_ms();
        self.entries
            .lock()
            .unwrap()
            .get(key)
            .filter(|e| e.expires_at_ms.map(|at| at > now).unwrap_or(true))
            .map(|e| e.value.clone())
    }

    fn now_ms(&self) -> u64 {
        self.clock_ms.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), String> {
        if self.fail.load(Ordering::SeqCst) {
            Err("memory store unavailable".to_string())
        } else {
            Ok(())
        }
    }

    /// Drop the entry if its TTL has elapsed; returns the live entry if any
    fn live_entry(&self, key: &str) -> Option<Entry> {
        let now = self.now_ms();
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(e) if e.expires_at_ms.map(|at| at <= now).unwrap_or(false) => {
                entries.remove(key);
                None
            }
            Some(e) => Some(e.clone()),
            None => None,
        }
    }
}

#[async_trait]
impl OtpStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        self.check_available()?;
        Ok(self.live_entry(key).map(|e| e.value))
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<(), String> {
        self.check_available()?;
        let expires_at_ms = Some(self.now_ms() + ttl.as_millis() as u64);
        self.entries.lock().unwrap().insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at_ms,
            },
        );
        Ok(())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), String> {
        self.check_available()?;
        self.entries.lock().unwrap().insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at_ms: None,
            },
        );
        Ok(())
    }

    async fn decrement(&self, key: &str) -> Result<i64, String> {
        self.check_available()?;
        // Redis DECR semantics: an absent key counts from zero and keeps no
        // expiry; an existing key keeps its expiry.
        let live = self.live_entry(key);
        let mut entries = self.entries.lock().unwrap();
        let (current, expires_at_ms) = match live {
            Some(e) => (
                e.value
                    .parse::<i64>()
                    .map_err(|_| "value is not an integer".to_string())?,
                e.expires_at_ms,
            ),
            None => (0, None),
        };
        let next = current - 1;
        entries.insert(
            key.to_string(),
            Entry {
                value: next.to_string(),
                expires_at_ms,
            },
        );
        Ok(next)
    }

    async fn delete(&self, key: &str) -> Result<bool, String> {
        self.check_available()?;
        let existed = self.live_entry(key).is_some();
        self.entries.lock().unwrap().remove(key);
        Ok(existed)
    }

    async fn ttl(&self, key: &str) -> Result<Option<Duration>, String> {
        self.check_available()?;
        let now = self.now_ms();
        Ok(self
            .live_entry(key)
            .and_then(|e| e.expires_at_ms)
            .map(|at| Duration::from_millis(at.saturating_sub(now))))
    }
}

/// Recording SMS gateway
#[derive(Default)]
pub struct MockGateway {
    sent: Mutex<Vec<(String, String)>>,
    fail: AtomicBool,
}

impl MockGateway {
    /// Create a gateway that accepts every message
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a gateway that rejects every message
    pub fn failing() -> Self {
        let gateway = Self::default();
        gateway.fail.store(true, Ordering::SeqCst);
        gateway
    }

    /// Toggle delivery failure
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Total messages accepted
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// The most recent message sent to a number
    pub fn last_message_to(&self, phone: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == phone)
            .map(|(_, body)| body.clone())
    }

    /// The code carried by the most recent message to a number
    pub fn last_code_to(&self, phone: &str) -> Option<String> {
        self.last_message_to(phone)
            .map(|body| body[body.len() - CODE_LENGTH..].to_string())
    }
}

#[async_trait]
impl SmsGateway for MockGateway {
    async fn send(&self, phone: &str, message: &str) -> Result<String, String> {
        if self.fail.load(Ordering::SeqCst) {
            return Err("SMS gateway error".to_string());
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push((phone.to_string(), message.to_string()));
        Ok(format!("mock-msg-{}", sent.len()))
    }
}
