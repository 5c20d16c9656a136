//! Memo of Chinese leap-month flags seen by forward conversions.
//!
//! A Chinese `(year, month, day)` triple does not say whether the month is
//! the intercalary one. Every Gregorian to Chinese conversion records the flag
//! it observed here so that converting the same triple back picks the same
//! day. Losing an entry is harmless: the engine falls back to probing.

use crate::consts::DEFAULT_LEAP_CACHE_CAPACITY;
use crate::types::CalendarDate;
use std::collections::{HashMap, VecDeque};
use std::sync::{PoisonError, RwLock};

/// Bounded, thread-safe map from Chinese date to its leap-month flag.
///
/// When full, the oldest recorded date is evicted. A capacity of 0 disables
/// the memo entirely.
#[derive(Debug)]
pub struct LeapMonthCache {
    capacity: usize,
    inner:    RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    flags: HashMap<CalendarDate, bool>,
    order: VecDeque<CalendarDate>,
}

impl LeapMonthCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: RwLock::new(Inner::default()),
        }
    }

    /// A cache that never remembers anything.
    pub fn disabled() -> Self {
        Self::new(0)
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_enabled(&self) -> bool {
        self.capacity > 0
    }

    pub fn get(&self, date: CalendarDate) -> Option<bool> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.flags.get(&date).copied()
    }

    /// Records the flag observed for `date`, replacing any earlier value.
    pub fn record(&self, date: CalendarDate, is_leap_month: bool) {
        if !self.is_enabled() {
            return;
        }
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if inner.flags.insert(date, is_leap_month).is_some() {
            return;
        }
        inner.order.push_back(date);

        while inner.order.len() > self.capacity {
            let Some(evicted) = inner.order.pop_front() else {
                break;
            };
            inner.flags.remove(&evicted);
            tracing::warn!(
                capacity = self.capacity,
                %evicted,
                "leap-month cache full, evicting oldest entry"
            );
        }
    }

    pub fn clear(&self) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.flags.clear();
        inner.order.clear();
    }

    pub fn len(&self) -> usize {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for LeapMonthCache {
    fn default() -> Self {
        Self::new(DEFAULT_LEAP_CACHE_CAPACITY)
    }
}
