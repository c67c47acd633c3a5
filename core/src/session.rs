use crate::telemetry::LogManager;
use chrono::NaiveDate;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// Issued when a date is selected; a result is only accepted with the latest ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionTicket {
    generation: u64,
    date: NaiveDate,
}

impl SelectionTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// The accepted snapshot for the most recent selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<T> {
    pub date: NaiveDate,
    pub generation: u64,
    pub value: T,
}

/// Drops results that resolve after a newer date has been selected.
///
/// Each call to [`SelectionGate::begin`] supersedes every earlier ticket. A
/// late response for a stale date is rejected instead of overwriting the
/// fresher snapshot.
pub struct SelectionGate<T> {
    latest: AtomicU64,
    snapshot: RwLock<Option<Selection<T>>>,
    logger: LogManager,
}

impl<T: Clone> SelectionGate<T> {
    pub fn new() -> Self {
        Self {
            latest: AtomicU64::new(0),
            snapshot: RwLock::new(None),
            logger: LogManager::new("selection"),
        }
    }

    pub fn begin(&self, date: NaiveDate) -> SelectionTicket {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        self.logger
            .detail(&format!("selection {} for {}", generation, date));
        SelectionTicket { generation, date }
    }

    pub fn is_current(&self, ticket: &SelectionTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.generation
    }

    /// Stores `value` if `ticket` is still the latest selection. Returns whether it was kept.
    pub fn accept(&self, ticket: &SelectionTicket, value: T) -> bool {
        if let Ok(mut guard) = self.snapshot.write() {
            if !self.is_current(ticket) {
                self.logger.warn(&format!(
                    "dropping stale result for {} (selection {}, latest {})",
                    ticket.date,
                    ticket.generation,
                    self.latest.load(Ordering::SeqCst)
                ));
                return false;
            }
            *guard = Some(Selection {
                date: ticket.date,
                generation: ticket.generation,
                value,
            });
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> Option<Selection<T>> {
        if let Ok(guard) = self.snapshot.read() {
            guard.clone()
        } else {
            None
        }
    }
}

impl<T: Clone> Default for SelectionGate<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    #[test]
    fn latest_selection_is_accepted() {
        let gate = SelectionGate::new();
        let ticket = gate.begin(date(1));
        assert!(gate.accept(&ticket, vec![1, 2, 3]));
        let current = gate.current().unwrap();
        assert_eq!(current.date, date(1));
        assert_eq!(current.value, vec![1, 2, 3]);
    }

    #[test]
    fn late_response_for_stale_date_is_dropped() {
        let gate = SelectionGate::new();
        let stale = gate.begin(date(1));
        let fresh = gate.begin(date(2));

        assert!(gate.accept(&fresh, "fresh"));
        assert!(!gate.accept(&stale, "stale"));
        assert_eq!(gate.current().unwrap().value, "fresh");
    }

    #[test]
    fn superseded_ticket_is_rejected_even_before_fresh_result() {
        let gate: SelectionGate<u8> = SelectionGate::new();
        let stale = gate.begin(date(1));
        let _fresh = gate.begin(date(2));
        assert!(!gate.is_current(&stale));
        assert!(!gate.accept(&stale, 1));
        assert!(gate.current().is_none());
    }

    #[test]
    fn only_one_of_many_concurrent_selections_wins() {
        let gate = Arc::new(SelectionGate::new());
        let tickets: Vec<_> = (1..=8).map(|day| gate.begin(date(day))).collect();
        let handles: Vec<_> = tickets
            .into_iter()
            .map(|ticket| {
                let gate = gate.clone();
                thread::spawn(move || gate.accept(&ticket, ticket.date()))
            })
            .collect();
        let accepted = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|kept| *kept)
            .count();
        assert_eq!(accepted, 1);
        assert_eq!(gate.current().unwrap().date, date(8));
    }
}
