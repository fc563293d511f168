//! Stale-response protection for asynchronous content updates.
//!
//! Translation, transliteration and generation requests resolve in any
//! order. Each request takes a [`Ticket`] for the field it will write; only
//! the most recently issued ticket for that field may commit.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A document field written by an asynchronous request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentField {
    /// Verse text.
    VerseText,
    /// Verse reference line.
    VerseReference,
    /// Event headline.
    EventTitle,
    /// Event details.
    EventDetails,
    /// Transliteration line.
    Transliteration,
    /// Background image.
    Background,
    /// Font family.
    FontFamily,
}

/// Permission to write one field, issued by [`PendingRequests::begin`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a ticket must be committed to apply its response"]
pub struct Ticket {
    field: ContentField,
    generation: u64,
}

impl Ticket {
    /// Field this ticket writes.
    #[must_use]
    pub const fn field(&self) -> ContentField {
        self.field
    }

    /// Issue order.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Per-field generation counters.
#[derive(Debug, Default)]
pub struct PendingRequests {
    latest: HashMap<ContentField, u64>,
    next_generation: u64,
}

impl PendingRequests {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new request for `field`, superseding any in flight.
    pub fn begin(&mut self, field: ContentField) -> Ticket {
        self.next_generation += 1;
        let generation = self.next_generation;
        if self.latest.insert(field, generation).is_some() {
            tracing::debug!(?field, generation, "Superseding in-flight request");
        }
        Ticket { field, generation }
    }

    /// Whether `ticket` is still the newest for its field.
    #[must_use]
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.latest.get(&ticket.field) == Some(&ticket.generation)
    }

    /// Consume `ticket`; returns whether its response may be applied.
    pub fn commit(&mut self, ticket: Ticket) -> bool {
        if self.is_current(&ticket) {
            self.latest.remove(&ticket.field);
            true
        } else {
            tracing::warn!(
                field = ?ticket.field,
                generation = ticket.generation,
                "Discarding stale response"
            );
            false
        }
    }

    /// Whether a request for `field` is outstanding.
    #[must_use]
    pub fn is_pending(&self, field: ContentField) -> bool {
        self.latest.contains_key(&field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_ticket_wins() {
        let mut pending = PendingRequests::new();
        let first = pending.begin(ContentField::VerseText);
        let second = pending.begin(ContentField::VerseText);

        assert!(pending.commit(second));
        assert!(!pending.commit(first));
        assert!(!pending.is_pending(ContentField::VerseText));
    }

    #[test]
    fn test_stale_resolving_last_is_still_discarded() {
        let mut pending = PendingRequests::new();
        let first = pending.begin(ContentField::VerseReference);
        let second = pending.begin(ContentField::VerseReference);

        assert!(!pending.commit(first));
        assert!(pending.is_pending(ContentField::VerseReference));
        assert!(pending.commit(second));
    }

    #[test]
    fn test_fields_are_independent() {
        let mut pending = PendingRequests::new();
        let text = pending.begin(ContentField::VerseText);
        let background = pending.begin(ContentField::Background);

        assert!(pending.commit(background));
        assert!(pending.commit(text));
    }
}
