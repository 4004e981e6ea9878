//! Per-visitor selection store.
//!
//! An ordered set of seats keyed by id, insertion order preserved for
//! display. Totals and the per-type breakdown are derived on read, never
//! cached, so there is no invalidation invariant to maintain.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::seat::{Seat, WorkspaceType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// The seat is booked. The control should already be disabled upstream,
    /// so the store refuses silently instead of surfacing an error.
    RefusedBooked,
}

/// Snapshot handed to the payment step. Frozen by value: later selection
/// mutations never reach an in-flight payment attempt.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionSnapshot {
    pub seats: Vec<Seat>,
    pub total: u32,
}

#[derive(Debug, Clone, Default)]
pub struct Selection {
    seats: Vec<Seat>,
}

impl Selection {
    /// Add the seat if absent, remove it if present. Idempotent under
    /// repeated toggles; booked seats never enter.
    pub fn toggle(&mut self, seat: &Seat) -> ToggleOutcome {
        if seat.booked {
            return ToggleOutcome::RefusedBooked;
        }
        if let Some(index) = self.seats.iter().position(|s| s.id == seat.id) {
            self.seats.remove(index);
            ToggleOutcome::Removed
        } else {
            self.seats.push(seat.clone());
            ToggleOutcome::Added
        }
    }

    pub fn remove(&mut self, id: &str) {
        self.seats.retain(|seat| seat.id != id);
    }

    pub fn clear(&mut self) {
        self.seats.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.seats.iter().any(|seat| seat.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// Sum of member prices; 0 for an empty selection.
    pub fn total(&self) -> u32 {
        self.seats.iter().map(|seat| seat.price).sum()
    }

    /// Count of members per workspace type. Types with no members are omitted.
    pub fn breakdown(&self) -> BTreeMap<WorkspaceType, usize> {
        let mut counts = BTreeMap::new();
        for seat in &self.seats {
            *counts.entry(seat.workspace_type).or_insert(0) += 1;
        }
        counts
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            seats: self.seats.clone(),
            total: self.total(),
        }
    }
}
