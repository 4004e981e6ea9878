//! Static seat inventory for the 14th-floor SkyDesk360 Baner layout.
//!
//! The catalog is seeded once at startup and never mutated afterwards.
//! "Booked" is a pre-seeded fact here, not a runtime transition.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::seat::{Position, Seat, WorkspaceType};

/// Category filter for the seat listing. Closed enumeration: anything else
/// fails deserialization at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatFilter {
    All,
    Workstation,
    Cabin,
    MeetingRoom,
    Conference,
}

impl SeatFilter {
    fn matches(self, workspace_type: WorkspaceType) -> bool {
        match self {
            SeatFilter::All => true,
            SeatFilter::Workstation => workspace_type == WorkspaceType::Workstation,
            SeatFilter::Cabin => workspace_type == WorkspaceType::Cabin,
            SeatFilter::MeetingRoom => workspace_type == WorkspaceType::MeetingRoom,
            SeatFilter::Conference => workspace_type == WorkspaceType::Conference,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct InventoryStats {
    pub total: usize,
    pub available: usize,
}

/// Read-only seat catalog, ordered as laid out on the floor plan.
#[derive(Debug)]
pub struct Inventory {
    seats: Vec<Seat>,
}

impl Inventory {
    /// Seat ids must be unique; a duplicate is a broken fixture.
    pub fn new(seats: Vec<Seat>) -> Self {
        let mut seen = HashSet::new();
        for seat in &seats {
            assert!(seen.insert(seat.id.clone()), "duplicate seat id {}", seat.id);
        }
        Self { seats }
    }

    /// The full fixed catalog, floor-plan order.
    pub fn list(&self) -> &[Seat] {
        &self.seats
    }

    pub fn by_id(&self, id: &str) -> Option<&Seat> {
        self.seats.iter().find(|seat| seat.id == id)
    }

    pub fn by_type(&self, workspace_type: WorkspaceType) -> Vec<&Seat> {
        self.seats
            .iter()
            .filter(|seat| seat.workspace_type == workspace_type)
            .collect()
    }

    /// Subset visible under the active category filter, inventory order preserved.
    pub fn visible(&self, filter: SeatFilter) -> Vec<&Seat> {
        self.seats
            .iter()
            .filter(|seat| filter.matches(seat.workspace_type))
            .collect()
    }

    pub fn stats(&self) -> InventoryStats {
        InventoryStats {
            total: self.seats.len(),
            available: self.seats.iter().filter(|seat| !seat.booked).count(),
        }
    }

    /// Floor-plan fixture recreated from the office blueprint.
    pub fn floor_plan() -> Self {
        use WorkspaceType::{Cabin, Conference, MeetingRoom, Workstation};

        fn seat(
            id: &str,
            zone: &str,
            workspace_type: WorkspaceType,
            price: u32,
            x: f64,
            y: f64,
            rotation: i32,
            booked: bool,
        ) -> Seat {
            Seat {
                id: id.to_string(),
                zone: zone.to_string(),
                workspace_type,
                price,
                position: Position { x, y, rotation },
                booked,
            }
        }

        let row_a = "Workstations Row A";
        let row_b = "Workstations Row B";
        let reception = "Reception Workstations";
        let conf = "Convertible 10 Seater Conference";
        let ceo = "CEO's Cabin";
        let director = "Director's Cabin";
        let meeting = "2 Seater Meeting Room";

        Self::new(vec![
            // Workstations Row A
            seat("WS-A1", row_a, Workstation, 500, 19.3, 15.9, 0, false),
            seat("WS-A2", row_a, Workstation, 500, 27.9, 15.9, 0, true),
            seat("WS-A3", row_a, Workstation, 500, 36.6, 15.9, 0, false),
            seat("WS-A4", row_a, Workstation, 500, 45.5, 15.9, 0, false),
            seat("WS-A5", row_a, Workstation, 500, 54.2, 15.9, 0, false),
            seat("WS-A6", row_a, Workstation, 500, 62.8, 15.9, 0, false),
            // Workstations Row B
            seat("WS-B1", row_b, Workstation, 500, 19.3, 26.8, 0, false),
            seat("WS-B2", row_b, Workstation, 500, 27.9, 26.8, 0, false),
            seat("WS-B3", row_b, Workstation, 500, 36.6, 26.8, 0, true),
            seat("WS-B4", row_b, Workstation, 500, 45.5, 26.8, 0, false),
            seat("WS-B5", row_b, Workstation, 500, 54.2, 26.8, 0, false),
            seat("WS-B6", row_b, Workstation, 500, 62.8, 26.8, 0, false),
            // Reception-facing workstations
            seat("WS-R1", reception, Workstation, 550, 38.2, 37.8, 0, true),
            seat("WS-R2", reception, Workstation, 550, 46.6, 37.8, 0, false),
            seat("WS-R3", reception, Workstation, 550, 55.0, 37.8, 0, false),
            // Convertible conference (10 seater)
            seat("CONF-1", conf, Conference, 3000, 72.2, 17.2, 90, false),
            seat("CONF-2", conf, Conference, 3000, 84.3, 17.2, 270, false),
            seat("CONF-3", conf, Conference, 3000, 72.2, 26.2, 90, false),
            seat("CONF-4", conf, Conference, 3000, 84.3, 26.2, 270, true),
            seat("CONF-5", conf, Conference, 3000, 72.2, 34.9, 90, false),
            seat("CONF-6", conf, Conference, 3000, 84.3, 34.9, 270, false),
            seat("CONF-7", conf, Conference, 3000, 72.2, 43.7, 90, false),
            seat("CONF-8", conf, Conference, 3000, 84.3, 43.7, 270, false),
            seat("CONF-9", conf, Conference, 3000, 72.2, 52.5, 90, false),
            seat("CONF-10", conf, Conference, 3000, 84.3, 52.5, 270, false),
            // CEO cabin
            seat("CEO-1", ceo, Cabin, 2200, 22.6, 73.3, 0, false),
            seat("CEO-2", ceo, Cabin, 2200, 30.1, 73.3, 0, true),
            seat("CEO-3", ceo, Cabin, 2200, 29.7, 85.1, 180, false),
            // Director cabin
            seat("DIR-1", director, Cabin, 1800, 43.5, 73.3, 0, false),
            seat("DIR-2", director, Cabin, 1800, 50.6, 73.3, 0, false),
            seat("DIR-3", director, Cabin, 1800, 50.2, 84.9, 180, false),
            // 2-seater meeting room
            seat("MR-1", meeting, MeetingRoom, 900, 65.4, 79.0, 330, false),
            seat("MR-2", meeting, MeetingRoom, 900, 70.4, 72.8, 35, false),
        ])
    }
}
