use serde::{Deserialize, Serialize};

/// The four kinds of bookable units on the floor plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkspaceType {
    Workstation,
    Cabin,
    MeetingRoom,
    Conference,
}

impl WorkspaceType {
    /// Display label used by summary and confirmation payloads.
    pub fn label(&self) -> &'static str {
        match self {
            WorkspaceType::Workstation => "Workstation",
            WorkspaceType::Cabin => "Cabin",
            WorkspaceType::MeetingRoom => "Meeting Room",
            WorkspaceType::Conference => "Conference",
        }
    }
}

/// Layout coordinates on the floor-plan canvas. Presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub rotation: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seat {
    pub id: String,
    pub zone: String,
    #[serde(rename = "workspaceType")]
    pub workspace_type: WorkspaceType,
    /// Price in whole currency units.
    pub price: u32,
    #[serde(flatten)]
    pub position: Position,
    /// Pre-seeded fact. Booked seats stay unselectable for the life of the process.
    pub booked: bool,
}
