pub mod payment;
pub mod seat;

pub use payment::{BookingConfirmation, PaymentMethod, PaymentStatus};
pub use seat::{Position, Seat, WorkspaceType};
