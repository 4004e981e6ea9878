pub mod payment;
pub mod reference;
pub mod validation;
