//! Screen implementations

pub mod lockout;
pub mod pin_entry;
