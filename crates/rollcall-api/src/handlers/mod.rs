//! Route handlers, grouped by surface.

pub mod import;
pub mod roster;
pub mod staff;
