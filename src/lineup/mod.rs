//! Lineup manager: rotation slots, libero and setter.

mod slot;
mod manager;

pub use slot::Slot;
pub use manager::Lineup;
