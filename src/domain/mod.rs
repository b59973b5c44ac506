// src/domain/mod.rs
pub mod property;
pub mod session;
pub mod units;

pub use property::{
    DebrisLevel, FloodZone, PartialPropertyRecord, PropertyRecord, Slope, SlotId, SlotRole, Trees,
};
pub use session::Session;
