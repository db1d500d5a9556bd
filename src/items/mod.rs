//! Item system: equipment pieces, equipped slots and materials.

pub mod equipment;
pub mod materials;
pub mod types;

pub use equipment::{equip, unequip, EquipOutcome, EquippedGear};
pub use materials::{MaterialKind, Materials};
pub use types::*;
