// Pokemon Arena Schema - Shared data definitions
// Static, serializable records shared between the battle engine and the RON
// data files it loads at startup.

pub use element_types::*;
pub use move_types::*;
pub use species_data::*;

pub mod element_types;
pub mod move_types;
pub mod species_data;
