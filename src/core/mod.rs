//! Core types: players, cells, outcomes and coordinate spaces.
//!
//! Nothing in here knows the rules of the game. `rules` builds the state
//! machine on top of these types; `symmetry` and `nn` only need the
//! coordinate mappings.

pub mod cell;
pub mod index;
pub mod player;

pub use cell::{Cell, CurrentArea, Outcome};
pub use index::{
    actions_to_flat, actions_to_nested, flat_to_actions, flat_to_nested, from_action,
    nested_to_actions, nested_to_flat, to_action, to_flat, to_nested, Area, CellAddr, Flat,
    FlatBoard, FlatPos, Grid3, Nested, OutOfRange, ACTION_SIZE, AREA_SIZE, BOARD_SIZE,
};
pub use player::Player;
