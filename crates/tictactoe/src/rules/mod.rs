//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](super::Board). Rules are kept apart from
//! board storage so contracts and invariants can reuse them.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{WINNING_TRIPLES, has_won};
