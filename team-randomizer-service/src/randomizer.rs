//! Team randomizer core.
//!
//! Static role and hero tables, mode policies, and the two assignment
//! operations. Nothing here holds state between calls.

mod assign;
mod mode;
mod roster;

pub use assign::AssignmentState;
pub use mode::{Mode, ModeSelection, ModeTable, OpenQuota, SlotCount};
pub use roster::Role;
