//! Role and hero assignment.
//!
//! Both operations are pure apart from the caller-supplied random source,
//! so a seeded RNG reproduces the same lobby every time.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

use super::mode::{Mode, ModeSelection, ModeTable, RoleQuota, character_pool};
use super::roster::Role;

/// Placeholder shown when no eligible hero remains for a slot
pub const UNAVAILABLE: &str = "???";

/// Assign a role to each of `slot_count` slots.
///
/// The quota is expanded into a multiset, padded with uniformly random
/// roles if it is short, shuffled, and truncated to `slot_count`.
pub fn assign_roles<R: Rng + ?Sized>(
    slot_count: usize,
    quota: &RoleQuota,
    rng: &mut R,
) -> Vec<Role> {
    let mut roles = quota.expand();

    if roles.len() < slot_count {
        let deficit = slot_count - roles.len();
        roles.extend((0..deficit).map(|_| Role::ALL[rng.gen_range(0..Role::ALL.len())]));
    }

    roles.shuffle(rng);
    roles.truncate(slot_count);
    roles
}

/// Outcome of picking a hero for one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterPick {
    Character(&'static str),
    /// The slot's pool was exhausted
    Unavailable,
}

impl CharacterPick {
    pub fn name(&self) -> &'static str {
        match self {
            CharacterPick::Character(name) => name,
            CharacterPick::Unavailable => UNAVAILABLE,
        }
    }

    pub fn character(&self) -> Option<&'static str> {
        match self {
            CharacterPick::Character(name) => Some(name),
            CharacterPick::Unavailable => None,
        }
    }
}

impl fmt::Display for CharacterPick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for CharacterPick {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Pick a distinct hero for each slot, in slot order.
///
/// Each slot draws from its role's pool (restricted when the mode restricts)
/// minus every hero already picked in this pass. Empty pools yield
/// [`CharacterPick::Unavailable`].
pub fn assign_characters<R: Rng + ?Sized>(
    roles: &[Role],
    mode: Option<Mode>,
    rng: &mut R,
) -> Vec<CharacterPick> {
    let mut taken: HashSet<&'static str> = HashSet::new();

    roles
        .iter()
        .enumerate()
        .map(|(slot, role)| {
            let pool: Vec<&'static str> = character_pool(mode, *role)
                .into_iter()
                .filter(|hero| !taken.contains(hero))
                .collect();

            match pool.choose(rng).copied() {
                Some(hero) => {
                    taken.insert(hero);
                    CharacterPick::Character(hero)
                }
                None => {
                    debug!(slot, role = %role, "No eligible hero left for slot");
                    CharacterPick::Unavailable
                }
            }
        })
        .collect()
}

/// One filled slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotAssignment {
    pub role: Role,
    pub character: CharacterPick,
}

/// A complete lobby assignment, produced fresh on every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentState {
    pub selection: ModeSelection,
    pub slots: Vec<SlotAssignment>,
}

impl AssignmentState {
    /// Draw roles, then heroes for those roles.
    pub fn generate<R: Rng + ?Sized>(
        selection: ModeSelection,
        table: &ModeTable,
        rng: &mut R,
    ) -> Self {
        let roles = assign_roles(selection.slot_count.get(), &table.quota_for(&selection), rng);
        Self::with_roles(selection, roles, rng)
    }

    /// Keep the given roles and draw heroes for them. This is how a lobby's
    /// heroes are rerolled without touching its roles.
    pub fn with_roles<R: Rng + ?Sized>(
        selection: ModeSelection,
        roles: Vec<Role>,
        rng: &mut R,
    ) -> Self {
        let picks = assign_characters(&roles, selection.mode, rng);
        let slots = roles
            .into_iter()
            .zip(picks)
            .map(|(role, character)| SlotAssignment { role, character })
            .collect();
        Self { selection, slots }
    }

}

#[cfg(test)]
impl AssignmentState {
    pub fn roles(&self) -> Vec<Role> {
        self.slots.iter().map(|slot| slot.role).collect()
    }
}
