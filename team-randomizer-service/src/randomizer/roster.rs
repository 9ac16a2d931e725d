//! Static role and hero tables.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A team role a slot can be assigned to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, Serialize,
    Deserialize,
)]
pub enum Role {
    Tank,
    Damage,
    Support,
}

impl Role {
    /// Every role, in display order
    pub const ALL: [Role; 3] = [Role::Tank, Role::Damage, Role::Support];
}

const TANKS: &[&str] = &[
    "D.Va",
    "Junker Queen",
    "Orisa",
    "Reinhardt",
    "Zarya",
    "Winston",
    "Sigma",
    "Ramattra",
    "Roadhog",
    "Mauga",
    "Wrecking Ball",
];

const DAMAGE: &[&str] = &[
    "Ashe",
    "Cassidy",
    "Freja",
    "Genji",
    "Mei",
    "Reaper",
    "Soldier: 76",
    "Echo",
    "Pharah",
    "Sojourn",
    "Sombra",
    "Symmetra",
    "Torbjörn",
    "Tracer",
    "Hanzo",
    "Bastion",
    "Junkrat",
];

const SUPPORTS: &[&str] = &[
    "Ana",
    "Juno",
    "Kiriko",
    "Lúcio",
    "Mercy",
    "Moira",
    "Zenyatta",
    "Baptiste",
    "Brigitte",
    "Illari",
    "Lifeweaver",
];

/// Heroes legal in Stadium
pub const STADIUM_CHARACTERS: &[&str] = &[
    "D.Va",
    "Junker Queen",
    "Orisa",
    "Reinhardt",
    "Zarya",
    "Ashe",
    "Cassidy",
    "Freja",
    "Genji",
    "Mei",
    "Reaper",
    "Soldier: 76",
    "Ana",
    "Juno",
    "Kiriko",
    "Lúcio",
    "Mercy",
    "Moira",
];

/// Full roster for a role.
pub fn roster(role: Role) -> &'static [&'static str] {
    match role {
        Role::Tank => TANKS,
        Role::Damage => DAMAGE,
        Role::Support => SUPPORTS,
    }
}
