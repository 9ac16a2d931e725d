//! Game modes, slot counts, and role quotas.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumString};
use tracing::warn;

use super::roster::{Role, STADIUM_CHARACTERS, roster};

/// A built-in game mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum Mode {
    #[strum(serialize = "5v5")]
    #[serde(rename = "5v5")]
    FiveVFive,
    Open,
    Stadium,
    Custom,
}

impl Mode {
    /// Modes offered to clients, in menu order
    pub const ALL: [Mode; 4] = [Mode::FiveVFive, Mode::Open, Mode::Stadium, Mode::Custom];

    /// Whether this mode limits heroes to a reduced roster
    pub fn is_restricted(self) -> bool {
        matches!(self, Mode::Stadium)
    }

    /// Fixed slot count, or `None` when the player picks it
    pub fn fixed_slot_count(self) -> Option<SlotCount> {
        match self {
            Mode::FiveVFive | Mode::Stadium => Some(SlotCount(5)),
            Mode::Open => Some(SlotCount(6)),
            Mode::Custom => None,
        }
    }
}

/// Number of team slots, always within `SlotCount::MIN..=SlotCount::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SlotCount(usize);

impl SlotCount {
    pub const MIN: usize = 1;
    pub const MAX: usize = 10;

    /// Smallest valid count, used for unusable input
    pub const LOWEST: SlotCount = SlotCount(Self::MIN);

    /// Slot count used by a custom lobby when none was requested
    pub const CUSTOM_DEFAULT: SlotCount = SlotCount(5);

    /// A count that is already in range, or `None`.
    pub fn new(count: usize) -> Option<Self> {
        (Self::MIN..=Self::MAX)
            .contains(&count)
            .then_some(SlotCount(count))
    }

    /// Clamp any integer into the valid range.
    pub fn clamped(requested: i64) -> Self {
        let clamped = requested.clamp(Self::MIN as i64, Self::MAX as i64);
        SlotCount(clamped as usize)
    }

    /// Clamp a fractional count, dropping the fraction. NaN counts as the minimum.
    pub fn clamped_f64(requested: f64) -> Self {
        if requested.is_nan() {
            return SlotCount(Self::MIN);
        }
        let clamped = requested.trunc().clamp(Self::MIN as f64, Self::MAX as f64);
        SlotCount(clamped as usize)
    }

    /// Parse free-form user input. Non-numeric input counts as the minimum;
    /// integers too large for `i64` still clamp by sign.
    pub fn parse_lenient(input: &str) -> Self {
        let input = input.trim();
        match input.parse::<i64>() {
            Ok(n) => Self::clamped(n),
            Err(_) => {
                let (negative, digits) = match input.strip_prefix('-') {
                    Some(rest) => (true, rest),
                    None => (false, input.strip_prefix('+').unwrap_or(input)),
                };
                if !negative && !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                    SlotCount(Self::MAX)
                } else {
                    SlotCount(Self::MIN)
                }
            }
        }
    }

    pub fn get(self) -> usize {
        self.0
    }
}

/// Minimum number of slots per role. Entries keep their declared order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoleQuota(Vec<(Role, usize)>);

impl RoleQuota {
    pub fn new(entries: impl IntoIterator<Item = (Role, usize)>) -> Self {
        Self(entries.into_iter().collect())
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// The quota as a multiset: each role repeated by its count.
    pub fn expand(&self) -> Vec<Role> {
        self.0
            .iter()
            .flat_map(|(role, count)| std::iter::repeat_n(*role, *count))
            .collect()
    }

    pub fn total(&self) -> usize {
        self.0.iter().map(|(_, count)| count).sum()
    }

    pub fn entries(&self) -> &[(Role, usize)] {
        &self.0
    }
}

#[cfg(test)]
impl RoleQuota {
    pub fn get(&self, role: Role) -> usize {
        self.0
            .iter()
            .filter(|(r, _)| *r == role)
            .map(|(_, count)| count)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Which quota table the Open mode uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenQuota {
    /// Two of each role
    #[default]
    Balanced,
    /// Two tanks, six damage, six supports
    Weighted,
}

/// Slot counts and quotas for every mode.
#[derive(Debug, Clone)]
pub struct ModeTable {
    open_quota: OpenQuota,
}

impl ModeTable {
    pub fn new(open_quota: OpenQuota) -> Self {
        Self { open_quota }
    }

    pub fn quota(&self, mode: Mode) -> RoleQuota {
        match mode {
            Mode::FiveVFive | Mode::Stadium => {
                RoleQuota::new([(Role::Tank, 1), (Role::Damage, 2), (Role::Support, 2)])
            }
            Mode::Open => match self.open_quota {
                OpenQuota::Balanced => {
                    RoleQuota::new([(Role::Tank, 2), (Role::Damage, 2), (Role::Support, 2)])
                }
                OpenQuota::Weighted => {
                    RoleQuota::new([(Role::Tank, 2), (Role::Damage, 6), (Role::Support, 6)])
                }
            },
            Mode::Custom => RoleQuota::empty(),
        }
    }

    /// Quota for a resolved selection; unknown modes have none.
    pub fn quota_for(&self, selection: &ModeSelection) -> RoleQuota {
        selection
            .mode
            .map(|mode| self.quota(mode))
            .unwrap_or_default()
    }
}

impl Default for ModeTable {
    fn default() -> Self {
        Self::new(OpenQuota::default())
    }
}

/// A mode choice resolved against user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeSelection {
    /// `None` when the requested mode name was not recognised
    pub mode: Option<Mode>,
    pub slot_count: SlotCount,
}

impl ModeSelection {
    pub fn new(mode: Mode, requested: Option<SlotCount>) -> Self {
        let slot_count = mode
            .fixed_slot_count()
            .or(requested)
            .unwrap_or(SlotCount::CUSTOM_DEFAULT);
        Self {
            mode: Some(mode),
            slot_count,
        }
    }

    /// Resolve a mode name. Unknown names fall back to fully random roles.
    pub fn resolve(name: &str, requested: Option<SlotCount>) -> Self {
        match Mode::from_str(name.trim()) {
            Ok(mode) => Self::new(mode, requested),
            Err(_) => {
                warn!(mode = %name, "Unknown mode, using unconstrained roles");
                Self {
                    mode: None,
                    slot_count: requested.unwrap_or(SlotCount::CUSTOM_DEFAULT),
                }
            }
        }
    }

    /// Display name of the selected mode
    pub fn name(&self) -> String {
        self.mode
            .map(|mode| mode.to_string())
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

/// Heroes eligible for a role under a mode, in roster order.
pub fn character_pool(mode: Option<Mode>, role: Role) -> Vec<&'static str> {
    let full = roster(role);
    match mode {
        Some(mode) if mode.is_restricted() => full
            .iter()
            .copied()
            .filter(|hero| STADIUM_CHARACTERS.contains(hero))
            .collect(),
        _ => full.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_names() {
        assert_eq!(Mode::FiveVFive.to_string(), "5v5");
        assert_eq!(Mode::from_str("5v5").unwrap(), Mode::FiveVFive);
        assert_eq!(Mode::from_str("stadium").unwrap(), Mode::Stadium);
        assert!(Mode::from_str("Deathmatch").is_err());
    }

    #[test]
    fn test_slot_count_clamping() {
        assert_eq!(SlotCount::clamped(0).get(), 1);
        assert_eq!(SlotCount::clamped(15).get(), 10);
        assert_eq!(SlotCount::clamped(-4).get(), 1);
        assert_eq!(SlotCount::clamped(7).get(), 7);
    }

    #[test]
    fn test_slot_count_parse_lenient() {
        assert_eq!(SlotCount::parse_lenient("abc").get(), 1);
        assert_eq!(SlotCount::parse_lenient("0").get(), 1);
        assert_eq!(SlotCount::parse_lenient("15").get(), 10);
        assert_eq!(SlotCount::parse_lenient(" 4 ").get(), 4);
        assert_eq!(SlotCount::parse_lenient("").get(), 1);
    }

    #[test]
    fn test_slot_count_parse_oversized_integers() {
        assert_eq!(SlotCount::parse_lenient("99999999999999999999").get(), 10);
        assert_eq!(SlotCount::parse_lenient("+99999999999999999999").get(), 10);
        assert_eq!(SlotCount::parse_lenient("-99999999999999999999").get(), 1);
        assert_eq!(SlotCount::parse_lenient("9999999999999999999x").get(), 1);
        assert_eq!(SlotCount::parse_lenient("+").get(), 1);
    }

    #[test]
    fn test_slot_count_from_float() {
        assert_eq!(SlotCount::clamped_f64(3.5).get(), 3);
        assert_eq!(SlotCount::clamped_f64(1e20).get(), 10);
        assert_eq!(SlotCount::clamped_f64(-2.5).get(), 1);
        assert_eq!(SlotCount::clamped_f64(0.4).get(), 1);
        assert_eq!(SlotCount::clamped_f64(f64::NAN).get(), 1);
    }

    #[test]
    fn test_slot_count_new_checks_range() {
        assert_eq!(SlotCount::new(4).map(SlotCount::get), Some(4));
        assert_eq!(SlotCount::new(0), None);
        assert_eq!(SlotCount::new(11), None);
    }

    #[test]
    fn test_quota_expand() {
        let table = ModeTable::default();
        let quota = table.quota(Mode::FiveVFive);
        assert_eq!(
            quota.expand(),
            vec![Role::Tank, Role::Damage, Role::Damage, Role::Support, Role::Support]
        );
        assert_eq!(quota.total(), 5);
        assert!(table.quota(Mode::Custom).is_empty());
    }

    #[test]
    fn test_open_quota_variants() {
        let balanced = ModeTable::new(OpenQuota::Balanced).quota(Mode::Open);
        assert_eq!(balanced.total(), 6);
        assert_eq!(balanced.get(Role::Tank), 2);

        let weighted = ModeTable::new(OpenQuota::Weighted).quota(Mode::Open);
        assert_eq!(weighted.total(), 14);
        assert_eq!(weighted.get(Role::Support), 6);
    }

    #[test]
    fn test_selection_fixed_modes_ignore_count() {
        let sel = ModeSelection::resolve("Open", Some(SlotCount::clamped(2)));
        assert_eq!(sel.mode, Some(Mode::Open));
        assert_eq!(sel.slot_count.get(), 6);
    }

    #[test]
    fn test_selection_custom_uses_count() {
        let sel = ModeSelection::resolve("Custom", Some(SlotCount::clamped(8)));
        assert_eq!(sel.slot_count.get(), 8);

        let sel = ModeSelection::resolve("Custom", None);
        assert_eq!(sel.slot_count, SlotCount::CUSTOM_DEFAULT);
    }

    #[test]
    fn test_selection_unknown_mode() {
        let sel = ModeSelection::resolve("Capture the Flag", Some(SlotCount::clamped(3)));
        assert_eq!(sel.mode, None);
        assert_eq!(sel.slot_count.get(), 3);
        assert!(ModeTable::default().quota_for(&sel).is_empty());
        assert_eq!(sel.name(), "Unknown");
    }

    #[test]
    fn test_stadium_pool_is_restricted() {
        let tanks = character_pool(Some(Mode::Stadium), Role::Tank);
        assert_eq!(
            tanks,
            vec!["D.Va", "Junker Queen", "Orisa", "Reinhardt", "Zarya"]
        );
        assert_eq!(character_pool(Some(Mode::Stadium), Role::Damage).len(), 7);
        assert_eq!(character_pool(Some(Mode::Open), Role::Tank).len(), 11);
        assert_eq!(character_pool(None, Role::Support).len(), 11);
    }
}
