use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::info;

use crate::config::ServiceConfig;
use crate::portraits::PortraitStore;
use crate::randomizer::{AssignmentState, ModeSelection, ModeTable, Role};

/// Main service coordinator
pub struct RandomizerService {
    pub modes: ModeTable,
    pub portraits: PortraitStore,
    rng: Mutex<StdRng>,
}

impl RandomizerService {
    /// Create a new service instance
    pub fn new(config: &ServiceConfig) -> Self {
        let rng = match config.randomizer.seed {
            Some(seed) => {
                info!(seed, "Using fixed RNG seed");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };

        info!(
            open_quota = ?config.randomizer.open_quota,
            portrait_dir = %config.assets.portrait_dir.display(),
            "Randomizer initialized"
        );

        Self {
            modes: ModeTable::new(config.randomizer.open_quota),
            portraits: PortraitStore::new(
                config.assets.portrait_dir.clone(),
                config.assets.portrait_size,
            ),
            rng: Mutex::new(rng),
        }
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        // The generator has no invariants a panic could break
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Roll fresh roles and heroes for a selection.
    pub fn generate(&self, selection: ModeSelection) -> AssignmentState {
        let state = AssignmentState::generate(selection, &self.modes, &mut *self.rng());
        info!(
            mode = %selection.name(),
            slots = state.slots.len(),
            "Generated lobby"
        );
        state
    }

    /// Roll heroes for roles chosen earlier.
    pub fn reroll_characters(&self, selection: ModeSelection, roles: Vec<Role>) -> AssignmentState {
        let state = AssignmentState::with_roles(selection, roles, &mut *self.rng());
        info!(
            mode = %selection.name(),
            slots = state.slots.len(),
            "Rerolled heroes"
        );
        state
    }
}
