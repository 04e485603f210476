//! Score ledger and score-gated abilities

use serde::{Deserialize, Serialize};

/// A score-gated player action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    ReflectBeam,
    Emp,
    GravityField,
    MultiBeam,
}

impl Ability {
    /// Balance required before the ability may be used
    pub fn min_score(&self) -> u64 {
        match self {
            Ability::ReflectBeam => 5,
            Ability::Emp => 20,
            Ability::GravityField => 200,
            Ability::MultiBeam => 100,
        }
    }

    /// Amount deducted on activation
    pub fn cost(&self) -> u64 {
        match self {
            Ability::ReflectBeam => 5,
            Ability::Emp => 20,
            Ability::GravityField => 200,
            // Unlocked by score, free to use
            Ability::MultiBeam => 0,
        }
    }
}

/// The single score counter. It both measures progress and pays for abilities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLedger {
    balance: u64,
}

impl ScoreLedger {
    pub fn new() -> Self {
        Self { balance: 0 }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn credit(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
    }

    /// Deduct `amount` if the balance covers it. Leaves the balance untouched otherwise.
    pub fn try_spend(&mut self, amount: u64) -> bool {
        if self.balance < amount {
            return false;
        }
        self.balance -= amount;
        true
    }

    /// Check the ability's gate and pay its cost in one step
    pub fn try_activate(&mut self, ability: Ability) -> bool {
        if self.balance < ability.min_score() {
            return false;
        }
        self.try_spend(ability.cost())
    }
}
