//! Post-launch actions that release deferred airdrop claims.

use serde::{Deserialize, Serialize};

/// An on-chain action a recipient performs to claim part of a grant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionType {
    Deposit,
    Swap,
    LiquidStake,
    Vote,
}

impl ConditionType {
    /// Every condition, in the order airdrops list them.
    pub const ALL: [ConditionType; 4] = [
        ConditionType::Deposit,
        ConditionType::Swap,
        ConditionType::LiquidStake,
        ConditionType::Vote,
    ];
}
