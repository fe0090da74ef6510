use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewardsError {
    #[error("referral handle must be 3 to 32 characters, got {len}")]
    HandleLength { len: usize },

    #[error("referral handle contains unsupported character {ch:?}")]
    HandleCharacter { ch: char },

    #[error("reward calculation overflowed for {referrals} referrals")]
    Overflow { referrals: u64 },

    #[error("unknown achievement '{id}'")]
    UnknownAchievement { id: String },
}
