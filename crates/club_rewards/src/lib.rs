//! Community rewards for club members: referral codes, the referral reward
//! ladder, and the achievement board.
//!
//! Token amounts are tracked in whole DBC and in base units (6 decimals).

mod achievements;
mod error;
mod referral;

pub use achievements::{
    Achievement, AchievementBoard, AchievementCategory, AchievementStatus, ACHIEVEMENTS,
};
pub use error::RewardsError;
pub use referral::{
    base_to_dbc, dbc_to_base, referral_code, referral_reward, ReferralCode, ReferralTier,
    TierProgress, DBC_DECIMALS, DBC_MULTIPLIER, REFERRAL_REWARD_DBC,
};
