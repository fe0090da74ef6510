use std::fmt;

use sha2::{Digest, Sha256};

use crate::error::RewardsError;

pub const DBC_DECIMALS: u8 = 6;
pub const DBC_MULTIPLIER: u64 = 1_000_000;
/// Reward paid to the referrer per successful referral, before tier weighting.
pub const REFERRAL_REWARD_DBC: u64 = 100;

const CODE_PREFIX: &str = "DBC";
const CODE_STEM_LEN: usize = 4;
const CODE_DIGEST_LEN: usize = 6;
const MIN_HANDLE_LEN: usize = 3;
const MAX_HANDLE_LEN: usize = 32;

pub fn dbc_to_base(dbc: u64) -> Option<u64> {
    dbc.checked_mul(DBC_MULTIPLIER)
}

/// Truncates fractional DBC.
pub fn base_to_dbc(base: u64) -> u64 {
    base / DBC_MULTIPLIER
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReferralCode(String);

impl ReferralCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReferralCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Formats the shareable referral code for a member handle.
///
/// The code is `DBC-<STEM>-<DIGEST>`: the first four alphanumerics of the
/// handle (padded with `X`) and a short SHA-256 digest of the lowercased
/// handle. The same handle always yields the same code regardless of case or
/// surrounding whitespace.
pub fn referral_code(handle: &str) -> Result<ReferralCode, RewardsError> {
    let handle = handle.trim();
    let len = handle.chars().count();
    if !(MIN_HANDLE_LEN..=MAX_HANDLE_LEN).contains(&len) {
        return Err(RewardsError::HandleLength { len });
    }

    if let Some(ch) = handle
        .chars()
        .find(|ch| !(ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-')))
    {
        return Err(RewardsError::HandleCharacter { ch });
    }

    let mut stem: String = handle
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(CODE_STEM_LEN)
        .map(|ch| ch.to_ascii_uppercase())
        .collect();
    while stem.len() < CODE_STEM_LEN {
        stem.push('X');
    }

    let digest = hex::encode(Sha256::digest(handle.to_ascii_lowercase().as_bytes()));
    let digest = digest[..CODE_DIGEST_LEN].to_ascii_uppercase();

    Ok(ReferralCode(format!("{CODE_PREFIX}-{stem}-{digest}")))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReferralTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierProgress {
    pub tier: ReferralTier,
    pub next: Option<ReferralTier>,
    /// Referrals still needed to reach `next`; zero at the top tier.
    pub remaining: u64,
}

impl ReferralTier {
    pub const LADDER: [ReferralTier; 4] = [
        ReferralTier::Bronze,
        ReferralTier::Silver,
        ReferralTier::Gold,
        ReferralTier::Platinum,
    ];

    pub fn from_referrals(referrals: u64) -> Self {
        match referrals {
            0..=24 => ReferralTier::Bronze,
            25..=99 => ReferralTier::Silver,
            100..=499 => ReferralTier::Gold,
            _ => ReferralTier::Platinum,
        }
    }

    pub fn min_referrals(self) -> u64 {
        match self {
            ReferralTier::Bronze => 0,
            ReferralTier::Silver => 25,
            ReferralTier::Gold => 100,
            ReferralTier::Platinum => 500,
        }
    }

    pub fn weight(self) -> u64 {
        match self {
            ReferralTier::Bronze => 1,
            ReferralTier::Silver => 2,
            ReferralTier::Gold => 3,
            ReferralTier::Platinum => 5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ReferralTier::Bronze => "Bronze",
            ReferralTier::Silver => "Silver",
            ReferralTier::Gold => "Gold",
            ReferralTier::Platinum => "Platinum",
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            ReferralTier::Bronze => Some(ReferralTier::Silver),
            ReferralTier::Silver => Some(ReferralTier::Gold),
            ReferralTier::Gold => Some(ReferralTier::Platinum),
            ReferralTier::Platinum => None,
        }
    }

    pub fn progress(referrals: u64) -> TierProgress {
        let tier = Self::from_referrals(referrals);
        let next = tier.next();
        let remaining = next
            .map(|next| next.min_referrals().saturating_sub(referrals))
            .unwrap_or(0);

        TierProgress {
            tier,
            next,
            remaining,
        }
    }
}

/// Total referral reward in base units for `referrals` successful referrals,
/// weighted by the tier those referrals reach.
pub fn referral_reward(referrals: u64) -> Result<u64, RewardsError> {
    let weight = ReferralTier::from_referrals(referrals).weight();
    referrals
        .checked_mul(REFERRAL_REWARD_DBC)
        .and_then(|dbc| dbc.checked_mul(weight))
        .and_then(dbc_to_base)
        .ok_or(RewardsError::Overflow { referrals })
}
