use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::RewardsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AchievementCategory {
    Community,
    Research,
    Validation,
    Referral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: AchievementCategory,
    /// Progress count at which the achievement unlocks.
    pub target: u32,
}

pub const ACHIEVEMENTS: [Achievement; 8] = [
    Achievement {
        id: "first-gm",
        title: "gm, Partner",
        description: "Authenticate with the club terminal.",
        category: AchievementCategory::Community,
        target: 1,
    },
    Achievement {
        id: "regular",
        title: "Regular at the Motel",
        description: "Check in on seven different days.",
        category: AchievementCategory::Community,
        target: 7,
    },
    Achievement {
        id: "first-case-study",
        title: "Patient Zero",
        description: "Submit your first case study.",
        category: AchievementCategory::Research,
        target: 1,
    },
    Achievement {
        id: "researcher",
        title: "Lab Rat",
        description: "Submit ten case studies.",
        category: AchievementCategory::Research,
        target: 10,
    },
    Achievement {
        id: "first-validation",
        title: "Second Opinion",
        description: "Validate a case study.",
        category: AchievementCategory::Validation,
        target: 1,
    },
    Achievement {
        id: "validator",
        title: "Peer Reviewer",
        description: "Reach the Silver validator tier with 25 validations.",
        category: AchievementCategory::Validation,
        target: 25,
    },
    Achievement {
        id: "first-referral",
        title: "Bring a Friend",
        description: "Refer a new member.",
        category: AchievementCategory::Referral,
        target: 1,
    },
    Achievement {
        id: "recruiter",
        title: "Membership Drive",
        description: "Refer 25 members.",
        category: AchievementCategory::Referral,
        target: 25,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementStatus {
    pub achievement: &'static Achievement,
    pub progress: u32,
}

impl AchievementStatus {
    pub fn is_unlocked(&self) -> bool {
        self.progress >= self.achievement.target
    }
}

/// Per-member progress over the static achievement table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AchievementBoard {
    progress: HashMap<&'static str, u32>,
}

fn find_achievement(id: &str) -> Option<&'static Achievement> {
    ACHIEVEMENTS.iter().find(|achievement| achievement.id == id)
}

impl AchievementBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` to an achievement's progress, saturating at its target.
    ///
    /// Returns the achievement when this call is the one that unlocked it.
    pub fn record_progress(
        &mut self,
        id: &str,
        amount: u32,
    ) -> Result<Option<&'static Achievement>, RewardsError> {
        let achievement = find_achievement(id).ok_or_else(|| RewardsError::UnknownAchievement {
            id: id.to_string(),
        })?;

        let entry = self.progress.entry(achievement.id).or_insert(0);
        let was_unlocked = *entry >= achievement.target;
        *entry = entry.saturating_add(amount).min(achievement.target);

        if !was_unlocked && *entry >= achievement.target {
            Ok(Some(achievement))
        } else {
            Ok(None)
        }
    }

    pub fn status(&self, id: &str) -> Option<AchievementStatus> {
        find_achievement(id).map(|achievement| self.status_of(achievement))
    }

    fn status_of(&self, achievement: &'static Achievement) -> AchievementStatus {
        AchievementStatus {
            achievement,
            progress: self.progress.get(achievement.id).copied().unwrap_or(0),
        }
    }

    /// All achievements in table order.
    pub fn statuses(&self) -> Vec<AchievementStatus> {
        ACHIEVEMENTS
            .iter()
            .map(|achievement| self.status_of(achievement))
            .collect()
    }

    pub fn unlocked(&self) -> Vec<AchievementStatus> {
        self.statuses()
            .into_iter()
            .filter(AchievementStatus::is_unlocked)
            .collect()
    }

    pub fn locked(&self) -> Vec<AchievementStatus> {
        self.statuses()
            .into_iter()
            .filter(|status| !status.is_unlocked())
            .collect()
    }

    pub fn by_category(&self, category: AchievementCategory) -> Vec<AchievementStatus> {
        self.statuses()
            .into_iter()
            .filter(|status| status.achievement.category == category)
            .collect()
    }

    /// Share of unlocked achievements, rounded down.
    pub fn completion_percent(&self) -> u8 {
        let unlocked = self.unlocked().len();
        (unlocked * 100 / ACHIEVEMENTS.len()) as u8
    }

    /// Unlocks one random locked achievement. `None` once everything is unlocked.
    pub fn simulate_unlock<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Option<&'static Achievement> {
        let locked = self.locked();
        let picked = locked.choose(rng)?.achievement;
        self.progress.insert(picked.id, picked.target);
        Some(picked)
    }
}
