//! Configuration issues.
//!
//! Nothing in the simulation is fatal. A missing piece of configuration
//! disables the feature that needs it and is reported once.

use std::fmt;

use bevy::platform::collections::HashSet;
use bevy::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConfigIssue {
    NoSpawnPoints,
    EmptyLoadout,
    EmptyCampaign,
    EnemyWithoutHealth(String),
    CampaignTooShort { total: u32, needed: u32 },
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSpawnPoints => write!(f, "no spawn points configured; enemy emission skipped"),
            Self::EmptyLoadout => write!(f, "weapon has an empty loadout; firing disabled"),
            Self::EmptyCampaign => write!(f, "campaign has no waves"),
            Self::EnemyWithoutHealth(name) => {
                write!(f, "enemy `{name}` has no Health; it stays inert")
            }
            Self::CampaignTooShort { total, needed } => write!(
                f,
                "campaign spawns {total} enemies but {needed} kills are needed to win"
            ),
        }
    }
}

/// Issues already logged this process.
#[derive(Resource, Debug, Default)]
pub struct ReportedIssues {
    seen: HashSet<ConfigIssue>,
}

impl ReportedIssues {
    /// Log `issue` the first time it is seen. Returns `true` if it was new.
    pub fn report(&mut self, issue: ConfigIssue) -> bool {
        if self.seen.contains(&issue) {
            return false;
        }
        warn!("{issue}");
        self.seen.insert(issue);
        true
    }

    #[inline]
    pub fn contains(&self, issue: &ConfigIssue) -> bool {
        self.seen.contains(issue)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_each_issue_once() {
        let mut issues = ReportedIssues::default();
        assert!(issues.report(ConfigIssue::NoSpawnPoints));
        assert!(!issues.report(ConfigIssue::NoSpawnPoints));
        assert!(issues.report(ConfigIssue::EnemyWithoutHealth("Zombie".into())));
        assert!(!issues.report(ConfigIssue::EnemyWithoutHealth("Zombie".into())));
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn display_mentions_numbers() {
        let s = ConfigIssue::CampaignTooShort { total: 4, needed: 10 }.to_string();
        assert!(s.contains('4') && s.contains("10"));
    }
}
