//! Fraud labels and the displayed primary label.

use serde::{Deserialize, Serialize};

/// Closed set of detector-assigned label tags.
///
/// Each detector invocation unions its tag into the account's label set;
/// the displayed `fraud_type` is derived from the full set via
/// [`PrimaryLabel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FraudLabel {
    /// Endpoint of a cross-border transaction touching a high-risk
    /// jurisdiction.
    OffshoreRouting,
    /// Fan-out hub with non-uniform amounts.
    SmurfBoss,
    /// Fan-out hub with uniform amounts.
    SmurfBossUniform,
    /// Fan-out spoke.
    SmurfMule,
    /// Fan-in hub with non-uniform amounts.
    SmurfTarget,
    /// Fan-in hub with uniform amounts.
    SmurfTargetUniform,
    /// Fan-in spoke.
    SmurfSender,
    /// Member of a directed cycle.
    Cycle,
    /// Member of a layered pass-through chain.
    Layered,
}

impl FraudLabel {
    /// Wire representation of the label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OffshoreRouting => "OFFSHORE_ROUTING",
            Self::SmurfBoss => "SMURF_BOSS",
            Self::SmurfBossUniform => "SMURF_BOSS_UNIFORM",
            Self::SmurfMule => "SMURF_MULE",
            Self::SmurfTarget => "SMURF_TARGET",
            Self::SmurfTargetUniform => "SMURF_TARGET_UNIFORM",
            Self::SmurfSender => "SMURF_SENDER",
            Self::Cycle => "CYCLE",
            Self::Layered => "LAYERED",
        }
    }
}

impl std::fmt::Display for FraudLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single label displayed for an account in the report.
///
/// Derived from the account's label set: the sole label when exactly one,
/// `Overlapping` when several. The centrality pass may override either with
/// a shadow-boss variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryLabel {
    /// No detector flagged the account.
    Normal,
    /// Exactly one label in the set.
    Single(FraudLabel),
    /// More than one label in the set.
    Overlapping,
    /// Shadow boss whose primary label would have been `Normal`.
    ShadowBoss,
    /// Shadow boss that was already flagged by another detector.
    ShadowBossOverlap,
}

impl PrimaryLabel {
    /// Derive the displayed label from a label set.
    pub fn from_labels<'a>(mut labels: impl Iterator<Item = &'a FraudLabel>) -> Self {
        match (labels.next(), labels.next()) {
            (None, _) => Self::Normal,
            (Some(label), None) => Self::Single(*label),
            (Some(_), Some(_)) => Self::Overlapping,
        }
    }

    /// Apply the shadow-boss override.
    pub fn promote_to_shadow_boss(self) -> Self {
        match self {
            Self::Normal => Self::ShadowBoss,
            _ => Self::ShadowBossOverlap,
        }
    }

    /// Wire representation of the label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Single(label) => label.as_str(),
            Self::Overlapping => "OVERLAPPING_FRAUD",
            Self::ShadowBoss => "SHADOW_BOSS",
            Self::ShadowBossOverlap => "SHADOW_BOSS_OVERLAP",
        }
    }
}

impl Serialize for PrimaryLabel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_primary_label_from_set() {
        let empty = BTreeSet::new();
        assert_eq!(PrimaryLabel::from_labels(empty.iter()), PrimaryLabel::Normal);

        let single: BTreeSet<_> = [FraudLabel::Cycle].into_iter().collect();
        assert_eq!(
            PrimaryLabel::from_labels(single.iter()),
            PrimaryLabel::Single(FraudLabel::Cycle)
        );

        let multiple: BTreeSet<_> = [FraudLabel::Cycle, FraudLabel::SmurfBoss]
            .into_iter()
            .collect();
        assert_eq!(
            PrimaryLabel::from_labels(multiple.iter()),
            PrimaryLabel::Overlapping
        );
    }

    #[test]
    fn test_shadow_boss_promotion() {
        assert_eq!(
            PrimaryLabel::Normal.promote_to_shadow_boss(),
            PrimaryLabel::ShadowBoss
        );
        assert_eq!(
            PrimaryLabel::Single(FraudLabel::Layered).promote_to_shadow_boss(),
            PrimaryLabel::ShadowBossOverlap
        );
        assert_eq!(
            PrimaryLabel::Overlapping.promote_to_shadow_boss(),
            PrimaryLabel::ShadowBossOverlap
        );
    }

    #[test]
    fn test_wire_representation() {
        assert_eq!(FraudLabel::SmurfBossUniform.as_str(), "SMURF_BOSS_UNIFORM");
        assert_eq!(PrimaryLabel::Overlapping.as_str(), "OVERLAPPING_FRAUD");
        assert_eq!(
            serde_json::to_string(&FraudLabel::OffshoreRouting).unwrap(),
            "\"OFFSHORE_ROUTING\""
        );
        assert_eq!(
            serde_json::to_string(&PrimaryLabel::ShadowBoss).unwrap(),
            "\"SHADOW_BOSS\""
        );
    }
}
