//! Derived-stat rule table.
//!
//! Recording a stat may imply others. The implications are data, not
//! control flow: each rule names a trigger, the extra counters credited to
//! the same player, and the counters credited to the designated setter.
//!
//! | Trigger              | Actor also gets | Setter gets          |
//! |----------------------|-----------------|----------------------|
//! | Kill                 | Hit Attempt     | Assist, Set Attempt  |
//! | Hit Error            | Hit Attempt     |                      |
//! | Assist, Set Error    | Set Attempt     |                      |
//!
//! Hit Attempt is its own trigger in the attempt family but carries no rule,
//! so a recorded attempt is counted once. Setter credit applies only when a
//! setter is designated and is not the actor.

use smallvec::SmallVec;

use super::kind::StatKind;
use crate::core::PlayerId;

/// One derivation rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DerivationRule {
    pub trigger: StatKind,
    pub actor: &'static [StatKind],
    pub setter: &'static [StatKind],
}

/// The rule table.
pub const RULES: &[DerivationRule] = &[
    DerivationRule {
        trigger: StatKind::Kill,
        actor: &[StatKind::HitAttempt],
        setter: &[StatKind::Assist, StatKind::SetAttempt],
    },
    DerivationRule {
        trigger: StatKind::HitError,
        actor: &[StatKind::HitAttempt],
        setter: &[],
    },
    DerivationRule {
        trigger: StatKind::Assist,
        actor: &[StatKind::SetAttempt],
        setter: &[],
    },
    DerivationRule {
        trigger: StatKind::SetError,
        actor: &[StatKind::SetAttempt],
        setter: &[],
    },
];

/// A single counter increment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Increment {
    pub player: PlayerId,
    pub stat: StatKind,
}

impl Increment {
    #[must_use]
    pub const fn new(player: PlayerId, stat: StatKind) -> Self {
        Self { player, stat }
    }
}

/// Increments are at most four long (Kill with a setter).
pub type Increments = SmallVec<[Increment; 4]>;

/// Rule for a trigger, if one exists.
#[must_use]
pub fn rule_for(trigger: StatKind) -> Option<&'static DerivationRule> {
    RULES.iter().find(|r| r.trigger == trigger)
}

/// Expand a raw stat into every increment it implies, raw stat first.
#[must_use]
pub fn derive(player: PlayerId, stat: StatKind, setter: Option<PlayerId>) -> Increments {
    let mut out = Increments::new();
    out.push(Increment::new(player, stat));

    if let Some(rule) = rule_for(stat) {
        out.extend(rule.actor.iter().map(|&s| Increment::new(player, s)));

        if let Some(setter) = setter.filter(|&s| s != player) {
            out.extend(rule.setter.iter().map(|&s| Increment::new(setter, s)));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const HITTER: PlayerId = PlayerId(1);
    const SETTER: PlayerId = PlayerId(2);

    fn stats(incs: &Increments) -> Vec<(PlayerId, StatKind)> {
        incs.iter().map(|i| (i.player, i.stat)).collect()
    }

    #[test]
    fn test_kill_with_setter() {
        let incs = derive(HITTER, StatKind::Kill, Some(SETTER));
        assert_eq!(
            stats(&incs),
            vec![
                (HITTER, StatKind::Kill),
                (HITTER, StatKind::HitAttempt),
                (SETTER, StatKind::Assist),
                (SETTER, StatKind::SetAttempt),
            ]
        );
        assert!(!incs.spilled());
    }

    #[test]
    fn test_setter_kill_gets_no_self_assist() {
        let incs = derive(SETTER, StatKind::Kill, Some(SETTER));
        assert_eq!(
            stats(&incs),
            vec![(SETTER, StatKind::Kill), (SETTER, StatKind::HitAttempt)]
        );
    }

    #[test]
    fn test_hit_attempt_not_double_counted() {
        let incs = derive(HITTER, StatKind::HitAttempt, Some(SETTER));
        assert_eq!(stats(&incs), vec![(HITTER, StatKind::HitAttempt)]);
    }

    #[test]
    fn test_set_family() {
        for trigger in [StatKind::Assist, StatKind::SetError] {
            let incs = derive(SETTER, trigger, None);
            assert_eq!(stats(&incs), vec![(SETTER, trigger), (SETTER, StatKind::SetAttempt)]);
        }
    }

    #[test]
    fn test_untriggered_stats_are_raw() {
        for stat in [StatKind::Dig, StatKind::Block, StatKind::Ace, StatKind::ReceptionError] {
            assert_eq!(derive(HITTER, stat, Some(SETTER)).len(), 1);
        }
    }

    #[test]
    fn test_one_rule_per_trigger() {
        for rule in RULES {
            assert_eq!(RULES.iter().filter(|r| r.trigger == rule.trigger).count(), 1);
        }
    }
}
