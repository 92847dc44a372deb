//! Point engine: serve attribution, score, serve handoff and sideout rotation.

use crate::core::{PlayerId, Team};
use crate::lineup::Slot;
use crate::stats::{Action, Increment, StatKind};

use super::live::LiveState;

/// What happened when a point was awarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointOutcome {
    pub scoring_team: Team,

    /// Rotation credited in the rotation score table.
    pub rotation: u8,

    /// Player credited with a serve attempt, if any.
    pub serve_attempt: Option<PlayerId>,

    /// Home broke the opponent's serve and rotated.
    pub sideout: bool,
}

impl LiveState {
    /// Award one point.
    ///
    /// 1. The serve attempt goes to the slot-1 server when home was serving.
    ///    On a home sideout by kill, block or opponent error it goes to the
    ///    slot-2 player, who is about to rotate in to serve.
    /// 2. The rotation active at the moment of scoring is credited.
    /// 3. The scoring team takes the serve.
    /// 4. A home sideout rotates the lineup.
    pub fn award_point(&mut self, scoring_team: Team, reason: Action) -> PointOutcome {
        let serving_before = self.board.serving_team;
        let rotation = self.board.rotation;

        let serve_attempt = if serving_before == Some(Team::Home) {
            self.lineup.server()
        } else if scoring_team == Team::Home && reason.is_sideout_cause() {
            self.lineup.get(Slot::TWO)
        } else {
            None
        };
        if let Some(server) = serve_attempt {
            self.record_increments(&[Increment::new(server, StatKind::ServeAttempt)]);
        }

        if !self.rotation_scores.credit(rotation, scoring_team) {
            log::warn!("rotation {} out of range, point not added to rotation table", rotation);
        }
        self.board.add_point(scoring_team);

        let sideout = scoring_team == Team::Home && serving_before == Some(Team::Opponent);
        if sideout {
            self.rotate();
        }

        PointOutcome {
            scoring_team,
            rotation,
            serve_attempt,
            sideout,
        }
    }

    /// Rotate the lineup and advance the rotation number together.
    pub fn rotate(&mut self) {
        self.lineup.rotate();
        self.board.advance_rotation();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live(serving: Team) -> LiveState {
        let mut live = LiveState::new();
        for slot in Slot::ALL {
            live.lineup.set_slot(slot, Some(PlayerId(u64::from(slot.number()))));
        }
        live.board.serving_team = Some(serving);
        live
    }

    #[test]
    fn test_home_serve_point() {
        let mut live = live(Team::Home);
        let outcome = live.award_point(Team::Home, Action::Stat(StatKind::Ace));

        assert_eq!(outcome.serve_attempt, Some(PlayerId(1)));
        assert!(!outcome.sideout);
        assert_eq!(live.board.home_score, 1);
        assert_eq!(live.board.rotation, 1);
        assert_eq!(live.set_stats.get(PlayerId(1), StatKind::ServeAttempt), 1);
    }

    #[test]
    fn test_home_loses_serve() {
        let mut live = live(Team::Home);
        let outcome = live.award_point(Team::Opponent, Action::Stat(StatKind::ServeError));

        assert_eq!(outcome.serve_attempt, Some(PlayerId(1)));
        assert_eq!(live.board.serving_team, Some(Team::Opponent));
        assert_eq!(live.board.rotation, 1);
        assert_eq!(live.rotation_scores.get(1).opponent, 1);
    }

    #[test]
    fn test_sideout_credits_incoming_server_and_rotates() {
        let mut live = live(Team::Opponent);
        let outcome = live.award_point(Team::Home, Action::Stat(StatKind::Kill));

        assert!(outcome.sideout);
        assert_eq!(outcome.rotation, 1);
        assert_eq!(outcome.serve_attempt, Some(PlayerId(2)));
        assert_eq!(live.board.rotation, 2);
        assert_eq!(live.lineup.server(), Some(PlayerId(2)));
        assert_eq!(live.rotation_scores.get(1).home, 1);
        assert_eq!(live.rotation_scores.get(2).home, 0);
    }

    #[test]
    fn test_opponent_holds_serve() {
        let mut live = live(Team::Opponent);
        let outcome = live.award_point(Team::Opponent, Action::OpponentPoint);

        assert_eq!(outcome.serve_attempt, None);
        assert!(!outcome.sideout);
        assert_eq!(live.board.opponent_score, 1);
        assert_eq!(live.lineup.server(), Some(PlayerId(1)));
    }
}
