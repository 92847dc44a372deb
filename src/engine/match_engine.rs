//! Match engine: the single entry point for every scorer operation.
//!
//! ## Lifecycle
//!
//! ```text
//! PreMatch --start_match--> LineupSetup --start_set--> Playing
//!                                ^                        |
//!                                +-------end_set----------+--> Finished
//! ```
//!
//! ## Guarantees
//!
//! - Every operation validates fully before mutating. A rejected call
//!   leaves the match untouched, history included.
//! - Each successful in-set mutation pushes one snapshot, so `undo` steps
//!   back exactly one call. The two halves of a KWDA are separate calls.
//! - History never crosses a set boundary.

use im::Vector;

use crate::core::{
    IdRng, MatchConfig, MatchError, MatchId, MatchPhase, MatchResult, MatchState, Player,
    PlayerEntry, PlayerId, Roster, Team,
};
use crate::lineup::{Lineup, Slot};
use crate::stats::{derive, Action, Increment, RotationScores, StatKind, StatLine, StatRecord};
use crate::subs::SubstitutionLedger;

use super::history::History;
use super::live::{LiveState, PendingAction, PointLog};

/// Which stat scope to read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatScope {
    /// Current set only.
    Set,
    /// Whole match.
    Match,
}

/// Log a rejected operation and pass the error through.
fn rejected(operation: &'static str) -> impl FnOnce(MatchError) -> MatchError {
    move |err| {
        log::warn!("{} rejected: {}", operation, err);
        err
    }
}

/// Volleyball match engine for one tracked team.
///
/// ## Example
///
/// ```
/// use volley_stats::{MatchEngine, MatchConfig, PlayerEntry, Team, Action, StatKind};
/// use volley_stats::lineup::Slot;
///
/// let mut engine = MatchEngine::new(MatchConfig::default());
/// let roster: Vec<_> = (1..=6).map(|n| PlayerEntry::new(n, format!("Player {}", n))).collect();
/// engine.start_match(roster, "Friendly").unwrap();
///
/// let ids: Vec<_> = engine.roster().ids().collect();
/// for (slot, id) in Slot::ALL.into_iter().zip(ids.iter().copied()) {
///     engine.set_lineup_slot(slot, Some(id)).unwrap();
/// }
/// engine.start_set(Team::Home).unwrap();
///
/// let board = engine.record_stat(None, Action::Stat(StatKind::Ace)).unwrap();
/// assert_eq!(board.home_score, 1);
///
/// engine.undo().unwrap();
/// assert_eq!(engine.state().home_score, 0);
/// ```
#[derive(Clone, Debug)]
pub struct MatchEngine {
    config: MatchConfig,
    phase: MatchPhase,
    match_id: Option<MatchId>,
    match_name: String,
    roster: Roster,
    live: LiveState,
    history: History,
}

impl MatchEngine {
    /// Create an engine with no match loaded.
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            phase: MatchPhase::PreMatch,
            match_id: None,
            match_name: String::new(),
            roster: Roster::default(),
            live: LiveState::new(),
            history: History::new(),
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    #[must_use]
    pub fn match_id(&self) -> Option<&MatchId> {
        self.match_id.as_ref()
    }

    #[must_use]
    pub fn match_name(&self) -> &str {
        &self.match_name
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Scoreboard.
    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.live.board
    }

    /// Everything an undo snapshot captures.
    #[must_use]
    pub fn live(&self) -> &LiveState {
        &self.live
    }

    #[must_use]
    pub fn lineup(&self) -> &Lineup {
        &self.live.lineup
    }

    #[must_use]
    pub fn bench(&self) -> &Vector<PlayerId> {
        &self.live.bench
    }

    #[must_use]
    pub fn ledger(&self) -> &SubstitutionLedger {
        &self.live.ledger
    }

    #[must_use]
    pub fn point_log(&self) -> &PointLog {
        &self.live.point_log
    }

    #[must_use]
    pub fn rotation_scores(&self) -> &RotationScores {
        &self.live.rotation_scores
    }

    #[must_use]
    pub fn pending(&self) -> Option<PendingAction> {
        self.live.pending
    }

    #[must_use]
    pub fn stats(&self, scope: StatScope) -> &StatRecord {
        match scope {
            StatScope::Set => &self.live.set_stats,
            StatScope::Match => &self.live.match_stats,
        }
    }

    /// Team totals over the roster for a scope.
    #[must_use]
    pub fn team_totals(&self, scope: StatScope) -> StatLine {
        self.stats(scope).team_totals(self.roster.ids())
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    // === Match setup ===

    /// Start a new match, discarding any previous one.
    ///
    /// Assigns an opaque id to every roster entry and moves to lineup setup
    /// for set 1.
    pub fn start_match(
        &mut self,
        entries: Vec<PlayerEntry>,
        name: impl Into<String>,
    ) -> MatchResult<MatchState> {
        let name = name.into();
        Self::validate_entries(&entries, self.config.min_roster_size)
            .map_err(rejected("start_match"))?;

        let mut rng = IdRng::for_match(self.config.seed, &name);
        let players: Vec<Player> = entries
            .into_iter()
            .map(|e| Player {
                id: rng.next_player_id(),
                number: e.number,
                name: e.name,
            })
            .collect();
        let roster = Roster::new(players);

        let mut live = LiveState::new();
        live.match_stats = StatRecord::for_players(roster.ids());
        live.set_stats = StatRecord::for_players(roster.ids());

        self.match_id = Some(rng.next_match_id());
        self.match_name = name;
        self.roster = roster;
        self.live = live;
        self.history.clear();
        self.phase = MatchPhase::LineupSetup;

        log::info!(
            "match '{}' started with {} players",
            self.match_name,
            self.roster.len()
        );
        Ok(self.live.board)
    }

    fn validate_entries(entries: &[PlayerEntry], required: usize) -> MatchResult<()> {
        if entries.len() < required {
            return Err(MatchError::InsufficientRoster {
                required,
                supplied: entries.len(),
            });
        }
        let mut seen = rustc_hash::FxHashSet::default();
        for entry in entries {
            if !seen.insert(entry.number) {
                return Err(MatchError::DuplicateNumber(entry.number));
            }
        }
        Ok(())
    }

    /// Place a player in a slot, or clear it, during lineup setup.
    ///
    /// Clearing the setter's slot also clears the setter designation.
    pub fn set_lineup_slot(&mut self, slot: Slot, player: Option<PlayerId>) -> MatchResult<MatchState> {
        self.check_lineup_slot(slot, player)
            .map_err(rejected("set_lineup_slot"))?;

        let previous = self.live.lineup.get(slot);
        self.live.lineup.set_slot(slot, player);
        if previous.is_some() && previous != player && previous == self.live.lineup.setter() {
            self.live.lineup.set_setter(None);
        }
        self.live.board.bump_revision();
        log::debug!("slot {} set to {:?}", slot, player);
        Ok(self.live.board)
    }

    fn check_lineup_slot(&self, slot: Slot, player: Option<PlayerId>) -> MatchResult<()> {
        self.require_phase(MatchPhase::LineupSetup)?;
        let Some(id) = player else {
            return Ok(());
        };
        self.player(id)?;
        if self.live.lineup.libero() == Some(id) {
            return Err(MatchError::AlreadyOnCourt(id));
        }
        match self.live.lineup.slot_of(id) {
            Some(held) if held != slot => Err(MatchError::AlreadyOnCourt(id)),
            _ => Ok(()),
        }
    }

    /// Choose the libero, or `None` for no libero. The libero starts off court.
    pub fn select_libero(&mut self, player: Option<PlayerId>) -> MatchResult<MatchState> {
        self.check_libero(player).map_err(rejected("select_libero"))?;

        self.live.lineup.set_libero(player);
        self.live.board.bump_revision();
        log::debug!("libero set to {:?}", player);
        Ok(self.live.board)
    }

    fn check_libero(&self, player: Option<PlayerId>) -> MatchResult<()> {
        self.require_phase(MatchPhase::LineupSetup)?;
        if let Some(id) = player {
            self.player(id)?;
            if self.live.lineup.is_on_court(id) {
                return Err(MatchError::AlreadyOnCourt(id));
            }
        }
        Ok(())
    }

    /// Designate the setter for assist attribution. Must be on court.
    pub fn select_setter(&mut self, player: PlayerId) -> MatchResult<MatchState> {
        self.require_phase(MatchPhase::LineupSetup)
            .and_then(|()| self.player(player).map(|_| ()))
            .and_then(|()| {
                if self.live.lineup.is_on_court(player) {
                    Ok(())
                } else {
                    Err(MatchError::NotOnCourt(player))
                }
            })
            .map_err(rejected("select_setter"))?;

        self.live.lineup.set_setter(Some(player));
        self.live.board.bump_revision();
        log::debug!("setter set to {}", player);
        Ok(self.live.board)
    }

    /// Start the set with a full lineup and the given team serving.
    pub fn start_set(&mut self, serving: Team) -> MatchResult<MatchState> {
        self.require_phase(MatchPhase::LineupSetup)
            .and_then(|()| match self.live.lineup.first_empty() {
                Some(slot) => Err(MatchError::EmptySlot(slot)),
                None => Ok(()),
            })
            .map_err(rejected("start_set"))?;

        let lineup = &self.live.lineup;
        let bench: Vector<PlayerId> = self
            .roster
            .ids()
            .filter(|&id| !lineup.is_on_court(id) && lineup.libero() != Some(id))
            .collect();
        let starters: Vec<PlayerId> = lineup.occupants().map(|(_, p)| p).collect();

        self.live.bench = bench;
        self.live.ledger.record_groups_at_set_start(starters);
        self.live.set_stats = StatRecord::for_players(self.roster.ids());
        self.live.rotation_scores = RotationScores::new();
        self.live.point_log.clear();
        self.live.pending = None;

        let board = &mut self.live.board;
        board.home_score = 0;
        board.opponent_score = 0;
        board.home_subs = 0;
        board.serving_team = Some(serving);
        board.bump_revision();

        self.history.clear();
        self.phase = MatchPhase::Playing;

        log::info!(
            "set {} started, {} serving, rotation {}",
            self.live.board.current_set,
            serving,
            self.live.board.rotation
        );
        Ok(self.live.board)
    }

    // === In-set operations ===

    /// Record a scorer action.
    ///
    /// `player` names who is credited and must be on court or be the
    /// libero. Serving stats always go to the slot-1 server and team-level
    /// actions take no player, so `player` is ignored for those.
    pub fn record_stat(&mut self, player: Option<PlayerId>, action: Action) -> MatchResult<MatchState> {
        self.require_playing()
            .and_then(|()| self.require_no_pending())
            .map_err(rejected("record_stat"))?;

        let outcome = match action {
            Action::OpponentError | Action::OpponentPoint => {
                self.checkpoint();
                let outcome = action
                    .point_winner()
                    .map(|team| self.live.award_point(team, action));
                self.live.point_log.push(if action == Action::OpponentError {
                    "H: Opponent Error!"
                } else {
                    "O: Point Opponent"
                });
                outcome
            }
            Action::Kwda => {
                let attacker = self
                    .credited_player(player, action)
                    .map_err(rejected("record_stat"))?;
                let label = attacker.label();
                let attacker = attacker.id;

                self.checkpoint();
                self.live.record_increments(&[
                    Increment::new(attacker, StatKind::Kill),
                    Increment::new(attacker, StatKind::HitAttempt),
                ]);
                let outcome = self.live.award_point(Team::Home, action);
                self.live.point_log.push(format!("H: KWDA Kill by {}", label));
                self.live.pending = Some(PendingAction::AssistFor { attacker });
                Some(outcome)
            }
            Action::Stat(kind) => {
                let subject = self
                    .stat_subject(player, kind)
                    .map_err(rejected("record_stat"))?;
                let label = subject.label();
                let subject = subject.id;

                self.checkpoint();
                let increments = derive(subject, kind, self.live.lineup.setter());
                self.live.record_increments(&increments);

                let winner = action.point_winner();
                let outcome = winner.map(|team| self.live.award_point(team, action));
                let prefix = winner.unwrap_or(Team::Home).log_prefix();
                self.live.point_log.push(format!("{}: {} by {}", prefix, kind, label));
                outcome
            }
        };

        let board = &self.live.board;
        match outcome {
            Some(point) => log::debug!(
                "{} recorded, point to {}{}, serve attempt {:?}, score {}-{}, rotation {}",
                action,
                point.scoring_team,
                if point.sideout { " on a sideout" } else { "" },
                point.serve_attempt,
                board.home_score,
                board.opponent_score,
                board.rotation
            ),
            None => log::debug!("{} recorded, no point", action),
        }
        Ok(self.live.board)
    }

    /// Assign the assist for the pending KWDA kill.
    ///
    /// The assisting player must be on court or be the libero, and cannot be
    /// the attacker.
    pub fn record_kwda_assist(&mut self, player: PlayerId) -> MatchResult<MatchState> {
        let label = self
            .require_playing()
            .and_then(|()| self.assist_player(player))
            .map(Player::label)
            .map_err(rejected("record_kwda_assist"))?;

        self.checkpoint();
        self.live.record_increments(&[
            Increment::new(player, StatKind::Assist),
            Increment::new(player, StatKind::SetAttempt),
        ]);
        self.live.point_log.push(format!("H: Assist by {}", label));
        self.live.pending = None;

        log::debug!("KWDA assist credited to {}", label);
        Ok(self.live.board)
    }

    fn assist_player(&self, player: PlayerId) -> MatchResult<&Player> {
        let Some(PendingAction::AssistFor { attacker }) = self.live.pending else {
            return Err(MatchError::NoPendingAssist);
        };
        if player == attacker {
            return Err(MatchError::SelfAssist(player));
        }
        self.player_in_play(player)
    }

    /// Replace the player in `slot`.
    pub fn substitute(
        &mut self,
        slot: Slot,
        player_out: PlayerId,
        player_in: PlayerId,
    ) -> MatchResult<MatchState> {
        self.check_substitution(slot, player_out, player_in)
            .map_err(rejected("substitute"))?;

        self.checkpoint();
        self.live.lineup.set_slot(slot, Some(player_in));
        let mut bench: Vector<PlayerId> = self
            .live
            .bench
            .iter()
            .copied()
            .filter(|&p| p != player_in)
            .collect();
        // The libero leaves the court to their own seat, not the bench.
        if self.live.lineup.libero() != Some(player_out) {
            bench.push_back(player_out);
        }
        self.live.bench = bench;
        self.live.ledger.apply(player_out, player_in);
        self.live.board.home_subs += 1;

        log::debug!(
            "substitution in slot {}: {} for {}, {} subs this set",
            slot,
            player_in,
            player_out,
            self.live.board.home_subs
        );
        Ok(self.live.board)
    }

    fn check_substitution(&self, slot: Slot, player_out: PlayerId, player_in: PlayerId) -> MatchResult<()> {
        self.require_playing()?;
        self.require_no_pending()?;

        let occupant = self.live.lineup.get(slot).ok_or(MatchError::EmptySlot(slot))?;
        if occupant != player_out {
            return Err(MatchError::PlayerNotInSlot {
                player: player_out,
                slot,
            });
        }
        self.player(player_in)?;
        if self.live.lineup.is_on_court(player_in) {
            return Err(MatchError::AlreadyOnCourt(player_in));
        }
        self.live.ledger.validate(player_out, player_in)
    }

    /// Close the current set.
    ///
    /// The team ahead on points takes the set (ties go to the opponent).
    /// Reaching `sets_to_win` finishes the match; otherwise the board is
    /// reset for the next set and the match returns to lineup setup.
    pub fn end_set(&mut self) -> MatchResult<MatchState> {
        self.require_playing()
            .and_then(|()| self.require_no_pending())
            .map_err(rejected("end_set"))?;

        let winner = self.live.board.set_leader();
        self.live.board.add_set(winner);
        self.live.board.bump_revision();
        self.history.clear();

        if self.live.board.sets_won(winner) >= self.config.sets_to_win {
            self.phase = MatchPhase::Finished;
            log::info!(
                "match finished, {} wins {}-{}",
                winner,
                self.live.board.home_sets_won,
                self.live.board.opponent_sets_won
            );
            return Ok(self.live.board);
        }

        log::info!(
            "set {} to {} ({}-{})",
            self.live.board.current_set,
            winner,
            self.live.board.home_score,
            self.live.board.opponent_score
        );
        self.live.board.next_set();
        self.live.lineup.clear();
        self.live.bench = Vector::new();
        self.live.ledger.clear();
        self.live.point_log.clear();
        self.phase = MatchPhase::LineupSetup;
        Ok(self.live.board)
    }

    /// Undo the most recent in-set operation. No-op with empty history.
    pub fn undo(&mut self) -> MatchResult<MatchState> {
        if let Some(previous) = self.history.pop() {
            self.live = previous;
            log::debug!("undo, revision now {}", self.live.board.revision);
        }
        Ok(self.live.board)
    }

    // === Helpers ===

    /// Push a snapshot, then advance the revision of the live state.
    fn checkpoint(&mut self) {
        self.history.snapshot(&self.live);
        self.live.board.bump_revision();
    }

    fn player(&self, id: PlayerId) -> MatchResult<&Player> {
        self.roster.get(id).ok_or(MatchError::UnknownPlayer(id))
    }

    /// A rostered player who is on court or is the libero.
    fn player_in_play(&self, id: PlayerId) -> MatchResult<&Player> {
        let player = self.player(id)?;
        let lineup = &self.live.lineup;
        if lineup.is_on_court(id) || lineup.libero() == Some(id) {
            Ok(player)
        } else {
            Err(MatchError::NotOnCourt(id))
        }
    }

    /// Resolve who an action is credited to.
    ///
    /// Actions that name a player need one in play. The rest are serving
    /// stats and go to the slot-1 server.
    fn credited_player(&self, player: Option<PlayerId>, action: Action) -> MatchResult<&Player> {
        if !action.needs_player() {
            let server = self
                .live
                .lineup
                .server()
                .ok_or(MatchError::EmptySlot(Slot::ONE))?;
            return self.player(server);
        }
        let id = player.ok_or_else(|| MatchError::MissingPlayer(action.name().to_string()))?;
        self.player_in_play(id)
    }

    /// Check the serve context for a player stat, then resolve its subject.
    fn stat_subject(&self, player: Option<PlayerId>, kind: StatKind) -> MatchResult<&Player> {
        let serving = self.live.board.serving_team;
        if kind.requires_home_serve() && serving != Some(Team::Home) {
            return Err(MatchError::InvalidServeContext);
        }
        if kind == StatKind::ReceptionError && serving == Some(Team::Home) {
            return Err(MatchError::InvalidReceptionContext);
        }

        let subject = self.credited_player(player, Action::Stat(kind))?;
        if kind == StatKind::Block {
            if let Some(slot) = self.live.lineup.slot_of(subject.id).filter(|s| s.is_back_row()) {
                return Err(MatchError::IllegalBlockPosition {
                    player: subject.id,
                    slot,
                });
            }
        }
        Ok(subject)
    }

    fn require_phase(&self, expected: MatchPhase) -> MatchResult<()> {
        if self.phase == expected {
            Ok(())
        } else if self.phase == MatchPhase::Finished {
            Err(MatchError::MatchFinished)
        } else {
            Err(MatchError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    fn require_playing(&self) -> MatchResult<()> {
        self.require_phase(MatchPhase::Playing)
    }

    fn require_no_pending(&self) -> MatchResult<()> {
        match self.live.pending {
            Some(PendingAction::AssistFor { attacker }) => Err(MatchError::AwaitingAssist(attacker)),
            None => Ok(()),
        }
    }

    // === Persistence support ===

    pub(crate) fn from_parts(
        config: MatchConfig,
        phase: MatchPhase,
        match_id: MatchId,
        match_name: String,
        roster: Roster,
        live: LiveState,
    ) -> Self {
        Self {
            config,
            phase,
            match_id: Some(match_id),
            match_name,
            roster,
            live,
            history: History::new(),
        }
    }
}
