//! Matches: rounds repeated until one party reaches the win threshold.
//!
//! ```text
//! MatchInProgress(score) --round--> MatchInProgress(score') --...--> MatchOver(champion)
//! ```
//!
//! The score belongs to the [`MatchController`] alone. It changes once
//! per round and is cleared only when a new match begins.

use crate::collaborators::{GameEvent, HumanInput, MatchSetup, Observer, ReplayPrompt};
use crate::config::{ConfigError, FirstMoverRule, MatchConfig, MatchSettings};
use crate::round::{Outcome, RoundController};
use crate::strategy::MoveStrategy;
use crate::{GameRng, Mark};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Rounds won by each party in the current match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    human: u32,
    computer: u32,
}

impl Score {
    /// A fresh 0-0 score.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rounds won by `mark`.
    pub fn get(&self, mark: Mark) -> u32 {
        match mark {
            Mark::Human => self.human,
            Mark::Computer => self.computer,
        }
    }

    /// Credits the round's winner; ties change nothing.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome.winner() {
            Some(Mark::Human) => self.human += 1,
            Some(Mark::Computer) => self.computer += 1,
            None => {}
        }
    }

    /// The party whose counter has reached `threshold`, if any.
    pub fn champion(&self, threshold: u32) -> Option<Mark> {
        if self.human >= threshold {
            Some(Mark::Human)
        } else if self.computer >= threshold {
            Some(Mark::Computer)
        } else {
            None
        }
    }
}

/// Where a match stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    /// Nobody has reached the threshold yet.
    InProgress(Score),
    /// A champion has been decided.
    MatchOver {
        /// Party that reached the threshold.
        champion: Mark,
        /// Final score.
        score: Score,
    },
}

/// Runs rounds, keeps score, and declares the champion.
#[derive(Debug)]
pub struct MatchController {
    config: MatchConfig,
    strategy: Box<dyn MoveStrategy>,
    rng: GameRng,
    score: Score,
    rounds_played: u32,
    match_first: Option<Mark>,
}

impl MatchController {
    /// Creates a controller playing the configured difficulty.
    ///
    /// Uses the configured seed, or a fresh one when none is set.
    #[instrument(skip(config))]
    pub fn new(config: MatchConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed() {
            Some(seed) => GameRng::new(*seed),
            None => GameRng::from_entropy(),
        };
        let strategy = Box::new(*config.difficulty());
        Self::with_strategy(config, strategy, rng)
    }

    /// Creates a controller with an explicit strategy and RNG.
    #[instrument(skip(config, rng), fields(seed = rng.seed()))]
    pub fn with_strategy(
        config: MatchConfig,
        strategy: Box<dyn MoveStrategy>,
        rng: GameRng,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            strategy,
            rng,
            score: Score::new(),
            rounds_played: 0,
            match_first: None,
        })
    }

    /// Returns the match configuration.
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Current score.
    pub fn score(&self) -> Score {
        self.score
    }

    /// Rounds finished in the current match.
    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// Seed of the match RNG, for replaying a session.
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// The computer opponent's name.
    pub fn opponent_name(&self) -> &str {
        self.strategy.name()
    }

    /// Switches difficulty and opener for the matches that follow.
    ///
    /// The strategy is rebuilt only when the tier changes, so a custom
    /// strategy survives unchanged settings.
    #[instrument(skip(self))]
    pub fn apply_settings(&mut self, settings: MatchSettings) {
        if settings.difficulty != *self.config.difficulty() {
            info!(
                from = %self.config.difficulty(),
                to = %settings.difficulty,
                "Difficulty changed"
            );
            self.strategy = Box::new(settings.difficulty);
        }
        self.config.set_match_settings(settings);
    }

    /// Current state, derived from the score.
    pub fn state(&self) -> MatchState {
        match self.score.champion(*self.config.win_threshold()) {
            Some(champion) => MatchState::MatchOver {
                champion,
                score: self.score,
            },
            None => MatchState::InProgress(self.score),
        }
    }

    /// Starts a new match: zero score and a freshly resolved first mover.
    #[instrument(skip(self))]
    pub fn begin(&mut self) -> Mark {
        self.score = Score::new();
        self.rounds_played = 0;
        let first = self.config.first_mover().resolve(&mut self.rng);
        self.match_first = Some(first);
        info!(?first, seed = self.rng.seed(), "Match started");
        first
    }

    /// Chooses who opens the next round.
    ///
    /// `previous` is the round just finished, `None` for the first one.
    /// Under [`FirstMoverRule::Alternate`] the opener only starts to swap
    /// once somebody has scored; ties at 0-0 keep the match's first mover.
    #[instrument(skip(self, previous))]
    pub fn next_opener(&mut self, previous: Option<&RoundController>) -> Mark {
        let match_first = match self.match_first {
            Some(mark) => mark,
            None => self.begin(),
        };
        let Some(previous) = previous else {
            return match_first;
        };
        match self.config.first_mover_rule() {
            FirstMoverRule::Same => match_first,
            FirstMoverRule::Alternate if self.score == Score::new() => match_first,
            FirstMoverRule::Alternate => previous.first_mover().opponent(),
            FirstMoverRule::Continue => previous
                .last_mover()
                .map(Mark::opponent)
                .unwrap_or(match_first),
        }
    }

    /// Records a finished round and reports the resulting state.
    ///
    /// Rounds reported after the match is decided are ignored.
    #[instrument(skip(self))]
    pub fn record(&mut self, outcome: Outcome) -> MatchState {
        if let MatchState::MatchOver { .. } = self.state() {
            warn!(%outcome, "Round recorded after match was decided; ignoring");
            return self.state();
        }
        self.score.record(outcome);
        self.rounds_played += 1;
        debug!(
            human = self.score.get(Mark::Human),
            computer = self.score.get(Mark::Computer),
            "Score updated"
        );
        self.state()
    }

    /// Plays one full match and returns the champion.
    #[instrument(skip_all, fields(threshold = *self.config.win_threshold()))]
    pub fn play_match<I, O>(&mut self, input: &mut I, observer: &mut O) -> Result<Mark>
    where
        I: HumanInput + ?Sized,
        O: Observer + ?Sized,
    {
        self.begin();
        let mut previous: Option<RoundController> = None;

        loop {
            let opener = self.next_opener(previous.as_ref());
            observer.notify(&GameEvent::RoundStarted {
                round: self.rounds_played + 1,
                first: opener,
                score: self.score,
            })?;

            let mut round = RoundController::new(opener);
            let outcome = round.play(input, self.strategy.as_mut(), &mut self.rng, observer)?;
            let state = self.record(outcome);

            observer.notify(&GameEvent::RoundOver {
                outcome,
                board: round.board().clone(),
                score: self.score,
            })?;

            if let MatchState::MatchOver { champion, score } = state {
                info!(?champion, rounds = self.rounds_played, "Match over");
                observer.notify(&GameEvent::MatchOver { champion, score })?;
                return Ok(champion);
            }
            previous = Some(round);
        }
    }

    /// Plays matches until `replay` declines another one.
    ///
    /// `setup` picks the difficulty and opener before every match.
    /// Returns the champion of every match played.
    #[instrument(skip_all)]
    pub fn run<I, O, R, S>(
        &mut self,
        input: &mut I,
        observer: &mut O,
        replay: &mut R,
        setup: &mut S,
    ) -> Result<Vec<Mark>>
    where
        I: HumanInput + ?Sized,
        O: Observer + ?Sized,
        R: ReplayPrompt + ?Sized,
        S: MatchSetup + ?Sized,
    {
        let mut champions = Vec::new();
        loop {
            let settings = setup.match_settings(self.config.match_settings())?;
            self.apply_settings(settings);
            champions.push(self.play_match(input, observer)?);
            if !replay.play_again()? {
                info!(matches = champions.len(), "Session finished");
                return Ok(champions);
            }
        }
    }
}
