//! Scripted collaborators shared by the integration tests.

#![allow(dead_code)]

use anyhow::{Result, bail};
use std::collections::VecDeque;
use tally_tictactoe::{
    Board, GameEvent, HumanInput, Mark, MatchSettings, MatchSetup, Observer, Position,
    ReplayPrompt,
};

/// Human that plays the first open square from a preference list.
pub struct PreferenceInput {
    preferences: Vec<Position>,
    pub requests: usize,
}

impl PreferenceInput {
    pub fn new(numbers: &[u8]) -> Self {
        Self {
            preferences: numbers
                .iter()
                .map(|n| Position::from_number(*n).unwrap())
                .collect(),
            requests: 0,
        }
    }
}

impl HumanInput for PreferenceInput {
    fn request_human_move(&mut self, _board: &Board, valid: &[Position]) -> Result<Position> {
        self.requests += 1;
        match self.preferences.iter().find(|pos| valid.contains(pos)) {
            Some(pos) => Ok(*pos),
            None => bail!("no preferred square left in {:?}", valid),
        }
    }
}

/// Human that replays a fixed list of answers, valid or not.
pub struct ScriptedInput {
    answers: VecDeque<Position>,
}

impl ScriptedInput {
    pub fn new(numbers: &[u8]) -> Self {
        Self {
            answers: numbers
                .iter()
                .map(|n| Position::from_number(*n).unwrap())
                .collect(),
        }
    }
}

impl HumanInput for ScriptedInput {
    fn request_human_move(&mut self, _board: &Board, _valid: &[Position]) -> Result<Position> {
        match self.answers.pop_front() {
            Some(pos) => Ok(pos),
            None => bail!("script exhausted"),
        }
    }
}

/// Observer that keeps every event.
#[derive(Default)]
pub struct RecordingObserver {
    pub events: Vec<GameEvent>,
}

impl RecordingObserver {
    pub fn round_openers(&self) -> Vec<Mark> {
        self.events
            .iter()
            .filter_map(|e| match e {
                GameEvent::RoundStarted { first, .. } => Some(*first),
                _ => None,
            })
            .collect()
    }

    /// Opener of the first round of every match.
    pub fn match_openers(&self) -> Vec<Mark> {
        self.events
            .iter()
            .filter_map(|e| match e {
                GameEvent::RoundStarted { round: 1, first, .. } => Some(*first),
                _ => None,
            })
            .collect()
    }

    pub fn rejections(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, GameEvent::MoveRejected { .. }))
            .count()
    }
}

impl Observer for RecordingObserver {
    fn notify(&mut self, event: &GameEvent) -> Result<()> {
        self.events.push(event.clone());
        Ok(())
    }
}

/// Replay prompt answering from a list, then "no".
pub struct ScriptedReplay {
    answers: VecDeque<bool>,
}

impl ScriptedReplay {
    pub fn new(answers: &[bool]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
        }
    }
}

impl ReplayPrompt for ScriptedReplay {
    fn play_again(&mut self) -> Result<bool> {
        Ok(self.answers.pop_front().unwrap_or(false))
    }
}

/// Setup handing out a list of settings, then keeping the current ones.
pub struct ScriptedSetup {
    answers: VecDeque<MatchSettings>,
    pub offered: Vec<MatchSettings>,
}

impl ScriptedSetup {
    pub fn new(answers: &[MatchSettings]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            offered: Vec::new(),
        }
    }
}

impl MatchSetup for ScriptedSetup {
    fn match_settings(&mut self, current: MatchSettings) -> Result<MatchSettings> {
        self.offered.push(current);
        Ok(self.answers.pop_front().unwrap_or(current))
    }
}

/// Builds a board from square numbers for each party.
pub fn board_with(human: &[u8], computer: &[u8]) -> Board {
    let mut board = Board::new();
    for n in human {
        board.occupy_number(*n, Mark::Human).unwrap();
    }
    for n in computer {
        board.occupy_number(*n, Mark::Computer).unwrap();
    }
    board
}
