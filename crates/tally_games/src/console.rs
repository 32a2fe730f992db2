//! Console collaborators: questions on stdin, board and score on stdout.
//!
//! [`Terminal`] owns the two streams. [`Console`] is a cheap handle onto
//! a shared terminal so the same screen can serve as the engine's input,
//! observer, match setup and replay prompt at once.

use crate::messages::{Messages, fill};
use crate::render::{Table, draw_board, joinor, score_line};
use anyhow::{Result, bail};
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;
use strum::IntoEnumIterator;
use tally_tictactoe::{
    Board, Difficulty, FirstMover, GameEvent, HumanInput, Mark, MarkerSymbols, MatchSettings,
    MatchSetup, MoveError, Observer, Position, ReplayPrompt, Score,
};
use tracing::{debug, instrument, warn};

/// Valid answers to the numbered setup menus.
const MENU_CHOICES: &str = "1, 2, or 3";

/// Line-oriented terminal over one reader and one writer.
pub struct Terminal<R, W> {
    reader: R,
    writer: W,
    clear: bool,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    /// Creates a terminal. With `clear` off the screen is never wiped.
    pub fn new(reader: R, writer: W, clear: bool) -> Self {
        Self {
            reader,
            writer,
            clear,
        }
    }

    /// Prints a message line.
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.writer, "=> {}", text)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Prints text as is.
    pub fn print(&mut self, text: &str) -> Result<()> {
        writeln!(self.writer, "{}", text)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Wipes the screen and homes the cursor.
    pub fn clear(&mut self) -> Result<()> {
        if self.clear {
            execute!(self.writer, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }

    /// Reads one line without its line ending. Fails at end of input.
    pub fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            bail!("Input closed");
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Asks `prompt` until `parse` accepts the trimmed answer.
    fn ask<T>(
        &mut self,
        prompt: &str,
        retry: &str,
        mut parse: impl FnMut(&str) -> Option<T>,
    ) -> Result<T> {
        self.say(prompt)?;
        loop {
            let answer = self.read_line()?;
            if let Some(value) = parse(answer.trim()) {
                return Ok(value);
            }
            debug!(%answer, "Answer rejected");
            self.say(retry)?;
        }
    }

    /// Asks for the human's name.
    #[instrument(skip_all)]
    pub fn ask_name(&mut self, messages: &Messages) -> Result<String> {
        self.ask(&messages.player_name, &messages.invalid_name, parse_name)
    }

    /// Asks for the human's marker letter.
    #[instrument(skip_all)]
    pub fn ask_symbol(&mut self, messages: &Messages) -> Result<char> {
        self.print("")?;
        self.ask(
            &messages.player_marker,
            &messages.invalid_marker,
            parse_symbol,
        )
    }

    /// Asks for the difficulty tier by menu number.
    #[instrument(skip_all)]
    pub fn ask_difficulty(&mut self, messages: &Messages) -> Result<Difficulty> {
        let options: Vec<String> = Difficulty::iter()
            .map(|tier| format!("{} ({})", tier.choice(), tier))
            .collect();
        let listed = joinor(&options, ", ", "or");
        let prompt = fill(&messages.difficulty, &[("options", listed.as_str())]);
        let retry = fill(&messages.invalid_choice, &[("options", MENU_CHOICES)]);

        self.print("")?;
        self.ask(&prompt, &retry, |answer| {
            answer.parse().ok().and_then(Difficulty::from_choice)
        })
    }

    /// Introduces the opponent and asks who opens the match.
    #[instrument(skip(self, messages))]
    pub fn ask_first_mover(
        &mut self,
        messages: &Messages,
        name: &str,
        opponent: &str,
    ) -> Result<FirstMover> {
        let names = [("name", name), ("opponent", opponent)];
        let retry = fill(&messages.invalid_choice, &[("options", MENU_CHOICES)]);

        self.print("")?;
        self.say(&fill(&messages.opponent, &names))?;
        let prompt = fill(&messages.who_goes_first, &names);
        self.ask(&prompt, &retry, |answer| {
            answer.parse().ok().and_then(FirstMover::from_choice)
        })
    }

    /// Asks a yes/no question.
    pub fn ask_yes_no(&mut self, prompt: &str, retry: &str) -> Result<bool> {
        self.ask(prompt, retry, parse_yes_no)
    }
}

fn parse_name(answer: &str) -> Option<String> {
    answer
        .chars()
        .any(|c| c.is_alphanumeric() || c == '_')
        .then(|| answer.to_string())
}

fn parse_symbol(answer: &str) -> Option<char> {
    let mut chars = answer.chars();
    match (chars.next(), chars.next()) {
        (Some(symbol), None) if MarkerSymbols::is_allowed(symbol) => Some(symbol),
        _ => None,
    }
}

fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Which per-match settings are asked for before every match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchQuestions {
    /// Ask for the difficulty tier.
    pub difficulty: bool,
    /// Ask who opens the match.
    pub first_mover: bool,
}

/// Shared handle onto the terminal, implementing every engine collaborator.
pub struct Console<R, W> {
    term: Rc<RefCell<Terminal<R, W>>>,
    messages: Rc<Messages>,
    table: Rc<RefCell<Table>>,
    questions: MatchQuestions,
    score: Score,
}

impl<R, W> Clone for Console<R, W> {
    fn clone(&self) -> Self {
        Self {
            term: Rc::clone(&self.term),
            messages: Rc::clone(&self.messages),
            table: Rc::clone(&self.table),
            questions: self.questions,
            score: self.score,
        }
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Wraps a terminal for one session at `table`.
    ///
    /// No match settings are asked for until [`Console::with_questions`]
    /// says so.
    pub fn new(term: Terminal<R, W>, messages: Messages, table: Table) -> Self {
        Self {
            term: Rc::new(RefCell::new(term)),
            messages: Rc::new(messages),
            table: Rc::new(RefCell::new(table)),
            questions: MatchQuestions::default(),
            score: Score::new(),
        }
    }

    /// Sets the settings asked for at the start of each match.
    pub fn with_questions(mut self, questions: MatchQuestions) -> Self {
        self.questions = questions;
        self
    }

    /// Prints the closing message.
    pub fn goodbye(&self) -> Result<()> {
        self.term.borrow_mut().say(&self.messages.goodbye)
    }

    fn redraw(&self, board: &Board) -> Result<()> {
        let table = self.table.borrow();
        let mut term = self.term.borrow_mut();
        term.clear()?;
        term.say(&score_line(&table, &self.score))?;
        term.print("")?;
        term.print(&draw_board(board, &table.symbols))
    }

    fn result_line(&self, winner: Option<Mark>) -> String {
        match winner {
            Some(mark) => self.named(&self.messages.round_won, mark),
            None => self.messages.tie.clone(),
        }
    }

    fn named(&self, template: &str, mark: Mark) -> String {
        fill(template, &[("name", self.table.borrow().name(mark))])
    }

    fn refusal(&self, reason: &str) -> String {
        fill(&self.messages.invalid_square, &[("reason", reason)])
    }
}

impl<R: BufRead, W: Write> HumanInput for Console<R, W> {
    #[instrument(skip(self, _board))]
    fn request_human_move(&mut self, _board: &Board, valid: &[Position]) -> Result<Position> {
        let squares = joinor(valid, ", ", "or");
        let prompt = fill(
            &self.messages.choose_square,
            &[("squares", squares.as_str())],
        );
        let mut term = self.term.borrow_mut();
        loop {
            term.say(&prompt)?;
            let answer = term.read_line()?;
            let reason = match Position::parse(&answer) {
                Ok(pos) if valid.contains(&pos) => return Ok(pos),
                Ok(pos) => MoveError::SquareOccupied(pos).to_string(),
                Err(e) => e.to_string(),
            };
            debug!(%answer, %reason, "Square refused");
            term.say(&self.refusal(&reason))?;
        }
    }
}

impl<R: BufRead, W: Write> Observer for Console<R, W> {
    fn notify(&mut self, event: &GameEvent) -> Result<()> {
        match event {
            GameEvent::RoundStarted { first, score, .. } => {
                self.score = *score;
                self.redraw(&Board::new())?;
                let line = self.named(&self.messages.goes_first, *first);
                self.term.borrow_mut().say(&line)
            }
            // The human's own move shows once the computer has answered.
            GameEvent::MovePlayed { mv, board } if mv.mark() == Mark::Computer => {
                self.redraw(board)
            }
            GameEvent::MovePlayed { .. } => Ok(()),
            GameEvent::MoveRejected { position, reason } => {
                warn!(%position, %reason, "Move rejected by the board");
                let line = self.refusal(reason);
                self.term.borrow_mut().say(&line)
            }
            GameEvent::RoundOver {
                outcome,
                board,
                score,
            } => {
                self.score = *score;
                self.redraw(board)?;
                let line = self.result_line(outcome.winner());
                let mut term = self.term.borrow_mut();
                term.say(&line)?;
                term.print("")?;
                if score.champion(self.table.borrow().threshold).is_none() {
                    term.say(&self.messages.continue_prompt)?;
                    term.read_line()?;
                }
                Ok(())
            }
            GameEvent::MatchOver { champion, .. } => {
                let line = self.named(&self.messages.champion, *champion);
                self.term.borrow_mut().say(&line)
            }
        }
    }
}

impl<R: BufRead, W: Write> ReplayPrompt for Console<R, W> {
    fn play_again(&mut self) -> Result<bool> {
        let again = self
            .term
            .borrow_mut()
            .ask_yes_no(&self.messages.play_again, &self.messages.invalid_yes_no)?;
        debug!(again, "Replay answer");
        Ok(again)
    }
}

impl<R: BufRead, W: Write> MatchSetup for Console<R, W> {
    #[instrument(skip(self))]
    fn match_settings(&mut self, current: MatchSettings) -> Result<MatchSettings> {
        let mut settings = current;
        let mut term = self.term.borrow_mut();
        if self.questions.difficulty {
            settings.difficulty = term.ask_difficulty(&self.messages)?;
            let opponent = settings.difficulty.opponent_name();
            self.table.borrow_mut().opponent_name = opponent.to_string();
        }
        if self.questions.first_mover {
            let table = self.table.borrow();
            let (name, opponent) = (&table.human_name, &table.opponent_name);
            settings.first_mover = term.ask_first_mover(&self.messages, name, opponent)?;
        }
        debug!(?settings, "Match settings chosen");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_tictactoe::{FirstOpen, GameRng, MatchConfig, MatchController};

    type TestConsole = Console<&'static [u8], Vec<u8>>;

    fn terminal(input: &'static str) -> Terminal<&'static [u8], Vec<u8>> {
        Terminal::new(input.as_bytes(), Vec::new(), false)
    }

    fn table(threshold: u32) -> Table {
        Table {
            human_name: "Ada".to_string(),
            opponent_name: "Bot".to_string(),
            symbols: MarkerSymbols::default(),
            threshold,
        }
    }

    fn console(input: &'static str, threshold: u32) -> TestConsole {
        Console::new(
            terminal(input),
            Messages::load(None).unwrap(),
            table(threshold),
        )
    }

    fn bot_controller(config: MatchConfig) -> MatchController {
        MatchController::with_strategy(config, Box::new(FirstOpen::new("Bot")), GameRng::new(0))
            .unwrap()
    }

    fn output(console: &TestConsole) -> String {
        String::from_utf8(console.term.borrow().writer.clone()).unwrap()
    }

    #[test]
    fn test_setup_questions_retry_until_valid() {
        let messages = Messages::load(None).unwrap();
        let mut term = terminal("  \n!!\nAda\no\nab\nk\n7\n2\n3\n");

        assert_eq!(term.ask_name(&messages).unwrap(), "Ada");
        assert_eq!(term.ask_symbol(&messages).unwrap(), 'k');
        assert_eq!(
            term.ask_difficulty(&messages).unwrap(),
            Difficulty::Intermediate
        );
        assert_eq!(
            term.ask_first_mover(&messages, "Ada", "R2D2").unwrap(),
            FirstMover::Random
        );

        let text = String::from_utf8(term.writer).unwrap();
        assert_eq!(text.matches(&messages.invalid_name).count(), 2);
        assert!(text.contains("1 (easy), 2 (intermediate), or 3 (advanced)"));
        assert!(text.contains("You will be playing against R2D2!"));
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let messages = Messages::load(None).unwrap();
        let mut term = terminal("");
        assert!(term.ask_name(&messages).is_err());
    }

    #[test]
    fn test_square_prompt_lists_open_squares_and_retries() {
        let mut console = console("9\nx\n2\n", 5);
        let valid = &Position::ALL[..3];

        let pos = console.request_human_move(&Board::new(), valid).unwrap();

        assert_eq!(pos, Position::TopCenter);
        let text = output(&console);
        assert_eq!(text.matches("Choose a square (1, 2, or 3):").count(), 3);
        assert!(text.contains("Square 9 is already occupied"));
        assert!(text.contains("'x' is not a square number"));
    }

    #[test]
    fn test_play_again_accepts_words() {
        let mut console = console("maybe\nYES\nno\n", 5);
        assert!(console.play_again().unwrap());
        assert!(!console.play_again().unwrap());
        assert!(output(&console).contains("Please answer y or n."));
    }

    #[test]
    fn test_match_setup_asks_only_open_questions() {
        let current = MatchSettings {
            difficulty: Difficulty::Advanced,
            first_mover: FirstMover::Random,
        };

        let mut silent = console("", 5);
        assert_eq!(silent.match_settings(current).unwrap(), current);

        let questions = MatchQuestions {
            difficulty: true,
            first_mover: false,
        };
        let mut tier_only = console("1\n", 5).with_questions(questions);
        let settings = tier_only.match_settings(current).unwrap();
        assert_eq!(settings.difficulty, Difficulty::Easy);
        assert_eq!(settings.first_mover, FirstMover::Random);
        assert_eq!(tier_only.table.borrow().opponent_name, "WALL-E");
        assert!(!output(&tier_only).contains("Who goes first"));
    }

    #[test]
    fn test_rematch_asks_tier_and_opener_again() {
        // Match one: human opens and wins 4-5-6. Match two: computer opens
        // and completes 1-2-3.
        let input = "3\n1\n4\n5\n6\ny\n3\n2\n4\n5\nn\n";
        let questions = MatchQuestions {
            difficulty: true,
            first_mover: true,
        };
        let mut console = console(input, 1).with_questions(questions);
        let mut controller = bot_controller(MatchConfig::default().with_win_threshold(1));

        let mut input = console.clone();
        let mut replay = console.clone();
        let mut setup = console.clone();
        let champions = controller
            .run(&mut input, &mut console, &mut replay, &mut setup)
            .unwrap();

        assert_eq!(champions, vec![Mark::Human, Mark::Computer]);
        let text = output(&console);
        assert_eq!(text.matches("Choose a difficulty").count(), 2);
        assert_eq!(text.matches("Who goes first?").count(), 2);
        assert_eq!(*controller.config().first_mover(), FirstMover::Computer);
    }

    #[test]
    fn test_match_played_through_console() {
        // Threshold 2: one "continue" after the first round, none after the last.
        let mut console = console("4\n5\n6\n\n4\n5\n6\n", 2);
        let config = MatchConfig::default()
            .with_first_mover(FirstMover::Human)
            .with_win_threshold(2);
        let mut controller = bot_controller(config);

        let mut input = console.clone();
        let champion = controller.play_match(&mut input, &mut console).unwrap();

        assert_eq!(champion, Mark::Human);
        let text = output(&console);
        assert_eq!(text.matches("=> Ada won!").count(), 2);
        assert_eq!(text.matches("Press enter to continue.").count(), 1);
        assert!(text.contains("=> Ada (X): 2, Bot (O): 0"));
        assert!(text.ends_with("=> Ada is the champion!\n"));
    }
}
