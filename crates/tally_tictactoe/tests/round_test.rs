//! Integration tests for playing whole rounds.

mod common;

use common::{PreferenceInput, RecordingObserver, ScriptedInput};
use tally_tictactoe::{
    FirstOpen, GameEvent, GameRng, Mark, Move, MoveError, NullObserver, Outcome, Position,
    RoundController, RoundState,
};

#[test]
fn test_human_completes_row() {
    let mut round = RoundController::new(Mark::Human);
    let mut input = PreferenceInput::new(&[4, 5, 6]);
    let mut bot = FirstOpen::new("Bot");
    let mut rng = GameRng::new(0);
    let mut observer = RecordingObserver::default();

    let outcome = round
        .play(&mut input, &mut bot, &mut rng, &mut observer)
        .unwrap();

    assert_eq!(outcome, Outcome::HumanWin);
    assert_eq!(round.history().len(), 5);
    assert_eq!(round.last_mover(), Some(Mark::Human));
    assert_eq!(input.requests, 3);
    let played = observer
        .events
        .iter()
        .filter(|e| matches!(e, GameEvent::MovePlayed { .. }))
        .count();
    assert_eq!(played, 5);
}

#[test]
fn test_computer_opens_and_wins() {
    let mut round = RoundController::new(Mark::Computer);
    let mut input = PreferenceInput::new(&[7, 8, 9]);
    let mut bot = FirstOpen::new("Bot");
    let mut rng = GameRng::new(0);

    let outcome = round
        .play(&mut input, &mut bot, &mut rng, &mut NullObserver)
        .unwrap();

    assert_eq!(outcome, Outcome::ComputerWin);
    assert_eq!(
        round.history().first(),
        Some(&Move::new(Mark::Computer, Position::TopLeft))
    );
}

#[test]
fn test_occupied_square_is_asked_again() {
    let mut round = RoundController::new(Mark::Human);
    // The second answer repeats square 5, which is refused.
    let mut input = ScriptedInput::new(&[5, 5, 4, 6]);
    let mut bot = FirstOpen::new("Bot");
    let mut rng = GameRng::new(0);
    let mut observer = RecordingObserver::default();

    let outcome = round
        .play(&mut input, &mut bot, &mut rng, &mut observer)
        .unwrap();

    assert_eq!(outcome, Outcome::HumanWin);
    assert_eq!(observer.rejections(), 1);
    assert!(observer.events.iter().any(|e| matches!(
        e,
        GameEvent::MoveRejected {
            position: Position::Center,
            ..
        }
    )));
}

#[test]
fn test_input_failure_ends_round_with_error() {
    let mut round = RoundController::new(Mark::Human);
    let mut input = ScriptedInput::new(&[1]);
    let mut bot = FirstOpen::new("Bot");
    let mut rng = GameRng::new(0);

    let result = round.play(&mut input, &mut bot, &mut rng, &mut NullObserver);
    assert!(result.is_err());
    // The move that did arrive is still on the board.
    assert_eq!(round.history().len(), 2);
}

#[test]
fn test_filled_board_without_line_is_tie() {
    // H C H / H C C / C H H, played in alternation from the human.
    let script = [
        (Mark::Human, 1),
        (Mark::Computer, 2),
        (Mark::Human, 3),
        (Mark::Computer, 5),
        (Mark::Human, 4),
        (Mark::Computer, 6),
        (Mark::Human, 8),
        (Mark::Computer, 7),
        (Mark::Human, 9),
    ];
    let mut round = RoundController::new(Mark::Human);
    let mut state = round.state();
    for (mark, n) in script {
        assert_eq!(state, RoundState::AwaitingMove(mark));
        state = round
            .submit(Move::new(mark, Position::from_number(n).unwrap()))
            .unwrap();
    }
    assert_eq!(state, RoundState::RoundOver(Outcome::Tie));
    assert!(round.board().is_full());
    assert_eq!(round.board().winner(), None);
}

#[test]
fn test_win_on_last_square_is_not_a_tie() {
    // The ninth move completes the middle row.
    let script = [
        (Mark::Human, 2),
        (Mark::Computer, 1),
        (Mark::Human, 4),
        (Mark::Computer, 3),
        (Mark::Human, 5),
        (Mark::Computer, 7),
        (Mark::Human, 9),
        (Mark::Computer, 8),
        (Mark::Human, 6),
    ];
    let mut round = RoundController::new(Mark::Human);
    let mut state = round.state();
    for (mark, n) in script {
        state = round
            .submit(Move::new(mark, Position::from_number(n).unwrap()))
            .unwrap();
    }
    assert!(round.board().is_full());
    assert_eq!(state, RoundState::RoundOver(Outcome::HumanWin));
}

#[test]
fn test_out_of_range_square_rejected_at_parse() {
    assert_eq!(
        Position::parse("10"),
        Err(MoveError::PositionOutOfRange(10))
    );
    assert_eq!(Position::parse("0"), Err(MoveError::PositionOutOfRange(0)));
    assert!(matches!(
        Position::parse("five"),
        Err(MoveError::Unparseable(_))
    ));
    assert_eq!(Position::parse(" 7 "), Ok(Position::BottomLeft));
}
