//! Commands typed during an interactive word search.

use std::str::FromStr;

use spellquest_core::Position;

/// One line of play input.
///
/// Coordinates are zero-based `row col` pairs, matching how the grid is
/// printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum PlayAction {
    /// `press r c`: start a selection.
    Press(Position),
    /// `enter r c`: drag the selection to a cell.
    Enter(Position),
    /// `release`: end the selection and check it.
    Release,
    /// `select r1 c1 r2 c2`: press, drag, and release in one go.
    Select { from: Position, to: Position },
    /// `cancel`: drop the selection, as when the pointer leaves the grid.
    Cancel,
    /// `show`: print the grid and word list.
    Show,
    /// `help`: list the commands.
    Help,
    /// `finish`: end the session.
    Finish,
}

/// Error returned for an unrecognized play command.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ActionParseError {
    #[display("empty command")]
    Empty,
    #[display("unknown command {_0:?}")]
    UnknownCommand(#[error(not(source))] String),
    #[display("{command} expects {expected} numbers")]
    WrongArity {
        command: &'static str,
        expected: usize,
    },
    #[display("invalid coordinate {_0:?}")]
    InvalidCoordinate(#[error(not(source))] String),
}

/// Help text listing every command.
pub const HELP: &str = "\
commands:
  press R C           start selecting at row R, column C
  enter R C           drag the selection to row R, column C
  release             let go and check the selection
  select R1 C1 R2 C2  select from one cell to another in one step
  cancel              drop the current selection
  show                print the grid again
  finish              stop and see your score";

fn parse_numbers(
    command: &'static str,
    args: &[&str],
    expected: usize,
) -> Result<Vec<usize>, ActionParseError> {
    if args.len() != expected {
        return Err(ActionParseError::WrongArity { command, expected });
    }
    args.iter()
        .map(|arg| {
            arg.parse()
                .map_err(|_| ActionParseError::InvalidCoordinate((*arg).to_owned()))
        })
        .collect()
}

impl FromStr for PlayAction {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let Some(command) = words.next() else {
            return Err(ActionParseError::Empty);
        };
        let args = words.collect::<Vec<_>>();

        let action = match command.to_ascii_lowercase().as_str() {
            "press" | "p" => {
                let n = parse_numbers("press", &args, 2)?;
                Self::Press(Position::new(n[0], n[1]))
            }
            "enter" | "e" => {
                let n = parse_numbers("enter", &args, 2)?;
                Self::Enter(Position::new(n[0], n[1]))
            }
            "select" | "s" => {
                let n = parse_numbers("select", &args, 4)?;
                Self::Select {
                    from: Position::new(n[0], n[1]),
                    to: Position::new(n[2], n[3]),
                }
            }
            "release" | "r" => Self::Release,
            "cancel" | "c" => Self::Cancel,
            "show" => Self::Show,
            "help" | "?" => Self::Help,
            "finish" | "quit" | "q" => Self::Finish,
            _ => return Err(ActionParseError::UnknownCommand(command.to_owned())),
        };
        Ok(action)
    }
}
