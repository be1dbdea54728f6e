//! Turning command-line card strings into an equity request.

use holdem::{EquityError, EquityRequest, ParseCardError, parse_cards};
use thiserror::Error;

#[derive(Debug, Eq, Error, PartialEq)]
pub enum InputError {
    #[error("bad hole cards: {0}")]
    HoleCards(#[source] ParseCardError),
    #[error("bad board cards: {0}")]
    BoardCards(#[source] ParseCardError),
    #[error(transparent)]
    Equity(#[from] EquityError),
}

/// Parses `hole` and `board` and checks them against `num_players` seats,
/// the hero included.
pub fn parse_request(hole: &str, board: &str, num_players: usize) -> Result<EquityRequest, InputError> {
    let hole = parse_cards(hole).map_err(InputError::HoleCards)?;
    let board = parse_cards(board).map_err(InputError::BoardCards)?;
    let request = EquityRequest::new(&hole, &board, num_players.saturating_sub(1))?;
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request() {
        let request = parse_request("As Kh", "Qd Jc Ts", 4).unwrap();
        assert_eq!(request.hero.len(), 2);
        assert_eq!(request.board.len(), 3);
        assert_eq!(request.num_opponents, 3);
    }

    #[test]
    fn test_empty_board_allowed() {
        let request = parse_request("7c 7d", "", 2).unwrap();
        assert!(request.board.is_empty());
    }

    #[test]
    fn test_bad_tokens() {
        assert_eq!(
            parse_request("As Kx", "", 2),
            Err(InputError::HoleCards(ParseCardError::InvalidToken("Kx".to_string())))
        );
        assert_eq!(
            parse_request("As Kh", "Qd 1c Ts", 2),
            Err(InputError::BoardCards(ParseCardError::InvalidToken("1c".to_string())))
        );
    }

    #[test]
    fn test_validation_errors_pass_through() {
        assert_eq!(
            parse_request("As", "", 2),
            Err(InputError::Equity(EquityError::InvalidHoleCards(1)))
        );
        assert_eq!(
            parse_request("As Kh", "As 2c 3c", 2),
            Err(InputError::Equity(EquityError::DuplicateCards))
        );
        assert_eq!(
            parse_request("As Kh", "2c 3c", 2),
            Err(InputError::Equity(EquityError::InvalidBoard(2)))
        );
    }
}
