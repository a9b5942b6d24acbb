use crate::board::Board;
use crate::error::ParseError;

/// Parses a board from its textual form: the dimension N followed by N²
/// tiles in row-major order, all separated by whitespace.
///
/// # Examples
/// ```
/// use eight_puzzle::utils::parse_board;
///
/// let board = parse_board("3\n 0  1  3\n 4  2  5\n 7  8  6\n").unwrap();
/// assert_eq!(board.dimension(), 3);
/// assert_eq!(board.manhattan(), 4);
///
/// assert!(parse_board("2\n1 2 3").is_err());
/// ```
pub fn parse_board(input: &str) -> Result<Board, ParseError> {
    let mut numbers = input
        .split_whitespace()
        .enumerate()
        .map(|(position, token)| {
            token.parse::<u32>().map_err(|_| ParseError::InvalidToken {
                position,
                token: token.to_string(),
            })
        });

    let size = numbers.next().ok_or(ParseError::MissingDimension)?? as usize;
    let expected = size * size;

    let tiles = numbers
        .by_ref()
        .take(expected)
        .collect::<Result<Vec<u32>, ParseError>>()?;
    if tiles.len() < expected {
        return Err(ParseError::MissingTiles {
            expected,
            found: tiles.len(),
        });
    }

    let trailing = numbers.count();
    if trailing > 0 {
        return Err(ParseError::TrailingTokens { count: trailing });
    }

    Ok(Board::from_tiles(size, tiles)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidArrangement;

    #[test]
    fn test_parse_board_valid() {
        let board = parse_board("3\n 1  2  3\n 4  5  6\n 8  7  0\n").unwrap();
        assert_eq!(board.rows().nth(2).unwrap(), &[8, 7, 0]);
    }

    #[test]
    fn test_parse_board_round_trips_display() {
        let board = parse_board("2 0 3 2 1").unwrap();
        assert_eq!(parse_board(&board.to_string()).unwrap(), board);
    }

    #[test]
    fn test_parse_board_empty_input() {
        assert_eq!(parse_board("  \n"), Err(ParseError::MissingDimension));
    }

    #[test]
    fn test_parse_board_bad_token() {
        assert_eq!(
            parse_board("2\n1 x\n3 0"),
            Err(ParseError::InvalidToken {
                position: 2,
                token: "x".to_string()
            })
        );
        assert!(matches!(
            parse_board("-3"),
            Err(ParseError::InvalidToken { position: 0, .. })
        ));
    }

    #[test]
    fn test_parse_board_wrong_tile_count() {
        assert_eq!(
            parse_board("3\n1 2 3\n4 5 6"),
            Err(ParseError::MissingTiles { expected: 9, found: 6 })
        );
        assert_eq!(
            parse_board("2\n1 2\n3 0\n9 9"),
            Err(ParseError::TrailingTokens { count: 2 })
        );
    }

    #[test]
    fn test_parse_board_invalid_arrangement() {
        assert_eq!(
            parse_board("2\n1 2\n2 0"),
            Err(ParseError::Arrangement(InvalidArrangement::Duplicate { value: 2 }))
        );
        assert_eq!(
            parse_board("1 0"),
            Err(ParseError::Arrangement(InvalidArrangement::TooSmall { size: 1 }))
        );
    }
}
