use super::entities::Chips;

pub const DEFAULT_SMALL_BLIND: Chips = 50;
pub const DEFAULT_BIG_BLIND: Chips = 2 * DEFAULT_SMALL_BLIND;
// A hundred big blinds deep.
pub const DEFAULT_STARTING_CHIPS: Chips = 100 * DEFAULT_BIG_BLIND;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 10;
pub const DEFAULT_NUM_PLAYERS: usize = 6;

pub const HOLE_CARDS: usize = 2;
pub const BOARD_CARDS: usize = 5;
pub const FLOP_CARDS: usize = 3;
