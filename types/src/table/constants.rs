/// Faces on a single die.
pub const DIE_FACES: u8 = 6;

/// Lowest and highest totals two dice can show.
pub const MIN_TOTAL: u8 = 2;
pub const MAX_TOTAL: u8 = 12;

/// Point value meaning "no point established" (come-out phase).
pub const NO_POINT: u8 = 0;

/// Totals that win on the come-out roll.
pub const NATURALS: [u8; 2] = [7, 11];

/// Totals that lose on the come-out roll.
pub const CRAPS: [u8; 3] = [2, 3, 12];

/// Totals that establish a point on the come-out roll.
pub const POINT_NUMBERS: [u8; 6] = [4, 5, 6, 8, 9, 10];

/// Rolling this during the point phase loses the round.
pub const SEVEN: u8 = 7;

/// Total return on a winning bet, as a multiple of the stake (stake + equal winnings).
pub const WIN_RETURN_MULTIPLIER: u64 = 2;

/// Returns true if `total` establishes a point on the come-out roll.
pub fn is_point_number(total: u8) -> bool {
    POINT_NUMBERS.contains(&total)
}
