pub const DEFAULT_BOARD_SIZE: usize = 15;
pub const MIN_BOARD_SIZE: usize = 5;
/// Largest board the column letters `A..=Z` can address.
pub const MAX_BOARD_SIZE: usize = 26;
pub const WIN_LENGTH: usize = 5;

pub const DEFAULT_SEARCH_DEPTH: u8 = 3;
pub const DEFAULT_CANDIDATE_RADIUS: usize = 2;
pub const DEFAULT_MAX_CANDIDATES: usize = 16;
/// Transposition table of `2^14` entries per search.
pub const DEFAULT_CACHE_BITS: u8 = 14;
/// Larger values are clamped to this.
pub const MAX_CACHE_BITS: u8 = 24;

/// The four line axes: horizontal, vertical and both diagonals.
pub const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// Returns `true` if `size` is a supported board side length.
pub fn is_supported_size(size: usize) -> bool {
    (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size)
}
