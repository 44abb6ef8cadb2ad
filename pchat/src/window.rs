use pprovider::Turn;

/// Number of most recent turns handed to providers.
pub const CONTEXT_WINDOW_TURNS: usize = 10;

/// Returns the last `limit` turns, or all of them when there are fewer.
///
/// ```rust
/// use pchat::context_window;
/// use pprovider::Turn;
///
/// let turns = vec![Turn::user("a"), Turn::assistant("b"), Turn::user("c")];
/// assert_eq!(context_window(&turns, 2), &turns[1..]);
/// assert!(context_window(&[], 10).is_empty());
/// ```
pub fn context_window(turns: &[Turn], limit: usize) -> &[Turn] {
    let start = turns.len().saturating_sub(limit);
    &turns[start..]
}
