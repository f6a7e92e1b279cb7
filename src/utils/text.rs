//! Position tracking for characters the cipher does not transform.
//!
//! Characters outside the working alphabet are lifted out of the text
//! before encryption and put back at the same absolute offsets afterwards.
//! Offsets count `char`s, not bytes.

/// Ordered `(character, original index)` pairs, in order of occurrence.
pub type PositionMap = Vec<(char, usize)>;

/// Records every occurrence of a character from `base` in `text`.
///
/// # Examples
///
/// ```
/// use sdes::utils::text::get_positions;
///
/// let positions = get_positions("I have 3 cents.", "c.h");
/// assert_eq!(positions, vec![('h', 2), ('c', 9), ('.', 14)]);
/// ```
pub fn get_positions(text: &str, base: &str) -> PositionMap {
    text.chars()
        .enumerate()
        .filter(|(_, c)| base.contains(*c))
        .map(|(i, c)| (c, i))
        .collect()
}

/// Returns `text` without any character from `base`.
pub fn clean_text(text: &str, base: &str) -> String {
    text.chars().filter(|c| !base.contains(*c)).collect()
}

/// Inserts each recorded character back at its index.
///
/// Entries are applied in order, so a map produced by [`get_positions`]
/// restores the original text exactly. An index past the end appends.
pub fn insert_positions(text: &str, positions: &[(char, usize)]) -> String {
    let mut chars: Vec<char> = text.chars().collect();
    for &(c, index) in positions {
        let at = index.min(chars.len());
        chars.insert(at, c);
    }
    chars.into_iter().collect()
}
