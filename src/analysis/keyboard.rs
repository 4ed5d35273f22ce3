// qwerty adjacency table for keyboard-walk detection

/// base keys of the reference layout, top row first.
/// row r+1 is staggered half a key to the right of row r, so key (r, c)
/// touches (r-1, c) and (r-1, c+1) above and (r+1, c-1) and (r+1, c) below.
const ROWS: [&str; 4] = ["1234567890-=", "qwertyuiop[]\\", "asdfghjkl;'", "zxcvbnm,./"];

/// shifted symbols, position-aligned with ROWS
const SHIFTED_ROWS: [&str; 4] = ["!@#$%^&*()_+", "QWERTYUIOP{}|", "ASDFGHJKL:\"", "ZXCVBNM<>?"];

/// minimum number of keys for a run to count as a walk
pub const MIN_WALK_LEN: usize = 4;

/// (row, column) of a character on the reference layout, case-insensitive
pub fn key_position(c: char) -> Option<(usize, usize)> {
    let lowered = c.to_ascii_lowercase();
    for (row, (base, shifted)) in ROWS.iter().zip(SHIFTED_ROWS.iter()).enumerate() {
        if let Some(col) = base.chars().position(|k| k == lowered) {
            return Some((row, col));
        }
        if let Some(col) = shifted.chars().position(|k| k == c) {
            return Some((row, col));
        }
    }
    None
}

/// true when two distinct keys touch on the reference layout
pub fn adjacent(a: char, b: char) -> bool {
    let (Some((ra, ca)), Some((rb, cb))) = (key_position(a), key_position(b)) else {
        return false;
    };
    if ra == rb {
        return ca.abs_diff(cb) == 1;
    }
    if rb + 1 == ra {
        // b is on the row above a
        return cb == ca || cb == ca + 1;
    }
    if ra + 1 == rb {
        // b is on the row below a
        return cb == ca || cb + 1 == ca;
    }
    false
}

/// find maximal runs of adjacent keys at least MIN_WALK_LEN long.
/// returns (start, len) pairs in code-point offsets.
pub fn find_walks(chars: &[char]) -> Vec<(usize, usize)> {
    let mut walks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let mut end = start;
        while end + 1 < chars.len() && adjacent(chars[end], chars[end + 1]) {
            end += 1;
        }
        let len = end - start + 1;
        if len >= MIN_WALK_LEN {
            walks.push((start, len));
        }
        start = end + 1;
    }

    walks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn same_row_neighbours() {
        assert!(adjacent('q', 'w'));
        assert!(adjacent('w', 'q'));
        assert!(adjacent('1', '2'));
        assert!(!adjacent('q', 'e'));
    }

    #[test]
    fn staggered_diagonals() {
        // a sits below q and w
        assert!(adjacent('a', 'q'));
        assert!(adjacent('a', 'w'));
        assert!(adjacent('q', 'a'));
        assert!(!adjacent('a', 'e'));
        // z sits below a and s
        assert!(adjacent('z', 's'));
        assert!(adjacent('s', 'z'));
    }

    #[test]
    fn shifted_and_case_insensitive() {
        assert!(adjacent('Q', 'w'));
        assert!(adjacent('!', '@'));
        assert_eq!(key_position('!'), key_position('1'));
        assert_eq!(key_position('A'), key_position('a'));
    }

    #[test]
    fn unknown_keys_never_adjacent() {
        assert!(!adjacent('é', 'q'));
        assert!(!adjacent(' ', 'q'));
        assert!(!adjacent('q', 'q'));
    }

    #[test]
    fn finds_qwerty_walk() {
        assert_eq!(find_walks(&chars("qwerty")), vec![(0, 6)]);
        assert_eq!(find_walks(&chars("xxasdfxx")), vec![(2, 4)]);
    }

    #[test]
    fn finds_both_walks_in_mixed_case() {
        let walks = find_walks(&chars("qwertyQWERTY123!"));
        assert_eq!(walks, vec![(0, 6), (6, 6)]);
    }

    #[test]
    fn short_runs_are_ignored() {
        assert!(find_walks(&chars("qwe")).is_empty());
        assert!(find_walks(&chars("d1c4ba23")).is_empty());
        assert!(find_walks(&chars("")).is_empty());
    }
}
