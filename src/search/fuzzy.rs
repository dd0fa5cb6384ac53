//! Edit-distance budget for fuzzy term matching.

/// Tokens shorter than this must match exactly.
const ONE_EDIT_MIN_CHARS: usize = 3;
/// Tokens at least this long tolerate two edits.
const TWO_EDITS_MIN_CHARS: usize = 6;

/// Returns the edit distance tolerated for a query token.
///
/// Short tokens match exactly, medium tokens allow one edit and long tokens
/// allow two, so "rockt" still finds "rocket" while "id" does not find "is".
pub fn auto_distance(token: &str) -> u8 {
    let len = token.chars().count();
    if len < ONE_EDIT_MIN_CHARS {
        0
    } else if len < TWO_EDITS_MIN_CHARS {
        1
    } else {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_tokens_are_exact() {
        assert_eq!(auto_distance("a"), 0);
        assert_eq!(auto_distance("id"), 0);
    }

    #[test]
    fn medium_tokens_allow_one_edit() {
        assert_eq!(auto_distance("web"), 1);
        assert_eq!(auto_distance("fuels"), 1);
    }

    #[test]
    fn long_tokens_allow_two_edits() {
        assert_eq!(auto_distance("rocket"), 2);
        assert_eq!(auto_distance("reconciliation"), 2);
    }

    #[test]
    fn length_counts_chars_not_bytes() {
        // three chars, nine bytes
        assert_eq!(auto_distance("日本語"), 1);
    }
}
