//! Parsing of NOID's line-oriented text responses.

/// Marker that precedes every freshly minted identifier.
pub const MINT_MARKER: &str = "id: ";

/// Substring NOID prints when `validate` rejects an identifier.
///
/// Matched anywhere in the output, so an element value containing the literal text
/// also reads as a rejection.
pub const INVALID_MARKER: &str = "iderr";

/// Every identifier announced in a `mint` response, in output order.
pub fn minted_ids(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| {
            line.find(MINT_MARKER)
                .map(|pos| line[pos + MINT_MARKER.len()..].trim())
        })
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn is_rejected(output: &str) -> bool {
    output.contains(INVALID_MARKER)
}

/// `None` for blank output, otherwise the text untouched.
pub fn non_empty(output: String) -> Option<String> {
    if output.trim().is_empty() {
        None
    } else {
        Some(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_mint() {
        assert_eq!(minted_ids("id: 77981/gmgs1zcrnw\n"), vec!["77981/gmgs1zcrnw"]);
    }

    #[test]
    fn test_multiple_mint_lines() {
        let out = "id: 77981/a1\nid: 77981/b2\nid: 77981/c3\n";
        assert_eq!(minted_ids(out), vec!["77981/a1", "77981/b2", "77981/c3"]);
    }

    #[test]
    fn test_marker_not_at_line_start() {
        assert_eq!(minted_ids("note: new id: 77981/zz  \n"), vec!["77981/zz"]);
    }

    #[test]
    fn test_missing_marker() {
        assert!(minted_ids("error: minter exhausted").is_empty());
        assert!(minted_ids("").is_empty());
        assert!(minted_ids("id: \n").is_empty());
    }

    #[test]
    fn test_rejection_is_substring_match() {
        assert!(is_rejected("iderr: 99999/x not valid"));
        assert!(is_rejected("title: my-iderr-notes"));
        assert!(!is_rejected("id: 77981/gmgs1zcrnw"));
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(" \n".to_string()), None);
        assert_eq!(non_empty("a: b\n".to_string()), Some("a: b\n".to_string()));
    }
}
