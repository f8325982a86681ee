//! Authorized-MAC list parsing.

use crate::reconciler::AuthorizationSet;

/// Parse an authorized-MAC list: one raw token per line, `#`-prefixed lines
/// and blank lines ignored. Malformed tokens are skipped and counted by the
/// [`AuthorizationSet`] builder.
pub fn parse_auth_list(content: &str) -> AuthorizationSet {
    AuthorizationSet::from_tokens(
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#')),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::mac;

    #[test]
    fn test_parse_auth_list() {
        let content = "\
# authorized devices
aa:bb:cc:00:00:01
AABBCC000002

invalid-entry
";
        let set = parse_auth_list(content);
        assert_eq!(set.len(), 2);
        assert!(set.contains(&mac("aa:bb:cc:00:00:01")));
        assert!(set.contains(&mac("aa:bb:cc:00:00:02")));
        assert_eq!(set.skipped(), 1);
    }

    #[test]
    fn test_parse_auth_list_empty() {
        let set = parse_auth_list("");
        assert!(set.is_empty());
        assert_eq!(set.skipped(), 0);
    }
}
