//! JSON-lines feed of wire user objects

use tgpeer_types::WireUser;

/// Outcome of reading one feed line
#[derive(Debug)]
pub enum FeedLine {
    /// Empty or whitespace-only line
    Blank,
    /// A wire user object
    User(WireUser),
    /// Line that is not a valid wire user object
    Malformed(serde_json::Error),
}

/// Classify one line of the feed
pub fn parse_line(line: &str) -> FeedLine {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return FeedLine::Blank;
    }

    match serde_json::from_str::<WireUser>(trimmed) {
        Ok(user) => FeedLine::User(user),
        Err(e) => FeedLine::Malformed(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines() {
        assert!(matches!(parse_line(""), FeedLine::Blank));
        assert!(matches!(parse_line("   \t"), FeedLine::Blank));
    }

    #[test]
    fn test_user_line() {
        match parse_line(r#" {"_": "userEmpty", "id": 3} "#) {
            FeedLine::User(user) => assert_eq!(user, WireUser::Empty { id: 3 }),
            other => panic!("Expected user, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_line() {
        assert!(matches!(parse_line("{not json"), FeedLine::Malformed(_)));
        assert!(matches!(
            parse_line(r#"{"_": "user"}"#),
            FeedLine::Malformed(_)
        ));
    }
}
