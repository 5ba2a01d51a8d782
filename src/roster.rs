use crate::models::MemberRoster;

/// Logistics-only codes (check-in, opening, lunch). Permanently excluded
/// from enrollment regardless of the selected member.
pub const COMMON_SESSION_CODES: [&str; 3] = ["checkin", "opening", "lunch"];

pub fn is_common(code: &str) -> bool {
    COMMON_SESSION_CODES.contains(&code)
}

pub fn attendees_of(roster: &MemberRoster, code: &str) -> Vec<String> {
    roster
        .members
        .iter()
        .filter(|member| member.sessions.iter().any(|c| c == code))
        .map(|member| member.name.clone())
        .collect()
}

/// The set with `code` appended, or `None` when it is already present.
pub fn with_session(sessions: &[String], code: &str) -> Option<Vec<String>> {
    if sessions.iter().any(|c| c == code) {
        return None;
    }
    let mut next = sessions.to_vec();
    next.push(code.to_string());
    Some(next)
}

/// The set with `code` removed, or `None` when it was never present.
pub fn without_session(sessions: &[String], code: &str) -> Option<Vec<String>> {
    if !sessions.iter().any(|c| c == code) {
        return None;
    }
    Some(
        sessions
            .iter()
            .filter(|c| c.as_str() != code)
            .cloned()
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Member;

    #[test]
    fn with_session_is_idempotent() {
        let once = with_session(&[], "S1").unwrap();
        assert_eq!(once, vec!["S1".to_string()]);
        assert!(with_session(&once, "S1").is_none());
    }

    #[test]
    fn with_session_grows_by_exactly_one() {
        let sessions = vec!["S2".to_string(), "S3".to_string()];
        let next = with_session(&sessions, "S1").unwrap();
        assert_eq!(next.len(), sessions.len() + 1);
        assert!(next.contains(&"S1".to_string()));
    }

    #[test]
    fn without_session_on_absent_code_is_noop() {
        let sessions = vec!["S2".to_string()];
        assert!(without_session(&sessions, "S1").is_none());
    }

    #[test]
    fn without_session_removes_the_code() {
        let sessions = vec!["S1".to_string(), "S2".to_string()];
        let next = without_session(&sessions, "S1").unwrap();
        assert_eq!(next, vec!["S2".to_string()]);
    }

    #[test]
    fn common_codes_are_flagged() {
        for code in COMMON_SESSION_CODES {
            assert!(is_common(code));
        }
        assert!(!is_common("S1"));
    }

    #[test]
    fn attendees_follow_roster_order() {
        let roster = MemberRoster {
            members: vec![
                Member {
                    name: "alice".into(),
                    sessions: vec!["S1".into()],
                },
                Member {
                    name: "bob".into(),
                    sessions: vec!["S2".into()],
                },
                Member {
                    name: "carol".into(),
                    sessions: vec!["S2".into(), "S1".into()],
                },
            ],
        };
        assert_eq!(attendees_of(&roster, "S1"), vec!["alice", "carol"]);
        assert!(attendees_of(&roster, "S9").is_empty());
    }
}
