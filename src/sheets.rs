use crate::errors::AppError;
use crate::models::{Member, MemberRoster, RosterSource};
use crate::storage::{self, LocalStore, KEY_SHEETS_API_KEY, KEY_SHEETS_WRITE_URL};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::{info, warn};

const DEFAULT_API_ENDPOINT: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const DEFAULT_RANGE: &str = "A2:B8";

/// Spreadsheet access configuration. The credential and write endpoint each
/// resolve with the same precedence: explicit process environment first, then
/// the value recalled from the local store; absent both, the adapter is
/// inactive and callers use the static member document.
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub api_endpoint: String,
    pub spreadsheet_id: String,
    pub range: String,
    env_api_key: Option<String>,
    env_write_url: Option<String>,
}

impl SheetsConfig {
    pub fn from_env() -> Self {
        Self {
            api_endpoint: env::var("SHEETS_API_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_API_ENDPOINT.to_string()),
            spreadsheet_id: env::var("SHEETS_SPREADSHEET_ID").unwrap_or_default(),
            range: env::var("SHEETS_RANGE").unwrap_or_else(|_| DEFAULT_RANGE.to_string()),
            env_api_key: env::var("SHEETS_API_KEY").ok().filter(|v| !v.is_empty()),
            env_write_url: env::var("SHEETS_WRITE_URL").ok().filter(|v| !v.is_empty()),
        }
    }

    pub fn api_key(&self, store: &LocalStore) -> Option<String> {
        self.env_api_key
            .clone()
            .or_else(|| store.get(KEY_SHEETS_API_KEY).map(str::to_string))
    }

    pub fn write_url(&self, store: &LocalStore) -> Option<String> {
        self.env_write_url
            .clone()
            .or_else(|| store.get(KEY_SHEETS_WRITE_URL).map(str::to_string))
    }

    pub fn read_configured(&self, store: &LocalStore) -> bool {
        self.api_key(store).is_some() && !self.spreadsheet_id.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct UpdateMemberRequest<'a> {
    action: &'static str,
    #[serde(rename = "memberName")]
    member_name: &'a str,
    sessions: &'a [String],
}

#[derive(Debug, Deserialize)]
struct WriteAck {
    status: String,
    #[serde(default)]
    message: Option<String>,
}

pub async fn fetch_members(
    client: &reqwest::Client,
    config: &SheetsConfig,
    api_key: &str,
) -> Result<MemberRoster, AppError> {
    let url = format!(
        "{}/{}/values/{}?key={}",
        config.api_endpoint, config.spreadsheet_id, config.range, api_key
    );

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|err| AppError::bad_gateway(format!("roster fetch failed: {err}")))?;
    if !response.status().is_success() {
        return Err(AppError::bad_gateway(format!(
            "roster fetch failed: {}",
            response.status()
        )));
    }

    let range: ValueRange = response
        .json()
        .await
        .map_err(|err| AppError::bad_gateway(format!("roster fetch returned bad data: {err}")))?;

    Ok(parse_rows(range.values))
}

/// Column 1 is the member name, column 2 the session codes: a JSON-encoded
/// list first, a comma-separated list as fallback, anything else an empty
/// set. Rows with an empty name are discarded.
pub fn parse_rows(values: Vec<Vec<String>>) -> MemberRoster {
    let members = values
        .into_iter()
        .filter_map(|row| {
            let name = row.first().map(|s| s.trim().to_string())?;
            if name.is_empty() {
                return None;
            }
            let sessions = row.get(1).map(|raw| parse_sessions(raw)).unwrap_or_default();
            Some(Member { name, sessions })
        })
        .collect();

    MemberRoster { members }
}

fn parse_sessions(raw: &str) -> Vec<String> {
    if let Ok(codes) = serde_json::from_str::<Vec<String>>(raw) {
        return codes
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
    }
    raw.split(',')
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect()
}

/// Writes one member's session set through the separate write endpoint; the
/// read credential cannot write.
pub async fn push_member(
    client: &reqwest::Client,
    write_url: &str,
    member_name: &str,
    sessions: &[String],
) -> Result<(), AppError> {
    let response = client
        .post(write_url)
        .json(&UpdateMemberRequest {
            action: "updateMember",
            member_name,
            sessions,
        })
        .send()
        .await
        .map_err(|err| AppError::bad_gateway(format!("roster write failed: {err}")))?;
    if !response.status().is_success() {
        return Err(AppError::bad_gateway(format!(
            "roster write failed: {}",
            response.status()
        )));
    }

    let ack: WriteAck = response
        .json()
        .await
        .map_err(|err| AppError::bad_gateway(format!("roster write returned bad data: {err}")))?;
    if ack.status != "success" {
        let message = ack
            .message
            .unwrap_or_else(|| format!("roster write rejected with status '{}'", ack.status));
        return Err(AppError::bad_gateway(message));
    }

    Ok(())
}

/// Resolves the effective roster: the remote sheet when readable, otherwise
/// the persisted snapshot, otherwise the static document. A remote failure
/// falls back to the static document, never a partial merge, and never
/// throws.
pub async fn resolve_roster(
    client: &reqwest::Client,
    config: &SheetsConfig,
    store: &LocalStore,
    fallback: &MemberRoster,
) -> (MemberRoster, RosterSource) {
    if config.read_configured(store) {
        let api_key = match config.api_key(store) {
            Some(key) => key,
            None => return (fallback.clone(), RosterSource::Static),
        };
        match fetch_members(client, config, &api_key).await {
            Ok(roster) => match storage::validate_roster(&roster) {
                Ok(()) => {
                    info!("loaded {} members from spreadsheet", roster.members.len());
                    return (roster, RosterSource::Remote);
                }
                Err(err) => warn!("remote roster rejected, using static document: {err}"),
            },
            Err(err) => warn!("remote roster unavailable, using static document: {err}"),
        }
        return (fallback.clone(), RosterSource::Static);
    }

    if let Some(snapshot) = store.roster_snapshot() {
        return (snapshot, RosterSource::Snapshot);
    }

    (fallback.clone(), RosterSource::Static)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, sessions: &str) -> Vec<String> {
        vec![name.to_string(), sessions.to_string()]
    }

    #[test]
    fn parses_json_encoded_session_lists() {
        let roster = parse_rows(vec![row("alice", r#"["S1", "S2"]"#)]);
        assert_eq!(roster.members[0].name, "alice");
        assert_eq!(roster.members[0].sessions, vec!["S1", "S2"]);
    }

    #[test]
    fn falls_back_to_comma_separated_lists() {
        let roster = parse_rows(vec![row("bob", "S1, S2 ,S3")]);
        assert_eq!(roster.members[0].sessions, vec!["S1", "S2", "S3"]);
    }

    #[test]
    fn unparseable_sessions_become_empty_set() {
        let roster = parse_rows(vec![row("carol", ""), vec!["dave".to_string()]]);
        assert!(roster.members[0].sessions.is_empty());
        assert!(roster.members[1].sessions.is_empty());
    }

    #[test]
    fn rows_with_empty_names_are_discarded() {
        let roster = parse_rows(vec![row("", "S1"), row("  ", "S2"), row("erin", "S3")]);
        assert_eq!(roster.members.len(), 1);
        assert_eq!(roster.members[0].name, "erin");
    }

    #[test]
    fn json_list_entries_are_trimmed() {
        let roster = parse_rows(vec![row("frank", r#"[" S1 ", ""]"#)]);
        assert_eq!(roster.members[0].sessions, vec!["S1"]);
    }
}
