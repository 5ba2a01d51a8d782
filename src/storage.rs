use crate::errors::AppError;
use crate::models::{Layout, MemberRoster, SessionCatalog};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

pub const KEY_CURRENT_USER: &str = "board-current-user";
pub const KEY_ROSTER_SNAPSHOT: &str = "board-roster";
pub const KEY_SHEETS_API_KEY: &str = "sheets-api-key";
pub const KEY_SHEETS_WRITE_URL: &str = "sheets-write-url";

pub fn resolve_data_dir() -> PathBuf {
    env::var("BOARD_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

pub fn resolve_state_path() -> PathBuf {
    env::var("BOARD_STATE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data/state.json"))
}

#[derive(Debug, Clone)]
pub struct Documents {
    pub layout: Layout,
    pub catalog: SessionCatalog,
    pub roster: MemberRoster,
}

/// Loads layout, session catalog, and member roster concurrently. Any failure
/// fails the whole initialization; there is no partial result and no retry.
pub async fn load_documents(dir: &Path) -> Result<Documents, AppError> {
    let (layout, catalog, roster) = tokio::try_join!(
        read_json::<Layout>(dir.join("layout.json")),
        read_json::<SessionCatalog>(dir.join("sessions.json")),
        read_json::<MemberRoster>(dir.join("members.json")),
    )?;

    validate_layout(&layout).map_err(AppError::bad_request)?;
    validate_catalog(&layout, &catalog).map_err(AppError::bad_request)?;
    validate_roster(&roster).map_err(AppError::bad_request)?;

    Ok(Documents {
        layout,
        catalog,
        roster,
    })
}

async fn read_json<T: serde::de::DeserializeOwned>(path: PathBuf) -> Result<T, AppError> {
    let bytes = fs::read(&path)
        .await
        .map_err(|err| document_error(&path, err))?;
    serde_json::from_slice(&bytes).map_err(|err| document_error(&path, err))
}

fn document_error(path: &Path, err: impl std::fmt::Display) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: format!("failed to load {}: {err}", path.display()),
    }
}

pub fn validate_layout(layout: &Layout) -> Result<(), String> {
    let mut room_codes = HashSet::new();
    for room in &layout.rooms {
        if room.code.trim().is_empty() {
            return Err("layout contains a room with an empty code".into());
        }
        if !room_codes.insert(room.code.as_str()) {
            return Err(format!("duplicate room code '{}' in layout", room.code));
        }
    }

    let mut slot_ids = HashSet::new();
    for slot in &layout.time_slots {
        if slot.id.trim().is_empty() {
            return Err("layout contains a time slot with an empty id".into());
        }
        if !slot_ids.insert(slot.id.as_str()) {
            return Err(format!("duplicate time slot id '{}' in layout", slot.id));
        }
    }

    Ok(())
}

/// Rejects catalogs that would produce an ambiguous grid: unknown rooms or
/// time slots, colspans running past the last column, duplicate codes, and
/// two sessions claiming the same cell (colspan occupancy included).
pub fn validate_catalog(layout: &Layout, catalog: &SessionCatalog) -> Result<(), String> {
    let room_index: BTreeMap<&str, usize> = layout
        .rooms
        .iter()
        .enumerate()
        .map(|(index, room)| (room.code.as_str(), index))
        .collect();
    let slot_ids: HashSet<&str> = layout
        .time_slots
        .iter()
        .map(|slot| slot.id.as_str())
        .collect();

    let mut codes = HashSet::new();
    let mut occupied = HashSet::new();

    for session in &catalog.sessions {
        if session.code.trim().is_empty() {
            return Err("catalog contains a session with an empty code".into());
        }
        if !codes.insert(session.code.as_str()) {
            return Err(format!("duplicate session code '{}'", session.code));
        }
        if !slot_ids.contains(session.time_slot.as_str()) {
            return Err(format!(
                "session '{}' references unknown time slot '{}'",
                session.code, session.time_slot
            ));
        }
        let Some(&column) = room_index.get(session.room.as_str()) else {
            return Err(format!(
                "session '{}' references unknown room '{}'",
                session.code, session.room
            ));
        };
        if session.colspan < 1 {
            return Err(format!("session '{}' has colspan 0", session.code));
        }
        if column + session.colspan as usize > layout.rooms.len() {
            return Err(format!(
                "session '{}' spans past the last room column",
                session.code
            ));
        }
        for offset in 0..session.colspan as usize {
            if !occupied.insert((session.time_slot.as_str(), column + offset)) {
                return Err(format!(
                    "session '{}' overlaps another session at time slot '{}'",
                    session.code, session.time_slot
                ));
            }
        }
    }

    Ok(())
}

pub fn validate_roster(roster: &MemberRoster) -> Result<(), String> {
    let mut names = HashSet::new();
    for member in &roster.members {
        if member.name.trim().is_empty() {
            return Err("roster contains a member with an empty name".into());
        }
        if !names.insert(member.name.as_str()) {
            return Err(format!("duplicate member name '{}' in roster", member.name));
        }
    }
    Ok(())
}

/// Persistent key/value entries, rewritten as one JSON file on every mutation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocalStore {
    pub entries: BTreeMap<String, String>,
}

impl LocalStore {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.entries.insert(key.to_string(), value.into());
    }

    pub fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    pub fn roster_snapshot(&self) -> Option<MemberRoster> {
        let raw = self.get(KEY_ROSTER_SNAPSHOT)?;
        match serde_json::from_str(raw) {
            Ok(roster) => Some(roster),
            Err(err) => {
                error!("ignoring corrupt roster snapshot: {err}");
                None
            }
        }
    }

    pub fn set_roster_snapshot(&mut self, roster: &MemberRoster) -> Result<(), AppError> {
        let raw = serde_json::to_string(roster).map_err(AppError::internal)?;
        self.set(KEY_ROSTER_SNAPSHOT, raw);
        Ok(())
    }
}

pub async fn load_store(path: &Path) -> LocalStore {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(store) => store,
            Err(err) => {
                error!("failed to parse state file: {err}");
                LocalStore::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => LocalStore::default(),
        Err(err) => {
            error!("failed to read state file: {err}");
            LocalStore::default()
        }
    }
}

pub async fn persist_store(path: &Path, store: &LocalStore) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(store).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Member, Room, Session, TimeSlot};

    fn layout() -> Layout {
        Layout {
            rooms: vec![
                Room {
                    code: "A".into(),
                    name: "Main Hall".into(),
                    floor: "1F".into(),
                },
                Room {
                    code: "B".into(),
                    name: "Workshop".into(),
                    floor: "2F".into(),
                },
                Room {
                    code: "C".into(),
                    name: "Lab".into(),
                    floor: "2F".into(),
                },
            ],
            time_slots: vec![
                TimeSlot {
                    id: "t1".into(),
                    time: "9:00".into(),
                },
                TimeSlot {
                    id: "t2".into(),
                    time: "10:00".into(),
                },
            ],
        }
    }

    fn session(code: &str, slot: &str, room: &str, colspan: u32) -> Session {
        Session {
            code: code.into(),
            name: format!("Session {code}"),
            speaker: "Speaker".into(),
            time_slot: slot.into(),
            room: room.into(),
            colspan,
            no_replay: false,
        }
    }

    #[test]
    fn accepts_disjoint_sessions() {
        let catalog = SessionCatalog {
            sessions: vec![
                session("S1", "t1", "A", 1),
                session("S2", "t1", "B", 2),
                session("S3", "t2", "A", 3),
            ],
        };
        assert!(validate_catalog(&layout(), &catalog).is_ok());
    }

    #[test]
    fn rejects_overlap_under_colspan() {
        let catalog = SessionCatalog {
            sessions: vec![session("S1", "t1", "A", 2), session("S2", "t1", "B", 1)],
        };
        let err = validate_catalog(&layout(), &catalog).unwrap_err();
        assert!(err.contains("overlaps"), "unexpected message: {err}");
    }

    #[test]
    fn rejects_colspan_past_last_column() {
        let catalog = SessionCatalog {
            sessions: vec![session("S1", "t1", "C", 2)],
        };
        let err = validate_catalog(&layout(), &catalog).unwrap_err();
        assert!(err.contains("spans past"), "unexpected message: {err}");
    }

    #[test]
    fn rejects_unknown_room_and_duplicate_code() {
        let unknown = SessionCatalog {
            sessions: vec![session("S1", "t1", "Z", 1)],
        };
        assert!(validate_catalog(&layout(), &unknown).is_err());

        let duplicate = SessionCatalog {
            sessions: vec![session("S1", "t1", "A", 1), session("S1", "t2", "B", 1)],
        };
        assert!(validate_catalog(&layout(), &duplicate).is_err());
    }

    #[test]
    fn overlap_is_scoped_to_one_row() {
        // colspan consumption never carries into the next time slot
        let catalog = SessionCatalog {
            sessions: vec![session("S1", "t1", "A", 3), session("S2", "t2", "B", 1)],
        };
        assert!(validate_catalog(&layout(), &catalog).is_ok());
    }

    #[test]
    fn rejects_duplicate_member_names() {
        let roster = MemberRoster {
            members: vec![
                Member {
                    name: "alice".into(),
                    sessions: vec![],
                },
                Member {
                    name: "alice".into(),
                    sessions: vec![],
                },
            ],
        };
        assert!(validate_roster(&roster).is_err());
    }

    #[test]
    fn store_roundtrips_roster_snapshot() {
        let mut store = LocalStore::default();
        let roster = MemberRoster {
            members: vec![Member {
                name: "bob".into(),
                sessions: vec!["S1".into()],
            }],
        };
        store.set_roster_snapshot(&roster).unwrap();
        let restored = store.roster_snapshot().unwrap();
        assert_eq!(restored.members.len(), 1);
        assert_eq!(restored.members[0].sessions, vec!["S1".to_string()]);
    }
}
