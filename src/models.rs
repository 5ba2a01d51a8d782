use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub code: String,
    pub name: String,
    pub floor: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: String,
    pub time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub rooms: Vec<Room>,
    pub time_slots: Vec<TimeSlot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub code: String,
    pub name: String,
    pub speaker: String,
    pub time_slot: String,
    pub room: String,
    #[serde(default = "default_colspan")]
    pub colspan: u32,
    #[serde(default)]
    pub no_replay: bool,
}

fn default_colspan() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCatalog {
    pub sessions: Vec<Session>,
}

impl SessionCatalog {
    pub fn find(&self, code: &str) -> Option<&Session> {
        self.sessions.iter().find(|session| session.code == code)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Member {
    pub name: String,
    #[serde(default)]
    pub sessions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MemberRoster {
    pub members: Vec<Member>,
}

impl MemberRoster {
    pub fn find(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|member| member.name == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Member> {
        self.members.iter_mut().find(|member| member.name == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RosterSource {
    Static,
    Snapshot,
    Remote,
}

#[derive(Debug, Clone, Serialize)]
pub struct GridResponse {
    pub rooms: Vec<Room>,
    pub rows: Vec<GridRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GridRow {
    pub time: String,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GridCell {
    Session(SessionCell),
    Empty,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionCell {
    pub code: String,
    pub name: String,
    pub speaker: String,
    pub colspan: u32,
    pub no_replay: bool,
    pub common: bool,
    pub highlighted: bool,
    pub attendees: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MembersResponse {
    pub source: RosterSource,
    pub members: Vec<Member>,
}

#[derive(Debug, Serialize)]
pub struct SessionDetailResponse {
    pub code: String,
    pub name: String,
    pub speaker: String,
    pub time: String,
    pub room: String,
    pub no_replay: bool,
    pub common: bool,
    pub attendees: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct GridQuery {
    pub member: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectUserRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EnrollRequest {
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct EnrollResponse {
    pub member: String,
    pub code: String,
    pub changed: bool,
    pub sessions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SettingsRequest {
    pub api_key: Option<String>,
    pub write_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub sheets_configured: bool,
    pub write_configured: bool,
    pub roster_source: RosterSource,
}
