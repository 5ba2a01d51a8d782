use crate::models::{
    GridCell, GridResponse, GridRow, Layout, MemberRoster, SessionCatalog, SessionCell,
};
use crate::roster::{attendees_of, is_common};

/// Builds the render-ready grid in one left-to-right, top-to-bottom sweep.
///
/// Columns consumed by an earlier cell's colspan are skipped for the rest of
/// that row only; consumption never carries into the next time slot. Cells
/// with no matching session become empty placeholders. When `highlight` names
/// a roster member, cells for that member's sessions are marked.
pub fn build_grid(
    layout: &Layout,
    catalog: &SessionCatalog,
    roster: &MemberRoster,
    highlight: Option<&str>,
) -> GridResponse {
    let highlighted_sessions: &[String] = highlight
        .and_then(|name| roster.find(name))
        .map(|member| member.sessions.as_slice())
        .unwrap_or(&[]);

    let mut rows = Vec::with_capacity(layout.time_slots.len());
    for slot in &layout.time_slots {
        let mut consumed = vec![false; layout.rooms.len()];
        let mut cells = Vec::new();

        for (column, room) in layout.rooms.iter().enumerate() {
            if consumed[column] {
                continue;
            }

            let session = catalog
                .sessions
                .iter()
                .find(|s| s.time_slot == slot.id && s.room == room.code);

            match session {
                Some(session) => {
                    for offset in 1..session.colspan as usize {
                        if column + offset < consumed.len() {
                            consumed[column + offset] = true;
                        }
                    }
                    cells.push(GridCell::Session(SessionCell {
                        code: session.code.clone(),
                        name: session.name.clone(),
                        speaker: session.speaker.clone(),
                        colspan: session.colspan,
                        no_replay: session.no_replay,
                        common: is_common(&session.code),
                        highlighted: highlighted_sessions.iter().any(|c| c == &session.code),
                        attendees: attendees_of(roster, &session.code),
                    }));
                }
                None => cells.push(GridCell::Empty),
            }
        }

        rows.push(GridRow {
            time: slot.time.clone(),
            cells,
        });
    }

    GridResponse {
        rooms: layout.rooms.clone(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Member, Room, Session, TimeSlot};

    fn layout() -> Layout {
        Layout {
            rooms: vec![room("A"), room("B"), room("C")],
            time_slots: vec![slot("t1", "9:00"), slot("t2", "10:00")],
        }
    }

    fn room(code: &str) -> Room {
        Room {
            code: code.into(),
            name: format!("Room {code}"),
            floor: "1F".into(),
        }
    }

    fn slot(id: &str, time: &str) -> TimeSlot {
        TimeSlot {
            id: id.into(),
            time: time.into(),
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

    fn roster(members: Vec<Member>) -> MemberRoster {
        MemberRoster { members }
    }

    fn cell_code(cell: &GridCell) -> Option<&str> {
        match cell {
            GridCell::Session(cell) => Some(cell.code.as_str()),
            GridCell::Empty => None,
        }
    }

    #[test]
    fn colspan_consumes_following_columns_in_its_row_only() {
        let catalog = SessionCatalog {
            sessions: vec![
                session("S1", "t1", "A", 1),
                session("S2", "t1", "B", 2),
                session("S3", "t2", "B", 1),
            ],
        };
        let grid = build_grid(&layout(), &catalog, &roster(vec![]), None);

        // row t1: S1, then S2 spanning B and C; no third cell
        assert_eq!(grid.rows[0].cells.len(), 2);
        assert_eq!(cell_code(&grid.rows[0].cells[0]), Some("S1"));
        assert_eq!(cell_code(&grid.rows[0].cells[1]), Some("S2"));

        // row t2: consumption did not carry over, all three columns present
        assert_eq!(grid.rows[1].cells.len(), 3);
        assert!(matches!(grid.rows[1].cells[0], GridCell::Empty));
        assert_eq!(cell_code(&grid.rows[1].cells[1]), Some("S3"));
        assert!(matches!(grid.rows[1].cells[2], GridCell::Empty));
    }

    #[test]
    fn full_width_session_renders_as_single_cell() {
        let catalog = SessionCatalog {
            sessions: vec![session("lunch", "t1", "A", 3)],
        };
        let grid = build_grid(&layout(), &catalog, &roster(vec![]), None);

        assert_eq!(grid.rows[0].cells.len(), 1);
        match &grid.rows[0].cells[0] {
            GridCell::Session(cell) => {
                assert_eq!(cell.colspan, 3);
                assert!(cell.common);
            }
            GridCell::Empty => panic!("expected a session cell"),
        }
    }

    #[test]
    fn unmatched_cells_are_empty_placeholders() {
        let catalog = SessionCatalog { sessions: vec![] };
        let grid = build_grid(&layout(), &catalog, &roster(vec![]), None);

        assert_eq!(grid.rows.len(), 2);
        for row in &grid.rows {
            assert_eq!(row.cells.len(), 3);
            assert!(row.cells.iter().all(|c| matches!(c, GridCell::Empty)));
        }
    }

    #[test]
    fn member_sessions_are_tagged_and_highlighted() {
        // layout {A, 9:00}, catalog {S1 @ (9:00, A)}, roster {alice: [S1]}
        let layout = Layout {
            rooms: vec![room("A")],
            time_slots: vec![slot("t1", "9:00")],
        };
        let catalog = SessionCatalog {
            sessions: vec![session("S1", "t1", "A", 1)],
        };
        let members = roster(vec![Member {
            name: "alice".into(),
            sessions: vec!["S1".into()],
        }]);

        let grid = build_grid(&layout, &catalog, &members, Some("alice"));
        match &grid.rows[0].cells[0] {
            GridCell::Session(cell) => {
                assert_eq!(cell.code, "S1");
                assert_eq!(cell.attendees, vec!["alice"]);
                assert!(cell.highlighted);
            }
            GridCell::Empty => panic!("expected session S1 at (9:00, A)"),
        }

        let unfiltered = build_grid(&layout, &catalog, &members, None);
        match &unfiltered.rows[0].cells[0] {
            GridCell::Session(cell) => assert!(!cell.highlighted),
            GridCell::Empty => panic!("expected session S1 at (9:00, A)"),
        }
    }

    #[test]
    fn unknown_highlight_member_marks_nothing() {
        let catalog = SessionCatalog {
            sessions: vec![session("S1", "t1", "A", 1)],
        };
        let grid = build_grid(&layout(), &catalog, &roster(vec![]), Some("nobody"));
        match &grid.rows[0].cells[0] {
            GridCell::Session(cell) => assert!(!cell.highlighted),
            GridCell::Empty => panic!("expected a session cell"),
        }
    }
}
