use serde::{Deserialize, Serialize};

/// Room (space) visible to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    #[serde(default)]
    pub title: String,
}

/// Response of `GET /rooms`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Rooms {
    #[serde(default)]
    pub items: Vec<Room>,
}

impl Rooms {
    /// Rooms ordered by title, case-sensitive, ascending
    pub fn into_sorted(self) -> Vec<Room> {
        let mut items = self.items;
        items.sort_by(|a, b| a.title.cmp(&b.title));
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rooms_response() {
        let body = r#"{
            "items": [
                {"id": "Y2lz1", "title": "Ops", "type": "group", "isLocked": false},
                {"id": "Y2lz2", "title": "Build", "type": "direct"}
            ]
        }"#;
        let rooms: Rooms = serde_json::from_str(body).unwrap();
        assert_eq!(rooms.items.len(), 2);
        assert_eq!(rooms.items[0].id, "Y2lz1");
        assert_eq!(rooms.items[1].title, "Build");
    }

    fn room(id: &str, title: &str) -> Room {
        Room {
            id: id.into(),
            title: title.into(),
        }
    }

    #[test]
    fn test_untitled_room_is_kept() {
        let body = r#"{"items": [{"id": "Y2lz1", "title": "Ops"}, {"id": "Y2lz2"}]}"#;
        let rooms = serde_json::from_str::<Rooms>(body).unwrap().into_sorted();
        assert_eq!(rooms, vec![room("Y2lz2", ""), room("Y2lz1", "Ops")]);
    }

    #[test]
    fn test_sorted_by_title() {
        let rooms = Rooms {
            items: vec![room("3", "beta"), room("1", "Zulu"), room("2", "Alpha")],
        };
        let titles: Vec<String> = rooms.into_sorted().into_iter().map(|r| r.title).collect();
        // Upper case sorts before lower case
        assert_eq!(titles, vec!["Alpha", "Zulu", "beta"]);
    }
}
