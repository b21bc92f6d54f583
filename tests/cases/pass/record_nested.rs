// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use lazy_entity::{Decode, Record};
use serde_json::json;

#[derive(Debug, Record)]
pub struct Series {
    pub target:   i32,
    pub wins:     i32,
    pub progress: String
}

#[derive(Debug, Record)]
#[record(renamed(queue_type = "queue"))]
pub struct Standing {
    pub queue:       String,
    pub r#type:      Option<String>,
    pub series:      Option<Series>,
    pub recent:      Vec<Series>,
    pub raw:         serde_json::Value
}

fn main() {
    assert_eq!(Standing::FIELDS, ["queue", "type", "series", "recent", "raw"]);
    assert!(Standing::declares("series"));
    assert!(!Standing::declares("queue_type"));
    assert_eq!(Standing::renamed().to_declared("queue_type"), "queue");

    let payload = json!({
        "queue_type": "RANKED_SOLO_5x5",
        "series": {"target": 3, "wins": "1", "progress": "WNN"},
        "recent": [],
        "raw": [1, 2]
    });
    let standing = Standing::decode(Some(&payload)).unwrap();
    assert_eq!(standing.queue, "RANKED_SOLO_5x5");
    assert!(standing.r#type.is_none());
    assert_eq!(standing.series.as_ref().map(|s| s.wins), Some(1));
    assert!(standing.recent.is_empty());

    let broken = json!({"queue_type": "x", "recent": [{"target": 1, "wins": [], "progress": ""}], "raw": null});
    let mismatch = Standing::decode(Some(&broken)).unwrap_err();
    assert_eq!(mismatch.path(), "recent[0].wins");
}
