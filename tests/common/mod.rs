// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![allow(dead_code)]

use std::sync::Arc;

use lazy_entity::{Client, ClientConfig, MemoryFetch};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

/// Install a test subscriber once; controlled by `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Client routed to `na1` over a shared in-memory transport.
pub fn client(fetch: MemoryFetch) -> (Client, Arc<MemoryFetch>) {
    init_tracing();
    let fetch = Arc::new(fetch);
    let config = ClientConfig::new()
        .default_platform("na1")
        .platforms(["na1", "euw1", "kr"]);
    (Client::with_config(Arc::clone(&fetch), config), fetch)
}

pub fn apex_entry(summoner_id: &str, points: i64) -> Value {
    json!({
        "summonerId": summoner_id,
        "summonerName": format!("name-{}", summoner_id),
        "leaguePoints": points,
        "rank": "I",
        "wins": 120,
        "losses": 80,
        "veteran": true,
        "inactive": false,
        "freshBlood": false,
        "hotStreak": points > 1000
    })
}

pub fn challenger_payload() -> Value {
    json!({
        "tier": "CHALLENGER",
        "leagueId": "league-1",
        "queue": "RANKED_SOLO_5x5",
        "name": "Ahri's Duelists",
        "entries": [apex_entry("s-1", 1400), apex_entry("s-2", 900)]
    })
}

pub fn ranked_entry(summoner_id: &str, queue: &str, tier: &str) -> Value {
    json!({
        "leagueId": format!("league-{}", tier.to_lowercase()),
        "summonerId": summoner_id,
        "summonerName": format!("name-{}", summoner_id),
        "queueType": queue,
        "tier": tier,
        "rank": "II",
        "leaguePoints": 42,
        "wins": 10,
        "losses": 9,
        "veteran": false,
        "inactive": false,
        "freshBlood": true,
        "hotStreak": false,
        "miniSeries": {"target": 3, "wins": 1, "losses": 0, "progress": "WNN"}
    })
}

pub fn summoner_payload(id: &str) -> Value {
    json!({
        "id": id,
        "accountId": format!("account-{}", id),
        "puuid": format!("puuid-{}", id),
        "name": format!("name-{}", id),
        "profileIconId": 4568,
        "revisionDate": 1_700_000_000_000_i64,
        "summonerLevel": 512
    })
}
