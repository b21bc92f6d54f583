// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

mod common;

use lazy_entity::{
    MemoryFetch,
    lol::{Summoner, SummonerLeagueRef},
    prelude::*
};

use common::{client, summoner_payload};

#[tokio::test]
async fn each_identifier_selects_its_own_endpoint() {
    let (client, fetch) = client(
        MemoryFetch::new()
            .respond("summoner_v4_by_id", &["s-1"], summoner_payload("s-1"))
            .respond("summoner_v4_by_name", &["name-s-1"], summoner_payload("s-1"))
            .respond("summoner_v4_by_account_id", &["account-s-1"], summoner_payload("s-1"))
            .respond("summoner_v4_by_puuid", &["puuid-s-1"], summoner_payload("s-1"))
    );

    let lookups = [
        Summoner::new(&client, Some("s-1"), None, None, None).unwrap(),
        Summoner::new(&client, None, Some("account-s-1"), None, None).unwrap(),
        Summoner::new(&client, None, None, Some("name-s-1"), None).unwrap(),
        Summoner::new(&client, None, None, None, Some("puuid-s-1")).unwrap()
    ];
    for summoner in &lookups {
        let data = summoner.resolve().await.unwrap();
        assert_eq!(data.id, "s-1");
        assert_eq!(data.puuid, "puuid-s-1");
        assert_eq!(data.profile_icon_id, 4568);
        assert_eq!(data.revision_date, 1_700_000_000_000);
        assert_eq!(data.summoner_level, 512);
    }

    let endpoints: Vec<_> = fetch
        .requests()
        .into_iter()
        .map(|request| request.endpoint)
        .collect();
    assert_eq!(
        endpoints,
        [
            "summoner_v4_by_id",
            "summoner_v4_by_account_id",
            "summoner_v4_by_name",
            "summoner_v4_by_puuid"
        ]
    );
}

#[tokio::test]
async fn mixed_identifiers_match_no_rule() {
    let (client, fetch) = client(MemoryFetch::new());

    let summoner = Summoner::new(&client, Some("s-1"), None, Some("name-s-1"), None).unwrap();
    match summoner.resolve().await.unwrap_err() {
        Error::NoMatchingRule {
            entity,
            bound
        } => {
            assert_eq!(entity, "Summoner");
            assert_eq!(bound, ["id", "name"]);
        }
        other => panic!("expected NoMatchingRule, got {:?}", other)
    }

    let unbound = Summoner::new(&client, None, None, None, None).unwrap();
    assert!(unbound.resolve().await.unwrap_err().is_rule());
    assert_eq!(fetch.calls(), 0);
}

#[tokio::test]
async fn league_entries_use_the_bound_id_without_io() {
    let (client, fetch) = client(MemoryFetch::new());
    let summoner = Summoner::new(&client, Some("s-1"), None, None, None).unwrap();

    let entries = summoner.league_entries().await.unwrap();
    assert_eq!(entries.params().get("summoner_id"), Some("s-1"));
    assert_eq!(entries.phase(), Phase::Unresolved);
    assert_eq!(fetch.calls(), 0);
}

#[tokio::test]
async fn league_entries_resolve_the_summoner_when_needed() {
    let (client, fetch) = client(MemoryFetch::new().respond(
        "summoner_v4_by_puuid",
        &["puuid-s-3"],
        summoner_payload("s-3")
    ));
    let summoner = Summoner::new(&client, None, None, None, Some("puuid-s-3"))
        .unwrap()
        .with_platform("kr")
        .unwrap();

    let entries = summoner.league_entries().await.unwrap();
    assert_eq!(entries.params().get("summoner_id"), Some("s-3"));
    assert_eq!(entries.platform(), Some("kr"));
    assert_eq!(fetch.calls(), 1);
    assert_eq!(fetch.requests()[0].platform.as_deref(), Some("kr"));
}
