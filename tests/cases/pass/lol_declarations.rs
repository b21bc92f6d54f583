// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use lazy_entity::{
    Client, ClientConfig, Declaration, Entity, Lazy, Listing, MemoryFetch, Phase,
    lol::{
        ChallengerLeague, DivisionLeague, DivisionQuery, GrandmasterLeague, League, LeagueData,
        LeagueRef, MasterLeague, Summoner, SummonerLeague, SummonerLeagueData, SummonerRef
    }
};

fn league_shaped<E: Entity<Data = LeagueData>>(_: &Lazy<E>) {}

fn league_ref<T: LeagueRef>(_: &T) {}

fn listing<E>(_: &Lazy<E>)
where
    E: Entity,
    E::Data: Listing
{
}

fn main() {
    let client = Client::with_config(MemoryFetch::new(), ClientConfig::new().default_platform("na1"));

    let challenger = ChallengerLeague::new(&client, Some("RANKED_SOLO_5x5")).unwrap();
    let grandmaster = GrandmasterLeague::new(&client, Some("RANKED_FLEX_SR")).unwrap();
    let master = MasterLeague::new(&client, None).unwrap();
    league_shaped(&challenger);
    league_shaped(&grandmaster);
    league_shaped(&master);
    league_ref(&challenger);

    let league = League::new(&client, Some("abc")).unwrap();
    assert_eq!(league.platform(), Some("na1"));
    assert_eq!(league.phase(), Phase::Unresolved);

    let entries = SummonerLeague::new(&client, Some("summoner-1")).unwrap();
    listing(&entries);
    let summoner = entries.summoner().unwrap();
    assert_eq!(summoner.params().get("id"), Some("summoner-1"));

    let mut division = DivisionLeague::new(&client, Some("RANKED_SOLO_5x5"), Some("GOLD"), Some("II")).unwrap();
    listing(&division);
    division.with_query(DivisionQuery::new().page(2)).unwrap();
    assert!(division.summoner().unwrap_err().is_unsupported());

    let _: Option<SummonerLeagueData> = None;
    let by_puuid = Summoner::new(&client, None, None, None, Some("p-1")).unwrap();
    assert_eq!(by_puuid.params().names(), ["puuid"]);
    assert_eq!(DivisionLeague::NAME, "DivisionLeague");
}
