// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! League of Legends declarations.
//!
//! Ranked leagues (`league-v4`) and summoner profiles (`summoner-v4`).
//!
//! # Entities
//!
//! | Entity | Constructor | Endpoint |
//! |--------|-------------|----------|
//! | [`League`] | `id` | `league_v4_league_by_league_id` |
//! | [`ChallengerLeague`] | `queue` | `league_v4_challenger_league` |
//! | [`GrandmasterLeague`] | `queue` | `league_v4_grandmaster_league` |
//! | [`MasterLeague`] | `queue` | `league_v4_master_league` |
//! | [`SummonerLeague`] | `summoner_id` | `league_v4_summoner_entries` |
//! | [`DivisionLeague`] | `queue`, `tier`, `division` | `league_v4_entries_by_division` |
//! | [`Summoner`] | one of `id`, `account_id`, `name`, `puuid` | `summoner_v4_by_*` |
//!
//! # Example
//!
//! ```rust,ignore
//! use lazy_entity::{Client, lol::*};
//!
//! let client = Client::with_config(transport, ClientConfig::new().default_platform("na1"));
//!
//! let mut division = DivisionLeague::new(&client, Some("RANKED_SOLO_5x5"), Some("GOLD"), Some("II"))?;
//! division.with_query(DivisionQuery::new().page(2))?;
//!
//! for entry in division.resolve().await?.iter() {
//!     let summoner = entry.summoner(&division)?;
//!     println!("{} {}", summoner.resolve().await?.name, entry.league_points);
//! }
//! ```

mod league;
mod summoner;

pub use self::{
    league::{
        ApexLeague, ChallengerLeague, DivisionLeague, DivisionLeagueData, DivisionQuery,
        GrandmasterLeague, League, LeagueData, LeagueEntryData, LeagueRef, MasterLeague,
        MiniSeriesData, SummonerLeague, SummonerLeagueData, SummonerLeagueEntryData, SummonerRef
    },
    summoner::{Summoner, SummonerData, SummonerLeagueRef}
};
