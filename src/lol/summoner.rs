// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Summoner profile declarations (`summoner-v4`).

use async_trait::async_trait;
use lazy_entity_core::{Error, Lazy, Params};

use super::league::SummonerLeague;
use crate::{Entity, Record};

/// Summoner profile.
#[derive(Debug, Clone, PartialEq, Eq, Record)]
pub struct SummonerData {
    pub id:              String,
    pub account_id:      String,
    pub puuid:           String,
    pub name:            String,
    pub profile_icon_id: i64,
    /// Epoch milliseconds of the last profile change.
    pub revision_date:   i64,
    pub summoner_level:  i64
}

/// Summoner looked up by exactly one of its identifiers.
#[derive(Debug, Entity)]
#[entity(
    record = "SummonerData",
    rule(endpoint = "summoner_v4_by_id", params("id")),
    rule(endpoint = "summoner_v4_by_account_id", params("account_id")),
    rule(endpoint = "summoner_v4_by_name", params("name")),
    rule(endpoint = "summoner_v4_by_puuid", params("puuid")),
    params("id", "account_id", "name", "puuid")
)]
pub struct Summoner;

/// Ranked entries lookup from a summoner.
#[async_trait]
pub trait SummonerLeagueRef {
    /// Ranked entries of this summoner.
    ///
    /// Uses the bound `id` when present, otherwise resolves the summoner
    /// to learn it.
    async fn league_entries(&self) -> Result<Lazy<SummonerLeague>, Error>;
}

#[async_trait]
impl SummonerLeagueRef for Lazy<Summoner> {
    async fn league_entries(&self) -> Result<Lazy<SummonerLeague>, Error> {
        let id = match self.params().get("id") {
            Some(id) => id.to_string(),
            None => self.resolve().await?.id.clone()
        };
        self.related(Params::new().with("summoner_id", id))
    }
}
