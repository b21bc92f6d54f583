// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Ranked league declarations (`league-v4`).

use std::ops::Index;

use async_trait::async_trait;
use lazy_entity_core::{
    Declaration, Error, Lazy, Listing, Params, QueryParams, positive, serde_json::Value, wrap_list
};
use tracing::trace;

use super::summoner::Summoner;
use crate::{Entity, Record};

/// Promotion series progress.
#[derive(Debug, Clone, PartialEq, Eq, Record)]
pub struct MiniSeriesData {
    pub target:   i32,
    pub wins:     i32,
    pub losses:   i32,
    /// One character per game: `W`, `L` or `N` (not played).
    pub progress: String
}

/// One ranked player inside a league.
#[derive(Debug, Clone, PartialEq, Eq, Record)]
pub struct LeagueEntryData {
    pub summoner_id:   String,
    pub summoner_name: Option<String>,
    pub league_points: i32,
    pub rank:          String,
    pub wins:          i32,
    pub losses:        i32,
    pub veteran:       bool,
    pub inactive:      bool,
    pub fresh_blood:   bool,
    pub hot_streak:    bool,
    pub mini_series:   Option<MiniSeriesData>
}

impl LeagueEntryData {
    /// Summoner behind this entry, routed like `origin`.
    pub fn summoner<E: Entity>(
        &self,
        origin: &Lazy<E>
    ) -> Result<Lazy<Summoner>, Error> {
        origin.related(Params::new().with("id", self.summoner_id.as_str()))
    }
}

/// Ranked standing of one summoner in one queue.
///
/// The service calls the queue `queueType`.
#[derive(Debug, Clone, PartialEq, Eq, Record)]
#[record(renamed(queue_type = "queue"))]
pub struct SummonerLeagueEntryData {
    pub league_id:     String,
    pub summoner_id:   String,
    pub summoner_name: Option<String>,
    pub queue:         String,
    pub tier:          String,
    pub rank:          String,
    pub league_points: i32,
    pub wins:          i32,
    pub losses:        i32,
    pub veteran:       bool,
    pub inactive:      bool,
    pub fresh_blood:   bool,
    pub hot_streak:    bool,
    pub mini_series:   Option<MiniSeriesData>
}

impl SummonerLeagueEntryData {
    /// Summoner behind this entry, routed like `origin`.
    pub fn summoner<E: Entity>(
        &self,
        origin: &Lazy<E>
    ) -> Result<Lazy<Summoner>, Error> {
        origin.related(Params::new().with("id", self.summoner_id.as_str()))
    }

    /// League this entry belongs to, routed like `origin`.
    pub fn league<E: Entity>(
        &self,
        origin: &Lazy<E>
    ) -> Result<Lazy<League>, Error> {
        origin.related(Params::new().with("id", self.league_id.as_str()))
    }
}

/// A full league: tier, queue and every ranked entry.
#[derive(Debug, Clone, PartialEq, Eq, Record)]
pub struct LeagueData {
    pub id:      Option<String>,
    pub tier:    Option<String>,
    pub queue:   Option<String>,
    pub name:    Option<String>,
    pub entries: Vec<LeagueEntryData>
}

/// Ranked entries of one summoner, one per queue.
#[derive(Debug, Clone, PartialEq, Eq, Record)]
pub struct SummonerLeagueData {
    pub summoner_id: String,
    pub entries:     Vec<SummonerLeagueEntryData>
}

/// One page of entries below the apex tiers.
#[derive(Debug, Clone, PartialEq, Eq, Record)]
pub struct DivisionLeagueData {
    pub queue:    String,
    pub tier:     String,
    pub division: String,
    pub entries:  Vec<SummonerLeagueEntryData>
}

macro_rules! listing {
    ($data:ty => $item:ty) => {
        impl Listing for $data {
            type Item = $item;

            fn entries(&self) -> &[$item] {
                &self.entries
            }
        }

        impl Index<usize> for $data {
            type Output = $item;

            fn index(&self, index: usize) -> &$item {
                &self.entries[index]
            }
        }

        impl<'a> IntoIterator for &'a $data {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.entries.iter()
            }
        }
    };
}

listing!(SummonerLeagueData => SummonerLeagueEntryData);
listing!(DivisionLeagueData => SummonerLeagueEntryData);

/// League looked up by its id.
#[derive(Debug, Entity)]
#[entity(
    record = "LeagueData",
    rule(endpoint = "league_v4_league_by_league_id", params("id")),
    renamed(league_id = "id"),
    params("id")
)]
pub struct League;

/// Base of the single-league apex tiers, keyed by queue.
///
/// Abstract: only the concrete tiers carry a queue rule, so resolving a
/// bound `ApexLeague` always fails with [`Error::NoMatchingRule`]. Use
/// [`ChallengerLeague`], [`GrandmasterLeague`] or [`MasterLeague`].
#[derive(Debug, Entity)]
#[entity(
    parent = "League",
    validate(queue("RANKED_SOLO_5x5", "RANKED_FLEX_SR")),
    params("queue")
)]
pub struct ApexLeague;

/// Challenger tier of a queue.
#[derive(Debug, Entity)]
#[entity(
    parent = "ApexLeague",
    rule(endpoint = "league_v4_challenger_league", params("queue")),
    params("queue")
)]
pub struct ChallengerLeague;

/// Grandmaster tier of a queue.
#[derive(Debug, Entity)]
#[entity(
    parent = "ApexLeague",
    rule(endpoint = "league_v4_grandmaster_league", params("queue")),
    params("queue")
)]
pub struct GrandmasterLeague;

/// Master tier of a queue.
#[derive(Debug, Entity)]
#[entity(
    parent = "ApexLeague",
    rule(endpoint = "league_v4_master_league", params("queue")),
    params("queue")
)]
pub struct MasterLeague;

fn wrap_entries(payload: Value) -> Result<Value, Error> {
    Ok(wrap_list("entries", payload))
}

/// Ranked entries of one summoner.
///
/// The service answers with a bare list, stored as `entries`.
#[derive(Debug, Entity)]
#[entity(
    record = "SummonerLeagueData",
    rule(endpoint = "league_v4_summoner_entries", params("summoner_id")),
    reshape = "wrap_entries",
    params("summoner_id")
)]
pub struct SummonerLeague;

/// One division of a tier, paged.
#[derive(Debug, Entity)]
#[entity(
    parent = "SummonerLeague",
    record = "DivisionLeagueData",
    query = "DivisionQuery",
    rule(endpoint = "league_v4_entries_by_division", params("queue", "tier", "division")),
    validate(
        queue("RANKED_SOLO_5x5", "RANKED_FLEX_SR"),
        division("I", "II", "III", "IV"),
        tier("DIAMOND", "PLATINUM", "GOLD", "SILVER", "BRONZE", "IRON")
    ),
    allow_query,
    params("queue", "tier", "division")
)]
pub struct DivisionLeague;

/// Query options of [`DivisionLeague`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DivisionQuery {
    /// Page number, starting at 1.
    pub page: Option<i64>
}

impl DivisionQuery {
    /// No options set.
    pub const fn new() -> Self {
        Self {
            page: None
        }
    }

    /// Request one page.
    #[must_use]
    pub const fn page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }
}

impl QueryParams for DivisionQuery {
    fn validate(&self) -> Result<(), Error> {
        if let Some(page) = self.page {
            positive("page", page)?;
        }
        Ok(())
    }

    fn pairs(&self) -> Vec<(&'static str, String)> {
        self.page
            .map(|page| ("page", page.to_string()))
            .into_iter()
            .collect()
    }
}

/// Plain league lookup from a league-shaped entity.
#[async_trait]
pub trait LeagueRef {
    /// The same league, looked up by id. Resolves this entity first.
    async fn league(&self) -> Result<Lazy<League>, Error>;
}

#[async_trait]
impl<E> LeagueRef for Lazy<E>
where
    E: Entity<Data = LeagueData>
{
    async fn league(&self) -> Result<Lazy<League>, Error> {
        let resolved = self.resolve().await?;
        trace!(entity = E::NAME, id = ?resolved.id, "league reference");
        self.related(Params::from_pairs([("id", resolved.id.as_deref())]))
    }
}

/// Summoner lookup from a summoner-scoped entity.
pub trait SummonerRef {
    /// The summoner this entity is about. No I/O.
    fn summoner(&self) -> Result<Lazy<Summoner>, Error>;
}

impl SummonerRef for Lazy<SummonerLeague> {
    fn summoner(&self) -> Result<Lazy<Summoner>, Error> {
        self.related(Params::from_pairs([("id", self.params().get("summoner_id"))]))
    }
}

impl SummonerRef for Lazy<DivisionLeague> {
    fn summoner(&self) -> Result<Lazy<Summoner>, Error> {
        Err(Error::unsupported(DivisionLeague::NAME, "summoner"))
    }
}
