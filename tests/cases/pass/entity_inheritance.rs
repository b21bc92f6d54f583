// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use lazy_entity::{
    Client, Declaration, Entity, Error, MemoryFetch, Meta, NoQuery, Params, Record,
    serde_json::Value
};

#[derive(Debug, Record)]
pub struct Profile {
    pub id:   String,
    pub name: String
}

#[derive(Entity)]
#[entity(
    record = "Profile",
    rule(endpoint = "profile_by_id", params("id")),
    rule(endpoint = "profile_by_name", params("name")),
    renamed(profile_id = "id"),
    validate(region("eu", "na")),
    params("id", "name")
)]
pub struct Account;

fn only_lowercase(params: &Params, _meta: &Meta) -> Result<(), Error> {
    match params.get("name") {
        Some(name) if name.chars().any(char::is_uppercase) => {
            Err(Error::invalid("name", name, "must be lowercase"))
        }
        _ => Ok(())
    }
}

fn unwrap_data(payload: Value) -> Result<Value, Error> {
    match payload {
        Value::Object(mut map) => Ok(map.remove("data").unwrap_or(Value::Null)),
        other => Ok(other)
    }
}

#[derive(Entity)]
#[entity(
    parent = "Account",
    rule(endpoint = "profile_by_region_name", params("region", "name")),
    clean = "only_lowercase",
    reshape = "unwrap_data",
    params("region", "name")
)]
pub struct RegionalAccount;

#[derive(Entity)]
#[entity(parent = "RegionalAccount", allow_query = false)]
pub struct LegacyAccount;

fn main() {
    assert_eq!(Account::NAME, "Account");
    assert_eq!(<RegionalAccount as Declaration>::ancestry().len(), 2);
    assert_eq!(<LegacyAccount as Declaration>::ancestry().len(), 3);

    let _: Option<<RegionalAccount as Entity>::Data> = None::<Profile>;
    let _: <LegacyAccount as Entity>::Query = NoQuery;

    let client = Client::new(MemoryFetch::new());
    let meta = client.register::<LegacyAccount>().unwrap();
    assert_eq!(meta.rules().len(), 1);
    assert!(meta.rules().get("profile_by_region_name").is_some());
    assert_eq!(meta.renamed().to_declared("profile_id"), "id");
    assert!(meta.allowed("region").is_some());
    assert!(!meta.allow_query());

    let regional = RegionalAccount::new(&client, Some("eu"), Some("Faker")).unwrap();
    assert_eq!(regional.params().len(), 2);
    assert!(RegionalAccount::clean(regional.params(), regional.meta()).is_err());
    assert!(<LegacyAccount as Declaration>::clean(regional.params(), regional.meta()).is_err());

    let reshaped = <LegacyAccount as Declaration>::reshape(serde_json::json!({"data": {"id": "1"}}));
    assert_eq!(reshaped.unwrap()["id"], "1");

    let account = Account::new(&client, None, Some("faker")).unwrap();
    assert_eq!(account.params().names(), ["name"]);
}
