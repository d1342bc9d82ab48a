use serde_json::Value;

use crate::hypixel::error::{FetchError, FetchResult};

const FAVOURITES_PATH: &str = "player.stats.Bedwars.favourites_2";

/// One quick-buy slot. The API writes `null` for slots the player left empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Slot {
    Empty,
    Sprite(String),
}

/// A player document from the Hypixel API that is known to carry Bedwars favourites.
#[derive(Clone, Debug)]
pub struct StatsDocument {
    raw: Value,
    favourites: Vec<Slot>,
}

impl StatsDocument {
    pub fn from_value(raw: Value) -> FetchResult<Self> {
        let player = raw.get("player").filter(|player| player.is_object()).ok_or(FetchError::MissingField("player"))?;
        let stats = player.get("stats").filter(|stats| stats.is_object()).ok_or(FetchError::MissingField("player.stats"))?;
        let bedwars = stats.get("Bedwars").filter(|bedwars| bedwars.is_object()).ok_or(FetchError::MissingField("player.stats.Bedwars"))?;
        let favourites = bedwars.get("favourites_2").and_then(Value::as_str).ok_or(FetchError::MissingField(FAVOURITES_PATH))?;
        let favourites = parse_favourites(favourites);

        Ok(StatsDocument { raw, favourites })
    }

    pub fn display_name(&self) -> Option<&str> {
        self.raw["player"]["displayname"].as_str()
    }

    pub fn favourites(&self) -> &[Slot] {
        &self.favourites
    }
}

pub fn parse_favourites(raw: &str) -> Vec<Slot> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    raw.split(',')
        .map(str::trim)
        .map(|name| if name.is_empty() || name == "null" { Slot::Empty } else { Slot::Sprite(name.to_string()) })
        .collect()
}
