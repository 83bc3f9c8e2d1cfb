//! Represents a bottle — one entry of an account's wine cellar.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single inventory item owned by exactly one account.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug, PartialEq)]
pub struct Bottle {
    /// Store-assigned identifier, immutable after creation.
    pub id: i64,

    /// Owning account. Always taken from the request route, never from a body.
    pub account_id: i64,

    pub color: String,
    pub country: Option<String>,
    pub name: String,
    pub region: Option<String>,
    pub review: Option<String>,
    pub sweetness: Option<i32>,
    pub varietal: String,
    pub vineyard: String,
    pub vintage: i32,

    /// Only ever written by the rate action.
    pub rating: Option<i32>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field values for a bottle that has not been persisted yet.
#[derive(Clone, Debug, PartialEq)]
pub struct NewBottle {
    pub account_id: i64,
    pub color: String,
    pub country: Option<String>,
    pub name: String,
    pub region: Option<String>,
    pub review: Option<String>,
    pub sweetness: Option<i32>,
    pub varietal: String,
    pub vineyard: String,
    pub vintage: i32,
}

impl NewBottle {
    /// Bind a create payload to the requesting account, copying every field verbatim.
    pub fn from_payload(account_id: i64, payload: CreateBottlePayload) -> Self {
        Self {
            account_id,
            color: payload.color,
            country: payload.country,
            name: payload.name,
            region: payload.region,
            review: payload.review,
            sweetness: payload.sweetness,
            varietal: payload.varietal,
            vineyard: payload.vineyard,
            vintage: payload.vintage,
        }
    }
}

/// Display form of a bottle, enriched with its location references.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BottleView {
    pub id: i64,
    pub href: String,
    pub account_id: i64,
    pub account_href: String,
    pub color: String,
    pub country: Option<String>,
    pub name: String,
    pub region: Option<String>,
    pub review: Option<String>,
    pub sweetness: Option<i32>,
    pub varietal: String,
    pub vineyard: String,
    pub vintage: i32,
    pub rating: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Bottle> for BottleView {
    fn from(b: Bottle) -> Self {
        Self {
            href: bottle_href(b.account_id, b.id),
            account_href: account_href(b.account_id),
            id: b.id,
            account_id: b.account_id,
            color: b.color,
            country: b.country,
            name: b.name,
            region: b.region,
            review: b.review,
            sweetness: b.sweetness,
            varietal: b.varietal,
            vineyard: b.vineyard,
            vintage: b.vintage,
            rating: b.rating,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

/// Body of `POST /cellar/accounts/{account_id}/bottles`.
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct CreateBottlePayload {
    pub color: String,
    #[serde(default)]
    pub country: Option<String>,
    pub name: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub review: Option<String>,
    #[serde(default)]
    pub sweetness: Option<i32>,
    pub varietal: String,
    pub vineyard: String,
    pub vintage: i32,
}

/// Body of `PATCH /cellar/accounts/{account_id}/bottles/{bottle_id}`.
///
/// Two kinds of fields live here:
/// - `color`, `name`, `varietal`, `vineyard`, `vintage` are presence-checked:
///   `None` keeps the stored value.
/// - `country`, `region`, `review`, `sweetness` are nullable attributes copied
///   as-is: `None` clears the stored value.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct UpdateBottlePayload {
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub review: Option<String>,
    #[serde(default)]
    pub sweetness: Option<i32>,
    #[serde(default)]
    pub varietal: Option<String>,
    #[serde(default)]
    pub vineyard: Option<String>,
    #[serde(default)]
    pub vintage: Option<i32>,
}

impl UpdateBottlePayload {
    /// Apply this payload to a stored bottle.
    pub fn apply_to(self, bottle: &mut Bottle) {
        if let Some(color) = self.color {
            bottle.color = color;
        }
        bottle.country = self.country;
        if let Some(name) = self.name {
            bottle.name = name;
        }
        bottle.region = self.region;
        bottle.review = self.review;
        bottle.sweetness = self.sweetness;
        if let Some(varietal) = self.varietal {
            bottle.varietal = varietal;
        }
        if let Some(vineyard) = self.vineyard {
            bottle.vineyard = vineyard;
        }
        if let Some(vintage) = self.vintage {
            bottle.vintage = vintage;
        }
    }
}

/// Body of `PUT /cellar/accounts/{account_id}/bottles/{bottle_id}/actions/rate`.
#[derive(Deserialize, Serialize, Clone, Copy, Debug)]
pub struct RateBottlePayload {
    pub rating: i32,
}

/// Location reference of an account.
pub fn account_href(account_id: i64) -> String {
    format!("/cellar/accounts/{}", account_id)
}

/// Location reference of a bottle. Returned to clients, so the format is stable.
pub fn bottle_href(account_id: i64, bottle_id: i64) -> String {
    format!("/cellar/accounts/{}/bottles/{}", account_id, bottle_id)
}
