// src/specs/roster.rs
//! Claim membership payload → `RosterEntry` list.
//!
//! Accepted shapes:
//! - `[{"userName": "...", "playerEntityId": "..."}, ...]`
//! - `["name", "name", ...]`
//! - `{"members": <either of the above>, ...}`
//!
//! Entries without an identifier are kept; they are resolved by name search
//! later. Empty names and sentinel placeholders are dropped.

use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::core::sanitize::{is_sentinel, normalize_ws};
use crate::error::RosterFormatError;

const NAME_FIELD: &str = "userName";
const ID_FIELD: &str = "playerEntityId";
const MEMBERS_FIELD: &str = "members";

/// Opaque player identifier. Upstream sends it as a string or a number.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntityId(String);

impl EntityId {
    /// `None` for blank input.
    pub fn new(raw: &str) -> Option<Self> {
        let t = raw.trim();
        if t.is_empty() { None } else { Some(Self(s!(t))) }
    }

    pub fn as_str(&self) -> &str { &self.0 }

    pub fn from_value(v: &Value) -> Option<Self> {
        scalar_text(v).and_then(|t| Self::new(&t))
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Unsigned(u64),
            Signed(i64),
        }

        let text = match Repr::deserialize(d)? {
            Repr::Text(s) => s,
            Repr::Unsigned(n) => n.to_string(),
            Repr::Signed(n) => n.to_string(),
        };
        EntityId::new(&text).ok_or_else(|| serde::de::Error::custom("empty entity id"))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterEntry {
    pub name: String,
    pub id: Option<EntityId>,
}

impl RosterEntry {
    pub fn named(name: &str) -> Self {
        Self { name: s!(name), id: None }
    }
}

/// The two top-level roster shapes.
#[derive(Clone, Debug, PartialEq)]
pub enum RawRosterPayload {
    WrappedMembers(Vec<Value>),
    BareList(Vec<Value>),
}

impl RawRosterPayload {
    pub fn into_items(self) -> Vec<Value> {
        match self {
            RawRosterPayload::WrappedMembers(v) | RawRosterPayload::BareList(v) => v,
        }
    }
}

/// Single classification step; nothing downstream re-checks the shape.
pub fn classify(payload: Value) -> Result<RawRosterPayload, RosterFormatError> {
    match payload {
        Value::Array(items) => Ok(RawRosterPayload::BareList(items)),
        Value::Object(mut map) => match map.remove(MEMBERS_FIELD) {
            Some(Value::Array(items)) => Ok(RawRosterPayload::WrappedMembers(items)),
            Some(other) => Err(RosterFormatError(format!("`{MEMBERS_FIELD}` is {}", kind(&other)))),
            None => Err(RosterFormatError(format!("object without `{MEMBERS_FIELD}`"))),
        },
        other => Err(RosterFormatError(format!("top level is {}", kind(&other)))),
    }
}

/// Classified payload → entries, in upstream order.
pub fn normalize(payload: RawRosterPayload, sentinels: &[String]) -> Vec<RosterEntry> {
    payload
        .into_items()
        .iter()
        .filter_map(entry_from_item)
        .filter(|e| !is_sentinel(&e.name, sentinels))
        .collect()
}

/// Classify + normalize a raw roster response.
pub fn resolve(payload: Value, sentinels: &[String]) -> Result<Vec<RosterEntry>, RosterFormatError> {
    Ok(normalize(classify(payload)?, sentinels))
}

/// Configured names go through the same path as a bare list of strings.
pub fn from_names(names: &[String], sentinels: &[String]) -> Vec<RosterEntry> {
    let items = names.iter().map(|n| Value::String(n.clone())).collect();
    normalize(RawRosterPayload::BareList(items), sentinels)
}

/* ---------- helpers ---------- */

fn entry_from_item(item: &Value) -> Option<RosterEntry> {
    let (name, id) = match item {
        Value::Object(map) => (
            map.get(NAME_FIELD).and_then(scalar_text),
            map.get(ID_FIELD).and_then(EntityId::from_value),
        ),
        Value::Null | Value::Array(_) => return None,
        scalar => (scalar_text(scalar), None),
    };

    let name = normalize_ws(&name?);
    if name.is_empty() { return None; }
    Some(RosterEntry { name, id })
}

pub(crate) fn scalar_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
