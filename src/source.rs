// src/source.rs
//! Upstream statistics API, seen from the sync pipeline.
//!
//! The pipeline only depends on `StatsSource`; `BitjitaApi` is the HTTP
//! implementation. Tests plug in scripted sources.

use std::time::Duration;

use serde_json::Value;

use crate::config::options::FetchOptions;
use crate::core::net::HttpClient;
use crate::error::SourceError;
use crate::specs::player::{PlayerDetail, PlayerEnvelope, SearchResponse};
use crate::specs::roster::EntityId;

/// Calls must be safe from several worker threads at once.
pub trait StatsSource: Sync {
    /// Raw membership payload for a claim; shape is classified by `specs::roster`.
    fn fetch_roster(&self, claim_id: &str) -> Result<Value, SourceError>;

    /// Candidate identifiers for a display name, best match first.
    fn search_player_by_name(&self, name: &str) -> Result<Vec<EntityId>, SourceError>;

    fn fetch_player_detail(&self, id: &EntityId) -> Result<PlayerDetail, SourceError>;
}

pub struct BitjitaApi {
    http: HttpClient,
    roster_timeout: Duration,
    player_timeout: Duration,
}

impl BitjitaApi {
    pub fn new(opts: &FetchOptions) -> Result<Self, SourceError> {
        Ok(Self {
            http: HttpClient::new(&opts.api_base)?,
            roster_timeout: Duration::from_secs(opts.roster_timeout_secs),
            player_timeout: Duration::from_secs(opts.player_timeout_secs),
        })
    }
}

impl StatsSource for BitjitaApi {
    fn fetch_roster(&self, claim_id: &str) -> Result<Value, SourceError> {
        self.http.get_json(&["claims", claim_id, "members"], &[], self.roster_timeout)
    }

    fn search_player_by_name(&self, name: &str) -> Result<Vec<EntityId>, SourceError> {
        let resp: SearchResponse = self.http.get_json(&["players"], &[("q", name)], self.player_timeout)?;
        Ok(resp.candidates())
    }

    fn fetch_player_detail(&self, id: &EntityId) -> Result<PlayerDetail, SourceError> {
        let env: PlayerEnvelope = self.http.get_json(&["players", id.as_str()], &[], self.player_timeout)?;
        env.player.ok_or(SourceError::MissingField("player"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::net::testing::serve_once;

    fn api(base: &str) -> BitjitaApi {
        BitjitaApi {
            http: HttpClient::direct(base),
            roster_timeout: Duration::from_secs(5),
            player_timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn detail_without_player_object_is_missing_field() {
        let (base, server) = serve_once("200 OK", r#"{"error": "x"}"#);
        let id = EntityId::new("42").unwrap();
        let err = api(&base).fetch_player_detail(&id).unwrap_err();
        server.join().unwrap();
        assert!(matches!(err, SourceError::MissingField("player")), "{err:?}");
    }

    #[test]
    fn detail_id_is_escaped_in_the_path() {
        let (base, server) = serve_once("200 OK", r#"{"player": {"experience": [], "skillMap": {}}}"#);
        let id = EntityId::new("7/../claims?x#y").unwrap();
        let detail = api(&base).fetch_player_detail(&id).unwrap();
        assert!(detail.experience.is_empty());
        assert!(server.join().unwrap().starts_with("GET /api/players/7%2F..%2Fclaims%3Fx%23y "));
    }

    #[test]
    fn search_sends_query_and_keeps_hit_order() {
        let (base, server) = serve_once("200 OK", r#"{"players": [{"entityId": 9}, {"entityId": "3"}]}"#);
        let ids = api(&base).search_player_by_name("Ana").unwrap();
        assert_eq!(ids.iter().map(EntityId::as_str).collect::<Vec<_>>(), vec!["9", "3"]);
        assert!(server.join().unwrap().starts_with("GET /api/players?q=Ana "));
    }

    #[test]
    fn roster_status_error_propagates() {
        let (base, server) = serve_once("503 Service Unavailable", "");
        let err = api(&base).fetch_roster("77").unwrap_err();
        server.join().unwrap();
        assert!(matches!(err, SourceError::Status { status: 503, .. }), "{err:?}");
    }
}
