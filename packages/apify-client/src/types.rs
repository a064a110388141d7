//! Request and response types for the Facebook post search actor.

use chrono::NaiveDate;
use serde::Serialize;

/// Location UID the actor falls back to when the user leaves the field blank.
pub const DEFAULT_LOCATION_UID: &str = "112483542097587";

/// A single dataset record. The actor's output schema is open-ended, so
/// records stay as raw field→value maps (key order preserved).
pub type Record = serde_json::Map<String, serde_json::Value>;

/// The full output of one search run. Produced atomically by the poller:
/// either fully populated or empty, never merged across poll attempts.
pub type ResultSet = Vec<Record>;

/// One search, as entered by the user. Built fresh per submission and
/// immutable once sent.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    /// Facebook location UID. Empty means "unset"; the wire input substitutes
    /// [`DEFAULT_LOCATION_UID`] in that case.
    pub location_uid: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub max_results: u32,
}

/// Input body for the `powerai~facebook-post-search-scraper` actor, with the
/// actor's exact field names.
#[derive(Debug, Clone, Serialize)]
pub struct SearchActorInput {
    pub query: String,
    pub location_uid: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub recent_posts: bool,
    #[serde(rename = "maxResults")]
    pub max_results: u32,
}

impl From<&SearchRequest> for SearchActorInput {
    fn from(request: &SearchRequest) -> Self {
        let location_uid = if request.location_uid.is_empty() {
            DEFAULT_LOCATION_UID.to_string()
        } else {
            request.location_uid.clone()
        };
        Self {
            query: request.query.clone(),
            location_uid,
            start_date: request.start_date,
            end_date: request.end_date,
            // The actor is always asked for recent posts only.
            recent_posts: true,
            max_results: request.max_results,
        }
    }
}

/// Handle to a started actor run. Only used to build the dataset-items
/// endpoint; dropped once polling ends.
#[derive(Debug, Clone)]
pub struct RunHandle {
    pub run_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(location_uid: &str) -> SearchRequest {
        SearchRequest {
            query: "food shelf".to_string(),
            location_uid: location_uid.to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            max_results: 100,
        }
    }

    #[test]
    fn empty_location_uid_falls_back_to_default() {
        let input = SearchActorInput::from(&request(""));
        assert_eq!(input.location_uid, DEFAULT_LOCATION_UID);
    }

    #[test]
    fn set_location_uid_passes_through_unmodified() {
        let input = SearchActorInput::from(&request("108438592503817"));
        assert_eq!(input.location_uid, "108438592503817");
    }

    #[test]
    fn wire_body_uses_actor_field_names() {
        let input = SearchActorInput::from(&request(""));
        let body = serde_json::to_value(&input).unwrap();
        assert_eq!(body["query"], "food shelf");
        assert_eq!(body["location_uid"], DEFAULT_LOCATION_UID);
        assert_eq!(body["start_date"], "2024-01-01");
        assert_eq!(body["end_date"], "2024-01-31");
        assert_eq!(body["recent_posts"], true);
        assert_eq!(body["maxResults"], 100);
        assert!(body.get("max_results").is_none());
    }
}
