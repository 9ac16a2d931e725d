//! Lobby generation endpoints.

use axum::{Json, extract::State};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{ServiceError, ServiceResult};
use crate::portraits::{PortraitStore, asset_key};
use crate::randomizer::{AssignmentState, ModeSelection, Role, SlotCount};
use crate::service::RandomizerService;

use super::AppState;

/// Slot count as sent by a client. Anything unusable clamps instead of
/// failing the request.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CountInput {
    Number(i64),
    /// Fractions and integers outside `i64`
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

impl CountInput {
    pub fn slot_count(&self) -> SlotCount {
        match self {
            CountInput::Number(n) => SlotCount::clamped(*n),
            CountInput::Float(f) => SlotCount::clamped_f64(*f),
            CountInput::Text(text) => SlotCount::parse_lenient(text),
            CountInput::Other(_) => SlotCount::LOWEST,
        }
    }
}

/// Request to roll a new lobby
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    /// Missing or unrecognised names fall back to unconstrained roles
    #[serde(default)]
    pub mode: String,
    /// Only used by custom and unknown modes
    pub count: Option<CountInput>,
}

/// Request to reroll heroes for existing roles
#[derive(Debug, Deserialize)]
pub struct CharactersRequest {
    #[serde(default)]
    pub mode: String,
    pub roles: Vec<Role>,
}

/// Generated lobby
#[derive(Debug, Serialize)]
pub struct AssignmentResponse {
    pub mode: String,
    pub slots: Vec<SlotDto>,
}

/// One slot of a generated lobby
#[derive(Debug, Serialize)]
pub struct SlotDto {
    pub role: Role,
    pub character: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portrait_key: Option<String>,
    /// Set only when a portrait could actually be loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portrait_url: Option<String>,
}

impl AssignmentResponse {
    fn build(state: &AssignmentState, portraits: &PortraitStore) -> Self {
        let slots = state
            .slots
            .iter()
            .map(|slot| {
                let portrait_key = slot.character.character().map(asset_key);
                let portrait_url = portrait_key
                    .as_deref()
                    .filter(|key| portraits.load(key).is_some())
                    .map(|key| format!("/api/portraits/{}", key));
                SlotDto {
                    role: slot.role,
                    character: slot.character.to_string(),
                    portrait_key,
                    portrait_url,
                }
            })
            .collect();

        Self {
            mode: state.selection.name(),
            slots,
        }
    }
}

/// Portrait loading touches the filesystem, so it runs off the async runtime.
async fn respond(
    service: Arc<RandomizerService>,
    state: AssignmentState,
) -> ServiceResult<Json<AssignmentResponse>> {
    tokio::task::spawn_blocking(move || AssignmentResponse::build(&state, &service.portraits))
        .await
        .map(Json)
        .map_err(|e| ServiceError::Internal {
            message: format!("Portrait lookup task failed: {}", e),
        })
}

/// Roll roles and heroes
pub async fn generate_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateRequest>,
) -> ServiceResult<Json<AssignmentResponse>> {
    let requested = request.count.as_ref().map(CountInput::slot_count);
    let selection = ModeSelection::resolve(&request.mode, requested);
    let assignment = state.service.generate(selection);
    respond(state.service.clone(), assignment).await
}

/// Reroll heroes, keeping the submitted roles in order
pub async fn characters_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CharactersRequest>,
) -> ServiceResult<Json<AssignmentResponse>> {
    let Some(count) = SlotCount::new(request.roles.len()) else {
        return Err(ServiceError::InvalidRequest {
            message: format!(
                "Expected {} to {} roles, got {}",
                SlotCount::MIN,
                SlotCount::MAX,
                request.roles.len()
            ),
        });
    };

    let selection = ModeSelection::resolve(&request.mode, Some(count));
    let assignment = state.service.reroll_characters(selection, request.roles);
    respond(state.service.clone(), assignment).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_input_accepts_numbers_and_text() {
        let req: GenerateRequest = serde_json::from_str(r#"{"mode":"Custom","count":12}"#).unwrap();
        assert_eq!(req.count.unwrap().slot_count().get(), 10);

        let req: GenerateRequest =
            serde_json::from_str(r#"{"mode":"Custom","count":"abc"}"#).unwrap();
        assert_eq!(req.count.unwrap().slot_count().get(), 1);

        let req: GenerateRequest = serde_json::from_str(r#"{"mode":"Open"}"#).unwrap();
        assert!(req.count.is_none());
    }

    #[test]
    fn test_count_input_never_rejects() {
        let cases = [
            (r#"3.5"#, 3),
            (r#"99999999999999999999"#, 10),
            (r#"18446744073709551615"#, 10),
            (r#"-1e30"#, 1),
            (r#""99999999999999999999""#, 10),
            (r#"true"#, 1),
            (r#"[4]"#, 1),
        ];
        for (count, expected) in cases {
            let body = format!(r#"{{"mode":"Custom","count":{}}}"#, count);
            let req: GenerateRequest = serde_json::from_str(&body).unwrap();
            assert_eq!(req.count.unwrap().slot_count().get(), expected, "count {count}");
        }
    }

    #[test]
    fn test_missing_mode_is_unknown() {
        let req: GenerateRequest = serde_json::from_str(r#"{"count":3}"#).unwrap();
        let selection = ModeSelection::resolve(&req.mode, req.count.map(|c| c.slot_count()));
        assert_eq!(selection.mode, None);
        assert_eq!(selection.slot_count.get(), 3);
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let parsed: Result<CharactersRequest, _> =
            serde_json::from_str(r#"{"mode":"5v5","roles":["Healer"]}"#);
        assert!(parsed.is_err());
    }
}
