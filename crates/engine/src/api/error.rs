//! Error responses for the HTTP layer.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use armory_domain::DependentCounts;

use crate::use_cases::CoreError;

/// A core error rendered as `{ "kind": ..., "message": ... }`.
#[derive(Debug)]
pub struct ApiError(pub CoreError);

#[derive(Serialize)]
struct ErrorBody {
    kind: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    dependents: Option<DependentCounts>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            CoreError::Validation(_)
            | CoreError::Reference { .. }
            | CoreError::UnresolvedReference { .. } => StatusCode::BAD_REQUEST,
            CoreError::NotFound { .. } => StatusCode::NOT_FOUND,
            CoreError::Conflict(_)
            | CoreError::Blocked { .. }
            | CoreError::InvalidTransition { .. } => StatusCode::CONFLICT,
            CoreError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed in store");
        }

        let dependents = match &self.0 {
            CoreError::Blocked { dependents, .. } => Some(dependents.clone()),
            _ => None,
        };
        let body = ErrorBody {
            kind: self.0.kind(),
            message: self.0.to_string(),
            dependents,
        };
        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(CoreError::validation(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self(CoreError::validation(rejection.body_text()))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self(CoreError::validation(format!("Invalid JSON body: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use armory_domain::{DependentCount, EntityKind};

    #[test]
    fn kinds_map_to_status_codes() {
        let cases = [
            (CoreError::validation("name is required"), StatusCode::BAD_REQUEST),
            (
                CoreError::Reference {
                    field: "soldier_id",
                    target: EntityKind::Soldier,
                    value: 9,
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                CoreError::UnresolvedReference {
                    entity: "Weapon",
                    message: "FOREIGN KEY constraint failed".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (CoreError::not_found(EntityKind::Weapon, 3), StatusCode::NOT_FOUND),
            (CoreError::conflict("taken"), StatusCode::CONFLICT),
            (
                CoreError::InvalidTransition {
                    kind: "assignment".into(),
                    from: "Returned".into(),
                    to: "Active".into(),
                },
                StatusCode::CONFLICT,
            ),
            (
                CoreError::Store {
                    entity: "Weapon",
                    operation: "list",
                    message: "disk I/O error".into(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).status(), status);
        }
    }

    #[test]
    fn blocked_body_carries_dependents() {
        let err = CoreError::Blocked {
            kind: EntityKind::StorageFacility,
            id: 1,
            dependents: DependentCounts::new(vec![DependentCount {
                kind: EntityKind::Weapon,
                field: "facility_id",
                count: 2,
            }]),
        };
        let body = ErrorBody {
            kind: err.kind(),
            message: err.to_string(),
            dependents: match &err {
                CoreError::Blocked { dependents, .. } => Some(dependents.clone()),
                _ => None,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["kind"], "Blocked");
        assert_eq!(json["dependents"][0]["kind"], "Weapon");
        assert_eq!(json["dependents"][0]["count"], 2);
        assert_eq!(ApiError(err).status(), StatusCode::CONFLICT);
    }
}
