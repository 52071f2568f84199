use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{debug, instrument};

use crate::{
    error::ApiError,
    internal::extractors::InternalAuth,
    state::AppState,
    users::{
        dto::{BatchRequest, PublicUser, VerifiedUser},
        repo::User,
    },
};

pub fn internal_routes() -> Router<AppState> {
    Router::new()
        .route("/internal/api/users/verify/:id", get(verify_user))
        .route("/internal/api/users/batch", post(batch_users))
}

#[instrument(skip(state, _auth))]
pub async fn verify_user(
    _auth: InternalAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<VerifiedUser>, ApiError> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound)?;
    debug!(user_id = user.id, "user verified for internal caller");
    Ok(Json(user.into()))
}

#[instrument(skip(state, _auth, payload))]
pub async fn batch_users(
    _auth: InternalAuth,
    State(state): State<AppState>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Result<Json<Vec<PublicUser>>, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let users = User::find_by_ids(&state.db, &payload.user_ids).await?;
    debug!(
        requested = payload.user_ids.len(),
        found = users.len(),
        "batch lookup"
    );
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::internal::extractors::INTERNAL_API_KEY_HEADER;

    fn app() -> Router {
        internal_routes().with_state(AppState::fake())
    }

    async fn error_body(res: axum::response::Response) -> serde_json::Value {
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn verify_without_key_is_unauthorized() {
        let res = app()
            .oneshot(
                Request::builder()
                    .uri("/internal/api/users/verify/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(error_body(res).await["error"], "Unauthorized");
    }

    #[tokio::test]
    async fn verify_with_wrong_key_is_unauthorized() {
        let res = app()
            .oneshot(
                Request::builder()
                    .uri("/internal/api/users/verify/1")
                    .header(INTERNAL_API_KEY_HEADER, "wrong")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn batch_without_key_is_unauthorized() {
        let res = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/internal/api/users/batch")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"user_ids": [1]}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(error_body(res).await["error"], "Unauthorized");
    }
}
