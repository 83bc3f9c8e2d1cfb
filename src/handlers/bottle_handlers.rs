//! HTTP handlers for the bottle resource.
//! Paths carry the account identifier, which is treated as the authenticated
//! caller; business rules live in `BottleService`.

use crate::{
    errors::AppError,
    models::bottle::{BottleView, CreateBottlePayload, RateBottlePayload, UpdateBottlePayload},
    services::bottle_service::BottleService,
};
use axum::{
    Json,
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use futures::StreamExt;
use tracing::{debug, info};

/// First frame sent on a freshly upgraded watch socket.
pub const WATCH_GREETING: &str = "watch bottle";

/// `POST /cellar/accounts/{account_id}/bottles`
pub async fn create_bottle(
    State(service): State<BottleService>,
    Path(account_id): Path<i64>,
    Json(payload): Json<CreateBottlePayload>,
) -> Result<impl IntoResponse, AppError> {
    let view = service.create(account_id, payload).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, view.href.clone())],
        Json(view),
    ))
}

/// `GET /cellar/accounts/{account_id}/bottles`
pub async fn list_bottles(
    State(service): State<BottleService>,
    Path(account_id): Path<i64>,
) -> Result<Json<Vec<BottleView>>, AppError> {
    Ok(Json(service.list(account_id).await?))
}

/// `GET /cellar/accounts/{account_id}/bottles/{bottle_id}`
pub async fn show_bottle(
    State(service): State<BottleService>,
    Path((account_id, bottle_id)): Path<(i64, i64)>,
) -> Result<Json<BottleView>, AppError> {
    Ok(Json(service.show(account_id, bottle_id).await?))
}

/// `PATCH /cellar/accounts/{account_id}/bottles/{bottle_id}`
pub async fn update_bottle(
    State(service): State<BottleService>,
    Path((account_id, bottle_id)): Path<(i64, i64)>,
    Json(payload): Json<UpdateBottlePayload>,
) -> Result<StatusCode, AppError> {
    service.update(account_id, bottle_id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PUT /cellar/accounts/{account_id}/bottles/{bottle_id}/actions/rate`
pub async fn rate_bottle(
    State(service): State<BottleService>,
    Path((account_id, bottle_id)): Path<(i64, i64)>,
    Json(payload): Json<RateBottlePayload>,
) -> Result<StatusCode, AppError> {
    service.rate(account_id, bottle_id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /cellar/accounts/{account_id}/bottles/{bottle_id}`
pub async fn delete_bottle(
    State(service): State<BottleService>,
    Path((account_id, bottle_id)): Path<(i64, i64)>,
) -> Result<StatusCode, AppError> {
    service.delete(account_id, bottle_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /cellar/accounts/{account_id}/bottles/{bottle_id}/watch`
///
/// Upgrades to a websocket. There is no event feed yet: the socket greets the
/// peer and echoes back whatever it receives.
pub async fn watch_bottle(
    Path((account_id, bottle_id)): Path<(i64, i64)>,
    ws: WebSocketUpgrade,
) -> Response {
    ws.on_upgrade(move |socket| echo_socket(socket, account_id, bottle_id))
}

async fn echo_socket(mut socket: WebSocket, account_id: i64, bottle_id: i64) {
    info!(account_id, bottle_id, "watch socket opened");

    if socket
        .send(Message::Text(WATCH_GREETING.into()))
        .await
        .is_err()
    {
        return;
    }

    while let Some(result) = socket.next().await {
        match result {
            Ok(msg @ (Message::Text(_) | Message::Binary(_))) => {
                if let Err(err) = socket.send(msg).await {
                    debug!(account_id, bottle_id, error = %err, "watch echo failed");
                    break;
                }
            }
            Ok(Message::Close(_)) => break,
            // ping/pong is answered by the protocol layer
            Ok(_) => {}
            Err(err) => {
                debug!(account_id, bottle_id, error = %err, "watch socket error");
                break;
            }
        }
    }

    info!(account_id, bottle_id, "watch socket closed");
}
