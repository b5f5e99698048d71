//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    infrastructure::dto::http::{
        CreateUserRequest, MessageDto, RoomDetailDto, SendMessageRequest, UserDto,
    },
    ui::{error::ApiError, state::AppState},
    usecase::{
        GetRoomMessagesUseCase, ListUsersUseCase, RegisterUserUseCase, SendMessageCommand,
        SendMessageUseCase,
    },
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Register a user
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserDto>), ApiError> {
    let Json(request) = payload?;
    let user = RegisterUserUseCase::new(state.context.clone())
        .execute(request.into_name())
        .await?;
    Ok((StatusCode::CREATED, Json(UserDto::from(&user))))
}

/// List users in registration order
pub async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<UserDto>>, ApiError> {
    let users = ListUsersUseCase::new(state.context.clone()).execute().await?;
    Ok(Json(users.iter().map(UserDto::from).collect()))
}

/// Send a message from one user to another
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageDto>), ApiError> {
    let Json(request) = payload?;
    let command = SendMessageCommand::from(request);

    match SendMessageUseCase::new(state.context.clone())
        .execute(command)
        .await
    {
        Ok(message) => Ok((StatusCode::CREATED, Json(MessageDto::from(&message)))),
        Err(e) => {
            tracing::warn!("Failed to send message: {}", e);
            Err(e.into())
        }
    }
}

/// Get room detail by key
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_key): Path<String>,
) -> Result<Json<RoomDetailDto>, ApiError> {
    let room = GetRoomMessagesUseCase::new(state.context.clone())
        .find_room(room_key)
        .await?;
    Ok(Json(RoomDetailDto::from(&room)))
}

/// Get the message history of a room, oldest first
pub async fn get_room_messages(
    State(state): State<Arc<AppState>>,
    Path(room_key): Path<String>,
) -> Result<Json<Vec<MessageDto>>, ApiError> {
    let messages = GetRoomMessagesUseCase::new(state.context.clone())
        .execute(room_key)
        .await?;
    Ok(Json(messages.iter().map(MessageDto::from).collect()))
}
