//! UseCase 層のエラー定義
//!
//! 各エラーは [`ErrorKind`] を返すため、呼び出し側（UI 層）は種別ごとに応答を切り替えられます。

use thiserror::Error;

use crate::domain::{
    BroadcastError, Message, RepositoryError, RoomKey, UserId, ValueObjectError,
};

/// Caller-facing error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required field is missing
    BadRequest,
    /// A referenced user or room does not exist
    NotFound,
    /// Input is present but invalid
    Validation,
    /// The request conflicts with current state
    Conflict,
    /// The durable store failed
    Store,
    /// A message was persisted but could not be linked to its room
    PartialFailure,
}

/// メッセージ送信のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    /// 必須フィールドの欠落
    #[error("missing required field: {0}")]
    BadRequest(&'static str),

    /// 送信者または受信者が存在しない
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// 入力内容が不正
    #[error("invalid input: {0}")]
    Validation(#[from] ValueObjectError),

    /// ストア操作の失敗
    #[error("store operation failed: {0}")]
    Store(#[from] RepositoryError),

    /// メッセージは保存済みだが Room に紐付いていない
    #[error("message persisted but not linked to room '{room_key}': {source}")]
    PartialFailure {
        message: Box<Message>,
        room_key: RoomKey,
        source: RepositoryError,
    },
}

impl SendMessageError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BadRequest(_) => ErrorKind::BadRequest,
            Self::UserNotFound(_) => ErrorKind::NotFound,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Store(_) => ErrorKind::Store,
            Self::PartialFailure { .. } => ErrorKind::PartialFailure,
        }
    }
}

/// Room のメッセージ履歴取得のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GetRoomMessagesError {
    #[error("invalid room key: {0}")]
    Validation(#[from] ValueObjectError),

    #[error("room not found: {0}")]
    RoomNotFound(RoomKey),

    #[error("store operation failed: {0}")]
    Store(#[from] RepositoryError),
}

impl GetRoomMessagesError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::RoomNotFound(_) => ErrorKind::NotFound,
            Self::Store(_) => ErrorKind::Store,
        }
    }
}

/// ユーザー登録のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegisterUserError {
    #[error("missing required field: {0}")]
    BadRequest(&'static str),

    #[error("invalid input: {0}")]
    Validation(#[from] ValueObjectError),

    #[error("store operation failed: {0}")]
    Store(#[from] RepositoryError),
}

impl RegisterUserError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BadRequest(_) => ErrorKind::BadRequest,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Store(_) => ErrorKind::Store,
        }
    }
}

/// リスナー接続のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectError {
    /// 同じ ID のリスナーが既に接続している
    #[error("listener '{0}' is already connected")]
    DuplicateListener(String),
}

impl ConnectError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Conflict
    }
}

/// リスナー切断のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DisconnectError {
    /// 該当するリスナーが接続していない
    #[error("listener '{0}' is not connected")]
    ListenerNotFound(String),
}

impl DisconnectError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::NotFound
    }
}

impl From<BroadcastError> for ConnectError {
    fn from(error: BroadcastError) -> Self {
        match error {
            BroadcastError::DuplicateListener(id) | BroadcastError::ListenerNotFound(id) => {
                Self::DuplicateListener(id)
            }
        }
    }
}

impl From<BroadcastError> for DisconnectError {
    fn from(error: BroadcastError) -> Self {
        match error {
            BroadcastError::DuplicateListener(id) | BroadcastError::ListenerNotFound(id) => {
                Self::ListenerNotFound(id)
            }
        }
    }
}
