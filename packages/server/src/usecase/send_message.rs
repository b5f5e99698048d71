//! UseCase: メッセージ送信処理（配信パイプライン）
//!
//! 入力チェック → 送信者・受信者の存在確認 → ルームキー解決 → Room の find-or-create
//! → メッセージ保存 → Room への紐付け → ブロードキャスト、の順に実行します。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 各ステップでの失敗時の打ち切りとエラー種別
//!
//! ### なぜこのテストが必要か
//! - 同じペアのメッセージが常に 1 つの Room にまとまることを保証
//! - 不正な入力や存在しないユーザーでストアが変更されないことを保証
//! - 保存後の紐付け失敗が PartialFailure として区別されることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：送信、逆方向の送信、ブロードキャスト
//! - 異常系：フィールド欠落、空の本文、存在しないユーザー、ストア障害、期限切れ
//! - 並行性：同じペアへの 50 件同時送信

use crate::domain::{Message, MessageText, RepositoryError, UserId, resolve_room_key};

use super::{context::ChatContext, error::SendMessageError};

/// Raw send request as received from the transport.
///
/// Fields are optional so that a missing field is reported as
/// `SendMessageError::BadRequest`.
#[derive(Debug, Clone, Default)]
pub struct SendMessageCommand {
    pub sender_id: Option<String>,
    pub receiver_id: Option<String>,
    pub text: Option<String>,
}

impl SendMessageCommand {
    /// 全フィールドが揃ったコマンドを作成
    pub fn new(
        sender_id: impl Into<String>,
        receiver_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            sender_id: Some(sender_id.into()),
            receiver_id: Some(receiver_id.into()),
            text: Some(text.into()),
        }
    }
}

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    context: ChatContext,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(context: ChatContext) -> Self {
        Self { context }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `command` - 送信者 ID・受信者 ID・本文
    ///
    /// # Returns
    ///
    /// * `Ok(Message)` - 保存され Room に紐付いたメッセージ（ブロードキャストの成否は問わない）
    /// * `Err(SendMessageError)` - 送信失敗
    pub async fn execute(&self, command: SendMessageCommand) -> Result<Message, SendMessageError> {
        let ctx = &self.context;

        // 1. 入力チェック（欠落は BadRequest、内容の不正は Validation）
        let sender_raw = require_id("sender_id", command.sender_id)?;
        let receiver_raw = require_id("receiver_id", command.receiver_id)?;
        let text_raw = command.text.ok_or(SendMessageError::BadRequest("text"))?;
        let sender_id = UserId::new(sender_raw)?;
        let receiver_id = UserId::new(receiver_raw)?;
        let text = MessageText::new(text_raw)?;

        // 2. 送信者・受信者の存在確認
        for user_id in [&sender_id, &receiver_id] {
            if ctx.store(ctx.users.find_by_id(user_id)).await?.is_none() {
                tracing::debug!("Rejecting message: user '{}' not found", user_id);
                return Err(SendMessageError::UserNotFound(user_id.clone()));
            }
        }

        // 3. ルームキーの解決
        let room_key = resolve_room_key(&sender_id, &receiver_id);

        // 4. Room の find-or-create（ストア側でアトミック）
        let room = ctx
            .store(
                ctx.rooms
                    .create_if_absent(room_key.clone(), [sender_id.clone(), receiver_id.clone()]),
            )
            .await?;
        if !room.is_between(&sender_id, &receiver_id) {
            return Err(SendMessageError::Store(RepositoryError::Conflict(format!(
                "room '{}' belongs to other participants",
                room.key
            ))));
        }
        tracing::debug!(
            "Resolved room '{}' ({} messages so far)",
            room.key,
            room.message_ids.len()
        );

        // 5. メッセージ保存
        let message = ctx
            .store(ctx.messages.create(sender_id, receiver_id, text))
            .await?;

        // 6. Room への紐付け（失敗時は保存済みメッセージを PartialFailure で返す）
        if let Err(source) = ctx
            .store(ctx.rooms.append_message(&room_key, message.id.clone()))
            .await
        {
            tracing::error!(
                "Message '{}' persisted but not linked to room '{}': {}",
                message.id,
                room_key,
                source
            );
            return Err(SendMessageError::PartialFailure {
                message: Box::new(message),
                room_key,
                source,
            });
        }

        // 7. ブロードキャスト（失敗はチャンネル内で処理され、ここには返らない）
        let delivered = ctx.broadcast.publish(&message).await;
        tracing::debug!(
            "Message '{}' in room '{}' delivered to {} listener(s)",
            message.id,
            room_key,
            delivered
        );

        // 8. 保存済みメッセージを返す
        Ok(message)
    }
}

/// 欠落または空の ID を BadRequest として扱う
fn require_id(field: &'static str, value: Option<String>) -> Result<String, SendMessageError> {
    match value {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(SendMessageError::BadRequest(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            BroadcastChannel, ListenerIdFactory, MessageId, Room, RoomRepository, Timestamp, User, UserName, UserRepository, ValueObjectError,
            broadcast::MockBroadcastChannel,
            repository::{MockMessageRepository, MockRoomRepository, MockUserRepository},
        },
        infrastructure::{
            InMemoryBroadcastChannel, InMemoryMessageRepository, InMemoryRoomRepository,
            InMemoryUserRepository,
        },
        usecase::{ErrorKind, GetRoomMessagesUseCase},
    };
    use async_trait::async_trait;
    use std::{collections::HashSet, sync::Arc, time::Duration};
    use tokio::sync::mpsc;

    /// インメモリ実装で構築したテスト用コンテキスト
    struct Fixture {
        context: ChatContext,
        rooms: InMemoryRoomRepository,
        messages: InMemoryMessageRepository,
        broadcast: InMemoryBroadcastChannel,
    }

    async fn create_fixture(user_ids: &[&str]) -> Fixture {
        let users = InMemoryUserRepository::new();
        for id in user_ids {
            users
                .insert(User::new(
                    UserId::new(id.to_string()).unwrap(),
                    UserName::new(format!("user {id}")).unwrap(),
                    Timestamp::new(0),
                ))
                .await;
        }
        let rooms = InMemoryRoomRepository::new();
        let messages = InMemoryMessageRepository::new();
        let broadcast = InMemoryBroadcastChannel::new();
        let context = ChatContext::new(
            Arc::new(users),
            Arc::new(rooms.clone()),
            Arc::new(messages.clone()),
            Arc::new(broadcast.clone()),
        );
        Fixture {
            context,
            rooms,
            messages,
            broadcast,
        }
    }

    fn user(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    fn known_user(id: &UserId) -> User {
        User::new(
            id.clone(),
            UserName::new("someone".to_string()).unwrap(),
            Timestamp::new(0),
        )
    }

    fn mock_context(
        users: MockUserRepository,
        rooms: MockRoomRepository,
        messages: MockMessageRepository,
        broadcast: MockBroadcastChannel,
    ) -> ChatContext {
        ChatContext::new(
            Arc::new(users),
            Arc::new(rooms),
            Arc::new(messages),
            Arc::new(broadcast),
        )
    }

    fn users_that_all_exist() -> MockUserRepository {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(known_user(id))));
        users
    }

    #[tokio::test]
    async fn test_send_message_success() {
        // テスト項目: メッセージが保存され、Room に紐付き、リスナーに配信される
        // given (前提条件):
        let fixture = create_fixture(&["u1", "u2"]).await;
        let (tx, mut rx) = mpsc::unbounded_channel();
        fixture
            .broadcast
            .connect(ListenerIdFactory::generate(), tx)
            .await
            .unwrap();
        let usecase = SendMessageUseCase::new(fixture.context.clone());

        // when (操作):
        let message = usecase
            .execute(SendMessageCommand::new("u1", "u2", "hi"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(message.sender_id, user("u1"));
        assert_eq!(message.receiver_id, user("u2"));
        assert_eq!(message.text.as_str(), "hi");

        let key = resolve_room_key(&user("u1"), &user("u2"));
        let room = fixture.rooms.find_by_key(&key).await.unwrap().unwrap();
        assert_eq!(room.message_ids, vec![message.id.clone()]);

        let frame = rx.try_recv().unwrap();
        let json: serde_json::Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(json["type"], "newMessage");
        assert_eq!(json["payload"]["id"], message.id.as_str());
    }

    #[tokio::test]
    async fn test_both_directions_share_one_room() {
        // テスト項目: u1→u2 と u2→u1 のメッセージは同じ Room に送信順で並ぶ
        // given (前提条件):
        let fixture = create_fixture(&["u1", "u2"]).await;
        let usecase = SendMessageUseCase::new(fixture.context.clone());

        // when (操作):
        usecase
            .execute(SendMessageCommand::new("u1", "u2", "hi"))
            .await
            .unwrap();
        usecase
            .execute(SendMessageCommand::new("u2", "u1", "yo"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(fixture.rooms.count_rooms().await, 1);
        let key = resolve_room_key(&user("u1"), &user("u2"));
        let history = GetRoomMessagesUseCase::new(fixture.context.clone())
            .execute(key.as_str().to_string())
            .await
            .unwrap();
        let texts: Vec<&str> = history.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["hi", "yo"]);
    }

    #[tokio::test]
    async fn test_missing_fields_are_bad_requests() {
        // テスト項目: 必須フィールドの欠落は BadRequest になる
        // given (前提条件): ストアは一切呼ばれない（モックに期待値なし）
        let context = mock_context(
            MockUserRepository::new(),
            MockRoomRepository::new(),
            MockMessageRepository::new(),
            MockBroadcastChannel::new(),
        );
        let usecase = SendMessageUseCase::new(context);

        let cases = [
            (
                SendMessageCommand {
                    sender_id: None,
                    ..SendMessageCommand::new("u1", "u2", "hi")
                },
                "sender_id",
            ),
            (
                SendMessageCommand {
                    sender_id: Some(String::new()),
                    ..SendMessageCommand::new("u1", "u2", "hi")
                },
                "sender_id",
            ),
            (
                SendMessageCommand {
                    receiver_id: None,
                    ..SendMessageCommand::new("u1", "u2", "hi")
                },
                "receiver_id",
            ),
            (
                SendMessageCommand {
                    text: None,
                    ..SendMessageCommand::new("u1", "u2", "hi")
                },
                "text",
            ),
        ];

        for (command, field) in cases {
            // when (操作):
            let result = usecase.execute(command).await;

            // then (期待する結果):
            assert_eq!(result, Err(SendMessageError::BadRequest(field)));
        }
    }

    #[tokio::test]
    async fn test_empty_text_fails_before_any_store_call() {
        // テスト項目: 空の本文は ValidationError となり、ストアは一切変更されない
        // given (前提条件): ストアのモックに期待値なし（呼ばれたらパニック）
        let context = mock_context(
            MockUserRepository::new(),
            MockRoomRepository::new(),
            MockMessageRepository::new(),
            MockBroadcastChannel::new(),
        );
        let usecase = SendMessageUseCase::new(context);

        // when (操作):
        let result = usecase.execute(SendMessageCommand::new("u1", "u2", "")).await;

        // then (期待する結果):
        let error = result.unwrap_err();
        assert_eq!(
            error,
            SendMessageError::Validation(ValueObjectError::MessageTextEmpty)
        );
        assert_eq!(error.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_unknown_sender_creates_nothing() {
        // テスト項目: 存在しない送信者は NotFound となり、Room もメッセージも作られない
        // given (前提条件):
        let fixture = create_fixture(&["u2"]).await;
        let usecase = SendMessageUseCase::new(fixture.context.clone());

        // when (操作):
        let result = usecase
            .execute(SendMessageCommand::new("ghost", "u2", "hi"))
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(SendMessageError::UserNotFound(user("ghost"))));
        assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(fixture.rooms.count_rooms().await, 0);
        assert_eq!(fixture.messages.count_messages().await, 0);
    }

    #[tokio::test]
    async fn test_unknown_receiver_creates_nothing() {
        // テスト項目: 存在しない受信者は NotFound となり、Room もメッセージも作られない
        let fixture = create_fixture(&["u1"]).await;
        let usecase = SendMessageUseCase::new(fixture.context.clone());

        let result = usecase
            .execute(SendMessageCommand::new("u1", "ghost", "hi"))
            .await;

        assert_eq!(result, Err(SendMessageError::UserNotFound(user("ghost"))));
        assert_eq!(fixture.rooms.count_rooms().await, 0);
        assert_eq!(fixture.messages.count_messages().await, 0);
    }

    #[tokio::test]
    async fn test_room_store_failure_is_store_error() {
        // テスト項目: Room の作成に失敗した場合は StoreError となり、メッセージは保存されない
        // given (前提条件):
        let mut rooms = MockRoomRepository::new();
        rooms
            .expect_create_if_absent()
            .returning(|_, _| Err(RepositoryError::Unavailable("connection refused".to_string())));
        let mut messages = MockMessageRepository::new();
        messages.expect_create().never();
        let context = mock_context(
            users_that_all_exist(),
            rooms,
            messages,
            MockBroadcastChannel::new(),
        );
        let usecase = SendMessageUseCase::new(context);

        // when (操作):
        let result = usecase.execute(SendMessageCommand::new("u1", "u2", "hi")).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(SendMessageError::Store(RepositoryError::Unavailable(
                "connection refused".to_string()
            )))
        );
    }

    #[tokio::test]
    async fn test_link_failure_is_partial_failure() {
        // テスト項目: 保存後の紐付けに失敗した場合は PartialFailure となり、配信されない
        // given (前提条件):
        let mut rooms = MockRoomRepository::new();
        rooms
            .expect_create_if_absent()
            .returning(|key, [a, b]| Ok(Room::new(key, a, b, Timestamp::new(0))));
        rooms
            .expect_append_message()
            .times(1)
            .returning(|_, _| Err(RepositoryError::Unavailable("write timeout".to_string())));
        let mut messages = MockMessageRepository::new();
        messages.expect_create().times(1).returning(|sender, receiver, text| {
            Ok(Message::new(
                MessageId::new("m1".to_string()).unwrap(),
                sender,
                receiver,
                text,
                Timestamp::new(1),
            ))
        });
        let mut broadcast = MockBroadcastChannel::new();
        broadcast.expect_publish().never();
        let context = mock_context(users_that_all_exist(), rooms, messages, broadcast);
        let usecase = SendMessageUseCase::new(context);

        // when (操作):
        let result = usecase.execute(SendMessageCommand::new("u1", "u2", "hi")).await;

        // then (期待する結果):
        let error = result.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::PartialFailure);
        match error {
            SendMessageError::PartialFailure {
                message,
                room_key,
                source,
            } => {
                assert_eq!(message.id.as_str(), "m1");
                assert_eq!(room_key, resolve_room_key(&user("u1"), &user("u2")));
                assert_eq!(
                    source,
                    RepositoryError::Unavailable("write timeout".to_string())
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_broadcast_outcome_does_not_affect_result() {
        // テスト項目: 配信先が 0 件でも送信は成功する
        // given (前提条件):
        let mut rooms = MockRoomRepository::new();
        rooms
            .expect_create_if_absent()
            .returning(|key, [a, b]| Ok(Room::new(key, a, b, Timestamp::new(0))));
        rooms.expect_append_message().returning(|_, _| Ok(()));
        let mut messages = MockMessageRepository::new();
        messages.expect_create().returning(|sender, receiver, text| {
            Ok(Message::new(
                MessageId::new("m1".to_string()).unwrap(),
                sender,
                receiver,
                text,
                Timestamp::new(1),
            ))
        });
        let mut broadcast = MockBroadcastChannel::new();
        broadcast.expect_publish().times(1).returning(|_| 0);
        let context = mock_context(users_that_all_exist(), rooms, messages, broadcast);

        // when (操作):
        let result = SendMessageUseCase::new(context)
            .execute(SendMessageCommand::new("u1", "u2", "hi"))
            .await;

        // then (期待する結果):
        assert_eq!(result.unwrap().id.as_str(), "m1");
    }

    #[tokio::test]
    async fn test_room_with_other_participants_is_rejected() {
        // テスト項目: ストアが別ペアの Room を返した場合はメッセージを保存しない
        let mut rooms = MockRoomRepository::new();
        rooms.expect_create_if_absent().returning(|key, _| {
            Ok(Room::new(key, user("x1"), user("x2"), Timestamp::new(0)))
        });
        let mut messages = MockMessageRepository::new();
        messages.expect_create().never();
        let context = mock_context(
            users_that_all_exist(),
            rooms,
            messages,
            MockBroadcastChannel::new(),
        );

        let result = SendMessageUseCase::new(context)
            .execute(SendMessageCommand::new("u1", "u2", "hi"))
            .await;

        assert_eq!(result.unwrap_err().kind(), ErrorKind::Store);
    }

    /// 応答しないユーザーストア（期限切れの確認用）
    struct StalledUserRepository;

    #[async_trait]
    impl UserRepository for StalledUserRepository {
        async fn create(&self, _name: UserName) -> Result<User, RepositoryError> {
            std::future::pending().await
        }

        async fn find_by_id(&self, _id: &UserId) -> Result<Option<User>, RepositoryError> {
            std::future::pending().await
        }

        async fn list(&self) -> Result<Vec<User>, RepositoryError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_store_deadline_expiry_is_store_error() {
        // テスト項目: ストア呼び出しが期限を超えた場合は StoreError（Timeout）になる
        // given (前提条件):
        let limit = Duration::from_millis(20);
        let context = ChatContext::new(
            Arc::new(StalledUserRepository),
            Arc::new(InMemoryRoomRepository::new()),
            Arc::new(InMemoryMessageRepository::new()),
            Arc::new(InMemoryBroadcastChannel::new()),
        )
        .with_store_timeout(Some(limit));

        // when (操作):
        let result = SendMessageUseCase::new(context)
            .execute(SendMessageCommand::new("u1", "u2", "hi"))
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(SendMessageError::Store(RepositoryError::Timeout(limit)))
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_sends_converge_on_one_room() {
        // テスト項目: 同じペアへの 50 件の同時送信で Room は 1 つ、メッセージは 50 件すべて紐付く
        // given (前提条件):
        let fixture = create_fixture(&["a", "b"]).await;

        // when (操作):
        let mut handles = Vec::new();
        for i in 0..50 {
            let context = fixture.context.clone();
            handles.push(tokio::spawn(async move {
                SendMessageUseCase::new(context)
                    .execute(SendMessageCommand::new("a", "b", format!("msg {i}")))
                    .await
            }));
        }
        let mut sent = Vec::new();
        for handle in handles {
            sent.push(handle.await.unwrap().unwrap());
        }

        // then (期待する結果):
        assert_eq!(fixture.rooms.count_rooms().await, 1);
        assert_eq!(fixture.messages.count_messages().await, 50);

        let key = resolve_room_key(&user("a"), &user("b"));
        let room = fixture.rooms.find_by_key(&key).await.unwrap().unwrap();
        assert_eq!(room.message_ids.len(), 50);
        let linked: HashSet<_> = room.message_ids.iter().cloned().collect();
        let expected: HashSet<_> = sent.iter().map(|m| m.id.clone()).collect();
        assert_eq!(linked, expected);
    }
}
