//! End-to-end chat flows against scripted generators.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use persona_chat::core::{is_error_sentinel, ERROR_SENTINEL_PREFIX};
use persona_chat::features::generation::{
    GenerationError, GenerationParams, Role, TextGenerator, Turn,
};
use persona_chat::features::session::{PersonaChatSession, SessionSettings, SessionStatus};
use persona_chat::{execute, ChatError, Command, CommandOutcome};

/// Replies with a fixed outcome and remembers every request it saw
struct Scripted {
    outcome: Result<String, GenerationError>,
    requests: Mutex<Vec<Vec<Turn>>>,
}

impl Scripted {
    fn ok(text: &str) -> Arc<Self> {
        Arc::new(Scripted {
            outcome: Ok(text.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn failing(error: GenerationError) -> Arc<Self> {
        Arc::new(Scripted {
            outcome: Err(error),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn last_request(&self) -> Vec<Turn> {
        self.requests.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for Scripted {
    async fn generate(
        &self,
        turns: &[Turn],
        _params: &GenerationParams,
    ) -> Result<String, GenerationError> {
        self.requests.lock().unwrap().push(turns.to_vec());
        self.outcome.clone()
    }

    fn model_id(&self) -> &str {
        "scripted"
    }
}

fn session(generator: Arc<Scripted>) -> PersonaChatSession {
    PersonaChatSession::new(generator, SessionSettings::default(), "RoastBot").unwrap()
}

#[tokio::test]
async fn first_message_is_recorded_under_active_persona() {
    let generator = Scripted::ok("hi there");
    let mut session = session(generator.clone());

    let reply = session.submit("hello").await;
    assert_eq!(reply.text, "hi there");
    assert!(!reply.failed);

    let exchanges = session.store().to_vec();
    assert_eq!(exchanges.len(), 1);
    assert_eq!(exchanges[0].persona_name, "RoastBot");
    assert_eq!(exchanges[0].user_text, "hello");
    assert_eq!(exchanges[0].bot_text, "hi there");

    let request = generator.last_request();
    assert_eq!(request.len(), 2);
    assert_eq!(request[0].role, Role::System);
    assert_eq!(request[1].content, "hello");
}

#[tokio::test]
async fn switched_persona_sees_annotated_history() {
    let generator = Scripted::ok("hi there");
    let mut session = session(generator.clone());

    session.submit("hello").await;
    session.switch_persona("PirateBot").unwrap();
    session.submit("who am I talking to?").await;

    let request = generator.last_request();
    assert_eq!(request.len(), 4);
    assert_eq!(request[1].role, Role::User);
    assert_eq!(request[1].content, "[Previous conversation with RoastBot] hello");
    assert_eq!(request[2].role, Role::Assistant);
    assert_eq!(request[2].content, "hi there");
    assert_eq!(request[3].content, "who am I talking to?");

    let stats = session.stats();
    assert_eq!(stats.by_persona.get("RoastBot"), Some(&1));
    assert_eq!(stats.by_persona.get("PirateBot"), Some(&1));
}

#[tokio::test]
async fn failed_generation_is_remembered_as_error_text() {
    let generator = Scripted::failing(GenerationError::Timeout(60));
    let mut session = session(generator);

    let reply = session.submit("are you there?").await;
    assert!(reply.failed);
    assert!(reply.text.starts_with(ERROR_SENTINEL_PREFIX));
    assert!(reply.text.contains("timed out"));
    assert_eq!(session.state().status, SessionStatus::Idle);

    let exchanges = session.store().to_vec();
    assert_eq!(exchanges.len(), 1);
    assert!(is_error_sentinel(&exchanges[0].bot_text));
}

#[tokio::test]
async fn memory_keeps_only_the_newest_thirty() {
    let mut session = session(Scripted::ok("ok"));

    for i in 0..31 {
        session.submit(&format!("message {i}")).await;
    }

    assert_eq!(session.store().size(), 30);
    let first = session.store().iter().next().unwrap();
    assert_eq!(first.user_text, "message 1");
}

#[tokio::test]
async fn requests_carry_at_most_twenty_exchanges() {
    let generator = Scripted::ok("ok");
    let mut session = session(generator.clone());

    for i in 0..25 {
        session.submit(&format!("message {i}")).await;
    }

    // system + 20 pairs of the previous 24 exchanges + the new input
    let request = generator.last_request();
    assert_eq!(request.len(), 1 + 20 * 2 + 1);
    assert_eq!(request[1].content, "message 4");
}

#[tokio::test]
async fn unknown_persona_keeps_current_one() {
    let mut session = session(Scripted::ok("ok"));

    let err = session.switch_persona("NinjaBot").unwrap_err();
    assert!(matches!(err, ChatError::UnknownPersona(_)));
    assert_eq!(session.active_persona_name(), "RoastBot");

    match execute(&mut session, Command::parse("/persona NinjaBot")).await {
        CommandOutcome::Error(message) => assert!(message.contains("NinjaBot")),
        other => panic!("expected error outcome, got {other:?}"),
    }
    assert_eq!(session.active_persona_name(), "RoastBot");
}

#[tokio::test]
async fn sessions_do_not_share_memory() {
    let mut first = session(Scripted::ok("one"));
    let second = session(Scripted::ok("two"));

    first.submit("hello").await;

    assert_eq!(first.store().size(), 1);
    assert!(second.store().is_empty());
}

#[tokio::test]
async fn export_writes_document_and_keeps_memory() {
    let dir = tempfile::tempdir().unwrap();
    let settings = SessionSettings {
        export_dir: dir.path().to_path_buf(),
        ..SessionSettings::default()
    };
    let mut session =
        PersonaChatSession::new(Scripted::ok("arr"), settings, "PirateBot").unwrap();
    session.submit("ahoy").await;

    let path = session.export_all().unwrap();
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("chatbot_global_conversations_"));
    assert!(name.ends_with(".json"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["session_type"], "shared_memory_across_personas");
    assert_eq!(json["total_exchanges"], 1);
    assert_eq!(json["global_conversation_history"][0]["persona"], "PirateBot");
    assert_eq!(json["personas"].as_object().unwrap().len(), 5);

    assert_eq!(session.store().size(), 1);
}

#[tokio::test]
async fn export_failure_is_reported_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let settings = SessionSettings {
        export_dir: dir.path().join("missing").join("nested"),
        ..SessionSettings::default()
    };
    let mut session = PersonaChatSession::new(Scripted::ok("ok"), settings, "RoastBot").unwrap();
    session.submit("hello").await;

    assert!(matches!(session.export_all(), Err(ChatError::Export(_))));
    assert_eq!(
        execute(&mut session, Command::Export).await,
        CommandOutcome::Error("Export failed!".to_string())
    );
    assert_eq!(session.store().size(), 1);
}
