use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use yoga_model::{Llm, Message, MockLlm, ModelError, Role};

#[tokio::test]
async fn mock_is_usable_as_trait_object() {
    let llm: Arc<dyn Llm> = Arc::new(MockLlm::new("scripted").with_reply("Pranayama"));
    assert_eq!(llm.name(), "scripted");

    let reply = llm
        .invoke(vec![Message::system("Classify."), Message::user("How do I breathe in Ujjayi?")])
        .await
        .unwrap();
    assert_eq!(reply, "Pranayama");
}

#[tokio::test]
async fn invoke_concatenates_fragments() {
    let llm = MockLlm::new("scripted").with_fragments(["Child's pose ", "rests ", "the back."]);
    let reply = llm.invoke(vec![Message::user("child's pose")]).await.unwrap();
    assert_eq!(reply, "Child's pose rests the back.");
}

#[tokio::test]
async fn invoke_propagates_mid_stream_failure() {
    let llm = MockLlm::new("scripted").with_stream_failure(["half an "], "socket closed");
    let err = llm.invoke(vec![Message::user("q")]).await.unwrap_err();
    assert!(matches!(err, ModelError::Stream(message) if message == "socket closed"));
}

#[tokio::test]
async fn error_reply_fails_the_call() {
    let llm = MockLlm::new("scripted").with_error("model not loaded");
    assert!(llm.stream(vec![Message::user("q")]).await.is_err());
    assert_eq!(llm.call_count(), 1);
}

#[tokio::test]
async fn calls_record_roles_and_content() {
    let llm = MockLlm::new("scripted").with_reply("ok");
    llm.invoke(vec![Message::system("rules"), Message::user("question")]).await.unwrap();

    let calls = llm.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0][0].role, Role::System);
    assert_eq!(calls[0][1].content, "question");
}

#[tokio::test(start_paused = true)]
async fn delayed_reply_can_be_timed_out() {
    let llm = MockLlm::new("slow").with_reply("late").with_delay(Duration::from_secs(60));
    let result = tokio::time::timeout(Duration::from_secs(30), llm.invoke(vec![Message::user("q")])).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn dropping_the_stream_early_is_fine() {
    let llm = MockLlm::new("scripted").with_fragments(["one", "two", "three"]);
    let mut stream = llm.stream(vec![Message::user("q")]).await.unwrap();
    assert_eq!(stream.next().await.unwrap().unwrap(), "one");
    drop(stream);
    assert_eq!(llm.invoke(vec![Message::user("again")]).await.unwrap(), "onetwothree");
}
