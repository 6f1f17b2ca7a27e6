//! End-to-end engine flows driven through key events with mock
//! collaborators.

mod common;

use chrono::{Duration, Utc};
use crossterm::event::KeyCode;

use common::{TestApp, TEST_SYSTEM_PROMPT};
use gpt_term::app::{AppMessage, Handoff, Mode};
use gpt_term::error::{EditorError, ProcessError};
use gpt_term::models::{Conversation, Message, Role};
use gpt_term::traits::shell_argv;

#[tokio::test]
async fn test_reply_command_is_selected_and_run() {
    let mut t = TestApp::new();
    t.assistant
        .push_reply("You can list them with <command>ls -la</command>");
    t.runner.push_output("total 0\nfile.txt\n", 0);

    t.send("list files");
    assert!(t.app.is_loading());
    t.pump().await;
    assert!(!t.app.is_loading());
    assert_eq!(t.app.conversation.len(), 3);

    // The reply was persisted
    let saved = t.store.get(t.app.conversation.id).unwrap();
    assert_eq!(saved.len(), 3);

    t.ctrl('x');
    assert_eq!(
        t.app.mode,
        Mode::CommandSelect {
            commands: vec!["ls -la".to_string()],
            selected: 0,
            source: t.app.conversation.message_ref(2).unwrap(),
        }
    );

    t.press(KeyCode::Enter);
    assert!(t.app.mode.is_normal());
    assert_eq!(t.app.running_commands(), 1);
    t.pump().await;
    assert_eq!(t.app.running_commands(), 0);

    let runs = t.runner.runs();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].argv, shell_argv("ls -la"));

    let last = t.app.conversation.messages.last().unwrap();
    assert_eq!(last.role, Role::Assistant);
    assert!(last.content.contains("Command ran: ls -la"));
    assert!(last.content.contains("Command executed successfully"));
    assert!(last.content.contains("file.txt"));

    // Output is not sent back automatically
    assert_eq!(t.assistant.request_count(), 1);
}

#[tokio::test]
async fn test_request_carries_system_prompt_and_turns() {
    let mut t = TestApp::new();
    t.send("hello");
    t.pump().await;

    let requests = t.assistant.requests();
    assert_eq!(requests[0].system, TEST_SYSTEM_PROMPT);
    assert_eq!(requests[0].history.len(), 1);
    assert_eq!(requests[0].history[0].content, "hello");
}

#[tokio::test]
async fn test_digit_runs_that_command() {
    let mut t = TestApp::new();
    t.assistant
        .push_reply("<command>pwd</command> or <command>whoami</command>");
    t.send("who");
    t.pump().await;

    t.ctrl('x');
    t.press(KeyCode::Char('2'));
    t.pump().await;
    assert_eq!(t.runner.runs()[0].argv, shell_argv("whoami"));
}

#[tokio::test]
async fn test_failing_command_is_still_recorded() {
    let mut t = TestApp::new();
    t.assistant.push_reply("<command>false</command>");
    t.runner.push_output("", 1);
    t.send("fail");
    t.pump().await;

    t.ctrl('x');
    t.press(KeyCode::Enter);
    t.pump().await;

    let last = t.app.conversation.messages.last().unwrap();
    assert!(last.content.contains("Command failed: exit status 1"));
    assert!(t.app.last_error.is_none());
}

#[tokio::test]
async fn test_command_that_cannot_start_reports_error() {
    let mut t = TestApp::new();
    t.assistant.push_reply("<command>nope</command>");
    t.runner.push_error(ProcessError::Spawn {
        program: "sh".to_string(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
    });
    t.send("go");
    t.pump().await;
    let before = t.app.conversation.len();

    t.ctrl('x');
    t.press(KeyCode::Enter);
    t.pump().await;

    assert_eq!(t.app.conversation.len(), before);
    assert!(t.app.last_error.is_some());
    assert_eq!(t.app.running_commands(), 0);
}

#[tokio::test]
async fn test_copy_selected_command() {
    let mut t = TestApp::new();
    t.assistant.push_reply("<command>echo hi</command>");
    t.send("greet");
    t.pump().await;

    t.ctrl('x');
    t.press(KeyCode::Char('c'));
    assert!(t.app.mode.is_normal());
    t.pump().await;

    assert_eq!(t.clipboard.copies(), vec!["echo hi"]);
    assert_eq!(t.app.notice.as_deref(), Some("Copied to clipboard"));
}

#[tokio::test]
async fn test_unsupported_clipboard_is_recoverable() {
    let mut t = TestApp::with_clipboard(gpt_term::adapters::mock::MockClipboard::unsupported());
    t.assistant.push_reply("<command>echo hi</command>");
    t.send("greet");
    t.pump().await;

    t.ctrl('x');
    t.press(KeyCode::Char('c'));
    t.pump().await;

    assert!(t.app.last_error.is_some());
    assert!(t.app.mode.is_normal());
}

#[tokio::test]
async fn test_edit_truncates_and_resends() {
    let mut t = TestApp::new();
    t.assistant.push_reply("first reply");
    t.assistant.push_reply("second reply");
    t.assistant.push_reply("edited reply");
    t.send("one");
    t.pump().await;
    t.send("two");
    t.pump().await;
    assert_eq!(t.app.conversation.len(), 5);

    t.ctrl('k');
    assert_eq!(t.app.mode, Mode::Editing { cursor: 4 });
    t.press(KeyCode::Char('k'));
    t.press(KeyCode::Char('k'));
    assert_eq!(t.app.mode, Mode::Editing { cursor: 2 });
    t.press(KeyCode::Char('k'));
    t.press(KeyCode::Enter);

    let Some(Handoff::Edit {
        conversation_id,
        index,
        content,
    }) = t.app.take_handoff()
    else {
        panic!("expected an edit hand-off");
    };
    assert_eq!(index, 1);
    assert_eq!(content, "one");

    t.app.handle_message(AppMessage::EditFinished {
        conversation_id,
        index,
        result: Ok("one, edited\n".to_string()),
    });
    assert!(t.app.mode.is_normal());
    assert_eq!(t.contents()[1..], ["one, edited".to_string()]);
    assert!(t.app.is_loading());

    t.pump().await;
    assert_eq!(t.contents()[1..], ["one, edited".to_string(), "edited reply".to_string()]);

    let last_request = t.assistant.requests().pop().unwrap();
    assert_eq!(last_request.history.len(), 1);
    assert_eq!(t.store.get(conversation_id).unwrap().len(), 3);
}

#[tokio::test]
async fn test_output_of_command_from_discarded_reply_is_dropped() {
    let mut t = TestApp::new();
    t.assistant.push_reply("Try <command>ls</command>");
    t.assistant.push_reply("fresh reply");
    t.runner.push_output("old listing\n", 0);
    t.send("one");
    t.pump().await;

    t.ctrl('x');
    t.press(KeyCode::Enter);
    let held = t.next_message().await;
    assert!(matches!(held, AppMessage::CommandFinished { .. }));

    let id = t.app.conversation.id;
    t.app.handle_message(AppMessage::EditFinished {
        conversation_id: id,
        index: 1,
        result: Ok("two".to_string()),
    });
    t.app.handle_message(held);
    assert_eq!(t.app.running_commands(), 0);
    t.pump().await;

    assert_eq!(
        t.contents(),
        [TEST_SYSTEM_PROMPT, "two", "fresh reply"].map(String::from)
    );
    assert_eq!(t.store.get(id).unwrap().len(), 3);
}

#[tokio::test]
async fn test_empty_edit_is_cancelled() {
    let mut t = TestApp::new();
    t.send("keep me");
    t.pump().await;

    let id = t.app.conversation.id;
    t.app.handle_message(AppMessage::EditFinished {
        conversation_id: id,
        index: 1,
        result: Ok("\n\n".to_string()),
    });
    assert_eq!(t.app.conversation.len(), 3);
    assert!(t.app.notice.as_deref().unwrap().contains("cancelled"));
    assert_eq!(t.assistant.request_count(), 1);
}

#[tokio::test]
async fn test_failed_editor_keeps_conversation() {
    let mut t = TestApp::new();
    t.send("keep me");
    t.pump().await;

    let id = t.app.conversation.id;
    t.app.handle_message(AppMessage::EditFinished {
        conversation_id: id,
        index: 1,
        result: Err(EditorError::Exited {
            editor: "vim".to_string(),
            status: "exit status: 1".to_string(),
        }),
    });
    assert_eq!(t.app.conversation.len(), 3);
    assert!(t.app.last_error.is_some());
}

#[tokio::test]
async fn test_reply_for_previous_conversation_goes_to_its_snapshot() {
    let mut t = TestApp::new();
    t.assistant.push_reply("late reply");
    t.send("hello");
    let first_id = t.app.conversation.id;

    t.ctrl('n');
    assert_ne!(t.app.conversation.id, first_id);
    assert!(!t.app.is_loading());

    t.pump().await;
    assert_eq!(t.app.conversation.len(), 1);
    let saved = t.store.get(first_id).unwrap();
    assert_eq!(saved.messages.last().unwrap().content, "late reply");
}

#[tokio::test]
async fn test_reply_for_unsaved_conversation_is_dropped() {
    let mut t = TestApp::new();
    t.store.set_fail_saves(true);
    t.send("hello");
    let first_id = t.app.conversation.id;
    t.ctrl('n');
    t.store.set_fail_saves(false);

    t.pump().await;
    assert!(t.store.get(first_id).is_none());
    assert_eq!(t.app.conversation.len(), 1);
}

#[tokio::test]
async fn test_send_refused_while_waiting() {
    let mut t = TestApp::new();
    t.send("first");
    t.send("second");

    assert_eq!(t.app.conversation.len(), 2);
    assert_eq!(t.app.input.get_content(), "second");
    assert!(t.app.notice.is_some());

    t.pump().await;
    t.press(KeyCode::Enter);
    assert_eq!(t.app.conversation.len(), 4);
    assert!(t.app.input.is_empty());
}

#[tokio::test]
async fn test_empty_prompt_retries_unanswered_message() {
    let mut t = TestApp::new();
    t.assistant
        .push_error(gpt_term::error::AssistantError::Connection("refused".into()));
    t.send("hello");
    t.pump().await;
    assert!(t.app.last_error.is_some());
    assert_eq!(t.app.conversation.len(), 2);

    t.press(KeyCode::Enter);
    assert!(t.app.last_error.is_none());
    t.pump().await;
    assert_eq!(t.app.conversation.len(), 3);
    assert_eq!(t.assistant.request_count(), 2);
}

#[tokio::test]
async fn test_empty_prompt_without_unanswered_message_is_noop() {
    let mut t = TestApp::new();
    t.press(KeyCode::Enter);
    assert!(!t.app.is_loading());
    assert_eq!(t.assistant.request_count(), 0);
}

#[tokio::test]
async fn test_scrolling_long_transcript() {
    let mut t = TestApp::new();
    for i in 0..10 {
        t.app
            .conversation
            .push(Message::user(format!("question number {}", i)));
        t.app
            .conversation
            .push(Message::assistant(format!("answer number {}", i)));
    }
    t.app.enter_normal();

    let bottom = t.app.viewport.offset();
    assert_eq!(bottom, t.app.viewport.max_offset());
    assert!(bottom > 3);

    t.press(KeyCode::Up);
    assert_eq!(t.app.viewport.offset(), bottom - 3);
    t.press(KeyCode::Home);
    assert_eq!(t.app.viewport.offset(), 0);
    t.press(KeyCode::Up);
    assert_eq!(t.app.viewport.offset(), 0);
    t.press(KeyCode::End);
    assert_eq!(t.app.viewport.offset(), bottom);
    t.press(KeyCode::Down);
    assert_eq!(t.app.viewport.offset(), bottom);
}

#[tokio::test]
async fn test_edit_cursor_keeps_selection_visible() {
    let mut t = TestApp::new();
    for i in 0..10 {
        t.app.conversation.push(Message::user(format!("q{}", i)));
        t.app.conversation.push(Message::assistant(format!("a{}", i)));
    }
    t.ctrl('k');
    for _ in 0..19 {
        t.press(KeyCode::Char('k'));
    }
    assert_eq!(t.app.mode, Mode::Editing { cursor: 1 });
    let anchor = t.app.anchors()[1];
    let offset = t.app.viewport.offset();
    assert!(anchor >= offset && anchor < offset + t.app.viewport.height() as usize);
}

#[tokio::test]
async fn test_empty_history() {
    let mut t = TestApp::new();
    t.ctrl('r');
    assert!(matches!(t.app.mode, Mode::History { .. }));
    assert!(t.rendered().iter().any(|r| r == "No saved conversations."));

    t.press(KeyCode::Down);
    t.press(KeyCode::Enter);
    assert!(matches!(t.app.mode, Mode::History { selected: 0, .. }));
    t.press(KeyCode::Esc);
    assert!(t.app.mode.is_normal());
}

fn saved_conversation(text: &str, age_minutes: i64) -> Conversation {
    let mut c = Conversation::new(TEST_SYSTEM_PROMPT);
    c.created_at = Utc::now() - Duration::minutes(age_minutes);
    c.push(Message::user(text));
    c.push(Message::assistant(format!("reply to {}", text)));
    c
}

#[tokio::test]
async fn test_history_select_loads_conversation() {
    let mut t = TestApp::new();
    t.store.insert(saved_conversation("older", 60));
    t.store.insert(saved_conversation("newer", 5));

    t.ctrl('r');
    let rows = t.rendered();
    let newer = rows.iter().position(|r| r.contains("newer")).unwrap();
    let older = rows.iter().position(|r| r.contains("older")).unwrap();
    assert!(newer < older);

    t.press(KeyCode::Down);
    t.press(KeyCode::Enter);
    assert!(t.app.mode.is_normal());
    assert_eq!(t.app.conversation.summary, "older");
    assert_eq!(t.app.viewport.offset(), t.app.viewport.max_offset());
}

#[tokio::test]
async fn test_cycle_recent_conversations_wraps() {
    let mut t = TestApp::new();
    t.store.insert(saved_conversation("older", 60));
    t.store.insert(saved_conversation("newer", 5));

    t.ctrl('l');
    assert_eq!(t.app.conversation.summary, "newer");
    t.ctrl('l');
    assert_eq!(t.app.conversation.summary, "older");
    t.ctrl('l');
    assert_eq!(t.app.conversation.summary, "newer");
}

#[tokio::test]
async fn test_cycle_with_nothing_saved_is_noop() {
    let mut t = TestApp::new();
    let id = t.app.conversation.id;
    t.ctrl('l');
    assert_eq!(t.app.conversation.id, id);
}

#[tokio::test]
async fn test_copy_message_in_edit_mode() {
    let mut t = TestApp::new();
    t.assistant.push_reply("copy this");
    t.send("hi");
    t.pump().await;

    t.ctrl('j');
    t.press(KeyCode::Char('c'));
    t.pump().await;
    assert_eq!(t.clipboard.copies(), vec!["copy this"]);
    assert!(matches!(t.app.mode, Mode::Editing { .. }));
}

#[tokio::test]
async fn test_new_chat_from_any_mode() {
    let mut t = TestApp::new();
    t.send("hi");
    t.pump().await;
    t.ctrl('k');
    t.ctrl('n');
    assert!(t.app.mode.is_normal());
    assert_eq!(t.app.conversation.len(), 1);
}
