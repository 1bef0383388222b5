//! Integration tests for the delivery orchestrator.
//!
//! # Oracle Pattern
//!
//! Each test runs the orchestrator against a recording transport
//! double and ends with oracle checks over the recorded call order:
//! joins precede sends per group target, recipients stay in input
//! order, and fatal failures abort before any further dispatch.

use mailcast_client::{
    DeliveryError, DeliveryOrchestrator, Envelope, SessionState, Target, TransportError,
};
use mailcast_harness::{SimTransport, TransportCall};

/// Envelope with the given `(address, kind)` targets.
fn envelope(recipients: &[(&str, Option<&str>)]) -> Envelope {
    Envelope {
        sender_display: "bot@home".to_string(),
        body: "*Subject*: test\nbody".to_string(),
        recipients: recipients
            .iter()
            .map(|(address, kind)| Target {
                address: (*address).to_string(),
                kind: kind.map(ToString::to_string),
            })
            .collect(),
    }
}

/// Index of the first call matching `predicate`.
fn position(calls: &[TransportCall], predicate: impl Fn(&TransportCall) -> bool) -> Option<usize> {
    calls.iter().position(predicate)
}

/// Destinations of all recorded sends, in issue order.
fn sent_destinations(calls: &[TransportCall]) -> Vec<&str> {
    calls
        .iter()
        .filter_map(|call| match call {
            TransportCall::Send { destination, .. } => Some(destination.as_str()),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn full_sequence_for_mixed_recipients() {
    let transport = SimTransport::new("bot@example.org");
    let mut orchestrator = DeliveryOrchestrator::new(
        transport,
        envelope(&[("user@example.com", None), ("room@conf.example", Some("groupchat"))]),
    );

    orchestrator.run().await.expect("delivery should succeed");
    assert_eq!(orchestrator.session_state(), SessionState::Closed);

    let calls = orchestrator.transport().calls();

    // Fixed prologue and epilogue
    assert_eq!(calls[0], TransportCall::Connect);
    assert_eq!(calls[1], TransportCall::FetchRoster);
    assert_eq!(calls[2], TransportCall::AnnouncePresence);
    assert_eq!(calls[calls.len() - 1], TransportCall::Disconnect);

    // One send per recipient, in declaration order
    assert_eq!(sent_destinations(calls), vec!["user@example.com", "room@conf.example"]);
}

#[tokio::test]
async fn join_precedes_send_for_groupchat_targets() {
    let transport = SimTransport::new("bot@example.org");
    let mut orchestrator = DeliveryOrchestrator::new(
        transport,
        envelope(&[("room@conf.example", Some("groupchat")), ("user@example.com", None)]),
    );

    orchestrator.run().await.expect("delivery should succeed");
    let calls = orchestrator.transport().calls();

    let join = position(calls, |c| {
        matches!(c, TransportCall::JoinGroup { room, .. } if room == "room@conf.example")
    })
    .expect("group target must be joined");
    let send = position(calls, |c| {
        matches!(c, TransportCall::Send { destination, .. } if destination == "room@conf.example")
    })
    .expect("group target must be sent to");

    assert!(join < send, "join must complete before the send is issued");
}

#[tokio::test]
async fn join_uses_sender_display_as_nickname() {
    let transport = SimTransport::new("bot@example.org");
    let mut orchestrator = DeliveryOrchestrator::new(
        transport,
        envelope(&[("room@conf.example", Some("groupchat"))]),
    );

    orchestrator.run().await.expect("delivery should succeed");

    let joined_as = orchestrator.transport().calls().iter().find_map(|call| match call {
        TransportCall::JoinGroup { nickname, .. } => Some(nickname.as_str()),
        _ => None,
    });
    assert_eq!(joined_as, Some("bot@home"));
}

#[tokio::test]
async fn non_groupchat_targets_are_never_joined() {
    let transport = SimTransport::new("bot@example.org");
    let mut orchestrator = DeliveryOrchestrator::new(
        transport,
        envelope(&[
            ("user@example.com", None),
            ("other@example.com", Some("headline")),
            ("third@example.com", Some("chat")),
        ]),
    );

    orchestrator.run().await.expect("delivery should succeed");

    let calls = orchestrator.transport().calls();
    assert!(
        !calls.iter().any(|c| matches!(c, TransportCall::JoinGroup { .. })),
        "no join may be issued for non-groupchat kinds"
    );
    assert_eq!(sent_destinations(calls).len(), 3);
}

#[tokio::test]
async fn unknown_kind_tags_pass_through_verbatim() {
    let transport = SimTransport::new("bot@example.org");
    let mut orchestrator = DeliveryOrchestrator::new(
        transport,
        envelope(&[("user@example.com", Some("headline"))]),
    );

    orchestrator.run().await.expect("delivery should succeed");

    let kind = orchestrator.transport().calls().iter().find_map(|call| match call {
        TransportCall::Send { kind, .. } => Some(kind.clone()),
        _ => None,
    });
    assert_eq!(kind, Some(Some("headline".to_string())));
}

#[tokio::test]
async fn duplicate_recipients_each_get_a_send() {
    let transport = SimTransport::new("bot@example.org");
    let mut orchestrator = DeliveryOrchestrator::new(
        transport,
        envelope(&[("user@example.com", None), ("user@example.com", None)]),
    );

    orchestrator.run().await.expect("delivery should succeed");
    assert_eq!(
        sent_destinations(orchestrator.transport().calls()),
        vec!["user@example.com", "user@example.com"]
    );
}

#[tokio::test]
async fn roster_failure_aborts_before_any_dispatch() {
    let transport = SimTransport::new("bot@example.org").failing_roster();
    let mut orchestrator = DeliveryOrchestrator::new(
        transport,
        envelope(&[("user@example.com", None), ("room@conf.example", Some("groupchat"))]),
    );

    let err = orchestrator.run().await.expect_err("roster failure must be fatal");
    assert!(matches!(err, DeliveryError::Transport(TransportError::Roster(_))));

    let calls = orchestrator.transport().calls();
    assert!(!calls.iter().any(|c| matches!(c, TransportCall::JoinGroup { .. })));
    assert!(!calls.iter().any(|c| matches!(c, TransportCall::Send { .. })));

    // Abort path still requests session close
    assert_eq!(calls[calls.len() - 1], TransportCall::Disconnect);
    assert_eq!(orchestrator.session_state(), SessionState::Closing);
}

#[tokio::test]
async fn join_failure_aborts_the_remaining_loop() {
    let transport = SimTransport::new("bot@example.org").failing_join("room@conf.example");
    let mut orchestrator = DeliveryOrchestrator::new(
        transport,
        envelope(&[
            ("first@example.com", None),
            ("room@conf.example", Some("groupchat")),
            ("never@example.com", None),
        ]),
    );

    let err = orchestrator.run().await.expect_err("join failure must be fatal");
    assert!(matches!(err, DeliveryError::Transport(TransportError::Join { .. })));

    // The recipient before the failing join was dispatched; nothing after
    assert_eq!(sent_destinations(orchestrator.transport().calls()), vec!["first@example.com"]);
}

#[tokio::test]
async fn connect_failure_surfaces_before_roster() {
    let transport = SimTransport::new("bot@example.org").failing_connect();
    let mut orchestrator =
        DeliveryOrchestrator::new(transport, envelope(&[("user@example.com", None)]));

    let err = orchestrator.run().await.expect_err("connect failure must be fatal");
    assert!(matches!(err, DeliveryError::Transport(TransportError::Connection(_))));

    let calls = orchestrator.transport().calls();
    assert_eq!(calls, [TransportCall::Connect]);
}

#[tokio::test]
async fn body_is_delivered_verbatim_to_every_recipient() {
    let transport = SimTransport::new("bot@example.org");
    let mut orchestrator = DeliveryOrchestrator::new(
        transport,
        envelope(&[("a@example.com", None), ("b@example.com", None)]),
    );

    orchestrator.run().await.expect("delivery should succeed");

    let bodies: Vec<&str> = orchestrator
        .transport()
        .calls()
        .iter()
        .filter_map(|call| match call {
            TransportCall::Send { body, .. } => Some(body.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(bodies, vec!["*Subject*: test\nbody", "*Subject*: test\nbody"]);
}
