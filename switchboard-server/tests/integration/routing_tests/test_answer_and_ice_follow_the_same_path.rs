use serde_json::json;

use switchboard_core::{ClientMessage, ServerMessage};

use crate::integration::{create_test_service, init_tracing};
use crate::utils::TestPeer;

#[tokio::test]
async fn test_answer_and_ice_follow_the_same_path() {
    init_tracing();

    let service = create_test_service();
    let mut alice = TestPeer::connect(&service).await.expect("connect alice");
    let mut bob = TestPeer::connect(&service).await.expect("connect bob");

    alice.join(&service, "r1").await.expect("alice joins");
    bob.join(&service, "r1").await.expect("bob joins");
    alice.recv().await.expect("new-peer bob");

    let answer = json!({"type": "answer", "sdp": "v=0"});
    service
        .dispatch(
            &alice.peer_id,
            ClientMessage::Answer {
                sdp: answer.clone(),
                to: bob.peer_id.clone(),
            },
        )
        .await;

    match bob.recv().await.expect("relayed answer") {
        ServerMessage::Answer { sdp, from } => {
            assert_eq!(sdp, answer);
            assert_eq!(from, alice.peer_id);
        }
        other => panic!("expected answer, got {:?}", other),
    }

    let candidate = json!({
        "candidate": "candidate:842163049 1 udp 1677729535 10.0.0.7 53442 typ srflx",
        "sdpMid": "0",
        "sdpMLineIndex": 0
    });
    service
        .dispatch(
            &alice.peer_id,
            ClientMessage::IceCandidate {
                candidate: candidate.clone(),
                to: bob.peer_id.clone(),
            },
        )
        .await;

    match bob.recv().await.expect("relayed candidate") {
        ServerMessage::IceCandidate {
            candidate: relayed,
            from,
        } => {
            assert_eq!(relayed, candidate);
            assert_eq!(from, alice.peer_id);
        }
        other => panic!("expected ice-candidate, got {:?}", other),
    }
}
