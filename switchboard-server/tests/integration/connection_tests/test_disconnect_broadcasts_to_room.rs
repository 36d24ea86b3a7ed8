use switchboard_core::{Liveness, RoomId, ServerMessage};

use crate::integration::{create_test_service, init_tracing};
use crate::utils::TestPeer;

#[tokio::test]
async fn test_disconnect_broadcasts_to_room() {
    init_tracing();

    let service = create_test_service();
    let mut alice = TestPeer::connect(&service).await.expect("connect alice");
    let mut bob = TestPeer::connect(&service).await.expect("connect bob");
    let mut carol = TestPeer::connect(&service).await.expect("connect carol");

    alice.join(&service, "r1").await.expect("alice joins");
    bob.join(&service, "r1").await.expect("bob joins");
    carol.join(&service, "r1").await.expect("carol joins");
    alice.recv().await.expect("new-peer bob");
    alice.recv().await.expect("new-peer carol");
    bob.recv().await.expect("new-peer carol");

    service.disconnect(&bob.peer_id).await;

    for survivor in [&mut alice, &mut carol] {
        match survivor.recv().await.expect("departure broadcast") {
            ServerMessage::PeerDisconnected { peer_id } => assert_eq!(peer_id, bob.peer_id),
            other => panic!("expected peer-disconnected, got {:?}", other),
        }
    }

    let room = RoomId::parse("r1").expect("valid id");
    assert_eq!(
        service.registry().members_of(&room),
        vec![alice.peer_id.clone(), carol.peer_id.clone()]
    );
    assert_eq!(service.registry().room_of(&bob.peer_id), None);
    assert_eq!(
        service.connections().liveness_of(&bob.peer_id),
        Liveness::Closed
    );
}
