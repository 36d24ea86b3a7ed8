use switchboard_core::Liveness;

use crate::integration::{create_test_service, init_tracing};
use crate::utils::TestPeer;

#[tokio::test]
async fn test_disconnect_without_join_is_silent() {
    init_tracing();

    let service = create_test_service();
    let peer = TestPeer::connect(&service).await.expect("connect");
    let mut other = TestPeer::connect(&service).await.expect("connect");

    service.disconnect(&peer.peer_id).await;

    assert_eq!(
        service.connections().liveness_of(&peer.peer_id),
        Liveness::Closed
    );
    assert_eq!(service.registry().room_count(), 0);

    // No one gets a departure broadcast for a peer that never joined a room.
    other.expect_silence().await.expect("no stray events");
}
