use std::sync::Arc;
use peer_sampling::{loopback_cluster, PeerSamplingConfig, PeerSamplingService};

#[test]
fn example() {
    // four processes gossiping over an in-process transport
    let config = PeerSamplingConfig::new(true, true, 100, 4, 1, 1).unwrap();
    let mut services: Vec<PeerSamplingService> = loopback_cluster(4)
        .into_iter()
        .map(|transport| PeerSamplingService::new(Arc::new(transport), config.clone()))
        .collect();
    for service in services.iter_mut() {
        service.init();
    }

    std::thread::sleep(std::time::Duration::from_millis(500));

    // the application layer samples a random peer
    let peer = services[1].get_peer();
    assert!(peer.is_some());

    for service in services.iter_mut() {
        service.shutdown().unwrap();
    }
}
