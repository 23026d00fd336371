use peer_sampling::PeerSamplingConfig;

#[test]
fn valid_parameters_are_accepted() {
    assert!(PeerSamplingConfig::new(true, true, 1000, 6, 1, 1).is_ok());
    assert!(PeerSamplingConfig::new(true, true, 1000, 6, 0, 0).is_ok());
    // healing plus swapping may use the full half view
    assert!(PeerSamplingConfig::new(true, false, 1, 30, 3, 12).is_ok());
}

#[test]
fn undersized_view_is_rejected() {
    assert!(PeerSamplingConfig::new(true, true, 1000, 1, 0, 0).is_err());
    assert!(PeerSamplingConfig::new(true, true, 1000, 0, 0, 0).is_err());
}

#[test]
fn excessive_healing_and_swapping_are_rejected() {
    // 2 + 2 exceeds 6 / 2
    assert!(PeerSamplingConfig::new(true, true, 1000, 6, 2, 2).is_err());
    assert!(PeerSamplingConfig::new(true, true, 1000, 4, 3, 0).is_err());
}

#[test]
fn zero_period_is_rejected() {
    assert!(PeerSamplingConfig::new(true, true, 0, 6, 1, 1).is_err());
}

#[test]
fn default_parameters_satisfy_the_constraints() {
    let config = PeerSamplingConfig::default();
    assert!(config.view_size() >= 2);
    assert!(config.healing_factor() + config.swapping_factor() <= config.view_size() / 2);
    assert!(config.sampling_period() > 0);
}
