// The shipped example config must load and describe the reference experiment

use joint_sim::config::load_config;
use joint_sim::motion::{GainRange, search_gains};

#[test]
fn test_shipped_config_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/joint_sim.toml");
    let config = load_config(path).unwrap();
    assert_eq!(config.experiment.theta_target, 90.0);
    assert_eq!(config.search.ranges(), GainRange::default());

    let grid = config.search.grid().unwrap();
    let result = search_gains(
        config.experiment.theta_start,
        config.experiment.theta_target,
        &grid,
        &config.search.ranges(),
    )
    .unwrap();
    assert_eq!(result.candidates.len(), 27);
}
