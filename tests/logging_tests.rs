#![cfg(feature = "std")]

use log::LevelFilter;
use naval_battle::{init_logging, level_from};

#[test]
fn test_level_parsing() {
    assert_eq!(level_from(Some("debug")), LevelFilter::Debug);
    assert_eq!(level_from(Some("WARN")), LevelFilter::Warn);
    assert_eq!(level_from(Some("loud")), LevelFilter::Info);
    assert_eq!(level_from(None), LevelFilter::Info);
}

#[test]
fn test_init_twice_is_harmless() {
    init_logging();
    init_logging();
    log::info!("logging initialised");
}
