#![allow(non_snake_case)]

use super::*;

#[test]
fn init_logging___second_call___keeps_first_level() {
    let first = init_logging(LogLevel::Debug);
    let second = init_logging(LogLevel::Error);

    assert_eq!(first, second);
    assert_eq!(installed_level(), Some(first));
    tracing::info!("logging installed");
}
