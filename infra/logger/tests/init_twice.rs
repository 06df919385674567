use hbnb_logger::{LogSettings, Logger, LoggerError};

#[test]
fn second_init_returns_subscriber_error() {
    let settings = LogSettings::default();
    let _logger = Logger::init("hbnb-init-twice", &settings).expect("first init should succeed");

    let err = Logger::init("hbnb-init-twice-again", &settings).expect_err("second init should fail");

    assert!(matches!(err, LoggerError::Subscriber { .. }), "unexpected error: {err:?}");
}
