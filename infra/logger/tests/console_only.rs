use hbnb_logger::{LogSettings, Logger};

#[test]
fn default_settings_log_to_the_console_only() {
    let logger = Logger::init("hbnb-console-only", &LogSettings::default())
        .expect("logger should initialize");

    assert!(!logger.has_file_output());
}
