use apphost_domain::settings::LoggingSettings;
use apphost_logger::{Logger, LoggerError};

#[test]
fn second_host_logger_is_refused() -> Result<(), LoggerError> {
    let console = LoggingSettings::default();
    let _logger = Logger::builder().name("host").settings(&console)?.init()?;

    let json =
        LoggingSettings { level: "Debug".to_owned(), json: true, ..LoggingSettings::default() };
    let err = Logger::builder()
        .name("host-reloaded")
        .settings(&json)?
        .init()
        .expect_err("a subscriber is already installed");

    assert!(matches!(err, LoggerError::Subscriber { .. }), "unexpected error: {err}");
    Ok(())
}
