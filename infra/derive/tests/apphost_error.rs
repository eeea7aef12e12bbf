use apphost_derive::apphost_error;
use std::borrow::Cow;

#[apphost_error]
pub enum ProbeError {
    #[error("IO failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Missing asset{}: {message}", format_context(.context))]
    Missing { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal probe error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn failing_io() -> Result<(), std::io::Error> {
    Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"))
}

#[test]
fn source_converts_through_question_mark() {
    fn run() -> Result<(), ProbeError> {
        failing_io()?;
        Ok(())
    }

    let err = run().expect_err("io error should propagate");
    assert!(matches!(err, ProbeError::Io { context: None, .. }));
}

#[test]
fn context_on_upstream_result_wraps_and_annotates() {
    let err = failing_io().context("opening appsettings.json").expect_err("should fail");
    assert_eq!(err.to_string(), "IO failure (opening appsettings.json): denied");
}

#[test]
fn context_on_own_result_overwrites_context() {
    let result: Result<(), ProbeError> =
        Err(ProbeError::Missing { message: "appsettings.json".into(), context: None });
    let err = result.context("asset lookup").expect_err("should fail");
    assert_eq!(err.to_string(), "Missing asset (asset lookup): appsettings.json");
}

#[test]
fn internal_variant_accepts_plain_strings() {
    let from_static: ProbeError = "boom".into();
    let from_owned: ProbeError = String::from("bang").into();

    assert_eq!(from_static.to_string(), "Internal probe error: boom");
    assert!(matches!(from_owned, ProbeError::Internal { ref message, .. } if message == "bang"));
}

#[test]
fn apphost_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/error_pass.rs");
    t.pass("tests/ui/settings_pass.rs");
}
