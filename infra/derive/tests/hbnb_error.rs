use hbnb_derive::hbnb_error;
use std::borrow::Cow;

#[hbnb_error]
pub enum RegistryError {
    #[error("Registry I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Entity not registered{}: {message}", format_context(.context))]
    Missing { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal registry error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn io_failure() -> Result<(), std::io::Error> {
    Err(std::io::Error::other("disk full"))
}

#[test]
fn hbnb_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/hbnb_error_pass.rs");
}

#[test]
fn context_is_attached_to_source_errors() {
    let err = io_failure().context("Flushing file.json").unwrap_err();
    assert!(matches!(err, RegistryError::Io { .. }));
    let rendered = err.to_string();
    assert!(rendered.contains("(Flushing file.json)"), "unexpected message: {rendered}");
    assert!(rendered.contains("disk full"));
}

#[test]
fn context_overrides_existing_variants() {
    let res: Result<(), RegistryError> =
        Err(RegistryError::Missing { message: "Place.abc".into(), context: None });
    let err = res.context("Linking amenity").unwrap_err();
    assert_eq!(err.to_string(), "Entity not registered (Linking amenity): Place.abc");
}

#[test]
fn internal_variant_accepts_plain_strings() {
    let from_static: RegistryError = "lock poisoned".into();
    let from_owned: RegistryError = format!("bad key {}", 7).into();
    assert!(matches!(from_static, RegistryError::Internal { .. }));
    assert_eq!(from_owned.to_string(), "Internal registry error: bad key 7");
}

#[test]
fn question_mark_converts_sources() {
    fn run() -> Result<(), RegistryError> {
        io_failure()?;
        Ok(())
    }
    let err = run().unwrap_err();
    assert_eq!(err.to_string(), "Registry I/O failure: disk full");
}
