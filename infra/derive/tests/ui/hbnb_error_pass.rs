use hbnb_derive::hbnb_error;
use std::borrow::Cow;

#[hbnb_error]
pub enum SnapshotError {
    #[error("Snapshot I/O failure{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal snapshot error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read_snapshot() -> Result<Vec<u8>, SnapshotError> {
    let bytes = std::fs::read("missing.json").context("Reading snapshot")?;
    Ok(bytes)
}

fn main() {
    let _ = read_snapshot();
    let _err: SnapshotError = "registry poisoned".into();
}
