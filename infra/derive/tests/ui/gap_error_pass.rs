use gap_derive::gap_error;
use std::borrow::Cow;

#[gap_error]
pub enum ManifestError {
    #[error("I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Duplicate entry{}: {message}", format_context(.context))]
    Duplicate { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal fault{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read(path: &str) -> Result<String, ManifestError> {
    std::fs::read_to_string(path).context("reading manifest")
}

fn main() {
    let _ = read("missing.gapmod");
    let err: ManifestError = "boom".into();
    assert_eq!(err.variant_name(), "Internal");
}
