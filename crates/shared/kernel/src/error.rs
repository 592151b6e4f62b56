use std::borrow::Cow;

/// Failures of registration, dispatch and mod loading.
#[gap_derive::gap_error]
pub enum KernelError {
    /// The id is already taken in this registry; the first registration wins.
    #[error("Duplicate id{}: {message}", format_context(.context))]
    DuplicateId { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A second dispatcher tried to claim a project on the same registry.
    #[error("Duplicate project{}: {message}", format_context(.context))]
    DuplicateProject { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A capability type that cannot be constructed without arguments.
    #[error("Invalid capability{}: {message}", format_context(.context))]
    InvalidCapability { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Project or item id outside `[a-z0-9_]+`.
    #[error("Invalid id{}: {message}", format_context(.context))]
    InvalidId { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A bundle without exactly one mod entry, or whose entry failed to build.
    #[error("Invalid bundle{}: {message}", format_context(.context))]
    InvalidBundle { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Duplicate mod{}: {message}", format_context(.context))]
    DuplicateMod { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Manifest error{}: {source}", format_context(.context))]
    Manifest { source: toml::de::Error, context: Option<Cow<'static, str>> },

    #[error("Discovery error{}: {source}", format_context(.context))]
    Discovery { source: walkdir::Error, context: Option<Cow<'static, str>> },

    #[error("IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Internal kernel error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl KernelError {
    pub(crate) fn duplicate_id(message: impl Into<Cow<'static, str>>) -> Self {
        Self::DuplicateId { message: message.into(), context: None }
    }

    pub(crate) fn duplicate_project(message: impl Into<Cow<'static, str>>) -> Self {
        Self::DuplicateProject { message: message.into(), context: None }
    }

    pub(crate) fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound { message: message.into(), context: None }
    }

    pub(crate) fn invalid_capability(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidCapability { message: message.into(), context: None }
    }

    pub(crate) fn invalid_id(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidId { message: message.into(), context: None }
    }

    pub(crate) fn invalid_bundle(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidBundle { message: message.into(), context: None }
    }

    pub(crate) fn duplicate_mod(message: impl Into<Cow<'static, str>>) -> Self {
        Self::DuplicateMod { message: message.into(), context: None }
    }
}
