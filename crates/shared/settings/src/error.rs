use std::borrow::Cow;

/// Failures raised while describing, filling in or executing settings.
#[gap_derive::gap_error]
#[derive(Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// An argument was read before a value was written.
    #[error("Value absent{}: {message}", format_context(.context))]
    ValueAbsent { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A well-formed value outside the declared bounds or value set.
    #[error("Out of range{}: {message}", format_context(.context))]
    OutOfRange { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Raw text that does not parse as the argument's type.
    #[error("Invalid format{}: {message}", format_context(.context))]
    InvalidFormat { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A value of the wrong kind, or a mutation of an immutable argument.
    #[error("Wrong shape{}: {message}", format_context(.context))]
    WrongShape { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A field, option, group or node name used twice in one scope.
    #[error("Duplicate name{}: {message}", format_context(.context))]
    DuplicateName { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A template used before its merge or construction function was set.
    #[error("Not fully configured{}: {message}", format_context(.context))]
    NotFullyConfigured { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal settings error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl SettingsError {
    pub(crate) fn absent(message: impl Into<Cow<'static, str>>) -> Self {
        Self::ValueAbsent { message: message.into(), context: None }
    }

    pub(crate) fn out_of_range(message: impl Into<Cow<'static, str>>) -> Self {
        Self::OutOfRange { message: message.into(), context: None }
    }

    pub(crate) fn invalid_format(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidFormat { message: message.into(), context: None }
    }

    pub(crate) fn wrong_shape(message: impl Into<Cow<'static, str>>) -> Self {
        Self::WrongShape { message: message.into(), context: None }
    }

    pub(crate) fn duplicate(message: impl Into<Cow<'static, str>>) -> Self {
        Self::DuplicateName { message: message.into(), context: None }
    }

    pub(crate) fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound { message: message.into(), context: None }
    }

    pub(crate) fn not_configured(message: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFullyConfigured { message: message.into(), context: None }
    }
}
