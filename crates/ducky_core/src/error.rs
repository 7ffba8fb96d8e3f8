use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Sorry, I don't know what that means.")]
    UnknownCommand,
    #[error("{0}")]
    InvalidFormat(String),
    #[error("{0}")]
    CorruptRecord(String),
    #[error("{0}")]
    InvalidDate(String),
    #[error("There is no task numbered {index}. You have {len} task(s) in the list.")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("{0}")]
    Io(String),
    #[error("{0}")]
    InvalidConfig(String),
}

impl AppError {
    pub fn invalid_format<M: Into<String>>(message: M) -> Self {
        Self::InvalidFormat(message.into())
    }

    pub fn corrupt_record<M: Into<String>>(message: M) -> Self {
        Self::CorruptRecord(message.into())
    }

    pub fn invalid_date<M: Into<String>>(message: M) -> Self {
        Self::InvalidDate(message.into())
    }

    pub fn io<M: Into<String>>(message: M) -> Self {
        Self::Io(message.into())
    }

    pub fn invalid_config<M: Into<String>>(message: M) -> Self {
        Self::InvalidConfig(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "unknown_command",
            Self::InvalidFormat(_) => "invalid_format",
            Self::CorruptRecord(_) => "corrupt_record",
            Self::InvalidDate(_) => "invalid_date",
            Self::IndexOutOfRange { .. } => "index_out_of_range",
            Self::Io(_) => "io_error",
            Self::InvalidConfig(_) => "invalid_config",
        }
    }

    /// Corrupt records and bad dates are both recovered by skipping the line.
    pub fn is_record_error(&self) -> bool {
        matches!(self, Self::CorruptRecord(_) | Self::InvalidDate(_))
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}
