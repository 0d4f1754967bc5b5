use thiserror::Error;

/// Closed taxonomy for everything that can go wrong while handling a
/// command. Handlers catch these at the boundary and reply with
/// [`BotError::user_message`]; internal detail only ever reaches the log.
#[derive(Debug, Error)]
pub enum BotError {
    /// Malformed user input: a bad time of day or a missing argument.
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// A reminder target that is not strictly in the future.
    #[error("reminder time is not in the future")]
    PastTime,

    /// A task id that does not parse as an integer.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The text provider reported an exhausted quota.
    #[error("text provider rate limited")]
    RateLimited,

    /// A provider returned a non-success response or an unusable payload.
    #[error("provider failure: {0}")]
    ProviderFailure(String),

    /// The task store failed at the statement level.
    #[error("storage failure")]
    Storage(#[from] sqlx::Error),
}

impl BotError {
    /// Fixed user-facing reply for each failure kind. Never includes
    /// provider or database detail.
    pub fn user_message(&self) -> &'static str {
        match self {
            BotError::InvalidFormat(_) => {
                "That is not the format I asked for. /help shows what I expect."
            }
            BotError::PastTime => {
                "That time has already passed today. I do not do time travel."
            }
            BotError::InvalidArgument(_) => "Task ids are numbers. /tasks shows yours.",
            BotError::RateLimited => {
                "You talked my quota away. Google cut me off, wait a minute and try again."
            }
            BotError::ProviderFailure(_) => "Even my AI crashed reading that. Try again later.",
            BotError::Storage(_) => "My notebook is jammed. Try again in a bit.",
        }
    }
}
