use crate::error::BotError;

/// Parses a `/done` argument as a task id. Non-numeric input is an
/// `InvalidArgument`; the store is never touched with it.
pub fn parse_task_id(input: &str) -> Result<i64, BotError> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| BotError::InvalidArgument(format!("task id '{input}' is not a number")))
}

/// Splits a `/remind` argument string into its time-of-day token and the
/// reminder text. Both parts are required.
pub fn split_remind_args(args: &str) -> Result<(&str, &str), BotError> {
    let args = args.trim();
    let (time, text) = args
        .split_once(char::is_whitespace)
        .ok_or_else(|| BotError::InvalidFormat("missing reminder text".to_string()))?;

    let text = text.trim();
    if text.is_empty() {
        return Err(BotError::InvalidFormat("missing reminder text".to_string()));
    }

    Ok((time, text))
}
