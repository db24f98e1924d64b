use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Decode piped JSON on stdin into `T`.
///
/// `None` when stdin is a terminal or the pipe carried only whitespace.
pub fn read_stdin_json<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_piped(&buffer)
}

fn parse_piped<T: DeserializeOwned>(buffer: &str) -> Result<Option<T>, Box<dyn std::error::Error>> {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let value: T = serde_json::from_str(trimmed)
        .map_err(|e| format!("Failed to parse JSON from stdin: {}", e))?;
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use classeval_core::evaluation::RocInput;

    #[test]
    fn test_blank_pipe_is_none() {
        let parsed: Option<RocInput> = parse_piped("  \n\t").unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn test_piped_roc_input() {
        let parsed: Option<RocInput> =
            parse_piped(r#" {"observations":[{"observed":1,"predicted":0.7}]} "#).unwrap();
        let input = parsed.unwrap();
        assert_eq!(input.observations.len(), 1);
        assert_eq!(input.critical_value, 1.96);
    }

    #[test]
    fn test_malformed_pipe_is_error() {
        assert!(parse_piped::<RocInput>("{not json").is_err());
    }
}
