use crate::utils::error::{LabError, Result};
use std::io::Write;

/// Print a prompt and read one trimmed line from stdin.
pub fn read_line(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Prompt for a numeric value. Non-numeric input becomes a validation error
/// rather than a parse panic, so the CLI can print a friendly message.
pub fn read_f64(field_name: &str, message: &str) -> Result<f64> {
    let raw = read_line(message)?;
    parse_f64(field_name, &raw)
}

pub fn parse_f64(field_name: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| LabError::InvalidInputError {
            field: field_name.to_string(),
            value: raw.to_string(),
            reason: "Please enter numeric values".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_f64_accepts_numbers() {
        assert_eq!(parse_f64("price", "100").unwrap(), 100.0);
        assert_eq!(parse_f64("price", " 19.99 ").unwrap(), 19.99);
    }

    #[test]
    fn test_parse_f64_rejects_garbage() {
        let err = parse_f64("price", "ten dollars").unwrap_err();
        assert!(matches!(err, LabError::InvalidInputError { .. }));
        assert!(err.user_friendly_message().contains("numeric"));
    }
}
