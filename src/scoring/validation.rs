use super::config::WeightConfig;

/// Validate weight values at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_weights(config: &WeightConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (key, value) in config.entries() {
        if !value.is_finite() {
            errors.push(format!("weights.{}: must be a finite number, got {}", key, value));
        } else if value <= 0.0 {
            errors.push(format!("weights.{}: must be positive, got {}", key, value));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
