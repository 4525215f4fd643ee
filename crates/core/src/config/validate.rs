use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Auth token is present
/// - At least one root, each with a non-empty id and name
/// - Recognized instrument set is non-empty
/// - Sheet destination identifiers are non-empty
/// - Drive page size is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.auth.access_token.is_empty() {
        return Err(ConfigError::ValidationError(
            "auth.access_token cannot be empty".to_string(),
        ));
    }

    if config.roots.is_empty() {
        return Err(ConfigError::ValidationError(
            "at least one [[roots]] entry is required".to_string(),
        ));
    }
    for root in &config.roots {
        if root.id.is_empty() || root.name.is_empty() {
            return Err(ConfigError::ValidationError(
                "every root needs a non-empty id and name".to_string(),
            ));
        }
    }

    if config.indexer.instruments.is_empty() {
        return Err(ConfigError::ValidationError(
            "indexer.instruments cannot be empty".to_string(),
        ));
    }

    if config.sheet.spreadsheet_id.is_empty() {
        return Err(ConfigError::ValidationError(
            "sheet.spreadsheet_id cannot be empty".to_string(),
        ));
    }
    if config.sheet.sheet_name.is_empty() {
        return Err(ConfigError::ValidationError(
            "sheet.sheet_name cannot be empty".to_string(),
        ));
    }

    if config.drive.page_size == 0 {
        return Err(ConfigError::ValidationError(
            "drive.page_size cannot be 0".to_string(),
        ));
    }

    Ok(())
}
