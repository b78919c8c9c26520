//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::DocsheetConfig;
use super::secret::secret_string;
use crate::domain::errors::DocsheetError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into DocsheetConfig
/// 4. Applies environment variable overrides (DOCSHEET_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`DocsheetError::Configuration`] if the file is missing or
/// unreadable, a referenced variable is unset, parsing fails, or validation
/// fails.
///
/// # Examples
///
/// ```no_run
/// use docsheet::config::loader::load_config;
///
/// let config = load_config("docsheet.toml").expect("Failed to load config");
/// println!("Project: {}", config.firestore.project_id);
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<DocsheetConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(DocsheetError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        DocsheetError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: DocsheetConfig = toml::from_str(&contents)
        .map_err(|e| DocsheetError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        DocsheetError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    tracing::debug!(
        path = %path.display(),
        project_id = %config.firestore.project_id,
        "Configuration loaded"
    );

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| DocsheetError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    caps[0].to_string()
                }
            }
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(DocsheetError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the DOCSHEET_* prefix
///
/// Variables follow the pattern `DOCSHEET_<SECTION>_<KEY>`, for example
/// `DOCSHEET_FIRESTORE_PROJECT_ID` or `DOCSHEET_EXPORT_OUTPUT_DIR`.
/// Unparseable numeric values are ignored.
fn apply_env_overrides(config: &mut DocsheetConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("DOCSHEET_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Firestore overrides
    if let Ok(val) = std::env::var("DOCSHEET_FIRESTORE_PROJECT_ID") {
        config.firestore.project_id = val;
    }
    if let Ok(val) = std::env::var("DOCSHEET_FIRESTORE_DATABASE_ID") {
        config.firestore.database_id = val;
    }
    if let Ok(val) = std::env::var("DOCSHEET_FIRESTORE_BASE_URL") {
        config.firestore.base_url = val;
    }
    if let Ok(val) = std::env::var("DOCSHEET_FIRESTORE_API_KEY") {
        config.firestore.api_key = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("DOCSHEET_FIRESTORE_TIMEOUT_SECONDS") {
        if let Ok(secs) = val.parse() {
            config.firestore.timeout_seconds = secs;
        }
    }
    if let Ok(val) = std::env::var("DOCSHEET_FIRESTORE_PAGE_SIZE") {
        if let Ok(size) = val.parse() {
            config.firestore.page_size = size;
        }
    }
    if let Ok(val) = std::env::var("DOCSHEET_FIRESTORE_TLS_VERIFY") {
        config.firestore.tls_verify = val.parse().unwrap_or(true);
    }

    // Export overrides
    if let Ok(val) = std::env::var("DOCSHEET_EXPORT_OUTPUT_DIR") {
        config.export.output_dir = val;
    }
    if let Ok(val) = std::env::var("DOCSHEET_EXPORT_SHEET_LABEL") {
        config.export.sheet_label = val;
    }
    if let Ok(val) = std::env::var("DOCSHEET_EXPORT_RESET_DELAY_MS") {
        if let Ok(ms) = val.parse() {
            config.export.reset_delay_ms = ms;
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("DOCSHEET_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("DOCSHEET_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("DOCSHEET_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("DOCSHEET_LOADER_TEST_VAR", "test_value");
        let input = "api_key = \"${DOCSHEET_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "api_key = \"test_value\"\n");
        std::env::remove_var("DOCSHEET_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("DOCSHEET_LOADER_MISSING_VAR");
        let input = "api_key = \"${DOCSHEET_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("DOCSHEET_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("DOCSHEET_LOADER_COMMENTED_VAR");
        let input = "# api_key = \"${DOCSHEET_LOADER_COMMENTED_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${DOCSHEET_LOADER_COMMENTED_VAR}"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent-docsheet.toml");
        assert!(matches!(result, Err(DocsheetError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[firestore]
project_id = "demo-project"
base_url = "http://localhost:8080/v1"
page_size = 50

[export]
output_dir = "exports"
sheet_label = "Users"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.firestore.base_url, "http://localhost:8080/v1");
        assert_eq!(config.firestore.page_size, 50);
        assert_eq!(config.export.output_dir, "exports");
        assert_eq!(config.export.sheet_label, "Users");
        assert_eq!(config.export.reset_delay_ms, 8000);
    }

    #[test]
    fn test_load_config_invalid_sheet_label() {
        let toml_content = r#"
[firestore]
project_id = "demo-project"

[export]
sheet_label = "bad/label"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("sheet_label"));
    }
}
