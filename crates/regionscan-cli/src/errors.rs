use console::style;
use regionscan_core::RegionscanError;
use std::fmt;

/// Error with remediation hints
#[derive(Clone)]
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// DATABASE_URL is needed by the postgres backend
pub fn database_url_missing() -> CliError {
    CliError::new("No database configured")
        .with_context("The postgres storage backend needs a connection URL.")
        .with_suggestion("Set DATABASE_URL: export DATABASE_URL=\"postgresql://localhost/emissions\"")
        .with_suggestion("Or add database_url to regionscan.toml")
        .with_suggestion("Or query a local fixture: --storage memory --fixture assets.json")
        .with_help("Run: regionscan doctor")
}

/// The pool could not reach the server
pub fn database_connection_failed(url: &str, error: &str) -> CliError {
    CliError::new("Cannot connect to PostgreSQL")
        .with_context(format!(
            "Connection failed.\n\nURL: {}\nError: {}",
            regionscan_core::config::redact_password(url),
            error
        ))
        .with_suggestion("Ensure PostgreSQL is running and reachable")
        .with_suggestion("Check DATABASE_URL credentials and database name")
        .with_help("Run: regionscan doctor --verbose")
}

/// Create error for a region code with no boundary
pub fn region_not_found(error: &RegionscanError) -> CliError {
    let suggestion = match error {
        RegionscanError::LocodeNotFound { .. } => "Find the locode by city name: regionscan search <name>",
        _ => "Use ISO 3166-1 codes for countries (FR) and ISO 3166-2 codes for states (US-CA)",
    };

    CliError::new("Region not found")
        .with_context(error.to_string())
        .with_suggestion(suggestion)
        .with_suggestion("Check --boundaries-dir and --resolution point at the Natural Earth dataset")
        .with_help("Run: regionscan doctor")
}

/// Create error for a missing or unreadable boundary dataset
pub fn boundary_dataset(error: &RegionscanError) -> CliError {
    CliError::new("Boundary dataset unavailable")
        .with_context(error.to_string())
        .with_suggestion("Download the Natural Earth admin-0 and admin-1 shapefiles")
        .with_suggestion("Point REGIONSCAN_BOUNDARIES_DIR or --boundaries-dir at the directory")
        .with_help("Run: regionscan doctor")
}

pub fn invalid_config(key: &str, reason: &str) -> CliError {
    CliError::new(format!("Invalid configuration: {}", key))
        .with_context(format!("Configuration value is invalid.\n\nReason: {}", reason))
        .with_suggestion("Check regionscan.toml and REGIONSCAN_* environment variables")
        .with_help("Run: regionscan config")
}

/// Map any command error to a hinted `CliError`
pub fn from_anyhow(error: &anyhow::Error) -> CliError {
    if let Some(cli_error) = error.downcast_ref::<CliError>() {
        return cli_error.clone();
    }

    if let Some(domain) = error.downcast_ref::<RegionscanError>() {
        return from_domain(domain);
    }

    let message = format!("{:#}", error);

    if message.contains("No such file or directory") {
        CliError::new("File not found")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check the file path and try again")
    } else {
        CliError::new(message)
    }
}

fn from_domain(error: &RegionscanError) -> CliError {
    match error {
        e if e.is_not_found() => region_not_found(e),
        RegionscanError::BoundaryDataset { .. } => boundary_dataset(error),
        RegionscanError::ConfigInvalid { key, reason } => invalid_config(key, reason),
        RegionscanError::ConfigMissing { .. } => database_url_missing(),
        RegionscanError::AmbiguousLocode { .. } => CliError::new("Ambiguous locode")
            .with_context(error.to_string())
            .with_suggestion("Remove the duplicate boundary rows from the locode table"),
        RegionscanError::StoreUnavailable { reason } => CliError::new("Asset store unavailable")
            .with_context(reason.clone())
            .with_help("Run: regionscan doctor"),
        other => CliError::new(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use regionscan_core::models::Granularity;

    #[test]
    fn test_cli_error_survives_context() {
        let result: anyhow::Result<()> = Err(database_url_missing().into());
        let error = result.context("Failed to open storage").unwrap_err();
        assert_eq!(from_anyhow(&error).message, "No database configured");
    }

    #[test]
    fn test_not_found_hints() {
        let error = anyhow::Error::new(RegionscanError::RegionNotFound {
            granularity: Granularity::Country,
            code: "ZZ".to_string(),
        });
        let cli_error = from_anyhow(&error);
        assert_eq!(cli_error.message, "Region not found");
        assert!(cli_error.context.unwrap().contains("ZZ"));

        let error = anyhow::Error::new(RegionscanError::LocodeNotFound {
            locode: "US XXX".to_string(),
        });
        assert!(from_anyhow(&error).suggestions[0].contains("regionscan search"));
    }

    #[test]
    fn test_password_not_echoed() {
        let cli_error = database_connection_failed("postgresql://app:secret@db/emissions", "refused");
        assert!(!cli_error.context.unwrap().contains("secret"));
    }
}
