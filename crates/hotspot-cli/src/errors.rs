use console::style;
use hotspot_app::session::AuthAlert;
use std::fmt;

/// Enhanced error type with suggestions
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
        match self.context {
            Some(ref context) => write!(f, "{}: {}", self.message, context),
            None => write!(f, "{}", self.message),
        }
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl std::error::Error for CliError {}

/// Create error for workspace not found
pub fn workspace_not_found() -> CliError {
    let current_dir = std::env::current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    CliError::new("Not in a Hotspot workspace")
        .with_context(format!(
            "Current directory: {}\nLooking for: .hotspot directory",
            current_dir
        ))
        .with_suggestion("Initialize a workspace: hotspot init")
        .with_suggestion("Or pass --workspace <DIR>")
        .with_help("Run: hotspot init --help")
}

/// Create error for an action that needs a signed-in user
pub fn not_signed_in() -> CliError {
    CliError::new("Not signed in")
        .with_suggestion("Sign in: hotspot login --email <EMAIL>")
        .with_suggestion("Or create an account: hotspot signup --email <EMAIL> --name <NAME>")
}

/// Create error for an unknown location id
pub fn location_not_found(id: &str) -> CliError {
    CliError::new("Location not found")
        .with_context(format!("No location with id '{}'", id))
        .with_suggestion("List known locations: hotspot locations")
        .with_suggestion("Or import some: hotspot seed <FILE>")
}

/// Create error for an unparseable crowd level
pub fn invalid_crowd_level(value: &str) -> CliError {
    CliError::new("Invalid crowd level")
        .with_context(format!("'{}' is not a crowd level", value))
        .with_suggestion("Use one of: \"not crowded\", \"somewhat crowded\", \"very crowded\"")
        .with_suggestion("Or the numeric level 0, 1 or 2")
}

/// Turn a sign-in or sign-up alert into a CLI error
pub fn auth_failed(alert: AuthAlert) -> CliError {
    CliError::new(alert.title).with_context(alert.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotspot_app::session::AuthFlow;
    use hotspot_core::error::{AuthFailure, HotspotError};

    #[test]
    fn test_auth_failure_carries_flow_title() {
        let err = HotspotError::Auth(AuthFailure::UserNotFound);
        let cli = auth_failed(AuthAlert::from_error(AuthFlow::Login, &err));
        assert_eq!(cli.message, "Login Failed");
        assert_eq!(cli.to_string(), "Login Failed: No account for that email.");
    }

    #[test]
    fn test_suggestions_accumulate() {
        let err = location_not_found("hub");
        assert_eq!(err.suggestions.len(), 2);
        assert!(err.context.unwrap().contains("hub"));
    }
}
