//! Configuration structures for the facility keycard system
//!
//! This module contains the facility configuration, the command line arguments that
//! override it, and the validation logic applied before any card is issued.

use super::{HolderKind, MembershipType, OutputFormat};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Card numbering defaults
pub mod card_numbers {
    /// Prefix for member card numbers
    pub const MEMBER_PREFIX: &str = "MEM";

    /// Prefix for employee card numbers
    pub const EMPLOYEE_PREFIX: &str = "EMP";

    /// Number of digits following the prefix
    pub const DEFAULT_DIGITS: usize = 5;

    /// Largest supported digit count (keeps the numeric part inside a u64)
    pub const MAX_DIGITS: usize = 12;
}

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "facility-keycard",
    version = "0.1.0",
    about = "Facility Keycard - issues and tracks access cards for members and staff",
    long_about = "Issues keycards for facility members and employees, computes card validity from activation and expiration, and records access attempts.

Nothing is persisted: every run works on a fresh in-memory session.

EXAMPLES:
    # Issue a member card valid for one year
    facility-keycard issue --kind member -f John -l Doe -e john.doe@email.com

    # Issue an employee card with an explicit expiration and two recorded accesses
    facility-keycard issue --kind employee -f Jane -l Smith --expires 2027-06-30 \\
        --access \"Main Entrance\" --access \"Gym Floor\"

    # Walk through the full card lifecycle
    facility-keycard demo

    # Generate configuration template
    facility-keycard --print-config > keycard.json

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag, JSON)
    3. Default values (lowest priority)"
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Prefix for generated member card numbers
    #[arg(long, help = "Prefix for generated member card numbers")]
    pub member_card_prefix: Option<String>,

    /// Prefix for generated employee card numbers
    #[arg(long, help = "Prefix for generated employee card numbers")]
    pub employee_card_prefix: Option<String>,

    /// Digits following the prefix in generated card numbers
    #[arg(long, help = "Digits in generated card numbers (1-12)")]
    pub card_number_digits: Option<usize>,

    /// Validity of employee cards issued without an explicit expiration
    #[arg(long, help = "Years of validity for employee cards without an explicit expiration")]
    pub employee_card_validity_years: Option<u32>,

    /// Output format for card statuses
    #[arg(long, help = "Output format (json, text)")]
    pub output_format: Option<String>,

    /// Random seed for reproducible card numbers
    #[arg(long, help = "Random seed for reproducible card numbers")]
    pub seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, help = "Enable debug logging")]
    pub debug: bool,

    /// Directory for daily rolling JSON log files
    #[arg(long, value_name = "DIR", help = "Also write JSON logs to daily files in this directory")]
    pub log_dir: Option<String>,

    /// Emit console logs as JSON
    #[arg(long, help = "Format console logs as JSON")]
    pub log_json: bool,

    /// Validate configuration and exit
    #[arg(long, help = "Validate configuration without running a command")]
    pub dry_run: bool,

    /// Print the default configuration as JSON and exit
    #[arg(long, help = "Print default configuration as JSON and exit")]
    pub print_config: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Commands understood by the binary
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Register a holder and issue a card for them
    Issue(IssueArgs),
    /// Run a scripted walk through the card lifecycle
    Demo,
}

/// Arguments for the `issue` command
#[derive(Debug, Clone, Args)]
pub struct IssueArgs {
    /// Whether the holder is a member or an employee
    #[arg(short, long, help = "Holder kind (member, employee)")]
    pub kind: HolderKind,

    /// Holder first name
    #[arg(short = 'f', long = "firstname", help = "Holder first name")]
    pub first_name: String,

    /// Holder last name
    #[arg(short = 'l', long = "lastname", help = "Holder last name")]
    pub last_name: String,

    /// Holder email
    #[arg(short, long, help = "Holder email")]
    pub email: Option<String>,

    /// Holder phone
    #[arg(short, long, help = "Holder phone")]
    pub phone: Option<String>,

    /// Card number to issue (generated when omitted)
    #[arg(long, help = "Card number (generated from the configured prefix when omitted)")]
    pub card_number: Option<String>,

    /// Expiration date (YYYY-MM-DD)
    #[arg(long, help = "Expiration date, YYYY-MM-DD")]
    pub expires: Option<NaiveDate>,

    /// Membership tier for member holders
    #[arg(short = 't', long = "type", help = "Membership type (basic, premium, vip)")]
    pub membership_type: Option<MembershipType>,

    /// Department for employee holders
    #[arg(long, help = "Employee department")]
    pub department: Option<String>,

    /// Position for employee holders
    #[arg(long, help = "Employee position")]
    pub position: Option<String>,

    /// Locations to record accesses at after issuance, in order
    #[arg(long = "access", help = "Record an access at this location (repeatable)")]
    pub accesses: Vec<String>,
}

/// Configuration file structure (all fields optional for partial configs)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Prefix for member card numbers
    pub member_card_prefix: Option<String>,
    /// Prefix for employee card numbers
    pub employee_card_prefix: Option<String>,
    /// Digits in generated card numbers
    pub card_number_digits: Option<usize>,
    /// Employee card validity in years
    pub employee_card_validity_years: Option<u32>,
    /// Output format
    pub output_format: Option<String>,
    /// Random seed
    pub seed: Option<u64>,
}

/// Main facility configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FacilityConfig {
    /// Prefix for generated member card numbers
    pub member_card_prefix: String,

    /// Prefix for generated employee card numbers
    pub employee_card_prefix: String,

    /// Digits following the prefix in generated card numbers
    pub card_number_digits: usize,

    /// Validity, in years, of employee cards issued without an explicit expiration.
    /// Member cards and bare `KeyCard::issue` calls always default to one year.
    pub employee_card_validity_years: u32,

    /// Output format for card statuses
    pub output_format: String,

    /// Random seed for reproducible card numbers
    pub seed: Option<u64>,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for facility configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// A card prefix is empty or contains whitespace
    #[error("Invalid card prefix for {kind}: {prefix:?} (must be non-empty with no whitespace)")]
    InvalidPrefix {
        /// Holder kind the prefix belongs to
        kind: HolderKind,
        /// The rejected prefix
        prefix: String,
    },

    /// Digit count is out of range
    #[error("Card number digits must be between 1 and {max}, got {value}")]
    InvalidDigitCount {
        /// The rejected digit count
        value: usize,
        /// Largest supported digit count
        max: usize,
    },

    /// Employee validity is zero
    #[error("Employee card validity must be at least one year")]
    InvalidEmployeeValidity,

    /// Output format is not recognised
    #[error("Unknown output format: {0}")]
    InvalidOutputFormat(String),
}

impl Default for FacilityConfig {
    fn default() -> Self {
        Self {
            member_card_prefix: card_numbers::MEMBER_PREFIX.to_string(),
            employee_card_prefix: card_numbers::EMPLOYEE_PREFIX.to_string(),
            card_number_digits: card_numbers::DEFAULT_DIGITS,
            employee_card_validity_years: 2,
            output_format: "json".to_string(),
            seed: None,
        }
    }
}

impl FacilityConfig {
    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // CLI takes precedence over the file
        config.apply_cli_overrides(args);

        Ok(config)
    }

    /// Load configuration from a JSON file, merging with defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let content = fs::read_to_string(path)?;
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            member_card_prefix: config_file
                .member_card_prefix
                .unwrap_or(defaults.member_card_prefix),
            employee_card_prefix: config_file
                .employee_card_prefix
                .unwrap_or(defaults.employee_card_prefix),
            card_number_digits: config_file
                .card_number_digits
                .unwrap_or(defaults.card_number_digits),
            employee_card_validity_years: config_file
                .employee_card_validity_years
                .unwrap_or(defaults.employee_card_validity_years),
            output_format: config_file.output_format.unwrap_or(defaults.output_format),
            seed: config_file.seed.or(defaults.seed),
        }
    }

    fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(value) = &args.member_card_prefix {
            self.member_card_prefix = value.clone();
        }
        if let Some(value) = &args.employee_card_prefix {
            self.employee_card_prefix = value.clone();
        }
        if let Some(value) = args.card_number_digits {
            self.card_number_digits = value;
        }
        if let Some(value) = args.employee_card_validity_years {
            self.employee_card_validity_years = value;
        }
        if let Some(value) = &args.output_format {
            self.output_format = value.clone();
        }
        if args.seed.is_some() {
            self.seed = args.seed;
        }
    }

    /// Serialize the configuration as pretty JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save the configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        fs::write(path, self.print_json()?)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        Self::validate_prefix(HolderKind::Member, &self.member_card_prefix)?;
        Self::validate_prefix(HolderKind::Employee, &self.employee_card_prefix)?;

        if self.card_number_digits == 0 || self.card_number_digits > card_numbers::MAX_DIGITS {
            return Err(ConfigValidationError::InvalidDigitCount {
                value: self.card_number_digits,
                max: card_numbers::MAX_DIGITS,
            });
        }

        if self.employee_card_validity_years == 0 {
            return Err(ConfigValidationError::InvalidEmployeeValidity);
        }

        self.get_output_format()?;
        Ok(())
    }

    fn validate_prefix(kind: HolderKind, prefix: &str) -> Result<(), ConfigValidationError> {
        if prefix.is_empty() || prefix.chars().any(char::is_whitespace) {
            return Err(ConfigValidationError::InvalidPrefix { kind, prefix: prefix.to_string() });
        }
        Ok(())
    }

    /// Card number prefix for a holder kind
    pub fn prefix_for(&self, kind: HolderKind) -> &str {
        match kind {
            HolderKind::Member => &self.member_card_prefix,
            HolderKind::Employee => &self.employee_card_prefix,
        }
    }

    /// Get the output format as an enum value
    pub fn get_output_format(&self) -> Result<OutputFormat, ConfigValidationError> {
        self.output_format
            .parse()
            .map_err(|_| ConfigValidationError::InvalidOutputFormat(self.output_format.clone()))
    }
}
