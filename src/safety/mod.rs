//! Statement safety policy module.
//!
//! Parses LLM-generated SQL and classifies statements as safe, mutating,
//! or destructive. The configured policy decides which levels may reach
//! the database.

mod parser;

pub use parser::{classify_sql, SqlClassifier};

use crate::error::{Result, WizardError};
use std::fmt;
use std::str::FromStr;

/// Safety level classification for SQL queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SafetyLevel {
    /// Read-only queries (SELECT, EXPLAIN, SHOW).
    Safe,
    /// Data modification queries (INSERT, UPDATE, MERGE).
    Mutating,
    /// Data loss or schema changes (DELETE, DROP, TRUNCATE, ALTER, ...).
    Destructive,
}

impl fmt::Display for SafetyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Safe => write!(f, "Safe"),
            Self::Mutating => write!(f, "Mutating"),
            Self::Destructive => write!(f, "Destructive"),
        }
    }
}

/// The type of SQL statement detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementType {
    Select,
    Insert,
    Update,
    Delete,
    Drop,
    Truncate,
    Alter,
    Create,
    Grant,
    Revoke,
    Explain,
    Show,
    Merge,
    /// Multiple statements detected; contains the most dangerous type.
    Multiple(Box<StatementType>),
    /// Statement type could not be determined.
    Unknown,
}

impl fmt::Display for StatementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select => write!(f, "SELECT"),
            Self::Insert => write!(f, "INSERT"),
            Self::Update => write!(f, "UPDATE"),
            Self::Delete => write!(f, "DELETE"),
            Self::Drop => write!(f, "DROP"),
            Self::Truncate => write!(f, "TRUNCATE"),
            Self::Alter => write!(f, "ALTER"),
            Self::Create => write!(f, "CREATE"),
            Self::Grant => write!(f, "GRANT"),
            Self::Revoke => write!(f, "REVOKE"),
            Self::Explain => write!(f, "EXPLAIN"),
            Self::Show => write!(f, "SHOW"),
            Self::Merge => write!(f, "MERGE"),
            Self::Multiple(inner) => write!(f, "Multiple ({})", inner),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Result of classifying a SQL query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    /// The determined safety level.
    pub level: SafetyLevel,
    /// The type of statement(s) detected.
    pub statement_type: StatementType,
}

impl ClassificationResult {
    /// Creates a new classification result.
    pub fn new(level: SafetyLevel, statement_type: StatementType) -> Self {
        Self {
            level,
            statement_type,
        }
    }
}

/// Policy governing which statements the executor may run.
///
/// The executor checks every LLM-generated query against the active policy
/// before it reaches the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatementPolicy {
    /// Only read-only statements pass. This is the default: the model
    /// writes the SQL, so writes should never run unreviewed.
    #[default]
    ReadOnly,
    /// Every statement passes, matching a fully trusted deployment.
    AllowAll,
}

impl StatementPolicy {
    /// Returns the policy as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReadOnly => "read-only",
            Self::AllowAll => "allow-all",
        }
    }

    /// Checks whether the given SQL is allowed under this policy.
    ///
    /// Returns a query error naming the offending statement type when the
    /// policy rejects it. Unparseable SQL is rejected under ReadOnly since
    /// its effect cannot be determined.
    pub fn check(&self, sql: &str) -> Result<()> {
        match self {
            Self::AllowAll => Ok(()),
            Self::ReadOnly => {
                let result = classify_sql(sql);
                if result.level == SafetyLevel::Safe {
                    Ok(())
                } else {
                    Err(WizardError::query(format!(
                        "{} statement rejected by read-only policy",
                        result.statement_type
                    )))
                }
            }
        }
    }
}

impl FromStr for StatementPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "read-only" | "readonly" => Ok(Self::ReadOnly),
            "allow-all" | "allowall" => Ok(Self::AllowAll),
            _ => Err(format!("Unknown statement policy: {}", s)),
        }
    }
}

impl fmt::Display for StatementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
