//! Operation identifiers and their fixed output arities.
//!
//! Every handler completes through a callback. The number of values that
//! callback carries is fixed per operation:
//!
//! | Operation | Arity | Callback values          |
//! |-----------|-------|--------------------------|
//! | search    | 3     | error, records, total    |
//! | find      | 2     | error, record            |
//! | create    | 2     | error, record            |
//! | update    | 2     | error, record            |
//! | delete    | 1     | error                    |

use crate::error::{EnforcerError, EnforcerResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// The five CRUD-style operations a handler table can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Query a collection of records
    Search,
    /// Fetch a single record
    Find,
    /// Create a new record
    Create,
    /// Modify an existing record
    Update,
    /// Remove a record
    Delete,
}

impl Operation {
    /// All operations, in table order.
    pub const ALL: [Operation; 5] = [
        Operation::Search,
        Operation::Find,
        Operation::Create,
        Operation::Update,
        Operation::Delete,
    ];

    /// Lowercase identifier used as the logging key.
    pub fn name(&self) -> &'static str {
        self.descriptor().name
    }

    /// Number of values the completion callback always receives.
    pub fn arity(&self) -> Arity {
        self.descriptor().arity
    }

    /// Static descriptor for this operation.
    pub fn descriptor(&self) -> &'static OperationDescriptor {
        match self {
            Operation::Search => &DESCRIPTORS[0],
            Operation::Find => &DESCRIPTORS[1],
            Operation::Create => &DESCRIPTORS[2],
            Operation::Update => &DESCRIPTORS[3],
            Operation::Delete => &DESCRIPTORS[4],
        }
    }

    /// `log` target that invocation records for this operation are written to.
    pub fn log_target(&self) -> &'static str {
        match self {
            Operation::Search => "handler_enforcer::handler::search",
            Operation::Find => "handler_enforcer::handler::find",
            Operation::Create => "handler_enforcer::handler::create",
            Operation::Update => "handler_enforcer::handler::update",
            Operation::Delete => "handler_enforcer::handler::delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = EnforcerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| EnforcerError::UnknownOperation(s.to_string()))
    }
}

/// Expected number of completion-callback values.
///
/// Built infallibly from a `usize` in code, or fallibly from configuration
/// values, where anything other than a non-negative integer is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Arity(usize);

impl Arity {
    /// Create an arity from a count.
    pub const fn new(count: usize) -> Self {
        Self(count)
    }

    /// The count as a plain `usize`.
    pub const fn get(&self) -> usize {
        self.0
    }
}

impl From<usize> for Arity {
    fn from(count: usize) -> Self {
        Self(count)
    }
}

impl TryFrom<&Value> for Arity {
    type Error = EnforcerError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Number(n) => n
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .map(Arity)
                .ok_or_else(|| {
                    EnforcerError::configuration(format!(
                        "expected arity must be a non-negative integer, got {}",
                        n
                    ))
                }),
            Value::Null => Err(EnforcerError::configuration("expected arity is missing")),
            other => Err(EnforcerError::configuration(format!(
                "expected arity must be a number, got {}",
                other
            ))),
        }
    }
}

impl FromStr for Arity {
    type Err = EnforcerError;

    fn from_str(s: &str) -> EnforcerResult<Self> {
        s.trim().parse::<usize>().map(Arity).map_err(|_| {
            EnforcerError::configuration(format!(
                "expected arity must be a non-negative integer, got '{}'",
                s
            ))
        })
    }
}

impl<'de> Deserialize<'de> for Arity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Arity::try_from(&value).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Static (operation name, expected arity) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationDescriptor {
    pub operation: Operation,
    pub name: &'static str,
    pub arity: Arity,
}

/// Descriptors for every operation, in [`Operation::ALL`] order.
pub static DESCRIPTORS: [OperationDescriptor; 5] = [
    OperationDescriptor {
        operation: Operation::Search,
        name: "search",
        arity: Arity::new(3),
    },
    OperationDescriptor {
        operation: Operation::Find,
        name: "find",
        arity: Arity::new(2),
    },
    OperationDescriptor {
        operation: Operation::Create,
        name: "create",
        arity: Arity::new(2),
    },
    OperationDescriptor {
        operation: Operation::Update,
        name: "update",
        arity: Arity::new(2),
    },
    OperationDescriptor {
        operation: Operation::Delete,
        name: "delete",
        arity: Arity::new(1),
    },
];
