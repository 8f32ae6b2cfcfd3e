//! Invocation definitions
//!
//! Represents a contract call requested by the host.

use std::fmt;
use std::str::FromStr;

use crate::error::{LedgerError, Result};

/// Contract functions the host can call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Init,
    CreateOrUpdateContainer,
    ReadContainer,
    DeleteContainer,
    ContainerExists,
    ReadContainerHistory,
    GetAllContainers,
    GetAllContainersHistory,
}

impl Function {
    pub const ALL: [Function; 8] = [
        Function::Init,
        Function::CreateOrUpdateContainer,
        Function::ReadContainer,
        Function::DeleteContainer,
        Function::ContainerExists,
        Function::ReadContainerHistory,
        Function::GetAllContainers,
        Function::GetAllContainersHistory,
    ];

    /// Name the host uses to address the function
    pub fn name(self) -> &'static str {
        match self {
            Function::Init => "Init",
            Function::CreateOrUpdateContainer => "CreateOrUpdateContainer",
            Function::ReadContainer => "ReadContainer",
            Function::DeleteContainer => "DeleteContainer",
            Function::ContainerExists => "ContainerExists",
            Function::ReadContainerHistory => "ReadContainerHistory",
            Function::GetAllContainers => "GetAllContainers",
            Function::GetAllContainersHistory => "GetAllContainersHistory",
        }
    }

    /// Number of string arguments the function takes
    pub fn arity(self) -> usize {
        match self {
            Function::Init | Function::GetAllContainers | Function::GetAllContainersHistory => 0,
            Function::CreateOrUpdateContainer => 2,
            Function::ReadContainer
            | Function::DeleteContainer
            | Function::ContainerExists
            | Function::ReadContainerHistory => 1,
        }
    }

    /// True for functions that write world state
    pub fn is_write(self) -> bool {
        matches!(
            self,
            Function::CreateOrUpdateContainer | Function::DeleteContainer
        )
    }
}

impl FromStr for Function {
    type Err = LedgerError;

    fn from_str(name: &str) -> Result<Self> {
        Function::ALL
            .iter()
            .copied()
            .find(|f| f.name() == name)
            .ok_or_else(|| LedgerError::Protocol(format!("unknown function: {}", name)))
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A validated contract call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub function: Function,
    pub args: Vec<String>,
}

impl Invocation {
    /// Build an invocation, checking the argument count
    pub fn new(function: Function, args: Vec<String>) -> Result<Self> {
        if args.len() != function.arity() {
            return Err(LedgerError::Protocol(format!(
                "{} expects {} argument(s), got {}",
                function,
                function.arity(),
                args.len()
            )));
        }
        Ok(Self { function, args })
    }

    /// Parse a function name and raw arguments from the host
    pub fn parse<S: AsRef<str>>(function: &str, args: &[S]) -> Result<Self> {
        let function = function.parse::<Function>()?;
        let args = args.iter().map(|a| a.as_ref().to_string()).collect();
        Self::new(function, args)
    }

    /// Argument at `index`; arity is checked at construction
    pub fn arg(&self, index: usize) -> &str {
        self.args.get(index).map(String::as_str).unwrap_or_default()
    }
}
