//! Function call errors.
//!
//! Every error a provider function returns is a [`FunctionError`]. Errors that
//! blame a single argument report its position through
//! [`FunctionError::function_argument`], so the host can point at it.

use crate::functions::ParameterType;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a netmask argument was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetmaskFault {
    /// Not a dotted-decimal IPv4 address.
    Malformed,
    /// A 1-bit follows a 0-bit.
    NonContiguous,
}

#[derive(Debug, Error)]
pub enum FunctionError {
    #[error("not an IPv4 address/invalid address: {value}")]
    InvalidSubnet { value: String },

    #[error("{}", netmask_text(.value, .fault))]
    InvalidNetmask { value: String, fault: NetmaskFault },

    #[error("'{path}' is a file, not a directory")]
    NotADirectory { path: String },

    #[error("Failed to check '{path}' path. Error: {source}")]
    PathCheckFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Function {function} expects {expected} argument(s), got {got}")]
    ArgumentCount {
        function: String,
        expected: usize,
        got: usize,
    },

    #[error("Invalid value for \"{parameter}\" parameter: expected {expected}, got {got}")]
    ArgumentType {
        index: usize,
        parameter: String,
        expected: ParameterType,
        got: &'static str,
    },

    #[error("Invalid value for \"{parameter}\" parameter: argument must not be null.")]
    NullArgument { index: usize, parameter: String },

    #[error("Function \"{name}\" is not defined by this provider")]
    UnknownFunction { name: String },
}

fn netmask_text(value: &str, fault: &NetmaskFault) -> String {
    match fault {
        NetmaskFault::Malformed => format!("not an IPv4 netmask/invalid netmask: {value:?}"),
        NetmaskFault::NonContiguous => {
            format!("invalid netmask (non-contiguous or unsupported): {value:?}")
        }
    }
}

impl FunctionError {
    /// Position of the argument at fault, when one argument is to blame.
    pub fn function_argument(&self) -> Option<usize> {
        match self {
            FunctionError::InvalidSubnet { .. }
            | FunctionError::NotADirectory { .. }
            | FunctionError::PathCheckFailed { .. } => Some(0),
            FunctionError::InvalidNetmask { .. } => Some(1),
            FunctionError::ArgumentType { index, .. } | FunctionError::NullArgument { index, .. } => {
                Some(*index)
            }
            FunctionError::ArgumentCount { .. } | FunctionError::UnknownFunction { .. } => None,
        }
    }
}

/// Wire form of a function error.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FuncError {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_argument: Option<usize>,
}

impl From<&FunctionError> for FuncError {
    fn from(err: &FunctionError) -> Self {
        FuncError {
            text: err.to_string(),
            function_argument: err.function_argument(),
        }
    }
}

impl From<FunctionError> for FuncError {
    fn from(err: FunctionError) -> Self {
        FuncError::from(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_netmask_messages_quote_value() {
        let err = FunctionError::InvalidNetmask {
            value: "255.255.2555.0".to_string(),
            fault: NetmaskFault::Malformed,
        };
        assert_eq!(
            err.to_string(),
            r#"not an IPv4 netmask/invalid netmask: "255.255.2555.0""#
        );
        let err = FunctionError::InvalidNetmask {
            value: "255.0.255.0".to_string(),
            fault: NetmaskFault::NonContiguous,
        };
        assert_eq!(
            err.to_string(),
            r#"invalid netmask (non-contiguous or unsupported): "255.0.255.0""#
        );
        assert_eq!(err.function_argument(), Some(1));
    }

    #[test]
    fn test_path_check_failed_keeps_source() {
        use std::error::Error;
        let err = FunctionError::PathCheckFailed {
            path: "/root/secret".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(err.to_string().starts_with("Failed to check '/root/secret' path. Error: "));
        assert!(err.source().is_some());
        assert_eq!(err.function_argument(), Some(0));
    }

    #[test]
    fn test_func_error_wire_form() {
        let err = FunctionError::InvalidSubnet {
            value: "10.10.1000.0".to_string(),
        };
        let wire = FuncError::from(&err);
        assert_eq!(wire.function_argument, Some(0));
        assert_eq!(
            serde_json::to_string(&wire).unwrap(),
            r#"{"text":"not an IPv4 address/invalid address: 10.10.1000.0","function_argument":0}"#
        );

        let err = FunctionError::UnknownFunction {
            name: "nope".to_string(),
        };
        let json = serde_json::to_value(FuncError::from(err)).unwrap();
        assert!(json.get("function_argument").is_none());
    }
}
