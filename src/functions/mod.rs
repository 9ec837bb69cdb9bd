//! Provider functions.
//!
//! A provider function is a small stateless value implementing [`Function`]:
//! it names itself, describes its parameters and return type, and runs
//! against arguments that were already checked against that description.
//!
//! - [`direxists`] - whether a path is an existing directory
//! - [`tocidr`] - subnet + netmask to CIDR notation

mod direxists;
mod tocidr;

pub use direxists::DirExists;
pub use tocidr::{to_cidr, ToCidr};

use crate::error::FunctionError;
use crate::logging::CallContext;
use serde::{Deserialize, Serialize};

/// A value passed to or returned from a function.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    String(String),
    Null,
}

impl Value {
    /// Name of the value's type, as used in error texts.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::String(_) => "string",
            Value::Null => "null",
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

/// Type of a parameter or a return value.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    String,
    Bool,
}

impl ParameterType {
    fn accepts(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (ParameterType::String, Value::String(_)) | (ParameterType::Bool, Value::Bool(_))
        )
    }
}

impl std::fmt::Display for ParameterType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ParameterType::String => write!(f, "string"),
            ParameterType::Bool => write!(f, "bool"),
        }
    }
}

/// One positional parameter of a function.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ParameterType,
    #[serde(default)]
    pub allow_null: bool,
}

impl Parameter {
    /// A string parameter that rejects null.
    pub fn string(name: &str, description: &str) -> Self {
        Parameter {
            name: name.to_string(),
            description: description.to_string(),
            kind: ParameterType::String,
            allow_null: false,
        }
    }
}

/// Signature and documentation of a function.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub summary: String,
    pub description: String,
    pub parameters: Vec<Parameter>,
    #[serde(rename = "return")]
    pub return_type: ParameterType,
}

/// Identity of a function.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FunctionMetadata {
    pub name: String,
}

/// Arguments bound to a [`Definition`]: right count, right types, no stray nulls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arguments {
    values: Vec<Value>,
}

impl Arguments {
    /// Check `values` against the parameters of `definition`.
    pub fn bind(
        function: &str,
        definition: &Definition,
        values: Vec<Value>,
    ) -> Result<Arguments, FunctionError> {
        if values.len() != definition.parameters.len() {
            return Err(FunctionError::ArgumentCount {
                function: function.to_string(),
                expected: definition.parameters.len(),
                got: values.len(),
            });
        }
        for (index, (param, value)) in definition.parameters.iter().zip(&values).enumerate() {
            match value {
                Value::Null if param.allow_null => {}
                Value::Null => {
                    return Err(FunctionError::NullArgument {
                        index,
                        parameter: param.name.clone(),
                    })
                }
                v if !param.kind.accepts(v) => {
                    return Err(FunctionError::ArgumentType {
                        index,
                        parameter: param.name.clone(),
                        expected: param.kind,
                        got: v.type_name(),
                    })
                }
                _ => {}
            }
        }
        Ok(Arguments { values })
    }

    /// The string at `index`, `None` when absent, null or another type.
    pub fn string(&self, index: usize) -> Option<&str> {
        match self.values.get(index) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        }
    }
}

/// A function the provider exposes to configurations.
pub trait Function: Send + Sync {
    fn metadata(&self) -> FunctionMetadata;

    fn definition(&self) -> Definition;

    /// Run with arguments already bound to [`Function::definition`].
    fn run(&self, ctx: &CallContext<'_>, args: &Arguments) -> Result<Value, FunctionError>;
}

/// Read the string argument at `index` of a bound call.
///
/// Binding guarantees the type, so a miss means the definition and the
/// function body disagree.
fn string_arg<'a>(
    args: &'a Arguments,
    index: usize,
    definition: &Definition,
) -> Result<&'a str, FunctionError> {
    args.string(index).ok_or_else(|| {
        let parameter = definition
            .parameters
            .get(index)
            .map(|p| p.name.clone())
            .unwrap_or_default();
        FunctionError::ArgumentType {
            index,
            parameter,
            expected: ParameterType::String,
            got: "missing",
        }
    })
}
