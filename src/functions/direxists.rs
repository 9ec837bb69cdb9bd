//! `direxists`: whether a directory exists at a given path.

use super::{
    string_arg, Arguments, Definition, Function, FunctionMetadata, Parameter, ParameterType, Value,
};
use crate::error::FunctionError;
use crate::logging::CallContext;
use std::io::ErrorKind;

#[derive(Debug, Default, Clone, Copy)]
pub struct DirExists;

impl Function for DirExists {
    fn metadata(&self) -> FunctionMetadata {
        FunctionMetadata {
            name: "direxists".to_string(),
        }
    }

    fn definition(&self) -> Definition {
        Definition {
            summary: "`direxists` determines whether a directory exists at a given path.".to_string(),
            description: "Given a path, return boolean depending on directory existence. Fails for files.".to_string(),
            parameters: vec![Parameter::string("path", "Path to directory.")],
            return_type: ParameterType::Bool,
        }
    }

    fn run(&self, ctx: &CallContext<'_>, args: &Arguments) -> Result<Value, FunctionError> {
        let path = string_arg(args, 0, &self.definition())?;

        // Follows symlinks, so a dangling link reads as missing.
        match std::fs::metadata(path) {
            Ok(info) if info.is_dir() => Ok(Value::Bool(true)),
            Ok(_) => Err(FunctionError::NotADirectory {
                path: path.to_string(),
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Value::Bool(false)),
            Err(e) => {
                ctx.logger.error(&format!("failed to verify path. Error: {e}"));
                Err(FunctionError::PathCheckFailed {
                    path: path.to_string(),
                    source: e,
                })
            }
        }
    }
}
