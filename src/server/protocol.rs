//! Request and response messages, one JSON document per line.

use crate::error::FuncError;
use crate::functions::{Definition, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "method")]
pub enum Request {
    GetMetadata,
    GetProviderSchema,
    GetFunctions,
    ConfigureProvider {
        #[serde(default)]
        config: serde_json::Value,
    },
    CallFunction {
        name: String,
        #[serde(default)]
        arguments: Vec<Value>,
    },
    StopProvider,
}

impl Request {
    pub fn method(&self) -> &'static str {
        match self {
            Request::GetMetadata => "GetMetadata",
            Request::GetProviderSchema => "GetProviderSchema",
            Request::GetFunctions => "GetFunctions",
            Request::ConfigureProvider { .. } => "ConfigureProvider",
            Request::CallFunction { .. } => "CallFunction",
            Request::StopProvider => "StopProvider",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Response {
    Metadata(crate::provider::ProviderMetadata),
    Schema(crate::provider::ProviderSchema),
    Functions {
        functions: BTreeMap<String, Definition>,
    },
    Result {
        result: Value,
    },
    Error {
        error: FuncError,
    },
    ProtocolError {
        protocol_error: String,
    },
    Empty {},
}

impl Response {
    pub fn call(outcome: Result<Value, FuncError>) -> Response {
        match outcome {
            Ok(result) => Response::Result { result },
            Err(error) => Response::Error { error },
        }
    }
}

/// Decode one request line, naming the JSON path that failed.
pub fn decode_request(line: &str) -> Result<Request, String> {
    let mut deserializer = serde_json::Deserializer::from_str(line);
    serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| format!("Error parsing request: path={} error={}", e.path(), e.inner()))
}
