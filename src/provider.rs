//! The `foxfunx` provider: a function-only provider.
//!
//! Holds the provider metadata and the function registry, and dispatches
//! function calls after binding their arguments.

use crate::error::FunctionError;
use crate::functions::{Arguments, Definition, DirExists, Function, ToCidr, Value};
use crate::logging::CallContext;
use colored::Colorize;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Provider type name, the `foxfunx` in `provider::foxfunx::tocidr(...)`.
pub const TYPE_NAME: &str = "foxfunx";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProviderMetadata {
    pub type_name: String,
    pub version: String,
    pub functions: Vec<String>,
    pub resources: Vec<String>,
    pub data_sources: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProviderSchema {
    pub markdown_description: String,
    pub functions: BTreeMap<String, Definition>,
}

pub struct Provider {
    /// "dev" when built and run locally, "test" under tests, the release
    /// version otherwise.
    version: String,
    functions: Vec<Box<dyn Function>>,
}

impl Provider {
    pub fn new(version: &str) -> Self {
        Provider {
            version: version.to_string(),
            functions: vec![Box::new(DirExists), Box::new(ToCidr)],
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            type_name: TYPE_NAME.to_string(),
            version: self.version.clone(),
            functions: self.functions.iter().map(|f| f.metadata().name).collect(),
            resources: vec![],
            data_sources: vec![],
        }
    }

    pub fn schema(&self) -> ProviderSchema {
        let listing = self
            .functions
            .iter()
            .map(|f| format!("- `{}` {}", f.metadata().name, f.definition().description))
            .join("\n");
        ProviderSchema {
            markdown_description: format!(
                "`{TYPE_NAME}` is a function-only provider.\n\n`{TYPE_NAME}` includes below functions:\n{listing}"
            ),
            functions: self.definitions(),
        }
    }

    /// Definitions keyed by function name.
    pub fn definitions(&self) -> BTreeMap<String, Definition> {
        self.functions
            .iter()
            .map(|f| (f.metadata().name, f.definition()))
            .collect()
    }

    /// The provider has no configuration attributes; anything given is ignored.
    pub fn configure(&self, config: &serde_json::Value) {
        if config.as_object().is_some_and(|c| !c.is_empty()) {
            log::warn!("ignoring provider configuration: {config}");
        }
    }

    pub fn function(&self, name: &str) -> Option<&dyn Function> {
        self.functions
            .iter()
            .find(|f| f.metadata().name == name)
            .map(|f| &**f)
    }

    /// Bind `arguments` to the named function and run it.
    pub fn call_function(
        &self,
        ctx: &CallContext<'_>,
        name: &str,
        arguments: Vec<Value>,
    ) -> Result<Value, FunctionError> {
        log::debug!("call_function({name})", name = name.on_blue());

        let function = self.function(name).ok_or_else(|| FunctionError::UnknownFunction {
            name: name.to_string(),
        })?;
        let args = Arguments::bind(name, &function.definition(), arguments)?;
        function.run(ctx, &args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::RecordingLogger;

    #[test]
    fn test_metadata() {
        let provider = Provider::new("test");
        let meta = provider.metadata();
        assert_eq!(meta.type_name, "foxfunx");
        assert_eq!(meta.version, "test");
        assert_eq!(meta.functions, vec!["direxists", "tocidr"]);
        assert!(meta.resources.is_empty());
        assert!(meta.data_sources.is_empty());
    }

    #[test]
    fn test_schema_lists_functions() {
        let schema = Provider::new("test").schema();
        assert!(schema
            .markdown_description
            .starts_with("`foxfunx` is a function-only provider."));
        assert!(schema.markdown_description.contains("- `direxists` Given a path"));
        assert!(schema.markdown_description.contains("- `tocidr` Given subnet and netmask"));
        assert_eq!(schema.functions.len(), 2);
        assert_eq!(schema.functions["tocidr"].parameters.len(), 2);
    }

    #[test]
    fn test_call_function_dispatch() {
        let provider = Provider::new("test");
        let logger = RecordingLogger::new();
        let ctx = CallContext::new(&logger);

        let result = provider
            .call_function(&ctx, "tocidr", vec!["10.10.10.0".into(), "255.255.255.0".into()])
            .unwrap();
        assert_eq!(result, Value::from("10.10.10.0/24"));

        let err = provider
            .call_function(&ctx, "tocidr", vec!["10.10.10.0".into()])
            .unwrap_err();
        assert!(matches!(err, FunctionError::ArgumentCount { .. }));

        let err = provider.call_function(&ctx, "nope", vec![]).unwrap_err();
        assert!(matches!(err, FunctionError::UnknownFunction { .. }));
    }

    #[test]
    fn test_call_function_null_argument() {
        let provider = Provider::new("test");
        let logger = RecordingLogger::new();
        let ctx = CallContext::new(&logger);
        let err = provider
            .call_function(&ctx, "direxists", vec![Value::Null])
            .unwrap_err();
        assert_eq!(err.function_argument(), Some(0));
        // rejected before the function ran
        assert!(logger.records().is_empty());
    }
}
