//! Rendering of registry contents for the command line.

use crate::cli::OutputFormat;
use crate::registry::{ParameterDefinition, ParameterRegistry};

/// Formatter for parameter listings and descriptions
pub struct Output {
    format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_params(&self, registry: &ParameterRegistry) -> String {
        match self.format {
            OutputFormat::Human => {
                let width = registry.names().iter().map(|n| n.len()).max().unwrap_or(0);
                let mut output = String::new();
                for definition in registry.iter() {
                    output.push_str(&format!(
                        "{:<width$}  {}\n",
                        definition.name,
                        definition.data_type,
                        width = width
                    ));
                }
                output
            }
            OutputFormat::Json => {
                let definitions: Vec<&ParameterDefinition> = registry.iter().collect();
                to_json(&definitions)
            }
        }
    }

    pub fn format_definition(&self, definition: &ParameterDefinition) -> String {
        match self.format {
            OutputFormat::Human => {
                let mut output = format!("{}\n  type: {}\n", definition.name, definition.data_type);
                if let Some(default) = &definition.default {
                    output.push_str(&format!("  default: {}\n", default));
                }
                if let Some(values) = &definition.allowed_values {
                    output.push_str(&format!("  values: {}\n", values.join(", ")));
                }
                output
            }
            OutputFormat::Json => to_json(definition),
        }
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    // Serializing plain strings and vectors cannot fail
    serde_json::to_string_pretty(value).unwrap_or_default() + "\n"
}
