//! Schema discovery: fetch the service's WADL document and turn its
//! parameter descriptions into a [`ParameterRegistry`].

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;
use tracing::{debug, info};
use url::Url;

use crate::error::{QueryError, Result};
use crate::http_client::Transport;
use crate::registry::{ParameterDefinition, ParameterRegistry};

/// Namespace of the schema-description vocabulary
pub const WADL_NAMESPACE: &str = "http://wadl.dev.java.net/2009/02";

/// Local name of parameter-description elements
const PARAM_ELEMENT: &[u8] = b"param";

/// Parse a WADL document into a parameter registry.
///
/// Each `param` element and its descendants are visited in document order.
/// An element carrying `name` starts a new parameter; an element carrying only
/// `value` adds an allowed value to the most recent named parameter.
///
/// # Errors
/// Returns `QueryError::SchemaParse` if the document is not well-formed XML or
/// a value appears before any named parameter.
pub fn parse_schema(document: &str) -> Result<ParameterRegistry> {
    let mut reader = NsReader::from_str(document);
    let mut builder = RegistryBuilder::default();
    let mut buf = Vec::new();

    let mut depth = 0usize;
    let mut seen_root = false;
    // depth of the outermost param element currently open
    let mut param_depth: Option<usize> = None;

    loop {
        match reader.read_resolved_event_into(&mut buf)? {
            (ns, Event::Start(e)) => {
                depth += 1;
                seen_root = true;
                let is_param = is_param_element(&ns, &e);
                if param_depth.is_none() && is_param {
                    param_depth = Some(depth);
                }
                if param_depth.is_some() {
                    builder.visit(&e)?;
                }
            }
            (ns, Event::Empty(e)) => {
                seen_root = true;
                if param_depth.is_some() || is_param_element(&ns, &e) {
                    builder.visit(&e)?;
                }
            }
            (_, Event::End(_)) => {
                if param_depth == Some(depth) {
                    param_depth = None;
                }
                depth = depth.saturating_sub(1);
            }
            (_, Event::Eof) => break,
            _ => {}
        }
        buf.clear();
    }

    if !seen_root {
        return Err(QueryError::schema_parse("document has no root element"));
    }
    if depth != 0 {
        return Err(QueryError::schema_parse(format!(
            "unexpected end of document with {} unclosed element(s)",
            depth
        )));
    }

    Ok(builder.finish())
}

fn is_param_element(ns: &ResolveResult<'_>, e: &BytesStart<'_>) -> bool {
    matches!(ns, ResolveResult::Bound(Namespace(uri)) if *uri == WADL_NAMESPACE.as_bytes())
        && e.local_name().as_ref() == PARAM_ELEMENT
}

/// Attributes of interest on a single element
#[derive(Debug, Default)]
struct ElementAttributes {
    name: Option<String>,
    data_type: Option<String>,
    default: Option<String>,
    value: Option<String>,
}

impl ElementAttributes {
    fn read(e: &BytesStart<'_>) -> Result<Self> {
        let mut attrs = Self::default();

        for attr in e.attributes() {
            let attr = attr.map_err(|err| QueryError::schema_parse(err.to_string()))?;
            let value = attr
                .unescape_value()
                .map_err(|err| QueryError::schema_parse(err.to_string()))?
                .into_owned();

            match attr.key.as_ref() {
                b"name" => attrs.name = Some(value),
                b"type" => attrs.data_type = Some(value),
                b"default" => attrs.default = Some(value),
                b"value" => attrs.value = Some(value),
                _ => {}
            }
        }

        Ok(attrs)
    }
}

/// Carries the "current parameter" across the linear walk
#[derive(Debug, Default)]
struct RegistryBuilder {
    registry: ParameterRegistry,
    current: Option<String>,
}

impl RegistryBuilder {
    fn visit(&mut self, e: &BytesStart<'_>) -> Result<()> {
        let attrs = ElementAttributes::read(e)?;

        if let Some(name) = attrs.name {
            let mut definition = ParameterDefinition::new(name.clone());
            if let Some(data_type) = attrs.data_type {
                definition = definition.with_data_type(data_type);
            }
            if let Some(default) = attrs.default {
                definition = definition.with_default(default);
            }
            self.registry.insert(definition);
            self.current = Some(name);
        } else if let Some(value) = attrs.value {
            let current = self
                .current
                .as_deref()
                .and_then(|name| self.registry.get_mut(name))
                .ok_or_else(|| {
                    QueryError::schema_parse(format!(
                        "value '{}' appears before any named parameter",
                        value
                    ))
                })?;
            current.push_allowed_value(value);
        }

        Ok(())
    }

    fn finish(self) -> ParameterRegistry {
        self.registry
    }
}

/// Fetches and parses the schema document through a transport
pub struct SchemaLoader<'a, T: Transport> {
    transport: &'a T,
}

impl<'a, T: Transport> SchemaLoader<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Fetch the schema document at `url` and build the registry from it
    pub fn load(&self, url: &Url) -> Result<ParameterRegistry> {
        debug!(%url, "fetching schema document");
        let document =
            self.transport
                .fetch_text(url)
                .map_err(|err| QueryError::SchemaFetch {
                    url: url.to_string(),
                    source: Box::new(err),
                })?;

        let registry = parse_schema(&document)?;
        info!(parameters = registry.len(), "schema discovered");
        Ok(registry)
    }
}
