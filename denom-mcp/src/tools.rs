//! MCP tools: convert, convert_all, list_units, list_domains

use serde_json::{json, Value as JsonValue};
use tracing::{debug, warn};

use denom_core::DenomError;
use denom_units::{domain, domains, ConversionOptions, RoundingMode, UnitSet};

use crate::config::ServerConfig;
use crate::protocol::McpError;

pub fn list() -> JsonValue {
    let option_props = json!({
        "domain": {
            "type": "string",
            "description": "Unit domain (default from DENOM_DOMAIN, else ethereum)"
        },
        "max_fraction_digits": {
            "type": "integer",
            "minimum": 0,
            "description": "Cap on fractional digits (default: exact)"
        },
        "rounding": {
            "type": "string",
            "enum": ["truncate", "half_up", "half_even"],
            "description": "Rounding applied past the cap (default: truncate)"
        }
    });

    let with_options = |mut props: JsonValue| {
        if let (Some(target), Some(extra)) = (props.as_object_mut(), option_props.as_object()) {
            target.extend(extra.clone());
        }
        props
    };

    json!({
        "tools": [
            {
                "name": "convert",
                "description": "Convert a decimal string from one unit to another, exactly.",
                "inputSchema": {
                    "type": "object",
                    "properties": with_options(json!({
                        "value": { "type": "string", "description": "Decimal number, e.g. \"1.5\" or \"-2\"" },
                        "from": { "type": "string", "description": "Source unit label or alias" },
                        "to": { "type": "string", "description": "Target unit label or alias" }
                    })),
                    "required": ["value", "from", "to"]
                }
            },
            {
                "name": "convert_all",
                "description": "Convert a decimal string into every unit of its domain. Blank value clears all units.",
                "inputSchema": {
                    "type": "object",
                    "properties": with_options(json!({
                        "value": { "type": "string", "description": "Decimal number, or blank" },
                        "from": { "type": "string", "description": "Source unit label or alias" }
                    })),
                    "required": ["value", "from"]
                }
            },
            {
                "name": "list_units",
                "description": "List the units of a domain with their power-of-ten exponents.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "domain": { "type": "string", "description": "Unit domain" }
                    }
                }
            },
            {
                "name": "list_domains",
                "description": "List available unit domains.",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            }
        ]
    })
}

pub fn call(config: &ServerConfig, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let params = params.as_ref()
        .ok_or_else(|| McpError::invalid_params("Missing params"))?;

    let name = params.get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

    let args = params.get("arguments").cloned().unwrap_or(json!({}));
    debug!(tool = name, "tool call");

    match name {
        "convert" => tool_convert(config, &args),
        "convert_all" => tool_convert_all(config, &args),
        "list_units" => tool_list_units(config, &args),
        "list_domains" => Ok(tool_list_domains()),
        _ => Err(McpError::invalid_params(format!("Unknown tool: {}", name))),
    }
}

fn tool_convert(config: &ServerConfig, args: &JsonValue) -> Result<JsonValue, McpError> {
    let value = str_arg(args, "value")?;
    let from = str_arg(args, "from")?;
    let to = str_arg(args, "to")?;
    let options = options_arg(config, args)?;
    let set = match domain_arg(config, args)? {
        Ok(set) => set,
        Err(e) => return Ok(tool_error(e)),
    };

    match set.convert_labels_with(value, from, to, &options) {
        Ok(result) => Ok(json!({
            "content": [{ "type": "text", "text": result }],
            "result": result,
            "isError": false
        })),
        Err(e) => Ok(tool_error(DenomError::from(e).in_unit(from))),
    }
}

fn tool_convert_all(config: &ServerConfig, args: &JsonValue) -> Result<JsonValue, McpError> {
    let value = str_arg(args, "value")?;
    let from = str_arg(args, "from")?;
    let options = options_arg(config, args)?;
    let set = match domain_arg(config, args)? {
        Ok(set) => set,
        Err(e) => return Ok(tool_error(e)),
    };

    match set.convert_all_label_with(value, from, &options) {
        Ok(table) => {
            let text = table.iter()
                .map(|(unit, v)| format!("{}: {}", unit.label, v))
                .collect::<Vec<_>>()
                .join("\n");
            Ok(json!({
                "content": [{ "type": "text", "text": text }],
                "result": table,
                "isError": false
            }))
        }
        Err(e) => Ok(tool_error(DenomError::from(e).in_unit(from))),
    }
}

fn tool_list_units(config: &ServerConfig, args: &JsonValue) -> Result<JsonValue, McpError> {
    let set = match domain_arg(config, args)? {
        Ok(set) => set,
        Err(e) => return Ok(tool_error(e)),
    };

    let text = set.iter()
        .map(|u| format!("{} = 10^{} {}", u.label, u.exponent, set.base().label))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(json!({
        "content": [{ "type": "text", "text": text }],
        "domain": set.name(),
        "units": set.units(),
        "isError": false
    }))
}

fn tool_list_domains() -> JsonValue {
    let entries: Vec<JsonValue> = domains().iter()
        .map(|d| json!({
            "name": d.name(),
            "base": d.base().label,
            "units": d.labels(),
        }))
        .collect();

    let text = domains().iter()
        .map(|d| format!("{}: {}", d.name(), d.labels().join(", ")))
        .collect::<Vec<_>>()
        .join("\n");

    json!({
        "content": [{ "type": "text", "text": text }],
        "domains": entries,
        "isError": false
    })
}

// ========== Argument helpers ==========

fn str_arg<'a>(args: &'a JsonValue, name: &str) -> Result<&'a str, McpError> {
    match args.get(name) {
        Some(JsonValue::String(s)) => Ok(s.as_str()),
        Some(JsonValue::Number(_)) => Err(McpError::invalid_params(format!(
            "Argument '{}' must be a string; JSON numbers lose precision", name
        ))),
        Some(_) => Err(McpError::invalid_params(format!("Argument '{}' must be a string", name))),
        None => Err(McpError::invalid_params(format!("Missing {} argument", name))),
    }
}

/// Resolve the domain argument. An unknown name is a tool-level error,
/// not a protocol error.
fn domain_arg(config: &ServerConfig, args: &JsonValue) -> Result<Result<&'static UnitSet, DenomError>, McpError> {
    let name = match args.get("domain") {
        None | Some(JsonValue::Null) => config.default_domain.as_str(),
        Some(JsonValue::String(s)) => s.as_str(),
        Some(_) => return Err(McpError::invalid_params("Argument 'domain' must be a string")),
    };

    Ok(domain(name).ok_or_else(|| {
        warn!(domain = name, "unknown domain requested");
        DenomError::unknown_domain(name)
    }))
}

fn options_arg(config: &ServerConfig, args: &JsonValue) -> Result<ConversionOptions, McpError> {
    let mut options = config.options;

    if let Some(digits) = args.get("max_fraction_digits").filter(|v| !v.is_null()) {
        let digits = digits.as_u64()
            .and_then(|d| u32::try_from(d).ok())
            .ok_or_else(|| McpError::invalid_params("Argument 'max_fraction_digits' must be a non-negative integer"))?;
        options.max_fraction_digits = Some(digits);
    }

    if let Some(mode) = args.get("rounding").filter(|v| !v.is_null()) {
        let mode = mode.as_str()
            .ok_or_else(|| McpError::invalid_params("Argument 'rounding' must be a string"))?;
        options.rounding = mode.parse::<RoundingMode>().map_err(|e| McpError::invalid_params(e))?;
    }

    Ok(options)
}

fn tool_error(error: DenomError) -> JsonValue {
    json!({
        "content": [{ "type": "text", "text": error.to_string() }],
        "error": error,
        "isError": true
    })
}
