//! Tool-call surface for an external orchestrator.
//!
//! Each tool takes JSON arguments and returns a JSON value, so a server shell
//! (stdio, HTTP, ...) only needs [`ToolKit::definitions`] and
//! [`ToolKit::call`].

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{Result, SupplyRiskError};
use crate::report::SeverityFilter;
use crate::store::MISSING_REPORT;
use crate::SupplyRisk;

// ---------------------------------------------------------------------------
// Tool definitions
// ---------------------------------------------------------------------------

/// Name, description and JSON-schema input of one tool.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

#[derive(Debug, Deserialize)]
struct InvestigateArgs {
    commodity: String,
}

#[derive(Debug, Deserialize)]
struct CompareArgs {
    commodities: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct AlertArgs {
    recipient_email: String,
    #[serde(default)]
    recipient_phone: Option<String>,
    #[serde(default)]
    commodity: Option<String>,
    #[serde(default)]
    include_warnings: bool,
}

// ---------------------------------------------------------------------------
// ToolKit
// ---------------------------------------------------------------------------

/// Tool-call interface borrowing a [`SupplyRisk`] instance.
pub struct ToolKit<'a> {
    risk: &'a SupplyRisk,
}

impl<'a> ToolKit<'a> {
    /// Create a new `ToolKit` bound to the given SDK.
    pub fn new(risk: &'a SupplyRisk) -> Self {
        Self { risk }
    }

    /// Descriptions of every tool, for advertising to a caller.
    pub fn definitions() -> Vec<ToolDefinition> {
        vec![
            ToolDefinition {
                name: "investigate_commodity",
                description: "Fetch live price data from the Open Prices API for a commodity \
                              and compute risk. Use for real-time supply chain investigation.",
                input_schema: json!({
                    "type": "object",
                    "properties": {"commodity": {"type": "string"}},
                    "required": ["commodity"]
                }),
            },
            ToolDefinition {
                name: "get_supply_chain_report",
                description: "Return the latest saved supply chain report.",
                input_schema: json!({"type": "object", "properties": {}}),
            },
            ToolDefinition {
                name: "list_commodities",
                description: "Return the standard commodity list tracked by the agent.",
                input_schema: json!({"type": "object", "properties": {}}),
            },
            ToolDefinition {
                name: "compare_commodities",
                description: "Fetch and analyze each commodity, return a comparative risk summary.",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "commodities": {"type": "array", "items": {"type": "string"}}
                    },
                    "required": ["commodities"]
                }),
            },
            ToolDefinition {
                name: "send_supply_chain_alert",
                description: "Send an email and/or SMS alert with the supply chain risk summary. \
                              Analyzes one commodity if given, otherwise all tracked commodities. \
                              Only CRITICAL items are sent unless include_warnings is true.",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "recipient_email": {"type": "string"},
                        "recipient_phone": {"type": ["string", "null"]},
                        "commodity": {"type": ["string", "null"]},
                        "include_warnings": {"type": "boolean", "default": false}
                    },
                    "required": ["recipient_email"]
                }),
            },
        ]
    }

    /// Dispatch a tool call by name.
    pub fn call(&self, name: &str, arguments: Value) -> Result<Value> {
        match name {
            "investigate_commodity" => {
                let args: InvestigateArgs = parse_args(name, arguments)?;
                self.investigate_commodity(&args.commodity)
            }
            "get_supply_chain_report" => self.get_supply_chain_report(),
            "list_commodities" => Ok(json!(self.list_commodities())),
            "compare_commodities" => {
                let args: CompareArgs = parse_args(name, arguments)?;
                self.compare_commodities(&args.commodities)
            }
            "send_supply_chain_alert" => {
                let args: AlertArgs = parse_args(name, arguments)?;
                Ok(self.send_supply_chain_alert(
                    &args.recipient_email,
                    args.recipient_phone.as_deref(),
                    args.commodity.as_deref(),
                    args.include_warnings,
                ))
            }
            other => Err(SupplyRiskError::InvalidArgument(format!(
                "Unknown tool: {}",
                other
            ))),
        }
    }

    // -- Tools -------------------------------------------------------------

    pub fn investigate_commodity(&self, commodity: &str) -> Result<Value> {
        Ok(serde_json::to_value(self.risk.analyze_commodity(commodity))?)
    }

    /// The saved snapshot, or an `{"error": ...}` object when there is none.
    pub fn get_supply_chain_report(&self) -> Result<Value> {
        match self.risk.latest_report() {
            Ok(snapshot) => Ok(serde_json::to_value(snapshot)?),
            Err(SupplyRiskError::NotFound(_)) => Ok(json!({ "error": MISSING_REPORT })),
            Err(e) => Err(e),
        }
    }

    pub fn list_commodities(&self) -> Vec<String> {
        self.risk.commodities().to_vec()
    }

    pub fn compare_commodities(&self, commodities: &[String]) -> Result<Value> {
        Ok(serde_json::to_value(self.risk.compare(commodities))?)
    }

    /// Analyze, filter by severity and send.
    ///
    /// Never errors: missing configuration and empty selections are reported
    /// in the returned object.
    pub fn send_supply_chain_alert(
        &self,
        recipient_email: &str,
        recipient_phone: Option<&str>,
        commodity: Option<&str>,
        include_warnings: bool,
    ) -> Value {
        let alerts = self.risk.alerts();
        if let Err(SupplyRiskError::NotConfigured(message)) = alerts.ensure_configured() {
            return json!({ "error": message });
        }

        let reports = match commodity {
            Some(c) if !c.is_empty() => vec![self.risk.analyze_commodity(c)],
            _ => self.risk.analyze_all(),
        };
        let filter = SeverityFilter::from_include_warnings(include_warnings);
        let selected = filter.select(&reports);
        if selected.is_empty() {
            return json!({
                "sent": false,
                "message": "No CRITICAL or WARNING commodities to alert on."
            });
        }

        let outcome = alerts.send_report_alert(&selected, recipient_email, recipient_phone, filter);
        json!({
            "sent": outcome.sent(),
            "email": outcome.email,
            "sms": outcome.sms,
            "error": outcome.error,
        })
    }
}

fn parse_args<T: serde::de::DeserializeOwned>(tool: &str, arguments: Value) -> Result<T> {
    // Tools without arguments may be called with `null`.
    let arguments = if arguments.is_null() { json!({}) } else { arguments };
    serde_json::from_value(arguments)
        .map_err(|e| SupplyRiskError::InvalidArgument(format!("{}: {}", tool, e)))
}
