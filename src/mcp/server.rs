//! DrinkNow MCP Server Implementation
//!
//! Exposes the hydration engine, the settings store and pricing as MCP tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::Config;
use crate::db::Database;
use crate::hydration::detect_measure_system;
use crate::models::UserSettingsUpdate;
use crate::pricing::PaymentInfoSource;
use crate::tools::hydration;
use crate::tools::pricing;
use crate::tools::settings;
use crate::tools::status::StatusTracker;

/// DrinkNow MCP Service
#[derive(Clone)]
pub struct DrinkNowService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    pricing: Arc<dyn PaymentInfoSource>,
    /// Locale of the host, used when a tool call does not name one
    locale: Option<String>,
    /// Device registered with the licensing backend, if configured
    device_id: Option<String>,
    tool_router: ToolRouter<DrinkNowService>,
}

impl DrinkNowService {
    pub fn new(config: &Config, database: Database, pricing: Arc<dyn PaymentInfoSource>) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(config))),
            database,
            pricing,
            locale: config.locale.clone(),
            device_id: config.device_id.clone(),
            tool_router: Self::tool_router(),
        }
    }

    fn locale_or_default<'a>(&'a self, locale: &'a Option<String>) -> Option<&'a str> {
        locale.as_deref().or(self.locale.as_deref())
    }

    fn device_or_default<'a>(&'a self, device_id: &'a Option<String>) -> Option<&'a str> {
        device_id.as_deref().or(self.device_id.as_deref())
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Hydration Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DetectMeasureSystemParams {
    /// Locale such as "en-US" (optional, defaults to the server locale)
    pub locale: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConvertParams {
    /// Value to convert
    pub value: f64,
    /// Measure system of the displayed value: Metric or Imperial
    pub system: String,
    /// to_canonical (display -> kg/ml) or from_canonical (kg/ml -> display)
    pub direction: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GenderProfileParams {
    /// Male, Female, or Other
    pub gender: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateDrinkAmountParams {
    /// Male, Female, or Other
    pub gender: String,
    /// Body weight in kilograms
    pub weight_kg: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListSipSizesParams {
    /// Metric or Imperial for display volumes (optional, detected from locale)
    pub system: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateSessionDurationParams {
    /// Daily drink amount in milliliters
    pub drink_amount_ml: f64,
    /// Sip size id: FullCup, HalfCup, or BigSip
    pub sip_size: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PlanHydrationParams {
    /// Locale such as "en-US" (optional, defaults to the server locale)
    pub locale: Option<String>,
    /// Male, Female, or Other
    pub gender: String,
    /// Body weight as typed by the user, in weight_system units (optional)
    pub weight: Option<String>,
    /// Metric or Imperial (optional, detected from locale)
    pub weight_system: Option<String>,
    /// FullCup, HalfCup, or BigSip (default FullCup)
    pub sip_size: Option<String>,
}

// ============================================================================
// Settings Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SaveSettingsParams {
    /// Male, Female, or Other
    pub gender: Option<String>,
    /// Body weight in kilograms
    pub weight_kg: Option<f64>,
    /// Metric or Imperial
    pub measure_system: Option<String>,
    /// FullCup, HalfCup, or BigSip
    pub sip_size: Option<String>,
    /// Daily drink amount in milliliters
    pub drink_amount_ml: Option<u32>,
    /// Minutes between reminders
    pub next_break_duration_minutes: Option<u32>,
    pub active: Option<bool>,
    pub enable_on_startup: Option<bool>,
    pub allow_tracking: Option<bool>,
}

impl SaveSettingsParams {
    fn into_update(self) -> Result<UserSettingsUpdate, String> {
        Ok(UserSettingsUpdate {
            gender: self.gender.as_deref().map(hydration::parse_gender).transpose()?,
            weight_kg: self.weight_kg,
            measure_system: self
                .measure_system
                .as_deref()
                .map(hydration::parse_measure_system)
                .transpose()?,
            sip_size: self.sip_size.as_deref().map(hydration::parse_sip_size).transpose()?,
            drink_amount_ml: self.drink_amount_ml,
            next_break_duration_minutes: self.next_break_duration_minutes,
            active: self.active,
            enable_on_startup: self.enable_on_startup,
            allow_tracking: self.allow_tracking,
        })
    }
}

// ============================================================================
// Pricing Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetPaymentInfoParams {
    /// Locale used to format the price (optional, defaults to the server locale)
    pub locale: Option<String>,
    /// Device whose payment status to include (optional, defaults to DRINKNOW_DEVICE_ID; without one no status is returned)
    pub device_id: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CancelPaymentParams {
    /// Device whose open payment to cancel (optional, defaults to DRINKNOW_DEVICE_ID)
    pub device_id: Option<String>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl DrinkNowService {
    // --- Status ---

    #[tool(description = "Get the current status of the DrinkNow service including build info, database, locale, and process information")]
    async fn drinknow_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        to_json(&tracker.get_status())
    }

    #[tool(description = "Get step-by-step instructions for planning hydration. Call this before running the welcome flow.")]
    fn hydration_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::HYDRATION_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(HYDRATION_INSTRUCTIONS)]))
    }

    // --- Hydration ---

    #[tool(description = "Detect the measurement system (Metric or Imperial) for a locale")]
    fn detect_measure_system(&self, Parameters(p): Parameters<DetectMeasureSystemParams>) -> Result<CallToolResult, McpError> {
        to_json(&hydration::detect_system(p.locale.as_deref(), self.locale.as_deref()))
    }

    #[tool(description = "Convert a body weight between kilograms and the display system. Rounds to whole units.")]
    fn convert_weight(&self, Parameters(p): Parameters<ConvertParams>) -> Result<CallToolResult, McpError> {
        let result = hydration::convert_weight(p.value, &p.system, &p.direction)
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Convert a liquid volume between milliliters and the display system. Rounds to whole units.")]
    fn convert_volume(&self, Parameters(p): Parameters<ConvertParams>) -> Result<CallToolResult, McpError> {
        let result = hydration::convert_volume(p.value, &p.system, &p.direction)
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get the default weight, illustration key, and ml-per-kg factor for a gender")]
    fn gender_profile(&self, Parameters(p): Parameters<GenderProfileParams>) -> Result<CallToolResult, McpError> {
        let result = hydration::gender_profile(&p.gender).map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Calculate the recommended daily drink amount range from gender and weight in kg")]
    fn calculate_drink_amount(&self, Parameters(p): Parameters<CalculateDrinkAmountParams>) -> Result<CallToolResult, McpError> {
        let result = hydration::calculate_drink_amount(&p.gender, p.weight_kg)
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "List the sip sizes with their volumes")]
    fn list_sip_sizes(&self, Parameters(p): Parameters<ListSipSizesParams>) -> Result<CallToolResult, McpError> {
        let system = match p.system.as_deref() {
            Some(s) => hydration::parse_measure_system(s).map_err(|e| McpError::invalid_params(e, None))?,
            None => detect_measure_system(self.locale.as_deref()),
        };
        to_json(&hydration::list_sip_sizes(system))
    }

    #[tool(description = "Calculate the minutes between drink reminders for a daily amount and sip size, snapped to the available session times")]
    fn calculate_session_duration(&self, Parameters(p): Parameters<CalculateSessionDurationParams>) -> Result<CallToolResult, McpError> {
        to_json(&hydration::calculate_session_duration(p.drink_amount_ml, &p.sip_size))
    }

    #[tool(description = "Run the full welcome calculation: measurement system, weight, daily drink amount, and reminder interval")]
    fn plan_hydration(&self, Parameters(p): Parameters<PlanHydrationParams>) -> Result<CallToolResult, McpError> {
        let result = hydration::plan_hydration(
            self.locale_or_default(&p.locale),
            &p.gender,
            p.weight.as_deref(),
            p.weight_system.as_deref(),
            p.sip_size.as_deref(),
        )
        .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    // --- Settings ---

    #[tool(description = "Get the stored user settings (defaults if nothing has been saved)")]
    fn get_settings(&self) -> Result<CallToolResult, McpError> {
        let result = settings::get_settings(&self.database).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Update user settings. Only the provided fields change.")]
    fn save_settings(&self, Parameters(p): Parameters<SaveSettingsParams>) -> Result<CallToolResult, McpError> {
        let update = p.into_update().map_err(|e| McpError::invalid_params(e, None))?;
        let result = settings::save_settings(&self.database, update).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Run the welcome calculation and store the result in the user settings")]
    fn apply_plan(&self, Parameters(p): Parameters<PlanHydrationParams>) -> Result<CallToolResult, McpError> {
        let plan = hydration::plan_hydration(
            self.locale_or_default(&p.locale),
            &p.gender,
            p.weight.as_deref(),
            p.weight_system.as_deref(),
            p.sip_size.as_deref(),
        )
        .map_err(|e| McpError::invalid_params(e, None))?;
        let result = settings::apply_plan(&self.database, plan).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Recompute the hydration plan from the stored settings")]
    fn current_plan(&self) -> Result<CallToolResult, McpError> {
        let result = settings::current_plan(&self.database).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Pricing ---

    #[tool(description = "Get the subscription price (formatted for the locale), trial length and, for a device, its payment status")]
    async fn get_payment_info(&self, Parameters(p): Parameters<GetPaymentInfoParams>) -> Result<CallToolResult, McpError> {
        let locale = self.locale_or_default(&p.locale);
        let device_id = self.device_or_default(&p.device_id);
        let result = pricing::get_payment_info(self.pricing.as_ref(), device_id, locale)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get the client secret and publishable key for the hosted payment form")]
    async fn get_payment_setup(&self) -> Result<CallToolResult, McpError> {
        let result = pricing::get_payment_setup(self.pricing.as_ref())
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Cancel the open subscription payment of a device")]
    async fn cancel_payment(&self, Parameters(p): Parameters<CancelPaymentParams>) -> Result<CallToolResult, McpError> {
        let device_id = self.device_or_default(&p.device_id);
        let result = pricing::cancel_payment(self.pricing.as_ref(), device_id)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for DrinkNowService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "drinknow".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("DrinkNow Hydration Planner".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "DrinkNow - daily hydration planning and drink reminders. \
                 IMPORTANT: Call hydration_instructions before the welcome flow. \
                 Engine: detect_measure_system, convert_weight, convert_volume, gender_profile, \
                 calculate_drink_amount, list_sip_sizes, calculate_session_duration, plan_hydration. \
                 Settings: get_settings, save_settings, apply_plan, current_plan. \
                 Pricing: get_payment_info, get_payment_setup, cancel_payment. \
                 Status: drinknow_status."
                    .into(),
            ),
        }
    }
}
