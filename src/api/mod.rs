use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    ChartSlice, FieldValue, FormInput, INVESTMENT_PRINCIPLES, InvestmentHorizon, ResultSet,
    RiskTolerance, allocation_chart, expense_chart, plan_from_form, progress_bar_percent,
    render_text,
};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
enum CliRiskTolerance {
    Conservative,
    #[default]
    Moderate,
    Aggressive,
}

impl From<CliRiskTolerance> for RiskTolerance {
    fn from(value: CliRiskTolerance) -> Self {
        match value {
            CliRiskTolerance::Conservative => RiskTolerance::Conservative,
            CliRiskTolerance::Moderate => RiskTolerance::Moderate,
            CliRiskTolerance::Aggressive => RiskTolerance::Aggressive,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
enum CliInvestmentHorizon {
    #[value(name = "0-2")]
    ZeroToTwo,
    #[value(name = "3-5")]
    ThreeToFive,
    #[default]
    #[value(name = "5-10")]
    FiveToTen,
    #[value(name = "10+")]
    TenPlus,
}

impl From<CliInvestmentHorizon> for InvestmentHorizon {
    fn from(value: CliInvestmentHorizon) -> Self {
        match value {
            CliInvestmentHorizon::ZeroToTwo => InvestmentHorizon::ZeroToTwo,
            CliInvestmentHorizon::ThreeToFive => InvestmentHorizon::ThreeToFive,
            CliInvestmentHorizon::FiveToTen => InvestmentHorizon::FiveToTen,
            CliInvestmentHorizon::TenPlus => InvestmentHorizon::TenPlus,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "advisor",
    about = "Monthly budget summary and rule-based investment recommendations"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the web form and the JSON plan API
    Serve {
        #[arg(long, env = "ADVISOR_PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Compute a plan once and print it
    Plan(PlanArgs),
}

/// Form fields as command-line flags. Amounts are taken as text and coerced
/// exactly like the web form, so `--housing abc` counts as 0.
#[derive(Args, Debug, Default)]
pub struct PlanArgs {
    #[arg(long)]
    monthly_income: Option<String>,
    #[arg(long)]
    housing: Option<String>,
    #[arg(long)]
    utilities: Option<String>,
    #[arg(long)]
    food: Option<String>,
    #[arg(long)]
    transportation: Option<String>,
    #[arg(long)]
    entertainment: Option<String>,
    #[arg(long)]
    other: Option<String>,
    #[arg(long)]
    current_savings: Option<String>,
    #[arg(long, help = "Age in years; defaults to 30 when missing or unparseable")]
    age: Option<String>,
    #[arg(long, value_enum, default_value_t = CliRiskTolerance::Moderate)]
    risk_tolerance: CliRiskTolerance,
    #[arg(long, value_enum, default_value_t = CliInvestmentHorizon::FiveToTen)]
    investment_horizon: CliInvestmentHorizon,
    #[arg(long, help = "Print the JSON plan response instead of the text report")]
    json: bool,
}

impl From<&PlanArgs> for FormInput {
    fn from(args: &PlanArgs) -> Self {
        let field = |value: &Option<String>| value.clone().map(FieldValue::from);
        FormInput {
            monthly_income: field(&args.monthly_income),
            housing: field(&args.housing),
            utilities: field(&args.utilities),
            food: field(&args.food),
            transportation: field(&args.transportation),
            entertainment: field(&args.entertainment),
            other: field(&args.other),
            current_savings: field(&args.current_savings),
            age: field(&args.age),
            risk_tolerance: args.risk_tolerance.into(),
            investment_horizon: args.investment_horizon.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PlanPayload {
    monthly_income: Option<FieldValue>,
    housing: Option<FieldValue>,
    utilities: Option<FieldValue>,
    food: Option<FieldValue>,
    transportation: Option<FieldValue>,
    entertainment: Option<FieldValue>,
    other: Option<FieldValue>,
    current_savings: Option<FieldValue>,
    age: Option<FieldValue>,
    risk_tolerance: Option<RiskTolerance>,
    investment_horizon: Option<InvestmentHorizon>,
}

impl From<PlanPayload> for FormInput {
    fn from(payload: PlanPayload) -> Self {
        FormInput {
            monthly_income: payload.monthly_income,
            housing: payload.housing,
            utilities: payload.utilities,
            food: payload.food,
            transportation: payload.transportation,
            entertainment: payload.entertainment,
            other: payload.other,
            current_savings: payload.current_savings,
            age: payload.age,
            risk_tolerance: payload.risk_tolerance.unwrap_or_default(),
            investment_horizon: payload.investment_horizon.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanResponse {
    risk_tolerance: RiskTolerance,
    investment_horizon: InvestmentHorizon,
    #[serde(flatten)]
    result: ResultSet,
    expense_chart: Vec<ChartSlice>,
    allocation_chart: Vec<ChartSlice>,
    emergency_fund_bar: f64,
    principles: &'static [&'static str],
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_plan_response(form: &FormInput) -> PlanResponse {
    let result = plan_from_form(form);
    PlanResponse {
        risk_tolerance: form.risk_tolerance,
        investment_horizon: form.investment_horizon,
        expense_chart: expense_chart(&result.expenses),
        allocation_chart: allocation_chart(&result.allocation),
        emergency_fund_bar: progress_bar_percent(result.budget.emergency_fund_progress),
        principles: &INVESTMENT_PRINCIPLES,
        result,
    }
}

/// Runs the `plan` subcommand and returns what should be printed.
pub fn run_plan_command(args: &PlanArgs) -> Result<String, String> {
    let form = FormInput::from(args);
    if args.json {
        let response = build_plan_response(&form);
        let json = serde_json::to_string_pretty(&response)
            .map_err(|e| format!("Failed to serialize plan: {e}"))?;
        return Ok(format!("{json}\n"));
    }
    let result = plan_from_form(&form);
    Ok(render_text(
        &result,
        form.risk_tolerance,
        form.investment_horizon,
    ))
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route("/api/plan", get(plan_get_handler).post(plan_post_handler))
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "advisor HTTP API listening");
    tracing::info!("local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn plan_get_handler(payload: Result<Query<PlanPayload>, QueryRejection>) -> Response {
    match payload {
        Ok(Query(payload)) => plan_handler_impl(payload),
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "rejected plan query");
            error_response(StatusCode::BAD_REQUEST, &rejection.body_text())
        }
    }
}

async fn plan_post_handler(payload: Result<Json<PlanPayload>, JsonRejection>) -> Response {
    match payload {
        Ok(Json(payload)) => plan_handler_impl(payload),
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "rejected plan body");
            error_response(StatusCode::BAD_REQUEST, &rejection.body_text())
        }
    }
}

fn plan_handler_impl(payload: PlanPayload) -> Response {
    let form = FormInput::from(payload);
    json_response(StatusCode::OK, build_plan_response(&form))
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}
