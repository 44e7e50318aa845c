//! Downloadable exports of finance records as CSV or JSON.

use axum::{
    Router,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::AppState;
use crate::db::models::{Invoice, InvoiceItem, OpenInvoice};
use crate::db::repository::FinanceRepository;
use crate::error::{AppError, AppResult};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/export/invoice/{id}", get(export_invoice))
        .route("/export/quote/{id}", get(export_quote))
        .route("/export/statement/{customer_id}", get(export_statement))
        .route("/export/monthly/{customer_id}", get(export_monthly))
        .route("/export/ageing/{customer_id}", get(export_ageing))
        .route("/export/balances/{customer_id}", get(export_balances))
        .route("/export/payslip/{id}", get(export_payslip))
}

/// Output encoding requested with `?format=`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    fn content_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv; charset=utf-8",
            Self::Json => "application/json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(AppError::BadRequest(format!(
                "unsupported export format '{other}', expected csv or json"
            ))),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub format: Option<String>,
}

impl ExportQuery {
    fn format(&self) -> AppResult<ExportFormat> {
        self.format
            .as_deref()
            .map_or(Ok(ExportFormat::default()), ExportFormat::from_str)
    }
}

/// Invoice header plus its line items, for JSON exports.
#[derive(Debug, Serialize, Deserialize)]
pub struct InvoiceExport {
    pub invoice: Invoice,
    pub items: Vec<InvoiceItem>,
}

/// One row of the ageing report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeingRow {
    pub invoice_id: i64,
    pub date: String,
    pub balance_due: f64,
    /// `None` when the invoice date cannot be parsed.
    pub days_outstanding: Option<i64>,
    pub bucket: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

async fn export_invoice(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<ExportQuery>,
) -> AppResult<Response> {
    let format = query.format()?;
    let pool = state.db.pool();

    let invoice = FinanceRepository::get_invoice(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Invoice not found".to_string()))?;
    let items = FinanceRepository::invoice_items(pool, id).await?;

    let body = match format {
        ExportFormat::Csv => to_csv(&items)?,
        ExportFormat::Json => to_json(&InvoiceExport { invoice, items })?,
    };
    Ok(attachment("invoice", id, format, body))
}

async fn export_quote(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<ExportQuery>,
) -> AppResult<Response> {
    let format = query.format()?;
    let quote = FinanceRepository::get_quote(state.db.pool(), id)
        .await?
        .ok_or_else(|| AppError::NotFound("Quote not found".to_string()))?;

    let body = encode(format, &[quote])?;
    Ok(attachment("quote", id, format, body))
}

async fn export_statement(
    State(state): State<AppState>,
    Path(customer_id): Path<i64>,
    Query(query): Query<ExportQuery>,
) -> AppResult<Response> {
    let format = query.format()?;
    let rows = FinanceRepository::statement(state.db.pool(), customer_id).await?;
    Ok(attachment("statement", customer_id, format, encode(format, &rows)?))
}

async fn export_monthly(
    State(state): State<AppState>,
    Path(customer_id): Path<i64>,
    Query(query): Query<ExportQuery>,
) -> AppResult<Response> {
    let format = query.format()?;
    let rows = FinanceRepository::monthly_totals(state.db.pool(), customer_id).await?;
    Ok(attachment("monthly", customer_id, format, encode(format, &rows)?))
}

async fn export_ageing(
    State(state): State<AppState>,
    Path(customer_id): Path<i64>,
    Query(query): Query<ExportQuery>,
) -> AppResult<Response> {
    let format = query.format()?;
    let open = FinanceRepository::open_invoices(state.db.pool(), customer_id).await?;
    let rows = ageing_rows(open, Utc::now().date_naive());
    Ok(attachment("ageing", customer_id, format, encode(format, &rows)?))
}

async fn export_balances(
    State(state): State<AppState>,
    Path(customer_id): Path<i64>,
    Query(query): Query<ExportQuery>,
) -> AppResult<Response> {
    let format = query.format()?;
    let rows = FinanceRepository::accounts(state.db.pool()).await?;
    Ok(attachment("balances", customer_id, format, encode(format, &rows)?))
}

async fn export_payslip(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<ExportQuery>,
) -> AppResult<Response> {
    let format = query.format()?;
    let payslip = FinanceRepository::get_payslip(state.db.pool(), id)
        .await?
        .ok_or_else(|| AppError::NotFound("Payslip not found".to_string()))?;

    Ok(attachment("payslip", id, format, encode(format, &[payslip])?))
}

// ─────────────────────────────────────────────────────────────────────────────
// Encoding
// ─────────────────────────────────────────────────────────────────────────────

fn attachment(kind: &str, id: i64, format: ExportFormat, body: Vec<u8>) -> Response {
    let disposition = format!("attachment; filename={kind}-{id}.{}", format.extension());
    (
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}

fn encode<T: Serialize>(format: ExportFormat, rows: &[T]) -> AppResult<Vec<u8>> {
    match format {
        ExportFormat::Csv => to_csv(rows),
        ExportFormat::Json => to_json(&rows),
    }
}

/// Header row from the first record's field names. An empty set is a single `No data` record.
fn to_csv<T: Serialize>(rows: &[T]) -> AppResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if rows.is_empty() {
        writer.write_record(["No data"])?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| AppError::Export(e.to_string()))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> AppResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| AppError::Export(e.to_string()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Ageing
// ─────────────────────────────────────────────────────────────────────────────

fn ageing_rows(open: Vec<OpenInvoice>, today: NaiveDate) -> Vec<AgeingRow> {
    open.into_iter()
        .map(|invoice| {
            let days = invoice
                .date
                .get(..10)
                .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
                .map(|issued| (today - issued).num_days());

            AgeingRow {
                invoice_id: invoice.invoice_id,
                date: invoice.date,
                balance_due: invoice.balance_due,
                days_outstanding: days,
                bucket: days.map_or("unknown", ageing_bucket).to_string(),
            }
        })
        .collect()
}

fn ageing_bucket(days: i64) -> &'static str {
    match days {
        ..=30 => "0-30",
        31..=60 => "31-60",
        61..=90 => "61-90",
        _ => "90+",
    }
}
