//! Billing handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use validator::Validate;

use core_kernel::InvoiceId;

use crate::{AppState, error::ApiError};
use crate::dto::billing::*;

/// Lists all invoices
pub async fn list_invoices(
    State(state): State<AppState>,
    Query(query): Query<BillingQuery>,
) -> Result<Json<Vec<InvoiceResponse>>, ApiError> {
    let invoices = state.billing.get_billing_data(query.refresh).await?;
    Ok(Json(invoices.iter().cloned().map(InvoiceResponse::from).collect()))
}

/// Replaces the stored invoice list
pub async fn replace_invoices(
    State(state): State<AppState>,
    Json(request): Json<ReplaceBillingRequest>,
) -> Result<Json<ReplaceBillingResponse>, ApiError> {
    let stored = request.invoices.len();
    state.billing.update_billing_data(request.invoices).await;
    Ok(Json(ReplaceBillingResponse { stored }))
}

/// Drops the stored list so the next read regenerates it
pub async fn invalidate_cache(State(state): State<AppState>) -> StatusCode {
    state.billing.invalidate().await;
    StatusCode::NO_CONTENT
}

/// Gets one invoice with its total breakdown
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<InvoiceDetailResponse>, ApiError> {
    let invoice = state.billing.find_invoice(&InvoiceId::new(id)).await?;
    Ok(Json(InvoiceDetailResponse::from(invoice)))
}

/// Records a payment against an invoice
pub async fn record_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<RecordPaymentRequest>,
) -> Result<Json<InvoiceResponse>, ApiError> {
    request.validate()?;

    let payment_date = request
        .payment_date
        .unwrap_or_else(|| state.billing.synthesizer().today());
    let invoice = state
        .billing
        .record_payment(&InvoiceId::new(id), payment_date)
        .await?;

    if let Some(reference) = &request.reference {
        info!(invoice_id = %invoice.id, %reference, "Payment reference noted");
    }
    Ok(Json(InvoiceResponse::from(invoice)))
}

/// Marks every past-due invoice overdue
pub async fn sweep_overdue(
    State(state): State<AppState>,
) -> Result<Json<SweepResponse>, ApiError> {
    let as_of = state.billing.synthesizer().today();
    let marked_overdue = state.billing.sweep_overdue(as_of).await?;
    Ok(Json(SweepResponse { as_of, marked_overdue }))
}

/// Accounts summary
pub async fn get_summary(
    State(state): State<AppState>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let summary = state.billing.summary().await?;
    Ok(Json(SummaryResponse::from(summary)))
}
