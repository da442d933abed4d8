//! Student-facing handlers ("my payments")

use axum::{extract::{Path, State}, Json};

use core_kernel::StudentId;

use crate::{AppState, error::ApiError};
use crate::dto::billing::InvoiceResponse;

/// Lists one student's invoices, most recent first
pub async fn list_student_invoices(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<InvoiceResponse>>, ApiError> {
    let invoices = state.billing.invoices_for_student(&StudentId::new(id)).await?;
    Ok(Json(invoices.into_iter().map(InvoiceResponse::from).collect()))
}
