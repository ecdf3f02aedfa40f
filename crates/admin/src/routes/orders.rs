//! Orders table route handlers.
//!
//! The table lives in process memory. Row actions re-render the table under
//! the search text and status filter the request carries, so the staff
//! member keeps their view after each click.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;
use your_slice_core::OrderId;
use your_slice_core::orders::{ActionOutcome, OrderAction, OrderError, StatusFilter};

use super::dashboard::StaffView;
use super::deserialize_flag;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireStaff;
use crate::state::AppState;
use crate::views::{Notice, OrdersTableTemplate, OrdersTableView, StatusOptionView, status_options};

// =============================================================================
// Input Types
// =============================================================================

/// Search box and status dropdown.
#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub status: String,
}

impl OrdersQuery {
    fn filter(&self) -> Result<StatusFilter> {
        self.status
            .parse()
            .map_err(|_| AppError::BadRequest(format!("Unknown status filter: {}", self.status)))
    }
}

/// Row action form data. The current search and filter ride along so the
/// re-rendered table matches what the staff member was looking at.
#[derive(Debug, Deserialize)]
pub struct ActionForm {
    pub action: String,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub confirmed: bool,
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub status: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Orders page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersPageTemplate {
    pub staff: StaffView,
    pub current_path: &'static str,
    pub search_value: String,
    pub status_options: Vec<StatusOptionView>,
    pub table: OrdersTableView,
}

// =============================================================================
// Handlers
// =============================================================================

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(index))
        .route("/orders/table", get(table))
        .route("/orders/{id}/action", post(action))
}

/// Orders page.
///
/// GET /orders
#[instrument(skip(staff, state))]
async fn index(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Query(query): Query<OrdersQuery>,
) -> Result<OrdersPageTemplate> {
    let filter = query.filter()?;
    let table = OrdersTableView::new(&*state.orders().read().await, &query.q, filter, None);

    Ok(OrdersPageTemplate {
        staff: StaffView::from(&staff),
        current_path: "/orders",
        search_value: query.q,
        status_options: status_options(filter),
        table,
    })
}

/// Orders table fragment for the search box and status dropdown.
///
/// GET /orders/table
#[instrument(skip(_staff, state))]
async fn table(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
    Query(query): Query<OrdersQuery>,
) -> Result<OrdersTableTemplate> {
    let filter = query.filter()?;
    Ok(OrdersTableTemplate {
        table: OrdersTableView::new(&*state.orders().read().await, &query.q, filter, None),
    })
}

/// Apply a row action.
///
/// POST /orders/{id}/action
#[instrument(skip(staff, state), fields(staff = %staff.email))]
async fn action(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ActionForm>,
) -> Result<OrdersTableTemplate> {
    let id: OrderId = id
        .parse()
        .map_err(|_| AppError::NotFound(format!("order {id}")))?;
    let action: OrderAction = form
        .action
        .parse()
        .map_err(|e: OrderError| AppError::BadRequest(e.to_string()))?;
    let filter = OrdersQuery {
        q: form.q.clone(),
        status: form.status.clone(),
    }
    .filter()?;

    let mut board = state.orders().write().await;
    let notice = match board.apply(id, action, form.confirmed) {
        ActionOutcome::Updated => {
            tracing::info!(%id, action = action.slug(), "Order action applied");
            None
        }
        ActionOutcome::Deleted => {
            tracing::info!(%id, "Order deleted");
            Some(Notice::success(format!("Order #{id} deleted.")))
        }
        ActionOutcome::NotConfirmed => {
            return Err(AppError::BadRequest(
                "Please confirm that you want to delete this order.".to_string(),
            ));
        }
        ActionOutcome::NotFound => Some(Notice::info(format!("Order #{id} no longer exists."))),
    };

    Ok(OrdersTableTemplate {
        table: OrdersTableView::new(&board, &form.q, filter, notice),
    })
}

#[cfg(test)]
mod tests {
    use your_slice_core::OrderStatus;

    use super::*;

    fn query(status: &str) -> OrdersQuery {
        OrdersQuery {
            q: String::new(),
            status: status.to_string(),
        }
    }

    #[test]
    fn test_status_filter_parsing() {
        assert!(matches!(query("").filter(), Ok(StatusFilter::All)));
        assert!(matches!(query("all").filter(), Ok(StatusFilter::All)));
        assert!(matches!(
            query("Processing").filter(),
            Ok(StatusFilter::Only(OrderStatus::Processing))
        ));
        assert!(matches!(query("shipped").filter(), Err(AppError::BadRequest(_))));
    }
}
