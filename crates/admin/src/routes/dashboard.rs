//! Dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Router, extract::State, routing::get};
use tracing::instrument;
use your_slice_core::OrderStatus;

use crate::filters;
use crate::middleware::RequireStaff;
use crate::models::CurrentStaff;
use crate::state::AppState;

/// Staff member view for the page header.
#[derive(Debug, Clone)]
pub struct StaffView {
    pub name: String,
    pub email: String,
}

impl From<&CurrentStaff> for StaffView {
    fn from(staff: &CurrentStaff) -> Self {
        Self {
            name: staff.name.clone(),
            email: staff.email.to_string(),
        }
    }
}

/// Count of orders in one status.
#[derive(Debug, Clone)]
pub struct StatusCountView {
    pub label: &'static str,
    pub css_class: &'static str,
    pub count: usize,
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub staff: StaffView,
    pub current_path: &'static str,
    pub order_count: usize,
    pub statuses: Vec<StatusCountView>,
    pub product_count: usize,
}

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

/// Order and product overview.
///
/// GET /
#[instrument(skip(staff, state))]
async fn index(RequireStaff(staff): RequireStaff, State(state): State<AppState>) -> DashboardTemplate {
    let (order_count, statuses) = {
        let board = state.orders().read().await;
        let statuses = OrderStatus::ALL
            .into_iter()
            .map(|status| StatusCountView {
                label: status.label(),
                css_class: status.css_class(),
                count: board.count(status),
            })
            .collect();
        (board.len(), statuses)
    };
    let product_count = state.products().read().await.len();

    DashboardTemplate {
        staff: StaffView::from(&staff),
        current_path: "/",
        order_count,
        statuses,
        product_count,
    }
}
