//! Product table route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::{Path, State},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;
use your_slice_core::ProductId;

use super::dashboard::StaffView;
use super::deserialize_flag;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireStaff;
use crate::state::AppState;
use crate::views::{Notice, ProductsTableTemplate, ProductsTableView};

/// Add product form data.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: String,
}

/// Delete product form data.
#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub confirmed: bool,
}

/// Products page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsPageTemplate {
    pub staff: StaffView,
    pub current_path: &'static str,
    pub products: ProductsTableView,
}

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(index).post(create))
        .route("/products/{id}/delete", post(delete))
}

/// Products page.
///
/// GET /products
#[instrument(skip(staff, state))]
async fn index(RequireStaff(staff): RequireStaff, State(state): State<AppState>) -> ProductsPageTemplate {
    ProductsPageTemplate {
        staff: StaffView::from(&staff),
        current_path: "/products",
        products: ProductsTableView::new(&*state.products().read().await, None),
    }
}

/// Add a product. A blank name or a price that is not above zero is refused.
///
/// POST /products
#[instrument(skip(staff, state), fields(staff = %staff.email))]
async fn create(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Result<ProductsTableTemplate> {
    let mut catalog = state.products().write().await;
    let row = catalog.add(&form.name, &form.price).map_err(|e| {
        tracing::debug!(error = %e, "Product rejected");
        AppError::BadRequest(e.notice().to_string())
    })?;
    tracing::info!(id = %row.id, name = %row.name, price = %row.price, "Product added");

    Ok(ProductsTableTemplate {
        products: ProductsTableView::new(
            &catalog,
            Some(Notice::success(format!("{} added.", row.name))),
        ),
    })
}

/// Delete a product once confirmed. An unknown id leaves the table as is.
///
/// POST /products/{id}/delete
#[instrument(skip(staff, state), fields(staff = %staff.email))]
async fn delete(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<DeleteForm>,
) -> Result<ProductsTableTemplate> {
    let id: ProductId = id
        .parse()
        .map_err(|_| AppError::NotFound(format!("product {id}")))?;
    if !form.confirmed {
        return Err(AppError::BadRequest(
            "Please confirm that you want to delete this product.".to_string(),
        ));
    }

    let mut catalog = state.products().write().await;
    let notice = if catalog.delete(id, true) {
        tracing::info!(%id, "Product deleted");
        Notice::success("Product deleted.")
    } else {
        Notice::info("That product was already removed.")
    };

    Ok(ProductsTableTemplate {
        products: ProductsTableView::new(&catalog, Some(notice)),
    })
}
