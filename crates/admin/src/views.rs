//! Display data and the HTMX table fragments.
//!
//! Both tables are rendered as a full page on load and as a fragment after
//! every row action, so the fragment templates live here and the page
//! templates include them.

use askama::Template;
use askama_web::WebTemplate;
use your_slice_core::OrderStatus;
use your_slice_core::catalog::{ProductCatalog, ProductRow};
use your_slice_core::orders::{OrderAction, OrderBoard, OrderRow, StatusFilter};

use crate::filters;

// =============================================================================
// Notices
// =============================================================================

/// A one-line message for the staff member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// `success`, `error` or `info`; used as a CSS modifier.
    pub kind: &'static str,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: "success",
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: "error",
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: "info",
            message: message.into(),
        }
    }
}

/// Notice fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/notice.html")]
pub struct NoticeTemplate {
    pub notice: Notice,
}

impl NoticeTemplate {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            notice: Notice::error(message),
        }
    }
}

// =============================================================================
// Orders
// =============================================================================

/// One row of the orders table.
#[derive(Debug, Clone)]
pub struct OrderRowView {
    pub id: u32,
    pub customer: String,
    pub items: String,
    pub total: String,
    pub status: &'static str,
    pub status_class: &'static str,
    /// Last action's label, empty when none.
    pub action_label: String,
}

impl From<&OrderRow> for OrderRowView {
    fn from(row: &OrderRow) -> Self {
        Self {
            id: row.id.as_u32(),
            customer: row.customer.clone(),
            items: row.items.clone(),
            total: row.total.to_string(),
            status: row.status.label(),
            status_class: row.status.css_class(),
            action_label: row.action_label.clone().unwrap_or_default(),
        }
    }
}

/// A row action button.
#[derive(Debug, Clone)]
pub struct ActionView {
    pub slug: &'static str,
    pub title: &'static str,
    /// Ask before sending (delete).
    pub confirm: bool,
}

/// An option of the status dropdown.
#[derive(Debug, Clone)]
pub struct StatusOptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Status dropdown options with `filter` selected.
#[must_use]
pub fn status_options(filter: StatusFilter) -> Vec<StatusOptionView> {
    let all = StatusOptionView {
        value: "all",
        label: "All statuses",
        selected: filter == StatusFilter::All,
    };
    std::iter::once(all)
        .chain(OrderStatus::ALL.into_iter().map(|status| StatusOptionView {
            value: status_slug(status),
            label: status.label(),
            selected: filter == StatusFilter::Only(status),
        }))
        .collect()
}

const fn status_slug(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "pending",
        OrderStatus::Processing => "processing",
        OrderStatus::Completed => "completed",
        OrderStatus::Cancelled => "cancelled",
    }
}

/// The orders table under the current search and filter.
#[derive(Debug, Clone)]
pub struct OrdersTableView {
    pub rows: Vec<OrderRowView>,
    pub actions: Vec<ActionView>,
    /// Rows in the board before filtering.
    pub total: usize,
    pub notice: Option<Notice>,
}

impl OrdersTableView {
    #[must_use]
    pub fn new(board: &OrderBoard, query: &str, filter: StatusFilter, notice: Option<Notice>) -> Self {
        Self {
            rows: board
                .view(query, filter)
                .into_iter()
                .map(OrderRowView::from)
                .collect(),
            actions: OrderAction::ALL
                .into_iter()
                .map(|action| ActionView {
                    slug: action.slug(),
                    title: action.title(),
                    confirm: action == OrderAction::Delete,
                })
                .collect(),
            total: board.len(),
            notice,
        }
    }
}

/// Orders table fragment (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/orders_table.html")]
pub struct OrdersTableTemplate {
    pub table: OrdersTableView,
}

// =============================================================================
// Products
// =============================================================================

/// One row of the product table.
#[derive(Debug, Clone)]
pub struct ProductRowView {
    pub id: u32,
    pub name: String,
    pub price: String,
}

impl From<&ProductRow> for ProductRowView {
    fn from(row: &ProductRow) -> Self {
        Self {
            id: row.id.as_u32(),
            name: row.name.clone(),
            price: row.price.to_string(),
        }
    }
}

/// The product table.
#[derive(Debug, Clone)]
pub struct ProductsTableView {
    pub rows: Vec<ProductRowView>,
    pub notice: Option<Notice>,
}

impl ProductsTableView {
    #[must_use]
    pub fn new(catalog: &ProductCatalog, notice: Option<Notice>) -> Self {
        Self {
            rows: catalog.rows().iter().map(ProductRowView::from).collect(),
            notice,
        }
    }
}

/// Product table fragment (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/products_table.html")]
pub struct ProductsTableTemplate {
    pub products: ProductsTableView,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_orders_table_view() {
        let board = OrderBoard::sample();
        let view = OrdersTableView::new(&board, "", StatusFilter::Only(OrderStatus::Pending), None);

        assert_eq!(view.total, 5);
        let ids: Vec<_> = view.rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, [1001, 1004]);
        assert_eq!(view.rows[0].total, "€18.50");
        assert_eq!(view.rows[0].status_class, "status status-pending");
        assert!(view.rows[0].action_label.is_empty());

        let confirmed: Vec<_> = view.actions.iter().filter(|a| a.confirm).map(|a| a.slug).collect();
        assert_eq!(confirmed, ["delete"]);
    }

    #[test]
    fn test_status_options_mark_selection() {
        let options = status_options(StatusFilter::Only(OrderStatus::Completed));
        assert_eq!(options.len(), 5);
        assert!(!options[0].selected);
        let selected: Vec<_> = options.iter().filter(|o| o.selected).map(|o| o.value).collect();
        assert_eq!(selected, ["completed"]);
        assert!(status_options(StatusFilter::All)[0].selected);
    }

    #[test]
    fn test_status_slugs_parse_back() {
        for status in OrderStatus::ALL {
            let filter: StatusFilter = status_slug(status).parse().unwrap();
            assert_eq!(filter, StatusFilter::Only(status));
        }
    }

    #[test]
    fn test_products_table_view() {
        let catalog = ProductCatalog::sample();
        let view = ProductsTableView::new(&catalog, Some(Notice::success("Product added.")));
        assert_eq!(view.rows.len(), catalog.len());
        assert!(view.rows[0].price.starts_with('€'));
        assert_eq!(view.notice.unwrap().kind, "success");
    }
}
