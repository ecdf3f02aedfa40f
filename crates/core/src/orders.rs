//! Back-office order table.
//!
//! Rows carry a status and a transient action label. Row actions either
//! move the status, delete the row (after confirmation), or only set the
//! label (view, edit).

use serde::{Deserialize, Serialize};

use crate::{OrderId, OrderStatus, Price};

/// Errors from parsing order table input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("unknown order action: {0}")]
    UnknownAction(String),
    #[error("unknown status filter: {0}")]
    UnknownFilter(String),
}

/// A button in an order row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderAction {
    Process,
    Complete,
    Cancel,
    Delete,
    View,
    Edit,
}

impl OrderAction {
    pub const ALL: [Self; 6] = [
        Self::Process,
        Self::Complete,
        Self::Cancel,
        Self::Delete,
        Self::View,
        Self::Edit,
    ];

    /// Status the action moves the row to, if any.
    #[must_use]
    pub const fn target_status(&self) -> Option<OrderStatus> {
        match self {
            Self::Process => Some(OrderStatus::Processing),
            Self::Complete => Some(OrderStatus::Completed),
            Self::Cancel => Some(OrderStatus::Cancelled),
            Self::Delete | Self::View | Self::Edit => None,
        }
    }

    /// Transient label shown in the row after the action.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Process => "Processing order...",
            Self::Complete => "Completing order...",
            Self::Cancel => "Cancelling order...",
            Self::Delete => "Deleting order...",
            Self::View => "Viewing order details...",
            Self::Edit => "Editing order...",
        }
    }

    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Process => "process",
            Self::Complete => "complete",
            Self::Cancel => "cancel",
            Self::Delete => "delete",
            Self::View => "view",
            Self::Edit => "edit",
        }
    }

    /// Button caption.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Process => "Process",
            Self::Complete => "Complete",
            Self::Cancel => "Cancel",
            Self::Delete => "Delete",
            Self::View => "View",
            Self::Edit => "Edit",
        }
    }
}

impl std::str::FromStr for OrderAction {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|a| a.slug() == wanted)
            .ok_or_else(|| OrderError::UnknownAction(s.to_string()))
    }
}

/// Status dropdown above the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    #[must_use]
    pub fn matches(&self, status: OrderStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == status,
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<OrderStatus>()
            .map(Self::Only)
            .map_err(|_| OrderError::UnknownFilter(s.to_string()))
    }
}

/// One row of the orders table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRow {
    pub id: OrderId,
    pub customer: String,
    pub items: String,
    pub total: Price,
    pub status: OrderStatus,
    #[serde(default)]
    pub action_label: Option<String>,
}

impl OrderRow {
    #[must_use]
    pub fn new(id: u32, customer: &str, items: &str, total: Price, status: OrderStatus) -> Self {
        Self {
            id: OrderId::new(id),
            customer: customer.to_string(),
            items: items.to_string(),
            total,
            status,
            action_label: None,
        }
    }

    /// Case-insensitive substring match over id, customer and items.
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.id.to_string().to_lowercase().contains(&query)
            || self.customer.to_lowercase().contains(&query)
            || self.items.to_lowercase().contains(&query)
    }
}

/// Result of applying a row action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Updated,
    Deleted,
    /// Delete asked for but the confirmation was not given.
    NotConfirmed,
    NotFound,
}

/// All rows of the orders table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBoard {
    rows: Vec<OrderRow>,
}

impl OrderBoard {
    #[must_use]
    pub const fn new(rows: Vec<OrderRow>) -> Self {
        Self { rows }
    }

    /// The demo rows the back office starts with.
    #[must_use]
    pub fn sample() -> Self {
        Self::new(vec![
            OrderRow::new(1001, "Aino Virtanen", "Margherita x2", Price::from_cents(1850), OrderStatus::Pending),
            OrderRow::new(1002, "Mikko Korhonen", "Custom Pizza Slice, Hawaiian", Price::from_cents(1725), OrderStatus::Processing),
            OrderRow::new(1003, "Laura Nieminen", "Veggie Delight", Price::from_cents(1150), OrderStatus::Completed),
            OrderRow::new(1004, "Jussi Mäkinen", "BBQ Chicken, Four Cheese", Price::from_cents(2300), OrderStatus::Pending),
            OrderRow::new(1005, "Emma Lahtinen", "Pepperoni Supreme x3", Price::from_cents(3100), OrderStatus::Cancelled),
        ])
    }

    /// Apply a row action.
    ///
    /// Status actions set the new status and their label. View and edit only
    /// set the label. Delete removes the row when `confirmed`.
    pub fn apply(&mut self, id: OrderId, action: OrderAction, confirmed: bool) -> ActionOutcome {
        let Some(pos) = self.rows.iter().position(|r| r.id == id) else {
            return ActionOutcome::NotFound;
        };

        if action == OrderAction::Delete {
            if !confirmed {
                return ActionOutcome::NotConfirmed;
            }
            self.rows.remove(pos);
            return ActionOutcome::Deleted;
        }

        if let Some(row) = self.rows.get_mut(pos) {
            if let Some(status) = action.target_status() {
                row.status = status;
            }
            row.action_label = Some(action.label().to_string());
        }
        ActionOutcome::Updated
    }

    #[must_use]
    pub fn get(&self, id: OrderId) -> Option<&OrderRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// Rows matching both the search box and the status dropdown, in table order.
    #[must_use]
    pub fn view(&self, query: &str, filter: StatusFilter) -> Vec<&OrderRow> {
        self.rows
            .iter()
            .filter(|r| filter.matches(r.status) && r.matches_query(query))
            .collect()
    }

    #[must_use]
    pub fn rows(&self) -> &[OrderRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows in `status`, for the dashboard cards.
    #[must_use]
    pub fn count(&self, status: OrderStatus) -> usize {
        self.rows.iter().filter(|r| r.status == status).count()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_actions_set_status_and_label() {
        let mut board = OrderBoard::sample();
        let id = OrderId::new(1001);

        assert_eq!(board.apply(id, OrderAction::Process, false), ActionOutcome::Updated);
        let row = board.get(id).unwrap();
        assert_eq!(row.status, OrderStatus::Processing);
        assert_eq!(row.action_label.as_deref(), Some("Processing order..."));

        board.apply(id, OrderAction::Complete, false);
        assert_eq!(board.get(id).unwrap().status, OrderStatus::Completed);

        board.apply(id, OrderAction::Cancel, false);
        let row = board.get(id).unwrap();
        assert_eq!(row.status, OrderStatus::Cancelled);
        assert_eq!(row.action_label.as_deref(), Some("Cancelling order..."));
    }

    #[test]
    fn test_view_and_edit_only_label() {
        let mut board = OrderBoard::sample();
        let id = OrderId::new(1004);

        board.apply(id, OrderAction::View, false);
        let row = board.get(id).unwrap();
        assert_eq!(row.status, OrderStatus::Pending);
        assert_eq!(row.action_label.as_deref(), Some("Viewing order details..."));

        board.apply(id, OrderAction::Edit, false);
        assert_eq!(
            board.get(id).unwrap().action_label.as_deref(),
            Some("Editing order...")
        );
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut board = OrderBoard::sample();
        let id = OrderId::new(1002);

        assert_eq!(board.apply(id, OrderAction::Delete, false), ActionOutcome::NotConfirmed);
        assert!(board.get(id).is_some());

        assert_eq!(board.apply(id, OrderAction::Delete, true), ActionOutcome::Deleted);
        assert!(board.get(id).is_none());
        assert_eq!(board.len(), 4);
    }

    #[test]
    fn test_unknown_row_is_not_found() {
        let mut board = OrderBoard::sample();
        assert_eq!(
            board.apply(OrderId::new(9), OrderAction::Process, false),
            ActionOutcome::NotFound
        );
    }

    #[test]
    fn test_search_and_filter() {
        let board = OrderBoard::sample();

        assert_eq!(board.view("", StatusFilter::All).len(), 5);
        assert_eq!(board.view("margherita", StatusFilter::All).len(), 1);
        assert_eq!(board.view("1003", StatusFilter::All).len(), 1);
        assert_eq!(board.view("", StatusFilter::Only(OrderStatus::Pending)).len(), 2);
        assert!(
            board
                .view("Emma", StatusFilter::Only(OrderStatus::Pending))
                .is_empty()
        );
    }

    #[test]
    fn test_parse_action_and_filter() {
        assert_eq!("Cancel".parse::<OrderAction>(), Ok(OrderAction::Cancel));
        assert!("ship".parse::<OrderAction>().is_err());
        assert_eq!("all".parse::<StatusFilter>(), Ok(StatusFilter::All));
        assert_eq!("".parse::<StatusFilter>(), Ok(StatusFilter::All));
        assert_eq!(
            "completed".parse::<StatusFilter>(),
            Ok(StatusFilter::Only(OrderStatus::Completed))
        );
        assert!("shipped".parse::<StatusFilter>().is_err());
    }
}
