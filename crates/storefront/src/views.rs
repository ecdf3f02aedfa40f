//! Display data and shared HTMX fragments.
//!
//! Handlers turn core values into these flat view structs so templates only
//! print strings and loop over lists. The fragment templates here are
//! rendered both on their own (HTMX swaps) and included by the home page.

use askama::Template;
use askama_web::WebTemplate;
use chrono::Weekday;
use your_slice_core::builder::{Category, Choice, Configurator, Step, SummaryLine};
use your_slice_core::cart::Cart;
use your_slice_core::lunch::{LunchDish, LunchMenu, LunchOption, day_slug, day_title};
use your_slice_core::menu::MenuItem;
use your_slice_core::review::{Review, ReviewBook};

use crate::filters;

// =============================================================================
// Notices
// =============================================================================

/// A one-line message for the visitor.
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

// =============================================================================
// Cart
// =============================================================================

/// One cart line for display.
#[derive(Debug, Clone)]
pub struct CartLineView {
    pub index: usize,
    pub name: String,
    pub image: String,
    pub details: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

/// The cart panel.
#[derive(Debug, Clone)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub item_count: u32,
    pub subtotal: String,
    pub delivery_fee: String,
    pub total: String,
    pub is_empty: bool,
    pub open: bool,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let totals = cart.totals();
        Self {
            items: cart
                .items()
                .iter()
                .enumerate()
                .map(|(index, line)| CartLineView {
                    index,
                    name: line.name.clone(),
                    image: line.image.clone(),
                    details: line.customizations.join(", "),
                    quantity: line.quantity,
                    unit_price: line.unit_price.to_string(),
                    line_total: line.line_total().to_string(),
                })
                .collect(),
            item_count: totals.item_count,
            subtotal: totals.subtotal.to_string(),
            delivery_fee: totals.delivery_fee.to_string(),
            total: totals.total.to_string(),
            is_empty: cart.is_empty(),
            open: cart.is_panel_open(),
        }
    }
}

/// Cart panel fragment (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_panel.html")]
pub struct CartPanelTemplate {
    pub cart: CartView,
    pub notice: Option<Notice>,
}

impl CartPanelTemplate {
    #[must_use]
    pub fn new(cart: &Cart) -> Self {
        Self {
            cart: CartView::from(cart),
            notice: None,
        }
    }

    #[must_use]
    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }
}

/// Cart count badge fragment (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

// =============================================================================
// Builder
// =============================================================================

/// Progress dot for one builder step.
#[derive(Debug, Clone)]
pub struct StepView {
    pub position: u8,
    pub title: &'static str,
    pub active: bool,
    pub done: bool,
}

/// An option card in an exclusive category.
#[derive(Debug, Clone)]
pub struct CardView {
    pub name: String,
    pub price_label: String,
    pub selected: bool,
}

/// A topping card.
#[derive(Debug, Clone)]
pub struct ToppingCardView {
    pub name: String,
    pub price_label: String,
    pub selected: bool,
    /// Three toppings are chosen and this is not one of them.
    pub disabled: bool,
}

/// The builder section.
#[derive(Debug, Clone)]
pub struct BuilderView {
    pub step: u8,
    pub step_count: u8,
    pub step_title: &'static str,
    /// Category slug of an exclusive step, empty on the toppings step.
    pub category: &'static str,
    pub cards: Vec<CardView>,
    pub is_toppings: bool,
    pub toppings: Vec<ToppingCardView>,
    pub counter_label: String,
    pub price: String,
    pub next_label: String,
    pub prev_disabled: bool,
    pub summary: Vec<SummaryLine>,
    pub steps: Vec<StepView>,
    pub notice: Option<Notice>,
}

fn choice_label(choice: &Choice) -> String {
    if let Some(multiplier) = choice.multiplier {
        format!("×{}", multiplier.normalize())
    } else if choice.price.is_zero() {
        "Included".to_string()
    } else {
        format!("+{}", choice.price)
    }
}

impl BuilderView {
    #[must_use]
    pub fn new(configurator: &Configurator<'_>, notice: Option<Notice>) -> Self {
        let layout = configurator.layout();
        let state = configurator.state();
        let current = state.current_step();
        let step = configurator.current().unwrap_or(Step::Toppings);

        let cards = step
            .category()
            .map(|category: Category| {
                let selected = state.selected(category).map(|c| c.name.as_str());
                layout
                    .choices(category)
                    .iter()
                    .map(|choice| CardView {
                        name: choice.name.clone(),
                        price_label: choice_label(choice),
                        selected: selected == Some(choice.name.as_str()),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let chosen = state.toppings();
        let toppings = layout
            .toppings()
            .iter()
            .map(|t| {
                let selected = chosen.contains(&t.name);
                ToppingCardView {
                    name: t.name.clone(),
                    price_label: format!("+{}", t.price),
                    selected,
                    disabled: chosen.is_full() && !selected,
                }
            })
            .collect();

        Self {
            step: current,
            step_count: layout.step_count(),
            step_title: step.title(),
            category: step.category().map_or("", |c| c.slug()),
            cards,
            is_toppings: step == Step::Toppings,
            toppings,
            counter_label: chosen.counter_label(),
            price: configurator.price().to_string(),
            next_label: configurator.next_label(),
            prev_disabled: configurator.at_first_step(),
            summary: configurator.summary(),
            steps: layout
                .steps()
                .map(|(position, s)| StepView {
                    position,
                    title: s.title(),
                    active: position == current,
                    done: position < current,
                })
                .collect(),
            notice,
        }
    }
}

/// Builder section fragment (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/builder.html")]
pub struct BuilderTemplate {
    pub builder: BuilderView,
}

// =============================================================================
// Lunch
// =============================================================================

/// A day tab in the lunch menu.
#[derive(Debug, Clone)]
pub struct DayTabView {
    pub slug: &'static str,
    pub title: &'static str,
    pub active: bool,
}

/// A lunch dish card.
#[derive(Debug, Clone)]
pub struct DishView {
    pub option: &'static str,
    pub option_label: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub price: String,
    pub image: &'static str,
}

impl DishView {
    fn new(option: LunchOption, dish: &LunchDish) -> Self {
        Self {
            option: option.slug(),
            option_label: option.label(),
            name: dish.name,
            description: dish.description,
            price: dish.price.to_string(),
            image: dish.image,
        }
    }
}

/// The lunch section for one active day.
#[derive(Debug, Clone)]
pub struct LunchView {
    pub day: &'static str,
    pub day_title: &'static str,
    pub tabs: Vec<DayTabView>,
    pub dishes: Vec<DishView>,
}

impl LunchView {
    #[must_use]
    pub fn new(menu: &LunchMenu, active: Weekday) -> Self {
        let dishes = menu
            .day(active)
            .map(|daily| {
                [LunchOption::Vegan, LunchOption::Meat]
                    .into_iter()
                    .map(|option| DishView::new(option, daily.dish(option)))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            day: day_slug(active),
            day_title: day_title(active),
            tabs: menu
                .days()
                .map(|d| DayTabView {
                    slug: day_slug(d.day),
                    title: day_title(d.day),
                    active: d.day == active,
                })
                .collect(),
            dishes,
        }
    }
}

/// Lunch section fragment (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/lunch.html")]
pub struct LunchTemplate {
    pub lunch: LunchView,
}

// =============================================================================
// Reviews
// =============================================================================

/// One review card.
#[derive(Debug, Clone)]
pub struct ReviewView {
    pub name: String,
    pub rating: u8,
    pub stars: String,
    pub text: String,
}

impl From<&Review> for ReviewView {
    fn from(review: &Review) -> Self {
        let rating = review.rating.stars();
        let filled = usize::from(rating);
        Self {
            name: review.name.clone(),
            rating,
            stars: format!("{}{}", "★".repeat(filled), "☆".repeat(5_usize.saturating_sub(filled))),
            text: review.text.clone(),
        }
    }
}

/// The reviews section.
#[derive(Debug, Clone)]
pub struct ReviewsView {
    pub reviews: Vec<ReviewView>,
    pub notice: Option<Notice>,
}

impl ReviewsView {
    #[must_use]
    pub fn new(book: &ReviewBook, notice: Option<Notice>) -> Self {
        Self {
            reviews: book.iter().map(ReviewView::from).collect(),
            notice,
        }
    }
}

/// Reviews section fragment (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/reviews.html")]
pub struct ReviewsTemplate {
    pub reviews: ReviewsView,
}

// =============================================================================
// Menu
// =============================================================================

/// A popular menu card.
#[derive(Debug, Clone)]
pub struct MenuItemView {
    pub name: &'static str,
    pub description: &'static str,
    /// Plain amount for the add-to-cart form, e.g. `8.00`.
    pub amount: String,
    pub price: String,
    pub image: &'static str,
}

impl From<&MenuItem> for MenuItemView {
    fn from(item: &MenuItem) -> Self {
        Self {
            name: item.name,
            description: item.description,
            amount: format!("{:.2}", item.price.amount()),
            price: item.price.to_string(),
            image: item.image,
        }
    }
}
