//! Daily lunch menu.
//!
//! Every weekday offers one vegan and one meat dish. Lunch dishes go into the
//! cart tagged with the day and the option, e.g. `["Monday Lunch", "Vegan"]`.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::Price;
use crate::cart::Cart;

/// Which of the two daily dishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LunchOption {
    Vegan,
    Meat,
}

impl LunchOption {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Vegan => "Vegan",
            Self::Meat => "Meat",
        }
    }

    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Vegan => "vegan",
            Self::Meat => "meat",
        }
    }
}

impl std::str::FromStr for LunchOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vegan" => Ok(Self::Vegan),
            "meat" => Ok(Self::Meat),
            _ => Err(format!("invalid lunch option: {s}")),
        }
    }
}

/// A lunch dish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LunchDish {
    pub name: &'static str,
    pub description: &'static str,
    pub price: Price,
    pub image: &'static str,
}

/// The two dishes served on one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyLunch {
    pub day: Weekday,
    pub vegan: LunchDish,
    pub meat: LunchDish,
}

impl DailyLunch {
    #[must_use]
    pub const fn dish(&self, option: LunchOption) -> &LunchDish {
        match option {
            LunchOption::Vegan => &self.vegan,
            LunchOption::Meat => &self.meat,
        }
    }
}

/// Lowercase day name used in URLs and element ids, e.g. `monday`.
#[must_use]
pub const fn day_slug(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Capitalized day name, e.g. `Monday`.
#[must_use]
pub const fn day_title(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Customizations attached to a lunch line.
#[must_use]
pub fn lunch_customizations(day: Weekday, option: LunchOption) -> Vec<String> {
    vec![format!("{} Lunch", day_title(day)), option.label().to_string()]
}

const fn dish(name: &'static str, description: &'static str, cents: u32, image: &'static str) -> LunchDish {
    LunchDish {
        name,
        description,
        price: Price::from_cents(cents),
        image,
    }
}

/// The week's lunch menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LunchMenu {
    days: Vec<DailyLunch>,
}

impl LunchMenu {
    #[must_use]
    pub fn new(days: Vec<DailyLunch>) -> Self {
        Self { days }
    }

    /// The house menu, Monday through Sunday.
    #[must_use]
    pub fn weekly() -> Self {
        let day = |day, vegan, meat| DailyLunch { day, vegan, meat };
        Self::new(vec![
            day(
                Weekday::Mon,
                dish("Roasted Veggie Slice", "Zucchini, peppers and vegan mozzarella", 850, "/static/img/lunch/veggie.jpg"),
                dish("Pepperoni Classic", "Double pepperoni with oregano", 950, "/static/img/lunch/pepperoni.jpg"),
            ),
            day(
                Weekday::Tue,
                dish("Spinach Pesto Slice", "Basil pesto, spinach and cherry tomatoes", 850, "/static/img/lunch/pesto.jpg"),
                dish("BBQ Chicken Slice", "Smoky barbecue chicken and red onion", 990, "/static/img/lunch/bbq.jpg"),
            ),
            day(
                Weekday::Wed,
                dish("Mushroom Truffle Slice", "Forest mushrooms with truffle oil", 890, "/static/img/lunch/truffle.jpg"),
                dish("Meatball Marinara", "Beef meatballs in marinara", 990, "/static/img/lunch/meatball.jpg"),
            ),
            day(
                Weekday::Thu,
                dish("Mediterranean Slice", "Olives, artichoke and sun-dried tomato", 850, "/static/img/lunch/mediterranean.jpg"),
                dish("Ham & Pineapple", "Smoked ham and grilled pineapple", 950, "/static/img/lunch/hawaiian.jpg"),
            ),
            day(
                Weekday::Fri,
                dish("Spicy Bean Slice", "Black beans, jalapenos and vegan cheddar", 850, "/static/img/lunch/bean.jpg"),
                dish("Meat Feast", "Pepperoni, ham, sausage and bacon", 1090, "/static/img/lunch/feast.jpg"),
            ),
            day(
                Weekday::Sat,
                dish("Garden Margherita", "Tomato, basil and cashew mozzarella", 800, "/static/img/lunch/margherita.jpg"),
                dish("Spicy Salami Slice", "Hot salami with chili honey", 990, "/static/img/lunch/salami.jpg"),
            ),
            day(
                Weekday::Sun,
                dish("Sweet Potato Slice", "Roasted sweet potato and caramelized onion", 850, "/static/img/lunch/sweet-potato.jpg"),
                dish("Kebab Slice", "Kebab meat with garlic sauce", 990, "/static/img/lunch/kebab.jpg"),
            ),
        ])
    }

    #[must_use]
    pub fn day(&self, day: Weekday) -> Option<&DailyLunch> {
        self.days.iter().find(|d| d.day == day)
    }

    pub fn days(&self) -> impl Iterator<Item = &DailyLunch> {
        self.days.iter()
    }

    /// Put one lunch dish in the cart.
    ///
    /// Returns the dish added, or `None` if the menu has nothing for that day.
    pub fn add_to_cart(&self, cart: &mut Cart, day: Weekday, option: LunchOption) -> Option<&LunchDish> {
        let dish = self.day(day)?.dish(option);
        cart.add(dish.name, dish.price, dish.image, lunch_customizations(day, option));
        Some(dish)
    }
}

impl Default for LunchMenu {
    fn default() -> Self {
        Self::weekly()
    }
}
