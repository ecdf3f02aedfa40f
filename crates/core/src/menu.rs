//! Fixed menu of popular creations.

use crate::Price;

/// A ready-made item on the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub name: &'static str,
    pub description: &'static str,
    pub price: Price,
    pub image: &'static str,
}

const fn item(name: &'static str, description: &'static str, cents: u32, image: &'static str) -> MenuItem {
    MenuItem {
        name,
        description,
        price: Price::from_cents(cents),
        image,
    }
}

/// The popular creations carousel, in display order.
pub const POPULAR: [MenuItem; 6] = [
    item("Margherita", "Tomato sauce, mozzarella and fresh basil", 800, "/static/img/menu/margherita.jpg"),
    item("Pepperoni Supreme", "Double pepperoni and mozzarella", 950, "/static/img/menu/pepperoni.jpg"),
    item("Veggie Delight", "Peppers, mushrooms, olives and onion", 900, "/static/img/menu/veggie.jpg"),
    item("BBQ Chicken", "Barbecue sauce, chicken and red onion", 1050, "/static/img/menu/bbq.jpg"),
    item("Hawaiian", "Ham and pineapple", 950, "/static/img/menu/hawaiian.jpg"),
    item("Four Cheese", "Mozzarella, cheddar, parmesan and blue cheese", 1000, "/static/img/menu/four-cheese.jpg"),
];
