use crate::{inventory::InventoryItem, product::Product};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Price,
    Stock,
}

impl SortKey {
    pub fn from_choice(choice: i64) -> Option<Self> {
        match choice {
            1 => Some(SortKey::Price),
            2 => Some(SortKey::Stock),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Price => "price",
            SortKey::Stock => "stock",
        }
    }

    pub fn comparator(&self) -> fn(&Product, &Product) -> Ordering {
        match self {
            SortKey::Price => by_price,
            SortKey::Stock => by_stock,
        }
    }
}

/// Unstable in-place sort; equal keys may come out in any order.
pub fn sort_items<T, F>(items: &mut [T], compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    items.sort_unstable_by(compare);
}

pub fn by_price(a: &Product, b: &Product) -> Ordering {
    a.price().total_cmp(&b.price())
}

pub fn by_stock(a: &Product, b: &Product) -> Ordering {
    a.stock().cmp(&b.stock())
}

#[allow(dead_code)]
pub fn by_quantity(a: &InventoryItem, b: &InventoryItem) -> Ordering {
    a.quantity().cmp(&b.quantity())
}
