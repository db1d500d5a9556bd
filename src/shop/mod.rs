//! Honor shop and gold arena shop.

pub mod catalog;
pub mod logic;

pub use catalog::{find_shop_item, items_for, ShopCurrency, ShopItem, ShopReward, SHOP_ITEMS};
pub use logic::{buy, Purchase, PurchasedReward};
