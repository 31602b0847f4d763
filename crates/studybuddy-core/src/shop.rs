//! Shop catalog and purchase engine.
//!
//! Purchases are all-or-nothing: every precondition is checked before the
//! balance is touched, and the debit plus the item grant happen together.
//! Buying a theme or a music track equips it immediately.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::EconomyError;
use crate::profile::Profile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Theme,
    Music,
    Decoration,
}

impl ItemCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemCategory::Theme => "theme",
            ItemCategory::Music => "music",
            ItemCategory::Decoration => "decoration",
        }
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: u32,
    pub category: ItemCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_ref: Option<String>,
}

impl ShopItem {
    fn new(id: &str, name: &str, description: &str, price: u32, category: ItemCategory) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            price,
            category,
            preview_ref: None,
        }
    }

    fn with_preview(mut self, preview: &str) -> Self {
        self.preview_ref = Some(preview.to_string());
        self
    }

    pub fn is_equippable(&self) -> bool {
        matches!(self.category, ItemCategory::Theme | ItemCategory::Music)
    }
}

/// Static item catalog. Read-only at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    items: Vec<ShopItem>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seeded()
    }
}

impl Catalog {
    /// Build a catalog. Items priced at zero are dropped: every item must cost
    /// at least one coin.
    pub fn new(items: Vec<ShopItem>) -> Self {
        let mut catalog = Self { items };
        catalog.normalize();
        catalog
    }

    /// Drop unpriced items from a catalog read back from storage.
    pub(crate) fn normalize(&mut self) {
        self.items.retain(|item| {
            if item.price == 0 {
                warn!(item_id = %item.id, "dropping catalog item without a price");
            }
            item.price > 0
        });
    }

    /// The built-in catalog shipped with a fresh install.
    pub fn seeded() -> Self {
        Self::new(vec![
            ShopItem::new(
                "theme-ocean",
                "Ocean Theme",
                "Calming blue waves background",
                10,
                ItemCategory::Theme,
            )
            .with_preview("https://images.unsplash.com/photo-1505142468610-359e7d316be0"),
            ShopItem::new(
                "theme-forest",
                "Forest Theme",
                "Peaceful green forest vibes",
                8,
                ItemCategory::Theme,
            )
            .with_preview("https://images.unsplash.com/photo-1511497584788-876760111969"),
            ShopItem::new(
                "music-lofi",
                "Lo-Fi Study Mix",
                "Chill beats for studying",
                5,
                ItemCategory::Music,
            ),
            ShopItem::new(
                "music-classical",
                "Classical Focus",
                "Mozart & Bach for concentration",
                5,
                ItemCategory::Music,
            ),
            ShopItem::new(
                "decoration-plants",
                "Virtual Plants",
                "Add some greenery to your calendar",
                7,
                ItemCategory::Decoration,
            ),
        ])
    }

    pub fn items(&self) -> &[ShopItem] {
        &self.items
    }

    pub fn get(&self, item_id: &str) -> Option<&ShopItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    pub fn by_category(&self, category: ItemCategory) -> impl Iterator<Item = &ShopItem> {
        self.items.iter().filter(move |i| i.category == category)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseReceipt {
    pub item_id: String,
    pub price: u32,
    pub balance: u32,
    /// Set when the purchase also equipped the item.
    pub equipped: Option<ItemCategory>,
}

/// Buy `item_id` for `profile`.
///
/// # Errors
/// `UnknownItem`, `AlreadyOwned` or `InsufficientFunds`, checked in that
/// order. The profile is unchanged on any error.
pub fn purchase(
    profile: &mut Profile,
    catalog: &Catalog,
    item_id: &str,
) -> Result<PurchaseReceipt, EconomyError> {
    let item = catalog.get(item_id).ok_or_else(|| EconomyError::UnknownItem {
        item_id: item_id.to_string(),
    })?;

    if profile.owns(item_id) {
        debug!(item_id, "purchase rejected: already owned");
        return Err(EconomyError::AlreadyOwned {
            item_id: item_id.to_string(),
        });
    }

    let balance = profile.debit_coins(i64::from(item.price)).inspect_err(|e| {
        debug!(item_id, error = %e, "purchase rejected");
    })?;
    profile.purchased_items.insert(item.id.clone());
    let equipped = equip_slot(profile, item);

    info!(item_id, price = item.price, balance, "item purchased");

    Ok(PurchaseReceipt {
        item_id: item.id.clone(),
        price: item.price,
        balance,
        equipped,
    })
}

/// Select an already owned theme or music item.
///
/// # Errors
/// `UnknownItem`, `NotOwned`, or `NotEquippable` for decorations.
pub fn equip(profile: &mut Profile, catalog: &Catalog, item_id: &str) -> Result<ItemCategory, EconomyError> {
    let item = catalog.get(item_id).ok_or_else(|| EconomyError::UnknownItem {
        item_id: item_id.to_string(),
    })?;
    if !profile.owns(item_id) {
        return Err(EconomyError::NotOwned {
            item_id: item_id.to_string(),
        });
    }
    let category = equip_slot(profile, item).ok_or_else(|| EconomyError::NotEquippable {
        item_id: item_id.to_string(),
    })?;
    info!(item_id, %category, "item equipped");
    Ok(category)
}

/// True if `item_id` may be selected into the `category` slot.
pub fn can_select(profile: &Profile, catalog: &Catalog, item_id: &str, category: ItemCategory) -> bool {
    profile.owns(item_id) && catalog.get(item_id).is_some_and(|i| i.category == category)
}

fn equip_slot(profile: &mut Profile, item: &ShopItem) -> Option<ItemCategory> {
    match item.category {
        ItemCategory::Theme => {
            profile.selected_theme = Some(item.id.clone());
            Some(ItemCategory::Theme)
        }
        ItemCategory::Music => {
            profile.selected_music = Some(item.id.clone());
            Some(ItemCategory::Music)
        }
        ItemCategory::Decoration => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn profile_with(coins: u32) -> Profile {
        let mut profile = Profile::default();
        profile.coins = coins;
        profile
    }

    #[test]
    fn seeded_catalog_has_five_items() {
        let catalog = Catalog::seeded();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.get("music-lofi").unwrap().price, 5);
        assert_eq!(catalog.by_category(ItemCategory::Theme).count(), 2);
    }

    #[test]
    fn purchase_debits_grants_and_equips() {
        let catalog = Catalog::seeded();
        let mut profile = profile_with(11);

        let receipt = purchase(&mut profile, &catalog, "music-lofi").unwrap();

        assert_eq!(receipt.balance, 6);
        assert_eq!(receipt.equipped, Some(ItemCategory::Music));
        assert_eq!(profile.coins(), 6);
        assert!(profile.owns("music-lofi"));
        assert_eq!(profile.selected_music(), Some("music-lofi"));
        assert_eq!(profile.selected_theme(), None);
    }

    #[test]
    fn decorations_are_not_equipped() {
        let catalog = Catalog::seeded();
        let mut profile = profile_with(20);

        let receipt = purchase(&mut profile, &catalog, "decoration-plants").unwrap();

        assert_eq!(receipt.equipped, None);
        assert_eq!(profile.selected_theme(), None);
        assert_eq!(profile.selected_music(), None);
        assert_eq!(
            equip(&mut profile, &catalog, "decoration-plants"),
            Err(EconomyError::NotEquippable { item_id: "decoration-plants".into() })
        );
    }

    #[test]
    fn unaffordable_purchase_changes_nothing() {
        let catalog = Catalog::new(vec![ShopItem::new(
            "theme-space",
            "Space",
            "Stars",
            20,
            ItemCategory::Theme,
        )]);
        let mut profile = profile_with(15);
        let before = profile.clone();

        let err = purchase(&mut profile, &catalog, "theme-space").unwrap_err();

        assert_eq!(err, EconomyError::InsufficientFunds { balance: 15, required: 20 });
        assert_eq!(profile, before);
    }

    #[test]
    fn second_purchase_is_rejected_without_debit() {
        let catalog = Catalog::seeded();
        let mut profile = profile_with(30);

        purchase(&mut profile, &catalog, "theme-forest").unwrap();
        let err = purchase(&mut profile, &catalog, "theme-forest").unwrap_err();

        assert_eq!(err, EconomyError::AlreadyOwned { item_id: "theme-forest".into() });
        assert_eq!(profile.coins(), 22);
        assert_eq!(profile.purchased_items().len(), 1);
    }

    #[test]
    fn unknown_item_is_rejected() {
        let catalog = Catalog::seeded();
        let mut profile = profile_with(100);
        assert_eq!(
            purchase(&mut profile, &catalog, "theme-lava"),
            Err(EconomyError::UnknownItem { item_id: "theme-lava".into() })
        );
        assert_eq!(profile.coins(), 100);
    }

    #[test]
    fn unpriced_items_never_reach_the_catalog() {
        let catalog = Catalog::new(vec![
            ShopItem::new("free", "Free Sticker", "Costs nothing", 0, ItemCategory::Decoration),
            ShopItem::new("music-rain", "Rain Sounds", "Soft rain", 3, ItemCategory::Music),
        ]);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("free").is_none());

        let mut profile = profile_with(10);
        assert_eq!(
            purchase(&mut profile, &catalog, "free"),
            Err(EconomyError::UnknownItem { item_id: "free".into() })
        );
        assert_eq!(profile.coins(), 10);
    }

    #[test]
    fn equip_switches_between_owned_themes() {
        let catalog = Catalog::seeded();
        let mut profile = profile_with(30);
        purchase(&mut profile, &catalog, "theme-ocean").unwrap();
        purchase(&mut profile, &catalog, "theme-forest").unwrap();
        assert_eq!(profile.selected_theme(), Some("theme-forest"));

        assert_eq!(equip(&mut profile, &catalog, "theme-ocean"), Ok(ItemCategory::Theme));
        assert_eq!(profile.selected_theme(), Some("theme-ocean"));
        assert_eq!(
            equip(&mut profile, &catalog, "music-lofi"),
            Err(EconomyError::NotOwned { item_id: "music-lofi".into() })
        );
    }

    proptest! {
        #[test]
        fn purchased_set_only_grows(ids in proptest::collection::vec(0usize..6, 0..30), coins in 0u32..60) {
            let catalog = Catalog::seeded();
            let mut profile = profile_with(coins);
            let all: Vec<String> = catalog.items().iter().map(|i| i.id.clone()).chain(["missing".to_string()]).collect();

            for idx in ids {
                let before = profile.purchased_items().clone();
                let coins_before = profile.coins();
                match purchase(&mut profile, &catalog, &all[idx]) {
                    Ok(receipt) => {
                        prop_assert!(before.is_subset(profile.purchased_items()));
                        prop_assert_eq!(profile.coins() + receipt.price, coins_before);
                    }
                    Err(_) => {
                        prop_assert_eq!(&before, profile.purchased_items());
                        prop_assert_eq!(profile.coins(), coins_before);
                    }
                }
            }
        }
    }
}
