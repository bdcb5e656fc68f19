use std::fmt;

use uuid::Uuid;

use lifedash_domain::{Category, CategoryType, Item};

/// Ordering applied inside one category's item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemSort {
    /// Newest first.
    #[default]
    DateAdded,
    /// Ascending rank; unranked items last.
    Rank,
}

impl ItemSort {
    /// Rank only applies to rank-supporting category types.
    pub fn effective_for(self, category_type: CategoryType) -> ItemSort {
        match self {
            ItemSort::Rank if category_type.supports_rank() => ItemSort::Rank,
            _ => ItemSort::DateAdded,
        }
    }

    fn apply(self, items: &mut [&Item]) {
        match self {
            ItemSort::DateAdded => items.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            ItemSort::Rank => items.sort_by_key(|item| item.rank_sort_key()),
        }
    }
}

impl fmt::Display for ItemSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemSort::DateAdded => f.write_str("Date added"),
            ItemSort::Rank => f.write_str("Rank"),
        }
    }
}

/// Sort choices offered for the current selection.
pub fn sort_options(selected: Option<&Category>) -> Vec<ItemSort> {
    match selected {
        Some(category) if category.category_type.supports_rank() => {
            vec![ItemSort::DateAdded, ItemSort::Rank]
        }
        _ => vec![ItemSort::DateAdded],
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemGroup<'a> {
    pub category: &'a Category,
    pub items: Vec<&'a Item>,
}

/// The generic item gallery, grouped by category.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemGrid<'a> {
    pub selected: Option<&'a Category>,
    pub sort: ItemSort,
    pub groups: Vec<ItemGroup<'a>>,
}

impl<'a> ItemGrid<'a> {
    /// With a selection only that category is shown, even when empty; an
    /// unknown selection shows nothing. Without one every non-empty category
    /// is shown in creation order.
    pub fn build(
        categories: &'a [Category],
        items: &'a [Item],
        selected: Option<Uuid>,
        sort: ItemSort,
    ) -> Self {
        let requested = selected.is_some();
        let selected = selected.and_then(|id| categories.iter().find(|c| c.id == id));

        let mut ordered: Vec<&Category> = match (requested, selected) {
            (_, Some(category)) => vec![category],
            (true, None) => Vec::new(),
            (false, None) => categories.iter().collect(),
        };
        ordered.sort_by_key(|category| category.created_at);

        let groups = ordered
            .into_iter()
            .filter_map(|category| {
                let mut members: Vec<&Item> = items
                    .iter()
                    .filter(|item| item.category_id == category.id)
                    .collect();
                if members.is_empty() && !requested {
                    return None;
                }
                sort.effective_for(category.category_type)
                    .apply(&mut members);
                Some(ItemGroup {
                    category,
                    items: members,
                })
            })
            .collect();

        Self {
            selected,
            sort,
            groups,
        }
    }

    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|group| group.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }
}
