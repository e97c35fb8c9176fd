//! Filter trees over the inventory collection.
//!
//! A filter is built once by the query layer and then either evaluated in
//! process (`matches`) or compiled to SQL by the Postgres collection. Both
//! evaluations must agree.

use chrono::{DateTime, Utc};

use stockroom_core::OwnerId;
use stockroom_inventory::Item;

/// Text fields that free-text search looks at.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SearchField {
    Name,
    Description,
    Drawing,
}

impl SearchField {
    pub const ALL: [SearchField; 3] = [SearchField::Name, SearchField::Description, SearchField::Drawing];

    pub fn column(&self) -> &'static str {
        match self {
            SearchField::Name => "name",
            SearchField::Description => "description",
            SearchField::Drawing => "drawing",
        }
    }

    fn value<'a>(&self, item: &'a Item) -> &'a str {
        match self {
            SearchField::Name => &item.name,
            SearchField::Description => &item.description,
            SearchField::Drawing => &item.drawing,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemFilter {
    /// Matches every document.
    All,
    OwnerIs(OwnerId),
    /// Case-insensitive literal substring match.
    Contains { field: SearchField, term: String },
    /// `updated_at < cutoff`; documents never written do not match.
    UpdatedBefore(DateTime<Utc>),
    /// Empty `And` matches everything.
    And(Vec<ItemFilter>),
    /// Empty `Or` matches nothing.
    Or(Vec<ItemFilter>),
}

impl ItemFilter {
    pub fn owner(owner_id: &OwnerId) -> Self {
        ItemFilter::OwnerIs(owner_id.clone())
    }

    /// `owner_id == owner AND (name ~ term OR description ~ term OR drawing ~ term)`.
    pub fn owner_search(owner_id: &OwnerId, term: &str) -> Self {
        let any_field = SearchField::ALL
            .iter()
            .map(|field| ItemFilter::Contains {
                field: *field,
                term: term.to_string(),
            })
            .collect();

        ItemFilter::And(vec![ItemFilter::owner(owner_id), ItemFilter::Or(any_field)])
    }

    pub fn updated_before(cutoff: DateTime<Utc>) -> Self {
        ItemFilter::UpdatedBefore(cutoff)
    }

    pub fn matches(&self, item: &Item) -> bool {
        match self {
            ItemFilter::All => true,
            ItemFilter::OwnerIs(owner_id) => item.owner_id == *owner_id,
            ItemFilter::Contains { field, term } => field
                .value(item)
                .to_lowercase()
                .contains(&term.to_lowercase()),
            ItemFilter::UpdatedBefore(cutoff) => item.updated_at.is_some_and(|at| at < *cutoff),
            ItemFilter::And(parts) => parts.iter().all(|f| f.matches(item)),
            ItemFilter::Or(parts) => parts.iter().any(|f| f.matches(item)),
        }
    }
}

/// Escape `LIKE` metacharacters so the term matches literally, then wrap it
/// for a substring match.
pub fn like_pattern(term: &str) -> String {
    let mut out = String::with_capacity(term.len() + 2);
    out.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::ItemId;
    use stockroom_inventory::ItemStatus;

    fn item(owner: &str, name: &str, description: &str, drawing: &str) -> Item {
        Item {
            id: ItemId::new(),
            name: name.to_string(),
            description: description.to_string(),
            drawing: drawing.to_string(),
            quantity: 1,
            status: ItemStatus::Active,
            owner_id: OwnerId::new(owner),
            updated_at: None,
        }
    }

    #[test]
    fn owner_search_requires_owner_and_any_field() {
        let filter = ItemFilter::owner_search(&OwnerId::new("u1"), "BOLT");

        assert!(filter.matches(&item("u1", "Bolt M6x30", "", "")));
        assert!(filter.matches(&item("u1", "Thing", "m6 size bolt", "")));
        assert!(filter.matches(&item("u1", "Thing", "", "hardware/bolt_m6.dwg")));
        assert!(!filter.matches(&item("u2", "Bolt M6x30", "", "")));
        assert!(!filter.matches(&item("u1", "Cube", "A 6 sided shape", "cube.dwg")));
    }

    #[test]
    fn search_term_is_literal() {
        let filter = ItemFilter::owner_search(&OwnerId::new("u1"), "m.x");
        assert!(!filter.matches(&item("u1", "M6x30", "", "")));
        assert!(filter.matches(&item("u1", "M.X", "", "")));
    }

    #[test]
    fn updated_before_skips_unwritten_items() {
        let cutoff = Utc::now();
        let filter = ItemFilter::updated_before(cutoff);

        let mut old = item("u1", "Old", "", "");
        old.updated_at = Some(cutoff - chrono::Duration::days(1));
        let mut exact = item("u1", "Exact", "", "");
        exact.updated_at = Some(cutoff);
        let never = item("u1", "Never", "", "");

        assert!(filter.matches(&old));
        assert!(!filter.matches(&exact));
        assert!(!filter.matches(&never));
    }

    #[test]
    fn empty_combinators() {
        let any = item("u1", "x", "", "");
        assert!(ItemFilter::And(vec![]).matches(&any));
        assert!(!ItemFilter::Or(vec![]).matches(&any));
    }

    #[test]
    fn like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("bolt"), "%bolt%");
        assert_eq!(like_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }
}
