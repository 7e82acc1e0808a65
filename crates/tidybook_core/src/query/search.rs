//! Case-insensitive substring search.
//!
//! Blank query text means "no filtering", never "match nothing".

use crate::model::contact::Contact;
use crate::model::task::Task;

/// Records that can be matched against folded query text.
pub trait Searchable {
    /// `folded` is trimmed, lowercased and never empty.
    fn matches_text(&self, folded: &str) -> bool;
}

impl Searchable for Contact {
    /// Name is compared case-insensitively, phone as stored.
    fn matches_text(&self, folded: &str) -> bool {
        self.name.to_lowercase().contains(folded) || self.phone.contains(folded)
    }
}

impl Searchable for Task {
    fn matches_text(&self, folded: &str) -> bool {
        self.description.to_lowercase().contains(folded)
    }
}

/// Normalizes query text; `None` means the query does not filter.
pub fn fold_query(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_lowercase())
}

/// Returns records matching `text`, in collection order.
pub fn search<R>(collection: &[R], text: &str) -> Vec<R>
where
    R: Searchable + Clone,
{
    let Some(folded) = fold_query(text) else {
        return collection.to_vec();
    };
    collection
        .iter()
        .filter(|record| record.matches_text(&folded))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{fold_query, search};
    use crate::model::contact::Contact;

    #[test]
    fn fold_query_treats_blank_as_unfiltered() {
        assert_eq!(fold_query(""), None);
        assert_eq!(fold_query("   "), None);
        assert_eq!(fold_query(" ÄL "), Some("äl".to_string()));
    }

    #[test]
    fn contact_search_matches_phone_substring() {
        let contacts = vec![
            Contact::new("Alice", "555-0101"),
            Contact::new("Bob", "555-0199"),
        ];

        let hits = search(&contacts, "0199");

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Bob");
    }
}
