//! Entity Contract
//!
//! The only structural requirement placed on stored types.

use serde::{de::DeserializeOwned, Serialize};

/// A record persisted as one document in one collection.
///
/// The identifier is a string assigned by the store on creation and never
/// changed afterwards. An entity created with an empty identifier asks the
/// store to assign one.
///
/// Document adapters key documents by `_id` and hand the stored id back via
/// `set_id`. Renaming the identifier field to `_id` avoids storing it twice:
///
/// ```rust,ignore
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// pub struct Book {
///     #[serde(rename = "_id", default)]
///     pub id: String,
///     pub title: String,
/// }
///
/// impl Entity for Book {
///     fn id(&self) -> &str { &self.id }
///     fn set_id(&mut self, id: String) { self.id = id; }
/// }
/// ```
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Unique identifier of this entity within its collection
    fn id(&self) -> &str;

    /// Replace the identifier (used once the store has assigned one)
    fn set_id(&mut self, id: String);

    /// Name of the entity type, also used as its collection name.
    ///
    /// Defaults to the unqualified type name, e.g. `Book` for
    /// `library::model::Book<Draft>`.
    fn entity_name() -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }
}

fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Book {
        #[serde(rename = "_id", default)]
        id: String,
    }

    impl Entity for Book {
        fn id(&self) -> &str {
            &self.id
        }

        fn set_id(&mut self, id: String) {
            self.id = id;
        }
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Shelf;

    impl Entity for Shelf {
        fn id(&self) -> &str {
            ""
        }

        fn set_id(&mut self, _id: String) {}

        fn entity_name() -> &'static str {
            "bookshelves"
        }
    }

    #[test]
    fn test_entity_name_is_unqualified_type_name() {
        assert_eq!(Book::entity_name(), "Book");
    }

    #[test]
    fn test_entity_name_can_be_overridden() {
        assert_eq!(Shelf::entity_name(), "bookshelves");
    }

    #[test]
    fn test_short_type_name_strips_generics() {
        assert_eq!(short_type_name("library::model::Book<alloc::string::String>"), "Book");
        assert_eq!(short_type_name("Book"), "Book");
    }
}
