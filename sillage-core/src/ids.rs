//! String-backed identifiers for catalogue entities.
//!
//! Identifiers are opaque: the core never inspects their contents beyond
//! equality and ordering.

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize),
            serde(transparent)
        )]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw identifier.
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Borrow the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self::new(raw)
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self(raw)
            }
        }
    };
}

string_id!(
    /// Identity of an ingredient-level note.
    NoteId
);
string_id!(
    /// Identity of a perceptual accord such as `citrus` or `powdery`.
    AccordId
);
string_id!(
    /// Identity of a fragrance in the catalogue.
    FragranceId
);
string_id!(
    /// Identity of the person whose ratings build a profile.
    ReviewerId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_their_raw_value() {
        let id = NoteId::from("bergamot");
        assert_eq!(id.to_string(), "bergamot");
        assert_eq!(id.as_str(), "bergamot");
    }

    #[test]
    fn ids_order_lexically() {
        let mut ids = vec![AccordId::from("woody"), AccordId::from("citrus")];
        ids.sort();
        assert_eq!(ids, vec![AccordId::from("citrus"), AccordId::from("woody")]);
    }
}
