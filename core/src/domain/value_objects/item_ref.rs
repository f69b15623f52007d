//! Typed reference to a reviewable item.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference to the item a review targets.
///
/// Serialized as `{ "item_type": "listing", "item_id": "..." }` to keep the
/// wire shape flat; in code the variant carries the id so authorization
/// decisions are an explicit match rather than a string comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "item_type", content = "item_id", rename_all = "lowercase")]
pub enum ItemRef {
    /// A stay listing, owned by its host
    Listing(Uuid),
    /// A bookable experience
    Experience(Uuid),
    /// A provider service
    Service(Uuid),
}

impl ItemRef {
    /// The referenced item's id, whatever its type.
    pub fn item_id(&self) -> Uuid {
        match self {
            ItemRef::Listing(id) | ItemRef::Experience(id) | ItemRef::Service(id) => *id,
        }
    }

    /// Stable type tag used in storage.
    pub fn type_tag(&self) -> &'static str {
        match self {
            ItemRef::Listing(_) => "listing",
            ItemRef::Experience(_) => "experience",
            ItemRef::Service(_) => "service",
        }
    }

    /// Reconstructs a reference from its storage representation.
    pub fn from_parts(type_tag: &str, item_id: Uuid) -> Option<Self> {
        match type_tag {
            "listing" => Some(ItemRef::Listing(item_id)),
            "experience" => Some(ItemRef::Experience(item_id)),
            "service" => Some(ItemRef::Service(item_id)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_shape() {
        let id = Uuid::new_v4();
        let json = serde_json::to_value(ItemRef::Listing(id)).unwrap();
        assert_eq!(json["item_type"], "listing");
        assert_eq!(json["item_id"], id.to_string());
    }

    #[test]
    fn test_roundtrip_from_parts() {
        let id = Uuid::new_v4();
        for item in [
            ItemRef::Listing(id),
            ItemRef::Experience(id),
            ItemRef::Service(id),
        ] {
            let rebuilt = ItemRef::from_parts(item.type_tag(), item.item_id());
            assert_eq!(rebuilt, Some(item));
        }
        assert_eq!(ItemRef::from_parts("villa", id), None);
    }
}
