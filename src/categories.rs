//! Known object goal categories.
//!
//! The category set mirrors the COCO subset the semantic segmentation model
//! is trained on; category ids index the semantic map channels (offset by
//! [`crate::semantic_map::CATEGORY_CHANNEL_BASE`]).

/// Index of a category within the known set.
pub type CategoryId = usize;

/// Category names, in channel order.
pub const CATEGORIES: &[&str] = &[
    "chair",
    "couch",
    "potted plant",
    "bed",
    "toilet",
    "tv",
    "dining-table",
    "oven",
    "sink",
    "refrigerator",
    "book",
    "clock",
    "vase",
    "cup",
    "bottle",
    "no-category",
];

/// Look up a category id by name.
pub fn category_id(name: &str) -> Option<CategoryId> {
    CATEGORIES.iter().position(|c| *c == name)
}

/// Look up a category name by id.
pub fn category_name(id: CategoryId) -> Option<&'static str> {
    CATEGORIES.get(id).copied()
}

/// Number of known categories (including the no-category sentinel).
pub fn num_categories() -> usize {
    CATEGORIES.len()
}
