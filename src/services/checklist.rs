//! Shipment checklist template.
//!
//! New checklists either instantiate the standard shipment template or
//! carry caller-supplied custom items. Item codes are fixed at creation;
//! only result, notes, and photos change afterwards.

use crate::models::NewCheckItem;

/// Maximum number of items a single checklist may carry.
pub const MAX_ITEMS: usize = 100;

struct TemplateItem {
    category_code: &'static str,
    item_code: &'static str,
    label: &'static str,
    photo_required: bool,
}

/// Standard pre-shipment inspection items.
const SHIPMENT_TEMPLATE: &[TemplateItem] = &[
    TemplateItem {
        category_code: "appearance",
        item_code: "APP-01",
        label: "No scratches, dents, or rust on mold surfaces",
        photo_required: true,
    },
    TemplateItem {
        category_code: "appearance",
        item_code: "APP-02",
        label: "Nameplate and mold code engraving legible",
        photo_required: true,
    },
    TemplateItem {
        category_code: "structure",
        item_code: "STR-01",
        label: "All cavities and cores free of damage",
        photo_required: true,
    },
    TemplateItem {
        category_code: "structure",
        item_code: "STR-02",
        label: "Ejector plate moves through full stroke",
        photo_required: false,
    },
    TemplateItem {
        category_code: "structure",
        item_code: "STR-03",
        label: "Cooling lines blown out and plugged",
        photo_required: false,
    },
    TemplateItem {
        category_code: "structure",
        item_code: "STR-04",
        label: "Slides and lifters greased and secured",
        photo_required: false,
    },
    TemplateItem {
        category_code: "structure",
        item_code: "STR-05",
        label: "Hot runner wiring continuity checked",
        photo_required: false,
    },
    TemplateItem {
        category_code: "shipping",
        item_code: "SHP-01",
        label: "Mold closed and clamped for transport",
        photo_required: true,
    },
    TemplateItem {
        category_code: "shipping",
        item_code: "SHP-02",
        label: "Anti-rust coating applied",
        photo_required: false,
    },
    TemplateItem {
        category_code: "shipping",
        item_code: "SHP-03",
        label: "Packing list and spare parts included",
        photo_required: false,
    },
];

/// Instantiate the standard shipment template.
pub fn shipment_template_items() -> Vec<NewCheckItem> {
    SHIPMENT_TEMPLATE
        .iter()
        .map(|t| NewCheckItem {
            category_code: t.category_code.to_string(),
            item_code: t.item_code.to_string(),
            label: t.label.to_string(),
            photo_required: t.photo_required,
        })
        .collect()
}

/// Validate caller-supplied custom items. Empty means valid.
pub fn validate_custom_items(items: &[NewCheckItem]) -> Vec<String> {
    let mut errors = Vec::new();

    if items.is_empty() {
        errors.push("at least one item is required".to_string());
        return errors;
    }

    if items.len() > MAX_ITEMS {
        errors.push(format!("a checklist may have at most {} items", MAX_ITEMS));
    }

    let mut seen = std::collections::HashSet::new();
    for (index, item) in items.iter().enumerate() {
        let code = item.item_code.trim();
        if code.is_empty() {
            errors.push(format!("item {} has an empty item_code", index));
            continue;
        }
        if !seen.insert(code.to_string()) {
            errors.push(format!("duplicate item_code '{}'", code));
        }
        if item.category_code.trim().is_empty() {
            errors.push(format!("item '{}' has an empty category_code", code));
        }
        if item.label.trim().is_empty() {
            errors.push(format!("item '{}' has an empty label", code));
        }
    }

    errors
}
