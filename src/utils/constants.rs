/// Compass labels for the six facing slots of a directional sheet.
pub static DIRECTION_LABELS: &[&str] = &["ne", "e", "se", "sw", "w", "nw"];

/// Label used for sheets whose layout has no direction concept.
pub static SINGLE_DIRECTION_LABEL: &str = "N";
