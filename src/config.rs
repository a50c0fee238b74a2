//! Compile-time settings shared by the model and the canvas.

/// Local storage key the model is mirrored to.
pub const STORAGE_KEY: &str = "ecoflow-lca";

/// File name offered when exporting the model.
pub const EXPORT_FILE_NAME: &str = "lca-model.json";

/// Node card size in canvas pixels.
pub const NODE_WIDTH: f64 = 180.0;
/// Node card size in canvas pixels.
pub const NODE_HEIGHT: f64 = 70.0;

/// Where the first added node lands.
pub const STAGGER_ORIGIN: (f64, f64) = (60.0, 80.0);
/// Diagonal offset applied per existing node so new cards never stack exactly.
pub const STAGGER_STEP: (f64, f64) = (24.0, 18.0);

/// Canvas size used when the parent element reports nothing useful.
pub const FALLBACK_CANVAS_SIZE: (f64, f64) = (800.0, 520.0);

/// Unit shown next to every impact figure.
pub const IMPACT_UNIT: &str = "kg CO₂e";
