/// JSON-facing stage description.
pub mod model;
/// Prepared stage: wave background plus walking sprites on one canvas.
pub mod stage;
