pub mod draft;
pub mod fields;
pub mod workflow;

pub use draft::{FormRules, HitDraft, HitEvent, NumericField};
pub use workflow::{Step, SubmitError, WorkflowState};
