pub mod lead_submission;
pub mod name_parts;

pub use lead_submission::LeadSubmission;
pub use name_parts::NameParts;
