// Resume analysis API: remote structured extraction, local topic modeling, PDF text extraction.
// Remote calls go through llm_client::TextGenerator only.

pub mod handlers;
pub mod pdf;
pub mod prompts;
