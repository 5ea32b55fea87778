pub mod error;
pub mod llm;
pub mod prompt;
pub mod provider;
pub mod rule_based;

pub use error::{NarrativeError, NarrativeResult};
pub use llm::{LlmConfig, LlmNarrator};
pub use provider::{Narrative, NarrativeGenerator, NarrativeService};
pub use rule_based::RuleBasedNarrator;
