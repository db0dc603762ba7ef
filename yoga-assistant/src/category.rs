//! Query categorization.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use yoga_model::{Llm, Message};

/// Topic of a yoga question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Asana,
    Pranayama,
    Philosophy,
    #[serde(rename = "Benefits/Contraindications")]
    BenefitsContraindications,
    General,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Asana,
        Category::Pranayama,
        Category::Philosophy,
        Category::BenefitsContraindications,
        Category::General,
    ];

    /// Display label, as stored in interaction logs.
    pub fn label(self) -> &'static str {
        match self {
            Category::Asana => "Asana",
            Category::Pranayama => "Pranayama",
            Category::Philosophy => "Philosophy",
            Category::BenefitsContraindications => "Benefits/Contraindications",
            Category::General => "General",
        }
    }

    /// Read a category out of a free-form model reply.
    ///
    /// Only the first non-empty line is considered. List markers, markdown
    /// emphasis and a leading `Category:` are ignored, as is anything after
    /// the label such as `Asana (Poses)`. Anything unrecognized is `General`.
    pub fn parse_reply(reply: &str) -> Category {
        let Some(line) = reply.lines().map(str::trim).find(|l| !l.is_empty()) else {
            return Category::General;
        };

        let line = line.trim_start_matches(['-', '*', '•', ' ']).replace("**", "");
        let lower = line.trim().to_lowercase();
        let lower = lower.strip_prefix("category:").map(str::trim).unwrap_or(&lower);

        if lower.starts_with("asana") {
            Category::Asana
        } else if lower.starts_with("pranayama") {
            Category::Pranayama
        } else if lower.starts_with("philosophy") {
            Category::Philosophy
        } else if lower.starts_with("benefits") || lower.starts_with("contraindications") {
            Category::BenefitsContraindications
        } else {
            Category::General
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Prompt sent to the model to classify `query`.
pub fn categorize_prompt(query: &str) -> String {
    format!(
        "Categorize this yoga query into ONE:\n\
         - Asana (Poses)\n\
         - Pranayama (Breathing)\n\
         - Philosophy\n\
         - Benefits/Contraindications\n\
         - General\n\n\
         Query: {query}\n\
         Category:"
    )
}

/// Classifies queries with one model call, falling back to [`Category::General`].
pub struct Categorizer {
    llm: Arc<dyn Llm>,
    timeout: Duration,
}

impl Categorizer {
    pub fn new(llm: Arc<dyn Llm>, timeout: Duration) -> Self {
        Self { llm, timeout }
    }

    /// Never fails. Timeouts, model errors and unknown replies yield `General`.
    pub async fn categorize(&self, query: &str) -> Category {
        let messages = vec![Message::user(categorize_prompt(query))];
        match tokio::time::timeout(self.timeout, self.llm.invoke(messages)).await {
            Ok(Ok(reply)) => {
                let category = Category::parse_reply(&reply);
                debug!(%category, "categorized query");
                category
            }
            Ok(Err(e)) => {
                warn!(error = %e, "categorization failed, using General");
                Category::General
            }
            Err(_) => {
                warn!(timeout_ms = self.timeout.as_millis() as u64, "categorization timed out, using General");
                Category::General
            }
        }
    }
}
