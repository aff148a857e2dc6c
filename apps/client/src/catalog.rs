//! Model catalog — the fixed list of AI models the customization service accepts.
//!
//! Ids are sent verbatim to the service in the `model_name` part. Availability
//! is a client-side concern only; the service does not validate it.

use serde::Serialize;

/// A single selectable model.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ModelOption {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub available: bool,
}

/// The catalog is fixed at compile time. The first entry is the startup
/// default and must stay available.
pub const MODEL_CATALOG: &[ModelOption] = &[
    ModelOption {
        id: "aws-bedrock",
        name: "AWS Bedrock",
        description: "Claude v3 Sonnet",
        available: true,
    },
    ModelOption {
        id: "llama",
        name: "Llama 2",
        description: "70B Chat",
        available: false,
    },
    ModelOption {
        id: "google",
        name: "Google AI Studio",
        description: "Gemini Pro",
        available: false,
    },
    ModelOption {
        id: "openai",
        name: "OpenAI",
        description: "GPT-4",
        available: false,
    },
    ModelOption {
        id: "anthropic",
        name: "Anthropic",
        description: "Claude v3 Opus",
        available: true,
    },
];

/// Looks up a catalog entry by id.
pub fn find(id: &str) -> Option<&'static ModelOption> {
    MODEL_CATALOG.iter().find(|option| option.id == id)
}

/// The model selected when the form starts.
pub fn default_model() -> &'static ModelOption {
    &MODEL_CATALOG[0]
}
