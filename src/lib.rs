pub mod adjuster;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod markup;
pub mod normalizer;

// Re-export main types for convenient access
pub use config::{ConfigError, LanguageConfig, LanguageSpec, NonAlphaKind, NonAlphaSpec};
pub use engine::{transform, RunWrapEngine};

// Re-export the component layer for callers composing their own pipeline
pub use adjuster::NumberAdjuster;
pub use classifier::CharacterClassifier;
pub use markup::{parse_children, MalformedMarkup, Node};
pub use normalizer::BoundaryNormalizer;
