//! Service layer: contrast math, scale generation, the alias graph, the
//! variable registry, the layer pipeline and the rule engine.

pub mod alias_graph;
pub mod contrast;
pub mod layers;
pub mod pipeline;
pub mod registry;
pub mod rule_engine;
pub mod scales;
pub mod validation;

// Re-export commonly used types and functions
pub use alias_graph::{AliasError, AliasGraph};
pub use pipeline::{
    generate, GenerationContext, GenerationOutput, GenerationStatistics, GenerationSummary,
    Pipeline, PipelineOptions,
};
pub use registry::{ChainError, VariableRegistry};
pub use rule_engine::{EvaluationMode, EvaluationStep, RuleEngine, RuleEvaluation, StepStatus};
pub use scales::{generate_all_scales, ScaleGenerator, ScaleSet};
pub use validation::{ValidationError, ValidationErrorKind, ValidationReport, ValidationWarning};
