use crate::repair::RepairError;
use crate::shape::Mesh;
use crate::transformation::{ConvexHullError, DecompositionError};

/// The reason why an input mesh did not contribute any hull.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The input could not be repaired into a solid.
    #[error("repair failed: {0}")]
    Repair(#[from] RepairError),
    /// The decomposition of the repaired input failed.
    #[error("decomposition failed: {0}")]
    Decomposition(#[from] DecompositionError),
    /// The points of the inputs do not have a convex hull.
    #[error("convex hull failed: {0}")]
    ConvexHull(#[from] ConvexHullError),
}

/// What happened to one input mesh during a generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    /// Hulls were generated from this input.
    Generated {
        /// The index of the input mesh, in registration order.
        input: usize,
        /// The number of hulls generated from this input.
        num_hulls: usize,
    },
    /// This input was skipped.
    Skipped {
        /// The index of the input mesh, in registration order.
        input: usize,
        /// Why this input was skipped.
        reason: SkipReason,
    },
}

impl InputOutcome {
    /// The index of the input mesh this outcome is about.
    pub fn input(&self) -> usize {
        match self {
            InputOutcome::Generated { input, .. } | InputOutcome::Skipped { input, .. } => *input,
        }
    }

    /// Was this input skipped?
    pub fn is_skipped(&self) -> bool {
        matches!(self, InputOutcome::Skipped { .. })
    }
}

/// The result of a collision generation: the hulls and one outcome per input.
///
/// The simple hull is shared by all the inputs: each of them is reported as
/// having generated that single hull.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GenerationReport {
    /// The generated hulls, grouped by input in registration order.
    pub hulls: Vec<Mesh>,
    /// The outcome of every input, in registration order.
    pub outcomes: Vec<InputOutcome>,
}

impl GenerationReport {
    /// The number of inputs that were skipped.
    pub fn num_skipped(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_skipped()).count()
    }

    /// The reasons why inputs were skipped, with the index of the input.
    pub fn skipped(&self) -> impl Iterator<Item = (usize, &SkipReason)> {
        self.outcomes.iter().filter_map(|o| match o {
            InputOutcome::Skipped { input, reason } => Some((*input, reason)),
            InputOutcome::Generated { .. } => None,
        })
    }

    /// The number of hulls generated from the given input.
    pub fn num_hulls_of(&self, input: usize) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o {
                InputOutcome::Generated {
                    input: i,
                    num_hulls,
                } if *i == input => *num_hulls,
                _ => 0,
            })
            .sum()
    }
}
