//! Render context for tracking state during recursive rendering.

use std::mem;

use tracing::warn;

use crate::interpreter::RenderWarning;
use crate::parser::DEFAULT_MAX_DEPTH;
use crate::types::{Context, Namespace, Value};

/// Render context carrying state through recursive branch rendering.
///
/// The context tracks:
/// - The property values available during rendering
/// - Branch nesting depth, bounded by a maximum
/// - Warnings collected during rendering
pub struct RenderContext<'a> {
    /// Property values for this render call.
    context: &'a Context,
    /// Current branch nesting depth.
    depth: usize,
    /// Maximum allowed depth.
    max_depth: usize,
    /// Warnings collected during rendering, without duplicates.
    warnings: Vec<RenderWarning>,
}

impl<'a> RenderContext<'a> {
    /// Create a render context with the default depth limit.
    pub fn new(context: &'a Context) -> Self {
        Self::with_max_depth(context, DEFAULT_MAX_DEPTH)
    }

    /// Create a render context with a custom depth limit.
    pub fn with_max_depth(context: &'a Context, max_depth: usize) -> Self {
        Self {
            context,
            depth: 0,
            max_depth,
            warnings: Vec::new(),
        }
    }

    /// Look up a property value.
    pub fn get(&self, namespace: Namespace, property: &str) -> Option<&'a Value> {
        self.context.get(namespace, property)
    }

    /// Enter a branch template.
    ///
    /// Returns false, without changing the depth, if the maximum depth has
    /// been reached.
    pub fn enter_branch(&mut self) -> bool {
        if self.depth >= self.max_depth {
            return false;
        }
        self.depth += 1;
        true
    }

    /// Leave a branch template.
    pub fn exit_branch(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Get current branch depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Get the maximum branch depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Record a warning. Each distinct warning is kept and logged once.
    pub fn add_warning(&mut self, warning: RenderWarning) {
        if !self.warnings.contains(&warning) {
            warn!(%warning, "template rendered with fallback");
            self.warnings.push(warning);
        }
    }

    /// Drain all collected warnings from this context.
    pub fn take_warnings(&mut self) -> Vec<RenderWarning> {
        mem::take(&mut self.warnings)
    }

    /// Get a reference to collected warnings.
    pub fn warnings(&self) -> &[RenderWarning] {
        &self.warnings
    }
}
