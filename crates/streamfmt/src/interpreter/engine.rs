//! The rendering engine: configuration, caches and entry points.
//!
//! The Engine struct owns the formatter registry and the shared caches, and
//! provides the user-facing API for parsing, rendering and linting templates.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use bon::Builder;
use tracing::debug;

use crate::definition::{
    CompiledFormatter, DefinitionError, DefinitionField, FormatterDefinition, RenderedStream,
};
use crate::interpreter::lint::lint_template;
use crate::interpreter::{
    FormatterRegistry, LintWarning, RegexCache, RenderContext, RenderWarning, render_template,
};
use crate::parser::ast::Template;
use crate::parser::{DEFAULT_MAX_DEPTH, ParseError, parse_template_with_depth};
use crate::types::{Context, TemplateId};

/// Default number of parsed templates kept before the cache is cleared.
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// A cached parse, keyed by [`TemplateId`].
///
/// The source is kept so a hash collision is detected rather than served.
#[derive(Debug)]
struct CachedTemplate {
    source: String,
    template: Arc<Template>,
}

/// Parses, caches and renders templates.
///
/// An Engine is `Send + Sync`: a single instance can be shared by every
/// thread that renders streams. Parsed templates are cached by source, so
/// rendering the same template for many streams parses it once.
///
/// # Example
///
/// ```
/// use streamfmt::{Context, Engine, Namespace};
///
/// let engine = Engine::builder().max_depth(8).build();
///
/// let ctx = Context::new()
///     .with(Namespace::Stream, "quality", "WEBDL")
///     .with(Namespace::Stream, "size", 1_073_741_824_i64);
///
/// let output = engine.render_str("{stream.quality} {stream.size::size}", &ctx).unwrap();
/// assert_eq!(output, "WEBDL 1.00 GB");
/// assert_eq!(engine.template_cache_len(), 1);
/// ```
#[derive(Builder)]
pub struct Engine {
    /// Maximum branch nesting depth, enforced when parsing and guarded when
    /// rendering.
    #[builder(default = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Number of parsed templates kept before the cache is cleared.
    #[builder(default = DEFAULT_CACHE_CAPACITY)]
    cache_capacity: usize,

    /// Formatters available to `Format` modifiers.
    #[builder(default)]
    formatters: FormatterRegistry,

    /// Compiled regex patterns shared by all renders.
    #[builder(skip)]
    regexes: RegexCache,

    /// Parsed templates keyed by source hash.
    #[builder(skip)]
    template_cache: RwLock<HashMap<TemplateId, CachedTemplate>>,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::builder().build()
    }
}

impl Engine {
    /// Create an engine with default settings and the built-in formatters.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Maximum branch nesting depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Template cache capacity.
    pub fn cache_capacity(&self) -> usize {
        self.cache_capacity
    }

    /// Get the formatter registry (read-only).
    pub fn formatters(&self) -> &FormatterRegistry {
        &self.formatters
    }

    /// Get the formatter registry (mutable) for registering custom formatters.
    pub fn formatters_mut(&mut self) -> &mut FormatterRegistry {
        &mut self.formatters
    }

    // =========================================================================
    // Parsing
    // =========================================================================

    /// Parse a template, reusing a cached parse of the same source.
    ///
    /// Repeated calls with the same source return the same `Arc`. Parse
    /// errors are not cached.
    pub fn parse(&self, source: &str) -> Result<Arc<Template>, ParseError> {
        let id = TemplateId::from_source(source);
        {
            let cache = self
                .template_cache
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            if let Some(cached) = cache.get(&id).filter(|cached| cached.source == source) {
                debug!(%id, "template cache hit");
                return Ok(Arc::clone(&cached.template));
            }
        }

        debug!(%id, "template cache miss");
        let template = Arc::new(parse_template_with_depth(source, self.max_depth)?);

        let mut cache = self
            .template_cache
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if cache.len() >= self.cache_capacity && !cache.contains_key(&id) {
            debug!(capacity = self.cache_capacity, "template cache full, clearing");
            cache.clear();
        }
        cache.insert(
            id,
            CachedTemplate {
                source: source.to_string(),
                template: Arc::clone(&template),
            },
        );
        Ok(template)
    }

    /// Clear the template cache.
    ///
    /// Call this if you need to free memory used by cached templates.
    pub fn clear_template_cache(&self) {
        self.template_cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Return the number of cached templates.
    pub fn template_cache_len(&self) -> usize {
        self.template_cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Render a parsed template against a context.
    ///
    /// Never fails. Warnings are logged and discarded; use
    /// [`Engine::render_with_warnings`] to inspect them.
    pub fn render(&self, template: &Template, context: &Context) -> String {
        self.render_with_warnings(template, context).0
    }

    /// Render a parsed template, also returning the warnings it produced.
    pub fn render_with_warnings(
        &self,
        template: &Template,
        context: &Context,
    ) -> (String, Vec<RenderWarning>) {
        let mut ctx = RenderContext::with_max_depth(context, self.max_depth);
        let output = render_template(template, &mut ctx, &self.formatters, &self.regexes);
        (output, ctx.take_warnings())
    }

    /// Parse (or fetch from cache) and render a template source.
    pub fn render_str(&self, source: &str, context: &Context) -> Result<String, ParseError> {
        let template = self.parse(source)?;
        Ok(self.render(&template, context))
    }

    // =========================================================================
    // Formatter Definitions
    // =========================================================================

    /// Parse both templates of a formatter definition.
    pub fn compile(
        &self,
        definition: &FormatterDefinition,
    ) -> Result<CompiledFormatter, DefinitionError> {
        let parse_field = |field: DefinitionField| {
            self.parse(definition.template(field))
                .map_err(|source| DefinitionError::Template { field, source })
        };
        Ok(CompiledFormatter {
            name: parse_field(DefinitionField::Name)?,
            description: parse_field(DefinitionField::Description)?,
        })
    }

    /// Render a compiled formatter against one stream's context.
    pub fn render_formatter(
        &self,
        formatter: &CompiledFormatter,
        context: &Context,
    ) -> RenderedStream {
        self.render_formatter_with_warnings(formatter, context).0
    }

    /// Render a compiled formatter, also returning the warnings of both
    /// templates.
    pub fn render_formatter_with_warnings(
        &self,
        formatter: &CompiledFormatter,
        context: &Context,
    ) -> (RenderedStream, Vec<RenderWarning>) {
        let (name, mut warnings) = self.render_with_warnings(&formatter.name, context);
        let (description, description_warnings) =
            self.render_with_warnings(&formatter.description, context);
        for warning in description_warnings {
            if !warnings.contains(&warning) {
                warnings.push(warning);
            }
        }
        (RenderedStream { name, description }, warnings)
    }

    /// Compile and render a formatter definition in one step.
    pub fn render_definition(
        &self,
        definition: &FormatterDefinition,
        context: &Context,
    ) -> Result<RenderedStream, DefinitionError> {
        let compiled = self.compile(definition)?;
        Ok(self.render_formatter(&compiled, context))
    }

    // =========================================================================
    // Linting
    // =========================================================================

    /// Static checks against the property catalog and this engine's
    /// formatters. See [`lint_template`].
    pub fn lint(&self, template: &Template) -> Vec<LintWarning> {
        lint_template(template, &self.formatters)
    }
}
