//! A line oriented template engine that expands placeholders against an
//! object graph, discovering one to many relations on its own.
//!
//! # Features
//!
//! ### Syntax
//!
//! - Placeholders: `{federate.classname}`
//! - Explicit loops: `{$interactions} ... {interactions$}`
//! - Implicit loops: `{interaction.varname}` expands once per interaction
//!   without being told where interactions live
//! - Configurable delimiters: `<<interaction.varname>>`
//! - Stray braces in the generated text pass through untouched
//!
//! ### Engine
//!
//! - Relation discovery through the declared relations of an [`Object`]
//! - Shape inference and wildcard path matching over plain [`Value`] trees
//! - Build object graphs with the builder API, from a [`Value`], or from any
//!   [`serde`] serializable value
//! - Errors point at the offending placeholder in the template source
//!
//! # Getting started
//!
//! Your entry point is the [`Engine`] struct. The engine stores the syntax
//! config, the separator emitted between implicit groups, and compiled
//! templates.
//!
//! ```
//! let engine = relplate::Engine::new();
//! ```
//!
//! Templates expand against an [`Object`]. An object declares its plain
//! values, nested objects, and relations up front.
//!
//! ```
//! use relplate::Object;
//!
//! let federate = Object::new()
//!     .with_value("classname", "Federate")
//!     .with_relation("interactions", [
//!         Object::new()
//!             .with_value("varname", "loadScenario")
//!             .with_relation("parameters", [
//!                 Object::new().with_value("varname", "scenarioName"),
//!                 Object::new().with_value("varname", "initialFuelAmount"),
//!             ]),
//!         Object::new()
//!             .with_value("varname", "start")
//!             .with_relation("parameters", [
//!                 Object::new().with_value("varname", "timeScaleFactor"),
//!             ]),
//!     ]);
//! # let _ = federate;
//! ```
//!
//! The template refers to objects by their singular name. A placeholder line
//! whose root is not bound yet is expanded once per element of the relation
//! that holds it, and lines reaching deeper into the same relation are grouped
//! with it.
//!
//! ```
//! # use relplate::Object;
//! # let federate = Object::new()
//! #     .with_value("classname", "Federate")
//! #     .with_relation("interactions", [
//! #         Object::new()
//! #             .with_value("varname", "loadScenario")
//! #             .with_relation("parameters", [
//! #                 Object::new().with_value("varname", "scenarioName"),
//! #                 Object::new().with_value("varname", "initialFuelAmount"),
//! #             ]),
//! #         Object::new()
//! #             .with_value("varname", "start")
//! #             .with_relation("parameters", [
//! #                 Object::new().with_value("varname", "timeScaleFactor"),
//! #             ]),
//! #     ]);
//! let engine = relplate::Engine::new();
//! let template = engine.compile("\
//! class {federate.classname} {
//!   {interaction.varname}:
//!     {parameter.varname}
//! };
//! ")?;
//!
//! let result = template.render("federate", &federate)?;
//! assert_eq!(
//!     result,
//!     "\
//! class Federate {
//!   loadScenario:
//!     scenarioName
//!     initialFuelAmount
//!
//!   start:
//!     timeScaleFactor
//! };
//! "
//! );
//! # Ok::<(), relplate::Error>(())
//! ```
//!
//! # Examples
//!
//! ### Explicit loops
//!
//! A loop body is expanded once per element of the named relation, with the
//! element bound under the singular name. Marker lines are dropped.
//!
//! ```
//! use relplate::Object;
//!
//! let federate = Object::new().with_relation("interactions", [
//!     Object::new().with_value("handlename", "loadScenarioHandle"),
//!     Object::new().with_value("handlename", "startHandle"),
//! ]);
//!
//! let result = relplate::Engine::new()
//!     .compile("switch (handle) {\n{$interactions}\ncase {interaction.handlename}:\n{interactions$}\n}\n")?
//!     .render("federate", &federate)?;
//!
//! assert_eq!(result, "switch (handle) {\ncase loadScenarioHandle:\ncase startHandle:\n}\n");
//! # Ok::<(), relplate::Error>(())
//! ```
//!
//! ### Expand a sequence of lines
//!
//! [`Engine::compile_lines`] takes the lines of a template and
//! [`.render_lines`][Template::render_lines] returns the emitted lines,
//! including the separator between implicit groups.
//!
//! ```
//! # use relplate::Object;
//! # let federate = Object::new().with_relation("interactions", [
//! #     Object::new().with_value("varname", "loadScenario").with_relation("parameters", [
//! #         Object::new().with_value("varname", "scenarioName"),
//! #     ]),
//! #     Object::new().with_value("varname", "start").with_relation("parameters", [
//! #         Object::new().with_value("varname", "timeScaleFactor"),
//! #     ]),
//! # ]);
//! let lines = relplate::Engine::new()
//!     .compile_lines(["{interaction.varname}", "{parameter.varname}"])?
//!     .render_lines("federate", &federate)?;
//!
//! assert_eq!(lines, ["loadScenario", "scenarioName", "\n", "start", "timeScaleFactor"]);
//! # Ok::<(), relplate::Error>(())
//! ```
//!
//! ### Render using structured data
//!
//! With the `serde` feature any serializable value can be used as the root.
//! Maps become objects and lists of maps become relations.
//!
//! ```
//! #[derive(serde::Serialize)]
//! struct Federate { classname: String, interactions: Vec<Interaction> }
//!
//! #[derive(serde::Serialize)]
//! struct Interaction { varname: String }
//!
//! let federate = Federate {
//!     classname: "Federate".into(),
//!     interactions: vec![Interaction { varname: "start".into() }],
//! };
//!
//! let result = relplate::Engine::new()
//!     .compile("{federate.classname}::{interaction.varname}()")?
//!     .render_from("federate", &federate)?;
//!
//! assert_eq!(result, "Federate::start()");
//! # Ok::<(), relplate::Error>(())
//! ```
//!
//! ### Render a template using custom syntax
//!
//! The template syntax can be set by constructing an engine using
//! [`Engine::with_syntax`].
//!
//! ```
//! let syntax = relplate::Syntax::builder().placeholder("<<", ">>").loop_marker("@").build();
//! let federate = relplate::Object::new().with_value("classname", "Federate");
//!
//! let result = relplate::Engine::with_syntax(syntax)
//!     .compile("{ <<federate.classname>> }")?
//!     .render("federate", &federate)?;
//!
//! assert_eq!(result, "{ Federate }");
//! # Ok::<(), relplate::Error>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
mod tracing_macros;

mod compile;
mod error;
mod macros;
mod object;
mod render;
mod resolve;
pub mod syntax;
mod tree;
mod types;
mod value;

use std::collections::BTreeMap;
use std::fmt;

pub use crate::error::{Error, ErrorKind};
#[cfg(feature = "serde")]
pub use crate::object::to_object;
pub use crate::object::{Attr, Object};
pub use crate::resolve::{
    find_attribute, find_relation, plural, singular, walk_attribute_chain, AttributeWalker, Node,
};
pub use crate::tree::{
    branches, canonical_paths, canonicalize, concrete_paths, get, infer, matches, Branch, Path,
    Schema, Segment, Tree,
};
pub use crate::types::syntax::{Syntax, SyntaxBuilder};
#[cfg(feature = "serde")]
pub use crate::value::to_value;
pub use crate::value::{List, Map, Value};

use crate::types::ast;

/// A type alias for results in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The compilation and expansion engine.
pub struct Engine<'engine> {
    syntax: Syntax<'engine>,
    separator: String,
    templates: BTreeMap<&'engine str, ast::Template<'engine>>,
}

/// A compiled template.
#[cfg_attr(test, derive(Debug))]
pub struct Template<'engine, 'source> {
    engine: &'engine Engine<'engine>,
    template: ast::Template<'source>,
}

/// A reference to a compiled template in an [`Engine`].
#[derive(Clone, Copy)]
#[cfg_attr(test, derive(Debug))]
pub struct TemplateRef<'engine> {
    engine: &'engine Engine<'engine>,
    template: &'engine ast::Template<'engine>,
}

impl<'engine> Default for Engine<'engine> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<'engine> Engine<'engine> {
    /// Construct a new engine.
    #[inline]
    pub fn new() -> Self {
        Self::with_syntax(Syntax::default())
    }

    /// Construct a new engine with custom syntax.
    ///
    /// # Examples
    ///
    /// ```
    /// use relplate::{Engine, Syntax};
    ///
    /// let syntax = Syntax::builder().placeholder("<{", "}>").loop_marker("%").build();
    /// let engine = Engine::with_syntax(syntax);
    /// ```
    #[inline]
    pub fn with_syntax(syntax: Syntax<'engine>) -> Self {
        Self {
            syntax,
            separator: String::from("\n"),
            templates: BTreeMap::new(),
        }
    }

    /// Set the separator emitted between the elements of an implicit group.
    ///
    /// Defaults to `"\n"`, which renders as a blank line between groups.
    #[inline]
    pub fn set_separator(&mut self, separator: &str) {
        self.separator = separator.to_owned();
    }

    /// Add a template to the engine.
    ///
    /// The template will be compiled and stored under the given name.
    ///
    /// When using this function over [`.compile(..)`][Engine::compile] the
    /// template source lifetime needs to be as least as long as the engine
    /// lifetime.
    #[inline]
    pub fn add_template(&mut self, name: &'engine str, source: &'engine str) -> Result<()> {
        let template = compile::template(&self.syntax, source)?;
        self.templates.insert(name, template);
        Ok(())
    }

    /// Lookup a template by name.
    #[inline]
    pub fn get_template(&self, name: &str) -> Option<TemplateRef<'_>> {
        self.templates.get(name).map(|template| TemplateRef {
            engine: self,
            template,
        })
    }

    /// Compile a template.
    ///
    /// The template will not be stored in the engine. The advantage over
    /// [`.add_template(..)`][Engine::add_template] here is that the lifetime of
    /// the template source does not need to outlive the engine.
    #[inline]
    pub fn compile<'source>(&self, source: &'source str) -> Result<Template<'_, 'source>> {
        let template = compile::template(&self.syntax, source)?;
        Ok(Template {
            engine: self,
            template,
        })
    }

    /// Compile a template from a sequence of lines.
    ///
    /// Rendering the template yields the lines as given, without newlines, so
    /// this pairs with [`.render_lines(..)`][Template::render_lines].
    pub fn compile_lines<I, S>(&self, lines: I) -> Result<Template<'_, 'static>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let template = compile::lines(&self.syntax, lines)?;
        Ok(Template {
            engine: self,
            template,
        })
    }
}

impl fmt::Debug for Engine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("Engine");
        d.field("syntax", &self.syntax);
        d.field("separator", &self.separator);
        #[cfg(not(test))]
        {
            d.field("templates", &self.templates.keys()).finish()
        }
        #[cfg(test)]
        {
            d.field("templates", &self.templates).finish()
        }
    }
}

impl<'engine, 'source> Template<'engine, 'source> {
    /// Expand the template with the root object bound under `name`.
    #[inline]
    pub fn render(&self, name: &str, root: &Object) -> Result<String> {
        render::to_string(&self.engine.separator, &self.template, name, root)
    }

    /// Expand the template and return the emitted lines.
    ///
    /// The separator between implicit groups is returned as its own line.
    #[inline]
    pub fn render_lines(&self, name: &str, root: &Object) -> Result<Vec<String>> {
        render::lines(&self.engine.separator, &self.template, name, root)
    }

    /// Expand the template with a serializable value as the root.
    ///
    /// See [`to_object`] for how the value is converted.
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    #[inline]
    pub fn render_from<S>(&self, name: &str, root: S) -> Result<String>
    where
        S: serde::Serialize,
    {
        self.render(name, &to_object(root)?)
    }

    /// Returns the template source.
    #[inline]
    pub fn source(&self) -> &str {
        &self.template.source
    }
}

#[cfg(not(test))]
impl fmt::Debug for Template<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

impl<'engine> TemplateRef<'engine> {
    /// Expand the template with the root object bound under `name`.
    #[inline]
    pub fn render(&self, name: &str, root: &Object) -> Result<String> {
        render::to_string(&self.engine.separator, self.template, name, root)
    }

    /// Expand the template and return the emitted lines.
    ///
    /// The separator between implicit groups is returned as its own line.
    #[inline]
    pub fn render_lines(&self, name: &str, root: &Object) -> Result<Vec<String>> {
        render::lines(&self.engine.separator, self.template, name, root)
    }

    /// Expand the template with a serializable value as the root.
    ///
    /// See [`to_object`] for how the value is converted.
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    #[inline]
    pub fn render_from<S>(&self, name: &str, root: S) -> Result<String>
    where
        S: serde::Serialize,
    {
        self.render(name, &to_object(root)?)
    }

    /// Returns the template source.
    #[inline]
    pub fn source(&self) -> &'engine str {
        &self.template.source
    }
}

#[cfg(not(test))]
impl fmt::Debug for TemplateRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateRef")
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}
