//! Expand a compiled template against an object graph.

mod core;
mod stack;

use crate::object::Object;
use crate::render::core::RendererImpl;
use crate::render::stack::Stack;
use crate::types::ast::Template;
use crate::Result;

/// Expands the template with the root object bound under `name`, returning the
/// emitted lines in order.
pub fn lines(
    separator: &str,
    template: &Template<'_>,
    name: &str,
    root: &Object,
) -> Result<Vec<String>> {
    let stack = Stack::new(name, root);
    RendererImpl::new(&template.source, separator, stack).render(&template.scope)
}

/// Expands the template and joins the emitted lines into a single string.
pub fn to_string(
    separator: &str,
    template: &Template<'_>,
    name: &str,
    root: &Object,
) -> Result<String> {
    lines(separator, template, name, root).map(|lines| lines.concat())
}
