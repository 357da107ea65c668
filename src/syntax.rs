//! Documents the template syntax.
//!
//! A `relplate` template is a piece of UTF-8 text processed line by line. A
//! line either passes through untouched, contains
//! [**placeholders**](#placeholders) that are substituted, or is a
//! [**loop marker**](#loops) that controls repetition. The delimiters can be
//! configured, so this document only refers to the
//! [**default**][crate::Syntax::default] configuration.
//!
//! # Placeholders
//!
//! A placeholder is a dotted path wrapped in `{ ... }`. The first identifier
//! is the *root* and names an object, the rest walk its attributes.
//!
//! ```text
//! public class {federate.classname} {
//! ```
//!
//! If the root is bound, either because it is the name the template is
//! rendered with or because an enclosing loop bound it, the path is followed
//! from that object. Otherwise the engine searches the bound objects for a
//! relation named after the plural of the root (`interaction` looks for
//! `interactions`), descending through the first element of relations until
//! exactly one route is found. Failing that, a plain attribute with the root's
//! name is used.
//!
//! A placeholder must evaluate to a string, number, or boolean. Objects and
//! relations cannot be rendered.
//!
//! A placeholder may not contain whitespace. Any brace text that is not a
//! well formed placeholder, such as the body braces of generated code, is
//! emitted as it is.
//!
//! ```text
//! void run() { {interaction.varname}(); }
//! ```
//!
//! # Implicit loops
//!
//! A line whose root names the element of an unbound relation is repeated for
//! each element. Following lines that reach deeper into the same relation are
//! grouped with it and the group is repeated as a whole.
//!
//! ```text
//! {interaction.varname}:
//!     {parameter.varname}
//! ```
//!
//! Given two interactions this renders each interaction name followed by its
//! own parameters. When a group spans more than one line the engine's
//! separator, a blank line by default, is emitted between repetitions. See
//! [`Engine::set_separator`][crate::Engine::set_separator].
//!
//! # Loops
//!
//! Repetition can also be spelled out. An open marker `{$relations}` and a
//! close marker `{relations$}` each sit on their own line, and the lines
//! between them are rendered once per element with the element bound under
//! the singular name. Marker lines never appear in the output.
//!
//! ```text
//! {$interactions}
//! case {interaction.handlename}:
//!     return "{interaction.varname}";
//! {interactions$}
//! ```
//!
//! Loops nest, and a relation on a bound element is found before relations
//! further out.
//!
//! ```text
//! {$interactions}
//! {$parameters}
//! {interaction.varname}.{parameter.varname}
//! {parameters$}
//! {interactions$}
//! ```
//!
//! The loop name must be plural and every open marker needs a matching close
//! marker. Both are checked when the template is compiled.
