/// The template syntax configuration.
///
/// Use [`Syntax::default()`] to get the default syntax configuration and
/// [`Syntax::builder()`] to create a custom syntax configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Syntax<'a> {
    pub(crate) begin: &'a str,
    pub(crate) end: &'a str,
    pub(crate) marker: &'a str,
}

/// A builder for the syntax configuration.
///
/// This struct is typically created using [`Syntax::builder()`].
#[derive(Debug, Clone)]
pub struct SyntaxBuilder<'a> {
    placeholder: Option<(&'a str, &'a str)>,
    marker: Option<&'a str>,
}

impl Default for Syntax<'_> {
    /// Returns the default syntax configuration.
    ///
    /// This is equivalent to the following.
    /// ```
    /// use relplate::Syntax;
    ///
    /// let syntax = Syntax::builder()
    ///     .placeholder("{", "}")
    ///     .loop_marker("$")
    ///     .build();
    /// assert_eq!(syntax, Syntax::default());
    /// ```
    #[inline]
    fn default() -> Self {
        Syntax::builder()
            .placeholder("{", "}")
            .loop_marker("$")
            .build()
    }
}

impl<'a> Syntax<'a> {
    /// Create a new syntax builder.
    ///
    /// # Examples
    ///
    /// ```
    /// let syntax = relplate::Syntax::builder()
    ///     .placeholder("<%", "%>")
    ///     .loop_marker("@")
    ///     .build();
    /// ```
    #[inline]
    pub fn builder() -> SyntaxBuilder<'a> {
        SyntaxBuilder::new()
    }
}

impl<'a> SyntaxBuilder<'a> {
    /// Creates a new syntax builder.
    #[inline]
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            placeholder: None,
            marker: None,
        }
    }

    /// Set the placeholder delimiters.
    ///
    /// Loop markers share these delimiters, e.g. `{$interactions}`.
    ///
    /// # Panics
    ///
    /// If either of the strings are empty.
    #[inline]
    pub fn placeholder(&mut self, begin: &'a str, end: &'a str) -> &mut Self {
        assert!(!begin.is_empty() && !end.is_empty());
        self.placeholder = Some((begin, end));
        self
    }

    /// Set the loop marker.
    ///
    /// Placed before the relation name it opens a loop, after the name it
    /// closes it.
    ///
    /// # Panics
    ///
    /// If the string is empty.
    #[inline]
    pub fn loop_marker(&mut self, marker: &'a str) -> &mut Self {
        assert!(!marker.is_empty());
        self.marker = Some(marker);
        self
    }

    /// Builds the syntax configuration.
    ///
    /// Unset parts fall back to the default syntax.
    pub fn build(&self) -> Syntax<'a> {
        let (begin, end) = self.placeholder.unwrap_or(("{", "}"));
        let marker = self.marker.unwrap_or("$");
        Syntax { begin, end, marker }
    }
}
