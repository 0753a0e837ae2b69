//! Value formatters: turn a single search term into a filter fragment.

use crate::errors::FormattingError;
use crate::quote::{AnsiQuoter, Quoter};

/// Renders one search term for the composer.
///
/// `exact` is `true` when the term came from a double-quoted phrase.
/// Closures of the shape `Fn(&str, bool) -> Result<String, FormattingError>`
/// implement this trait, so ad-hoc formatters need no wrapper type.
pub trait ValueFormatter {
    /// Render `value` as a fragment.
    ///
    /// # Errors
    /// Implementations return [`FormattingError`] when the value cannot be
    /// rendered; the composer propagates it unchanged.
    fn format(&self, value: &str, exact: bool) -> Result<String, FormattingError>;
}

impl<F> ValueFormatter for F
where
    F: Fn(&str, bool) -> Result<String, FormattingError>,
{
    fn format(&self, value: &str, exact: bool) -> Result<String, FormattingError> {
        self(value, exact)
    }
}

/// Where a [`LikeFormatter`] writes its comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// An expression placed verbatim before `LIKE`, typically a column.
    Column(String),
    /// A template whose placeholder marker is replaced by the unquoted,
    /// escaped literal.
    Template {
        /// Fragment containing one or more markers.
        template: String,
        /// Marker text to substitute.
        placeholder: String,
    },
}

/// Renders every term as a substring match wrapped in `%` wildcards.
///
/// With a [`DataSource::Column`] each term becomes
/// `<column> LIKE <quoted literal>`. With a [`DataSource::Template`] the
/// quoted literal loses its delimiters and replaces every occurrence of the
/// marker, leaving the surrounding syntax to the template.
///
/// # Examples
/// ```
/// use search_query::{make, LikeFormatter};
///
/// let by_column = LikeFormatter::column("`title`");
/// assert_eq!(
///     make("rust OR ferris", &by_column)?,
///     "`title` LIKE '%rust%' OR `title` LIKE '%ferris%'"
/// );
///
/// let by_template = LikeFormatter::template("(a LIKE '#' OR b LIKE '#')", "#")?;
/// assert_eq!(
///     make("it's", &by_template)?,
///     "(a LIKE '%it''s%' OR b LIKE '%it''s%')"
/// );
/// # Ok::<(), search_query::FormattingError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeFormatter<Q = AnsiQuoter> {
    source: DataSource,
    quoter: Q,
}

impl LikeFormatter {
    /// Compare against `column` using [`AnsiQuoter`].
    #[must_use]
    pub fn column(column: impl Into<String>) -> Self {
        Self {
            source: DataSource::Column(column.into()),
            quoter: AnsiQuoter,
        }
    }

    /// Substitute into `template` at every `placeholder` using
    /// [`AnsiQuoter`].
    ///
    /// # Errors
    /// Returns [`FormattingError::EmptyPlaceholder`] for an empty marker and
    /// [`FormattingError::MissingPlaceholder`] when the marker does not
    /// occur in `template`.
    pub fn template(
        template: impl Into<String>,
        placeholder: impl Into<String>,
    ) -> Result<Self, FormattingError> {
        let template = template.into();
        let placeholder = placeholder.into();
        if placeholder.is_empty() {
            return Err(FormattingError::EmptyPlaceholder);
        }
        if !template.contains(&placeholder) {
            return Err(FormattingError::MissingPlaceholder {
                placeholder,
                template,
            });
        }
        Ok(Self {
            source: DataSource::Template {
                template,
                placeholder,
            },
            quoter: AnsiQuoter,
        })
    }
}

impl<Q: Quoter> LikeFormatter<Q> {
    /// Swap the quoting primitive.
    #[must_use]
    pub fn with_quoter<R: Quoter>(self, quoter: R) -> LikeFormatter<R> {
        LikeFormatter {
            source: self.source,
            quoter,
        }
    }

    /// The configured data source.
    #[must_use]
    pub const fn data_source(&self) -> &DataSource {
        &self.source
    }
}

impl<Q: Quoter> ValueFormatter for LikeFormatter<Q> {
    fn format(&self, value: &str, _exact: bool) -> Result<String, FormattingError> {
        let quoted = self.quoter.quote(&format!("%{value}%"))?;
        Ok(match &self.source {
            DataSource::Column(column) => format!("{column} LIKE {quoted}"),
            DataSource::Template {
                template,
                placeholder,
            } => template.replace(placeholder.as_str(), self.quoter.unquote(&quoted)),
        })
    }
}
