/// A result type with [`Error`] as the default error.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that `randtok` can produce.
///
/// Every variant is raised eagerly: pools are checked when a generator is
/// built and lengths are checked before the first token is drawn. Nothing is
/// retried.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The pool holds fewer symbols than the generator needs.
    ///
    /// String and integer generators need at least two symbols, otherwise
    /// every token would be the same constant.
    #[error("pool has {actual} symbol(s), at least {required} required")]
    InvalidPool {
        /// Minimum number of symbols.
        required: usize,
        /// Number of symbols the pool actually holds.
        actual: usize,
    },

    /// An integer pool contains a symbol that is not an ASCII decimal digit.
    #[error("integer pool contains non-digit symbol {symbol:?}")]
    NonDigitSymbol {
        /// The offending symbol.
        symbol: char,
    },

    /// The requested token length is below the minimum accepted by the
    /// generator or by the sequence builder.
    #[error("token length {requested} is below the minimum of {minimum}")]
    InvalidLength {
        /// Length that was asked for.
        requested: usize,
        /// Smallest accepted length.
        minimum: usize,
    },

    /// A one-shot call produced no token.
    ///
    /// Unreachable with the built-in generators since their pipelines are
    /// unfiltered; kept so the facade never has to panic.
    #[error("the token pipeline produced no result")]
    EmptyResult,
}

impl Error {
    pub(crate) const fn check_length(requested: usize, minimum: usize) -> Result<()> {
        if requested < minimum {
            return Err(Self::InvalidLength { requested, minimum });
        }
        Ok(())
    }

    pub(crate) const fn check_pool(actual: usize, required: usize) -> Result<()> {
        if actual < required {
            return Err(Self::InvalidPool { required, actual });
        }
        Ok(())
    }
}
