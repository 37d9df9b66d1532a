use std::sync::Arc;

/// A fixed, ordered alphabet that generators draw symbols from.
///
/// Pools are pure data: no randomness and no side effects. Built-in pools are
/// provided by [`Pool`], but any type that can expose a slice of `char`s is a
/// pool, so user-defined alphabets plug in without conversion.
///
/// Generators validate the pool they are given (at least
/// [`MIN_POOL_SIZE`] symbols) since implementations of this trait are not
/// checked on construction.
///
/// # Example
/// ```
/// use randtok::CharacterPool;
///
/// struct Hex;
/// impl CharacterPool for Hex {
///     fn characters(&self) -> &[char] {
///         &['0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f']
///     }
/// }
///
/// assert_eq!(Hex.len(), 16);
/// ```
///
/// [`Pool`]: crate::Pool
/// [`MIN_POOL_SIZE`]: crate::MIN_POOL_SIZE
pub trait CharacterPool {
    /// Returns the symbols in draw order.
    fn characters(&self) -> &[char];

    /// Number of symbols in the pool.
    fn len(&self) -> usize {
        self.characters().len()
    }

    /// Returns `true` if the pool holds no symbols.
    fn is_empty(&self) -> bool {
        self.characters().is_empty()
    }
}

impl CharacterPool for [char] {
    fn characters(&self) -> &[char] {
        self
    }
}

impl<const N: usize> CharacterPool for [char; N] {
    fn characters(&self) -> &[char] {
        self
    }
}

impl CharacterPool for Vec<char> {
    fn characters(&self) -> &[char] {
        self
    }
}

impl<P> CharacterPool for &P
where
    P: CharacterPool + ?Sized,
{
    fn characters(&self) -> &[char] {
        (**self).characters()
    }
}

impl<P> CharacterPool for Arc<P>
where
    P: CharacterPool + ?Sized,
{
    fn characters(&self) -> &[char] {
        (**self).characters()
    }
}
