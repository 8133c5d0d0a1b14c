/// A container holding zero or one value
///
/// Absence is its own variant rather than a sentinel, so `Optional<Option<T>>`
/// or `Optional<()>` can still tell "present" from "missing".
///
/// # Examples
///
/// ```
/// use rest_either::Optional;
///
/// let some = Optional::some(3);
/// assert_eq!(some.to_vec(), vec![3]);
/// assert_eq!(Optional::<i32>::none().if_none(|| 7), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Optional<A> {
    Some(A),
    None,
}

impl<A> Default for Optional<A> {
    fn default() -> Self {
        Optional::None
    }
}

impl<A> Optional<A> {
    pub fn some(a: A) -> Self {
        Optional::Some(a)
    }

    pub fn none() -> Self {
        Optional::None
    }

    pub fn is_some(&self) -> bool {
        matches!(self, Optional::Some(_))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Optional::None)
    }

    /// Zero or one element, in order
    pub fn to_vec(self) -> Vec<A> {
        match self {
            Optional::Some(a) => vec![a],
            Optional::None => Vec::new(),
        }
    }

    /// Returns the held value, or the result of `f` when absent
    pub fn if_none<F>(self, f: F) -> A
    where
        F: FnOnce() -> A,
    {
        match self {
            Optional::Some(a) => a,
            Optional::None => f(),
        }
    }

    pub fn map<B, F>(self, f: F) -> Optional<B>
    where
        F: FnOnce(A) -> B,
    {
        match self {
            Optional::Some(a) => Optional::Some(f(a)),
            Optional::None => Optional::None,
        }
    }

    /// Exhaustive collapse of both states
    pub fn match_with<B, FS, FN>(self, some_fn: FS, none_fn: FN) -> B
    where
        FS: FnOnce(A) -> B,
        FN: FnOnce() -> B,
    {
        match self {
            Optional::Some(a) => some_fn(a),
            Optional::None => none_fn(),
        }
    }

    pub fn as_ref(&self) -> Optional<&A> {
        match self {
            Optional::Some(a) => Optional::Some(a),
            Optional::None => Optional::None,
        }
    }

    pub fn into_option(self) -> Option<A> {
        match self {
            Optional::Some(a) => Some(a),
            Optional::None => None,
        }
    }
}

impl<A> From<Option<A>> for Optional<A> {
    fn from(value: Option<A>) -> Self {
        match value {
            Some(a) => Optional::Some(a),
            None => Optional::None,
        }
    }
}
