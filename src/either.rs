use crate::optional::Optional;

/// A value holding exactly one of two types
///
/// Throughout this crate the left arm carries the failure and the right arm
/// carries the success. Both arms accept any value as-is, including `()` and
/// `Option::None`, so a present-but-empty value is never confused with an
/// absent one.
///
/// # Examples
///
/// ```
/// use rest_either::Either;
///
/// let ok: Either<String, u32> = Either::Right(42);
/// assert_eq!(ok.map(|n| n + 1).if_left(|_| 0), 43);
///
/// let failed: Either<String, u32> = Either::Left("boom".to_string());
/// assert_eq!(failed.if_left(|msg| msg.len() as u32), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Either<L, R> {
    /// Failure arm
    Left(L),
    /// Success arm
    Right(R),
}

impl<L, R> Either<L, R> {
    /// Returns true if the value is in the left arm
    pub fn is_left(&self) -> bool {
        matches!(self, Either::Left(_))
    }

    /// Returns true if the value is in the right arm
    pub fn is_right(&self) -> bool {
        matches!(self, Either::Right(_))
    }

    /// Collapse onto the right type
    ///
    /// Applies `f` to the left value if present, otherwise returns the right
    /// value unchanged. `f` is never called on a right-armed value.
    pub fn if_left<F>(self, f: F) -> R
    where
        F: FnOnce(L) -> R,
    {
        match self {
            Either::Left(l) => f(l),
            Either::Right(r) => r,
        }
    }

    /// Collapse onto the left type
    ///
    /// Applies `f` to the right value if present, otherwise returns the left
    /// value unchanged. `f` is never called on a left-armed value.
    pub fn if_right<F>(self, f: F) -> L
    where
        F: FnOnce(R) -> L,
    {
        match self {
            Either::Left(l) => l,
            Either::Right(r) => f(r),
        }
    }

    /// Transform the right arm, propagating a left value untouched
    pub fn map<T, F>(self, f: F) -> Either<L, T>
    where
        F: FnOnce(R) -> T,
    {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(f(r)),
        }
    }

    /// Transform the left arm, propagating a right value untouched
    pub fn map_left<T, F>(self, f: F) -> Either<T, R>
    where
        F: FnOnce(L) -> T,
    {
        match self {
            Either::Left(l) => Either::Left(f(l)),
            Either::Right(r) => Either::Right(r),
        }
    }

    /// Collapse both arms onto a third type
    pub fn fold<T, FL, FR>(self, left_fn: FL, right_fn: FR) -> T
    where
        FL: FnOnce(L) -> T,
        FR: FnOnce(R) -> T,
    {
        match self {
            Either::Left(l) => left_fn(l),
            Either::Right(r) => right_fn(r),
        }
    }

    pub fn as_ref(&self) -> Either<&L, &R> {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(r),
        }
    }

    /// Project the left arm
    pub fn left(self) -> Optional<L> {
        match self {
            Either::Left(l) => Optional::Some(l),
            Either::Right(_) => Optional::None,
        }
    }

    /// Project the right arm
    pub fn right(self) -> Optional<R> {
        match self {
            Either::Left(_) => Optional::None,
            Either::Right(r) => Optional::Some(r),
        }
    }

    /// Convert into a `Result`, treating the right arm as `Ok`
    pub fn into_result(self) -> Result<R, L> {
        match self {
            Either::Left(l) => Err(l),
            Either::Right(r) => Ok(r),
        }
    }
}

impl<L, R> From<Result<R, L>> for Either<L, R> {
    fn from(result: Result<R, L>) -> Self {
        match result {
            Ok(r) => Either::Right(r),
            Err(l) => Either::Left(l),
        }
    }
}
