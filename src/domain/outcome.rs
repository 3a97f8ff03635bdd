use super::error::Error;

/// Success or failure of a domain operation.
///
/// A successful outcome carries its value and [`Error::NONE`]; a failed one
/// carries a real error and no value. The pairing is checked when the outcome
/// is built and cannot change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Outcome<T = ()> {
    inner: Inner<T>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Inner<T> {
    Success(T),
    Failure(Error),
}

impl Outcome<()> {
    pub fn ok() -> Self {
        Self::success(())
    }
}

impl<T> Outcome<T> {
    pub fn success(value: T) -> Self {
        Self::from_parts(true, Some(value), Error::NONE)
    }

    /// # Panics
    ///
    /// Panics if `error` is [`Error::NONE`].
    pub fn failure(error: Error) -> Self {
        Self::from_parts(false, None, error)
    }

    /// Explicit value-to-outcome conversion, identical to [`Outcome::success`].
    pub fn from_value(value: T) -> Self {
        Self::success(value)
    }

    /// Builds an outcome from its raw parts, enforcing
    /// `is_success == error.is_none()`.
    ///
    /// # Panics
    ///
    /// Panics on a success paired with an error, a failure without an error,
    /// or a success without a value. These are bugs in the caller.
    pub fn from_parts(is_success: bool, value: Option<T>, error: Error) -> Self {
        match (is_success, error.is_none()) {
            (true, false) => panic!("a successful outcome cannot carry an error ({error})"),
            (false, true) => panic!("a failed outcome must carry an error"),
            (true, true) => match value {
                Some(value) => Self {
                    inner: Inner::Success(value),
                },
                None => panic!("a successful outcome must carry a value"),
            },
            (false, false) => Self {
                inner: Inner::Failure(error),
            },
        }
    }

    pub fn from_result(result: Result<T, Error>) -> Self {
        match result {
            Ok(value) => Self::success(value),
            Err(error) => Self::failure(error),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.inner, Inner::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// The carried error, [`Error::NONE`] on success.
    pub fn error(&self) -> &Error {
        match &self.inner {
            Inner::Success(_) => &Error::NONE,
            Inner::Failure(error) => error,
        }
    }

    pub fn value(&self) -> Option<&T> {
        match &self.inner {
            Inner::Success(value) => Some(value),
            Inner::Failure(_) => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self.inner {
            Inner::Success(value) => Some(value),
            Inner::Failure(_) => None,
        }
    }

    pub fn into_error(self) -> Error {
        match self.inner {
            Inner::Success(_) => Error::NONE,
            Inner::Failure(error) => error,
        }
    }

    /// Converts into a std `Result` so failures propagate with `?`.
    pub fn into_result(self) -> Result<T, Error> {
        match self.inner {
            Inner::Success(value) => Ok(value),
            Inner::Failure(error) => Err(error),
        }
    }

    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self.inner {
            Inner::Success(value) => Outcome::success(f(value)),
            Inner::Failure(error) => Outcome::failure(error),
        }
    }

    pub fn and_then<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Outcome<U>,
    {
        match self.inner {
            Inner::Success(value) => f(value),
            Inner::Failure(error) => Outcome::failure(error),
        }
    }
}

impl<T> From<T> for Outcome<T> {
    fn from(value: T) -> Self {
        Self::from_value(value)
    }
}

impl<T> From<Outcome<T>> for Result<T, Error> {
    fn from(outcome: Outcome<T>) -> Self {
        outcome.into_result()
    }
}
