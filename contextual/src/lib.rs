use std::fmt::Display;

/// An error together with a short description of what was being attempted
/// when it happened.
///
/// Displays as `<context> :: <source>`.
#[derive(Debug)]
pub struct Error<E> {
    context: String,
    source: E,
}

impl<E> Error<E> {
    pub fn new(context: impl ToString, source: E) -> Self {
        Self {
            context: context.to_string(),
            source,
        }
    }

    #[inline]
    pub fn context(&self) -> &str {
        &self.context
    }
}

impl<E: std::error::Error + 'static> std::error::Error for Error<E> {
    #[inline]
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl<E: Display> Display for Error<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} :: {}", self.context, self.source)
    }
}

pub trait Context<T, E> {
    fn context(self, context: impl ToString) -> Result<T, Error<E>>;
}

impl<T, E> Context<T, E> for Result<T, E> {
    fn context(self, context: impl ToString) -> Result<T, Error<E>> {
        self.map_err(|e| Error::new(context, e))
    }
}
