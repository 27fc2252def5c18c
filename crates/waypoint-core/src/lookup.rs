//! Explicit outcome of a collaborator lookup.

use crate::LookupError;

/// Result of an asynchronous lookup, with "nothing found" kept distinct from
/// "the lookup failed".
///
/// Collaborators report `Result<_, LookupError>`; the application layer
/// normalises that into a `Lookup` so every consumer sees the same three
/// cases and chooses whether to surface or suppress failures.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    /// The lookup succeeded with data.
    Found(T),
    /// The lookup succeeded but returned nothing.
    Empty,
    /// The lookup failed.
    Failed(LookupError),
}

impl<T> Lookup<T> {
    /// Normalise a list result: an empty list becomes [`Lookup::Empty`].
    pub fn from_list(result: Result<Vec<T>, LookupError>) -> Lookup<Vec<T>> {
        match result {
            Ok(items) if items.is_empty() => Lookup::Empty,
            Ok(items) => Lookup::Found(items),
            Err(e) => Lookup::Failed(e),
        }
    }

    /// Keep only the top-ranked candidate of a ranked list.
    pub fn first_of(result: Result<Vec<T>, LookupError>) -> Self {
        match result {
            Ok(items) => items.into_iter().next().map_or(Self::Empty, Self::Found),
            Err(e) => Self::Failed(e),
        }
    }

    /// Normalise an optional result.
    pub fn from_option(result: Result<Option<T>, LookupError>) -> Self {
        match result {
            Ok(Some(item)) => Self::Found(item),
            Ok(None) => Self::Empty,
            Err(e) => Self::Failed(e),
        }
    }

    /// The data, if any.
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(item) => Some(item),
            Self::Empty | Self::Failed(_) => None,
        }
    }

    /// The failure, if any.
    pub fn error(&self) -> Option<&LookupError> {
        match self {
            Self::Failed(e) => Some(e),
            Self::Found(_) | Self::Empty => None,
        }
    }

    /// Outcome without the payload.
    pub fn kind(&self) -> LookupKind {
        match self {
            Self::Found(_) => LookupKind::Found,
            Self::Empty => LookupKind::Empty,
            Self::Failed(_) => LookupKind::Failed,
        }
    }
}

/// Payload-free summary of a [`Lookup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    /// Data was returned.
    Found,
    /// Nothing was returned.
    Empty,
    /// The lookup failed.
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_is_empty() {
        let lookup = Lookup::<u8>::from_list(Ok(Vec::new()));
        assert_eq!(lookup, Lookup::Empty);
    }

    #[test]
    fn first_of_takes_top_ranked() {
        assert_eq!(Lookup::first_of(Ok(vec![3, 1, 2])), Lookup::Found(3));
        assert_eq!(Lookup::<u8>::first_of(Ok(Vec::new())), Lookup::Empty);
    }

    #[test]
    fn failure_is_preserved() {
        let err = LookupError::Network("offline".into());
        let lookup = Lookup::<u8>::from_option(Err(err.clone()));

        assert_eq!(lookup.kind(), LookupKind::Failed);
        assert_eq!(lookup.error(), Some(&err));
        assert_eq!(lookup.found(), None);
    }
}
