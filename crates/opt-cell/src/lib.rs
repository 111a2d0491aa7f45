//! A one-slot optional container with a canonical empty state.
//!
//! `Opt<T>` holds zero or one value. Unlike a bare [`Option`], it is a
//! container type in its own right: it can sit inside a document tree as a
//! value, its empty state is canonical (every empty `Opt<T>` compares equal
//! to every other), and it exposes the classic container capability set:
//! [`map`](Opt::map), [`and_then`](Opt::and_then), [`get`](Opt::get), an
//! emptiness test, and an empty constructor.
//!
//! # Example
//!
//! ```
//! use opt_cell::Opt;
//!
//! let cell = Opt::new(21);
//! let doubled = cell.map(|n| n * 2);
//! assert_eq!(doubled.get(), Some(&42));
//!
//! let empty: Opt<i32> = Opt::empty();
//! assert!(empty.is_empty());
//! assert_eq!(empty.map(|n| n * 2), Opt::empty());
//! ```

/// A container holding zero or one value of type `T`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Opt<T>(Option<T>);

impl<T> Opt<T> {
    /// Create a non-empty container holding `value`.
    pub fn new(value: T) -> Self {
        Opt(Some(value))
    }

    /// The canonical empty container.
    pub fn empty() -> Self {
        Opt(None)
    }

    /// True only in the canonical empty state.
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Borrow the contained value, if any.
    pub fn get(&self) -> Option<&T> {
        self.0.as_ref()
    }

    /// Consume the container and return the contained value, if any.
    pub fn into_inner(self) -> Option<T> {
        self.0
    }

    /// Apply `f` to the contained value; empty maps to empty.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Opt<U> {
        Opt(self.0.map(f))
    }

    /// Apply a container-returning `f` to the contained value and flatten.
    pub fn and_then<U, F: FnOnce(T) -> Opt<U>>(self, f: F) -> Opt<U> {
        match self.0 {
            Some(v) => f(v),
            None => Opt::empty(),
        }
    }
}

impl<T> From<Option<T>> for Opt<T> {
    fn from(value: Option<T>) -> Self {
        Opt(value)
    }
}

impl<T> From<Opt<T>> for Option<T> {
    fn from(value: Opt<T>) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_get() {
        let cell = Opt::new("hello");
        assert!(!cell.is_empty());
        assert_eq!(cell.get(), Some(&"hello"));
    }

    #[test]
    fn test_empty_is_canonical() {
        let a: Opt<i32> = Opt::empty();
        let b: Opt<i32> = Opt::empty();
        assert!(a.is_empty());
        assert_eq!(a, b);
        assert_eq!(a.get(), None);
    }

    #[test]
    fn test_map() {
        assert_eq!(Opt::new(2).map(|n| n + 1), Opt::new(3));
        assert_eq!(Opt::<i32>::empty().map(|n| n + 1), Opt::empty());
    }

    #[test]
    fn test_and_then() {
        let half = |n: i32| if n % 2 == 0 { Opt::new(n / 2) } else { Opt::empty() };
        assert_eq!(Opt::new(4).and_then(half), Opt::new(2));
        assert_eq!(Opt::new(3).and_then(half), Opt::empty());
        assert_eq!(Opt::<i32>::empty().and_then(half), Opt::empty());
    }

    #[test]
    fn test_option_roundtrip() {
        let cell: Opt<u8> = Some(7).into();
        assert_eq!(cell.into_inner(), Some(7));
        let none: Opt<u8> = None.into();
        assert!(none.is_empty());
    }
}
