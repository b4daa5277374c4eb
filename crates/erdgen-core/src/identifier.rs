//! Cell identifiers backed by a global string interner.
//!
//! Diagram documents identify every cell by an opaque string (`"0"`, `"1"`,
//! `"Xy3-kq_9"`, ...). The extractor compares and hashes these ids constantly,
//! so they are interned once into a [`Id`] symbol that is `Copy` and cheap to
//! compare.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock")
}

/// Opaque identifier of a diagram cell.
///
/// Two ids are equal exactly when the strings they were created from are
/// equal. The original string is recoverable through [`fmt::Display`].
///
/// # Examples
///
/// ```
/// use erdgen_core::identifier::Id;
///
/// let entity = Id::new("student-1");
/// let same = Id::new("student-1");
///
/// assert_eq!(entity, same);
/// assert_eq!(entity, "student-1");
/// assert_eq!(entity.to_string(), "student-1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    ///
    /// # Arguments
    ///
    /// * `name` - The raw cell identifier as found in the document
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let str_value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        write!(f, "{}", str_value)
    }
}

impl From<&str> for Id {
    /// Creates an `Id` from a string slice
    ///
    /// This is a convenience implementation that calls `Id::new`.
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        interner().get(other) == Some(self.0)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
