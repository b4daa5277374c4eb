//! Generated class texts, in entity order.

use indexmap::IndexMap;

/// The source text of one generated class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedClass {
    name: String,
    file_name: String,
    source: String,
}

impl GeneratedClass {
    pub fn new(name: impl Into<String>, file_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_name: file_name.into(),
            source: source.into(),
        }
    }

    /// The class name, unique among the generated classes.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Suggested file name: class name plus the target's file suffix.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

/// All classes generated from one model, in entity order.
///
/// Writing them anywhere is left to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedClasses {
    classes: Vec<GeneratedClass>,
}

impl GeneratedClasses {
    pub(crate) fn new(classes: Vec<GeneratedClass>) -> Self {
        Self { classes }
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeneratedClass> {
        self.classes.iter()
    }

    /// Look a class up by its generated name.
    pub fn get(&self, name: &str) -> Option<&GeneratedClass> {
        self.classes.iter().find(|class| class.name == name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Ordered mapping from class name to source text.
    pub fn to_map(&self) -> IndexMap<String, String> {
        self.classes
            .iter()
            .map(|class| (class.name.clone(), class.source.clone()))
            .collect()
    }
}

impl IntoIterator for GeneratedClasses {
    type Item = GeneratedClass;
    type IntoIter = std::vec::IntoIter<GeneratedClass>;

    fn into_iter(self) -> Self::IntoIter {
        self.classes.into_iter()
    }
}

impl<'a> IntoIterator for &'a GeneratedClasses {
    type Item = &'a GeneratedClass;
    type IntoIter = std::slice::Iter<'a, GeneratedClass>;

    fn into_iter(self) -> Self::IntoIter {
        self.classes.iter()
    }
}
