//! Parsing of draw.io style strings.
//!
//! A style is a `;`-separated list of entries. Most entries are `key=value`
//! pairs; a bare entry (no `=`) names a base style such as `ellipse` or
//! `edgeLabel`:
//!
//! ```text
//! endArrow=block;endSize=16;endFill=0;html=1;
//! ellipse;whiteSpace=wrap;html=1;
//! ```

use winnow::{
    Parser as _,
    combinator::{alt, opt, preceded, repeat},
    error::{ContextError, ErrMode},
    token::take_till,
};

type Input<'a> = &'a str;
type IResult<O> = Result<O, ErrMode<ContextError<&'static str>>>;

/// One entry of a style string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleEntry<'a> {
    pub key: &'a str,
    pub value: Option<&'a str>,
}

/// A parsed style string; entries keep their written order.
///
/// # Examples
///
/// ```
/// use erdgen_parser::style::Style;
///
/// let style = Style::parse("endArrow=block;endFill=0;html=1;");
/// assert_eq!(style.get("endArrow"), Some("block"));
/// assert_eq!(style.get("endFill"), Some("0"));
/// assert_eq!(style.get("startArrow"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style<'a> {
    entries: Vec<StyleEntry<'a>>,
}

fn entry<'a>(input: &mut Input<'a>) -> IResult<StyleEntry<'a>> {
    (
        take_till(1.., ['=', ';']).map(str::trim),
        opt(preceded('=', take_till(0.., ';')).map(str::trim)),
    )
        .map(|(key, value)| StyleEntry { key, value })
        .context("style entry")
        .parse_next(input)
}

fn piece<'a>(input: &mut Input<'a>) -> IResult<Option<StyleEntry<'a>>> {
    alt((
        ';'.value(None),
        entry.map(Some),
        // `=value` without a key carries nothing usable.
        preceded('=', take_till(0.., ';')).value(None),
    ))
    .parse_next(input)
}

impl<'a> Style<'a> {
    /// Parse a style string. Parsing never fails; unusable fragments are skipped.
    pub fn parse(source: &'a str) -> Self {
        let mut input = source;
        let entries = repeat(0.., piece)
            .fold(Vec::new, |mut entries, piece| {
                if let Some(entry) = piece {
                    entries.push(entry);
                }
                entries
            })
            .parse_next(&mut input)
            .unwrap_or_default();
        Self { entries }
    }

    /// Value of the last entry named `key`.
    ///
    /// draw.io lets later entries override earlier ones.
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.key == key)
            .and_then(|entry| entry.value)
    }

    /// Whether a bare entry (base style) named `name` is present.
    pub fn has_base(&self, name: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.value.is_none() && entry.key == name)
    }

    /// Whether `key` is set to one of the "true" spellings (`1`, `true`).
    pub fn is_enabled(&self, key: &str) -> bool {
        matches!(self.get(key), Some("1" | "true"))
    }

    pub fn entries(&self) -> &[StyleEntry<'a>] {
        &self.entries
    }
}
