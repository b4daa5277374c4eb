//! Normalization of free diagram text into identifiers.
//!
//! draw.io stores labels as HTML fragments: entities are escaped, and
//! formatting or stereotypes appear as angle-bracket markup. Normalization
//! runs in a fixed order:
//!
//! 1. [`decode_entities`] - `&nbsp;`, `&lt;`, `&gt;`, `&amp;`, `&quot;`,
//!    `&apos;`, and numeric references
//! 2. [`strip_markup`] - tags such as `<b>` and stereotypes such as `<<interface>>`
//! 3. [`sanitize_identifier`] - keep ASCII letters, digits, and `_`
//!
//! Decoding runs first so that escaped markup (`&lt;b&gt;`) is stripped too.

use winnow::{
    Parser as _,
    combinator::{alt, delimited, preceded, repeat, terminated},
    error::{ContextError, ErrMode},
    token::{any, literal, one_of, take, take_till, take_until, take_while},
};

type Input<'a> = &'a str;
type IResult<O> = Result<O, ErrMode<ContextError<&'static str>>>;

/// A decoded piece of text: a borrowed run or a single decoded character.
enum Piece<'a> {
    Run(&'a str),
    Char(char),
}

impl Piece<'_> {
    fn push_to(self, out: &mut String) {
        match self {
            Piece::Run(run) => out.push_str(run),
            Piece::Char(ch) => out.push(ch),
        }
    }
}

/// `&name;` for the entities draw.io emits. `&nbsp;` becomes a plain space.
fn named_entity(input: &mut Input<'_>) -> IResult<char> {
    delimited(
        '&',
        alt((
            literal("nbsp").value(' '),
            literal("lt").value('<'),
            literal("gt").value('>'),
            literal("amp").value('&'),
            literal("quot").value('"'),
            literal("apos").value('\''),
        )),
        ';',
    )
    .parse_next(input)
}

/// `&#NN;` or `&#xHH;`.
fn numeric_entity(input: &mut Input<'_>) -> IResult<char> {
    delimited(
        "&#",
        alt((
            preceded(one_of(['x', 'X']), take_while(1..=6, |c: char| c.is_ascii_hexdigit()))
                .verify_map(|hex: &str| u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)),
            take_while(1..=7, |c: char| c.is_ascii_digit())
                .verify_map(|dec: &str| dec.parse::<u32>().ok().and_then(char::from_u32)),
        )),
        ';',
    )
    .parse_next(input)
}

fn entity_piece<'a>(input: &mut Input<'a>) -> IResult<Piece<'a>> {
    alt((
        take_till(1.., '&').map(Piece::Run),
        named_entity.map(Piece::Char),
        numeric_entity.map(Piece::Char),
        // A lone `&` that does not start a known entity is kept as is.
        any.map(Piece::Char),
    ))
    .context("entity")
    .parse_next(input)
}

/// Markup is dropped (`None`); everything else is kept.
fn markup_piece<'a>(input: &mut Input<'a>) -> IResult<Option<&'a str>> {
    alt((
        take_till(1.., '<').map(Some),
        delimited("<<", take_until(0.., ">>"), ">>").value(None),
        terminated(preceded('<', take_till(0.., '>')), '>').value(None),
        // An unterminated `<` is not markup.
        take(1usize).map(Some),
    ))
    .context("markup")
    .parse_next(input)
}

/// Decode HTML character references.
///
/// Unknown or malformed references are left untouched.
///
/// # Examples
///
/// ```
/// use erdgen_parser::text::decode_entities;
///
/// assert_eq!(decode_entities("a&nbsp;&lt;b&gt;"), "a <b>");
/// assert_eq!(decode_entities("R&amp;D &#65;&#x42;"), "R&D AB");
/// assert_eq!(decode_entities("fish & chips &copy;"), "fish & chips &copy;");
/// ```
pub fn decode_entities(text: &str) -> String {
    let mut input = text;
    // Every alternative consumes at least one character, so the repetition
    // only stops at the end of input.
    repeat(0.., entity_piece)
        .fold(
            || String::with_capacity(text.len()),
            |mut out, piece| {
                piece.push_to(&mut out);
                out
            },
        )
        .parse_next(&mut input)
        .unwrap_or_else(|_| text.to_owned())
}

/// Remove angle-bracket markup: formatting tags and `<<stereotype>>` markers.
///
/// # Examples
///
/// ```
/// use erdgen_parser::text::strip_markup;
///
/// assert_eq!(strip_markup("<b>Student</b>"), "Student");
/// assert_eq!(strip_markup("<<interface>>Shape"), "Shape");
/// assert_eq!(strip_markup("a < b"), "a < b");
/// ```
pub fn strip_markup(text: &str) -> String {
    let mut input = text;
    repeat(0.., markup_piece)
        .fold(
            || String::with_capacity(text.len()),
            |mut out, piece| {
                if let Some(run) = piece {
                    out.push_str(run);
                }
                out
            },
        )
        .parse_next(&mut input)
        .unwrap_or_else(|_| text.to_owned())
}

/// Keep only ASCII letters, digits, and underscores.
///
/// Idempotent: sanitizing a sanitized string returns it unchanged.
pub fn sanitize_identifier(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Decode entities and strip markup, keeping all other characters.
///
/// This is the readable text of a label, used where words still matter.
pub fn label_text(raw: &str) -> String {
    strip_markup(&decode_entities(raw))
}

/// The full normalization pipeline applied to entity names.
///
/// # Examples
///
/// ```
/// use erdgen_parser::text::normalize_name;
///
/// assert_eq!(normalize_name("<b>Course&nbsp;Section</b>"), "CourseSection");
/// assert_eq!(normalize_name("&lt;&lt;interface&gt;&gt;<br>Payable"), "Payable");
/// assert_eq!(normalize_name("<i></i>"), "");
/// ```
pub fn normalize_name(raw: &str) -> String {
    sanitize_identifier(&label_text(raw))
}

/// Lowercase the first character, leaving the rest untouched.
pub fn lower_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
