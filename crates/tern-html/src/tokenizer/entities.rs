//! Character entity lookup table.
//!
//! Only a fixed handful of named entities is recognised. Anything else decodes
//! to nothing.

/// Maps entity names (without the leading `&` and trailing `;`) to their
/// replacement text.
static ENTITIES: &[(&str, &str)] = &[
    ("lt", "<"),
    ("gt", ">"),
    ("amp", "&"),
    ("ndash", "-"),
    ("copy", "\u{00A9}"),
    ("quot", "\""),
    ("shy", "\u{00AD}"),
];

/// Look up a named entity.
///
/// Returns `None` for names outside the table. Matching is case-sensitive,
/// as `&LT;` is not the same entity as `&lt;`.
#[must_use]
pub fn lookup_entity(name: &str) -> Option<&'static str> {
    ENTITIES
        .iter()
        .find(|(entity, _)| *entity == name)
        .map(|(_, replacement)| *replacement)
}
