use crate::dialect::Dialect;

/// One lexical piece of a field: literal text, or a reference token with
/// its brackets stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Reference(&'a str),
}

/// Splits a field into literal text and reference tokens.
///
/// The scan is a two-state machine over the field's characters, left to
/// right, non-overlapping, non-nested: an opening bracket starts a
/// candidate token, the first closing bracket ends it, and a second
/// opening bracket before any close abandons the current candidate (its
/// text stays literal) and starts a new one. An unclosed candidate at the
/// end of the field is literal text, never an error.
///
/// Reassembling the segments reproduces the field byte-for-byte.
pub fn segments<'a>(field: &'a str, dialect: &Dialect) -> Vec<Segment<'a>> {
    let open = dialect.reference_open();
    let close = dialect.reference_close();

    let mut out = Vec::new();
    let mut text_start = 0;
    let mut candidate: Option<usize> = None;

    for (i, c) in field.char_indices() {
        if c == open {
            candidate = Some(i);
        } else if c == close {
            if let Some(open_at) = candidate.take() {
                if open_at > text_start {
                    out.push(Segment::Text(&field[text_start..open_at]));
                }
                out.push(Segment::Reference(&field[open_at + open.len_utf8()..i]));
                text_start = i + c.len_utf8();
            }
            // a close with no pending open stays literal
        }
    }
    if text_start < field.len() {
        out.push(Segment::Text(&field[text_start..]));
    }
    out
}

/// Reassembles segments into field text. Identity over `segments()`.
pub fn render(segments: &[Segment<'_>], dialect: &Dialect) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Reference(key) => out.push_str(&dialect.reference_token(key)),
        }
    }
    out
}

/// Rewrites every reference token whose content exactly equals `old` to
/// reference `new` instead. Literal text is untouched, even where it
/// happens to contain `old` as a free substring.
pub fn rewrite_references(field: &str, old: &str, new: &str, dialect: &Dialect) -> String {
    let mut out = String::with_capacity(field.len());
    for segment in segments(field, dialect) {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Reference(key) if key == old => out.push_str(&dialect.reference_token(new)),
            Segment::Reference(key) => out.push_str(&dialect.reference_token(key)),
        }
    }
    out
}
