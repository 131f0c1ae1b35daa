//! Part header label parsing.
//!
//! The first line of a part file is a comment header such as
//! `0 Brick 2 x 4` or `0 ~Moved to 3001`. The first word of the label
//! is the part's category. A handful of marker characters signal
//! alternate official/unofficial naming and are stripped before the
//! category is taken.

/// Classification of a part header label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    /// The label is a redirect note, not a category. The part must be
    /// skipped entirely.
    Relocated,
    /// The part's category name.
    Category(String),
}

/// Parse the first line of a part file into a [`Label`].
///
/// Grammar: an optional leading `0` comment marker plus the whitespace
/// after it, then the label text. A label containing `~Moved to` is a
/// relocation note. Otherwise the label is cleaned with [`clean_label`]
/// and its first whitespace-delimited token is the category.
///
/// Returns a reason string when the line is empty or no token survives
/// cleaning; the caller treats that as fatal for the run.
pub fn parse_label(line: &str) -> Result<Label, &'static str> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Err("empty header line");
    }

    let raw = line.strip_prefix('0').map(str::trim_start).unwrap_or(line);

    if raw.contains("~Moved to") {
        return Ok(Label::Relocated);
    }

    let cleaned = clean_label(raw);
    match cleaned.split_whitespace().next() {
        Some(token) => Ok(Label::Category(token.to_string())),
        None => Err("no category token after cleaning"),
    }
}

/// Strip naming markers from a raw label.
///
/// `~` is removed everywhere; `_` and `=` are removed (everywhere) only
/// when they lead the label, matching the catalog's naming convention
/// for unofficial and alias entries.
pub fn clean_label(raw: &str) -> String {
    let mut label = raw.replace('~', "");
    if label.starts_with('_') {
        label = label.replace('_', "");
    }
    if label.starts_with('=') {
        label = label.replace('=', "");
    }
    label
}
