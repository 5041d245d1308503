//! Documentation comments for declarations, properties and type members.
//!
//! [`to_comment`] turns [`Annotations`] into a JSDoc-style [`CommentBlock`] and
//! [`from_comment`] reads such a block back. Together they round-trip every
//! non-blank annotation field, up to surrounding whitespace.
//!
//! Layout of a full block:
//!
//! ```text
//! /**
//!  * Title
//!  *
//!  * Description paragraph.
//!  *
//!  * @example value
//!  * @default value
//!  * @see value
//!  */
//! ```

use core_types::Annotations;

const TAG_DESCRIPTION: &str = "description";
const TAG_EXAMPLE: &str = "example";
const TAG_DEFAULT: &str = "default";
const TAG_SEE: &str = "see";

/// A documentation comment ready to print.
///
/// Lines hold the comment text without the ` * ` gutter. An empty line prints as a
/// bare ` *`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBlock {
    lines: Vec<String>,
    single_line: bool,
}

impl CommentBlock {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Print the block, each line prefixed with `indent` and terminated by `\n`.
    pub fn render(&self, indent: &str) -> String {
        if self.single_line {
            return format!("{indent}/** {} */\n", self.lines[0]);
        }

        let mut out = format!("{indent}/**\n");
        for line in &self.lines {
            if line.is_empty() {
                out.push_str(&format!("{indent} *\n"));
            } else {
                out.push_str(&format!("{indent} * {line}\n"));
            }
        }
        out.push_str(&format!("{indent} */\n"));
        out
    }
}

/// Build the comment for `annotations`, or `None` when there is nothing to say.
///
/// Blank values count as absent. Leading and trailing blank lines of a value are
/// dropped, as is trailing whitespace on each line. A text or continuation line that
/// starts with `@` gets a `\` in front so it is not read back as a tag.
pub fn to_comment(annotations: &Annotations) -> Option<CommentBlock> {
    let title = annotations.title.as_deref().and_then(text_lines);
    let has_text = title.is_some();

    let mut lines: Vec<String> = title.unwrap_or_default();
    let mut has_description = false;
    if let Some(description) = annotations.description.as_deref() {
        if has_text {
            if let Some(description) = text_lines(description) {
                lines.push(String::new());
                lines.extend(description);
                has_description = true;
            }
        } else {
            push_tag(&mut lines, TAG_DESCRIPTION, description);
        }
    }

    let mut tags = Vec::new();
    for example in &annotations.examples {
        push_tag(&mut tags, TAG_EXAMPLE, example);
    }
    if let Some(default) = &annotations.default {
        push_tag(&mut tags, TAG_DEFAULT, default);
    }
    for see in &annotations.see {
        push_tag(&mut tags, TAG_SEE, see);
    }
    if has_text && !tags.is_empty() {
        lines.push(String::new());
    }
    lines.extend(tags);

    if lines.is_empty() {
        return None;
    }

    // `/** *x */` would lose the star to the gutter on the way back.
    let single_line =
        has_text && !has_description && lines.len() == 1 && !lines[0].starts_with('*');
    Some(CommentBlock { lines, single_line })
}

/// Lines of a title or description paragraph, or `None` when blank.
fn text_lines(text: &str) -> Option<Vec<String>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Some(text.lines().map(|line| escape_line(line.trim_end())).collect())
}

/// Lines of a tag value without surrounding blank lines, or `None` when blank.
fn value_lines(value: &str) -> Option<Vec<&str>> {
    let lines: Vec<&str> = value.lines().map(str::trim_end).collect();
    let first = lines.iter().position(|line| !line.is_empty())?;
    let last = lines.iter().rposition(|line| !line.is_empty())?;
    Some(lines[first..=last].to_vec())
}

fn push_tag(lines: &mut Vec<String>, tag: &str, value: &str) {
    let Some(value_lines) = value_lines(value) else {
        return;
    };
    if let Some((first, rest)) = value_lines.split_first() {
        lines.push(format!("@{tag} {}", escape(first)));
        lines.extend(rest.iter().map(|line| escape_line(line)));
    }
}

fn escape(text: &str) -> String {
    text.replace("*/", "*\\/")
}

fn unescape(text: &str) -> String {
    text.replace("*\\/", "*/")
}

/// Escape a line that starts a row of the comment body.
fn escape_line(line: &str) -> String {
    let line = escape(line);
    if line.trim_start_matches('\\').starts_with('@') {
        format!("\\{line}")
    } else {
        line
    }
}

fn unescape_line(line: &str) -> &str {
    match line.strip_prefix('\\') {
        Some(rest) if rest.trim_start_matches('\\').starts_with('@') => rest,
        _ => line,
    }
}

/// Recover annotations from a raw `/** ... */` comment.
///
/// Anything that does not fit (unknown tags, tags without a value) is dropped.
pub fn from_comment(comment: Option<&str>) -> Annotations {
    let mut annotations = Annotations::default();
    let Some(comment) = comment else {
        return annotations;
    };

    let lines = comment_lines(comment);

    let tag_start = lines
        .iter()
        .position(|line| line.starts_with('@'))
        .unwrap_or(lines.len());
    let (text, tags) = lines.split_at(tag_start);

    let text: Vec<&str> = text.iter().map(|line| unescape_line(line)).collect();
    let text = text.join("\n");
    let text = text.trim();
    if !text.is_empty() {
        match text.split_once("\n\n") {
            Some((title, description)) => {
                annotations.title = Some(unescape(title.trim_end()));
                let description = description.trim();
                if !description.is_empty() {
                    annotations.description = Some(unescape(description));
                }
            }
            None => annotations.title = Some(unescape(text)),
        }
    }

    for (tag, value) in split_tags(tags) {
        let Some(value) = value else {
            continue;
        };
        match tag {
            TAG_DESCRIPTION => {
                annotations.description.get_or_insert(value);
            }
            TAG_EXAMPLE => annotations.examples.push(value),
            TAG_DEFAULT => annotations.default = Some(value),
            TAG_SEE => annotations.see.push(value),
            _ => {}
        }
    }

    annotations
}

/// Strip delimiters and the ` * ` gutter. Indentation after the gutter is kept.
fn comment_lines(comment: &str) -> Vec<String> {
    let body = comment.trim();
    let body = body.strip_prefix("/**").unwrap_or(body);
    let body = body.strip_suffix("*/").unwrap_or(body);

    body.lines()
        .map(|line| {
            let line = line.trim_start();
            let line = line.strip_prefix('*').unwrap_or(line);
            let line = line.strip_prefix(' ').unwrap_or(line);
            line.trim_end().to_string()
        })
        .skip_while(|line| line.is_empty())
        .collect()
}

/// Group tag lines into `(name, value)` pairs. Lines that follow a tag line and do not
/// start a new tag continue its value.
///
/// A value whose first line is blank starts on the next line, so `"\nfoo"` reads
/// back as `"foo"`.
fn split_tags(lines: &[String]) -> Vec<(&str, Option<String>)> {
    let mut tags: Vec<(&str, Vec<&str>)> = Vec::new();
    for line in lines {
        if let Some(rest) = line.strip_prefix('@') {
            let (name, value) = rest.split_once(' ').unwrap_or((rest, ""));
            tags.push((name, vec![value]));
        } else if let Some((_, value)) = tags.last_mut() {
            value.push(unescape_line(line));
        }
    }

    tags.into_iter()
        .map(|(name, parts)| {
            let value = parts.join("\n");
            let value = value.trim_end();
            let value = value.strip_prefix('\n').unwrap_or(value);
            let value = (!value.trim().is_empty()).then(|| unescape(value));
            (name, value)
        })
        .collect()
}
