//! Line normalization ahead of parsing.
//!
//! Each physical line is tagged with its 1-based line number, `#` comments
//! are removed and lines ending in `\` are joined with the next one. The
//! joined line keeps the number of its first physical line.

/// Opening marker of a line number tag.
const TAG_OPEN: &str = "@!meta:";
/// Closing marker of a line number tag.
const TAG_CLOSE: &str = "!@";

/// Prefix `text` with a tag carrying `line`.
pub fn tag(line: usize, text: &str) -> String {
    format!("{}{}{}{}", TAG_OPEN, line, TAG_CLOSE, text)
}

/// Split a normalized line into its leading line number (if tagged) and
/// its text with every tag removed.
pub fn untag(line: &str) -> (Option<usize>, String) {
    let trimmed = line.trim();
    let number = trimmed
        .strip_prefix(TAG_OPEN)
        .and_then(|rest| rest.split_once(TAG_CLOSE))
        .and_then(|(n, _)| n.parse().ok());

    let mut text = String::with_capacity(trimmed.len());
    let mut rest = trimmed;
    while let Some(start) = rest.find("@!") {
        let Some(len) = rest[start + 2..].find(TAG_CLOSE) else {
            break;
        };
        text.push_str(&rest[..start]);
        rest = &rest[start + 2 + len + TAG_CLOSE.len()..];
    }
    text.push_str(rest);

    (number, text.trim().to_string())
}

/// Normalize raw BLIF text into tagged lines ready for the parser.
pub fn normalize(source: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut pending = String::new();

    for (idx, raw) in source.lines().enumerate() {
        let code = raw.split('#').next().unwrap_or_default().trim();
        let tagged = tag(idx + 1, code);

        if let Some(head) = code.strip_suffix('\\') {
            if pending.is_empty() {
                pending = tag(idx + 1, "");
            }
            pending.push_str(&head.replace('\\', " "));
            pending.push(' ');
            continue;
        }

        if pending.is_empty() {
            lines.push(tagged);
        } else {
            pending.push_str(code);
            lines.push(std::mem::take(&mut pending));
        }
    }

    if !pending.is_empty() {
        lines.push(pending);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_untag() {
        assert_eq!(untag(&tag(12, ".model top")), (Some(12), ".model top".to_string()));
        assert_eq!(untag(".names a b"), (None, ".names a b".to_string()));
        assert_eq!(
            untag("@!meta:3!@.inputs a @!meta:4!@b"),
            (Some(3), ".inputs a b".to_string())
        );
    }

    #[test]
    fn test_strips_comments() {
        let lines = normalize("# header\n.model top # trailing\n\n11 1");
        assert_eq!(lines.len(), 4);
        assert_eq!(untag(&lines[0]), (Some(1), String::new()));
        assert_eq!(untag(&lines[1]), (Some(2), ".model top".to_string()));
        assert_eq!(untag(&lines[3]), (Some(4), "11 1".to_string()));
    }

    #[test]
    fn test_joins_continuations() {
        let lines = normalize(".inputs a b \\\n  c d\n.outputs e");
        assert_eq!(lines.len(), 2);
        assert_eq!(untag(&lines[0]), (Some(1), ".inputs a b  c d".to_string()));
        assert_eq!(untag(&lines[1]), (Some(3), ".outputs e".to_string()));
    }

    #[test]
    fn test_trailing_continuation_is_kept() {
        let lines = normalize(".inputs a \\");
        assert_eq!(lines.len(), 1);
        assert_eq!(untag(&lines[0]).1, ".inputs a");
    }
}
