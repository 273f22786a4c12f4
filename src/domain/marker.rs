//! The `[AI]` commit message marker.
//!
//! A marked commit carries the literal `[AI]` at the start of its subject
//! line, followed by a space and the human-written subject. Nothing else in
//! the message is touched, so the marker shows up in `git log --oneline` and
//! can be found with a plain prefix test.

/// Literal written at the start of an AI-assisted commit's subject line.
pub const AI_MARKER: &str = "[AI]";

/// Classification of a single commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Ai,
    NonAi,
}

impl Marker {
    /// Build a marker from a yes/no answer
    pub fn from_flag(is_ai: bool) -> Self {
        if is_ai {
            Marker::Ai
        } else {
            Marker::NonAi
        }
    }

    pub fn is_ai(self) -> bool {
        self == Marker::Ai
    }
}

/// Tag a commit message as AI-assisted when `is_ai` is true.
///
/// The marker goes in front of the subject, which is the first line that is
/// neither blank nor a `#` comment (hooks can see git's comment block ahead of
/// the message). Already-marked subjects and messages without a subject are
/// returned unchanged.
///
/// ```
/// use git_ai::domain::marker::encode;
///
/// assert_eq!(encode("fix login\n", true), "[AI] fix login\n");
/// assert_eq!(encode("fix login\n", false), "fix login\n");
/// ```
pub fn encode(message: &str, is_ai: bool) -> String {
    if !is_ai {
        return message.to_string();
    }

    let Some((offset, subject)) = subject_line(message) else {
        return message.to_string();
    };
    if is_marked_line(subject) {
        return message.to_string();
    }

    let mut encoded = String::with_capacity(message.len() + AI_MARKER.len() + 1);
    encoded.push_str(&message[..offset]);
    encoded.push_str(AI_MARKER);
    encoded.push(' ');
    encoded.push_str(&message[offset..]);
    encoded
}

/// Read the marker from a stored commit message.
///
/// The subject is found the same way [encode] finds it, so messages kept
/// with `--cleanup=verbatim` still decode. The match is exact: `[AI]` alone
/// or `[AI] ` followed by the subject.
pub fn decode(message: &str) -> Marker {
    let marked = subject_line(message).is_some_and(|(_, subject)| is_marked_line(subject));
    Marker::from_flag(marked)
}

/// Byte offset and content of the first line that is neither blank nor a
/// `#` comment.
fn subject_line(message: &str) -> Option<(usize, &str)> {
    let mut offset = 0;
    for line in message.split_inclusive('\n') {
        let content = line.trim_end_matches(['\n', '\r']);
        if !content.trim().is_empty() && !content.starts_with('#') {
            return Some((offset, content));
        }
        offset += line.len();
    }
    None
}

fn is_marked_line(line: &str) -> bool {
    match line.strip_prefix(AI_MARKER) {
        Some(rest) => rest.is_empty() || rest.starts_with(' '),
        None => false,
    }
}
