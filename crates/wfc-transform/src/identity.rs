//! Subject and admission identity from header comments.

use std::sync::LazyLock;

use regex::Regex;

static HADM_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)hadm_id\s+(\d+)").expect("Invalid hadm_id regex"));

static HOSPITAL_ADMISSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)hospital admission id[:\s]+(\d+)")
        .expect("Invalid hospital admission id regex")
});

static SUBJECT_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)subject_id\s+(\d+)").expect("Invalid subject_id regex"));

/// Resolved record identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject_id: u64,
    pub hadm_id: Option<String>,
}

/// Resolves subject and admission ids.
///
/// Comments are scanned in order. For each comment, a `hadm_id <digits>`
/// form is tried if the comment mentions `hadm_id`, otherwise a
/// `hospital admission id <digits>` form. A later successful match
/// overwrites an earlier one, whichever form it used. `subject_id <digits>`
/// overrides `path_subject_id`, again last match wins.
///
/// The admission id is kept as text so leading zeros survive.
pub fn resolve_identity<S: AsRef<str>>(comments: &[S], path_subject_id: u64) -> Identity {
    let mut hadm_id = None;
    let mut subject_id = path_subject_id;

    for comment in comments {
        let comment = comment.as_ref();
        let lower = comment.to_lowercase();

        let admission = if lower.contains("hadm_id") {
            capture(&HADM_ID_REGEX, comment)
        } else if lower.contains("hospital admission id") {
            capture(&HOSPITAL_ADMISSION_REGEX, comment)
        } else {
            None
        };
        if let Some(id) = admission {
            hadm_id = Some(id.to_string());
        }

        if lower.contains("subject_id")
            && let Some(id) = capture(&SUBJECT_ID_REGEX, comment).and_then(|v| v.parse().ok())
        {
            subject_id = id;
        }
    }

    Identity {
        subject_id,
        hadm_id,
    }
}

fn capture<'a>(regex: &Regex, text: &'a str) -> Option<&'a str> {
    regex
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
