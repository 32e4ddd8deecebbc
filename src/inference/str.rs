/// String evidence for one position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StrC {
    pub samples: u64,
    /// Every sample so far parsed as an RFC 3339 timestamp.
    pub all_time: bool,
}

impl StrC {
    pub fn observe(s: &str) -> Self {
        StrC { samples: 1, all_time: looks_like_timestamp(s) }
    }

    pub(super) fn join(a: &Self, b: &Self) -> Self {
        StrC {
            samples: a.samples + b.samples,
            all_time: a.all_time && b.all_time,
        }
    }
}

pub fn looks_like_timestamp(s: &str) -> bool {
    // cheap gate before handing it to chrono
    s.len() >= 20 && s.as_bytes()[4] == b'-' && chrono::DateTime::parse_from_rfc3339(s).is_ok()
}
