// policy checklist
//
// the policy is a static, ordered table of (name, hard cap, predicate).
// adding a criterion means adding a row; the checker itself never changes.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::analysis::charset::CharsetProfile;
use crate::analysis::patterns::{PatternFinding, PatternKind};

/// Sequential/Repeated findings above this severity fail the runs criterion
pub const RUN_SEVERITY_THRESHOLD: f64 = 0.5;

/// score ceiling applied when the minimum-length criterion fails
pub const SHORT_PASSWORD_CAP: u8 = 19;

/// everything a criterion may look at
pub struct CriterionInput<'a> {
    pub length: usize,
    pub charset: &'a CharsetProfile,
    pub findings: &'a [PatternFinding],
}

impl CriterionInput<'_> {
    fn has_any(&self, kinds: &[PatternKind]) -> bool {
        self.findings.iter().any(|f| kinds.contains(&f.kind))
    }

    /// absence criteria never pass for an empty password
    fn none_of(&self, kinds: &[PatternKind]) -> bool {
        self.length > 0 && !self.has_any(kinds)
    }
}

pub struct Criterion {
    pub name: &'static str,
    /// when the criterion fails, the score may not exceed this
    pub hard_cap: Option<u8>,
    pub check: fn(&CriterionInput<'_>) -> bool,
}

pub static POLICY: &[Criterion] = &[
    Criterion {
        name: "At least 8 characters",
        hard_cap: Some(SHORT_PASSWORD_CAP),
        check: |i| i.length >= 8,
    },
    Criterion {
        name: "At least 12 characters (recommended)",
        hard_cap: None,
        check: |i| i.length >= 12,
    },
    Criterion {
        name: "Contains lowercase letters",
        hard_cap: None,
        check: |i| i.charset.has_lower,
    },
    Criterion {
        name: "Contains uppercase letters",
        hard_cap: None,
        check: |i| i.charset.has_upper,
    },
    Criterion {
        name: "Contains numbers",
        hard_cap: None,
        check: |i| i.charset.has_digit,
    },
    Criterion {
        name: "Contains special symbols",
        hard_cap: None,
        check: |i| i.charset.has_symbol,
    },
    Criterion {
        name: "No dictionary words",
        hard_cap: None,
        check: |i| i.none_of(&[PatternKind::DictionaryWord, PatternKind::LeetspeakWord]),
    },
    Criterion {
        name: "No sequential or repeated runs",
        hard_cap: None,
        check: |i| {
            i.length > 0
                && !i.findings.iter().any(|f| {
                    matches!(f.kind, PatternKind::Sequential | PatternKind::Repeated)
                        && f.severity > RUN_SEVERITY_THRESHOLD
                })
        },
    },
    Criterion {
        name: "No keyboard walks",
        hard_cap: None,
        check: |i| i.none_of(&[PatternKind::KeyboardWalk]),
    },
    Criterion {
        name: "No date patterns",
        hard_cap: None,
        check: |i| i.none_of(&[PatternKind::DateLike]),
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriterionOutcome {
    pub name: &'static str,
    pub passed: bool,
    pub hard_cap: Option<u8>,
}

/// ordered checklist; serializes as a JSON object in policy order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CriteriaResult(pub Vec<CriterionOutcome>);

impl CriteriaResult {
    pub fn iter(&self) -> impl Iterator<Item = &CriterionOutcome> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.0.iter().find(|c| c.name == name).map(|c| c.passed)
    }

    pub fn passed_count(&self) -> usize {
        self.0.iter().filter(|c| c.passed).count()
    }

    /// fraction of criteria passed, 0.0 for an empty checklist
    pub fn passed_fraction(&self) -> f64 {
        if self.0.is_empty() {
            return 0.0;
        }
        self.passed_count() as f64 / self.0.len() as f64
    }

    /// the lowest hard cap among failed criteria
    pub fn hard_cap(&self) -> Option<u8> {
        self.0
            .iter()
            .filter(|c| !c.passed)
            .filter_map(|c| c.hard_cap)
            .min()
    }
}

impl Serialize for CriteriaResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for outcome in &self.0 {
            map.serialize_entry(outcome.name, &outcome.passed)?;
        }
        map.end()
    }
}

/// evaluate the policy table in declaration order
pub fn check(input: &CriterionInput<'_>) -> CriteriaResult {
    CriteriaResult(
        POLICY
            .iter()
            .map(|c| CriterionOutcome {
                name: c.name,
                passed: (c.check)(input),
                hard_cap: c.hard_cap,
            })
            .collect(),
    )
}
