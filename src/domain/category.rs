//! Keyword classification rules
//!
//! Classification is a fixed, ordered rule table. Each rule is a list of
//! terms and the outcome of a substring match; the first matching rule wins.
//! The override rule runs against the trimmed keyword as written, every other
//! rule against the trimmed, lowercased keyword.

use crate::domain::KeywordCategory;

/// How a rule compares its terms against the keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Trimmed, original casing
    AsWritten,
    /// Trimmed and lowercased
    Folded,
}

/// One entry in the classification priority table
#[derive(Debug)]
pub struct CategoryRule {
    pub name: &'static str,
    pub mode: MatchMode,
    pub terms: &'static [&'static str],
    pub category: KeywordCategory,
}

impl CategoryRule {
    fn matches(&self, as_written: &str, folded: &str) -> bool {
        let haystack = match self.mode {
            MatchMode::AsWritten => as_written,
            MatchMode::Folded => folded,
        };
        self.terms.iter().any(|term| haystack.contains(term))
    }
}

/// Known false positives: phrases that contain a category term but are not
/// about that category
pub const OVERRIDE_TERMS: &[&str] = &[
    "제시카 알바",
    "제시카알바",
    "알바니아",
    "알바트로스",
    "보험왕 드라마",
];

pub const INSURANCE_TERMS: &[&str] = &[
    "보험",
    "실비",
    "실손",
    "설계사",
    "보장분석",
    "보험료",
    "insurance",
];

pub const SIDEJOB_TERMS: &[&str] = &[
    "부업",
    "알바",
    "아르바이트",
    "n잡",
    "투잡",
    "재택",
    "파트너스",
    "부수입",
    "앱테크",
    "짠테크",
    "스마트스토어",
    "프리랜서",
    "side job",
];

/// Spending, tax and loan pressure, treated as a side-job signal
pub const FINANCE_TERMS: &[&str] = &[
    "부가세",
    "종합소득세",
    "종소세",
    "연말정산",
    "세금",
    "환급",
    "대출",
    "이자",
    "금리",
    "카드값",
    "생활비",
    "관리비",
    "월세",
    "loan",
];

/// The classification table, in priority order
pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        name: "override",
        mode: MatchMode::AsWritten,
        terms: OVERRIDE_TERMS,
        category: KeywordCategory::Unknown,
    },
    CategoryRule {
        name: "insurance",
        mode: MatchMode::Folded,
        terms: INSURANCE_TERMS,
        category: KeywordCategory::Insurance,
    },
    CategoryRule {
        name: "sidejob",
        mode: MatchMode::Folded,
        terms: SIDEJOB_TERMS,
        category: KeywordCategory::Sidejob,
    },
    CategoryRule {
        name: "finance",
        mode: MatchMode::Folded,
        terms: FINANCE_TERMS,
        category: KeywordCategory::Sidejob,
    },
];

/// Classify a keyword against `CATEGORY_RULES`
pub fn classify(keyword: &str) -> KeywordCategory {
    classify_with(CATEGORY_RULES, keyword)
}

/// Classify a keyword against an explicit rule table
pub fn classify_with(rules: &[CategoryRule], keyword: &str) -> KeywordCategory {
    let as_written = keyword.trim();
    let folded = as_written.to_lowercase();

    rules
        .iter()
        .find(|rule| rule.matches(as_written, &folded))
        .map(|rule| rule.category)
        .unwrap_or(KeywordCategory::Unknown)
}
