// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword-bucket answers used when no upstream model is available.
//!
//! The matcher lower-cases the visitor's text and walks an ordered table of
//! [`KeywordBucket`]s; the first bucket with a trigger appearing anywhere in
//! the text wins. Nothing here holds state, so the same input always gets
//! the same paragraph.

/// One topic: trigger substrings and the paragraph they select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordBucket {
    pub name: &'static str,
    /// Lower-case substrings; any one of them selects this bucket.
    pub triggers: &'static [&'static str],
    pub paragraph: &'static str,
}

impl KeywordBucket {
    /// Whether any trigger occurs in already-lower-cased `text`.
    pub fn matches(&self, text: &str) -> bool {
        self.triggers.iter().any(|t| text.contains(t))
    }
}

pub const PROJECTS: KeywordBucket = KeywordBucket {
    name: "projects",
    triggers: &["project", "work", "built", "create", "agent"],
    paragraph: "I've built impressive AI systems including a multi-agent data science platform for \
causal inference and predictive modeling. I've created 10+ agents using OpenAI SDK, CrewAI, and \
LangGraph - from SDRs to autonomous AI assistants. Check out the Projects page for full details!",
};

pub const BACKGROUND: KeywordBucket = KeywordBucket {
    name: "background",
    triggers: &["experience", "background", "education", "studied", "university"],
    paragraph: "I have a Master's in Financial Mathematics from Uppsala University (4.0 GPA). I led \
data science at OKX (top crypto exchange), built derivative pricing models at Handelsbanken, and now \
focus on multi-agent AI systems. I'm fluent in English, Swedish, and Chinese!",
};

pub const SKILLS: KeywordBucket = KeywordBucket {
    name: "skills",
    triggers: &["skill", "tech", "language", "framework", "tool"],
    paragraph: "I specialize in Python, SQL, R, C#, and JavaScript. My expertise includes \
statistical modeling, ML, blockchain, and agentic AI systems. I'm particularly interested in the \
intersection of AI, DeFi, and automated decision-making.",
};

pub const LOCATION: KeywordBucket = KeywordBucket {
    name: "location",
    triggers: &["location", "where", "based", "remote", "relocate", "available"],
    paragraph: "For questions about where I work from or when I'm available, the best way is to \
ask me directly. Send a note through the contact form on this website or email \
josefin.rui.hao@gmail.com and I'll get back to you!",
};

pub const CONTACT: KeywordBucket = KeywordBucket {
    name: "contact",
    triggers: &["contact", "email", "reach", "hire", "collaborate", "opportunity"],
    paragraph: "You can reach me at josefin.rui.hao@gmail.com or use the contact form on this \
website. I'm always interested in new opportunities and collaborations!",
};

/// Answer when no bucket matches.
pub const DEFAULT_PARAGRAPH: &str = "I can share about my background in data science and AI, my \
work at OKX, my 10+ multi-agent projects, technical skills, or how to contact me. What would you \
like to know?";

const WITH_LOCATION: &[KeywordBucket] = &[PROJECTS, BACKGROUND, SKILLS, LOCATION, CONTACT];
const WITHOUT_LOCATION: &[KeywordBucket] = &[PROJECTS, BACKGROUND, SKILLS, CONTACT];

/// Table-driven keyword responder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackMatcher {
    buckets: &'static [KeywordBucket],
}

impl FallbackMatcher {
    /// Builds the matcher; `include_location` adds the location topic ahead
    /// of contact.
    pub fn new(include_location: bool) -> Self {
        let buckets = if include_location {
            WITH_LOCATION
        } else {
            WITHOUT_LOCATION
        };
        Self { buckets }
    }

    /// Buckets in match-priority order.
    pub fn buckets(&self) -> &'static [KeywordBucket] {
        self.buckets
    }

    /// The first bucket whose triggers occur in `text`, if any.
    pub fn classify(&self, text: &str) -> Option<&'static KeywordBucket> {
        let normalized = text.to_lowercase();
        self.buckets.iter().find(|b| b.matches(&normalized))
    }

    /// The paragraph for `text`: its bucket's, or the default.
    pub fn respond(&self, text: &str) -> &'static str {
        self.classify(text)
            .map_or(DEFAULT_PARAGRAPH, |bucket| bucket.paragraph)
    }
}

impl Default for FallbackMatcher {
    fn default() -> Self {
        Self::new(true)
    }
}
