//! Splits raw model output into the three task tiers.
//!
//! The model is asked to label its output with "SUPPORT:", "CORE:" and
//! "CHALLENGE:" markers. The segmenter scans for those markers in order and
//! slices the text between them, tolerating arbitrary multi-line content.
//! A missing marker yields an empty section, but is also recorded so
//! callers can tell "the model wrote nothing" apart from "the format
//! drifted".

use std::fmt;

/// One of the three difficulty tiers in a generation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Support,
    Core,
    Challenge,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Support, Tier::Core, Tier::Challenge];

    /// The literal label delimiting this tier in model output.
    pub fn marker(&self) -> &'static str {
        match self {
            Tier::Support => "SUPPORT:",
            Tier::Core => "CORE:",
            Tier::Challenge => "CHALLENGE:",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Support => write!(f, "Support"),
            Tier::Core => write!(f, "Core"),
            Tier::Challenge => write!(f, "Challenge"),
        }
    }
}

/// A generation result segmented into tiers.
///
/// The raw blob stays the source of truth; this is a derived view. Sections
/// are trimmed. A tier whose marker was absent is an empty string and shows
/// up in [`missing_markers`](Self::missing_markers).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentedTasks {
    pub support: String,
    pub core: String,
    pub challenge: String,
    missing: Vec<Tier>,
}

impl SegmentedTasks {
    pub fn get(&self, tier: Tier) -> &str {
        match tier {
            Tier::Support => &self.support,
            Tier::Core => &self.core,
            Tier::Challenge => &self.challenge,
        }
    }

    /// Markers that were not found in the raw text, in tier order.
    pub fn missing_markers(&self) -> &[Tier] {
        &self.missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// All three tiers as a single plain-text export.
    pub fn export_all(&self) -> String {
        format!(
            "SUPPORT\n\n{}\n\n---\n\nCORE\n\n{}\n\n---\n\nCHALLENGE\n\n{}",
            self.support, self.core, self.challenge
        )
    }
}

/// Segment a raw completion blob into tiers.
pub fn segment_tasks(raw: &str) -> SegmentedTasks {
    // Locate each marker in order. Each search starts after the previously
    // found marker so section text can never swallow a later label.
    let mut located: [Option<(usize, usize)>; 3] = [None; 3];
    let mut cursor = 0;
    for (i, tier) in Tier::ALL.iter().enumerate() {
        if let Some(rel) = raw[cursor..].find(tier.marker()) {
            let start = cursor + rel;
            let body_start = start + tier.marker().len();
            located[i] = Some((start, body_start));
            cursor = body_start;
        }
    }

    let mut result = SegmentedTasks::default();
    for (i, tier) in Tier::ALL.iter().enumerate() {
        let Some((_, body_start)) = located[i] else {
            result.missing.push(*tier);
            continue;
        };
        // Section runs to the start of the next located marker, or the end.
        let body_end = located[i + 1..]
            .iter()
            .flatten()
            .map(|(start, _)| *start)
            .next()
            .unwrap_or(raw.len());
        let text = raw[body_start..body_end].trim().to_string();
        match tier {
            Tier::Support => result.support = text,
            Tier::Core => result.core = text,
            Tier::Challenge => result.challenge = text,
        }
    }
    result
}
