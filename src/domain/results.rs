//! Per-platform outcomes of a generation batch and its quality pass.

use serde::{Deserialize, Serialize};

use super::platform::Platform;

/// Record that belongs to exactly one platform within a batch.
pub trait PlatformKeyed {
    fn platform(&self) -> Platform;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformResult {
    pub platform: Platform,
    pub generated_text: Option<String>,
    #[serde(default)]
    pub is_humanized: bool,
    pub error: Option<String>,
}

impl PlatformResult {
    pub fn generated(platform: Platform, text: impl Into<String>) -> Self {
        Self {
            platform,
            generated_text: Some(text.into()),
            is_humanized: false,
            error: None,
        }
    }

    pub fn failed(platform: Platform, error: impl Into<String>) -> Self {
        Self {
            platform,
            generated_text: None,
            is_humanized: false,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.generated_text.is_some()
    }

    /// Swaps in humanized text. Only meaningful for platforms that produced content.
    pub fn apply_humanized(&mut self, text: impl Into<String>) {
        self.generated_text = Some(text.into());
        self.is_humanized = true;
    }
}

impl PlatformKeyed for PlatformResult {
    fn platform(&self) -> Platform {
        self.platform
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityResult {
    pub platform: Platform,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    pub error: Option<String>,
}

impl QualityResult {
    pub fn scored(platform: Platform, score: f64, grade: Option<String>) -> Self {
        Self {
            platform,
            score: clamp_score(score),
            grade,
            error: None,
        }
    }

    /// Zero score used when no analysis could be performed.
    pub fn unscored(platform: Platform, error: impl Into<String>) -> Self {
        Self {
            platform,
            score: 0.0,
            grade: None,
            error: Some(error.into()),
        }
    }
}

impl PlatformKeyed for QualityResult {
    fn platform(&self) -> Platform {
        self.platform
    }
}

fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 100.0)
    }
}

/// Insertion-ordered map holding at most one record per platform.
///
/// Equality ignores order so two batches over the same platforms compare
/// equal regardless of how their calls were listed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformMap<T> {
    entries: Vec<T>,
}

pub type BatchResults = PlatformMap<PlatformResult>;
pub type QualityResults = PlatformMap<QualityResult>;

impl<T> Default for PlatformMap<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: PlatformKeyed> PlatformMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the record for its platform, keeping the original slot.
    pub fn insert(&mut self, record: T) {
        let platform = record.platform();
        match self.entries.iter_mut().find(|e| e.platform() == platform) {
            Some(slot) => *slot = record,
            None => self.entries.push(record),
        }
    }

    pub fn get(&self, platform: Platform) -> Option<&T> {
        self.entries.iter().find(|e| e.platform() == platform)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.entries.iter_mut()
    }

    pub fn platforms(&self) -> Vec<Platform> {
        self.entries.iter().map(PlatformKeyed::platform).collect()
    }
}

impl PlatformMap<PlatformResult> {
    pub fn success_count(&self) -> usize {
        self.entries.iter().filter(|r| r.is_success()).count()
    }

    pub fn all_succeeded(&self) -> bool {
        !self.entries.is_empty() && self.success_count() == self.entries.len()
    }
}

impl<T: PlatformKeyed> FromIterator<T> for PlatformMap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut map = Self::new();
        for record in iter {
            map.insert(record);
        }
        map
    }
}

impl<T: PlatformKeyed> IntoIterator for PlatformMap<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, T: PlatformKeyed> IntoIterator for &'a PlatformMap<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<T: PlatformKeyed + PartialEq> PartialEq for PlatformMap<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|entry| other.get(entry.platform()) == Some(entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_existing_platform_in_place() {
        let mut map = BatchResults::new();
        map.insert(PlatformResult::failed(Platform::Twitter, "boom"));
        map.insert(PlatformResult::generated(Platform::Blog, "post"));
        map.insert(PlatformResult::generated(Platform::Twitter, "tweet"));

        assert_eq!(map.len(), 2);
        assert_eq!(map.platforms(), vec![Platform::Twitter, Platform::Blog]);
        assert!(map.get(Platform::Twitter).is_some_and(PlatformResult::is_success));
    }

    #[test]
    fn equality_ignores_order() {
        let a: BatchResults = [
            PlatformResult::generated(Platform::Linkedin, "a"),
            PlatformResult::failed(Platform::Twitter, "b"),
        ]
        .into_iter()
        .collect();
        let b: BatchResults = [
            PlatformResult::failed(Platform::Twitter, "b"),
            PlatformResult::generated(Platform::Linkedin, "a"),
        ]
        .into_iter()
        .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn all_succeeded_requires_every_platform() {
        let mut map: BatchResults = [PlatformResult::generated(Platform::Blog, "x")]
            .into_iter()
            .collect();
        assert!(map.all_succeeded());
        map.insert(PlatformResult::failed(Platform::Facebook, "down"));
        assert!(!map.all_succeeded());
        assert_eq!(map.success_count(), 1);
        assert!(!BatchResults::new().all_succeeded());
    }

    #[test]
    fn quality_scores_are_clamped() {
        assert_eq!(QualityResult::scored(Platform::Blog, 140.0, None).score, 100.0);
        assert_eq!(QualityResult::scored(Platform::Blog, -3.0, None).score, 0.0);
        assert_eq!(QualityResult::scored(Platform::Blog, f64::NAN, None).score, 0.0);
    }

    #[test]
    fn humanizing_marks_the_result() {
        let mut result = PlatformResult::generated(Platform::Instagram, "draft");
        result.apply_humanized("warmer draft");
        assert!(result.is_humanized);
        assert_eq!(result.generated_text.as_deref(), Some("warmer draft"));
    }
}
