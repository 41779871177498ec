// src/services/performance.rs

use std::fmt;

use crate::models::{
    topic::{TopicMap, TopicProgress},
    user::User,
};

/// Coarse label derived from the latest mark of every topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceLevel {
    VeryHigh,
    High,
    Average,
    Low,
}

impl PerformanceLevel {
    /// Thresholds over the summed latest marks:
    /// above 750 is "Very High", 500..=750 "High", 250..500 "Average".
    pub fn from_total(total: f64) -> Self {
        if total > 750.0 {
            PerformanceLevel::VeryHigh
        } else if total >= 500.0 {
            PerformanceLevel::High
        } else if total >= 250.0 {
            PerformanceLevel::Average
        } else {
            PerformanceLevel::Low
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            PerformanceLevel::VeryHigh => "Very High",
            PerformanceLevel::High => "High",
            PerformanceLevel::Average => "Average",
            PerformanceLevel::Low => "Low",
        }
    }
}

impl fmt::Display for PerformanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sum of the most recent mark per topic. Older marks are ignored.
pub fn latest_total(progress: &TopicMap<TopicProgress>) -> f64 {
    progress.iter().map(|(_, topic)| topic.latest_mark()).sum()
}

pub fn classify(user: &User) -> PerformanceLevel {
    PerformanceLevel::from_total(latest_total(&user.progress))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::topic::Topic;

    #[test]
    fn threshold_boundaries() {
        let cases = [
            (0.0, "Low"),
            (249.0, "Low"),
            (250.0, "Average"),
            (499.0, "Average"),
            (500.0, "High"),
            (750.0, "High"),
            (751.0, "Very High"),
            (1000.0, "Very High"),
        ];

        for (total, expected) in cases {
            assert_eq!(PerformanceLevel::from_total(total).as_str(), expected, "total = {total}");
        }
    }

    #[test]
    fn only_the_latest_mark_counts() {
        let mut progress = TopicMap::<TopicProgress>::default();
        progress[Topic::Algebra].marks = vec![100.0, 100.0, 20.0];
        progress[Topic::Area].marks = vec![30.0];

        assert_eq!(latest_total(&progress), 50.0);
    }

    #[test]
    fn empty_history_is_low() {
        assert_eq!(latest_total(&TopicMap::default()), 0.0);
        assert_eq!(PerformanceLevel::from_total(0.0), PerformanceLevel::Low);
    }
}
