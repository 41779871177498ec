// src/models/profile_update.rs

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::topic::{Topic, TopicMap};

/// Scalar profile attributes that a client may overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Age,
    PhoneNum,
    Gender,
    PreferredStudyMethod,
    DislikedLesson,
    StressProbability,
    StressLevel,
    CognitivePerformance,
}

impl ProfileField {
    pub const ALL: [ProfileField; 9] = [
        ProfileField::Name,
        ProfileField::Age,
        ProfileField::PhoneNum,
        ProfileField::Gender,
        ProfileField::PreferredStudyMethod,
        ProfileField::DislikedLesson,
        ProfileField::StressProbability,
        ProfileField::StressLevel,
        ProfileField::CognitivePerformance,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            ProfileField::Name => "name",
            ProfileField::Age => "age",
            ProfileField::PhoneNum => "phoneNum",
            ProfileField::Gender => "gender",
            ProfileField::PreferredStudyMethod => "preferredStudyMethod",
            ProfileField::DislikedLesson => "dislikedLesson",
            ProfileField::StressProbability => "stressProbability",
            ProfileField::StressLevel => "stressLevel",
            ProfileField::CognitivePerformance => "cognitivePerformance",
        }
    }

    /// Older clients send `Gender` capitalized.
    const fn alias(self) -> Option<&'static str> {
        match self {
            ProfileField::Gender => Some("Gender"),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum PayloadError {
    #[error("field `{field}` must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
}

/// Requested changes to one topic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopicUpdate {
    /// Appended to the topic's mark history.
    pub mark: Option<f64>,
    /// Replaces the topic's time.
    pub time: Option<String>,
}

/// A partial profile update. `None` means "leave as is".
///
/// Only the shape of each value is checked: a recognized key must carry
/// something that reads as its field type. Ranges and label vocabularies are
/// not validated and unknown keys are ignored. `null` counts as absent, except
/// for `cognitivePerformance`, where it clears the label.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub age: Option<String>,
    pub phone_num: Option<String>,
    pub gender: Option<String>,
    pub preferred_study_method: Option<String>,
    pub disliked_lesson: Option<String>,
    pub stress_probability: Option<f64>,
    pub stress_level: Option<String>,
    pub cognitive_performance: Option<String>,
    pub topics: TopicMap<TopicUpdate>,
}

impl ProfileUpdate {
    pub fn with_mark(mut self, topic: Topic, mark: f64) -> Self {
        self.topics[topic].mark = Some(mark);
        self
    }

    pub fn with_time(mut self, topic: Topic, time: impl Into<String>) -> Self {
        self.topics[topic].time = Some(time.into());
        self
    }

    pub fn with_cognitive_performance(mut self, label: impl Into<String>) -> Self {
        self.cognitive_performance = Some(label.into());
        self
    }

    pub fn has_marks(&self) -> bool {
        self.topics.iter().any(|(_, update)| update.mark.is_some())
    }
}

impl TryFrom<Map<String, Value>> for ProfileUpdate {
    type Error = PayloadError;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut update = ProfileUpdate::default();

        // An explicit null still counts as setting the label, so it blocks
        // reclassification.
        if map
            .get(ProfileField::CognitivePerformance.key())
            .is_some_and(Value::is_null)
        {
            update.cognitive_performance = Some(String::new());
        }

        for field in ProfileField::ALL {
            let value = present(&map, field.key())
                .or_else(|| field.alias().and_then(|alias| present(&map, alias)));
            let Some(value) = value else { continue };
            let key = field.key();

            match field {
                ProfileField::Name => update.name = Some(text(key, value)?),
                ProfileField::Age => update.age = Some(text(key, value)?),
                ProfileField::PhoneNum => update.phone_num = Some(text(key, value)?),
                ProfileField::Gender => update.gender = Some(text(key, value)?),
                ProfileField::PreferredStudyMethod => {
                    update.preferred_study_method = Some(text(key, value)?)
                }
                ProfileField::DislikedLesson => update.disliked_lesson = Some(text(key, value)?),
                ProfileField::StressProbability => {
                    update.stress_probability = Some(number(key, value)?)
                }
                ProfileField::StressLevel => update.stress_level = Some(text(key, value)?),
                ProfileField::CognitivePerformance => {
                    update.cognitive_performance = Some(text(key, value)?)
                }
            }
        }

        for topic in Topic::ALL {
            if let Some(value) = present(&map, topic.marks_key()) {
                update.topics[topic].mark = Some(number(topic.marks_key(), value)?);
            }
            if let Some(value) = present(&map, topic.time_key()) {
                update.topics[topic].time = Some(text(topic.time_key(), value)?);
            }
        }

        Ok(update)
    }
}

fn present<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|value| !value.is_null())
}

fn text(field: &'static str, value: &Value) -> Result<String, PayloadError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(PayloadError::InvalidField {
            field,
            expected: "a string",
        }),
    }
}

fn number(field: &'static str, value: &Value) -> Result<f64, PayloadError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    // "NaN" and "inf" parse, but JSON cannot store them.
    .filter(|v| v.is_finite());
    parsed.ok_or(PayloadError::InvalidField {
        field,
        expected: "a number",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> Result<ProfileUpdate, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn picks_up_recognized_keys_and_ignores_the_rest() {
        let update = parse(json!({
            "name": "Ada",
            "age": 21,
            "stressProbability": "0.25",
            "algebraMarks": 90,
            "areaTime": "12:30",
            "favouriteColour": "green"
        }))
        .unwrap();

        assert_eq!(update.name.as_deref(), Some("Ada"));
        assert_eq!(update.age.as_deref(), Some("21"));
        assert_eq!(update.stress_probability, Some(0.25));
        assert_eq!(update.topics[Topic::Algebra].mark, Some(90.0));
        assert_eq!(update.topics[Topic::Area].time.as_deref(), Some("12:30"));
        assert_eq!(update.topics[Topic::Area].mark, None);
        assert!(update.has_marks());
    }

    #[test]
    fn null_counts_as_absent() {
        let update = parse(json!({ "name": null, "ratioMarks": null, "areaTime": null })).unwrap();
        assert_eq!(update, ProfileUpdate::default());
        assert!(!update.has_marks());
    }

    #[test]
    fn null_label_clears_it() {
        let update = parse(json!({ "cognitivePerformance": null, "algebraMarks": 90 })).unwrap();
        assert_eq!(update.cognitive_performance.as_deref(), Some(""));
        assert_eq!(update.topics[Topic::Algebra].mark, Some(90.0));
    }

    #[test]
    fn rejects_non_finite_numbers() {
        for bad in ["NaN", "inf", "-Infinity"] {
            assert!(parse(json!({ "algebraMarks": bad })).is_err(), "{bad} accepted");
            assert!(parse(json!({ "stressProbability": bad })).is_err(), "{bad} accepted");
        }
    }

    #[test]
    fn accepts_capitalized_gender() {
        let update = parse(json!({ "Gender": "Female" })).unwrap();
        assert_eq!(update.gender.as_deref(), Some("Female"));
    }

    #[test]
    fn out_of_range_marks_are_not_rejected() {
        let update = parse(json!({ "anglesMarks": -15 })).unwrap();
        assert_eq!(update.topics[Topic::Angles].mark, Some(-15.0));
    }

    #[test]
    fn rejects_values_of_the_wrong_shape() {
        let map = match json!({ "perimeterMarks": "lots" }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        assert_eq!(
            ProfileUpdate::try_from(map),
            Err(PayloadError::InvalidField {
                field: "perimeterMarks",
                expected: "a number",
            })
        );

        assert!(parse(json!({ "name": ["a", "b"] })).is_err());
    }
}
