// src/models/topic.rs

use std::ops::{Index, IndexMut};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::Error as _,
    ser::SerializeMap,
};
use serde_json::{Map, Value};

/// The closed set of quiz topics tracked per user.
///
/// The wire names (`numberSequencesMarks`, `algebraTime`, ...) are part of the
/// public API, so adding a topic means adding a variant here and a row in each
/// of the lookup tables below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Topic {
    NumberSequences,
    Perimeter,
    Ratio,
    FractionsDecimals,
    Indices,
    Algebra,
    Angles,
    VolumeCapacity,
    Area,
    Probability,
}

impl Topic {
    pub const COUNT: usize = 10;

    pub const ALL: [Topic; Topic::COUNT] = [
        Topic::NumberSequences,
        Topic::Perimeter,
        Topic::Ratio,
        Topic::FractionsDecimals,
        Topic::Indices,
        Topic::Algebra,
        Topic::Angles,
        Topic::VolumeCapacity,
        Topic::Area,
        Topic::Probability,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Topic::NumberSequences => "numberSequences",
            Topic::Perimeter => "perimeter",
            Topic::Ratio => "ratio",
            Topic::FractionsDecimals => "fractionsDecimals",
            Topic::Indices => "indices",
            Topic::Algebra => "algebra",
            Topic::Angles => "angles",
            Topic::VolumeCapacity => "volumeCapacity",
            Topic::Area => "area",
            Topic::Probability => "probability",
        }
    }

    /// Key of the append-only mark history, e.g. `algebraMarks`.
    pub const fn marks_key(self) -> &'static str {
        match self {
            Topic::NumberSequences => "numberSequencesMarks",
            Topic::Perimeter => "perimeterMarks",
            Topic::Ratio => "ratioMarks",
            Topic::FractionsDecimals => "fractionsDecimalsMarks",
            Topic::Indices => "indicesMarks",
            Topic::Algebra => "algebraMarks",
            Topic::Angles => "anglesMarks",
            Topic::VolumeCapacity => "volumeCapacityMarks",
            Topic::Area => "areaMarks",
            Topic::Probability => "probabilityMarks",
        }
    }

    /// Key of the last recorded duration, e.g. `algebraTime`.
    pub const fn time_key(self) -> &'static str {
        match self {
            Topic::NumberSequences => "numberSequencesTime",
            Topic::Perimeter => "perimeterTime",
            Topic::Ratio => "ratioTime",
            Topic::FractionsDecimals => "fractionsDecimalsTime",
            Topic::Indices => "indicesTime",
            Topic::Algebra => "algebraTime",
            Topic::Angles => "anglesTime",
            Topic::VolumeCapacity => "volumeCapacityTime",
            Topic::Area => "areaTime",
            Topic::Probability => "probabilityTime",
        }
    }
}

/// One value per topic, indexed by [`Topic`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TopicMap<T>([T; Topic::COUNT]);

impl<T> TopicMap<T> {
    pub fn iter(&self) -> impl Iterator<Item = (Topic, &T)> {
        Topic::ALL.into_iter().zip(self.0.iter())
    }
}

impl<T> Index<Topic> for TopicMap<T> {
    type Output = T;

    fn index(&self, topic: Topic) -> &T {
        &self.0[topic.index()]
    }
}

impl<T> IndexMut<Topic> for TopicMap<T> {
    fn index_mut(&mut self, topic: Topic) -> &mut T {
        &mut self.0[topic.index()]
    }
}

/// Stored progress for a single topic.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicProgress {
    /// Every mark ever submitted, oldest first. Only ever appended to.
    pub marks: Vec<f64>,

    /// Duration of the last attempt, kept as the client sent it.
    pub time: String,
}

impl TopicProgress {
    /// The most recent mark, or 0 when nothing has been recorded yet.
    pub fn latest_mark(&self) -> f64 {
        self.marks.last().copied().unwrap_or(0.0)
    }
}

impl Default for TopicProgress {
    fn default() -> Self {
        Self {
            marks: Vec::new(),
            time: "0".to_string(),
        }
    }
}

/// Serialized flat, the same way the API exposes it:
/// `{"algebraMarks": [..], "algebraTime": "..", ...}`.
/// The JSONB `progress` column uses this shape too.
impl Serialize for TopicMap<TopicProgress> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Topic::COUNT * 2))?;
        for (topic, progress) in self.iter() {
            map.serialize_entry(topic.marks_key(), &progress.marks)?;
            map.serialize_entry(topic.time_key(), &progress.time)?;
        }
        map.end()
    }
}

/// Missing keys fall back to the registration defaults.
impl<'de> Deserialize<'de> for TopicMap<TopicProgress> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut raw = Map::<String, Value>::deserialize(deserializer)?;
        let mut progress = Self::default();

        for topic in Topic::ALL {
            if let Some(marks) = raw.remove(topic.marks_key()) {
                progress[topic].marks = serde_json::from_value(marks).map_err(D::Error::custom)?;
            }
            if let Some(time) = raw.remove(topic.time_key()) {
                progress[topic].time = serde_json::from_value(time).map_err(D::Error::custom)?;
            }
        }

        Ok(progress)
    }
}
