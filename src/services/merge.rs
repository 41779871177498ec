// src/services/merge.rs

use crate::models::{
    profile_update::ProfileUpdate,
    topic::Topic,
    user::User,
};

/// Applies a partial update to `user` in place.
///
/// * Scalar fields and topic times present in `update` are overwritten.
/// * Each present topic mark is appended to that topic's history.
///
/// Returns `true` when at least one mark was appended. Nothing is fetched or
/// persisted here.
pub fn merge_profile(user: &mut User, update: &ProfileUpdate) -> bool {
    overwrite(&mut user.name, &update.name);
    overwrite(&mut user.age, &update.age);
    overwrite(&mut user.phone_num, &update.phone_num);
    overwrite(&mut user.gender, &update.gender);
    overwrite(&mut user.preferred_study_method, &update.preferred_study_method);
    overwrite(&mut user.disliked_lesson, &update.disliked_lesson);
    overwrite(&mut user.stress_probability, &update.stress_probability);
    overwrite(&mut user.stress_level, &update.stress_level);
    overwrite(&mut user.cognitive_performance, &update.cognitive_performance);

    let mut marks_updated = false;

    for topic in Topic::ALL {
        let requested = &update.topics[topic];
        let progress = &mut user.progress[topic];

        overwrite(&mut progress.time, &requested.time);

        if let Some(mark) = requested.mark {
            progress.marks.push(mark);
            marks_updated = true;
        }
    }

    marks_updated
}

fn overwrite<T: Clone>(slot: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *slot = value.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::NewUser;

    fn fresh_user() -> User {
        User::from_new(1, NewUser::new("Ada", "ada@example.com", "hash".to_string()))
    }

    #[test]
    fn appends_marks_and_reports_it() {
        let mut user = fresh_user();
        user.progress[Topic::Algebra].marks.push(40.0);

        let update = ProfileUpdate::default().with_mark(Topic::Algebra, 55.0);
        assert!(merge_profile(&mut user, &update));
        assert_eq!(user.progress[Topic::Algebra].marks, vec![40.0, 55.0]);
    }

    #[test]
    fn time_only_update_leaves_marks_alone() {
        let mut user = fresh_user();
        user.progress[Topic::Ratio].marks.push(70.0);

        let update = ProfileUpdate::default().with_time(Topic::Ratio, "95");
        assert!(!merge_profile(&mut user, &update));
        assert_eq!(user.progress[Topic::Ratio].marks, vec![70.0]);
        assert_eq!(user.progress[Topic::Ratio].time, "95");
    }

    #[test]
    fn overwrites_only_supplied_scalars() {
        let mut user = fresh_user();
        let update = ProfileUpdate {
            phone_num: Some("0771234567".to_string()),
            stress_probability: Some(0.8),
            ..ProfileUpdate::default()
        };

        assert!(!merge_profile(&mut user, &update));
        assert_eq!(user.phone_num, "0771234567");
        assert_eq!(user.stress_probability, 0.8);
        assert_eq!(user.name, "Ada");
        assert_eq!(user.gender, "Other");
    }
}
