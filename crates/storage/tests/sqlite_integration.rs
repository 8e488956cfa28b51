use quiz_core::model::{Answer, ChoiceId, QuestionId, QuizId, Theme};
use quiz_core::time::fixed_now;
use storage::repository::{preference_keys, Preferences, ProgressRecord, Storage};

fn record() -> ProgressRecord {
    ProgressRecord {
        quiz_id: QuizId::new(7),
        current_index: 2,
        answers: vec![
            Answer::new(QuestionId::new(1), ChoiceId::new(1), true, fixed_now()),
            Answer::new(QuestionId::new(2), ChoiceId::new(3), false, fixed_now()),
        ],
        started_at: fixed_now(),
    }
}

#[tokio::test]
async fn progress_round_trips_through_sqlite() {
    let storage = Storage::sqlite("sqlite::memory:").await.unwrap();

    assert!(storage.progress.load_progress().await.unwrap().is_none());

    storage.progress.save_progress(&record()).await.unwrap();
    let loaded = storage.progress.load_progress().await.unwrap().unwrap();
    assert_eq!(loaded, record());

    storage.progress.clear_progress().await.unwrap();
    assert!(storage.progress.load_progress().await.unwrap().is_none());
}

#[tokio::test]
async fn progress_slot_holds_one_record() {
    let storage = Storage::sqlite("sqlite::memory:").await.unwrap();

    storage.progress.save_progress(&record()).await.unwrap();

    let mut replacement = record();
    replacement.quiz_id = QuizId::new(9);
    replacement.current_index = 0;
    replacement.answers.clear();
    storage.progress.save_progress(&replacement).await.unwrap();

    let loaded = storage.progress.load_progress().await.unwrap().unwrap();
    assert_eq!(loaded.quiz_id, QuizId::new(9));
    assert!(loaded.answers.is_empty());
}

#[tokio::test]
async fn preferences_round_trip_and_remove() {
    let storage = Storage::sqlite("sqlite::memory:").await.unwrap();
    let prefs = storage.preferences.as_ref();

    Preferences::set_theme(prefs, Theme::Dark).await.unwrap();
    assert_eq!(Preferences::theme(prefs).await.unwrap(), Some(Theme::Dark));

    prefs
        .set_preference(preference_keys::PLAYER_NAME, "Ada")
        .await
        .unwrap();
    assert_eq!(
        prefs
            .get_preference(preference_keys::PLAYER_NAME)
            .await
            .unwrap()
            .as_deref(),
        Some("Ada")
    );

    prefs
        .remove_preference(preference_keys::PLAYER_NAME)
        .await
        .unwrap();
    assert!(prefs
        .get_preference(preference_keys::PLAYER_NAME)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn confirmed_correctness_survives_persistence() {
    let storage = Storage::sqlite("sqlite::memory:").await.unwrap();

    let mut rec = record();
    rec.answers[1].confirm(true);
    storage.progress.save_progress(&rec).await.unwrap();

    let loaded = storage.progress.load_progress().await.unwrap().unwrap();
    assert_eq!(loaded.answers[1].confirmed_correct, Some(true));
    assert!(loaded.answers[1].is_correct());
}
