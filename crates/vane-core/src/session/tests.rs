use super::*;
use crate::record::ScoreRecord;

fn scored_session() -> Session {
    let mut session = Session::with_headlines(vec!["A".into(), "B".into()]);
    let batch = session.begin_scoring().unwrap();
    let records = batch
        .iter()
        .map(|h| ScoreRecord::labeled(h.clone(), "Neutral"))
        .collect();
    session.complete_scoring(records).unwrap();
    session
}

#[test]
fn new_session_starts_editing_with_no_results() {
    let session = Session::new();

    assert_eq!(session.phase(), SessionPhase::Editing);
    assert!(session.rows().is_empty());
    assert!(session.results().is_none());
}

#[test]
fn begin_scoring_trims_and_drops_empty_rows() {
    let mut session = Session::with_headlines(vec![
        "  Stocks rally  ".into(),
        "".into(),
        "   ".into(),
        "Oil dips".into(),
    ]);

    let batch = session.begin_scoring().unwrap();

    assert_eq!(batch, vec!["Stocks rally", "Oil dips"]);
    assert_eq!(session.phase(), SessionPhase::Scoring);
}

#[test]
fn begin_scoring_with_nothing_scorable_fails_without_phase_change() {
    let mut session = Session::with_headlines(vec!["   ".into()]);

    let err = session.begin_scoring().unwrap_err();

    assert!(matches!(err, SessionError::NoHeadlines));
    assert_eq!(session.phase(), SessionPhase::Editing);
}

#[test]
fn complete_scoring_moves_to_scored() {
    let session = scored_session();

    assert_eq!(session.phase(), SessionPhase::Scored);
    assert_eq!(session.results().unwrap().len(), 2);
}

#[test]
fn empty_result_set_still_counts_as_scored() {
    let mut session = Session::with_headlines(vec!["A".into()]);
    session.begin_scoring().unwrap();
    session.complete_scoring(Vec::new()).unwrap();

    assert_eq!(session.phase(), SessionPhase::Scored);
    assert_eq!(session.results(), Some(&[][..]));
}

#[test]
fn failed_scoring_keeps_previous_results() {
    let mut session = scored_session();

    session.begin_scoring().unwrap();
    session.fail_scoring().unwrap();

    assert_eq!(session.phase(), SessionPhase::Scored);
    assert_eq!(session.results().unwrap().len(), 2);
}

#[test]
fn failed_scoring_without_previous_results_returns_to_editing() {
    let mut session = Session::with_headlines(vec!["A".into()]);
    session.begin_scoring().unwrap();
    session.fail_scoring().unwrap();

    assert_eq!(session.phase(), SessionPhase::Editing);
}

#[test]
fn any_mutation_drops_results_and_returns_to_editing() {
    let mut session = scored_session();
    session.add_row().unwrap();
    assert_eq!(session.phase(), SessionPhase::Editing);
    assert!(session.results().is_none());

    let mut session = scored_session();
    let id = session.rows()[0].id;
    session.edit_row(id, "changed").unwrap();
    assert_eq!(session.phase(), SessionPhase::Editing);

    let mut session = scored_session();
    let id = session.rows()[1].id;
    session.delete_row(id).unwrap();
    assert_eq!(session.phase(), SessionPhase::Editing);

    let mut session = scored_session();
    session.replace_all(vec!["new".into()]).unwrap();
    assert_eq!(session.phase(), SessionPhase::Editing);
}

#[test]
fn clear_results_keeps_headlines() {
    let mut session = scored_session();

    session.clear_results().unwrap();

    assert_eq!(session.phase(), SessionPhase::Editing);
    assert_eq!(session.rows().len(), 2);
}

#[test]
fn row_ids_are_stable_across_mid_list_deletion() {
    let mut session =
        Session::with_headlines(vec!["first".into(), "second".into(), "third".into()]);
    let ids: Vec<u64> = session.rows().iter().map(|r| r.id).collect();

    session.delete_row(ids[1]).unwrap();
    // The surviving rows keep their ids; editing by id hits the right row.
    session.edit_row(ids[2], "third, edited").unwrap();

    assert_eq!(session.rows().len(), 2);
    assert_eq!(session.rows()[1].text, "third, edited");
}

#[test]
fn unknown_row_ids_are_rejected() {
    let mut session = Session::with_headlines(vec!["a".into()]);

    assert!(matches!(
        session.edit_row(999, "x"),
        Err(SessionError::UnknownRow { id: 999 })
    ));
    assert!(matches!(
        session.delete_row(999),
        Err(SessionError::UnknownRow { id: 999 })
    ));
}

#[test]
fn mutations_are_rejected_mid_flight() {
    let mut session = Session::with_headlines(vec!["a".into()]);
    session.begin_scoring().unwrap();

    assert!(matches!(session.add_row(), Err(SessionError::ScoringInFlight)));
    assert!(matches!(
        session.replace_all(vec!["b".into()]),
        Err(SessionError::ScoringInFlight)
    ));
    assert!(matches!(
        session.begin_scoring(),
        Err(SessionError::ScoringInFlight)
    ));
}

#[test]
fn complete_without_begin_is_rejected() {
    let mut session = Session::new();
    assert!(matches!(
        session.complete_scoring(Vec::new()),
        Err(SessionError::NotScoring)
    ));
    assert!(matches!(session.fail_scoring(), Err(SessionError::NotScoring)));
}

#[test]
fn replace_all_assigns_fresh_ids() {
    let mut session = Session::with_headlines(vec!["a".into(), "b".into()]);
    let old_max = session.rows().iter().map(|r| r.id).max().unwrap();

    session.replace_all(vec!["c".into()]).unwrap();

    assert!(session.rows()[0].id > old_max);
}
