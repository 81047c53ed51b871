// Engine behaviour against a recording storage fake: authorization gate,
// payload validation, dispatch and result tagging.

mod common;

use common::{PasswordAnswer, RecordingDatabase};
use snac_core::errors::ExErrorKind;
use snac_core::model::{NewTeam, SnippetBuilder, SnippetId};
use snac_engine::{RequestBuilder, ResultKind};

fn as_team(team: &str) -> RequestBuilder {
    RequestBuilder::new().for_team(team, "pw", false)
}

// ---------------------------------------------------------------------------
// authorization gate
// ---------------------------------------------------------------------------

#[test]
fn test_wrong_password_never_dispatches() {
    let builders = vec![
        as_team("core").get("AB3CD"),
        as_team("core").get_all_partials(),
        as_team("core").get_all(),
        as_team("core").insert(SnippetBuilder::new("x", "core").build()),
        as_team("core").update(SnippetBuilder::new("x", "core").build()),
        as_team("core").delete("AB3CD"),
        as_team("core").get_team(),
        RequestBuilder::new()
            .for_team("core", "pw", true)
            .update_team(common::team("core", chrono::Utc::now())),
        RequestBuilder::new()
            .for_team("core", "pw", true)
            .delete_team("core"),
    ];

    for builder in builders {
        let db = RecordingDatabase::new(PasswordAnswer::Reject);
        let request = builder.build().unwrap();
        let kind = request.kind();

        let err = request.execute(&db).unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::AuthorizationFailed, "{}", kind);
        assert_eq!(err.message(), "Incorrect password for team 'core'");
        assert_eq!(db.calls(), vec!["check_team_password"], "{}", kind);
    }
}

#[test]
fn test_unknown_team_stays_distinct() {
    let db = RecordingDatabase::new(PasswordAnswer::UnknownTeam);
    let err = as_team("ghost")
        .get_all_partials()
        .build()
        .unwrap()
        .execute(&db)
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::TeamNotFound);
    assert_eq!(err.team_id(), Some("ghost"));
    assert!(db.dispatched().is_empty());
}

#[test]
fn test_password_check_failure_is_wrapped() {
    let db = RecordingDatabase::new(PasswordAnswer::Broken);
    let err = as_team("core")
        .get_all()
        .build()
        .unwrap()
        .execute(&db)
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::StorageFailure);
    assert_eq!(err.root_kind(), ExErrorKind::Persistence);
    assert!(db.dispatched().is_empty());
}

#[test]
fn test_insert_team_skips_password_check() {
    let db = RecordingDatabase::new(PasswordAnswer::Reject);
    let outcome = RequestBuilder::new()
        .new_team(NewTeam::new("fresh", "Fresh", "pw", "admin"))
        .build()
        .unwrap()
        .execute(&db)
        .unwrap();

    assert_eq!(outcome.kind(), ResultKind::Boolean);
    assert_eq!(db.calls(), vec!["insert_team"]);
}

// ---------------------------------------------------------------------------
// dispatch and result tagging
// ---------------------------------------------------------------------------

#[test]
fn test_each_operation_makes_one_storage_call() {
    let existing = SnippetBuilder::new("existing", "core").build();
    let id = existing.id.to_string();

    let cases = vec![
        (as_team("core").get(&id), "get_by_id", ResultKind::SingleSnippet),
        (as_team("core").get_all_partials(), "get_by_team_id", ResultKind::PartialList),
        (as_team("core").get_all(), "get_snippets_by_team_id", ResultKind::SnippetList),
        (
            as_team("core").insert(SnippetBuilder::new("new", "core").build()),
            "insert_snippet",
            ResultKind::SingleSnippet,
        ),
        (as_team("core").update(existing.clone()), "update_snippet", ResultKind::Boolean),
        (as_team("core").delete(&id), "delete_snippet", ResultKind::Boolean),
        (as_team("core").get_team(), "get_team_by_id", ResultKind::Team),
        (
            RequestBuilder::new()
                .for_team("core", "admin", true)
                .update_team(common::team("core", chrono::Utc::now())),
            "update_team",
            ResultKind::Boolean,
        ),
        (
            RequestBuilder::new()
                .for_team("core", "admin", true)
                .delete_team("core"),
            "delete_team",
            ResultKind::None,
        ),
    ];

    for (builder, call, kind) in cases {
        let db = RecordingDatabase::new(PasswordAnswer::Accept).with_snippets(vec![existing.clone()]);
        let outcome = builder.build().unwrap().execute(&db).unwrap();

        assert_eq!(outcome.kind(), kind, "{}", call);
        assert_eq!(db.dispatched(), vec![call]);
    }
}

#[test]
fn test_empty_team_lists_nothing() {
    let db = RecordingDatabase::new(PasswordAnswer::Accept);
    let outcome = as_team("core")
        .get_all_partials()
        .build()
        .unwrap()
        .execute(&db)
        .unwrap();

    assert_eq!(outcome.kind(), ResultKind::PartialList);
    assert!(outcome.into_partials().unwrap().is_empty());
}

#[test]
fn test_invalid_id_never_reaches_storage() {
    let db = RecordingDatabase::new(PasswordAnswer::Accept);
    let result = as_team("core")
        .get("not-an-id")
        .build()
        .and_then(|request| request.execute(&db));

    let err = result.unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::MalformedPayload);
    assert!(err.message().contains("SnippetId"));
    assert!(db.calls().is_empty());
}

#[test]
fn test_get_of_foreign_snippet_is_not_found() {
    let foreign = SnippetBuilder::new("theirs", "other").build();
    let db = RecordingDatabase::new(PasswordAnswer::Accept).with_snippets(vec![foreign.clone()]);

    let err = as_team("core")
        .get(foreign.id.as_str())
        .build()
        .unwrap()
        .execute(&db)
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.op(), Some("get"));
}

#[test]
fn test_delete_is_scoped_to_authorized_team() {
    let foreign = SnippetBuilder::new("theirs", "other").build();
    let db = RecordingDatabase::new(PasswordAnswer::Accept).with_snippets(vec![foreign.clone()]);

    as_team("core")
        .delete(foreign.id.as_str())
        .build()
        .unwrap()
        .execute(&db)
        .unwrap();

    let deleted = db.deleted.lock().unwrap().clone();
    assert_eq!(deleted, vec![(foreign.id.to_string(), "core".to_string())]);
}

#[test]
fn test_missing_snippet_keeps_not_found() {
    let db = RecordingDatabase::new(PasswordAnswer::Accept);
    let err = as_team("core")
        .get("AB3CD")
        .build()
        .unwrap()
        .execute(&db)
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.entity_id(), Some("AB3CD"));
}

#[test]
fn test_backend_write_failure_is_storage_failure() {
    let db = RecordingDatabase::new(PasswordAnswer::Accept).failing_writes();
    let err = as_team("core")
        .delete("AB3CD")
        .build()
        .unwrap()
        .execute(&db)
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::StorageFailure);
    assert_eq!(err.op(), Some("delete"));
    assert_eq!(err.root_kind(), ExErrorKind::Persistence);
}

#[test]
fn test_errors_carry_request_id() {
    let db = RecordingDatabase::new(PasswordAnswer::Reject);
    let request = as_team("core").get_all().build().unwrap();
    let request_id = request.context().request_id.clone();

    let err = request.execute(&db).unwrap_err();
    assert_eq!(err.request_id(), Some(&request_id));
}

// ---------------------------------------------------------------------------
// payload scoping and stamping
// ---------------------------------------------------------------------------

#[test]
fn test_insert_stamps_and_fills_defaults() {
    let db = RecordingDatabase::new(PasswordAnswer::Accept);
    let mut snippet = SnippetBuilder::new("x", "").build();
    snippet.id = SnippetId::default();

    let before = chrono::Utc::now();
    let stored = as_team("core")
        .insert(snippet)
        .build()
        .unwrap()
        .execute(&db)
        .unwrap()
        .into_snippet()
        .unwrap();
    let after = chrono::Utc::now();

    assert_eq!(stored.team_id, "core");
    assert_eq!(stored.id.as_str().len(), 5);
    assert!(stored.last_modified >= before && stored.last_modified <= after);
}

#[test]
fn test_insert_for_other_team_is_rejected() {
    let db = RecordingDatabase::new(PasswordAnswer::Accept);
    let err = as_team("core")
        .insert(SnippetBuilder::new("x", "other").build())
        .build()
        .unwrap()
        .execute(&db)
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::MalformedPayload);
    assert_eq!(db.dispatched(), Vec::<String>::new());
}

#[test]
fn test_update_without_id_is_rejected() {
    let db = RecordingDatabase::new(PasswordAnswer::Accept);
    let mut snippet = SnippetBuilder::new("x", "core").build();
    snippet.id = SnippetId::default();

    let err = as_team("core")
        .update(snippet)
        .build()
        .unwrap()
        .execute(&db)
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::MalformedPayload);
    assert!(db.dispatched().is_empty());
}

#[test]
fn test_team_operations_are_scoped() {
    let db = RecordingDatabase::new(PasswordAnswer::Accept);
    let err = RequestBuilder::new()
        .for_team("core", "admin", true)
        .delete_team("other")
        .build()
        .unwrap()
        .execute(&db)
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::MalformedPayload);
    assert!(db.dispatched().is_empty());
}
