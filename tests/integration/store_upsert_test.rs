//! Live-store tests for the push upsert and pull walk.
//!
//! These run against `TEST_DATABASE_URL` and are ignored by default; run
//! them locally with `cargo test -- --ignored` against a disposable
//! database.

mod common;

use common::{reset_tables, test_pool, workspace_config};

use scriptsync_artifacts::{
    execute_push, pull_macros, Artifact, ArtifactIdentity, MacroIdentity, PushOutcome,
    PushRequest, SearchScriptIdentity,
};
use scriptsync_common::Error;
use serial_test::serial;

fn macro_request(app_name: &str, macro_name: &str, content: &str) -> PushRequest {
    PushRequest {
        artifact: Artifact {
            identity: ArtifactIdentity::Macro(MacroIdentity {
                app_name: app_name.to_string(),
                user_name: "EMRE".to_string(),
                macro_name: macro_name.to_string(),
            }),
            content: content.to_string(),
        },
    }
}

#[tokio::test]
#[serial]
#[ignore] // Requires TEST_DATABASE_URL - run locally only
async fn test_push_new_identity_inserts_once_with_defaults() {
    let pool = test_pool().await.unwrap();
    reset_tables(&pool).await.unwrap();

    let outcome = execute_push(&pool, &macro_request("", "btnSave", "save();"))
        .await
        .unwrap();
    assert_eq!(outcome, PushOutcome::Inserted);

    let (count, create_button, caption): (i64, i32, String) = sqlx::query_as(
        "SELECT COUNT(*), MAX(createbutton), MAX(caption) FROM macros WHERE macroname = 'btnSave'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(count, 1);
    assert_eq!(create_button, 1);
    assert_eq!(caption, "btnSave");
}

#[tokio::test]
#[serial]
#[ignore] // Requires TEST_DATABASE_URL - run locally only
async fn test_push_plain_name_inserts_without_button() {
    let pool = test_pool().await.unwrap();
    reset_tables(&pool).await.unwrap();

    execute_push(&pool, &macro_request("ORDERS", "Recalc", "recalc();"))
        .await
        .unwrap();

    let (create_button, caption): (i32, String) =
        sqlx::query_as("SELECT createbutton, caption FROM macros WHERE macroname = 'Recalc'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(create_button, 0);
    assert_eq!(caption, "");
}

#[tokio::test]
#[serial]
#[ignore] // Requires TEST_DATABASE_URL - run locally only
async fn test_push_existing_identity_updates_in_place() {
    let pool = test_pool().await.unwrap();
    reset_tables(&pool).await.unwrap();

    execute_push(&pool, &macro_request("ORDERS", "Recalc", "v1();"))
        .await
        .unwrap();
    let outcome = execute_push(&pool, &macro_request("ORDERS", "Recalc", "v2();"))
        .await
        .unwrap();
    assert_eq!(outcome, PushOutcome::Updated);

    let (count, content): (i64, String) =
        sqlx::query_as("SELECT COUNT(*), MAX(macro) FROM macros WHERE macroname = 'Recalc'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 1);
    assert_eq!(content, "v2();");
}

#[tokio::test]
#[serial]
#[ignore] // Requires TEST_DATABASE_URL - run locally only
async fn test_search_script_push_without_field_definition_fails() {
    let pool = test_pool().await.unwrap();
    reset_tables(&pool).await.unwrap();

    let request = PushRequest {
        artifact: Artifact {
            identity: ArtifactIdentity::SearchScript(SearchScriptIdentity {
                table_name: "EVRBAS".to_string(),
                field_name: "EVRAKTIP".to_string(),
            }),
            content: "lookup();".to_string(),
        },
    };
    let result = execute_push(&pool, &request).await;
    assert!(matches!(result, Err(Error::NotFound(_))));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM flddef")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
#[serial]
#[ignore] // Requires TEST_DATABASE_URL - run locally only
async fn test_pull_reports_missing_scopes_without_halting() {
    let pool = test_pool().await.unwrap();
    reset_tables(&pool).await.unwrap();

    for (app, name) in [("ORDERS", "Recalc"), ("STOCK", "Refill")] {
        sqlx::query(
            "INSERT INTO macros (appname, username, macroname, macro) VALUES ($1, 'EMRE', $2, 'x();')",
        )
        .bind(app)
        .bind(name)
        .execute(&pool)
        .await
        .unwrap();
    }

    let workspace = tempfile::tempdir().unwrap();
    let config = workspace_config();

    // Configured scope is [ORDERS, INVOICES, STOCK]; INVOICES has no rows
    let report = pull_macros(&pool, workspace.path(), &config).await.unwrap();
    assert_eq!(report.groups.len(), 3);
    assert_eq!(report.missing_groups(), 1);
    assert_eq!(report.written_files(), 2);

    assert!(workspace
        .path()
        .join("Macros/ORDERS/Recalc.js")
        .is_file());
    assert!(workspace.path().join("Macros/STOCK/Refill.js").is_file());
    assert!(!workspace.path().join("Macros/INVOICES").exists());
}
