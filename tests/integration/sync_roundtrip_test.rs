//! Round trips between pull materialization and push planning over a real
//! workspace tree. No store involved: rows are fabricated, files land in a
//! temp directory, and push planning must reconstruct the originating
//! identities from those files alone.

mod common;

use std::path::PathBuf;

use common::workspace_config;

use scriptsync_artifacts::service::pull::{
    event_files, library_files, macro_files, search_files, write_group,
};
use scriptsync_artifacts::{
    plan_push, relative_path, ArtifactIdentity, EventMap, EventScriptIdentity, EventScriptRow,
    LibraryUnitIdentity, LibraryUnitRow, MacroIdentity, MacroRow, SearchScriptIdentity,
    SearchScriptRow,
};
use scriptsync_common::Error;

fn events() -> EventMap {
    EventMap::from_json(r#"{"1": "OnInsert", "5": "OnLoad"}"#).unwrap()
}

#[tokio::test]
async fn test_pulled_macro_plans_back_to_its_identity() {
    let workspace = tempfile::tempdir().unwrap();
    let config = workspace_config();

    let rows = vec![MacroRow {
        app_name: String::new(),
        macro_name: "btnSave".to_string(),
        content: "save();".to_string(),
    }];
    let dir = workspace.path().join("Macros").join("Global");
    write_group(&dir, &macro_files(rows)).await.unwrap();

    let saved = dir.join("btnSave.js");
    let content = std::fs::read_to_string(&saved).unwrap();
    assert_eq!(content, "save();");

    let plan = plan_push(workspace.path(), &config, &events(), &saved, content)
        .unwrap()
        .expect("pulled macro must plan");
    assert_eq!(
        plan.artifact.identity,
        ArtifactIdentity::Macro(MacroIdentity {
            app_name: String::new(),
            user_name: "EMRE".to_string(),
            macro_name: "btnSave".to_string(),
        })
    );
}

#[tokio::test]
async fn test_pulled_event_script_resolves_same_event_code() {
    let workspace = tempfile::tempdir().unwrap();
    let config = workspace_config();
    let events = events();

    // Pulling event code 5 named OnLoad writes OnLoad.js
    let rows = vec![EventScriptRow {
        app_name: "ORDERS".to_string(),
        table_name: "EVRBAS".to_string(),
        event_code: 5,
        content: "load();".to_string(),
    }];
    let dir = workspace.path().join("Scripts").join("ORDERS");
    write_group(&dir, &event_files(rows, &events)).await.unwrap();

    let saved = dir.join("EVRBAS").join("OnLoad.js");
    let content = std::fs::read_to_string(&saved).unwrap();

    // Pushing the same file back resolves event code 5 again
    let plan = plan_push(workspace.path(), &config, &events, &saved, content.clone())
        .unwrap()
        .expect("pulled event script must plan");
    assert_eq!(
        plan.artifact.identity,
        ArtifactIdentity::TableEventScript(EventScriptIdentity {
            company_no: 7,
            user_name: "EMRE".to_string(),
            app_name: "ORDERS".to_string(),
            table_name: "EVRBAS".to_string(),
            event_code: 5,
        })
    );

    // A map mutated between pull and push must fail the push before any
    // store work
    let mutated = EventMap::from_json(r#"{"1": "OnInsert"}"#).unwrap();
    let result = plan_push(workspace.path(), &config, &mutated, &saved, content);
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_pulled_library_unit_plans_back_to_its_identity() {
    let workspace = tempfile::tempdir().unwrap();
    let config = workspace_config();

    let rows = vec![LibraryUnitRow {
        user_name: "AYSE".to_string(),
        unit_name: "DateUtils".to_string(),
        content: "fmt();".to_string(),
    }];
    let dir = workspace.path().join("Library").join("AYSE");
    write_group(&dir, &library_files(rows)).await.unwrap();

    let saved = dir.join("DateUtils.js");
    let content = std::fs::read_to_string(&saved).unwrap();
    let plan = plan_push(workspace.path(), &config, &events(), &saved, content)
        .unwrap()
        .expect("pulled library unit must plan");
    assert_eq!(
        plan.artifact.identity,
        ArtifactIdentity::LibraryUnit(LibraryUnitIdentity {
            user_name: "AYSE".to_string(),
            unit_name: "DateUtils".to_string(),
        })
    );
}

#[tokio::test]
async fn test_pulled_search_script_plans_back_to_its_identity() {
    let workspace = tempfile::tempdir().unwrap();
    let config = workspace_config();

    let rows = vec![SearchScriptRow {
        field_name: "EVRAKTIP".to_string(),
        content: "lookup();".to_string(),
    }];
    let dir = workspace.path().join("SearchScripts").join("EVRBAS");
    write_group(&dir, &search_files(rows)).await.unwrap();

    let saved = dir.join("EVRAKTIP.js");
    let content = std::fs::read_to_string(&saved).unwrap();
    let plan = plan_push(workspace.path(), &config, &events(), &saved, content)
        .unwrap()
        .expect("pulled search script must plan");
    assert_eq!(
        plan.artifact.identity,
        ArtifactIdentity::SearchScript(SearchScriptIdentity {
            table_name: "EVRBAS".to_string(),
            field_name: "EVRAKTIP".to_string(),
        })
    );
}

#[tokio::test]
async fn test_save_outside_recognized_folders_is_ignored() {
    let workspace = tempfile::tempdir().unwrap();
    let config = workspace_config();

    let dir = workspace.path().join("Notes");
    std::fs::create_dir_all(&dir).unwrap();
    let saved = dir.join("Todo.js");
    std::fs::write(&saved, "x").unwrap();

    let plan = plan_push(
        workspace.path(),
        &config,
        &events(),
        &saved,
        "x".to_string(),
    )
    .unwrap();
    assert!(plan.is_none());
}

#[test]
fn test_relative_path_matches_materialized_layout() {
    // The path builder used by push reporting agrees with where pull
    // actually writes files
    let config = workspace_config();
    let events = events();

    let identity = ArtifactIdentity::TableEventScript(EventScriptIdentity {
        company_no: 7,
        user_name: "EMRE".to_string(),
        app_name: "ORDERS".to_string(),
        table_name: "EVRBAS".to_string(),
        event_code: 5,
    });
    assert_eq!(
        relative_path(&identity, &config.folders, &events).unwrap(),
        PathBuf::from("Scripts/ORDERS/EVRBAS/OnLoad.js")
    );
}
