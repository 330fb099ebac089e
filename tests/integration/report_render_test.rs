//! Report generation over a real output directory

mod common;

use scriptsync_reports::{company_table, reference_code_table, CompanyRecord, ReferenceCode};
use scriptsync_reports::{write_report, TextTable};

fn doc_type_rows() -> Vec<ReferenceCode> {
    vec![
        ReferenceCode {
            code: 1,
            description: "Sales Invoice".to_string(),
        },
        ReferenceCode {
            code: 12,
            description: "Waybill".to_string(),
        },
        ReferenceCode {
            code: 120,
            description: "Return".to_string(),
        },
    ]
}

#[tokio::test]
async fn test_report_file_layout_and_width_law() {
    let workspace = tempfile::tempdir().unwrap();
    let table = reference_code_table(&doc_type_rows());

    let path = write_report(workspace.path(), "Output", "doc-types.md", &table)
        .await
        .unwrap()
        .expect("non-empty result set must write");
    assert_eq!(path, workspace.path().join("Output").join("doc-types.md"));

    let rendered = std::fs::read_to_string(&path).unwrap();
    // header + separator + one line per record
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 5);

    // Every row, header included, has identical rendered length
    let width = lines[0].chars().count();
    assert!(lines.iter().all(|line| line.chars().count() == width));

    // Column width is max(header, cells): "ACIKLAMA" loses to "Sales Invoice"
    assert!(lines[0].contains("| ACIKLAMA      |"));
    assert!(lines[2].contains("| Sales Invoice |"));
}

#[tokio::test]
async fn test_empty_result_set_writes_no_file() {
    let workspace = tempfile::tempdir().unwrap();
    let table = TextTable::new(vec!["KOD".to_string(), "ACIKLAMA".to_string()]);

    let path = write_report(workspace.path(), "Output", "doc-types.md", &table)
        .await
        .unwrap();
    assert!(path.is_none());
    assert!(!workspace.path().join("Output").exists());
}

#[tokio::test]
async fn test_second_report_overwrites_the_first() {
    let workspace = tempfile::tempdir().unwrap();

    let table = reference_code_table(&doc_type_rows());
    let path = write_report(workspace.path(), "Output", "doc-types.md", &table)
        .await
        .unwrap()
        .unwrap();

    let smaller = reference_code_table(&doc_type_rows()[..1]);
    write_report(workspace.path(), "Output", "doc-types.md", &smaller)
        .await
        .unwrap();

    let rendered = std::fs::read_to_string(&path).unwrap();
    assert_eq!(rendered, smaller.render());
}

#[tokio::test]
async fn test_company_report_renders_all_columns() {
    let workspace = tempfile::tempdir().unwrap();
    let rows = vec![CompanyRecord {
        company_no: 7,
        company_name: "Acme Trading".to_string(),
        server_name: "SRV1".to_string(),
        database_name: "ACMEDB".to_string(),
    }];

    let path = write_report(
        workspace.path(),
        "Output",
        "companies.md",
        &company_table(&rows),
    )
    .await
    .unwrap()
    .unwrap();

    let rendered = std::fs::read_to_string(path).unwrap();
    assert!(rendered.contains("COMPANYNO"));
    assert!(rendered.contains("Acme Trading"));
    assert!(rendered.contains("ACMEDB"));
}
