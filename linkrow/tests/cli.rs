use std::process::{Command, Output};

fn linkrow(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_linkrow"))
        .args(args)
        .env_remove("BASEROW_URL")
        .env_remove("BASEROW_API_KEY")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .output()
        .unwrap()
}

#[test]
fn test_missing_selection_exits_with_one() {
    let output = linkrow(&["https://baserow.example.com/api/", "secret"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("either database_id or table_ids must be provided"));
}

#[test]
fn test_invalid_base_url_exits_with_one() {
    let output = linkrow(&["nope", "secret", "--table_ids", "1"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid base url 'nope"));
}
