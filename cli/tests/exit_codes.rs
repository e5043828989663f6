use std::fs;
use std::process::Command;

const SCHEMA: &str = "
CREATE TABLE TAG_V1(TAGID INTEGER PRIMARY KEY, TAGNAME TEXT NOT NULL, ACTIVE INTEGER);
CREATE INDEX IDX_TAGNAME ON TAG_V1(TAGNAME);
CREATE TABLE CURRENCYFORMATS_V1(CURRENCYID INTEGER PRIMARY KEY, CURRENCYNAME TEXT, CURRENCY_SYMBOL TEXT);
INSERT INTO CURRENCYFORMATS_V1 VALUES (1, '_tr_Euro', 'EUR');
";

#[test]
fn missing_schema_argument_exits_nonzero() {
    let output = Command::new(env!("CARGO_BIN_EXE_tablegen"))
        .arg("-t")
        .output()
        .expect("failed to run tablegen");

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn default_run_writes_tables_and_patches() {
    let dir = tempfile::tempdir().unwrap();
    let schema = dir.path().join("tables.sql");
    fs::write(&schema, SCHEMA).unwrap();
    let out = dir.path().join("out");

    let output = Command::new(env!("CARGO_BIN_EXE_tablegen"))
        .arg("--output-dir")
        .arg(&out)
        .arg(&schema)
        .output()
        .expect("failed to run tablegen");
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Generate TagTable.h (source code for TAG_V1)\n"));
    assert!(stdout.contains("Generate patch_currency.sql (patch for CURRENCYFORMATS_V1)\n"));
    assert!(stdout.ends_with("Done\n"));

    assert!(out.join("TagTable.cpp").exists());
    assert!(out.join("patch_currency_utf8.sql").exists());
    assert!(!out.join("TagData.h").exists());
    assert!(!out.join("tables_en.sql").exists());
}

#[test]
fn schema_without_primary_key_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let schema = dir.path().join("tables.sql");
    fs::write(&schema, "CREATE TABLE A(X TEXT);\nCREATE TABLE B(ID INTEGER PRIMARY KEY);").unwrap();
    let out = dir.path().join("out");

    let output = Command::new(env!("CARGO_BIN_EXE_tablegen"))
        .arg("-std")
        .arg("--output-dir")
        .arg(&out)
        .arg(&schema)
        .output()
        .expect("failed to run tablegen");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("table A has no primary key"));
    assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
}

#[test]
fn unreadable_schema_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let status = Command::new(env!("CARGO_BIN_EXE_tablegen"))
        .arg("--output-dir")
        .arg(dir.path())
        .arg(dir.path().join("missing.sql"))
        .status()
        .expect("failed to run tablegen");
    assert_eq!(status.code(), Some(1));
}
