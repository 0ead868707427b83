//! End-to-end tests running the `f1q` binary against the Monaco fixture.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn f1q_binary() -> String {
    env!("CARGO_BIN_EXE_f1q").to_string()
}

fn monaco_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../f1q-core/tests/data/monaco")
}

/// Builds an `f1q` command with an isolated home and a config file in `temp`.
fn f1q_command(temp: &Path) -> Command {
    let config_path = temp.join("config.toml");
    std::fs::write(
        &config_path,
        format!(
            "data_dir = {:?}\ndatabase_path = {:?}\n",
            monaco_dir().display().to_string(),
            temp.join("db/f1q.db").display().to_string()
        ),
    )
    .unwrap();

    let mut command = Command::new(f1q_binary());
    command
        .env("HOME", temp)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("XDG_DATA_HOME")
        .env_remove("F1Q_DATA_DIR")
        .env_remove("F1Q_DATABASE_PATH")
        .env_remove("F1Q_FILTER_UNRELIABLE")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(&config_path);
    command
}

fn run_f1q(temp: &Path, args: &[&str]) -> Output {
    f1q_command(temp)
        .args(args)
        .output()
        .expect("failed to run f1q")
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "f1q should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_report_ascending_from_config_data_dir() {
    let temp = TempDir::new().unwrap();
    let out = stdout(&run_f1q(temp.path(), &["report"]));

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "POS.DRIVER              |CAR                       |Q1");
    assert_eq!(
        lines[1],
        "  1.Romain Grosjean     |HAAS FERRARI              |1:4.360"
    );
    assert_eq!(lines[16], "-".repeat(60));
    assert_eq!(
        lines[17],
        " 16.Valtteri Bottas     |MERCEDES                  |1:11.790"
    );
    assert_eq!(lines.len(), 19);
}

#[test]
fn test_report_descending_with_files_flag() {
    let temp = TempDir::new().unwrap();
    let files = monaco_dir().display().to_string();
    let out = stdout(&run_f1q(temp.path(), &["report", "--files", &files, "--desc"]));

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines[1],
        " 17.Esteban Ocon        |FORCE INDIA MERCEDES      |1:15.168"
    );
    assert_eq!(
        lines[2],
        " 16.Valtteri Bottas     |MERCEDES                  |1:11.790"
    );
    assert_eq!(lines[3], "-".repeat(60));
}

#[test]
fn test_report_single_driver() {
    let temp = TempDir::new().unwrap();

    let out = stdout(&run_f1q(temp.path(), &["report", "--driver", "Lewis", "Hamilton"]));
    assert_eq!(
        out,
        "POS.DRIVER              |CAR                       |Q1\n  6.Lewis Hamilton      |MERCEDES                  |1:7.241\n"
    );

    let out = stdout(&run_f1q(temp.path(), &["report", "--driver", "Nobody"]));
    assert!(out.ends_with("Cannot find driver. Please check driver name\n"));
}

#[test]
fn test_report_json() {
    let temp = TempDir::new().unwrap();
    let out = stdout(&run_f1q(temp.path(), &["report", "--json"]));

    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    let results = value["results"].as_array().unwrap();
    assert_eq!(results.len(), 17);
    assert_eq!(results[0]["driver"], "Romain Grosjean");
    assert_eq!(results[0]["time"], "1:4.360");
    // Most negative lap first
    assert_eq!(value["unreliable"][0]["driver"], "Daniel Ricciardo");
    assert_eq!(value["unreliable"][1]["driver"], "Brendon Hartley");
}

#[test]
fn test_report_and_drivers_xml() {
    let temp = TempDir::new().unwrap();

    let out = stdout(&run_f1q(temp.path(), &["report", "--xml", "--desc"]));
    assert!(out.starts_with(
        "<MonacoQ1Report><position><position_number>17</position_number><pilot>Esteban Ocon</pilot>"
    ));
    assert_eq!(out.matches("<position>").count(), 17);

    let out = stdout(&run_f1q(temp.path(), &["drivers", "--code", "DRR", "--xml"]));
    assert!(out.contains("<position_number>Unknown</position_number><pilot>Daniel Ricciardo</pilot>"));

    let output = run_f1q(temp.path(), &["report", "--xml", "--json"]);
    assert!(!output.status.success());
}

#[test]
fn test_filtering_disabled_by_env() {
    let temp = TempDir::new().unwrap();
    let output = f1q_command(temp.path())
        .env("F1Q_FILTER_UNRELIABLE", "false")
        .args(["report", "--json"])
        .output()
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["results"].as_array().unwrap().len(), 19);
    assert_eq!(value["results"][0]["time"], "-3:12.013");
    assert!(value["unreliable"].as_array().unwrap().is_empty());
}

#[test]
fn test_drivers_listing_and_code_lookup() {
    let temp = TempDir::new().unwrap();

    let out = stdout(&run_f1q(temp.path(), &["drivers"]));
    assert_eq!(out.lines().count(), 19);
    assert_eq!(
        out.lines().next().unwrap(),
        "BHS|Brendon Hartley|SCUDERIA TORO ROSSO HONDA"
    );

    let out = stdout(&run_f1q(temp.path(), &["drivers", "--desc"]));
    assert!(out.starts_with("VBM|Valtteri Bottas|MERCEDES\n"));

    let out = stdout(&run_f1q(temp.path(), &["drivers", "--code", "DRR"]));
    assert!(out.ends_with("Unknown.Daniel Ricciardo    |RED BULL RACING TAG HEUER |Unreliable\n"));

    let output = run_f1q(temp.path(), &["drivers", "--code", "ZZZ"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown driver code: ZZZ"));
}

#[test]
fn test_store_persists_roster_and_laps() {
    let temp = TempDir::new().unwrap();

    let out = stdout(&run_f1q(temp.path(), &["store"]));
    assert!(out.starts_with("Stored 19 drivers and 19 laps in "));

    let out = stdout(&run_f1q(temp.path(), &["store"]));
    assert!(out.starts_with("Stored 0 drivers and 0 laps in "));

    let db = f1q_db::Database::open(&temp.path().join("db/f1q.db")).unwrap();
    assert_eq!(db.list_drivers().unwrap().len(), 19);
    assert_eq!(db.list_laps().unwrap().len(), 19);
}

#[test]
fn test_missing_directory_fails() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nowhere").display().to_string();

    let output = run_f1q(temp.path(), &["report", "--files", &missing]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to build report"), "stderr: {stderr}");
    assert!(stderr.contains("directory not found"), "stderr: {stderr}");
}
