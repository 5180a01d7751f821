use anyhow::Result;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn loader_command() -> Command {
    Command::new(env!("CARGO_BIN_EXE_olympics-loader"))
}

#[test]
fn test_cli_defaults_use_working_directory_layout() -> Result<()> {
    let dir = TempDir::new()?;
    let source = dir.path().join("data").join("olympics");
    fs::create_dir_all(source.join("results"))?;
    fs::write(source.join("nocs.csv"), "code,country\nFRA,France\nJPN,Japan\n")?;
    fs::write(source.join("results").join("Table Tennis.csv"), "rank,name\n1,Fan\n")?;

    let output = loader_command().current_dir(dir.path()).output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("Imported nocs.csv as table 'nocs'"));
    assert!(stdout.contains("- nocs: 2 rows"));
    assert!(stdout.contains("- results_table_tennis: 1 rows"));
    assert!(dir.path().join("olympics.db").exists());
    Ok(())
}

#[test]
fn test_cli_exits_zero_when_a_file_fails() -> Result<()> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("coaches.csv"), "id\n1,2\n")?;
    fs::write(dir.path().join("teams.csv"), "code\nFRA\n")?;
    let database = dir.path().join("out.db");

    let output = loader_command()
        .arg("--source-dir")
        .arg(dir.path())
        .arg("--database")
        .arg(&database)
        .output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("Error importing"));
    assert!(stdout.contains("- teams: 1 rows"));
    assert!(!stdout.contains("- coaches:"));
    Ok(())
}

#[test]
fn test_cli_json_report() -> Result<()> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("venues.csv"), "name,city\nBercy Arena,Paris\n")?;
    let database = dir.path().join("out.db");

    let output = loader_command()
        .arg("--source-dir")
        .arg(dir.path())
        .arg("--database")
        .arg(&database)
        .args(["--format", "json"])
        .output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let json_start = stdout.find('{').expect("json report on stdout");
    let report: serde_json::Value = serde_json::from_str(&stdout[json_start..])?;
    assert_eq!(report["tables"][0]["name"], "venues");
    assert_eq!(report["tables"][0]["row_count"], 1);
    Ok(())
}

#[test]
fn test_cli_fails_on_unwritable_database() -> Result<()> {
    let dir = TempDir::new()?;
    let output = loader_command()
        .arg("--source-dir")
        .arg(dir.path())
        .arg("--database")
        .arg(dir.path().join("missing").join("out.db"))
        .output()?;

    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr)?.contains("Import failed"));
    Ok(())
}
