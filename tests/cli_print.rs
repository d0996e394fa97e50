//! Integration test: `--print` resolves widths without a terminal.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("gridfit_cli_{}", name));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("Failed to create scratch dir");
    dir
}

/// Run the binary with a config that keeps the log file inside `dir`.
fn run_print(dir: &PathBuf, data_file: &str, extra_config: &str, args: &[&str]) -> Output {
    let config = dir.join("config.toml");
    let log = dir.join("gridfit.log");
    fs::write(
        &config,
        format!("log_file_path = {:?}\n{}", log.to_string_lossy(), extra_config),
    )
    .expect("Failed to write config");

    Command::new(env!("CARGO_BIN_EXE_gridfit"))
        .arg(dir.join(data_file))
        .arg("--print")
        .arg("--config")
        .arg(&config)
        .args(args)
        .env_remove("GRIDFIT_VIEWPORT_MODE")
        .output()
        .expect("Failed to execute binary")
}

#[test]
fn print_lists_content_widths() {
    let dir = scratch_dir("independent");
    fs::write(
        dir.join("rows.jsonl"),
        "{\"id\":1,\"city\":\"Oslo\"}\n{\"id\":22,\"city\":\"Reykjavik\"}\n",
    )
    .unwrap();

    let output = run_print(&dir, "rows.jsonl", "", &["--mode", "scroll"]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "id\t3\ncity\t10\n");
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn print_fits_columns_to_width() {
    let dir = scratch_dir("fit");
    fs::write(
        dir.join("rows.json"),
        r#"[{"a":"xxxxxxxx","b":"yy"}]"#,
    )
    .unwrap();

    // 31 cells minus one cell of spacing
    let output = run_print(&dir, "rows.json", "", &["--mode", "fcv", "--width", "31"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let total: u32 = stdout
        .lines()
        .filter_map(|l| l.split('\t').nth(1))
        .map(|w| w.parse::<u32>().unwrap())
        .sum();
    assert_eq!(total, 30, "got: {}", stdout);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn print_applies_column_overrides_and_reports_viewport() {
    let dir = scratch_dir("overrides");
    fs::write(dir.join("rows.jsonl"), "{\"code\":\"x\",\"note\":\"hello\"}\n").unwrap();

    let config = "[columns.code]\nstrategy = \"LK\"\nwidth_px = 12\n";
    let output = run_print(&dir, "rows.jsonl", config, &["--mode", "FitViewportToCols"]);

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "code\t12\nnote\t6\nviewport\t18\n"
    );
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_file_fails() {
    let dir = scratch_dir("missing");

    let output = run_print(&dir, "nope.jsonl", "", &[]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("nope.jsonl"));
    let _ = fs::remove_dir_all(&dir);
}
