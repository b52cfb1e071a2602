use std::error::Error;
use std::fs;

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::tempdir;

// Helper function to get the path to the compiled binary. HOME points at a
// temp directory so no test touches the real user configuration.
fn pqr_cmd(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("pqr").expect("Failed to find pqr binary");
    cmd.env("HOME", home);
    cmd
}

#[test]
fn test_help_lists_subcommands() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    pqr_cmd(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("prompts"))
        .stdout(contains("encoded"))
        .stdout(contains("init"));
    Ok(())
}

#[test]
fn test_version_flag() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    pqr_cmd(home.path()).arg("--version").assert().success();
    pqr_cmd(home.path())
        .arg("-v")
        .assert()
        .success()
        .stdout(contains("pqr"));
    Ok(())
}

#[test]
fn test_args_generates_label_and_record() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    let output = tempdir()?;

    // stdin is not a terminal here, so the preview loop is skipped and the
    // label is generated directly.
    pqr_cmd(home.path())
        .arg("args")
        .arg("--filament-name")
        .arg("Galaxy Black")
        .arg("--slicer-nozzle-temp")
        .arg("215")
        .arg("--filename-template")
        .arg("{filament-name}")
        .arg("-o")
        .arg(output.path())
        .assert()
        .success();

    let image_path = output.path().join("galaxy-black.png");
    let record_path = output.path().join("galaxy-black.toml");
    assert!(image_path.is_file());
    let record = fs::read_to_string(record_path)?;
    assert!(record.contains("name = \"Galaxy Black\""));
    assert!(record.contains("nozzle-temp = 215"));
    Ok(())
}

#[test]
fn test_args_rejects_non_numeric_temperature() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    pqr_cmd(home.path())
        .arg("args")
        .arg("--slicer-nozzle-temp")
        .arg("warm")
        .assert()
        .failure()
        .stderr(contains("--slicer-nozzle-temp"));
    Ok(())
}

#[test]
fn test_encoded_reads_toml_file() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    let output = tempdir()?;
    let settings_file = home.path().join("spool.toml");
    fs::write(
        &settings_file,
        "[filament]\nname = \"PLA Red\"\nmaterial = \"PLA\"\n",
    )?;

    pqr_cmd(home.path())
        .arg("encoded")
        .arg(&settings_file)
        .arg("--filename-template")
        .arg("{filament-name}")
        .arg("-o")
        .arg(output.path())
        .assert()
        .success();

    assert!(output.path().join("pla-red.png").is_file());
    Ok(())
}

#[test]
fn test_encoded_rejects_unknown_setting() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    let settings_file = home.path().join("spool.toml");
    fs::write(&settings_file, "[filament]\nnope = \"x\"\n")?;

    pqr_cmd(home.path())
        .arg("encoded")
        .arg(&settings_file)
        .assert()
        .failure()
        .stderr(contains("unknown print setting"));
    Ok(())
}

#[test]
fn test_encoded_rejects_unsupported_extension() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    let settings_file = home.path().join("spool.yaml");
    fs::write(&settings_file, "filament:\n")?;

    pqr_cmd(home.path())
        .arg("encoded")
        .arg(&settings_file)
        .assert()
        .failure()
        .stderr(contains("expected a .toml or .json file"));
    Ok(())
}

#[test]
fn test_bad_filename_template_fails_eagerly() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    pqr_cmd(home.path())
        .arg("args")
        .arg("--filament-name")
        .arg("PLA")
        .arg("--filename-template")
        .arg("{nope}")
        .assert()
        .failure()
        .stderr(contains("unknown field 'nope'"));
    Ok(())
}

#[test]
fn test_bad_date_template_fails_eagerly() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    pqr_cmd(home.path())
        .arg("args")
        .arg("--date-template")
        .arg("%")
        .assert()
        .failure()
        .stderr(contains("invalid date template"));
    Ok(())
}

#[test]
fn test_init_creates_and_protects_config() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    let config_path = home.path().join(".pqr").join("config.toml");

    pqr_cmd(home.path()).arg("init").assert().success();
    assert!(config_path.is_file());
    let original = fs::read_to_string(&config_path)?;
    assert!(original.contains("[templates]"));

    // A second init without --force leaves the file alone.
    fs::write(&config_path, "[options]\nadd-caption = false\n")?;
    pqr_cmd(home.path())
        .arg("init")
        .assert()
        .success()
        .stdout(contains("already exists"));
    assert_eq!(
        fs::read_to_string(&config_path)?,
        "[options]\nadd-caption = false\n"
    );

    pqr_cmd(home.path()).arg("init").arg("--force").assert().success();
    assert_eq!(fs::read_to_string(&config_path)?, original);
    Ok(())
}

#[test]
fn test_generate_mirrors_history_after_init() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    let output = tempdir()?;

    pqr_cmd(home.path()).arg("init").assert().success();

    pqr_cmd(home.path())
        .arg("args")
        .arg("--filament-name")
        .arg("PETG Clear")
        .arg("--filename-template")
        .arg("{filament-name}")
        .arg("-o")
        .arg(output.path())
        .assert()
        .success();

    let history = fs::read_to_string(home.path().join(".pqr").join("history.toml"))?;
    assert!(history.contains("name = \"PETG Clear\""));
    Ok(())
}

#[test]
fn test_user_config_defaults_apply() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    let output = tempdir()?;
    let pqr_dir = home.path().join(".pqr");
    fs::create_dir_all(&pqr_dir)?;
    fs::write(
        pqr_dir.join("config.toml"),
        r#"
[templates]
filename = "{filament-material}"

[print-settings.filament]
material = "ASA"
"#,
    )?;

    pqr_cmd(home.path())
        .arg("args")
        .arg("-o")
        .arg(output.path())
        .assert()
        .success();

    assert!(output.path().join("asa.png").is_file());
    Ok(())
}

#[test]
fn test_ignore_defaults_skips_configured_values() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    let output = tempdir()?;
    let pqr_dir = home.path().join(".pqr");
    fs::create_dir_all(&pqr_dir)?;
    fs::write(
        pqr_dir.join("config.toml"),
        "[print-settings.filament]\nbrand = \"Prusament\"\n",
    )?;

    pqr_cmd(home.path())
        .arg("args")
        .arg("--filament-name")
        .arg("PLA")
        .arg("--ignore-defaults")
        .arg("--filename-template")
        .arg("{filament-name}")
        .arg("-o")
        .arg(output.path())
        .assert()
        .success();

    let record = fs::read_to_string(output.path().join("pla.toml"))?;
    assert!(record.contains("brand = \"\""));
    Ok(())
}

#[test]
fn test_bad_config_override_fails_even_with_ignore_defaults() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    let pqr_dir = home.path().join(".pqr");
    fs::create_dir_all(&pqr_dir)?;
    fs::write(
        pqr_dir.join("config.toml"),
        "[print-settings.filament]\ncolour = \"red\"\n",
    )?;

    // The override is checked at config load, not at apply time, so
    // skipping the defaults does not let a malformed config through.
    pqr_cmd(home.path())
        .arg("args")
        .arg("--filament-name")
        .arg("PLA")
        .arg("--ignore-defaults")
        .assert()
        .failure()
        .stderr(contains("unknown print setting 'filament-colour'"));
    Ok(())
}

#[test]
fn test_compact_encoding_flag() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    let output = tempdir()?;

    pqr_cmd(home.path())
        .arg("args")
        .arg("--filament-name")
        .arg("PLA")
        .arg("--filament-brand")
        .arg("Prusament")
        .arg("-e")
        .arg("compact")
        .arg("--no-caption")
        .arg("--filename-template")
        .arg("{filament-name}")
        .arg("-o")
        .arg(output.path())
        .assert()
        .success();

    assert!(output.path().join("pla.png").is_file());
    Ok(())
}

#[test]
fn test_info_fields_table() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    pqr_cmd(home.path())
        .arg("info")
        .arg("fields")
        .assert()
        .success()
        .stdout(contains("{filament-name}"))
        .stdout(contains("{slicer-nozzle-temp}°C"))
        .stdout(contains("{printer-nozzle-size}mm"))
        .stdout(contains("nt"));
    Ok(())
}

#[test]
fn test_info_date_reference() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    pqr_cmd(home.path())
        .arg("info")
        .arg("date")
        .assert()
        .success()
        .stdout(contains("%Y"))
        .stdout(contains("%Y-%m-%d"));
    Ok(())
}
