use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

fn crewbook(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("crewbook").unwrap();
    cmd.env("HOME", home.path()).env("NO_COLOR", "1");
    cmd
}

#[test]
fn themes_lists_embedded_catalog() {
    let home = TempDir::new().unwrap();
    crewbook(&home)
        .arg("themes")
        .assert()
        .success()
        .stdout(contains("South Indian Wedding"))
        .stdout(contains("Corporate Gala"));
}

#[test]
fn locations_for_state_lists_cities() {
    let home = TempDir::new().unwrap();
    crewbook(&home)
        .args(["locations", "--state", "KA"])
        .assert()
        .success()
        .stdout(contains("Cities in Karnataka"))
        .stdout(contains("Mysuru"));
}

#[test]
fn unknown_state_fails() {
    let home = TempDir::new().unwrap();
    crewbook(&home)
        .args(["locations", "--state", "ZZ"])
        .assert()
        .failure()
        .stderr(contains("Error: Unknown state: ZZ"));
}

#[test]
fn packages_lists_all_tiers() {
    let home = TempDir::new().unwrap();
    crewbook(&home)
        .arg("packages")
        .assert()
        .success()
        .stdout(contains("Diamond Package"))
        .stdout(contains("Bronze Package"));
}

#[test]
fn catalog_dir_override_is_honoured() {
    let home = TempDir::new().unwrap();
    let catalog = home.path().join("catalog");
    std::fs::create_dir_all(&catalog).unwrap();
    std::fs::write(
        catalog.join("models.json"),
        r#"{"data": [{"id": "x1", "name": "Tara Sen", "height": "5'7\"", "image": "tara.jpg"}]}"#,
    )
    .unwrap();
    let config = home.path().join(".config").join("crewbook");
    std::fs::create_dir_all(&config).unwrap();
    std::fs::write(
        config.join("settings.json"),
        format!(r#"{{"catalog_dir": "{}"}}"#, catalog.display()),
    )
    .unwrap();

    crewbook(&home)
        .arg("models")
        .assert()
        .success()
        .stdout(contains("Tara Sen"));
}

#[test]
fn config_init_writes_defaults() {
    let home = TempDir::new().unwrap();
    crewbook(&home)
        .args(["config", "--init"])
        .assert()
        .success()
        .stdout(contains("Wrote default settings"))
        .stdout(contains("\"model_view_mode\": \"double\""));
    assert!(home.path().join(".config/crewbook/settings.json").exists());

    crewbook(&home)
        .args(["config", "--init"])
        .assert()
        .success()
        .stdout(contains("Settings already exist"));
}

#[test]
fn completions_are_generated() {
    let home = TempDir::new().unwrap();
    crewbook(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(contains("crewbook"));
}
