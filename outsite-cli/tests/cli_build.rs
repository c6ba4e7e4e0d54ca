use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_export(root: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let export = root.join("export");
    fs::create_dir_all(export.join("roam/js"))?;

    fs::write(
        export.join("roam/js/static-site.md"),
        "- Index\n    - Home\n- Filter\n    - TAGGED WITH\n        - Public\n",
    )?;
    fs::write(
        export.join("Home.md"),
        "- Welcome #Public\n- Start with [[Reading List]]\n",
    )?;
    fs::write(
        export.join("Reading List.md"),
        "- Public:: yes\n- Back to [[Home]] or #[[Private Journal]]\n",
    )?;
    fs::write(export.join("Private Journal.md"), "- nothing public\n")?;
    Ok(())
}

#[test]
fn build_writes_selected_pages() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_export(dir.path())?;
    fs::write(
        dir.path().join("outsite.yml"),
        "site:\n  title: \"Garden\"\npaths:\n  export: \"export\"\n  output: \"public\"\n",
    )?;

    #[allow(deprecated)]
    Command::cargo_bin("outsite")?
        .current_dir(dir.path())
        .arg("build")
        .assert()
        .success();

    let public = dir.path().join("public");
    let index = fs::read_to_string(public.join("index.html"))?;
    assert!(index.contains("<title>Home | Garden</title>"));
    assert!(index.contains(r#"<a href="/Reading_List.html">Reading List</a>"#));

    let reading = fs::read_to_string(public.join("Reading_List.html"))?;
    assert!(reading.contains(r#"<a href="/index.html">Home</a>"#));
    // Not published, so the reference stays as written
    assert!(reading.contains("#[[Private Journal]]"));

    assert!(!public.join("Private_Journal.html").exists());
    assert!(!public.join("roam%2Fjs%2Fstatic-site.html").exists());
    Ok(())
}

#[test]
fn build_with_path_overrides_and_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let export = dir.path().join("graph");
    fs::create_dir_all(&export)?;
    fs::write(export.join("Website Index.md"), "- See [[About Me]]\n")?;
    fs::write(export.join("About Me.md"), "- Hi\n")?;

    #[allow(deprecated)]
    Command::cargo_bin("outsite")?
        .current_dir(dir.path())
        .args(["build", "--export", "graph", "--output", "site"])
        .assert()
        .success();

    let site = dir.path().join("site");
    assert!(site.join("index.html").exists());
    assert!(site.join("About_Me.html").exists());
    Ok(())
}

#[test]
fn build_fails_on_malformed_configuration() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let export = dir.path().join("export");
    fs::create_dir_all(export.join("roam/js"))?;
    fs::write(export.join("roam/js/static-site.md"), "    - Index\n")?;
    fs::write(export.join("Page.md"), "- body\n")?;

    #[allow(deprecated)]
    Command::cargo_bin("outsite")?
        .current_dir(dir.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed outline"));

    assert!(!dir.path().join("out").exists());
    Ok(())
}

#[test]
fn plan_json_lists_pages() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_export(dir.path())?;

    #[allow(deprecated)]
    let assert = Command::cargo_bin("outsite")?
        .current_dir(dir.path())
        .args(["plan", "--json"])
        .assert()
        .success();

    let json: Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(json["config_page_found"], true);
    assert_eq!(json["publication"]["index"], "Home");

    let files: Vec<&str> = json["pages"]
        .as_array()
        .expect("pages array")
        .iter()
        .filter_map(|p| p["html_file_name"].as_str())
        .collect();
    assert_eq!(files, vec!["index.html", "Reading_List.html"]);
    Ok(())
}

#[test]
fn plan_text_reports_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::create_dir_all(dir.path().join("export"))?;
    fs::write(dir.path().join("export/Note.md"), "- a\n")?;

    #[allow(deprecated)]
    Command::cargo_bin("outsite")?
        .current_dir(dir.path())
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("Index page: Website Index"))
        .stdout(predicate::str::contains("Note -> Note.html"));
    Ok(())
}
