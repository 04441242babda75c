#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn stockroom_cmd(data: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("stockroom"));
    cmd.env("STOCKROOM_DATA", data.as_os_str())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_import_list_and_reimport() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("data");
    let csv = temp.path().join("products.csv");
    fs::write(
        &csv,
        "id,name,category,price,quantity,barcode\n101,Widget,Tools,9.99,5,4001\n102,Gadget,Tools,19.99,2,4002\n",
    )
    .unwrap();

    stockroom_cmd(&data)
        .args(["init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized"));

    stockroom_cmd(&data)
        .args(["import", csv.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 inserted, 0 updated"));

    stockroom_cmd(&data)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Widget"))
        .stdout(predicate::str::contains("Gadget"));

    stockroom_cmd(&data)
        .args(["categories"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tools"));

    stockroom_cmd(&data)
        .args(["import", csv.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 inserted, 2 updated"));

    let products: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(data.join("products.json")).unwrap()).unwrap();
    assert_eq!(products.as_array().unwrap().len(), 2);
}

#[test]
fn test_sell_sku_and_delete() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("data");
    let csv = temp.path().join("products.csv");
    fs::write(&csv, "id,name,quantity,barcode\n7,Mug,10,5001\n").unwrap();

    stockroom_cmd(&data)
        .args(["import", csv.to_str().unwrap()])
        .assert()
        .success();

    stockroom_cmd(&data)
        .args(["sell", "7:3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mug: 7 left"));

    stockroom_cmd(&data)
        .args(["sku", "5001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mug"));

    stockroom_cmd(&data)
        .args(["delete", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Product deleted"));

    stockroom_cmd(&data)
        .args(["get", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No product with id 7"));
}

#[test]
fn test_empty_import_fails() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("data");
    let csv = temp.path().join("empty.csv");
    fs::write(&csv, "\n\n").unwrap();

    stockroom_cmd(&data)
        .args(["import", csv.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Empty input"));
}

#[test]
fn test_preview_and_config() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("data");
    let csv = temp.path().join("products.csv");
    fs::write(&csv, "name,Category\na,Tools\nb,Toys\nc,Tools\n").unwrap();

    stockroom_cmd(&data)
        .args(["preview", csv.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tools").and(predicate::str::contains("Toys")));
    assert!(!data.join("categories.json").exists());

    stockroom_cmd(&data)
        .args(["config", "fallback-category", "misc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fallback-category set to misc"));

    stockroom_cmd(&data)
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fallback-category = misc"));
}
