#![cfg(feature = "std")]

use std::process::Command;

fn run(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_naval-battle"))
        .args(args)
        .output()
        .expect("failed to run naval-battle binary")
}

#[test]
fn sim_binary_smoke() {
    let output = run(&["sim", "--seed", "12345", "--side-one", "Turma A"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).expect("invalid json");
    assert_eq!(v["seed"], 12345);
    assert!(v["winner"]["side"].is_u64());
    assert!(v["winner"]["name"].is_string());
    assert!(v["turns"].as_u64().unwrap() >= 12);
}

#[test]
fn sim_is_reproducible() {
    let a = run(&["sim", "--seed", "7"]);
    let b = run(&["sim", "--seed", "7"]);
    assert!(a.status.success());
    let a: serde_json::Value = serde_json::from_slice(&a.stdout).unwrap();
    let b: serde_json::Value = serde_json::from_slice(&b.stdout).unwrap();
    assert_eq!(a["winner"], b["winner"]);
    assert_eq!(a["turns"], b["turns"]);
}

#[test]
fn catalog_subcommand_lists_fleet() {
    let output = run(&["catalog", "--catalog", "carrier:5x1,destroyer:2x2", "--board-size", "8"]);
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["board_size"], 8);
    assert_eq!(v["total_ships"], 3);
    assert_eq!(v["total_cells"], 9);
    assert_eq!(v["ships"][0]["name"], "carrier");
}

#[test]
fn bad_catalog_is_rejected() {
    let output = run(&["catalog", "--catalog", "carrier:9x1"]);
    assert!(!output.status.success());
}
