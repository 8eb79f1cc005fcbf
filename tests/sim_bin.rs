use std::process::Command;

fn run_sim(seed: &str) -> serde_json::Value {
    let output = Command::new(env!("CARGO_BIN_EXE_sim"))
        .arg(seed)
        .output()
        .expect("failed to run sim binary");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    serde_json::from_str(stdout.trim()).expect("invalid json")
}

#[test]
fn sim_binary_smoke() {
    let v = run_sim("1");
    assert!(v["winner"].is_string());
    assert_eq!(v["config"]["board_size"], 10);
    let winner_shots = match v["winner"].as_str() {
        Some("player1") => v["player1"]["shots"].as_u64().unwrap(),
        _ => v["player2"]["shots"].as_u64().unwrap(),
    };
    assert!((17..=100).contains(&winner_shots));
}

#[test]
fn sim_binary_is_deterministic() {
    assert_eq!(run_sim("42"), run_sim("42"));
}
