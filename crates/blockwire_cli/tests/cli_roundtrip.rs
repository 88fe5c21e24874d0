#![allow(missing_docs)]

use std::process::{Command, Output};

use blockwire_testkit::{fixture_json, fixture_path, scratch_dir};
use serde_json::Value;

fn run(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_blockwire")).args(args).output().expect("command executes")
}

fn run_json(args: &[&str]) -> Value {
	let output = run(args);
	assert!(
		output.status.success(),
		"blockwire failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

fn fixture(name: &str) -> String {
	fixture_path(name).display().to_string()
}

#[test]
fn compile_json_matches_program_fixture() {
	let json = run_json(&["compile", &fixture("message.schema.json"), "--json"]);
	assert_eq!(json, fixture_json("message.program.json"));
}

#[test]
fn encode_then_decode_restores_document() {
	let dir = scratch_dir("plain");
	let out = dir.join("message.bin").display().to_string();

	let summary = run_json(&["encode", "--schema", &fixture("message.schema.json"), &fixture("message.data.json"), "-o", &out]);
	assert_eq!(summary["zstd"], false);
	assert_eq!(summary["encoded_bytes"], summary["written_bytes"]);

	let decoded = run_json(&["decode", "--program", &fixture("message.program.json"), &out, "--strict"]);
	assert_eq!(decoded, fixture_json("message.data.json"));
}

#[test]
fn integral_float_fields_decode_as_integers() {
	let dir = scratch_dir("integral");
	let data = dir.join("score.data.json");
	let out = dir.join("score.bin").display().to_string();

	let mut doc = fixture_json("message.data.json");
	doc["body"]["value"] = serde_json::json!(3);
	std::fs::write(&data, serde_json::to_vec(&doc).expect("serializes")).expect("data file writable");

	run_json(&["encode", "--schema", &fixture("message.schema.json"), &data.display().to_string(), "-o", &out]);
	let decoded = run_json(&["decode", "--schema", &fixture("message.schema.json"), &out, "--strict"]);
	assert_eq!(decoded["body"]["value"], serde_json::json!(3));
	assert_eq!(decoded, doc);
}

#[test]
fn zstd_wrapped_buffers_round_trip() {
	let dir = scratch_dir("zstd");
	let out = dir.join("message.bin.zst").display().to_string();

	let summary = run_json(&["encode", "--program", &fixture("message.program.json"), &fixture("message.data.json"), "-o", &out, "--zstd"]);
	assert_eq!(summary["zstd"], true);

	let decoded = run_json(&["decode", "--schema", &fixture("message.schema.json"), &out, "--zstd"]);
	assert_eq!(decoded, fixture_json("message.data.json"));
}

#[test]
fn strict_decode_rejects_trailing_bytes() {
	let dir = scratch_dir("strict");
	let out = dir.join("message.bin");
	let out_arg = out.display().to_string();
	run_json(&["encode", "--program", &fixture("message.program.json"), &fixture("message.data.json"), "-o", &out_arg]);

	let mut bytes = std::fs::read(&out).expect("encoded file readable");
	bytes.push(0);
	std::fs::write(&out, bytes).expect("encoded file writable");

	let lenient = run_json(&["decode", "--program", &fixture("message.program.json"), &out_arg]);
	assert_eq!(lenient, fixture_json("message.data.json"));

	let output = run(&["decode", "--program", &fixture("message.program.json"), &out_arg, "--strict"]);
	assert_eq!(output.status.code(), Some(1));
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("error: trailing bytes after decode: leftover=1"), "stderr: {stderr}");
}

#[test]
fn undecidable_union_fails_with_message() {
	let output = run(&["compile", &fixture("unsupported.schema.json")]);
	assert_eq!(output.status.code(), Some(1));
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(
		stderr.contains("error: could not determine the type of the discriminator at: u"),
		"stderr: {stderr}"
	);
}

#[test]
fn inspect_lists_program_blocks() {
	let output = run(&["inspect", &fixture("message.program.json")]);
	assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
	let stdout = String::from_utf8_lossy(&output.stdout);

	let lines: Vec<&str> = stdout.lines().collect();
	assert_eq!(lines.first().copied(), Some("discriminator string body [tag=kind]"));
	assert!(lines.contains(&"    primitive float body.value"));
	assert!(lines.contains(&"array boolean flags"));
	assert!(lines.contains(&"discriminator uint parent [presence]"));
}

#[test]
fn program_source_is_required() {
	let output = run(&["decode", &fixture("message.data.json")]);
	assert_eq!(output.status.code(), Some(1));
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("error: one of --program or --schema is required"), "stderr: {stderr}");

	let output = run(&["decode", "--program", &fixture("message.program.json"), "--schema", &fixture("message.schema.json"), &fixture("message.data.json")]);
	assert!(!output.status.success());
}
