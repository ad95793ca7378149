//! End-to-end tests running the `qcirc` binary.

use std::fs;
use std::process::{Command, Output};

use qcirc_ir::{Circuit, OpType};

fn qcirc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_qcirc"))
        .args(args)
        .output()
        .expect("failed to run qcirc")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout is UTF-8")
}

// ============================================================================
// Default build
// ============================================================================

mod build {
    use super::*;

    #[test]
    fn test_no_args_prints_conditional_circuit() {
        let output = qcirc(&[]);
        assert!(output.status.success());

        let text = stdout(&output);
        assert_eq!(text.lines().count(), 1);

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["qubits"].as_array().unwrap().len(), 2);
        assert_eq!(value["bits"], serde_json::json!([["c", [0]], ["c", [1]]]));

        let commands = value["commands"].as_array().unwrap();
        assert_eq!(commands.len(), 4);
        assert_eq!(commands[0]["op"]["type"], "X");
        assert_eq!(commands[1]["op"]["type"], "Measure");
        assert_eq!(commands[2]["op"]["type"], "Conditional");
        assert_eq!(commands[2]["op"]["conditional"]["op"]["type"], "Z");
        assert_eq!(commands[2]["op"]["conditional"]["value"], 0);
        assert_eq!(
            commands[2]["args"],
            serde_json::json!([["c", [0]], ["q", [1]]])
        );
        assert_eq!(commands[3]["op"]["conditional"]["op"]["type"], "CircBox");
        assert_eq!(commands[3]["op"]["conditional"]["value"], 1);
        assert_eq!(
            commands[3]["args"],
            serde_json::json!([["c", [1]], ["q", [0]], ["q", [1]]])
        );
    }

    #[test]
    fn test_build_matches_no_args() {
        let default = qcirc(&[]);
        let explicit = qcirc(&["build"]);
        assert_eq!(default.stdout, explicit.stdout);
    }

    #[test]
    fn test_output_is_deterministic() {
        let first = qcirc(&[]);
        let second = qcirc(&[]);
        assert!(first.status.success() && second.status.success());
        assert_eq!(first.stdout, second.stdout);
    }

    #[test]
    fn test_output_reloads() {
        let text = stdout(&qcirc(&[]));
        let circuit = Circuit::from_json(&text).unwrap();
        assert_eq!(circuit.commands().len(), 4);
        assert_eq!(circuit.count_ops(OpType::CircBox), 1);

        let reserialized = circuit.to_json_string(false).unwrap();
        assert_eq!(reserialized, text.trim_end());
    }

    #[test]
    fn test_verbose_logs_stay_off_stdout() {
        let quiet = qcirc(&[]);
        let verbose = qcirc(&["-vv"]);
        assert_eq!(quiet.stdout, verbose.stdout);
        assert!(!verbose.stderr.is_empty());
    }

    #[test]
    fn test_qasm3_format() {
        let output = qcirc(&["build", "--format", "qasm3"]);
        assert!(output.status.success());

        let text = stdout(&output);
        assert!(text.starts_with("OPENQASM 3.0;"));
        assert!(text.contains("bit[2] c;"));
        assert!(text.contains("c[0] = measure q[0];"));
        assert!(text.contains("if (c[0] == 0) {"));
        assert!(text.contains("if (c[1] == 1) {"));
        assert!(text.contains("cx q[0], q[1];"));
    }

    #[test]
    fn test_pretty_json() {
        let output = qcirc(&["build", "--pretty"]);
        let text = stdout(&output);
        assert!(text.lines().count() > 1);

        let compact = stdout(&qcirc(&[]));
        let a: serde_json::Value = serde_json::from_str(&text).unwrap();
        let b: serde_json::Value = serde_json::from_str(&compact).unwrap();
        assert_eq!(a, b);
    }
}

// ============================================================================
// Convert
// ============================================================================

mod convert {
    use super::*;

    #[test]
    fn test_convert_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("circuit.json");
        let output = dir.path().join("copy.json");

        let built = qcirc(&["build", "-o", input.to_str().unwrap()]);
        assert!(built.status.success());
        assert!(built.stdout.is_empty());

        let converted = qcirc(&[
            "convert",
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ]);
        assert!(converted.status.success());

        assert_eq!(
            fs::read_to_string(&input).unwrap(),
            fs::read_to_string(&output).unwrap()
        );
    }

    #[test]
    fn test_convert_to_qasm3() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("h.json");
        fs::write(
            &input,
            r#"{"bits": [], "commands": [{"args": [["q", [0]]], "op": {"type": "H"}}], "implicit_permutation": [[["q", [0]], ["q", [0]]]], "phase": "0.0", "qubits": [["q", [0]]]}"#,
        )
        .unwrap();

        let output = qcirc(&["convert", "-i", input.to_str().unwrap(), "-f", "qasm3"]);
        assert!(output.status.success());
        assert!(stdout(&output).contains("h q[0];"));
    }

    #[test]
    fn test_convert_missing_file_fails() {
        let output = qcirc(&["convert", "-i", "/nonexistent/qcirc/input.json"]);
        assert!(!output.status.success());
        assert_eq!(output.status.code(), Some(1));

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Error:"));
        assert!(stderr.contains("File not found"));
    }

    #[test]
    fn test_convert_invalid_document_fails() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bad.json");
        fs::write(
            &input,
            r#"{"bits": [], "commands": [{"args": [["q", [7]]], "op": {"type": "X"}}], "phase": "0.0", "qubits": [["q", [0]]]}"#,
        )
        .unwrap();

        let output = qcirc(&["convert", "-i", input.to_str().unwrap()]);
        assert_eq!(output.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&output.stderr).contains("q[7]"));
    }
}

#[test]
fn test_version() {
    let output = qcirc(&["version"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}
