//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - quantum circuits with classical control",
        style("qcirc").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qcirc-ir     Circuit model and JSON serialization");
    println!("  qcirc-qasm3  OpenQASM 3 emitter");
    println!("  qcirc-cli    Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
