//! List rules command implementation.

use procedure_lint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<8} {:<28} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<8} {:<28} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
        println!("{:<8} {:<28} emits: {}", "", "", rule.identifiers().join(", "));
    }

    println!("\nPresets:");
    println!("  recommended  - PL001, PL002, PL003, PL004 (default)");
    println!("  minimal      - PL001, PL002 (annotation checks only)");

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  procedure-lint check --rules method-expose-name,required-attributes");
    println!("  procedure-lint check --rules PL001,PL003");
}
