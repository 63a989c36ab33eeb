//! Console output for the operator.
//!
//! Green for success, red for errors, yellow for warnings and
//! cyan for hints. `NO_COLOR` turns colors off.

use colored::Colorize;

fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// `✓ message` in green.
pub fn success(msg: &str) {
    if colors_enabled() {
        println!("{} {}", "✓".green(), msg.green());
    } else {
        println!("✓ {msg}");
    }
}

/// `✗ message` in red, on stderr.
pub fn error(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", "✗".red(), msg.red());
    } else {
        eprintln!("✗ {msg}");
    }
}

/// `⚠ message` in yellow.
pub fn warn(msg: &str) {
    if colors_enabled() {
        println!("{} {}", "⚠".yellow(), msg.yellow());
    } else {
        println!("⚠ {msg}");
    }
}

/// `→ message` in cyan.
pub fn hint(msg: &str) {
    if colors_enabled() {
        println!("{} {}", "→".cyan(), msg.cyan());
    } else {
        println!("→ {msg}");
    }
}

/// Bold title surrounded by blank lines.
pub fn header(title: &str) {
    println!();
    if colors_enabled() {
        println!("{}", title.bold());
    } else {
        println!("{title}");
    }
    println!();
}

pub fn list_item(item: &str) {
    println!("  • {item}");
}
