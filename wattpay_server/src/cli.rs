use std::{env, env::VarError};

/// There's no real CLI for the server, so just do quick 'n dirty
pub fn handle_command_line_args() -> bool {
    let has_cli_args = env::args().count() > 1;
    if has_cli_args {
        // We don't expect any CLI args, so always print the help
        display_readme();
        display_envs();
    }
    has_cli_args
}

fn display_readme() {
    const README: &str = include_str!("./cli-help.txt");
    println!("\n{README}\n");
}

fn display_envs() {
    // Only non-secret values are listed here. RAZORPAY_KEY_SECRET must never be printed.
    const DISPLAY_ENVS: [&str; 9] = [
        "RUST_LOG",
        "WPS_HOST",
        "WPS_PORT",
        "WPS_DATABASE_URL",
        "WPS_RUN_MIGRATIONS",
        "WPS_REMINDER_INTERVAL_HOURS",
        "WPS_REMINDER_LOOKAHEAD_DAYS",
        "RAZORPAY_KEY_ID",
        "RAZORPAY_API_URL",
    ];

    println!("Current environment values (EXCLUDING variables that contain secrets):");
    DISPLAY_ENVS.iter().for_each(|&name| {
        let val = match env::var(name) {
            Ok(s) => s,
            Err(VarError::NotPresent) => "Not set".into(),
            Err(VarError::NotUnicode(s)) => format!("Invalid value: {}", s.to_string_lossy()),
        };
        println!("  {name:<35} {val:<15}");
    })
}
