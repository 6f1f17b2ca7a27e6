//! Version and usage output.

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version_line() -> String {
    format!("gpt-term version {}", VERSION)
}

pub fn usage() -> String {
    format!(
        "{}\n\nUsage: gpt-term [--version | --help]\n\n\
         Environment:\n  \
         CLAUDE_API_KEY       API key (required)\n  \
         EDITOR               editor for message edits (default: nvim)\n  \
         GPT_TERM_MODEL       model name\n  \
         GPT_TERM_MAX_TOKENS  reply length limit\n  \
         GPT_TERM_HOME        data directory (default: ~/.gpt-term)\n  \
         GPT_TERM_LOG         log filter, written to <data dir>/gpt-term.log",
        version_line()
    )
}

/// Print the version string and exit successfully.
pub fn handle_version_command() -> ! {
    println!("{}", version_line());
    std::process::exit(0)
}

/// Print usage and exit successfully.
pub fn handle_help_command() -> ! {
    println!("{}", usage());
    std::process::exit(0)
}
