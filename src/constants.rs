//! Constants used throughout scaffold

/// Configuration file names in order of preference
pub const CONFIG_FILENAMES: &[&str] = &["scaffold.json", "scaffold.yaml", "scaffold.yml"];

/// Template extensions stripped from destination names when neither the
/// command line nor the config file provides any. Order matters: the first
/// matching entry wins.
pub const DEFAULT_TEMPLATE_EXTENSIONS: &[&str] = &[".j2"];

/// Ignore file name
pub const IGNORE_FILE: &str = ".scaffoldignore";

/// STDIN indicator for CLI arguments
pub const STDIN_INDICATOR: &str = "-";

/// Prefix of every line written to the report sink
pub const REPORT_PREFIX: &str = "📁";

/// Exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
