/// Environment variable marking a process as launched by a rebuild.
pub const MARKER_ENV: &str = "REBAKE_ALREADY_RAN";

/// Value written to [`MARKER_ENV`] before relaunching.
pub const MARKER_VALUE: &str = "1";

/// Suffix appended to the output file name to form the backup path.
pub const BACKUP_SUFFIX: &str = ".old";

/// Compiler program used when neither the caller nor `REBAKE_CC` names one.
pub const DEFAULT_COMPILER: &str = "cc";

/// Flag preceding the output path on the compiler command line.
pub const DEFAULT_OUTPUT_FLAG: &str = "-o";

/// Overrides the compiler program.
pub const COMPILER_ENV: &str = "REBAKE_CC";

/// Extra whitespace-separated compiler arguments.
pub const COMPILER_FLAGS_ENV: &str = "REBAKE_CFLAGS";
