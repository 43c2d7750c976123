//! Exit code definitions for the s3fs binary
//!
//! Errors inside the shell are reported and the session continues, so the
//! process only fails when it cannot start or when a `-c` line fails.

/// Exit codes for the s3fs binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Session ended normally
    Success = 0,

    /// A command given with `-c` failed
    CommandFailed = 1,

    /// Configuration or client setup failed before the session started
    StartupError = 2,
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get a human-readable description of the exit code
    pub const fn description(self) -> &'static str {
        match self {
            Self::Success => "Session ended successfully",
            Self::CommandFailed => "Command failed",
            Self::StartupError => "Failed to start the shell",
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.as_i32()
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.description(), self.as_i32())
    }
}
