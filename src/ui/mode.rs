//! Choosing between styled and plain output

use std::io::IsTerminal;

/// Variables set by the CI services we know of
const CI_VARS: &[&str] = &[
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "BUILDKITE",
    "JENKINS_URL",
    "TF_BUILD",
];

/// How command output is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// `cliclack` steps and spinners
    Fancy,
    /// Undecorated lines
    Plain,
}

impl OutputMode {
    /// Fancy when stdout is a terminal and no CI variable is set
    pub fn detect() -> Self {
        Self::choose(std::io::stdout().is_terminal(), |var| {
            std::env::var_os(var).is_some()
        })
    }

    fn choose(terminal: bool, is_set: impl Fn(&str) -> bool) -> Self {
        if terminal && !CI_VARS.iter().any(|var| is_set(var)) {
            Self::Fancy
        } else {
            Self::Plain
        }
    }

    pub fn is_fancy(self) -> bool {
        self == Self::Fancy
    }
}
