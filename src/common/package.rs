//! Package manager invocation patterns.
//!
//! Each supported platform family maps to exactly one manager; the manager
//! knows how to refresh its index and how to install the bootstrap
//! prerequisite set (version control, scripting runtime, package installer,
//! network fetch tools).

/// Native package managers the bootstrapper knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    /// APT - Debian/Ubuntu family
    Apt,
    /// Pacman - Arch family
    Pacman,
    /// DNF - RedHat/Fedora family
    Dnf,
    /// Homebrew - macOS
    Brew,
}

impl PackageManager {
    /// Index refresh to run before installing, where the manager needs one.
    pub fn refresh_command(&self) -> Option<(&'static str, &'static [&'static str])> {
        match self {
            Self::Apt => Some(("sudo", &["apt-get", "update"])),
            // pacman refreshes as part of `-Sy`, brew and dnf resolve on install
            Self::Pacman | Self::Dnf | Self::Brew => None,
        }
    }

    /// Install command prefix; package names are appended to the base args.
    pub fn install_command(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            Self::Apt => ("sudo", &["apt-get", "install", "-y"]),
            Self::Pacman => ("sudo", &["pacman", "-Sy", "--noconfirm"]),
            Self::Dnf => ("sudo", &["dnf", "install", "-y"]),
            Self::Brew => ("brew", &["install"]),
        }
    }

    /// Ordered prerequisite set for this manager: git, a Python runtime with
    /// pip (and venv support where packaged separately), and curl.
    pub fn prerequisite_packages(&self) -> &'static [&'static str] {
        match self {
            Self::Apt => &["git", "python3", "python3-pip", "python3-venv", "curl"],
            Self::Pacman => &["git", "python", "python-pip", "curl"],
            Self::Dnf => &["git", "python3", "python3-pip", "curl"],
            // brew's python formula bundles pip and venv
            Self::Brew => &["git", "python", "curl"],
        }
    }

    /// Get a human-readable name for this package manager.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Apt => "APT",
            Self::Pacman => "Pacman",
            Self::Dnf => "DNF",
            Self::Brew => "Homebrew",
        }
    }
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: &[PackageManager] = &[
        PackageManager::Apt,
        PackageManager::Pacman,
        PackageManager::Dnf,
        PackageManager::Brew,
    ];

    #[test]
    fn test_prerequisites_start_with_git() {
        for manager in ALL {
            let packages = manager.prerequisite_packages();
            assert!(!packages.is_empty());
            assert_eq!(packages[0], "git", "{} must install git first", manager);
            assert!(packages.contains(&"curl"));
        }
    }

    #[test]
    fn test_install_command_shapes() {
        let (program, args) = PackageManager::Apt.install_command();
        assert_eq!(program, "sudo");
        assert_eq!(args, ["apt-get", "install", "-y"]);

        let (program, args) = PackageManager::Brew.install_command();
        assert_eq!(program, "brew");
        assert_eq!(args, ["install"]);
    }

    #[test]
    fn test_only_apt_refreshes() {
        assert!(PackageManager::Apt.refresh_command().is_some());
        assert!(PackageManager::Pacman.refresh_command().is_none());
        assert!(PackageManager::Dnf.refresh_command().is_none());
        assert!(PackageManager::Brew.refresh_command().is_none());
    }
}
