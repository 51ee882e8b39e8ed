use std::env;
use std::path::Path;

use crate::common::package::PackageManager;

/// Signals used to classify the host. Captured once at startup so that
/// classification itself stays a pure function.
#[derive(Debug, Clone, Default)]
pub struct HostSignals {
    /// Kernel/OS family the binary was built for ("linux", "macos", "windows").
    pub os: &'static str,
    /// `OSTYPE` as set by the surrounding shell, if any.
    pub ostype: Option<String>,
    /// `MSYSTEM` as set by MSYS2/Git-Bash style shells, if any.
    pub msystem: Option<String>,
    /// `/etc/debian_version` present.
    pub debian_marker: bool,
    /// `/etc/arch-release` present.
    pub arch_marker: bool,
    /// `/etc/redhat-release` present.
    pub redhat_marker: bool,
}

impl HostSignals {
    /// Capture the signals from the running host.
    pub fn capture() -> Self {
        Self {
            os: env::consts::OS,
            ostype: env::var("OSTYPE").ok(),
            msystem: env::var("MSYSTEM").ok(),
            debian_marker: Path::new("/etc/debian_version").exists(),
            arch_marker: Path::new("/etc/arch-release").exists(),
            redhat_marker: Path::new("/etc/redhat-release").exists(),
        }
    }

    fn windows_shell(&self) -> bool {
        if self.msystem.is_some() {
            return true;
        }
        self.ostype
            .as_deref()
            .map(|t| {
                let t = t.to_ascii_lowercase();
                t.starts_with("msys") || t.starts_with("cygwin") || t.starts_with("win32")
            })
            .unwrap_or(false)
    }
}

/// Closed classification of the host platform and its package-manager
/// family. Derived once from [`HostSignals`] and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Debian/Ubuntu family (apt)
    Debian,
    /// Arch family (pacman)
    Arch,
    /// RedHat/Fedora family (dnf)
    Rpm,
    /// macOS (Homebrew)
    Macos,
    /// Windows-compatible shell (Git Bash, MSYS2, Cygwin)
    Windows,
    /// Linux without a recognized distribution marker
    LinuxOther,
    /// Anything else
    Unknown,
}

impl Platform {
    /// Classify a set of host signals. Total: always returns exactly one tag
    /// and never errors. Linux is disambiguated by distribution marker files
    /// in fixed priority order (Debian, then Arch, then RedHat).
    pub fn classify(signals: &HostSignals) -> Self {
        if signals.os == "windows" || signals.windows_shell() {
            return Self::Windows;
        }
        match signals.os {
            "macos" => Self::Macos,
            "linux" => {
                if signals.debian_marker {
                    Self::Debian
                } else if signals.arch_marker {
                    Self::Arch
                } else if signals.redhat_marker {
                    Self::Rpm
                } else {
                    Self::LinuxOther
                }
            }
            _ => Self::Unknown,
        }
    }

    /// The package manager used to install prerequisites on this platform.
    /// Returns `None` where automatic installation is not supported; callers
    /// must handle that variant explicitly rather than fall through.
    pub fn package_manager(&self) -> Option<PackageManager> {
        match self {
            Self::Debian => Some(PackageManager::Apt),
            Self::Arch => Some(PackageManager::Pacman),
            Self::Rpm => Some(PackageManager::Dnf),
            Self::Macos => Some(PackageManager::Brew),
            Self::Windows | Self::LinuxOther | Self::Unknown => None,
        }
    }

    /// Get the display name of the platform.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Debian => "Debian/Ubuntu",
            Self::Arch => "Arch Linux",
            Self::Rpm => "RedHat/Fedora",
            Self::Macos => "macOS",
            Self::Windows => "Windows",
            Self::LinuxOther => "Linux (generic)",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The flavor of shell the generated launchers will be run from. Consulted
/// at install time to decide whether the batch launcher is emitted, and
/// baked into path layout choices for the virtual environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellKind {
    Posix,
    Windows,
}

impl ShellKind {
    pub fn detect(signals: &HostSignals) -> Self {
        if signals.os == "windows" || signals.windows_shell() {
            Self::Windows
        } else {
            Self::Posix
        }
    }

    /// Directory inside a virtual environment holding the runtime binaries.
    pub fn venv_bin_dir(&self) -> &'static str {
        match self {
            Self::Posix => "bin",
            Self::Windows => "Scripts",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linux_signals() -> HostSignals {
        HostSignals {
            os: "linux",
            ..Default::default()
        }
    }

    #[test]
    fn test_classify_debian() {
        let signals = HostSignals {
            debian_marker: true,
            ..linux_signals()
        };
        assert_eq!(Platform::classify(&signals), Platform::Debian);
    }

    #[test]
    fn test_classify_arch() {
        let signals = HostSignals {
            arch_marker: true,
            ..linux_signals()
        };
        assert_eq!(Platform::classify(&signals), Platform::Arch);
    }

    #[test]
    fn test_classify_rpm() {
        let signals = HostSignals {
            redhat_marker: true,
            ..linux_signals()
        };
        assert_eq!(Platform::classify(&signals), Platform::Rpm);
    }

    #[test]
    fn test_marker_priority_debian_first() {
        // All markers present: Debian wins, then Arch, then RedHat.
        let signals = HostSignals {
            debian_marker: true,
            arch_marker: true,
            redhat_marker: true,
            ..linux_signals()
        };
        assert_eq!(Platform::classify(&signals), Platform::Debian);

        let signals = HostSignals {
            arch_marker: true,
            redhat_marker: true,
            ..linux_signals()
        };
        assert_eq!(Platform::classify(&signals), Platform::Arch);
    }

    #[test]
    fn test_classify_linux_other() {
        assert_eq!(Platform::classify(&linux_signals()), Platform::LinuxOther);
    }

    #[test]
    fn test_classify_macos() {
        let signals = HostSignals {
            os: "macos",
            ..Default::default()
        };
        assert_eq!(Platform::classify(&signals), Platform::Macos);
    }

    #[test]
    fn test_classify_windows_shells() {
        let msys = HostSignals {
            os: "linux",
            ostype: Some("msys".to_string()),
            ..Default::default()
        };
        assert_eq!(Platform::classify(&msys), Platform::Windows);

        let cygwin = HostSignals {
            os: "linux",
            ostype: Some("cygwin".to_string()),
            ..Default::default()
        };
        assert_eq!(Platform::classify(&cygwin), Platform::Windows);

        let gitbash = HostSignals {
            os: "windows",
            msystem: Some("MINGW64".to_string()),
            ..Default::default()
        };
        assert_eq!(Platform::classify(&gitbash), Platform::Windows);
    }

    #[test]
    fn test_classify_unknown_kernel() {
        let signals = HostSignals {
            os: "freebsd",
            ..Default::default()
        };
        assert_eq!(Platform::classify(&signals), Platform::Unknown);
    }

    #[test]
    fn test_package_manager_mapping_total() {
        use PackageManager::*;
        assert_eq!(Platform::Debian.package_manager(), Some(Apt));
        assert_eq!(Platform::Arch.package_manager(), Some(Pacman));
        assert_eq!(Platform::Rpm.package_manager(), Some(Dnf));
        assert_eq!(Platform::Macos.package_manager(), Some(Brew));
        assert_eq!(Platform::Windows.package_manager(), None);
        assert_eq!(Platform::LinuxOther.package_manager(), None);
        assert_eq!(Platform::Unknown.package_manager(), None);
    }

    #[test]
    fn test_shell_kind() {
        let posix = linux_signals();
        assert_eq!(ShellKind::detect(&posix), ShellKind::Posix);
        assert_eq!(ShellKind::detect(&posix).venv_bin_dir(), "bin");

        let windows = HostSignals {
            os: "linux",
            ostype: Some("msys2".to_string()),
            ..Default::default()
        };
        assert_eq!(ShellKind::detect(&windows), ShellKind::Windows);
        assert_eq!(ShellKind::detect(&windows).venv_bin_dir(), "Scripts");
    }
}
