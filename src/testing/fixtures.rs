//! Catalog fixtures shared by unit tests.

use crate::domain::catalog::{Catalog, parse_catalog};

pub const FIXTURE_CATALOG: &str = r#"{
    "system_config": {
        "description": "System configuration options",
        "configure_dnf": {
            "name": "DNF",
            "description": "Configure DNF for faster downloads",
            "command": [
                "echo 'max_parallel_downloads=10' | tee -a /etc/dnf/dnf.conf",
                "dnf -y install dnf-plugins-core"
            ]
        },
        "enable_rpmfusion": {
            "name": "RPM Fusion",
            "description": "Enable RPM Fusion repositories",
            "command": [
                "dnf install -y https://mirrors.rpmfusion.org/free/fedora/rpmfusion-free-release-$(rpm -E %fedora).noarch.rpm",
                "dnf install -y https://mirrors.rpmfusion.org/nonfree/fedora/rpmfusion-nonfree-release-$(rpm -E %fedora).noarch.rpm"
            ]
        },
        "set_hostname": {
            "name": "Hostname",
            "description": "Set the system hostname",
            "command": "hostnamectl set-hostname {hostname}"
        },
        "firmware_updates": {
            "name": "Firmware",
            "description": "Check for firmware updates",
            "command": ["fwupdmgr refresh --force", "fwupdmgr update -y"]
        },
        "install_multimedia_codecs": {
            "name": "Multimedia Codecs",
            "description": "Install multimedia codecs for audio and video playback",
            "command": "dnf group install -y multimedia"
        },
        "install_intel_codecs": {
            "name": "Intel Codecs",
            "description": "Install Intel hardware-accelerated codecs",
            "command": "dnf install -y intel-media-driver"
        },
        "install_amd_codecs": {
            "name": "AMD Codecs",
            "description": "Install AMD hardware-accelerated codecs",
            "command": "dnf swap -y mesa-va-drivers mesa-va-drivers-freeworld"
        }
    },
    "essential_apps": {
        "description": "Essential applications",
        "apps": [
            {"name": "git", "description": "Distributed version control"},
            {"name": "curl", "description": "Command-line transfer tool"},
            {"name": "htop", "description": "Interactive process viewer"}
        ]
    },
    "additional_apps": {
        "internet": {
            "name": "Internet",
            "apps": {
                "install_vivaldi": {
                    "name": "Vivaldi",
                    "description": "Feature-rich web browser",
                    "installation_types": {
                        "DNF": {"command": [
                            "dnf config-manager addrepo --from-repofile=https://repo.vivaldi.com/stable/vivaldi-fedora.repo",
                            "dnf install -y vivaldi-stable"
                        ]},
                        "Flatpak": {"command": "flatpak install -y flathub com.vivaldi.Vivaldi"}
                    }
                }
            }
        },
        "media_graphics": {
            "name": "Media & Graphics",
            "apps": {
                "install_vlc": {
                    "name": "VLC",
                    "description": "Play media files",
                    "installation_types": {
                        "DNF": {"command": "dnf install -y vlc", "dependencies": ["enable_rpmfusion"]},
                        "Flatpak": {"command": "flatpak install -y flathub org.videolan.VLC"}
                    }
                },
                "install_gimp": {
                    "name": "GIMP",
                    "description": "Edit images",
                    "installation_types": {
                        "DNF": {"command": "dnf install -y gimp"},
                        "Flatpak": {"command": "flatpak install -y flathub org.gimp.GIMP"}
                    }
                },
                "install_handbrake": {
                    "name": "HandBrake",
                    "description": "Transcode video files",
                    "command": "dnf install -y handbrake-gui",
                    "dependencies": ["enable_rpmfusion"]
                }
            }
        },
        "development": {
            "name": "Development",
            "apps": {
                "install_docker": {
                    "name": "Docker",
                    "description": "Container runtime",
                    "command": [
                        "dnf install -y moby-engine docker-compose",
                        "systemctl enable --now docker",
                        "usermod -aG docker $ACTUAL_USER"
                    ]
                }
            }
        }
    },
    "customization": {
        "name": "Customization",
        "apps": {
            "install_windows_fonts": {
                "name": "Windows Fonts",
                "description": "Install Microsoft Windows fonts",
                "installation_types": {
                    "Microsoft Core Fonts": {"command": [
                        "dnf install -y curl cabextract xorg-x11-font-utils fontconfig",
                        "rpm -i https://downloads.sourceforge.net/project/mscorefonts2/rpms/msttcore-fonts-installer-2.6-1.noarch.rpm"
                    ]},
                    "Windows Fonts": {"command": "dnf install -y wine-fonts"}
                }
            },
            "install_tela_icon_theme": {
                "name": "Tela Icon Theme",
                "description": "Install the Tela icon theme",
                "command": [
                    "git clone https://github.com/vinceliuice/Tela-icon-theme.git /tmp/tela",
                    "/tmp/tela/install.sh -a"
                ]
            }
        }
    }
}"#;

/// Document with two entry-level issues next to well-formed entries.
pub const MALFORMED_CATALOG: &str = r#"{
    "system_config": {
        "broken_tweak": {"name": "Broken Tweak", "description": "Tweak with no command"},
        "configure_dnf": {
            "name": "DNF",
            "description": "Configure DNF for faster downloads",
            "command": "dnf -y install dnf-plugins-core"
        }
    },
    "essential_apps": {"apps": [{"name": "git", "description": "Distributed version control"}]},
    "customization": {
        "apps": {
            "empty_fonts": {
                "name": "Empty Fonts",
                "description": "Fonts with an empty method",
                "installation_types": {"core": {}}
            }
        }
    }
}"#;

/// Well-formed catalog covering every section.
pub fn fixture_catalog() -> Catalog {
    parse_catalog(FIXTURE_CATALOG).expect("fixture catalog parses").catalog
}

/// Catalog as lenient loading keeps it: one entry without a command and one
/// method without commands.
pub fn malformed_catalog() -> Catalog {
    let parsed = parse_catalog(MALFORMED_CATALOG).expect("malformed fixture parses");
    assert_eq!(parsed.issues.len(), 2);
    parsed.catalog
}
