//! Hardware environment detection
//!
//! Two probes feed the checklist: the set of GPU vendors present (from the
//! PCI device listing) and a descriptor for the first block device (from
//! `lsblk`). Both are derived once per run and never cached.
//!
//! # Design
//!
//! - Detection never mutates anything; failures surface as errors the
//!   calling step downgrades to a warning and a skip.
//! - A host may carry more than one GPU (hybrid graphics). Every matching
//!   vendor is reported, in the fixed order Intel, NVIDIA, AMD.

use crate::system::System;
use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};

/// Detected GPU vendor tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum GpuVendor {
    #[strum(serialize = "Intel")]
    Intel,
    #[strum(serialize = "NVIDIA")]
    Nvidia,
    #[strum(serialize = "AMD")]
    Amd,
}

impl GpuVendor {
    /// Fixed detection (and installation) order.
    pub const DETECTION_ORDER: [GpuVendor; 3] = [Self::Intel, Self::Nvidia, Self::Amd];

    /// Substring matched case-insensitively against lspci lines.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Intel => "intel",
            Self::Nvidia => "nvidia",
            Self::Amd => "amd",
        }
    }
}

/// True for lspci lines describing a display controller of some kind.
fn is_display_controller_line(line_lower: &str) -> bool {
    line_lower.contains("vga compatible controller")
        || line_lower.contains("3d controller")
        || line_lower.contains("display controller")
}

/// Extract the vendor set from a full `lspci` listing.
///
/// Only display-controller lines are considered; matching is a
/// case-insensitive substring test per vendor tag, so a hybrid
/// Intel + NVIDIA laptop reports both.
pub fn vendors_from_lspci(listing: &str) -> Vec<GpuVendor> {
    let display_lines: Vec<String> = listing
        .lines()
        .map(|l| l.to_lowercase())
        .filter(|l| is_display_controller_line(l))
        .collect();

    GpuVendor::DETECTION_ORDER
        .into_iter()
        .filter(|vendor| display_lines.iter().any(|l| l.contains(vendor.tag())))
        .collect()
}

/// Probe the host's PCI listing for GPU vendors.
pub fn detect_gpus(system: &dyn System) -> Result<Vec<GpuVendor>> {
    let output = system.run("lspci", &[]).context("running lspci")?;
    if !output.success {
        anyhow::bail!(
            "lspci exited with status {}",
            output.exit_code.unwrap_or(-1)
        );
    }
    Ok(vendors_from_lspci(&output.stdout))
}

/// The first block device the host reports, with its rotational flag.
///
/// `rotational == Some(false)` is a solid-state device, `Some(true)` is
/// rotational, `None` means the flag was missing or unreadable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskDescriptor {
    pub name: String,
    pub rotational: Option<bool>,
}

#[derive(Deserialize)]
struct LsblkReport {
    #[serde(default)]
    blockdevices: Vec<LsblkDevice>,
}

#[derive(Deserialize)]
struct LsblkDevice {
    name: String,
    #[serde(default, deserialize_with = "rota_flag")]
    rota: Option<bool>,
}

/// util-linux changed the JSON type of ROTA over the years: older releases
/// emit the strings "0"/"1", newer ones a real boolean. Accept both, plus
/// bare numbers; anything else reads as "unknown".
fn rota_flag<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Bool(b) => Some(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        serde_json::Value::String(s) => match s.trim() {
            "0" => Some(false),
            "1" => Some(true),
            "false" => Some(false),
            "true" => Some(true),
            _ => None,
        },
        _ => None,
    })
}

/// Parse `lsblk --json` output down to the first device.
pub fn parse_lsblk(json: &str) -> Result<Option<DiskDescriptor>> {
    let report: LsblkReport =
        serde_json::from_str(json).context("parsing lsblk --json output")?;
    Ok(report.blockdevices.into_iter().next().map(|d| DiskDescriptor {
        name: d.name,
        rotational: d.rota,
    }))
}

/// Probe the host for its first block device.
pub fn first_block_device(system: &dyn System) -> Result<Option<DiskDescriptor>> {
    let output = system
        .run("lsblk", &["-d", "--json", "-o", "NAME,ROTA"])
        .context("running lsblk")?;
    if !output.success {
        anyhow::bail!(
            "lsblk exited with status {}",
            output.exit_code.unwrap_or(-1)
        );
    }
    parse_lsblk(&output.stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HYBRID_LSPCI: &str = "\
00:02.0 VGA compatible controller: Intel Corporation Alder Lake-P GT2 [Iris Xe Graphics]
00:14.0 USB controller: Intel Corporation Alder Lake PCH USB 3.2 xHCI Host Controller
01:00.0 3D controller: NVIDIA Corporation GA107M [GeForce RTX 3050 Mobile]
02:00.0 Network controller: Intel Corporation Wi-Fi 6 AX201";

    #[test]
    fn test_vendor_display() {
        assert_eq!(GpuVendor::Intel.to_string(), "Intel");
        assert_eq!(GpuVendor::Nvidia.to_string(), "NVIDIA");
        assert_eq!(GpuVendor::Amd.to_string(), "AMD");
    }

    #[test]
    fn test_hybrid_listing_reports_both_in_order() {
        let vendors = vendors_from_lspci(HYBRID_LSPCI);
        assert_eq!(vendors, vec![GpuVendor::Intel, GpuVendor::Nvidia]);
    }

    #[test]
    fn test_non_display_lines_are_ignored() {
        // NVIDIA only appears on a non-display line: no GPU match
        let listing = "00:1f.3 Audio device: NVIDIA Corporation Audio Controller";
        assert!(vendors_from_lspci(listing).is_empty());
    }

    #[test]
    fn test_amd_matches_vendor_string() {
        let listing =
            "03:00.0 VGA compatible controller: Advanced Micro Devices, Inc. [AMD/ATI] Raphael";
        assert_eq!(vendors_from_lspci(listing), vec![GpuVendor::Amd]);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let listing = "00:02.0 VGA COMPATIBLE CONTROLLER: INTEL CORPORATION UHD Graphics";
        assert_eq!(vendors_from_lspci(listing), vec![GpuVendor::Intel]);
    }

    #[test]
    fn test_parse_lsblk_boolean_rota() {
        let json = r#"{"blockdevices": [{"name":"nvme0n1","rota":false},{"name":"sda","rota":true}]}"#;
        let disk = parse_lsblk(json).unwrap().unwrap();
        assert_eq!(disk.name, "nvme0n1");
        assert_eq!(disk.rotational, Some(false));
    }

    #[test]
    fn test_parse_lsblk_string_rota() {
        // util-linux < 2.37 quotes the flag
        let json = r#"{"blockdevices": [{"name":"sda","rota":"1"}]}"#;
        let disk = parse_lsblk(json).unwrap().unwrap();
        assert_eq!(disk.rotational, Some(true));
    }

    #[test]
    fn test_parse_lsblk_missing_rota() {
        let json = r#"{"blockdevices": [{"name":"sda"}]}"#;
        let disk = parse_lsblk(json).unwrap().unwrap();
        assert_eq!(disk.rotational, None);
    }

    #[test]
    fn test_parse_lsblk_empty_report() {
        assert_eq!(parse_lsblk(r#"{"blockdevices": []}"#).unwrap(), None);
        assert_eq!(parse_lsblk(r#"{}"#).unwrap(), None);
    }

    #[test]
    fn test_parse_lsblk_garbage_is_error() {
        assert!(parse_lsblk("not json").is_err());
    }
}
