//! Platform and hostname detection.

use super::prompt::first_prompt_hostname;
use crate::config::HOSTNAME_NOT_DETECTED;
use crate::models::Platform;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Hostname directives in detection priority order.
    static ref HOSTNAME_DIRECTIVES: Vec<(Platform, Regex)> = Platform::DETECTION_ORDER
        .iter()
        .filter_map(|p| Some((*p, p.hostname_directive()?)))
        .map(|(p, re)| (p, Regex::new(re).expect("Invalid directive")))
        .collect();
}

/// Result of [`detect_device`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    pub hostname: String,
    pub platform: Platform,
    pub missing_hostname: bool,
}

/// Identify the device hostname and vendor platform of a capture.
///
/// Dialect hostname directives are tried in priority order and the first match wins.
/// Without any directive the first prompt line supplies the hostname and the platform
/// falls back to `checkpoint_gaia`, which is the grammar set used for otherwise
/// unidentified captures.
pub fn detect_device(text: &str) -> Detection {
    for (platform, re) in HOSTNAME_DIRECTIVES.iter() {
        if let Some(caps) = re.captures(text) {
            log::trace!("hostname directive for {platform} matched {:?}", &caps[0]);
            return Detection {
                hostname: caps[1].to_string(),
                platform: *platform,
                missing_hostname: false,
            };
        }
    }

    if let Some(hostname) = first_prompt_hostname(text) {
        log::debug!("No hostname directive, using prompt hostname {hostname}");
        return Detection {
            hostname: hostname.to_string(),
            platform: Platform::CheckpointGaia,
            missing_hostname: false,
        };
    }

    Detection {
        hostname: HOSTNAME_NOT_DETECTED.to_string(),
        platform: Platform::Unknown,
        missing_hostname: true,
    }
}
