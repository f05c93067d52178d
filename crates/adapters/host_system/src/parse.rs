//! Parsers for the output of the OS tools used by this adapter.
//!
//! Kept free of IO so they can be tested on every platform.

use playhook_app::ports::ProcessInfo;
use playhook_domain::display::DisplayMode;

/// Program name from the contents of `/proc/<pid>/cmdline`.
#[must_use]
pub fn parse_cmdline(raw: &[u8]) -> Option<String> {
    let first = raw.split(|b| *b == 0).next()?;
    let first = String::from_utf8_lossy(first);
    let name = base_name(first.trim());
    (!name.is_empty()).then(|| name.to_string())
}

/// Processes from `ps -axo pid=,comm=`.
#[must_use]
pub fn parse_ps(output: &str) -> Vec<ProcessInfo> {
    output
        .lines()
        .filter_map(|line| {
            let (pid, command) = line.trim().split_once(char::is_whitespace)?;
            let pid = pid.parse().ok()?;
            let name = base_name(command.trim());
            (!name.is_empty()).then(|| ProcessInfo {
                pid,
                name: name.to_string(),
            })
        })
        .collect()
}

/// Processes from `tasklist /FO CSV /NH`.
#[must_use]
pub fn parse_tasklist_csv(output: &str) -> Vec<ProcessInfo> {
    output
        .lines()
        .filter_map(|line| {
            let line = line.trim().strip_prefix('"')?.strip_suffix('"')?;
            let mut fields = line.split("\",\"");
            let name = fields.next()?.to_string();
            let pid = fields.next()?.parse().ok()?;
            Some(ProcessInfo { pid, name })
        })
        .collect()
}

/// Output name and current mode of the primary display from `xrandr --query`.
///
/// Falls back to the first connected output with an active mode when no
/// output is marked primary.
#[must_use]
pub fn parse_xrandr(output: &str) -> Option<(String, DisplayMode)> {
    let mut current_output: Option<(&str, bool)> = None;
    let mut fallback = None;

    for line in output.lines() {
        if !line.starts_with(char::is_whitespace) {
            let mut words = line.split_whitespace();
            current_output = match (words.next(), words.next()) {
                (Some(name), Some("connected")) => Some((name, line.contains(" primary "))),
                _ => None,
            };
            continue;
        }
        let Some((name, primary)) = current_output else {
            continue;
        };
        let Some(mode) = parse_xrandr_mode_line(line) else {
            continue;
        };
        if primary {
            return Some((name.to_string(), mode));
        }
        if fallback.is_none() {
            fallback = Some((name.to_string(), mode));
        }
    }
    fallback
}

/// The mode on an xrandr mode line if it is the active one (marked `*`).
fn parse_xrandr_mode_line(line: &str) -> Option<DisplayMode> {
    let mut tokens = line.split_whitespace();
    let size = tokens.next()?;
    let rate = tokens.find(|t| t.contains('*'))?;
    let (width, height) = size.split_once('x')?;
    let height = height.trim_end_matches('i');
    let rate: f64 = rate.trim_end_matches(['*', '+']).parse().ok()?;
    // Rates such as 59.95 or 143.97 are reported for nominal 60 and 144.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let refresh_hz = rate.round().max(1.0) as u32;
    Some(DisplayMode::new(
        width.parse().ok()?,
        height.parse().ok()?,
        refresh_hz,
    ))
}

/// Master volume percentage from `pactl get-sink-volume`.
#[must_use]
pub fn parse_volume_percent(output: &str) -> Option<u8> {
    let percent: u32 = output
        .split_whitespace()
        .find_map(|token| token.strip_suffix('%')?.parse().ok())?;
    u8::try_from(percent.min(100)).ok()
}

/// One entry of `pactl list sink-inputs`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SinkInput {
    pub id: u32,
    pub binary: Option<String>,
    pub application: Option<String>,
}

#[must_use]
pub fn parse_sink_inputs(output: &str) -> Vec<SinkInput> {
    let mut inputs: Vec<SinkInput> = Vec::new();
    for line in output.lines() {
        if let Some(id) = line.trim().strip_prefix("Sink Input #") {
            if let Ok(id) = id.trim().parse() {
                inputs.push(SinkInput {
                    id,
                    ..SinkInput::default()
                });
            }
            continue;
        }
        let Some(current) = inputs.last_mut() else {
            continue;
        };
        let Some((key, value)) = line.trim().split_once(" = ") else {
            continue;
        };
        let value = value.trim().trim_matches('"').to_string();
        match key.trim() {
            "application.process.binary" => current.binary = Some(value),
            "application.name" => current.application = Some(value),
            _ => {}
        }
    }
    inputs
}

fn base_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_take_program_name_from_cmdline() {
        assert_eq!(
            parse_cmdline(b"/opt/google/chrome/chrome\0--type=renderer\0"),
            Some("chrome".to_string())
        );
        assert_eq!(parse_cmdline(b""), None);
    }

    #[test]
    fn should_parse_ps_output() {
        let output = "  1 /sbin/launchd\n 412 /Applications/Steam.app/Contents/MacOS/steam_osx\nbogus\n";
        assert_eq!(
            parse_ps(output),
            vec![
                ProcessInfo {
                    pid: 1,
                    name: "launchd".to_string()
                },
                ProcessInfo {
                    pid: 412,
                    name: "steam_osx".to_string()
                },
            ]
        );
    }

    #[test]
    fn should_parse_tasklist_csv() {
        let output = "\"chrome.exe\",\"1234\",\"Console\",\"1\",\"123,456 K\"\r\n\"System\",\"4\",\"Services\",\"0\",\"24 K\"\r\n";
        let processes = parse_tasklist_csv(output);
        assert_eq!(processes.len(), 2);
        assert_eq!(processes[0].name, "chrome.exe");
        assert_eq!(processes[0].pid, 1234);
    }

    const XRANDR: &str = "\
Screen 0: minimum 8 x 8, current 4480 x 1440, maximum 32767 x 32767
HDMI-1 connected 1920x1080+2560+0 (normal left inverted right x axis y axis) 527mm x 296mm
   1920x1080     60.00*+  50.00    59.94
   1280x720      60.00
DP-1 connected primary 2560x1440+0+0 (normal left inverted right x axis y axis) 597mm x 336mm
   2560x1440    143.97*+ 120.00    59.95
   1920x1080     60.00
DP-2 disconnected (normal left inverted right x axis y axis)
";

    #[test]
    fn should_pick_primary_output_from_xrandr() {
        assert_eq!(
            parse_xrandr(XRANDR),
            Some(("DP-1".to_string(), DisplayMode::new(2560, 1440, 144)))
        );
    }

    #[test]
    fn should_fall_back_to_first_connected_output_without_primary() {
        let output = XRANDR.replace(" primary", "");
        assert_eq!(
            parse_xrandr(&output),
            Some(("HDMI-1".to_string(), DisplayMode::new(1920, 1080, 60)))
        );
    }

    #[test]
    fn should_return_none_when_no_active_mode() {
        assert_eq!(parse_xrandr("DP-2 disconnected (normal)\n"), None);
    }

    #[test]
    fn should_parse_volume_percent() {
        let output = "Volume: front-left: 32768 /  50% / -18.06 dB,   front-right: 32768 /  50% / -18.06 dB\n        balance 0.00\n";
        assert_eq!(parse_volume_percent(output), Some(50));
        assert_eq!(parse_volume_percent("Volume: 98304 / 150%"), Some(100));
        assert_eq!(parse_volume_percent("nothing"), None);
    }

    #[test]
    fn should_parse_sink_inputs() {
        let output = "\
Sink Input #42
\tDriver: protocol-native.c
\tProperties:
\t\tapplication.name = \"Discord\"
\t\tapplication.process.binary = \"Discord\"
Sink Input #57
\tProperties:
\t\tapplication.name = \"Firefox\"
";
        assert_eq!(
            parse_sink_inputs(output),
            vec![
                SinkInput {
                    id: 42,
                    binary: Some("Discord".to_string()),
                    application: Some("Discord".to_string()),
                },
                SinkInput {
                    id: 57,
                    binary: None,
                    application: Some("Firefox".to_string()),
                },
            ]
        );
    }
}
