use crate::models::StatusUpdate;

const TEMP_PREFIX: &str = "T0:";
const ENDSTOP_PREFIX: &str = "Endstop";
const SD_PRINTING_PREFIX: &str = "SD printing byte";
const STATUS_PREFIX: &str = "MachineStatus";
const MOVE_MODE_PREFIX: &str = "MoveMode";

/// Classifies every line of a trimmed response frame and unions the fields
/// it reports into one [`StatusUpdate`].
///
/// First matching prefix wins per line; unrecognized lines and malformed
/// numerics are dropped silently. Parsing never fails.
pub fn parse_response(raw: &str) -> StatusUpdate {
    let mut update = StatusUpdate::default();

    for line in raw.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if line.starts_with(TEMP_PREFIX) {
            if let Some((nozzle, nozzle_target, bed, bed_target)) = parse_temperatures(line) {
                update.nozzle_temp = Some(nozzle);
                update.nozzle_target_temp = Some(nozzle_target);
                update.bed_temp = Some(bed);
                update.bed_target_temp = Some(bed_target);
            }
        } else if line.starts_with(ENDSTOP_PREFIX) {
            parse_endstops(line, &mut update);
        } else if let Some(rest) = line.strip_prefix(SD_PRINTING_PREFIX) {
            if let Some((printed, total)) = parse_sd_progress(rest) {
                update.sd_bytes_printed = Some(printed);
                update.sd_bytes_total = Some(total);
            }
        } else if line.starts_with(STATUS_PREFIX) {
            update.status = label_after_colon(line);
        } else if line.starts_with(MOVE_MODE_PREFIX) {
            update.move_mode = label_after_colon(line);
        }
    }

    update
}

/// `T0:<nozzle> /<target> ... B:<bed>/<target>`; any field failing to parse
/// rejects the whole line.
fn parse_temperatures(line: &str) -> Option<(u32, u32, u32, u32)> {
    let rest = line.strip_prefix(TEMP_PREFIX)?;
    let (nozzle, rest) = rest.split_once(" /")?;
    let (nozzle_target, rest) = rest.split_once("B:")?;
    let (bed, rest) = rest.split_once('/')?;

    Some((
        nozzle.trim().parse().ok()?,
        nozzle_target.trim().parse().ok()?,
        bed.trim().parse().ok()?,
        leading_int(rest.trim_start())?,
    ))
}

/// `Endstop: X-max:0 Y-max:1 Z-max:0`; axis keys other than the three
/// known ones are ignored.
fn parse_endstops(line: &str, update: &mut StatusUpdate) {
    for pair in line.split_whitespace().skip(1) {
        let Some((axis, state)) = pair.split_once(':') else {
            continue;
        };
        let Ok(state) = state.parse::<u8>() else {
            continue;
        };
        match axis {
            "X-max" => update.endstop_x = Some(state),
            "Y-max" => update.endstop_y = Some(state),
            "Z-max" => update.endstop_z = Some(state),
            _ => {}
        }
    }
}

/// `<printed>/<total>`, the remainder of an `SD printing byte` line.
fn parse_sd_progress(rest: &str) -> Option<(u64, u64)> {
    let (printed, total) = rest.trim_start().split_once('/')?;

    Some((printed.parse().ok()?, leading_int(total)?))
}

/// Substring after the first `:`, trimmed; `None` when there is no colon.
fn label_after_colon(line: &str) -> Option<String> {
    line.split_once(':')
        .map(|(_, value)| value.trim().to_owned())
}

/// Parses the leading ASCII-digit run of `s`; `None` when it is empty.
fn leading_int<T: std::str::FromStr>(s: &str) -> Option<T> {
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_temperature_line() {
        let update = parse_response("T0:195 /200 B:58/60");

        assert_eq!(update.nozzle_temp, Some(195));
        assert_eq!(update.nozzle_target_temp, Some(200));
        assert_eq!(update.bed_temp, Some(58));
        assert_eq!(update.bed_target_temp, Some(60));
    }

    #[test]
    fn parses_endstop_line() {
        let update = parse_response("Endstop: X-max:0 Y-max:1 Z-max:0");

        assert_eq!(update.endstop_x, Some(0));
        assert_eq!(update.endstop_y, Some(1));
        assert_eq!(update.endstop_z, Some(0));
    }

    #[test]
    fn unknown_endstop_axes_are_ignored() {
        let update = parse_response("Endstop: X-max:1 A-max:1");

        assert_eq!(update.endstop_x, Some(1));
        assert_eq!(update.endstop_y, None);
        assert_eq!(update.endstop_z, None);
    }

    #[test]
    fn parses_sd_progress_line() {
        let update = parse_response("SD printing byte 1024/204800");

        assert_eq!(update.sd_bytes_printed, Some(1024));
        assert_eq!(update.sd_bytes_total, Some(204800));
    }

    #[test]
    fn parses_status_and_move_mode_labels() {
        let update = parse_response("MachineStatus: BUILDING_FROM_SD\nMoveMode: MOVING");

        assert_eq!(update.status.as_deref(), Some("BUILDING_FROM_SD"));
        assert_eq!(update.move_mode.as_deref(), Some("MOVING"));
    }

    #[test]
    fn unions_fields_across_lines() {
        let update = parse_response("T0:195 /200 B:58/60\nSD printing byte 10/20");

        assert_eq!(update.nozzle_temp, Some(195));
        assert_eq!(update.sd_bytes_printed, Some(10));
    }

    #[test]
    fn unrecognized_and_blank_lines_are_dropped() {
        let update = parse_response("\nReceived.\n\nX:12 Y:0 Z:40\n");

        assert!(update.is_empty());
    }

    #[test]
    fn malformed_temperature_line_emits_nothing() {
        assert!(parse_response("T0:abc /200 B:58/60").is_empty());
        assert!(parse_response("T0:195").is_empty());
    }

    #[test]
    fn malformed_sd_line_emits_nothing() {
        assert!(parse_response("SD printing byte n/a").is_empty());
    }

    #[test]
    fn empty_frame_parses_to_empty_update() {
        assert!(parse_response("").is_empty());
    }
}
