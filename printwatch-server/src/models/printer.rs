use std::fmt;

use serde::{Deserialize, Serialize};

/// Last-known readings reported by the printer.
///
/// Every field starts unknown and is only ever overwritten by a response
/// frame that explicitly reports it. The JSON field names match what the
/// device-facing dashboard expects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrinterStatus {
    pub nozzle_temp: Option<u32>,
    pub nozzle_target_temp: Option<u32>,
    pub bed_temp: Option<u32>,
    pub bed_target_temp: Option<u32>,
    pub endstop_x: Option<u8>,
    pub endstop_y: Option<u8>,
    pub endstop_z: Option<u8>,
    pub sd_bytes_printed: Option<u64>,
    pub sd_bytes_total: Option<u64>,
    pub status: Option<String>,
    pub move_mode: Option<String>,
}

/// The fields one parsed response frame actually reported. Anything the
/// frame did not mention stays `None` and leaves [`PrinterStatus`] untouched
/// on merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusUpdate {
    pub nozzle_temp: Option<u32>,
    pub nozzle_target_temp: Option<u32>,
    pub bed_temp: Option<u32>,
    pub bed_target_temp: Option<u32>,
    pub endstop_x: Option<u8>,
    pub endstop_y: Option<u8>,
    pub endstop_z: Option<u8>,
    pub sd_bytes_printed: Option<u64>,
    pub sd_bytes_total: Option<u64>,
    pub status: Option<String>,
    pub move_mode: Option<String>,
}

impl StatusUpdate {
    pub fn is_empty(&self) -> bool {
        *self == StatusUpdate::default()
    }
}

impl PrinterStatus {
    /// Sparse merge: reported fields overwrite, unreported fields carry over.
    pub fn merged(mut self, update: StatusUpdate) -> Self {
        if let Some(v) = update.nozzle_temp {
            self.nozzle_temp = Some(v);
        }
        if let Some(v) = update.nozzle_target_temp {
            self.nozzle_target_temp = Some(v);
        }
        if let Some(v) = update.bed_temp {
            self.bed_temp = Some(v);
        }
        if let Some(v) = update.bed_target_temp {
            self.bed_target_temp = Some(v);
        }
        if let Some(v) = update.endstop_x {
            self.endstop_x = Some(v);
        }
        if let Some(v) = update.endstop_y {
            self.endstop_y = Some(v);
        }
        if let Some(v) = update.endstop_z {
            self.endstop_z = Some(v);
        }
        if let Some(v) = update.sd_bytes_printed {
            self.sd_bytes_printed = Some(v);
        }
        if let Some(v) = update.sd_bytes_total {
            self.sd_bytes_total = Some(v);
        }
        if let Some(v) = update.status {
            self.status = Some(v);
        }
        if let Some(v) = update.move_mode {
            self.move_mode = Some(v);
        }
        self
    }
}

fn opt<T: fmt::Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "-".into())
}

impl fmt::Display for PrinterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nozzle {}/{} bed {}/{} endstops X={} Y={} Z={} sd {}/{} status {} move {}",
            opt(&self.nozzle_temp),
            opt(&self.nozzle_target_temp),
            opt(&self.bed_temp),
            opt(&self.bed_target_temp),
            opt(&self.endstop_x),
            opt(&self.endstop_y),
            opt(&self.endstop_z),
            opt(&self.sd_bytes_printed),
            opt(&self.sd_bytes_total),
            opt(&self.status),
            opt(&self.move_mode),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update_with_temps() -> StatusUpdate {
        StatusUpdate {
            nozzle_temp: Some(195),
            nozzle_target_temp: Some(200),
            bed_temp: Some(58),
            bed_target_temp: Some(60),
            ..Default::default()
        }
    }

    #[test]
    fn merge_overwrites_reported_fields() {
        let status = PrinterStatus::default().merged(update_with_temps());

        assert_eq!(status.nozzle_temp, Some(195));
        assert_eq!(status.nozzle_target_temp, Some(200));
        assert_eq!(status.bed_temp, Some(58));
        assert_eq!(status.bed_target_temp, Some(60));
        assert_eq!(status.status, None);
    }

    #[test]
    fn merge_keeps_unreported_fields() {
        let status = PrinterStatus::default().merged(update_with_temps());

        let status = status.merged(StatusUpdate {
            status: Some("BUILDING_FROM_SD".into()),
            ..Default::default()
        });

        assert_eq!(status.nozzle_temp, Some(195));
        assert_eq!(status.status.as_deref(), Some("BUILDING_FROM_SD"));
    }

    #[test]
    fn merging_an_empty_update_is_identity() {
        let status = PrinterStatus::default().merged(update_with_temps());

        let once = status.clone().merged(StatusUpdate::default());
        let twice = once.clone().merged(StatusUpdate::default());

        assert_eq!(once, status);
        assert_eq!(twice, status);
    }

    #[test]
    fn snapshot_serializes_flat_with_nulls() {
        let json = serde_json::to_value(PrinterStatus::default()).unwrap();

        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 11);
        assert!(object["nozzleTemp"].is_null());
        assert!(object["sdBytesTotal"].is_null());
        assert!(object["moveMode"].is_null());
    }
}
