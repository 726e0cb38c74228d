use rand_distr::{Distribution, Normal};

const NOZZLE_TARGET: u32 = 200;
const BED_TARGET: u32 = 60;
const AMBIENT: f64 = 22.0;

/// A simulated printer mid-print: temperatures climb towards their targets
/// with gaussian jitter, SD progress advances monotonically, and the machine
/// goes back to READY once the job completes.
pub struct PrinterSim {
    nozzle_temp: f64,
    bed_temp: f64,
    sd_bytes_printed: u64,
    sd_bytes_total: u64,
    noise: Normal<f64>,
}

impl PrinterSim {
    pub fn new(sd_bytes_total: u64) -> Self {
        Self {
            nozzle_temp: AMBIENT,
            bed_temp: AMBIENT,
            sd_bytes_printed: 0,
            sd_bytes_total,
            noise: Normal::new(0.0, 0.6).expect("valid noise distribution"),
        }
    }

    /// Answers one poll command with a complete `ok`-terminated frame.
    /// Commands the simulator does not know get a bare terminator, which the
    /// watcher treats as an empty frame.
    pub fn respond(&mut self, command: &str) -> String {
        if command.starts_with("~M105") {
            self.temperature_frame()
        } else if command.starts_with("~M27") {
            self.progress_frame()
        } else if command.starts_with("~M119") {
            self.endstop_frame()
        } else {
            "ok\n".into()
        }
    }

    fn temperature_frame(&mut self) -> String {
        self.heat();
        format!(
            "T0:{} /{} B:{}/{}\nok\n",
            self.nozzle_temp.round() as u32,
            NOZZLE_TARGET,
            self.bed_temp.round() as u32,
            BED_TARGET,
        )
    }

    fn progress_frame(&mut self) -> String {
        self.advance();
        format!(
            "SD printing byte {}/{}\nok\n",
            self.sd_bytes_printed, self.sd_bytes_total,
        )
    }

    fn endstop_frame(&mut self) -> String {
        // Z sits on its limit switch while the machine is idle.
        let z_triggered = u8::from(self.finished());
        format!(
            "Endstop: X-max:0 Y-max:0 Z-max:{}\nMachineStatus: {}\nMoveMode: {}\nok\n",
            z_triggered,
            self.machine_status(),
            self.move_mode(),
        )
    }

    fn machine_status(&self) -> &'static str {
        if self.finished() {
            "READY"
        } else {
            "BUILDING_FROM_SD"
        }
    }

    fn move_mode(&self) -> &'static str {
        if self.finished() { "READY" } else { "MOVING" }
    }

    fn finished(&self) -> bool {
        self.sd_bytes_printed >= self.sd_bytes_total
    }

    /// Exponential approach to the target plus measurement jitter.
    fn heat(&mut self) {
        let mut rng = rand::rng();
        self.nozzle_temp += (f64::from(NOZZLE_TARGET) - self.nozzle_temp) * 0.2
            + self.noise.sample(&mut rng);
        self.bed_temp +=
            (f64::from(BED_TARGET) - self.bed_temp) * 0.2 + self.noise.sample(&mut rng);
        self.nozzle_temp = self.nozzle_temp.max(AMBIENT);
        self.bed_temp = self.bed_temp.max(AMBIENT);
    }

    fn advance(&mut self) {
        let step = (self.sd_bytes_total / 64).max(1);
        self.sd_bytes_printed = (self.sd_bytes_printed + step).min(self.sd_bytes_total);
    }
}
