/// The three status queries the printer understands. Each is written to the
/// socket verbatim, newline included; the device offers no richer protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollCommand {
    Temperature,
    SdProgress,
    Endstops,
}

impl PollCommand {
    pub fn wire(&self) -> &'static str {
        match self {
            PollCommand::Temperature => "~M105\n",
            PollCommand::SdProgress => "~M27\n",
            PollCommand::Endstops => "~M119\n",
        }
    }

    /// Human-readable name used in send logs and watchdog warnings.
    pub fn name(&self) -> &'static str {
        match self {
            PollCommand::Temperature => "GET_TEMP",
            PollCommand::SdProgress => "GET_PRINT_STATUS",
            PollCommand::Endstops => "GET_ENDSTOP_STATUS",
        }
    }
}

pub const POLL_SEQUENCE: [PollCommand; 3] = [
    PollCommand::Temperature,
    PollCommand::SdProgress,
    PollCommand::Endstops,
];

/// Round-robin over [`POLL_SEQUENCE`]; a single cursor that wraps forever.
#[derive(Debug, Default)]
pub struct CommandScheduler {
    cursor: usize,
}

impl CommandScheduler {
    pub fn next(&mut self) -> PollCommand {
        let command = POLL_SEQUENCE[self.cursor];
        self.cursor = (self.cursor + 1) % POLL_SEQUENCE.len();
        command
    }
}
