/// Literal token the printer appends after every response block.
pub const FRAME_TERMINATOR: &str = "ok";

/// Accumulates raw transport fragments and splits out complete response
/// frames as soon as their `ok` terminator arrives.
///
/// A single fragment may complete several frames; text after the last
/// terminator stays buffered until more data shows up. A terminator with no
/// preceding content yields an empty frame, which parses to an empty update.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    buffer: String,
}

impl FrameBuffer {
    /// Appends `fragment` and drains every frame completed by it, in the
    /// order their terminators appear.
    pub fn push(&mut self, fragment: &str) -> Vec<String> {
        self.buffer.push_str(fragment);

        let mut frames = Vec::new();
        while let Some(at) = self.buffer.find(FRAME_TERMINATOR) {
            let frame = self.buffer[..at].trim().to_owned();
            self.buffer.drain(..at + FRAME_TERMINATOR.len());
            frames.push(frame);
        }
        frames
    }

    /// Bytes still waiting for a terminator.
    pub fn pending(&self) -> &str {
        &self.buffer
    }
}
