#[cfg(test)]
#[path = "stream_decoder_test.rs"]
mod tests;

use crate::domain::models::EventRecord;

/// Turns response body chunks, split at arbitrary byte offsets, into data
/// records. Bytes after the last newline wait in the buffer for the next
/// chunk, so a record is only decoded once its whole line has arrived.
#[derive(Default)]
pub struct StreamDecoder {
    buffer: Vec<u8>,
}

impl StreamDecoder {
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<EventRecord> {
        self.buffer.extend_from_slice(chunk);

        let last_newline = match self.buffer.iter().rposition(|byte| return *byte == b'\n') {
            Some(idx) => idx,
            None => return vec![],
        };

        let rest = self.buffer.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.buffer, rest);

        return complete[..last_newline]
            .split(|byte| return *byte == b'\n')
            .filter_map(EventRecord::from_line)
            .collect();
    }

    /// Flushes a final line that never got its newline.
    pub fn finish(&mut self) -> Option<EventRecord> {
        if self.buffer.is_empty() {
            return None;
        }

        let line = std::mem::take(&mut self.buffer);
        return EventRecord::from_line(&line);
    }
}
