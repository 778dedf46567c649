//! Splits raw feed payloads into header-delimited blocks

/// Date-column label that opens every header row of the feed
pub const HEADER_TOKEN: &str = "Datum";

/// One header-plus-rows segment of the raw feed
#[derive(Debug, Clone, PartialEq)]
pub struct RawBlock {
    lines: Vec<String>,
}

impl RawBlock {
    fn new(header_line: String) -> Self {
        Self {
            lines: vec![header_line],
        }
    }

    /// The header row that opened this block
    pub fn header_line(&self) -> &str {
        &self.lines[0]
    }

    /// All lines after the header row
    pub fn data_rows(&self) -> &[String] {
        &self.lines[1..]
    }
}

/// Split one payload into blocks, each starting at a line that begins with
/// [`HEADER_TOKEN`]. Lines preceding the first header are discarded; a payload
/// without any header yields no blocks.
pub fn split_payload(payload: &str) -> Vec<RawBlock> {
    let mut blocks: Vec<RawBlock> = Vec::new();

    for line in payload.lines() {
        if line.starts_with(HEADER_TOKEN) {
            blocks.push(RawBlock::new(line.to_string()));
        } else if let Some(block) = blocks.last_mut() {
            block.lines.push(line.to_string());
        }
    }

    blocks
}

/// Split an ordered sequence of payloads, concatenating their blocks in
/// payload order.
pub fn split_payloads<'a, I>(payloads: I) -> Vec<RawBlock>
where
    I: IntoIterator<Item = &'a str>,
{
    payloads.into_iter().flat_map(split_payload).collect()
}
