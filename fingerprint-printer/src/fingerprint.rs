//! Fingerprint command builder
//!
//! Provides a fluent API for building Fingerprint programs, and the numbered
//! label job built on top of it.
//!
//! A job is one setup block followed by one block per label:
//!
//! ```text
//! SETUP "Media,Media Type,Label (w Gaps)"
//! SETUP "Media,Media Size,Width,840"
//! SETUP "Print Defs,Print Method,Direct Thermal"
//! CLL
//! FONT "IPLFNT34H"
//! MAGNIFY 2, 2
//! PRPOS 420, 150
//! ALIGN 5
//! PRTXT "1"
//! PRINTFEED
//! ...
//! ```

use crate::encoding::{encode_cp1252, quote_text};
use crate::error::{PrintError, PrintResult};
use crate::layout::{Anchor, LabelLayout, MediaType, PrintMethod};
use tracing::instrument;

/// Statement terminator
const EOL: u8 = b'\n';

/// Fingerprint command builder
///
/// Every method appends exactly one statement. Numeric parameters are written
/// as decimal digits; text goes through [`encode_cp1252`].
pub struct FingerprintBuilder {
    buf: Vec<u8>,
}

impl FingerprintBuilder {
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(4096),
        }
    }

    /// Append one ASCII statement
    fn statement(&mut self, s: &str) -> &mut Self {
        self.buf.extend_from_slice(s.as_bytes());
        self.buf.push(EOL);
        self
    }

    // === Setup ===

    /// Change a setup parameter (`SETUP "section,...,value"`)
    pub fn setup(&mut self, path: &str) -> &mut Self {
        self.statement(&format!("SETUP {}", quote_text(path)))
    }

    pub fn media_type(&mut self, media_type: MediaType) -> &mut Self {
        self.setup(&format!("Media,Media Type,{}", media_type.as_setup_value()))
    }

    /// Media width in dots
    pub fn media_width(&mut self, dots: u32) -> &mut Self {
        self.setup(&format!("Media,Media Size,Width,{}", dots))
    }

    pub fn print_method(&mut self, method: PrintMethod) -> &mut Self {
        self.setup(&format!(
            "Print Defs,Print Method,{}",
            method.as_setup_value()
        ))
    }

    // === Layout ===

    /// Clear the current layout (`CLL`), starting a new label
    pub fn clear_layout(&mut self) -> &mut Self {
        self.statement("CLL")
    }

    /// Select a resident font by its (ASCII) name
    pub fn font(&mut self, name: &str) -> &mut Self {
        self.statement(&format!("FONT {}", quote_text(name)))
    }

    /// Enlarge the following fields (`MAGNIFY height, width`)
    pub fn magnify(&mut self, height: u8, width: u8) -> &mut Self {
        self.statement(&format!("MAGNIFY {}, {}", height, width))
    }

    /// Set the insertion point (`PRPOS x, y`)
    pub fn position(&mut self, x: u32, y: u32) -> &mut Self {
        self.statement(&format!("PRPOS {}, {}", x, y))
    }

    pub fn align(&mut self, anchor: Anchor) -> &mut Self {
        self.statement(&format!("ALIGN {}", anchor.code()))
    }

    /// Place a text field (`PRTXT "..."`)
    ///
    /// Fails if the text cannot be represented in windows-1252.
    pub fn text(&mut self, s: &str) -> PrintResult<&mut Self> {
        let encoded = encode_cp1252(&format!("PRTXT {}", quote_text(s)))?;
        self.buf.extend_from_slice(&encoded);
        self.buf.push(EOL);
        Ok(self)
    }

    // === Paper Control ===

    /// Print the current layout and advance to the next label
    pub fn print_feed(&mut self) -> &mut Self {
        self.statement("PRINTFEED")
    }

    // === Build ===

    /// Bytes written so far
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for FingerprintBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Numbered label job
// ============================================================================

/// A request to print labels numbered `1..=count`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintJob {
    count: u32,
}

impl PrintJob {
    /// Validate a label count
    ///
    /// The count comes straight from user input, so it is taken signed and
    /// rejected unless it is at least 1 and fits a `u32`.
    pub fn new(count: i64) -> PrintResult<Self> {
        if count < 1 {
            return Err(PrintError::InvalidArgument(format!(
                "label count must be at least 1, got {}",
                count
            )));
        }
        let count = u32::try_from(count).map_err(|_| {
            PrintError::InvalidArgument(format!("label count {} is too large", count))
        })?;
        Ok(Self { count })
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Render the job with the given layout
    #[instrument(skip(layout), fields(count = self.count))]
    pub fn commands(&self, layout: &LabelLayout) -> PrintResult<CommandStream> {
        layout.validate()?;

        let mut b = FingerprintBuilder::new();
        setup_block(&mut b, layout);
        for index in 1..=self.count {
            label_block(&mut b, layout, index)?;
        }

        Ok(CommandStream {
            bytes: b.build(),
            labels: self.count,
        })
    }
}

/// Put the printer into a known state
fn setup_block(b: &mut FingerprintBuilder, layout: &LabelLayout) {
    b.media_type(layout.media_type)
        .media_width(layout.media_width)
        .print_method(layout.print_method);
}

/// One label showing `index`, ending with a feed
fn label_block(b: &mut FingerprintBuilder, layout: &LabelLayout, index: u32) -> PrintResult<()> {
    b.clear_layout()
        .font(&layout.font)
        .magnify(layout.magnify_height, layout.magnify_width)
        .position(layout.x, layout.y)
        .align(layout.anchor)
        .text(&index.to_string())?
        .print_feed();
    Ok(())
}

/// Encoded Fingerprint program, ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandStream {
    bytes: Vec<u8>,
    labels: u32,
}

impl CommandStream {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Number of label blocks in the stream
    pub fn labels(&self) -> u32 {
        self.labels
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl AsRef<[u8]> for CommandStream {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Build the command stream for `count` labels with the default layout
pub fn build_commands(count: i64) -> PrintResult<CommandStream> {
    build_commands_with(count, &LabelLayout::default())
}

/// Build the command stream for `count` labels with a custom layout
pub fn build_commands_with(count: i64, layout: &LabelLayout) -> PrintResult<CommandStream> {
    PrintJob::new(count)?.commands(layout)
}
