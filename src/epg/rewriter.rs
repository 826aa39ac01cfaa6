//! Streaming XMLTV re-serializer
//!
//! A single forward pass over quick-xml pull events. Structure and
//! attributes are re-emitted as they arrive; text inside `title`/`desc` of
//! transliteration-eligible channels goes through the
//! [`TransliterationEngine`]. Nothing beyond the text of the element being
//! read is buffered.
//!
//! The rewriter is an explicit state machine over [`StreamState`]:
//!
//! - *idle*: structure is copied, text is escaped only
//! - *in translit element*: entered on `<title>`/`<desc>`, left on any end tag
//! - *suppressed*: inside an `invalid-tags` subtree, nothing is written

use std::borrow::Cow;
use std::io::{BufRead, BufWriter, Write};
use std::time::Instant;

use chrono::{DateTime, Local};
use quick_xml::Reader;
use quick_xml::escape::{escape, unescape};
use quick_xml::events::{BytesDecl, BytesStart, Event};
use tracing::{debug, info, trace};

use super::channels::{ChannelClassificationQuery, normalize_channel_id};
use crate::errors::{ConversionError, ConversionResult};
use crate::transliteration::TransliterationEngine;

pub(crate) const ROOT_ELEMENT: &str = "tv";
pub(crate) const CHANNEL_ELEMENT: &str = "channel";
pub(crate) const PROGRAMME_ELEMENT: &str = "programme";
const TITLE_ELEMENT: &str = "title";
const DESC_ELEMENT: &str = "desc";

const DEFAULT_XML_VERSION: &str = "1.0";
const DEFAULT_XML_ENCODING: &str = "UTF-8";

/// Caller-controlled output details
#[derive(Debug, Clone)]
pub struct RewriteOptions {
    /// Used for the synthesized root `date` and the generation comment
    pub generated_at: DateTime<Local>,
    /// Emit `<!-- EPG partially transliterated at ... -->` after the declaration
    pub generation_comment: bool,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self::now(true)
    }
}

impl RewriteOptions {
    pub fn now(generation_comment: bool) -> Self {
        Self {
            generated_at: Local::now(),
            generation_comment,
        }
    }

    pub(crate) fn xmltv_date(&self) -> String {
        self.generated_at.format("%Y%m%d").to_string()
    }

    pub(crate) fn write_generation_comment<W: Write>(&self, output: &mut W) -> std::io::Result<()> {
        if self.generation_comment {
            writeln!(
                output,
                "<!-- EPG partially transliterated at {} -->",
                self.generated_at.format("%Y-%m-%d %H:%M:%S %z")
            )?;
        }
        Ok(())
    }
}

/// Counters reported once a document has been converted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    pub channels: usize,
    pub programmes: usize,
    pub transliterated_nodes: usize,
    pub suppressed_elements: usize,
}

/// Per-document state; created for one conversion and dropped with it
#[derive(Debug, Default)]
pub struct StreamState {
    /// Inside `title`/`desc`; cleared by every end tag
    pub translit_active: bool,
    /// Normalized id from the enclosing `programme`/`channel`
    pub current_channel: String,
    /// Whether `current_channel` (or its resolved id) is eligible
    pub channel_eligible: bool,
    /// Depth inside an `invalid-tags` subtree, 0 when not suppressed
    pub suppress_depth: usize,
    open_elements: usize,
    root_seen: bool,
    header_written: bool,
    pending_text: String,
}

impl StreamState {
    pub fn is_suppressed(&self) -> bool {
        self.suppress_depth > 0
    }

    fn leave_channel_scope(&mut self) {
        self.current_channel.clear();
        self.channel_eligible = false;
    }
}

/// Event-driven rewriter for one document
pub struct StreamingRewriter<'a, Q, W> {
    engine: &'a TransliterationEngine,
    rules: &'a Q,
    options: &'a RewriteOptions,
    output: W,
    state: StreamState,
    stats: ConversionStats,
}

/// Convert one XMLTV document from `input` to `output`.
///
/// Output is buffered internally and flushed before returning. A parse
/// error aborts the conversion; whatever was written before it stays written.
pub fn convert<R, W, Q>(
    input: R,
    output: W,
    rules: &Q,
    options: &RewriteOptions,
) -> ConversionResult<ConversionStats>
where
    R: BufRead,
    W: Write,
    Q: ChannelClassificationQuery,
{
    let engine = TransliterationEngine::default();
    StreamingRewriter::new(&engine, rules, options, BufWriter::new(output)).run(input)
}

impl<'a, Q, W> StreamingRewriter<'a, Q, W>
where
    Q: ChannelClassificationQuery,
    W: Write,
{
    pub fn new(
        engine: &'a TransliterationEngine,
        rules: &'a Q,
        options: &'a RewriteOptions,
        output: W,
    ) -> Self {
        Self {
            engine,
            rules,
            options,
            output,
            state: StreamState::default(),
            stats: ConversionStats::default(),
        }
    }

    pub fn run<R: BufRead>(mut self, input: R) -> ConversionResult<ConversionStats> {
        let started = Instant::now();
        let mut reader = Reader::from_reader(input);
        let mut buf = Vec::new();

        loop {
            let event = match reader.read_event_into(&mut buf) {
                Ok(event) => event,
                Err(e) => {
                    return Err(ConversionError::malformed(
                        reader.buffer_position(),
                        e.to_string(),
                    ));
                }
            };
            let position = reader.buffer_position();

            match event {
                Event::Decl(decl) => self.declaration(&decl, position)?,
                Event::Start(start) => {
                    self.flush_text()?;
                    self.state.open_elements += 1;
                    self.start_element(&start, false, position)?;
                }
                Event::Empty(start) => {
                    self.flush_text()?;
                    self.start_element(&start, true, position)?;
                }
                Event::End(end) => {
                    self.flush_text()?;
                    self.state.open_elements = self.state.open_elements.saturating_sub(1);
                    let qname = end.name();
                    self.end_element(utf8(qname.as_ref(), "element name")?)?;
                }
                Event::Text(text) => {
                    let raw = utf8(&text, "text")?;
                    let unescaped = unescape(raw)
                        .map_err(|e| ConversionError::malformed(position, e.to_string()))?;
                    self.push_text(&unescaped);
                }
                Event::CData(data) => {
                    self.push_text(utf8(&data, "CDATA section")?);
                }
                Event::GeneralRef(reference) => {
                    let name = utf8(&reference, "entity reference")?;
                    let entity = format!("&{name};");
                    let resolved = unescape(&entity)
                        .map_err(|e| ConversionError::malformed(position, e.to_string()))?;
                    self.push_text(&resolved);
                }
                Event::Eof => break,
                // Comments, processing instructions and DOCTYPE are not carried over
                _ => {}
            }
            buf.clear();
        }

        if !self.state.root_seen && self.stats.suppressed_elements == 0 {
            return Err(ConversionError::malformed(
                reader.buffer_position(),
                "no root element found",
            ));
        }
        if self.state.open_elements > 0 {
            return Err(ConversionError::malformed(
                reader.buffer_position(),
                format!("{} element(s) left unclosed", self.state.open_elements),
            ));
        }

        self.flush_text()?;
        self.output.flush()?;

        info!(
            "Converted EPG document: channels={} programmes={} transliterated={} suppressed={} duration={:?}",
            self.stats.channels,
            self.stats.programmes,
            self.stats.transliterated_nodes,
            self.stats.suppressed_elements,
            started.elapsed()
        );
        Ok(self.stats)
    }

    fn declaration(&mut self, decl: &BytesDecl<'_>, position: u64) -> ConversionResult<()> {
        if self.state.header_written {
            return Ok(());
        }
        let version = decl
            .version()
            .map_err(|e| ConversionError::malformed(position, e.to_string()))?;
        let version = utf8(version.as_ref(), "XML declaration")?.to_string();

        let encoding = match decl.encoding() {
            Some(encoding) => {
                let encoding =
                    encoding.map_err(|e| ConversionError::malformed(position, e.to_string()))?;
                utf8(encoding.as_ref(), "XML declaration")?.to_string()
            }
            None => DEFAULT_XML_ENCODING.to_string(),
        };

        self.write_header(&version, &encoding)
    }

    fn write_header(&mut self, version: &str, encoding: &str) -> ConversionResult<()> {
        writeln!(
            self.output,
            "<?xml version=\"{version}\" encoding=\"{encoding}\" ?>"
        )?;
        self.options.write_generation_comment(&mut self.output)?;
        self.state.header_written = true;
        Ok(())
    }

    fn start_element(
        &mut self,
        start: &BytesStart<'_>,
        empty: bool,
        position: u64,
    ) -> ConversionResult<()> {
        let qname = start.name();
        let name = utf8(qname.as_ref(), "element name")?;

        if self.state.is_suppressed() {
            if !empty {
                self.state.suppress_depth += 1;
            }
            return Ok(());
        }
        if self.rules.is_invalid_tag(name) {
            trace!("Dropping <{}> subtree", name);
            self.stats.suppressed_elements += 1;
            if !empty {
                self.state.suppress_depth = 1;
            }
            return Ok(());
        }

        if !self.state.header_written {
            self.write_header(DEFAULT_XML_VERSION, DEFAULT_XML_ENCODING)?;
        }
        let is_root = !self.state.root_seen;
        self.state.root_seen = true;

        match name {
            TITLE_ELEMENT | DESC_ELEMENT => self.state.translit_active = true,
            PROGRAMME_ELEMENT => {
                self.stats.programmes += 1;
                self.state.leave_channel_scope();
            }
            CHANNEL_ELEMENT => {
                self.stats.channels += 1;
                self.state.leave_channel_scope();
            }
            _ => {}
        }

        let mut tag = String::with_capacity(64);
        tag.push('<');
        tag.push_str(name);

        let mut has_date = false;
        for attribute in start.attributes() {
            let attribute =
                attribute.map_err(|e| ConversionError::malformed(position, e.to_string()))?;
            let key = utf8(attribute.key.as_ref(), "attribute name")?;
            let raw = utf8(attribute.value.as_ref(), "attribute value")?;
            let value = unescape(raw)
                .map_err(|e| ConversionError::malformed(position, e.to_string()))?;

            let value = if key == "channel" || (name == CHANNEL_ELEMENT && key == "id") {
                Cow::Owned(self.enter_channel(&value))
            } else {
                value
            };
            has_date |= key == "date";
            push_attribute(&mut tag, key, &value);
        }

        if is_root && !has_date {
            push_attribute(&mut tag, "date", &self.options.xmltv_date());
        }
        tag.push_str(if empty { "/>" } else { ">" });
        self.output.write_all(tag.as_bytes())?;

        if empty {
            self.finish_element(name)?;
        }
        Ok(())
    }

    /// Normalize and resolve a channel reference, returning the id to emit
    fn enter_channel(&mut self, raw: &str) -> String {
        let normalized = normalize_channel_id(raw);
        let resolved = self.rules.resolve_channel(&normalized);
        if resolved != normalized {
            debug!("Channel '{}' resolved to '{}'", raw, resolved);
        }

        self.state.channel_eligible = self.rules.is_translit_channel(&normalized)
            || self.rules.is_translit_channel(&resolved);
        self.state.current_channel = normalized;
        resolved
    }

    fn end_element(&mut self, name: &str) -> ConversionResult<()> {
        if self.state.is_suppressed() {
            self.state.suppress_depth -= 1;
            return Ok(());
        }
        write!(self.output, "</{name}>")?;
        self.finish_element(name)
    }

    fn finish_element(&mut self, name: &str) -> ConversionResult<()> {
        match name {
            CHANNEL_ELEMENT | PROGRAMME_ELEMENT => {
                self.output.write_all(b"\n")?;
                self.state.leave_channel_scope();
            }
            ROOT_ELEMENT => self.output.write_all(b"\n")?,
            _ => {}
        }
        // Reset on every end tag, not only title/desc: XMLTV text elements
        // never nest markup.
        self.state.translit_active = false;
        Ok(())
    }

    fn push_text(&mut self, text: &str) {
        if !self.state.is_suppressed() {
            self.state.pending_text.push_str(text);
        }
    }

    fn flush_text(&mut self) -> ConversionResult<()> {
        if self.state.pending_text.is_empty() {
            return Ok(());
        }
        let text = std::mem::take(&mut self.state.pending_text);
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(());
        }

        // Escaped first, so quoted and entity-bearing tokens classify as foreign
        let escaped = escape(trimmed);
        if self.state.translit_active && self.state.channel_eligible {
            let converted = self.engine.transliterate(&escaped);
            self.stats.transliterated_nodes += 1;
            self.output.write_all(converted.as_bytes())?;
        } else {
            self.output.write_all(escaped.as_bytes())?;
        }
        Ok(())
    }
}

fn push_attribute(tag: &mut String, key: &str, value: &str) {
    tag.push(' ');
    tag.push_str(key);
    tag.push_str("=\"");
    tag.push_str(&escape(value));
    tag.push('"');
}

fn utf8<'b>(bytes: &'b [u8], context: &str) -> ConversionResult<&'b str> {
    std::str::from_utf8(bytes).map_err(|e| ConversionError::encoding(context, e))
}
