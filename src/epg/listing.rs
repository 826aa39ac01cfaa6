//! Build an XMLTV document from pipe-delimited channel and programme listings
//!
//! Channel lines are `id|display name`, programme lines are
//! `channel|start|stop|title|description`. The last field may itself contain
//! `|`. Blank lines are skipped.

use std::io::{self, BufRead, BufWriter, Write};

use quick_xml::escape::{escape, partial_escape};
use tracing::info;

use super::channels::{ChannelClassificationQuery, normalize_channel_id};
use super::rewriter::{
    CHANNEL_ELEMENT, ConversionStats, PROGRAMME_ELEMENT, ROOT_ELEMENT, RewriteOptions,
};
use crate::errors::{ConversionError, ConversionResult};
use crate::transliteration::TransliterationEngine;

const CHANNEL_FIELDS: usize = 2;
const PROGRAMME_FIELDS: usize = 5;

/// Compose a full XMLTV document; channels are written before programmes
pub fn compose<C, P, W, Q>(
    channels: C,
    programmes: P,
    output: W,
    rules: &Q,
    options: &RewriteOptions,
) -> ConversionResult<ConversionStats>
where
    C: BufRead,
    P: BufRead,
    W: Write,
    Q: ChannelClassificationQuery,
{
    let engine = TransliterationEngine::default();
    let mut composer = ListingComposer {
        engine: &engine,
        rules,
        output: BufWriter::new(output),
        stats: ConversionStats::default(),
    };

    writeln!(
        composer.output,
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\" ?>"
    )?;
    options.write_generation_comment(&mut composer.output)?;
    writeln!(composer.output, "<{ROOT_ELEMENT}>")?;

    for_each_record(channels, CHANNEL_FIELDS, "channels", |fields| {
        composer.channel(fields[0], fields[1])
    })?;
    for_each_record(programmes, PROGRAMME_FIELDS, "programmes", |fields| {
        composer.programme(fields[0], fields[1], fields[2], fields[3], fields[4])
    })?;

    writeln!(composer.output, "</{ROOT_ELEMENT}>")?;
    composer.output.flush()?;

    info!(
        "Composed EPG listing: channels={} programmes={} transliterated={}",
        composer.stats.channels, composer.stats.programmes, composer.stats.transliterated_nodes
    );
    Ok(composer.stats)
}

struct ListingComposer<'a, Q, W: Write> {
    engine: &'a TransliterationEngine,
    rules: &'a Q,
    output: BufWriter<W>,
    stats: ConversionStats,
}

impl<Q: ChannelClassificationQuery, W: Write> ListingComposer<'_, Q, W> {
    fn channel(&mut self, id: &str, display_name: &str) -> ConversionResult<()> {
        let (resolved, _) = self.resolve(id);
        let display_name = display_name.trim();

        write!(
            self.output,
            "<{CHANNEL_ELEMENT} id=\"{}\">",
            escape(resolved.as_str())
        )?;
        if display_name.is_empty() {
            write!(self.output, "<display-name/>")?;
        } else {
            write!(
                self.output,
                "<display-name>{}</display-name>",
                partial_escape(display_name)
            )?;
        }
        writeln!(self.output, "</{CHANNEL_ELEMENT}>")?;

        self.stats.channels += 1;
        Ok(())
    }

    fn programme(
        &mut self,
        channel: &str,
        start: &str,
        stop: &str,
        title: &str,
        desc: &str,
    ) -> ConversionResult<()> {
        let (resolved, eligible) = self.resolve(channel);
        let title = self.text(title, eligible);
        let desc = self.text(desc, eligible);

        write!(
            self.output,
            "<{PROGRAMME_ELEMENT} start=\"{}\" stop=\"{}\" channel=\"{}\">",
            escape(start.trim()),
            escape(stop.trim()),
            escape(resolved.as_str())
        )?;
        write!(self.output, "<title>{}</title>", partial_escape(title.as_str()))?;
        if desc.is_empty() {
            write!(self.output, "<desc/>")?;
        } else {
            write!(self.output, "<desc>{}</desc>", partial_escape(desc.as_str()))?;
        }
        writeln!(self.output, "</{PROGRAMME_ELEMENT}>")?;

        self.stats.programmes += 1;
        Ok(())
    }

    fn resolve(&self, raw: &str) -> (String, bool) {
        let normalized = normalize_channel_id(raw);
        let resolved = self.rules.resolve_channel(&normalized);
        let eligible = self.rules.is_translit_channel(&normalized)
            || self.rules.is_translit_channel(&resolved);
        (resolved, eligible)
    }

    /// Listings use `_` where the guide shows a dash
    fn text(&mut self, raw: &str, eligible: bool) -> String {
        let text = raw.trim().replace('_', "-");
        if eligible && !text.is_empty() {
            self.stats.transliterated_nodes += 1;
            self.engine.transliterate(&text)
        } else {
            text
        }
    }
}

fn for_each_record<R, F>(input: R, fields: usize, source: &str, mut handle: F) -> ConversionResult<()>
where
    R: BufRead,
    F: FnMut(&[&str]) -> ConversionResult<()>,
{
    for (index, line) in input.lines().enumerate() {
        let line_number = index + 1;
        let line = line.map_err(|e| match e.kind() {
            io::ErrorKind::InvalidData => {
                ConversionError::encoding(format!("{source} line {line_number}"), e)
            }
            _ => ConversionError::Io(e),
        })?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let record: Vec<&str> = line.splitn(fields, '|').collect();
        if record.len() != fields {
            return Err(ConversionError::listing(
                line_number,
                format!(
                    "{source}: expected {fields} '|'-separated fields, found {}",
                    record.len()
                ),
            ));
        }
        handle(&record)?;
    }
    Ok(())
}
