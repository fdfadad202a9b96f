// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::io;
use std::str::from_utf8;

use quick_xml::events::{BytesStart, Event};

use super::model;
use crate::GeoNode;

/// Parser is a trait for objects which can parse XML.
///
/// This trait only exists to fix the mismatch of
/// [quick_xml::Reader::read_event] when working on buffered data
/// and [quick_xml::Reader::read_event_into] when working on IO.
pub(super) trait Parser {
    fn read_event<'a>(&'a mut self) -> quick_xml::Result<Event<'a>>;
}

/// IoParser implements [Parser] over an [std::io::BufRead].
pub(super) struct IoParser<R: io::BufRead>(quick_xml::Reader<R>, Vec<u8>);

impl<R: io::BufRead> IoParser<R> {
    #[inline]
    fn new(reader: R) -> Self {
        Self(quick_xml::Reader::from_reader(reader), Vec::default())
    }
}

impl<R: io::BufRead> Parser for IoParser<R> {
    #[inline]
    fn read_event<'a>(&'a mut self) -> quick_xml::Result<Event<'a>> {
        self.1.clear();
        self.0.read_event_into(&mut self.1)
    }
}

/// BufParser implements [Parser] over a slice of bytes (`&[u8]`).
pub(super) struct BufParser<'a>(quick_xml::Reader<&'a [u8]>);

impl<'a> BufParser<'a> {
    #[inline]
    fn new(data: &'a [u8]) -> Self {
        Self(quick_xml::Reader::from_reader(data))
    }
}

impl<'a> Parser for BufParser<'a> {
    #[inline]
    fn read_event<'b>(&'b mut self) -> quick_xml::Result<Event<'b>> {
        self.0.read_event()
    }
}

/// Reader reads osm [Features](model::Feature) from an
/// [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML) file.
///
/// Malformed elements are skipped (with a warning), malformed XML results in an error.
pub(super) struct Reader<P: Parser> {
    parser: P,
    eof: bool,
}

impl<P: Parser> Reader<P> {
    #[inline]
    fn new(parser: P) -> Self {
        Self { parser, eof: false }
    }
}

impl<P: Parser> Iterator for Reader<P> {
    type Item = Result<model::Feature, quick_xml::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut f: Option<model::Feature> = None;

        while !self.eof {
            let event = match self.parser.read_event() {
                Ok(e) => e,
                Err(e) => {
                    self.eof = true;
                    return Some(Err(e));
                }
            };

            match event {
                Event::Empty(start) => {
                    match start.local_name().as_ref() {
                        b"node" => {
                            if let Some(n) = parse_node(&start) {
                                return Some(Ok(model::Feature::Node(n)));
                            }
                        }
                        // "way" can't be self-closing
                        b"tag" => {
                            if let Some(tags) = feature_tags(&mut f) {
                                if let Some((k, v)) = parse_tag(&start) {
                                    tags.insert(k, v);
                                }
                            }
                        }
                        b"nd" => {
                            if let Some(nodes) = feature_nodes(&mut f) {
                                if let Some(ref_) = parse_nd(&start) {
                                    nodes.push(ref_);
                                }
                            }
                        }
                        _ => {}
                    }
                }

                Event::Start(start) => match start.local_name().as_ref() {
                    b"node" => f = parse_node(&start).map(model::Feature::Node),
                    b"way" => f = parse_way(&start).map(model::Feature::Way),
                    // "tag" and "nd" must be self-closing
                    _ => {}
                },

                Event::End(end) => match end.local_name().as_ref() {
                    b"node" | b"way" => {
                        if let Some(f) = f.take() {
                            return Some(Ok(f));
                        }
                    }
                    _ => {}
                },

                Event::Eof => {
                    self.eof = true;
                }

                _ => {}
            }
        }

        f.map(Ok)
    }
}

impl<'a> Reader<BufParser<'a>> {
    #[inline]
    pub(super) fn from_buffer(data: &'a [u8]) -> Self {
        Self::new(BufParser::new(data))
    }
}

impl<R: io::BufRead> Reader<IoParser<R>> {
    #[inline]
    pub(super) fn from_io(reader: R) -> Self {
        Self::new(IoParser::new(reader))
    }
}

fn parse_node(start: &BytesStart<'_>) -> Option<GeoNode> {
    let node = parse_node_attributes(start);
    if node.is_none() {
        log::warn!(
            "skipping malformed <node>: {}",
            String::from_utf8_lossy(start)
        );
    }
    node
}

fn parse_node_attributes(start: &BytesStart<'_>) -> Option<GeoNode> {
    let mut id: i64 = 0;
    let mut lat = f64::NAN;
    let mut lon = f64::NAN;

    for attr in start.attributes() {
        let attr = attr.ok()?;
        match attr.key.as_ref() {
            b"id" => id = from_utf8(&attr.value).ok()?.parse().ok()?,
            b"lat" => lat = from_utf8(&attr.value).ok()?.parse().ok()?,
            b"lon" => lon = from_utf8(&attr.value).ok()?.parse().ok()?,
            _ => {}
        }
    }

    if id != 0 && lat.is_finite() && lon.is_finite() {
        Some(GeoNode { id, lat, lon })
    } else {
        None
    }
}

fn parse_way(start: &BytesStart<'_>) -> Option<model::Way> {
    let mut id: i64 = 0;

    for attr in start.attributes().flatten() {
        if attr.key.as_ref() == b"id" {
            id = from_utf8(&attr.value)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0);
        }
    }

    if id != 0 {
        Some(model::Way {
            id,
            nodes: Vec::default(),
            tags: HashMap::default(),
        })
    } else {
        log::warn!(
            "skipping <way> without a valid id: {}",
            String::from_utf8_lossy(start)
        );
        None
    }
}

fn parse_tag(start: &BytesStart<'_>) -> Option<(String, String)> {
    let mut k = None;
    let mut v = None;

    for attr in start.attributes() {
        let attr = attr.ok()?;
        match attr.key.as_ref() {
            b"k" => k = attr.unescape_value().ok().map(|s| s.into_owned()),
            b"v" => v = attr.unescape_value().ok().map(|s| s.into_owned()),
            _ => {}
        }
    }

    match k {
        Some(k) => Some((k, v.unwrap_or_default())),
        None => {
            log::warn!("skipping <tag> without a key");
            None
        }
    }
}

fn parse_nd(start: &BytesStart<'_>) -> Option<i64> {
    let mut ref_: i64 = 0;

    for attr in start.attributes().flatten() {
        if attr.key.as_ref() == b"ref" {
            ref_ = from_utf8(&attr.value)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0);
        }
    }

    if ref_ != 0 {
        Some(ref_)
    } else {
        log::warn!("skipping <nd> without a valid ref");
        None
    }
}

fn feature_tags(f: &mut Option<model::Feature>) -> Option<&mut HashMap<String, String>> {
    match f {
        Some(model::Feature::Way(ref mut w)) => Some(&mut w.tags),
        _ => None,
    }
}

fn feature_nodes(f: &mut Option<model::Feature>) -> Option<&mut Vec<i64>> {
    match f {
        Some(model::Feature::Way(ref mut w)) => Some(&mut w.nodes),
        _ => None,
    }
}
