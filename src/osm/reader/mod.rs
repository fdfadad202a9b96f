// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use network_builder::NetworkBuilder;

use crate::{build_graph, Graph, NodeTable, Way};

mod model;
mod network_builder;
mod xml;

/// Format of the input OSM file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Unknown format - guess the format based on the content
    Unknown,

    /// Force uncompressed [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    Xml,

    /// Force [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    /// with [gzip](https://en.wikipedia.org/wiki/Gzip) compression
    XmlGz,

    /// Force [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    /// with [bzip2](https://en.wikipedia.org/wiki/Bzip2) compression
    XmlBz2,
}

impl FileFormat {
    /// Guesses the format of a file based on its first few bytes.
    fn detect(head: &[u8]) -> Self {
        if head.starts_with(&[0x1f, 0x8b]) {
            FileFormat::XmlGz
        } else if head.starts_with(b"BZh") {
            FileFormat::XmlBz2
        } else {
            FileFormat::Xml
        }
    }
}

/// Additional controls for reading OSM data.
#[derive(Debug, Clone)]
pub struct Options {
    /// Format of the input data.
    pub file_format: FileFormat,

    /// Filter nodes by a specific bounding box. In order: left (min lon), bottom (min lat),
    /// right (max lon), top (max lat). Ignored if all values are set to zero, or at least one
    /// of them is not finite.
    ///
    /// Ways are never filtered, so ways crossing the bounding box end up referencing
    /// unknown nodes, and only their parts inside the box are converted into edges.
    pub bbox: [f64; 4],
}

impl Default for Options {
    fn default() -> Self {
        Self {
            file_format: FileFormat::Unknown,
            bbox: [0.0; 4],
        }
    }
}

/// Error which can occur when reading OSM data.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("xml: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// Nodes and ways read from an OSM file, before conversion into a [Graph].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Network {
    pub nodes: NodeTable,
    pub ways: Vec<Way>,
}

impl Network {
    /// Converts the network into a routing [Graph], see [build_graph].
    pub fn build_graph(&self) -> Graph {
        build_graph(&self.nodes, &self.ways)
    }
}

/// Internal trait for objects which can stream [osm features](model::Feature)
/// from an underlying source.
trait FeatureReader {
    type Error;
    fn next_feature(&mut self) -> Result<Option<model::Feature>, Self::Error>;
}

impl<I, E> FeatureReader for I
where
    I: Iterator<Item = Result<model::Feature, E>>,
{
    type Error = E;

    fn next_feature(&mut self) -> Result<Option<model::Feature>, E> {
        self.next().transpose()
    }
}

/// Parse OSM features from a reader as per the provided [Options].
///
/// The provided stream will be automatically wrapped in a buffered reader.
pub fn load_from_io<R: io::Read>(options: &Options, reader: R) -> Result<Network, Error> {
    let mut b = io::BufReader::new(reader);

    let file_format = match options.file_format {
        FileFormat::Unknown => {
            let detected = FileFormat::detect(b.fill_buf()?);
            log::debug!("detected input format: {:?}", detected);
            detected
        }
        f => f,
    };

    let network = match file_format {
        FileFormat::Unknown | FileFormat::Xml => {
            NetworkBuilder::new(options).add_features(xml::Reader::from_io(b))?
        }

        FileFormat::XmlGz => {
            let d = flate2::read::MultiGzDecoder::new(b);
            NetworkBuilder::new(options).add_features(xml::Reader::from_io(io::BufReader::new(d)))?
        }

        FileFormat::XmlBz2 => {
            let d = bzip2::read::MultiBzDecoder::new(b);
            NetworkBuilder::new(options).add_features(xml::Reader::from_io(io::BufReader::new(d)))?
        }
    };

    Ok(network)
}

/// Parse OSM features from a file at the provided path as per the provided [Options].
pub fn load_from_file<P: AsRef<Path>>(options: &Options, path: P) -> Result<Network, Error> {
    let f = File::open(path)?;
    load_from_io(options, f)
}

/// Parse OSM features from a static buffer as per the provided [Options].
pub fn load_from_buffer(options: &Options, data: &[u8]) -> Result<Network, Error> {
    let is_xml = match options.file_format {
        FileFormat::Xml => true,
        FileFormat::Unknown => FileFormat::detect(data) == FileFormat::Xml,
        _ => false,
    };

    if is_xml {
        // Fast path is available for in-memory XML data
        let network = NetworkBuilder::new(options).add_features(xml::Reader::from_buffer(data))?;
        Ok(network)
    } else {
        // Wrap the buffer in a cursor and use the IO path
        load_from_io(options, io::Cursor::new(data))
    }
}
