use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use highways::{find_route, osm, Graph};

#[derive(Debug, thiserror::Error)]
#[error("{0}: {1}")]
struct GraphLoadError(PathBuf, #[source] osm::Error);

#[derive(Debug, thiserror::Error)]
#[error("no node close to the {0} position - is the graph empty?")]
struct NoNearbyNode(&'static str);

#[derive(Debug, thiserror::Error)]
#[error("no route from {0} to {1}")]
struct NoRoute(i64, i64);

#[derive(Debug, thiserror::Error)]
#[error("bounding box needs exactly 4 values, got {0}")]
struct InvalidBbox(usize);

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Auto,
    Xml,
    XmlGz,
    XmlBz2,
}

impl From<Format> for osm::FileFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Auto => osm::FileFormat::Unknown,
            Format::Xml => osm::FileFormat::Xml,
            Format::XmlGz => osm::FileFormat::XmlGz,
            Format::XmlBz2 => osm::FileFormat::XmlBz2,
        }
    }
}

#[derive(Parser)]
struct Cli {
    /// The path to the OSM file
    osm_file: PathBuf,

    /// Latitude of the start point
    #[arg(allow_negative_numbers = true)]
    start_lat: f64,

    /// Longitude of the start point
    #[arg(allow_negative_numbers = true)]
    start_lon: f64,

    /// Latitude of the end point
    #[arg(allow_negative_numbers = true)]
    end_lat: f64,

    /// Longitude of the end point
    #[arg(allow_negative_numbers = true)]
    end_lon: f64,

    /// Format of the OSM file
    #[arg(long, value_enum, default_value_t = Format::Auto)]
    format: Format,

    /// Only load nodes within MIN_LON,MIN_LAT,MAX_LON,MAX_LAT
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    bbox: Option<Vec<f64>>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let mut logger = colog::default_builder();
    logger.filter_level(if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    });
    logger.init();

    let options = osm::Options {
        file_format: cli.format.into(),
        bbox: match cli.bbox.as_deref() {
            None => [0.0; 4],
            Some(&[a, b, c, d]) => [a, b, c, d],
            Some(other) => return Err(InvalidBbox(other.len()).into()),
        },
    };

    let g = load_graph(&cli.osm_file, &options)?;
    log::info!("graph has {} nodes and {} edges", g.node_ids().len(), g.edge_count());

    let start = g
        .find_nearest_node(cli.start_lat, cli.start_lon)
        .ok_or(NoNearbyNode("start"))?;

    let end = g
        .find_nearest_node(cli.end_lat, cli.end_lon)
        .ok_or(NoNearbyNode("end"))?;

    let route = route_between(&g, start.id, end.id)?;

    let distance: f64 = route
        .windows(2)
        .map(|pair| g.get_weight(pair[0], pair[1]))
        .sum();

    println!("{{");
    println!("  \"type\": \"FeatureCollection\",");
    println!("  \"features\": [");
    println!("    {{");
    println!("      \"type\": \"Feature\",");
    println!("      \"properties\": {{");
    println!("        \"from\": {},", start.id);
    println!("        \"to\": {},", end.id);
    println!("        \"distance_km\": {}", distance);
    println!("      }},");

    println!("      \"geometry\": {{");
    println!("        \"type\": \"LineString\",");
    println!("        \"coordinates\": [");

    let mut nodes = route.iter().filter_map(|&node_id| g.get_node(node_id)).peekable();
    while let Some(node) = nodes.next() {
        let suffix = if nodes.peek().is_some() { "," } else { "" };
        println!("          [{}, {}]{}", node.lon, node.lat, suffix);
    }

    println!("        ]");
    println!("      }}");
    println!("    }}");
    println!("  ]");
    println!("}}");

    Ok(())
}

fn route_between(g: &Graph, from: i64, to: i64) -> Result<Vec<i64>, Box<dyn Error>> {
    let route = find_route(g, from, to)?;
    if route.is_empty() {
        return Err(NoRoute(from, to).into());
    }
    Ok(route)
}

fn load_graph<P: AsRef<Path>>(path: P, options: &osm::Options) -> Result<Graph, GraphLoadError> {
    match osm::load_from_file(options, path.as_ref()) {
        Ok(network) => Ok(network.build_graph()),
        Err(e) => Err(GraphLoadError(PathBuf::from(path.as_ref()), e)),
    }
}
