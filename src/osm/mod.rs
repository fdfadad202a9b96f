// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

mod reader;
pub mod tags;

pub use reader::{
    load_from_buffer, load_from_file, load_from_io, Error, FileFormat, Network, Options,
};

#[cfg(test)]
mod tests {
    use super::super::{find_route, shortest_paths, Graph};
    use super::*;

    macro_rules! assert_almost_eq {
        ($a:expr, $b:expr) => {
            assert!(
                (($a - $b).abs() < 1e-4),
                "assertion failed: {} ≈ {}",
                $a,
                $b
            )
        };
    }

    macro_rules! assert_edge {
        ($graph:expr, $from:expr, $to:expr) => {
            assert!($graph.get_edge($from, $to).is_some());
        };
    }

    macro_rules! assert_no_edge {
        ($graph:expr, $from:expr, $to:expr) => {
            assert!($graph.get_edge($from, $to).is_none());
        };
    }

    const SIMPLE_XML: &[u8] = include_bytes!("reader/test_fixtures/simple.osm");
    const SIMPLE_XML_GZ: &[u8] = include_bytes!("reader/test_fixtures/simple.osm.gz");
    const SIMPLE_XML_BZ2: &[u8] = include_bytes!("reader/test_fixtures/simple.osm.bz2");

    fn check_simple_network(n: &Network) {
        assert_eq!(n.nodes.len(), 10);
        assert_eq!(n.ways.len(), 7);
        assert_eq!(n.ways.iter().filter(|w| w.is_routable).count(), 6);
        assert!(!n.nodes.contains_key(&-11));
        assert!(!n.nodes.contains_key(&-99));
    }

    fn check_simple_graph(g: &Graph) {
        //   5 ──► 6
        //   ▲     │
        //   │     ▼
        //   2 ──► 3
        //   │     ▲
        //   │     │
        //   1 ◄── 4
        //   │
        //   10

        // Check the loaded amount of nodes - 3 is a dead-end
        assert_eq!(g.len(), 6);
        assert_eq!(g.node_ids().len(), 7);
        assert_eq!(g.edge_count(), 10);

        // Check edge costs
        assert_almost_eq!(g.get_weight(-1, -2), 0.1112);
        assert_eq!(g.get_weight(-1, -2), g.get_weight(-2, -1));
        assert_almost_eq!(g.get_weight(-2, -3), 0.1072);

        // Check plain two-way roads
        assert_edge!(g, -1, -2);
        assert_edge!(g, -2, -1);
        assert_edge!(g, -1, -10);
        assert_edge!(g, -10, -1);

        // Check oneway handling: -2 -> -3 (oneway=yes), -4 -> -3 (oneway=-1), -4 -> -1 (motorway)
        assert_edge!(g, -2, -3);
        assert_no_edge!(g, -3, -2);
        assert_edge!(g, -4, -3);
        assert_no_edge!(g, -3, -4);
        assert_edge!(g, -4, -1);
        assert_no_edge!(g, -1, -4);

        // Check roundabout handling: -2 -> -5 -> -6 -> -3
        assert_edge!(g, -2, -5);
        assert_edge!(g, -5, -6);
        assert_edge!(g, -6, -3);
        assert_no_edge!(g, -5, -2);
        assert_no_edge!(g, -6, -5);
        assert_no_edge!(g, -3, -6);

        // Check non-routable ways
        assert!(!g.contains_node(-7));
        assert!(!g.contains_node(-8));
        assert!(!g.contains_node(-9));

        // Check dangling references
        assert!(!g.contains_node(-99));

        // Check names
        assert_eq!(
            g.get_edge(-1, -2).and_then(|e| e.name.as_deref()),
            Some("Main Street")
        );
        assert_eq!(
            g.get_edge(-2, -3).and_then(|e| e.name.as_deref()),
            Some("Rue d'Italie")
        );
        assert_eq!(g.get_edge(-2, -5).and_then(|e| e.name.as_deref()), None);

        // Check coordinates
        assert_eq!(g.get_node(-10).map(|n| (n.lat, n.lon)), Some((49.9995, 20.0005)));
    }

    fn load_simple(file_format: FileFormat, data: &[u8]) -> Network {
        let options = Options {
            file_format,
            bbox: [0.0; 4],
        };
        load_from_buffer(&options, data).unwrap()
    }

    #[test]
    fn test_build_graph_xml_round_trip() {
        let n = load_simple(FileFormat::Xml, SIMPLE_XML);
        check_simple_network(&n);
        check_simple_graph(&n.build_graph());
    }

    #[test]
    fn test_build_graph_xml_io_round_trip() {
        let options = Options {
            file_format: FileFormat::Xml,
            bbox: [0.0; 4],
        };
        let n = load_from_io(&options, std::io::Cursor::new(SIMPLE_XML)).unwrap();
        check_simple_network(&n);
        check_simple_graph(&n.build_graph());
    }

    #[test]
    fn test_build_graph_gz_round_trip() {
        let n = load_simple(FileFormat::XmlGz, SIMPLE_XML_GZ);
        check_simple_network(&n);
        check_simple_graph(&n.build_graph());
    }

    #[test]
    fn test_build_graph_bz2_round_trip() {
        let n = load_simple(FileFormat::XmlBz2, SIMPLE_XML_BZ2);
        check_simple_network(&n);
        check_simple_graph(&n.build_graph());
    }

    #[test]
    fn test_detect_file_format() {
        for data in [SIMPLE_XML, SIMPLE_XML_GZ, SIMPLE_XML_BZ2] {
            let n = load_simple(FileFormat::Unknown, data);
            check_simple_network(&n);
        }

        let n = load_from_io(&Options::default(), std::io::Cursor::new(SIMPLE_XML_GZ)).unwrap();
        check_simple_network(&n);
    }

    #[test]
    fn test_bbox() {
        let options = Options {
            file_format: FileFormat::Xml,
            bbox: [19.99, 49.99, 20.01, 50.0015],
        };
        let n = load_from_buffer(&options, SIMPLE_XML).unwrap();
        assert_eq!(n.nodes.len(), 8);
        assert!(!n.nodes.contains_key(&-5));
        assert!(!n.nodes.contains_key(&-6));

        let g = n.build_graph();
        assert_eq!(g.edge_count(), 7);
        assert!(!g.contains_node(-5));
        assert!(!g.contains_node(-6));
        assert_edge!(g, -2, -3);
        assert_edge!(g, -1, -10);
    }

    #[test]
    fn test_invalid_xml() {
        const DATA: &[u8] = b"<osm><way id='1'><nd ref='1' /></node></osm>";
        let options = Options {
            file_format: FileFormat::Xml,
            bbox: [0.0; 4],
        };
        assert!(matches!(
            load_from_buffer(&options, DATA),
            Err(Error::Xml(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_from_file(&Options::default(), "/nonexistent/path/to/file.osm"),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_routing() {
        let g = load_simple(FileFormat::Xml, SIMPLE_XML).build_graph();

        assert_eq!(find_route(&g, -1, -3), Ok(vec![-1, -2, -3]));
        assert_eq!(find_route(&g, -4, -2), Ok(vec![-4, -1, -2]));
        assert_eq!(find_route(&g, -10, -6), Ok(vec![-10, -1, -2, -5, -6]));

        // -3 is a dead-end
        assert_eq!(find_route(&g, -3, -1), Ok(vec![]));

        // -4 has no incoming edges
        let p = shortest_paths(&g, -1).unwrap();
        assert!(!p.is_reachable(-4));
        assert!(p.is_reachable(-3));
        assert_almost_eq!(
            p.distance(-3).unwrap(),
            g.get_weight(-1, -2) + g.get_weight(-2, -3)
        );
    }
}
